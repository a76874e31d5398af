//! File input and validation for the cutpoints pipeline.

mod domain;
mod error;
mod reader;

pub use domain::PointSet;
pub use error::IoError;
pub use reader::PointReader;
