pub mod binary_field;
pub mod computer;
pub mod curve;
pub mod error;
pub mod file_format;
pub mod instruction;
pub mod point;
pub mod prime_field;
pub mod utils;

pub use computer::Computer;
pub use curve::{Coefficients, Curve, CurveType, Payload};
pub use error::{CurveError, Result};
pub use point::{Point, PointParams};
