pub mod api;
pub mod error;
pub mod reader;
mod serialization;
pub mod utils;
pub mod value;

pub use api::{parse, parse_with_name};
pub use error::{EdnError, ReaderError};
pub use value::Value;
