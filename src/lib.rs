#![doc = include_str!("../README.md")]

mod errors;
mod number_decoder;
mod object;
mod parse;
mod string_decoder;
mod value;
mod write;

pub use errors::{JsonError, JsonErrorType, JsonResult, LinePosition, WriteError, WriteResult};
pub use number_decoder::{NumberInt, RawNumber};
pub use object::{Entries, OrderedObject};
pub use value::{OrderedArray, OrderedValue};
