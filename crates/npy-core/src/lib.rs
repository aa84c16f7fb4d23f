//! npy_core writes arrays in the numpy .npy file format
#![deny(missing_docs)]

extern crate byteorder;
#[macro_use]
extern crate log;

/// element types and input values
pub mod element;
/// error taxonomy
pub mod error;
/// .npy encoder
pub mod file_format;
/// .npy header
pub mod header;

pub use crate::element::{Element, ElementType, Number};
pub use crate::error::NpyError;
pub use crate::file_format::{encode, encode_slice, save, save_slice, write_file};
