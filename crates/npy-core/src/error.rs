use std::error;
use std::fmt;
use std::io;

use crate::element::{ElementType, Number};

/// Everything that can go wrong while encoding or writing an array
#[derive(Debug)]
pub enum NpyError {
    /// number of values does not agree with the shape
    ShapeMismatch {
        /// requested shape
        shape: Vec<usize>,
        /// number of values supplied
        len: usize,
    },
    /// element type tag is not one of `<f8`, `<f4`, `<i8`, `<i4`
    UnsupportedElementType(String),
    /// a value cannot be represented in the target element type
    ValueOutOfRange {
        /// position of the value in the input
        index: usize,
        /// the offending value
        value: Number,
        /// target element type
        element_type: ElementType,
    },
    /// writing to the destination failed
    IoFailure(io::Error),
}
use self::NpyError::*;

impl error::Error for NpyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            IoFailure(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for NpyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShapeMismatch { ref shape, len } => {
                write!(f, "ShapeMismatch: {} values do not fit shape {:?}", len, shape)
            }
            UnsupportedElementType(ref tag) => write!(f, "UnsupportedElementType: {}", tag),
            ValueOutOfRange { index, ref value, element_type } => write!(
                f,
                "ValueOutOfRange: value {} at index {} does not fit {}",
                value, index, element_type
            ),
            IoFailure(ref err) => write!(f, "IoFailure: {}", err),
        }
    }
}

impl From<io::Error> for NpyError {
    fn from(err: io::Error) -> Self {
        IoFailure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_print_shape_mismatch() {
        let err = ShapeMismatch { shape: vec![2, 3], len: 5 };
        assert_eq!(format!("{}", err), "ShapeMismatch: 5 values do not fit shape [2, 3]");
    }

    #[test]
    fn should_print_value_out_of_range() {
        let err = ValueOutOfRange {
            index: 3,
            value: Number::Int(1 << 31),
            element_type: ElementType::Int32,
        };
        assert_eq!(
            format!("{}", err),
            "ValueOutOfRange: value 2147483648 at index 3 does not fit <i4"
        );
    }

    #[test]
    fn should_expose_io_source() {
        let err: NpyError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(error::Error::source(&err).is_some());
        assert!(error::Error::source(&UnsupportedElementType("<f2".into())).is_none());
    }
}
