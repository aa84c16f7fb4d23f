//! Element types of an array and the values that go into it.
//!
//! `ElementType` is the tag written into the header's `descr` field. Values
//! arrive either as `Number`s, whose representation is only checked when
//! packed, or as slices of a Rust primitive implementing `Element`.

use std::convert::TryFrom;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::NpyError;

/// numeric kind of an element type
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// IEEE-754 floating point
    Float,
    /// two's-complement signed integer
    SignedInt,
}

impl Kind {
    /// type code character used in descriptors
    pub fn code(self) -> char {
        match self {
            Kind::Float => 'f',
            Kind::SignedInt => 'i',
        }
    }
}

/// The four supported element types, all little-endian
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ElementType {
    /// `<f8`
    Float64,
    /// `<f4`
    Float32,
    /// `<i8`
    Int64,
    /// `<i4`
    Int32,
}

impl ElementType {
    /// all supported element types
    pub const ALL: [ElementType; 4] = [
        ElementType::Float64,
        ElementType::Float32,
        ElementType::Int64,
        ElementType::Int32,
    ];

    /// size of one element in bytes
    pub fn byte_width(self) -> usize {
        match self {
            ElementType::Float64 | ElementType::Int64 => 8,
            ElementType::Float32 | ElementType::Int32 => 4,
        }
    }

    /// numeric kind
    pub fn kind(self) -> Kind {
        match self {
            ElementType::Float64 | ElementType::Float32 => Kind::Float,
            ElementType::Int64 | ElementType::Int32 => Kind::SignedInt,
        }
    }

    /// format descriptor, e.g. `<f8`
    pub fn descr(self) -> &'static str {
        match self {
            ElementType::Float64 => "<f8",
            ElementType::Float32 => "<f4",
            ElementType::Int64 => "<i8",
            ElementType::Int32 => "<i4",
        }
    }

    /// Converts `value` to this type and appends its little-endian bytes.
    /// `index` is only used for error reporting.
    pub fn pack<W: Write>(self, wtr: &mut W, index: usize, value: Number) -> Result<(), NpyError> {
        let out_of_range = || NpyError::ValueOutOfRange {
            index,
            value,
            element_type: self,
        };
        match self {
            ElementType::Float64 => wtr.write_f64::<LittleEndian>(value.to_f64())?,
            ElementType::Float32 => {
                wtr.write_f32::<LittleEndian>(value.to_f32().ok_or_else(out_of_range)?)?
            }
            ElementType::Int64 => {
                wtr.write_i64::<LittleEndian>(value.to_i64().ok_or_else(out_of_range)?)?
            }
            ElementType::Int32 => {
                wtr.write_i32::<LittleEndian>(value.to_i32().ok_or_else(out_of_range)?)?
            }
        }
        Ok(())
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.descr())
    }
}

impl FromStr for ElementType {
    type Err = NpyError;

    /// Accepts descriptors (`<f8`), bare type codes (`f8`), numpy names
    /// (`float64`) and the C names the fixture files use (`double`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<f8" | "f8" | "float64" | "double" => Ok(ElementType::Float64),
            "<f4" | "f4" | "float32" | "float" => Ok(ElementType::Float32),
            "<i8" | "i8" | "int64" | "long" => Ok(ElementType::Int64),
            "<i4" | "i4" | "int32" | "int" => Ok(ElementType::Int32),
            other => Err(NpyError::UnsupportedElementType(other.to_owned())),
        }
    }
}

/// A dynamically typed input value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// signed integer
    Int(i64),
    /// unsigned integer, for values above `i64::MAX`
    UInt(u64),
    /// floating point
    Float(f64),
}

// 2^63, exactly representable; i64::MAX as f64 rounds up to it
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Number {
    /// as f64, rounding to nearest
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }

    /// as f32, rounding to nearest. `None` if a finite value overflows.
    pub fn to_f32(self) -> Option<f32> {
        match self {
            Number::Int(i) => Some(i as f32),
            Number::UInt(u) => Some(u as f32),
            Number::Float(f) => {
                let narrowed = f as f32;
                if f.is_finite() && narrowed.is_infinite() {
                    None
                } else {
                    Some(narrowed)
                }
            }
        }
    }

    /// as i64 if exactly representable
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::UInt(u) => i64::try_from(u).ok(),
            Number::Float(f) => {
                if is_integral(f) && f >= -I64_BOUND && f < I64_BOUND {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// as i32 if exactly representable
    pub fn to_i32(self) -> Option<i32> {
        match self {
            Number::Int(i) => i32::try_from(i).ok(),
            Number::UInt(u) => i32::try_from(u).ok(),
            Number::Float(f) => {
                if is_integral(f) && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                    Some(f as i32)
                } else {
                    None
                }
            }
        }
    }
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $as:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Number::$variant(v as $as)
                }
            }
        )*
    };
}

number_from!(Int, i64, i8, i16, i32, i64, isize);
number_from!(UInt, u64, u8, u16, u32, u64, usize);
number_from!(Float, f64, f32, f64);

/// Rust primitives that map directly onto an element type
pub trait Element: Copy {
    /// the element type this primitive is written as
    const ELEMENT_TYPE: ElementType;

    /// write the little-endian bytes of this value
    fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident, $write:ident) => {
        impl Element for $t {
            const ELEMENT_TYPE: ElementType = ElementType::$variant;

            fn write_le<W: Write>(self, wtr: &mut W) -> io::Result<()> {
                wtr.$write::<LittleEndian>(self)
            }
        }
    };
}

impl_element!(f64, Float64, write_f64);
impl_element!(f32, Float32, write_f32);
impl_element!(i64, Int64, write_i64);
impl_element!(i32, Int32, write_i32);
