//!
//! Header of the .npy format
//!
//! Header Spec:
//! Offset 00: ([u8; 6]) magic value 0x934E554D5059 ("\x93NUMPY")
//! Offset 06: (u8) major version
//! Offset 07: (u8) minor version
//! Offset 08: (u16 LE) length of the metadata text (v1.0)
//!            (u32 LE) on v2.0, shifting the text to offset 12
//! Offset 10: metadata text, a python dict literal:
//!            {'descr': '<f8', 'fortran_order': False, 'shape': (5,), }
//!            right padded with spaces and terminated by '\n' so that
//!            the whole header is a multiple of 64 bytes

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::element::ElementType;

/// magic prefix of every .npy file
pub static MAGIC_VALUE: &[u8] = &[0x93, 0x4E, 0x55, 0x4D, 0x50, 0x59];
/// header length is always a multiple of this
pub const HEADER_ALIGNMENT: usize = 64;

/// Format version written after the magic value
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Version {
    /// 1.0, u16 header length
    V1,
    /// 2.0, u32 header length
    V2,
}

impl Version {
    /// (major, minor)
    pub fn bytes(self) -> [u8; 2] {
        match self {
            Version::V1 => [0x01, 0x00],
            Version::V2 => [0x02, 0x00],
        }
    }

    fn len_field_size(self) -> usize {
        match self {
            Version::V1 => 2,
            Version::V2 => 4,
        }
    }

    fn prefix_len(self) -> usize {
        MAGIC_VALUE.len() + 2 + self.len_field_size()
    }
}

/// Header of one array file
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// `descr`
    pub element_type: ElementType,
    /// `fortran_order`; always false for arrays this crate writes
    pub fortran_order: bool,
    /// `shape`
    pub shape: Vec<usize>,
}

impl Header {
    /// row-major header for an array of `shape`
    pub fn new(element_type: ElementType, shape: &[usize]) -> Header {
        Header {
            element_type,
            fortran_order: false,
            shape: shape.to_vec(),
        }
    }

    /// metadata dictionary before padding
    pub fn dict_literal(&self) -> String {
        format!(
            "{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
            self.element_type.descr(),
            if self.fortran_order { "True" } else { "False" },
            shape_tuple(&self.shape),
        )
    }

    /// Smallest version whose length field fits the padded metadata.
    pub fn version(&self) -> Version {
        let text_len = padded_len(self.dict_literal().len(), Version::V1);
        if text_len <= u16::max_value() as usize {
            Version::V1
        } else {
            Version::V2
        }
    }

    /// total header length in bytes, magic value included
    pub fn size(&self) -> usize {
        let version = self.version();
        version.prefix_len() + padded_len(self.dict_literal().len(), version)
    }

    /// Writes the complete header and returns the number of bytes written.
    pub fn write(&self, wtr: &mut dyn Write) -> Result<usize, io::Error> {
        let version = self.version();
        let dict = self.dict_literal();
        let text_len = padded_len(dict.len(), version);

        wtr.write_all(MAGIC_VALUE)?;
        wtr.write_all(&version.bytes())?;
        match version {
            Version::V1 => wtr.write_u16::<LittleEndian>(text_len as u16)?,
            Version::V2 => wtr.write_u32::<LittleEndian>(text_len as u32)?,
        }
        // right pad w/ space, newline last
        let padded = format!("{:width$}\n", dict, width = text_len - 1);
        debug_assert_eq!(padded.len(), text_len);
        wtr.write_all(padded.as_bytes())?;

        Ok(version.prefix_len() + text_len)
    }
}

/// length of the metadata text once padded and newline terminated
fn padded_len(dict_len: usize, version: Version) -> usize {
    let unpadded = version.prefix_len() + dict_len + 1;
    let total = (unpadded + HEADER_ALIGNMENT - 1) / HEADER_ALIGNMENT * HEADER_ALIGNMENT;
    total - version.prefix_len()
}

/// python tuple syntax: (5,) or (2, 3)
fn shape_tuple(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_owned(),
        [n] => format!("({},)", n),
        dims => {
            let dims: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", dims.join(", "))
        }
    }
}
