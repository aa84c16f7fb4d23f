//!
//! Encoder for the numpy .npy array file format
//!
//! File Spec:
//! Offset 00: header, see `crate::header`. Always a multiple of 64 bytes.
//! Offset N:  payload, every element little-endian in row-major order
//!            (IEEE-754 for floats, two's-complement for integers)
//!
//! The whole file is built in memory before the destination is opened, so
//! a failed encode never leaves a truncated file behind.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::element::{Element, ElementType, Number};
use crate::error::NpyError;
use crate::header::Header;

/// Checks that `len` values fill `shape` exactly. Every dimension must be
/// positive and there must be at least one.
pub fn check_shape(shape: &[usize], len: usize) -> Result<(), NpyError> {
    let mismatch = || NpyError::ShapeMismatch {
        shape: shape.to_vec(),
        len,
    };
    if shape.is_empty() || shape.contains(&0) {
        return Err(mismatch());
    }
    let count = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(mismatch)?;
    if count != len {
        return Err(mismatch());
    }
    Ok(())
}

fn buffer_for(header: &Header, len: usize) -> Result<Vec<u8>, NpyError> {
    let mut buf = Vec::with_capacity(header.size() + len * header.element_type.byte_width());
    header.write(&mut buf)?;
    Ok(buf)
}

/// Encodes `values` as an array of `element_type` with `shape`.
///
/// Values are converted one by one; the first one that cannot be
/// represented in `element_type` aborts the encode.
pub fn encode(values: &[Number], element_type: ElementType, shape: &[usize]) -> Result<Vec<u8>, NpyError> {
    check_shape(shape, values.len())?;

    let header = Header::new(element_type, shape);
    let mut buf = buffer_for(&header, values.len())?;
    for (i, &value) in values.iter().enumerate() {
        element_type.pack(&mut buf, i, value)?;
    }

    debug!(
        "encoded {} values as {} {:?} ({} bytes)",
        values.len(),
        element_type,
        shape,
        buf.len()
    );
    Ok(buf)
}

/// Encodes a slice of primitives; the element type follows from `T`.
pub fn encode_slice<T: Element>(values: &[T], shape: &[usize]) -> Result<Vec<u8>, NpyError> {
    check_shape(shape, values.len())?;

    let header = Header::new(T::ELEMENT_TYPE, shape);
    let mut buf = buffer_for(&header, values.len())?;
    for &value in values {
        value.write_le(&mut buf)?;
    }

    debug!(
        "encoded {} values as {} {:?} ({} bytes)",
        values.len(),
        T::ELEMENT_TYPE,
        shape,
        buf.len()
    );
    Ok(buf)
}

fn file_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>, io::Error> {
    let new_file = File::create(path)?;
    Ok(BufWriter::new(new_file))
}

/// Creates or truncates `path` and writes `bytes` to it.
pub fn write_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), NpyError> {
    let path = path.as_ref();
    let mut wtr = file_writer(path)?;
    wtr.write_all(bytes)?;
    wtr.flush()?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// `encode` then `write_file`. Nothing is opened if encoding fails.
pub fn save<P: AsRef<Path>>(
    path: P,
    values: &[Number],
    element_type: ElementType,
    shape: &[usize],
) -> Result<(), NpyError> {
    let bytes = encode(values, element_type, shape)?;
    write_file(path, &bytes)
}

/// `encode_slice` then `write_file`.
pub fn save_slice<P: AsRef<Path>, T: Element>(path: P, values: &[T], shape: &[usize]) -> Result<(), NpyError> {
    let bytes = encode_slice(values, shape)?;
    write_file(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_ALIGNMENT;
    use tempdir::TempDir;

    fn one_to_five() -> Vec<Number> {
        (1..=5i64).map(Number::from).collect()
    }

    #[test]
    fn should_encode_float64_payload() {
        let bytes = encode(&one_to_five(), ElementType::Float64, &[5]).unwrap();
        assert_eq!(bytes.len(), 128 + 40);

        let payload: Vec<u8> = [1.0f64, 2.0, 3.0, 4.0, 5.0]
            .iter()
            .flat_map(|v| v.to_le_bytes().to_vec())
            .collect();
        assert_eq!(&bytes[128..], payload.as_slice());
    }

    #[test]
    fn should_encode_int32_payload() {
        let bytes = encode(&one_to_five(), ElementType::Int32, &[5]).unwrap();
        let payload = &bytes[128..];
        assert_eq!(payload.len(), 20);
        assert_eq!(
            payload,
            &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0][..]
        );
    }

    #[test]
    fn should_size_output_by_element_width() {
        for t in ElementType::ALL.iter() {
            let bytes = encode(&one_to_five(), *t, &[5]).unwrap();
            let header_len = Header::new(*t, &[5]).size();
            assert_eq!(header_len % HEADER_ALIGNMENT, 0);
            assert_eq!(bytes.len(), header_len + 5 * t.byte_width());
        }
    }

    #[test]
    fn should_match_typed_and_dynamic_encoders() {
        let ints = [1i64, -2, 3, i64::MIN, i64::MAX, 0];
        let dynamic: Vec<Number> = ints.iter().map(|&i| Number::from(i)).collect();
        assert_eq!(
            encode_slice(&ints, &[2, 3]).unwrap(),
            encode(&dynamic, ElementType::Int64, &[2, 3]).unwrap()
        );

        let floats = [0.5f32, -1.25, 3.0];
        let dynamic: Vec<Number> = floats.iter().map(|&f| Number::from(f)).collect();
        assert_eq!(
            encode_slice(&floats, &[3]).unwrap(),
            encode(&dynamic, ElementType::Float32, &[3]).unwrap()
        );
    }

    #[test]
    fn should_keep_row_major_order() {
        let values: Vec<Number> = (0..6i64).map(Number::from).collect();
        let bytes = encode(&values, ElementType::Int32, &[2, 3]).unwrap();
        let header_len = Header::new(ElementType::Int32, &[2, 3]).size();
        let payload: Vec<i32> = bytes[header_len..]
            .chunks(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(payload, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn should_reject_shape_mismatch() {
        match encode(&one_to_five(), ElementType::Float64, &[2, 3]) {
            Err(NpyError::ShapeMismatch { shape, len }) => {
                assert_eq!(shape, vec![2, 3]);
                assert_eq!(len, 5);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(check_shape(&[], 1).is_err());
        assert!(check_shape(&[0], 0).is_err());
        assert!(check_shape(&[usize::max_value(), 2], 0).is_err());
        assert!(check_shape(&[1, 5, 1], 5).is_ok());
    }

    #[test]
    fn should_reject_int32_overflow() {
        let mut values = one_to_five();
        values[4] = Number::Int(1 << 31);
        match encode(&values, ElementType::Int32, &[5]) {
            Err(NpyError::ValueOutOfRange { index, value, element_type }) => {
                assert_eq!(index, 4);
                assert_eq!(value, Number::Int(2_147_483_648));
                assert_eq!(element_type, ElementType::Int32);
            }
            other => panic!("unexpected {:?}", other),
        }
        // fits int64
        assert!(encode(&values, ElementType::Int64, &[5]).is_ok());
    }

    #[test]
    fn should_not_create_file_on_failed_encode() {
        let dir = TempDir::new("npy").unwrap();
        let path = dir.path().join("mismatch.npy");
        assert!(save(&path, &one_to_five(), ElementType::Float64, &[4]).is_err());
        assert!(!path.exists());

        let path = dir.path().join("overflow.npy");
        let values = vec![Number::UInt(u64::max_value())];
        assert!(save(&path, &values, ElementType::Int64, &[1]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn should_save_and_overwrite() {
        let dir = TempDir::new("npy").unwrap();
        let path = dir.path().join("npy-long.npy");

        save(&path, &one_to_five(), ElementType::Int64, &[5]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap().len(), 168);

        save_slice(&path, &[1i32, 2, 3, 4, 5], &[5]).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, encode(&one_to_five(), ElementType::Int32, &[5]).unwrap());
        assert_eq!(bytes.len(), 148);
    }

    #[test]
    fn should_surface_io_failure() {
        let dir = TempDir::new("npy").unwrap();
        let path = dir.path().join("missing").join("out.npy");
        match write_file(&path, &[0u8; 4]) {
            Err(NpyError::IoFailure(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
