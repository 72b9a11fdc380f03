//! Serialization of arrays, binary and formatted
//!
//! Payload byte lengths always equal the results of [`crate::size`].

pub mod binary;
pub mod formatted;

use crate::error::{EclError, Result};
use crate::types::Array;
use std::io::Write;

/// Write arrays back to back in the binary encoding
pub fn write<W: Write>(writer: &mut W, arrays: &[Array]) -> Result<()> {
    for array in arrays {
        binary::write_array(writer, array)?;
    }
    Ok(())
}

/// Write arrays to bytes in the binary encoding
pub fn to_bytes(arrays: &[Array]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, arrays)?;
    Ok(buf)
}

/// Write arrays back to back in the formatted encoding
pub fn write_formatted<W: Write>(writer: &mut W, arrays: &[Array]) -> Result<()> {
    for array in arrays {
        formatted::write_array(writer, array)?;
    }
    Ok(())
}

/// Write arrays to a string in the formatted encoding
pub fn to_formatted(arrays: &[Array]) -> Result<String> {
    let mut buf = Vec::new();
    write_formatted(&mut buf, arrays)?;
    String::from_utf8(buf).map_err(|_| EclError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BINARY_HEADER_SIZE, ElementKind};

    #[test]
    fn test_write_several() {
        let arrays = vec![
            Array::int("INTEHEAD", vec![1, 2, 3]),
            Array::mess("ENDSOL"),
        ];
        let bytes = to_bytes(&arrays).unwrap();
        assert_eq!(bytes.len() as u64, 2 * BINARY_HEADER_SIZE + 3 * 4 + 8);
        assert_eq!(&bytes[4..12], b"INTEHEAD");
        assert_eq!(&bytes[4 + 44..12 + 44], b"ENDSOL  ");
    }

    #[test]
    fn test_formatted_several() {
        let arrays = vec![Array::logi("LOGIHEAD", vec![true]), Array::mess("ENDSOL")];
        let text = to_formatted(&arrays).unwrap();
        assert_eq!(
            text,
            " 'LOGIHEAD'           1 'LOGI'\n  T\n 'ENDSOL  '           0 'MESS'\n"
        );
    }

    #[test]
    fn test_mismatched_kind_rejected() {
        let array = Array {
            name: "BAD".into(),
            kind: ElementKind::Real64,
            data: crate::types::ArrayData::Int(vec![1]),
        };
        assert!(to_bytes(std::slice::from_ref(&array)).is_err());
        assert!(to_formatted(&[array]).is_err());
    }
}
