//! Array header decoding, binary and formatted

use super::primitives::{read_i32, read_raw};
use super::text::TextCursor;
use crate::error::{EclError, Result};
use crate::types::{ArrayHeader, ElementKind, HEADER_RECORD_LEN, NAME_LEN, X231_BASE, X231_TAG};
use std::io::Read;

/// One framed 16-byte header record as stored on disk
struct HeaderRecord {
    name: [u8; NAME_LEN],
    count: i32,
    tag: [u8; 4],
}

fn read_header_record<R: Read + ?Sized>(reader: &mut R) -> Result<HeaderRecord> {
    let head = read_i32(reader)?;
    if head != HEADER_RECORD_LEN {
        return Err(EclError::malformed(format!(
            "leading frame marker is {}, expected {}",
            head, HEADER_RECORD_LEN
        )));
    }

    let name = read_raw::<_, NAME_LEN>(reader)?;
    let count = read_i32(reader)?;
    let tag = read_raw::<_, 4>(reader)?;

    let tail = read_i32(reader)?;
    if tail != head {
        return Err(EclError::malformed(format!(
            "trailing frame marker is {}, expected {}",
            tail, head
        )));
    }

    Ok(HeaderRecord { name, count, tag })
}

fn name_string(name: &[u8]) -> Result<String> {
    String::from_utf8(name.to_vec()).map_err(|_| EclError::malformed("array name is not text"))
}

/// Read a binary array header, resolving an `X231` extended-size pair.
///
/// The stream is left positioned at the first payload block.
#[tracing::instrument(skip_all)]
pub fn read_binary_header<R: Read + ?Sized>(reader: &mut R) -> Result<ArrayHeader> {
    let mut record = read_header_record(reader)?;
    let mut exponent = 0i64;

    // An X231 record is followed by exactly one continuation record
    if &record.tag == X231_TAG {
        let name = record.name;
        exponent = -i64::from(record.count);
        if exponent < 0 {
            return Err(EclError::ExtendedHeaderMismatch {
                name: String::from_utf8_lossy(&name).into_owned(),
                reason: "count field must be zero or negative",
            });
        }

        record = read_header_record(reader)?;
        if record.name != name {
            return Err(EclError::ExtendedHeaderMismatch {
                name: String::from_utf8_lossy(&name).into_owned(),
                reason: "continuation header has a different name",
            });
        }
    }

    if record.count < 0 {
        return Err(EclError::malformed(format!(
            "negative element count {}",
            record.count
        )));
    }

    let name = name_string(&record.name)?;
    let kind = ElementKind::from_tag(&record.tag)?;
    let declared_count = (i64::from(record.count) + exponent * X231_BASE) as u64;

    tracing::debug!(name = %name.trim_end(), declared_count, %kind, "binary header");

    Ok(ArrayHeader {
        name,
        declared_count,
        kind,
    })
}

/// Read a formatted header line of the form `'NAME    ' COUNT 'TYPE'`.
///
/// Blank lines before the header are skipped. The cursor is left at the start
/// of the following line.
#[tracing::instrument(skip_all)]
pub fn read_text_header(cursor: &mut TextCursor<'_>) -> Result<ArrayHeader> {
    let line = loop {
        match cursor.next_line() {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line,
            None => return Err(EclError::malformed("missing header line")),
        }
    };

    let quotes: Vec<usize> = line.match_indices('\'').map(|(i, _)| i).take(4).collect();
    let [q1, q2, q3, q4] = quotes[..] else {
        return Err(EclError::malformed(format!(
            "expected four quotes in header line {:?}",
            line
        )));
    };

    let name = &line[q1 + 1..q2];
    if name.chars().count() != NAME_LEN {
        return Err(EclError::malformed(format!(
            "array name {:?} is not {} characters",
            name, NAME_LEN
        )));
    }

    let count_field = line[q2 + 1..q3].trim();
    let declared_count: u64 = count_field.parse().map_err(|_| {
        EclError::malformed(format!("invalid element count {:?}", count_field))
    })?;

    let kind = ElementKind::from_tag(line[q3 + 1..q4].as_bytes())?;

    tracing::debug!(name = %name.trim_end(), declared_count, %kind, "formatted header");

    Ok(ArrayHeader {
        name: name.to_string(),
        declared_count,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(name: &[u8; 8], count: i32, tag: &[u8; 4]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&16i32.to_be_bytes());
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes.extend_from_slice(tag);
        bytes.extend_from_slice(&16i32.to_be_bytes());
        bytes
    }

    #[test]
    fn binary_header() {
        let bytes = record(b"WELNAME ", 12, b"INTE");
        let mut cursor = Cursor::new(bytes);
        let header = read_binary_header(&mut cursor).unwrap();
        assert_eq!(header.name, "WELNAME ");
        assert_eq!(header.declared_count, 12);
        assert_eq!(header.kind, ElementKind::Int32);
        assert_eq!(cursor.position(), 24);
    }

    #[test]
    fn binary_header_dynamic_char() {
        let bytes = record(b"ZWEL    ", 3, b"C042");
        let header = read_binary_header(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(header.kind, ElementKind::DynChar(42));
        assert_eq!(header.element_width(), 42);
    }

    #[test]
    fn binary_header_bad_marker() {
        let mut bytes = record(b"WELNAME ", 12, b"INTE");
        bytes[3] = 15;
        assert!(matches!(
            read_binary_header(&mut Cursor::new(bytes)),
            Err(EclError::MalformedHeader(_))
        ));

        let mut bytes = record(b"WELNAME ", 12, b"INTE");
        bytes[23] = 17;
        assert!(matches!(
            read_binary_header(&mut Cursor::new(bytes)),
            Err(EclError::MalformedHeader(_))
        ));
    }

    #[test]
    fn binary_header_unknown_type() {
        let bytes = record(b"WELNAME ", 1, b"BOOL");
        assert!(matches!(
            read_binary_header(&mut Cursor::new(bytes)),
            Err(EclError::UnknownType(tag)) if tag == "BOOL"
        ));
    }

    #[test]
    fn binary_header_truncated() {
        let bytes = record(b"WELNAME ", 1, b"INTE");
        assert!(matches!(
            read_binary_header(&mut Cursor::new(&bytes[..20])),
            Err(EclError::Io(_))
        ));
    }

    #[test]
    fn extended_header() {
        let mut bytes = record(b"BIGARRAY", -1, b"X231");
        bytes.extend(record(b"BIGARRAY", 0, b"DOUB"));
        let mut cursor = Cursor::new(bytes);
        let header = read_binary_header(&mut cursor).unwrap();
        assert_eq!(header.declared_count, 2_147_483_648);
        assert_eq!(header.kind, ElementKind::Real64);
        assert_eq!(cursor.position(), 48);
    }

    #[test]
    fn extended_header_with_mantissa() {
        let mut bytes = record(b"BIGARRAY", -2, b"X231");
        bytes.extend(record(b"BIGARRAY", 5, b"INTE"));
        let header = read_binary_header(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(header.declared_count, 2 * (1u64 << 31) + 5);
    }

    #[test]
    fn extended_header_positive_count() {
        let mut bytes = record(b"BIGARRAY", 1, b"X231");
        bytes.extend(record(b"BIGARRAY", 0, b"INTE"));
        assert!(matches!(
            read_binary_header(&mut Cursor::new(bytes)),
            Err(EclError::ExtendedHeaderMismatch { .. })
        ));
    }

    #[test]
    fn extended_header_name_mismatch() {
        let mut bytes = record(b"BIGARRAY", -1, b"X231");
        bytes.extend(record(b"OTHERARR", 0, b"INTE"));
        assert!(matches!(
            read_binary_header(&mut Cursor::new(bytes)),
            Err(EclError::ExtendedHeaderMismatch { .. })
        ));
    }

    #[test]
    fn extended_header_does_not_chain() {
        let mut bytes = record(b"BIGARRAY", -1, b"X231");
        bytes.extend(record(b"BIGARRAY", -1, b"X231"));
        assert!(read_binary_header(&mut Cursor::new(bytes)).is_err());
    }

    #[test]
    fn text_header() {
        let text = " 'WELNAME '          12 'INTE'\n           1\n";
        let mut cursor = TextCursor::new(text);
        let header = read_text_header(&mut cursor).unwrap();
        assert_eq!(header.name, "WELNAME ");
        assert_eq!(header.declared_count, 12);
        assert_eq!(header.kind, ElementKind::Int32);
        assert_eq!(cursor.position(), text.find("\n").unwrap() + 1);
    }

    #[test]
    fn text_header_name_too_long() {
        let mut cursor = TextCursor::new(" 'TOOLONGNAME' 12 'INTE'\n");
        assert!(matches!(
            read_text_header(&mut cursor),
            Err(EclError::MalformedHeader(_))
        ));
    }

    #[test]
    fn text_header_missing_quotes() {
        let mut cursor = TextCursor::new(" 'WELNAME ' 12 INTE\n");
        assert!(matches!(
            read_text_header(&mut cursor),
            Err(EclError::MalformedHeader(_))
        ));
    }

    #[test]
    fn text_header_rejects_x231() {
        let mut cursor = TextCursor::new(" 'BIGARRAY'          -1 'X231'\n");
        assert!(read_text_header(&mut cursor).is_err());
    }

    #[test]
    fn text_header_skips_blank_lines() {
        let mut cursor = TextCursor::new("\n  \n 'ZWEL    ' 2 'C012'");
        let header = read_text_header(&mut cursor).unwrap();
        assert_eq!(header.kind, ElementKind::DynChar(12));
        assert_eq!(header.declared_count, 2);
    }
}
