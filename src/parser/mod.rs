//! Array decoding, binary and formatted
//!
//! A caller reads a header first, then the payload with the declared count.
//! The one-call readers here do both and dispatch on the element kind.

mod block;
mod header;
mod primitives;
mod text;

pub use block::{
    CharElement, DoubElement, ElementConverter, IntElement, LogiElement, RealElement, read_blocks,
};
pub use header::{read_binary_header, read_text_header};
pub use primitives::{normalize_f32, normalize_f64, normalize_i32, normalize_i64};
pub use text::{
    DoubToken, IntToken, LogiToken, RawToken, RealToken, TextCursor, TokenParser, decode_text_logicals,
    decode_text_raw, decode_text_strings, decode_tokens,
};

use crate::error::{EclError, Result};
use crate::types::{Array, ArrayData, ArrayHeader, ElementKind, ReadOptions};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Read the payload of an array whose binary header was already read
pub fn read_binary_payload<R: Read + ?Sized>(
    reader: &mut R,
    header: &ArrayHeader,
    options: &ReadOptions,
) -> Result<ArrayData> {
    let count = header.declared_count;
    let kind = header.kind;
    let data = match kind {
        ElementKind::Int32 => ArrayData::Int(read_blocks(reader, count, kind, &IntElement)?),
        ElementKind::Real32 => ArrayData::Real(read_blocks(reader, count, kind, &RealElement)?),
        ElementKind::Real64 => ArrayData::Doub(read_blocks(reader, count, kind, &DoubElement)?),
        ElementKind::Logical => ArrayData::Logi(read_blocks(
            reader,
            count,
            kind,
            &LogiElement(options.logical),
        )?),
        ElementKind::FixedChar8 | ElementKind::DynChar(_) => {
            ArrayData::Char(read_blocks(reader, count, kind, &CharElement)?)
        }
        ElementKind::Marker => {
            if count > 0 {
                return Err(EclError::UnsupportedType { kind, count });
            }
            ArrayData::Mess
        }
    };
    Ok(data)
}

/// Read one complete binary array (header and payload)
#[tracing::instrument(skip_all)]
pub fn read_binary_array<R: Read + ?Sized>(reader: &mut R, options: &ReadOptions) -> Result<Array> {
    let header = read_binary_header(reader)?;
    let data = read_binary_payload(reader, &header, options)?;
    Ok(Array {
        name: header.trimmed_name().to_string(),
        kind: header.kind,
        data,
    })
}

/// Seek past the payload of an array whose binary header was already read.
///
/// Returns the number of bytes skipped.
pub fn skip_binary_payload<R: Seek + ?Sized>(reader: &mut R, header: &ArrayHeader) -> Result<u64> {
    let size = header.payload_size_binary()?;
    let offset = i64::try_from(size)
        .map_err(|_| EclError::UnsupportedType { kind: header.kind, count: header.declared_count })?;
    reader.seek(SeekFrom::Current(offset))?;
    Ok(size)
}

/// Read the payload of an array whose formatted header was already read
pub fn read_text_payload(
    cursor: &mut TextCursor<'_>,
    header: &ArrayHeader,
) -> Result<ArrayData> {
    let count = header.declared_count;
    let data = match header.kind {
        ElementKind::Int32 => ArrayData::Int(decode_tokens(cursor, count, &IntToken)?),
        ElementKind::Real32 => ArrayData::Real(decode_tokens(cursor, count, &RealToken)?),
        ElementKind::Real64 => ArrayData::Doub(decode_tokens(cursor, count, &DoubToken)?),
        ElementKind::Logical => ArrayData::Logi(decode_text_logicals(cursor, count)?),
        kind @ (ElementKind::FixedChar8 | ElementKind::DynChar(_)) => {
            ArrayData::Char(decode_text_strings(cursor, count, kind.element_width())?)
        }
        kind @ ElementKind::Marker => {
            if count > 0 {
                return Err(EclError::UnsupportedType { kind, count });
            }
            ArrayData::Mess
        }
    };
    Ok(data)
}

/// Read one complete formatted array (header line and payload)
#[tracing::instrument(skip_all)]
pub fn read_text_array(cursor: &mut TextCursor<'_>) -> Result<Array> {
    let header = read_text_header(cursor)?;
    let data = read_text_payload(cursor, &header)?;
    Ok(Array {
        name: header.trimmed_name().to_string(),
        kind: header.kind,
        data,
    })
}

/// Decode every array in a binary buffer
pub fn parse_binary(bytes: &[u8], options: &ReadOptions) -> Result<Vec<Array>> {
    let mut cursor = Cursor::new(bytes);
    let mut arrays = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        arrays.push(read_binary_array(&mut cursor, options)?);
    }
    Ok(arrays)
}

/// Decode every array in a formatted buffer
pub fn parse_formatted(text: &str) -> Result<Vec<Array>> {
    let mut cursor = TextCursor::new(text);
    let mut arrays = Vec::new();
    while !cursor.is_exhausted() {
        arrays.push(read_text_array(&mut cursor)?);
    }
    Ok(arrays)
}
