//! Binary serialization

use crate::error::{EclError, Result};
use crate::parser::{normalize_f32, normalize_f64, normalize_i32};
use crate::types::{
    Array, ArrayData, ElementKind, HEADER_RECORD_LEN, LogicalSentinels, NAME_LEN, X231_BASE,
    X231_TAG,
};
use byteorder::{NativeEndian, WriteBytesExt};
use std::io::Write;

fn write_i32<W: Write + ?Sized>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_i32::<NativeEndian>(normalize_i32(value))?;
    Ok(())
}

fn padded_name(name: &str) -> Result<[u8; NAME_LEN]> {
    if name.len() > NAME_LEN {
        return Err(EclError::malformed(format!(
            "array name {:?} is longer than {} characters",
            name, NAME_LEN
        )));
    }
    let mut field = [b' '; NAME_LEN];
    field[..name.len()].copy_from_slice(name.as_bytes());
    Ok(field)
}

fn write_record<W: Write + ?Sized>(
    writer: &mut W,
    name: &[u8; NAME_LEN],
    count: i32,
    tag: &[u8],
) -> Result<()> {
    write_i32(writer, HEADER_RECORD_LEN)?;
    writer.write_all(name)?;
    write_i32(writer, count)?;
    writer.write_all(tag)?;
    write_i32(writer, HEADER_RECORD_LEN)?;
    Ok(())
}

/// Write a framed header; counts past `i32::MAX` get an `X231` record first
pub fn write_header<W: Write + ?Sized>(
    writer: &mut W,
    name: &str,
    count: u64,
    kind: ElementKind,
) -> Result<()> {
    let name = padded_name(name)?;
    let tag = kind.tag();
    if tag.len() != 4 {
        return Err(EclError::UnknownType(tag));
    }

    let base = X231_BASE as u64;
    let exponent = count / base;
    let mantissa = (count % base) as i32;
    if exponent > 0 {
        let exponent = i32::try_from(exponent)
            .map_err(|_| EclError::UnsupportedType { kind, count })?;
        write_record(writer, &name, -exponent, X231_TAG)?;
    }
    write_record(writer, &name, mantissa, tag.as_bytes())
}

/// Write values in blocks of at most the kind's capacity
fn write_blocks<W, T>(
    writer: &mut W,
    values: &[T],
    kind: ElementKind,
    mut put: impl FnMut(&mut Vec<u8>, &T) -> Result<()>,
) -> Result<()>
where
    W: Write + ?Sized,
{
    if values.is_empty() {
        return Ok(());
    }
    let layout = kind.binary_layout()?;
    let mut payload = Vec::with_capacity(layout.max_block_bytes);

    for chunk in values.chunks(layout.max_elements()) {
        payload.clear();
        for value in chunk {
            put(&mut payload, value)?;
        }
        let len = payload.len() as i32;
        write_i32(writer, len)?;
        writer.write_all(&payload)?;
        write_i32(writer, len)?;
    }
    Ok(())
}

/// Write an array payload (no header)
pub fn write_payload<W: Write + ?Sized>(
    writer: &mut W,
    data: &ArrayData,
    kind: ElementKind,
) -> Result<()> {
    if !data.matches(kind) {
        return Err(EclError::KindMismatch {
            kind,
            data: data.kind_name(),
        });
    }

    match data {
        ArrayData::Int(v) => write_blocks(writer, v, kind, |buf, x| {
            buf.write_i32::<NativeEndian>(normalize_i32(*x))?;
            Ok(())
        }),
        ArrayData::Real(v) => write_blocks(writer, v, kind, |buf, x| {
            buf.write_f32::<NativeEndian>(normalize_f32(*x))?;
            Ok(())
        }),
        ArrayData::Doub(v) => write_blocks(writer, v, kind, |buf, x| {
            buf.write_f64::<NativeEndian>(normalize_f64(*x))?;
            Ok(())
        }),
        ArrayData::Logi(v) => {
            let sentinels = LogicalSentinels::default();
            write_blocks(writer, v, kind, |buf, x| {
                buf.write_i32::<NativeEndian>(normalize_i32(sentinels.encode(*x) as i32))?;
                Ok(())
            })
        }
        ArrayData::Char(v) => {
            let width = kind.element_width();
            write_blocks(writer, v, kind, |buf, s| {
                if s.len() > width {
                    return Err(EclError::ValueTooWide {
                        value: s.clone(),
                        width,
                    });
                }
                buf.extend_from_slice(s.as_bytes());
                buf.resize(buf.len() + width - s.len(), b' ');
                Ok(())
            })
        }
        ArrayData::Mess => Ok(()),
    }
}

/// Write one array, header and payload
pub fn write_array<W: Write + ?Sized>(writer: &mut W, array: &Array) -> Result<()> {
    write_header(writer, &array.name, array.data.len() as u64, array.kind)?;
    write_payload(writer, &array.data, array.kind)
}
