//! Formatted (text) serialization

use crate::error::{EclError, Result};
use crate::types::{Array, ArrayData, ElementKind, NAME_LEN};
use std::io::Write;

/// Write the header line ` 'NAME    '       COUNT 'TYPE'`
pub fn write_header<W: Write + ?Sized>(
    writer: &mut W,
    name: &str,
    count: u64,
    kind: ElementKind,
) -> Result<()> {
    if name.chars().count() > NAME_LEN {
        return Err(EclError::malformed(format!(
            "array name {:?} is longer than {} characters",
            name, NAME_LEN
        )));
    }
    let tag = kind.tag();
    if tag.len() != 4 {
        return Err(EclError::UnknownType(tag));
    }
    writeln!(writer, " '{:<8}' {:>11} '{}'", name, count, tag)?;
    Ok(())
}

/// Mantissa `0.ddd...` with `digits` digits and an exponent.
///
/// Exponents that need three digits are written in the compact legacy form
/// without an exponent letter, e.g. `0.15000000000000-100` for 1.5e-101.
fn fortran_float(value: f64, digits: usize, marker: char) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("0.{}{}+00", "0".repeat(digits), marker);
    }

    let sci = format!("{:.*E}", digits - 1, value.abs());
    let (mantissa, exponent) = sci.split_once('E').unwrap_or((sci.as_str(), "0"));
    let mantissa: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent = exponent.parse::<i32>().unwrap_or(0) + 1;

    let sign = if value < 0.0 { "-" } else { "" };
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    if exponent.abs() >= 100 {
        format!("{}0.{}{}{:03}", sign, mantissa, exp_sign, exponent.abs())
    } else {
        format!("{}0.{}{}{}{:02}", sign, mantissa, marker, exp_sign, exponent.abs())
    }
}

fn write_cells<W, T>(
    writer: &mut W,
    values: &[T],
    kind: ElementKind,
    mut cell: impl FnMut(&T) -> Result<String>,
) -> Result<()>
where
    W: Write + ?Sized,
{
    let layout = kind.text_layout()?;
    let columns = layout.columns_per_line;

    for block in values.chunks(layout.max_elements_per_block) {
        for (i, value) in block.iter().enumerate() {
            let text = cell(value)?;
            let pad = layout.column_width.saturating_sub(text.len());
            write!(writer, "{:pad$}{}", "", text)?;
            if (i + 1) % columns == 0 {
                writer.write_all(b"\n")?;
            }
        }
        if block.len() % columns != 0 {
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Write an array payload (no header line)
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
        ArrayData::Int(v) => write_cells(writer, v, kind, |x| Ok(x.to_string())),
        ArrayData::Real(v) => write_cells(writer, v, kind, |x| {
            Ok(fortran_float(f64::from(*x), 8, 'E'))
        }),
        ArrayData::Doub(v) => write_cells(writer, v, kind, |x| Ok(fortran_float(*x, 14, 'D'))),
        ArrayData::Logi(v) => write_cells(writer, v, kind, |x| {
            Ok(if *x { "T" } else { "F" }.to_string())
        }),
        ArrayData::Char(v) => {
            let width = kind.element_width();
            write_cells(writer, v, kind, |s| {
                if s.len() > width {
                    return Err(EclError::ValueTooWide {
                        value: s.clone(),
                        width,
                    });
                }
                Ok(format!(" '{}{}'", s, " ".repeat(width - s.len())))
            })
        }
        ArrayData::Mess => Ok(()),
    }
}

/// Write one array, header line and payload
pub fn write_array<W: Write + ?Sized>(writer: &mut W, array: &Array) -> Result<()> {
    write_header(writer, &array.name, array.data.len() as u64, array.kind)?;
    write_payload(writer, &array.data, array.kind)
}
