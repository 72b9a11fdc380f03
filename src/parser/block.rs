//! Reassembly of binary arrays from length-framed blocks

use super::primitives::{f32_from_raw, f64_from_raw, i32_from_raw, read_i32, u32_from_raw};
use crate::error::{EclError, Result};
use crate::types::{ElementKind, LogicalSentinels};
use std::io::Read;

/// Converts one fixed-width raw element into its decoded value
pub trait ElementConverter {
    type Output;

    fn convert(&self, raw: &[u8]) -> Result<Self::Output>;
}

/// `INTE` elements
pub struct IntElement;

impl ElementConverter for IntElement {
    type Output = i32;

    fn convert(&self, raw: &[u8]) -> Result<i32> {
        Ok(i32_from_raw(raw))
    }
}

/// `REAL` elements
pub struct RealElement;

impl ElementConverter for RealElement {
    type Output = f32;

    fn convert(&self, raw: &[u8]) -> Result<f32> {
        Ok(f32_from_raw(raw))
    }
}

/// `DOUB` elements
pub struct DoubElement;

impl ElementConverter for DoubElement {
    type Output = f64;

    fn convert(&self, raw: &[u8]) -> Result<f64> {
        Ok(f64_from_raw(raw))
    }
}

/// `LOGI` elements, decoded through the sentinel patterns
pub struct LogiElement(pub LogicalSentinels);

impl ElementConverter for LogiElement {
    type Output = bool;

    fn convert(&self, raw: &[u8]) -> Result<bool> {
        self.0.decode(u32_from_raw(raw))
    }
}

/// `CHAR` and `Cnnn` elements; trailing spaces are dropped
pub struct CharElement;

impl ElementConverter for CharElement {
    type Output = String;

    fn convert(&self, raw: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(raw).map_err(|_| EclError::InvalidUtf8)?;
        Ok(text.trim_end_matches(' ').to_string())
    }
}

/// Read `count` elements of `kind` from consecutive blocks.
///
/// The stream must be positioned at the first block. Either exactly `count`
/// elements are returned or the whole read fails.
pub fn read_blocks<R, C>(
    reader: &mut R,
    count: u64,
    kind: ElementKind,
    converter: &C,
) -> Result<Vec<C::Output>>
where
    R: Read + ?Sized,
    C: ElementConverter,
{
    if count == 0 {
        return Ok(Vec::new());
    }

    let layout = kind.binary_layout().map_err(|_| EclError::UnsupportedType { kind, count })?;
    let element_size = layout.element_size;
    let max_elements = layout.max_elements();

    let mut values = Vec::with_capacity(count.min(1 << 20) as usize);
    let mut payload = Vec::with_capacity(layout.max_block_bytes);
    let mut remaining = count;
    let mut block = 0usize;

    while remaining > 0 {
        let head = read_i32(reader)?;
        if head < 0 {
            return Err(EclError::block(block, format!("negative block length {}", head)));
        }
        let head_len = head as usize;
        if head_len % element_size != 0 {
            return Err(EclError::block(
                block,
                format!(
                    "block length {} is not a multiple of element size {}",
                    head_len, element_size
                ),
            ));
        }

        let in_block = head_len / element_size;
        if in_block > max_elements {
            return Err(EclError::block(
                block,
                format!("{} elements exceed block capacity {}", in_block, max_elements),
            ));
        }
        if in_block as u64 > remaining {
            return Err(EclError::block(
                block,
                format!("{} elements but only {} remaining", in_block, remaining),
            ));
        }

        remaining -= in_block as u64;
        if in_block < max_elements && remaining > 0 {
            return Err(EclError::block(
                block,
                format!(
                    "short block of {} elements followed by {} more",
                    in_block, remaining
                ),
            ));
        }

        payload.resize(head_len, 0);
        reader.read_exact(&mut payload)?;
        for raw in payload.chunks_exact(element_size) {
            values.push(converter.convert(raw)?);
        }

        let tail = read_i32(reader)?;
        if tail != head {
            return Err(EclError::block(
                block,
                format!("trailing length {} does not match leading {}", tail, head),
            ));
        }

        tracing::trace!(block, elements = in_block, "read block");
        block += 1;
    }

    Ok(values)
}
