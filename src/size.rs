//! On-disk payload size of an array, computed from its header alone.
//!
//! These functions mirror the block framing of the writers exactly, so a
//! caller can skip or index an array without touching its payload.

use crate::error::{EclError, Result};
use crate::types::ElementKind;

/// Bytes of one 4-byte block length marker
const MARKER_SIZE: u64 = 4;

/// Payload size in bytes of `count` elements in the binary encoding.
///
/// Every block, full or partial, is bracketed by two length markers.
pub fn size_on_disk_binary(count: u64, kind: ElementKind) -> Result<u64> {
    if kind == ElementKind::Marker {
        return marker_size(count);
    }

    let layout = kind.binary_layout()?;
    let element_size = layout.element_size as u64;
    let max_block_bytes = layout.max_block_bytes as u64;
    let max_elements = layout.max_elements() as u64;

    let full_blocks = count / max_elements;
    let rest = count - full_blocks * max_elements;

    let mut bytes = full_blocks * (max_block_bytes + 2 * MARKER_SIZE);
    if rest > 0 {
        bytes += rest * element_size + 2 * MARKER_SIZE;
    }
    Ok(bytes)
}

/// Payload size in bytes of `count` elements in the formatted encoding.
///
/// Each output line ends in one newline byte; the last line of every block
/// is terminated even when it is not full.
pub fn size_on_disk_formatted(count: u64, kind: ElementKind) -> Result<u64> {
    if kind == ElementKind::Marker {
        return marker_size(count);
    }

    let layout = kind.text_layout()?;
    let max_block = layout.max_elements_per_block as u64;
    let columns = layout.columns_per_line as u64;
    let width = layout.column_width as u64;

    let n_blocks = count / max_block;
    let last_block = count % max_block;

    let lines_per_block = max_block.div_ceil(columns);
    let mut bytes = n_blocks * (max_block * width + lines_per_block);

    bytes += last_block * width + last_block / columns;
    if last_block % columns != 0 {
        bytes += 1;
    }
    Ok(bytes)
}

fn marker_size(count: u64) -> Result<u64> {
    if count == 0 {
        Ok(0)
    } else {
        Err(EclError::UnsupportedType {
            kind: ElementKind::Marker,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_empty_is_zero() {
        assert_eq!(size_on_disk_binary(0, ElementKind::Int32).unwrap(), 0);
        assert_eq!(size_on_disk_binary(0, ElementKind::Marker).unwrap(), 0);
    }

    #[test]
    fn binary_integer_blocks() {
        assert_eq!(size_on_disk_binary(1, ElementKind::Int32).unwrap(), 4 + 8);
        assert_eq!(
            size_on_disk_binary(1000, ElementKind::Int32).unwrap(),
            4000 + 8
        );
        assert_eq!(
            size_on_disk_binary(1500, ElementKind::Int32).unwrap(),
            4000 + 8 + 2000 + 8
        );
    }

    #[test]
    fn binary_char_blocks() {
        assert_eq!(
            size_on_disk_binary(106, ElementKind::FixedChar8).unwrap(),
            840 + 8 + 8 + 8
        );
        assert_eq!(
            size_on_disk_binary(2, ElementKind::DynChar(42)).unwrap(),
            84 + 8
        );
    }

    #[test]
    fn marker_with_elements_unsupported() {
        assert!(matches!(
            size_on_disk_binary(1, ElementKind::Marker),
            Err(EclError::UnsupportedType { count: 1, .. })
        ));
        assert!(size_on_disk_formatted(2, ElementKind::Marker).is_err());
    }

    #[test]
    fn formatted_integer_lines() {
        // one partial line
        assert_eq!(
            size_on_disk_formatted(5, ElementKind::Int32).unwrap(),
            5 * 12 + 1
        );
        // exactly one full line
        assert_eq!(
            size_on_disk_formatted(6, ElementKind::Int32).unwrap(),
            6 * 12 + 1
        );
        // full block: 167 lines
        assert_eq!(
            size_on_disk_formatted(1000, ElementKind::Int32).unwrap(),
            1000 * 12 + 167
        );
        assert_eq!(
            size_on_disk_formatted(1001, ElementKind::Int32).unwrap(),
            1000 * 12 + 167 + 12 + 1
        );
    }

    #[test]
    fn formatted_char_lines() {
        // 105 words, 7 per line, 15 lines
        assert_eq!(
            size_on_disk_formatted(105, ElementKind::FixedChar8).unwrap(),
            105 * 11 + 15
        );
        // C042: one word per line
        assert_eq!(
            size_on_disk_formatted(3, ElementKind::DynChar(42)).unwrap(),
            3 * 45 + 3
        );
    }
}
