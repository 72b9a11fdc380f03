//! Element kinds and their block layouts

use crate::error::{EclError, Result};
use std::fmt;

/// Width in bytes of a `CHAR` element
pub const CHAR_WIDTH: usize = 8;

/// Element kind of an array, fixed when its header is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `INTE`: 4-byte signed integers
    Int32,
    /// `REAL`: 4-byte floats
    Real32,
    /// `DOUB`: 8-byte floats
    Real64,
    /// `LOGI`: 4-byte logicals stored as sentinel bit patterns
    Logical,
    /// `CHAR`: 8-character words
    FixedChar8,
    /// `Cnnn`: character words of the given width
    DynChar(usize),
    /// `MESS`: payload-free marker
    Marker,
}

/// Binary block layout of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryLayout {
    pub element_size: usize,
    pub max_block_bytes: usize,
}

impl BinaryLayout {
    /// Maximum number of elements in one binary block
    pub fn max_elements(&self) -> usize {
        self.max_block_bytes / self.element_size
    }
}

/// Formatted (text) block layout of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub max_elements_per_block: usize,
    pub columns_per_line: usize,
    pub column_width: usize,
}

// (element size, max block bytes)
const BIN_INTE: (usize, usize) = (4, 4000);
const BIN_REAL: (usize, usize) = (4, 4000);
const BIN_DOUB: (usize, usize) = (8, 8000);
const BIN_LOGI: (usize, usize) = (4, 4000);
const BIN_CHAR: (usize, usize) = (CHAR_WIDTH, 840);

// (max elements per block, columns per line, column width)
const TXT_INTE: (usize, usize, usize) = (1000, 6, 12);
const TXT_REAL: (usize, usize, usize) = (1000, 4, 17);
const TXT_DOUB: (usize, usize, usize) = (1000, 3, 23);
const TXT_LOGI: (usize, usize, usize) = (1000, 25, 3);
const TXT_CHAR: (usize, usize, usize) = (105, 7, 11);

/// Text lines are laid out to fit this many characters
const LINE_WIDTH: usize = 80;

impl ElementKind {
    /// Map a 4-character type tag to a kind.
    ///
    /// `X231` is not a kind; it is handled by the binary header reader.
    pub fn from_tag(tag: &[u8]) -> Result<Self> {
        let kind = match tag {
            b"INTE" => ElementKind::Int32,
            b"REAL" => ElementKind::Real32,
            b"DOUB" => ElementKind::Real64,
            b"CHAR" => ElementKind::FixedChar8,
            b"LOGI" => ElementKind::Logical,
            b"MESS" => ElementKind::Marker,
            [b'C', digits @ ..] if digits.len() == 3 && digits.iter().all(u8::is_ascii_digit) => {
                let width = digits
                    .iter()
                    .fold(0usize, |acc, d| acc * 10 + usize::from(d - b'0'));
                if width == 0 {
                    return Err(EclError::UnknownType(tag_string(tag)));
                }
                ElementKind::DynChar(width)
            }
            _ => return Err(EclError::UnknownType(tag_string(tag))),
        };
        Ok(kind)
    }

    /// The 4-character type tag written for this kind
    pub fn tag(&self) -> String {
        match self {
            ElementKind::Int32 => "INTE".into(),
            ElementKind::Real32 => "REAL".into(),
            ElementKind::Real64 => "DOUB".into(),
            ElementKind::Logical => "LOGI".into(),
            ElementKind::FixedChar8 => "CHAR".into(),
            ElementKind::DynChar(width) => format!("C{:03}", width),
            ElementKind::Marker => "MESS".into(),
        }
    }

    /// Element width as declared by the header
    pub fn element_width(&self) -> usize {
        match self {
            ElementKind::Int32 | ElementKind::Real32 | ElementKind::Logical => 4,
            ElementKind::Real64 | ElementKind::FixedChar8 => 8,
            ElementKind::DynChar(width) => *width,
            ElementKind::Marker => 4,
        }
    }

    pub fn is_char(&self) -> bool {
        matches!(self, ElementKind::FixedChar8 | ElementKind::DynChar(_))
    }

    /// Binary block layout; `MESS` has none.
    pub fn binary_layout(&self) -> Result<BinaryLayout> {
        let (element_size, max_block_bytes) = match self {
            ElementKind::Int32 => BIN_INTE,
            ElementKind::Real32 => BIN_REAL,
            ElementKind::Real64 => BIN_DOUB,
            ElementKind::Logical => BIN_LOGI,
            ElementKind::FixedChar8 => BIN_CHAR,
            ElementKind::DynChar(width) => {
                if *width == 0 {
                    return Err(self.unsupported());
                }
                (*width, BIN_CHAR.1 / BIN_CHAR.0 * width)
            }
            ElementKind::Marker => return Err(self.unsupported()),
        };
        Ok(BinaryLayout {
            element_size,
            max_block_bytes,
        })
    }

    /// Text block layout; `MESS` has none.
    pub fn text_layout(&self) -> Result<TextLayout> {
        let (max_elements_per_block, columns_per_line, column_width) = match self {
            ElementKind::Int32 => TXT_INTE,
            ElementKind::Real32 => TXT_REAL,
            ElementKind::Real64 => TXT_DOUB,
            ElementKind::Logical => TXT_LOGI,
            ElementKind::FixedChar8 => TXT_CHAR,
            ElementKind::DynChar(width) => {
                if *width == 0 {
                    return Err(self.unsupported());
                }
                let column_width = width + 3;
                // very wide words still get one per line
                let columns = (LINE_WIDTH / column_width).max(1);
                (TXT_CHAR.0, columns, column_width)
            }
            ElementKind::Marker => return Err(self.unsupported()),
        };
        Ok(TextLayout {
            max_elements_per_block,
            columns_per_line,
            column_width,
        })
    }

    fn unsupported(&self) -> EclError {
        EclError::UnsupportedType {
            kind: *self,
            count: 0,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

fn tag_string(tag: &[u8]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for kind in [
            ElementKind::Int32,
            ElementKind::Real32,
            ElementKind::Real64,
            ElementKind::Logical,
            ElementKind::FixedChar8,
            ElementKind::DynChar(42),
            ElementKind::Marker,
        ] {
            assert_eq!(ElementKind::from_tag(kind.tag().as_bytes()).unwrap(), kind);
        }
    }

    #[test]
    fn dynamic_char_width_from_tag() {
        assert_eq!(
            ElementKind::from_tag(b"C010").unwrap(),
            ElementKind::DynChar(10)
        );
        assert_eq!(ElementKind::DynChar(10).element_width(), 10);
    }

    #[test]
    fn character_kinds() {
        assert!(ElementKind::FixedChar8.is_char());
        assert!(ElementKind::DynChar(42).is_char());
        assert!(!ElementKind::Int32.is_char());
        assert!(!ElementKind::Marker.is_char());
    }

    #[test]
    fn unknown_tags_rejected() {
        for tag in [&b"ABCD"[..], b"C0X1", b"C000", b"X231", b"inte", b"C01"] {
            assert!(matches!(
                ElementKind::from_tag(tag),
                Err(EclError::UnknownType(_))
            ));
        }
    }

    #[test]
    fn binary_layouts() {
        let inte = ElementKind::Int32.binary_layout().unwrap();
        assert_eq!(inte.max_elements(), 1000);
        let doub = ElementKind::Real64.binary_layout().unwrap();
        assert_eq!((doub.element_size, doub.max_elements()), (8, 1000));
        let chars = ElementKind::FixedChar8.binary_layout().unwrap();
        assert_eq!(chars.max_elements(), 105);
    }

    #[test]
    fn dynamic_char_layout_scales_from_char() {
        let layout = ElementKind::DynChar(42).binary_layout().unwrap();
        assert_eq!(layout.element_size, 42);
        assert_eq!(layout.max_block_bytes, 105 * 42);
        assert_eq!(layout.max_elements(), 105);

        let text = ElementKind::DynChar(42).text_layout().unwrap();
        assert_eq!(text.column_width, 45);
        assert_eq!(text.columns_per_line, 1);
        assert_eq!(text.max_elements_per_block, 105);

        let text = ElementKind::DynChar(100).text_layout().unwrap();
        assert_eq!(text.columns_per_line, 1);
    }

    #[test]
    fn marker_has_no_layout() {
        assert!(matches!(
            ElementKind::Marker.binary_layout(),
            Err(EclError::UnsupportedType { .. })
        ));
        assert!(matches!(
            ElementKind::Marker.text_layout(),
            Err(EclError::UnsupportedType { .. })
        ));
    }
}
