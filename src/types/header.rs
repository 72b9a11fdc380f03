//! Array header constants and structure

use super::ElementKind;
use crate::error::Result;
use crate::size;

/// Byte length of the record between the two header frame markers
pub const HEADER_RECORD_LEN: i32 = 16;

/// Byte length of one framed binary header on disk
pub const BINARY_HEADER_SIZE: u64 = 24;

/// Width of the name field
pub const NAME_LEN: usize = 8;

/// Type tag announcing an extended-size header pair
pub const X231_TAG: &[u8; 4] = b"X231";

/// Count carried by one header record before the X231 continuation is needed
pub const X231_BASE: i64 = 1 << 31;

/// Metadata preceding every array payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader {
    /// Space-padded 8-character name
    pub name: String,
    pub declared_count: u64,
    pub kind: ElementKind,
}

impl ArrayHeader {
    pub fn new(name: impl Into<String>, declared_count: u64, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            declared_count,
            kind,
        }
    }

    /// Name without its trailing padding
    pub fn trimmed_name(&self) -> &str {
        self.name.trim_end()
    }

    pub fn element_width(&self) -> usize {
        self.kind.element_width()
    }

    /// Bytes of binary payload following this header
    pub fn payload_size_binary(&self) -> Result<u64> {
        size::size_on_disk_binary(self.declared_count, self.kind)
    }

    /// Bytes of formatted payload following this header
    pub fn payload_size_formatted(&self) -> Result<u64> {
        size::size_on_disk_formatted(self.declared_count, self.kind)
    }
}
