//! Reader configuration

use crate::error::{EclError, Result};

/// Raw bit patterns recognized for logical values.
///
/// Patterns are compared after byte-order normalization. The defaults
/// accept both legacy writers: `0xFFFFFFFF` (-1) and `0x01000000` for true,
/// zero for false. The writer always emits the first true pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalSentinels {
    pub true_patterns: [u32; 2],
    pub false_pattern: u32,
}

impl Default for LogicalSentinels {
    fn default() -> Self {
        Self {
            true_patterns: [0xFFFF_FFFF, 0x0100_0000],
            false_pattern: 0,
        }
    }
}

impl LogicalSentinels {
    pub fn decode(&self, raw: u32) -> Result<bool> {
        if self.true_patterns.contains(&raw) {
            Ok(true)
        } else if raw == self.false_pattern {
            Ok(false)
        } else {
            Err(EclError::InvalidLogicalEncoding(raw))
        }
    }

    pub fn encode(&self, value: bool) -> u32 {
        if value {
            self.true_patterns[0]
        } else {
            self.false_pattern
        }
    }
}

/// Options shared by the binary and text readers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub logical: LogicalSentinels,
}
