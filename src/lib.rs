//! eclarr - Block-framed array codec for reservoir simulation files
//!
//! Reads and writes the array container used by reservoir simulators to
//! exchange grid properties, well tables and time series. Every array is a
//! named, typed header followed by its payload, in one of two encodings:
//!
//! - binary: big-endian, the payload split into blocks framed by their byte
//!   length, with an `X231` header pair for counts past 31 bits
//! - formatted: a quoted header line followed by fixed-width text columns
//!
//! # Features
//!
//! - Header, block and token level readers that work on a caller-owned cursor
//! - Exact on-disk payload sizes from a header alone (see [`size`])
//! - Writers whose output length always matches those sizes
//! - Optional `ndarray` conversions
//!
//! # Example
//!
//! ```rust
//! use eclarr::{Array, ReadOptions, parser, writer};
//!
//! let arrays = vec![
//!     Array::int("DIMENS", vec![34, 100, 30]),
//!     Array::doub("TIME", vec![0.0, 31.5]),
//! ];
//!
//! let bytes = writer::to_bytes(&arrays).unwrap();
//! let parsed = parser::parse_binary(&bytes, &ReadOptions::default()).unwrap();
//! assert_eq!(parsed, arrays);
//!
//! let text = writer::to_formatted(&arrays).unwrap();
//! assert_eq!(parser::parse_formatted(&text).unwrap(), arrays);
//! ```

pub mod error;
pub mod parser;
pub mod size;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{EclError, Result};
pub use parser::{
    TextCursor, parse_binary, parse_formatted, read_binary_array, read_binary_header,
    read_text_array, read_text_header,
};
pub use size::{size_on_disk_binary, size_on_disk_formatted};
pub use types::{
    Array, ArrayData, ArrayHeader, ElementKind, LogicalSentinels, ReadOptions,
};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{ArrayType, NdarrayError};
