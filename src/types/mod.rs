//! Core types for the array file format

mod array;
mod header;
mod kind;
mod options;

pub use array::{Array, ArrayData};
pub use header::{
    ArrayHeader, BINARY_HEADER_SIZE, HEADER_RECORD_LEN, NAME_LEN, X231_BASE, X231_TAG,
};
pub use kind::{BinaryLayout, CHAR_WIDTH, ElementKind, TextLayout};
pub use options::{LogicalSentinels, ReadOptions};
