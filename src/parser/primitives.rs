//! Byte-order normalization and scalar stream readers
//!
//! Scalars are stored big-endian on disk. Each `normalize_*` function
//! converts between the on-disk and the host representation of a value that
//! was moved as raw bytes; applying it twice gives back the input.

use crate::error::Result;
use byteorder::{ByteOrder, NativeEndian, ReadBytesExt};
use std::io::Read;

pub fn normalize_i32(value: i32) -> i32 {
    i32::from_be(value)
}

pub fn normalize_i64(value: i64) -> i64 {
    i64::from_be(value)
}

pub fn normalize_f32(value: f32) -> f32 {
    f32::from_bits(u32::from_be(value.to_bits()))
}

pub fn normalize_f64(value: f64) -> f64 {
    f64::from_bits(u64::from_be(value.to_bits()))
}

/// Read one on-disk 4-byte integer
pub fn read_i32<R: Read + ?Sized>(reader: &mut R) -> Result<i32> {
    Ok(normalize_i32(reader.read_i32::<NativeEndian>()?))
}

/// Read `N` raw bytes
pub fn read_raw<R: Read + ?Sized, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Decode an on-disk 4-byte integer held in memory
pub fn i32_from_raw(raw: &[u8]) -> i32 {
    normalize_i32(NativeEndian::read_i32(raw))
}

pub fn u32_from_raw(raw: &[u8]) -> u32 {
    i32_from_raw(raw) as u32
}

pub fn f32_from_raw(raw: &[u8]) -> f32 {
    normalize_f32(NativeEndian::read_f32(raw))
}

pub fn f64_from_raw(raw: &[u8]) -> f64 {
    normalize_f64(NativeEndian::read_f64(raw))
}
