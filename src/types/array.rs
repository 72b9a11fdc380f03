//! Decoded array types

use super::{ArrayHeader, ElementKind};
use crate::error::{EclError, Result};

/// Decoded payload of one array
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Int(Vec<i32>),
    Real(Vec<f32>),
    Doub(Vec<f64>),
    Logi(Vec<bool>),
    Char(Vec<String>),
    Mess,
}

impl ArrayData {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Int(v) => v.len(),
            ArrayData::Real(v) => v.len(),
            ArrayData::Doub(v) => v.len(),
            ArrayData::Logi(v) => v.len(),
            ArrayData::Char(v) => v.len(),
            ArrayData::Mess => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the variant, for error reporting
    pub fn kind_name(&self) -> &'static str {
        match self {
            ArrayData::Int(_) => "integer",
            ArrayData::Real(_) => "single precision",
            ArrayData::Doub(_) => "double precision",
            ArrayData::Logi(_) => "logical",
            ArrayData::Char(_) => "character",
            ArrayData::Mess => "message",
        }
    }

    /// Whether this payload can be stored under `kind`
    pub fn matches(&self, kind: ElementKind) -> bool {
        match self {
            ArrayData::Int(_) => kind == ElementKind::Int32,
            ArrayData::Real(_) => kind == ElementKind::Real32,
            ArrayData::Doub(_) => kind == ElementKind::Real64,
            ArrayData::Logi(_) => kind == ElementKind::Logical,
            ArrayData::Char(_) => kind.is_char(),
            ArrayData::Mess => kind == ElementKind::Marker,
        }
    }

    pub fn as_int(&self) -> Option<&[i32]> {
        match self {
            ArrayData::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<&[f32]> {
        match self {
            ArrayData::Real(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_doub(&self) -> Option<&[f64]> {
        match self {
            ArrayData::Doub(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_logi(&self) -> Option<&[bool]> {
        match self {
            ArrayData::Logi(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<&[String]> {
        match self {
            ArrayData::Char(v) => Some(v),
            _ => None,
        }
    }
}

/// A named array together with its decoded payload
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub name: String,
    pub kind: ElementKind,
    pub data: ArrayData,
}

impl Array {
    /// Pair a payload with its name and kind, rejecting mismatched variants
    pub fn new(name: impl Into<String>, kind: ElementKind, data: ArrayData) -> Result<Self> {
        if !data.matches(kind) {
            return Err(EclError::KindMismatch {
                kind,
                data: data.kind_name(),
            });
        }
        Ok(Self {
            name: name.into(),
            kind,
            data,
        })
    }

    pub fn int(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self::from_parts(name, ElementKind::Int32, ArrayData::Int(values))
    }

    pub fn real(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self::from_parts(name, ElementKind::Real32, ArrayData::Real(values))
    }

    pub fn doub(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::from_parts(name, ElementKind::Real64, ArrayData::Doub(values))
    }

    pub fn logi(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::from_parts(name, ElementKind::Logical, ArrayData::Logi(values))
    }

    /// `CHAR` array of 8-character words
    pub fn char(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::from_parts(name, ElementKind::FixedChar8, ArrayData::Char(values))
    }

    pub fn mess(name: impl Into<String>) -> Self {
        Self::from_parts(name, ElementKind::Marker, ArrayData::Mess)
    }

    fn from_parts(name: impl Into<String>, kind: ElementKind, data: ArrayData) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
        }
    }

    /// Header describing this array
    pub fn header(&self) -> ArrayHeader {
        ArrayHeader::new(
            format!("{:<8}", self.name),
            self.data.len() as u64,
            self.kind,
        )
    }
}
