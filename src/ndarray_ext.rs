//! ndarray integration for decoded arrays
//!
//! Numeric and logical payloads convert to and from ndarray's owned arrays.
//! Grid properties are stored with the `i` index varying fastest, so
//! [`Array::to_grid`] builds a column-major `(nx, ny, nz)` array.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::{Array, ArrayData, ElementKind};
use ndarray::{Array1, Array3, ArrayD, ShapeBuilder};

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdarrayError {
    /// Element kind mismatch between expected and actual
    KindMismatch {
        expected: ElementKind,
        actual: ElementKind,
    },
    /// Requested shape doesn't match the element count
    ShapeMismatch { shape: Vec<usize>, len: usize },
}

impl std::fmt::Display for NdarrayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdarrayError::KindMismatch { expected, actual } => {
                write!(f, "Kind mismatch: expected {}, got {}", expected, actual)
            }
            NdarrayError::ShapeMismatch { shape, len } => {
                write!(f, "Shape {:?} doesn't match {} elements", shape, len)
            }
        }
    }
}

impl std::error::Error for NdarrayError {}

/// Element types with a payload variant
pub trait ArrayType: Sized + Clone + 'static {
    const KIND: ElementKind;

    fn values(data: &ArrayData) -> Option<&[Self]>;

    fn into_data(values: Vec<Self>) -> ArrayData;
}

impl ArrayType for i32 {
    const KIND: ElementKind = ElementKind::Int32;

    fn values(data: &ArrayData) -> Option<&[Self]> {
        data.as_int()
    }

    fn into_data(values: Vec<Self>) -> ArrayData {
        ArrayData::Int(values)
    }
}

impl ArrayType for f32 {
    const KIND: ElementKind = ElementKind::Real32;

    fn values(data: &ArrayData) -> Option<&[Self]> {
        data.as_real()
    }

    fn into_data(values: Vec<Self>) -> ArrayData {
        ArrayData::Real(values)
    }
}

impl ArrayType for f64 {
    const KIND: ElementKind = ElementKind::Real64;

    fn values(data: &ArrayData) -> Option<&[Self]> {
        data.as_doub()
    }

    fn into_data(values: Vec<Self>) -> ArrayData {
        ArrayData::Doub(values)
    }
}

impl ArrayType for bool {
    const KIND: ElementKind = ElementKind::Logical;

    fn values(data: &ArrayData) -> Option<&[Self]> {
        data.as_logi()
    }

    fn into_data(values: Vec<Self>) -> ArrayData {
        ArrayData::Logi(values)
    }
}

impl Array {
    /// Create an array from any ndarray, flattened in logical (row-major) order
    pub fn from_ndarray<T: ArrayType>(name: impl Into<String>, arr: ArrayD<T>) -> Self {
        let values: Vec<T> = arr.iter().cloned().collect();
        Array {
            name: name.into(),
            kind: T::KIND,
            data: T::into_data(values),
        }
    }

    fn typed_values<T: ArrayType>(&self) -> Result<&[T], NdarrayError> {
        T::values(&self.data).ok_or(NdarrayError::KindMismatch {
            expected: T::KIND,
            actual: self.kind,
        })
    }

    /// Convert to a one-dimensional ndarray
    pub fn to_ndarray<T: ArrayType>(&self) -> Result<Array1<T>, NdarrayError> {
        Ok(Array1::from(self.typed_values::<T>()?.to_vec()))
    }

    /// Convert a cell property to an `(nx, ny, nz)` grid array
    pub fn to_grid<T: ArrayType>(
        &self,
        nx: usize,
        ny: usize,
        nz: usize,
    ) -> Result<Array3<T>, NdarrayError> {
        let values = self.typed_values::<T>()?;
        let shape_err = || NdarrayError::ShapeMismatch {
            shape: vec![nx, ny, nz],
            len: values.len(),
        };
        let cells = nx.checked_mul(ny).and_then(|n| n.checked_mul(nz));
        if cells != Some(values.len()) {
            return Err(shape_err());
        }
        Array3::from_shape_vec((nx, ny, nz).f(), values.to_vec()).map_err(|_| shape_err())
    }
}
