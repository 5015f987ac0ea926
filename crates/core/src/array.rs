//! Immutable numeric arrays.
//!
//! Observation fields are small dense arrays: scalars, per-agent vectors,
//! per-agent coordinate matrices. An [`Array`] owns its elements through a
//! reference-counted buffer, so cloning an observation shares every buffer
//! and nothing can write through the clone.

use std::sync::Arc;

use crate::error::CoreError;
use crate::shape::{Dtype, Shape};

/// Typed, shared, read-only element storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    Bool(Arc<[bool]>),
    Int32(Arc<[i32]>),
    Int64(Arc<[i64]>),
    Float32(Arc<[f32]>),
    Float64(Arc<[f64]>),
}

impl Buffer {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Buffer::Bool(b) => b.len(),
            Buffer::Int32(b) => b.len(),
            Buffer::Int64(b) => b.len(),
            Buffer::Float32(b) => b.len(),
            Buffer::Float64(b) => b.len(),
        }
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        match self {
            Buffer::Bool(_) => Dtype::Bool,
            Buffer::Int32(_) => Dtype::Int32,
            Buffer::Int64(_) => Dtype::Int64,
            Buffer::Float32(_) => Dtype::Float32,
            Buffer::Float64(_) => Dtype::Float64,
        }
    }

    /// Element at flat index `i`, widened to `f64` (`true` is 1).
    pub fn value_at(&self, i: usize) -> Option<f64> {
        match self {
            Buffer::Bool(b) => b.get(i).map(|&v| if v { 1.0 } else { 0.0 }),
            Buffer::Int32(b) => b.get(i).map(|&v| f64::from(v)),
            Buffer::Int64(b) => b.get(i).map(|&v| v as f64),
            Buffer::Float32(b) => b.get(i).map(|&v| f64::from(v)),
            Buffer::Float64(b) => b.get(i).copied(),
        }
    }

    fn ptr_eq(&self, other: &Buffer) -> bool {
        match (self, other) {
            (Buffer::Bool(a), Buffer::Bool(b)) => Arc::ptr_eq(a, b),
            (Buffer::Int32(a), Buffer::Int32(b)) => Arc::ptr_eq(a, b),
            (Buffer::Int64(a), Buffer::Int64(b)) => Arc::ptr_eq(a, b),
            (Buffer::Float32(a), Buffer::Float32(b)) => Arc::ptr_eq(a, b),
            (Buffer::Float64(a), Buffer::Float64(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Rust element types that can back an [`Array`].
pub trait Element: Copy {
    /// The matching element type tag.
    const DTYPE: Dtype;

    /// Move a vector of elements into a shared buffer.
    fn into_buffer(values: Vec<Self>) -> Buffer;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl Element for $ty {
            const DTYPE: Dtype = Dtype::$variant;

            fn into_buffer(values: Vec<Self>) -> Buffer {
                Buffer::$variant(values.into())
            }
        }
    };
}

impl_element!(bool, Bool);
impl_element!(i32, Int32);
impl_element!(i64, Int64);
impl_element!(f32, Float32);
impl_element!(f64, Float64);

/// An immutable n-dimensional array in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dims: Vec<usize>,
    buffer: Buffer,
}

impl Array {
    /// Wrap a buffer with the given dimensions.
    ///
    /// Fails if the buffer length is not the product of `dims`.
    pub fn new(dims: Vec<usize>, buffer: Buffer) -> Result<Self, CoreError> {
        let expected: usize = dims.iter().product();
        if buffer.len() != expected {
            return Err(CoreError::BufferLength {
                expected,
                got: buffer.len(),
            });
        }
        Ok(Self { dims, buffer })
    }

    /// Build from row-major values and dimensions.
    pub fn from_shape_vec<T: Element>(dims: Vec<usize>, values: Vec<T>) -> Result<Self, CoreError> {
        Self::new(dims, T::into_buffer(values))
    }

    /// A 0-dimensional array holding one value.
    pub fn scalar<T: Element>(value: T) -> Self {
        Self {
            dims: vec![],
            buffer: T::into_buffer(vec![value]),
        }
    }

    /// A 1-dimensional array.
    pub fn vector<T: Element>(values: Vec<T>) -> Self {
        Self {
            dims: vec![values.len()],
            buffer: T::into_buffer(values),
        }
    }

    /// A 2-dimensional array from rows. Ragged rows are rejected.
    pub fn matrix<T: Element>(rows: Vec<Vec<T>>) -> Result<Self, CoreError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != num_cols) {
            return Err(CoreError::BufferLength {
                expected: num_rows * num_cols,
                got: rows.iter().map(Vec::len).sum(),
            });
        }
        let values: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_shape_vec(vec![num_rows, num_cols], values)
    }

    /// A vector of zeros except a single one at `index`.
    ///
    /// An out-of-range `index` yields all zeros.
    pub fn one_hot(dtype: Dtype, len: usize, index: usize) -> Self {
        let buffer = match dtype {
            Dtype::Bool => bool::into_buffer((0..len).map(|i| i == index).collect()),
            Dtype::Int32 => i32::into_buffer((0..len).map(|i| i32::from(i == index)).collect()),
            Dtype::Int64 => i64::into_buffer((0..len).map(|i| i64::from(i == index)).collect()),
            Dtype::Float32 => f32::into_buffer(
                (0..len)
                    .map(|i| if i == index { 1.0 } else { 0.0 })
                    .collect(),
            ),
            Dtype::Float64 => f64::into_buffer(
                (0..len)
                    .map(|i| if i == index { 1.0 } else { 0.0 })
                    .collect(),
            ),
        };
        Self {
            dims: vec![len],
            buffer,
        }
    }

    /// Dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        self.buffer.dtype()
    }

    /// Element type and dimensions together.
    pub fn shape(&self) -> Shape {
        Shape::new(self.dtype(), self.dims.clone())
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Element at a flat (row-major) index, as `f64`.
    pub fn value_at(&self, flat: usize) -> Option<f64> {
        self.buffer.value_at(flat)
    }

    /// Element at a multi-dimensional index, as `f64`.
    ///
    /// Returns `None` if the index rank differs from the array rank or any
    /// coordinate is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(&self.dims) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        self.value_at(flat)
    }

    /// Whether the element at a flat index is non-zero.
    pub fn is_nonzero(&self, flat: usize) -> bool {
        self.value_at(flat).is_some_and(|v| v != 0.0)
    }

    /// All elements widened to `f64`, row-major.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.value_at(i)).collect()
    }

    /// Index of the single one in a one-hot vector.
    ///
    /// `None` unless the array is 1-D with exactly one non-zero element and
    /// that element equals 1.
    pub fn one_hot_index(&self) -> Option<usize> {
        if self.rank() != 1 {
            return None;
        }
        let mut hot = None;
        for i in 0..self.len() {
            match self.value_at(i) {
                Some(v) if v == 0.0 => {}
                Some(v) if v == 1.0 && hot.is_none() => hot = Some(i),
                _ => return None,
            }
        }
        hot
    }

    /// Whether both arrays share the same element storage.
    pub fn shares_buffer(&self, other: &Array) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }
}
