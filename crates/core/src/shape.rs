//! # Shapes and Element Types
//!
//! Every observation array carries a [`Shape`]: an element type plus its
//! dimension sizes. Puppeteers check shapes at the boundary so a malformed
//! environment integration fails at the first offending step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element type of an observation array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl Dtype {
    /// Short numpy-style name, e.g. `"i32"`.
    pub fn name(self) -> &'static str {
        match self {
            Dtype::Bool => "bool",
            Dtype::Int32 => "i32",
            Dtype::Int64 => "i64",
            Dtype::Float32 => "f32",
            Dtype::Float64 => "f64",
        }
    }

    /// Whether this is a floating-point type.
    pub fn is_float(self) -> bool {
        matches!(self, Dtype::Float32 | Dtype::Float64)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A shape describes the element type and dimensions of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    /// The element type
    pub dtype: Dtype,
    /// Dimension sizes (empty = scalar, [n] = vector, [m,n] = matrix, etc.)
    pub dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape with given type and dimensions.
    pub fn new(dtype: Dtype, dims: Vec<usize>) -> Self {
        Self { dtype, dims }
    }

    /// Create a scalar shape (0-dimensional).
    pub fn scalar(dtype: Dtype) -> Self {
        Self { dtype, dims: vec![] }
    }

    /// Create a vector shape (1-dimensional).
    pub fn vector(dtype: Dtype, len: usize) -> Self {
        Self {
            dtype,
            dims: vec![len],
        }
    }

    /// Create a matrix shape (2-dimensional).
    pub fn matrix(dtype: Dtype, rows: usize, cols: usize) -> Self {
        Self {
            dtype,
            dims: vec![rows, cols],
        }
    }

    /// Number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Same dimensions, regardless of element type.
    pub fn same_dims(&self, other: &Shape) -> bool {
        self.dims == other.dims
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.dtype,
            self.dims
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_shape() {
        let s = Shape::scalar(Dtype::Float32);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.numel(), 1);
        assert_eq!(s.to_string(), "f32[]");
    }

    #[test]
    fn test_vector_shape() {
        let v = Shape::vector(Dtype::Int32, 10);
        assert_eq!(v.rank(), 1);
        assert_eq!(v.numel(), 10);
        assert_eq!(v.to_string(), "i32[10]");
    }

    #[test]
    fn test_matrix_shape() {
        let m = Shape::matrix(Dtype::Float64, 3, 4);
        assert_eq!(m.rank(), 2);
        assert_eq!(m.numel(), 12);
        assert_eq!(m.to_string(), "f64[3, 4]");
    }

    #[test]
    fn test_same_dims_ignores_dtype() {
        let a = Shape::vector(Dtype::Int32, 5);
        let b = Shape::vector(Dtype::Float64, 5);
        let c = Shape::vector(Dtype::Int32, 6);

        assert!(a.same_dims(&b));
        assert!(!a.same_dims(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_dtype_serde_names() {
        let json = serde_json::to_string(&Dtype::Float64).unwrap();
        assert_eq!(json, "\"float64\"");
        let parsed: Dtype = serde_json::from_str("\"int32\"").unwrap();
        assert_eq!(parsed, Dtype::Int32);
        assert!(!parsed.is_float());
    }
}
