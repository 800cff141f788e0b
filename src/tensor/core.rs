//! Core Tensor type

use super::{Storage, TensorId};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

// Most tensors have 4 or fewer dimensions; stack-allocate up to that.
type Shape = SmallVec<[usize; 4]>;

/// Contiguous n-dimensional array
///
/// `Tensor` pairs reference-counted storage with a row-major shape. Cloning
/// is zero-copy: the clone shares the underlying buffer. The scatter
/// dispatcher mutates a tensor's buffer in place through `&mut Tensor`;
/// every other operation only reads.
///
/// # Example
///
/// ```
/// use scatr::tensor::Tensor;
///
/// let t = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2]);
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.numel(), 4);
/// ```
pub struct Tensor {
    /// Unique ID for autograd tracking
    id: TensorId,
    /// Shared host memory
    storage: Storage,
    /// Row-major dimensions
    shape: Shape,
}

impl Tensor {
    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape`
    /// dimensions. For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Self {
        Self::try_from_slice(data, shape).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    pub fn try_from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        Ok(Self {
            id: TensorId::new(),
            storage: Storage::from_slice(data),
            shape: Shape::from_slice(shape),
        })
    }

    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        let len: usize = shape.iter().product();
        Self {
            id: TensorId::new(),
            storage: Storage::new(len, dtype),
            shape: Shape::from_slice(shape),
        }
    }

    /// Create a tensor filled with a single value
    pub fn full<T: Element>(value: T, shape: &[usize]) -> Self {
        let len: usize = shape.iter().product();
        Self::from_slice(&vec![value; len], shape)
    }

    // ===== Accessors =====

    /// Get the tensor ID
    #[inline]
    pub fn id(&self) -> TensorId {
        self.id
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Copy the tensor contents into a typed Vec
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the tensor dtype.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.storage.to_vec()
    }
}

impl Clone for Tensor {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            id: TensorId::new(),
            storage: self.storage.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.id)
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .finish()
    }
}
