//! Storage: reference-counted host memory

use crate::dtype::{DType, Element};
use std::alloc::{alloc_zeroed, dealloc, Layout as AllocLayout};
use std::sync::Arc;

// Alignment for all allocations; wide enough for any SIMD load.
const ALIGN: usize = 64;

/// Storage for tensor data
///
/// Wraps an aligned host allocation with reference counting so cloned
/// tensors share one buffer. Memory is zero-initialized on allocation and
/// freed when the last reference drops.
pub struct Storage {
    inner: Arc<StorageInner>,
}

struct StorageInner {
    /// Allocation address; 0 for empty storage
    ptr: u64,
    /// Number of elements (not bytes)
    len: usize,
    /// Element type
    dtype: DType,
}

impl Storage {
    /// Allocate zeroed storage for `len` elements of type `dtype`
    pub fn new(len: usize, dtype: DType) -> Self {
        let size_bytes = len * dtype.size_in_bytes();
        let ptr = if size_bytes == 0 {
            0
        } else {
            let layout =
                AllocLayout::from_size_align(size_bytes, ALIGN).expect("invalid allocation layout");
            let raw = unsafe { alloc_zeroed(layout) };
            if raw.is_null() {
                panic!("failed to allocate {} bytes", size_bytes);
            }
            raw as u64
        };

        Self {
            inner: Arc::new(StorageInner { ptr, len, dtype }),
        }
    }

    /// Create storage holding a copy of `data`, with dtype inferred from `T`
    pub fn from_slice<T: Element>(data: &[T]) -> Self {
        let storage = Self::new(data.len(), T::DTYPE);
        if !data.is_empty() {
            let bytes: &[u8] = bytemuck::cast_slice(data);
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), storage.inner.ptr as *mut u8, bytes.len());
            }
        }
        storage
    }

    /// Get the raw address of the buffer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.inner.ptr
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * self.inner.dtype.size_in_bytes()
    }

    /// Check if this is the only reference to the buffer
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Copy the buffer contents into a typed Vec
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the storage dtype.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        assert_eq!(T::DTYPE, self.inner.dtype, "to_vec dtype mismatch");
        let mut result = vec![T::zero(); self.inner.len];
        if self.inner.len > 0 {
            let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
            unsafe {
                std::ptr::copy_nonoverlapping(
                    self.inner.ptr as *const u8,
                    bytes.as_mut_ptr(),
                    bytes.len(),
                );
            }
        }
        result
    }
}

impl Clone for Storage {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Drop for StorageInner {
    fn drop(&mut self) {
        let size_bytes = self.len * self.dtype.size_in_bytes();
        if self.ptr != 0 && size_bytes != 0 {
            let layout =
                AllocLayout::from_size_align(size_bytes, ALIGN).expect("invalid allocation layout");
            unsafe {
                dealloc(self.ptr as *mut u8, layout);
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &format!("0x{:x}", self.inner.ptr))
            .field("len", &self.inner.len)
            .field("dtype", &self.inner.dtype)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let s = Storage::from_slice(&[1.0f32, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.dtype(), DType::F32);
        assert_eq!(s.to_vec::<f32>(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_zeroed_allocation() {
        let s = Storage::new(4, DType::I64);
        assert_eq!(s.to_vec::<i64>(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_empty() {
        let s = Storage::new(0, DType::U8);
        assert!(s.is_empty());
        assert_eq!(s.ptr(), 0);
        assert!(s.to_vec::<u8>().is_empty());
    }

    #[test]
    fn test_clone_shares_buffer() {
        let a = Storage::from_slice(&[7i32; 8]);
        let b = a.clone();
        assert_eq!(a.ptr(), b.ptr());
        assert!(!a.is_unique());
    }
}
