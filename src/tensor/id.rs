//! Tensor ID generation

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a tensor
///
/// Lets a differentiation engine track tensor identity across calls, in
/// particular which tensor a scatter dirtied in place. IDs are unique within
/// a process lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TensorId(u64);

impl TensorId {
    /// Create a new unique tensor ID
    #[inline]
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for TensorId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let id1 = TensorId::new();
        let id2 = TensorId::new();
        assert_ne!(id1, id2);
        assert!(id2.raw() > id1.raw());
    }
}
