//! Entity handles and their allocator.

use serde::{Deserialize, Serialize};

/// Opaque handle naming one tween's slot across every behavior pool.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

impl EntityHandle {
    /// Broadcast sentinel: operations taking a handle fan out to every entity.
    pub const ALL: EntityHandle = EntityHandle(0);
    /// Never handed out. Must stay the last reserved value.
    pub const INVALID: EntityHandle = EntityHandle(1);
    /// First value the allocator hands out, also where it restarts after wrapping.
    pub const FIRST_VALID: EntityHandle = EntityHandle(Self::INVALID.0 + 1);

    #[inline]
    pub fn is_broadcast(self) -> bool {
        self == Self::ALL
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID.0
    }
}

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Monotonic handle allocator.
///
/// On overflow the counter skips the reserved range and restarts at
/// [`EntityHandle::FIRST_VALID`]. Nothing guards against a handle still in use
/// after 2^32 allocations; tweens are short-lived enough for that to be moot.
#[derive(Debug)]
pub struct HandleAllocator {
    last: u32,
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self {
            last: EntityHandle::INVALID.0,
        }
    }
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next(&mut self) -> EntityHandle {
        self.last = self.last.wrapping_add(1);
        if self.last < EntityHandle::FIRST_VALID.0 {
            self.last = EntityHandle::FIRST_VALID.0;
        }
        EntityHandle(self.last)
    }

    #[cfg(test)]
    fn with_last(last: u32) -> Self {
        Self { last }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic_from_first_valid() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.next(), EntityHandle(2));
        assert_eq!(alloc.next(), EntityHandle(3));
        assert!(EntityHandle(3).is_valid());
        assert!(!EntityHandle::ALL.is_valid());
        assert!(!EntityHandle::INVALID.is_valid());
    }

    #[test]
    fn alloc_wraps_past_reserved_range() {
        let mut alloc = HandleAllocator::with_last(u32::MAX - 1);
        assert_eq!(alloc.next(), EntityHandle(u32::MAX));
        assert_eq!(alloc.next(), EntityHandle::FIRST_VALID);
        assert_eq!(alloc.next(), EntityHandle(3));
    }
}
