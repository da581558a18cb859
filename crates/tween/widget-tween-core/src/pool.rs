//! Homogeneous behavior pools.
//!
//! A [`Pool`] stores every live instance of one behavior type in a dense
//! vector, alongside the owning handles in matching order and a
//! `handle -> index` map. Removal swaps the last element into the hole, so the
//! map entry of whatever moved must be repaired before the call returns;
//! [`Pool::remove`] does both as one step.

use std::any::Any;

use hashbrown::HashMap;

use crate::ids::EntityHandle;

/// Contract every pooled behavior implements.
///
/// `D` is the binding data handed to [`Behavior::set_data`] after insertion
/// (for tweens, the shared frame of the owning instance).
pub trait Behavior<D>: 'static {
    /// Capture the current target value as the interpolation start.
    fn begin(&mut self);
    /// Compute and stage this tick's interpolated value.
    fn apply(&mut self);
    /// Suspend or resume without removing.
    fn set_active(&mut self, active: bool);
    /// Bind to the owning instance.
    fn set_data(&mut self, data: &D);
}

#[derive(Debug)]
pub struct Pool<T> {
    index: HashMap<EntityHandle, usize>,
    handles: Vec<EntityHandle>,
    objects: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            handles: Vec::new(),
            objects: Vec::new(),
        }
    }
}

impl<T> Pool<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.index.contains_key(&handle)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&T> {
        self.index.get(&handle).map(|&i| &self.objects[i])
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut T> {
        let i = *self.index.get(&handle)?;
        Some(&mut self.objects[i])
    }

    /// Append `value` for `handle`. The handle must not already be present.
    pub fn insert(&mut self, handle: EntityHandle, value: T) {
        assert!(
            !self.index.contains_key(&handle),
            "{handle} already owns a {} in this pool",
            std::any::type_name::<T>()
        );
        self.index.insert(handle, self.objects.len());
        self.objects.push(value);
        self.handles.push(handle);
        self.debug_check();
    }

    /// Swap-and-pop removal with index repair. Returns the removed value.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<T> {
        let index = self.index.remove(&handle)?;
        debug_assert_eq!(self.handles[index], handle);

        let removed = self.objects.swap_remove(index);
        self.handles.swap_remove(index);
        // Whatever used to be last now lives at `index`.
        if let Some(&moved) = self.handles.get(index) {
            self.index.insert(moved, index);
        }
        self.debug_check();
        Some(removed)
    }

    /// Drop every entry but keep allocations.
    pub fn clear(&mut self) {
        self.index.clear();
        self.handles.clear();
        self.objects.clear();
    }

    pub fn handles(&self) -> &[EntityHandle] {
        &self.handles
    }

    /// Run `f` on the entry owned by `handle`, or on every entry for
    /// [`EntityHandle::ALL`].
    fn for_target(&mut self, handle: EntityHandle, mut f: impl FnMut(&mut T)) {
        if handle.is_broadcast() {
            self.objects.iter_mut().for_each(f);
        } else if let Some(obj) = self.get_mut(handle) {
            f(obj);
        }
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(self.objects.len(), self.handles.len());
        debug_assert_eq!(self.objects.len(), self.index.len());
    }

    /// Full consistency check of the index map against the handle vector.
    pub fn is_consistent(&self) -> bool {
        self.objects.len() == self.handles.len()
            && self.handles.len() == self.index.len()
            && self
                .handles
                .iter()
                .enumerate()
                .all(|(i, h)| self.index.get(h) == Some(&i))
    }
}

/// Type-erased face of a [`Pool`], the only surface the registry fans out to.
pub(crate) trait ErasedPool<D> {
    fn apply(&mut self, handle: EntityHandle);
    fn begin(&mut self, handle: EntityHandle);
    fn remove(&mut self, handle: EntityHandle);
    fn set_active(&mut self, handle: EntityHandle, active: bool);
    fn set_data(&mut self, handle: EntityHandle, data: &D);
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<D: 'static, T: Behavior<D>> ErasedPool<D> for Pool<T> {
    fn apply(&mut self, handle: EntityHandle) {
        self.for_target(handle, |obj| obj.apply());
    }

    fn begin(&mut self, handle: EntityHandle) {
        self.for_target(handle, |obj| obj.begin());
    }

    fn remove(&mut self, handle: EntityHandle) {
        if handle.is_broadcast() {
            self.clear();
        } else {
            let _ = Pool::remove(self, handle);
        }
    }

    fn set_active(&mut self, handle: EntityHandle, active: bool) {
        self.for_target(handle, |obj| obj.set_active(active));
    }

    fn set_data(&mut self, handle: EntityHandle, data: &D) {
        // Binding is always per entity; a broadcast would alias every
        // behavior onto one instance.
        if let Some(obj) = self.get_mut(handle) {
            obj.set_data(data);
        }
    }

    fn len(&self) -> usize {
        Pool::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u32) -> EntityHandle {
        EntityHandle(n)
    }

    #[test]
    fn remove_middle_repairs_moved_index() {
        let mut pool = Pool::default();
        for n in 2..7 {
            pool.insert(h(n), n * 10);
        }
        assert_eq!(pool.remove(h(3)), Some(30));
        assert!(pool.is_consistent());
        // h(6) was last and moved into slot 1.
        assert_eq!(pool.handles()[1], h(6));
        for n in [2, 4, 5, 6] {
            assert_eq!(pool.get(h(n)), Some(&(n * 10)));
        }
        assert_eq!(pool.get(h(3)), None);
    }

    #[test]
    fn remove_last_and_only() {
        let mut pool = Pool::default();
        pool.insert(h(2), 'a');
        pool.insert(h(3), 'b');
        assert_eq!(pool.remove(h(3)), Some('b'));
        assert!(pool.is_consistent());
        assert_eq!(pool.remove(h(2)), Some('a'));
        assert!(pool.is_empty());
        assert!(pool.is_consistent());
        assert_eq!(pool.remove(h(2)), None);
    }

    #[test]
    #[should_panic(expected = "already owns")]
    fn double_insert_panics() {
        let mut pool = Pool::default();
        pool.insert(h(2), 1u8);
        pool.insert(h(2), 2u8);
    }
}
