//! Pool registry: heterogeneous behavior storage keyed by entity handle.
//!
//! One [`Pool`] per behavior type, created the first time that type is added
//! and kept for the registry's lifetime ([`PoolRegistry::remove_all`] clears
//! contents only). The type token is [`TypeId`], used purely as a key into the
//! pool index map. Lifecycle calls are fanned out pool by pool, so a broadcast
//! walks each dense behavior vector in turn.

use std::any::TypeId;

use hashbrown::HashMap;

use crate::ids::{EntityHandle, HandleAllocator};
use crate::pool::{Behavior, ErasedPool, Pool};

pub struct PoolRegistry<D: 'static> {
    ids: HandleAllocator,
    type_to_pool: HashMap<TypeId, usize>,
    pools: Vec<Box<dyn ErasedPool<D>>>,
}

impl<D: 'static> Default for PoolRegistry<D> {
    fn default() -> Self {
        Self {
            ids: HandleAllocator::new(),
            type_to_pool: HashMap::new(),
            pools: Vec::new(),
        }
    }
}

impl<D: 'static> std::fmt::Debug for PoolRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.pools.len())
            .field("entities", &self.total_len())
            .finish()
    }
}

impl<D: 'static> PoolRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity handle.
    #[inline]
    pub fn entity_handle(&mut self) -> EntityHandle {
        self.ids.next()
    }

    /// Insert `object` for `handle` at the end of `T`'s pool.
    ///
    /// Panics if `handle` already owns a `T`: registering the same behavior
    /// type twice on one entity is a caller bug.
    pub fn add<T: Behavior<D>>(&mut self, handle: EntityHandle, object: T) {
        assert!(handle.is_valid(), "cannot add a behavior to {handle}");
        self.pool_mut::<T>().insert(handle, object);
    }

    /// Construct the behavior in place from `make`.
    pub fn emplace<T: Behavior<D>>(&mut self, handle: EntityHandle, make: impl FnOnce() -> T) {
        self.add(handle, make());
    }

    /// Remove `handle` from every pool, or clear every pool for
    /// [`EntityHandle::ALL`]. Pools without the handle are left alone.
    pub fn remove_entity(&mut self, handle: EntityHandle) {
        for pool in &mut self.pools {
            pool.remove(handle);
        }
    }

    /// Clear every pool's contents. The set of known pool types survives.
    pub fn remove_all(&mut self) {
        self.remove_entity(EntityHandle::ALL);
    }

    pub fn apply(&mut self, handle: EntityHandle) {
        for pool in &mut self.pools {
            pool.apply(handle);
        }
    }

    pub fn apply_all(&mut self) {
        self.apply(EntityHandle::ALL);
    }

    pub fn entity_begin(&mut self, handle: EntityHandle) {
        for pool in &mut self.pools {
            pool.begin(handle);
        }
    }

    pub fn set_entity_active(&mut self, handle: EntityHandle, active: bool) {
        for pool in &mut self.pools {
            pool.set_active(handle, active);
        }
    }

    pub fn set_active_all_entities(&mut self, active: bool) {
        self.set_entity_active(EntityHandle::ALL, active);
    }

    /// Re-bind every behavior owned by `handle` to `data`.
    pub fn set_entity_data(&mut self, handle: EntityHandle, data: &D) {
        for pool in &mut self.pools {
            pool.set_data(handle, data);
        }
    }

    pub fn contains<T: Behavior<D>>(&self, handle: EntityHandle) -> bool {
        self.pool::<T>().is_some_and(|p| p.contains(handle))
    }

    pub fn get<T: Behavior<D>>(&self, handle: EntityHandle) -> Option<&T> {
        self.pool::<T>()?.get(handle)
    }

    pub fn get_mut<T: Behavior<D>>(&mut self, handle: EntityHandle) -> Option<&mut T> {
        let idx = *self.type_to_pool.get(&TypeId::of::<T>())?;
        self.pools[idx]
            .as_any_mut()
            .downcast_mut::<Pool<T>>()?
            .get_mut(handle)
    }

    /// Number of live `T` behaviors (zero if `T` was never registered).
    pub fn pool_len<T: Behavior<D>>(&self) -> usize {
        self.pool::<T>().map_or(0, Pool::len)
    }

    /// Number of distinct behavior types ever registered.
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Live behaviors across all pools.
    pub fn total_len(&self) -> usize {
        self.pools.iter().map(|p| p.len()).sum()
    }

    pub fn pool<T: Behavior<D>>(&self) -> Option<&Pool<T>> {
        let idx = *self.type_to_pool.get(&TypeId::of::<T>())?;
        self.pools[idx].as_any().downcast_ref::<Pool<T>>()
    }

    fn pool_mut<T: Behavior<D>>(&mut self) -> &mut Pool<T> {
        let idx = match self.type_to_pool.get(&TypeId::of::<T>()) {
            Some(&idx) => idx,
            None => {
                let idx = self.pools.len();
                self.pools.push(Box::new(Pool::<T>::default()));
                self.type_to_pool.insert(TypeId::of::<T>(), idx);
                idx
            }
        };
        match self.pools[idx].as_any_mut().downcast_mut::<Pool<T>>() {
            Some(pool) => pool,
            None => unreachable!("pool index for {} holds another type", std::any::type_name::<T>()),
        }
    }
}
