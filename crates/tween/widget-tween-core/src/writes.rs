//! Write coalescing.
//!
//! Behaviors never call target setters themselves. They stage values into
//! the write groups of their widget during `apply`, and the scheduler flushes
//! every dirty group once after all pools have run. Every tween on the same
//! widget shares one [`WriteGroups`] record, so translation, scale and
//! rotation cost one `set_render_transform` per tick even when separate
//! additive tweens drive them.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use hashbrown::HashMap;
use log::warn;

use crate::interp::Lerp;
use crate::target::{TargetRef, TweenTarget};
use crate::value::WidgetTransform;

/// One batched write to the target.
pub trait WriteGroup: Default + 'static {
    /// Push the staged value to `target` and reset. Returns true when a
    /// setter was called.
    fn flush(&mut self, target: &mut dyn TweenTarget) -> bool;
}

trait ErasedWrite {
    fn flush(&mut self, target: &mut dyn TweenTarget) -> bool;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<G: WriteGroup> ErasedWrite for G {
    fn flush(&mut self, target: &mut dyn TweenTarget) -> bool {
        WriteGroup::flush(self, target)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Write groups of one widget, flushed in first-use order.
#[derive(Default)]
pub struct WriteGroups {
    slots: Vec<(TypeId, Box<dyn ErasedWrite>)>,
}

impl WriteGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `G`, created on first use.
    pub fn group_mut<G: WriteGroup>(&mut self) -> &mut G {
        let key = TypeId::of::<G>();
        let pos = match self.slots.iter().position(|(id, _)| *id == key) {
            Some(pos) => pos,
            None => {
                self.slots.push((key, Box::new(G::default())));
                self.slots.len() - 1
            }
        };
        match self.slots[pos].1.as_any_mut().downcast_mut::<G>() {
            Some(group) => group,
            None => unreachable!("write slot keyed by the wrong type"),
        }
    }

    /// Flush every dirty group. Returns the number of setter calls made.
    pub fn flush(&mut self, target: &mut dyn TweenTarget) -> usize {
        self.slots
            .iter_mut()
            .map(|(_, group)| group.flush(target))
            .filter(|wrote| *wrote)
            .count()
    }

    /// Number of distinct groups ever staged into.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for WriteGroups {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteGroups")
            .field("groups", &self.slots.len())
            .finish()
    }
}

/// The write record of one widget, shared by every tween driving it.
pub type SharedWrites = Rc<RefCell<WriteGroups>>;

/// Write records keyed by widget identity.
///
/// A record lives as long as some instance on its widget holds it. The
/// stored [`TargetRef`] keeps the widget's allocation, and with it the key,
/// from being reused while the entry exists.
#[derive(Default)]
pub(crate) struct TargetWrites {
    records: HashMap<*const (), (TargetRef, SharedWrites)>,
}

impl TargetWrites {
    /// The record for `target`, created on first use.
    pub(crate) fn record_for(&mut self, target: &TargetRef) -> SharedWrites {
        let (_, record) = self
            .records
            .entry(target.key())
            .or_insert_with(|| (target.clone(), SharedWrites::default()));
        record.clone()
    }

    /// Flush every live widget's record once. Returns the number of setter
    /// calls made.
    pub(crate) fn flush_all(&mut self) -> usize {
        let mut writes = 0;
        for (target, record) in self.records.values() {
            let Some(widget) = target.upgrade() else {
                continue;
            };
            let Ok(mut widget) = widget.try_borrow_mut() else {
                warn!("{target:?} is borrowed elsewhere, skipping this flush");
                continue;
            };
            writes += record.borrow_mut().flush(&mut *widget);
        }
        writes
    }

    /// Drop records no instance holds anymore.
    pub(crate) fn prune(&mut self) {
        self.records
            .retain(|_, (_, record)| Rc::strong_count(record) > 1);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

impl std::fmt::Debug for TargetWrites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetWrites")
            .field("targets", &self.records.len())
            .finish()
    }
}

/// Render transform record shared by translation, scale and rotation.
#[derive(Debug, Default)]
pub struct TransformWrite {
    staged: Option<WidgetTransform>,
}

impl TransformWrite {
    /// The transform being staged this tick. Seeded from the target on first
    /// access so fields nobody animates keep their current value.
    pub fn staged(&mut self, target: &dyn TweenTarget) -> &mut WidgetTransform {
        self.staged.get_or_insert_with(|| target.render_transform())
    }

    pub fn is_dirty(&self) -> bool {
        self.staged.is_some()
    }
}

impl WriteGroup for TransformWrite {
    fn flush(&mut self, target: &mut dyn TweenTarget) -> bool {
        match self.staged.take() {
            Some(transform) => {
                target.set_render_transform(transform);
                true
            }
            None => false,
        }
    }
}

/// A property written through its own setter.
pub trait SetterProperty: 'static {
    type Value: Lerp;
    fn write(target: &mut dyn TweenTarget, value: Self::Value);
}

/// Last staged value for a [`SetterProperty`].
pub struct Latest<P: SetterProperty> {
    value: Option<P::Value>,
    _marker: PhantomData<P>,
}

impl<P: SetterProperty> Default for Latest<P> {
    fn default() -> Self {
        Self {
            value: None,
            _marker: PhantomData,
        }
    }
}

impl<P: SetterProperty> Latest<P> {
    pub fn stage(&mut self, value: P::Value) {
        self.value = Some(value);
    }

    pub fn is_dirty(&self) -> bool {
        self.value.is_some()
    }
}

impl<P: SetterProperty> WriteGroup for Latest<P> {
    fn flush(&mut self, target: &mut dyn TweenTarget) -> bool {
        match self.value.take() {
            Some(value) => {
                P::write(target, value);
                true
            }
            None => false,
        }
    }
}
