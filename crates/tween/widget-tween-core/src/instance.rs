//! One in-flight tween.
//!
//! A [`TweenInstance`] owns the timing of a tween and the entity handle its
//! behaviors live under. Behaviors never see the instance itself: they read
//! the eased fraction from, and stage writes into, the shared [`TweenFrame`]
//! bound to them through [`crate::PoolRegistry::set_entity_data`]. Moving the
//! instance between the scheduler's buffers therefore never invalidates a
//! behavior's binding.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::easing::{ease, EasingType};
use crate::ids::EntityHandle;
use crate::registry::PoolRegistry;
use crate::target::{TargetRef, WidgetHandle};
use crate::tweener::Tweener;
use crate::writes::SharedWrites;

/// State shared between an instance and its behaviors.
#[derive(Debug)]
pub struct TweenFrame {
    pub target: TargetRef,
    /// Output of the easing curve for the current tick.
    pub eased_alpha: f32,
    /// Write record of the target, shared with every other tween on it.
    pub writes: SharedWrites,
}

impl TweenFrame {
    pub fn link(target: TargetRef, writes: SharedWrites) -> TweenLink {
        Rc::new(RefCell::new(TweenFrame {
            target,
            eased_alpha: 0.0,
            writes,
        }))
    }
}

/// Binding data handed to every tween behavior.
pub type TweenLink = Rc<RefCell<TweenFrame>>;

pub type StartCallback = Box<dyn FnOnce(&WidgetHandle)>;

/// Receives the scheduler so it can chain, cancel or drain tweens. The
/// widget is `None` when it was destroyed mid-tween.
pub type CompleteCallback = Box<dyn FnOnce(&mut Tweener, Option<WidgetHandle>)>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TweenState {
    /// Configured but not yet ticked: in the pending buffer, or active
    /// without `begin` having been called.
    Pending,
    Delaying,
    Running,
    Complete,
}

pub struct TweenInstance {
    target: TargetRef,
    link: TweenLink,
    entity: EntityHandle,

    delay: f32,
    duration: f32,
    elapsed: f32,
    easing: EasingType,
    easing_param: Option<f32>,

    on_start: Option<StartCallback>,
    on_complete: Option<CompleteCallback>,

    update_instance: bool,
    update_components: bool,
    has_started: bool,
    is_complete: bool,
}

impl TweenInstance {
    pub(crate) fn new(
        target: TargetRef,
        writes: SharedWrites,
        duration: f32,
        delay: f32,
        entity: EntityHandle,
    ) -> Self {
        assert!(
            duration.is_finite() && duration > 0.0,
            "tween duration must be positive and finite, got {duration}"
        );
        Self {
            link: TweenFrame::link(target.clone(), writes),
            target,
            entity,
            delay,
            duration,
            elapsed: 0.0,
            easing: EasingType::default(),
            easing_param: None,
            on_start: None,
            on_complete: None,
            update_instance: false,
            update_components: false,
            has_started: false,
            is_complete: false,
        }
    }

    pub fn entity(&self) -> EntityHandle {
        self.entity
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn eased_alpha(&self) -> f32 {
        self.link.borrow().eased_alpha
    }

    pub fn easing(&self) -> (EasingType, Option<f32>) {
        (self.easing, self.easing_param)
    }

    pub fn has_begun(&self) -> bool {
        self.update_instance
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn state(&self) -> TweenState {
        if self.is_complete {
            TweenState::Complete
        } else if !self.update_instance {
            TweenState::Pending
        } else if self.has_started {
            TweenState::Running
        } else {
            TweenState::Delaying
        }
    }

    pub(crate) fn link(&self) -> &TweenLink {
        &self.link
    }

    pub(crate) fn set_easing(&mut self, kind: EasingType, param: Option<f32>) {
        self.easing = kind;
        self.easing_param = param;
    }

    pub(crate) fn set_easing_param(&mut self, param: Option<f32>) {
        self.easing_param = param;
    }

    pub(crate) fn set_on_start(&mut self, callback: StartCallback) {
        self.on_start = Some(callback);
    }

    pub(crate) fn set_on_complete(&mut self, callback: CompleteCallback) {
        self.on_complete = Some(callback);
    }

    /// Capture start values and write the zero-fraction pose right away.
    pub(crate) fn begin(&mut self, registry: &mut PoolRegistry<TweenLink>) {
        if !self.target.is_valid() {
            warn!("{}: beginning a tween whose target is already gone", self.entity);
        }
        self.update_instance = true;
        self.set_update_components(true, registry);
        registry.entity_begin(self.entity);
        registry.apply(self.entity);
        self.post_update();
    }

    fn set_update_components(&mut self, value: bool, registry: &mut PoolRegistry<TweenLink>) {
        if self.update_components != value {
            self.update_components = value;
            registry.set_entity_active(self.entity, value);
        }
    }

    /// Advance timing by `dt` and publish the eased fraction. Never touches
    /// the target's properties.
    pub(crate) fn pre_update(&mut self, dt: f32, registry: &mut PoolRegistry<TweenLink>) {
        // A dead target completes the instance whether or not it has begun.
        let Some(widget) = self.target.upgrade() else {
            self.is_complete = true;
            self.set_update_components(false, registry);
            return;
        };
        if !self.update_instance {
            return;
        }
        if self.is_complete {
            self.set_update_components(false, registry);
            return;
        }

        if self.delay > 0.0 {
            self.delay -= dt;
            self.set_update_components(false, registry);
            return;
        }
        self.set_update_components(true, registry);

        if !self.has_started {
            self.has_started = true;
            if let Some(on_start) = self.on_start.take() {
                on_start(&widget);
            }
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.is_complete = true;
        }

        let eased = ease(self.easing, self.elapsed, self.duration, self.easing_param);
        self.link.borrow_mut().eased_alpha = eased;
    }

    /// Flush the target's write record. Returns the number of setter calls.
    /// During a tick the scheduler flushes every record at once instead.
    pub(crate) fn post_update(&mut self) -> usize {
        let Some(widget) = self.target.upgrade() else {
            return 0;
        };
        let Ok(mut widget) = widget.try_borrow_mut() else {
            warn!("{}: target is borrowed elsewhere, skipping this flush", self.entity);
            return 0;
        };
        let writes = self.link.borrow().writes.clone();
        let wrote = writes.borrow_mut().flush(&mut *widget);
        wrote
    }

    /// Fire the completion callback and release the registry slot. Runs only
    /// after the instance has left the active set.
    pub(crate) fn complete_cleanup(mut self, tweener: &mut Tweener) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(tweener, self.target.upgrade());
        }
        tweener.registry_mut().remove_entity(self.entity);
    }
}

impl std::fmt::Debug for TweenInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenInstance")
            .field("entity", &self.entity)
            .field("state", &self.state())
            .field("delay", &self.delay)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}
