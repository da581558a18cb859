//! Scheduler.
//!
//! [`Tweener`] owns every instance and the one [`PoolRegistry`] their
//! behaviors live in. New instances always land in the pending buffer and are
//! promoted at the end of a tick, so nothing a completion callback does can
//! disturb the active set being walked.

use log::{debug, trace, warn};

use crate::builder::TweenBuilder;
use crate::config::{CompleteAllPolicy, Config};
use crate::ids::EntityHandle;
use crate::instance::{TweenInstance, TweenLink, TweenState};
use crate::registry::PoolRegistry;
use crate::target::{TargetRef, WidgetHandle};
use crate::writes::TargetWrites;

pub struct Tweener {
    cfg: Config,
    registry: PoolRegistry<TweenLink>,
    active: Vec<TweenInstance>,
    pending: Vec<TweenInstance>,
    writes: TargetWrites,
    initialized: bool,
}

impl Default for Tweener {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// A started scheduler using `cfg`.
    pub fn with_config(cfg: Config) -> Self {
        Self {
            active: Vec::with_capacity(cfg.active_capacity),
            pending: Vec::with_capacity(cfg.pending_capacity),
            registry: PoolRegistry::new(),
            writes: TargetWrites::default(),
            cfg,
            initialized: true,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Drop every instance without callbacks and accept ticks again.
    pub fn startup(&mut self) {
        self.reset();
        self.initialized = true;
        debug!("tweener started");
    }

    /// Drop every instance without callbacks. Ticks are ignored until the
    /// next [`Tweener::startup`].
    pub fn shutdown(&mut self) {
        self.reset();
        self.initialized = false;
        debug!("tweener shut down");
    }

    fn reset(&mut self) {
        self.active.clear();
        self.pending.clear();
        self.registry.remove_all();
        self.writes.clear();
    }

    /// Queue a new tween on `target` and return its builder.
    ///
    /// Unless `additive`, every existing tween on `target` is cleared first.
    /// Panics if `duration` is not a positive finite number.
    pub fn create(
        &mut self,
        target: &WidgetHandle,
        duration: f32,
        delay: f32,
        additive: bool,
    ) -> TweenBuilder<'_> {
        if !additive {
            self.clear(target);
        }
        let entity = self.registry.entity_handle();
        let target = TargetRef::new(target);
        let writes = self.writes.record_for(&target);
        self.pending
            .push(TweenInstance::new(target, writes, duration, delay, entity));
        let slot = self.pending.len() - 1;
        TweenBuilder::new(self, slot)
    }

    /// Begin an instance whose builder was finished with
    /// [`TweenBuilder::handle`]. Returns false if no such instance exists or it
    /// has already begun.
    pub fn begin(&mut self, handle: EntityHandle) -> bool {
        let Self {
            registry,
            active,
            pending,
            ..
        } = self;
        match pending
            .iter_mut()
            .chain(active.iter_mut())
            .find(|inst| inst.entity() == handle)
        {
            Some(inst) if !inst.has_begun() => {
                inst.begin(registry);
                true
            }
            _ => false,
        }
    }

    /// Remove every pending or active tween on `target`. Completion callbacks
    /// do not run. Returns how many were removed.
    pub fn clear(&mut self, target: &WidgetHandle) -> usize {
        let registry = &mut self.registry;
        let mut removed = 0;
        for list in [&mut self.active, &mut self.pending] {
            list.retain(|inst| {
                if inst.target().points_to(target) {
                    registry.remove_entity(inst.entity());
                    removed += 1;
                    false
                } else {
                    true
                }
            });
        }
        if removed > 0 {
            self.writes.prune();
            debug!("cleared {removed} tween(s)");
        }
        removed
    }

    /// Advance every active tween by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            warn!("tick({dt}) on a tweener that is shut down");
            return;
        }

        let registry = &mut self.registry;
        for inst in &mut self.active {
            inst.pre_update(dt, registry);
        }

        self.registry.apply_all();

        let writes = self.writes.flush_all();

        // Reverse walk with swap removal; cleanup runs once the instance is
        // already out of `active`, and may reenter through its callback.
        let mut completed = 0;
        let mut i = self.active.len();
        while i > 0 {
            i -= 1;
            if i >= self.active.len() || !self.active[i].is_complete() {
                continue;
            }
            let inst = self.active.swap_remove(i);
            inst.complete_cleanup(self);
            completed += 1;
        }

        if completed > 0 {
            self.writes.prune();
        }

        let promoted = self.pending.len();
        self.active.append(&mut self.pending);

        trace!(
            "tick dt={dt}: {writes} write(s), {completed} completed, {promoted} promoted, {} active",
            self.active.len()
        );
    }

    /// Force every tween to finish, firing completion callbacks.
    pub fn complete_all(&mut self) {
        let step = self.cfg.complete_all_step;
        match self.cfg.complete_all {
            CompleteAllPolicy::TwoTicks => {
                self.tick(step);
                self.tick(step);
            }
            CompleteAllPolicy::Drain { max_passes } => {
                for _ in 0..max_passes {
                    if self.is_idle() {
                        return;
                    }
                    self.tick(step);
                }
                if !self.is_idle() {
                    warn!(
                        "complete_all gave up after {max_passes} passes: {} active, {} pending",
                        self.active.len(),
                        self.pending.len()
                    );
                }
            }
        }
    }

    /// True if an active tween drives `target`. Pending tweens do not count.
    pub fn is_animating(&self, target: &WidgetHandle) -> bool {
        self.active.iter().any(|inst| inst.target().points_to(target))
    }

    pub fn state(&self, handle: EntityHandle) -> Option<TweenState> {
        if self.pending.iter().any(|inst| inst.entity() == handle) {
            return Some(TweenState::Pending);
        }
        self.active
            .iter()
            .find(|inst| inst.entity() == handle)
            .map(TweenInstance::state)
    }

    /// The pending or active instance owning `handle`.
    pub fn instance(&self, handle: EntityHandle) -> Option<&TweenInstance> {
        self.pending
            .iter()
            .chain(self.active.iter())
            .find(|inst| inst.entity() == handle)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.pending.is_empty()
    }

    /// Number of widgets with a live write record.
    pub fn write_target_count(&self) -> usize {
        self.writes.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn registry(&self) -> &PoolRegistry<TweenLink> {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut PoolRegistry<TweenLink> {
        &mut self.registry
    }

    pub(crate) fn pending_slot(
        &mut self,
        slot: usize,
    ) -> (&mut TweenInstance, &mut PoolRegistry<TweenLink>) {
        (&mut self.pending[slot], &mut self.registry)
    }

    pub(crate) fn pending_handle(&self, slot: usize) -> EntityHandle {
        self.pending[slot].entity()
    }
}

impl std::fmt::Debug for Tweener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tweener")
            .field("active", &self.active.len())
            .field("pending", &self.pending.len())
            .field("registry", &self.registry)
            .field("writes", &self.writes)
            .field("initialized", &self.initialized)
            .finish()
    }
}
