//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Sizing hints and `complete_all` behavior for a [`crate::Tweener`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hints for the active and pending instance buffers.
    pub active_capacity: usize,
    pub pending_capacity: usize,

    /// Delta fed to each tick issued by `complete_all`, in seconds. Must
    /// exceed any delay plus duration in use.
    pub complete_all_step: f32,

    pub complete_all: CompleteAllPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_capacity: 64,
            pending_capacity: 16,
            complete_all_step: 100_000.0,
            complete_all: CompleteAllPolicy::default(),
        }
    }
}

/// How `complete_all` drains the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompleteAllPolicy {
    /// Tick until no instance is pending or active, including ones spawned by
    /// completion callbacks, up to `max_passes` ticks.
    Drain { max_passes: u32 },
    /// Exactly two large ticks. Instances that were still pending or spawned
    /// during the first tick may survive.
    TwoTicks,
}

impl Default for CompleteAllPolicy {
    fn default() -> Self {
        CompleteAllPolicy::Drain { max_passes: 16 }
    }
}
