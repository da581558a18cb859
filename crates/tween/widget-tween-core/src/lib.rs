//! widget-tween-core: timed property tweens for retained-mode UI widgets.
//!
//! - [`PoolRegistry`]: type-erased, handle-keyed behavior pools.
//! - [`TweenInstance`]: delay, easing and completion of one tween.
//! - [`Tweener`]: the scheduler hosts tick once per frame.
//!
//! Widgets are reached through the [`TweenTarget`] adapter and held weakly.
//! Writes from several behaviors on one widget are coalesced per tick (see
//! [`writes`]).

pub mod builder;
pub mod components;
pub mod config;
pub mod easing;
pub mod error;
pub mod ids;
pub mod instance;
pub mod interp;
pub mod params;
pub mod pool;
pub mod property;
pub mod registry;
pub mod target;
pub mod tweener;
pub mod value;
pub mod writes;

pub use builder::TweenBuilder;
pub use components::{
    AnimatedProperty, CanvasPosition, ColorAndOpacity, MaxDesiredHeight, Opacity, Padding,
    PropertyTween, Rotation, Scale, Translation, VisibilityProp, WidthOverride,
};
pub use config::{CompleteAllPolicy, Config};
pub use easing::{ease, EasingType};
pub use error::ParamsError;
pub use ids::{EntityHandle, HandleAllocator};
pub use instance::{TweenFrame, TweenInstance, TweenLink, TweenState};
pub use interp::Lerp;
pub use params::{Endpoints, TweenParams};
pub use pool::{Behavior, Pool};
pub use property::{TweenProp, ALPHA_TOLERANCE};
pub use registry::PoolRegistry;
pub use target::{TargetRef, TweenTarget, WidgetHandle};
pub use tweener::Tweener;
pub use value::{select_conditional, LinearColor, Margin, Vec2, Visibility, WidgetTransform};
pub use writes::{Latest, SetterProperty, SharedWrites, TransformWrite, WriteGroup, WriteGroups};
