//! Property behaviors.
//!
//! Every shipped property is a marker type implementing [`AnimatedProperty`];
//! [`PropertyTween<P>`] turns any of them into a pooled [`Behavior`]. New
//! properties plug in the same way without touching the registry.

use std::marker::PhantomData;

use crate::instance::TweenLink;
use crate::interp::Lerp;
use crate::pool::Behavior;
use crate::property::TweenProp;
use crate::target::TweenTarget;
use crate::value::{LinearColor, Margin, Vec2, Visibility};
use crate::writes::{Latest, SetterProperty, TransformWrite, WriteGroup};

/// How one animatable property is read from and staged for a target.
pub trait AnimatedProperty: 'static {
    type Value: Lerp;
    type Group: WriteGroup;

    /// Current value, or `None` when the target lacks the capability.
    fn read(target: &dyn TweenTarget) -> Option<Self::Value>;

    fn stage(group: &mut Self::Group, target: &dyn TweenTarget, value: Self::Value);
}

/// Pooled behavior animating one property of its instance's target.
pub struct PropertyTween<P: AnimatedProperty> {
    prop: TweenProp<P::Value>,
    link: Option<TweenLink>,
    _marker: PhantomData<P>,
}

impl<P: AnimatedProperty> Default for PropertyTween<P> {
    fn default() -> Self {
        Self {
            prop: TweenProp::new(),
            link: None,
            _marker: PhantomData,
        }
    }
}

impl<P: AnimatedProperty> PropertyTween<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(&mut self, value: P::Value) -> &mut Self {
        self.prop.set_start(value);
        self
    }

    pub fn to(&mut self, value: P::Value) -> &mut Self {
        self.prop.set_target(value);
        self
    }

    pub fn property(&self) -> &TweenProp<P::Value> {
        &self.prop
    }

    pub fn is_bound(&self) -> bool {
        self.link.is_some()
    }

    fn bound_link(&self) -> Option<&TweenLink> {
        debug_assert!(
            self.link.is_some(),
            "{} used before being bound to an instance",
            std::any::type_name::<Self>()
        );
        self.link.as_ref()
    }
}

impl<P: AnimatedProperty> Behavior<TweenLink> for PropertyTween<P> {
    fn begin(&mut self) {
        let Some(link) = self.bound_link() else {
            return;
        };
        let Some(target) = link.borrow().target.upgrade() else {
            return;
        };
        let Ok(widget) = target.try_borrow() else {
            return;
        };
        if let Some(current) = P::read(&*widget) {
            self.prop.on_begin(current);
        }
    }

    fn apply(&mut self) {
        let Some(link) = self.link.as_ref() else {
            debug_assert!(false, "{} applied while unbound", std::any::type_name::<Self>());
            return;
        };
        let frame = link.borrow();
        if !self.prop.update(frame.eased_alpha) {
            return;
        }
        let Some(value) = self.prop.current_value() else {
            return;
        };
        let Some(target) = frame.target.upgrade() else {
            return;
        };
        let Ok(widget) = target.try_borrow() else {
            return;
        };
        let mut writes = frame.writes.borrow_mut();
        P::stage(writes.group_mut::<P::Group>(), &*widget, value);
    }

    fn set_active(&mut self, active: bool) {
        self.prop.set_need_apply(active);
    }

    fn set_data(&mut self, data: &TweenLink) {
        self.link = Some(data.clone());
    }
}

pub struct Translation;
pub struct Scale;
pub struct Rotation;

impl AnimatedProperty for Translation {
    type Value = Vec2;
    type Group = TransformWrite;

    fn read(target: &dyn TweenTarget) -> Option<Vec2> {
        Some(target.render_transform().translation)
    }

    fn stage(group: &mut TransformWrite, target: &dyn TweenTarget, value: Vec2) {
        group.staged(target).translation = value;
    }
}

impl AnimatedProperty for Scale {
    type Value = Vec2;
    type Group = TransformWrite;

    fn read(target: &dyn TweenTarget) -> Option<Vec2> {
        Some(target.render_transform().scale)
    }

    fn stage(group: &mut TransformWrite, target: &dyn TweenTarget, value: Vec2) {
        group.staged(target).scale = value;
    }
}

/// Render angle in degrees.
impl AnimatedProperty for Rotation {
    type Value = f32;
    type Group = TransformWrite;

    fn read(target: &dyn TweenTarget) -> Option<f32> {
        Some(target.render_transform().angle)
    }

    fn stage(group: &mut TransformWrite, target: &dyn TweenTarget, value: f32) {
        group.staged(target).angle = value;
    }
}

/// Declares a property that goes through one getter/setter pair and its own
/// [`Latest`] record.
macro_rules! setter_property {
    ($(#[$meta:meta])* $name:ident, $value:ty, $get:ident, $set:ident) => {
        $(#[$meta])*
        pub struct $name;

        impl SetterProperty for $name {
            type Value = $value;

            fn write(target: &mut dyn TweenTarget, value: $value) {
                target.$set(value);
            }
        }

        impl AnimatedProperty for $name {
            type Value = $value;
            type Group = Latest<$name>;

            fn read(target: &dyn TweenTarget) -> Option<$value> {
                target.$get().into()
            }

            fn stage(group: &mut Latest<$name>, _target: &dyn TweenTarget, value: $value) {
                group.stage(value);
            }
        }
    };
}

setter_property!(
    /// Render opacity.
    Opacity, f32, render_opacity, set_render_opacity
);
setter_property!(
    /// Tint color including alpha.
    ColorAndOpacity, LinearColor, color_and_opacity, set_color_and_opacity
);
setter_property!(VisibilityProp, Visibility, visibility, set_visibility);
setter_property!(CanvasPosition, Vec2, canvas_position, set_canvas_position);
setter_property!(Padding, Margin, slot_padding, set_slot_padding);
setter_property!(WidthOverride, f32, width_override, set_width_override);
setter_property!(MaxDesiredHeight, f32, max_desired_height, set_max_desired_height);
