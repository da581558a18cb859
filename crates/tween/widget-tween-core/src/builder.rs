//! Fluent configuration of a freshly created tween.

use crate::components::{
    AnimatedProperty, CanvasPosition, ColorAndOpacity, MaxDesiredHeight, Opacity, Padding,
    PropertyTween, Rotation, Scale, Translation, VisibilityProp, WidthOverride,
};
use crate::easing::EasingType;
use crate::ids::EntityHandle;
use crate::instance::TweenLink;
use crate::pool::Behavior;
use crate::target::WidgetHandle;
use crate::tweener::Tweener;
use crate::value::{LinearColor, Margin, Vec2, Visibility};

/// Configures one pending instance. Finish with [`TweenBuilder::begin`], or
/// with [`TweenBuilder::handle`] and a later [`Tweener::begin`].
///
/// ```
/// # use std::{cell::RefCell, rc::Rc};
/// # use widget_tween_core::{Tweener, TweenTarget, WidgetHandle, WidgetTransform, Vec2, EasingType};
/// # struct Label { t: WidgetTransform, o: f32 }
/// # impl TweenTarget for Label {
/// #     fn render_transform(&self) -> WidgetTransform { self.t }
/// #     fn set_render_transform(&mut self, t: WidgetTransform) { self.t = t }
/// #     fn render_opacity(&self) -> f32 { self.o }
/// #     fn set_render_opacity(&mut self, o: f32) { self.o = o }
/// # }
/// let label: WidgetHandle = Rc::new(RefCell::new(Label { t: Default::default(), o: 0.0 }));
/// let mut tweener = Tweener::new();
/// tweener
///     .create(&label, 0.3, 0.0, false)
///     .easing(EasingType::OutCubic)
///     .from_translation(Vec2::new(-40.0, 0.0))
///     .to_translation(Vec2::ZERO)
///     .to_opacity(1.0)
///     .begin();
/// ```
pub struct TweenBuilder<'a> {
    tweener: &'a mut Tweener,
    slot: usize,
}

macro_rules! from_to {
    ($prop:ty, $value:ty, $from:ident, $to:ident) => {
        pub fn $from(mut self, value: $value) -> Self {
            self.tween::<$prop>().from(value);
            self
        }

        pub fn $to(mut self, value: $value) -> Self {
            self.tween::<$prop>().to(value);
            self
        }
    };
}

impl<'a> TweenBuilder<'a> {
    pub(crate) fn new(tweener: &'a mut Tweener, slot: usize) -> Self {
        Self { tweener, slot }
    }

    pub fn easing(self, kind: EasingType) -> Self {
        self.tweener.pending_slot(self.slot).0.set_easing(kind, None);
        self
    }

    /// Step count, elastic period or back overshoot, depending on the curve.
    pub fn easing_param(self, param: f32) -> Self {
        self.tweener
            .pending_slot(self.slot)
            .0
            .set_easing_param(Some(param));
        self
    }

    from_to!(Translation, Vec2, from_translation, to_translation);
    from_to!(Scale, Vec2, from_scale, to_scale);
    from_to!(Rotation, f32, from_rotation, to_rotation);
    from_to!(Opacity, f32, from_opacity, to_opacity);
    from_to!(ColorAndOpacity, LinearColor, from_color, to_color);
    from_to!(VisibilityProp, Visibility, from_visibility, to_visibility);
    from_to!(CanvasPosition, Vec2, from_canvas_position, to_canvas_position);
    from_to!(Padding, Margin, from_padding, to_padding);
    from_to!(WidthOverride, f32, from_width_override, to_width_override);
    from_to!(MaxDesiredHeight, f32, from_max_desired_height, to_max_desired_height);

    /// Head back to the identity pose: no offset, unit scale, no rotation,
    /// fully opaque, white tint.
    pub fn to_reset(self) -> Self {
        self.to_scale(Vec2::ONE)
            .to_opacity(1.0)
            .to_translation(Vec2::ZERO)
            .to_color(LinearColor::WHITE)
            .to_rotation(0.0)
    }

    /// The behavior for `P`, added to this tween on first access.
    pub fn tween<P: AnimatedProperty>(&mut self) -> &mut PropertyTween<P> {
        let (inst, registry) = self.tweener.pending_slot(self.slot);
        let entity = inst.entity();
        if !registry.contains::<PropertyTween<P>>(entity) {
            registry.add(entity, PropertyTween::<P>::new());
            registry.set_entity_data(entity, inst.link());
        }
        match registry.get_mut::<PropertyTween<P>>(entity) {
            Some(tween) => tween,
            None => unreachable!("behavior vanished right after insertion"),
        }
    }

    /// Attach a custom behavior. Panics if this tween already has one of the
    /// same type.
    pub fn with_behavior<B: Behavior<TweenLink>>(self, behavior: B) -> Self {
        let (inst, registry) = self.tweener.pending_slot(self.slot);
        let entity = inst.entity();
        registry.add(entity, behavior);
        registry.set_entity_data(entity, inst.link());
        self
    }

    pub fn on_start(self, callback: impl FnOnce(&WidgetHandle) + 'static) -> Self {
        self.tweener
            .pending_slot(self.slot)
            .0
            .set_on_start(Box::new(callback));
        self
    }

    pub fn on_complete(
        self,
        callback: impl FnOnce(&mut Tweener, Option<WidgetHandle>) + 'static,
    ) -> Self {
        self.tweener
            .pending_slot(self.slot)
            .0
            .set_on_complete(Box::new(callback));
        self
    }

    /// Capture start values, write the starting pose, and hand back the
    /// tween's handle.
    pub fn begin(self) -> EntityHandle {
        let (inst, registry) = self.tweener.pending_slot(self.slot);
        inst.begin(registry);
        inst.entity()
    }

    /// Finish configuring without beginning.
    pub fn handle(&self) -> EntityHandle {
        self.tweener.pending_handle(self.slot)
    }
}
