//! Host widget adapter.
//!
//! The host owns its widgets; the core only holds [`TargetRef`]s and reaches
//! the widget through [`TweenTarget`]. Render transform and opacity are
//! required. Everything else is an optional capability: the getter returns
//! `None` and the setter does nothing unless the host widget supports it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::value::{LinearColor, Margin, Vec2, Visibility, WidgetTransform};

pub trait TweenTarget {
    /// False once the host has torn the widget down, even if the allocation
    /// is still reachable.
    fn is_alive(&self) -> bool {
        true
    }

    fn render_transform(&self) -> WidgetTransform;
    fn set_render_transform(&mut self, transform: WidgetTransform);

    fn render_opacity(&self) -> f32;
    fn set_render_opacity(&mut self, opacity: f32);

    fn color_and_opacity(&self) -> Option<LinearColor> {
        None
    }
    fn set_color_and_opacity(&mut self, _color: LinearColor) {}

    fn visibility(&self) -> Option<Visibility> {
        None
    }
    fn set_visibility(&mut self, _visibility: Visibility) {}

    /// Padding of the slot the widget sits in.
    fn slot_padding(&self) -> Option<Margin> {
        None
    }
    fn set_slot_padding(&mut self, _padding: Margin) {}

    /// Position within a canvas panel slot.
    fn canvas_position(&self) -> Option<Vec2> {
        None
    }
    fn set_canvas_position(&mut self, _position: Vec2) {}

    /// Size box width override.
    fn width_override(&self) -> Option<f32> {
        None
    }
    fn set_width_override(&mut self, _width: f32) {}

    /// Size box maximum desired height.
    fn max_desired_height(&self) -> Option<f32> {
        None
    }
    fn set_max_desired_height(&mut self, _height: f32) {}
}

/// Strong, host-owned handle to a widget.
pub type WidgetHandle = Rc<RefCell<dyn TweenTarget>>;

/// Weak reference to a tweened widget.
///
/// Never extends the widget's lifetime. [`TargetRef::upgrade`] is the only
/// way in, and it fails once the widget is dropped or reports itself dead.
#[derive(Clone)]
pub struct TargetRef {
    inner: Weak<RefCell<dyn TweenTarget>>,
}

impl TargetRef {
    pub fn new(target: &WidgetHandle) -> Self {
        Self {
            inner: Rc::downgrade(target),
        }
    }

    pub fn upgrade(&self) -> Option<WidgetHandle> {
        let strong = self.inner.upgrade()?;
        // A widget that is mutably borrowed right now is being driven by the
        // host, so it is alive.
        let alive = strong.try_borrow().map_or(true, |t| t.is_alive());
        alive.then_some(strong)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.upgrade().is_some()
    }

    /// Identity comparison; works for dropped targets too.
    pub fn points_to(&self, target: &WidgetHandle) -> bool {
        std::ptr::eq(self.key(), Rc::as_ptr(target) as *const ())
    }

    /// Address of the widget allocation, stable while any `TargetRef` to it
    /// exists.
    pub(crate) fn key(&self) -> *const () {
        self.inner.as_ptr() as *const ()
    }
}

impl std::fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetRef")
            .field("ptr", &(self.inner.as_ptr() as *const ()))
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        alive: bool,
        transform: WidgetTransform,
        opacity: f32,
    }

    impl TweenTarget for Dummy {
        fn is_alive(&self) -> bool {
            self.alive
        }
        fn render_transform(&self) -> WidgetTransform {
            self.transform
        }
        fn set_render_transform(&mut self, transform: WidgetTransform) {
            self.transform = transform;
        }
        fn render_opacity(&self) -> f32 {
            self.opacity
        }
        fn set_render_opacity(&mut self, opacity: f32) {
            self.opacity = opacity;
        }
    }

    fn widget(alive: bool) -> WidgetHandle {
        Rc::new(RefCell::new(Dummy {
            alive,
            ..Default::default()
        }))
    }

    #[test]
    fn upgrade_fails_after_drop() {
        let w = widget(true);
        let r = TargetRef::new(&w);
        assert!(r.is_valid());
        drop(w);
        assert!(!r.is_valid());
    }

    #[test]
    fn dead_widget_is_invalid_while_still_allocated() {
        let w = widget(false);
        let r = TargetRef::new(&w);
        assert!(!r.is_valid());
        assert!(r.points_to(&w));
    }

    #[test]
    fn identity_distinguishes_widgets() {
        let a = widget(true);
        let b = widget(true);
        let r = TargetRef::new(&a);
        assert!(r.points_to(&a));
        assert!(!r.points_to(&b));
    }

    #[test]
    fn optional_capabilities_default_to_absent() {
        let w = widget(true);
        let mut t = w.borrow_mut();
        assert_eq!(t.color_and_opacity(), None);
        t.set_width_override(10.0);
        assert_eq!(t.width_override(), None);
    }
}
