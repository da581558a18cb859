//! Single-property interpolator.

use crate::interp::Lerp;

/// Two fractions closer than this are treated as the same frame.
pub const ALPHA_TOLERANCE: f32 = 1e-3;

/// Start/target pair for one typed property plus the last applied fraction.
///
/// An explicit start (`set_start`) wins over the value captured in
/// [`TweenProp::on_begin`]. The caller clamps fractions; the interpolator
/// only compares and blends them.
#[derive(Clone, Debug)]
pub struct TweenProp<T> {
    start: Option<T>,
    target: Option<T>,
    has_explicit_start: bool,
    alpha: f32,
    applied: bool,
    need_apply: bool,
}

impl<T> Default for TweenProp<T> {
    fn default() -> Self {
        Self {
            start: None,
            target: None,
            has_explicit_start: false,
            alpha: 0.0,
            applied: false,
            need_apply: false,
        }
    }
}

impl<T: Lerp> TweenProp<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, value: T) {
        self.has_explicit_start = true;
        self.start = Some(value);
    }

    pub fn set_target(&mut self, value: T) {
        self.target = Some(value);
    }

    /// Use `current` as the start unless one was set explicitly.
    pub fn on_begin(&mut self, current: T) {
        if !self.has_explicit_start {
            self.start = Some(current);
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.has_explicit_start || self.target.is_some()
    }

    #[inline]
    pub fn need_apply(&self) -> bool {
        self.need_apply
    }

    #[inline]
    pub fn set_need_apply(&mut self, value: bool) {
        self.need_apply = value;
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn start(&self) -> Option<T> {
        self.start
    }

    pub fn target(&self) -> Option<T> {
        self.target
    }

    /// Record `alpha` as the applied fraction. Returns true when the caller
    /// should write the new value out.
    #[must_use]
    pub fn update(&mut self, alpha: f32) -> bool {
        if !self.is_set() || !self.need_apply {
            return false;
        }
        if self.applied && (alpha - self.alpha).abs() <= ALPHA_TOLERANCE {
            return false;
        }
        self.alpha = alpha;
        self.applied = true;
        true
    }

    /// `lerp(start, target, alpha)`. A missing endpoint collapses onto the
    /// other one; `None` only when neither is known.
    pub fn current_value(&self) -> Option<T> {
        match (self.start, self.target) {
            (Some(a), Some(b)) => Some(T::lerp(a, b, self.alpha)),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(start: f32, target: f32) -> TweenProp<f32> {
        let mut p = TweenProp::new();
        p.set_start(start);
        p.set_target(target);
        p.set_need_apply(true);
        p
    }

    #[test]
    fn near_equal_fractions_are_deduplicated() {
        let mut p = active(0.0, 10.0);
        assert!(p.update(0.5));
        assert!(!p.update(0.5003));
        assert!(p.update(0.6));
        assert_eq!(p.current_value(), Some(6.0));
    }

    #[test]
    fn first_apply_reports_change_even_without_motion() {
        let mut p = active(3.0, 3.0);
        assert!(p.update(0.0));
        assert!(!p.update(0.0));
        assert_eq!(p.current_value(), Some(3.0));
    }

    #[test]
    fn unset_or_inactive_is_a_no_op() {
        let mut unset = TweenProp::<f32>::new();
        unset.set_need_apply(true);
        assert!(!unset.update(0.3));

        let mut idle = active(0.0, 1.0);
        idle.set_need_apply(false);
        assert!(!idle.update(0.3));
    }

    #[test]
    fn explicit_start_wins_over_begin_capture() {
        let mut p = active(1.0, 2.0);
        p.on_begin(100.0);
        assert_eq!(p.start(), Some(1.0));

        let mut q = TweenProp::new();
        q.set_target(2.0);
        q.on_begin(100.0);
        assert_eq!(q.start(), Some(100.0));
        // on_begin alone does not make the property "set".
        let mut r = TweenProp::<f32>::new();
        r.on_begin(5.0);
        assert!(!r.is_set());
    }
}
