//! Animatable value types shared by targets, behaviors and tween parameters.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Vec2::new(v[0], v[1])
    }
}

/// RGBA color (linear by convention).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const WHITE: LinearColor = LinearColor::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: LinearColor = LinearColor::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for LinearColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for LinearColor {
    fn from(v: [f32; 4]) -> Self {
        LinearColor::new(v[0], v[1], v[2], v[3])
    }
}

/// Slot padding, one inset per edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margin {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

impl From<[f32; 4]> for Margin {
    fn from(v: [f32; 4]) -> Self {
        Margin::new(v[0], v[1], v[2], v[3])
    }
}

/// 2D render transform applied on top of layout.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetTransform {
    pub translation: Vec2,
    pub scale: Vec2,
    pub shear: Vec2,
    /// Degrees.
    pub angle: f32,
}

impl Default for WidgetTransform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: Vec2::ONE,
            shear: Vec2::ZERO,
            angle: 0.0,
        }
    }
}

/// Discrete visibility; tweens switch it only at the end of the curve.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Visible,
    Collapsed,
    Hidden,
    HitTestInvisible,
    SelfHitTestInvisible,
}

/// Return `(first, second)` when playing forward and `(second, first)` when
/// playing in reverse, so one set of from/to values drives both directions.
#[inline]
pub fn select_conditional<T>(first: T, second: T, forward: bool) -> (T, T) {
    if forward {
        (first, second)
    } else {
        (second, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_conditional_swaps_in_reverse() {
        assert_eq!(select_conditional(1, 2, true), (1, 2));
        assert_eq!(select_conditional(1, 2, false), (2, 1));
        let (a, b) = select_conditional(Visibility::Visible, Visibility::Hidden, false);
        assert_eq!((a, b), (Visibility::Hidden, Visibility::Visible));
    }

    #[test]
    fn transform_default_is_identity() {
        let t = WidgetTransform::default();
        assert_eq!(t.scale, Vec2::ONE);
        assert_eq!(t.translation, Vec2::ZERO);
        assert_eq!(t.angle, 0.0);
    }

    #[test]
    fn values_serialize_as_plain_structs() {
        let json = serde_json::to_value(Margin::new(1.0, 2.0, 3.0, 4.0)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"left": 1.0, "top": 2.0, "right": 3.0, "bottom": 4.0})
        );
        let vis: Visibility = serde_json::from_str("\"Collapsed\"").expect("deserialize");
        assert_eq!(vis, Visibility::Collapsed);
    }
}
