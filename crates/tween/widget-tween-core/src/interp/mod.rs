//! Interpolation contract and helpers.
//!
//! [`Lerp`] is what a property interpolator needs from its value type:
//! component-wise blending for numeric values, a step at the end of the curve
//! for discrete ones.

pub mod functions;

pub use functions::{lerp_f32, lerp_vec2, lerp_vec4};

use crate::value::{LinearColor, Margin, Vec2, Visibility};

pub trait Lerp: Copy + 'static {
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        lerp_f32(a, b, t)
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        let [x, y] = lerp_vec2([a.x, a.y], [b.x, b.y], t);
        Vec2::new(x, y)
    }
}

impl Lerp for LinearColor {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        lerp_vec4(a.to_array(), b.to_array(), t).into()
    }
}

impl Lerp for Margin {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        lerp_vec4(a.to_array(), b.to_array(), t).into()
    }
}

impl Lerp for Visibility {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        if t >= 1.0 {
            b
        } else {
            a
        }
    }
}
