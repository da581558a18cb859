//! Easing curves.
//!
//! [`ease`] maps elapsed time over a duration to a fraction. It is pure; most
//! curves stay in `[0, 1]`, while elastic, back and spring overshoot by design.
//! Callers must not pass `duration <= 0`.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Default step count for [`EasingType::Stepped`].
pub const DEFAULT_STEPS: f32 = 10.0;
/// Default period for the elastic curves.
pub const DEFAULT_ELASTIC_PERIOD: f32 = 0.3;
/// Default overshoot for the back curves.
pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EasingType {
    Linear,
    Smoothstep,
    Stepped,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    #[default]
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
    InBack,
    OutBack,
    InOutBack,
    Spring,
}

impl EasingType {
    pub const ALL: [EasingType; 34] = [
        EasingType::Linear,
        EasingType::Smoothstep,
        EasingType::Stepped,
        EasingType::InSine,
        EasingType::OutSine,
        EasingType::InOutSine,
        EasingType::InQuad,
        EasingType::OutQuad,
        EasingType::InOutQuad,
        EasingType::InCubic,
        EasingType::OutCubic,
        EasingType::InOutCubic,
        EasingType::InQuart,
        EasingType::OutQuart,
        EasingType::InOutQuart,
        EasingType::InQuint,
        EasingType::OutQuint,
        EasingType::InOutQuint,
        EasingType::InExpo,
        EasingType::OutExpo,
        EasingType::InOutExpo,
        EasingType::InCirc,
        EasingType::OutCirc,
        EasingType::InOutCirc,
        EasingType::InElastic,
        EasingType::OutElastic,
        EasingType::InOutElastic,
        EasingType::InBounce,
        EasingType::OutBounce,
        EasingType::InOutBounce,
        EasingType::InBack,
        EasingType::OutBack,
        EasingType::InOutBack,
        EasingType::Spring,
    ];
}

/// Eased fraction for `elapsed` seconds into a `duration`-second tween.
pub fn ease(kind: EasingType, elapsed: f32, duration: f32, param: Option<f32>) -> f32 {
    debug_assert!(duration > 0.0, "easing over a non-positive duration");
    let t = (elapsed / duration).clamp(0.0, 1.0);
    ease_unit(kind, t, param)
}

/// Same curves over a normalized `t` in `[0, 1]`.
pub fn ease_unit(kind: EasingType, t: f32, param: Option<f32>) -> f32 {
    use EasingType::*;
    match kind {
        Linear => t,
        Smoothstep => t * t * (3.0 - 2.0 * t),
        Stepped => {
            let steps = param.unwrap_or(DEFAULT_STEPS).max(1.0);
            (t * steps).floor() / steps
        }
        InSine => 1.0 - (t * PI / 2.0).cos(),
        OutSine => (t * PI / 2.0).sin(),
        InOutSine => -((PI * t).cos() - 1.0) / 2.0,
        InQuad => t * t,
        OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        InOutQuad => in_out(t, |x| x * x),
        InCubic => t.powi(3),
        OutCubic => 1.0 - (1.0 - t).powi(3),
        InOutCubic => in_out(t, |x| x.powi(3)),
        InQuart => t.powi(4),
        OutQuart => 1.0 - (1.0 - t).powi(4),
        InOutQuart => in_out(t, |x| x.powi(4)),
        InQuint => t.powi(5),
        OutQuint => 1.0 - (1.0 - t).powi(5),
        InOutQuint => in_out(t, |x| x.powi(5)),
        InExpo => in_expo(t),
        OutExpo => 1.0 - in_expo(1.0 - t),
        InOutExpo => in_out(t, in_expo),
        InCirc => in_circ(t),
        OutCirc => 1.0 - in_circ(1.0 - t),
        InOutCirc => in_out(t, in_circ),
        InElastic => in_elastic(t, param.unwrap_or(DEFAULT_ELASTIC_PERIOD)),
        OutElastic => 1.0 - in_elastic(1.0 - t, param.unwrap_or(DEFAULT_ELASTIC_PERIOD)),
        InOutElastic => {
            let period = param.unwrap_or(DEFAULT_ELASTIC_PERIOD);
            in_out(t, |x| in_elastic(x, period))
        }
        InBounce => 1.0 - out_bounce(1.0 - t),
        OutBounce => out_bounce(t),
        InOutBounce => in_out(t, |x| 1.0 - out_bounce(1.0 - x)),
        InBack => in_back(t, param.unwrap_or(DEFAULT_BACK_OVERSHOOT)),
        OutBack => 1.0 - in_back(1.0 - t, param.unwrap_or(DEFAULT_BACK_OVERSHOOT)),
        InOutBack => {
            let s = param.unwrap_or(DEFAULT_BACK_OVERSHOOT);
            in_out(t, |x| in_back(x, s))
        }
        Spring => spring(t),
    }
}

/// Mirror an ease-in curve into an in-out curve.
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) / 2.0
    }
}

#[inline]
fn in_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * (t - 1.0))
    }
}

#[inline]
fn in_circ(t: f32) -> f32 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

fn in_elastic(t: f32, period: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t.clamp(0.0, 1.0);
    }
    let period = if period > 0.0 { period } else { DEFAULT_ELASTIC_PERIOD };
    let s = period / 4.0;
    let post = t - 1.0;
    -(2f32.powf(10.0 * post) * ((post - s) * (2.0 * PI) / period).sin())
}

fn out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[inline]
fn in_back(t: f32, overshoot: f32) -> f32 {
    t * t * ((overshoot + 1.0) * t - overshoot)
}

fn spring(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    ((t * PI * (0.2 + 2.5 * t * t * t)).sin() * (1.0 - t).powf(2.2) + t) * (1.0 + 1.2 * (1.0 - t))
}
