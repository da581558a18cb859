//! Data-driven tween descriptions.
//!
//! A [`TweenParams`] is the serializable form of a builder chain: timing,
//! easing, and optional `from`/`to` endpoints per property. Hosts load them
//! from JSON and [`TweenParams::run`] them against a widget.

use serde::{Deserialize, Serialize};

use crate::builder::TweenBuilder;
use crate::components::{
    AnimatedProperty, CanvasPosition, ColorAndOpacity, MaxDesiredHeight, Opacity, Padding,
    Rotation, Scale, Translation, VisibilityProp, WidthOverride,
};
use crate::easing::EasingType;
use crate::error::ParamsError;
use crate::ids::EntityHandle;
use crate::target::WidgetHandle;
use crate::tweener::Tweener;
use crate::value::{select_conditional, LinearColor, Margin, Vec2, Visibility};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoints<T> {
    #[serde(default)]
    pub from: Option<T>,
    #[serde(default)]
    pub to: Option<T>,
}

impl<T> Endpoints<T> {
    pub fn to(value: T) -> Self {
        Self {
            from: None,
            to: Some(value),
        }
    }

    pub fn between(from: T, to: T) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TweenParams {
    pub duration: f32,
    pub delay: f32,
    pub additive: bool,
    pub easing: EasingType,
    pub easing_param: Option<f32>,
    /// Play from `to` back to `from`.
    pub reverse: bool,
    /// Start from [`TweenBuilder::to_reset`]; explicit endpoints override it.
    pub reset: bool,

    pub translation: Option<Endpoints<Vec2>>,
    pub scale: Option<Endpoints<Vec2>>,
    pub rotation: Option<Endpoints<f32>>,
    pub opacity: Option<Endpoints<f32>>,
    pub color: Option<Endpoints<LinearColor>>,
    pub visibility: Option<Endpoints<Visibility>>,
    pub canvas_position: Option<Endpoints<Vec2>>,
    pub padding: Option<Endpoints<Margin>>,
    pub width_override: Option<Endpoints<f32>>,
    pub max_desired_height: Option<Endpoints<f32>>,
}

impl Default for TweenParams {
    fn default() -> Self {
        Self {
            duration: 1.0,
            delay: 0.0,
            additive: false,
            easing: EasingType::default(),
            easing_param: None,
            reverse: false,
            reset: false,
            translation: None,
            scale: None,
            rotation: None,
            opacity: None,
            color: None,
            visibility: None,
            canvas_position: None,
            padding: None,
            width_override: None,
            max_desired_height: None,
        }
    }
}

fn check<T>(
    property: &'static str,
    ends: &Option<Endpoints<T>>,
    reverse: bool,
) -> Result<(), ParamsError> {
    let Some(ends) = ends else {
        return Ok(());
    };
    if ends.to.is_none() {
        return Err(ParamsError::MissingTarget { property });
    }
    if reverse && ends.from.is_none() {
        return Err(ParamsError::MissingStart { property });
    }
    Ok(())
}

fn configure<P: AnimatedProperty>(
    builder: &mut TweenBuilder<'_>,
    ends: Option<Endpoints<P::Value>>,
    forward: bool,
) {
    let Some(Endpoints { from, to }) = ends else {
        return;
    };
    let (from, to) = select_conditional(from, to, forward);
    let tween = builder.tween::<P>();
    if let Some(v) = from {
        tween.from(v);
    }
    if let Some(v) = to {
        tween.to(v);
    }
}

impl TweenParams {
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ParamsError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(ParamsError::InvalidDelay { delay: self.delay });
        }
        let r = self.reverse;
        check("translation", &self.translation, r)?;
        check("scale", &self.scale, r)?;
        check("rotation", &self.rotation, r)?;
        check("opacity", &self.opacity, r)?;
        check("color", &self.color, r)?;
        check("visibility", &self.visibility, r)?;
        check("canvas_position", &self.canvas_position, r)?;
        check("padding", &self.padding, r)?;
        check("width_override", &self.width_override, r)?;
        check("max_desired_height", &self.max_desired_height, r)?;
        Ok(())
    }

    /// Validate, create the tween on `target`, and begin it.
    pub fn run(
        &self,
        tweener: &mut Tweener,
        target: &WidgetHandle,
    ) -> Result<EntityHandle, ParamsError> {
        self.validate()?;
        let forward = !self.reverse;

        let mut builder = tweener
            .create(target, self.duration, self.delay, self.additive)
            .easing(self.easing);
        if let Some(param) = self.easing_param {
            builder = builder.easing_param(param);
        }
        if self.reset {
            builder = builder.to_reset();
        }

        configure::<Translation>(&mut builder, self.translation, forward);
        configure::<Scale>(&mut builder, self.scale, forward);
        configure::<Rotation>(&mut builder, self.rotation, forward);
        configure::<Opacity>(&mut builder, self.opacity, forward);
        configure::<ColorAndOpacity>(&mut builder, self.color, forward);
        configure::<VisibilityProp>(&mut builder, self.visibility, forward);
        configure::<CanvasPosition>(&mut builder, self.canvas_position, forward);
        configure::<Padding>(&mut builder, self.padding, forward);
        configure::<WidthOverride>(&mut builder, self.width_override, forward);
        configure::<MaxDesiredHeight>(&mut builder, self.max_desired_height, forward);

        Ok(builder.begin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let p = TweenParams::from_json("{}").expect("params");
        assert_eq!(p, TweenParams::default());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn from_without_to_is_rejected() {
        let p = TweenParams::from_json(r#"{ "opacity": { "from": 0.0 } }"#).expect("params");
        assert!(matches!(
            p.validate(),
            Err(ParamsError::MissingTarget { property: "opacity" })
        ));
    }

    #[test]
    fn reverse_requires_both_endpoints() {
        let p = TweenParams {
            reverse: true,
            scale: Some(Endpoints::to(Vec2::ONE)),
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParamsError::MissingStart { property: "scale" })
        ));
    }

    #[test]
    fn bad_timing_is_rejected() {
        let zero = TweenParams {
            duration: 0.0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ParamsError::InvalidDuration { .. })));
        let negative = TweenParams {
            delay: -1.0,
            ..Default::default()
        };
        assert!(matches!(negative.validate(), Err(ParamsError::InvalidDelay { .. })));
    }

    #[test]
    fn unknown_fields_and_bad_json_surface_as_json_errors() {
        assert!(matches!(
            TweenParams::from_json(r#"{ "durration": 1.0 }"#),
            Err(ParamsError::Json(_))
        ));
        assert!(matches!(TweenParams::from_json("{"), Err(ParamsError::Json(_))));
    }
}
