//! Errors for data-driven tween descriptions.

/// Why a [`crate::TweenParams`] could not be turned into a tween.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ParamsError {
    #[error("invalid tween description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duration must be positive and finite, got {duration}")]
    InvalidDuration { duration: f32 },

    #[error("delay must be finite and non-negative, got {delay}")]
    InvalidDelay { delay: f32 },

    /// A `from` with no matching `to`, or an endpoint pair with neither.
    #[error("`{property}` has no `to` value")]
    MissingTarget { property: &'static str },

    /// Reverse playback swaps the endpoints, so both are required.
    #[error("`{property}` needs a `from` value to play in reverse")]
    MissingStart { property: &'static str },
}
