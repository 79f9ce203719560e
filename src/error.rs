//! Setup-time error types.
//!
//! The drop effect has no recoverable-error taxonomy at runtime: inputs are
//! assumed valid once setup completes, and a broken body↔card pairing is a
//! programming defect that panics rather than degrades.  What *can* go wrong
//! is setup input (a config override with nonsensical caps, a card that
//! never resolves to a usable box), and those cases are reported through
//! [`SetupError`].  Placement saturation is not an error; the sampler simply
//! generates fewer fillers.

use std::fmt;

use crate::config::DropConfig;

/// Top-level error enum for drop-effect setup.
#[derive(Debug)]
pub enum SetupError {
    /// A card's laid-out box resolved to a degenerate size.  Bodies cannot be
    /// built from a zero-area box; this is a fatal page defect.
    DegenerateBox {
        /// Which card, by its roster index.
        index: usize,
        /// Measured width (px).
        width: f32,
        /// Measured height (px).
        height: f32,
    },

    /// A configuration value is outside its usable range.
    /// Returned by the validation helpers below; a rejected override file
    /// falls back to compiled defaults.
    InvalidConfig {
        /// Name of the offending key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::DegenerateBox {
                index,
                width,
                height,
            } => write!(
                f,
                "card {} resolved to a degenerate box {}×{} (both sides must be > 0)",
                index, width, height
            ),
            SetupError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config key '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for SetupError {}

/// Convenience alias: a `Result` using `SetupError` as the error type.
pub type SetupResult<T> = Result<T, SetupError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Rejects sampler caps that would make generation degenerate: zero draws per
/// candidate means no candidate can ever be accepted, and a zero failure
/// streak stops generation before the first attempt.
pub fn validate_sampler_caps(config: &DropConfig) -> SetupResult<()> {
    if config.candidate_draw_cap == 0 {
        return Err(SetupError::InvalidConfig {
            name: "candidate_draw_cap",
            value: 0.0,
            expected: "≥ 1",
        });
    }
    if config.failure_streak_cap == 0 {
        return Err(SetupError::InvalidConfig {
            name: "failure_streak_cap",
            value: 0.0,
            expected: "≥ 1",
        });
    }
    if config.filler_radius_extent < 0.0 {
        return Err(SetupError::InvalidConfig {
            name: "filler_radius_extent",
            value: config.filler_radius_extent,
            expected: "≥ 0",
        });
    }
    Ok(())
}

/// Rejects non-positive countdown durations: a zero or negative re-freeze
/// delay would freeze bodies on the very frame they are released.
pub fn validate_timing(config: &DropConfig) -> SetupResult<()> {
    if config.refreeze_delay_secs <= 0.0 {
        return Err(SetupError::InvalidConfig {
            name: "refreeze_delay_secs",
            value: config.refreeze_delay_secs,
            expected: "> 0",
        });
    }
    if config.replay_drop_delay_secs <= 0.0 {
        return Err(SetupError::InvalidConfig {
            name: "replay_drop_delay_secs",
            value: config.replay_drop_delay_secs,
            expected: "> 0",
        });
    }
    Ok(())
}

/// Returns an error if a measured card box is unusable for body construction.
pub fn validate_card_box(index: usize, width: f32, height: f32) -> SetupResult<()> {
    if width <= 0.0 || height <= 0.0 {
        Err(SetupError::DegenerateBox {
            index,
            width,
            height,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let cfg = DropConfig::default();
        assert!(validate_sampler_caps(&cfg).is_ok());
        assert!(validate_timing(&cfg).is_ok());
    }

    #[test]
    fn zero_draw_cap_is_rejected() {
        let cfg = DropConfig {
            candidate_draw_cap: 0,
            ..Default::default()
        };
        let err = validate_sampler_caps(&cfg).unwrap_err();
        assert!(err.to_string().contains("candidate_draw_cap"));
    }

    #[test]
    fn non_positive_refreeze_delay_is_rejected() {
        let cfg = DropConfig {
            refreeze_delay_secs: 0.0,
            ..Default::default()
        };
        assert!(validate_timing(&cfg).is_err());
    }

    #[test]
    fn degenerate_box_reports_index_and_size() {
        let err = validate_card_box(3, 120.0, 0.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("card 3"), "message should name the card: {msg}");
        assert!(msg.contains("120"), "message should carry the size: {msg}");
    }

    #[test]
    fn positive_box_passes() {
        assert!(validate_card_box(0, 180.0, 120.0).is_ok());
    }
}
