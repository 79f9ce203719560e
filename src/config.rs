//! Runtime drop-effect configuration loaded from `assets/freefall.toml`.
//!
//! [`DropConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_drop_config`] reads
//! `assets/freefall.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<DropConfig>` to any system parameter list and read values
//! with `config.gravity_px`, `config.failure_streak_cap`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `DropConfig::default()`.

use crate::constants::*;
use crate::error::{validate_sampler_caps, validate_timing};
use bevy::prelude::*;
use serde::Deserialize;

/// Which of the two drop pages the app runs.
///
/// The two pages were tuned independently and carry separate physical
/// parameter sets; the difference is intentional, not a defect to reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DropMode {
    /// Five fixed cards; a DROP/RESET button toggles held ⇄ falling.
    #[default]
    ClickToggle,
    /// Two buttons plus randomized fillers; scrolling the section into view
    /// fires a one-shot drop with a timed re-freeze and a REPLAY button.
    RevealAuto,
}

/// Runtime-tunable drop-effect configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/freefall.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    /// Active page variant.
    pub mode: DropMode,

    // ── Physics: World ───────────────────────────────────────────────────────
    pub gravity_px: f32,
    pub wall_thickness: f32,

    // ── Physics: Held-page parameter set ─────────────────────────────────────
    pub pill_friction: f32,
    pub pill_restitution: f32,
    pub plain_friction: f32,
    pub plain_restitution: f32,
    pub plain_angular_damping: f32,
    pub body_density: f32,

    // ── Physics: Reveal-page parameter set ───────────────────────────────────
    pub filler_friction: f32,
    pub filler_restitution: f32,
    pub filler_angular_damping: f32,

    // ── Placement sampler ────────────────────────────────────────────────────
    pub wide_breakpoint: f32,
    pub padding_narrow: f32,
    pub padding_wide: f32,
    pub filler_base_radius_narrow: f32,
    pub filler_base_radius_wide: f32,
    pub filler_radius_extent: f32,
    pub candidate_draw_cap: u32,
    pub failure_streak_cap: u32,
    pub button_clearance_draw_cap: u32,

    // ── Activation timing ────────────────────────────────────────────────────
    pub refreeze_delay_secs: f32,
    pub replay_drop_delay_secs: f32,

    // ── Page layout ──────────────────────────────────────────────────────────
    pub header_height: f32,
    pub reveal_spacer_px: f32,
    pub auto_section_height: f32,
    pub scroll_line_px: f32,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            mode: DropMode::default(),
            // World
            gravity_px: GRAVITY_PX,
            wall_thickness: WALL_THICKNESS,
            // Held-page set
            pill_friction: PILL_FRICTION,
            pill_restitution: PILL_RESTITUTION,
            plain_friction: PLAIN_FRICTION,
            plain_restitution: PLAIN_RESTITUTION,
            plain_angular_damping: PLAIN_ANGULAR_DAMPING,
            body_density: BODY_DENSITY,
            // Reveal-page set
            filler_friction: FILLER_FRICTION,
            filler_restitution: FILLER_RESTITUTION,
            filler_angular_damping: FILLER_ANGULAR_DAMPING,
            // Sampler
            wide_breakpoint: WIDE_BREAKPOINT,
            padding_narrow: PADDING_NARROW,
            padding_wide: PADDING_WIDE,
            filler_base_radius_narrow: FILLER_BASE_RADIUS_NARROW,
            filler_base_radius_wide: FILLER_BASE_RADIUS_WIDE,
            filler_radius_extent: FILLER_RADIUS_EXTENT,
            candidate_draw_cap: CANDIDATE_DRAW_CAP,
            failure_streak_cap: FAILURE_STREAK_CAP,
            button_clearance_draw_cap: BUTTON_CLEARANCE_DRAW_CAP,
            // Timing
            refreeze_delay_secs: REFREEZE_DELAY_SECS,
            replay_drop_delay_secs: REPLAY_DROP_DELAY_SECS,
            // Layout
            header_height: HEADER_HEIGHT,
            reveal_spacer_px: REVEAL_SPACER_PX,
            auto_section_height: AUTO_SECTION_HEIGHT,
            scroll_line_px: SCROLL_LINE_PX,
        }
    }
}

/// Startup system: attempt to load `assets/freefall.toml` and overwrite the
/// `DropConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors and
/// validation failures are printed to stderr and the defaults kept; a bad
/// override file never aborts the page.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_drop_config(mut config: ResMut<DropConfig>) {
    let path = "assets/freefall.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<DropConfig>(&contents) {
            Ok(loaded) => {
                if let Err(e) = validate_sampler_caps(&loaded).and_then(|_| validate_timing(&loaded))
                {
                    eprintln!("⚠ Rejected {path}: {e}; using defaults");
                } else {
                    *config = loaded;
                    println!("✓ Loaded drop config from {path}");
                }
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

/// Startup system: let the `FREEFALL_MODE` environment variable override the
/// configured page variant (`click-toggle` / `reveal-auto`).  Must run after
/// [`load_drop_config`] so the file cannot clobber the override.
pub fn apply_mode_override(mut config: ResMut<DropConfig>) {
    match std::env::var("FREEFALL_MODE").ok().as_deref() {
        Some("click-toggle") => config.mode = DropMode::ClickToggle,
        Some("reveal-auto") => config.mode = DropMode::RevealAuto,
        Some(other) => {
            eprintln!("⚠ Unknown FREEFALL_MODE '{other}' (expected click-toggle | reveal-auto)");
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let cfg = DropConfig::default();
        assert_eq!(cfg.candidate_draw_cap, CANDIDATE_DRAW_CAP);
        assert_eq!(cfg.failure_streak_cap, FAILURE_STREAK_CAP);
        assert_eq!(cfg.padding_narrow, PADDING_NARROW);
        assert_eq!(cfg.padding_wide, PADDING_WIDE);
        assert_eq!(cfg.mode, DropMode::ClickToggle);
    }

    #[test]
    fn empty_toml_keeps_defaults() {
        let cfg: DropConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(cfg.gravity_px, GRAVITY_PX);
        assert_eq!(cfg.filler_radius_extent, FILLER_RADIUS_EXTENT);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let cfg: DropConfig = toml::from_str(
            "mode = \"reveal-auto\"\ngravity_px = 900.0\nfailure_streak_cap = 25\n",
        )
        .expect("partial TOML should parse");
        assert_eq!(cfg.mode, DropMode::RevealAuto);
        assert_eq!(cfg.gravity_px, 900.0);
        assert_eq!(cfg.failure_streak_cap, 25);
        // Untouched keys keep compiled defaults.
        assert_eq!(cfg.padding_wide, PADDING_WIDE);
        assert_eq!(cfg.refreeze_delay_secs, REFREEZE_DELAY_SECS);
    }

    #[test]
    fn unknown_mode_string_fails_to_parse() {
        assert!(toml::from_str::<DropConfig>("mode = \"sideways\"").is_err());
    }
}
