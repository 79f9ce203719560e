//! Held ⇄ falling state machine.
//!
//! Bodies are born held (`RigidBody::Fixed`).  Releasing flips every roster
//! body dynamic so gravity takes over; freezing flips them back fixed where
//! they are, poses kept.  Three things can move the machine:
//!
//! - the DROP/RESET button (click-toggle page): held → falling, then a
//!   second press restores initial poses (full reset, see [`crate::reset`]);
//! - the reveal trigger (reveal page): fires the first time the drop section
//!   scrolls into the viewport, at most once per run;
//! - the re-freeze countdown (reveal page): armed on every release, cancels
//!   any pending countdown first, freezes bodies in place on expiry.
//!
//! All of these run in `Update`, strictly before the physics step in
//! `PostUpdate`, so a tick never sees a half-mutated body list.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::body::{DropBody, InitialPose};
use crate::config::DropConfig;
use crate::page::{control_text, DropButtonLabel, DropToggleButton, PageScroll};
use crate::reset;
use crate::scene::DropRoster;

// ── State ────────────────────────────────────────────────────────────────────

/// Whether the roster bodies are currently held or falling.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPhase {
    /// Bodies are static; the sync loop still mirrors their poses.
    #[default]
    Held,
    /// Bodies are dynamic and under gravity.
    Falling,
}

/// A cancelable one-shot countdown in seconds.
///
/// The only discipline the single-threaded model needs: cancel (or
/// overwrite) the old countdown before arming a new one, so a stale expiry
/// can never fire after a later reset.
#[derive(Debug, Default, Clone, Copy)]
pub struct Countdown(Option<f32>);

impl Countdown {
    /// Arm the countdown, replacing any pending one.
    pub fn arm(&mut self, secs: f32) {
        self.0 = Some(secs);
    }

    /// Drop any pending countdown without firing it.
    pub fn cancel(&mut self) {
        self.0 = None;
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    /// Advance by `dt` seconds.  Returns true exactly once, on the tick the
    /// countdown expires; an idle countdown ticks to false forever.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.0 {
            Some(remaining) if remaining - dt <= 0.0 => {
                self.0 = None;
                true
            }
            Some(remaining) => {
                self.0 = Some(remaining - dt);
                false
            }
            None => false,
        }
    }
}

/// Pending auto re-freeze (reveal page).
#[derive(Resource, Debug, Default)]
pub struct PendingFreeze(pub Countdown);

/// One-shot latch for the scroll-into-view trigger: fires at most once per
/// page lifetime regardless of further scrolling.
#[derive(Resource, Debug, Default)]
pub struct RevealFired(pub bool);

// ── Body toggles ─────────────────────────────────────────────────────────────

/// Flip every roster body dynamic: gravity takes over next step.
pub fn release_all(commands: &mut Commands, roster: &DropRoster) {
    for entry in &roster.pairs {
        commands.entity(entry.body).insert(RigidBody::Dynamic);
    }
}

/// Flip every roster body static *where it is*; poses are kept, not
/// restored.  Used by the auto re-freeze; the reset path lives in
/// [`crate::reset`].
pub fn freeze_all(commands: &mut Commands, roster: &DropRoster) {
    for entry in &roster.pairs {
        commands.entity(entry.body).insert(RigidBody::Fixed);
    }
}

// ── Click-toggle page ────────────────────────────────────────────────────────

/// DROP/RESET button: first press releases, second press restores initial
/// poses, relabeling the button each way.
#[allow(clippy::type_complexity)]
pub fn drop_toggle_button_system(
    mut commands: Commands,
    interactions: Query<&Interaction, (Changed<Interaction>, With<DropToggleButton>)>,
    mut label: Query<(&mut Text, &mut TextColor), With<DropButtonLabel>>,
    roster: Res<DropRoster>,
    mut phase: ResMut<DropPhase>,
    mut bodies: Query<(&mut Transform, &mut Velocity, &InitialPose), With<DropBody>>,
) {
    for interaction in interactions.iter() {
        match interaction {
            Interaction::Pressed => {
                let next_label = match *phase {
                    DropPhase::Held => {
                        release_all(&mut commands, &roster);
                        *phase = DropPhase::Falling;
                        "RESET"
                    }
                    DropPhase::Falling => {
                        reset::restore_all(&mut commands, &roster, &mut bodies);
                        *phase = DropPhase::Held;
                        "DROP"
                    }
                };
                for (mut text, _) in label.iter_mut() {
                    *text = Text::new(next_label);
                }
            }
            Interaction::Hovered => {
                for (_, mut color) in label.iter_mut() {
                    *color = TextColor(Color::WHITE);
                }
            }
            Interaction::None => {
                for (_, mut color) in label.iter_mut() {
                    *color = TextColor(control_text());
                }
            }
        }
    }
}

// ── Reveal page ──────────────────────────────────────────────────────────────

/// True once any pixel of the drop section (whose top edge sits at
/// `section_top` in page space) is inside the viewport at the given scroll
/// offset.
pub fn section_revealed(section_top: f32, scroll_offset: f32, viewport_height: f32) -> bool {
    section_top - scroll_offset < viewport_height
}

/// Scroll-into-view trigger: the first time the drop section becomes
/// visible, release the bodies and arm the re-freeze countdown.  The
/// [`RevealFired`] latch makes this a one-shot for the whole run.
pub fn reveal_trigger_system(
    mut commands: Commands,
    windows: Query<&Window>,
    config: Res<DropConfig>,
    scroll: Res<PageScroll>,
    mut fired: ResMut<RevealFired>,
    roster: Res<DropRoster>,
    mut phase: ResMut<DropPhase>,
    mut pending: ResMut<PendingFreeze>,
) {
    if fired.0 {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if !section_revealed(config.reveal_spacer_px, scroll.0, window.height()) {
        return;
    }
    fired.0 = true;
    release_all(&mut commands, &roster);
    *phase = DropPhase::Falling;
    pending.0.cancel();
    pending.0.arm(config.refreeze_delay_secs);
    println!("✓ Drop section revealed: bodies released");
}

/// Ticks the pending re-freeze; on expiry, freezes bodies where they lie.
pub fn refreeze_countdown_system(
    mut commands: Commands,
    time: Res<Time>,
    mut pending: ResMut<PendingFreeze>,
    roster: Res<DropRoster>,
    mut phase: ResMut<DropPhase>,
) {
    if pending.0.tick(time.delta_secs()) {
        freeze_all(&mut commands, &roster);
        *phase = DropPhase::Held;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Countdown ─────────────────────────────────────────────────────────────

    #[test]
    fn countdown_fires_exactly_once() {
        let mut c = Countdown::default();
        c.arm(0.1);
        assert!(!c.tick(0.05));
        assert!(c.tick(0.06), "second tick crosses zero");
        assert!(!c.tick(1.0), "expired countdown stays quiet");
    }

    #[test]
    fn idle_countdown_never_fires() {
        let mut c = Countdown::default();
        for _ in 0..100 {
            assert!(!c.tick(1.0));
        }
    }

    #[test]
    fn cancel_suppresses_a_pending_expiry() {
        let mut c = Countdown::default();
        c.arm(0.1);
        c.cancel();
        assert!(!c.is_pending());
        assert!(!c.tick(10.0), "cancelled countdown must not fire");
    }

    #[test]
    fn rearm_replaces_the_pending_countdown() {
        // The debounce: re-arming discards the old remaining time entirely.
        let mut c = Countdown::default();
        c.arm(0.1);
        c.tick(0.09); // 0.01 left
        c.arm(5.0);
        assert!(!c.tick(1.0), "old near-expiry must not leak through");
        assert!(c.is_pending());
    }

    // ── section_revealed ──────────────────────────────────────────────────────

    #[test]
    fn section_below_the_fold_is_not_revealed() {
        assert!(!section_revealed(760.0, 0.0, 700.0));
    }

    #[test]
    fn scrolling_down_reveals_the_section() {
        assert!(section_revealed(760.0, 100.0, 700.0));
    }

    #[test]
    fn reveal_is_edge_exclusive() {
        // Section top exactly at the viewport bottom: nothing visible yet.
        assert!(!section_revealed(700.0, 0.0, 700.0));
        assert!(section_revealed(700.0, 0.1, 700.0));
    }
}
