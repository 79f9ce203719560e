//! Headless integration tests for the held ⇄ falling drop cycle.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no Rapier
//! stepping — so they run fast and deterministically in CI.  The world is
//! assembled for real through `build_world_system` (reveal mode scatters
//! actual filler bodies), but physics never steps: what is under test is the
//! state machinery (setup staging, release/freeze/reset transitions, and
//! the countdown debounce), not collision response.
//!
//! Covered scenarios:
//! 1. Default setup stage is `Measuring`; `Ready` assembles a roster.
//! 2. The re-freeze countdown expiry freezes falling bodies in place.
//! 3. The pending-drop countdown releases held bodies and re-arms the freeze.
//! 4. Reset restores every body's initial pose bit-for-bit with zeroed
//!    velocity and the held flag forced.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier2d::prelude::{RigidBody, Velocity};

use freefall::activation::{DropPhase, PendingFreeze};
use freefall::body::{DropBody, InitialPose};
use freefall::card::DropContainer;
use freefall::config::{DropConfig, DropMode};
use freefall::reset::{self, PendingDrop};
use freefall::scene::{ContainerGeometry, DropRoster, SetupStage};
use freefall::simulation::DropPlugin;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app on the reveal page with geometry already "measured",
/// forced straight into `Ready` (mirrors the post-measurement state).  The
/// first `update()` runs world assembly, so the roster holds real filler
/// bodies.
fn app_in_ready_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(DropConfig {
        mode: DropMode::RevealAuto,
        ..Default::default()
    });
    app.add_plugins(DropPlugin);
    app.insert_resource(ContainerGeometry {
        width: 500.0,
        height: 400.0,
    });
    app.world_mut().spawn(DropContainer);
    app.insert_state(SetupStage::Ready);
    app.update(); // OnEnter(Ready) assembles bodies, walls, and the roster
    app
}

/// Collect the roster's body entities.
fn roster_bodies(app: &App) -> Vec<Entity> {
    app.world()
        .resource::<DropRoster>()
        .pairs
        .iter()
        .map(|p| p.body)
        .collect()
}

fn run_restore(
    mut commands: Commands,
    roster: Res<DropRoster>,
    mut bodies: Query<(&mut Transform, &mut Velocity, &InitialPose), With<DropBody>>,
) {
    reset::restore_all(&mut commands, &roster, &mut bodies);
}

// ── Setup staging ─────────────────────────────────────────────────────────────

/// The default variant of `SetupStage` is `Measuring`: nothing is assembled
/// until the geometry pass has run.
#[test]
fn default_stage_is_measuring() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(DropConfig::default());
    app.add_plugins(DropPlugin);
    app.update();
    let stage = app.world().resource::<State<SetupStage>>();
    assert_eq!(*stage.get(), SetupStage::Measuring);
    assert!(
        app.world().get_resource::<DropRoster>().is_none(),
        "no roster may exist before assembly"
    );
}

/// Entering `Ready` assembles the world: on the reveal page a 500×400
/// container yields a non-empty roster of held filler bodies.
#[test]
fn ready_state_assembles_a_held_roster() {
    let app = app_in_ready_state();
    let bodies = roster_bodies(&app);
    assert!(!bodies.is_empty(), "reveal page should scatter fillers");
    for body in bodies {
        assert_eq!(
            *app.world().get::<RigidBody>(body).expect("body exists"),
            RigidBody::Fixed,
            "bodies must be born held"
        );
    }
    assert_eq!(*app.world().resource::<DropPhase>(), DropPhase::Held);
}

// ── Re-freeze countdown ───────────────────────────────────────────────────────

/// An expired re-freeze countdown flips falling bodies back to static where
/// they are and returns the phase to `Held`.
#[test]
fn refreeze_expiry_freezes_falling_bodies() {
    let mut app = app_in_ready_state();
    let bodies = roster_bodies(&app);
    for &body in &bodies {
        app.world_mut().entity_mut(body).insert(RigidBody::Dynamic);
    }
    *app.world_mut().resource_mut::<DropPhase>() = DropPhase::Falling;
    app.world_mut()
        .resource_mut::<PendingFreeze>()
        .0
        .arm(0.0);

    app.update(); // countdown expires on this frame's tick

    assert_eq!(*app.world().resource::<DropPhase>(), DropPhase::Held);
    assert!(!app.world().resource::<PendingFreeze>().0.is_pending());
    for body in bodies {
        assert_eq!(
            *app.world().get::<RigidBody>(body).unwrap(),
            RigidBody::Fixed
        );
    }
}

/// A cancelled countdown must never fire: this is the stale-freeze guard the
/// replay path relies on.
#[test]
fn cancelled_refreeze_does_not_fire() {
    let mut app = app_in_ready_state();
    *app.world_mut().resource_mut::<DropPhase>() = DropPhase::Falling;
    {
        let mut pending = app.world_mut().resource_mut::<PendingFreeze>();
        pending.0.arm(0.0);
        pending.0.cancel();
    }
    app.update();
    assert_eq!(
        *app.world().resource::<DropPhase>(),
        DropPhase::Falling,
        "cancelled countdown must leave the phase alone"
    );
}

// ── Pending drop (replay restart) ─────────────────────────────────────────────

/// An expired pending-drop releases the bodies and arms the next re-freeze:
/// the restart half of the REPLAY path.
#[test]
fn pending_drop_expiry_releases_and_rearms_the_freeze() {
    let mut app = app_in_ready_state();
    app.world_mut().resource_mut::<PendingDrop>().0.arm(0.0);

    app.update();

    assert_eq!(*app.world().resource::<DropPhase>(), DropPhase::Falling);
    assert!(
        app.world().resource::<PendingFreeze>().0.is_pending(),
        "a fresh drop must arm the auto re-freeze"
    );
    for body in roster_bodies(&app) {
        assert_eq!(
            *app.world().get::<RigidBody>(body).unwrap(),
            RigidBody::Dynamic
        );
    }
}

// ── Reset ─────────────────────────────────────────────────────────────────────

/// Reset restores every body's recorded initial pose exactly, zeroes its
/// velocity, and forces the held flag, regardless of how far the body
/// drifted.
#[test]
fn reset_restores_initial_poses_bit_for_bit() {
    let mut app = app_in_ready_state();
    let bodies = roster_bodies(&app);

    // Capture the recorded poses, then disturb everything.
    let initial: Vec<(Entity, InitialPose)> = bodies
        .iter()
        .map(|&b| (b, *app.world().get::<InitialPose>(b).unwrap()))
        .collect();
    for &body in &bodies {
        let mut e = app.world_mut().entity_mut(body);
        let mut transform = e.get_mut::<Transform>().unwrap();
        transform.translation += Vec3::new(13.0, 250.5, 0.0);
        transform.rotation = Quat::from_rotation_z(0.9);
        let mut velocity = e.get_mut::<Velocity>().unwrap();
        velocity.linvel = Vec2::new(5.0, 300.0);
        velocity.angvel = 2.0;
        e.insert(RigidBody::Dynamic);
    }

    app.world_mut()
        .run_system_once(run_restore)
        .expect("restore system runs");
    app.update(); // flush commands (RigidBody::Fixed inserts)

    for (body, pose) in initial {
        let transform = app.world().get::<Transform>(body).unwrap();
        assert_eq!(transform.translation.x, pose.translation.x);
        assert_eq!(transform.translation.y, pose.translation.y);
        assert_eq!(transform.rotation, Quat::from_rotation_z(pose.angle));
        let velocity = app.world().get::<Velocity>(body).unwrap();
        assert_eq!(velocity.linvel, Vec2::ZERO);
        assert_eq!(velocity.angvel, 0.0);
        assert_eq!(
            *app.world().get::<RigidBody>(body).unwrap(),
            RigidBody::Fixed
        );
    }
}

/// Two full disturb → reset cycles land on identical poses: repeated cycles
/// accumulate no drift.
#[test]
fn repeated_reset_cycles_do_not_drift() {
    let mut app = app_in_ready_state();
    let bodies = roster_bodies(&app);

    let mut after_first = Vec::new();
    for round in 0..2 {
        for &body in &bodies {
            let mut e = app.world_mut().entity_mut(body);
            let mut transform = e.get_mut::<Transform>().unwrap();
            transform.translation += Vec3::new(7.7 * (round + 1) as f32, 91.3, 0.0);
            transform.rotation = Quat::from_rotation_z(1.1 * (round + 1) as f32);
        }
        app.world_mut()
            .run_system_once(run_restore)
            .expect("restore system runs");
        let poses: Vec<(Vec3, Quat)> = bodies
            .iter()
            .map(|&b| {
                let t = app.world().get::<Transform>(b).unwrap();
                (t.translation, t.rotation)
            })
            .collect();
        if round == 0 {
            after_first = poses;
        } else {
            assert_eq!(poses, after_first, "second reset must reproduce the first");
        }
    }
}
