//! Restoring bodies to their recorded initial poses.
//!
//! Reset is idempotent with respect to pose and safe in any phase: every
//! roster body is teleported to its [`InitialPose`], its velocity zeroed,
//! and its held flag forced; calling it on already-held bodies is a no-op
//! beyond rewriting identical values.  Repeated drop/reset cycles therefore
//! reproduce the initial layout bit-for-bit.
//!
//! On the reveal page, REPLAY is reset plus a restart: cancel the pending
//! re-freeze (a stale freeze must never fire after a later reset), restore
//! poses, and arm a short countdown that re-releases the bodies.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::activation::{self, Countdown, DropPhase, PendingFreeze};
use crate::body::{DropBody, InitialPose};
use crate::config::DropConfig;
use crate::page::{control_text, ReplayButton};
use crate::scene::DropRoster;

/// Pending automatic re-drop after a REPLAY press (reveal page).
#[derive(Resource, Debug, Default)]
pub struct PendingDrop(pub Countdown);

/// Write one body's initial pose back onto its components: exact stored
/// coordinates, zero rotation drift, zero velocity.
pub fn apply_reset(transform: &mut Transform, velocity: &mut Velocity, pose: &InitialPose) {
    transform.translation.x = pose.translation.x;
    transform.translation.y = pose.translation.y;
    transform.rotation = Quat::from_rotation_z(pose.angle);
    velocity.linvel = Vec2::ZERO;
    velocity.angvel = 0.0;
}

/// Restore every roster body to its initial pose and re-freeze it.
///
/// A roster entry whose body lost its pose components is a programming
/// defect, not a runtime condition: the pairing is established once at
/// assembly and never edited.
#[allow(clippy::type_complexity)]
pub fn restore_all(
    commands: &mut Commands,
    roster: &DropRoster,
    bodies: &mut Query<(&mut Transform, &mut Velocity, &InitialPose), With<DropBody>>,
) {
    for (slot, entry) in roster.pairs.iter().enumerate() {
        let Ok((mut transform, mut velocity, pose)) = bodies.get_mut(entry.body) else {
            panic!("roster slot {slot} lost its body; bodies and cards must stay index-aligned");
        };
        apply_reset(&mut transform, &mut velocity, pose);
        commands.entity(entry.body).insert(RigidBody::Fixed);
    }
}

/// REPLAY button (reveal page): cancel any pending freeze, restore initial
/// poses, and schedule a fresh fall.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn replay_button_system(
    mut commands: Commands,
    interactions: Query<(&Interaction, &Children), (Changed<Interaction>, With<ReplayButton>)>,
    mut label_colors: Query<&mut TextColor>,
    config: Res<DropConfig>,
    roster: Res<DropRoster>,
    mut phase: ResMut<DropPhase>,
    mut pending_freeze: ResMut<PendingFreeze>,
    mut pending_drop: ResMut<PendingDrop>,
    mut bodies: Query<(&mut Transform, &mut Velocity, &InitialPose), With<DropBody>>,
) {
    for (interaction, children) in interactions.iter() {
        match interaction {
            Interaction::Pressed => {
                pending_freeze.0.cancel();
                restore_all(&mut commands, &roster, &mut bodies);
                *phase = DropPhase::Held;
                pending_drop.0.cancel();
                pending_drop.0.arm(config.replay_drop_delay_secs);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = label_colors.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = label_colors.get_mut(child) {
                        *color = TextColor(control_text());
                    }
                }
            }
        }
    }
}

/// Ticks the pending re-drop; on expiry, releases the bodies and arms the
/// next auto re-freeze, restarting the held → falling cycle.
pub fn pending_drop_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<DropConfig>,
    mut pending_drop: ResMut<PendingDrop>,
    mut pending_freeze: ResMut<PendingFreeze>,
    roster: Res<DropRoster>,
    mut phase: ResMut<DropPhase>,
) {
    if pending_drop.0.tick(time.delta_secs()) {
        activation::release_all(&mut commands, &roster);
        *phase = DropPhase::Falling;
        pending_freeze.0.cancel();
        pending_freeze.0.arm(config.refreeze_delay_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disturbed_body() -> (Transform, Velocity, InitialPose) {
        let pose = InitialPose {
            translation: Vec2::new(250.0, 100.0),
            angle: 0.0,
        };
        let transform = Transform {
            translation: Vec3::new(312.5, 587.25, 0.0),
            rotation: Quat::from_rotation_z(1.37),
            ..default()
        };
        let velocity = Velocity {
            linvel: Vec2::new(14.0, -230.0),
            angvel: 3.1,
        };
        (transform, velocity, pose)
    }

    #[test]
    fn reset_restores_pose_exactly() {
        let (mut transform, mut velocity, pose) = disturbed_body();
        apply_reset(&mut transform, &mut velocity, &pose);
        assert_eq!(transform.translation.x, pose.translation.x);
        assert_eq!(transform.translation.y, pose.translation.y);
        assert_eq!(transform.rotation, Quat::from_rotation_z(0.0));
    }

    #[test]
    fn reset_zeroes_velocity() {
        let (mut transform, mut velocity, pose) = disturbed_body();
        apply_reset(&mut transform, &mut velocity, &pose);
        assert_eq!(velocity.linvel, Vec2::ZERO);
        assert_eq!(velocity.angvel, 0.0);
    }

    #[test]
    fn reset_is_idempotent() {
        // Drop → reset → drop again must see bit-identical starting state:
        // applying reset twice (with arbitrary disturbance in between) lands
        // on exactly the same words.
        let (mut transform, mut velocity, pose) = disturbed_body();
        apply_reset(&mut transform, &mut velocity, &pose);
        let first = (transform.translation, transform.rotation);
        transform.translation = Vec3::new(999.0, -3.0, 0.0);
        transform.rotation = Quat::from_rotation_z(-2.2);
        velocity.linvel = Vec2::splat(50.0);
        apply_reset(&mut transform, &mut velocity, &pose);
        assert_eq!((transform.translation, transform.rotation), first);
    }
}
