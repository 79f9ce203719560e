//! Per-step pose mirroring: rigid body → card transform.
//!
//! Runs in `PostUpdate` strictly after Rapier's writeback, i.e. as a
//! step-completion hook.  For every roster pair the card's `UiTransform`
//! becomes translate(centre − half box) then rotate(angle), the conversion
//! from centre-of-mass physics coordinates to the card's top-left-anchored
//! placement.  It runs every frame in both phases: a held body still needs
//! its transform written after assembly and after a reset.
//!
//! There is no error path here.  A roster entry that fails to resolve means
//! the index-aligned pairing was broken by a code change, and that panics.

use bevy::math::Rot2;
use bevy::prelude::*;
use bevy::ui::{UiTransform, Val2};

use crate::body::DropBody;
use crate::card::{CardBox, FallingCard};
use crate::scene::DropRoster;

/// Top-left offset for a card: body centre minus half its bounding box.
pub fn top_left_offset(center: Vec2, size: Vec2) -> Vec2 {
    center - size * 0.5
}

/// Rotation of a body about z, extracted from its transform quaternion.
pub fn body_angle(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::ZYX).0
}

/// Copy each body's pose onto its linked card.
pub fn sync_cards_system(
    roster: Res<DropRoster>,
    bodies: Query<&Transform, With<DropBody>>,
    mut cards: Query<(&CardBox, &mut UiTransform), With<FallingCard>>,
) {
    for (slot, entry) in roster.pairs.iter().enumerate() {
        let Ok(transform) = bodies.get(entry.body) else {
            panic!("roster slot {slot} lost its body; bodies and cards must stay index-aligned");
        };
        let Ok((card_box, mut ui)) = cards.get_mut(entry.card) else {
            panic!("roster slot {slot} lost its card; bodies and cards must stay index-aligned");
        };
        let top_left = top_left_offset(transform.translation.truncate(), card_box.0);
        *ui = UiTransform {
            translation: Val2::px(top_left.x, top_left.y),
            rotation: Rot2::radians(body_angle(transform.rotation)),
            scale: Vec2::ONE,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_is_center_minus_half_box() {
        // Exact in f32: all values are dyadic rationals.
        let offset = top_left_offset(Vec2::new(100.0, 50.0), Vec2::new(30.0, 20.0));
        assert_eq!(offset, Vec2::new(85.0, 40.0));
    }

    #[test]
    fn top_left_of_a_disc_uses_its_bounding_square() {
        let offset = top_left_offset(Vec2::new(250.0, 100.0), Vec2::splat(120.0));
        assert_eq!(offset, Vec2::new(190.0, 40.0));
    }

    #[test]
    fn body_angle_round_trips_z_rotations() {
        for angle in [0.0_f32, 0.7, -1.2, std::f32::consts::FRAC_PI_2] {
            let extracted = body_angle(Quat::from_rotation_z(angle));
            assert!(
                (extracted - angle).abs() < 1e-5,
                "angle {angle} extracted as {extracted}"
            );
        }
    }

    #[test]
    fn identity_rotation_yields_zero_angle() {
        assert_eq!(body_angle(Quat::IDENTITY), 0.0);
    }
}
