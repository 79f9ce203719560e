//! Rigid-body construction for cards and container walls.
//!
//! Every visual card gets an equivalent rigid body in page space (origin at
//! the container's top-left, y down, units = logical px).  Bodies are born
//! held (`RigidBody::Fixed`) and only the activation path ever flips them
//! dynamic.  Construction is split from registration: the factory functions
//! here return descriptors/bundles, and [`crate::scene`] decides what enters
//! the world.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::DropConfig;

// ── Components ───────────────────────────────────────────────────────────────

/// Marker component for a card-backing rigid body.
#[derive(Component, Debug, Clone, Copy)]
pub struct DropBody;

/// Position of this body in the roster; `bodies[i]` mirrors `cards[i]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyIndex(pub usize);

/// The pose captured immediately after creation, before any simulation step.
/// Immutable once written; the reset path restores bodies to exactly this.
#[derive(Component, Debug, Clone, Copy)]
pub struct InitialPose {
    /// Centre-of-mass position in container space (px).
    pub translation: Vec2,
    /// Rotation about z (radians).
    pub angle: f32,
}

/// Marker for the static container walls.  Walls never join the roster and
/// are never toggled dynamic.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoundaryWall;

// ── Shapes and parameters ────────────────────────────────────────────────────

/// Collision silhouette of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Plain axis-aligned rectangle (the portrait card).
    Rect,
    /// Rounded rectangle built as a compound: core rectangle plus four
    /// corner circles.  Corner radius is half the card height, which makes
    /// the buttons true pills.
    Pill,
    /// Circle; the box is its bounding square.
    Circle,
}

/// Physical parameters applied to a body.
#[derive(Debug, Clone, Copy)]
pub struct BodyParams {
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    pub angular_damping: f32,
}

impl BodyParams {
    /// Click-toggle page, pill buttons.
    pub fn pill(config: &DropConfig) -> Self {
        Self {
            friction: config.pill_friction,
            restitution: config.pill_restitution,
            density: config.body_density,
            angular_damping: 0.0,
        }
    }

    /// Click-toggle page, plain rectangle and circle cards.
    pub fn plain(config: &DropConfig) -> Self {
        Self {
            friction: config.plain_friction,
            restitution: config.plain_restitution,
            density: config.body_density,
            angular_damping: config.plain_angular_damping,
        }
    }

    /// Reveal page: every body shares the bouncier filler tuning.
    pub fn filler(config: &DropConfig) -> Self {
        Self {
            friction: config.filler_friction,
            restitution: config.filler_restitution,
            density: config.body_density,
            angular_damping: config.filler_angular_damping,
        }
    }
}

// ── Factory ──────────────────────────────────────────────────────────────────

/// Compound parts for a pill: a core cuboid of size (w − 2r) × h unioned
/// with four corner balls of radius `r` at the core's corners.
///
/// With r = h/2 the top and bottom corner circles on each side coincide at
/// mid-height, which is exactly the degenerate-but-valid pill silhouette.
/// Part positions are local offsets from the body centre.
pub fn pill_parts(width: f32, height: f32, corner_radius: f32) -> Vec<(Vect, f32, Collider)> {
    let core_half_w = ((width - 2.0 * corner_radius) / 2.0).max(0.5);
    let inset_y = height / 2.0 - corner_radius;
    vec![
        (Vect::ZERO, 0.0, Collider::cuboid(core_half_w, height / 2.0)),
        (
            Vect::new(-core_half_w, -inset_y),
            0.0,
            Collider::ball(corner_radius),
        ),
        (
            Vect::new(core_half_w, -inset_y),
            0.0,
            Collider::ball(corner_radius),
        ),
        (
            Vect::new(-core_half_w, inset_y),
            0.0,
            Collider::ball(corner_radius),
        ),
        (
            Vect::new(core_half_w, inset_y),
            0.0,
            Collider::ball(corner_radius),
        ),
    ]
}

/// Build the collider for a card box of the given silhouette.
pub fn collider_for(kind: ShapeKind, size: Vec2) -> Collider {
    match kind {
        ShapeKind::Rect => Collider::cuboid(size.x / 2.0, size.y / 2.0),
        ShapeKind::Pill => Collider::compound(pill_parts(size.x, size.y, size.y / 2.0)),
        ShapeKind::Circle => Collider::ball(size.x / 2.0),
    }
}

/// Radius of the disc used by the placement sampler's overlap test: the
/// circumscribed circle for boxy shapes, the true radius for circles.
pub fn collision_radius(kind: ShapeKind, size: Vec2) -> f32 {
    match kind {
        ShapeKind::Circle => size.x / 2.0,
        ShapeKind::Rect | ShapeKind::Pill => size.length() / 2.0,
    }
}

/// Spawn one held card body at `center` and return its entity.
///
/// The initial pose record is captured here, before the body has seen a
/// single simulation step.  Registration into the roster is the caller's job.
pub fn spawn_drop_body(
    commands: &mut Commands,
    index: usize,
    center: Vec2,
    kind: ShapeKind,
    size: Vec2,
    params: &BodyParams,
) -> Entity {
    commands
        .spawn((
            (
                Transform::from_translation(center.extend(0.0)),
                GlobalTransform::default(),
                DropBody,
                BodyIndex(index),
                InitialPose {
                    translation: center,
                    angle: 0.0,
                },
                RigidBody::Fixed,
                collider_for(kind, size),
            ),
            (
                Restitution::coefficient(params.restitution),
                Friction::coefficient(params.friction),
                ColliderMassProperties::Density(params.density),
                Damping {
                    linear_damping: 0.0,
                    angular_damping: params.angular_damping,
                },
                Velocity::zero(),
                Sleeping::disabled(),
            ),
        ))
        .id()
}

/// Spawn the three static container walls: left, right, floor.  The top is
/// intentionally open so released bodies can bounce above the fold.
///
/// Wall centres are pushed outward by half the thickness so each *inner*
/// face sits exactly on the container edge; the floor is widened by one
/// thickness per side to seal the bottom corners.
pub fn spawn_boundaries(commands: &mut Commands, container: Vec2, thickness: f32) {
    let half_t = thickness / 2.0;
    let walls = [
        // Left
        (
            Vec2::new(-half_t, container.y / 2.0),
            Vec2::new(half_t, container.y / 2.0),
        ),
        // Right
        (
            Vec2::new(container.x + half_t, container.y / 2.0),
            Vec2::new(half_t, container.y / 2.0),
        ),
        // Floor
        (
            Vec2::new(container.x / 2.0, container.y + half_t),
            Vec2::new(container.x / 2.0 + thickness, half_t),
        ),
    ];
    for (center, half_extents) in walls {
        commands.spawn((
            Transform::from_translation(center.extend(0.0)),
            GlobalTransform::default(),
            BoundaryWall,
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pill_parts ────────────────────────────────────────────────────────────

    #[test]
    fn pill_has_one_core_and_four_corners() {
        assert_eq!(pill_parts(170.0, 56.0, 28.0).len(), 5);
    }

    #[test]
    fn pill_corner_circles_sit_on_the_core_corners() {
        let (w, h, r) = (170.0, 56.0, 20.0);
        let parts = pill_parts(w, h, r);
        let core_half_w = (w - 2.0 * r) / 2.0;
        let inset_y = h / 2.0 - r;
        let expected = [
            Vect::new(-core_half_w, -inset_y),
            Vect::new(core_half_w, -inset_y),
            Vect::new(-core_half_w, inset_y),
            Vect::new(core_half_w, inset_y),
        ];
        for (offset, expected) in parts[1..].iter().map(|p| p.0).zip(expected) {
            assert_eq!(offset, expected);
        }
    }

    #[test]
    fn half_height_corner_radius_collapses_circles_to_mid_height() {
        // r = h/2 is the true pill: top and bottom circles coincide at y = 0.
        let parts = pill_parts(170.0, 56.0, 28.0);
        for (offset, _, _) in &parts[1..] {
            assert_eq!(offset.y, 0.0);
        }
    }

    #[test]
    fn degenerate_narrow_pill_keeps_a_positive_core() {
        // A card narrower than two corner radii must not produce a zero or
        // negative cuboid extent.
        let parts = pill_parts(30.0, 56.0, 28.0);
        let core_half_w = parts[1..]
            .iter()
            .map(|p| p.0.x.abs())
            .fold(0.0_f32, f32::max);
        assert!(core_half_w > 0.0);
    }

    // ── collider_for / collision_radius ───────────────────────────────────────

    #[test]
    fn collider_construction_succeeds_for_every_kind() {
        // Smoke test: Rapier accepts all three silhouettes at card scale.
        let _ = collider_for(ShapeKind::Rect, Vec2::new(180.0, 120.0));
        let _ = collider_for(ShapeKind::Pill, Vec2::new(170.0, 56.0));
        let _ = collider_for(ShapeKind::Circle, Vec2::new(120.0, 120.0));
    }

    #[test]
    fn circle_collision_radius_is_half_the_box() {
        assert_eq!(collision_radius(ShapeKind::Circle, Vec2::splat(120.0)), 60.0);
    }

    #[test]
    fn boxy_collision_radius_is_the_circumradius() {
        let r = collision_radius(ShapeKind::Rect, Vec2::new(60.0, 80.0));
        assert!((r - 50.0).abs() < 1e-5, "3-4-5 box should give 50, got {r}");
    }
}
