//! Randomized non-overlapping placement for filler shapes.
//!
//! Rejection sampling over discs: draw a radius and a centre, keep the
//! candidate only if it clears every shape already placed, give up on a
//! candidate after a bounded number of draws, and stop generating entirely
//! once a streak of consecutive candidates has failed.  The result is
//! "uniform among accepted samples", an approximate saturation policy rather
//! than exact packing, and running out of room degrades softly to fewer
//! fillers instead of failing setup.
//!
//! Everything here is pure: the RNG is passed in, so tests drive the sampler
//! with a seeded [`rand::rngs::StdRng`].

use bevy::prelude::*;
use rand::Rng;

use crate::config::DropConfig;

/// A shape already occupying container space, reduced to the disc used by the
/// overlap test.  Non-circular shapes enter as their circumscribed disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedDisc {
    /// Centre in container space (px, origin top-left, y down).
    pub center: Vec2,
    /// Collision radius used only by the sampler's overlap test (px).
    pub radius: f32,
}

/// Bounds and tuning for one sampling run, resolved from the container size.
#[derive(Debug, Clone, Copy)]
pub struct SamplerParams {
    /// Container width (px).
    pub width: f32,
    /// Container height (px).
    pub height: f32,
    /// Smallest radius a candidate may draw (px).
    pub base_radius: f32,
    /// Random extent added to the base radius (px).
    pub radius_extent: f32,
    /// Minimum clearance between any two placed shapes (px).
    pub padding: f32,
    /// Position draws per candidate before it counts as a failure.
    pub draw_cap: u32,
    /// Consecutive failures after which the container is saturated.
    pub streak_cap: u32,
}

impl SamplerParams {
    /// Resolve the narrow/wide placement profile for a container.
    ///
    /// Containers narrower than `config.wide_breakpoint` use the tighter
    /// padding and the smaller base radius so fillers still fit.
    pub fn for_container(width: f32, height: f32, config: &DropConfig) -> Self {
        let narrow = width < config.wide_breakpoint;
        Self {
            width,
            height,
            base_radius: if narrow {
                config.filler_base_radius_narrow
            } else {
                config.filler_base_radius_wide
            },
            radius_extent: config.filler_radius_extent,
            padding: if narrow {
                config.padding_narrow
            } else {
                config.padding_wide
            },
            draw_cap: config.candidate_draw_cap,
            streak_cap: config.failure_streak_cap,
        }
    }
}

/// True if a disc at `center` with `radius` clears every placed shape:
/// centre distance must exceed the sum of both radii plus `padding`.
pub fn clearance_ok(center: Vec2, radius: f32, placed: &[PlacedDisc], padding: f32) -> bool {
    placed
        .iter()
        .all(|p| center.distance(p.center) > radius + p.radius + padding)
}

/// Draw one centre for a disc of `radius` that lies fully inside the bounds
/// and clears `occupied`.  Returns `None` once `draw_cap` draws are spent or
/// the disc cannot fit in the bounds at all.
fn try_place<R: Rng>(
    rng: &mut R,
    radius: f32,
    params: &SamplerParams,
    occupied: &[PlacedDisc],
) -> Option<Vec2> {
    // The full disc must stay inside the container, so centres live in the
    // inset rectangle [radius, W − radius] × [radius, H − radius].
    if params.width <= 2.0 * radius || params.height <= 2.0 * radius {
        return None;
    }
    for _ in 0..params.draw_cap {
        let center = Vec2::new(
            rng.gen_range(radius..params.width - radius),
            rng.gen_range(radius..params.height - radius),
        );
        if clearance_ok(center, radius, occupied, params.padding) {
            return Some(center);
        }
    }
    None
}

/// One candidate: up to `draw_cap` draws of a fresh (radius, centre) pair.
fn try_candidate<R: Rng>(
    rng: &mut R,
    params: &SamplerParams,
    occupied: &[PlacedDisc],
) -> Option<PlacedDisc> {
    for _ in 0..params.draw_cap {
        let radius = params.base_radius + rng.gen_range(0.0..=params.radius_extent);
        if params.width <= 2.0 * radius || params.height <= 2.0 * radius {
            continue;
        }
        let center = Vec2::new(
            rng.gen_range(radius..params.width - radius),
            rng.gen_range(radius..params.height - radius),
        );
        if clearance_ok(center, radius, occupied, params.padding) {
            return Some(PlacedDisc { center, radius });
        }
    }
    None
}

/// Generate filler discs until the container saturates.
///
/// Each candidate spends up to `draw_cap` (radius, centre) draws; an
/// exhausted candidate counts as one failure, a success resets the failure
/// streak, and `streak_cap` consecutive failures end generation.  Accepted
/// discs are appended to `occupied` (so later candidates clear them) and
/// returned in acceptance order.
pub fn scatter_fillers<R: Rng>(
    rng: &mut R,
    params: &SamplerParams,
    occupied: &mut Vec<PlacedDisc>,
) -> Vec<PlacedDisc> {
    let mut accepted = Vec::new();
    let mut streak = 0;
    while streak < params.streak_cap {
        match try_candidate(rng, params, occupied) {
            Some(disc) => {
                occupied.push(disc);
                accepted.push(disc);
                streak = 0;
            }
            None => streak += 1,
        }
    }
    accepted
}

/// Place a single fixed shape (by its collision disc) with the same clearance
/// rule the filler sampler uses.
///
/// Used for the second button so it never stacks on the first.  Spends up to
/// `draw_cap` draws; if none clears, falls back to `fallback` so setup always
/// completes.
pub fn place_disc_with_clearance<R: Rng>(
    rng: &mut R,
    radius: f32,
    params: &SamplerParams,
    occupied: &[PlacedDisc],
    fallback: Vec2,
    draw_cap: u32,
) -> Vec2 {
    let widened = SamplerParams {
        draw_cap,
        ..*params
    };
    try_place(rng, radius, &widened, occupied).unwrap_or(fallback)
}
