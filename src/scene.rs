//! Geometry measurement and world assembly.
//!
//! Startup is two-phase, driven by the [`SetupStage`] state:
//!
//! | Stage       | What happens                                               |
//! |-------------|------------------------------------------------------------|
//! | `Measuring` | Page UI exists; wait for layout, read every card's box     |
//! | `Ready`     | Bodies, walls, and the body↔card roster exist; systems run |
//!
//! The measuring pass is the Rust analogue of reading `offsetWidth` /
//! `offsetHeight` once at setup: boxes come from the *laid-out* nodes, not
//! from configuration, and are captured exactly once.  World assembly then
//! seeds the occupancy list with the fixed cards, clearance-places the
//! second button, scatters fillers (reveal page only), spawns walls, and
//! records the index-aligned roster every later system trusts.

use bevy::prelude::*;

use crate::body::{self, BodyParams, ShapeKind};
use crate::card::{
    self, CardAnchor, CardBox, CardIndex, CardShape, ClearancePlaced, DropContainer, FallingCard,
};
use crate::config::{DropConfig, DropMode};
use crate::error::validate_card_box;
use crate::placement::{self, PlacedDisc, SamplerParams};

// ── State / resources ────────────────────────────────────────────────────────

/// Setup state machine: cards must be measured before bodies can exist.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SetupStage {
    /// Page UI spawned; waiting for the first layout pass to yield boxes.
    #[default]
    Measuring,
    /// World assembled; activation, reset, and sync systems are live.
    Ready,
}

/// The drop region's box, fixed at setup for the page lifetime.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ContainerGeometry {
    pub width: f32,
    pub height: f32,
}

impl ContainerGeometry {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// One body↔card pair.  The lists stay index-aligned for the page lifetime;
/// every per-frame pose copy assumes `bodies[i]` mirrors `cards[i]`.
#[derive(Debug, Clone, Copy)]
pub struct RosterEntry {
    pub body: Entity,
    pub card: Entity,
}

/// The assembled pairs, in roster-index order.
#[derive(Resource, Debug, Default)]
pub struct DropRoster {
    pub pairs: Vec<RosterEntry>,
}

/// A laid-out node's box in logical pixels.
fn logical_size(node: &ComputedNode) -> Vec2 {
    node.size() * node.inverse_scale_factor()
}

// ── Measuring ────────────────────────────────────────────────────────────────

/// Waits for UI layout, then captures every card's box and the container
/// geometry and advances to [`SetupStage::Ready`].
///
/// Runs every frame while measuring; bails until *all* boxes are nonzero so
/// a half-laid-out frame never produces a torn snapshot.
pub fn measure_cards_system(
    mut commands: Commands,
    container: Query<&ComputedNode, With<DropContainer>>,
    cards: Query<(Entity, &ComputedNode), With<FallingCard>>,
    mut next_state: ResMut<NextState<SetupStage>>,
) {
    let Ok(container_node) = container.single() else {
        return;
    };
    let container_size = logical_size(container_node);
    if container_size.x <= 0.0 || container_size.y <= 0.0 || cards.is_empty() {
        return;
    }
    let mut measured = Vec::new();
    for (entity, node) in cards.iter() {
        let size = logical_size(node);
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        measured.push((entity, size));
    }
    for (entity, size) in measured {
        commands.entity(entity).insert(CardBox(size));
    }
    commands.insert_resource(ContainerGeometry {
        width: container_size.x,
        height: container_size.y,
    });
    next_state.set(SetupStage::Ready);
    println!(
        "✓ Measured {} cards in a {:.0}×{:.0} px container",
        cards.iter().count(),
        container_size.x,
        container_size.y
    );
}

// ── World assembly ───────────────────────────────────────────────────────────

/// `OnEnter(Ready)`: build every rigid body, the walls, and the roster.
///
/// Fixed cards are processed in index order so the occupancy list the
/// clearance rule tests is deterministic: the first pill is already placed
/// when the second pill draws its anchor.
#[allow(clippy::type_complexity)]
pub fn build_world_system(
    mut commands: Commands,
    config: Res<DropConfig>,
    geometry: Res<ContainerGeometry>,
    container: Query<Entity, With<DropContainer>>,
    cards: Query<
        (
            Entity,
            &CardIndex,
            &CardShape,
            &CardBox,
            &CardAnchor,
            Option<&ClearancePlaced>,
        ),
        With<FallingCard>,
    >,
) {
    let container_entity = container
        .single()
        .expect("exactly one drop container must exist");
    let mut rng = rand::thread_rng();
    let sampler = SamplerParams::for_container(geometry.width, geometry.height, &config);

    let mut fixed: Vec<_> = cards.iter().collect();
    fixed.sort_by_key(|(_, index, ..)| index.0);

    let mut occupied: Vec<PlacedDisc> = Vec::new();
    let mut pairs = Vec::new();

    for (entity, index, shape, card_box, anchor, clearance) in fixed {
        if let Err(e) = validate_card_box(index.0, card_box.0.x, card_box.0.y) {
            panic!("fatal setup defect: {e}");
        }
        let radius = body::collision_radius(shape.0, card_box.0);
        let center = if clearance.is_some() {
            placement::place_disc_with_clearance(
                &mut rng,
                radius,
                &sampler,
                &occupied,
                anchor.0,
                config.button_clearance_draw_cap,
            )
        } else {
            anchor.0
        };
        let params = params_for(&config, shape.0);
        let body = body::spawn_drop_body(
            &mut commands,
            index.0,
            center,
            shape.0,
            card_box.0,
            &params,
        );
        occupied.push(PlacedDisc { center, radius });
        pairs.push(RosterEntry { body, card: entity });
        commands
            .entity(entity)
            .insert((CardAnchor(center), Visibility::Visible));
    }

    if config.mode == DropMode::RevealAuto {
        let fillers = placement::scatter_fillers(&mut rng, &sampler, &mut occupied);
        let filler_params = BodyParams::filler(&config);
        for disc in &fillers {
            let index = pairs.len();
            let card = card::spawn_filler_card(&mut commands, container_entity, index, disc);
            let body = body::spawn_drop_body(
                &mut commands,
                index,
                disc.center,
                ShapeKind::Circle,
                Vec2::splat(disc.radius * 2.0),
                &filler_params,
            );
            pairs.push(RosterEntry { body, card });
        }
        println!("✓ Scattered {} filler discs", fillers.len());
    }

    body::spawn_boundaries(&mut commands, geometry.size(), config.wall_thickness);
    println!("✓ World assembled: {} bodies + 3 walls", pairs.len());
    commands.insert_resource(DropRoster { pairs });
}

/// Pick the physical parameter set for a card: the reveal page shares one
/// tuning across all bodies, the click-toggle page distinguishes pills from
/// plain shapes.
fn params_for(config: &DropConfig, kind: ShapeKind) -> BodyParams {
    match (config.mode, kind) {
        (DropMode::RevealAuto, _) => BodyParams::filler(config),
        (DropMode::ClickToggle, ShapeKind::Pill) => BodyParams::pill(config),
        (DropMode::ClickToggle, _) => BodyParams::plain(config),
    }
}
