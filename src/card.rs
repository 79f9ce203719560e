//! Falling-card UI nodes.
//!
//! Cards are the visual half of each body↔card pair: absolute-positioned
//! nodes parked at the container's top-left whose on-screen placement comes
//! entirely from the `UiTransform` the sync loop writes.  The page owns the
//! nodes; the simulation only ever touches that transform.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::UiTransform;

use crate::body::ShapeKind;
use crate::placement::PlacedDisc;

// ── Components ───────────────────────────────────────────────────────────────

/// The drop region: the node whose box bounds the simulation.
#[derive(Component, Debug, Clone, Copy)]
pub struct DropContainer;

/// Marker for a card mirrored from a rigid body.
#[derive(Component, Debug, Clone, Copy)]
pub struct FallingCard;

/// Position of this card in the roster; `cards[i]` mirrors `bodies[i]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardIndex(pub usize);

/// The card's measured box (logical px), written once at setup by the
/// geometry pass and read every frame by the sync loop.
#[derive(Component, Debug, Clone, Copy)]
pub struct CardBox(pub Vec2);

/// Collision silhouette the body factory should build for this card.
#[derive(Component, Debug, Clone, Copy)]
pub struct CardShape(pub ShapeKind);

/// Held anchor pose (centre-of-mass, container space).  For most cards this
/// is configuration; for a clearance-placed card it is the fallback until
/// setup draws the real anchor.
#[derive(Component, Debug, Clone, Copy)]
pub struct CardAnchor(pub Vec2);

/// This card's anchor is drawn at setup with the sampler's clearance rule
/// instead of being taken from configuration.
#[derive(Component, Debug, Clone, Copy)]
pub struct ClearancePlaced;

// ── Colours ──────────────────────────────────────────────────────────────────

pub(crate) fn portrait_bg() -> Color {
    Color::srgb(0.16, 0.17, 0.24)
}
pub(crate) fn portrait_border() -> Color {
    Color::srgb(0.34, 0.36, 0.50)
}
pub(crate) fn portrait_text() -> Color {
    Color::srgb(0.78, 0.80, 0.92)
}
pub(crate) fn blue_pill_bg() -> Color {
    Color::srgb(0.10, 0.22, 0.48)
}
pub(crate) fn blue_pill_border() -> Color {
    Color::srgb(0.24, 0.46, 0.86)
}
pub(crate) fn blue_pill_text() -> Color {
    Color::srgb(0.70, 0.84, 1.0)
}
pub(crate) fn red_pill_bg() -> Color {
    Color::srgb(0.42, 0.10, 0.12)
}
pub(crate) fn red_pill_border() -> Color {
    Color::srgb(0.80, 0.24, 0.26)
}
pub(crate) fn red_pill_text() -> Color {
    Color::srgb(1.0, 0.72, 0.72)
}
pub(crate) fn blue_disc_bg() -> Color {
    Color::srgb(0.18, 0.34, 0.66)
}
pub(crate) fn red_disc_bg() -> Color {
    Color::srgb(0.62, 0.20, 0.22)
}

/// Filler discs cycle through a small palette so the heap reads as varied
/// without introducing per-card configuration.
pub(crate) fn filler_color(index: usize) -> Color {
    const PALETTE: [(f32, f32, f32); 5] = [
        (0.24, 0.42, 0.76),
        (0.70, 0.28, 0.30),
        (0.22, 0.52, 0.40),
        (0.66, 0.50, 0.20),
        (0.46, 0.30, 0.62),
    ];
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    Color::srgb(r, g, b)
}

// ── Card spawners ────────────────────────────────────────────────────────────
// All cards spawn hidden at the container origin; the first sync pass after
// world assembly places them and flips them visible.

fn card_node(size: Vec2) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Px(size.x),
        height: Val::Px(size.y),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

/// The portrait card: a plain rectangle standing in for the page photo.
pub fn spawn_portrait_card(
    parent: &mut ChildSpawnerCommands<'_>,
    index: usize,
    anchor: Vec2,
    size: Vec2,
    initials: &str,
) {
    parent
        .spawn((
            card_node(size),
            UiTransform::default(),
            BackgroundColor(portrait_bg()),
            BorderColor::all(portrait_border()),
            BorderRadius::all(Val::Px(8.0)),
            FallingCard,
            CardIndex(index),
            CardShape(ShapeKind::Rect),
            CardAnchor(anchor),
            Visibility::Hidden,
        ))
        .with_children(|card| {
            card.spawn((
                Text::new(initials),
                TextFont {
                    font_size: 34.0,
                    ..default()
                },
                TextColor(portrait_text()),
            ));
        });
}

/// A decorative pill button card.  It is a real `Button` node so it renders
/// and hovers like the page's other buttons, but it carries no handler; its
/// job is to fall.
#[allow(clippy::too_many_arguments)]
pub fn spawn_pill_card(
    parent: &mut ChildSpawnerCommands<'_>,
    index: usize,
    anchor: Vec2,
    size: Vec2,
    label: &str,
    bg: Color,
    border: Color,
    text: Color,
    clearance_placed: bool,
) {
    let mut entity = parent.spawn((
        Button,
        card_node(size),
        UiTransform::default(),
        BackgroundColor(bg),
        BorderColor::all(border),
        BorderRadius::MAX,
        FallingCard,
        CardIndex(index),
        CardShape(ShapeKind::Pill),
        CardAnchor(anchor),
        Visibility::Hidden,
    ));
    if clearance_placed {
        entity.insert(ClearancePlaced);
    }
    entity.with_children(|card| {
        card.spawn((
            Text::new(label),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(text),
        ));
    });
}

/// A disc card: a square node rounded into a circle.
pub fn spawn_disc_card(
    parent: &mut ChildSpawnerCommands<'_>,
    index: usize,
    anchor: Vec2,
    radius: f32,
    bg: Color,
) {
    parent.spawn((
        Node {
            border: UiRect::all(Val::Px(0.0)),
            ..card_node(Vec2::splat(radius * 2.0))
        },
        UiTransform::default(),
        BackgroundColor(bg),
        BorderRadius::MAX,
        FallingCard,
        CardIndex(index),
        CardShape(ShapeKind::Circle),
        CardAnchor(anchor),
        Visibility::Hidden,
    ));
}

/// Companion card for one accepted filler disc, created at world assembly.
///
/// Fillers never pass through the measuring phase (their box *is* the
/// sampled disc), so the `CardBox` is written here directly and the card
/// spawns visible; the same frame's sync pass places it before render.
pub fn spawn_filler_card(
    commands: &mut Commands,
    container: Entity,
    index: usize,
    disc: &PlacedDisc,
) -> Entity {
    let size = Vec2::splat(disc.radius * 2.0);
    let card = commands
        .spawn((
            Node {
                border: UiRect::all(Val::Px(0.0)),
                ..card_node(size)
            },
            UiTransform::default(),
            BackgroundColor(filler_color(index)),
            BorderRadius::MAX,
            FallingCard,
            CardIndex(index),
            CardBox(size),
            CardShape(ShapeKind::Circle),
            CardAnchor(disc.center),
            Visibility::Visible,
        ))
        .id();
    commands.entity(container).add_child(card);
    card
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filler_palette_cycles() {
        assert_eq!(filler_color(0), filler_color(5));
        assert_ne!(filler_color(0), filler_color(1));
    }

    #[test]
    fn card_node_is_absolute_at_origin() {
        let node = card_node(Vec2::new(100.0, 40.0));
        assert_eq!(node.position_type, PositionType::Absolute);
        assert_eq!(node.left, Val::Px(0.0));
        assert_eq!(node.top, Val::Px(0.0));
        assert_eq!(node.width, Val::Px(100.0));
        assert_eq!(node.height, Val::Px(40.0));
    }
}
