//! Page chrome: headline, drop region, control buttons, and the wheel-driven
//! scroll of the reveal page.
//!
//! Two page layouts exist, selected by [`crate::config::DropMode`]:
//!
//! | Mode          | Layout                                                    |
//! |---------------|-----------------------------------------------------------|
//! | `ClickToggle` | Header band + full-width drop region + DROP/RESET button  |
//! | `RevealAuto`  | Tall scrollable column: hero above the fold, drop region  |
//! |               | below it, REPLAY button pinned to the window corner       |
//!
//! The reveal page scrolls by offsetting the column node; the scroll offset
//! lives in [`PageScroll`] so the reveal trigger can test visibility without
//! reading layout.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::card::{self, DropContainer};
use crate::config::{DropConfig, DropMode};
use crate::constants::*;

// ── Resources / markers ──────────────────────────────────────────────────────

/// How far the reveal page is scrolled (px, 0 = top of page).
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PageScroll(pub f32);

/// The reveal page's scrolled column; its `top` mirrors `-PageScroll`.
#[derive(Component)]
pub struct PageColumn;

/// The manual page's DROP/RESET toggle button.
#[derive(Component)]
pub struct DropToggleButton;

/// Label text inside the DROP/RESET button (swapped on toggle).
#[derive(Component)]
pub struct DropButtonLabel;

/// The reveal page's REPLAY button.
#[derive(Component)]
pub struct ReplayButton;

// ── Colours ──────────────────────────────────────────────────────────────────

fn page_bg() -> Color {
    Color::srgb(0.05, 0.05, 0.08)
}
fn container_bg() -> Color {
    Color::srgb(0.07, 0.07, 0.11)
}
fn headline_color() -> Color {
    Color::srgb(0.92, 0.90, 0.80)
}
fn hint_color() -> Color {
    Color::srgb(0.40, 0.40, 0.50)
}
fn control_bg() -> Color {
    Color::srgb(0.10, 0.28, 0.14)
}
fn control_border() -> Color {
    Color::srgb(0.22, 0.62, 0.30)
}
pub(crate) fn control_text() -> Color {
    Color::srgb(0.72, 1.0, 0.78)
}

// ── Page setup ───────────────────────────────────────────────────────────────

/// Startup system: spawn the page matching the configured mode.
pub fn setup_page(mut commands: Commands, config: Res<DropConfig>) {
    match config.mode {
        DropMode::ClickToggle => setup_click_toggle_page(&mut commands, &config),
        DropMode::RevealAuto => setup_reveal_page(&mut commands, &config),
    }
    println!("✓ Page spawned ({:?})", config.mode);
}

fn setup_click_toggle_page(commands: &mut Commands, config: &DropConfig) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(page_bg()),
        ))
        .with_children(|root| {
            // ── Header band ──────────────────────────────────────────────────
            root.spawn(Node {
                width: Val::Percent(100.0),
                height: Val::Px(config.header_height),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                padding: UiRect::left(Val::Px(32.0)),
                row_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|header| {
                header.spawn((
                    Text::new("JOSHUA — PORTFOLIO"),
                    TextFont {
                        font_size: 30.0,
                        ..default()
                    },
                    TextColor(headline_color()),
                ));
                header.spawn((
                    Text::new("everything on this page obeys gravity · press DROP"),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(hint_color()),
                ));
            });

            // ── Drop region with the five fixed cards ────────────────────────
            root.spawn((
                Node {
                    width: Val::Percent(100.0),
                    flex_grow: 1.0,
                    ..default()
                },
                BackgroundColor(container_bg()),
                DropContainer,
            ))
            .with_children(|container| {
                card::spawn_portrait_card(
                    container,
                    0,
                    Vec2::from(PORTRAIT_ANCHOR),
                    Vec2::from(PORTRAIT_SIZE),
                    "JM",
                );
                card::spawn_pill_card(
                    container,
                    1,
                    Vec2::from(PILL_A_ANCHOR),
                    Vec2::from(PILL_A_SIZE),
                    "VIEW WORK",
                    card::blue_pill_bg(),
                    card::blue_pill_border(),
                    card::blue_pill_text(),
                    false,
                );
                card::spawn_pill_card(
                    container,
                    2,
                    Vec2::from(PILL_B_ANCHOR),
                    Vec2::from(PILL_B_SIZE),
                    "CONTACT",
                    card::red_pill_bg(),
                    card::red_pill_border(),
                    card::red_pill_text(),
                    false,
                );
                card::spawn_disc_card(
                    container,
                    3,
                    Vec2::from(DISC_A_ANCHOR),
                    DISC_A_RADIUS,
                    card::blue_disc_bg(),
                );
                card::spawn_disc_card(
                    container,
                    4,
                    Vec2::from(DISC_B_ANCHOR),
                    DISC_B_RADIUS,
                    card::red_disc_bg(),
                );
            });

            spawn_control_button(root, "DROP", DropToggleButton, Some(DropButtonLabel));
        });
}

fn setup_reveal_page(commands: &mut Commands, config: &DropConfig) {
    let page_height = config.reveal_spacer_px + config.auto_section_height;
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(page_bg()),
        ))
        .with_children(|root| {
            // ── Scrolled column: hero above the fold, drop region below ──────
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    top: Val::Px(0.0),
                    width: Val::Percent(100.0),
                    height: Val::Px(page_height),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                PageColumn,
            ))
            .with_children(|column| {
                column
                    .spawn(Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(config.reveal_spacer_px),
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(10.0),
                        ..default()
                    })
                    .with_children(|hero| {
                        hero.spawn((
                            Text::new("JOSHUA — SELECTED WORK"),
                            TextFont {
                                font_size: 34.0,
                                ..default()
                            },
                            TextColor(headline_color()),
                        ));
                        hero.spawn((
                            Text::new("keep scrolling ↓"),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(hint_color()),
                        ));
                    });

                column
                    .spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(config.auto_section_height),
                            ..default()
                        },
                        BackgroundColor(container_bg()),
                        DropContainer,
                    ))
                    .with_children(|container| {
                        card::spawn_pill_card(
                            container,
                            0,
                            Vec2::from(AUTO_PILL_A_ANCHOR),
                            Vec2::from(AUTO_PILL_A_SIZE),
                            "VIEW WORK",
                            card::blue_pill_bg(),
                            card::blue_pill_border(),
                            card::blue_pill_text(),
                            false,
                        );
                        card::spawn_pill_card(
                            container,
                            1,
                            Vec2::from(AUTO_PILL_B_ANCHOR),
                            Vec2::from(AUTO_PILL_B_SIZE),
                            "CONTACT",
                            card::red_pill_bg(),
                            card::red_pill_border(),
                            card::red_pill_text(),
                            true,
                        );
                    });
            });

            spawn_control_button(root, "REPLAY", ReplayButton, None::<DropButtonLabel>);
        });
}

/// Pin a control button to the window's bottom-right corner.  `label_marker`
/// tags the text child when a handler needs to rewrite it.
fn spawn_control_button<M: Component, L: Component>(
    root: &mut ChildSpawnerCommands<'_>,
    label: &str,
    marker: M,
    label_marker: Option<L>,
) {
    root.spawn((
        Button,
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(24.0),
            bottom: Val::Px(24.0),
            width: Val::Px(150.0),
            height: Val::Px(48.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(control_bg()),
        BorderColor::all(control_border()),
        BorderRadius::all(Val::Px(6.0)),
        ZIndex(10),
        marker,
    ))
    .with_children(|btn| {
        let mut text = btn.spawn((
            Text::new(label),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(control_text()),
        ));
        if let Some(m) = label_marker {
            text.insert(m);
        }
    });
}

// ── Scrolling ────────────────────────────────────────────────────────────────

/// Mouse-wheel scrolling for the reveal page.
///
/// Updates [`PageScroll`] (clamped to the page extent) and mirrors it onto
/// the column's `top` offset.  Wheel-down produces negative line deltas,
/// which scroll the page further down.
pub fn scroll_page_system(
    mut wheel: MessageReader<MouseWheel>,
    windows: Query<&Window>,
    config: Res<DropConfig>,
    mut scroll: ResMut<PageScroll>,
    mut column: Query<&mut Node, With<PageColumn>>,
) {
    let mut delta = 0.0;
    for ev in wheel.read() {
        delta += match ev.unit {
            MouseScrollUnit::Line => ev.y * config.scroll_line_px,
            MouseScrollUnit::Pixel => ev.y,
        };
    }
    if delta == 0.0 {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let page_height = config.reveal_spacer_px + config.auto_section_height;
    let max_scroll = (page_height - window.height()).max(0.0);
    scroll.0 = (scroll.0 - delta).clamp(0.0, max_scroll);
    for mut node in column.iter_mut() {
        node.top = Val::Px(-scroll.0);
    }
}
