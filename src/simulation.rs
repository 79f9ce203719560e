//! Drop-effect plugin: system registration and ordering.
//!
//! The ordering discipline the whole effect relies on:
//!
//! | Schedule     | Systems                                            |
//! |--------------|----------------------------------------------------|
//! | `Update`     | All state mutations: buttons, scroll, reveal,      |
//! |              | countdowns (chained, so at most one mutation path  |
//! |              | runs per frame in a fixed order)                   |
//! | `PostUpdate` | Rapier steps, then [`crate::sync::sync_cards_system`] |
//! |              | mirrors poses after `PhysicsSet::Writeback`        |
//!
//! Mutations therefore always land strictly between ticks: mutate-then-step,
//! never step-while-mutating.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;

use crate::activation::{self, DropPhase, PendingFreeze, RevealFired};
use crate::config::{DropConfig, DropMode};
use crate::page::{self, PageScroll};
use crate::reset::{self, PendingDrop};
use crate::scene::{self, SetupStage};
use crate::sync;

pub struct DropPlugin;

impl Plugin for DropPlugin {
    fn build(&self, app: &mut App) {
        // Idempotent under DefaultPlugins; keeps the scroll system usable in
        // headless test apps that skip the input plugin.
        app.add_message::<MouseWheel>();
        app.init_state::<SetupStage>()
            .init_resource::<DropPhase>()
            .init_resource::<PendingFreeze>()
            .init_resource::<PendingDrop>()
            .init_resource::<RevealFired>()
            .init_resource::<PageScroll>()
            .add_systems(
                Update,
                scene::measure_cards_system.run_if(in_state(SetupStage::Measuring)),
            )
            .add_systems(OnEnter(SetupStage::Ready), scene::build_world_system)
            .add_systems(
                Update,
                activation::drop_toggle_button_system
                    .run_if(in_state(SetupStage::Ready))
                    .run_if(in_click_toggle_mode),
            )
            .add_systems(
                Update,
                (
                    page::scroll_page_system,
                    activation::reveal_trigger_system,
                    reset::replay_button_system,
                    reset::pending_drop_system,
                    activation::refreeze_countdown_system,
                )
                    .chain()
                    .run_if(in_state(SetupStage::Ready))
                    .run_if(in_reveal_auto_mode),
            )
            .add_systems(
                PostUpdate,
                sync::sync_cards_system
                    .run_if(in_state(SetupStage::Ready))
                    .after(PhysicsSet::Writeback),
            );
    }
}

/// Run condition: the click-toggle page is active.
pub fn in_click_toggle_mode(config: Res<DropConfig>) -> bool {
    config.mode == DropMode::ClickToggle
}

/// Run condition: the reveal page is active.
pub fn in_reveal_auto_mode(config: Res<DropConfig>) -> bool {
    config.mode == DropMode::RevealAuto
}
