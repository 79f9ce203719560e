use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use freefall::config::{self, DropConfig};
use freefall::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use freefall::graphics;
use freefall::page;
use freefall::simulation::DropPlugin;

/// Configure Rapier gravity for page space: the world uses the page's
/// y-down coordinates, so gravity points along +y.
fn setup_physics_config(mut rapier: Query<&mut RapierConfiguration>, config: Res<DropConfig>) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = Vec2::new(0.0, config.gravity_px);
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Freefall".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert DropConfig with compiled defaults; load_drop_config will
        // overwrite it from assets/freefall.toml (if present) in Startup.
        .insert_resource(DropConfig::default())
        // pixels_per_meter(1.0) keeps world units identical to page pixels,
        // so measured card boxes feed Rapier unscaled.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(DropPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values; FREEFALL_MODE then overrides the page choice.
                config::load_drop_config,
                config::apply_mode_override.after(config::load_drop_config),
                graphics::setup_camera.after(config::apply_mode_override),
                page::setup_page.after(config::apply_mode_override),
                setup_physics_config.after(config::load_drop_config),
            ),
        )
        .run();
}
