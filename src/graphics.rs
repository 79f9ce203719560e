use bevy::prelude::*;

/// Setup camera for UI rendering.
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d; everything visible on the page is bevy_ui, the
    // physics world itself is never drawn.
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}
