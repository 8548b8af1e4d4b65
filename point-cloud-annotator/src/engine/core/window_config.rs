use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    Window {
        title: "Point Cloud Box Annotator".into(),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}
