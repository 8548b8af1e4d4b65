use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::view_layout::{apply_view_layout, spawn_view_cameras};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::point_cloud::{
    create_point_cloud_when_ready, start_loading, PointCloudData, PointCloudLoader,
};
use crate::engine::scene::setup_scene;
use crate::tools::annotate::AnnotatePlugin;
use crate::tools::ui::{
    draw_button_interaction, handle_draw_shortcut, reset_button_interaction, spawn_annotator_ui,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers PointCloudData as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<PointCloudData>::new(&["json"]))
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE,
        })
        .add_plugins(AnnotatePlugin)
        .init_resource::<PointCloudLoader>();

    app.add_systems(
        Startup,
        (setup_scene, spawn_view_cameras, spawn_annotator_ui, setup_overlays, start_loading),
    )
    .add_systems(
        Update,
        (
            create_point_cloud_when_ready,
            apply_view_layout,
            handle_draw_shortcut,
            draw_button_interaction,
            reset_button_interaction,
            fps_text_update_system,
        ),
    );

    app
}

#[derive(Component)]
pub struct FpsText;

fn setup_overlays(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
