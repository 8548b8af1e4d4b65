//! Static scene content shared by every view: world axes helper and
//! lighting. Present before the point cloud resolves, so the views are never
//! empty while loading.

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::RenderLayers;
use constants::render_settings::AXES_HELPER_LENGTH;

/// Layer mask spanning the primary view and all three secondary views.
pub fn all_view_layers() -> RenderLayers {
    RenderLayers::from_layers(&[0, 1, 2, 3])
}

/// RGB line mesh marking the world axes, X red, Y green, Z blue.
pub fn create_axes_mesh(length: f32) -> Mesh {
    let positions: Vec<[f32; 3]> = vec![
        [0.0, 0.0, 0.0],
        [length, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, length, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, length],
    ];
    let colours: Vec<[f32; 4]> = vec![
        [1.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
    ];

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours);
    mesh
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(create_axes_mesh(AXES_HELPER_LENGTH))),
        MeshMaterial3d(materials.add(StandardMaterial {
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        all_view_layers(),
        Name::new("AxesHelper"),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
        all_view_layers(),
    ));
}
