use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use serde::Deserialize;

use crate::engine::scene::all_view_layers;

/// Relative path of the point set asset, pre-converted to JSON.
pub const POINT_CLOUD_ASSET_PATH: &str = "clouds/000053.json";

/// Renderable point set: one world position per point, colours optional.
#[derive(Asset, TypePath, Clone, Deserialize)]
pub struct PointCloudData {
    pub points: Vec<[f32; 3]>,
    #[serde(default)]
    pub colours: Option<Vec<[f32; 4]>>,
}

#[derive(Component)]
pub struct PointCloud;

/// One-shot load tracking. The scene renders without the cloud until the
/// asset resolves, and keeps rendering without it if the load fails.
#[derive(Resource, Default)]
pub struct PointCloudLoader {
    handle: Option<Handle<PointCloudData>>,
    finished: bool,
}

pub fn start_loading(mut loader: ResMut<PointCloudLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(POINT_CLOUD_ASSET_PATH));
}

/// Spawn the point mesh once the asset resolves. A failed load is reported
/// once and is not fatal; annotation proceeds against the axes helper alone.
pub fn create_point_cloud_when_ready(
    mut loader: ResMut<PointCloudLoader>,
    asset_server: Res<AssetServer>,
    clouds: Res<Assets<PointCloudData>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if loader.finished {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(cloud) = clouds.get(&handle) {
        info!("Point cloud loaded: {} points", cloud.points.len());
        commands.spawn((
            Mesh3d(meshes.add(create_point_list_mesh(cloud))),
            MeshMaterial3d(materials.add(StandardMaterial {
                unlit: true,
                ..default()
            })),
            Transform::IDENTITY,
            PointCloud,
            all_view_layers(),
            Name::new("PointCloud"),
        ));
        loader.finished = true;
    } else if matches!(asset_server.get_load_state(handle.id()), Some(LoadState::Failed(_))) {
        warn!("Point cloud failed to load from {POINT_CLOUD_ASSET_PATH}; continuing without it");
        loader.finished = true;
    }
}

pub fn create_point_list_mesh(cloud: &PointCloudData) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, cloud.points.clone());
    if let Some(colours) = &cloud.colours {
        if colours.len() == cloud.points.len() {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours.clone());
        }
    }
    mesh
}
