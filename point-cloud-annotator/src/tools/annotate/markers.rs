//! Vertex markers spawned at the corners of a committed box. Degenerate
//! boxes (zero extent along an axis) collapse coincident corners to a single
//! marker, so the marker count reflects the distinct geometry.

use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::render_settings::{MARKER_DEDUP_EPSILON, VERTEX_MARKER_RADIUS};
use std::collections::HashSet;

use super::state::{PickableIn, VertexMarker};

/// The eight corners of a box in world space, transform applied.
pub fn box_corners(transform: &Transform, size: Vec3) -> [Vec3; 8] {
    let he = size * 0.5;
    std::array::from_fn(|i| {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        transform.transform_point(he * sign)
    })
}

/// Drop positions that coincide within `epsilon`, keeping first-seen order.
/// Quantised integer keys make the comparison independent of float noise.
pub fn dedup_positions(points: &[Vec3], epsilon: f32) -> Vec<Vec3> {
    let mut seen: HashSet<[i64; 3]> = HashSet::new();
    let mut unique = Vec::new();
    for &p in points {
        let key = [
            (p.x / epsilon).round() as i64,
            (p.y / epsilon).round() as i64,
            (p.z / epsilon).round() as i64,
        ];
        if seen.insert(key) {
            unique.push(p);
        }
    }
    unique
}

pub fn unique_box_corners(transform: &Transform, size: Vec3) -> Vec<Vec3> {
    dedup_positions(&box_corners(transform, size), MARKER_DEDUP_EPSILON)
}

/// Markers render and pick in the secondary views only; the primary view
/// stays uncluttered.
pub fn marker_layers() -> RenderLayers {
    RenderLayers::from_layers(&[1, 2, 3])
}

pub fn spawn_vertex_markers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    corners: &[Vec3],
) {
    let mesh = meshes.add(Sphere::new(VERTEX_MARKER_RADIUS));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.0, 1.0, 0.0),
        unlit: true,
        ..default()
    });

    for &corner in corners {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(corner),
            VertexMarker,
            marker_layers(),
            PickableIn(marker_layers()),
            Name::new("VertexMarker"),
        ));
    }
}
