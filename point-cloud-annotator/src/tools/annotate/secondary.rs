//! Input local to the secondary views: shared wheel zoom and the move-cursor
//! affordance over vertex markers.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use constants::render_settings::VERTEX_MARKER_RADIUS;

use crate::engine::camera::view_layout::SecondaryView;
use crate::engine::picking::{cursor_ray, ray_hits_sphere};

use super::state::{PickableIn, SharedViewZoom, VertexMarker};

/// Scrolling anywhere adjusts the one zoom scalar all three orthographic
/// views share, one step per wheel event.
pub fn adjust_view_zoom(mut wheel: EventReader<MouseWheel>, mut zoom: ResMut<SharedViewZoom>) {
    for event in wheel.read() {
        zoom.apply_scroll(event.y);
    }
}

/// Show the move cursor while the pointer rests on a vertex marker in any
/// secondary view. Markers only pick in the view's own layer, so a marker
/// behind another view's rectangle never triggers the affordance.
pub fn hover_vertex_markers(
    mut commands: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    secondary_cameras: Query<(&Camera, &GlobalTransform, &SecondaryView)>,
    markers: Query<(&GlobalTransform, &PickableIn), With<VertexMarker>>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let mut hovering = false;
    for (camera, camera_transform, view) in &secondary_cameras {
        let Some(ray) = cursor_ray(camera, camera_transform, cursor) else {
            continue;
        };
        let layer = bevy::render::view::RenderLayers::layer(view.axis.layer());
        hovering = markers.iter().any(|(marker_transform, pickable)| {
            pickable.0.intersects(&layer)
                && ray_hits_sphere(
                    ray.origin,
                    *ray.direction,
                    marker_transform.translation(),
                    VERTEX_MARKER_RADIUS,
                )
                .is_some()
        });
        // The cursor sits in exactly one view rectangle.
        break;
    }

    let icon = if hovering {
        SystemCursorIcon::Move
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window_entity).insert(CursorIcon::System(icon));
}
