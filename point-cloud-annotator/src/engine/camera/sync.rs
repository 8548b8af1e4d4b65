use bevy::prelude::*;
use constants::render_settings::SECONDARY_CAMERA_DISTANCE;

use super::view_layout::{SecondaryView, ViewAxis};
use crate::tools::annotate::state::{FocusPoint, SharedViewZoom};

/// World pose framing `focus` from the view's fixed cardinal direction, at a
/// constant distance, with the view's fixed up vector.
pub fn secondary_camera_pose(axis: ViewAxis, focus: Vec3) -> Transform {
    Transform::from_translation(focus + axis.offset() * SECONDARY_CAMERA_DISTANCE)
        .looking_at(focus, axis.up())
}

/// Re-aim every orthographic camera at the shared focus point and apply the
/// shared zoom. Chained after all focus-point writers in the tick, so the
/// secondary views never lag the primary interaction by a frame. The primary
/// camera is owned by the navigation controller and never touched here.
pub fn sync_secondary_cameras(
    focus: Res<FocusPoint>,
    zoom: Res<SharedViewZoom>,
    mut cameras: Query<(&mut Transform, &mut Projection, &SecondaryView)>,
) {
    for (mut transform, mut projection, view) in &mut cameras {
        *transform = secondary_camera_pose(view.axis, focus.0);

        if let Projection::Orthographic(ortho) = &mut *projection {
            // Zoom carries no enforced bounds; only guard the division.
            if zoom.0 > f32::EPSILON {
                ortho.scale = 1.0 / zoom.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn front_camera_frames_focus_from_positive_z() {
        let focus = Vec3::new(2.0, -1.0, 4.0);
        let pose = secondary_camera_pose(ViewAxis::Front, focus);

        assert_close(pose.translation, focus + Vec3::Z * SECONDARY_CAMERA_DISTANCE);
        assert_close(*pose.forward(), Vec3::NEG_Z);
        assert_close(*pose.up(), Vec3::Y);
    }

    #[test]
    fn top_camera_looks_straight_down_with_z_up() {
        let focus = Vec3::new(-3.0, 0.5, 7.0);
        let pose = secondary_camera_pose(ViewAxis::Top, focus);

        assert_close(pose.translation, focus + Vec3::Y * SECONDARY_CAMERA_DISTANCE);
        assert_close(*pose.forward(), Vec3::NEG_Y);
        assert_close(*pose.up(), Vec3::Z);
    }

    #[test]
    fn side_camera_frames_focus_from_positive_x() {
        let focus = Vec3::splat(1.5);
        let pose = secondary_camera_pose(ViewAxis::Side, focus);

        assert_close(pose.translation, focus + Vec3::X * SECONDARY_CAMERA_DISTANCE);
        assert_close(*pose.forward(), Vec3::NEG_X);
    }

    #[test]
    fn pose_tracks_a_moving_focus_point() {
        let a = secondary_camera_pose(ViewAxis::Front, Vec3::ZERO);
        let b = secondary_camera_pose(ViewAxis::Front, Vec3::new(5.0, 1.0, 0.0));

        assert_close(b.translation - a.translation, Vec3::new(5.0, 1.0, 0.0));
    }
}
