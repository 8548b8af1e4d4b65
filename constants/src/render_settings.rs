use bevy::prelude::*;

/// Fixed dimensions of a newly created annotation box.
pub const ANNOTATION_BOX_SIZE: Vec3 = Vec3::new(2.0, 2.0, 2.0);

/// Radius of the sphere markers placed on committed box corners.
pub const VERTEX_MARKER_RADIUS: f32 = 0.1;

/// Corner positions closer than this collapse into one vertex marker.
pub const MARKER_DEDUP_EPSILON: f32 = 1e-4;

/// Distance between each orthographic camera and the shared focus point.
pub const SECONDARY_CAMERA_DISTANCE: f32 = 10.0;

/// Orthographic magnification shared by the secondary views at startup.
pub const DEFAULT_VIEW_ZOOM: f32 = 50.0;

/// Zoom change per wheel event over the viewport area.
pub const VIEW_ZOOM_STEP: f32 = 1.0;

/// Home pose and frustum of the primary perspective camera.
pub const PRIMARY_CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 30.0);
pub const PRIMARY_CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Length of the world axes helper lines.
pub const AXES_HELPER_LENGTH: f32 = 10.0;
