//! Pointer-to-world conversion and ray intersection tests shared by every
//! view, independent of projection type.

use bevy::prelude::*;

/// Intersect a pointer ray with the Z=0 reference plane. Because the ray
/// originates at the camera, the hit depth tracks the camera's Z distance,
/// which gives drag-along-view-plane placement for a 2D mouse. Rays running
/// nearly parallel to the plane miss.
pub fn view_plane_point(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.z.abs() < 1e-6 {
        return None;
    }
    let t = -origin.z / direction.z;
    (t > 0.0).then(|| origin + direction * t)
}

/// Ray through `cursor` (window coordinates) for a camera rendering into its
/// own viewport rectangle. `None` when the cursor lies outside the camera's
/// rectangle or the camera cannot unproject yet.
pub fn cursor_ray(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    cursor: Vec2,
) -> Option<Ray3d> {
    let rect = camera.logical_viewport_rect()?;
    if !rect.contains(cursor) {
        return None;
    }
    camera.viewport_to_world(camera_transform, cursor - rect.min).ok()
}

/// Oriented-box intersection: transforms the ray into box-local space and
/// runs the slab test against the half extents.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

// Slab-method ray-AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax {
        std::mem::swap(&mut tmin, &mut tmax);
    }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax {
        std::mem::swap(&mut tymin, &mut tymax);
    }

    if (tmin > tymax) || (tymin > tmax) {
        return None;
    }
    if tymin > tmin {
        tmin = tymin;
    }
    if tymax < tmax {
        tmax = tymax;
    }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax {
        std::mem::swap(&mut tzmin, &mut tzmax);
    }

    if (tmin > tzmax) || (tzmin > tmax) {
        return None;
    }
    if tzmin > tmin {
        tmin = tzmin;
    }
    if tzmax < tmax {
        tmax = tzmax;
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Closest-approach sphere test; returns the ray parameter of the approach
/// point when it passes within `radius` of `center`.
pub fn ray_hits_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let t = to_center.dot(dir);
    if t < 0.0 {
        return None;
    }
    let closest = origin + dir * t;
    ((closest - center).length_squared() <= radius * radius).then_some(t)
}

/// Nearest candidate by ray parameter. An empty candidate set is a miss, not
/// an error.
pub fn nearest_hit(hits: impl IntoIterator<Item = (Entity, f32)>) -> Option<(Entity, f32)> {
    hits.into_iter().min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_lands_on_the_forward_axis_at_plane_depth() {
        // Camera at (0,0,30) looking down -Z: the centre ray hits Z=0 at the
        // camera's own depth distance, on its forward axis.
        let hit = view_plane_point(Vec3::new(0.0, 0.0, 30.0), Vec3::NEG_Z).unwrap();
        assert_eq!(hit, Vec3::ZERO);
    }

    #[test]
    fn plane_depth_tracks_the_camera_not_the_cursor() {
        let near = view_plane_point(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();
        let far = view_plane_point(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z).unwrap();
        assert_eq!(near.z, 0.0);
        assert_eq!(far.z, 0.0);
    }

    #[test]
    fn parallel_ray_misses_the_view_plane() {
        assert!(view_plane_point(Vec3::new(0.0, 0.0, 30.0), Vec3::X).is_none());
    }

    #[test]
    fn slab_test_hits_a_box_straight_ahead() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::NEG_Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        )
        .unwrap();
        assert!((t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn slab_test_misses_a_box_off_axis() {
        assert!(
            ray_aabb_hit_t(
                Vec3::new(5.0, 0.0, 10.0),
                Vec3::NEG_Z,
                Vec3::splat(-1.0),
                Vec3::splat(1.0),
            )
            .is_none()
        );
    }

    #[test]
    fn slab_test_from_inside_returns_the_exit_parameter() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn obb_test_respects_the_box_rotation() {
        let xf = GlobalTransform::from(
            Transform::IDENTITY.with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)),
        );
        let t = ray_hits_obb(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_X, xf, Vec3::splat(2.0)).unwrap();

        // A 45-degree rotated unit-half-extent cube presents a corner at
        // sqrt(2) along +X.
        assert!((t - (10.0 - std::f32::consts::SQRT_2)).abs() < 1e-3);
    }

    #[test]
    fn sphere_test_hits_within_radius_and_ignores_behind() {
        let t = ray_hits_sphere(Vec3::ZERO, Vec3::X, Vec3::new(5.0, 0.05, 0.0), 0.1).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        assert!(ray_hits_sphere(Vec3::ZERO, Vec3::X, Vec3::new(-5.0, 0.0, 0.0), 0.1).is_none());
    }

    #[test]
    fn nearest_hit_orders_by_ray_parameter_and_tolerates_empty_sets() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();

        let best = nearest_hit([(far, 8.0), (near, 3.0)]);
        assert_eq!(best, Some((near, 3.0)));

        assert_eq!(nearest_hit(std::iter::empty()), None);
    }
}
