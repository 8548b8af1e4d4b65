use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::PRIMARY_CAMERA_EYE;

use super::view_layout::PrimaryView;

/// Orbit-style control of the primary camera: left-drag rotates around the
/// navigation target, WASD pans it. The transform editor disables this while
/// a drag-transform is in progress.
#[derive(Resource)]
pub struct NavigationController {
    pub enabled: bool,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: PRIMARY_CAMERA_EYE.z,
        }
    }
}

impl NavigationController {
    /// Restore the home pose.
    pub fn reset(&mut self) {
        let enabled = self.enabled;
        *self = Self::default();
        self.enabled = enabled;
    }

    fn eye(&self) -> Vec3 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        self.target + rotation * Vec3::Z * self.distance
    }
}

/// Request from the UI panel to return the navigation pose to home.
#[derive(Event)]
pub struct NavigationResetEvent;

pub fn navigation_controller(
    mut nav: ResMut<NavigationController>,
    mut reset_events: EventReader<NavigationResetEvent>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Transform, &Camera), With<PrimaryView>>,
) {
    if reset_events.read().next().is_some() {
        nav.reset();
    }

    let delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let Ok((mut transform, camera)) = cameras.single_mut() else {
        return;
    };

    if nav.enabled {
        let over_primary = windows
            .single()
            .ok()
            .and_then(|window| window.cursor_position())
            .zip(camera.logical_viewport_rect())
            .is_some_and(|(cursor, rect)| rect.contains(cursor));

        if over_primary && mouse_button.pressed(MouseButton::Left) && delta != Vec2::ZERO {
            nav.yaw -= delta.x * 0.005;
            nav.pitch = (nav.pitch - delta.y * 0.005).clamp(-1.55, 1.55);
        }

        let mut pan = Vec3::ZERO;
        if keyboard.pressed(KeyCode::KeyW) {
            pan.y += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            pan.y -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            pan.x += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            pan.x -= 1.0;
        }
        if pan != Vec3::ZERO {
            let rotation = Quat::from_euler(EulerRot::YXZ, nav.yaw, nav.pitch, 0.0);
            let speed = (nav.distance * 0.5).clamp(2.0, 200.0);
            nav.target += rotation * pan.normalize() * speed * time.delta_secs();
        }
    }

    transform.translation = nav.eye();
    transform.look_at(nav.target, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_home_pose_but_keeps_suspension() {
        let mut nav = NavigationController {
            enabled: false,
            target: Vec3::splat(9.0),
            yaw: 1.0,
            pitch: -0.5,
            distance: 3.0,
        };

        nav.reset();

        assert!(!nav.enabled);
        assert_eq!(nav.target, Vec3::ZERO);
        assert_eq!(nav.eye(), PRIMARY_CAMERA_EYE);
    }

    #[test]
    fn home_eye_matches_the_configured_camera_position() {
        let nav = NavigationController::default();
        assert_eq!(nav.eye(), PRIMARY_CAMERA_EYE);
    }
}
