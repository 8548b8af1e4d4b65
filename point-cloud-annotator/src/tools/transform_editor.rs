//! Drag manipulation for the active annotation box. The editor owns one
//! attachment at a time plus the transform snapshot taken at attach, so
//! Escape can restore the box to its pre-edit pose.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::navigation::NavigationController;
use crate::engine::camera::view_layout::PrimaryView;
use crate::engine::picking::{cursor_ray, ray_hits_obb, view_plane_point};
use crate::tools::annotate::state::BoxSize;

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditorMode {
    #[default]
    Translate,
    Scale,
    Rotate,
}

/// Manipulation state for the attached box. `dragging` gates the orbit
/// controller so a manipulation drag never also orbits the camera.
#[derive(Resource, Default)]
pub struct TransformEditor {
    attached: Option<(Entity, Transform)>,
    pub mode: EditorMode,
    pub dragging: bool,
}

impl TransformEditor {
    /// Attach to a box, snapshotting its transform for a later reset.
    pub fn attach(&mut self, entity: Entity, snapshot: Transform) {
        self.attached = Some((entity, snapshot));
        self.dragging = false;
    }

    pub fn detach(&mut self) {
        self.attached = None;
        self.dragging = false;
    }

    pub fn attached(&self) -> Option<Entity> {
        self.attached.map(|(e, _)| e)
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Return the attachment to its snapshot pose and default mode. The
    /// caller applies the returned transform to the entity.
    pub fn reset(&mut self) -> Option<(Entity, Transform)> {
        self.mode = EditorMode::default();
        self.dragging = false;
        self.attached
    }
}

/// T/R/S switch the manipulation mode, Escape restores the snapshot pose.
pub fn editor_keyboard_commands(
    keys: Res<ButtonInput<KeyCode>>,
    mut editor: ResMut<TransformEditor>,
    mut transforms: Query<&mut Transform>,
) {
    if keys.just_pressed(KeyCode::KeyT) {
        editor.set_mode(EditorMode::Translate);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        editor.set_mode(EditorMode::Rotate);
    }
    if keys.just_pressed(KeyCode::KeyS) {
        editor.set_mode(EditorMode::Scale);
    }
    if keys.just_pressed(KeyCode::Escape) {
        if let Some((entity, snapshot)) = editor.reset() {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                *transform = snapshot;
            }
        }
    }
}

/// Left-drag on the attached box applies the current mode: translate slides
/// it along the view plane, rotate spins about Y with horizontal motion,
/// scale grows with upward motion.
pub fn manipulate_attached_box(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    primary_camera: Query<(&Camera, &GlobalTransform), With<PrimaryView>>,
    mut editor: ResMut<TransformEditor>,
    mut boxes: Query<(&mut Transform, &GlobalTransform, &BoxSize)>,
) {
    let Some(attached) = editor.attached() else {
        motion.clear();
        return;
    };
    let Ok((mut transform, global, size)) = boxes.get_mut(attached) else {
        motion.clear();
        return;
    };

    let delta: Vec2 = motion.read().map(|m| m.delta).sum();

    if buttons.just_released(MouseButton::Left) {
        editor.dragging = false;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = primary_camera.single() else {
        return;
    };
    let ray = cursor_ray(camera, camera_transform, cursor);

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(ray) = ray {
            if ray_hits_obb(ray.origin, *ray.direction, *global, size.0).is_some() {
                editor.dragging = true;
            }
        }
    }

    if !editor.dragging || !buttons.pressed(MouseButton::Left) {
        return;
    }

    match editor.mode {
        EditorMode::Translate => {
            if let Some(ray) = ray {
                if let Some(point) = view_plane_point(ray.origin, *ray.direction) {
                    transform.translation = point;
                }
            }
        }
        EditorMode::Rotate => {
            transform.rotate_y(delta.x * 0.01);
        }
        EditorMode::Scale => {
            let factor = (1.0 - delta.y * 0.01).max(0.01);
            transform.scale *= factor;
        }
    }
}

/// Orbit navigation is suspended for the duration of a manipulation drag.
pub fn reflect_editor_drag(
    editor: Res<TransformEditor>,
    mut navigation: ResMut<NavigationController>,
) {
    navigation.enabled = !editor.dragging;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_snapshots_and_reset_restores() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let snapshot = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));

        let mut editor = TransformEditor::default();
        editor.attach(entity, snapshot);
        editor.set_mode(EditorMode::Rotate);
        editor.dragging = true;

        let (restored_entity, restored) = editor.reset().unwrap();
        assert_eq!(restored_entity, entity);
        assert_eq!(restored.translation, snapshot.translation);
        assert_eq!(editor.mode, EditorMode::Translate);
        assert!(!editor.dragging);

        // Reset keeps the attachment; only detach drops it.
        assert_eq!(editor.attached(), Some(entity));
        editor.detach();
        assert_eq!(editor.attached(), None);
    }

    #[test]
    fn mode_switches_do_not_disturb_the_attachment() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();

        let mut editor = TransformEditor::default();
        editor.attach(entity, Transform::IDENTITY);
        editor.set_mode(EditorMode::Scale);

        assert_eq!(editor.mode, EditorMode::Scale);
        assert_eq!(editor.attached(), Some(entity));
    }
}
