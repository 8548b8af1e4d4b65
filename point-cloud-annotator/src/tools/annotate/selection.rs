//! Click selection of committed boxes in the primary view. The nearest box
//! along the pointer ray becomes active; clicking empty space deselects.

use bevy::pbr::wireframe::WireframeColor;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;

use crate::engine::camera::view_layout::PrimaryView;
use crate::engine::picking::{cursor_ray, nearest_hit, ray_hits_obb};
use crate::tools::transform_editor::TransformEditor;

use super::state::{
    ActiveBox, AnnotationBox, AnnotationSession, BoxRegistry, BoxSize, FocusPoint, PendingBox,
    PickableIn, SelectionChange,
};

/// True while the pointer rests on any UI node, so toolbar clicks never
/// fall through to the scene beneath the panel.
pub fn pointer_on_ui<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> bool {
    interactions.into_iter().any(|i| *i != Interaction::None)
}

/// Hit-test committed boxes under the cursor and switch the active one.
/// Pending boxes are excluded; placement owns them until commit.
pub fn select_box_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_nodes: Query<&Interaction>,
    primary_camera: Query<(&Camera, &GlobalTransform), With<PrimaryView>>,
    session: Res<AnnotationSession>,
    mut registry: ResMut<BoxRegistry>,
    mut editor: ResMut<TransformEditor>,
    mut focus: ResMut<FocusPoint>,
    boxes: Query<
        (Entity, &GlobalTransform, &BoxSize, &PickableIn),
        (With<AnnotationBox>, Without<PendingBox>),
    >,
    mut commands: Commands,
    transforms: Query<&Transform>,
) {
    if !buttons.just_pressed(MouseButton::Left) || !session.is_idle() {
        return;
    }
    if pointer_on_ui(&ui_nodes) {
        return;
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
    let Some(ray) = cursor_ray(camera, camera_transform, cursor) else {
        return;
    };

    let hit = nearest_hit(boxes.iter().filter_map(|(entity, global, size, pickable)| {
        if !pickable.0.intersects(&RenderLayers::layer(0)) {
            return None;
        }
        ray_hits_obb(ray.origin, *ray.direction, *global, size.0)
            .filter(|t| *t > 0.0)
            .map(|t| (entity, t))
    }));

    let change = registry.set_active(hit.map(|(entity, _)| entity));
    apply_selection_change(change, &mut commands, &mut editor, &mut focus, &transforms);
}

/// Apply one selection transition: swap highlight colours, move the editor
/// attachment, and refocus the secondary views on the newly active box.
pub fn apply_selection_change(
    change: SelectionChange,
    commands: &mut Commands,
    editor: &mut TransformEditor,
    focus: &mut FocusPoint,
    transforms: &Query<&Transform>,
) {
    if let Some(previous) = change.deactivated {
        commands.entity(previous).remove::<ActiveBox>().insert(WireframeColor {
            color: Color::srgb(1.0, 0.0, 0.0),
        });
        editor.detach();
    }
    if let Some(selected) = change.activated {
        commands.entity(selected).insert((
            ActiveBox,
            WireframeColor {
                color: Color::srgb(0.0, 1.0, 0.0),
            },
        ));
        if let Ok(transform) = transforms.get(selected) {
            focus.0 = transform.translation;
            editor.attach(selected, *transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn spawn_box(world: &mut World, at: Vec3) -> Entity {
        world
            .spawn((
                Transform::from_translation(at),
                AnnotationBox,
                BoxSize(Vec3::splat(2.0)),
                PickableIn(RenderLayers::layer(0)),
            ))
            .id()
    }

    #[test]
    fn pointer_over_ui_blocks_scene_clicks() {
        assert!(pointer_on_ui([&Interaction::Hovered]));
        assert!(pointer_on_ui([&Interaction::Pressed]));
        assert!(!pointer_on_ui([&Interaction::None, &Interaction::None]));
        assert!(!pointer_on_ui(std::iter::empty()));
    }

    #[test]
    fn selection_change_moves_highlight_and_editor_attachment() {
        let mut world = World::new();
        world.init_resource::<TransformEditor>();
        world.init_resource::<FocusPoint>();

        let first = spawn_box(&mut world, Vec3::ZERO);
        let second = spawn_box(&mut world, Vec3::new(4.0, 0.0, 0.0));
        world.entity_mut(first).insert(ActiveBox);

        world
            .run_system_once(
                move |mut commands: Commands,
                      mut editor: ResMut<TransformEditor>,
                      mut focus: ResMut<FocusPoint>,
                      transforms: Query<&Transform>| {
                    apply_selection_change(
                        SelectionChange {
                            deactivated: Some(first),
                            activated: Some(second),
                        },
                        &mut commands,
                        &mut editor,
                        &mut focus,
                        &transforms,
                    );
                },
            )
            .unwrap();

        assert!(world.get::<ActiveBox>(first).is_none());
        assert!(world.get::<ActiveBox>(second).is_some());
        assert_eq!(world.resource::<TransformEditor>().attached(), Some(second));
        assert_eq!(world.resource::<FocusPoint>().0, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn deselection_detaches_the_editor() {
        let mut world = World::new();
        world.init_resource::<TransformEditor>();
        world.init_resource::<FocusPoint>();

        let only = spawn_box(&mut world, Vec3::ZERO);
        world.entity_mut(only).insert(ActiveBox);
        world
            .resource_mut::<TransformEditor>()
            .attach(only, Transform::IDENTITY);

        world
            .run_system_once(
                move |mut commands: Commands,
                      mut editor: ResMut<TransformEditor>,
                      mut focus: ResMut<FocusPoint>,
                      transforms: Query<&Transform>| {
                    apply_selection_change(
                        SelectionChange {
                            deactivated: Some(only),
                            activated: None,
                        },
                        &mut commands,
                        &mut editor,
                        &mut focus,
                        &transforms,
                    );
                },
            )
            .unwrap();

        assert!(world.get::<ActiveBox>(only).is_none());
        assert_eq!(world.resource::<TransformEditor>().attached(), None);
    }
}
