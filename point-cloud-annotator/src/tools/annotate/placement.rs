//! Box placement: create on request, follow the pointer along the view
//! plane, commit on right-click. Commit promotes the pending box into the
//! registry, spawns its vertex markers, and hands it to the transform editor.

use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;
use constants::render_settings::ANNOTATION_BOX_SIZE;

use crate::engine::camera::view_layout::PrimaryView;
use crate::engine::picking::{cursor_ray, view_plane_point};
use crate::engine::scene::all_view_layers;
use crate::tools::transform_editor::TransformEditor;

use super::markers::{spawn_vertex_markers, unique_box_corners};
use super::state::{
    AnnotationBox, AnnotationSession, BoxRegistry, BoxSize, FocusPoint, PendingBox, PickableIn,
    PointerOverPrimary, PointerWorld, SessionPhase,
};

/// Request to start placing a new box, from the toolbar button or shortcut.
#[derive(Event, Default)]
pub struct DrawBoxRequested;

/// Keep `PointerWorld` current whenever the cursor is over the primary view.
/// Placement gestures read this instead of unprojecting themselves, so the
/// box created by a draw request appears under the pointer immediately.
pub fn track_pointer_world(
    windows: Query<&Window, With<PrimaryWindow>>,
    primary_camera: Query<(&Camera, &GlobalTransform), With<PrimaryView>>,
    mut pointer: ResMut<PointerWorld>,
    mut over_primary: ResMut<PointerOverPrimary>,
) {
    over_primary.0 = false;
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
    over_primary.0 = true;
    if let Some(point) = view_plane_point(ray.origin, *ray.direction) {
        pointer.0 = point;
    }
}

/// Spawn a pending box at the pointer. A draw request while another box is
/// still pending discards the stale one first; only a commit keeps a box.
pub fn begin_placement(
    mut requests: EventReader<DrawBoxRequested>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut session: ResMut<AnnotationSession>,
    mut focus: ResMut<FocusPoint>,
    pointer: Res<PointerWorld>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    if let Some(stale) = session.pending() {
        commands.entity(stale).despawn();
    }

    let size = ANNOTATION_BOX_SIZE;
    focus.0 = pointer.0;

    let pending = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 0.0, 0.0, 0.2),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(pointer.0),
            AnnotationBox,
            PendingBox,
            BoxSize(size),
            Wireframe,
            WireframeColor {
                color: Color::srgb(1.0, 0.0, 0.0),
            },
            all_view_layers(),
            PickableIn(RenderLayers::layer(0)),
            Name::new("AnnotationBox"),
        ))
        .id();

    session.phase = SessionPhase::Placing { pending };
}

/// While placing, the pending box rides the pointer and drags the shared
/// focus with it, so the secondary views track the placement live.
pub fn update_pending_box(
    session: Res<AnnotationSession>,
    pointer: Res<PointerWorld>,
    mut focus: ResMut<FocusPoint>,
    mut transforms: Query<&mut Transform, With<PendingBox>>,
) {
    let Some(pending) = session.pending() else {
        return;
    };
    let Ok(mut transform) = transforms.get_mut(pending) else {
        return;
    };
    transform.translation = pointer.0;
    focus.0 = pointer.0;
}

/// Right-click inside the primary view fixes the pending box in place:
/// registry entry, corner markers, editor attachment. Right-clicks over the
/// secondary views or the toolbar leave the box pending. The box stays
/// unhighlighted until selected.
pub fn commit_pending_box(
    buttons: Res<ButtonInput<MouseButton>>,
    over_primary: Res<PointerOverPrimary>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut session: ResMut<AnnotationSession>,
    mut registry: ResMut<BoxRegistry>,
    mut editor: ResMut<TransformEditor>,
    boxes: Query<(&Transform, &BoxSize), With<PendingBox>>,
) {
    if !buttons.just_pressed(MouseButton::Right) || !over_primary.0 {
        return;
    }
    let Some(pending) = session.pending() else {
        return;
    };
    let Ok((transform, size)) = boxes.get(pending) else {
        return;
    };

    let corners = unique_box_corners(transform, size.0);
    spawn_vertex_markers(&mut commands, &mut meshes, &mut materials, &corners);

    commands.entity(pending).remove::<PendingBox>();
    registry.add(pending);
    editor.attach(pending, *transform);
    session.phase = SessionPhase::Idle;

    info!(
        "Committed annotation box at {:?}, {} boxes total",
        transform.translation,
        registry.len()
    );
}

/// Outside placement the secondary views frame the active box, wherever the
/// editor has dragged it.
pub fn mirror_focus_to_active(
    session: Res<AnnotationSession>,
    registry: Res<BoxRegistry>,
    mut focus: ResMut<FocusPoint>,
    transforms: Query<&Transform>,
) {
    if !session.is_idle() {
        return;
    }
    let Some(active) = registry.active() else {
        return;
    };
    if let Ok(transform) = transforms.get(active) {
        focus.0 = transform.translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::annotate::state::VertexMarker;

    fn test_world() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<FocusPoint>();
        world.init_resource::<PointerWorld>();
        world.init_resource::<AnnotationSession>();
        world.init_resource::<BoxRegistry>();
        world.init_resource::<TransformEditor>();
        world.init_resource::<Events<DrawBoxRequested>>();
        world.insert_resource(ButtonInput::<MouseButton>::default());
        world.insert_resource(PointerOverPrimary(true));
        world
    }

    fn placement_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems((begin_placement, update_pending_box, commit_pending_box).chain());
        schedule
    }

    fn press_right(world: &mut World) {
        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Right);
    }

    fn release_right(world: &mut World) {
        let mut buttons = world.resource_mut::<ButtonInput<MouseButton>>();
        buttons.release(MouseButton::Right);
        buttons.clear();
    }

    #[test]
    fn create_then_commit_registers_the_box_with_markers() {
        let mut world = test_world();
        let mut schedule = placement_schedule();

        world.resource_mut::<PointerWorld>().0 = Vec3::new(2.0, 0.0, 0.0);
        world.send_event(DrawBoxRequested);
        schedule.run(&mut world);

        let pending = world.resource::<AnnotationSession>().pending().unwrap();
        assert_eq!(
            world.get::<Transform>(pending).unwrap().translation,
            Vec3::new(2.0, 0.0, 0.0)
        );
        assert_eq!(world.resource::<FocusPoint>().0, Vec3::new(2.0, 0.0, 0.0));

        press_right(&mut world);
        schedule.run(&mut world);

        let registry = world.resource::<BoxRegistry>();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(pending));
        assert!(world.resource::<AnnotationSession>().is_idle());
        assert!(world.get::<PendingBox>(pending).is_none());
        assert_eq!(world.resource::<TransformEditor>().attached(), Some(pending));

        let mut markers = world.query_filtered::<(), With<VertexMarker>>();
        assert_eq!(markers.iter(&world).count(), 8);
    }

    #[test]
    fn pending_box_follows_the_pointer_and_commits_where_it_sits() {
        let mut world = test_world();
        let mut schedule = placement_schedule();

        world.send_event(DrawBoxRequested);
        schedule.run(&mut world);
        let pending = world.resource::<AnnotationSession>().pending().unwrap();

        world.resource_mut::<PointerWorld>().0 = Vec3::new(5.0, 1.0, 0.0);
        schedule.run(&mut world);
        assert_eq!(
            world.get::<Transform>(pending).unwrap().translation,
            Vec3::new(5.0, 1.0, 0.0)
        );

        press_right(&mut world);
        schedule.run(&mut world);
        release_right(&mut world);

        assert_eq!(
            world.get::<Transform>(pending).unwrap().translation,
            Vec3::new(5.0, 1.0, 0.0)
        );
        assert_eq!(world.resource::<BoxRegistry>().len(), 1);
    }

    #[test]
    fn right_click_outside_the_primary_view_leaves_the_box_pending() {
        let mut world = test_world();
        let mut schedule = placement_schedule();

        world.send_event(DrawBoxRequested);
        schedule.run(&mut world);
        let pending = world.resource::<AnnotationSession>().pending().unwrap();

        // Cursor over a secondary view or the toolbar.
        world.resource_mut::<PointerOverPrimary>().0 = false;
        press_right(&mut world);
        schedule.run(&mut world);

        assert_eq!(world.resource::<AnnotationSession>().pending(), Some(pending));
        assert!(world.resource::<BoxRegistry>().is_empty());
        assert!(world.get::<PendingBox>(pending).is_some());
        release_right(&mut world);

        // Back over the primary view the same gesture commits.
        world.resource_mut::<PointerOverPrimary>().0 = true;
        press_right(&mut world);
        schedule.run(&mut world);

        assert!(world.resource::<AnnotationSession>().is_idle());
        assert!(world.resource::<BoxRegistry>().contains(pending));
    }

    #[test]
    fn a_second_draw_request_discards_the_stale_pending_box() {
        let mut world = test_world();
        let mut schedule = placement_schedule();

        world.send_event(DrawBoxRequested);
        schedule.run(&mut world);
        let first = world.resource::<AnnotationSession>().pending().unwrap();

        world.send_event(DrawBoxRequested);
        schedule.run(&mut world);
        let second = world.resource::<AnnotationSession>().pending().unwrap();

        assert_ne!(first, second);
        assert!(world.get_entity(first).is_err());
        assert!(world.resource::<BoxRegistry>().is_empty());
    }
}
