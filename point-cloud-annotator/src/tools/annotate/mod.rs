//! Interactive box annotation: placement session, commit, selection, vertex
//! markers, and the shared-focus synchronisation of the secondary views.

pub mod markers;
pub mod placement;
pub mod secondary;
pub mod selection;
pub mod state;

use bevy::prelude::*;

use crate::engine::camera::navigation::{
    navigation_controller, NavigationController, NavigationResetEvent,
};
use crate::engine::camera::sync::sync_secondary_cameras;
use crate::tools::transform_editor::{
    editor_keyboard_commands, manipulate_attached_box, reflect_editor_drag, TransformEditor,
};

use placement::{
    begin_placement, commit_pending_box, mirror_focus_to_active, track_pointer_world,
    update_pending_box, DrawBoxRequested,
};
use secondary::{adjust_view_zoom, hover_vertex_markers};
use selection::select_box_on_click;
use state::{
    AnnotationSession, BoxRegistry, FocusPoint, PointerOverPrimary, PointerWorld, SharedViewZoom,
};

/// Wires the whole annotation loop. Systems run as one ordered chain because
/// each stage consumes state the previous one wrote within the same tick:
/// pointer tracking feeds placement, placement and selection feed the focus,
/// and camera synchronisation consumes the final focus and zoom.
pub struct AnnotatePlugin;

impl Plugin for AnnotatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FocusPoint>()
            .init_resource::<PointerWorld>()
            .init_resource::<PointerOverPrimary>()
            .init_resource::<SharedViewZoom>()
            .init_resource::<AnnotationSession>()
            .init_resource::<BoxRegistry>()
            .init_resource::<TransformEditor>()
            .init_resource::<NavigationController>()
            .add_event::<DrawBoxRequested>()
            .add_event::<NavigationResetEvent>()
            .add_systems(
                Update,
                (
                    track_pointer_world,
                    adjust_view_zoom,
                    begin_placement,
                    update_pending_box,
                    commit_pending_box,
                    select_box_on_click,
                    editor_keyboard_commands,
                    manipulate_attached_box,
                    reflect_editor_drag,
                    navigation_controller,
                    hover_vertex_markers,
                    mirror_focus_to_active,
                    sync_secondary_cameras,
                )
                    .chain(),
            );
    }
}
