use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::render_settings::{DEFAULT_VIEW_ZOOM, VIEW_ZOOM_STEP};

// Resources

/// Shared 3D point the secondary cameras frame. Written by placement while a
/// box is pending, mirrored from the active box otherwise; holds its last
/// value when neither writer applies.
#[derive(Resource, Default)]
pub struct FocusPoint(pub Vec3);

/// Last pointer position projected onto the view plane. Updated on every
/// primary-view pointer move; creation gestures seed from it.
#[derive(Resource, Default)]
pub struct PointerWorld(pub Vec3);

/// Whether the cursor currently lies inside the primary view's rectangle.
/// Gestures bound to the primary view consult this instead of re-deriving
/// the viewport test.
#[derive(Resource, Default)]
pub struct PointerOverPrimary(pub bool);

/// Single zoom scalar shared by all orthographic views, mutated only by the
/// wheel handler and applied uniformly on the next synchronisation tick.
/// Bounds are intentionally unenforced pending a product decision.
#[derive(Resource)]
pub struct SharedViewZoom(pub f32);

impl Default for SharedViewZoom {
    fn default() -> Self {
        Self(DEFAULT_VIEW_ZOOM)
    }
}

impl SharedViewZoom {
    /// Fixed step per wheel event, direction taken from the scroll sign.
    pub fn apply_scroll(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.0 += VIEW_ZOOM_STEP;
        } else if delta_y < 0.0 {
            self.0 -= VIEW_ZOOM_STEP;
        }
    }
}

/// Lifecycle of the box currently being placed, if any.
#[derive(Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Placing {
        pending: Entity,
    },
}

/// State machine owning the pending annotation box. Only one box may be in
/// placement at a time; every transition either promotes the pending entity
/// into the registry or despawns it.
#[derive(Resource, Default)]
pub struct AnnotationSession {
    pub phase: SessionPhase,
}

impl AnnotationSession {
    pub fn pending(&self) -> Option<Entity> {
        match self.phase {
            SessionPhase::Placing { pending } => Some(pending),
            SessionPhase::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, SessionPhase::Idle)
    }
}

/// Component/colour changes the caller applies for one selection transition.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub deactivated: Option<Entity>,
    pub activated: Option<Entity>,
}

/// Committed annotation boxes and the single-active invariant.
#[derive(Resource, Default)]
pub struct BoxRegistry {
    boxes: Vec<Entity>,
    active: Option<Entity>,
}

impl BoxRegistry {
    pub fn add(&mut self, entity: Entity) {
        if !self.boxes.contains(&entity) {
            self.boxes.push(entity);
        }
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.boxes.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.boxes.iter().copied()
    }

    pub fn active(&self) -> Option<Entity> {
        self.active
    }

    /// Switch the active box, deactivating any previous one first.
    /// Re-selecting the current active box is a no-op. Activating an
    /// unregistered entity is an invariant violation: fatal in debug builds,
    /// ignored in release so the interaction loop keeps running.
    pub fn set_active(&mut self, entity: Option<Entity>) -> SelectionChange {
        if let Some(e) = entity {
            debug_assert!(self.boxes.contains(&e), "active box must be registered");
            if !self.boxes.contains(&e) {
                return SelectionChange::default();
            }
        }
        if self.active == entity {
            return SelectionChange::default();
        }

        let change = SelectionChange {
            deactivated: self.active,
            activated: entity,
        };
        self.active = entity;
        change
    }
}

// Components

/// An annotation volume, pending or committed.
#[derive(Component)]
pub struct AnnotationBox;

/// Dimensions fixed at creation. Placement never resizes a box; only the
/// transform editor changes its rendered extent afterwards, through scale.
#[derive(Component, Clone, Copy)]
pub struct BoxSize(pub Vec3);

/// Present while the box is owned by the session, before commit.
#[derive(Component)]
pub struct PendingBox;

/// The highlighted, editor-attached box. At most one exists at a time.
#[derive(Component)]
pub struct ActiveBox;

/// Corner indicator on a committed box, for secondary-view affordances.
#[derive(Component)]
pub struct VertexMarker;

/// Views allowed to hit-test this entity, as a layer mask. Render visibility
/// is the entity's `RenderLayers`; the two capability sets differ for
/// markers, which render and pick in secondary views only.
#[derive(Component, Clone)]
pub struct PickableIn(pub RenderLayers);
