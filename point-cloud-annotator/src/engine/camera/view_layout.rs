use bevy::prelude::*;
use bevy::render::camera::{ScalingMode, Viewport};
use bevy::render::view::RenderLayers;
use bevy::window::{PrimaryWindow, WindowResized};
use constants::render_settings::{
    CAMERA_FAR, CAMERA_NEAR, DEFAULT_VIEW_ZOOM, PRIMARY_CAMERA_EYE, PRIMARY_CAMERA_FOV_DEGREES,
};
use constants::view_layout::{PRIMARY_HEIGHT_FRACTION, SECONDARY_VIEW_COLUMNS};

use super::sync::secondary_camera_pose;

/// Marker for the single perspective, user-navigable view. It is the only
/// view that receives picking and placement input.
#[derive(Component)]
pub struct PrimaryView;

/// Fixed cardinal viewing axis of an orthographic secondary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAxis {
    Front,
    Top,
    Side,
}

/// Orthographic view locked to one cardinal axis. Never receives direct
/// pointer-driven camera control, only programmatic re-aiming.
#[derive(Component)]
pub struct SecondaryView {
    pub axis: ViewAxis,
}

impl ViewAxis {
    pub const ALL: [ViewAxis; 3] = [ViewAxis::Front, ViewAxis::Top, ViewAxis::Side];

    /// Unit offset from the focus point towards the camera.
    pub fn offset(self) -> Vec3 {
        match self {
            ViewAxis::Front => Vec3::Z,
            ViewAxis::Top => Vec3::Y,
            ViewAxis::Side => Vec3::X,
        }
    }

    /// Fixed up vector used when aiming at the focus point.
    pub fn up(self) -> Vec3 {
        match self {
            ViewAxis::Front => Vec3::Y,
            ViewAxis::Top => Vec3::Z,
            ViewAxis::Side => Vec3::Z,
        }
    }

    /// Render layer reserved for this view.
    pub fn layer(self) -> usize {
        match self {
            ViewAxis::Front => 1,
            ViewAxis::Top => 2,
            ViewAxis::Side => 3,
        }
    }

    /// Column of this view in the bottom band, left to right.
    fn column(self) -> usize {
        match self {
            ViewAxis::Front => 0,
            ViewAxis::Top => 1,
            ViewAxis::Side => 2,
        }
    }
}

/// Pixel rectangle of one view inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRect {
    pub position: UVec2,
    pub size: UVec2,
}

impl ViewRect {
    fn clamped(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            position: UVec2::new(x, y),
            size: UVec2::new(width.max(1), height.max(1)),
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            physical_position: self.position,
            physical_size: self.size,
            ..default()
        }
    }
}

/// Rectangles for the primary view and the three secondary columns. The
/// primary takes the full width and the top height fraction; the secondaries
/// split the remaining band into equal-width columns. Degenerate window sizes
/// clamp to 1x1 rather than producing zero-area viewports.
pub fn layout_rects(width: u32, height: u32) -> (ViewRect, [ViewRect; 3]) {
    let primary_height = (height as f32 * PRIMARY_HEIGHT_FRACTION) as u32;
    let band_height = height.saturating_sub(primary_height);
    let column_width = width / SECONDARY_VIEW_COLUMNS;

    let primary = ViewRect::clamped(0, 0, width, primary_height);
    let secondaries: [ViewRect; 3] = std::array::from_fn(|column| {
        ViewRect::clamped(
            column as u32 * column_width,
            primary_height,
            column_width,
            band_height,
        )
    });

    (primary, secondaries)
}

/// Spawn the four view cameras: one perspective primary rendering layer 0 and
/// three orthographic secondaries, each bound to its own layer and viewport
/// rectangle.
pub fn spawn_view_cameras(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (primary_rect, secondary_rects) =
        layout_rects(window.physical_width(), window.physical_height());

    commands.spawn((
        PrimaryView,
        Camera3d::default(),
        Camera {
            order: 0,
            viewport: Some(primary_rect.viewport()),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: PRIMARY_CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(PRIMARY_CAMERA_EYE).looking_at(Vec3::ZERO, Vec3::Y),
        RenderLayers::layer(0),
        IsDefaultUiCamera,
        Name::new("PrimaryViewCamera"),
    ));

    for axis in ViewAxis::ALL {
        let rect = secondary_rects[axis.column()];
        commands.spawn((
            SecondaryView { axis },
            Camera3d::default(),
            Camera {
                order: axis.layer() as isize,
                viewport: Some(rect.viewport()),
                ..default()
            },
            Projection::Orthographic(OrthographicProjection {
                scaling_mode: ScalingMode::WindowSize,
                scale: 1.0 / DEFAULT_VIEW_ZOOM,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..OrthographicProjection::default_3d()
            }),
            secondary_camera_pose(axis, Vec3::ZERO),
            RenderLayers::layer(axis.layer()),
            Name::new(format!("{axis:?}ViewCamera")),
        ));
    }
}

/// Recompute every view rectangle after a window resize. Only the stored
/// viewports change; cameras consume them at the start of the next tick.
pub fn apply_view_layout(
    mut resize_events: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut primary: Query<&mut Camera, With<PrimaryView>>,
    mut secondaries: Query<(&mut Camera, &SecondaryView), Without<PrimaryView>>,
) {
    if resize_events.read().next().is_none() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let (primary_rect, secondary_rects) =
        layout_rects(window.physical_width(), window.physical_height());

    if let Ok(mut camera) = primary.single_mut() {
        camera.viewport = Some(primary_rect.viewport());
    }
    for (mut camera, view) in &mut secondaries {
        camera.viewport = Some(secondary_rects[view.axis.column()].viewport());
    }
}
