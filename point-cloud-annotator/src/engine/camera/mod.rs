/// Orbit-style navigation for the primary view, suspendable during edits.
pub mod navigation;

/// Per-tick re-aiming of the orthographic cameras around the focus point.
pub mod sync;

/// View descriptors, pixel rectangles, and camera spawning.
pub mod view_layout;
