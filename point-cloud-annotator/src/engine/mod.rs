/// Multi-view camera ownership: viewport layout, secondary-view
/// synchronisation, and orbit navigation for the primary view.
pub mod camera;

/// Application assembly and window configuration.
pub mod core;

/// Asynchronous point-cloud asset loading.
pub mod loading;

/// Pointer-to-world conversion and ray intersection tests.
pub mod picking;

/// Static scene content shared by every view.
pub mod scene;
