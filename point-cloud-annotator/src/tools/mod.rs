/// Box annotation session, selection, and secondary-view interaction.
pub mod annotate;
/// Translate/rotate/scale manipulation of the active box.
pub mod transform_editor;
/// Toolbar panel and keyboard shortcuts.
pub mod ui;
