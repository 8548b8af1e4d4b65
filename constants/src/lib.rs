pub mod render_settings;
pub mod view_layout;
