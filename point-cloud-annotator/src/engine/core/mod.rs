//! Core application setup.
//!
//! Builds the Bevy app, wires plugins and schedules, and configures the
//! window.

/// App construction and plugin configuration.
pub mod app_setup;

/// Window configuration for the annotator.
pub mod window_config;
