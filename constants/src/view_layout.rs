/// Fraction of the window height given to the primary perspective view.
pub const PRIMARY_HEIGHT_FRACTION: f32 = 0.7;

/// Number of equal-width orthographic columns in the bottom band.
pub const SECONDARY_VIEW_COLUMNS: u32 = 3;
