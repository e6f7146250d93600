//! Addon identifiers, store keys, and interaction tuning values.

pub const ADDON_ID: &str = "storybook-addon-resizr";
pub const TOOL_ID: &str = "storybook-addon-resizr/tool";
pub const PREVIEW_ID: &str = "storybook-addon-resizr/preview";

/// Key under which per-story parameters are supplied by the host.
pub const PARAM_KEY: &str = "resizr";

/// Channel event carrying the pending (not persisted) size.
pub const PENDING_SIZE_CHANGED: &str = "storybook-addon-resizr/pending-size-changed";

/// Persisted store keys. Both hold a number or `null`.
pub const WIDTH_KEY: &str = "resizrWidth";
pub const HEIGHT_KEY: &str = "resizrHeight";

/// Synthetic selection ids that never name a real preset.
pub const RESET_ID: &str = "reset";
pub const CUSTOM_ID: &str = "custom";

pub const DEFAULT_MIN_WIDTH: u32 = 200;
pub const DEFAULT_MIN_HEIGHT: u32 = 200;

/// Start size used when the surface can't be measured.
pub const FALLBACK_WIDTH: u32 = 800;
pub const FALLBACK_HEIGHT: u32 = 600;

/// Distance (px) from an edge within which handles light up.
pub const EDGE_THRESHOLD: f64 = 20.0;

/// Symmetry tolerance and minimum margin (px) for the centered-layout test.
pub const CENTER_TOLERANCE: f64 = 5.0;
