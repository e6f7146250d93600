pub mod constants;
pub mod error;
pub mod geometry;
pub mod id;
pub mod length;
pub mod model;
pub mod params;
pub mod resolve;

pub use error::ConfigError;
pub use geometry::{EdgeProximity, SurfaceBox, clamp};
pub use id::PresetId;
pub use model::*;
pub use params::{ResizeConstraints, ResizrParameters};
pub use resolve::{PresetGroups, Selection, group_by_category, resolve_selection};

// Re-export kurbo types so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect};
