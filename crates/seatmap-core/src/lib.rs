pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod snapshot;
pub mod store;
pub mod viewport;

pub use config::{EditorConfig, MIN_SIZE};
pub use error::LayoutError;
pub use id::ElementId;
pub use model::*;
pub use snapshot::{InMemoryBackend, LayoutBackend, LayoutSnapshot};
pub use store::{ElementHandle, ElementStore};
pub use viewport::Viewport;

// Re-export kurbo geometry types so downstream crates share one version
pub use kurbo::{Line, Point, Rect, Size, Vec2};
