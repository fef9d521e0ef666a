pub mod excerpt;
pub mod truncator;

pub use excerpt::Excerpt;
pub use truncator::{BoundKind, Bounds, truncate};
