pub mod detector;
pub mod types;

pub use detector::{movement, separation, signed_gap, AspectDetector};
pub use types::{AspectKind, AspectMatch, Movement, OrbConfig, OrbEntry};
