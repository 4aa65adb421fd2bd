//! Core data model definitions shared across Pictor crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod detail;
pub mod error;
pub mod ids;
pub mod photo;
pub mod prelude;
pub mod section;

// Intentionally curated re-exports for downstream consumers.
pub use detail::{CropRect, PhotoDetail, PhotoVersion, PhotoWork, Tag};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{PhotoID, SectionID, TagID};
pub use photo::{ExifOrientation, Photo};
pub use section::{LoadedPhotoSection, PhotoSection, PlaceholderSection};
