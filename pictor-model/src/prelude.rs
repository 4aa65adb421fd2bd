//! UI/state focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in pictor-core or other presentation layers.

pub use super::detail::{CropRect, PhotoDetail, PhotoVersion, PhotoWork, Tag};
pub use super::error::{ModelError, Result as ModelResult};
pub use super::ids::{PhotoID, SectionID, TagID};
pub use super::photo::{ExifOrientation, Photo};
pub use super::section::{
    LoadedPhotoSection, PhotoSection, PlaceholderSection,
};
