use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::ids::TagID;

/// A user-assigned tag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub id: TagID,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// An exported or edited rendition of a photo's master.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoVersion {
    pub master: PathBuf,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub output: Option<PathBuf>,
}

/// Per-photo payload fetched for the detail view: tags and versions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoDetail {
    pub tags: Vec<Tag>,
    pub versions: Vec<PhotoVersion>,
}

/// Crop rectangle in master-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Non-destructive edit state stored alongside a photo.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoWork {
    /// Quarter-turn rotations applied on top of the EXIF orientation.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub rotation_turns: Option<i8>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub tilt: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub crop: Option<CropRect>,
}

impl PhotoWork {
    /// Whether any edit has been recorded.
    pub fn is_edited(&self) -> bool {
        self.rotation_turns.is_some()
            || self.tilt.is_some()
            || self.crop.is_some()
    }
}
