use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::ids::{PhotoID, SectionID};

/// EXIF-derived display orientation of a master file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExifOrientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl ExifOrientation {
    /// Whether width and height swap when the photo is displayed.
    pub fn is_sideways(&self) -> bool {
        matches!(self, ExifOrientation::Left | ExifOrientation::Right)
    }
}

/// Lightweight photo reference for lists/sections.
///
/// Carries everything grid and detail views need without the fetched
/// detail/work payloads, which arrive separately per focused photo.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Photo {
    pub id: PhotoID,
    /// Directory holding the master file.
    pub master_dir: PathBuf,
    /// File name of the master within `master_dir`.
    pub master_filename: String,
    pub master_width: u32,
    pub master_height: u32,
    pub orientation: ExifOrientation,
    pub captured_at: DateTime<Utc>,
    pub flagged: bool,
    pub trashed: bool,
}

impl Photo {
    /// Full path of the master file.
    pub fn master_path(&self) -> PathBuf {
        self.master_dir.join(&self.master_filename)
    }

    /// The section this photo belongs to (its capture day).
    pub fn section_id(&self) -> SectionID {
        SectionID::for_day(self.captured_at.date_naive())
    }

    /// Display aspect ratio, orientation applied.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = if self.orientation.is_sideways() {
            (self.master_height, self.master_width)
        } else {
            (self.master_width, self.master_height)
        };
        if h == 0 {
            return 1.0;
        }
        w as f64 / h as f64
    }
}
