use std::collections::HashMap;

use crate::ids::{PhotoID, SectionID};
use crate::photo::Photo;

/// A section whose photos have been fetched.
///
/// `photo_ids` is the section's canonical display order; `photo_by_id` owns
/// the photo records. The two are kept consistent by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadedPhotoSection {
    pub id: SectionID,
    pub title: String,
    pub photo_ids: Vec<PhotoID>,
    pub photo_by_id: HashMap<PhotoID, Photo>,
}

impl LoadedPhotoSection {
    /// Build a loaded section from photos already in display order.
    pub fn new(id: SectionID, title: String, photos: Vec<Photo>) -> Self {
        let photo_ids: Vec<PhotoID> = photos.iter().map(|p| p.id).collect();
        let photo_by_id =
            photos.into_iter().map(|p| (p.id, p)).collect::<HashMap<_, _>>();
        Self {
            id,
            title,
            photo_ids,
            photo_by_id,
        }
    }

    pub fn photo_count(&self) -> usize {
        self.photo_ids.len()
    }

    /// Photo at a display position, if the position is valid.
    pub fn photo_at(&self, index: usize) -> Option<&Photo> {
        self.photo_ids
            .get(index)
            .and_then(|id| self.photo_by_id.get(id))
    }

    /// Display position of a photo id within this section.
    pub fn index_of(&self, photo_id: PhotoID) -> Option<usize> {
        self.photo_ids.iter().position(|id| *id == photo_id)
    }
}

/// A section known to exist but not yet fetched; only its size is known,
/// which is enough to reserve layout space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceholderSection {
    pub id: SectionID,
    pub title: String,
    pub count: usize,
}

/// A photo section in either lifecycle stage.
///
/// Created as `Placeholder` when the section index arrives, promoted to
/// `Loaded` once its photos are fetched. Never demoted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhotoSection {
    Loaded(LoadedPhotoSection),
    Placeholder(PlaceholderSection),
}

impl PhotoSection {
    pub fn id(&self) -> &SectionID {
        match self {
            PhotoSection::Loaded(section) => &section.id,
            PhotoSection::Placeholder(section) => &section.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PhotoSection::Loaded(section) => &section.title,
            PhotoSection::Placeholder(section) => &section.title,
        }
    }

    pub fn photo_count(&self) -> usize {
        match self {
            PhotoSection::Loaded(section) => section.photo_count(),
            PhotoSection::Placeholder(section) => section.count,
        }
    }

    /// Central narrowing accessor: the only supported way to get at a
    /// section's photos.
    pub fn as_loaded(&self) -> Option<&LoadedPhotoSection> {
        match self {
            PhotoSection::Loaded(section) => Some(section),
            PhotoSection::Placeholder(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PhotoSection::Loaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use std::path::PathBuf;

    fn photo(name: &str) -> Photo {
        Photo {
            id: PhotoID::new(),
            master_dir: PathBuf::from("/photos"),
            master_filename: name.to_string(),
            master_width: 400,
            master_height: 300,
            orientation: Default::default(),
            captured_at: Utc.with_ymd_and_hms(2018, 8, 15, 9, 0, 0).unwrap(),
            flagged: false,
            trashed: false,
        }
    }

    #[test]
    fn loaded_section_keeps_input_order() {
        let photos = vec![photo("a.jpg"), photo("b.jpg"), photo("c.jpg")];
        let ids: Vec<PhotoID> = photos.iter().map(|p| p.id).collect();
        let section = LoadedPhotoSection::new(
            SectionID::from_string("2018-08-15".to_string()).unwrap(),
            "2018-08-15".to_string(),
            photos,
        );
        assert_eq!(section.photo_ids, ids);
        assert_eq!(section.index_of(ids[1]), Some(1));
        assert_eq!(section.photo_at(2).map(|p| p.id), Some(ids[2]));
        assert_eq!(section.photo_at(3), None);
    }

    #[test]
    fn placeholder_exposes_count_but_no_photos() {
        let section = PhotoSection::Placeholder(PlaceholderSection {
            id: SectionID::from_string("2018-08-16".to_string()).unwrap(),
            title: "2018-08-16".to_string(),
            count: 14,
        });
        assert_eq!(section.photo_count(), 14);
        assert!(section.as_loaded().is_none());
        assert!(!section.is_loaded());
    }
}
