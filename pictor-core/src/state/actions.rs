//! Actions accepted by the store's single mutation entry point.

use pictor_model::prelude::{
    Photo, PhotoDetail, PhotoID, PhotoWork, SectionID, Tag,
};

/// A committed mutation of [`super::AppState`].
#[derive(Clone)]
pub enum Action {
    /// Focus a photo for the detail view. `photo_index` must be the photo's
    /// position in its section's ordered id list.
    SetDetailPhoto {
        section_id: SectionID,
        photo_index: usize,
        photo_id: PhotoID,
    },
    /// Leave the detail view.
    CloseDetail,

    // Detail payload fetch lifecycle
    FetchDetailRequested(PhotoID),
    FetchDetailSucceeded {
        photo_id: PhotoID,
        detail: PhotoDetail,
        work: PhotoWork,
    },
    FetchDetailFailed {
        photo_id: PhotoID,
        error: String,
    },

    /// Ask external loaders to fetch sections ahead of the user.
    FetchSectionPhotos {
        section_ids: Vec<SectionID>,
        photo_id_hints: Vec<PhotoID>,
    },
    /// A section's photos arrived; promotes a placeholder to loaded.
    SectionPhotosLoaded {
        section_id: SectionID,
        photos: Vec<Photo>,
    },

    /// Replace the tag table.
    TagsLoaded(Vec<Tag>),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetDetailPhoto {
                section_id,
                photo_index,
                photo_id,
            } => {
                write!(
                    f,
                    "Action::SetDetailPhoto({section_id}, {photo_index}, {photo_id})"
                )
            }
            Self::CloseDetail => write!(f, "Action::CloseDetail"),
            Self::FetchDetailRequested(photo_id) => {
                write!(f, "Action::FetchDetailRequested({photo_id})")
            }
            Self::FetchDetailSucceeded { photo_id, .. } => {
                write!(f, "Action::FetchDetailSucceeded({photo_id})")
            }
            Self::FetchDetailFailed { photo_id, error } => {
                write!(f, "Action::FetchDetailFailed({photo_id}, {error:?})")
            }
            Self::FetchSectionPhotos {
                section_ids,
                photo_id_hints,
            } => {
                write!(
                    f,
                    "Action::FetchSectionPhotos({} sections, {} hints)",
                    section_ids.len(),
                    photo_id_hints.len()
                )
            }
            Self::SectionPhotosLoaded { section_id, photos } => {
                write!(
                    f,
                    "Action::SectionPhotosLoaded({section_id}, {} photos)",
                    photos.len()
                )
            }
            Self::TagsLoaded(tags) => {
                write!(f, "Action::TagsLoaded({} tags)", tags.len())
            }
        }
    }
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetDetailPhoto { .. } => "SetDetailPhoto",
            Self::CloseDetail => "CloseDetail",
            Self::FetchDetailRequested(_) => "FetchDetailRequested",
            Self::FetchDetailSucceeded { .. } => "FetchDetailSucceeded",
            Self::FetchDetailFailed { .. } => "FetchDetailFailed",
            Self::FetchSectionPhotos { .. } => "FetchSectionPhotos",
            Self::SectionPhotosLoaded { .. } => "SectionPhotosLoaded",
            Self::TagsLoaded(_) => "TagsLoaded",
        }
    }
}
