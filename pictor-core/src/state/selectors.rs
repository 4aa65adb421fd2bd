//! Pure lookups over [`AppState`].
//!
//! Centralizes photo/section resolution and sequential navigation so
//! controllers and update handlers can stay simple and consistent.

use std::sync::Arc;

use pictor_model::prelude::{
    LoadedPhotoSection, Photo, PhotoID, PhotoSection, SectionID, TagID,
};

use crate::constants::navigation::PRELOAD_LOOKAHEAD_SECTIONS;
use crate::memo::IdentityMemo;

use super::AppState;

/// The single narrowing point from a section id to loaded contents.
pub fn get_loaded_section_by_id<'a>(
    state: &'a AppState,
    section_id: &SectionID,
) -> Option<&'a LoadedPhotoSection> {
    state
        .data
        .sections
        .get(section_id)
        .and_then(PhotoSection::as_loaded)
}

pub fn get_photo_by_index<'a>(
    state: &'a AppState,
    section_id: &SectionID,
    photo_index: usize,
) -> Option<&'a Photo> {
    get_loaded_section_by_id(state, section_id)
        .and_then(|section| section.photo_at(photo_index))
}

pub fn get_photo_by_id<'a>(
    state: &'a AppState,
    section_id: &SectionID,
    photo_id: PhotoID,
) -> Option<&'a Photo> {
    get_loaded_section_by_id(state, section_id)
        .and_then(|section| section.photo_by_id.get(&photo_id))
}

/// Result of a sequential navigation step.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborPhoto {
    pub section_id: SectionID,
    pub photo_id: PhotoID,
    /// Section to start prefetching, set only when forward navigation enters
    /// a new section.
    pub preload_section_id: Option<SectionID>,
}

/// Neighbor in display order after `(section_id, photo_index)`, or `None` at
/// the end of the loaded range.
pub fn get_next_photo(
    state: &AppState,
    section_id: &SectionID,
    photo_index: usize,
) -> Option<NeighborPhoto> {
    let section = get_loaded_section_by_id(state, section_id)?;
    if let Some(id) = section.photo_ids.get(photo_index + 1) {
        return Some(NeighborPhoto {
            section_id: section_id.clone(),
            photo_id: *id,
            preload_section_id: None,
        });
    }

    // Jump to the next section in global order, if it is loaded. An unloaded
    // neighbor is assumed to be loading already; navigation never initiates
    // a load itself.
    let ids = &state.data.sections.ids;
    let curr_index = ids.iter().position(|id| id == section_id)?;
    let next_id = ids.get(curr_index + 1)?;
    let next_section = get_loaded_section_by_id(state, next_id)?;
    let first = *next_section.photo_ids.first()?;

    // When moving from section A to B, start preloading section C.
    let preload_section_id =
        ids.get(curr_index + PRELOAD_LOOKAHEAD_SECTIONS).cloned();

    Some(NeighborPhoto {
        section_id: next_id.clone(),
        photo_id: first,
        preload_section_id,
    })
}

/// Neighbor in display order before `(section_id, photo_index)`, or `None`
/// at the start of the loaded range. Backward navigation never preloads.
pub fn get_prev_photo(
    state: &AppState,
    section_id: &SectionID,
    photo_index: usize,
) -> Option<NeighborPhoto> {
    if photo_index > 0 {
        let section = get_loaded_section_by_id(state, section_id)?;
        let id = *section.photo_ids.get(photo_index - 1)?;
        return Some(NeighborPhoto {
            section_id: section_id.clone(),
            photo_id: id,
            preload_section_id: None,
        });
    }

    let ids = &state.data.sections.ids;
    let curr_index = ids.iter().position(|id| id == section_id)?;
    let prev_id = ids.get(curr_index.checked_sub(1)?)?;
    let prev_section = get_loaded_section_by_id(state, prev_id)?;
    let last = *prev_section.photo_ids.last()?;

    Some(NeighborPhoto {
        section_id: prev_id.clone(),
        photo_id: last,
        preload_section_id: None,
    })
}

/// Derived tag-title list, cached by identity of the tag id list.
///
/// Owned by whoever renders tag titles; independent instances do not share
/// cache state.
#[derive(Debug, Default)]
pub struct TagTitleSelector {
    memo: IdentityMemo<Vec<TagID>, Vec<String>>,
}

impl TagTitleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self, state: &AppState) -> Arc<Vec<String>> {
        let tags = &state.data.tags;
        self.memo.get_or_compute(&tags.ids, |ids| {
            ids.iter()
                .filter_map(|id| tags.by_id.get(id))
                .map(|tag| tag.title.clone())
                .collect()
        })
    }
}
