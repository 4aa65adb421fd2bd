//! The reducer: every action handled in one place, mutating [`AppState`].

use pictor_model::prelude::{
    LoadedPhotoSection, Photo, PhotoDetail, PhotoID, PhotoSection, PhotoWork,
    SectionID, Tag,
};
use std::sync::Arc;

use super::actions::Action;
use super::{AppState, CurrentPhoto, DetailState, FetchState};

/// Apply one action. Infallible: bad or stale actions degrade to logged
/// no-ops so the store stays usable.
pub fn update(state: &mut AppState, action: Action) {
    match action {
        Action::SetDetailPhoto {
            section_id,
            photo_index,
            photo_id,
        } => set_detail_photo(state, section_id, photo_index, photo_id),
        Action::CloseDetail => {
            state.detail = None;
        }
        Action::FetchDetailRequested(photo_id) => {
            fetch_detail_requested(state, photo_id)
        }
        Action::FetchDetailSucceeded {
            photo_id,
            detail,
            work,
        } => fetch_detail_succeeded(state, photo_id, detail, work),
        Action::FetchDetailFailed { photo_id, error } => {
            fetch_detail_failed(state, photo_id, error)
        }
        Action::FetchSectionPhotos {
            section_ids,
            photo_id_hints,
        } => fetch_section_photos(state, section_ids, photo_id_hints),
        Action::SectionPhotosLoaded { section_id, photos } => {
            section_photos_loaded(state, section_id, photos)
        }
        Action::TagsLoaded(tags) => tags_loaded(state, tags),
    }
}

fn set_detail_photo(
    state: &mut AppState,
    section_id: SectionID,
    photo_index: usize,
    photo_id: PhotoID,
) {
    if let Some(detail) = &state.detail
        && detail.current.section_id == section_id
        && detail.current.photo_id == photo_id
    {
        // Already focused: keep payloads and fetch state untouched.
        return;
    }
    state.detail = Some(DetailState {
        current: CurrentPhoto {
            section_id,
            photo_index,
            photo_id,
            photo_detail: None,
            photo_work: None,
            fetch_state: FetchState::Idle,
        },
    });
}

fn fetch_detail_requested(state: &mut AppState, photo_id: PhotoID) {
    match &mut state.detail {
        Some(detail) if detail.current.photo_id == photo_id => {
            detail.current.fetch_state = FetchState::Loading;
        }
        _ => {
            log::debug!("ignoring fetch request for unfocused photo {photo_id}")
        }
    }
}

fn fetch_detail_succeeded(
    state: &mut AppState,
    photo_id: PhotoID,
    detail: PhotoDetail,
    work: PhotoWork,
) {
    match &mut state.detail {
        Some(detail_state) if detail_state.current.photo_id == photo_id => {
            detail_state.current.photo_detail = Some(detail);
            detail_state.current.photo_work = Some(work);
            detail_state.current.fetch_state = FetchState::Success;
        }
        _ => log::debug!("ignoring detail payload for unfocused photo {photo_id}"),
    }
}

fn fetch_detail_failed(state: &mut AppState, photo_id: PhotoID, error: String) {
    match &mut state.detail {
        Some(detail) if detail.current.photo_id == photo_id => {
            log::warn!("detail fetch failed for {photo_id}: {error}");
            detail.current.fetch_state = FetchState::Failure;
        }
        _ => log::debug!(
            "ignoring fetch failure for unfocused photo {photo_id}: {error}"
        ),
    }
}

fn fetch_section_photos(
    state: &mut AppState,
    section_ids: Vec<SectionID>,
    photo_id_hints: Vec<PhotoID>,
) {
    if !photo_id_hints.is_empty() {
        log::trace!("section fetch carries {} photo hints", photo_id_hints.len());
    }
    for section_id in section_ids {
        let already_loaded = state
            .data
            .sections
            .get(&section_id)
            .is_some_and(PhotoSection::is_loaded);
        if already_loaded
            || state.data.pending_sections.contains(&section_id)
        {
            continue;
        }
        log::debug!("section {section_id} queued for load");
        state.data.pending_sections.push(section_id);
    }
}

fn section_photos_loaded(
    state: &mut AppState,
    section_id: SectionID,
    photos: Vec<Photo>,
) {
    state.data.pending_sections.retain(|id| *id != section_id);

    let title = state
        .data
        .sections
        .get(&section_id)
        .map(|section| section.title().to_string())
        .unwrap_or_else(|| section_id.as_str().to_string());
    let loaded =
        LoadedPhotoSection::new(section_id.clone(), title, photos);
    log::debug!(
        "section {section_id} loaded with {} photos",
        loaded.photo_count()
    );
    state.data.sections.insert(PhotoSection::Loaded(loaded));

    // Focus may index into the reloaded section; recompute the cached index
    // from the new id order, or drop focus when the photo is gone.
    let focused_id = state.detail.as_ref().and_then(|detail| {
        (detail.current.section_id == section_id)
            .then_some(detail.current.photo_id)
    });
    if let Some(focused_id) = focused_id {
        let index = state
            .data
            .sections
            .get(&section_id)
            .and_then(PhotoSection::as_loaded)
            .and_then(|section| section.index_of(focused_id));
        match (index, &mut state.detail) {
            (Some(index), Some(detail)) => {
                detail.current.photo_index = index;
            }
            _ => {
                log::debug!(
                    "focused photo {focused_id} vanished from reloaded section {section_id}"
                );
                state.detail = None;
            }
        }
    }
}

fn tags_loaded(state: &mut AppState, tags: Vec<Tag>) {
    let ids: Vec<_> = tags.iter().map(|tag| tag.id).collect();
    state.data.tags.ids = Arc::new(ids);
    state.data.tags.by_id = tags.into_iter().map(|tag| (tag.id, tag)).collect();
}
