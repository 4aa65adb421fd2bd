//! Application state: the data shapes the scheduler and navigation operate
//! on, the store that owns them, and the reducer that mutates them.

pub mod actions;
pub mod selectors;
pub mod store;
pub mod update;

use std::collections::HashMap;
use std::sync::Arc;

use pictor_model::prelude::{
    PhotoDetail, PhotoID, PhotoSection, PhotoWork, SectionID, Tag, TagID,
};

/// Lifecycle of the focused photo's fetched payloads.
///
/// Reset to `Idle` is owned by the reducer when focus moves to a different
/// photo; the scheduler only ever drives `Idle -> Loading -> Success/Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// The focused photo and everything fetched for it.
///
/// `photo_index` is redundant with `photo_id` but cached for O(1) neighbor
/// lookups; it is recomputed from the owning section's ordered id list
/// whenever focus is set by id.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPhoto {
    pub section_id: SectionID,
    pub photo_index: usize,
    pub photo_id: PhotoID,
    pub photo_detail: Option<PhotoDetail>,
    pub photo_work: Option<PhotoWork>,
    pub fetch_state: FetchState,
}

/// Detail-view state; present only while a photo is focused.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub current: CurrentPhoto,
}

/// The globally ordered, lazily loaded section collection.
#[derive(Debug, Clone, Default)]
pub struct SectionCollection {
    /// Global section order. Stable for the lifetime of a snapshot; changes
    /// only when new data arrives, never through navigation.
    pub ids: Vec<SectionID>,
    pub by_id: HashMap<SectionID, PhotoSection>,
}

impl SectionCollection {
    /// Insert a section, appending its id to the global order when new.
    pub fn insert(&mut self, section: PhotoSection) {
        let id = section.id().clone();
        if !self.by_id.contains_key(&id) {
            self.ids.push(id.clone());
        }
        self.by_id.insert(id, section);
    }

    pub fn get(&self, id: &SectionID) -> Option<&PhotoSection> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Tag table. The id list is held behind an `Arc` so derived caches can key
/// on its identity.
#[derive(Debug, Clone)]
pub struct TagState {
    pub ids: Arc<Vec<TagID>>,
    pub by_id: HashMap<TagID, Tag>,
}

impl Default for TagState {
    fn default() -> Self {
        Self {
            ids: Arc::new(Vec::new()),
            by_id: HashMap::new(),
        }
    }
}

/// Loaded library data.
#[derive(Debug, Clone, Default)]
pub struct DataState {
    pub sections: SectionCollection,
    pub tags: TagState,
    /// Section ids requested for preload and not yet delivered. External
    /// loaders drain this list; `SectionPhotosLoaded` clears entries.
    pub pending_sections: Vec<SectionID>,
}

/// Root application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub data: DataState,
    pub detail: Option<DetailState>,
}
