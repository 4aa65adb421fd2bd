//! Shared fixtures for pictor-core integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use pictor_core::{AppState, PhotoFetcher, Store};
use pictor_model::prelude::{
    LoadedPhotoSection, Photo, PhotoDetail, PhotoID, PhotoSection, PhotoWork,
    PlaceholderSection, SectionID, Tag,
};
use tokio::sync::Notify;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn day(id: &str) -> SectionID {
    SectionID::from_string(id.to_string()).expect("valid day key")
}

pub fn photo(name: &str) -> Photo {
    Photo {
        id: PhotoID::new(),
        master_dir: PathBuf::from("/photos/2018"),
        master_filename: name.to_string(),
        master_width: 4000,
        master_height: 3000,
        orientation: Default::default(),
        captured_at: Utc.with_ymd_and_hms(2018, 8, 15, 9, 0, 0).unwrap(),
        flagged: false,
        trashed: false,
    }
}

pub fn photos(names: &[&str]) -> Vec<Photo> {
    names.iter().map(|name| photo(name)).collect()
}

pub fn loaded_section(id: &SectionID, photos: Vec<Photo>) -> PhotoSection {
    PhotoSection::Loaded(LoadedPhotoSection::new(
        id.clone(),
        id.as_str().to_string(),
        photos,
    ))
}

pub fn placeholder_section(id: &SectionID, count: usize) -> PhotoSection {
    PhotoSection::Placeholder(PlaceholderSection {
        id: id.clone(),
        title: id.as_str().to_string(),
        count,
    })
}

/// The canonical boundary fixture: three sections in global order.
/// S0 loaded with 3 photos, S1 loaded with 2, S2 a placeholder.
pub struct BoundaryFixture {
    pub state: AppState,
    pub s0: SectionID,
    pub s1: SectionID,
    pub s2: SectionID,
    pub s0_photos: Vec<Photo>,
    pub s1_photos: Vec<Photo>,
}

pub fn boundary_fixture() -> BoundaryFixture {
    let s0 = day("2018-08-15");
    let s1 = day("2018-08-16");
    let s2 = day("2018-08-17");
    let s0_photos = photos(&["a.jpg", "b.jpg", "c.jpg"]);
    let s1_photos = photos(&["d.jpg", "e.jpg"]);

    let mut state = AppState::default();
    state.data.sections.insert(loaded_section(&s0, s0_photos.clone()));
    state.data.sections.insert(loaded_section(&s1, s1_photos.clone()));
    state.data.sections.insert(placeholder_section(&s2, 14));

    BoundaryFixture {
        state,
        s0,
        s1,
        s2,
        s0_photos,
        s1_photos,
    }
}

pub fn tag(title: &str) -> Tag {
    Tag {
        id: pictor_model::ids::TagID::new(),
        title: title.to_string(),
        created_at: Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Poll the store until `pred` holds, or panic after a generous timeout.
pub async fn wait_until(
    store: &Arc<Store>,
    mut pred: impl FnMut(&AppState) -> bool,
) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if store.with_state(|state| pred(state)) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("store never reached the expected state");
}

/// Fetcher whose per-photo completion is held behind gates, so tests control
/// exactly when each fetch resolves. Ungated photos resolve immediately.
///
/// Returned details carry a `detail-<photo id>` tag so tests can tell whose
/// payload landed in state.
pub struct GatedFetcher {
    started: Mutex<Vec<PhotoID>>,
    gates: Mutex<Vec<(PhotoID, Arc<Notify>)>>,
    fail: Mutex<Vec<PhotoID>>,
    fail_work: Mutex<Vec<PhotoID>>,
    detail_calls: AtomicUsize,
}

impl GatedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Mutex::new(Vec::new()),
            gates: Mutex::new(Vec::new()),
            fail: Mutex::new(Vec::new()),
            fail_work: Mutex::new(Vec::new()),
            detail_calls: AtomicUsize::new(0),
        })
    }

    /// Hold the given photo's detail fetch until [`GatedFetcher::release`].
    pub fn gate(&self, photo_id: PhotoID) {
        self.gates.lock().push((photo_id, Arc::new(Notify::new())));
    }

    pub fn release(&self, photo_id: PhotoID) {
        if let Some((_, gate)) = self
            .gates
            .lock()
            .iter()
            .find(|(id, _)| *id == photo_id)
        {
            gate.notify_one();
        }
    }

    /// Make the given photo's detail fetch fail once it is released.
    pub fn fail_detail(&self, photo_id: PhotoID) {
        self.fail.lock().push(photo_id);
    }

    /// Make the given photo's work fetch fail. The detail half still
    /// succeeds, so this exercises the both-must-succeed rule.
    pub fn fail_work(&self, photo_id: PhotoID) {
        self.fail_work.lock().push(photo_id);
    }

    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Wait until the detail fetch for the given photo has started.
    pub async fn wait_started(&self, photo_id: PhotoID) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if self.started.lock().contains(&photo_id) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("fetch never started");
    }
}

pub fn detail_marker(photo_id: PhotoID) -> String {
    format!("detail-{photo_id}")
}

#[async_trait]
impl PhotoFetcher for GatedFetcher {
    async fn fetch_photo_detail(
        &self,
        photo_id: PhotoID,
    ) -> anyhow::Result<PhotoDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.started.lock().push(photo_id);

        let gate = self
            .gates
            .lock()
            .iter()
            .find(|(id, _)| *id == photo_id)
            .map(|(_, gate)| Arc::clone(gate));
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail.lock().contains(&photo_id) {
            anyhow::bail!("simulated detail fetch failure for {photo_id}");
        }
        Ok(PhotoDetail {
            tags: vec![tag(&detail_marker(photo_id))],
            versions: Vec::new(),
        })
    }

    async fn fetch_photo_work(
        &self,
        photo: &Photo,
    ) -> anyhow::Result<PhotoWork> {
        if self.fail_work.lock().contains(&photo.id) {
            anyhow::bail!("simulated work fetch failure for {}", photo.id);
        }
        Ok(PhotoWork::default())
    }
}
