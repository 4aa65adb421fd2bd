//! Seams to the outside world: the remote data provider and error
//! presentation. Both are trait objects so transports and UI shells stay out
//! of the core.

use async_trait::async_trait;
use pictor_model::prelude::{Photo, PhotoDetail, PhotoID, PhotoWork};

/// Remote provider for per-photo payloads.
///
/// Both operations may fail independently; the detail updater combines them
/// and treats the pair as one unit of work.
#[async_trait]
pub trait PhotoFetcher: Send + Sync + 'static {
    async fn fetch_photo_detail(
        &self,
        photo_id: PhotoID,
    ) -> anyhow::Result<PhotoDetail>;

    async fn fetch_photo_work(&self, photo: &Photo)
    -> anyhow::Result<PhotoWork>;
}

/// Fire-and-forget error surface for genuine failures.
///
/// Cancelled work is never reported here.
pub trait ErrorPresenter: Send + Sync + 'static {
    fn show_error(&self, message: &str, error: Option<&anyhow::Error>);
}

/// Presenter that routes errors to the log. Default wiring for headless
/// consumers and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorPresenter;

impl ErrorPresenter for LogErrorPresenter {
    fn show_error(&self, message: &str, error: Option<&anyhow::Error>) {
        match error {
            Some(error) => log::error!("{message}: {error:#}"),
            None => log::error!("{message}"),
        }
    }
}
