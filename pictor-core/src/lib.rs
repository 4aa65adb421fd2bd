//! # Pictor Core
//!
//! State core for the Pictor photo application: a single-writer state store
//! with ordered change notification, a single-flight serial update
//! scheduler, and sequential navigation with anticipatory section preload
//! across a lazily loaded, date-sectioned photo collection.
//!
//! ## Overview
//!
//! - [`state::store::Store`]: the single source of truth. All mutation goes
//!   through [`state::store::Store::dispatch`]; subscribers observe every
//!   committed mutation in order.
//! - [`updater::SerialUpdater`]: derives comparable parameters from each
//!   state change and keeps at most one asynchronous run outstanding,
//!   cancelling superseded runs so stale outcomes are never applied.
//! - [`state::selectors`]: pure lookups, including the prev/next photo
//!   resolver that walks section boundaries and computes forward preloads.
//! - [`detail::DetailController`]: the detail-view use case wiring all of
//!   the above to a [`fetch::PhotoFetcher`] transport.
//!
//! Rendering, transports, and persistence live outside this crate, behind
//! the traits in [`fetch`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pictor_core::{
//!     AppState, DetailController, LogErrorPresenter, PhotoFetcher, Store,
//! };
//!
//! async fn wire(fetcher: Arc<dyn PhotoFetcher>) -> DetailController {
//!     let store = Arc::new(Store::new(AppState::default()));
//!     DetailController::new(store, fetcher, Arc::new(LogErrorPresenter))
//! }
//! ```

pub mod constants;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod memo;
pub mod state;
pub mod updater;

pub use detail::{DetailController, DetailParams};
pub use error::{PictorError, Result};
pub use fetch::{ErrorPresenter, LogErrorPresenter, PhotoFetcher};
pub use memo::IdentityMemo;
pub use state::actions::Action;
pub use state::selectors::{NeighborPhoto, TagTitleSelector};
pub use state::store::{Store, StoreSubscriber};
pub use state::{
    AppState, CurrentPhoto, DataState, DetailState, FetchState,
    SectionCollection, TagState,
};
pub use updater::{Derived, RunContext, SerialUpdater, UpdateDriver};
