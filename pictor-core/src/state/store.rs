//! Single source of truth for application state.
//!
//! All mutation is serialized through [`Store::dispatch`], which holds the
//! state lock across reduce and notify. Subscribers therefore observe every
//! committed mutation exactly once, in mutation order.

use std::fmt;
use std::sync::Weak;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::actions::Action;
use super::{AppState, update};

/// Components notified after every committed mutation.
///
/// Notification happens while the dispatch lock is held, which is what gives
/// in-order delivery. Implementations must read only the borrowed state and
/// must not dispatch synchronously; hand further work to the runtime instead.
pub trait StoreSubscriber: Send + Sync {
    fn on_state_changed(&self, state: &AppState);
}

/// The state container plus its listener registry.
pub struct Store {
    state: Mutex<AppState>,
    subscribers: Mutex<Vec<Weak<dyn StoreSubscriber>>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Mutex::new(initial),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to state changes. Dropping the subscriber's `Arc` is the
    /// unsubscribe; dead entries are pruned during notification.
    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber>) {
        self.subscribers.lock().push(subscriber);
    }

    /// Read the current state under the dispatch lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    /// Apply an action and notify subscribers.
    pub fn dispatch(&self, action: Action) {
        let mut state = self.state.lock();
        log::trace!("dispatch {:?}", action);
        update::update(&mut state, action);
        self.notify(&state);
    }

    /// Apply an action unless `token` has been cancelled.
    ///
    /// The check happens inside the dispatch critical section, so a
    /// cancellation issued by a subscriber (which runs under the same lock)
    /// can never race with the application of a superseded outcome. Returns
    /// whether the action was applied.
    pub fn dispatch_guarded(
        &self,
        token: &CancellationToken,
        action: Action,
    ) -> bool {
        let mut state = self.state.lock();
        if token.is_cancelled() {
            log::trace!("dropping superseded {}", action.name());
            return false;
        }
        log::trace!("dispatch {:?}", action);
        update::update(&mut state, action);
        self.notify(&state);
        true
    }

    fn notify(&self, state: &AppState) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|weak| match weak.upgrade() {
            Some(subscriber) => {
                subscriber.on_state_changed(state);
                true
            }
            None => false,
        });
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("subscriber_count", &self.subscribers.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FetchState;
    use pictor_model::prelude::{
        LoadedPhotoSection, PhotoSection, SectionID,
    };
    use std::sync::Arc;

    struct Recorder {
        seen: Mutex<Vec<&'static str>>,
    }

    impl StoreSubscriber for Recorder {
        fn on_state_changed(&self, state: &AppState) {
            let label = match &state.detail {
                Some(detail) => match detail.current.fetch_state {
                    FetchState::Idle => "focused",
                    FetchState::Loading => "loading",
                    FetchState::Success => "success",
                    FetchState::Failure => "failure",
                },
                None => "closed",
            };
            self.seen.lock().push(label);
        }
    }

    fn section_with_one_photo() -> (PhotoSection, super::super::CurrentPhoto) {
        let photo = crate::state::update::tests::photo("solo.jpg");
        let section_id = SectionID::from_string("2018-08-15".to_string())
            .expect("valid day key");
        let section = LoadedPhotoSection::new(
            section_id.clone(),
            section_id.as_str().to_string(),
            vec![photo.clone()],
        );
        let current = super::super::CurrentPhoto {
            section_id,
            photo_index: 0,
            photo_id: photo.id,
            photo_detail: None,
            photo_work: None,
            fetch_state: FetchState::Idle,
        };
        (PhotoSection::Loaded(section), current)
    }

    #[test]
    fn subscribers_see_every_mutation_in_order() {
        let (section, current) = section_with_one_photo();
        let mut initial = AppState::default();
        initial.data.sections.insert(section);

        let store = Store::new(initial);
        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        store.subscribe(
            Arc::downgrade(&recorder) as Weak<dyn StoreSubscriber>
        );

        store.dispatch(Action::SetDetailPhoto {
            section_id: current.section_id.clone(),
            photo_index: current.photo_index,
            photo_id: current.photo_id,
        });
        store.dispatch(Action::FetchDetailRequested(current.photo_id));
        store.dispatch(Action::CloseDetail);

        assert_eq!(
            *recorder.seen.lock(),
            vec!["focused", "loading", "closed"]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let store = Store::new(AppState::default());
        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        store.subscribe(
            Arc::downgrade(&recorder) as Weak<dyn StoreSubscriber>
        );
        drop(recorder);

        store.dispatch(Action::CloseDetail);
        assert_eq!(store.subscribers.lock().len(), 0);
    }

    #[test]
    fn guarded_dispatch_drops_cancelled_actions() {
        let (section, current) = section_with_one_photo();
        let mut initial = AppState::default();
        initial.data.sections.insert(section);
        let store = Store::new(initial);

        let token = CancellationToken::new();
        token.cancel();
        let applied = store.dispatch_guarded(
            &token,
            Action::SetDetailPhoto {
                section_id: current.section_id.clone(),
                photo_index: 0,
                photo_id: current.photo_id,
            },
        );
        assert!(!applied);
        assert!(store.with_state(|state| state.detail.is_none()));
    }
}
