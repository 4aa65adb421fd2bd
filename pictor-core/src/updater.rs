//! Serial update scheduler.
//!
//! A [`SerialUpdater`] keeps one piece of derived, asynchronously fetched
//! data consistent with the store: on every state change it re-derives a
//! comparable parameter snapshot, and when the snapshot changed it cancels
//! the outstanding run and starts at most one new one. Superseded runs are
//! unobservable: their outcome is suppressed at the store's guarded
//! dispatch, whatever the transport does.

use std::fmt;
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::state::actions::Action;
use crate::state::store::{Store, StoreSubscriber};

/// One parameter derivation: the comparable snapshot plus whether a run
/// should start for it.
#[derive(Debug, Clone)]
pub struct Derived<P> {
    pub params: P,
    pub should_run: bool,
}

/// Handle a run uses to publish state changes.
///
/// Dispatching through the context keeps two guarantees:
/// - a superseded run's action is dropped inside the dispatch critical
///   section, so stale outcomes can never race a newer cancellation;
/// - a change published by the run itself (its request-started marker, its
///   outcome) updates the updater's recorded parameters without superseding
///   the very run that produced it. Only external changes cancel.
pub struct RunContext {
    store: Arc<Store>,
    token: CancellationToken,
    absorb: Arc<Mutex<Option<ThreadId>>>,
}

impl RunContext {
    /// Whether this run has been superseded.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Apply an action unless this run has been superseded. Returns whether
    /// the action was applied.
    pub fn dispatch(&self, action: Action) -> bool {
        let _absorbing = AbsorbGuard::set(&self.absorb);
        self.store.dispatch_guarded(&self.token, action)
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

/// Marks the current thread as publishing on behalf of the outstanding run
/// for the duration of one dispatch. Cleared on drop so a panicking run
/// cannot leave the flag stuck.
struct AbsorbGuard {
    flag: Arc<Mutex<Option<ThreadId>>>,
}

impl AbsorbGuard {
    fn set(flag: &Arc<Mutex<Option<ThreadId>>>) -> Self {
        *flag.lock() = Some(thread::current().id());
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for AbsorbGuard {
    fn drop(&mut self) {
        *self.flag.lock() = None;
    }
}

/// The derive-and-run pair a [`SerialUpdater`] schedules.
#[async_trait]
pub trait UpdateDriver: Send + Sync + 'static {
    /// Comparable parameter snapshot. Equality decides whether a state
    /// change is relevant.
    type Params: Clone + PartialEq + Send + Sync + fmt::Debug + 'static;

    /// Pure derivation from the current state. Called once per committed
    /// mutation, on the dispatch path, so keep it cheap and side-effect free.
    fn derive(&self, state: &AppState) -> Derived<Self::Params>;

    /// One unit of asynchronous work for a parameter snapshot.
    ///
    /// Route every resulting mutation through [`RunContext::dispatch`];
    /// check [`RunContext::is_cancelled`] before kicking off expensive
    /// work. Cancellation is not an error; unwind silently.
    async fn run(&self, params: Self::Params, ctx: RunContext);
}

struct UpdaterSlot<P> {
    last_params: Option<P>,
    run_token: Option<CancellationToken>,
}

/// Scheduler guaranteeing at most one outstanding run per instance.
///
/// Independent instances only share the store; each guards its own
/// last-parameters/current-run pair, so no cross-instance locking exists.
pub struct SerialUpdater<D: UpdateDriver> {
    driver: Arc<D>,
    store: Arc<Store>,
    runtime: tokio::runtime::Handle,
    slot: Mutex<UpdaterSlot<D::Params>>,
    absorb: Arc<Mutex<Option<ThreadId>>>,
}

impl<D: UpdateDriver> SerialUpdater<D> {
    /// Subscribe to the store and evaluate once against the current state.
    ///
    /// Must be called within a tokio runtime; runs are spawned onto it.
    pub fn attach(store: &Arc<Store>, driver: Arc<D>) -> Arc<Self> {
        let updater = Arc::new(Self {
            driver,
            store: Arc::clone(store),
            runtime: tokio::runtime::Handle::current(),
            slot: Mutex::new(UpdaterSlot {
                last_params: None,
                run_token: None,
            }),
            absorb: Arc::new(Mutex::new(None)),
        });
        store.subscribe(
            Arc::downgrade(&updater) as Weak<dyn StoreSubscriber>
        );
        store.with_state(|state| updater.evaluate(state));
        updater
    }

    fn evaluate(&self, state: &AppState) {
        let derived = self.driver.derive(state);

        let mut slot = self.slot.lock();
        if slot.last_params.as_ref() == Some(&derived.params) {
            // Unrelated state change, or a change that re-derived the exact
            // snapshot the outstanding run was started for. Either way: no
            // new run.
            return;
        }
        log::trace!("update parameters changed: {:?}", derived.params);
        slot.last_params = Some(derived.params.clone());

        let self_notification = matches!(
            *self.absorb.lock(),
            Some(id) if id == thread::current().id()
        );
        if self_notification {
            // The outstanding run published this change. Its progress must
            // not supersede it, and no second run may start while it is
            // outstanding.
            return;
        }

        if let Some(token) = slot.run_token.take() {
            // Idempotent, and a no-op for runs that already completed.
            token.cancel();
        }
        if !derived.should_run {
            return;
        }

        let token = CancellationToken::new();
        slot.run_token = Some(token.clone());
        let ctx = RunContext {
            store: Arc::clone(&self.store),
            token: token.clone(),
            absorb: Arc::clone(&self.absorb),
        };
        let driver = Arc::clone(&self.driver);
        let params = derived.params;
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::trace!("update run superseded before completion");
                }
                _ = driver.run(params, ctx) => {}
            }
        });
    }

    /// Cancel any outstanding run without waiting for it.
    pub fn shutdown(&self) {
        if let Some(token) = self.slot.lock().run_token.take() {
            token.cancel();
        }
    }
}

impl<D: UpdateDriver> StoreSubscriber for SerialUpdater<D> {
    fn on_state_changed(&self, state: &AppState) {
        self.evaluate(state);
    }
}

impl<D: UpdateDriver> Drop for SerialUpdater<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<D: UpdateDriver> fmt::Debug for SerialUpdater<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SerialUpdater")
            .field("has_params", &slot.last_params.is_some())
            .field(
                "run_outstanding",
                &slot
                    .run_token
                    .as_ref()
                    .is_some_and(|token| !token.is_cancelled()),
            )
            .finish()
    }
}
