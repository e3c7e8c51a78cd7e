//! City store controller.
//!
//! Orchestrates remote calls and dispatches actions into the reducer. The
//! controller is the only writer of [`SyncState`]; consumers read settled
//! snapshots via [`CityStore::snapshot`]. Operations never return transport
//! errors to the caller; failures surface as the fixed per-operation
//! message in `SyncState::error`, with the typed cause logged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::Error;
use crate::models::{CityDraft, CityId};
use crate::remote::CityBackend;
use crate::state::{reduce, Action, SyncState};

/// Consumer-facing failure messages, one per operation.
const LOAD_ERROR: &str = "There was an error loading cities.";
const SELECT_ERROR: &str = "There was an error loading the city.";
const CREATE_ERROR: &str = "There was an error creating the city.";
const DELETE_ERROR: &str = "There was an error deleting the city.";

/// Monotonic sequence counters, one per operation kind.
///
/// Each invocation takes the next token for its kind before dispatching
/// `loading`; a settle whose token is no longer the latest issued for that
/// kind is discarded without a dispatch. This keeps a slow response from
/// clobbering the state a faster, later invocation already settled.
#[derive(Debug, Default)]
struct OpSequences {
    load: AtomicU64,
    select: AtomicU64,
    create: AtomicU64,
    remove: AtomicU64,
}

fn next_token(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

fn is_latest(counter: &AtomicU64, token: u64) -> bool {
    counter.load(Ordering::SeqCst) == token
}

/// Controller mediating UI operations against the remote store.
#[derive(Debug)]
pub struct CityStore<B> {
    backend: B,
    state: Mutex<SyncState>,
    seq: OpSequences,
}

impl<B> CityStore<B> {
    /// Create a controller over the given backend with an empty state.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(SyncState::default()),
            seq: OpSequences::default(),
        }
    }

    /// Read a fully-settled snapshot of the sync state.
    #[must_use]
    pub fn snapshot(&self) -> SyncState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply one action through the reducer.
    ///
    /// Dispatches replace the whole state atomically, so a poisoned lock
    /// still holds a settled snapshot and can be recovered.
    fn dispatch(&self, action: Action) {
        tracing::debug!(kind = action.kind(), "dispatching action");
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::take(&mut *state);
        *state = reduce(previous, action);
    }

    fn reject(&self, operation: &str, message: &str, cause: &Error) {
        tracing::warn!(operation, cause = %cause, "city store operation failed");
        self.dispatch(Action::Rejected(message.to_string()));
    }
}

impl<B: CityBackend> CityStore<B> {
    /// Fetch the full city collection from the store.
    ///
    /// No retry on failure; the caller re-triggers if needed.
    pub async fn load(&self) {
        let token = next_token(&self.seq.load);
        self.dispatch(Action::Loading);
        let result = self.backend.list().await;
        if !is_latest(&self.seq.load, token) {
            tracing::debug!(token, "discarding superseded load settle");
            return;
        }
        match result {
            Ok(cities) => self.dispatch(Action::CitiesLoaded(cities)),
            Err(error) => self.reject("load", LOAD_ERROR, &error),
        }
    }

    /// Select a city for detail view, fetching it by id.
    ///
    /// Re-selecting the already-current city is a no-op: no request is
    /// issued and nothing is dispatched. The comparison id is captured
    /// before the request starts, so a selection change mid-flight cannot
    /// alter it.
    pub async fn select(&self, id: CityId) {
        let current = self.snapshot().current_city_id();
        if current == Some(id) {
            return;
        }

        let token = next_token(&self.seq.select);
        self.dispatch(Action::Loading);
        let result = self.backend.get(id).await;
        if !is_latest(&self.seq.select, token) {
            tracing::debug!(token, city_id = %id, "discarding superseded select settle");
            return;
        }
        match result {
            Ok(city) => self.dispatch(Action::CityLoaded(city)),
            Err(error) => self.reject("select", SELECT_ERROR, &error),
        }
    }

    /// Persist a new city; on success it is appended and becomes selected.
    pub async fn create(&self, draft: CityDraft) {
        let token = next_token(&self.seq.create);
        self.dispatch(Action::Loading);
        let result = self.backend.create(&draft).await;
        if !is_latest(&self.seq.create, token) {
            tracing::debug!(token, "discarding superseded create settle");
            return;
        }
        match result {
            Ok(city) => self.dispatch(Action::CityCreated(city)),
            Err(error) => self.reject("create", CREATE_ERROR, &error),
        }
    }

    /// Delete a city by id.
    ///
    /// The deletion counts as successful whenever the request itself does
    /// not fail; the response body is never inspected.
    pub async fn remove(&self, id: CityId) {
        let token = next_token(&self.seq.remove);
        self.dispatch(Action::Loading);
        let result = self.backend.remove(id).await;
        if !is_latest(&self.seq.remove, token) {
            tracing::debug!(token, city_id = %id, "discarding superseded remove settle");
            return;
        }
        match result {
            Ok(()) => self.dispatch(Action::CityDeleted(id)),
            Err(error) => self.reject("remove", DELETE_ERROR, &error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize};
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::Result;
    use crate::models::{City, Position};

    fn sample_city(id: i64, name: &str) -> City {
        City {
            id: CityId::new(id),
            name: name.to_string(),
            country: "Portugal".to_string(),
            emoji: "🇵🇹".to_string(),
            position: Position { lat: 38.7, lng: -9.1 },
            date: "2027-10-31T15:59:59Z".parse().unwrap(),
            notes: String::new(),
        }
    }

    fn sample_draft(name: &str) -> CityDraft {
        CityDraft {
            name: name.to_string(),
            country: "Portugal".to_string(),
            emoji: "🇵🇹".to_string(),
            position: Position { lat: 41.1, lng: -8.6 },
            date: "2027-07-21T09:00:00Z".parse().unwrap(),
            notes: String::new(),
        }
    }

    /// In-memory backend with per-test failure switching and call counting.
    #[derive(Default)]
    struct FakeBackend {
        cities: Mutex<Vec<City>>,
        next_id: AtomicI64,
        get_calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl FakeBackend {
        fn seeded(cities: Vec<City>) -> Self {
            let max_id = cities.iter().map(|c| c.id.as_i64()).max().unwrap_or(0);
            Self {
                cities: Mutex::new(cities),
                next_id: AtomicI64::new(max_id),
                ..Self::default()
            }
        }

        fn check_fail(&self) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::Api {
                    status: 500,
                    message: "store unavailable (500)".to_string(),
                });
            }
            Ok(())
        }
    }

    impl CityBackend for FakeBackend {
        async fn list(&self) -> Result<Vec<City>> {
            self.check_fail()?;
            Ok(self.cities.lock().unwrap().clone())
        }

        async fn get(&self, id: CityId) -> Result<City> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.check_fail()?;
            self.cities
                .lock()
                .unwrap()
                .iter()
                .find(|city| city.id == id)
                .cloned()
                .ok_or(Error::NotFound(id))
        }

        async fn create(&self, draft: &CityDraft) -> Result<City> {
            self.check_fail()?;
            let id = CityId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let city = draft.clone().into_city(id);
            self.cities.lock().unwrap().push(city.clone());
            Ok(city)
        }

        async fn remove(&self, id: CityId) -> Result<()> {
            self.check_fail()?;
            self.cities.lock().unwrap().retain(|city| city.id != id);
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_load_populates_cities() {
        let store = CityStore::new(FakeBackend::seeded(vec![
            sample_city(1, "Lisbon"),
            sample_city(2, "Berlin"),
        ]));
        store.load().await;

        let state = store.snapshot();
        assert_eq!(state.cities.len(), 2);
        assert!(!state.is_loading);
        assert_eq!(state.error, "");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_load_failure_sets_fixed_message() {
        let backend = FakeBackend::default();
        backend.fail.store(true, Ordering::SeqCst);
        let store = CityStore::new(backend);
        store.load().await;

        let state = store.snapshot();
        assert_eq!(state.error, "There was an error loading cities.");
        assert!(!state.is_loading);
        assert!(state.cities.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_select_fetches_city() {
        let store = CityStore::new(FakeBackend::seeded(vec![sample_city(1, "Lisbon")]));
        store.select(CityId::new(1)).await;

        let state = store.snapshot();
        assert_eq!(state.current_city_id(), Some(CityId::new(1)));
        assert!(!state.is_loading);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_reselecting_current_city_issues_no_request() {
        let store = CityStore::new(FakeBackend::seeded(vec![sample_city(1, "Lisbon")]));
        store.select(CityId::new(1)).await;
        let settled = store.snapshot();

        store.select(CityId::new(1)).await;
        assert_eq!(store.backend.get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.snapshot(), settled);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_select_missing_city_sets_fixed_message() {
        let store = CityStore::new(FakeBackend::default());
        store.select(CityId::new(42)).await;

        let state = store.snapshot();
        assert_eq!(state.error, "There was an error loading the city.");
        assert_eq!(state.current_city, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_appends_and_selects() {
        let store = CityStore::new(FakeBackend::seeded(vec![
            sample_city(1, "Lisbon"),
            sample_city(2, "Berlin"),
        ]));
        store.load().await;
        store.create(sample_draft("Porto")).await;

        let state = store.snapshot();
        assert_eq!(state.cities.len(), 3);
        assert_eq!(state.cities.last().map(|c| c.name.clone()), Some("Porto".to_string()));
        assert_eq!(state.current_city_id(), Some(CityId::new(3)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_failure_sets_fixed_message() {
        let backend = FakeBackend::default();
        backend.fail.store(true, Ordering::SeqCst);
        let store = CityStore::new(backend);
        store.create(sample_draft("Porto")).await;

        let state = store.snapshot();
        assert_eq!(state.error, "There was an error creating the city.");
        assert_eq!(state.current_city, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remove_filters_and_deselects() {
        let store = CityStore::new(FakeBackend::seeded(vec![
            sample_city(1, "Lisbon"),
            sample_city(2, "Berlin"),
        ]));
        store.load().await;
        store.select(CityId::new(2)).await;
        store.remove(CityId::new(2)).await;

        let state = store.snapshot();
        assert_eq!(state.cities.len(), 1);
        assert_eq!(state.cities[0].id, CityId::new(1));
        assert_eq!(state.current_city, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_remove_failure_keeps_cities() {
        let store = CityStore::new(FakeBackend::seeded(vec![sample_city(1, "Lisbon")]));
        store.load().await;
        store.backend.fail.store(true, Ordering::SeqCst);
        store.remove(CityId::new(1)).await;

        let state = store.snapshot();
        assert_eq!(state.error, "There was an error deleting the city.");
        assert_eq!(state.cities.len(), 1);
    }

    /// Backend whose `get(1)` blocks until the test releases it, to force
    /// out-of-order settlement.
    struct GatedBackend {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl CityBackend for GatedBackend {
        async fn list(&self) -> Result<Vec<City>> {
            Ok(Vec::new())
        }

        async fn get(&self, id: CityId) -> Result<City> {
            if id.as_i64() == 1 {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(sample_city(id.as_i64(), "Gated"))
        }

        async fn create(&self, draft: &CityDraft) -> Result<City> {
            Ok(draft.clone().into_city(CityId::new(99)))
        }

        async fn remove(&self, _id: CityId) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_superseded_select_settle_is_discarded() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let store = Arc::new(CityStore::new(GatedBackend {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        }));

        let slow = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.select(CityId::new(1)).await }
        });
        entered.notified().await;

        store.select(CityId::new(2)).await;
        assert_eq!(store.snapshot().current_city_id(), Some(CityId::new(2)));

        release.notify_one();
        slow.await.unwrap();

        // the slow settle must not clobber the newer selection
        let state = store.snapshot();
        assert_eq!(state.current_city_id(), Some(CityId::new(2)));
        assert!(!state.is_loading);
    }
}
