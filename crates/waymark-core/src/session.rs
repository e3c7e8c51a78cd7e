//! Session scope for consumer access.
//!
//! A [`Session`] owns the city store for its lifetime; consumers hold a
//! [`SessionScope`] handed out by the session. The scope checks its
//! precondition explicitly: once the session is dropped, every call fails
//! with [`Error::ContextUnavailable`] instead of silently reading torn-down
//! state.

use std::sync::{Arc, Weak};

use crate::error::{Error, Result};
use crate::models::{CityDraft, CityId};
use crate::remote::CityBackend;
use crate::state::SyncState;
use crate::store::CityStore;

/// Owner of the sync state for one app session.
#[derive(Debug)]
pub struct Session<B> {
    store: Arc<CityStore<B>>,
}

impl<B: CityBackend> Session<B> {
    /// Start a session over the given backend with an empty travel log.
    pub fn new(backend: B) -> Self {
        Self {
            store: Arc::new(CityStore::new(backend)),
        }
    }

    /// Hand out a consumer scope tied to this session's lifetime.
    #[must_use]
    pub fn scope(&self) -> SessionScope<B> {
        SessionScope {
            store: Arc::downgrade(&self.store),
        }
    }

    /// Direct store access for the owning side.
    #[must_use]
    pub fn store(&self) -> &CityStore<B> {
        &self.store
    }
}

/// Consumer handle to the session's city store.
#[derive(Debug)]
pub struct SessionScope<B> {
    store: Weak<CityStore<B>>,
}

// manual impl: a derived Clone would require B: Clone
impl<B> Clone for SessionScope<B> {
    fn clone(&self) -> Self {
        Self {
            store: Weak::clone(&self.store),
        }
    }
}

impl<B: CityBackend> SessionScope<B> {
    fn store(&self) -> Result<Arc<CityStore<B>>> {
        self.store.upgrade().ok_or(Error::ContextUnavailable)
    }

    /// Read a settled snapshot of the sync state.
    pub fn snapshot(&self) -> Result<SyncState> {
        Ok(self.store()?.snapshot())
    }

    /// Fetch the full city collection.
    pub async fn load(&self) -> Result<()> {
        self.store()?.load().await;
        Ok(())
    }

    /// Select a city for detail view.
    pub async fn get_city(&self, id: CityId) -> Result<()> {
        self.store()?.select(id).await;
        Ok(())
    }

    /// Mark a new city as visited; it becomes the selected city.
    pub async fn create_city(&self, draft: CityDraft) -> Result<()> {
        self.store()?.create(draft).await;
        Ok(())
    }

    /// Delete a visited city.
    pub async fn delete_city(&self, id: CityId) -> Result<()> {
        self.store()?.remove(id).await;
        Ok(())
    }
}
