//! waymark-core - Core library for Waymark
//!
//! This crate contains the city models, the sync state machine, and the
//! remote store client shared by all Waymark interfaces. Consumers hold a
//! [`session::SessionScope`] and read settled [`state::SyncState`] snapshots;
//! every mutation flows through the reducer in [`state`].

pub mod config;
pub mod error;
pub mod models;
pub mod remote;
pub mod session;
pub mod state;
pub mod store;
mod util;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use models::{City, CityDraft, CityId, Position};
pub use remote::{CityBackend, RemoteCityStore};
pub use session::{Session, SessionScope};
pub use state::{reduce, Action, SyncState};
pub use store::CityStore;
