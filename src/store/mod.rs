//! Record store for the `users` table.
//!
//! The store is the only component that touches persisted state. It is
//! configured with an explicit database path and opens one connection per
//! operation.

mod config;
mod errors;
pub mod schema;
mod user_store;

pub use config::{StoreConfig, DEFAULT_BUSY_TIMEOUT, DEFAULT_DATABASE_PATH};
pub use errors::{StoreError, StoreResult};
pub use user_store::UserStore;
