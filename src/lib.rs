//! userdb - A small HTTP user registry backed by SQLite
//!
//! Request flow: parse → validate → persist → respond. The record store owns
//! the single `users` table; every operation opens its own connection.

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod store;
pub mod validation;

pub use http_server::{HttpServer, HttpServerConfig};
pub use model::{NewUser, User, UserId};
pub use store::{StoreConfig, StoreError, StoreResult, UserStore};
pub use validation::validate_user;
