//! # HTTP Server Module
//!
//! Axum server exposing the user registry.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/users` - List and create users
//! - `/api/users/:id` - Read, replace, and delete one user

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
