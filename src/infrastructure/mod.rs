//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and migrations (db)
//! - HTTP server setup and lifecycle (server)
//! - Configuration loading (config)
//! - Request authentication and role gates (auth)
//! - Identity provider and payment provider clients (firebase, stripe)
//! - Repository implementations (repositories)
//! - Application state (state)

pub mod auth;
pub mod config;
pub mod db;
pub mod firebase;
pub mod repositories;
pub mod seed;
pub mod server;
pub mod state;
pub mod stripe;

pub use repositories::*;
pub use state::AppState;
