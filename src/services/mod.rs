//! Services Layer
//!
//! Multi-step business flows extracted from HTTP handlers.

pub mod checkout_service;

// Re-export for convenience
pub use checkout_service::{CheckoutInput, Reconciliation};
