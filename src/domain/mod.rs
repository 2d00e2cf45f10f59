//! Domain layer - Pure business abstractions
//!
//! This layer contains NO web framework dependencies (no Axum).
//! Only trait definitions, roles and domain error types.

pub mod amount;
pub mod checkout;
pub mod errors;
pub mod identity;
pub mod repositories;
pub mod role;

pub use amount::Amount;
pub use checkout::{CheckoutRequest, CheckoutSession, PaymentGateway};
pub use errors::{AuthError, DomainError};
pub use identity::{IdentityVerifier, VerifiedIdentity};
pub use repositories::*;
pub use role::{RequiredRole, Role};
