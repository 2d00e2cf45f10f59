//! Identity provider contract

use async_trait::async_trait;

use super::AuthError;

/// Caller identity as asserted by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: String,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Validate a raw bearer token. Every call goes to the provider; nothing is cached.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}
