//! Firebase Authentication ID-token verification
//!
//! ID tokens are RS256 JWTs signed by Google's `securetoken` service account.
//! The signing keys are published as a JWK set; a token is accepted when its
//! `kid` is in that set, the signature checks out, it is unexpired, and its
//! audience and issuer name this project.

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;

use crate::domain::{AuthError, IdentityVerifier, VerifiedIdentity};

pub const GOOGLE_SECURETOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
}

pub struct FirebaseVerifier {
    client: reqwest::Client,
    project_id: String,
    jwks_url: String,
}

impl FirebaseVerifier {
    pub fn new(client: reqwest::Client, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            jwks_url: GOOGLE_SECURETOKEN_JWKS_URL.to_string(),
        }
    }

    /// Point the verifier at another key endpoint (used by tests).
    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        let resp = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch identity provider keys: {}", e);
                AuthError::Unauthenticated("Identity provider unreachable".into())
            })?;

        if !resp.status().is_success() {
            tracing::error!("Identity provider key endpoint returned {}", resp.status());
            return Err(AuthError::Unauthenticated(
                "Identity provider unavailable".into(),
            ));
        }

        resp.json::<JwkSet>().await.map_err(|e| {
            tracing::error!("Invalid identity provider key set: {}", e);
            AuthError::Unauthenticated("Identity provider keys unreadable".into())
        })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let header = decode_header(token)
            .map_err(|e| AuthError::Unauthenticated(format!("Malformed token: {}", e)))?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::Unauthenticated(format!(
                "Unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::Unauthenticated("Token has no key id".into()))?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::Unauthenticated("Unknown signing key".into()))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::Unauthenticated(format!("Unusable signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[self.issuer()]);

        let claims = decode::<FirebaseClaims>(token, &key, &validation)
            .map_err(|e| AuthError::Unauthenticated(format!("Invalid token: {}", e)))?
            .claims;

        if claims.sub.is_empty() {
            return Err(AuthError::Unauthenticated("Token has no subject".into()));
        }

        let email = claims
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::Unauthenticated("Token carries no email".into()))?;

        Ok(VerifiedIdentity {
            uid: claims.sub,
            email,
        })
    }
}
