use std::env;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} environment variable must be set", var),
            ConfigError::Invalid(var, reason) => write!(f, "{} is invalid: {}", var, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The slice of the identity-provider service account this service needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: Option<String>,
}

impl ServiceAccount {
    /// Decode a base64-encoded service-account JSON document.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ConfigError::Invalid("FB_SERVICE_KEY", e.to_string()))?;
        let account: ServiceAccount = serde_json::from_slice(&bytes)
            .map_err(|e| ConfigError::Invalid("FB_SERVICE_KEY", e.to_string()))?;
        if account.project_id.is_empty() {
            return Err(ConfigError::Invalid(
                "FB_SERVICE_KEY",
                "project_id is empty".to_string(),
            ));
        }
        Ok(account)
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub firebase_project_id: String,
    pub stripe_secret: String,
    pub stripe_api_base: String,
    pub site_domain: String,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .field("firebase_project_id", &self.firebase_project_id)
            .field("stripe_secret", &"<redacted>")
            .field("stripe_api_base", &self.stripe_api_base)
            .field("site_domain", &self.site_domain)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("seed_demo", &self.seed_demo)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_key = lookup("FB_SERVICE_KEY").ok_or(ConfigError::Missing("FB_SERVICE_KEY"))?;
        let account = ServiceAccount::from_base64(&service_key)?;

        let stripe_secret = lookup("STRIPE_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("STRIPE_SECRET"))?;

        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", format!("'{}' is not a port", p)))?,
            None => 3000,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://book_courier.db?mode=rwc".to_string()),
            port,
            firebase_project_id: account.project_id,
            stripe_secret,
            stripe_api_base: lookup("STRIPE_API_BASE")
                .unwrap_or_else(|| "https://api.stripe.com".to_string()),
            site_domain: lookup("SITE_DOMAIN")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            seed_demo: lookup("SEED_DEMO").is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn encoded_account() -> String {
        STANDARD.encode(r#"{"type":"service_account","project_id":"book-courier-test","client_email":"svc@example.com"}"#)
    }

    fn lookup_from(vars: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_and_default_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("FB_SERVICE_KEY", encoded_account()),
            ("STRIPE_SECRET", "sk_test_123".to_string()),
            ("SITE_DOMAIN", "https://courier.example.com/".to_string()),
        ]))
        .unwrap();

        assert_eq!(config.firebase_project_id, "book-courier-test");
        assert_eq!(config.stripe_secret, "sk_test_123");
        assert_eq!(config.port, 3000);
        assert_eq!(config.site_domain, "https://courier.example.com");
        assert_eq!(config.stripe_api_base, "https://api.stripe.com");
        assert!(config.cors_allowed_origins.is_empty());
        assert!(!config.seed_demo);
    }

    #[test]
    fn missing_secrets_are_reported() {
        let err = Config::from_lookup(lookup_from(&[("STRIPE_SECRET", "sk".to_string())]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("FB_SERVICE_KEY")));

        let err = Config::from_lookup(lookup_from(&[("FB_SERVICE_KEY", encoded_account())]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRIPE_SECRET")));
    }

    #[test]
    fn rejects_undecodable_service_key() {
        let err = Config::from_lookup(lookup_from(&[
            ("FB_SERVICE_KEY", "not base64 at all!".to_string()),
            ("STRIPE_SECRET", "sk".to_string()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("FB_SERVICE_KEY", _)));
    }

    #[test]
    fn rejects_bad_port_and_splits_origins() {
        let err = Config::from_lookup(lookup_from(&[
            ("FB_SERVICE_KEY", encoded_account()),
            ("STRIPE_SECRET", "sk".to_string()),
            ("PORT", "http".to_string()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));

        let config = Config::from_lookup(lookup_from(&[
            ("FB_SERVICE_KEY", encoded_account()),
            ("STRIPE_SECRET", "sk".to_string()),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,".to_string()),
        ]))
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }
}
