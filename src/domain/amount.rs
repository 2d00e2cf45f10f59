//! Money as clients send it: a JSON number or a numeric string

use serde::{Deserialize, Deserializer};

use super::DomainError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn value(&self) -> Result<f64, DomainError> {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| DomainError::Validation(format!("'{}' is not an amount", s)))?,
        };
        if !value.is_finite() {
            return Err(DomainError::Validation(format!(
                "'{}' is not an amount",
                value
            )));
        }
        Ok(value)
    }
}

/// `deserialize_with` adapter for `f64` price and cost fields
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Amount::deserialize(deserializer)?
        .value()
        .map_err(serde::de::Error::custom)
}
