//! Hosted checkout contract
//!
//! The payment provider owns the checkout page and the session state; this
//! service only creates sessions and reads them back.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Payment status the provider reports once the charge succeeded
pub const PAYMENT_STATUS_PAID: &str = "paid";

/// Everything needed to open a single-line-item checkout session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub order_id: String,
    pub bookname: String,
    pub buyer_email: String,
    /// Charge in minor units (cents)
    pub unit_amount: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Provider-side session state, trimmed to the fields reconciliation needs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub payment_status: String,
    /// Provider transaction identifier, present once a payment was attempted
    pub payment_intent: Option<String>,
    /// Minor units
    pub amount_total: Option<i64>,
    pub customer_email: Option<String>,
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PAYMENT_STATUS_PAID
    }

    /// Buyer email as confirmed on the checkout page, else the prefilled one
    pub fn buyer_email(&self) -> Option<String> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.clone())
            .or_else(|| self.customer_email.clone())
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, DomainError>;

    /// Read a session back by its identifier
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, DomainError>;
}
