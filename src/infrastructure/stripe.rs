//! Stripe Checkout client
//!
//! Talks to the Stripe REST API directly: form-encoded requests, the secret
//! key as bearer credential, JSON responses.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{CheckoutRequest, CheckoutSession, DomainError, PaymentGateway};

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    async fn read_session(resp: reqwest::Response) -> Result<CheckoutSession, DomainError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| {
                    b.error
                        .message
                        .or(b.error.kind)
                })
                .unwrap_or_else(|| format!("Stripe returned status {}", status));
            return Err(DomainError::External(message));
        }

        resp.json::<CheckoutSession>()
            .await
            .map_err(|e| DomainError::External(format!("Unreadable Stripe session: {}", e)))
    }
}

/// Stripe's bracketed form encoding of a one-item payment session.
pub fn session_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    vec![
        ("mode".into(), "payment".into()),
        (
            "line_items[0][price_data][currency]".into(),
            request.currency.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".into(),
            request.unit_amount.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".into(),
            request.bookname.clone(),
        ),
        ("line_items[0][quantity]".into(), "1".into()),
        ("metadata[orderId]".into(), request.order_id.clone()),
        ("metadata[bookname]".into(), request.bookname.clone()),
        ("customer_email".into(), request.buyer_email.clone()),
        ("success_url".into(), request.success_url.clone()),
        ("cancel_url".into(), request.cancel_url.clone()),
    ]
}

fn is_session_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, DomainError> {
        let url = format!("{}/v1/checkout/sessions", self.api_base);
        tracing::debug!(
            "Creating checkout session for order {} ({} cents)",
            request.order_id,
            request.unit_amount
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&session_form(&request))
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Failed to reach Stripe: {}", e)))?;

        Self::read_session(resp).await
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, DomainError> {
        if !is_session_id(session_id) {
            return Err(DomainError::Validation(format!(
                "'{}' is not a checkout session id",
                session_id
            )));
        }

        let url = format!("{}/v1/checkout/sessions/{}", self.api_base, session_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Failed to reach Stripe: {}", e)))?;

        Self::read_session(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_describes_single_line_item() {
        let request = CheckoutRequest {
            order_id: "order-1".into(),
            bookname: "Dune".into(),
            buyer_email: "reader@example.com".into(),
            unit_amount: 1250,
            currency: "usd".into(),
            success_url: "https://site/ok".into(),
            cancel_url: "https://site/cancel".into(),
        };
        let form = session_form(&request);
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("1250"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("metadata[orderId]"), Some("order-1"));
        assert_eq!(get("metadata[bookname]"), Some("Dune"));
        assert_eq!(get("customer_email"), Some("reader@example.com"));
    }

    #[test]
    fn session_ids_are_restricted() {
        assert!(is_session_id("cs_test_a1B2c3"));
        assert!(!is_session_id(""));
        assert!(!is_session_id("../v1/customers"));
        assert!(!is_session_id("cs test"));
    }
}
