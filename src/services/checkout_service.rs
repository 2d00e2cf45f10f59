//! Checkout Service - hosted payment sessions and their reconciliation
//!
//! Creating a session writes nothing locally. Reconciliation is driven by the
//! client polling with the session id after the provider redirects back; it is
//! the only place an order flips to `paid` and a payment record is written, and
//! the two writes happen in one transaction.

use crate::domain::{CheckoutRequest, DomainError, NewPayment, PaymentGateway, PaymentRepository};

pub const CHECKOUT_CURRENCY: &str = "usd";

/// Client-side paths the provider redirects to, relative to the site origin
const SUCCESS_PATH: &str = "/dashboard/payment-success?session_id={CHECKOUT_SESSION_ID}";
const CANCEL_PATH: &str = "/dashboard/payment-cancled";

/// What the buyer asked to pay for
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub order_id: String,
    pub bookname: String,
    pub buyer_email: String,
    /// Major units (USD)
    pub cost: f64,
}

/// Result of one reconciliation poll
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// The transaction was recorded by an earlier poll; nothing written
    AlreadyRecorded { transaction_id: String },
    /// This poll recorded the payment and marked the order paid
    Recorded {
        transaction_id: String,
        order_id: String,
    },
    /// The provider has not confirmed payment yet; nothing written
    Pending { payment_status: String },
}

/// Convert a major-unit price to integer cents, rejecting non-positive amounts.
pub fn to_minor_units(cost: f64) -> Result<i64, DomainError> {
    if !cost.is_finite() || cost <= 0.0 {
        return Err(DomainError::Validation(format!(
            "cost must be a positive amount, got {}",
            cost
        )));
    }
    Ok((cost * 100.0).round() as i64)
}

pub fn redirect_urls(site_domain: &str) -> (String, String) {
    let base = site_domain.trim_end_matches('/');
    (
        format!("{}{}", base, SUCCESS_PATH),
        format!("{}{}", base, CANCEL_PATH),
    )
}

/// Open a hosted checkout session and return its redirect URL.
pub async fn create_checkout(
    gateway: &dyn PaymentGateway,
    site_domain: &str,
    input: CheckoutInput,
) -> Result<String, DomainError> {
    if input.order_id.is_empty() {
        return Err(DomainError::Validation("order id is required".into()));
    }
    let unit_amount = to_minor_units(input.cost)?;
    let (success_url, cancel_url) = redirect_urls(site_domain);

    let session = gateway
        .create_checkout_session(CheckoutRequest {
            order_id: input.order_id,
            bookname: input.bookname,
            buyer_email: input.buyer_email,
            unit_amount,
            currency: CHECKOUT_CURRENCY.to_string(),
            success_url,
            cancel_url,
        })
        .await?;

    tracing::info!("Checkout session {} created", session.id);

    session
        .url
        .ok_or_else(|| DomainError::External("checkout session has no redirect url".into()))
}

/// Fold the provider's session state into the orders and payments collections.
pub async fn reconcile_session(
    gateway: &dyn PaymentGateway,
    payments: &dyn PaymentRepository,
    session_id: &str,
) -> Result<Reconciliation, DomainError> {
    let session = gateway.retrieve_session(session_id).await?;

    if let Some(transaction_id) = session.payment_intent.as_deref()
        && payments
            .find_by_transaction_id(transaction_id)
            .await?
            .is_some()
    {
        tracing::info!("Transaction {} already recorded", transaction_id);
        return Ok(Reconciliation::AlreadyRecorded {
            transaction_id: transaction_id.to_string(),
        });
    }

    if !session.is_paid() {
        tracing::debug!(
            "Session {} not paid yet ({})",
            session.id,
            session.payment_status
        );
        return Ok(Reconciliation::Pending {
            payment_status: session.payment_status,
        });
    }

    let order_id = session
        .metadata_value("orderId")
        .ok_or_else(|| DomainError::External("paid session carries no orderId".into()))?
        .to_string();
    let transaction_id = session
        .payment_intent
        .clone()
        .unwrap_or_else(|| session.id.clone());

    let payment = NewPayment {
        transaction_id: transaction_id.clone(),
        email: session.buyer_email(),
        bookname: session.metadata_value("bookname").unwrap_or_default().to_string(),
        amount: session.amount_total.unwrap_or(0) as f64 / 100.0,
    };

    // The unique index on transaction_id settles concurrent polls: only the
    // winner of this insert touches the order, and both writes commit together.
    let updated = match payments.record_payment(payment, &order_id).await {
        Ok(updated) => updated,
        Err(DomainError::Conflict(_)) => {
            tracing::info!("Transaction {} recorded concurrently", transaction_id);
            return Ok(Reconciliation::AlreadyRecorded { transaction_id });
        }
        Err(e) => return Err(e),
    };
    if updated.matched_count == 0 {
        tracing::warn!(
            "Payment {} references unknown order {}",
            transaction_id,
            order_id
        );
    }

    tracing::info!("Order {} paid with {}", order_id, transaction_id);
    Ok(Reconciliation::Recorded {
        transaction_id,
        order_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_cents() {
        assert_eq!(to_minor_units(12.0).unwrap(), 1200);
        assert_eq!(to_minor_units(12.5).unwrap(), 1250);
        assert_eq!(to_minor_units(0.1 + 0.2).unwrap(), 30);
    }

    #[test]
    fn rejects_non_positive_costs() {
        assert!(to_minor_units(0.0).is_err());
        assert!(to_minor_units(-3.0).is_err());
        assert!(to_minor_units(f64::NAN).is_err());
    }

    #[test]
    fn builds_redirect_urls() {
        let (success, cancel) = redirect_urls("https://courier.example.com/");
        assert_eq!(
            success,
            "https://courier.example.com/dashboard/payment-success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(cancel, "https://courier.example.com/dashboard/payment-cancled");
    }
}
