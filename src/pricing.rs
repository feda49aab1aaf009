//! Pricing catalogue and checkout.
//!
//! Tiers are static. Checkout is handed off to the payment provider: the
//! backend returns a hosted checkout URL and the caller navigates there with a
//! full-page load. The provider sends the user back to
//! `/dashboard?payment=success` or `/pricing?payment=cancelled`.

#[cfg(test)]
#[path = "pricing_test.rs"]
mod pricing_test;

use serde::Serialize;
use url::Url;

use crate::api::ThumbApi;
use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PricingTier {
    pub id: &'static str,
    pub name: &'static str,
    pub credits: i64,
    pub price_cents: u32,
    pub features: &'static [&'static str],
    /// The free tier is granted at sign-up and cannot be bought.
    pub purchasable: bool,
}

pub const TIERS: &[PricingTier] = &[
    PricingTier {
        id: "free",
        name: "Free",
        credits: 5,
        price_cents: 0,
        features: &["5 thumbnails on sign-up", "All styles and aspect ratios", "Generation history"],
        purchasable: false,
    },
    PricingTier {
        id: "credits_50",
        name: "Creator Pack",
        credits: 50,
        price_cents: 1000,
        features: &["50 thumbnails", "Reference image uploads", "Credits never expire"],
        purchasable: true,
    },
];

#[must_use]
pub fn find_tier(id: &str) -> Option<&'static PricingTier> {
    TIERS.iter().find(|tier| tier.id == id)
}

/// `"Free"` for zero, otherwise US dollars with cents.
#[must_use]
pub fn format_price(cents: u32) -> String {
    if cents == 0 {
        return "Free".to_owned();
    }
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Ask the backend for a hosted checkout page for `tier`.
///
/// # Errors
///
/// [`ApiError::NotPurchasable`] for tiers that cannot be bought (no request is
/// sent), the backend error otherwise, or [`ApiError::InvalidUrl`] if the
/// returned URL does not parse.
pub async fn start_checkout<A: ThumbApi + ?Sized>(api: &A, tier: &PricingTier) -> Result<Url, ApiError> {
    if !tier.purchasable {
        return Err(ApiError::NotPurchasable(tier.id.to_owned()));
    }
    let raw = api.create_checkout_session(Some(tier.id)).await?;
    let url = Url::parse(&raw)?;
    tracing::info!(tier = tier.id, host = url.host_str().unwrap_or_default(), "checkout session created");
    Ok(url)
}

/// Outcome marker appended by the payment provider on return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Success,
    Cancelled,
}

impl PaymentStatus {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Payment received. Your credits will appear shortly.",
            Self::Cancelled => "Checkout cancelled. You have not been charged.",
        }
    }
}

/// Read `payment=success|cancelled` from a query string (leading `?` optional).
#[must_use]
pub fn payment_status(query: &str) -> Option<PaymentStatus> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "payment")
        .and_then(|(_, value)| match value.as_ref() {
            "success" => Some(PaymentStatus::Success),
            "cancelled" | "canceled" => Some(PaymentStatus::Cancelled),
            _ => None,
        })
}
