//! Pricing tiers and checkout hand-off.
//!
//! SYSTEM CONTEXT
//! ==============
//! Buying leaves the SPA: the backend returns a hosted checkout URL and the
//! browser navigates there. A cancelled checkout comes back here with
//! `?payment=cancelled`.

#[cfg(test)]
#[path = "pricing_test.rs"]
mod pricing_test;

use leptos::prelude::*;
use quickthumb::pricing::{PaymentStatus, PricingTier, TIERS, format_price, payment_status};
use quickthumb::{Notice, SessionContext};

use crate::components::notice_banner::NoticeBanner;
use crate::net::api::BrowserApi;

#[component]
pub fn PricingPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionContext>>();
    let api = StoredValue::new(expect_context::<BrowserApi>());
    let notice = RwSignal::new(
        crate::util::location::query()
            .and_then(|q| payment_status(&q))
            .filter(|s| *s == PaymentStatus::Cancelled)
            .map(|s| Notice::info(s.message())),
    );
    let busy = RwSignal::new(None::<&'static str>);

    let on_buy = move |tier: &'static PricingTier| {
        match session.with_untracked(|s| buy_action(s, busy.get_untracked().is_some())) {
            BuyAction::Wait => return,
            BuyAction::SignIn => {
                crate::util::auth::redirect_to_login();
                return;
            }
            BuyAction::Checkout => {}
        }
        busy.set(Some(tier.id));
        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match quickthumb::pricing::start_checkout(&api, tier).await {
                    Ok(url) => crate::util::location::assign(url.as_str()),
                    Err(err) => {
                        log::warn!("checkout failed: {err}");
                        notice.set(Some(Notice::from(&err)));
                        busy.set(None);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (api, notice);
    };

    view! {
        <main class="pricing-page">
            <h1>"Simple pricing"</h1>
            <p class="pricing-page__subtitle">"One credit per thumbnail. No subscription."</p>
            <NoticeBanner notice=notice on_dismiss=Callback::new(move |()| notice.set(None))/>
            <div class="pricing-page__tiers">
                {TIERS
                    .iter()
                    .map(|tier| {
                        view! {
                            <article class="tier">
                                <h2 class="tier__name">{tier.name}</h2>
                                <p class="tier__price">{format_price(tier.price_cents)}</p>
                                <p class="tier__credits">{format!("{} credits", tier.credits)}</p>
                                <ul class="tier__features">
                                    {tier.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                                </ul>
                                <button
                                    class="btn btn--primary"
                                    disabled=move || {
                                        !tier.purchasable
                                            || busy.get().is_some()
                                            || session.with(SessionContext::is_loading)
                                    }
                                    on:click=move |_| on_buy(tier)
                                >
                                    {move || tier_button_label(tier, busy.get())}
                                </button>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </main>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuyAction {
    /// A checkout is already starting, or the session is still bootstrapping.
    Wait,
    SignIn,
    Checkout,
}

pub(crate) fn buy_action(session: &SessionContext, busy: bool) -> BuyAction {
    if busy || session.is_loading() {
        BuyAction::Wait
    } else if session.is_authenticated() {
        BuyAction::Checkout
    } else {
        BuyAction::SignIn
    }
}

pub(crate) fn tier_button_label(tier: &PricingTier, busy: Option<&str>) -> &'static str {
    if !tier.purchasable {
        "Included at sign-up"
    } else if busy == Some(tier.id) {
        "Redirecting..."
    } else {
        "Buy now"
    }
}
