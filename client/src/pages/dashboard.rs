//! Dashboard: generation workspace plus history of past thumbnails.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It redirects home once session
//! bootstrap has finished without a user, loads history once signed in, and
//! reloads it after each successful generation.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use quickthumb::pricing::{PaymentStatus, payment_status};
use quickthumb::{HistoryState, Notice, Route, SessionContext, User};

use crate::components::generate_panel::GeneratePanel;
use crate::components::notice_banner::NoticeBanner;
use crate::components::thumbnail_card::ThumbnailCard;
use crate::net::api::BrowserApi;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionContext>>();
    let api = StoredValue::new(expect_context::<BrowserApi>());
    let history = RwSignal::new(HistoryState::default());
    let payment_notice = RwSignal::new(None::<Notice>);
    let navigate = use_navigate();

    crate::util::auth::install_route_guard(Route::Dashboard, session, navigate);

    let refresh_history = move || {
        let mut started = false;
        history.update(|h| started = h.begin());
        if !started {
            return;
        }
        #[cfg(feature = "csr")]
        {
            use quickthumb::api::ThumbApi as _;

            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let result = api.thumbnails().await;
                history.update(|h| h.finish(result));
            });
        }
    };

    Effect::new(move || {
        let signed_in = session.with(SessionContext::is_authenticated);
        let needs_load = history.with_untracked(|h| !h.loaded && !h.loading);
        if signed_in && needs_load {
            refresh_history();
        }
    });

    // Returning from checkout: announce it and pick up the new balance.
    if crate::util::location::query().and_then(|q| payment_status(&q)) == Some(PaymentStatus::Success) {
        payment_notice.set(Some(Notice::success(PaymentStatus::Success.message())));
        #[cfg(feature = "csr")]
        {
            use quickthumb::api::ThumbApi as _;

            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match api.current_user().await {
                    Ok(Some(user)) => session.update(|s| s.set_credits(user.credits)),
                    Ok(None) => {}
                    Err(err) => log::warn!("balance refresh failed: {err}"),
                }
            });
        }
    }

    view! {
        <Show
            when=move || session.with(SessionContext::is_authenticated)
            fallback=move || {
                view! {
                    <main class="dashboard-page">
                        <p>{move || loading_message(session.with(SessionContext::is_loading))}</p>
                    </main>
                }
            }
        >
            <main class="dashboard-page">
                <header class="dashboard-page__header">
                    <h1>{move || greeting(session.with(|s| s.user().cloned()).as_ref())}</h1>
                </header>
                <NoticeBanner notice=payment_notice on_dismiss=Callback::new(move |()| payment_notice.set(None))/>

                <GeneratePanel on_generated=Callback::new(move |()| refresh_history())/>

                <section class="history">
                    <h2 class="history__title">"Your thumbnails"</h2>
                    <NoticeBanner
                        notice=Signal::derive(move || history.with(|h| h.notice.clone()))
                        on_dismiss=Callback::new(move |()| history.update(|h| h.notice = None))
                    />
                    <Show when=move || history.with(|h| h.loading && h.records.is_empty())>
                        <p>"Loading history..."</p>
                    </Show>
                    <Show when=move || history.with(HistoryState::is_empty)>
                        <p class="history__empty">"Nothing here yet. Generate your first thumbnail above."</p>
                    </Show>
                    <div class="history__grid">
                        {move || {
                            history
                                .get()
                                .records
                                .into_iter()
                                .map(|record| view! { <ThumbnailCard record=record/> })
                                .collect_view()
                        }}
                    </div>
                </section>
            </main>
        </Show>
    }
}

pub(crate) fn loading_message(loading: bool) -> &'static str {
    if loading { "Loading..." } else { "Redirecting..." }
}

pub(crate) fn greeting(user: Option<&User>) -> String {
    match user.map(|u| u.name.split_whitespace().next().unwrap_or_default()) {
        Some(first) if !first.is_empty() => format!("Welcome back, {first}"),
        _ => "Welcome back".to_owned(),
    }
}
