//! Login callback route.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider sends the browser back with `#session_id=...`. This
//! page hands the fragment to the app-wide [`CallbackFlow`], which guarantees
//! the exchange runs at most once per page load even if the page re-renders.
//! The flow is read without tracking so the effect fires once per mount.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use quickthumb::{CallbackFlow, CallbackStep, Route, SessionContext};

use crate::net::api::BrowserApi;

#[component]
pub fn CallbackPage() -> impl IntoView {
    let flow = expect_context::<RwSignal<CallbackFlow>>();
    let session = expect_context::<RwSignal<SessionContext>>();
    let api = expect_context::<BrowserApi>();
    let navigate = use_navigate();

    Effect::new(move || {
        let fragment = crate::util::location::fragment().unwrap_or_default();
        let mut step = CallbackStep::AlreadyHandled;
        flow.update(|f| step = f.begin(&fragment));

        let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };
        match step {
            CallbackStep::AlreadyHandled => {}
            CallbackStep::RedirectHome => navigate(Route::Home.path(), replace),
            CallbackStep::Exchange(session_id) => {
                #[cfg(feature = "csr")]
                {
                    use quickthumb::api::ThumbApi as _;

                    let api = api.clone();
                    let navigate = navigate.clone();
                    leptos::task::spawn_local(async move {
                        let result = api.exchange_session(session_id).await;
                        let mut next = None;
                        flow.update(|f| session.update(|s| next = f.complete(result, s)));
                        if let Some(route) = next {
                            navigate(route.path(), replace);
                        }
                    });
                }
                #[cfg(not(feature = "csr"))]
                let _ = (session_id, &api, session);
            }
        }
    });

    view! {
        <main class="callback-page">
            <p class="callback-page__status">"Signing you in..."</p>
        </main>
    }
}
