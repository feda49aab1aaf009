//! Top navigation with credit balance and sign-in/out controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route. Reads the shared session; logout clears it once
//! the backend call has resolved.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use quickthumb::{Notice, SessionContext};

use crate::net::api::BrowserApi;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionContext>>();
    let api = StoredValue::new(expect_context::<BrowserApi>());
    let notice = expect_context::<RwSignal<Option<Notice>>>();
    let busy = RwSignal::new(false);

    let on_sign_in = move |_| crate::util::auth::redirect_to_login();

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "csr")]
        {
            use quickthumb::api::ThumbApi as _;

            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let result = api.logout().await;
                session.update(SessionContext::sign_out);
                if let Err(err) = result {
                    log::warn!("logout failed: {err}");
                    notice.set(Some(Notice::from(&err)));
                }
                busy.set(false);
                crate::util::location::assign("/");
            });
        }
    };

    view! {
        <nav class="nav-bar">
            <a href="/" class="nav-bar__brand">"QuickThumb"</a>
            <a href="/pricing" class="nav-bar__link">"Pricing"</a>
            <span class="nav-bar__spacer"></span>
            <Show
                when=move || session.with(SessionContext::is_authenticated)
                fallback=move || {
                    view! {
                        <button
                            class="btn nav-bar__sign-in"
                            disabled=move || session.with(SessionContext::is_loading)
                            on:click=on_sign_in
                        >
                            "Sign in"
                        </button>
                    }
                }
            >
                <a href="/dashboard" class="nav-bar__link">"Dashboard"</a>
                <span class="nav-bar__credits">{move || credits_label(session.with(SessionContext::credits))}</span>
                <span class="nav-bar__user">
                    {move || session.with(|s| s.user().map(|u| u.name.clone()).unwrap_or_default())}
                </span>
                <button class="btn nav-bar__logout" disabled=move || busy.get() on:click=on_logout>
                    "Log out"
                </button>
            </Show>
        </nav>
    }
}

pub(crate) fn credits_label(credits: Option<i64>) -> String {
    match credits {
        Some(1) => "1 credit".to_owned(),
        Some(n) => format!("{n} credits"),
        None => String::new(),
    }
}
