//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use quickthumb::callback::has_session_marker;
use quickthumb::{CallbackFlow, CallbackPhase, Notice, SessionContext};

use crate::components::nav_bar::NavBar;
use crate::components::notice_banner::NoticeBanner;
use crate::net::api::BrowserApi;
use crate::pages::{callback::CallbackPage, dashboard::DashboardPage, home::HomePage, pricing::PricingPage};

/// Root application component.
///
/// Provides the session, the app-wide notice, the callback flow and the API
/// client as contexts, then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionContext::default());
    let notice = RwSignal::new(None::<Notice>);
    let flow = RwSignal::new(CallbackFlow::default());
    let api = BrowserApi::from_build_env();

    provide_context(session);
    provide_context(notice);
    provide_context(flow);
    provide_context(api.clone());

    // The provider may send the user back to any route. While a session
    // marker is pending, the callback page renders instead of the router.
    let marker_at_load = crate::util::location::fragment().is_some_and(|f| has_session_marker(&f));
    let callback_pending = move || marker_at_load && flow.with(|f| f.phase() != CallbackPhase::Done);

    if !marker_at_load {
        start_bootstrap(session, api);
    }

    view! {
        <Title text="QuickThumb · AI thumbnails"/>

        <Router>
            <NavBar/>
            <NoticeBanner notice=notice on_dismiss=Callback::new(move |()| notice.set(None))/>
            <Show
                when=callback_pending
                fallback=|| {
                    view! {
                        <Routes fallback=|| "Page not found.".into_view()>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route path=StaticSegment("pricing") view=PricingPage/>
                            <Route path=StaticSegment("dashboard") view=DashboardPage/>
                            <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=CallbackPage/>
                        </Routes>
                    }
                }
            >
                <CallbackPage/>
            </Show>
        </Router>
    }
}

/// Ask the backend who we are. Guards wait while this is in flight.
fn start_bootstrap(session: RwSignal<SessionContext>, api: BrowserApi) {
    #[cfg(feature = "csr")]
    {
        use quickthumb::api::ThumbApi as _;

        session.update(SessionContext::begin_bootstrap);
        leptos::task::spawn_local(async move {
            let result = api.current_user().await;
            session.update(|s| s.finish_bootstrap(result));
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = (session, api);
}
