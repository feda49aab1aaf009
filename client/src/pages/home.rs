//! Public landing page.

use leptos::prelude::*;
use quickthumb::SessionContext;
use quickthumb::pricing::{self, format_price};

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionContext>>();
    let free_credits = pricing::find_tier("free").map_or(0, |t| t.credits);
    let pack_price = pricing::find_tier("credits_50").map_or_else(String::new, |t| format_price(t.price_cents));

    view! {
        <main class="home-page">
            <section class="hero">
                <h1 class="hero__title">"Click-worthy thumbnails in seconds"</h1>
                <p class="hero__subtitle">
                    "Describe your video, pick a style, and let AI design the thumbnail. Add reference images "
                    "to keep your face or brand in the shot."
                </p>
                <Show
                    when=move || session.with(SessionContext::is_authenticated)
                    fallback=move || {
                        view! {
                            <button
                                class="btn btn--primary hero__cta"
                                on:click=move |_| crate::util::auth::redirect_to_login()
                            >
                                {format!("Start free with {free_credits} credits")}
                            </button>
                        }
                    }
                >
                    <a class="btn btn--primary hero__cta" href="/dashboard">"Open dashboard"</a>
                </Show>
            </section>
            <section class="features">
                <div class="feature">
                    <h3>"Any style"</h3>
                    <p>"Modern, bold, minimal, gaming and more, or write your own."</p>
                </div>
                <div class="feature">
                    <h3>"Every format"</h3>
                    <p>"16:9 for YouTube, 9:16 for Shorts, plus square and 4:3."</p>
                </div>
                <div class="feature">
                    <h3>"Pay as you go"</h3>
                    <p>{format!("50 thumbnails for {pack_price}. Credits never expire.")}</p>
                </div>
            </section>
        </main>
    }
}
