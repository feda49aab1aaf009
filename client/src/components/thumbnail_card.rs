//! Card for one past generation in the dashboard history.

#[cfg(test)]
#[path = "thumbnail_card_test.rs"]
mod thumbnail_card_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use quickthumb::ThumbnailRecord;

#[component]
pub fn ThumbnailCard(record: ThumbnailRecord) -> impl IntoView {
    let meta = card_meta(&record);
    let created = created_label(&record.created_at);
    let image = record.image_url.clone();
    let alt = record.description.clone();

    view! {
        <article class="thumb-card">
            {match image {
                Some(src) => view! { <img class="thumb-card__image" src=src alt=alt loading="lazy"/> }.into_any(),
                None => view! { <div class="thumb-card__image thumb-card__image--empty">"No preview"</div> }.into_any(),
            }}
            <p class="thumb-card__description">{record.description}</p>
            <p class="thumb-card__meta">{meta}</p>
            <time class="thumb-card__date">{created}</time>
        </article>
    }
}

/// `"bold · 16:9"`, skipping whatever is missing.
pub(crate) fn card_meta(record: &ThumbnailRecord) -> String {
    [record.style.as_deref(), record.aspect_ratio.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Date part of an ISO-8601 timestamp.
pub(crate) fn created_label(created_at: &str) -> String {
    created_at.split(['T', ' ']).next().unwrap_or_default().to_owned()
}
