//! Dismissible banner for transient notices.

#[cfg(test)]
#[path = "notice_banner_test.rs"]
mod notice_banner_test;

use leptos::prelude::*;
use quickthumb::{Notice, NoticeLevel};

#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>, on_dismiss: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div
                class=move || notice.with(|n| notice_class(n.as_ref().map_or(NoticeLevel::Info, |n| n.level)))
                role="status"
            >
                <span class="notice__message">
                    {move || notice.with(|n| n.as_ref().map(|n| n.message.clone()).unwrap_or_default())}
                </span>
                <button class="notice__dismiss" title="Dismiss" on:click=move |_| on_dismiss.run(())>
                    "×"
                </button>
            </div>
        </Show>
    }
}

pub(crate) fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice notice--info",
        NoticeLevel::Success => "notice notice--success",
        NoticeLevel::Error => "notice notice--error",
    }
}
