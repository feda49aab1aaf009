//! Generation form and result preview.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the form and the generation view-state for the dashboard. At most one
//! request is in flight; on success the session's credit balance is replaced
//! with the backend's value and the page is told to refresh history.

#[cfg(test)]
#[path = "generate_panel_test.rs"]
mod generate_panel_test;

use leptos::prelude::*;
use quickthumb::generate::STYLE_PRESETS;
use quickthumb::{AspectRatio, GenerateForm, GenerationState, Notice, SessionContext};

use crate::components::notice_banner::NoticeBanner;
use crate::net::api::BrowserApi;

#[component]
pub fn GeneratePanel(on_generated: Callback<()>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionContext>>();
    let api = StoredValue::new(expect_context::<BrowserApi>());
    let form = RwSignal::new(GenerateForm { aspect_ratio: Some(AspectRatio::default()), ..GenerateForm::default() });
    let state = RwSignal::new(GenerationState::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        let mut request = None;
        state.update(|s| request = s.begin(&snapshot));
        let Some(request) = request else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            use quickthumb::api::ThumbApi as _;

            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let result = api.generate(&request).await;
                let generated = result.is_ok();
                state.update(|s| session.update(|ctx| s.finish(result, ctx)));
                if generated {
                    on_generated.run(());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = request;
    };

    let on_files = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let files = crate::util::files::selected_files(&ev);
            leptos::task::spawn_local(async move {
                for file in files {
                    let outcome = match crate::util::files::read_attachment(file).await {
                        Ok(image) => {
                            let mut attached = Ok(());
                            form.update(|f| attached = f.attach(image));
                            attached.map_err(|e| e.to_string())
                        }
                        Err(message) => Err(message),
                    };
                    if let Err(message) = outcome {
                        state.update(|s| s.notice = Some(Notice::error(message)));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };

    let image_src = move || state.with(|s| s.image.clone().unwrap_or_default());

    view! {
        <section class="generate-panel">
            <form class="generate-panel__form" on:submit=on_submit>
                <label class="generate-panel__label" for="description">"Describe your thumbnail"</label>
                <textarea
                    id="description"
                    class="generate-panel__description"
                    rows="4"
                    placeholder="A shocked developer staring at a glowing Rust logo, bold yellow title text"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>

                <div class="generate-panel__row">
                    <label>
                        "Style "
                        <select on:change=move |ev| form.update(|f| f.style = style_from_input(&event_target_value(&ev)))>
                            <option value="" selected=move || form.with(|f| f.style.is_none())>"Any"</option>
                            {STYLE_PRESETS
                                .iter()
                                .map(|preset| {
                                    view! {
                                        <option
                                            value=*preset
                                            selected=move || form.with(|f| f.style.as_deref() == Some(*preset))
                                        >
                                            {*preset}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Aspect ratio "
                        <select on:change=move |ev| {
                            form.update(|f| f.aspect_ratio = AspectRatio::from_label(&event_target_value(&ev)));
                        }>
                            {AspectRatio::ALL
                                .into_iter()
                                .map(|ratio| {
                                    view! {
                                        <option
                                            value=ratio.label()
                                            selected=move || form.with(|f| f.aspect_ratio == Some(ratio))
                                        >
                                            {ratio.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>

                <label class="generate-panel__label">
                    "Reference images (optional, up to " {quickthumb::generate::MAX_IMAGES} ")"
                    <input type="file" accept="image/*" multiple=true on:change=on_files/>
                </label>
                <ul class="generate-panel__files">
                    {move || {
                        form.with(|f| {
                            f.images
                                .iter()
                                .enumerate()
                                .map(|(index, image)| {
                                    let name = image.name.clone();
                                    view! {
                                        <li class="generate-panel__file">
                                            <span>{name}</span>
                                            <button
                                                type="button"
                                                class="btn btn--small"
                                                on:click=move |_| form.update(|f| f.remove_image(index))
                                            >
                                                "Remove"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </ul>

                <Show when=move || out_of_credits(session.with(SessionContext::credits))>
                    <p class="generate-panel__hint">
                        "You're out of credits. " <a href="/pricing">"Buy a pack"</a> " to keep generating."
                    </p>
                </Show>

                <button class="btn btn--primary" type="submit" disabled=move || state.with(|s| s.busy)>
                    {move || submit_label(state.with(|s| s.busy))}
                </button>
            </form>

            <NoticeBanner
                notice=Signal::derive(move || state.with(|s| s.notice.clone()))
                on_dismiss=Callback::new(move |()| state.update(GenerationState::dismiss_notice))
            />

            <Show when=move || state.with(|s| s.image.is_some())>
                <figure class="generate-panel__result">
                    <img src=image_src alt="Generated thumbnail"/>
                    <a class="btn" href=image_src download="thumbnail.png">"Download"</a>
                </figure>
            </Show>
        </section>
    }
}

pub(crate) fn submit_label(busy: bool) -> &'static str {
    if busy { "Generating..." } else { "Generate thumbnail (1 credit)" }
}

pub(crate) fn out_of_credits(credits: Option<i64>) -> bool {
    credits.is_some_and(|c| c <= 0)
}

pub(crate) fn style_from_input(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_owned()) }
}
