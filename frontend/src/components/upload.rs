//! Generic upload modal.
//!
//! One component for every data source: the [`SourceConfig`] decides the
//! endpoint, the copy, the optional authorization redirect and the
//! auto-close delay. All state transitions happen in the shared
//! `UploadController`; this component only mirrors its snapshots into a
//! signal and renders them.

use gloo_timers::future::TimeoutFuture;
use ingest_uploader::{SourceConfig, UploadController, UploadState};
use leptos::*;
use std::rc::Rc;
use web_sys::{Event, HtmlInputElement};

use crate::components::StatusAlert;
use crate::services::{BrowserNavigator, BrowserTransport};
use crate::types::BrowserFile;

type ModalController = UploadController<BrowserTransport, BrowserNavigator>;

#[component]
pub fn UploadModal(
    source: SourceConfig,
    /// Whether the modal is shown
    #[prop(into)]
    open: Signal<bool>,
    /// Called when the modal closes (manually or after the auto-close delay)
    on_hide: Callback<()>,
) -> impl IntoView {
    let prompt = source.prompt.clone();
    let submit_label = source.submit_label.clone();

    let (state, set_state) = create_signal(UploadState::<BrowserFile>::default());

    let controller: Rc<ModalController> =
        Rc::new(UploadController::new(source, BrowserTransport, BrowserNavigator));
    controller.subscribe(move |snapshot| set_state.set(snapshot.clone()));
    controller.set_on_close(move || on_hide.call(()));
    let controller = store_value(controller);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input
            .files()
            .and_then(|files| files.get(0))
            .map(BrowserFile::from);
        controller.with_value(|c| c.select_file(file));
    };

    let on_submit = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            let submission = controller.submit().await;
            log::debug!("[{}] submit settled: {:?}", controller.source().id, submission.outcome);

            if let Some(ticket) = submission.auto_close {
                let millis = u32::try_from(ticket.delay().as_millis()).unwrap_or(u32::MAX);
                controller
                    .auto_close_after(ticket, TimeoutFuture::new(millis))
                    .await;
            }
        });
    };

    let on_close = move |_| controller.with_value(|c| c.close());

    let is_loading = move || state.with(|s| s.is_loading);
    let banner = Signal::derive(move || state.with(|s| s.banner.clone()));

    view! {
        <Show
            when=move || open.get()
            fallback=|| view! { }
        >
            <div class="modal-backdrop">
                <div class="modal" role="dialog">
                    <button class="modal-close" aria-label="Close" on:click=on_close>"×"</button>

                    <div class="modal-body">
                        <h4 class="modal-title">{prompt.clone()}</h4>
                        <input type="file" on:change=on_file_change/>
                    </div>

                    <StatusAlert banner=banner/>

                    <button
                        class="modal-submit"
                        disabled=is_loading
                        on:click=on_submit
                    >
                        {
                            let label = submit_label.clone();
                            move || if is_loading() { "⏳ Uploading...".to_string() } else { label.clone() }
                        }
                    </button>
                </div>
            </div>
        </Show>
    }
}
