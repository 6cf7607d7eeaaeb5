//! Data-source panel: one button per source, one modal open at a time.

use ingest_uploader::SourceConfig;
use leptos::*;

use crate::components::{DataSourceButton, UploadModal};
use crate::config::logo_for;

#[component]
pub fn DataSourcesPanel(sources: Vec<SourceConfig>) -> impl IntoView {
    // Id of the source whose modal is open
    let (active, set_active) = create_signal(None::<String>);

    let on_hide = Callback::new(move |()| set_active.set(None));

    view! {
        <div class="data-sources">
            {sources
                .into_iter()
                .map(|source| {
                    let id = source.id.clone();
                    let title = source.title.clone();
                    let logo = logo_for(&id).map(str::to_string);
                    let open_id = id.clone();
                    let on_open = Callback::new(move |()| {
                        log::info!("📂 Opening {} modal", open_id);
                        set_active.set(Some(open_id.clone()));
                    });
                    let open = Signal::derive(move || active.with(|a| a.as_deref() == Some(id.as_str())));

                    view! {
                        <DataSourceButton title=title logo=logo on_open=on_open/>
                        <UploadModal source=source open=open on_hide=on_hide/>
                    }
                })
                .collect_view()}
        </div>
    }
}
