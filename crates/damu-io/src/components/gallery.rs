//! Filterable asset grid.

use damu_core::gallery::NO_ASSETS;
use damu_core::{Asset, GalleryController, GalleryView, ListRequest};
use dioxus::prelude::*;

use super::{AssetCard, PreviewModal, SearchFilterBar};
use crate::client::AssetClient;

/// Perform `request` and feed the outcome back into `gallery`.
///
/// Responses for superseded requests are dropped by the controller.
fn load(client: AssetClient, mut gallery: Signal<GalleryController>, request: ListRequest) {
    spawn(async move {
        match client.list(&request.query).await {
            Ok(assets) => {
                gallery.write().on_list_loaded(request.generation, assets);
            }
            Err(e) => {
                gallery.write().on_list_failed(request.generation, &e);
            }
        }
    });
}

/// Props for the [`AssetGallery`] component.
#[derive(Props, Clone, PartialEq)]
pub struct AssetGalleryProps {
    /// Bumped by the parent to force a reload, e.g. after an upload.
    refresh_key: u64,
}

/// Filter bar, asset grid, and preview modal.
///
/// Loads on mount, on every filter change, whenever `refresh_key`
/// changes, and when the user presses Retry after a failure. The last
/// good list stays visible under a load error.
#[component]
pub fn AssetGallery(props: AssetGalleryProps) -> Element {
    let client = use_context::<AssetClient>();
    let mut gallery = use_signal(GalleryController::new);
    let mut previewing = use_signal(|| Option::<Asset>::None);

    let refresh_key = props.refresh_key;
    let effect_client = client.clone();
    use_effect(use_reactive!(|(refresh_key,)| {
        let _ = refresh_key;
        let request = gallery.write().refetch();
        load(effect_client.clone(), gallery, request);
    }));

    let type_client = client.clone();
    let on_type_change = move |file_type: String| {
        let request = gallery.write().set_file_type(file_type);
        if let Some(request) = request {
            load(type_client.clone(), gallery, request);
        }
    };
    let date_client = client.clone();
    let on_date_change = move |date| {
        let request = gallery.write().set_upload_date(date);
        if let Some(request) = request {
            load(date_client.clone(), gallery, request);
        }
    };
    let tags_client = client.clone();
    let on_tags_change = move |tags: String| {
        let request = gallery.write().set_tags(tags);
        if let Some(request) = request {
            load(tags_client.clone(), gallery, request);
        }
    };
    let on_retry = move |_| {
        let request = gallery.write().refetch();
        load(client.clone(), gallery, request);
    };

    let state = gallery.read();
    let filters = state.filters().clone();
    let error = state.error().map(str::to_owned);
    let body = match state.view() {
        GalleryView::Loading => rsx! {
            div { class: "placeholder", span { class: "spinner large" } }
        },
        GalleryView::Empty => rsx! {
            p { class: "placeholder muted", "{NO_ASSETS}" }
        },
        GalleryView::Ready(assets) => rsx! {
            div { class: "grid",
                for asset in assets.iter().cloned() {
                    AssetCard {
                        key: "{asset.id}",
                        asset,
                        on_preview: move |asset| previewing.set(Some(asset)),
                    }
                }
            }
        },
    };
    drop(state);

    rsx! {
        section { class: "panel gallery",
            h2 { "Assets" }

            SearchFilterBar {
                filters,
                on_type_change,
                on_date_change,
                on_tags_change,
            }

            if let Some(ref err) = error {
                div { class: "error-banner",
                    p { "{err}" }
                    button { class: "button secondary", onclick: on_retry, "Retry" }
                }
            }

            {body}

            if let Some(asset) = previewing() {
                PreviewModal {
                    asset,
                    on_close: move |()| previewing.set(None),
                }
            }
        }
    }
}
