//! Modal viewer for a single asset.

use damu_core::{Asset, PreviewKind, preview::PREVIEW_UNAVAILABLE};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;

use crate::client::AssetClient;

/// Props for the [`PreviewModal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewModalProps {
    asset: Asset,
    on_close: EventHandler<()>,
}

/// Overlay showing the asset in a viewer chosen from its MIME type.
///
/// Clicking the backdrop or the close button calls `on_close`; clicks
/// inside the dialog do not.
#[component]
pub fn PreviewModal(props: PreviewModalProps) -> Element {
    let client = use_context::<AssetClient>();
    let src = client.download_url(&props.asset.id);
    let title = props.asset.original_name.clone();
    let on_close = props.on_close;

    let body = match PreviewKind::classify(&props.asset.mime_type) {
        PreviewKind::Video => rsx! {
            video { class: "viewer", src: "{src}", controls: true }
        },
        PreviewKind::Pdf => rsx! {
            iframe { class: "viewer document", src: "{src}", title: "{title}" }
        },
        PreviewKind::Image => rsx! {
            img { class: "viewer", src: "{src}", alt: "{title}" }
        },
        PreviewKind::Unsupported => rsx! {
            p { class: "muted", "{PREVIEW_UNAVAILABLE}" }
        },
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),
                header { class: "modal-header",
                    h2 { "{title}" }
                    button {
                        class: "icon-button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        Icon { icon: LdX, width: 20, height: 20 }
                    }
                }
                div { class: "modal-body", {body} }
            }
        }
    }
}
