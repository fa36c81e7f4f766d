//! A single asset tile in the gallery grid.

use chrono::Local;
use damu_core::{Asset, AssetIcon, PreviewKind, format_display_date, format_file_size};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdEye, LdFileText, LdVideo};

use crate::client::AssetClient;

/// Props for the [`AssetCard`] component.
#[derive(Props, Clone, PartialEq)]
pub struct AssetCardProps {
    asset: Asset,
    /// The user asked to preview this asset.
    on_preview: EventHandler<Asset>,
}

/// Thumbnail or type icon, name, size, local upload date, tags, and the
/// Preview and Download actions.
///
/// Preview is only offered when the MIME type has a viewer.
#[component]
pub fn AssetCard(props: AssetCardProps) -> Element {
    let client = use_context::<AssetClient>();
    let mut download_error = use_signal(|| Option::<String>::None);
    let mut downloading = use_signal(|| false);

    let asset = props.asset;
    let src = client.download_url(&asset.id);
    let size = format_file_size(asset.size);
    let date = format_display_date(&asset.upload_date, &Local);
    let can_preview = PreviewKind::classify(&asset.mime_type).is_available();

    let thumbnail = match AssetIcon::classify(&asset.mime_type) {
        AssetIcon::Photo => rsx! {
            img { class: "thumb", src: "{src}", alt: "{asset.original_name}", loading: "lazy" }
        },
        AssetIcon::Video => rsx! {
            div { class: "thumb icon", Icon { icon: LdVideo, width: 40, height: 40 } }
        },
        AssetIcon::Document => rsx! {
            div { class: "thumb icon", Icon { icon: LdFileText, width: 40, height: 40 } }
        },
    };

    let handle_download = {
        let asset = asset.clone();
        move |_| {
            let client = client.clone();
            let asset = asset.clone();
            downloading.set(true);
            download_error.set(None);
            spawn(async move {
                if let Err(e) = client.download_to_file(&asset).await {
                    download_error.set(Some(format!("Download failed: {e}")));
                }
                downloading.set(false);
            });
        }
    };

    let preview_asset = asset.clone();

    rsx! {
        article { class: "card",
            {thumbnail}
            div { class: "card-body",
                h3 { class: "card-title", title: "{asset.original_name}", "{asset.original_name}" }
                p { class: "muted", "{size} · {date}" }

                if !asset.tags.is_empty() {
                    ul { class: "tags",
                        for tag in asset.tags.iter() {
                            li { class: "tag", "{tag}" }
                        }
                    }
                }

                if let Some(ref err) = download_error() {
                    p { class: "error-text", "{err}" }
                }

                div { class: "card-actions",
                    if can_preview {
                        button {
                            class: "button secondary",
                            onclick: move |_| props.on_preview.call(preview_asset.clone()),
                            Icon { icon: LdEye, width: 16, height: 16 }
                            "Preview"
                        }
                    }
                    button {
                        class: "button primary",
                        disabled: downloading(),
                        onclick: handle_download,
                        Icon { icon: LdDownload, width: 16, height: 16 }
                        "Download"
                    }
                }
            }
        }
    }
}
