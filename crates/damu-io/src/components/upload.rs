//! Upload form with drag-and-drop, tags, and a progress bar.

use damu_core::{ApiError, Asset, ClientConfig, UploadController, UploadSource, format_file_size};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use tracing::info;

use crate::client::{AssetClient, UploadPayload};
use crate::file::PickedFile;

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the stored asset after the server accepted an upload.
    on_upload_success: EventHandler<Asset>,
}

/// A drop zone with a file picker, a tags field, and an upload button.
///
/// Expects a [`ClientConfig`] and an [`AssetClient`] in context. The
/// picked file is validated immediately; the bytes are read and sent when
/// the user presses Upload.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let config = use_context::<ClientConfig>();
    let client = use_context::<AssetClient>();
    let mut form = use_signal(|| UploadController::<PickedFile>::new(&config));

    // Shared by the picker and drop paths; only the first file is used.
    let mut pick = move |files: Vec<FileData>| {
        let _ = form
            .write()
            .select_first(files.into_iter().map(PickedFile::new));
    };

    let handle_submit = move |_| {
        let request = form.write().submit();
        let Ok(request) = request else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let file = request.file;
            let outcome = match file.read_bytes().await {
                Ok(bytes) => {
                    let payload = UploadPayload {
                        name: file.name(),
                        mime_type: file.mime_type(),
                        bytes: &bytes,
                    };
                    client
                        .upload(payload, request.tags.as_deref(), move |loaded, total| {
                            form.write().on_progress(loaded, total);
                        })
                        .await
                }
                Err(e) => Err(ApiError::Network(format!("failed to read file: {e}"))),
            };
            match outcome {
                Ok(asset) => {
                    info!(id = %asset.id, name = %asset.original_name, "upload complete");
                    form.write().on_success();
                    props.on_upload_success.call(asset);
                }
                Err(e) => form.write().on_failure(&e),
            }
        });
    };

    let state = form.read();
    let busy = state.is_busy();
    let zone_class = if busy {
        "drop-zone locked"
    } else if state.is_dragging() {
        "drop-zone dragging"
    } else {
        "drop-zone"
    };
    let progress = state.progress();
    let can_submit = state.can_submit();
    let selected = state.selected().map(|f| (f.name().to_owned(), format_file_size(f.size())));
    let error = state.error().map(str::to_owned);
    let tags = state.tags().to_owned();
    let accept = state.accept_attribute();
    let max_size = format_file_size(state.max_file_size());
    drop(state);

    rsx! {
        section { class: "panel upload",
            h2 { "Upload Asset" }

            div {
                class: "{zone_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    if !busy {
                        form.write().drag_enter();
                    }
                },
                ondragleave: move |_| {
                    form.write().drag_leave();
                },
                ondrop: move |evt: DragEvent| {
                    evt.prevent_default();
                    form.write().drag_leave();
                    pick(evt.files());
                },

                if let Some((ref name, ref size)) = selected {
                    p { class: "selected-file", "{name} ({size})" }
                } else {
                    p { class: "muted", "Drag and drop a file here, or" }
                }

                label { class: "button secondary",
                    input {
                        r#type: "file",
                        accept: "{accept}",
                        class: "hidden",
                        disabled: busy,
                        onchange: move |evt: FormEvent| pick(evt.files()),
                    }
                    "Choose File"
                }

                p { class: "hint", "Maximum size: {max_size}" }
            }

            label { class: "field",
                span { "Tags (comma-separated)" }
                input {
                    r#type: "text",
                    placeholder: "e.g. nature, landscape",
                    value: "{tags}",
                    disabled: busy,
                    oninput: move |evt| form.write().set_tags(evt.value()),
                }
            }

            if let Some(ref err) = error {
                p { class: "error-text", "{err}" }
            }

            if progress > 0 {
                div { class: "progress",
                    div { class: "progress-bar", style: "width: {progress}%" }
                }
                p { class: "hint", "{progress}%" }
            }

            button {
                class: "button primary",
                disabled: !can_submit,
                onclick: handle_submit,
                "Upload"
            }
        }
    }
}
