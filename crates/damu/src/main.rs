use damu_core::config::{
    API_URL_VAR, MAX_FILE_SIZE_VAR, REQUEST_TIMEOUT_MS_VAR, SUPPORTED_FILE_TYPES_VAR,
};
use damu_core::{Asset, ClientConfig};
use damu_io::{AssetClient, AssetGallery, FileUpload};
use dioxus::prelude::*;
use tracing::info;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app);
}

/// Configuration baked in when the bundle was built.
///
/// `option_env!` needs literal names, so each variable is matched here
/// and handed to the shared parser.
fn build_config() -> ClientConfig {
    ClientConfig::from_vars(|name| {
        let value = match name {
            API_URL_VAR => option_env!("DAMU_API_URL"),
            SUPPORTED_FILE_TYPES_VAR => option_env!("DAMU_SUPPORTED_FILE_TYPES"),
            MAX_FILE_SIZE_VAR => option_env!("DAMU_MAX_FILE_SIZE"),
            REQUEST_TIMEOUT_MS_VAR => option_env!("DAMU_REQUEST_TIMEOUT_MS"),
            _ => None,
        };
        value.map(str::to_owned)
    })
}

/// Root application component.
///
/// Provides the configuration and API client to every component, and
/// refreshes the gallery whenever an upload succeeds.
fn app() -> Element {
    let config = use_context_provider(build_config);
    use_context_provider(|| AssetClient::new(&config));

    let mut refresh_key = use_signal(|| 0u64);

    let on_upload_success = move |asset: Asset| {
        info!(id = %asset.id, "refreshing gallery after upload");
        refresh_key += 1;
    };

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "app-header",
                h1 { "Digital Asset Management" }
                p { class: "muted", "Upload, search, preview, and download your files" }
            }

            main { class: "app-main",
                FileUpload { on_upload_success }
                AssetGallery { refresh_key: refresh_key() }
            }
        }
    }
}
