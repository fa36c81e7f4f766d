//! HTTP client for the asset API.
//!
//! [`AssetClient`] performs the requests that `damu-core` describes.
//! Plain requests go through `gloo-net` (fetch); uploads use
//! `XMLHttpRequest` because fetch cannot report upload progress.
//!
//! Every request is bounded by the configured timeout. Failures are
//! logged here once, then returned to the caller for display.

use std::time::Duration;

use damu_core::{ApiError, Asset, AssetId, ClientConfig, Endpoint, ListQuery};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use tracing::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;

use crate::download;

/// A file to upload, already read into memory.
#[derive(Debug, Clone, Copy)]
pub struct UploadPayload<'a> {
    /// Filename sent with the multipart part.
    pub name: &'a str,
    /// MIME type of the part.
    pub mime_type: &'a str,
    /// File contents.
    pub bytes: &'a [u8],
}

/// Client for the asset API rooted at a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetClient {
    base_url: String,
    timeout: Duration,
}

impl AssetClient {
    /// Create a client from the API URL and timeout in `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            timeout: config.request_timeout,
        }
    }

    /// URL of an asset's binary content, for `<img>`, `<video>` and
    /// `<iframe>` sources.
    #[must_use]
    pub fn download_url(&self, id: &AssetId) -> String {
        Endpoint::Download(id).url(&self.base_url)
    }

    /// Fetch assets matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, timeout, a non-success
    /// status, or an undecodable body.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; fetch futures are !Send
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Asset>, ApiError> {
        let request = Request::get(&Endpoint::List.url(&self.base_url)).query(query.pairs());
        let result = self
            .fetch(request, |response| async move {
                response.json::<Vec<Asset>>().await
            })
            .await;
        logged(result)
    }

    /// Fetch an asset's binary content.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, timeout, or a
    /// non-success status.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; fetch futures are !Send
    pub async fn download(&self, id: &AssetId) -> Result<Vec<u8>, ApiError> {
        let request = Request::get(&Endpoint::Download(id).url(&self.base_url));
        let result = self
            .fetch(request, |response| async move { response.binary().await })
            .await;
        logged(result)
    }

    /// Download an asset and hand it to the browser as a file save.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the download fails, or
    /// [`ApiError::Decode`] if the browser refuses to save the bytes.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; fetch futures are !Send
    pub async fn download_to_file(&self, asset: &Asset) -> Result<(), ApiError> {
        let bytes = self.download(&asset.id).await?;
        download::trigger_download(&bytes, &asset.original_name, &asset.mime_type).map_err(|e| {
            error!("Download failed: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    /// Delete an asset.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, timeout, or a
    /// non-success status.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; fetch futures are !Send
    pub async fn delete(&self, id: &AssetId) -> Result<(), ApiError> {
        let request = Request::delete(&Endpoint::Delete(id).url(&self.base_url));
        let result = self.fetch(request, |_response| async { Ok(()) }).await;
        logged(result)
    }

    /// Upload a file as multipart `file` with optional `tags`.
    ///
    /// `on_progress(loaded, total)` is called from the browser's upload
    /// progress events whenever the total is known.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, timeout, a non-success
    /// status (with the server's `error` message when present), or an
    /// undecodable response.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; XHR is !Send
    pub async fn upload(
        &self,
        file: UploadPayload<'_>,
        tags: Option<&str>,
        on_progress: impl FnMut(u64, u64) + 'static,
    ) -> Result<Asset, ApiError> {
        logged(self.upload_inner(file, tags, on_progress).await)
    }

    #[allow(clippy::future_not_send)]
    async fn upload_inner(
        &self,
        file: UploadPayload<'_>,
        tags: Option<&str>,
        mut on_progress: impl FnMut(u64, u64) + 'static,
    ) -> Result<Asset, ApiError> {
        let blob = download::bytes_to_blob(file.bytes, file.mime_type).map_err(js_error)?;
        let form = web_sys::FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", &blob, file.name)
            .map_err(js_error)?;
        if let Some(tags) = tags {
            form.append_with_str("tags", tags).map_err(js_error)?;
        }

        let xhr = web_sys::XmlHttpRequest::new().map_err(js_error)?;
        xhr.open(Endpoint::Upload.method().as_str(), &Endpoint::Upload.url(&self.base_url))
            .map_err(js_error)?;
        xhr.set_timeout(timeout_millis(self.timeout));

        let (promise, resolve) = new_promise()?;

        // Each terminal event resolves the promise with its own name.
        let settle = |outcome: &'static str| {
            let resolve = resolve.clone();
            Closure::<dyn FnMut()>::new(move || {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::from_str(outcome));
            })
        };
        let onload = settle("load");
        let onerror = settle("error");
        let ontimeout = settle("timeout");
        let onabort = settle("abort");

        let onprogress = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
            move |event: web_sys::ProgressEvent| {
                if event.length_computable() {
                    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    on_progress(event.loaded() as u64, event.total() as u64);
                }
            },
        );

        let upload = xhr.upload().map_err(js_error)?;
        upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        xhr.set_ontimeout(Some(ontimeout.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(onabort.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form)).map_err(js_error)?;

        // Yields to the browser event loop until a terminal event fires.
        // The closures above must stay alive until then.
        let outcome = JsFuture::from(promise).await;

        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_ontimeout(None);
        xhr.set_onabort(None);
        drop((onload, onerror, ontimeout, onabort, onprogress));

        match outcome.ok().and_then(|v| v.as_string()).as_deref() {
            Some("load") => {}
            Some("timeout") => return Err(ApiError::Timeout(self.timeout)),
            Some("abort") => return Err(ApiError::Network("upload aborted".into())),
            _ => return Err(ApiError::Network("upload failed".into())),
        }

        let status = xhr.status().map_err(js_error)?;
        let body = xhr.response_text().map_err(js_error)?.unwrap_or_default();
        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(status, body.as_bytes()));
        }
        serde_json::from_str::<Asset>(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a fetch request and decode its body with `read`.
    ///
    /// The client timeout covers the whole exchange, headers and body.
    /// Non-success statuses become [`ApiError::Status`].
    #[allow(clippy::future_not_send)]
    async fn fetch<T, F, Fut>(&self, request: RequestBuilder, read: F) -> Result<T, ApiError>
    where
        F: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T, gloo_net::Error>>,
    {
        let controller = web_sys::AbortController::new().map_err(js_error)?;
        let signal = controller.signal();
        // Cancelled when dropped at the end of this function.
        let _timer = Timeout::new(timeout_millis(self.timeout), move || controller.abort());

        let response = request
            .abort_signal(Some(&signal))
            .send()
            .await
            .map_err(|e| {
                timed_out_or(signal.aborted(), self.timeout, ApiError::Network(e.to_string()))
            })?;

        if !response.ok() {
            let status = response.status();
            let body = response.binary().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        read(response)
            .await
            .map_err(|e| {
                timed_out_or(signal.aborted(), self.timeout, ApiError::Decode(e.to_string()))
            })
    }
}

/// An aborted request failed because the timer fired; anything else keeps
/// its own error.
fn timed_out_or(aborted: bool, timeout: Duration, error: ApiError) -> ApiError {
    if aborted { ApiError::Timeout(timeout) } else { error }
}

/// Log a failed call in one place before it is shown to the user.
fn logged<T>(result: Result<T, ApiError>) -> Result<T, ApiError> {
    result.inspect_err(|e| match e {
        ApiError::Status { status, message } => {
            error!(status, message = ?message, "API error");
        }
        ApiError::Network(_) | ApiError::Timeout(_) => error!("Network error: {e}"),
        ApiError::Decode(_) => error!("Error: {e}"),
    })
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

/// Create a JS Promise along with its resolve function.
fn new_promise() -> Result<(js_sys::Promise, js_sys::Function), ApiError> {
    let mut captured = None;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        captured = Some(resolve);
    });
    let resolve =
        captured.ok_or_else(|| ApiError::Network("promise executor did not run".into()))?;
    Ok((promise, resolve))
}
