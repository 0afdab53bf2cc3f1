//! Saving generated files through the browser

use gloo_timers::callback::Timeout;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// How long the object URL outlives the click. Revoking it at once cancels
/// the download in some browsers.
const REVOKE_DELAY_MS: u32 = 1_000;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("browser API unavailable: {0}")]
    Unavailable(&'static str),

    #[error("browser error: {0}")]
    Js(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        DownloadError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// Offer `bytes` as a file download named `file_name`.
pub fn save_file(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), DownloadError> {
    let window = web_sys::window().ok_or(DownloadError::Unavailable("window"))?;
    let document = window.document().ok_or(DownloadError::Unavailable("document"))?;
    let body = document.body().ok_or(DownloadError::Unavailable("body"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| DownloadError::Unavailable("anchor element"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            tracing::warn!(error = ?e, "could not revoke download URL");
        }
    })
    .forget();

    tracing::info!(file_name, size = bytes.len(), "file download started");
    Ok(())
}
