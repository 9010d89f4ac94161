//! Browser clipboard access.

use async_trait::async_trait;
use voucher_search::{Clipboard, ClipboardError};
use wasm_bindgen_futures::JsFuture;

/// The page's `navigator.clipboard`.
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        let promise = window.navigator().clipboard().write_text(text);

        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::WriteFailed(format!("{:?}", e)))
    }
}
