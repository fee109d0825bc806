//! Browser-based file I/O using Web APIs

use wasm_bindgen::prelude::*;
use web_sys::{Blob, HtmlAnchorElement, Url};

use gloss_core::Document;

/// Download text as a file
pub fn download(filename: &str, mime: &str, body: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(body));

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type(mime);

    let blob = Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)?;

    // Create an object URL for the blob
    let url = Url::create_object_url_with_blob(&blob)?;

    // Create a temporary anchor element and trigger download
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)?;

    Ok(())
}

/// Save document with its highlights to localStorage
pub fn save_to_storage(key: &str, doc: &Document) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let storage = window.local_storage()?.ok_or("No localStorage")?;

    let json = serde_json::to_string(doc).map_err(|e| JsValue::from_str(&e.to_string()))?;

    storage.set_item(key, &json)?;

    Ok(())
}

/// Load a previously saved document from localStorage
pub fn load_from_storage(key: &str) -> Result<Option<Document>, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let storage = window.local_storage()?.ok_or("No localStorage")?;

    let Some(json) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
