//! Thin wrappers over browser APIs the widget needs outside of rsx.

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, HtmlInputElement};

/// A file picked through an `<input type="file">`
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<T>()
        .ok()
}

/// Read the first file selected in `input_id`.
///
/// `Ok(None)` means the picker was dismissed without a selection.
pub async fn read_selected_file(input_id: &str) -> Result<Option<SelectedFile>, String> {
    let Some(input) = element_by_id::<HtmlInputElement>(input_id) else {
        return Err(format!("No file input #{input_id}"));
    };
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {e:?}"))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    Ok(Some(SelectedFile {
        name: file.name(),
        media_type: file.type_(),
        size: file.size() as u64,
        bytes,
    }))
}

/// Clear the selection so picking the same file again fires `change`.
pub fn reset_file_input(input_id: &str) {
    if let Some(input) = element_by_id::<HtmlInputElement>(input_id) {
        input.set_value("");
    }
}

pub fn open_file_picker(input_id: &str) {
    if let Some(input) = element_by_id::<HtmlElement>(input_id) {
        input.click();
    }
}

pub fn focus_element(id: &str) {
    if let Some(element) = element_by_id::<HtmlElement>(id) {
        let _ = element.focus();
    }
}

pub fn scroll_to_bottom(id: &str) {
    if let Some(element) = element_by_id::<web_sys::Element>(id) {
        element.set_scroll_top(element.scroll_height());
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
