//! Browser tests for the page-facing parts of the widget
//!
//! Run with: wasm-pack test --headless --firefox widget-ui

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use widget_ui::{api_base, read_selected_file, WidgetConfig, CONFIG_ELEMENT_ID, DEFAULT_GREETING};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_config_script(json: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let script = document.create_element("script").unwrap();
    script.set_id(CONFIG_ELEMENT_ID);
    script.set_attribute("type", "application/json").unwrap();
    script.set_text_content(Some(json));
    document.body().unwrap().append_child(&script).unwrap();
    script
}

#[wasm_bindgen_test]
fn config_is_read_from_page_script() {
    let script = mount_config_script(r#"{"greeting":"Hi there","auto_open_delay_ms":0}"#);

    let config = WidgetConfig::load();
    script.remove();

    assert_eq!(config.greeting, "Hi there");
    assert_eq!(config.auto_open_delay_ms, 0);
    assert_eq!(config.prefill_delay_ms, 300);
}

#[wasm_bindgen_test]
fn malformed_page_config_falls_back_to_defaults() {
    let script = mount_config_script("{greeting:");

    let config = WidgetConfig::load();
    script.remove();

    assert_eq!(config, WidgetConfig::default());
    assert_eq!(config.greeting, DEFAULT_GREETING);
}

#[wasm_bindgen_test]
fn endpoint_falls_back_to_detected_api_base() {
    let config = WidgetConfig::default();
    assert_eq!(config.chat_endpoint(), format!("{}/chat", api_base()));
}

#[wasm_bindgen_test]
async fn missing_file_input_is_an_error() {
    let err = read_selected_file("no-such-input").await.unwrap_err();
    assert!(err.contains("no-such-input"));
}
