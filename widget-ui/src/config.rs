use photo_prep::PhotoPolicy;
use serde::Deserialize;

use crate::api::api_base;

/// Id of the optional `<script type="application/json">` holding overrides
pub const CONFIG_ELEMENT_ID: &str = "widget-config";

pub const DEFAULT_GREETING: &str = "Hello! I'm your 311 AI Assistant. I can help you report issues like potholes, graffiti, streetlight outages, and more. What can I help you with today?";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid widget config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Page-level settings for the widget.
///
/// Every field has a default, so the page only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Origin of the `/chat` endpoint; detected from the page when absent
    pub api_base: Option<String>,
    pub greeting: String,
    pub auto_open_delay_ms: u32,
    pub prefill_delay_ms: u32,
    pub photo: PhotoPolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            greeting: DEFAULT_GREETING.to_string(),
            auto_open_delay_ms: 2000,
            prefill_delay_ms: 300,
            photo: PhotoPolicy::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read overrides from the page, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());

        let Some(raw) = raw else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => {
                dioxus_logger::tracing::info!("Loaded widget config from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                dioxus_logger::tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn chat_endpoint(&self) -> String {
        let base = match self.api_base.as_deref() {
            Some(base) => base,
            None => api_base(),
        };
        format!("{}/chat", base.trim_end_matches('/'))
    }
}
