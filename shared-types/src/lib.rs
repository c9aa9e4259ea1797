//! Shared types for the 311 chat widget
//!
//! Two groups live here:
//! - the JSON contract of the backend `/chat` endpoint
//! - the transcript entries the Dioxus widget renders
//!
//! Serializable with serde for JSON over HTTP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Conversation
// ============================================================================

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged text turn sent back to the backend for context.
/// Photos never travel inside the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Photos
// ============================================================================

/// Photo attached to a user message.
///
/// Both bodies are plain base64 (no `data:` prefix). When no compression ran,
/// `compressed_data` is the original body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
pub struct PhotoPayload {
    pub compressed_data: String,
    pub original_data: String,
    pub media_type: String,
    pub was_compressed: bool,
}

impl PhotoPayload {
    /// Body the widget shows and the backend analyses
    pub fn display_data(&self) -> &str {
        if self.compressed_data.is_empty() {
            &self.original_data
        } else {
            &self.compressed_data
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.display_data())
    }
}

// ============================================================================
// /chat contract
// ============================================================================

/// POST body of `/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
pub struct ChatRequest {
    pub message: String,
    pub conversation: Vec<ConversationTurn>,
    pub photo: Option<PhotoPayload>,
}

/// Response body of `/chat`.
///
/// Success carries `response`; failures carry `error`. Every field is
/// optional so a partial body still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
pub struct ChatReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// UI State
// ============================================================================

/// Chat message for UI display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub photo: Option<PhotoPayload>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../widget-ui/src/types/generated.ts")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
