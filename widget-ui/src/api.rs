use gloo_net::http::Request;
use shared_types::{ChatReply, ChatRequest};
use std::sync::OnceLock;

pub const SERVER_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error connecting to the server. Please try again.";

/// Get the API base URL based on current environment
/// - In development (localhost): the backend runs on http://localhost:5000
/// - In production: use same origin (backend serves the page)
fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    if hostname == "localhost" || hostname == "127.0.0.1" {
        "http://localhost:5000".to_string()
    } else {
        "".to_string()
    }
}

/// Lazy-static equivalent for WASM - computed at first use
static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to serialize request: {0}")]
    Encode(String),

    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {status}")]
    Server { status: u16, message: Option<String> },

    #[error("Failed to parse JSON: {0}")]
    Decode(String),

    #[error("Reply had no response text")]
    EmptyReply,
}

impl ChatError {
    /// Text shown in the transcript when a send fails
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ChatError::Server { .. } => SERVER_ERROR_MESSAGE.to_string(),
            ChatError::Encode(_)
            | ChatError::Network(_)
            | ChatError::Decode(_)
            | ChatError::EmptyReply => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Interpret a `/chat` response body.
///
/// `body` is `None` when the body was not valid JSON.
pub fn interpret_reply(status: u16, ok: bool, body: Option<ChatReply>) -> Result<String, ChatError> {
    if !ok {
        return Err(ChatError::Server {
            status,
            message: body.and_then(|reply| reply.error),
        });
    }

    body.and_then(|reply| reply.response)
        .ok_or(ChatError::EmptyReply)
}

pub async fn send_chat(endpoint: &str, request: &ChatRequest) -> Result<String, ChatError> {
    let response = Request::post(endpoint)
        .json(request)
        .map_err(|e| ChatError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?;

    let status = response.status();
    let ok = response.ok();

    let body = match response.json::<ChatReply>().await {
        Ok(reply) => Some(reply),
        Err(e) if ok => return Err(ChatError::Decode(e.to_string())),
        Err(_) => None,
    };

    interpret_reply(status, ok, body)
}
