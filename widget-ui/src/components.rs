use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info, warn};
use gloo_timers::future::TimeoutFuture;
use photo_prep::{prepare_photo, PhotoError};
use shared_types::{ChatMessage, Sender};

use crate::api::send_chat;
use crate::config::WidgetConfig;
use crate::emphasis::{parse_emphasis, Span};
use crate::interop::{alert, open_file_picker, read_selected_file, reset_file_input, scroll_to_bottom};
use crate::state::{ChatState, PhotoSlot};

pub const MESSAGES_ID: &str = "chat-messages";
pub const INPUT_ID: &str = "chat-input";
pub const PHOTO_INPUT_ID: &str = "photo-input";

#[component]
pub fn ChatView(config: WidgetConfig, input_text: Signal<String>) -> Element {
    let mut input_text = input_text;
    let mut chat = use_signal(|| ChatState::new(&config.greeting));
    let endpoint = use_signal(|| config.chat_endpoint());
    let policy = use_signal(|| config.photo.clone());

    // Keep the newest message in view
    use_effect(move || {
        let state = chat.read();
        let _ = (state.messages.len(), state.is_typing, state.photo.is_visible());
        scroll_to_bottom(MESSAGES_ID);
    });

    let send_message = use_callback(move |_: ()| {
        let text = input_text();
        let Some(request) = chat.write().begin_send(&text) else {
            return;
        };
        input_text.set(String::new());
        reset_file_input(PHOTO_INPUT_ID);

        let endpoint = endpoint();
        spawn(async move {
            match send_chat(&endpoint, &request).await {
                Ok(reply) => chat.write().finish_with_reply(reply),
                Err(e) => {
                    error!("Failed to send message: {}", e);
                    chat.write().finish_with_error(e.user_message());
                }
            }
        });
    });

    let on_photo_selected = move |_: FormEvent| {
        let policy = policy();
        spawn(async move {
            let file = match read_selected_file(PHOTO_INPUT_ID).await {
                Ok(Some(file)) => file,
                Ok(None) => return,
                Err(e) => {
                    error!("{}", e);
                    alert(&format!("Error processing photo: {e}"));
                    reset_file_input(PHOTO_INPUT_ID);
                    return;
                }
            };

            info!(
                "Photo selected: {} ({}, {} bytes)",
                file.name, file.media_type, file.size
            );

            if file.media_type.starts_with("image/") && policy.shows_optimizing_preview(file.size) {
                chat.write().mark_photo_optimizing();
                // paint the placeholder before the blocking decode
                TimeoutFuture::new(16).await;
            }

            match prepare_photo(&file.bytes, &file.media_type, &policy) {
                Ok(prepared) => {
                    info!(
                        "Photo ready: {} -> {} bytes (compressed: {})",
                        prepared.original_bytes,
                        prepared.upload_bytes,
                        prepared.payload.was_compressed
                    );
                    chat.write().attach_photo(prepared.payload);
                }
                Err(e) => {
                    warn!("Photo rejected: {}", e);
                    chat.write().reject_pending_photo();
                    alert(&photo_alert_text(&e));
                    reset_file_input(PHOTO_INPUT_ID);
                }
            }
        });
    };

    let onkeydown = move |e: KeyboardEvent| {
        if e.key() == Key::Enter && !e.modifiers().shift() {
            e.prevent_default();
            send_message.call(());
        }
    };

    let state = chat.read();
    let send_enabled = state.can_send(&input_text.read());

    rsx! {
        style { {CHAT_STYLES} }

        div {
            class: "chat-container",

            div {
                class: "chat-header",
                div {
                    class: "chat-title",
                    span { class: "chat-icon", "🏙️" }
                    span { "311 Assistant" }
                }
                div {
                    class: "chat-status",
                    span { class: "status-dot", "●" }
                    span { "Online" }
                }
            }

            div {
                id: MESSAGES_ID,
                class: "messages-scroll-area",
                div {
                    class: "messages-list",
                    for msg in state.messages.iter() {
                        MessageBubble { key: "{msg.id}", message: msg.clone() }
                    }
                    if state.is_typing {
                        TypingIndicator {}
                    }
                }
            }

            PhotoPreview {
                slot: state.photo.clone(),
                on_clear: move |_| {
                    chat.write().clear_photo();
                    reset_file_input(PHOTO_INPUT_ID);
                },
            }

            div {
                class: "chat-input-area",
                div {
                    class: "input-wrapper",
                    button {
                        id: "photo-button",
                        class: "photo-button",
                        title: "Attach a photo",
                        onclick: move |_| open_file_picker(PHOTO_INPUT_ID),
                        "📷"
                    }
                    input {
                        id: PHOTO_INPUT_ID,
                        r#type: "file",
                        accept: "image/*",
                        style: "display: none;",
                        onchange: on_photo_selected,
                    }
                    textarea {
                        id: INPUT_ID,
                        class: "chat-textarea",
                        placeholder: "Describe the issue or attach a photo...",
                        value: "{input_text}",
                        rows: "1",
                        oninput: move |e: FormEvent| input_text.set(e.value()),
                        onkeydown,
                    }
                    button {
                        id: "send-button",
                        class: "send-button",
                        disabled: !send_enabled,
                        onclick: move |_| send_message.call(()),
                        span { "➤" }
                    }
                }
                div {
                    class: "input-hint",
                    "Press Enter to send, Shift+Enter for new line"
                }
            }
        }
    }
}

#[component]
pub fn MessageBubble(message: ChatMessage) -> Element {
    let is_user = message.sender == Sender::User;
    let sender_name = if is_user { "You" } else { "311 Assistant" };
    let row_class = format!("message-row {}-row", message.sender.css_class());
    let bubble_class = format!("message-bubble {}-bubble", message.sender.css_class());
    let photo_src = message
        .photo
        .as_ref()
        .filter(|_| is_user)
        .map(|photo| photo.data_url());
    let spans = parse_emphasis(&message.text);

    rsx! {
        div {
            class: "{row_class}",

            div {
                class: "message-content",

                div {
                    class: "message-header",
                    span { class: "sender-name", "{sender_name}" }
                    span { class: "message-time", "{format_timestamp(message.timestamp)}" }
                }

                div {
                    class: "{bubble_class}",
                    if let Some(src) = photo_src {
                        img {
                            class: "message-photo",
                            src: "{src}",
                            alt: "Attached photo",
                        }
                    }
                    for span in spans {
                        {render_span(span)}
                    }
                }
            }
        }
    }
}

#[component]
pub fn TypingIndicator() -> Element {
    rsx! {
        div {
            id: "typing-indicator",
            class: "message-row assistant-row",
            div {
                class: "typing-indicator",
                span {}
                span {}
                span {}
            }
        }
    }
}

#[component]
pub fn PhotoPreview(slot: PhotoSlot, on_clear: EventHandler<()>) -> Element {
    match slot {
        PhotoSlot::Empty => rsx! {},
        PhotoSlot::Optimizing(_) => rsx! {
            div {
                id: "photo-preview",
                class: "photo-preview",
                div { class: "photo-optimizing", "✨ Optimizing your photo..." }
            }
        },
        PhotoSlot::Ready(photo) => rsx! {
            div {
                id: "photo-preview",
                class: "photo-preview",
                div {
                    class: "photo-frame",
                    img { src: "{photo.data_url()}", alt: "Selected photo" }
                    button {
                        class: "photo-clear",
                        title: "Remove photo",
                        onclick: move |_| on_clear.call(()),
                        "×"
                    }
                }
            }
        },
    }
}

fn render_span(span: Span) -> Element {
    match span {
        Span::Plain(text) => rsx! { "{text}" },
        Span::Bold(text) => rsx! { strong { "{text}" } },
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

/// Alert text for a rejected photo
pub fn photo_alert_text(err: &PhotoError) -> String {
    match err {
        PhotoError::NotAnImage { .. } | PhotoError::TooLarge { .. } => err.to_string(),
        PhotoError::Decode(_) | PhotoError::Encode(_) => format!("Error processing photo: {err}"),
    }
}

// Chat-specific CSS styles
const CHAT_STYLES: &str = r#"
.chat-container {
    display: flex;
    flex-direction: column;
    height: 100%;
    background: var(--chat-bg, #f8fafc);
    color: var(--text-primary, #0f172a);
    overflow: hidden;
}

.chat-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1rem;
    background: var(--brand, #004a99);
    color: white;
    flex-shrink: 0;
}

.chat-title {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-weight: 600;
}

.chat-status {
    display: flex;
    align-items: center;
    gap: 0.25rem;
    font-size: 0.75rem;
    opacity: 0.85;
}

.status-dot {
    color: #4ade80;
    font-size: 0.5rem;
}

.messages-scroll-area {
    flex: 1;
    overflow-y: auto;
    padding: 1rem;
    scroll-behavior: smooth;
}

.messages-list {
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
}

.message-row {
    display: flex;
}

.user-row {
    justify-content: flex-end;
}

.message-content {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    max-width: 80%;
}

.user-row .message-content {
    align-items: flex-end;
}

.message-header {
    display: flex;
    gap: 0.5rem;
    font-size: 0.7rem;
    color: var(--text-muted, #64748b);
}

.sender-name {
    font-weight: 500;
}

.message-bubble {
    padding: 0.625rem 0.875rem;
    border-radius: 1rem;
    font-size: 0.9375rem;
    line-height: 1.45;
    white-space: pre-wrap;
    word-wrap: break-word;
}

.user-bubble {
    background: var(--brand, #004a99);
    color: white;
    border-bottom-right-radius: 0.25rem;
}

.assistant-bubble {
    background: white;
    border: 1px solid var(--border-color, #e2e8f0);
    border-bottom-left-radius: 0.25rem;
}

.message-photo {
    display: block;
    max-width: 200px;
    border-radius: 8px;
    margin-bottom: 8px;
}

.typing-indicator {
    display: flex;
    gap: 0.25rem;
    padding: 0.875rem 1rem;
    background: white;
    border: 1px solid var(--border-color, #e2e8f0);
    border-radius: 1rem;
    border-bottom-left-radius: 0.25rem;
}

.typing-indicator span {
    width: 0.5rem;
    height: 0.5rem;
    background: var(--text-muted, #94a3b8);
    border-radius: 50%;
    animation: typing-bounce 1.4s infinite ease-in-out both;
}

.typing-indicator span:nth-child(1) { animation-delay: -0.32s; }
.typing-indicator span:nth-child(2) { animation-delay: -0.16s; }

@keyframes typing-bounce {
    0%, 80%, 100% { transform: scale(0); }
    40% { transform: scale(1); }
}

.photo-preview {
    padding: 0.5rem 1rem;
    border-top: 1px solid var(--border-color, #e2e8f0);
    background: white;
}

.photo-optimizing {
    padding: 20px;
    text-align: center;
}

.photo-frame {
    position: relative;
    display: inline-block;
}

.photo-frame img {
    max-height: 120px;
    border-radius: 8px;
}

.photo-clear {
    position: absolute;
    top: 5px;
    right: 5px;
    width: 30px;
    height: 30px;
    border: none;
    border-radius: 50%;
    background: rgba(0, 0, 0, 0.7);
    color: white;
    font-size: 20px;
    line-height: 1;
    cursor: pointer;
}

.chat-input-area {
    padding: 0.75rem 1rem;
    background: white;
    border-top: 1px solid var(--border-color, #e2e8f0);
    flex-shrink: 0;
}

.input-wrapper {
    display: flex;
    gap: 0.5rem;
    align-items: flex-end;
}

.chat-textarea {
    flex: 1;
    padding: 0.625rem 1rem;
    border: 1px solid var(--border-color, #cbd5e1);
    border-radius: 1.25rem;
    font: inherit;
    resize: none;
    outline: none;
    min-height: 2.5rem;
    max-height: 8rem;
}

.chat-textarea:focus {
    border-color: var(--brand, #004a99);
}

.photo-button,
.send-button {
    width: 2.5rem;
    height: 2.5rem;
    flex-shrink: 0;
    border: none;
    border-radius: 50%;
    cursor: pointer;
    font-size: 1.1rem;
}

.photo-button {
    background: var(--border-color, #e2e8f0);
}

.send-button {
    background: var(--brand, #004a99);
    color: white;
}

.send-button:disabled {
    background: var(--border-color, #cbd5e1);
    cursor: not-allowed;
}

.input-hint {
    margin-top: 0.375rem;
    font-size: 0.7rem;
    color: var(--text-muted, #64748b);
    text-align: center;
}
"#;
