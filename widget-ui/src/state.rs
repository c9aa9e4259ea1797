use shared_types::{ChatMessage, ChatRequest, ConversationTurn, PhotoPayload, Sender};

/// Photo waiting to be sent with the next message
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PhotoSlot {
    #[default]
    Empty,
    /// Selected file is still being read or compressed; keeps the photo it
    /// would replace
    Optimizing(Option<PhotoPayload>),
    Ready(PhotoPayload),
}

impl PhotoSlot {
    pub fn is_visible(&self) -> bool {
        !matches!(self, PhotoSlot::Empty)
    }
}

/// Everything the widget remembers between events.
///
/// Held in a `Signal` by `ChatView`; handlers mutate it through the methods
/// below so the transitions stay testable without a browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Turns sent back to the backend; excludes the greeting and error notices
    pub conversation: Vec<ConversationTurn>,
    pub is_typing: bool,
    pub photo: PhotoSlot,
    next_id: u64,
}

impl ChatState {
    pub fn new(greeting: &str) -> Self {
        let mut state = Self {
            messages: Vec::new(),
            conversation: Vec::new(),
            is_typing: false,
            photo: PhotoSlot::Empty,
            next_id: 0,
        };

        if !greeting.is_empty() {
            state.push_message(Sender::Assistant, greeting.to_string(), None);
        }

        state
    }

    pub fn ready_photo(&self) -> Option<&PhotoPayload> {
        match &self.photo {
            PhotoSlot::Ready(photo) => Some(photo),
            _ => None,
        }
    }

    pub fn can_send(&self, input: &str) -> bool {
        !self.is_typing && (!input.trim().is_empty() || self.ready_photo().is_some())
    }

    /// Record the user's turn and build the request for it.
    ///
    /// Returns `None` when there is nothing to send or a reply is pending.
    pub fn begin_send(&mut self, input: &str) -> Option<ChatRequest> {
        let message = input.trim().to_string();
        let photo = self.ready_photo().cloned();

        if message.is_empty() && photo.is_none() {
            return None;
        }
        if self.is_typing {
            return None;
        }

        self.push_message(Sender::User, message.clone(), photo.clone());
        self.photo = PhotoSlot::Empty;
        self.conversation.push(ConversationTurn::user(message.clone()));
        self.is_typing = true;

        Some(ChatRequest {
            message,
            conversation: self.conversation.clone(),
            photo,
        })
    }

    pub fn finish_with_reply(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.is_typing = false;
        self.push_message(Sender::Assistant, text.clone(), None);
        self.conversation.push(ConversationTurn::assistant(text));
    }

    /// Error notices are shown but never fed back to the backend.
    pub fn finish_with_error(&mut self, text: impl Into<String>) {
        self.is_typing = false;
        self.push_message(Sender::Assistant, text.into(), None);
    }

    pub fn mark_photo_optimizing(&mut self) {
        let previous = match std::mem::take(&mut self.photo) {
            PhotoSlot::Ready(photo) => Some(photo),
            PhotoSlot::Optimizing(previous) => previous,
            PhotoSlot::Empty => None,
        };
        self.photo = PhotoSlot::Optimizing(previous);
    }

    /// Drop a rejected selection, putting back the photo it was replacing.
    pub fn reject_pending_photo(&mut self) {
        self.photo = match std::mem::take(&mut self.photo) {
            PhotoSlot::Optimizing(previous) => previous.map_or(PhotoSlot::Empty, PhotoSlot::Ready),
            settled => settled,
        };
    }

    pub fn attach_photo(&mut self, photo: PhotoPayload) {
        self.photo = PhotoSlot::Ready(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = PhotoSlot::Empty;
    }

    fn push_message(&mut self, sender: Sender, text: String, photo: Option<PhotoPayload>) {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: format!("{}-{}", sender.css_class(), self.next_id),
            text,
            sender,
            photo,
            timestamp: chrono::Utc::now(),
        });
    }
}
