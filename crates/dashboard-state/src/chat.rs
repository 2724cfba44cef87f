use chrono::{DateTime, Utc};
use dashboard_core::{
    ApiResult, ChatContext, ChatMessage, ChatRequest, ChatRole, ChatTurn, DashboardProvider,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Fixed context sent with every message of a session.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub context: Option<ChatContext>,
    pub industry: Option<String>,
    pub ticker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Conversation with the assistant.
///
/// The user's message is appended before the request goes out; a failed
/// request leaves it in place and records the error.
#[derive(Clone)]
pub struct ChatSession {
    provider: Arc<dyn DashboardProvider>,
    options: ChatOptions,
    state: Arc<Mutex<ChatState>>,
}

impl ChatSession {
    pub fn new(provider: Arc<dyn DashboardProvider>, options: ChatOptions) -> Self {
        Self {
            provider,
            options,
            state: Arc::new(Mutex::new(ChatState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ChatState {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages.clone()
    }

    /// Send `content` with the full conversation so far and append the reply.
    pub async fn send_message(&self, content: impl Into<String>) -> ApiResult<ChatMessage> {
        let user_message = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        };

        let history: Vec<ChatTurn> = {
            let mut state = self.lock();
            state.messages.push(user_message);
            state.is_loading = true;
            state.error = None;
            state.messages.iter().map(ChatTurn::from).collect()
        };

        let request = ChatRequest {
            messages: history,
            context: self.options.context,
            industry: self.options.industry.clone(),
            ticker: self.options.ticker.clone(),
        };
        let result = self.provider.chat(request).await;

        let mut state = self.lock();
        state.is_loading = false;
        match result {
            Ok(response) => {
                let id = if response.id.is_empty() {
                    uuid::Uuid::new_v4().to_string()
                } else {
                    response.id
                };
                let timestamp = response
                    .timestamp
                    .as_deref()
                    .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                    .map(|ts| ts.with_timezone(&Utc))
                    .unwrap_or_else(Utc::now);
                let reply = ChatMessage {
                    id,
                    role: ChatRole::Assistant,
                    content: response.content,
                    timestamp,
                };
                state.messages.push(reply.clone());
                Ok(reply)
            }
            Err(err) => {
                tracing::debug!("Chat request failed: {}", err);
                state.error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Drop the conversation and any error.
    pub fn clear_messages(&self) {
        let mut state = self.lock();
        state.messages.clear();
        state.error = None;
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }
}
