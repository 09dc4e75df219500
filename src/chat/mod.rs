//! Chat client. Responses are simulated locally in the style of the real
//! Copilot chat endpoint; no completions request ever leaves the machine.

mod simulate;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::{Config, ModelInfo};
use crate::context::ChatContext;

const FALLBACK_MAX_TOKENS: u32 = 4096;

/// A prepared chat request with the model and agent fully resolved.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
    pub agent: String,
    pub model: String,
    pub model_info: Option<ModelInfo>,
    pub context: ChatContext,
    pub temperature: f32,
    pub max_tokens: u32,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub content: String,
    pub references: Vec<String>,
}

/// One side of a recorded exchange.
#[derive(Debug, Clone)]
pub enum HistoryEntry {
    Request {
        message: String,
        model: String,
        timestamp: DateTime<Utc>,
    },
    Response {
        content: String,
        timestamp: DateTime<Utc>,
    },
}

/// Stateful chat client: resolves models and agents against the config
/// registries and records the session history.
pub struct ChatClient {
    default_agent: String,
    default_model: String,
    temperature: f32,
    models: BTreeMap<String, ModelInfo>,
    session_id: String,
    history: Vec<HistoryEntry>,
}

impl ChatClient {
    pub fn new(config: &Config) -> Self {
        Self {
            default_agent: config.default_agent().to_string(),
            default_model: config.default_model().to_string(),
            temperature: config.data().chat.temperature,
            models: config.models().clone(),
            session_id: Uuid::new_v4().to_string(),
            history: Vec::new(),
        }
    }

    /// Send one message and record the exchange.
    pub fn send_message(
        &mut self,
        message: &str,
        context: ChatContext,
        agent: Option<&str>,
        model: Option<&str>,
    ) -> ChatResponse {
        let request = self.prepare_request(message, context, agent, model);
        debug!(
            model = %request.model,
            agent = %request.agent,
            context_files = request.context.files.len(),
            "sending chat request"
        );
        let response = simulate::respond(&request);
        self.history.push(HistoryEntry::Request {
            message: message.to_string(),
            model: request.model,
            timestamp: Utc::now(),
        });
        self.history.push(HistoryEntry::Response {
            content: response.content.clone(),
            timestamp: Utc::now(),
        });
        response
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn prepare_request(
        &self,
        message: &str,
        context: ChatContext,
        agent: Option<&str>,
        model: Option<&str>,
    ) -> ChatRequest {
        let requested = model.unwrap_or(&self.default_model);
        // An unknown model id falls back to the configured default.
        let (model, model_info) = match self.models.get(requested) {
            Some(info) => (requested.to_string(), Some(info.clone())),
            None => (
                self.default_model.clone(),
                self.models.get(&self.default_model).cloned(),
            ),
        };
        let max_tokens = model_info
            .as_ref()
            .map(|info| info.max_tokens)
            .unwrap_or(FALLBACK_MAX_TOKENS);
        ChatRequest {
            message: message.to_string(),
            agent: agent.unwrap_or(&self.default_agent).to_string(),
            model,
            model_info,
            context,
            temperature: self.temperature,
            max_tokens,
            session_id: self.session_id.clone(),
        }
    }
}
