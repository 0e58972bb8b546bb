//! Chat/analysis agent client.
//!
//! POSTs the conversation as `{"messages": [{role, content}]}` and accepts
//! either `{"reply": "..."}` or an OpenAI-style
//! `{"choices": [{"message": {"content": "..."}}]}` body. Each request is
//! bounded by the configured timeout and never retried; callers that must
//! always show something use [`AgentClient::ask_or_fallback`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::AgentError;
use crate::storage::AgentConfig;

const FALLBACK_SNIPPET_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct AgentResponse {
    reply: Option<String>,
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Text to show the user and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "text", rename_all = "lowercase")]
pub enum AgentReply {
    Remote(String),
    Fallback(String),
}

impl AgentReply {
    pub fn text(&self) -> &str {
        match self {
            AgentReply::Remote(t) | AgentReply::Fallback(t) => t,
        }
    }
}

pub struct AgentClient {
    client: Client,
    endpoint: Url,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| AgentError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            message: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Send the conversation and return the agent's reply text.
    pub async fn ask(&self, messages: &[ChatMessage]) -> Result<String, AgentError> {
        debug!(endpoint = %self.endpoint, messages = messages.len(), "posting to agent");
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&AgentRequest { messages })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AgentError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        parse_reply(&body)
    }

    /// Like [`ask`](Self::ask), but any failure degrades to
    /// [`fallback_reply`].
    pub async fn ask_or_fallback(&self, messages: &[ChatMessage]) -> AgentReply {
        match self.ask(messages).await {
            Ok(text) => AgentReply::Remote(text),
            Err(e) => {
                warn!(error = %e, "agent unavailable, using fallback reply");
                AgentReply::Fallback(fallback_reply(messages))
            }
        }
    }
}

fn parse_reply(body: &str) -> Result<String, AgentError> {
    let parsed: AgentResponse =
        serde_json::from_str(body).map_err(|e| AgentError::MalformedResponse(e.to_string()))?;

    if let Some(reply) = parsed.reply {
        return Ok(reply);
    }
    parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AgentError::MalformedResponse("no reply or choices content".into()))
}

/// Deterministic local answer used when the agent cannot be reached.
pub fn fallback_reply(messages: &[ChatMessage]) -> String {
    let last_question = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.trim())
        .filter(|c| !c.is_empty());

    match last_question {
        Some(question) => {
            let mut snippet: String = question.chars().take(FALLBACK_SNIPPET_CHARS).collect();
            if question.chars().count() > FALLBACK_SNIPPET_CHARS {
                snippet.push_str("...");
            }
            format!(
                "The analysis agent is offline right now, so I can't look into \"{snippet}\" yet. \
                 Your points and tasks are safe; please ask again in a few minutes."
            )
        }
        None => "The analysis agent is offline right now. Please try again in a few minutes."
            .to_string(),
    }
}
