use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use dataseed_batch::Caller;
use dataseed_core::{CallOutcome, WorkItem, redact_endpoint, redact_secret};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::classify::{status_failure, transport_failure};
use crate::errors::RemoteError;

/// Settings for the description agent endpoint.
#[derive(Clone)]
pub struct DescriptionAgentConfig {
    pub endpoint: String,
    pub agent_id: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Asks a conversational agent for a product description per title.
///
/// The work item key is the product title.
#[derive(Clone)]
pub struct DescriptionAgent {
    client: Client,
    endpoint: String,
    agent_id: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ConversationRequest<'a> {
    agent_id: &'a str,
    inputs: String,
}

#[derive(Debug, Deserialize)]
struct ConversationResponse {
    #[serde(default)]
    outputs: Vec<ConversationOutput>,
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ConversationOutput {
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u64,
}

impl fmt::Debug for DescriptionAgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptionAgentConfig")
            .field("endpoint", &redact_endpoint(&self.endpoint).redacted)
            .field("agent_id", &self.agent_id)
            .field("api_key", &redact_secret(&self.api_key))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Debug for DescriptionAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptionAgent")
            .field("endpoint", &redact_endpoint(&self.endpoint).redacted)
            .field("agent_id", &self.agent_id)
            .field("api_key", &redact_secret(&self.api_key))
            .finish_non_exhaustive()
    }
}

impl DescriptionAgent {
    pub fn new(config: DescriptionAgentConfig) -> Result<Self, RemoteError> {
        if config.api_key.trim().is_empty() {
            return Err(RemoteError::InvalidConfig(
                "description agent requires an api key".to_string(),
            ));
        }
        if config.agent_id.trim().is_empty() {
            return Err(RemoteError::InvalidConfig(
                "description agent requires an agent id".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            agent_id: config.agent_id,
            api_key: config.api_key,
        })
    }

    async fn describe(&self, title: &str) -> CallOutcome {
        let request = ConversationRequest {
            agent_id: &self.agent_id,
            inputs: format!("Generate product description for: {title}"),
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return transport_failure(&err),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return status_failure(status, &body);
        }

        let body: ConversationResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => return transport_failure(&err),
        };

        let Some(output) = body.outputs.first() else {
            return CallOutcome::permanent("No output in response");
        };

        let tokens_used = body.usage.map(|usage| usage.total_tokens).unwrap_or(0);
        debug!(
            endpoint = %redact_endpoint(&self.endpoint).redacted,
            tokens_used,
            "description generated"
        );

        CallOutcome::success(json!({
            "description": content_text(&output.content),
            "conversation_id": body.conversation_id,
            "tokens_used": tokens_used,
        }))
    }
}

#[async_trait]
impl Caller for DescriptionAgent {
    async fn call(&self, item: &WorkItem) -> CallOutcome {
        self.describe(&item.key).await
    }
}

/// Output content is either a plain string or a list of text chunks.
fn content_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(chunks) => chunks
            .iter()
            .filter_map(|chunk| match chunk {
                Value::String(text) => Some(text.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}
