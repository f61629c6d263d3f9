//! Chat-completions classifier over HTTP.

use crate::classify::{ClassificationFailure, Classifier, parse_classification};
use crate::controller::CaptureError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;
use voxshape_spawn::{COLOR_TOKENS, SIZE_TOKENS, ShapeRequest};

/// Where and how to reach the classification endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Full chat-completions URL.
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            model: "o3-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: 30,
        }
    }
}

/// Sends each utterance to an OpenAI-compatible chat endpoint in JSON mode.
///
/// The blocking request runs on tokio's blocking pool; only the reply text
/// comes back to the local task.
#[derive(Clone)]
pub struct HttpClassifier {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
    system_prompt: String,
}

impl HttpClassifier {
    /// Build from config, reading the API key from the environment.
    pub fn from_config(
        config: &ClassifierConfig,
        shapes: &BTreeSet<String>,
    ) -> Result<Self, CaptureError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            CaptureError::Unavailable(format!("{} is not set", config.api_key_env))
        })?;
        Ok(Self::new(config, api_key, shapes))
    }

    pub fn new(config: &ClassifierConfig, api_key: String, shapes: &BTreeSet<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        tracing::info!(endpoint = %config.endpoint, model = %config.model, "http classifier ready");
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            system_prompt: system_prompt(shapes),
        }
    }

    fn request_body(&self, utterance: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": self.system_prompt},
                {"role": "user", "content": format!("Extract the shape described in: \"{utterance}\"")},
            ],
            "response_format": {"type": "json_object"},
        })
    }
}

impl std::fmt::Debug for HttpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClassifier")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl Classifier for HttpClassifier {
    fn name(&self) -> &str {
        "http"
    }

    fn classify(
        &self,
        utterance: &str,
    ) -> impl Future<Output = Result<ShapeRequest, ClassificationFailure>> {
        let body = self.request_body(utterance);
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let auth = format!("Bearer {}", self.api_key);
        async move {
            let content =
                tokio::task::spawn_blocking(move || post_chat(&agent, &endpoint, &auth, body))
                    .await
                    .map_err(|e| ClassificationFailure::Transport(e.to_string()))??;
            tracing::debug!(%content, "classifier reply");
            parse_classification(&content)
        }
    }
}

fn post_chat(
    agent: &ureq::Agent,
    endpoint: &str,
    auth: &str,
    body: serde_json::Value,
) -> Result<String, ClassificationFailure> {
    let resp: serde_json::Value = agent
        .post(endpoint)
        .set("Content-Type", "application/json")
        .set("Authorization", auth)
        .send_json(body)
        .map_err(|e| ClassificationFailure::Transport(e.to_string()))?
        .into_json()
        .map_err(|e| ClassificationFailure::Transport(e.to_string()))?;
    extract_content(&resp)
}

/// Pull `choices[0].message.content` out of a chat-completions reply.
fn extract_content(resp: &serde_json::Value) -> Result<String, ClassificationFailure> {
    resp["choices"][0]["message"]["content"]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or(ClassificationFailure::EmptyResponse)
}

fn quoted<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join("|")
}

fn system_prompt(shapes: &BTreeSet<String>) -> String {
    let shapes = quoted(shapes.iter().map(String::as_str));
    let colors = quoted(COLOR_TOKENS.iter().copied());
    let sizes = quoted(SIZE_TOKENS.iter().copied());
    format!(
        "Extract the shape described by the user's utterance and reply with only this JSON object: \
         {{\"shape\": {shapes}, \"color\": {colors}, \"size\": {sizes}}}. \
         Sizes are small (30px), medium (50px) and large (70px). \
         If the utterance mentions a dinosaur, use \"dinosaur\" as the shape."
    )
}
