use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    core::config::{GeminiConfig, SamplingConfig},
    error::{PlannerError, Result},
    schemas::SchemaHandle,
    services::prompt::CompiledPrompt,
};

const RESPONSE_MIME_TYPE: &str = "application/json";
const BLOCKING_FINISH_REASONS: [&str; 5] =
    ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII", "RECITATION"];

/// One schema-constrained generation call.
///
/// Implementations pass the prompt and schema through unmodified and return
/// the raw reply text. They must not retry.
#[async_trait]
pub trait GenerationBackend: Send + Sync + std::fmt::Debug {
    async fn generate(
        &self,
        prompt: &CompiledPrompt,
        schema: &SchemaHandle,
        sampling: &SamplingConfig,
    ) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(|err| {
            PlannerError::InvalidRequest(format!("Failed to build HTTP client: {err}"))
        })?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn generate_content(&self, body: &Value) -> Result<String> {
        let request_url = build_generate_url(self.config.base_url(), self.config.model());

        let response = self
            .http
            .post(&request_url)
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| PlannerError::transport(None, format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|err| {
            PlannerError::transport(
                Some(status.as_u16()),
                format!("Failed to read response: {err}"),
            )
        })?;

        debug!(
            target: "tripplanner::gemini",
            status = status.as_u16(),
            bytes = response_text.len(),
            "generation service responded"
        );

        interpret_response(status, &response_text)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(
        &self,
        prompt: &CompiledPrompt,
        schema: &SchemaHandle,
        sampling: &SamplingConfig,
    ) -> Result<String> {
        let body = GenerateContentRequest::new(prompt.as_str())
            .with_response_schema(schema.response_schema().clone())
            .with_sampling(*sampling)
            .into_value();

        self.generate_content(&body).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

/// Classify a `generateContent` reply and pull out the candidate text.
pub(crate) fn interpret_response(status: StatusCode, response_text: &str) -> Result<String> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(PlannerError::transport(
            Some(status.as_u16()),
            "rate limited by the generation service",
        ));
    }

    let response_json: Value = serde_json::from_str(response_text).map_err(|err| {
        PlannerError::transport(
            Some(status.as_u16()),
            format!("Failed to parse service response: {err}"),
        )
    })?;

    if !status.is_success() {
        let api_message = response_json
            .get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| response_text.to_string());

        return Err(PlannerError::transport(Some(status.as_u16()), api_message));
    }

    if let Some(reason) = response_json
        .get("promptFeedback")
        .and_then(|feedback| feedback.get("blockReason"))
        .and_then(Value::as_str)
    {
        warn!(target: "tripplanner::gemini", block_reason = reason, "prompt blocked");
        return Err(PlannerError::ServiceBlocked(reason.to_string()));
    }

    if let Some(usage) = response_json.get("usageMetadata") {
        let count = |field: &str| usage.get(field).and_then(Value::as_u64);
        let (prompt_tokens, output_tokens, total_tokens) = (
            count("promptTokenCount"),
            count("candidatesTokenCount"),
            count("totalTokenCount"),
        );
        debug!(
            target: "tripplanner::gemini",
            prompt_tokens,
            output_tokens,
            total_tokens,
            "token usage"
        );
    }

    let candidate = response_json
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| PlannerError::MalformedOutput("service returned no candidates".to_string()))?;

    if let Some(reason) = candidate.get("finishReason").and_then(Value::as_str) {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            warn!(target: "tripplanner::gemini", finish_reason = reason, "candidate blocked");
            return Err(PlannerError::ServiceBlocked(reason.to_string()));
        }
    }

    let text: String = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(PlannerError::MalformedOutput(
            "candidate contained no text".to_string(),
        ));
    }

    Ok(text)
}

/// Body of a `generateContent` call.
#[derive(Clone, Debug)]
pub struct GenerateContentRequest {
    prompt: String,
    response_schema: Option<Value>,
    sampling: SamplingConfig,
}

impl GenerateContentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_response_schema(mut self, response_schema: Value) -> Self {
        self.response_schema = Some(response_schema);
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn into_value(self) -> Value {
        let mut generation_config = json!({
            "responseMimeType": RESPONSE_MIME_TYPE,
            "temperature": self.sampling.temperature,
            "topP": self.sampling.top_p,
        });

        if let Some(response_schema) = self.response_schema {
            generation_config["responseSchema"] = response_schema;
        }

        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": self.prompt }],
            }],
            "generationConfig": generation_config,
        })
    }
}
