use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::consts::{
    API_KEY_HEADER, DEFAULT_API_BASE, DEFAULT_GENERATE_TIMEOUT_SECS, DEFAULT_LIST_TIMEOUT_SECS,
    GENERATE_CONTENT,
};

use super::{Generation, ModelInfo, Oracle, OracleError};

/// Content categories relaxed to `BLOCK_NONE`. Roasts are insulting on purpose.
const SAFETY_SETTINGS: &[SafetySetting] = &[
    SafetySetting {
        category: "HARM_CATEGORY_HARASSMENT",
        threshold: "BLOCK_NONE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_HATE_SPEECH",
        threshold: "BLOCK_NONE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        threshold: "BLOCK_NONE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_DANGEROUS_CONTENT",
        threshold: "BLOCK_NONE",
    },
];

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Versioned API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base: String,
    pub api_key: String,
    pub list_timeout: Duration,
    pub generate_timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            list_timeout: Duration::from_secs(DEFAULT_LIST_TIMEOUT_SECS),
            generate_timeout: Duration::from_secs(DEFAULT_GENERATE_TIMEOUT_SECS),
        }
    }
}

/// An oracle backed by the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn build_request(prompt: &str) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            safety_settings: SAFETY_SETTINGS,
        }
    }

    fn parse_generation(resp: GenerateContentResponse) -> Generation {
        let block_reason = resp.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = resp.candidates.into_iter().next() else {
            return Generation::Empty {
                reason: block_reason,
            };
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Generation::Empty {
                reason: candidate.finish_reason.or(block_reason),
            }
        } else {
            Generation::Text(text)
        }
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, OracleError> {
        let resp = self
            .http
            .get(self.url("models"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.list_timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let body: ListModelsResponse = read_json(resp).await?;
        debug!("service listed {} model(s)", body.models.len());

        Ok(body
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                supported_generation_methods: m.supported_generation_methods,
            })
            .collect())
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation, OracleError> {
        let path = format!("{}:{}", model_path(model), GENERATE_CONTENT);
        let resp = self
            .http
            .post(self.url(&path))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(self.config.generate_timeout)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        let body: GenerateContentResponse = read_json(resp).await?;
        Ok(Self::parse_generation(body))
    }
}

/// Model names are listed as `models/<id>`; accept bare ids too.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn transport_error(err: reqwest::Error) -> OracleError {
    if err.is_timeout() {
        OracleError::Timeout
    } else {
        OracleError::Transport(err.to_string())
    }
}

/// Decode a success body, or turn an error status into [`OracleError::Status`].
async fn read_json<T: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> Result<T, OracleError> {
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(transport_error)?;

    if !status.is_success() {
        let message = match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(err) => err.error.message,
            Err(_) => String::from_utf8_lossy(&bytes).trim().to_string(),
        };
        return Err(OracleError::Status {
            code: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| OracleError::Malformed(e.to_string()))
}

// --- API types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    safety_settings: &'static [SafetySetting],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelResponse {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Generation {
        GeminiClient::parse_generation(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn request_carries_prompt_and_safety_overrides() {
        let body = serde_json::to_value(GeminiClient::build_request("roast me")).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "roast me");

        let settings = body["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        assert!(settings.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
        assert!(
            settings
                .iter()
                .any(|s| s["category"] == "HARM_CATEGORY_HARASSMENT")
        );
    }

    #[test]
    fn first_candidate_text_is_used() {
        let generation = parse(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "You are "}, {"text": "a Gemini."}], "role": "model"},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        );
        assert_eq!(generation, Generation::Text("You are a Gemini.".to_string()));
    }

    #[test]
    fn missing_candidates_is_empty() {
        assert_eq!(parse("{}"), Generation::Empty { reason: None });
        assert_eq!(
            parse(r#"{"candidates": []}"#),
            Generation::Empty { reason: None }
        );
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let generation = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        assert_eq!(
            generation,
            Generation::Empty {
                reason: Some("SAFETY".to_string())
            }
        );
    }

    #[test]
    fn candidate_without_content_uses_finish_reason() {
        let generation = parse(r#"{"candidates": [{"finishReason": "RECITATION"}]}"#);
        assert_eq!(
            generation,
            Generation::Empty {
                reason: Some("RECITATION".to_string())
            }
        );
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let generation = parse(
            r#"{"candidates": [{"content": {"parts": [
                {"thought": true, "thoughtSignature": "abc"},
                {"text": "Classic Leo."}
            ]}}]}"#,
        );
        assert_eq!(generation, Generation::Text("Classic Leo.".to_string()));
    }

    #[test]
    fn model_path_adds_prefix() {
        assert_eq!(model_path("gemini-pro"), "models/gemini-pro");
        assert_eq!(model_path("models/gemini-pro"), "models/gemini-pro");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = GeminiClient::new(GeminiConfig {
            api_base: "http://localhost:1/v1beta/".to_string(),
            ..GeminiConfig::new("k")
        });
        assert_eq!(client.url("models"), "http://localhost:1/v1beta/models");
    }
}
