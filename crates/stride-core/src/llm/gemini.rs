use crate::error::CoachError;
use crate::llm::traits::*;
use serde::Deserialize;
use serde_json::Value;

/// Client for the Google Gemini generateContent API.
///
/// Gemini quirks relative to the usual chat shape: `contents` instead of
/// `messages`, `parts` instead of `content`, role `model` instead of
/// `assistant`, parameters under `generationConfig`, and the API key as a
/// `?key=` query parameter rather than a header.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_output_tokens: 2048,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    fn build_request_body(&self, turns: &[Turn]) -> Value {
        let contents: Vec<Value> = turns
            .iter()
            .map(|t| {
                let role = match t.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                let parts: Vec<Value> = t
                    .fragments
                    .iter()
                    .map(|f| match f {
                        Fragment::Text(s) => serde_json::json!({ "text": s }),
                        Fragment::Image { media_type, data } => serde_json::json!({
                            "inline_data": {
                                "mime_type": media_type,
                                "data": data,
                            }
                        }),
                    })
                    .collect();
                serde_json::json!({
                    "role": role,
                    "parts": parts,
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.max_output_tokens,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
}

#[async_trait::async_trait]
impl ChatModel for GeminiClient {
    async fn chat(&self, turns: &[Turn]) -> Result<ChatResponse, CoachError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request_body = self.build_request_body(turns);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(CoachError::Remote(format!(
                "Gemini API error ({}): {}",
                status, response_text
            )));
        }

        let api_response: GenerateResponse = serde_json::from_str(&response_text)
            .map_err(|e| CoachError::Remote(format!("failed to parse response: {e}")))?;

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| CoachError::Remote("response contained no candidates".to_string()))?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(ChatResponse {
            text,
            usage: api_response.usage_metadata.map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
        })
    }
}
