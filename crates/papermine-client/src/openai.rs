//! OpenAI chat-completions provider

use crate::error::ProviderError;
use async_trait::async_trait;
use papermine_domain::{CompletionProvider, ProviderResponse, ResponseFormat, TokenUsage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat-completions API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default timeout for one completion exchange (10 minutes; reasoning
/// models routinely take minutes on full-paper prompts)
const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// How much of an error body to keep in error messages
const ERROR_BODY_LIMIT: usize = 512;

/// Chat-completions API provider.
///
/// Performs exactly one request/response exchange per call; retries are the
/// client's concern.
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions endpoint
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<WireResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct WireResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response body from the chat-completions endpoint
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

impl OpenAiProvider {
    /// Create a provider against the default endpoint
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Create a provider against a custom endpoint (proxy, compatible server)
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    type Error = ProviderError;

    async fn complete(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<ProviderResponse, Self::Error> {
        let url = format!("{}/chat/completions", self.endpoint);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: match format {
                ResponseFormat::Json => Some(WireResponseFormat {
                    kind: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Communication(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(ProviderError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("response has no choices".to_string()))?;

        let usage = payload.usage.map(|u| TokenUsage {
            input: u.prompt_tokens,
            output: u.completion_tokens,
        });

        Ok(ProviderResponse { text, usage })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("gpt-4.1", "sk-test");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), "gpt-4.1");
    }

    #[test]
    fn test_json_format_serializes_json_object() {
        let request = ChatRequest {
            model: "gpt-4.1",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            response_format: Some(WireResponseFormat {
                kind: "json_object",
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_text_format_omits_response_format() {
        let request = ChatRequest {
            model: "gpt-4.1",
            messages: vec![],
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_response_decoding() {
        let raw = r#"{
            "choices": [{"message": {"content": "{\"Dataset_Names\": []}"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
        }"#;
        let payload: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            payload.choices[0].message.content.as_deref(),
            Some("{\"Dataset_Names\": []}")
        );
        let usage = payload.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 120);
        assert_eq!(usage.completion_tokens, 30);
    }

    #[test]
    fn test_response_without_usage_decodes() {
        let raw = r#"{"choices": [{"message": {"content": "ok"}}]}"#;
        let payload: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(payload.usage.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_communication_error() {
        let provider = OpenAiProvider::with_endpoint("http://127.0.0.1:9", "gpt-4.1", "sk-test");
        let result = provider.complete("test", ResponseFormat::Text).await;
        assert!(matches!(result, Err(ProviderError::Communication(_))));
    }
}
