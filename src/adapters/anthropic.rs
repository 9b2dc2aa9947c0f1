use crate::core::TextGenerator;
use crate::domain::model::GenerationRequest;
use crate::utils::error::{Result, StylistError};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_ERROR_BODY_CHARS: usize = 256;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Anthropic `/v1/messages` 的最小客戶端，只送單一 user 訊息
pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
    messages_url: String,
}

impl AnthropicGenerator {
    pub fn new(api_key: String, messages_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            messages_url,
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let body = MessagesRequest {
            model: &request.settings.model,
            max_tokens: request.settings.max_tokens,
            temperature: request.settings.temperature,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;
        if !status.is_success() {
            return Err(StylistError::GenerationFailed {
                status: status.as_u16(),
                body: sanitize_error_body(&payload),
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&payload).map_err(|e| StylistError::GenerationFailed {
                status: status.as_u16(),
                body: format!("unexpected response shape: {}", e),
            })?;

        let text: String = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();

        Ok(text.trim().to_string())
    }
}

// 錯誤內容會寫進日誌，先遮蔽金鑰再截斷
fn sanitize_error_body(raw: &str) -> String {
    let mut sanitized = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Ok(regex) = Regex::new(r"sk-ant-[A-Za-z0-9_\-]{10,}") {
        sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
    }

    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened: String = sanitized.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return format!("{}...[truncated]", shortened);
    }

    sanitized
}
