//! Chat completion client for the OpenAI API.
//!
//! Only the slice of the API the `/ask` route needs is modelled: a request carrying a single
//! message, and the first choice of the response.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};

use crate::error::{ConfigError, UpstreamError};

pub const MODEL: &str = "gpt-4o-mini";
pub const ROLE: &str = "developer";
pub const STORE_COMPLETION_FOR_30_DAYS: bool = true;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub store: bool,
}

impl ChatCompletionRequest {
    /// The fixed request shape sent for every question.
    pub fn for_question(question: &str) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ROLE.to_string(),
                content: question.to_string(),
            }],
            model: MODEL.to_string(),
            store: STORE_COMPLETION_FOR_30_DAYS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Content of the first choice. A `null` content renders as the literal `"null"`.
    pub fn into_answer(self) -> Result<String, UpstreamError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(UpstreamError::NoChoices)?;
        Ok(choice
            .message
            .content
            .unwrap_or_else(|| "null".to_string()))
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn create(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub timeout_ms: u64,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            project: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub struct OpenAiClient {
    http: reqwest::Client,
    url: String,
    timeout_ms: u64,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(
            |source| ConfigError::InvalidHeader {
                name: "OPENAI_API_KEY",
                source,
            },
        )?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        if let Some(org) = &config.organization {
            let value = HeaderValue::from_str(org).map_err(|source| ConfigError::InvalidHeader {
                name: "OPENAI_ORG_ID",
                source,
            })?;
            headers.insert("openai-organization", value);
        }
        if let Some(project) = &config.project {
            let value =
                HeaderValue::from_str(project).map_err(|source| ConfigError::InvalidHeader {
                    name: "OPENAI_PROJECT_ID",
                    source,
                })?;
            headers.insert("openai-project", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self {
            http,
            url: config.completions_url(),
            timeout_ms: config.timeout_ms,
        })
    }

    async fn send(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion, UpstreamError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(UpstreamError::Status { status, body });
        }

        response.json().await.map_err(UpstreamError::Decode)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn create(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, UpstreamError> {
        timeout(Duration::from_millis(self.timeout_ms), self.send(request))
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout_ms))?
    }
}
