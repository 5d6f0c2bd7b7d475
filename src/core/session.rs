//! Chat session adapter: the stateful handle between the conversation store
//! and the remote Gemini API.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{Content, GenerateContentRequest, GenerateContentResponse};
use crate::core::config::SessionConfig;
use crate::utils::url::{generate_content_url, model_url};

/// Errors surfaced to the UI error banner. Nothing here is fatal to the
/// process and nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Session setup failed: bad credential, network unreachable, or the
    /// service rejected the configured model.
    Initialization(String),
    /// A specific send failed: network failure, quota or safety rejection,
    /// or a response with no usable text.
    Send(String),
    /// A send was attempted before any session was established.
    NoSession,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Initialization(detail) => {
                write!(f, "Failed to initialize chat: {detail}")
            }
            ChatError::Send(detail) => write!(f, "Failed to send message: {detail}"),
            ChatError::NoSession => {
                write!(f, "No chat session is active; check your API key and restart")
            }
        }
    }
}

impl Error for ChatError {}

/// Seam between the session and the HTTP transport so tests can stand in a
/// mock service.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Cheap reachability/credential check against the configured model.
    async fn probe_model(&self, config: &SessionConfig) -> Result<(), String>;

    async fn generate(
        &self,
        config: &SessionConfig,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, String>;
}

/// reqwest-backed implementation talking to generativelanguage.googleapis.com.
pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        HttpBackend {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeBackend for HttpBackend {
    async fn probe_model(&self, config: &SessionConfig) -> Result<(), String> {
        let url = model_url(&config.base_url, &config.model);
        debug!(model = %config.model, "probing model endpoint");
        let response = self
            .client
            .get(url)
            .query(&[("key", config.api_key.as_str())])
            .send()
            .await
            .map_err(|err| format!("network error: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(%status, "model probe rejected");
            return Err(format!("service returned {status}: {body}"));
        }
        Ok(())
    }

    async fn generate(
        &self,
        config: &SessionConfig,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, String> {
        let url = generate_content_url(&config.base_url, &config.model);
        debug!(model = %config.model, turns = request.contents.len(), "sending generate request");
        let response = self
            .client
            .post(url)
            .query(&[("key", config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| format!("network error: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(%status, "generate request rejected");
            return Err(format!("service returned {status}: {body}"));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| format!("malformed response: {err}"))
    }
}

/// Handle to an established session. Constructed once at startup; every send
/// carries the caller-supplied running history, so the handle itself stays
/// stateless with respect to the conversation.
#[derive(Clone)]
pub struct ChatSession {
    config: SessionConfig,
    backend: Arc<dyn GenerativeBackend>,
}

impl ChatSession {
    /// Establish a session by probing the configured model. A rejecting
    /// credential fails every attempt; there is no partial success.
    pub async fn initialize(
        config: SessionConfig,
        backend: Arc<dyn GenerativeBackend>,
    ) -> Result<Self, ChatError> {
        backend
            .probe_model(&config)
            .await
            .map_err(ChatError::Initialization)?;
        Ok(ChatSession { config, backend })
    }

    /// Forward `text` to the model with `history` (all prior turns) ahead of
    /// it. Returns the reply text; the caller owns appending both turns to
    /// the store.
    pub async fn send(&self, text: &str, history: &[Content]) -> Result<String, ChatError> {
        let mut contents = history.to_vec();
        contents.push(Content::user(text));
        let request = GenerateContentRequest {
            contents,
            generation_config: self.config.generation.clone(),
            safety_settings: self.config.safety.clone(),
        };

        let response = self
            .backend
            .generate(&self.config, request)
            .await
            .map_err(ChatError::Send)?;

        match response.first_candidate_text() {
            Some(reply) => Ok(reply),
            None => {
                let detail = match response.block_reason() {
                    Some(reason) => format!("request blocked by safety filter ({reason})"),
                    None => "response contained no candidates".to_string(),
                };
                Err(ChatError::Send(detail))
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Candidate, Part};
    use crate::core::config::SessionConfig;
    use std::sync::Mutex;

    fn test_config() -> SessionConfig {
        SessionConfig::new("test-key", "gemini-1.0-pro", None)
    }

    struct RejectingBackend;

    #[async_trait]
    impl GenerativeBackend for RejectingBackend {
        async fn probe_model(&self, _config: &SessionConfig) -> Result<(), String> {
            Err("service returned 403 Forbidden: invalid key".to_string())
        }

        async fn generate(
            &self,
            _config: &SessionConfig,
            _request: GenerateContentRequest,
        ) -> Result<GenerateContentResponse, String> {
            Err("unreachable".to_string())
        }
    }

    /// Replies with a fixed string and records the request contents it saw.
    struct CannedBackend {
        reply: String,
        seen: Mutex<Vec<Vec<Content>>>,
    }

    impl CannedBackend {
        fn new(reply: &str) -> Self {
            CannedBackend {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for CannedBackend {
        async fn probe_model(&self, _config: &SessionConfig) -> Result<(), String> {
            Ok(())
        }

        async fn generate(
            &self,
            _config: &SessionConfig,
            request: GenerateContentRequest,
        ) -> Result<GenerateContentResponse, String> {
            self.seen.lock().unwrap().push(request.contents.clone());
            Ok(GenerateContentResponse {
                candidates: vec![Candidate {
                    content: Some(Content {
                        role: "model".to_string(),
                        parts: vec![Part {
                            text: self.reply.clone(),
                        }],
                    }),
                    finish_reason: Some("STOP".to_string()),
                }],
                prompt_feedback: None,
            })
        }
    }

    struct FailingSendBackend;

    #[async_trait]
    impl GenerativeBackend for FailingSendBackend {
        async fn probe_model(&self, _config: &SessionConfig) -> Result<(), String> {
            Ok(())
        }

        async fn generate(
            &self,
            _config: &SessionConfig,
            _request: GenerateContentRequest,
        ) -> Result<GenerateContentResponse, String> {
            Err("network error: connection reset".to_string())
        }
    }

    #[tokio::test]
    async fn initialization_failure_is_idempotent() {
        let backend = Arc::new(RejectingBackend);
        for _ in 0..3 {
            let result = ChatSession::initialize(test_config(), backend.clone()).await;
            assert!(matches!(result, Err(ChatError::Initialization(_))));
        }
    }

    #[tokio::test]
    async fn send_returns_reply_text_on_success() {
        let backend = Arc::new(CannedBackend::new("Hi! How can I help?"));
        let session = ChatSession::initialize(test_config(), backend.clone())
            .await
            .unwrap();
        let reply = session.send("Hello", &[]).await.unwrap();
        assert_eq!(reply, "Hi! How can I help?");
    }

    #[tokio::test]
    async fn send_carries_full_history_plus_new_turn() {
        let backend = Arc::new(CannedBackend::new("ok"));
        let session = ChatSession::initialize(test_config(), backend.clone())
            .await
            .unwrap();

        let history = vec![Content::user("first"), Content::model("reply")];
        session.send("second", &history).await.unwrap();

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let contents = &seen[0];
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0], Content::user("first"));
        assert_eq!(contents[1], Content::model("reply"));
        assert_eq!(contents[2], Content::user("second"));
    }

    #[tokio::test]
    async fn transport_failure_becomes_send_error() {
        let backend = Arc::new(FailingSendBackend);
        let session = ChatSession::initialize(test_config(), backend)
            .await
            .unwrap();
        let result = session.send("Hello", &[]).await;
        assert!(matches!(result, Err(ChatError::Send(_))));
    }

    #[tokio::test]
    async fn candidate_free_response_becomes_send_error() {
        struct EmptyBackend;

        #[async_trait]
        impl GenerativeBackend for EmptyBackend {
            async fn probe_model(&self, _config: &SessionConfig) -> Result<(), String> {
                Ok(())
            }

            async fn generate(
                &self,
                _config: &SessionConfig,
                _request: GenerateContentRequest,
            ) -> Result<GenerateContentResponse, String> {
                Ok(GenerateContentResponse {
                    candidates: Vec::new(),
                    prompt_feedback: Some(crate::api::PromptFeedback {
                        block_reason: Some("SAFETY".to_string()),
                    }),
                })
            }
        }

        let session = ChatSession::initialize(test_config(), Arc::new(EmptyBackend))
            .await
            .unwrap();
        let result = session.send("Hello", &[]).await;
        match result {
            Err(ChatError::Send(detail)) => assert!(detail.contains("SAFETY")),
            other => panic!("expected send error, got {other:?}"),
        }
    }
}
