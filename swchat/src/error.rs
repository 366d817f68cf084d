//! Chat-layer errors and classification.
//!
//! ```rust
//! use swchat::{ChatError, ChatErrorKind};
//!
//! let error = ChatError::cancelled();
//! assert_eq!(error.kind, ChatErrorKind::Cancelled);
//! assert!(error.to_string().starts_with("Cancelled:"));
//! ```

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use swprovider::{ProviderError, ProviderErrorKind, UnsupportedModel};

const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    MissingCredential,
    UnsupportedModel,
    SchemaMismatch,
    MalformedJson,
    ProviderTransport,
    Cancelled,
    InvalidRequest,
    InvalidConfig,
}

/// Structured payload attached to errors that carry more than a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatErrorDetail {
    UnsupportedModel {
        requested: String,
        supported: Vec<String>,
    },
    SchemaMismatch {
        expected: BTreeSet<String>,
        actual: BTreeSet<String>,
    },
    MalformedJson {
        excerpt: String,
    },
    Provider(ProviderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub detail: Option<ChatErrorDetail>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: ChatErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidConfig, message)
    }

    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::MissingCredential, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ChatErrorKind::Cancelled, "generation was cancelled")
    }

    pub fn schema_mismatch(expected: BTreeSet<String>, actual: BTreeSet<String>) -> Self {
        let message = format!(
            "response keys {} do not match schema keys {}",
            format_keys(&actual),
            format_keys(&expected)
        );

        Self::new(ChatErrorKind::SchemaMismatch, message)
            .with_detail(ChatErrorDetail::SchemaMismatch { expected, actual })
    }

    pub fn malformed_json(content: &str, cause: impl Display) -> Self {
        let excerpt = excerpt(content);
        let message = format!("response is not valid JSON ({cause}): {excerpt}");

        Self::new(ChatErrorKind::MalformedJson, message)
            .with_detail(ChatErrorDetail::MalformedJson { excerpt })
    }

    pub fn provider_transport(error: ProviderError) -> Self {
        Self::new(
            ChatErrorKind::ProviderTransport,
            format!("provider call failed: {error}"),
        )
        .with_detail(ChatErrorDetail::Provider(error))
    }

    /// Underlying provider failure, when this error wraps one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match &self.detail {
            Some(ChatErrorDetail::Provider(error)) => Some(error),
            _ => None,
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        match value.kind {
            ProviderErrorKind::MissingCredential => {
                ChatError::missing_credential(value.message.clone())
                    .with_detail(ChatErrorDetail::Provider(value))
            }
            ProviderErrorKind::InvalidRequest => ChatError::invalid_request(value.message.clone())
                .with_detail(ChatErrorDetail::Provider(value)),
            _ => ChatError::provider_transport(value),
        }
    }
}

impl From<UnsupportedModel> for ChatError {
    fn from(value: UnsupportedModel) -> Self {
        ChatError::new(ChatErrorKind::UnsupportedModel, value.to_string()).with_detail(
            ChatErrorDetail::UnsupportedModel {
                requested: value.requested,
                supported: value.supported,
            },
        )
    }
}

fn format_keys(keys: &BTreeSet<String>) -> String {
    let joined = keys.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    format!("{{{joined}}}")
}

fn excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swprovider::{ModelCatalog, ProviderId};

    fn keys(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn schema_mismatch_names_both_key_sets() {
        let error = ChatError::schema_mismatch(keys(&["name", "age", "title"]), keys(&["name", "age"]));
        assert_eq!(error.kind, ChatErrorKind::SchemaMismatch);
        assert!(error.message.contains("{age, name}"));
        assert!(error.message.contains("{age, name, title}"));
    }

    #[test]
    fn malformed_json_excerpt_is_bounded() {
        let content = "x".repeat(500);
        let error = ChatError::malformed_json(&content, "expected value");
        match error.detail {
            Some(ChatErrorDetail::MalformedJson { excerpt }) => {
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS)
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn provider_errors_map_to_chat_kinds() {
        let missing: ChatError = ProviderError::missing_credential(ProviderId::Groq).into();
        assert_eq!(missing.kind, ChatErrorKind::MissingCredential);

        let invalid: ChatError = ProviderError::invalid_request("bad").into();
        assert_eq!(invalid.kind, ChatErrorKind::InvalidRequest);

        let timeout: ChatError = ProviderError::timeout("slow").into();
        assert_eq!(timeout.kind, ChatErrorKind::ProviderTransport);
        assert_eq!(
            timeout.provider_error().map(|error| error.kind),
            Some(ProviderErrorKind::Timeout)
        );
    }

    #[test]
    fn unsupported_model_carries_canonical_set() {
        let unsupported = ModelCatalog::groq()
            .resolve("claude")
            .expect_err("claude is not a groq model");
        let error = ChatError::from(unsupported);
        assert_eq!(error.kind, ChatErrorKind::UnsupportedModel);
        match error.detail {
            Some(ChatErrorDetail::UnsupportedModel { requested, supported }) => {
                assert_eq!(requested, "claude");
                assert_eq!(supported.len(), 4);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }
}
