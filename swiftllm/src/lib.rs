//! Unified facade over the SwiftLLM workspace crates.
//!
//! This crate is the single dependency for most applications. It re-exports
//! the workspace crates, selects and builds providers, and offers a few
//! macros for messages and schemas.
//!
//! ```rust,no_run
//! use swiftllm::{CapabilityConfig, ProviderConfig, ProviderKind, sw_schema};
//!
//! # async fn run() -> Result<(), swiftllm::ChatError> {
//! let config = CapabilityConfig::builder("Find all the names, ages, and titles in the text provided.")
//!     .schema(sw_schema! { name: "str", age: "int", title: "str" })
//!     .build()?;
//!
//! let mut model = swiftllm::language_model(&ProviderConfig::from_env(ProviderKind::Groq))?
//!     .config(config)
//!     .model("mixtral")
//!     .build()?;
//!
//! let result = model
//!     .generate("Zachary Ivie is a 29 year old data scientist currently looking for new opportunities.")
//!     .await?;
//! println!("{:?}", result.as_structured());
//! # Ok(())
//! # }
//! ```

mod macros;

pub mod prelude;
pub mod providers;
pub mod util;

use std::sync::Arc;

pub use swchat;
pub use swcommon;
pub use swobserve;
pub use swprovider;
pub use swrag;

pub use swchat::{
    ACKNOWLEDGMENT, CancellationToken, CapabilityConfig, CapabilityConfigBuilder, ChatError,
    ChatErrorDetail, ChatErrorKind, ConversationState, DEFAULT_MAX_TOKENS, DiscardFragments,
    FragmentSink, Generation, HistoryWindow, LanguageModel, LanguageModelBuilder, NoopTurnHooks,
    ProviderResponse, ResponseType, Schema, TurnHooks,
};
pub use swcommon::{BoxFuture, GenerationOptions, MetadataMap, SessionId};
pub use swobserve::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeTurnHooks, TracingObservabilityHooks,
};
pub use swprovider::{
    GROQ_MODELS, Message, ModelCatalog, ModelProvider, ModelRequest, ModelResponse,
    NoopOperationHooks, OPENAI_MODELS, ProviderError, ProviderErrorKind, ProviderId,
    ProviderOperationHooks, RetryPolicy, Role, SecretString, SecureCredentialManager, StopReason,
    TokenUsage, UnsupportedModel,
};

pub use providers::{DEFAULT_TIMEOUT, ProviderConfig, ProviderKind};
pub use util::{assistant_message, system_message, user_message};

/// Builds the configured provider and starts a [`LanguageModelBuilder`] over it.
///
/// A missing key surfaces as [`ChatErrorKind::MissingCredential`]; a key the
/// provider rejects by shape surfaces as [`ChatErrorKind::InvalidConfig`].
pub fn language_model(provider: &ProviderConfig) -> Result<LanguageModelBuilder, ChatError> {
    let provider = provider.build_provider().map_err(provider_setup_error)?;
    Ok(LanguageModel::builder(provider))
}

/// OpenAI model builder with the key taken from `OPENAI_API_KEY`.
pub fn openai() -> Result<LanguageModelBuilder, ChatError> {
    language_model(&ProviderConfig::from_env(ProviderKind::OpenAi))
}

/// Groq model builder with the key taken from `GROQ_API_KEY`.
pub fn groq() -> Result<LanguageModelBuilder, ChatError> {
    language_model(&ProviderConfig::from_env(ProviderKind::Groq))
}

/// Attaches panic-isolated `tracing` hooks for provider attempts and turns.
pub fn with_tracing(builder: LanguageModelBuilder) -> LanguageModelBuilder {
    builder
        .provider_hooks(Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)))
        .turn_hooks(Arc::new(SafeTurnHooks::new(TracingObservabilityHooks)))
}

fn provider_setup_error(error: ProviderError) -> ChatError {
    match error.kind {
        ProviderErrorKind::MissingCredential => ChatError::from(error),
        _ => ChatError::invalid_config(error.message.clone())
            .with_detail(ChatErrorDetail::Provider(error)),
    }
}

#[cfg(test)]
mod tests {
    use crate::Role;

    #[test]
    fn sw_msg_macro_creates_expected_message() {
        let message = crate::sw_msg!(user => "hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn sw_messages_macro_builds_message_vector() {
        let messages = crate::sw_messages![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn sw_schema_macro_keeps_declared_order() {
        let schema = crate::sw_schema! { name: "str", age: "int" };
        let fields = schema.fields().collect::<Vec<_>>();
        assert_eq!(fields, vec![("name", "str"), ("age", "int")]);
        assert!(crate::sw_schema!().is_empty());
    }
}
