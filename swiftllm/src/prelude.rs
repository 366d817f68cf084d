//! Common imports for most SwiftLLM applications.

pub use crate::{assistant_message, groq, language_model, openai, system_message, user_message, with_tracing};
pub use crate::{sw_messages, sw_msg, sw_schema};
pub use crate::{
    CancellationToken, CapabilityConfig, ChatError, ChatErrorKind, FragmentSink, Generation,
    GenerationOptions, HistoryWindow, LanguageModel, LanguageModelBuilder, Message, ModelProvider,
    ProviderConfig, ProviderId, ProviderKind, ResponseType, RetryPolicy, Role, Schema, SessionId,
};
