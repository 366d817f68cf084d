//! Common `swprovider` imports for downstream crates.

pub use crate::{
    BoxedEventStream, Message, ModelCatalog, ModelEventStream, ModelProvider, ModelRequest,
    ModelRequestBuilder, ModelResponse, NoopOperationHooks, ProviderError, ProviderErrorKind,
    ProviderId, ProviderOperationHooks, ProviderReply, ResponseFormat, RetryPolicy, Role,
    SecureCredentialManager, StopReason, StreamEvent, TokenUsage, UnsupportedModel,
    execute_with_retry,
};
pub use swcommon::{BoxFuture, GenerationOptions};
