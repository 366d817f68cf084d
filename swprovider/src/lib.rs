//! Provider-agnostic model abstractions plus OpenAI-compatible backends.
//!
//! ```rust
//! use swprovider::{Message, ModelCatalog, ModelRequest, Role};
//!
//! let catalog = ModelCatalog::groq();
//! let model = catalog.resolve("mixtral").unwrap();
//! assert_eq!(model, "mixtral-8x7b-32768");
//!
//! let request = ModelRequest::new(model, vec![Message::new(Role::User, "hi")]);
//! assert!(request.validate().is_ok());
//! ```

pub mod adapters;
mod catalog;
mod credentials;
mod error;
mod model;
pub mod prelude;
mod provider;
mod resilience;
mod stream;

pub use catalog::{GROQ_MODELS, ModelCatalog, OPENAI_MODELS, UnsupportedModel};
pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderId, ResponseFormat, Role,
    StopReason, TokenUsage,
};
pub use provider::{ModelProvider, ProviderFuture, ProviderReply};
pub use resilience::{
    NoopOperationHooks, ProviderOperationHooks, RetryPolicy, execute_with_retry,
};
pub use stream::{BoxedEventStream, ModelEventStream, StreamEvent, VecEventStream};
pub use swcommon::GenerationOptions;
