mod auth;
mod provider;
mod serde_api;
mod sse;
mod transport;
mod types;

pub(crate) use auth::resolve_api_key_auth;
pub(crate) use provider::build_openai_request;
pub use provider::OpenAiProvider;
pub use transport::{OPENAI_BASE_URL, OpenAiChunkStream, OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAuth, OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole,
    OpenAiStreamChunk, OpenAiUsage,
};
