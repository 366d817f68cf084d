//! Conversation state, request composition, and typed response processing
//! over model providers.

mod config;
mod conversation;
mod error;
mod hooks;
mod model;
mod request;
mod response;
mod schema;

pub mod prelude {
    pub use crate::{
        ACKNOWLEDGMENT, CapabilityConfig, CapabilityConfigBuilder, ChatError, ChatErrorDetail,
        ChatErrorKind, ConversationState, DiscardFragments, FragmentSink, Generation,
        HistoryWindow, LanguageModel, LanguageModelBuilder, NoopTurnHooks, ProviderResponse,
        ResponseProcessor, ResponseType, Schema, TurnHooks, compose,
    };
    pub use swcommon::{GenerationOptions, SessionId};
    pub use tokio_util::sync::CancellationToken;
}

pub use config::{CapabilityConfig, CapabilityConfigBuilder, DEFAULT_MAX_TOKENS, ResponseType};
pub use conversation::{ACKNOWLEDGMENT, ConversationState, HistoryWindow};
pub use error::{ChatError, ChatErrorDetail, ChatErrorKind};
pub use hooks::{NoopTurnHooks, TurnHooks};
pub use model::{LanguageModel, LanguageModelBuilder};
pub use request::compose;
pub use response::{
    DiscardFragments, FragmentSink, Generation, ProviderResponse, ResponseProcessor,
};
pub use schema::Schema;
pub use swcommon::{GenerationOptions, SessionId};
pub use tokio_util::sync::CancellationToken;
