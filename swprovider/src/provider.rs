//! Capability interface implemented once per backend.

use std::future::Future;
use std::pin::Pin;

use crate::{
    BoxedEventStream, ModelCatalog, ModelRequest, ModelResponse, ProviderError, ProviderId,
};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Uniform handle returned by [`ModelProvider::generate`].
///
/// A streamed reply is lazy, finite, and not restartable: it must be drained
/// to obtain the full assistant content.
pub enum ProviderReply<'a> {
    Complete(ModelResponse),
    Streamed(BoxedEventStream<'a>),
}

impl ProviderReply<'_> {
    pub fn is_streamed(&self) -> bool {
        matches!(self, Self::Streamed(_))
    }
}

impl std::fmt::Debug for ProviderReply<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete(response) => f.debug_tuple("Complete").field(response).finish(),
            Self::Streamed(_) => f.write_str("Streamed(..)"),
        }
    }
}

pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Canonical identifiers this backend accepts, in resolution order.
    fn catalog(&self) -> &ModelCatalog;

    /// Fails with `MissingCredential` when the backend cannot authenticate.
    fn check_credentials(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>>;

    fn generate<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ProviderReply<'a>, ProviderError>> {
        Box::pin(async move {
            if request.is_streaming() {
                Ok(ProviderReply::Streamed(self.stream(request).await?))
            } else {
                Ok(ProviderReply::Complete(self.complete(request).await?))
            }
        })
    }
}
