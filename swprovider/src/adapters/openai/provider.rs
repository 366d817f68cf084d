//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::StreamExt;

use crate::{
    BoxedEventStream, ModelCatalog, ModelProvider, ModelRequest, ModelResponse, ProviderError,
    ProviderFuture, ProviderId, ResponseFormat, SecureCredentialManager,
};

use super::auth::resolve_api_key_auth;
use super::transport::OpenAiTransport;
use super::types::{OpenAiMessage, OpenAiRequest};

#[derive(Clone)]
pub struct OpenAiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
    catalog: ModelCatalog,
}

impl OpenAiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            catalog: ModelCatalog::openai(),
        }
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    fn check_credentials(&self) -> Result<(), ProviderError> {
        resolve_api_key_auth(&self.credentials, ProviderId::OpenAi).map(|_| ())
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_api_key_auth(&self.credentials, ProviderId::OpenAi)?;
            let openai_request = build_openai_request(request, false);
            let response = self.transport.complete(openai_request, auth).await?;
            Ok(response.into_model_response(ProviderId::OpenAi))
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_api_key_auth(&self.credentials, ProviderId::OpenAi)?;
            let openai_request = build_openai_request(request, true);
            let mut chunks = self.transport.stream(openai_request, auth).await?;

            let stream = try_stream! {
                while let Some(chunk) = chunks.next().await {
                    yield chunk?.into_stream_event(ProviderId::OpenAi);
                }
            };

            Ok(Box::pin(stream) as BoxedEventStream<'a>)
        })
    }
}

/// Translates a provider-agnostic request into the OpenAI-compatible shape.
///
/// Unset tunables stay `None` so they are omitted from the wire payload.
pub(crate) fn build_openai_request(request: ModelRequest, stream: bool) -> OpenAiRequest {
    let messages = request
        .messages
        .into_iter()
        .map(OpenAiMessage::from)
        .collect::<Vec<_>>();

    let options = request.options;
    OpenAiRequest {
        model: request.model,
        messages,
        max_tokens: options.max_tokens,
        temperature: options.temperature,
        top_p: options.top_p,
        stop: options.stop,
        stream: if stream { Some(true) } else { options.stream },
        json_mode: request.response_format == ResponseFormat::JsonObject,
    }
}
