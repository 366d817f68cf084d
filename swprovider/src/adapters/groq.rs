//! Groq provider implemented over the OpenAI-compatible transport.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::StreamExt;
use reqwest::Client;

use crate::adapters::openai::{
    OpenAiHttpTransport, OpenAiTransport, build_openai_request, resolve_api_key_auth,
};
use crate::{
    BoxedEventStream, ModelCatalog, ModelProvider, ModelRequest, ModelResponse, ProviderError,
    ProviderFuture, ProviderId, SecureCredentialManager,
};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Clone)]
pub struct GroqProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
    catalog: ModelCatalog,
}

impl GroqProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            catalog: ModelCatalog::groq(),
        }
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client).with_base_url(GROQ_BASE_URL)
    }
}

impl ModelProvider for GroqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }

    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    fn check_credentials(&self) -> Result<(), ProviderError> {
        resolve_api_key_auth(&self.credentials, ProviderId::Groq).map(|_| ())
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_api_key_auth(&self.credentials, ProviderId::Groq)?;
            let groq_request = build_openai_request(request, false);
            let response = self.transport.complete(groq_request, auth).await?;
            Ok(response.into_model_response(ProviderId::Groq))
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedEventStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_api_key_auth(&self.credentials, ProviderId::Groq)?;
            let groq_request = build_openai_request(request, true);
            let mut chunks = self.transport.stream(groq_request, auth).await?;

            let stream = try_stream! {
                while let Some(chunk) = chunks.next().await {
                    yield chunk?.into_stream_event(ProviderId::Groq);
                }
            };

            Ok(Box::pin(stream) as BoxedEventStream<'a>)
        })
    }
}

impl SecureCredentialManager {
    /// Stores a Groq API key. Groq keys are expected to start with `gsk_`.
    pub fn set_groq_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::missing_credential(ProviderId::Groq));
        }

        if !api_key.starts_with("gsk_") {
            return Err(ProviderError::authentication(
                "Groq API key must start with 'gsk_'",
            ));
        }

        self.set_api_key(ProviderId::Groq, api_key)
    }
}
