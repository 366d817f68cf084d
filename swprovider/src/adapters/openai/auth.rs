//! OpenAI-specific credential helpers and auth resolution policy.

use crate::{ProviderError, ProviderId, SecureCredentialManager};

use super::types::OpenAiAuth;

impl SecureCredentialManager {
    /// Stores an OpenAI API key for provider-authenticated requests.
    ///
    /// OpenAI keys are expected to start with `sk-`.
    pub fn set_openai_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::missing_credential(ProviderId::OpenAi));
        }

        if !api_key.starts_with("sk-") {
            return Err(ProviderError::authentication(
                "OpenAI API key must start with 'sk-'",
            ));
        }

        self.set_api_key(ProviderId::OpenAi, api_key)
    }
}

/// Resolves bearer authentication for any OpenAI-compatible backend.
pub(crate) fn resolve_api_key_auth(
    credentials: &SecureCredentialManager,
    provider: ProviderId,
) -> Result<OpenAiAuth, ProviderError> {
    credentials.require_api_key(provider).map(OpenAiAuth::ApiKey)
}
