//! Provider selection and construction for facade consumers.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::{ModelProvider, ProviderError, ProviderId, SecureCredentialManager};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Groq,
}

impl ProviderKind {
    /// Parses a provider name, accepting a few common spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" | "open-ai" | "open_ai" => Some(Self::OpenAi),
            "groq" => Some(Self::Groq),
            _ => None,
        }
    }

    pub fn provider_id(self) -> ProviderId {
        match self {
            Self::OpenAi => ProviderId::OpenAi,
            Self::Groq => ProviderId::Groq,
        }
    }

    /// Environment variable consulted by [`ProviderConfig::from_env`].
    pub fn api_key_env_var(self) -> &'static str {
        self.provider_id().api_key_env_var()
    }
}

impl From<ProviderKind> for ProviderId {
    fn from(value: ProviderKind) -> Self {
        value.provider_id()
    }
}

#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Overrides the provider's default API root.
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
        }
    }

    /// Reads the provider's API key variable from the process environment.
    ///
    /// This is the only place the workspace reads environment variables.
    pub fn from_env(kind: ProviderKind) -> Self {
        Self::from_lookup(kind, |name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but resolves variables through `lookup`.
    pub fn from_lookup(kind: ProviderKind, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(kind.api_key_env_var()).filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            ..Self::new(kind)
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build_provider(&self) -> Result<Arc<dyn ModelProvider>, ProviderError> {
        let provider_id = self.kind.provider_id();
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::missing_credential(provider_id))?
            .to_string();

        let credentials = Arc::new(SecureCredentialManager::new());
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        match self.kind {
            ProviderKind::OpenAi => {
                build_openai_provider(credentials, api_key, http, self.base_url.as_deref())
            }
            ProviderKind::Groq => {
                build_groq_provider(credentials, api_key, http, self.base_url.as_deref())
            }
        }
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(feature = "provider-openai")]
fn build_openai_provider(
    credentials: Arc<SecureCredentialManager>,
    api_key: String,
    http: Client,
    base_url: Option<&str>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use swprovider::adapters::openai::{OpenAiHttpTransport, OpenAiProvider};

    credentials.set_openai_api_key(api_key)?;
    let mut transport = OpenAiHttpTransport::new(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(OpenAiProvider::new(credentials, Arc::new(transport))))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_provider(
    _credentials: Arc<SecureCredentialManager>,
    _api_key: String,
    _http: Client,
    _base_url: Option<&str>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on swiftllm",
    ))
}

#[cfg(feature = "provider-groq")]
fn build_groq_provider(
    credentials: Arc<SecureCredentialManager>,
    api_key: String,
    http: Client,
    base_url: Option<&str>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use swprovider::adapters::groq::GroqProvider;

    credentials.set_groq_api_key(api_key)?;
    let mut transport = GroqProvider::default_http_transport(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(GroqProvider::new(credentials, Arc::new(transport))))
}

#[cfg(not(feature = "provider-groq"))]
fn build_groq_provider(
    _credentials: Arc<SecureCredentialManager>,
    _api_key: String,
    _http: Client,
    _base_url: Option<&str>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-groq feature is not enabled on swiftllm",
    ))
}
