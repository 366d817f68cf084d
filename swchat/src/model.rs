//! The `LanguageModel` orchestrator.
//!
//! A model is assembled through [`LanguageModelBuilder`]; a successful build
//! has validated the configuration, resolved the model name, checked
//! credentials, and seeded the conversation. Each `generate*` call borrows the
//! model mutably for the whole turn and commits the user/assistant pair only
//! after the provider call, stream drain, and response processing succeed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use swcommon::{GenerationOptions, SessionId};
use swprovider::{
    Message, ModelProvider, ModelRequest, NoopOperationHooks, ProviderId, ProviderOperationHooks,
    ProviderReply, RetryPolicy, Role, execute_with_retry,
};
use tokio_util::sync::CancellationToken;

use crate::{
    CapabilityConfig, ChatError, ConversationState, DiscardFragments, FragmentSink, Generation,
    NoopTurnHooks, ResponseProcessor, TurnHooks, compose,
};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

pub struct LanguageModelBuilder {
    provider: Arc<dyn ModelProvider>,
    config: Option<CapabilityConfig>,
    model: Option<String>,
    retry_policy: RetryPolicy,
    provider_hooks: Arc<dyn ProviderOperationHooks>,
    turn_hooks: Arc<dyn TurnHooks>,
    session_id: Option<SessionId>,
}

impl LanguageModelBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            config: None,
            model: None,
            retry_policy: RetryPolicy::default(),
            provider_hooks: Arc::new(NoopOperationHooks),
            turn_hooks: Arc::new(NoopTurnHooks),
            session_id: None,
        }
    }

    pub fn config(mut self, config: CapabilityConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Free-form model name, resolved against the provider catalog on build.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn provider_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.provider_hooks = hooks;
        self
    }

    pub fn turn_hooks(mut self, hooks: Arc<dyn TurnHooks>) -> Self {
        self.turn_hooks = hooks;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn build(self) -> Result<LanguageModel, ChatError> {
        let config = match self.config {
            Some(config) => config,
            None => CapabilityConfig::builder("").build()?,
        };

        let catalog = self.provider.catalog();
        let model = match self.model {
            Some(requested) => catalog.resolve(&requested)?,
            None => catalog
                .default_model()
                .map(str::to_string)
                .ok_or_else(|| {
                    ChatError::invalid_config(format!(
                        "provider {} has no default model",
                        self.provider.id()
                    ))
                })?,
        };

        self.provider.check_credentials()?;

        let session_id = self.session_id.unwrap_or_else(|| {
            SessionId::new(format!(
                "session-{}",
                NEXT_SESSION.fetch_add(1, Ordering::Relaxed)
            ))
        });

        Ok(LanguageModel {
            conversation: ConversationState::new(config.instructions()),
            provider: self.provider,
            config,
            model,
            retry_policy: self.retry_policy,
            provider_hooks: self.provider_hooks,
            turn_hooks: self.turn_hooks,
            session_id,
        })
    }
}

pub struct LanguageModel {
    provider: Arc<dyn ModelProvider>,
    config: CapabilityConfig,
    model: String,
    conversation: ConversationState,
    retry_policy: RetryPolicy,
    provider_hooks: Arc<dyn ProviderOperationHooks>,
    turn_hooks: Arc<dyn TurnHooks>,
    session_id: SessionId,
}

impl LanguageModel {
    pub fn builder(provider: Arc<dyn ModelProvider>) -> LanguageModelBuilder {
        LanguageModelBuilder::new(provider)
    }

    pub fn history(&self) -> &[Message] {
        self.conversation.history()
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Canonical model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn config(&self) -> &CapabilityConfig {
        &self.config
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub async fn generate(&mut self, prompt: &str) -> Result<Generation, ChatError> {
        self.generate_with(prompt, &GenerationOptions::default())
            .await
    }

    pub async fn generate_with(
        &mut self,
        prompt: &str,
        overrides: &GenerationOptions,
    ) -> Result<Generation, ChatError> {
        self.generate_cancellable(
            prompt,
            overrides,
            &mut DiscardFragments,
            &CancellationToken::new(),
        )
        .await
    }

    /// Streams the reply, handing each fragment to `sink` as it arrives.
    pub async fn generate_streaming(
        &mut self,
        prompt: &str,
        overrides: &GenerationOptions,
        sink: &mut dyn FragmentSink,
    ) -> Result<Generation, ChatError> {
        let overrides = overrides.clone().enable_streaming();
        self.generate_cancellable(prompt, &overrides, sink, &CancellationToken::new())
            .await
    }

    /// Runs one turn that aborts with `Cancelled` once `cancel` fires.
    ///
    /// Streaming follows the resolved `stream` tunable. A failed or cancelled
    /// turn leaves the conversation unchanged.
    pub async fn generate_cancellable(
        &mut self,
        prompt: &str,
        overrides: &GenerationOptions,
        sink: &mut dyn FragmentSink,
        cancel: &CancellationToken,
    ) -> Result<Generation, ChatError> {
        let provider_id = self.provider.id();
        let started = Instant::now();
        self.turn_hooks
            .on_turn_start(&self.session_id, provider_id, &self.model);

        let result = self.run_turn(prompt, overrides, sink, cancel).await;
        match &result {
            Ok(_) => self.turn_hooks.on_turn_success(
                &self.session_id,
                provider_id,
                &self.model,
                self.config.response_type(),
                started.elapsed(),
            ),
            Err(error) => self.turn_hooks.on_turn_failure(
                &self.session_id,
                provider_id,
                &self.model,
                error,
                started.elapsed(),
            ),
        }

        result
    }

    async fn run_turn(
        &mut self,
        prompt: &str,
        overrides: &GenerationOptions,
        sink: &mut dyn FragmentSink,
        cancel: &CancellationToken,
    ) -> Result<Generation, ChatError> {
        if prompt.trim().is_empty() {
            return Err(ChatError::invalid_request("prompt must not be empty"));
        }

        if cancel.is_cancelled() {
            return Err(ChatError::cancelled());
        }

        let user_content = self.config.prepare_prompt(prompt);
        let mut messages = self.conversation.windowed(self.config.history_window());
        messages.push(Message::new(Role::User, user_content.clone()));

        let request = compose(overrides, self.config.defaults(), &self.model, &messages)?
            .with_response_format(self.config.response_type().response_format());

        let processor = ResponseProcessor::new(self.provider.id(), self.model.clone());
        let reply = self.open_reply(request, cancel).await?;
        let response = processor.drain(reply, sink, cancel).await?;
        let generation =
            ResponseProcessor::process(&response, self.config.response_type(), self.config.schema())?;

        self.conversation
            .commit_turn(user_content, response.content.clone());
        Ok(generation)
    }

    async fn open_reply(
        &self,
        request: ModelRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderReply<'_>, ChatError> {
        let provider = self.provider.as_ref();
        let attempts = execute_with_retry(
            provider.id(),
            "generate",
            &self.retry_policy,
            self.provider_hooks.as_ref(),
            |_| provider.generate(request.clone()),
            tokio::time::sleep,
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ChatError::cancelled()),
            reply = attempts => reply.map_err(ChatError::from),
        }
    }
}

impl std::fmt::Debug for LanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModel")
            .field("provider", &self.provider.id())
            .field("model", &self.model)
            .field("session_id", &self.session_id)
            .field("turns", &self.conversation.turns())
            .finish()
    }
}
