//! Tracing-based hooks for provider attempts and generation turns.
//!
//! ```rust
//! use swchat::TurnHooks;
//! use swobserve::TracingObservabilityHooks;
//!
//! fn accepts_turn_hooks(_hooks: &dyn TurnHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_turn_hooks(&hooks);
//! ```

use std::time::Duration;

use swchat::{ChatError, ResponseType, TurnHooks};
use swcommon::SessionId;
use swprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, provider: ProviderId, operation: &str, attempt: u32) {
        tracing::debug!(
            phase = "provider",
            event = "attempt_start",
            provider = %provider,
            operation,
            attempt
        );
    }

    fn on_retry_scheduled(
        &self,
        provider: ProviderId,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        tracing::warn!(
            phase = "provider",
            event = "retry_scheduled",
            provider = %provider,
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_success(&self, provider: ProviderId, operation: &str, attempts: u32) {
        tracing::debug!(
            phase = "provider",
            event = "success",
            provider = %provider,
            operation,
            attempts
        );
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            provider = %provider,
            operation,
            attempts,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}

impl TurnHooks for TracingObservabilityHooks {
    fn on_turn_start(&self, session_id: &SessionId, provider: ProviderId, model: &str) {
        tracing::info!(
            phase = "turn",
            event = "turn_start",
            session_id = %session_id,
            provider = %provider,
            model
        );
    }

    fn on_turn_success(
        &self,
        session_id: &SessionId,
        provider: ProviderId,
        model: &str,
        response_type: ResponseType,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "turn",
            event = "turn_success",
            session_id = %session_id,
            provider = %provider,
            model,
            response_type = ?response_type,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_turn_failure(
        &self,
        session_id: &SessionId,
        provider: ProviderId,
        model: &str,
        error: &ChatError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "turn",
            event = "turn_failure",
            session_id = %session_id,
            provider = %provider,
            model,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
