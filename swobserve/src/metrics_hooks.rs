//! Metrics-based hooks for provider attempts and generation turns.
//!
//! ```rust
//! use swobserve::MetricsObservabilityHooks;
//! use swprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use swchat::{ChatError, ResponseType, TurnHooks};
use swcommon::SessionId;
use swprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, provider: ProviderId, operation: &str, _attempt: u32) {
        metrics::counter!(
            "swiftllm_provider_attempt_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        provider: ProviderId,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "swiftllm_provider_retry_scheduled_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "swiftllm_provider_retry_delay_seconds",
            "provider" => provider.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, provider: ProviderId, operation: &str, attempts: u32) {
        metrics::histogram!(
            "swiftllm_provider_attempts_per_success",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        _attempts: u32,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "swiftllm_provider_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}

impl TurnHooks for MetricsObservabilityHooks {
    fn on_turn_start(&self, _session_id: &SessionId, provider: ProviderId, model: &str) {
        metrics::counter!(
            "swiftllm_turn_start_total",
            "provider" => provider.to_string(),
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_turn_success(
        &self,
        _session_id: &SessionId,
        provider: ProviderId,
        model: &str,
        response_type: ResponseType,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "swiftllm_turn_success_total",
            "provider" => provider.to_string(),
            "model" => model.to_string(),
            "response_type" => format!("{response_type:?}")
        )
        .increment(1);
        metrics::histogram!(
            "swiftllm_turn_duration_seconds",
            "provider" => provider.to_string(),
            "model" => model.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_turn_failure(
        &self,
        _session_id: &SessionId,
        provider: ProviderId,
        model: &str,
        error: &ChatError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "swiftllm_turn_failure_total",
            "provider" => provider.to_string(),
            "model" => model.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "swiftllm_turn_duration_seconds",
            "provider" => provider.to_string(),
            "model" => model.to_string()
        )
        .record(elapsed.as_secs_f64());
    }
}
