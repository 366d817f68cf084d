use std::sync::{Arc, Mutex};
use std::time::Duration;

use swchat::{ChatError, ResponseType, TurnHooks};
use swcommon::SessionId;
use swprovider::{
    ProviderError, ProviderErrorKind, ProviderId, ProviderOperationHooks, RetryPolicy,
    execute_with_retry,
};

use crate::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeTurnHooks, TracingObservabilityHooks,
};

fn session() -> SessionId {
    SessionId::new("session-1")
}

fn exercise_provider_hooks(hooks: &dyn ProviderOperationHooks) {
    let error = ProviderError::timeout("provider timeout");
    hooks.on_attempt_start(ProviderId::OpenAi, "generate", 1);
    hooks.on_retry_scheduled(
        ProviderId::OpenAi,
        "generate",
        1,
        Duration::from_millis(10),
        &error,
    );
    hooks.on_success(ProviderId::OpenAi, "generate", 2);
    hooks.on_failure(ProviderId::Groq, "generate", 3, &error);
}

fn exercise_turn_hooks(hooks: &dyn TurnHooks) {
    let error = ChatError::cancelled();
    hooks.on_turn_start(&session(), ProviderId::Groq, "mixtral-8x7b-32768");
    hooks.on_turn_success(
        &session(),
        ProviderId::Groq,
        "mixtral-8x7b-32768",
        ResponseType::Json,
        Duration::from_millis(40),
    );
    hooks.on_turn_failure(
        &session(),
        ProviderId::OpenAi,
        "gpt-4o",
        &error,
        Duration::from_millis(5),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingObservabilityHooks;
    exercise_provider_hooks(&hooks);
    exercise_turn_hooks(&hooks);
}

#[test]
fn metrics_hooks_smoke_test_without_recorder() {
    let hooks = MetricsObservabilityHooks;
    exercise_provider_hooks(&hooks);
    exercise_turn_hooks(&hooks);
}

#[derive(Default)]
struct RecordingProviderHooks {
    events: Arc<Mutex<Vec<String>>>,
}

impl ProviderOperationHooks for RecordingProviderHooks {
    fn on_attempt_start(&self, provider: ProviderId, operation: &str, attempt: u32) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("start:{provider}:{operation}:{attempt}"));
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        attempt: u32,
        _delay: Duration,
        error: &ProviderError,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("retry:{attempt}:{:?}", error.kind));
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, attempts: u32) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success:{attempts}"));
    }
}

#[derive(Default)]
struct RecordingTurnHooks {
    events: Arc<Mutex<Vec<String>>>,
}

impl TurnHooks for RecordingTurnHooks {
    fn on_turn_start(&self, session_id: &SessionId, _provider: ProviderId, model: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("start:{session_id}:{model}"));
    }

    fn on_turn_success(
        &self,
        _session_id: &SessionId,
        _provider: ProviderId,
        _model: &str,
        response_type: ResponseType,
        _elapsed: Duration,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success:{response_type:?}"));
    }

    fn on_turn_failure(
        &self,
        _session_id: &SessionId,
        _provider: ProviderId,
        _model: &str,
        error: &ChatError,
        _elapsed: Duration,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("failure:{:?}", error.kind));
    }
}

struct PanicProviderHooks;

impl ProviderOperationHooks for PanicProviderHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {
        panic!("provider hook panic");
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
        panic!("provider hook panic");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {
        panic!("provider hook panic");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
        panic!("provider hook panic");
    }
}

struct PanicTurnHooks;

impl TurnHooks for PanicTurnHooks {
    fn on_turn_start(&self, _session_id: &SessionId, _provider: ProviderId, _model: &str) {
        panic!("turn hook panic");
    }

    fn on_turn_success(
        &self,
        _session_id: &SessionId,
        _provider: ProviderId,
        _model: &str,
        _response_type: ResponseType,
        _elapsed: Duration,
    ) {
        panic!("turn hook panic");
    }

    fn on_turn_failure(
        &self,
        _session_id: &SessionId,
        _provider: ProviderId,
        _model: &str,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
        panic!("turn hook panic");
    }
}

#[test]
fn safe_provider_hooks_delegate_to_inner() {
    let inner = RecordingProviderHooks::default();
    let events = Arc::clone(&inner.events);
    let safe = SafeProviderHooks::new(inner);

    safe.on_attempt_start(ProviderId::OpenAi, "generate", 1);
    safe.on_success(ProviderId::OpenAi, "generate", 1);

    let events = events.lock().expect("events lock").clone();
    assert_eq!(events, vec!["start:openai:generate:1", "success:1"]);
}

#[test]
fn safe_turn_hooks_delegate_to_inner() {
    let inner = RecordingTurnHooks::default();
    let events = Arc::clone(&inner.events);
    let safe = SafeTurnHooks::new(inner);

    safe.on_turn_start(&session(), ProviderId::OpenAi, "gpt-4o");
    safe.on_turn_success(
        &session(),
        ProviderId::OpenAi,
        "gpt-4o",
        ResponseType::Content,
        Duration::ZERO,
    );
    safe.on_turn_failure(
        &session(),
        ProviderId::OpenAi,
        "gpt-4o",
        &ChatError::invalid_request("blank prompt"),
        Duration::ZERO,
    );

    let events = events.lock().expect("events lock").clone();
    assert_eq!(
        events,
        vec!["start:session-1:gpt-4o", "success:Content", "failure:InvalidRequest"]
    );
}

#[test]
fn safe_hooks_swallow_panics() {
    exercise_provider_hooks(&SafeProviderHooks::new(PanicProviderHooks));
    exercise_turn_hooks(&SafeTurnHooks::new(PanicTurnHooks));
}

#[tokio::test]
async fn panicking_hooks_do_not_break_retry_loop() {
    let hooks = SafeProviderHooks::new(PanicProviderHooks);
    let policy = RetryPolicy::new(3).with_jitter(0.0);
    let calls = Arc::new(Mutex::new(0_u32));

    let result = execute_with_retry(
        ProviderId::Groq,
        "generate",
        &policy,
        &hooks,
        |attempt| {
            let calls = Arc::clone(&calls);
            async move {
                *calls.lock().expect("calls lock") += 1;
                if attempt < 2 {
                    Err(ProviderError::rate_limited("slow down"))
                } else {
                    Ok("Zachary")
                }
            }
        },
        |_delay| async {},
    )
    .await;

    assert_eq!(result.expect("second attempt should succeed"), "Zachary");
    assert_eq!(*calls.lock().expect("calls lock"), 2);
}

#[tokio::test]
async fn recording_hooks_observe_retry_sequence() {
    let hooks = RecordingProviderHooks::default();
    let policy = RetryPolicy::new(2).with_jitter(0.0);

    let result: Result<(), ProviderError> = execute_with_retry(
        ProviderId::OpenAi,
        "generate",
        &policy,
        &hooks,
        |_attempt| async { Err(ProviderError::timeout("timed out")) },
        |_delay| async {},
    )
    .await;

    assert_eq!(
        result.expect_err("retries should exhaust").kind,
        ProviderErrorKind::Timeout
    );
    let events = hooks.events.lock().expect("events lock").clone();
    assert_eq!(
        events,
        vec![
            "start:openai:generate:1",
            "retry:1:Timeout",
            "start:openai:generate:2",
        ]
    );
}
