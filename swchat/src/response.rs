//! Response draining and typed result processing.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use swchat::{Generation, ProviderResponse, ResponseProcessor, ResponseType, Schema};
//! use swprovider::{ModelResponse, ProviderId, StopReason, TokenUsage};
//!
//! let response = ProviderResponse::complete(ModelResponse {
//!     provider: ProviderId::Groq,
//!     model: "mixtral-8x7b-32768".to_string(),
//!     content: r#"{"name":"Zachary Ivie","age":29}"#.to_string(),
//!     stop_reason: StopReason::EndTurn,
//!     usage: TokenUsage::default(),
//!     raw: None,
//! });
//!
//! let schema = Schema::new().field("name", "str").field("age", "int");
//! let generation = ResponseProcessor::process(&response, ResponseType::Json, &schema).unwrap();
//! assert_eq!(generation, Generation::Structured(json!({"name": "Zachary Ivie", "age": 29})));
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::Value;
use swprovider::{
    ModelResponse, ProviderId, ProviderReply, StopReason, StreamEvent, TokenUsage,
};
use tokio_util::sync::CancellationToken;

use crate::{ChatError, ResponseType, Schema};

/// Uniform view of one provider reply after any stream has been drained.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub content: String,
    pub raw: Arc<ModelResponse>,
    pub streamed: bool,
}

impl ProviderResponse {
    pub fn complete(response: ModelResponse) -> Self {
        Self {
            content: response.content.clone(),
            raw: Arc::new(response),
            streamed: false,
        }
    }
}

/// Typed result of a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Raw(Arc<ModelResponse>),
    Content(String),
    Structured(Value),
}

impl Generation {
    pub fn as_raw(&self) -> Option<&Arc<ModelResponse>> {
        match self {
            Self::Raw(response) => Some(response),
            _ => None,
        }
    }

    pub fn as_content(&self) -> Option<&str> {
        match self {
            Self::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_structured(self) -> Option<Value> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }
}

/// Receives streamed text fragments in arrival order.
pub trait FragmentSink: Send {
    fn on_fragment(&mut self, fragment: &str);
}

impl<F> FragmentSink for F
where
    F: FnMut(&str) + Send,
{
    fn on_fragment(&mut self, fragment: &str) {
        self(fragment)
    }
}

/// Sink that drops every fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardFragments;

impl FragmentSink for DiscardFragments {
    fn on_fragment(&mut self, _fragment: &str) {}
}

/// Turns provider replies into [`ProviderResponse`] values and typed results.
#[derive(Debug, Clone)]
pub struct ResponseProcessor {
    provider: ProviderId,
    model: String,
}

impl ResponseProcessor {
    /// `provider` and `model` label responses synthesized from bare streams.
    pub fn new(provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Drains a reply, forwarding each text fragment to `sink` as it arrives.
    ///
    /// Fails with `Cancelled` as soon as `cancel` fires and with
    /// `ProviderTransport` when the stream yields an error.
    pub async fn drain(
        &self,
        reply: ProviderReply<'_>,
        sink: &mut dyn FragmentSink,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, ChatError> {
        let mut events = match reply {
            ProviderReply::Complete(response) => return Ok(ProviderResponse::complete(response)),
            ProviderReply::Streamed(events) => events,
        };

        let mut content = String::new();
        let mut completed_message = None::<String>;
        let mut final_response = None::<ModelResponse>;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ChatError::cancelled()),
                next = events.next() => next,
            };

            let Some(event) = next else {
                break;
            };

            match event.map_err(ChatError::provider_transport)? {
                StreamEvent::TextDelta(fragment) => {
                    sink.on_fragment(&fragment);
                    content.push_str(&fragment);
                }
                StreamEvent::MessageComplete(message) => completed_message = Some(message.content),
                StreamEvent::ResponseComplete(response) => final_response = Some(response),
            }
        }

        if content.is_empty()
            && let Some(message) = completed_message
        {
            content = message;
        }

        let mut response = final_response.unwrap_or_else(|| ModelResponse {
            provider: self.provider,
            model: self.model.clone(),
            content: String::new(),
            stop_reason: StopReason::Other,
            usage: TokenUsage::default(),
            raw: None,
        });
        if response.content.is_empty() {
            response.content = content.clone();
        }

        Ok(ProviderResponse {
            content,
            raw: Arc::new(response),
            streamed: true,
        })
    }

    pub fn process(
        response: &ProviderResponse,
        response_type: ResponseType,
        schema: &Schema,
    ) -> Result<Generation, ChatError> {
        match response_type {
            ResponseType::Raw => Ok(Generation::Raw(Arc::clone(&response.raw))),
            ResponseType::Content => Ok(Generation::Content(response.content.clone())),
            ResponseType::Json => parse_structured(&response.content, schema),
        }
    }
}

fn parse_structured(content: &str, schema: &Schema) -> Result<Generation, ChatError> {
    let value = serde_json::from_str::<Value>(content)
        .map_err(|err| ChatError::malformed_json(content, err))?;

    if schema.is_empty() {
        return Ok(Generation::Structured(value));
    }

    let actual = match &value {
        Value::Object(fields) => fields.keys().cloned().collect::<BTreeSet<_>>(),
        _ => BTreeSet::new(),
    };
    let expected = schema.key_set();
    if actual != expected {
        return Err(ChatError::schema_mismatch(expected, actual));
    }

    Ok(Generation::Structured(value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use swprovider::{
        BoxedEventStream, Message, ProviderError, Role, VecEventStream,
    };

    use super::*;
    use crate::{ChatErrorDetail, ChatErrorKind};

    fn person_schema() -> Schema {
        Schema::new()
            .field("name", "str")
            .field("age", "int")
            .field("title", "str")
    }

    fn response_with(content: &str) -> ProviderResponse {
        ProviderResponse::complete(ModelResponse {
            provider: ProviderId::OpenAi,
            model: "gpt-4o".to_string(),
            content: content.to_string(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
            raw: Some(json!({"id": "chatcmpl-1"})),
        })
    }

    fn processor() -> ResponseProcessor {
        ResponseProcessor::new(ProviderId::OpenAi, "gpt-4o")
    }

    fn keys(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn matching_key_set_returns_parsed_value_unchanged() {
        let content = r#"{"name":"Zachary Ivie","age":29,"title":"data scientist"}"#;
        let generation = ResponseProcessor::process(
            &response_with(content),
            ResponseType::Json,
            &person_schema(),
        )
        .expect("validation should succeed");

        let expected: Value = serde_json::from_str(content).expect("fixture is valid JSON");
        assert_eq!(generation, Generation::Structured(expected));
    }

    #[test]
    fn missing_key_fails_with_both_key_sets() {
        let error = ResponseProcessor::process(
            &response_with(r#"{"name":"Zachary Ivie","age":29}"#),
            ResponseType::Json,
            &person_schema(),
        )
        .expect_err("missing title should fail");

        assert_eq!(error.kind, ChatErrorKind::SchemaMismatch);
        assert_eq!(
            error.detail,
            Some(ChatErrorDetail::SchemaMismatch {
                expected: keys(&["name", "age", "title"]),
                actual: keys(&["name", "age"]),
            })
        );
    }

    #[test]
    fn extra_key_fails_schema_check() {
        let error = ResponseProcessor::process(
            &response_with(
                r#"{"name":"Zachary Ivie","age":29,"title":"data scientist","city":"Provo"}"#,
            ),
            ResponseType::Json,
            &person_schema(),
        )
        .expect_err("extra key should fail");
        assert_eq!(error.kind, ChatErrorKind::SchemaMismatch);
    }

    #[test]
    fn non_object_json_has_empty_key_set() {
        let error = ResponseProcessor::process(
            &response_with("[1, 2, 3]"),
            ResponseType::Json,
            &person_schema(),
        )
        .expect_err("array should not satisfy schema");

        match error.detail {
            Some(ChatErrorDetail::SchemaMismatch { actual, .. }) => assert!(actual.is_empty()),
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn empty_schema_skips_validation() {
        let generation = ResponseProcessor::process(
            &response_with(r#"{"anything": true}"#),
            ResponseType::Json,
            &Schema::new(),
        )
        .expect("empty schema should accept any JSON");
        assert_eq!(generation.as_structured(), Some(&json!({"anything": true})));
    }

    #[test]
    fn malformed_json_carries_excerpt() {
        let error = ResponseProcessor::process(
            &response_with("Sure! Here is the JSON you asked for"),
            ResponseType::Json,
            &person_schema(),
        )
        .expect_err("prose should fail to parse");

        assert_eq!(error.kind, ChatErrorKind::MalformedJson);
        assert_eq!(
            error.detail,
            Some(ChatErrorDetail::MalformedJson {
                excerpt: "Sure! Here is the JSON you asked for".to_string(),
            })
        );
    }

    #[test]
    fn raw_result_shares_provider_response() {
        let response = response_with("plain text");
        let generation = ResponseProcessor::process(&response, ResponseType::Raw, &Schema::new())
            .expect("raw should succeed");

        let raw = generation.as_raw().expect("raw generation");
        assert!(Arc::ptr_eq(raw, &response.raw));
    }

    #[test]
    fn content_result_is_extracted_text() {
        let generation = ResponseProcessor::process(
            &response_with("plain text"),
            ResponseType::Content,
            &person_schema(),
        )
        .expect("content should succeed");
        assert_eq!(generation.as_content(), Some("plain text"));
    }

    #[tokio::test]
    async fn drain_accumulates_fragments_in_order() {
        let stream: BoxedEventStream<'static> =
            Box::pin(VecEventStream::from_fragments(["Za", "chary ", "Ivie"]));
        let mut seen = Vec::new();
        let mut sink = |fragment: &str| seen.push(fragment.to_string());

        let response = processor()
            .drain(
                ProviderReply::Streamed(stream),
                &mut sink,
                &CancellationToken::new(),
            )
            .await
            .expect("drain should succeed");

        assert_eq!(seen, vec!["Za", "chary ", "Ivie"]);
        assert_eq!(response.content, "Zachary Ivie");
        assert!(response.streamed);
        assert_eq!(response.raw.content, "Zachary Ivie");
        assert_eq!(response.raw.model, "gpt-4o");
    }

    #[tokio::test]
    async fn drain_prefers_final_response_when_present() {
        let final_response = ModelResponse {
            provider: ProviderId::Groq,
            model: "llama3-8b-8192".to_string(),
            content: "hello world".to_string(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 3,
                output_tokens: 2,
                total_tokens: 5,
            },
            raw: None,
        };
        let stream: BoxedEventStream<'static> = Box::pin(VecEventStream::new(vec![
            Ok(StreamEvent::TextDelta("hello".to_string())),
            Ok(StreamEvent::TextDelta(" world".to_string())),
            Ok(StreamEvent::MessageComplete(Message::new(
                Role::Assistant,
                "hello world",
            ))),
            Ok(StreamEvent::ResponseComplete(final_response.clone())),
        ]));

        let response = processor()
            .drain(
                ProviderReply::Streamed(stream),
                &mut DiscardFragments,
                &CancellationToken::new(),
            )
            .await
            .expect("drain should succeed");
        assert_eq!(response.raw.as_ref(), &final_response);
    }

    #[tokio::test]
    async fn drain_maps_stream_errors_to_transport() {
        let stream: BoxedEventStream<'static> = Box::pin(VecEventStream::new(vec![
            Ok(StreamEvent::TextDelta("partial".to_string())),
            Err(ProviderError::transport("connection reset")),
        ]));

        let error = processor()
            .drain(
                ProviderReply::Streamed(stream),
                &mut DiscardFragments,
                &CancellationToken::new(),
            )
            .await
            .expect_err("stream error should fail the drain");
        assert_eq!(error.kind, ChatErrorKind::ProviderTransport);
    }

    #[tokio::test]
    async fn drain_stops_when_cancelled() {
        let stream: BoxedEventStream<'static> =
            Box::pin(VecEventStream::from_fragments(["never", "seen"]));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut seen = Vec::new();
        let mut sink = |fragment: &str| seen.push(fragment.to_string());

        let error = processor()
            .drain(ProviderReply::Streamed(stream), &mut sink, &cancel)
            .await
            .expect_err("cancelled drain should fail");
        assert_eq!(error.kind, ChatErrorKind::Cancelled);
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn complete_reply_is_not_streamed() {
        let response = response_with("done");
        let reply = ProviderReply::Complete(response.raw.as_ref().clone());
        let drained = processor()
            .drain(reply, &mut DiscardFragments, &CancellationToken::new())
            .await
            .expect("drain should succeed");
        assert!(!drained.streamed);
        assert_eq!(drained.content, "done");
    }
}
