//! Incremental parsing of OpenAI-compatible server-sent event bodies.

use crate::ProviderError;

use super::serde_api::{OpenAiApiStreamResponse, parse_finish_reason};
use super::types::{OpenAiFinishReason, OpenAiResponse, OpenAiUsage};

/// Accumulates a chat completion stream one network chunk at a time.
///
/// Bytes are buffered until a full line is available, so multi-byte
/// characters split across chunks decode intact.
#[derive(Debug, Default)]
pub(crate) struct SseStreamState {
    buffer: Vec<u8>,
    finished: bool,
    content: String,
    model: Option<String>,
    finish_reason: OpenAiFinishReason,
    usage: OpenAiUsage,
}

impl SseStreamState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True once the `[DONE]` sentinel has been read.
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feeds raw body bytes and returns the text deltas of every complete line.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Result<Vec<String>, ProviderError> {
        self.buffer.extend_from_slice(bytes);

        let mut deltas = Vec::new();
        while !self.finished
            && let Some(newline_index) = self.buffer.iter().position(|byte| *byte == b'\n')
        {
            let line = self.buffer.drain(..=newline_index).collect::<Vec<_>>();
            if let Some(delta) = self.parse_line(&line)? {
                deltas.push(delta);
            }
        }

        Ok(deltas)
    }

    /// Handles a trailing line that arrived without a newline at end of body.
    pub(crate) fn flush(&mut self) -> Result<Vec<String>, ProviderError> {
        if self.finished || self.buffer.is_empty() {
            return Ok(Vec::new());
        }

        let line = std::mem::take(&mut self.buffer);
        Ok(self.parse_line(&line)?.into_iter().collect())
    }

    /// Final response for a stream that reached `[DONE]`.
    pub(crate) fn finish(self, fallback_model: String) -> Result<OpenAiResponse, ProviderError> {
        if !self.finished {
            return Err(ProviderError::transport("stream ended before [DONE]"));
        }

        Ok(OpenAiResponse {
            model: self.model.unwrap_or(fallback_model),
            content: self.content,
            finish_reason: self.finish_reason,
            usage: self.usage,
            raw: None,
        })
    }

    fn parse_line(&mut self, line: &[u8]) -> Result<Option<String>, ProviderError> {
        let line = std::str::from_utf8(line)
            .map_err(|err| ProviderError::transport(err.to_string()))?
            .trim();

        let Some(payload) = line.strip_prefix("data:") else {
            return Ok(None);
        };

        let payload = payload.trim();
        if payload == "[DONE]" {
            self.finished = true;
            return Ok(None);
        }

        let parsed: OpenAiApiStreamResponse = serde_json::from_str(payload)
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        if self.model.is_none() {
            self.model = Some(parsed.model.clone());
        }

        if let Some(api_usage) = &parsed.usage {
            self.usage = OpenAiUsage {
                prompt_tokens: api_usage.prompt_tokens,
                completion_tokens: api_usage.completion_tokens,
                total_tokens: api_usage.total_tokens,
            };
        }

        let Some(choice) = parsed.choices.first() else {
            return Ok(None);
        };

        if choice.finish_reason.is_some() {
            self.finish_reason = parse_finish_reason(choice.finish_reason.as_deref());
        }

        match &choice.delta.content {
            Some(delta) if !delta.is_empty() => {
                self.content.push_str(delta);
                Ok(Some(delta.clone()))
            }
            _ => Ok(None),
        }
    }
}
