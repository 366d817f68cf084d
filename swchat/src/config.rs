//! Immutable capability configuration fixed at model construction.
//!
//! ```rust
//! use swchat::{CapabilityConfig, ResponseType, Schema};
//!
//! let config = CapabilityConfig::builder("Find all the names, ages, and titles in the text.")
//!     .schema(Schema::new().field("name", "str").field("age", "int").field("title", "str"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.response_type(), ResponseType::Json);
//! assert_eq!(config.defaults().max_tokens, Some(1024));
//! ```

use std::collections::BTreeSet;

use serde_json::Value;
use swcommon::GenerationOptions;

use crate::{ChatError, HistoryWindow, Schema};

pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// What a successful generation returns to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Raw,
    Content,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityConfig {
    instructions: String,
    schema: Schema,
    sample_outputs: Vec<Value>,
    response_type: ResponseType,
    defaults: GenerationOptions,
    history_window: Option<HistoryWindow>,
}

impl CapabilityConfig {
    pub fn builder(instructions: impl Into<String>) -> CapabilityConfigBuilder {
        CapabilityConfigBuilder::new(instructions)
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn sample_outputs(&self) -> &[Value] {
        &self.sample_outputs
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub fn defaults(&self) -> &GenerationOptions {
        &self.defaults
    }

    pub fn history_window(&self) -> Option<HistoryWindow> {
        self.history_window
    }

    /// Wraps a prompt with the schema and samples when JSON output is expected.
    pub fn prepare_prompt(&self, prompt: &str) -> String {
        if self.response_type != ResponseType::Json {
            return prompt.to_string();
        }

        let samples =
            serde_json::to_string(&self.sample_outputs).unwrap_or_else(|_| "[]".to_string());
        format!(
            "Input: {prompt}\n\nOutput JSON Schema:\n{}\n\nList of Sample Outputs:\n{samples}",
            self.schema.to_json()
        )
    }
}

#[derive(Debug, Clone)]
pub struct CapabilityConfigBuilder {
    instructions: String,
    schema: Schema,
    sample_outputs: Vec<Value>,
    response_type: Option<ResponseType>,
    defaults: GenerationOptions,
    history_window: Option<HistoryWindow>,
}

impl CapabilityConfigBuilder {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            schema: Schema::new(),
            sample_outputs: Vec::new(),
            response_type: None,
            defaults: GenerationOptions::default().with_max_tokens(DEFAULT_MAX_TOKENS),
            history_window: None,
        }
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.schema = self.schema.field(name, type_name);
        self
    }

    pub fn sample_output(mut self, sample: Value) -> Self {
        self.sample_outputs.push(sample);
        self
    }

    pub fn sample_outputs(mut self, samples: impl IntoIterator<Item = Value>) -> Self {
        self.sample_outputs.extend(samples);
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Replaces the instance defaults wholesale; unset fields stay unset.
    pub fn defaults(mut self, defaults: GenerationOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn history_window(mut self, window: HistoryWindow) -> Self {
        self.history_window = Some(window);
        self
    }

    pub fn build(self) -> Result<CapabilityConfig, ChatError> {
        if let Some((name, _)) = self.schema.fields().find(|(name, _)| name.trim().is_empty()) {
            return Err(ChatError::invalid_config(format!(
                "schema field names must not be blank (got '{name}')"
            )));
        }

        let expected = self.schema.key_set();
        for (index, sample) in self.sample_outputs.iter().enumerate() {
            let Value::Object(fields) = sample else {
                return Err(ChatError::invalid_config(format!(
                    "sample output {index} must be a JSON object"
                )));
            };

            if !expected.is_empty() {
                let actual = fields.keys().cloned().collect::<BTreeSet<_>>();
                if actual != expected {
                    return Err(ChatError::invalid_config(format!(
                        "sample output {index} keys do not match the schema"
                    )));
                }
            }
        }

        validate_defaults(&self.defaults)?;

        if let Some(window) = self.history_window
            && window.max_turns == 0
        {
            return Err(ChatError::invalid_config(
                "history window must keep at least one turn",
            ));
        }

        let response_type = self.response_type.unwrap_or(if self.schema.is_empty() {
            ResponseType::Content
        } else {
            ResponseType::Json
        });

        Ok(CapabilityConfig {
            instructions: self.instructions,
            schema: self.schema,
            sample_outputs: self.sample_outputs,
            response_type,
            defaults: self.defaults,
            history_window: self.history_window,
        })
    }
}

fn validate_defaults(defaults: &GenerationOptions) -> Result<(), ChatError> {
    if defaults.max_tokens == Some(0) {
        return Err(ChatError::invalid_config(
            "default max_tokens must be greater than zero",
        ));
    }

    if let Some(temperature) = defaults.temperature
        && !(0.0..=2.0).contains(&temperature)
    {
        return Err(ChatError::invalid_config(
            "default temperature must be in the inclusive range 0.0..=2.0",
        ));
    }

    if let Some(top_p) = defaults.top_p
        && !(0.0..=1.0).contains(&top_p)
    {
        return Err(ChatError::invalid_config(
            "default top_p must be in the inclusive range 0.0..=1.0",
        ));
    }

    Ok(())
}
