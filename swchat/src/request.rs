//! Per-call request composition.
//!
//! Each tunable resolves as override, then instance default, then unset.
//! Unset tunables are omitted from the outgoing request; a deliberate
//! `temperature = 0.0` or `stop = ""` is kept.
//!
//! ```rust
//! use swchat::compose;
//! use swcommon::GenerationOptions;
//! use swprovider::{Message, Role};
//!
//! let defaults = GenerationOptions::default().with_max_tokens(1024).with_temperature(0.7);
//! let overrides = GenerationOptions::default().with_temperature(0.0);
//! let history = vec![Message::new(Role::User, "hi")];
//!
//! let request = compose(&overrides, &defaults, "gpt-4o", &history).unwrap();
//! assert_eq!(request.options.temperature, Some(0.0));
//! assert_eq!(request.options.max_tokens, Some(1024));
//! assert_eq!(request.options.top_p, None);
//! ```

use swcommon::GenerationOptions;
use swprovider::{Message, ModelRequest, ResponseFormat};

use crate::{ChatError, ResponseType};

pub fn compose(
    overrides: &GenerationOptions,
    defaults: &GenerationOptions,
    canonical_model: &str,
    history: &[Message],
) -> Result<ModelRequest, ChatError> {
    let request = ModelRequest::builder(canonical_model)
        .messages(history.iter().cloned())
        .options(overrides.or(defaults))
        .build()?;

    Ok(request)
}

impl ResponseType {
    /// Provider output mode matching this response type.
    pub fn response_format(self) -> ResponseFormat {
        match self {
            Self::Json => ResponseFormat::JsonObject,
            Self::Raw | Self::Content => ResponseFormat::Text,
        }
    }
}
