//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use swcommon::{GenerationOptions, MetadataMap, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("tenant".to_string(), "acme".to_string());
//!
//! let options = GenerationOptions::default().with_temperature(0.0).enable_streaming();
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(options.temperature, Some(0.0));
//! assert_eq!(options.stream, Some(true));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use swcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Shared metadata and cross-crate identifier newtypes.
    //!
    //! ```rust
    //! use swcommon::{MetadataMap, SessionId};
    //!
    //! let session = SessionId::new("session-42");
    //! let mut metadata = MetadataMap::new();
    //! metadata.insert("env".to_string(), "test".to_string());
    //!
    //! assert_eq!(session.to_string(), "session-42");
    //! ```

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Generation tunables with explicit presence tracking.
    //!
    //! Every tunable is an `Option`: `None` means "unset" and is omitted from
    //! outgoing requests, while `Some(0.0)` or `Some(String::new())` are
    //! deliberate values and are always sent.
    //!
    //! ```rust
    //! use swcommon::GenerationOptions;
    //!
    //! let defaults = GenerationOptions::default().with_max_tokens(1024).with_temperature(0.7);
    //! let overrides = GenerationOptions::default().with_temperature(0.0);
    //!
    //! let merged = overrides.or(&defaults);
    //! assert_eq!(merged.temperature, Some(0.0));
    //! assert_eq!(merged.max_tokens, Some(1024));
    //! assert_eq!(merged.top_p, None);
    //! ```

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct GenerationOptions {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub max_tokens: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub temperature: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub top_p: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stop: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stream: Option<bool>,
    }

    impl GenerationOptions {
        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_top_p(mut self, top_p: f32) -> Self {
            self.top_p = Some(top_p);
            self
        }

        pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
            self.stop = Some(stop.into());
            self
        }

        pub fn with_streaming(mut self, stream: bool) -> Self {
            self.stream = Some(stream);
            self
        }

        pub fn enable_streaming(self) -> Self {
            self.with_streaming(true)
        }

        /// Field-wise fallback: values set on `self` win, unset ones are taken
        /// from `fallback`, and anything unset on both stays unset.
        pub fn or(&self, fallback: &GenerationOptions) -> GenerationOptions {
            GenerationOptions {
                max_tokens: self.max_tokens.or(fallback.max_tokens),
                temperature: self.temperature.or(fallback.temperature),
                top_p: self.top_p.or(fallback.top_p),
                stop: self.stop.clone().or_else(|| fallback.stop.clone()),
                stream: self.stream.or(fallback.stream),
            }
        }

        pub fn is_streaming(&self) -> bool {
            self.stream.unwrap_or(false)
        }

        pub fn is_empty(&self) -> bool {
            *self == GenerationOptions::default()
        }
    }
}

pub use context::{MetadataMap, SessionId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
