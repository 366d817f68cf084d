//! Canonical model catalogs and fuzzy model-name resolution.
//!
//! A requested name is normalized (lower-cased, hyphens turned into spaces,
//! split on whitespace) and matched against each canonical identifier in
//! declared order. An identifier matches when every token is a substring of
//! it. An exact (case-insensitive) identifier always wins over an earlier
//! fuzzy match. The shipped OpenAI and Groq lists never hit that case, so the
//! ordering only matters for catalogs built with custom identifiers.
//!
//! ```rust
//! use swprovider::ModelCatalog;
//!
//! let catalog = ModelCatalog::groq();
//! assert_eq!(catalog.resolve("mixtral").unwrap(), "mixtral-8x7b-32768");
//! assert_eq!(catalog.resolve("Llama3 70b").unwrap(), "llama3-70b-8192");
//!
//! let err = catalog.resolve("claude").unwrap_err();
//! assert_eq!(err.supported, catalog.models());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const OPENAI_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-4",
    "gpt-4-turbo",
    "gpt-4o",
    "gpt-4o-mini",
];

pub const GROQ_MODELS: &[&str] = &[
    "mixtral-8x7b-32768",
    "llama3-8b-8192",
    "llama3-70b-8192",
    "gemma-7b-it",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedModel {
    pub requested: String,
    pub supported: Vec<String>,
}

impl Display for UnsupportedModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "model '{}' is not supported; choose one of: {}",
            self.requested,
            self.supported.join(", ")
        )
    }
}

impl Error for UnsupportedModel {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<String>,
}

impl ModelCatalog {
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
        }
    }

    pub fn openai() -> Self {
        Self::new(OPENAI_MODELS.iter().copied())
    }

    pub fn groq() -> Self {
        Self::new(GROQ_MODELS.iter().copied())
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// First declared identifier, used when the caller names no model.
    pub fn default_model(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|candidate| candidate == model)
    }

    pub fn resolve(&self, requested: &str) -> Result<String, UnsupportedModel> {
        let tokens = normalize(requested);
        if tokens.is_empty() {
            return Err(self.unsupported(requested));
        }

        let lowered = requested.trim().to_lowercase();
        if let Some(exact) = self
            .models
            .iter()
            .find(|candidate| candidate.to_lowercase() == lowered)
        {
            return Ok(exact.clone());
        }

        self.models
            .iter()
            .find(|candidate| {
                let candidate = candidate.to_lowercase();
                tokens.iter().all(|token| candidate.contains(token.as_str()))
            })
            .cloned()
            .ok_or_else(|| self.unsupported(requested))
    }

    fn unsupported(&self, requested: &str) -> UnsupportedModel {
        UnsupportedModel {
            requested: requested.to_string(),
            supported: self.models.clone(),
        }
    }
}

fn normalize(requested: &str) -> Vec<String> {
    requested
        .to_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
