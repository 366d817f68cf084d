//! Errors raised while loading, chunking, embedding, or persisting documents.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RagErrorKind {
    InvalidConfig,
    NotFound,
    Load,
    Storage,
    Embedding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagError {
    pub kind: RagErrorKind,
    pub message: String,
}

impl RagError {
    pub fn new(kind: RagErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::InvalidConfig, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::NotFound, message)
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Load, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Storage, message)
    }

    pub fn embedding(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Embedding, message)
    }
}

impl Display for RagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RagError {}
