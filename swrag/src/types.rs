//! Documents as loaded from a source and the chunks cut from them.

use serde::{Deserialize, Serialize};
use swcommon::MetadataMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the text came from, usually a filesystem path.
    pub source: String,
    pub text: String,
    #[serde(default)]
    pub metadata: MetadataMap,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub source: String,
    /// Offset of the first character of `text` within the source document, in chars.
    pub offset: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(source: impl Into<String>, offset: usize, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            offset,
            text: text.into(),
        }
    }
}
