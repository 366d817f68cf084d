//! Chunking of loaded documents.

use crate::error::RagError;
use crate::types::{Chunk, Document};

pub trait Splitter: Send + Sync {
    fn split(
        &self,
        documents: &[Document],
        chunk_size: usize,
        overlap: usize,
    ) -> Result<Vec<Chunk>, RagError>;
}

/// Fixed-width windows measured in characters, not bytes.
///
/// Consecutive chunks of one document share `overlap` characters; the last
/// chunk may be shorter than `chunk_size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterSplitter;

impl Splitter for CharacterSplitter {
    fn split(
        &self,
        documents: &[Document],
        chunk_size: usize,
        overlap: usize,
    ) -> Result<Vec<Chunk>, RagError> {
        validate_window(chunk_size, overlap)?;
        let step = chunk_size - overlap;

        let mut chunks = Vec::new();
        for document in documents {
            let chars = document.text.chars().collect::<Vec<_>>();
            let mut start = 0;
            while start < chars.len() {
                let end = (start + chunk_size).min(chars.len());
                chunks.push(Chunk::new(
                    document.source.clone(),
                    start,
                    chars[start..end].iter().collect::<String>(),
                ));
                if end == chars.len() {
                    break;
                }
                start += step;
            }
        }

        Ok(chunks)
    }
}

pub(crate) fn validate_window(chunk_size: usize, overlap: usize) -> Result<(), RagError> {
    if chunk_size == 0 {
        return Err(RagError::invalid_config("chunk_size must be greater than zero"));
    }
    if overlap >= chunk_size {
        return Err(RagError::invalid_config(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }
    Ok(())
}
