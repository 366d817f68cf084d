//! Ingestion runner and the prompt helper that hands retrieved text to a model.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::RagError;
use crate::source::DocumentSource;
use crate::splitter::{CharacterSplitter, Splitter, validate_window};
use crate::store::{DEFAULT_STORE_PATH, Embedder, VectorStore, prepare_store_location};
use crate::types::Chunk;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks: usize,
}

pub struct RagPipeline {
    source: Arc<dyn DocumentSource>,
    splitter: Arc<dyn Splitter>,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    persist_path: PathBuf,
    chunk_size: usize,
    overlap: usize,
}

impl RagPipeline {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            source,
            splitter: Arc::new(CharacterSplitter),
            embedder,
            store,
            persist_path: PathBuf::from(DEFAULT_STORE_PATH),
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }

    pub fn with_splitter(mut self, splitter: Arc<dyn Splitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_persist_path(mut self, persist_path: impl Into<PathBuf>) -> Self {
        self.persist_path = persist_path.into();
        self
    }

    pub fn with_chunking(mut self, chunk_size: usize, overlap: usize) -> Result<Self, RagError> {
        validate_window(chunk_size, overlap)?;
        self.chunk_size = chunk_size;
        self.overlap = overlap;
        Ok(self)
    }

    pub fn persist_path(&self) -> &Path {
        &self.persist_path
    }

    /// Loads, splits, and embeds every document, then replaces the store
    /// contents at the persist path with the result.
    ///
    /// The store directory is only cleared once embedding has succeeded.
    pub async fn run(&self) -> Result<IngestReport, RagError> {
        let documents = self.source.load()?;
        let chunks = self
            .splitter
            .split(&documents, self.chunk_size, self.overlap)?;

        let vectors = self.embedder.embed(&chunks).await?;
        if vectors.len() != chunks.len() {
            return Err(RagError::embedding(format!(
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        prepare_store_location(&self.persist_path)?;
        self.store
            .upsert(&chunks, &vectors, &self.persist_path)
            .await?;

        Ok(IngestReport {
            documents: documents.len(),
            chunks: chunks.len(),
        })
    }
}

/// Builds a single prompt that carries retrieved chunks ahead of the question.
///
/// ```rust
/// use swrag::{Chunk, fold_context};
///
/// let prompt = fold_context("Who is Zachary?", &[Chunk::new("bio.txt", 0, "Zachary Ivie is 29.")]);
/// assert!(prompt.contains("Zachary Ivie is 29."));
/// assert!(prompt.ends_with("Who is Zachary?"));
/// ```
pub fn fold_context(question: &str, chunks: &[Chunk]) -> String {
    let context = chunks
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "Answer the question based only on the following context:\n\n{context}\n\n---\n\n\
         Answer the question based on the above context: {}",
        question.trim()
    )
}
