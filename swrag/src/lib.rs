//! Narrow retrieval-augmented generation interfaces.
//!
//! Documents are loaded from a [`DocumentSource`], cut into [`Chunk`]s by a
//! [`Splitter`], embedded by an [`Embedder`], and written to a
//! [`VectorStore`]. Retrieved text reaches a language model only as a prompt
//! string built by [`fold_context`].

mod error;
mod pipeline;
mod source;
mod splitter;
mod store;
mod types;

pub use error::{RagError, RagErrorKind};
pub use pipeline::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, IngestReport, RagPipeline, fold_context,
};
pub use source::{ALL_EXTENSIONS, DEFAULT_DATA_PATH, DocumentSource, FsDocumentSource};
pub use splitter::{CharacterSplitter, Splitter};
pub use store::{DEFAULT_STORE_PATH, Embedder, VectorStore, prepare_store_location};
pub use types::{Chunk, Document};

pub mod prelude {
    pub use crate::{
        Chunk, CharacterSplitter, Document, DocumentSource, Embedder, FsDocumentSource,
        IngestReport, RagError, RagErrorKind, RagPipeline, Splitter, VectorStore, fold_context,
        prepare_store_location,
    };
}
