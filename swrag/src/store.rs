//! Embedding and vector-store seams plus store directory preparation.

use std::fs;
use std::path::Path;

use swcommon::BoxFuture;

use crate::error::RagError;
use crate::types::Chunk;

pub const DEFAULT_STORE_PATH: &str = "chroma";

/// Turns chunks into vectors, one per chunk, in order.
pub trait Embedder: Send + Sync {
    fn embed<'a>(&'a self, chunks: &'a [Chunk]) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>>;
}

pub trait VectorStore: Send + Sync {
    fn upsert<'a>(
        &'a self,
        chunks: &'a [Chunk],
        vectors: &'a [Vec<f32>],
        persist_path: &'a Path,
    ) -> BoxFuture<'a, Result<(), RagError>>;
}

/// Clears `path` if it exists, then recreates it empty.
pub fn prepare_store_location(path: impl AsRef<Path>) -> Result<(), RagError> {
    let path = path.as_ref();
    if path.is_dir() {
        fs::remove_dir_all(path).map_err(|error| {
            RagError::storage(format!(
                "failed to clear store directory '{}': {error}",
                path.display()
            ))
        })?;
    } else if path.exists() {
        return Err(RagError::storage(format!(
            "store path '{}' exists and is not a directory",
            path.display()
        )));
    }

    fs::create_dir_all(path).map_err(|error| {
        RagError::storage(format!(
            "failed to create store directory '{}': {error}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::RagErrorKind;

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("swrag-{prefix}-{unique}"))
    }

    #[test]
    fn prepare_clears_previous_contents() {
        let root = temp_dir("store");
        fs::create_dir_all(root.join("old")).expect("dirs");
        fs::write(root.join("old").join("index.bin"), [1_u8, 2, 3]).expect("write");

        prepare_store_location(&root).expect("prepare should succeed");

        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).expect("read dir").count(), 0);
        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn prepare_creates_missing_directory() {
        let root = temp_dir("fresh").join("nested");
        prepare_store_location(&root).expect("prepare should succeed");
        assert!(root.is_dir());
        fs::remove_dir_all(root.parent().expect("parent")).expect("cleanup");
    }

    #[test]
    fn prepare_refuses_to_replace_a_file() {
        let root = temp_dir("file");
        fs::create_dir_all(&root).expect("dir");
        let file = root.join("store");
        fs::write(&file, "not a directory").expect("write");

        let error = prepare_store_location(&file).expect_err("file path should fail");
        assert_eq!(error.kind, RagErrorKind::Storage);
        assert!(file.is_file());
        fs::remove_dir_all(root).expect("cleanup");
    }
}
