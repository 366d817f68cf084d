//! Document sources and the filesystem-backed loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RagError;
use crate::types::Document;

/// Extension filter that accepts every file.
pub const ALL_EXTENSIONS: &str = "*";

pub const DEFAULT_DATA_PATH: &str = "data";

pub trait DocumentSource: Send + Sync {
    fn load(&self) -> Result<Vec<Document>, RagError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceRoot {
    Directory(PathBuf),
    File(PathBuf),
}

/// Loads UTF-8 text files from a directory tree or from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsDocumentSource {
    root: SourceRoot,
    extension: String,
}

impl FsDocumentSource {
    /// Opens `path` as a document root.
    ///
    /// A blank path falls back to [`DEFAULT_DATA_PATH`]. A path naming an
    /// existing file loads only that file. A missing directory is created and
    /// loads as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let mut path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            path = PathBuf::from(DEFAULT_DATA_PATH);
        }

        let root = if path.is_file() {
            SourceRoot::File(path)
        } else {
            if !path.exists() {
                fs::create_dir_all(&path).map_err(|error| {
                    RagError::storage(format!(
                        "failed to create data directory '{}': {error}",
                        path.display()
                    ))
                })?;
            }
            if !path.is_dir() {
                return Err(RagError::not_found(format!(
                    "'{}' is not a readable file or directory",
                    path.display()
                )));
            }
            SourceRoot::Directory(path)
        };

        Ok(Self {
            root,
            extension: ALL_EXTENSIONS.to_string(),
        })
    }

    /// Restricts directory loads to files with this extension.
    ///
    /// Accepts `"md"`, `".md"`, or [`ALL_EXTENSIONS`]. Matching ignores case.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Result<Self, RagError> {
        let extension = extension.into();
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(RagError::invalid_config(
                "extension filter must be '*' or a non-empty extension",
            ));
        }
        self.extension = normalized;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        match &self.root {
            SourceRoot::Directory(path) | SourceRoot::File(path) => path,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extension == ALL_EXTENSIONS {
            return true;
        }
        path.extension()
            .and_then(|value| value.to_str())
            .is_some_and(|value| value.eq_ignore_ascii_case(&self.extension))
    }
}

impl DocumentSource for FsDocumentSource {
    fn load(&self) -> Result<Vec<Document>, RagError> {
        let paths = match &self.root {
            SourceRoot::File(path) => vec![path.clone()],
            SourceRoot::Directory(root) => {
                let mut paths = Vec::new();
                collect_files(root, &mut paths)?;
                paths.retain(|path| self.accepts(path));
                paths.sort();
                paths
            }
        };

        paths.iter().map(|path| read_document(path)).collect()
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RagError> {
    let entries = fs::read_dir(dir).map_err(|error| {
        RagError::load(format!("failed to read directory '{}': {error}", dir.display()))
    })?;

    for entry in entries {
        let entry = entry.map_err(|error| {
            RagError::load(format!("failed to read entry in '{}': {error}", dir.display()))
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<Document, RagError> {
    let text = fs::read_to_string(path).map_err(|error| {
        RagError::load(format!("failed to read '{}': {error}", path.display()))
    })?;

    let mut document = Document::new(path.display().to_string(), text);
    if let Some(extension) = path.extension().and_then(|value| value.to_str()) {
        document = document.with_metadata("extension", extension);
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("swrag-{prefix}-{unique}"))
    }

    #[test]
    fn missing_directory_is_created_and_loads_empty() {
        let root = temp_dir("missing");
        let source = FsDocumentSource::open(&root).expect("source should open");

        assert!(root.is_dir());
        assert!(source.load().expect("load should succeed").is_empty());
        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn extension_filter_walks_nested_directories() {
        let root = temp_dir("filter");
        fs::create_dir_all(root.join("nested")).expect("dirs");
        fs::write(root.join("a.md"), "alpha").expect("write a");
        fs::write(root.join("b.txt"), "beta").expect("write b");
        fs::write(root.join("nested").join("c.MD"), "gamma").expect("write c");

        let source = FsDocumentSource::open(&root)
            .expect("source should open")
            .with_extension(".md")
            .expect("extension should be accepted");
        let texts = source
            .load()
            .expect("load should succeed")
            .into_iter()
            .map(|document| document.text)
            .collect::<Vec<_>>();

        assert_eq!(texts, vec!["alpha", "gamma"]);
        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn wildcard_loads_every_file() {
        let root = temp_dir("wildcard");
        fs::create_dir_all(&root).expect("dir");
        fs::write(root.join("a.md"), "alpha").expect("write a");
        fs::write(root.join("b.txt"), "beta").expect("write b");

        let source = FsDocumentSource::open(&root).expect("source should open");
        assert_eq!(source.extension(), ALL_EXTENSIONS);
        assert_eq!(source.load().expect("load should succeed").len(), 2);
        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn file_path_loads_only_that_file() {
        let root = temp_dir("single");
        fs::create_dir_all(&root).expect("dir");
        let file = root.join("notes.txt");
        fs::write(&file, "Zachary Ivie").expect("write");
        fs::write(root.join("other.txt"), "ignored").expect("write other");

        let documents = FsDocumentSource::open(&file)
            .expect("source should open")
            .load()
            .expect("load should succeed");

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "Zachary Ivie");
        assert_eq!(documents[0].metadata.get("extension").map(String::as_str), Some("txt"));
        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn blank_extension_is_rejected() {
        let root = temp_dir("blank-ext");
        let error = FsDocumentSource::open(&root)
            .expect("source should open")
            .with_extension("  ")
            .expect_err("blank extension should fail");

        assert_eq!(error.kind, crate::RagErrorKind::InvalidConfig);
        fs::remove_dir_all(root).expect("cleanup");
    }
}
