use crate::error::{Error, Result};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Name of the bundled list used when no words file is configured.
pub const DEFAULT_LIST: &str = "english";

/// Words a phrase is drawn from. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::InvalidInput("word list is empty".to_string()));
        }
        Ok(Self { words })
    }

    /// Builds a list from line-delimited text, one word per line.
    /// Surrounding whitespace is trimmed and blank lines are skipped.
    pub fn from_lines(text: &str) -> Result<Self> {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self::new(words)
    }

    /// Reads a word list from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_lines(&text)?;
        tracing::info!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Loads one of the word lists compiled into the binary.
    pub fn bundled(name: &str) -> Result<Self> {
        let file_name = format!("{name}.txt");
        let text = LANG_DIR
            .get_file(&file_name)
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| Error::ResourceLoad {
                path: file_name.clone().into(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "bundled word list not found",
                ),
            })?;
        Self::from_lines(text)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
