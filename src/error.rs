use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the typing test core and its startup plumbing.
#[derive(Error, Debug)]
pub enum Error {
    /// Input that can never produce a usable phrase, e.g. an empty word source.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The word list could not be read. Fatal at startup.
    #[error("failed to load word list from {path}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be serialized or written.
    #[error("failed to write config to {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_load_message_names_path() {
        let err = Error::ResourceLoad {
            path: PathBuf::from("/missing/words.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            err.to_string(),
            "failed to load word list from /missing/words.txt"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_input_message() {
        let err = Error::InvalidInput("word list is empty".into());
        assert_eq!(err.to_string(), "invalid input: word list is empty");
    }
}
