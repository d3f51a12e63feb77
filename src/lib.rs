// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod logging;
pub mod phrase;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod word_list;

pub use error::{Error, Result};
