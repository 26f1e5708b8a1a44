//! Parsers for specific command-line argument formats

mod blur_config;
pub use blur_config::*;
mod filename;
pub use filename::*;
mod numbers;
pub use numbers::*;
