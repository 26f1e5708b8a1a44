//! Iterative mean (box) blur for raster images.
//!
//! The blur itself lives in [`operations::mean_blur`] and works on the [`pixel::PixelGrid`]
//! extracted from a decoded image. Everything else wires it up to the `meanblur` binary.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod arg_parse_err;
pub mod arg_parsers;
pub mod args;
mod decode;
pub mod encode;
pub mod error;
pub mod help;
pub mod image;
mod init;
pub mod operations;
pub mod pixel;
pub mod plan;
mod utils;
