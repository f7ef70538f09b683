//! Library exports for kitbook-cli.
//!
//! Exposes the CLI definition so documentation tooling and tests can build
//! the clap command without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
