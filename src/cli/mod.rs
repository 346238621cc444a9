//! Command Line Interface (CLI) layer for TIRPRO.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-granule and batch
//! processing flows. If you are embedding TIRPRO into another application,
//! prefer the high-level `tirpro::api` module instead of calling the CLI
//! code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
