//! Frame generation, video assembly and the run that ties them together.

/// Sweep range and run configuration.
pub mod config;
/// Reads frame files back into a video sink.
pub mod assembler;
/// Renders the sweep into a frame sink.
pub mod generator;
/// Clean, generate, assemble.
pub mod run;
