//! Document generation pipeline.
//!
//! - [`ComposerBuilder`]: fluent builder choosing configuration and the
//!   resource provider
//! - [`ReportComposer`]: runs assembly, then packaging, and reports progress
//! - [`GeneratedReport`]: the package bytes plus a [`GenerationSummary`]
//!
//! [`GenerationSummary`]: inspecta_core::GenerationSummary

mod builder;
pub mod config;
mod orchestrator;
mod output;

pub use builder::ComposerBuilder;
pub use orchestrator::ReportComposer;
pub use output::{download_filename, GeneratedReport};
