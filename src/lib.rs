//! # Inspecta
//!
//! Turns a pendency report (sections, subsections and findings with
//! before/after photos) or a technical opinion (fixed preamble plus
//! illustrated topics) into a paginated, letterhead-formatted `.docx`.
//!
//! ```ignore
//! use inspecta::{ComposerBuilder, types::Report};
//!
//! let composer = ComposerBuilder::new().with_asset_dir("assets").build()?;
//! let generated = composer.generate_pendency_report(&report).await?;
//! std::fs::write(&generated.filename, &generated.bytes)?;
//! ```

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{download_filename, ComposerBuilder, GeneratedReport, ReportComposer};

pub use inspecta_core::{
    ComposerConfig, GenerationPhase, GenerationSummary, Labels, Progress, ProgressSink,
};
pub use inspecta_types as types;
