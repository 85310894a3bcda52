//! # inspecta-core
//!
//! Platform-agnostic report composition core.
//!
//! This crate turns a pendency report or technical opinion into an
//! [`idf::DocumentTree`]:
//! - **numbering**: Roman section numerals, alphabetic subsection suffixes and
//!   the global finding counter
//! - **images**: fetch, decode, downsample, re-encode and cache
//! - **letterhead**: header and footer tables with declarative geometry
//! - **assembler**: cover, table of contents and body with data-driven page breaks
//! - **progress**: generation phases and the progress callback
//!
//! ## Design Principle
//!
//! Nothing here touches the network or the filesystem directly. Image bytes
//! come through [`traits::ResourceProvider`], and all per-run mutable state
//! lives in an explicit [`GenerationContext`].

// Re-export foundation crates
pub use inspecta_idf as idf;
pub use inspecta_style as style;
pub use inspecta_traits as traits;
pub use inspecta_types as types;

pub mod assembler;
pub mod config;
pub mod context;
pub mod error;
pub mod images;
pub mod letterhead;
pub mod numbering;
pub mod policy;
pub mod progress;

pub use assembler::Assembler;
pub use config::{ComposerConfig, ImageConfig, Labels, LetterheadConfig, PageConfig};
pub use context::{GenerationContext, GenerationSummary};
pub use error::{BrandingAssetError, ImageFailure};
pub use images::{ImagePipeline, NormalizedImage};
pub use letterhead::LetterheadGeometry;
pub use numbering::{alpha_label, to_roman, FindingCounter};
pub use policy::PaginationPolicy;
pub use progress::{GenerationPhase, Progress, ProgressReporter, ProgressSink};
