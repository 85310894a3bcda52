// src/pipeline/builder.rs
use super::config::{validate, ComposerConfig};
use super::orchestrator::ReportComposer;
use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use inspecta_render_core::DocumentRenderer;
use inspecta_render_docx::DocxRenderer;
use inspecta_resource::RoutingResourceProvider;
use inspecta_traits::ResourceProvider;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for creating a [`ReportComposer`].
#[derive(Default)]
pub struct ComposerBuilder {
    config: ComposerConfig,
    provider: Option<Arc<dyn ResourceProvider>>,
    asset_dir: Option<PathBuf>,
    generated_at: Option<DateTime<Utc>>,
}

impl ComposerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ComposerConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON string. Missing fields keep their defaults.
    pub fn with_config_json(mut self, source: &str) -> Result<Self, PipelineError> {
        self.config = ComposerConfig::from_json(source)?;
        Ok(self)
    }

    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read configuration from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.with_config_json(&source)
    }

    /// Uses `provider` for every image and branding reference.
    pub fn with_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Resolves `http(s)://` references over the network and everything else
    /// inside `path`. Ignored when an explicit provider is set.
    pub fn with_asset_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.asset_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Pins the generation timestamp instead of reading the clock per call.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn build(self) -> Result<ReportComposer, PipelineError> {
        self.build_with_renderer(DocxRenderer::new())
    }

    /// Like [`Self::build`], packaging through `renderer` instead of DOCX.
    pub fn build_with_renderer<R>(self, renderer: R) -> Result<ReportComposer<R>, PipelineError>
    where
        R: DocumentRenderer + Clone + Send + 'static,
    {
        validate(&self.config)?;

        let provider: Arc<dyn ResourceProvider> = match (self.provider, self.asset_dir) {
            (Some(provider), _) => provider,
            (None, Some(dir)) => {
                log::info!("Resolving local assets from '{}'.", dir.display());
                Arc::new(RoutingResourceProvider::new(dir))
            }
            (None, None) => {
                log::info!("No asset directory configured; using the working directory.");
                Arc::new(RoutingResourceProvider::new("."))
            }
        };
        log::debug!("Using resource provider {}", provider.name());

        Ok(ReportComposer::new(
            self.config,
            provider,
            renderer,
            self.generated_at,
        ))
    }
}
