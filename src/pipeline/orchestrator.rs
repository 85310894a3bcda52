// src/pipeline/orchestrator.rs
use super::config::ComposerConfig;
use super::output::{download_filename, GeneratedReport};
use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use inspecta_core::idf::DocumentTree;
use inspecta_core::{Assembler, GenerationContext, ProgressReporter, ProgressSink};
use inspecta_render_core::{DocumentRenderer, RenderError};
use inspecta_render_docx::DocxRenderer;
use inspecta_traits::ResourceProvider;
use inspecta_types::{Report, ReportMeta, TechnicalOpinion};
use log::info;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;

/// Generates report packages. One instance can serve any number of calls;
/// nothing is shared between them except configuration and the provider.
pub struct ReportComposer<R = DocxRenderer> {
    config: ComposerConfig,
    provider: Arc<dyn ResourceProvider>,
    renderer: R,
    generated_at: Option<DateTime<Utc>>,
}

impl<R> ReportComposer<R>
where
    R: DocumentRenderer + Clone + Send + 'static,
{
    pub(crate) fn new(
        config: ComposerConfig,
        provider: Arc<dyn ResourceProvider>,
        renderer: R,
        generated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            config,
            provider,
            renderer,
            generated_at,
        }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn generate_pendency_report(
        &self,
        report: &Report,
    ) -> Result<GeneratedReport, PipelineError> {
        self.generate_pendency_report_with_progress(report, None).await
    }

    /// Like [`Self::generate_pendency_report`], reporting each finding to `sink`.
    pub async fn generate_pendency_report_with_progress(
        &self,
        report: &Report,
        sink: Option<ProgressSink<'_>>,
    ) -> Result<GeneratedReport, PipelineError> {
        let start = Instant::now();
        let mut progress = ProgressReporter::new(report.finding_count(), sink);
        let mut ctx = self.context();

        let assembler = Assembler::new(&self.config, self.provider.as_ref());
        let tree = assembler.assemble_report(report, &mut ctx, &mut progress).await;

        let generated = self
            .package(tree, ctx, &report.title, &report.meta, &mut progress)
            .await?;
        info!(
            "Pendency report '{}' generated in {:.2?}: {} findings, {} degraded images, {} bytes",
            report.title,
            start.elapsed(),
            generated.summary.finding_numbers.len(),
            generated.summary.image_failures.len(),
            generated.bytes.len()
        );
        Ok(generated)
    }

    pub async fn generate_technical_opinion(
        &self,
        opinion: &TechnicalOpinion,
    ) -> Result<GeneratedReport, PipelineError> {
        self.generate_technical_opinion_with_progress(opinion, None).await
    }

    /// Like [`Self::generate_technical_opinion`], reporting each topic image to `sink`.
    pub async fn generate_technical_opinion_with_progress(
        &self,
        opinion: &TechnicalOpinion,
        sink: Option<ProgressSink<'_>>,
    ) -> Result<GeneratedReport, PipelineError> {
        let start = Instant::now();
        let mut progress = ProgressReporter::new(opinion.image_count(), sink);
        let mut ctx = self.context();

        let assembler = Assembler::new(&self.config, self.provider.as_ref());
        let tree = assembler
            .assemble_opinion(opinion, &mut ctx, &mut progress)
            .await;

        let generated = self
            .package(tree, ctx, &opinion.title, &opinion.meta, &mut progress)
            .await?;
        info!(
            "Technical opinion '{}' generated in {:.2?}: {} topics, {} degraded images, {} bytes",
            opinion.title,
            start.elapsed(),
            opinion.topics.len(),
            generated.summary.image_failures.len(),
            generated.bytes.len()
        );
        Ok(generated)
    }

    fn context(&self) -> GenerationContext {
        let now = self.generated_at.unwrap_or_else(Utc::now);
        GenerationContext::new(now, self.config.images.jpeg_quality)
    }

    /// Serializes off the async thread. Any failure here is fatal and moves
    /// the run to the error phase; no partial output is returned.
    async fn package(
        &self,
        tree: DocumentTree,
        ctx: GenerationContext,
        title: &str,
        meta: &ReportMeta,
        progress: &mut ProgressReporter<'_>,
    ) -> Result<GeneratedReport, PipelineError> {
        progress.packaging();
        let renderer = self.renderer.clone();
        let rendered = task::spawn_blocking(move || renderer.render_to_vec(&tree))
            .await
            .unwrap_or_else(|e| {
                Err(RenderError::Other(format!("packaging task failed: {}", e)))
            });

        match rendered {
            Ok(bytes) => {
                progress.done();
                let date = meta.issued_on.unwrap_or_else(|| ctx.today());
                Ok(GeneratedReport {
                    bytes,
                    filename: download_filename(title, date),
                    summary: ctx.summary,
                })
            }
            Err(e) => {
                progress.failed(&e.to_string());
                Err(PipelineError::Serialization(e))
            }
        }
    }
}
