//! Walks a report and produces the document tree: cover, table of contents,
//! then the body with numbering and data-driven page breaks.
//!
//! Both report types go through the same machinery; what differs is the
//! [`PaginationPolicy`] and the fixed preamble of the technical opinion.

use crate::config::ComposerConfig;
use crate::context::GenerationContext;
use crate::error::{BrandingAssetError, ImageFailure};
use crate::images::{fetch_branding, fit_extent, NormalizedImage};
use crate::letterhead::{build_footer, build_header, LetterheadContent, LetterheadGeometry};
use crate::numbering::{section_label, subsection_label, to_roman};
use crate::policy::PaginationPolicy;
use crate::progress::{GenerationPhase, ProgressReporter};
use chrono::NaiveDate;
use inspecta_idf::{
    Align, DocumentInfo, DocumentTree, IRNode, InlineNode, ParagraphStyle, TableCell, TableNode,
    TableRow, TocEntry,
};
use inspecta_style::{twips_to_emu, CellAlign, PageGeometry, TableGeometry};
use inspecta_traits::ResourceProvider;
use inspecta_types::{Color, Finding, Report, ReportMeta, TechnicalOpinion};
use log::{debug, info, warn};
use std::fmt::Write;

const LABEL_SHADE: Color = Color::rgb(0xD9, 0xD9, 0xD9);
const COVER_TOP_SPACING: usize = 6;

pub struct Assembler<'a> {
    config: &'a ComposerConfig,
    provider: &'a dyn ResourceProvider,
    page: PageGeometry,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a ComposerConfig, provider: &'a dyn ResourceProvider) -> Self {
        Self {
            config,
            provider,
            page: config.page.geometry(),
        }
    }

    /// Assembles a pendency report. Image failures degrade in place; the
    /// result is always a complete tree.
    pub async fn assemble_report(
        &self,
        report: &Report,
        ctx: &mut GenerationContext,
        progress: &mut ProgressReporter<'_>,
    ) -> DocumentTree {
        let policy = PaginationPolicy::PENDENCY_REPORT;
        ctx.reset();
        progress.enter(GenerationPhase::BuildStructure);
        info!(
            "Assembling pendency report '{}' ({} sections, {} findings)",
            report.title,
            report.sections.len(),
            report.finding_count()
        );

        let labels = &self.config.labels;
        let date = self.issue_date(&report.meta, ctx);
        let (header, footer) = self
            .letterhead(&report.title, &report.meta, &date, ctx)
            .await;

        let mut body = Vec::new();
        self.cover(
            &mut body,
            &report.title,
            &labels.pendency_subject,
            &report.meta,
            &date,
        );
        let entries = report_contents(report, &policy);
        self.contents(&mut body, &entries);
        if !report.sections.is_empty() {
            body.push(IRNode::PageBreak);
        }
        progress.structure_built();

        if let Some(purpose) = report.purpose.as_deref() {
            body.push(IRNode::styled(
                ParagraphStyle::CellLabel,
                vec![InlineNode::Text(labels.purpose.clone())],
            ));
            body.extend(text_paragraphs(purpose));
        }
        if let Some(narrative) = report.narrative.as_deref() {
            body.push(IRNode::styled(
                ParagraphStyle::CellLabel,
                vec![InlineNode::Text(labels.narrative.clone())],
            ));
            body.extend(text_paragraphs(narrative));
        }

        let mut previous_had_findings = false;
        for (si, section) in report.sections.iter().enumerate() {
            if policy.break_before_section(si, previous_had_findings) {
                body.push(IRNode::PageBreak);
            }
            let numeral = policy.section_numeral(si);
            body.push(IRNode::heading(
                1,
                section_label(&numeral, &section.title),
                Some(section_anchor(si)),
            ));
            self.findings(&mut body, &section.findings, &policy, ctx, progress)
                .await;

            for (ui, subsection) in section.subsections.iter().enumerate() {
                body.push(IRNode::heading(
                    2,
                    subsection_label(&numeral, ui, &subsection.title),
                    Some(subsection_anchor(si, ui)),
                ));
                self.findings(&mut body, &subsection.findings, &policy, ctx, progress)
                    .await;
            }
            previous_had_findings = section.has_findings();
        }

        progress.enter(GenerationPhase::Finalize);
        let info = self.document_info(
            &report.title,
            &labels.pendency_subject,
            &report.meta,
            ctx,
        );
        self.finish(info, header, footer, body, ctx)
    }

    /// Assembles a technical opinion: fixed Purpose and Narrative headings,
    /// then topics numbered after them, each with captioned images.
    pub async fn assemble_opinion(
        &self,
        opinion: &TechnicalOpinion,
        ctx: &mut GenerationContext,
        progress: &mut ProgressReporter<'_>,
    ) -> DocumentTree {
        let policy = PaginationPolicy::TECHNICAL_OPINION;
        ctx.reset();
        progress.enter(GenerationPhase::BuildStructure);
        info!(
            "Assembling technical opinion '{}' ({} topics, {} images)",
            opinion.title,
            opinion.topics.len(),
            opinion.image_count()
        );

        let labels = &self.config.labels;
        let date = self.issue_date(&opinion.meta, ctx);
        let (header, footer) = self
            .letterhead(&opinion.title, &opinion.meta, &date, ctx)
            .await;

        let mut body = Vec::new();
        self.cover(
            &mut body,
            &opinion.title,
            &labels.opinion_subject,
            &opinion.meta,
            &date,
        );
        let entries = opinion_contents(opinion, &policy, &self.config.labels);
        self.contents(&mut body, &entries);
        body.push(IRNode::PageBreak);
        progress.structure_built();

        let preamble = [
            (&labels.purpose, &opinion.purpose),
            (&labels.narrative, &opinion.narrative),
        ];
        for (i, (heading, text)) in preamble.into_iter().enumerate() {
            let numeral = to_roman(i as u32 + 1);
            body.push(IRNode::heading(
                1,
                section_label(&numeral, heading),
                Some(preamble_anchor(i)),
            ));
            body.extend(text_paragraphs(text));
        }

        let max_extent = twips_to_emu(self.page.body_width());
        let max_width = self.config.images.topic_max_width;
        for (ti, topic) in opinion.topics.iter().enumerate() {
            let numeral = policy.section_numeral(ti);
            body.push(IRNode::heading(
                1,
                section_label(&numeral, &topic.title),
                Some(topic_anchor(ti)),
            ));
            body.extend(text_paragraphs(&topic.description));

            let images = topic.ordered_images();
            for (ii, image) in images.iter().enumerate() {
                let figure = match self
                    .picture(&image.url, max_width, max_extent, ctx)
                    .await
                {
                    Ok(node) => node,
                    Err(_) => self.placeholder(),
                };
                body.push(figure);
                body.push(self.caption(ctx.next_figure(), &image.caption));
                progress.item_done("Image");

                let processed = ii + 1;
                if policy.break_after(processed, images.len() - processed) {
                    body.push(IRNode::PageBreak);
                }
            }
        }

        if let Some(conclusion) = opinion.conclusion.as_deref() {
            let numeral = policy.section_numeral(opinion.topics.len());
            body.push(IRNode::heading(
                1,
                section_label(&numeral, &labels.conclusion),
                Some(CONCLUSION_ANCHOR.to_string()),
            ));
            body.extend(text_paragraphs(conclusion));
        }

        progress.enter(GenerationPhase::Finalize);
        let info = self.document_info(
            &opinion.title,
            &labels.opinion_subject,
            &opinion.meta,
            ctx,
        );
        self.finish(info, header, footer, body, ctx)
    }

    fn finish(
        &self,
        info: DocumentInfo,
        header: Vec<IRNode>,
        footer: Vec<IRNode>,
        body: Vec<IRNode>,
        ctx: &mut GenerationContext,
    ) -> DocumentTree {
        let tree = DocumentTree {
            info,
            page: self.page,
            header,
            footer,
            body,
            media: std::mem::take(&mut ctx.media),
        };
        ctx.summary.page_breaks = tree.page_break_count();
        debug!(
            "Assembled {} body nodes, {} page breaks, {} media items",
            tree.body.len(),
            ctx.summary.page_breaks,
            tree.media.len()
        );
        tree
    }

    /// Findings of one container. The break counter is local to the
    /// container; the finding number is global.
    async fn findings(
        &self,
        body: &mut Vec<IRNode>,
        findings: &[Finding],
        policy: &PaginationPolicy,
        ctx: &mut GenerationContext,
        progress: &mut ProgressReporter<'_>,
    ) {
        for (i, finding) in findings.iter().enumerate() {
            let number = ctx.counter.next_number();
            ctx.summary.finding_numbers.push(number);
            debug!("Finding {} at '{}'", number, finding.location);

            body.push(self.finding_table(finding, number, ctx).await);
            body.push(IRNode::empty_paragraph());
            progress.item_done("Finding");

            let processed = i + 1;
            if policy.break_after(processed, findings.len() - processed) {
                body.push(IRNode::PageBreak);
            }
        }
    }

    /// Number, location, description, before/after labels, before/after images.
    /// Always two image columns.
    async fn finding_table(
        &self,
        finding: &Finding,
        number: u32,
        ctx: &mut GenerationContext,
    ) -> IRNode {
        let labels = &self.config.labels;
        let geometry = TableGeometry::even(self.page.body_width(), 2);
        let extent = twips_to_emu(geometry.content_width(0, 1));
        let max_width = self.config.images.finding_max_width;

        let before = self
            .image_cell(finding.before_image.as_deref(), max_width, extent, ctx)
            .await;
        let after = self
            .image_cell(finding.after_image.as_deref(), max_width, extent, ctx)
            .await;

        let labelled = |label: &str, text: &str| {
            let mut children = vec![InlineNode::bold(format!("{}: ", label))];
            children.extend(text_runs(text));
            TableRow::new(vec![
                TableCell::new(vec![IRNode::styled(ParagraphStyle::Normal, children)]).span(2),
            ])
        };
        let shaded_label = |text: &str| {
            TableCell::new(vec![IRNode::styled(
                ParagraphStyle::CellLabel,
                vec![InlineNode::Text(text.to_string())],
            )
            .aligned(Align::Center)])
            .shaded(LABEL_SHADE)
        };

        TableNode::new(geometry)
            .row(
                TableRow::new(vec![
                    shaded_label(&format!("{} {}", labels.finding, number)).span(2),
                ])
                .unsplittable(),
            )
            .row(labelled(&labels.location, &finding.location))
            .row(labelled(&labels.description, &finding.description))
            .row(
                TableRow::new(vec![shaded_label(&labels.before), shaded_label(&labels.after)])
                    .unsplittable(),
            )
            .row(
                TableRow::new(vec![
                    before.valign(CellAlign::Center),
                    after.valign(CellAlign::Center),
                ])
                .unsplittable(),
            )
            .into_node()
    }

    /// An absent reference gives an empty cell; a failed one a placeholder.
    async fn image_cell(
        &self,
        reference: Option<&str>,
        max_width: u32,
        max_extent: i64,
        ctx: &mut GenerationContext,
    ) -> TableCell {
        let Some(reference) = reference.map(str::trim).filter(|r| !r.is_empty()) else {
            return TableCell::empty();
        };
        match self.picture(reference, max_width, max_extent, ctx).await {
            Ok(node) => TableCell::new(vec![node]),
            Err(_) => TableCell::new(vec![self.placeholder()]),
        }
    }

    /// A centered picture paragraph, or the failure after recording it.
    async fn picture(
        &self,
        reference: &str,
        max_width: u32,
        max_extent: i64,
        ctx: &mut GenerationContext,
    ) -> Result<IRNode, ImageFailure> {
        match ctx.images.normalize(self.provider, reference, max_width).await {
            Ok(image) => {
                let media = ctx.embed(reference, max_width, &image);
                let (width_emu, height_emu) =
                    fit_extent(image.width, image.height, max_extent, None);
                let picture = InlineNode::Image {
                    media,
                    width_emu,
                    height_emu,
                    description: reference.to_string(),
                };
                Ok(IRNode::styled(ParagraphStyle::Normal, vec![picture])
                    .aligned(Align::Center))
            }
            Err(failure) => {
                warn!("{}; rendering placeholder", failure);
                ctx.summary.image_failures.push(failure.reference().to_string());
                Err(failure)
            }
        }
    }

    fn placeholder(&self) -> IRNode {
        IRNode::styled(
            ParagraphStyle::Placeholder,
            vec![InlineNode::Text(self.config.labels.image_unavailable.clone())],
        )
    }

    /// `Image 01 – caption`
    fn caption(&self, figure: String, caption: &str) -> IRNode {
        let caption = caption.trim();
        let text = if caption.is_empty() {
            format!("{} {}", self.config.labels.figure, figure)
        } else {
            format!("{} {} – {}", self.config.labels.figure, figure, caption)
        };
        IRNode::styled(ParagraphStyle::Caption, vec![InlineNode::Text(text)])
    }

    async fn letterhead(
        &self,
        title: &str,
        meta: &ReportMeta,
        date: &str,
        ctx: &mut GenerationContext,
    ) -> (Vec<IRNode>, Vec<IRNode>) {
        let config = &self.config.letterhead;
        let geometry = LetterheadGeometry::new(&self.page, config);

        let logo = branding(
            fetch_branding(self.provider, config.logo_path.as_deref()).await,
            "logo",
        );
        let banner = branding(
            fetch_branding(self.provider, config.banner_path.as_deref()).await,
            "banner",
        );

        let content = LetterheadContent {
            title,
            condominium: &meta.condominium,
            date,
            revision: meta.revision.as_deref().unwrap_or(&config.revision),
        };
        let logo = logo.as_ref().map(|img| (ctx.embed_branding(img), img));
        let header = build_header(&geometry, &content, &self.config.labels, logo);
        let banner = banner.as_ref().map(|img| (ctx.embed_branding(img), img));
        let footer = build_footer(&geometry, banner);
        (header, footer)
    }

    fn cover(
        &self,
        body: &mut Vec<IRNode>,
        title: &str,
        subject: &str,
        meta: &ReportMeta,
        date: &str,
    ) {
        let labels = &self.config.labels;
        body.extend((0..COVER_TOP_SPACING).map(|_| IRNode::empty_paragraph()));
        body.push(IRNode::styled(
            ParagraphStyle::Title,
            vec![InlineNode::Text(title.to_string())],
        ));
        body.push(IRNode::styled(
            ParagraphStyle::Subtitle,
            vec![InlineNode::Text(subject.to_string())],
        ));
        if !meta.condominium.is_empty() {
            body.push(IRNode::styled(
                ParagraphStyle::Subtitle,
                vec![InlineNode::Text(meta.condominium.clone())],
            ));
        }
        body.push(IRNode::empty_paragraph());

        let mut line = |label: &str, value: &str| {
            body.push(
                IRNode::styled(
                    ParagraphStyle::Normal,
                    vec![
                        InlineNode::bold(format!("{}: ", label)),
                        InlineNode::Text(value.to_string()),
                    ],
                )
                .aligned(Align::Center),
            );
        };
        if let Some(responsible) = meta.responsible.as_deref() {
            line(&labels.responsible, responsible);
        }
        line(&labels.date, date);
        line(
            &labels.revision,
            meta.revision.as_deref().unwrap_or(&self.config.letterhead.revision),
        );
        body.push(IRNode::PageBreak);
    }

    fn contents(&self, body: &mut Vec<IRNode>, entries: &[TocEntry]) {
        body.push(IRNode::styled(
            ParagraphStyle::TocHeading,
            vec![InlineNode::Text(self.config.labels.contents.clone())],
        ));
        for entry in entries {
            body.push(IRNode::styled(
                ParagraphStyle::TocEntry(entry.level),
                vec![InlineNode::Hyperlink {
                    anchor: entry.target_id.clone(),
                    children: vec![InlineNode::Text(entry.text.clone())],
                }],
            ));
        }
    }

    fn issue_date(&self, meta: &ReportMeta, ctx: &GenerationContext) -> String {
        let date = meta.issued_on.unwrap_or_else(|| ctx.today());
        format_date(date, &self.config.letterhead.date_format)
    }

    fn document_info(
        &self,
        title: &str,
        subject: &str,
        meta: &ReportMeta,
        ctx: &GenerationContext,
    ) -> DocumentInfo {
        DocumentInfo {
            title: title.to_string(),
            subject: subject.to_string(),
            creator: meta.responsible.clone().unwrap_or_else(|| "Inspecta".to_string()),
            created: ctx.generated_at().to_rfc3339(),
        }
    }
}

fn branding(
    result: Result<NormalizedImage, BrandingAssetError>,
    what: &str,
) -> Option<NormalizedImage> {
    match result {
        Ok(image) => Some(image),
        Err(BrandingAssetError::NotConfigured) => {
            debug!("No {} configured", what);
            None
        }
        Err(e) => {
            warn!("Letterhead {} degraded: {}", what, e);
            None
        }
    }
}

const CONCLUSION_ANCHOR: &str = "conclusion";

fn section_anchor(section: usize) -> String {
    format!("section_{}", section + 1)
}

fn subsection_anchor(section: usize, subsection: usize) -> String {
    format!("section_{}_{}", section + 1, subsection + 1)
}

fn preamble_anchor(index: usize) -> String {
    format!("preamble_{}", index + 1)
}

fn topic_anchor(index: usize) -> String {
    format!("topic_{}", index + 1)
}

/// Contents of a pendency report, derived from section and subsection titles.
pub fn report_contents(report: &Report, policy: &PaginationPolicy) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    for (si, section) in report.sections.iter().enumerate() {
        let numeral = policy.section_numeral(si);
        entries.push(TocEntry {
            level: 1,
            text: section_label(&numeral, &section.title),
            target_id: section_anchor(si),
        });
        for (ui, subsection) in section.subsections.iter().enumerate() {
            entries.push(TocEntry {
                level: 2,
                text: subsection_label(&numeral, ui, &subsection.title),
                target_id: subsection_anchor(si, ui),
            });
        }
    }
    entries
}

/// Contents of a technical opinion: preamble, topics, conclusion.
pub fn opinion_contents(
    opinion: &TechnicalOpinion,
    policy: &PaginationPolicy,
    labels: &crate::config::Labels,
) -> Vec<TocEntry> {
    let mut entries: Vec<TocEntry> = [&labels.purpose, &labels.narrative]
        .into_iter()
        .enumerate()
        .map(|(i, title)| TocEntry {
            level: 1,
            text: section_label(&to_roman(i as u32 + 1), title),
            target_id: preamble_anchor(i),
        })
        .collect();
    for (ti, topic) in opinion.topics.iter().enumerate() {
        entries.push(TocEntry {
            level: 1,
            text: section_label(&policy.section_numeral(ti), &topic.title),
            target_id: topic_anchor(ti),
        });
    }
    if opinion.conclusion.is_some() {
        entries.push(TocEntry {
            level: 1,
            text: section_label(
                &policy.section_numeral(opinion.topics.len()),
                &labels.conclusion,
            ),
            target_id: CONCLUSION_ANCHOR.to_string(),
        });
    }
    entries
}

/// Lines of `text` as runs separated by line breaks.
fn text_runs(text: &str) -> Vec<InlineNode> {
    let mut runs = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            runs.push(InlineNode::LineBreak);
        }
        runs.push(InlineNode::Text(line.to_string()));
    }
    runs
}

/// One justified paragraph per non-blank line; blank text gives one empty paragraph.
fn text_paragraphs(text: &str) -> Vec<IRNode> {
    let paragraphs: Vec<IRNode> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| IRNode::paragraph(line).aligned(Align::Justify))
        .collect();
    if paragraphs.is_empty() {
        vec![IRNode::empty_paragraph()]
    } else {
        paragraphs
    }
}

/// Formats with a chrono pattern, falling back to ISO 8601 on a bad pattern.
fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}
