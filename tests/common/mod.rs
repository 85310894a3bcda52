#![allow(dead_code)]

pub mod docx_assertions;
pub mod fixtures;

use inspecta::types::{Report, TechnicalOpinion};
use inspecta::{GeneratedReport, GenerationSummary, Progress, ReportComposer};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A generated package with every part read back into memory.
pub struct GeneratedDocx {
    pub bytes: Vec<u8>,
    pub summary: GenerationSummary,
    pub filename: String,
    parts: BTreeMap<String, Vec<u8>>,
}

impl GeneratedDocx {
    pub fn from_generated(generated: GeneratedReport) -> Result<Self, Box<dyn std::error::Error>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(generated.bytes.as_slice()))?;
        let mut parts = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            parts.insert(file.name().to_string(), data);
        }
        Ok(Self {
            summary: generated.summary,
            filename: generated.filename,
            bytes: generated.bytes,
            parts,
        })
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.keys().map(String::as_str).collect()
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn raw_part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    /// A textual part; panics if it is missing or not UTF-8.
    pub fn part(&self, name: &str) -> &str {
        let bytes = self
            .parts
            .get(name)
            .unwrap_or_else(|| panic!("package has no part '{}'", name));
        std::str::from_utf8(bytes).expect("part is not UTF-8")
    }

    pub fn document_xml(&self) -> &str {
        self.part("word/document.xml")
    }

    pub fn media_parts(&self) -> Vec<&str> {
        self.parts
            .keys()
            .filter(|name| name.starts_with("word/media/"))
            .map(String::as_str)
            .collect()
    }

    /// Top-level blocks of the document body, in order.
    pub fn body(&self) -> Vec<docx_assertions::Block> {
        docx_assertions::body_blocks(self.document_xml()).expect("document.xml is well-formed")
    }

    pub fn text(&self) -> String {
        docx_assertions::all_text(self.document_xml()).expect("document.xml is well-formed")
    }

    /// Save the package to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.docx", name), &self.bytes)
    }
}

/// Generates a pendency report on a fresh runtime.
pub fn generate_report(
    composer: &ReportComposer,
    report: &Report,
) -> Result<GeneratedDocx, Box<dyn std::error::Error>> {
    let generated = tokio::runtime::Runtime::new()?
        .block_on(async { composer.generate_pendency_report(report).await })?;
    GeneratedDocx::from_generated(generated)
}

pub fn generate_opinion(
    composer: &ReportComposer,
    opinion: &TechnicalOpinion,
) -> Result<GeneratedDocx, Box<dyn std::error::Error>> {
    let generated = tokio::runtime::Runtime::new()?
        .block_on(async { composer.generate_technical_opinion(opinion).await })?;
    GeneratedDocx::from_generated(generated)
}

/// Generates a pendency report and records every progress notification.
pub fn generate_report_with_progress(
    composer: &ReportComposer,
    report: &Report,
) -> Result<(GeneratedDocx, Vec<Progress>), Box<dyn std::error::Error>> {
    let mut seen = Vec::new();
    let mut record = |p: &Progress| seen.push(p.clone());
    let generated = tokio::runtime::Runtime::new()?.block_on(async {
        composer
            .generate_pendency_report_with_progress(report, Some(&mut record))
            .await
    })?;
    Ok((GeneratedDocx::from_generated(generated)?, seen))
}

#[macro_export]
macro_rules! assert_docx_contains_text {
    ($docx:expr, $text:expr) => {
        let text = $docx.text();
        assert!(
            text.contains($text),
            "Expected document to contain '{}', but it was not found.\nDocument text:\n{}",
            $text,
            text
        );
    };
}

#[macro_export]
macro_rules! assert_docx_lacks_text {
    ($docx:expr, $text:expr) => {
        let text = $docx.text();
        assert!(
            !text.contains($text),
            "Expected document not to contain '{}'.\nDocument text:\n{}",
            $text,
            text
        );
    };
}
