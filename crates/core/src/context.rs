use crate::images::{ImagePipeline, NormalizedImage};
use crate::numbering::FindingCounter;
use chrono::{DateTime, NaiveDate, Utc};
use inspecta_idf::{MediaId, MediaStore};
use std::collections::HashMap;

/// What a run did, for callers that do not want to parse the package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationSummary {
    /// Finding numbers in the order they were assigned.
    pub finding_numbers: Vec<u32>,
    /// Source references that degraded to a placeholder.
    pub image_failures: Vec<String>,
    pub page_breaks: usize,
}

/// All mutable state of one generation call, threaded through the traversal.
#[derive(Debug)]
pub struct GenerationContext {
    pub counter: FindingCounter,
    pub images: ImagePipeline,
    pub media: MediaStore,
    pub summary: GenerationSummary,
    figures: u32,
    embedded: HashMap<(String, u32), MediaId>,
    generated_at: DateTime<Utc>,
}

impl GenerationContext {
    pub fn new(generated_at: DateTime<Utc>, jpeg_quality: u8) -> Self {
        Self {
            counter: FindingCounter::new(),
            images: ImagePipeline::new(jpeg_quality),
            media: MediaStore::new(),
            summary: GenerationSummary::default(),
            figures: 0,
            embedded: HashMap::new(),
            generated_at,
        }
    }

    /// Drops everything a previous run left behind, the image cache included.
    pub fn reset(&mut self) {
        self.counter = FindingCounter::new();
        self.images.clear();
        self.media = MediaStore::new();
        self.summary = GenerationSummary::default();
        self.figures = 0;
        self.embedded.clear();
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn today(&self) -> NaiveDate {
        self.generated_at.date_naive()
    }

    /// Next zero-padded figure number for captions: `01`, `02`, ...
    pub fn next_figure(&mut self) -> String {
        self.figures += 1;
        format!("{:02}", self.figures)
    }

    /// Adds `image` to the media store once per `(reference, max width)`.
    pub fn embed(&mut self, reference: &str, max_width: u32, image: &NormalizedImage) -> MediaId {
        let key = (reference.to_string(), max_width);
        if let Some(id) = self.embedded.get(&key) {
            return *id;
        }
        let id = self.media.add(image.to_media());
        self.embedded.insert(key, id);
        id
    }

    /// Branding assets are never shared with findings.
    pub fn embed_branding(&mut self, image: &NormalizedImage) -> MediaId {
        self.media.add(image.to_media())
    }
}
