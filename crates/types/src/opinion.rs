//! The technical-opinion record: fixed preamble plus a flat list of topics.

use crate::report::ReportMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalOpinion {
    pub title: String,
    #[serde(default)]
    pub meta: ReportMeta,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl TechnicalOpinion {
    pub fn image_count(&self) -> usize {
        self.topics.iter().map(|t| t.images.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<TopicImage>,
}

impl Topic {
    /// Images in ascending ordinal; equal ordinals keep their input order.
    pub fn ordered_images(&self) -> Vec<&TopicImage> {
        let mut images: Vec<&TopicImage> = self.images.iter().collect();
        images.sort_by_key(|img| img.ordinal);
        images
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicImage {
    #[serde(default)]
    pub ordinal: u32,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}
