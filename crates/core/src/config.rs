//! Composer configuration. Every field has a default, so an empty JSON
//! object is a valid configuration.

use inspecta_style::{Margins, PageGeometry};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposerConfig {
    pub page: PageConfig,
    pub letterhead: LetterheadConfig,
    pub images: ImageConfig,
    pub labels: Labels,
}

impl ComposerConfig {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

/// Body margins and header/footer distances, in centimetres.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub margins: Margins,
    pub header_distance: f64,
    pub footer_distance: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            header_distance: 1.0,
            footer_distance: 0.5,
        }
    }
}

impl PageConfig {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::a4(&self.margins, self.header_distance, self.footer_distance)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterheadConfig {
    /// Visible side margin of the header table (cm); smaller than the body
    /// margin, so the table bleeds outward.
    pub header_margin: f64,
    /// Default revision label; a report's own revision wins.
    pub revision: String,
    pub logo_path: Option<String>,
    pub banner_path: Option<String>,
    /// Logo column width (cm).
    pub logo_width: f64,
    /// Metadata column width (cm). The title column takes the rest.
    pub info_width: f64,
    /// Banner height (cm) when the image carries no usable aspect ratio.
    pub banner_height: f64,
    /// chrono format string for dates on the cover and letterhead.
    pub date_format: String,
}

impl Default for LetterheadConfig {
    fn default() -> Self {
        Self {
            header_margin: 1.0,
            revision: "Rev. 00".to_string(),
            logo_path: Some("/branding/logo.png".to_string()),
            banner_path: Some("/branding/footer.png".to_string()),
            logo_width: 4.0,
            info_width: 5.5,
            banner_height: 1.5,
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    /// Downsampling bound for finding photos (px).
    pub finding_max_width: u32,
    /// Downsampling bound for technical-opinion images (px).
    pub topic_max_width: u32,
    pub jpeg_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            finding_max_width: 800,
            topic_max_width: 1200,
            jpeg_quality: 80,
        }
    }
}

/// Every fixed, user-visible string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub image_unavailable: String,
    pub figure: String,
    pub contents: String,
    pub finding: String,
    pub location: String,
    pub description: String,
    pub before: String,
    pub after: String,
    pub purpose: String,
    pub narrative: String,
    pub conclusion: String,
    pub condominium: String,
    pub responsible: String,
    pub date: String,
    pub revision: String,
    pub page: String,
    pub page_of: String,
    pub pendency_subject: String,
    pub opinion_subject: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            image_unavailable: "image unavailable".into(),
            figure: "Image".into(),
            contents: "Contents".into(),
            finding: "Item".into(),
            location: "Location".into(),
            description: "Description".into(),
            before: "Before".into(),
            after: "After".into(),
            purpose: "Purpose".into(),
            narrative: "Narrative".into(),
            conclusion: "Conclusion".into(),
            condominium: "Condominium".into(),
            responsible: "Responsible".into(),
            date: "Date".into(),
            revision: "Revision".into(),
            page: "Page".into(),
            page_of: "of".into(),
            pendency_subject: "Pendency report".into(),
            opinion_subject: "Technical opinion".into(),
        }
    }
}
