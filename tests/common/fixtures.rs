use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use inspecta::types::{
    Finding, Report, ReportMeta, Section, Subsection, TechnicalOpinion, Topic, TopicImage,
};
use inspecta::{ComposerBuilder, ReportComposer};
use inspecta_traits::InMemoryResourceProvider;
use std::io::Cursor;
use std::sync::Arc;

pub const LOGO: &str = "/branding/logo.png";
pub const BANNER: &str = "/branding/footer.png";

/// 2024-03-05 12:00 UTC
pub fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_709_640_000, 0).unwrap()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 140, 200]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

/// A translucent branding image.
pub fn branding_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 40, 60, 128]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([160, 80, 30]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, ImageFormat::Jpeg)
        .unwrap();
    cursor.into_inner()
}

/// A provider holding both branding assets and the given photos.
pub fn provider_with(photos: &[(&str, Vec<u8>)]) -> Arc<InMemoryResourceProvider> {
    let provider = InMemoryResourceProvider::new();
    provider.add(LOGO, branding_png(300, 120)).unwrap();
    provider.add(BANNER, branding_png(1200, 90)).unwrap();
    for (reference, bytes) in photos {
        provider.add(*reference, bytes.clone()).unwrap();
    }
    Arc::new(provider)
}

pub fn composer(provider: Arc<InMemoryResourceProvider>) -> ReportComposer {
    ComposerBuilder::new()
        .with_provider(provider)
        .with_generated_at(fixed_time())
        .build()
        .unwrap()
}

pub fn meta() -> ReportMeta {
    ReportMeta {
        condominium: "Residencial Aurora".into(),
        revision: Some("Rev. 02".into()),
        issued_on: None,
        responsible: Some("Eng. Marta Lima".into()),
    }
}

pub fn finding(location: &str) -> Finding {
    Finding {
        location: location.into(),
        description: format!("Damage at {}", location),
        before_image: None,
        after_image: None,
    }
}

pub fn findings(prefix: &str, count: usize) -> Vec<Finding> {
    (1..=count).map(|i| finding(&format!("{} {}", prefix, i))).collect()
}

/// Sections as `(title, direct findings, subsection finding counts)`.
pub fn report(title: &str, sections: &[(&str, usize, &[usize])]) -> Report {
    Report {
        title: title.into(),
        meta: meta(),
        purpose: None,
        narrative: None,
        sections: sections
            .iter()
            .map(|(section_title, direct, subsections)| Section {
                title: section_title.to_string(),
                findings: findings(section_title, *direct),
                subsections: subsections
                    .iter()
                    .enumerate()
                    .map(|(i, count)| Subsection {
                        title: format!("{} part {}", section_title, i + 1),
                        findings: findings(&format!("{} part {}", section_title, i + 1), *count),
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn topic_image(ordinal: u32, url: &str, caption: &str) -> TopicImage {
    TopicImage {
        ordinal,
        url: url.into(),
        caption: caption.into(),
    }
}

pub fn opinion() -> TechnicalOpinion {
    TechnicalOpinion {
        title: "Facade Opinion".into(),
        meta: meta(),
        purpose: "Assess the condition of the east facade.".into(),
        narrative: "Inspection carried out on site.\nAccess by suspended platform.".into(),
        topics: vec![
            Topic {
                title: "Cracks".into(),
                description: "Diagonal cracks near the openings.".into(),
                images: vec![
                    topic_image(2, "https://cdn.example/crack-detail.jpg", "Crack detail"),
                    topic_image(1, "https://cdn.example/facade.jpg", "Facade overview"),
                ],
            },
            Topic {
                title: "Infiltration".into(),
                description: "Stains below the balconies.".into(),
                images: vec![topic_image(1, "https://cdn.example/missing.jpg", "Stains")],
            },
        ],
        conclusion: Some("Repair of the facade is recommended.".into()),
    }
}
