// Reuse the configuration structs defined in the core crate so the builder and
// the assembler read the same types.
pub use inspecta_core::{ComposerConfig, ImageConfig, Labels, LetterheadConfig, PageConfig};

use crate::error::PipelineError;
use inspecta_core::style::to_native_unit;

/// Rejects values that would produce a broken package rather than a
/// degraded one.
pub(crate) fn validate(config: &ComposerConfig) -> Result<(), PipelineError> {
    let images = &config.images;
    if images.finding_max_width == 0 || images.topic_max_width == 0 {
        return Err(PipelineError::Config(
            "image max widths must be greater than zero".to_string(),
        ));
    }
    if !(1..=100).contains(&images.jpeg_quality) {
        return Err(PipelineError::Config(format!(
            "jpegQuality must be within 1..=100, got {}",
            images.jpeg_quality
        )));
    }

    let margins = &config.page.margins;
    if [margins.top, margins.right, margins.bottom, margins.left]
        .iter()
        .any(|m| !m.is_finite() || *m < 0.0)
    {
        return Err(PipelineError::Config(
            "page margins must be non-negative".to_string(),
        ));
    }
    let body_width = config.page.geometry().body_width();
    if body_width <= 0 {
        return Err(PipelineError::Config(format!(
            "page margins leave no body width ({} twips)",
            body_width
        )));
    }

    let header = &config.letterhead;
    if !header.header_margin.is_finite()
        || header.header_margin < 0.0
        || header.header_margin > margins.left.min(margins.right)
    {
        return Err(PipelineError::Config(format!(
            "letterhead headerMargin {}cm must lie between 0 and the side margins",
            header.header_margin
        )));
    }
    for (name, value) in [
        ("logoWidth", header.logo_width),
        ("infoWidth", header.info_width),
        ("bannerHeight", header.banner_height),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(PipelineError::Config(format!(
                "letterhead {} must be a positive length, got {}cm",
                name, value
            )));
        }
    }

    let header_width = config.page.geometry().width - 2 * to_native_unit(header.header_margin);
    let fixed_columns = to_native_unit(header.logo_width) + to_native_unit(header.info_width);
    if fixed_columns >= header_width {
        return Err(PipelineError::Config(format!(
            "letterhead logoWidth + infoWidth ({}cm) leave no room for the title column",
            header.logo_width + header.info_width
        )));
    }
    Ok(())
}
