//! Image normalization: fetch, decode, downsample, re-encode, cache.
//!
//! Finding and topic photos are re-encoded as JPEG and cached per
//! `(source reference, max width)` for the duration of one generation call.
//! Branding assets bypass the cache and keep transparency as PNG.

use crate::error::{BrandingAssetError, ImageFailure};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat as RasterFormat};
use inspecta_idf::{ImageFormat, MediaItem, SharedData};
use inspecta_style::pixels_to_emu;
use inspecta_traits::ResourceProvider;
use log::debug;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

/// A re-encoded bitmap ready to embed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub data: SharedData,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl NormalizedImage {
    pub fn to_media(&self) -> MediaItem {
        MediaItem {
            data: Arc::clone(&self.data),
            format: self.format,
            width_px: self.width,
            height_px: self.height,
        }
    }
}

/// Display extent in EMU for a bitmap shown at 96 dpi, shrunk (never
/// enlarged) to fit `max_width` and, when given, `max_height`.
pub fn fit_extent(
    width_px: u32,
    height_px: u32,
    max_width: i64,
    max_height: Option<i64>,
) -> (i64, i64) {
    let natural_w = pixels_to_emu(width_px.max(1));
    let natural_h = pixels_to_emu(height_px.max(1));
    let mut scale = (max_width as f64 / natural_w as f64).min(1.0);
    if let Some(max_h) = max_height {
        scale = scale.min(max_h as f64 / natural_h as f64);
    }
    let scale = scale.max(0.0);
    (
        (natural_w as f64 * scale).round() as i64,
        (natural_h as f64 * scale).round() as i64,
    )
}

type CacheKey = (String, u32);

#[derive(Debug)]
pub struct ImagePipeline {
    cache: HashMap<CacheKey, NormalizedImage>,
    jpeg_quality: u8,
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new(80)
    }
}

impl ImagePipeline {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            cache: HashMap::new(),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Normalizes `reference` to at most `max_width` pixels wide. A cache hit
    /// issues no fetch. Failures are returned, never cached.
    pub async fn normalize(
        &mut self,
        provider: &dyn ResourceProvider,
        reference: &str,
        max_width: u32,
    ) -> Result<NormalizedImage, ImageFailure> {
        let key = (reference.to_string(), max_width);
        if let Some(hit) = self.cache.get(&key) {
            debug!("Using cached image for {} (max {}px)", reference, max_width);
            return Ok(hit.clone());
        }

        let raw = provider
            .load(reference)
            .await
            .map_err(|error| ImageFailure::Fetch {
                reference: reference.to_string(),
                error,
            })?;
        let decoded = decode(reference, &raw)?;
        let scaled = downsample(decoded, max_width);
        let normalized = encode_jpeg(reference, &scaled, self.jpeg_quality)?;

        debug!(
            "Normalized {} to {}x{} ({} bytes)",
            reference,
            normalized.width,
            normalized.height,
            normalized.data.len()
        );
        self.cache.insert(key, normalized.clone());
        Ok(normalized)
    }
}

/// Fetches a branding asset without touching the cache.
pub async fn fetch_branding(
    provider: &dyn ResourceProvider,
    path: Option<&str>,
) -> Result<NormalizedImage, BrandingAssetError> {
    let path = path.ok_or(BrandingAssetError::NotConfigured)?;
    let raw = provider
        .load(path)
        .await
        .map_err(|e| BrandingAssetError::Unavailable {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    let decoded = decode(path, &raw)?;
    Ok(encode_png(path, &decoded)?)
}

fn decode(reference: &str, raw: &[u8]) -> Result<DynamicImage, ImageFailure> {
    image::load_from_memory(raw).map_err(|e| ImageFailure::Decode {
        reference: reference.to_string(),
        message: e.to_string(),
    })
}

/// Scales both dimensions by `max_width / width` when the image is wider.
fn downsample(img: DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if max_width == 0 || width <= max_width {
        return img;
    }
    let ratio = max_width as f64 / width as f64;
    let new_height = ((height as f64 * ratio).round() as u32).max(1);
    img.resize_exact(max_width, new_height, FilterType::Triangle)
}

fn encode_jpeg(
    reference: &str,
    img: &DynamicImage,
    quality: u8,
) -> Result<NormalizedImage, ImageFailure> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| ImageFailure::Encode {
            reference: reference.to_string(),
            message: e.to_string(),
        })?;
    Ok(NormalizedImage {
        data: Arc::new(buffer),
        format: ImageFormat::Jpeg,
        width: rgb.width(),
        height: rgb.height(),
    })
}

fn encode_png(reference: &str, img: &DynamicImage) -> Result<NormalizedImage, ImageFailure> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, RasterFormat::Png)
        .map_err(|e| ImageFailure::Encode {
            reference: reference.to_string(),
            message: e.to_string(),
        })?;
    Ok(NormalizedImage {
        data: Arc::new(cursor.into_inner()),
        format: ImageFormat::Png,
        width: img.width(),
        height: img.height(),
    })
}
