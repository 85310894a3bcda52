//! Unit conversion between centimetres and the document's native units.

/// A length in twentieths of a point.
pub type Twips = i32;

/// 1 cm expressed in twips (1440 twips per inch / 2.54).
pub const TWIPS_PER_CM: f64 = 567.0;

/// Width of an ISO A4 page in twips.
pub const PAGE_WIDTH: Twips = 11906;

/// Height of an ISO A4 page in twips.
pub const A4_HEIGHT: Twips = 16838;

/// English Metric Units per centimetre, used by drawing extents.
pub const EMU_PER_CM: i64 = 360_000;

/// Drawing extents assume 96 pixels per inch: 914400 / 96.
const EMU_PER_PIXEL: i64 = 9_525;

/// Converts centimetres to twips, rounding to the nearest unit.
pub fn to_native_unit(cm: f64) -> Twips {
    (cm * TWIPS_PER_CM).round() as Twips
}

/// Indent that lets a table render with `desired_margin` even though the
/// body margin is `body_margin`. Negative whenever the table must bleed
/// outward past the body margin.
pub fn negative_indent(body_margin: Twips, desired_margin: Twips) -> Twips {
    -(body_margin - desired_margin)
}

pub fn cm_to_emu(cm: f64) -> i64 {
    (cm * EMU_PER_CM as f64).round() as i64
}

pub fn pixels_to_emu(px: u32) -> i64 {
    px as i64 * EMU_PER_PIXEL
}

/// 1 twip = 635 EMU.
pub fn twips_to_emu(twips: Twips) -> i64 {
    twips as i64 * 635
}
