//! Physical measurement and fixed geometry.
//!
//! All layout math is done in the document's native unit (twentieths of a
//! point, "twips") using integers, so repeated conversions never drift.

pub mod border;
pub mod page;
pub mod table;
pub mod units;

pub use border::{Border, BorderStyle, TableBorders};
pub use page::{Margins, PageGeometry};
pub use table::{CellAlign, TableGeometry, DEFAULT_CELL_MARGIN};
pub use units::{
    cm_to_emu, negative_indent, pixels_to_emu, to_native_unit, twips_to_emu, Twips, A4_HEIGHT,
    EMU_PER_CM, PAGE_WIDTH, TWIPS_PER_CM,
};
