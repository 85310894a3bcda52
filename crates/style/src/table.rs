//! Declarative table geometry, kept apart from table content so it can be
//! checked without serializing anything.
use crate::border::TableBorders;
use crate::units::Twips;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CellAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl CellAlign {
    pub fn keyword(&self) -> &'static str {
        match self {
            CellAlign::Top => "top",
            CellAlign::Center => "center",
            CellAlign::Bottom => "bottom",
        }
    }
}

/// Word's default left/right cell padding.
pub const DEFAULT_CELL_MARGIN: Twips = 108;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGeometry {
    /// Fixed grid column widths.
    pub column_widths: Vec<Twips>,
    /// Offset from the body margin; negative values bleed outward.
    pub indent: Twips,
    pub borders: TableBorders,
    /// Left and right cell padding.
    pub cell_margin: Twips,
}

impl TableGeometry {
    pub fn new(column_widths: Vec<Twips>) -> Self {
        Self {
            column_widths,
            indent: 0,
            borders: TableBorders::default(),
            cell_margin: DEFAULT_CELL_MARGIN,
        }
    }

    /// `columns` equal columns filling `total`; the last column absorbs the remainder.
    pub fn even(total: Twips, columns: usize) -> Self {
        let columns = columns.max(1);
        let base = total / columns as Twips;
        let mut widths = vec![base; columns];
        if let Some(last) = widths.last_mut() {
            *last += total - base * columns as Twips;
        }
        Self::new(widths)
    }

    pub fn with_indent(mut self, indent: Twips) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_borders(mut self, borders: TableBorders) -> Self {
        self.borders = borders;
        self
    }

    pub fn with_cell_margin(mut self, margin: Twips) -> Self {
        self.cell_margin = margin;
        self
    }

    /// Width available to content inside a cell spanning `span` columns from `start`.
    pub fn content_width(&self, start: usize, span: usize) -> Twips {
        (self.span_width(start, span) - 2 * self.cell_margin).max(0)
    }

    pub fn total_width(&self) -> Twips {
        self.column_widths.iter().sum()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Width covered by `span` columns starting at `start`.
    pub fn span_width(&self, start: usize, span: usize) -> Twips {
        self.column_widths.iter().skip(start).take(span).sum()
    }
}
