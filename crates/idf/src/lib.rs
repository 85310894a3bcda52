//! Intermediate Document Format (IDF)
//!
//! This crate defines the in-memory representation of an assembled report:
//! ordered block nodes, inline content, fixed-geometry tables and the media
//! they reference. The assembler produces it; a renderer serializes it.

use inspecta_style::{CellAlign, PageGeometry, TableGeometry};
use inspecta_types::Color;
use std::sync::Arc;

mod media;

pub use media::{ImageFormat, MediaId, MediaItem, MediaStore};

// --- Shared Types ---

pub type TextStr = String;

/// A reference-counted container for shared, immutable data like images.
pub type SharedData = Arc<Vec<u8>>;

/// Metadata common to block-level nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMetadata {
    /// Bookmark name other nodes can link to.
    pub bookmark: Option<TextStr>,
}

/// Named paragraph styles. The renderer declares every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    Title,
    Subtitle,
    TocHeading,
    TocEntry(u8),
    Caption,
    Placeholder,
    CellLabel,
    Small,
}

impl ParagraphStyle {
    pub fn style_id(&self) -> &'static str {
        match self {
            ParagraphStyle::Normal => "Normal",
            ParagraphStyle::Title => "Title",
            ParagraphStyle::Subtitle => "Subtitle",
            ParagraphStyle::TocHeading => "TOCHeading",
            ParagraphStyle::TocEntry(1) => "TOC1",
            ParagraphStyle::TocEntry(_) => "TOC2",
            ParagraphStyle::Caption => "Caption",
            ParagraphStyle::Placeholder => "Placeholder",
            ParagraphStyle::CellLabel => "CellLabel",
            ParagraphStyle::Small => "Small",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Center,
    Justify,
}

impl Align {
    pub fn keyword(&self) -> &'static str {
        match self {
            Align::Center => "center",
            Align::Justify => "both",
        }
    }
}

// --- Main Node Enums ---

/// A block-level element in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum IRNode {
    Paragraph {
        meta: NodeMetadata,
        style: ParagraphStyle,
        align: Option<Align>,
        children: Vec<InlineNode>,
    },
    Heading {
        meta: NodeMetadata,
        level: u8,
        children: Vec<InlineNode>,
    },
    Table(Box<TableNode>),
    /// A hard page break.
    PageBreak,
}

impl IRNode {
    pub fn paragraph(text: impl Into<TextStr>) -> Self {
        IRNode::Paragraph {
            meta: NodeMetadata::default(),
            style: ParagraphStyle::Normal,
            align: None,
            children: vec![InlineNode::Text(text.into())],
        }
    }

    pub fn styled(style: ParagraphStyle, children: Vec<InlineNode>) -> Self {
        IRNode::Paragraph {
            meta: NodeMetadata::default(),
            style,
            align: None,
            children,
        }
    }

    pub fn empty_paragraph() -> Self {
        IRNode::styled(ParagraphStyle::Normal, Vec::new())
    }

    pub fn heading(level: u8, text: impl Into<TextStr>, bookmark: Option<TextStr>) -> Self {
        IRNode::Heading {
            meta: NodeMetadata { bookmark },
            level,
            children: vec![InlineNode::Text(text.into())],
        }
    }

    pub fn aligned(mut self, to: Align) -> Self {
        if let IRNode::Paragraph { align, .. } = &mut self {
            *align = Some(to);
        }
        self
    }

    pub fn meta(&self) -> Option<&NodeMetadata> {
        match self {
            IRNode::Paragraph { meta, .. } | IRNode::Heading { meta, .. } => Some(meta),
            IRNode::Table(_) | IRNode::PageBreak => None,
        }
    }

    /// Returns a string identifier for the node type.
    pub fn kind(&self) -> &'static str {
        match self {
            IRNode::Paragraph { .. } => "paragraph",
            IRNode::Heading { .. } => "heading",
            IRNode::Table(_) => "table",
            IRNode::PageBreak => "page-break",
        }
    }

    /// Concatenated text of this node and everything nested in it.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            IRNode::Paragraph { children, .. } | IRNode::Heading { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            IRNode::Table(table) => {
                for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
                    for node in &cell.children {
                        node.collect_text(out);
                        out.push('\n');
                    }
                }
            }
            IRNode::PageBreak => {}
        }
    }
}

/// Fields the viewer resolves when the document is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Page,
    NumPages,
}

impl FieldKind {
    pub fn instruction(&self) -> &'static str {
        match self {
            FieldKind::Page => "PAGE",
            FieldKind::NumPages => "NUMPAGES",
        }
    }
}

/// Run-level formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub bold: bool,
    /// Font size in half-points.
    pub size: Option<u32>,
}

impl RunStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == RunStyle::default()
    }
}

/// An inline element within a paragraph or heading.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text(TextStr),
    Styled { style: RunStyle, text: TextStr },
    /// Internal link to a bookmark.
    Hyperlink {
        anchor: TextStr,
        children: Vec<InlineNode>,
    },
    /// An inline picture, sized in English Metric Units.
    Image {
        media: MediaId,
        width_emu: i64,
        height_emu: i64,
        description: TextStr,
    },
    Field(FieldKind),
    LineBreak,
}

impl InlineNode {
    pub fn bold(text: impl Into<TextStr>) -> Self {
        InlineNode::Styled {
            style: RunStyle::bold(),
            text: text.into(),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            InlineNode::Text(t) | InlineNode::Styled { text: t, .. } => out.push_str(t),
            InlineNode::Hyperlink { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            InlineNode::LineBreak => out.push('\n'),
            InlineNode::Image { .. } | InlineNode::Field(_) => {}
        }
    }
}

// --- Table-specific Structures ---

#[derive(Debug, Clone, PartialEq)]
pub struct TableNode {
    pub geometry: TableGeometry,
    pub rows: Vec<TableRow>,
}

impl TableNode {
    pub fn new(geometry: TableGeometry) -> Self {
        Self {
            geometry,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn into_node(self) -> IRNode {
        IRNode::Table(Box::new(self))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Keep the row on one page.
    pub cant_split: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            ..Default::default()
        }
    }

    pub fn unsplittable(mut self) -> Self {
        self.cant_split = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub children: Vec<IRNode>,
    pub col_span: usize,
    pub shading: Option<Color>,
    pub align: CellAlign,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            col_span: 1,
            shading: None,
            align: CellAlign::Top,
        }
    }
}

impl TableCell {
    pub fn new(children: Vec<IRNode>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    /// A cell with no content; the renderer still emits the mandatory paragraph.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn span(mut self, columns: usize) -> Self {
        self.col_span = columns.max(1);
        self
    }

    pub fn shaded(mut self, color: Color) -> Self {
        self.shading = Some(color);
        self
    }

    pub fn valign(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }
}

// --- Document ---

/// An entry in the table of contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocEntry {
    /// 1 for sections, 2 for subsections.
    pub level: u8,
    pub text: TextStr,
    /// The bookmark on the matching heading.
    pub target_id: TextStr,
}

/// Package-level properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: TextStr,
    pub subject: TextStr,
    pub creator: TextStr,
    /// RFC 3339 creation timestamp.
    pub created: TextStr,
}

/// A fully assembled document, ready for serialization.
#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    pub info: DocumentInfo,
    pub page: PageGeometry,
    /// Repeating header content.
    pub header: Vec<IRNode>,
    /// Repeating footer content.
    pub footer: Vec<IRNode>,
    /// Cover, table of contents and body, in reading order.
    pub body: Vec<IRNode>,
    pub media: MediaStore,
}

impl DocumentTree {
    pub fn page_break_count(&self) -> usize {
        self.body
            .iter()
            .filter(|n| matches!(n, IRNode::PageBreak))
            .count()
    }
}
