//! Repeating header and footer.
//!
//! [`LetterheadGeometry`] is pure geometry derived from the page and the
//! letterhead configuration; [`build_header`] and [`build_footer`] fill it with
//! document-specific content.

use crate::config::{Labels, LetterheadConfig};
use crate::images::{fit_extent, NormalizedImage};
use inspecta_idf::{
    Align, FieldKind, IRNode, InlineNode, MediaId, ParagraphStyle, RunStyle, TableCell,
    TableNode, TableRow,
};
use inspecta_style::{
    cm_to_emu, negative_indent, to_native_unit, twips_to_emu, Border, CellAlign, PageGeometry,
    TableBorders, TableGeometry,
};
use inspecta_types::Color;

/// Frame colour of the header table.
const FRAME: Color = Color::rgb(0x80, 0x80, 0x80);
const HEADER_TITLE_SIZE: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct LetterheadGeometry {
    /// Logo, title and metadata columns.
    pub header: TableGeometry,
    /// Mini-table nested in the metadata column.
    pub info: TableGeometry,
    /// Full page width banner, flush with both page edges.
    pub footer: TableGeometry,
    pub logo_max_width: i64,
    pub logo_max_height: i64,
    pub banner_width: i64,
    pub banner_fallback_height: i64,
}

impl LetterheadGeometry {
    pub fn new(page: &PageGeometry, config: &LetterheadConfig) -> Self {
        let visible_margin = to_native_unit(config.header_margin);
        let header_width = page.width - 2 * visible_margin;
        let logo = to_native_unit(config.logo_width);
        let info = to_native_unit(config.info_width);
        let title = (header_width - logo - info).max(0);

        let header = TableGeometry::new(vec![logo, title, info])
            .with_indent(negative_indent(page.margin_left, visible_margin))
            .with_borders(TableBorders::all(Border::single(4, FRAME)));

        let info_width = header.content_width(2, 1);
        let mut info_borders = TableBorders::none();
        info_borders.inside_h = Border::single(2, FRAME);
        let info = TableGeometry::new(vec![info_width])
            .with_borders(info_borders)
            .with_cell_margin(0);

        let footer = TableGeometry::new(vec![page.width])
            .with_indent(negative_indent(page.margin_left, 0))
            .with_borders(TableBorders::none())
            .with_cell_margin(0);

        Self {
            logo_max_width: twips_to_emu(header.content_width(0, 1)),
            logo_max_height: cm_to_emu(1.5),
            banner_width: twips_to_emu(page.width),
            banner_fallback_height: cm_to_emu(config.banner_height),
            header,
            info,
            footer,
        }
    }
}

/// Document-specific letterhead text.
#[derive(Debug, Clone, Copy)]
pub struct LetterheadContent<'a> {
    pub title: &'a str,
    pub condominium: &'a str,
    pub date: &'a str,
    pub revision: &'a str,
}

/// An embedded branding image.
pub type Placed<'a> = (MediaId, &'a NormalizedImage);

pub fn build_header(
    geometry: &LetterheadGeometry,
    content: &LetterheadContent<'_>,
    labels: &Labels,
    logo: Option<Placed<'_>>,
) -> Vec<IRNode> {
    let logo_cell = match logo {
        Some((media, image)) => {
            let (width_emu, height_emu) = fit_extent(
                image.width,
                image.height,
                geometry.logo_max_width,
                Some(geometry.logo_max_height),
            );
            let picture = InlineNode::Image {
                media,
                width_emu,
                height_emu,
                description: "logo".into(),
            };
            TableCell::new(vec![
                IRNode::styled(ParagraphStyle::Small, vec![picture]).aligned(Align::Center),
            ])
        }
        None => TableCell::empty(),
    };

    let title_cell = TableCell::new(vec![IRNode::styled(
        ParagraphStyle::Normal,
        vec![InlineNode::Styled {
            style: RunStyle {
                bold: true,
                size: Some(HEADER_TITLE_SIZE),
                ..Default::default()
            },
            text: content.title.to_string(),
        }],
    )
    .aligned(Align::Center)]);

    let info_cell = TableCell::new(vec![info_table(geometry, content, labels)]);

    let header = TableNode::new(geometry.header.clone())
        .row(
            TableRow::new(vec![
                logo_cell.valign(CellAlign::Center),
                title_cell.valign(CellAlign::Center),
                info_cell.valign(CellAlign::Center),
            ])
            .unsplittable(),
        )
        .into_node();

    vec![header, IRNode::styled(ParagraphStyle::Small, Vec::new())]
}

fn info_table(
    geometry: &LetterheadGeometry,
    content: &LetterheadContent<'_>,
    labels: &Labels,
) -> IRNode {
    let line = |children: Vec<InlineNode>| {
        TableRow::new(vec![TableCell::new(vec![IRNode::styled(
            ParagraphStyle::Small,
            children,
        )])])
    };

    TableNode::new(geometry.info.clone())
        .row(line(vec![InlineNode::bold(content.condominium)]))
        .row(line(vec![
            InlineNode::Text(format!("{} ", labels.page)),
            InlineNode::Field(FieldKind::Page),
            InlineNode::Text(format!(" {} ", labels.page_of)),
            InlineNode::Field(FieldKind::NumPages),
        ]))
        .row(line(vec![InlineNode::Text(format!(
            "{}: {}",
            labels.date, content.date
        ))]))
        .row(line(vec![InlineNode::Text(content.revision.to_string())]))
        .into_node()
}

/// The banner stretched across the full page width, or an empty footer.
pub fn build_footer(geometry: &LetterheadGeometry, banner: Option<Placed<'_>>) -> Vec<IRNode> {
    let Some((media, image)) = banner else {
        return vec![IRNode::styled(ParagraphStyle::Small, Vec::new())];
    };

    let height = if image.width > 0 {
        (geometry.banner_width as f64 * image.height as f64 / image.width as f64).round() as i64
    } else {
        geometry.banner_fallback_height
    };
    let picture = InlineNode::Image {
        media,
        width_emu: geometry.banner_width,
        height_emu: height,
        description: "banner".into(),
    };
    let band = TableNode::new(geometry.footer.clone())
        .row(TableRow::new(vec![TableCell::new(vec![IRNode::styled(
            ParagraphStyle::Small,
            vec![picture],
        )])]))
        .into_node();

    vec![band, IRNode::styled(ParagraphStyle::Small, Vec::new())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use inspecta_idf::ImageFormat;
    use inspecta_style::PAGE_WIDTH;
    use std::sync::Arc;

    fn geometry() -> LetterheadGeometry {
        LetterheadGeometry::new(&PageConfig::default().geometry(), &LetterheadConfig::default())
    }

    #[test]
    fn header_bleeds_to_the_visible_margin() {
        let g = geometry();
        // 2 cm body margin, 1 cm visible margin.
        assert_eq!(g.header.indent, -567);
        assert_eq!(g.header.total_width(), PAGE_WIDTH - 2 * 567);
        assert_eq!(g.header.column_widths[0], 2268);
        assert_eq!(g.header.column_widths[2], 3119);
    }

    #[test]
    fn footer_spans_the_whole_page() {
        let g = geometry();
        assert_eq!(g.footer.indent, -1134);
        assert_eq!(g.footer.total_width(), PAGE_WIDTH);
        assert_eq!(g.footer.cell_margin, 0);
        assert_eq!(g.banner_width, twips_to_emu(PAGE_WIDTH));
    }

    #[test]
    fn info_table_fits_inside_its_column() {
        let g = geometry();
        assert_eq!(g.info.total_width(), 3119 - 216);
    }

    #[test]
    fn header_carries_text_and_page_fields() {
        let content = LetterheadContent {
            title: "Pendency Report",
            condominium: "Residencial Aurora",
            date: "05/03/2024",
            revision: "Rev. 01",
        };
        let nodes = build_header(&geometry(), &content, &Labels::default(), None);
        let text = nodes[0].plain_text();
        assert!(text.contains("Pendency Report"));
        assert!(text.contains("Residencial Aurora"));
        assert!(text.contains("Date: 05/03/2024"));
        assert!(text.contains("Rev. 01"));
        assert!(text.contains("Page  of "));
    }

    #[test]
    fn footer_without_banner_is_empty() {
        let nodes = build_footer(&geometry(), None);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].plain_text(), "");

        let banner = NormalizedImage {
            data: Arc::new(vec![0]),
            format: ImageFormat::Png,
            width: 1000,
            height: 100,
        };
        let nodes = build_footer(&geometry(), Some((MediaId(0), &banner)));
        assert_eq!(nodes[0].kind(), "table");
    }
}
