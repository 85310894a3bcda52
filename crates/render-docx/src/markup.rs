//! Serialization of block and inline nodes into WordprocessingML.
use crate::helpers::{story_namespaces, Relationships, REL_IMAGE};
use crate::writer::XmlWriter;
use inspecta_idf::{
    FieldKind, IRNode, InlineNode, MediaId, MediaStore, NodeMetadata, ParagraphStyle, RunStyle,
    TableCell, TableNode, TableRow,
};
use inspecta_render_core::RenderError;
use inspecta_style::{PageGeometry, TableGeometry, DEFAULT_CELL_MARGIN};
use std::collections::HashMap;

/// Identifiers that must stay unique across every part of the package.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    drawing: u32,
    bookmark: u32,
}

impl IdAllocator {
    fn next_drawing(&mut self) -> u32 {
        self.drawing += 1;
        self.drawing
    }

    fn next_bookmark(&mut self) -> u32 {
        self.bookmark += 1;
        self.bookmark
    }
}

/// Writes one story part (document body, header or footer).
pub(crate) struct StoryWriter<'a> {
    xml: XmlWriter,
    root: &'static str,
    media: &'a MediaStore,
    rels: Relationships,
    image_rels: HashMap<MediaId, String>,
    ids: &'a mut IdAllocator,
}

impl<'a> StoryWriter<'a> {
    /// Opens `root` (`w:document`, `w:hdr` or `w:ftr`). Relationships already
    /// reserved in `rels` keep their ids; images are appended after them.
    pub fn open(
        root: &'static str,
        media: &'a MediaStore,
        rels: Relationships,
        ids: &'a mut IdAllocator,
    ) -> Result<Self, RenderError> {
        let mut xml = XmlWriter::new()?;
        xml.start(root, &story_namespaces())?;
        if root == "w:document" {
            xml.start("w:body", &[])?;
        }
        Ok(Self {
            xml,
            root,
            media,
            rels,
            image_rels: HashMap::new(),
            ids,
        })
    }

    pub fn blocks(&mut self, nodes: &[IRNode]) -> Result<(), RenderError> {
        for node in nodes {
            self.block(node)?;
        }
        Ok(())
    }

    /// Final section properties of the main document.
    pub fn section(
        &mut self,
        page: &PageGeometry,
        header_rel: &str,
        footer_rel: &str,
    ) -> Result<(), RenderError> {
        let xml = &mut self.xml;
        xml.start("w:sectPr", &[])?;
        xml.empty(
            "w:headerReference",
            &[("w:type", "default"), ("r:id", header_rel)],
        )?;
        xml.empty(
            "w:footerReference",
            &[("w:type", "default"), ("r:id", footer_rel)],
        )?;
        xml.empty(
            "w:pgSz",
            &[("w:w", &page.width.to_string()), ("w:h", &page.height.to_string())],
        )?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", &page.margin_top.to_string()),
                ("w:right", &page.margin_right.to_string()),
                ("w:bottom", &page.margin_bottom.to_string()),
                ("w:left", &page.margin_left.to_string()),
                ("w:header", &page.header_distance.to_string()),
                ("w:footer", &page.footer_distance.to_string()),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")
    }

    /// Closes the root and returns the part bytes with its relationships.
    pub fn finish(mut self) -> Result<(Vec<u8>, Relationships), RenderError> {
        if self.root == "w:document" {
            self.xml.end("w:body")?;
        }
        self.xml.end(self.root)?;
        Ok((self.xml.into_bytes(), self.rels))
    }

    fn block(&mut self, node: &IRNode) -> Result<(), RenderError> {
        match node {
            IRNode::Paragraph {
                meta,
                style,
                align,
                children,
            } => {
                let align = align.map(|a| a.keyword());
                let style_id = (*style != ParagraphStyle::Normal).then(|| style.style_id());
                self.paragraph(meta, style_id, align, children)
            }
            IRNode::Heading {
                meta,
                level,
                children,
            } => {
                let style_id = if *level <= 1 { "Heading1" } else { "Heading2" };
                self.paragraph(meta, Some(style_id), None, children)
            }
            IRNode::Table(table) => self.table(table),
            IRNode::PageBreak => {
                self.xml.start("w:p", &[])?;
                self.xml.start("w:r", &[])?;
                self.xml.empty("w:br", &[("w:type", "page")])?;
                self.xml.end("w:r")?;
                self.xml.end("w:p")
            }
        }
    }

    fn paragraph(
        &mut self,
        meta: &NodeMetadata,
        style_id: Option<&str>,
        align: Option<&str>,
        children: &[InlineNode],
    ) -> Result<(), RenderError> {
        self.xml.start("w:p", &[])?;
        if style_id.is_some() || align.is_some() {
            self.xml.start("w:pPr", &[])?;
            if let Some(id) = style_id {
                self.xml.empty("w:pStyle", &[("w:val", id)])?;
            }
            if let Some(jc) = align {
                self.xml.empty("w:jc", &[("w:val", jc)])?;
            }
            self.xml.end("w:pPr")?;
        }

        let bookmark = match &meta.bookmark {
            Some(name) => {
                let id = self.ids.next_bookmark().to_string();
                self.xml
                    .empty("w:bookmarkStart", &[("w:id", &id), ("w:name", name)])?;
                Some(id)
            }
            None => None,
        };

        self.inlines(children)?;

        if let Some(id) = bookmark {
            self.xml.empty("w:bookmarkEnd", &[("w:id", &id)])?;
        }
        self.xml.end("w:p")
    }

    fn inlines(&mut self, children: &[InlineNode]) -> Result<(), RenderError> {
        for child in children {
            self.inline(child)?;
        }
        Ok(())
    }

    fn inline(&mut self, node: &InlineNode) -> Result<(), RenderError> {
        match node {
            InlineNode::Text(text) => self.run(&RunStyle::default(), text),
            InlineNode::Styled { style, text } => self.run(style, text),
            InlineNode::Hyperlink { anchor, children } => {
                self.xml
                    .start("w:hyperlink", &[("w:anchor", anchor), ("w:history", "1")])?;
                self.inlines(children)?;
                self.xml.end("w:hyperlink")
            }
            InlineNode::Image {
                media,
                width_emu,
                height_emu,
                description,
            } => self.drawing(*media, *width_emu, *height_emu, description),
            InlineNode::Field(kind) => self.field(*kind),
            InlineNode::LineBreak => {
                self.xml.start("w:r", &[])?;
                self.xml.empty("w:br", &[])?;
                self.xml.end("w:r")
            }
        }
    }

    fn run(&mut self, style: &RunStyle, text: &str) -> Result<(), RenderError> {
        self.xml.start("w:r", &[])?;
        if !style.is_plain() {
            self.xml.start("w:rPr", &[])?;
            if style.bold {
                self.xml.empty("w:b", &[])?;
            }
            if let Some(size) = style.size {
                let size = size.to_string();
                self.xml.empty("w:sz", &[("w:val", &size)])?;
                self.xml.empty("w:szCs", &[("w:val", &size)])?;
            }
            self.xml.end("w:rPr")?;
        }
        self.xml
            .text_element("w:t", &[("xml:space", "preserve")], text)?;
        self.xml.end("w:r")
    }

    fn field(&mut self, kind: FieldKind) -> Result<(), RenderError> {
        let instr = format!(" {} ", kind.instruction());
        self.xml.start("w:fldSimple", &[("w:instr", &instr)])?;
        self.xml.start("w:r", &[])?;
        self.xml.text_element("w:t", &[], "1")?;
        self.xml.end("w:r")?;
        self.xml.end("w:fldSimple")
    }

    fn image_rel(&mut self, media: MediaId) -> Result<String, RenderError> {
        if let Some(id) = self.image_rels.get(&media) {
            return Ok(id.clone());
        }
        let item = self
            .media
            .get(media)
            .ok_or(RenderError::MissingMedia(media.0))?;
        let id = self
            .rels
            .add(REL_IMAGE, MediaStore::part_name(media, item.format));
        self.image_rels.insert(media, id.clone());
        Ok(id)
    }

    fn drawing(
        &mut self,
        media: MediaId,
        cx: i64,
        cy: i64,
        description: &str,
    ) -> Result<(), RenderError> {
        let rel = self.image_rel(media)?;
        let doc_pr = self.ids.next_drawing().to_string();
        let name = format!("Picture {}", doc_pr);
        let (cx, cy) = (cx.to_string(), cy.to_string());

        let xml = &mut self.xml;
        xml.start("w:r", &[])?;
        xml.start("w:drawing", &[])?;
        xml.start(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        xml.empty("wp:extent", &[("cx", &cx), ("cy", &cy)])?;
        xml.empty(
            "wp:docPr",
            &[("id", &doc_pr), ("name", &name), ("descr", description)],
        )?;
        xml.start("wp:cNvGraphicFramePr", &[])?;
        xml.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
        xml.end("wp:cNvGraphicFramePr")?;
        xml.start("a:graphic", &[])?;
        xml.start(
            "a:graphicData",
            &[("uri", "http://schemas.openxmlformats.org/drawingml/2006/picture")],
        )?;
        xml.start("pic:pic", &[])?;
        xml.start("pic:nvPicPr", &[])?;
        xml.empty("pic:cNvPr", &[("id", "0"), ("name", &name)])?;
        xml.empty("pic:cNvPicPr", &[])?;
        xml.end("pic:nvPicPr")?;
        xml.start("pic:blipFill", &[])?;
        xml.empty("a:blip", &[("r:embed", &rel)])?;
        xml.start("a:stretch", &[])?;
        xml.empty("a:fillRect", &[])?;
        xml.end("a:stretch")?;
        xml.end("pic:blipFill")?;
        xml.start("pic:spPr", &[])?;
        xml.start("a:xfrm", &[])?;
        xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
        xml.empty("a:ext", &[("cx", &cx), ("cy", &cy)])?;
        xml.end("a:xfrm")?;
        xml.start("a:prstGeom", &[("prst", "rect")])?;
        xml.empty("a:avLst", &[])?;
        xml.end("a:prstGeom")?;
        xml.end("pic:spPr")?;
        xml.end("pic:pic")?;
        xml.end("a:graphicData")?;
        xml.end("a:graphic")?;
        xml.end("wp:inline")?;
        xml.end("w:drawing")?;
        xml.end("w:r")
    }

    fn table(&mut self, table: &TableNode) -> Result<(), RenderError> {
        let geometry = &table.geometry;
        self.xml.start("w:tbl", &[])?;
        self.table_properties(geometry)?;

        self.xml.start("w:tblGrid", &[])?;
        for width in &geometry.column_widths {
            self.xml.empty("w:gridCol", &[("w:w", &width.to_string())])?;
        }
        self.xml.end("w:tblGrid")?;

        for row in &table.rows {
            self.row(geometry, row)?;
        }
        self.xml.end("w:tbl")
    }

    fn table_properties(&mut self, geometry: &TableGeometry) -> Result<(), RenderError> {
        let xml = &mut self.xml;
        xml.start("w:tblPr", &[])?;
        xml.empty(
            "w:tblW",
            &[("w:w", &geometry.total_width().to_string()), ("w:type", "dxa")],
        )?;
        xml.empty(
            "w:tblInd",
            &[("w:w", &geometry.indent.to_string()), ("w:type", "dxa")],
        )?;
        xml.start("w:tblBorders", &[])?;
        for (edge, border) in geometry.borders.edges() {
            let name = format!("w:{}", edge);
            if border.size == 0 || border.style.keyword() == "nil" {
                xml.empty(&name, &[("w:val", "nil")])?;
            } else {
                xml.empty(
                    &name,
                    &[
                        ("w:val", border.style.keyword()),
                        ("w:sz", &border.size.to_string()),
                        ("w:space", "0"),
                        ("w:color", &border.color.to_hex()),
                    ],
                )?;
            }
        }
        xml.end("w:tblBorders")?;
        xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
        if geometry.cell_margin != DEFAULT_CELL_MARGIN {
            let margin = geometry.cell_margin.to_string();
            xml.start("w:tblCellMar", &[])?;
            xml.empty("w:left", &[("w:w", &margin), ("w:type", "dxa")])?;
            xml.empty("w:right", &[("w:w", &margin), ("w:type", "dxa")])?;
            xml.end("w:tblCellMar")?;
        }
        xml.end("w:tblPr")
    }

    fn row(&mut self, geometry: &TableGeometry, row: &TableRow) -> Result<(), RenderError> {
        self.xml.start("w:tr", &[])?;
        if row.cant_split {
            self.xml.start("w:trPr", &[])?;
            self.xml.empty("w:cantSplit", &[])?;
            self.xml.end("w:trPr")?;
        }

        let mut column = 0;
        for cell in &row.cells {
            self.cell(geometry, column, cell)?;
            column += cell.col_span;
        }
        self.xml.end("w:tr")
    }

    fn cell(
        &mut self,
        geometry: &TableGeometry,
        column: usize,
        cell: &TableCell,
    ) -> Result<(), RenderError> {
        self.xml.start("w:tc", &[])?;
        self.xml.start("w:tcPr", &[])?;
        let width = geometry.span_width(column, cell.col_span);
        self.xml
            .empty("w:tcW", &[("w:w", &width.to_string()), ("w:type", "dxa")])?;
        if cell.col_span > 1 {
            self.xml
                .empty("w:gridSpan", &[("w:val", &cell.col_span.to_string())])?;
        }
        if let Some(fill) = cell.shading {
            self.xml.empty(
                "w:shd",
                &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", &fill.to_hex())],
            )?;
        }
        self.xml
            .empty("w:vAlign", &[("w:val", cell.align.keyword())])?;
        self.xml.end("w:tcPr")?;

        self.blocks(&cell.children)?;
        // A cell must end with a paragraph.
        if !matches!(
            cell.children.last(),
            Some(IRNode::Paragraph { .. } | IRNode::Heading { .. } | IRNode::PageBreak)
        ) {
            self.xml.empty("w:p", &[])?;
        }
        self.xml.end("w:tc")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspecta_idf::{ImageFormat, MediaItem, TableCell, TableRow};
    use inspecta_style::{negative_indent, TableGeometry};
    use inspecta_types::Color;
    use std::sync::Arc;

    fn render_body(nodes: &[IRNode], media: &MediaStore) -> (String, Relationships) {
        let mut ids = IdAllocator::default();
        let mut story =
            StoryWriter::open("w:document", media, Relationships::default(), &mut ids).unwrap();
        story.blocks(nodes).unwrap();
        let (bytes, rels) = story.finish().unwrap();
        (String::from_utf8(bytes).unwrap(), rels)
    }

    #[test]
    fn heading_carries_bookmark_and_outline_style() {
        let (xml, _) = render_body(
            &[IRNode::heading(1, "I – Facade", Some("section-1".into()))],
            &MediaStore::new(),
        );
        assert!(xml.contains("<w:pStyle w:val=\"Heading1\"/>"));
        assert!(xml.contains("w:name=\"section-1\""));
        assert!(xml.contains("<w:bookmarkEnd w:id=\"1\"/>"));
        assert!(xml.contains("I – Facade"));
    }

    #[test]
    fn page_break_is_a_standalone_paragraph() {
        let (xml, _) = render_body(&[IRNode::PageBreak], &MediaStore::new());
        assert!(xml.contains("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>"));
    }

    #[test]
    fn empty_cell_still_gets_a_paragraph() {
        let table = TableNode::new(TableGeometry::even(4000, 2))
            .row(TableRow::new(vec![TableCell::empty().span(2)]).unsplittable())
            .into_node();
        let (xml, _) = render_body(&[table], &MediaStore::new());
        assert!(xml.contains("<w:gridSpan w:val=\"2\"/>"));
        assert!(xml.contains("<w:tcW w:w=\"4000\" w:type=\"dxa\"/>"));
        assert!(xml.contains("<w:cantSplit/>"));
        assert!(xml.contains("</w:tcPr><w:p/></w:tc>"));
    }

    #[test]
    fn negative_indent_and_shading_are_written() {
        let geometry = TableGeometry::new(vec![11906])
            .with_indent(negative_indent(1134, 0))
            .with_cell_margin(0);
        let table = TableNode::new(geometry)
            .row(TableRow::new(vec![TableCell::new(vec![IRNode::paragraph("band")])
                .shaded(Color::rgb(0x1F, 0x38, 0x64))]))
            .into_node();
        let (xml, _) = render_body(&[table], &MediaStore::new());
        assert!(xml.contains("<w:tblInd w:w=\"-1134\" w:type=\"dxa\"/>"));
        assert!(xml.contains("w:fill=\"1F3864\""));
        assert!(xml.contains("<w:tblLayout w:type=\"fixed\"/>"));
        assert!(xml.contains("<w:left w:w=\"0\" w:type=\"dxa\"/>"));
    }

    #[test]
    fn repeated_image_shares_one_relationship() {
        let mut media = MediaStore::new();
        let id = media.add(MediaItem {
            data: Arc::new(vec![0xFF, 0xD8]),
            format: ImageFormat::Jpeg,
            width_px: 10,
            height_px: 5,
        });
        let image = InlineNode::Image {
            media: id,
            width_emu: 95250,
            height_emu: 47625,
            description: "photo".into(),
        };
        let para = IRNode::styled(ParagraphStyle::Normal, vec![image.clone(), image]);
        let (xml, rels) = render_body(&[para], &media);

        let rels_xml = String::from_utf8(rels.to_xml().unwrap()).unwrap();
        assert_eq!(rels_xml.matches("media/image1.jpeg").count(), 1);
        assert_eq!(xml.matches("r:embed=\"rId1\"").count(), 2);
        assert!(xml.contains("<wp:docPr id=\"2\""));
    }

    #[test]
    fn unknown_media_is_an_error() {
        let media = MediaStore::new();
        let mut ids = IdAllocator::default();
        let mut story =
            StoryWriter::open("w:hdr", &media, Relationships::default(), &mut ids).unwrap();
        let para = IRNode::styled(
            ParagraphStyle::Normal,
            vec![InlineNode::Image {
                media: MediaId(3),
                width_emu: 1,
                height_emu: 1,
                description: String::new(),
            }],
        );
        assert!(matches!(story.blocks(&[para]), Err(RenderError::MissingMedia(3))));
    }

    #[test]
    fn fields_and_links_are_serialized() {
        let para = IRNode::styled(
            ParagraphStyle::TocEntry(2),
            vec![
                InlineNode::Hyperlink {
                    anchor: "sub-1-1".into(),
                    children: vec![InlineNode::Text("I.A – Roof".into())],
                },
                InlineNode::Field(FieldKind::NumPages),
            ],
        );
        let (xml, _) = render_body(&[para], &MediaStore::new());
        assert!(xml.contains("<w:pStyle w:val=\"TOC2\"/>"));
        assert!(xml.contains("w:anchor=\"sub-1-1\""));
        assert!(xml.contains("w:instr=\" NUMPAGES \""));
    }
}
