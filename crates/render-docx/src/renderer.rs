use crate::helpers::{
    self, Relationships, REL_FOOTER, REL_HEADER, REL_SETTINGS, REL_STYLES,
};
use crate::markup::{IdAllocator, StoryWriter};
use inspecta_idf::{DocumentTree, ImageFormat, MediaStore};
use inspecta_render_core::{DocumentRenderer, RenderError};
use log::debug;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn package_err(e: zip::result::ZipError) -> RenderError {
    RenderError::Package(e.to_string())
}

/// Renders a [`DocumentTree`] as a `.docx` package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

struct Package<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
}

impl<W: Write + Seek> Package<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    fn part(&mut self, name: &str, bytes: &[u8]) -> Result<(), RenderError> {
        self.zip.start_file(name, self.options).map_err(package_err)?;
        self.zip.write_all(bytes)?;
        Ok(())
    }

    fn finish(self) -> Result<W, RenderError> {
        self.zip.finish().map_err(package_err)
    }
}

impl DocumentRenderer for DocxRenderer {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn render<W: Write + Seek>(
        &self,
        document: &DocumentTree,
        writer: W,
    ) -> Result<W, RenderError> {
        let mut ids = IdAllocator::default();

        let mut header = StoryWriter::open(
            "w:hdr",
            &document.media,
            Relationships::default(),
            &mut ids,
        )?;
        header.blocks(&document.header)?;
        let (header_xml, header_rels) = header.finish()?;

        let mut footer = StoryWriter::open(
            "w:ftr",
            &document.media,
            Relationships::default(),
            &mut ids,
        )?;
        footer.blocks(&document.footer)?;
        let (footer_xml, footer_rels) = footer.finish()?;

        let mut doc_rels = Relationships::default();
        doc_rels.add(REL_STYLES, "styles.xml");
        doc_rels.add(REL_SETTINGS, "settings.xml");
        let header_id = doc_rels.add(REL_HEADER, "header1.xml");
        let footer_id = doc_rels.add(REL_FOOTER, "footer1.xml");

        let mut body = StoryWriter::open("w:document", &document.media, doc_rels, &mut ids)?;
        body.blocks(&document.body)?;
        body.section(&document.page, &header_id, &footer_id)?;
        let (document_xml, doc_rels) = body.finish()?;

        let formats = used_formats(&document.media);
        debug!(
            "Packaging docx: {} body nodes, {} media items",
            document.body.len(),
            document.media.len()
        );

        let mut package = Package::new(writer);
        package.part("[Content_Types].xml", &helpers::content_types(&formats)?)?;
        package.part("_rels/.rels", &helpers::package_relationships()?)?;
        package.part("docProps/core.xml", &helpers::core_properties(&document.info)?)?;
        package.part("docProps/app.xml", &helpers::app_properties()?)?;
        package.part("word/document.xml", &document_xml)?;
        package.part("word/_rels/document.xml.rels", &doc_rels.to_xml()?)?;
        package.part("word/styles.xml", &helpers::styles()?)?;
        package.part("word/settings.xml", &helpers::settings()?)?;
        package.part("word/header1.xml", &header_xml)?;
        if !header_rels.is_empty() {
            package.part("word/_rels/header1.xml.rels", &header_rels.to_xml()?)?;
        }
        package.part("word/footer1.xml", &footer_xml)?;
        if !footer_rels.is_empty() {
            package.part("word/_rels/footer1.xml.rels", &footer_rels.to_xml()?)?;
        }
        for (id, item) in document.media.iter() {
            let name = format!("word/{}", MediaStore::part_name(id, item.format));
            package.part(&name, &item.data)?;
        }
        package.finish()
    }
}

fn used_formats(media: &MediaStore) -> Vec<ImageFormat> {
    let mut formats: Vec<ImageFormat> = Vec::new();
    for (_, item) in media.iter() {
        if !formats.contains(&item.format) {
            formats.push(item.format);
        }
    }
    formats
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspecta_idf::{FieldKind, IRNode, InlineNode, MediaItem, ParagraphStyle};
    use std::io::{Cursor, Read};
    use std::sync::Arc;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> Option<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        Some(out)
    }

    fn sample_tree() -> DocumentTree {
        let mut tree = DocumentTree::default();
        let logo = tree.media.add(MediaItem {
            data: Arc::new(vec![0x89, b'P', b'N', b'G']),
            format: ImageFormat::Png,
            width_px: 20,
            height_px: 10,
        });
        tree.header = vec![IRNode::styled(
            ParagraphStyle::Small,
            vec![
                InlineNode::Image {
                    media: logo,
                    width_emu: 190500,
                    height_emu: 95250,
                    description: "logo".into(),
                },
                InlineNode::Field(FieldKind::Page),
            ],
        )];
        tree.footer = vec![IRNode::paragraph("footer")];
        tree.body = vec![
            IRNode::heading(1, "I – Facade", Some("section-1".into())),
            IRNode::PageBreak,
            IRNode::paragraph("done"),
        ];
        tree.info.title = "Pendency Report".into();
        tree
    }

    #[test]
    fn package_contains_every_part() {
        let bytes = DocxRenderer::new().render_to_vec(&sample_tree()).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/settings.xml",
            "word/header1.xml",
            "word/_rels/header1.xml.rels",
            "word/footer1.xml",
        ] {
            assert!(read_part(&bytes, part).is_some(), "missing {}", part);
        }
        assert!(read_part(&bytes, "word/_rels/footer1.xml.rels").is_none());
    }

    #[test]
    fn document_references_header_and_footer() {
        let bytes = DocxRenderer::new().render_to_vec(&sample_tree()).unwrap();
        let document = read_part(&bytes, "word/document.xml").unwrap();
        assert!(document.contains("<w:headerReference w:type=\"default\" r:id=\"rId3\"/>"));
        assert!(document.contains("<w:footerReference w:type=\"default\" r:id=\"rId4\"/>"));
        assert!(document.contains("<w:pgSz w:w=\"11906\" w:h=\"16838\"/>"));

        let rels = read_part(&bytes, "word/_rels/document.xml.rels").unwrap();
        assert!(rels.contains("Target=\"header1.xml\""));

        let header_rels = read_part(&bytes, "word/_rels/header1.xml.rels").unwrap();
        assert!(header_rels.contains("Target=\"media/image1.png\""));

        let types = read_part(&bytes, "[Content_Types].xml").unwrap();
        assert!(types.contains("Extension=\"png\""));
    }

    #[test]
    fn core_properties_carry_the_title() {
        let bytes = DocxRenderer::new().render_to_vec(&sample_tree()).unwrap();
        let core = read_part(&bytes, "docProps/core.xml").unwrap();
        assert!(core.contains("<dc:title>Pendency Report</dc:title>"));
    }

    #[test]
    fn media_bytes_are_stored_verbatim() {
        let bytes = DocxRenderer::new().render_to_vec(&sample_tree()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/media/image1.png").unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        assert_eq!(data, vec![0x89, b'P', b'N', b'G']);
    }
}
