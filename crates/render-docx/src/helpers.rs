//! Fixed package parts: content types, relationships, styles, settings and
//! document properties.
use crate::writer::XmlWriter;
use inspecta_idf::{DocumentInfo, ImageFormat};
use inspecta_render_core::RenderError;

pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_WP: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub(crate) const REL_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub(crate) const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub(crate) const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
pub(crate) const REL_HEADER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
pub(crate) const REL_FOOTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
pub(crate) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Namespace declarations shared by the document, header and footer roots.
pub(crate) fn story_namespaces() -> [(&'static str, &'static str); 5] {
    [
        ("xmlns:w", NS_W),
        ("xmlns:r", NS_R),
        ("xmlns:wp", NS_WP),
        ("xmlns:a", NS_A),
        ("xmlns:pic", NS_PIC),
    ]
}

#[derive(Debug, Clone)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
}

/// The relationships of one part, with sequential `rIdN` identifiers.
#[derive(Debug, Clone, Default)]
pub(crate) struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type,
            target: target.into(),
        });
        id
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> Result<Vec<u8>, RenderError> {
        let mut xml = XmlWriter::new()?;
        xml.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
        for rel in &self.entries {
            xml.empty(
                "Relationship",
                &[
                    ("Id", rel.id.as_str()),
                    ("Type", rel.rel_type),
                    ("Target", rel.target.as_str()),
                ],
            )?;
        }
        xml.end("Relationships")?;
        Ok(xml.into_bytes())
    }
}

pub(crate) fn content_types(formats: &[ImageFormat]) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for format in formats {
        xml.empty(
            "Default",
            &[
                ("Extension", format.extension()),
                ("ContentType", format.content_type()),
            ],
        )?;
    }

    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
        (
            "/word/header1.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml",
        ),
        (
            "/word/footer1.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part, content_type) in overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    xml.end("Types")?;
    Ok(xml.into_bytes())
}

pub(crate) fn package_relationships() -> Result<Vec<u8>, RenderError> {
    let mut rels = Relationships::default();
    rels.add(REL_OFFICE_DOCUMENT, "word/document.xml");
    rels.add(REL_CORE_PROPS, "docProps/core.xml");
    rels.add(REL_APP_PROPS, "docProps/app.xml");
    rels.to_xml()
}

pub(crate) fn core_properties(info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], &info.title)?;
    xml.text_element("dc:subject", &[], &info.subject)?;
    xml.text_element("dc:creator", &[], &info.creator)?;
    if !info.created.is_empty() {
        xml.text_element(
            "dcterms:created",
            &[("xsi:type", "dcterms:W3CDTF")],
            &info.created,
        )?;
    }
    xml.end("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

pub(crate) fn app_properties() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.text_element("Application", &[], "Inspecta")?;
    xml.end("Properties")?;
    Ok(xml.into_bytes())
}

pub(crate) fn settings() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:settings", &[("xmlns:w", NS_W)])?;
    xml.empty("w:defaultTabStop", &[("w:val", "708")])?;
    xml.empty("w:characterSpacingControl", &[("w:val", "doNotCompress")])?;
    xml.end("w:settings")?;
    Ok(xml.into_bytes())
}

/// Paragraph style definition: id, display name, bold, italic, size (half-points),
/// colour, alignment, outline level, left indent.
struct StyleDef {
    id: &'static str,
    name: &'static str,
    bold: bool,
    italic: bool,
    size: Option<u32>,
    color: Option<&'static str>,
    align: Option<&'static str>,
    outline: Option<u8>,
    indent: Option<u32>,
    space_after: Option<u32>,
}

#[rustfmt::skip]
const PARAGRAPH_STYLES: &[StyleDef] = &[
    StyleDef { id: "Title", name: "Title", bold: true, italic: false, size: Some(40), color: Some("1F3864"), align: Some("center"), outline: None, indent: None, space_after: Some(240) },
    StyleDef { id: "Subtitle", name: "Subtitle", bold: false, italic: false, size: Some(28), color: Some("404040"), align: Some("center"), outline: None, indent: None, space_after: Some(160) },
    StyleDef { id: "Heading1", name: "heading 1", bold: true, italic: false, size: Some(28), color: Some("1F3864"), align: None, outline: Some(0), indent: None, space_after: Some(160) },
    StyleDef { id: "Heading2", name: "heading 2", bold: true, italic: false, size: Some(24), color: Some("2F5496"), align: None, outline: Some(1), indent: None, space_after: Some(120) },
    StyleDef { id: "TOCHeading", name: "TOC Heading", bold: true, italic: false, size: Some(28), color: Some("1F3864"), align: None, outline: None, indent: None, space_after: Some(240) },
    StyleDef { id: "TOC1", name: "toc 1", bold: true, italic: false, size: None, color: None, align: None, outline: None, indent: None, space_after: Some(100) },
    StyleDef { id: "TOC2", name: "toc 2", bold: false, italic: false, size: None, color: None, align: None, outline: None, indent: Some(440), space_after: Some(100) },
    StyleDef { id: "Caption", name: "caption", bold: false, italic: true, size: Some(18), color: Some("404040"), align: Some("center"), outline: None, indent: None, space_after: Some(200) },
    StyleDef { id: "Placeholder", name: "Image Placeholder", bold: false, italic: true, size: Some(18), color: Some("C00000"), align: Some("center"), outline: None, indent: None, space_after: None },
    StyleDef { id: "CellLabel", name: "Cell Label", bold: true, italic: false, size: None, color: None, align: None, outline: None, indent: None, space_after: Some(0) },
    StyleDef { id: "Small", name: "Small", bold: false, italic: false, size: Some(16), color: None, align: None, outline: None, indent: None, space_after: Some(0) },
];

pub(crate) fn styles() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", "Arial"), ("w:hAnsi", "Arial"), ("w:cs", "Arial")],
    )?;
    xml.empty("w:sz", &[("w:val", "20")])?;
    xml.empty("w:szCs", &[("w:val", "20")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "120"), ("w:line", "264"), ("w:lineRule", "auto")])?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;

    for def in PARAGRAPH_STYLES {
        write_paragraph_style(&mut xml, def)?;
    }

    xml.start("w:style", &[("w:type", "character"), ("w:styleId", "Hyperlink")])?;
    xml.empty("w:name", &[("w:val", "Hyperlink")])?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:color", &[("w:val", "0563C1")])?;
    xml.end("w:rPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.into_bytes())
}

fn write_paragraph_style(xml: &mut XmlWriter, def: &StyleDef) -> Result<(), RenderError> {
    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", def.id)])?;
    xml.empty("w:name", &[("w:val", def.name)])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:next", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;

    xml.start("w:pPr", &[])?;
    if def.outline.is_some() {
        xml.empty("w:keepNext", &[])?;
    }
    if let Some(after) = def.space_after {
        xml.empty("w:spacing", &[("w:after", &after.to_string())])?;
    }
    if let Some(left) = def.indent {
        xml.empty("w:ind", &[("w:left", &left.to_string())])?;
    }
    if let Some(align) = def.align {
        xml.empty("w:jc", &[("w:val", align)])?;
    }
    if let Some(level) = def.outline {
        xml.empty("w:outlineLvl", &[("w:val", &level.to_string())])?;
    }
    xml.end("w:pPr")?;

    xml.start("w:rPr", &[])?;
    if def.bold {
        xml.empty("w:b", &[])?;
    }
    if def.italic {
        xml.empty("w:i", &[])?;
    }
    if let Some(color) = def.color {
        xml.empty("w:color", &[("w:val", color)])?;
    }
    if let Some(size) = def.size {
        let size = size.to_string();
        xml.empty("w:sz", &[("w:val", &size)])?;
        xml.empty("w:szCs", &[("w:val", &size)])?;
    }
    xml.end("w:rPr")?;

    xml.end("w:style")
}
