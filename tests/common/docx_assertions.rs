use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A top-level element of `w:body`, reduced to what tests look at.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Paragraph text; `style` is the `w:pStyle` value, if any.
    Paragraph { style: Option<String>, text: String },
    PageBreak,
    /// Text of every cell paragraph, one line per paragraph.
    Table(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph { text, .. } | Block::Table(text) => text,
            Block::PageBreak => "",
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    pub fn has_style(&self, id: &str) -> bool {
        matches!(self, Block::Paragraph { style: Some(s), .. } if s == id)
    }
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Walks `document.xml` and collapses each direct child of `w:body`.
/// Test strings avoid XML entities, so text is taken verbatim.
pub fn body_blocks(xml: &str) -> Result<Vec<Block>, Box<dyn std::error::Error>> {
    let mut reader = Reader::from_str(xml);
    let mut blocks = Vec::new();

    let mut in_body = false;
    let mut depth = 0usize;
    let mut kind = Vec::new();
    let mut style = None;
    let mut text = String::new();
    let mut in_text = false;
    let mut page_break = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"w:body" {
                    in_body = true;
                    continue;
                }
                if !in_body {
                    continue;
                }
                if depth == 0 {
                    kind = name.clone();
                    style = None;
                    text.clear();
                    page_break = false;
                }
                if name == b"w:t" {
                    in_text = true;
                }
                depth += 1;
            }
            Event::Empty(e) if in_body => {
                let name = e.name();
                match name.as_ref() {
                    b"w:br" if attribute(&e, "w:type").as_deref() == Some("page") => {
                        page_break = true;
                    }
                    b"w:pStyle" if depth == 2 && kind == b"w:p" => {
                        style = attribute(&e, "w:val");
                    }
                    b"w:p" if depth == 0 => blocks.push(Block::Paragraph {
                        style: None,
                        text: String::new(),
                    }),
                    _ => {}
                }
            }
            Event::Text(e) if in_text => {
                text.push_str(std::str::from_utf8(e.as_ref())?);
            }
            Event::End(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"w:body" {
                    in_body = false;
                    continue;
                }
                if !in_body {
                    continue;
                }
                if name == b"w:t" {
                    in_text = false;
                }
                depth -= 1;
                if depth > 0 && name == b"w:p" && kind == b"w:tbl" {
                    text.push('\n');
                }
                if depth == 0 {
                    match kind.as_slice() {
                        b"w:p" if page_break && text.is_empty() => blocks.push(Block::PageBreak),
                        b"w:p" => blocks.push(Block::Paragraph {
                            style: style.take(),
                            text: std::mem::take(&mut text),
                        }),
                        b"w:tbl" => blocks.push(Block::Table(std::mem::take(&mut text))),
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

/// All `w:t` text of a part, one line per paragraph.
pub fn all_text(xml: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::End(e) if e.name().as_ref() == b"w:p" => out.push('\n'),
            Event::Text(e) if in_text => out.push_str(std::str::from_utf8(e.as_ref())?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

/// Number of hard page breaks anywhere in the part.
pub fn count_page_breaks(xml: &str) -> usize {
    xml.matches("<w:br w:type=\"page\"/>").count()
}

/// Values of every `name` attribute on `element`, in document order.
pub fn attribute_values(
    xml: &str,
    element: &str,
    name: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == element.as_bytes() => {
                if let Some(value) = attribute(&e, name) {
                    values.push(value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(values)
}

/// Sequence of table / page-break markers from the first heading on:
/// `T` per table, `|` per break. Paragraphs are skipped.
pub fn table_break_pattern(blocks: &[Block], heading_style: &str) -> String {
    let start = blocks
        .iter()
        .position(|b| b.has_style(heading_style))
        .unwrap_or(blocks.len());
    blocks[start..]
        .iter()
        .filter_map(|b| match b {
            Block::Table(_) => Some('T'),
            Block::PageBreak => Some('|'),
            Block::Paragraph { style: Some(s), .. } if s == heading_style => Some('#'),
            _ => None,
        })
        .collect()
}
