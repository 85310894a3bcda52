//! Thin event-level wrapper over `quick_xml::Writer`.
use inspecta_render_core::RenderError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::fmt::Display;

fn markup_err<E: Display>(e: E) -> RenderError {
    RenderError::Markup(e.to_string())
}

/// Drops characters XML 1.0 cannot carry, even escaped.
fn xml_safe(text: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        match c {
            '\t' | '\n' | '\r' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            c => c >= '\u{20}',
        }
    }

    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

/// Buffers one package part as XML.
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Starts a standalone part with the XML declaration already written.
    pub fn new() -> Result<Self, RenderError> {
        let mut inner = Writer::new(Vec::new());
        inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(markup_err)?;
        Ok(Self { inner })
    }

    fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs {
            start.push_attribute((*key, xml_safe(value).as_ref()));
        }
        start
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        self.inner
            .write_event(Event::Start(Self::element(name, attrs)))
            .map_err(markup_err)
    }

    pub fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(markup_err)
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        self.inner
            .write_event(Event::Empty(Self::element(name, attrs)))
            .map_err(markup_err)
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) -> Result<(), RenderError> {
        self.inner
            .write_event(Event::Text(BytesText::new(&xml_safe(text))))
            .map_err(markup_err)
    }

    /// `<name attrs>text</name>`
    pub fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), RenderError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}
