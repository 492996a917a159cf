use std::borrow::Cow;
use std::io;

use crate::escape::Escape;
use crate::write::UnicodeWrite;

pub mod escape;
pub mod write;

/// How elements without content are closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Syntax {
    /// `<br/>`
    Xml,
    /// `<br>`
    #[default]
    Html,
    /// `<br />`
    Xhtml,
}

impl Syntax {
    fn empty_tag_end(self) -> &'static str {
        match self {
            Syntax::Xml => "/>",
            Syntax::Html => ">",
            Syntax::Xhtml => " />",
        }
    }
}

pub struct MarkupWriter<'w, W: UnicodeWrite, E: Escape> {
    syntax: Syntax,
    stack: Vec<Cow<'w, str>>,
    writer: W,
    escaper: E,
}

impl<'w, W: UnicodeWrite, E: Escape> MarkupWriter<'w, W, E> {
    pub fn for_writer(writer: W, escaper: E, syntax: Syntax) -> Self {
        Self {
            syntax,
            stack: vec![],
            writer,
            escaper,
        }
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn element<'a>(
        &'a mut self,
        name: impl Into<Cow<'w, str>>,
    ) -> io::Result<ElementWriter<'a, 'w, W, E>> {
        let name = name.into();
        self.writer.write_all("<")?;
        self.writer.write_all(&name)?;
        Ok(ElementWriter { name, ser: self })
    }

    pub fn end_element(&mut self) -> io::Result<()> {
        match self.stack.pop() {
            Some(name) => {
                self.writer.write_all("</")?;
                self.writer.write_all(&name)?;
                self.writer.write_all(">")
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "end_element without open element",
            )),
        }
    }

    pub fn characters(&mut self, characters: &str) -> io::Result<()> {
        self.escaper.escape_content(characters, &mut self.writer)
    }

    /// Writes a CDATA section. A `]]>` inside `characters` is split across
    /// two sections.
    pub fn cdata(&mut self, characters: &str) -> io::Result<()> {
        self.writer.write_all("<![CDATA[")?;
        for (i, part) in characters.split("]]>").enumerate() {
            if i > 0 {
                self.writer.write_all("]]]]><![CDATA[>")?;
            }
            self.writer.write_all(part)?;
        }
        self.writer.write_all("]]>")
    }

    /// Returns the sink once every element has been closed.
    pub fn finish(self) -> io::Result<W> {
        if self.stack.is_empty() {
            Ok(self.writer)
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("missing end_element call(s): {}", self.stack.join(", ")),
            ))
        }
    }
}

pub struct ElementWriter<'ser, 'w, W: UnicodeWrite, E: Escape> {
    name: Cow<'w, str>,
    ser: &'ser mut MarkupWriter<'w, W, E>,
}

impl<'ser, 'w, W: UnicodeWrite, E: Escape> ElementWriter<'ser, 'w, W, E> {
    pub fn attribute(self, key: &str, value: &str) -> io::Result<Self> {
        let writer = &mut self.ser.writer;
        writer.write_all(" ")?;
        writer.write_all(key)?;
        writer.write_all("=\"")?;
        self.ser.escaper.escape_attr_value(value, writer)?;
        writer.write_all("\"")?;
        Ok(self)
    }

    /// Closes the start tag, content and [`MarkupWriter::end_element`] follow.
    pub fn finish(self) -> io::Result<()> {
        self.ser.stack.push(self.name);
        self.ser.writer.write_all(">")
    }

    /// Closes the element without content.
    pub fn finish_empty(self) -> io::Result<()> {
        let end = self.ser.syntax.empty_tag_end();
        self.ser.writer.write_all(end)
    }
}
