use std::io;

use scrub_dom::{Document, NodeId, NodeKind};
use scrub_writer::escape::{Escape, HtmlEscaper};
use scrub_writer::write::UnicodeWrite;
use scrub_writer::{MarkupWriter, Syntax};

use crate::rules;

/// How nodes without a markup representation of their own are handled.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// Output markup: document nodes expand to their children, childless
    /// non-void elements get an end tag unless written as XML.
    Markup,
    /// Literal text of a node: document nodes render empty, childless
    /// elements are always self-closed.
    Literal,
}

enum Step {
    Enter(NodeId),
    Exit,
}

pub(crate) fn write_tree<W: UnicodeWrite, E: Escape>(
    doc: &Document,
    node: NodeId,
    writer: &mut MarkupWriter<'_, W, E>,
    flavor: Flavor,
) -> io::Result<()> {
    let syntax = writer.syntax();
    let mut stack = vec![Step::Enter(node)];
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Exit => {
                writer.end_element()?;
                continue;
            }
            Step::Enter(id) => id,
        };
        let children = doc.children(id);
        match doc.kind(id) {
            NodeKind::Text(text) => writer.characters(text)?,
            // HTML parsers read `<![CDATA[` as a bogus comment ending at the first `>`
            NodeKind::CData(text) if flavor == Flavor::Markup && syntax != Syntax::Xml => {
                writer.characters(text)?
            }
            NodeKind::CData(text) => writer.cdata(text)?,
            NodeKind::Comment(_) | NodeKind::ProcessingInstruction { .. } => {}
            NodeKind::Document => {
                if flavor == Flavor::Markup {
                    stack.extend(children.iter().rev().map(|&child| Step::Enter(child)));
                }
            }
            NodeKind::Element(element) => {
                let mut start = writer.element(element.name().to_string())?;
                for attribute in element.attributes() {
                    start = start.attribute(&attribute.name.qualified(), &attribute.value)?;
                }

                let void = flavor == Flavor::Markup && rules::is_void_element(element.name());
                let empty = children.is_empty()
                    && (flavor == Flavor::Literal || syntax == Syntax::Xml);
                if void || empty {
                    start.finish_empty()?;
                } else {
                    start.finish()?;
                    stack.push(Step::Exit);
                }
                // content of a void element follows it
                stack.extend(children.iter().rev().map(|&child| Step::Enter(child)));
            }
        }
    }
    Ok(())
}

/// Writes `node` and its subtree as markup. Comments and processing
/// instructions are dropped.
pub fn write_markup<W: UnicodeWrite>(
    doc: &Document,
    node: NodeId,
    syntax: Syntax,
    sink: W,
) -> io::Result<W> {
    let mut writer = MarkupWriter::for_writer(sink, HtmlEscaper, syntax);
    write_tree(doc, node, &mut writer, Flavor::Markup)?;
    writer.finish()
}

pub fn to_markup(doc: &Document, node: NodeId, syntax: Syntax) -> String {
    // writing into a String cannot fail
    write_markup(doc, node, syntax, String::new()).unwrap_or_default()
}

/// Markup of the children of `node`.
pub fn inner_markup(doc: &Document, node: NodeId, syntax: Syntax) -> String {
    let mut writer = MarkupWriter::for_writer(String::new(), HtmlEscaper, syntax);
    let written = doc
        .children(node)
        .iter()
        .try_for_each(|&child| write_tree(doc, child, &mut writer, Flavor::Markup));
    match written {
        Ok(()) => writer.finish().unwrap_or_default(),
        Err(_) => String::new(),
    }
}
