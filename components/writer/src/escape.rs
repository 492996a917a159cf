use std::io;

use memchr::memchr3_iter;

use crate::write::UnicodeWrite;

/// Strategy to escape character data and attribute values
pub trait Escape {
    fn escape_content<W: UnicodeWrite + ?Sized>(&self, input: &str, write: &mut W)
        -> io::Result<()>;
    fn escape_attr_value<W: UnicodeWrite + ?Sized>(
        &self,
        input: &str,
        write: &mut W,
    ) -> io::Result<()>;
}

fn entity(c: u8) -> &'static str {
    match c {
        b'&' => "&amp;",
        b'<' => "&lt;",
        b'>' => "&gt;",
        _ => "&quot;",
    }
}

/// Escapes `& < >` in content and additionally `"` in attribute values.
///
/// Attribute values are always written in double quotes.
pub struct HtmlEscaper;

impl Escape for HtmlEscaper {
    fn escape_content<W: UnicodeWrite + ?Sized>(
        &self,
        input: &str,
        write: &mut W,
    ) -> io::Result<()> {
        let bytes = input.as_bytes();
        let mut p = 0;
        for i in memchr3_iter(b'&', b'<', b'>', bytes) {
            // all matches are ASCII, so `i` is a char boundary
            write.write_all(&input[p..i])?;
            write.write_all(entity(bytes[i]))?;
            p = i + 1;
        }
        write.write_all(&input[p..])
    }

    fn escape_attr_value<W: UnicodeWrite + ?Sized>(
        &self,
        input: &str,
        write: &mut W,
    ) -> io::Result<()> {
        let mut p = 0;
        for (i, r) in input.match_indices(|c: char| matches!(c, '&' | '<' | '>' | '"')) {
            write.write_all(&input[p..i])?;
            write.write_all(entity(r.as_bytes()[0]))?;
            p = i + 1;
        }
        write.write_all(&input[p..])
    }
}

/// Writes everything verbatim.
pub struct RawEscaper;

impl Escape for RawEscaper {
    fn escape_content<W: UnicodeWrite + ?Sized>(
        &self,
        input: &str,
        write: &mut W,
    ) -> io::Result<()> {
        write.write_all(input)
    }

    fn escape_attr_value<W: UnicodeWrite + ?Sized>(
        &self,
        input: &str,
        write: &mut W,
    ) -> io::Result<()> {
        write.write_all(input)
    }
}

pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    // writing into a String cannot fail
    let _ = HtmlEscaper.escape_content(input, &mut output);
    output
}
