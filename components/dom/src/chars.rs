pub trait HtmlByteExt {
    fn is_html_whitespace(&self) -> bool;
}

impl HtmlByteExt for u8 {
    fn is_html_whitespace(&self) -> bool {
        matches!(*self, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
    }
}

pub trait HtmlBytesExt {
    fn only_html_whitespace(&self) -> bool;
}

impl HtmlBytesExt for [u8] {
    fn only_html_whitespace(&self) -> bool {
        self.iter().all(HtmlByteExt::is_html_whitespace)
    }
}

impl HtmlBytesExt for str {
    fn only_html_whitespace(&self) -> bool {
        self.as_bytes().only_html_whitespace()
    }
}

pub trait HtmlStrExt {
    fn starts_with_ignore_ascii_case(&self, prefix: &str) -> bool;
}

impl HtmlStrExt for str {
    fn starts_with_ignore_ascii_case(&self, prefix: &str) -> bool {
        self.len() >= prefix.len()
            && self.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    }
}
