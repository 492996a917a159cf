use std::str::Utf8Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{reason} at offset {offset}")]
pub struct Error {
    offset: usize,
    pub(crate) reason: Reason,
}

impl Error {
    pub fn new(offset: usize, reason: Reason) -> Self {
        Self { offset, reason }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Reason {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("unexpected end of file")]
    UnexpectedEof,
    #[error("expected </{expected}> but got </{found}>")]
    EndEventMismatch { expected: String, found: String },
    #[error("unexpected doctype")]
    UnexpectedDocType,
    #[error("xml decl not at start of file")]
    UnexpectedDecl,
    #[error("trailing content")]
    TrailingContent,
    #[error("missing root element")]
    MissingRoot,
}
