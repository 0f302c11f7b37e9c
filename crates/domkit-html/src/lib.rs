//! domkit HTML Parser
//!
//! Builds host documents from markup using html5ever.

mod parser;

pub use parser::HtmlParser;

use domkit_dom::{Document, DomError};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build document tree: {0}")]
    Tree(#[from] DomError),
}
