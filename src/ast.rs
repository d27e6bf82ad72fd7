/// A single template token.
///
/// Section, inverted-section and partial bodies are themselves token
/// sequences, so a tokenized template forms a finite tree. The compiler
/// borrows the tree immutably and keeps nothing across calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text, copied through to the output verbatim.
    Content(String),
    /// A variable interpolation. `escape` selects HTML-escaped (`{{name}}`)
    /// versus raw (`{{{name}}}` / `{{&name}}`) insertion.
    Variable { name: String, escape: bool },
    /// A `{{#name}}...{{/name}}` block, rendered zero, one or many times
    /// depending on what `name` resolves to.
    Section { name: String, body: TokenSequence },
    /// A `{{^name}}...{{/name}}` block, rendered iff `name` resolves to a
    /// falsy or absent value.
    InvertedSection { name: String, body: TokenSequence },
    /// An included sub-template, already resolved to its tokens. No file
    /// lookup happens past this point.
    Partial { body: TokenSequence },
}

/// An ordered list of tokens, in template source order.
pub type TokenSequence = Vec<Token>;

/// The tag of a [`Token`] variant, used to key the code generation
/// dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Content,
    Variable,
    Section,
    InvertedSection,
    Partial,
}

impl Token {
    /// Returns the kind tag of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Content(_) => TokenKind::Content,
            Token::Variable { .. } => TokenKind::Variable,
            Token::Section { .. } => TokenKind::Section,
            Token::InvertedSection { .. } => TokenKind::InvertedSection,
            Token::Partial { .. } => TokenKind::Partial,
        }
    }
}
