use crate::ast::{Token, TokenSequence};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TokenizeError {
    #[error("tag opened at byte {offset} is never closed")]
    UnclosedTag { offset: usize },
    #[error("section '{name}' opened at byte {offset} is never closed")]
    UnclosedSection { name: String, offset: usize },
    #[error("closing tag '{found}' at byte {offset} does not match open section '{expected}'")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("closing tag '{name}' at byte {offset} has no matching open section")]
    UnexpectedClose { name: String, offset: usize },
    #[error("tag at byte {offset} is empty")]
    EmptyTag { offset: usize },
    #[error("unknown partial '{name}' referenced at byte {offset}")]
    UnknownPartial { name: String, offset: usize },
    #[error("partial '{name}' at byte {offset} includes itself recursively")]
    RecursivePartial { name: String, offset: usize },
}

impl TokenizeError {
    /// Byte offset of the offending tag within its template source.
    pub fn offset(&self) -> usize {
        match self {
            TokenizeError::UnclosedTag { offset }
            | TokenizeError::UnclosedSection { offset, .. }
            | TokenizeError::MismatchedClose { offset, .. }
            | TokenizeError::UnexpectedClose { offset, .. }
            | TokenizeError::EmptyTag { offset }
            | TokenizeError::UnknownPartial { offset, .. }
            | TokenizeError::RecursivePartial { offset, .. } => *offset,
        }
    }
}

/// A section opened by `{{#name}}` or `{{^name}}` whose closing tag has not
/// been seen yet.
struct OpenSection {
    name: String,
    inverted: bool,
    offset: usize,
    tokens: TokenSequence,
}

/// Turns Mustache template source into the token tree consumed by
/// [`crate::codegen::Compiler`].
///
/// Partials are resolved here: `{{>name}}` looks `name` up in the registered
/// source map and recursively tokenizes it, so the compiler only ever sees
/// fully resolved token trees.
#[derive(Debug, Default)]
pub struct Tokenizer {
    partials: HashMap<String, String>,
}

/// Tokenizes a template that references no partials.
pub fn tokenize(source: &str) -> Result<TokenSequence, TokenizeError> {
    Tokenizer::new().tokenize(source)
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the source of a partial so `{{>name}}` can resolve it.
    pub fn partial(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.partials.insert(name.into(), source.into());
        self
    }

    /// Tokenizes `source` into a tree of [`Token`]s.
    pub fn tokenize(&self, source: &str) -> Result<TokenSequence, TokenizeError> {
        let mut active = Vec::new();
        self.scan(source, &mut active)
    }

    /// `active` tracks partials currently being expanded, to reject cycles.
    fn scan(&self, source: &str, active: &mut Vec<String>) -> Result<TokenSequence, TokenizeError> {
        fn current<'a>(
            stack: &'a mut Vec<OpenSection>,
            toplevel: &'a mut TokenSequence,
        ) -> &'a mut TokenSequence {
            match stack.last_mut() {
                Some(open) => &mut open.tokens,
                None => toplevel,
            }
        }

        let mut stack: Vec<OpenSection> = Vec::new();
        let mut toplevel: TokenSequence = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let open_at = match source[pos..].find("{{") {
                Some(i) => pos + i,
                None => {
                    current(&mut stack, &mut toplevel).push(Token::Content(source[pos..].to_string()));
                    break;
                }
            };
            if open_at > pos {
                current(&mut stack, &mut toplevel)
                    .push(Token::Content(source[pos..open_at].to_string()));
            }

            // Triple mustache is handled before the generic `}}` search so
            // `{{{name}}}` is not split into `{{{name}` + `}`.
            if source[open_at..].starts_with("{{{") {
                let close = source[open_at + 3..]
                    .find("}}}")
                    .ok_or(TokenizeError::UnclosedTag { offset: open_at })?
                    + open_at
                    + 3;
                let name = source[open_at + 3..close].trim();
                if name.is_empty() {
                    return Err(TokenizeError::EmptyTag { offset: open_at });
                }
                current(&mut stack, &mut toplevel).push(Token::Variable {
                    name: name.to_string(),
                    escape: false,
                });
                pos = close + 3;
                continue;
            }

            let close = source[open_at + 2..]
                .find("}}")
                .ok_or(TokenizeError::UnclosedTag { offset: open_at })?
                + open_at
                + 2;
            let inner = source[open_at + 2..close].trim();
            pos = close + 2;

            let (sigil, name) = match inner.chars().next() {
                Some(c @ ('#' | '^' | '/' | '>' | '&' | '!')) => (Some(c), inner[1..].trim()),
                Some(_) => (None, inner),
                None => return Err(TokenizeError::EmptyTag { offset: open_at }),
            };
            if name.is_empty() && sigil != Some('!') {
                return Err(TokenizeError::EmptyTag { offset: open_at });
            }

            match sigil {
                Some('#') | Some('^') => {
                    stack.push(OpenSection {
                        name: name.to_string(),
                        inverted: sigil == Some('^'),
                        offset: open_at,
                        tokens: Vec::new(),
                    });
                }
                Some('/') => {
                    let open = stack.pop().ok_or_else(|| TokenizeError::UnexpectedClose {
                        name: name.to_string(),
                        offset: open_at,
                    })?;
                    if open.name != name {
                        return Err(TokenizeError::MismatchedClose {
                            expected: open.name,
                            found: name.to_string(),
                            offset: open_at,
                        });
                    }
                    let token = if open.inverted {
                        Token::InvertedSection {
                            name: open.name,
                            body: open.tokens,
                        }
                    } else {
                        Token::Section {
                            name: open.name,
                            body: open.tokens,
                        }
                    };
                    current(&mut stack, &mut toplevel).push(token);
                }
                Some('>') => {
                    let partial_source =
                        self.partials
                            .get(name)
                            .ok_or_else(|| TokenizeError::UnknownPartial {
                                name: name.to_string(),
                                offset: open_at,
                            })?;
                    if active.iter().any(|n| n == name) {
                        return Err(TokenizeError::RecursivePartial {
                            name: name.to_string(),
                            offset: open_at,
                        });
                    }
                    active.push(name.to_string());
                    let body = self.scan(partial_source, active)?;
                    active.pop();
                    current(&mut stack, &mut toplevel).push(Token::Partial { body });
                }
                Some('!') => {} // comment, dropped
                Some('&') => {
                    current(&mut stack, &mut toplevel).push(Token::Variable {
                        name: name.to_string(),
                        escape: false,
                    });
                }
                _ => {
                    current(&mut stack, &mut toplevel).push(Token::Variable {
                        name: name.to_string(),
                        escape: true,
                    });
                }
            }
        }

        if let Some(open) = stack.pop() {
            return Err(TokenizeError::UnclosedSection {
                name: open.name,
                offset: open.offset,
            });
        }
        Ok(toplevel)
    }
}
