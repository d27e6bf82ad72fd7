use crate::ast::{Token, TokenKind};
use crate::runtime;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("no code generation rule for token kind {0:?}")]
    UnsupportedToken(TokenKind),
    #[error("failed to encode string literal: {0}")]
    StringEncoding(#[from] serde_json::Error),
}

/// Knobs for the generated code.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// When enabled, iterating a section over keyed records pushes a shallow
    /// copy of each record with its zero-based position attached under
    /// `__it`, instead of pushing the caller's record untouched. Off by
    /// default: the attachment is a reserved-name convention, and the copy
    /// keeps caller-owned data unmodified.
    pub attach_index: bool,
}

/// Compiles a token tree into a self-contained JavaScript rendering function.
///
/// The compiler is stateless across calls; each [`compile`](Compiler::compile)
/// is a single depth-first pass over the borrowed tree.
pub struct Compiler {
    options: CompileOptions,
}

type Handler = fn(&Compiler, &Token, &mut String) -> Result<(), CodeGenError>;

/// Process-wide dispatch table from token kind to generation rule. Built
/// once, read-only thereafter.
fn dispatch_table() -> &'static HashMap<TokenKind, Handler> {
    static TABLE: OnceLock<HashMap<TokenKind, Handler>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: HashMap<TokenKind, Handler> = HashMap::new();
        table.insert(TokenKind::Content, Compiler::emit_content);
        table.insert(TokenKind::Variable, Compiler::emit_variable);
        table.insert(TokenKind::Section, Compiler::emit_section);
        table.insert(TokenKind::InvertedSection, Compiler::emit_inverted_section);
        table.insert(TokenKind::Partial, Compiler::emit_partial);
        table
    })
}

/// Encodes `text` as a JavaScript string literal. JSON escaping covers
/// quotes and control characters; U+2028/U+2029 are escaped on top because
/// JSON permits them raw in strings while JavaScript literals do not.
fn js_string(text: &str) -> Result<String, CodeGenError> {
    let literal = serde_json::to_string(text)?;
    Ok(literal
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compiles `tokens` into one complete `function(context) { ... }`
    /// source text: runtime routines, generated statements and the buffer
    /// return, with no free identifiers besides the parameter.
    pub fn compile(&self, tokens: &[Token]) -> Result<String, CodeGenError> {
        let body = self.emit(tokens)?;
        Ok(self.assemble(&body))
    }

    /// Compiles `tokens` into the bare statement text, without the function
    /// wrapper or runtime routines.
    pub fn emit(&self, tokens: &[Token]) -> Result<String, CodeGenError> {
        let mut out = String::new();
        self.emit_sequence(tokens, &mut out)?;
        Ok(out)
    }

    fn emit_sequence(&self, tokens: &[Token], out: &mut String) -> Result<(), CodeGenError> {
        for token in tokens {
            let handler = dispatch_table()
                .get(&token.kind())
                .ok_or(CodeGenError::UnsupportedToken(token.kind()))?;
            handler(self, token, out)?;
        }
        Ok(())
    }

    fn emit_content(&self, token: &Token, out: &mut String) -> Result<(), CodeGenError> {
        let Token::Content(text) = token else {
            return Err(CodeGenError::UnsupportedToken(token.kind()));
        };
        out.push_str(&format!("buf += {};\n", js_string(text)?));
        Ok(())
    }

    fn emit_variable(&self, token: &Token, out: &mut String) -> Result<(), CodeGenError> {
        let Token::Variable { name, escape } = token else {
            return Err(CodeGenError::UnsupportedToken(token.kind()));
        };
        // `.` means "the current iteration value" and is resolved through
        // the reserved alias, never looked up by its literal spelling.
        let name = if name == "." {
            runtime::CURRENT_ALIAS
        } else {
            name.as_str()
        };
        let quoted = js_string(name)?;
        if *escape {
            out.push_str(&format!("buf += __escape(__get(stack, {quoted}));\n"));
        } else {
            out.push_str(&format!("buf += __get(stack, {quoted});\n"));
        }
        Ok(())
    }

    fn emit_section(&self, token: &Token, out: &mut String) -> Result<(), CodeGenError> {
        let Token::Section { name, body } = token else {
            return Err(CodeGenError::UnsupportedToken(token.kind()));
        };
        let quoted = js_string(name)?;
        let body_code = self.emit(body)?;
        let push = if self.options.attach_index {
            "__enter(stack, __val, __it);"
        } else {
            "stack.push(__val);"
        };
        // An IIFE keeps `section` and `body` from leaking into sibling or
        // enclosing generated code.
        out.push_str(&format!(
            "(function() {{\n\
             var section = __get(stack, {quoted});\n\
             var body = function() {{\n\
             {body_code}}};\n\
             if (section) {{\n\
             if (__isArray(section)) {{\n\
             __each(section, function(__val, __it) {{\n\
             {push}\n\
             body();\n\
             stack.pop();\n\
             }});\n\
             }} else {{\n\
             stack.push(section);\n\
             body();\n\
             stack.pop();\n\
             }}\n\
             }}\n\
             }})();\n"
        ));
        Ok(())
    }

    fn emit_inverted_section(&self, token: &Token, out: &mut String) -> Result<(), CodeGenError> {
        let Token::InvertedSection { name, body } = token else {
            return Err(CodeGenError::UnsupportedToken(token.kind()));
        };
        let quoted = js_string(name)?;
        let body_code = self.emit(body)?;
        // The body runs against the unchanged stack: nothing is pushed for
        // a falsy value.
        out.push_str(&format!("if (!__get(stack, {quoted})) {{\n{body_code}}}\n"));
        Ok(())
    }

    fn emit_partial(&self, token: &Token, out: &mut String) -> Result<(), CodeGenError> {
        let Token::Partial { body } = token else {
            return Err(CodeGenError::UnsupportedToken(token.kind()));
        };
        // Textual inclusion: the partial's compiled body is spliced in
        // place, with no callable indirection.
        self.emit_sequence(body, out)
    }

    /// Wraps emitted statements into one complete function literal.
    fn assemble(&self, body_code: &str) -> String {
        let mut js = String::new();
        js.push_str("function(context) {\n");
        js.push_str("var stack = [], buf = \"\";\n");
        js.push_str("stack.push(context);\n");
        js.push_str(&runtime::prelude(self.options.attach_index));
        js.push('\n');
        js.push_str(body_code);
        js.push_str("return buf;\n}");
        js
    }
}
