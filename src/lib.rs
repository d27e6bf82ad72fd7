pub mod ast;
pub mod codegen;
pub mod error;
pub mod runtime;
pub mod tokenizer;
