//! Crate root: wires together the compilation pipeline.
//!
//! - `tokenizer` performs lexical analysis and produces a flat token vector.
//! - `cursor` walks that vector forward for the generator.
//! - `codegen` parses and emits x86-64 assembly in a single pass.
//! - `error` holds the diagnostic type and the fatal reporting funnel.

pub mod codegen;
pub mod cursor;
pub mod error;
pub mod tokenizer;

pub use codegen::Syntax;
pub use error::{CompileError, CompileResult};

/// Compile an additive expression into assembly text.
pub fn generate_assembly(expr: &str, syntax: Syntax) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(expr)?;
  codegen::generate(&tokens, expr, syntax)
}
