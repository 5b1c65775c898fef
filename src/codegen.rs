//! Code generation: parse and emit in a single pass.
//!
//! There is no AST. The generator walks the grammar
//! `Number (("+" | "-") Number)*` with a small state machine and appends one
//! instruction per grammar element. The running value lives in `rax`, which is
//! also the return register of `main`.

use clap::ValueEnum;
use tracing::{debug, trace};

use crate::cursor::TokenCursor;
use crate::error::CompileResult;
use crate::tokenizer::Token;

/// Assembler dialect of the emitted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Syntax {
  /// `.intel_syntax noprefix`, destination first.
  #[default]
  Intel,
  /// GNU as default, source first with `$`/`%` sigils.
  Att,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  ExpectLeadingNumber,
  ExpectOperatorOrEnd,
  Terminal,
}

#[derive(Debug, Clone, Copy)]
enum Instr {
  Load(i32),
  Add(i32),
  Sub(i32),
  Ret,
}

struct CodeGenerator {
  syntax: Syntax,
  asm: String,
}

impl CodeGenerator {
  fn new(syntax: Syntax) -> Self {
    let mut generator = Self {
      syntax,
      asm: String::new(),
    };
    generator.header();
    generator
  }

  fn header(&mut self) {
    if self.syntax == Syntax::Intel {
      self.asm.push_str(".intel_syntax noprefix\n");
    }
    self.asm.push_str(".global main\n");
    self.asm.push_str("main:\n");
  }

  fn emit(&mut self, instr: Instr) {
    trace!(?instr, "emit");
    let (mnemonic, imm) = match instr {
      Instr::Load(value) => ("mov", value),
      Instr::Add(value) => ("add", value),
      Instr::Sub(value) => ("sub", value),
      Instr::Ret => {
        self.asm.push_str("    ret\n");
        return;
      }
    };
    let line = match self.syntax {
      Syntax::Intel => format!("    {mnemonic} rax, {imm}\n"),
      Syntax::Att => format!("    {mnemonic} ${imm}, %rax\n"),
    };
    self.asm.push_str(&line);
  }

  fn run(mut self, cursor: &mut TokenCursor<'_>) -> CompileResult<String> {
    let mut state = State::ExpectLeadingNumber;

    while state != State::Terminal {
      state = match state {
        State::ExpectLeadingNumber => {
          let value = cursor.expect_number()?;
          self.emit(Instr::Load(value));
          State::ExpectOperatorOrEnd
        }
        State::ExpectOperatorOrEnd if cursor.at_end() => State::Terminal,
        State::ExpectOperatorOrEnd => {
          if cursor.consume_if_operator('+') {
            let value = cursor.expect_number()?;
            self.emit(Instr::Add(value));
          } else {
            // Anything that is not `+` is reported as a missing `-`.
            cursor.expect_operator('-')?;
            let value = cursor.expect_number()?;
            self.emit(Instr::Sub(value));
          }
          State::ExpectOperatorOrEnd
        }
        State::Terminal => State::Terminal,
      };
    }

    self.emit(Instr::Ret);
    Ok(self.asm)
  }
}

/// Emit assembly for the expression held in `tokens`.
///
/// The whole program is buffered, so a grammar error never leaves partial
/// assembly behind.
pub fn generate(tokens: &[Token], source: &str, syntax: Syntax) -> CompileResult<String> {
  let mut cursor = TokenCursor::new(tokens, source);
  let asm = CodeGenerator::new(syntax).run(&mut cursor)?;
  debug!(?syntax, consumed = cursor.position(), "generated assembly");
  Ok(asm)
}
