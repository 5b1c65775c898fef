//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer is intentionally tiny: it recognises the two additive
//! operators and decimal literals, skips whitespace, and rejects anything
//! else. Digit runs are consumed with maximal munch.

use snafu::ResultExt;
use tracing::{debug, trace};

use crate::error::{CompileResult, InvalidNumberSnafu, UnrecognizedCharacterSnafu};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Operator,
  Num,
  Eof,
}

/// Payload carried by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
  Operator(char),
  Num(i32),
  Eof,
}

/// A lexeme plus the span of source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub lexeme: Lexeme,
  pub loc: usize,
  pub len: usize,
}

impl Token {
  pub fn new(lexeme: Lexeme, loc: usize, len: usize) -> Self {
    Self { lexeme, loc, len }
  }

  pub fn kind(&self) -> TokenKind {
    match self.lexeme {
      Lexeme::Operator(_) => TokenKind::Operator,
      Lexeme::Num(_) => TokenKind::Num,
      Lexeme::Eof => TokenKind::Eof,
    }
  }

  /// Return the slice from the source that produced this token.
  pub fn text<'a>(&self, source: &'a str) -> &'a str {
    source.get(self.loc..self.loc + self.len).unwrap_or("")
  }
}

/// C `isspace`: ASCII whitespace plus vertical tab.
fn is_space(c: u8) -> bool {
  c.is_ascii_whitespace() || c == b'\x0b'
}

/// Lex the input into a flat vector of tokens terminated by an `Eof` marker.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let bytes = input.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];
    if is_space(c) {
      i += 1;
      continue;
    }

    if c == b'+' || c == b'-' {
      tokens.push(Token::new(Lexeme::Operator(char::from(c)), i, 1));
      i += 1;
      continue;
    }

    if c.is_ascii_digit() {
      let start = i;
      while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
      }
      let value = input[start..i].parse::<i32>().context(InvalidNumberSnafu {
        expr: input,
        loc: start,
      })?;
      tokens.push(Token::new(Lexeme::Num(value), start, i - start));
      continue;
    }

    // Everything before `i` was ASCII, so `i` sits on a char boundary.
    let ch = input[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
    return UnrecognizedCharacterSnafu {
      expr: input,
      loc: i,
      ch,
    }
    .fail();
  }

  tokens.push(Token::new(Lexeme::Eof, input.len(), 0));

  for token in &tokens {
    trace!(lexeme = ?token.lexeme, loc = token.loc, "token");
  }
  debug!(count = tokens.len(), "tokenized input");

  Ok(tokens)
}

/// Human-friendly description used in diagnostics.
pub fn describe_token(token: Option<&Token>, source: &str) -> String {
  match token {
    Some(t) => match t.kind() {
      TokenKind::Eof => "EOF".to_string(),
      _ => t.text(source).to_string(),
    },
    None => "EOF".to_string(),
  }
}
