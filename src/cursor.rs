//! Forward-only cursor over a token slice.
//!
//! The cursor never backtracks and never steps past the `Eof` sentinel. A
//! failed `expect_*` leaves the position untouched so the caller can report
//! the offending token.

use crate::error::{CompileResult, ExpectedNumberSnafu, UnexpectedTokenSnafu};
use crate::tokenizer::{Lexeme, Token, TokenKind, describe_token};

pub struct TokenCursor<'a> {
  tokens: &'a [Token],
  source: &'a str,
  pos: usize,
}

impl<'a> TokenCursor<'a> {
  pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  pub fn position(&self) -> usize {
    self.pos
  }

  fn current(&self) -> Option<&'a Token> {
    self.tokens.get(self.pos)
  }

  /// Location of the current token, or the end of the source once exhausted.
  fn current_loc(&self) -> usize {
    self
      .current()
      .map_or(self.source.len(), |token| token.loc)
  }

  fn advance(&mut self) {
    if !self.at_end() {
      self.pos += 1;
    }
  }

  pub fn peek_kind(&self) -> TokenKind {
    self.current().map_or(TokenKind::Eof, Token::kind)
  }

  pub fn at_end(&self) -> bool {
    self.peek_kind() == TokenKind::Eof
  }

  /// Advance past the current token if it is the operator `expected`.
  pub fn consume_if_operator(&mut self, expected: char) -> bool {
    match self.current() {
      Some(token) if token.lexeme == Lexeme::Operator(expected) => {
        self.advance();
        true
      }
      _ => false,
    }
  }

  pub fn expect_operator(&mut self, expected: char) -> CompileResult<()> {
    if self.consume_if_operator(expected) {
      return Ok(());
    }

    UnexpectedTokenSnafu {
      expr: self.source,
      loc: self.current_loc(),
      expected,
      got: describe_token(self.current(), self.source),
    }
    .fail()
  }

  pub fn expect_number(&mut self) -> CompileResult<i32> {
    if let Some(Token {
      lexeme: Lexeme::Num(value),
      ..
    }) = self.current()
    {
      let value = *value;
      self.advance();
      return Ok(value);
    }

    ExpectedNumberSnafu {
      expr: self.source,
      loc: self.current_loc(),
      got: describe_token(self.current(), self.source),
    }
    .fail()
  }
}
