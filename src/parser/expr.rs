use super::stmt::segment_for;
use super::Parser;
use crate::error::{Error, Result};
use crate::sink::{Command, Segment};
use crate::token::TokenKind;

impl Parser {
  /// `expression := term (op term)*`. The grammar is flat: every operator
  /// has equal precedence and associates left-to-right.
  pub(super) fn expression(&mut self) -> Result<()> {
    self.term()?;
    while let Some(op) = self.current_binop() {
      self.tokens.advance();
      self.term()?;
      self.emit_binop(op);
    }
    Ok(())
  }

  fn current_binop(&self) -> Option<TokenKind> {
    let kind = self.current().kind;
    matches!(
      kind,
      TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Amp
        | TokenKind::Pipe
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::Eq
    )
    .then_some(kind)
  }

  fn emit_binop(&mut self, op: TokenKind) {
    match op {
      TokenKind::Plus => self.sink.arith(Command::Add),
      TokenKind::Minus => self.sink.arith(Command::Sub),
      TokenKind::Amp => self.sink.arith(Command::And),
      TokenKind::Pipe => self.sink.arith(Command::Or),
      TokenKind::Lt => self.sink.arith(Command::Lt),
      TokenKind::Gt => self.sink.arith(Command::Gt),
      TokenKind::Eq => self.sink.arith(Command::Eq),
      TokenKind::Star => self.sink.call("Math.multiply", 2),
      TokenKind::Slash => self.sink.call("Math.divide", 2),
      _ => unreachable!("current_binop only returns operator kinds"),
    }
  }

  fn term(&mut self) -> Result<()> {
    let tok = self.current().clone();
    match tok.kind {
      TokenKind::IntConst => {
        self.tokens.advance();
        let n: usize = tok
          .text
          .parse()
          .map_err(|_| Error::lex(format!("invalid integer literal `{}`", tok.text), tok.span))?;
        self.sink.push(Segment::Constant, n);
      }
      TokenKind::StringConst => {
        self.tokens.advance();
        self.sink.push(Segment::Constant, tok.text.chars().count());
        self.sink.call("String.new", 1);
        for c in tok.text.chars() {
          self.sink.push(Segment::Constant, c as usize);
          self.sink.call("String.appendChar", 2);
        }
      }
      TokenKind::True => {
        self.tokens.advance();
        self.sink.push(Segment::Constant, 0);
        self.sink.arith(Command::Not);
      }
      TokenKind::False | TokenKind::Null => {
        self.tokens.advance();
        self.sink.push(Segment::Constant, 0);
      }
      TokenKind::This => {
        self.tokens.advance();
        self.sink.push(Segment::Pointer, 0);
      }
      TokenKind::LParen => {
        self.tokens.advance();
        self.expression()?;
        self.expect(TokenKind::RParen)?;
      }
      TokenKind::Minus => {
        self.tokens.advance();
        self.term()?;
        self.sink.arith(Command::Neg);
      }
      TokenKind::Tilde => {
        self.tokens.advance();
        self.term()?;
        self.sink.arith(Command::Not);
      }
      TokenKind::Identifier => self.identifier_term(tok.span)?,
      _ => {
        return Err(Error::parse(
          format!("expected an expression, found `{}`", tok.text_or_kind()),
          tok.span,
        ))
      }
    }
    Ok(())
  }

  /// Disambiguates an identifier term by looking one token past it:
  /// `[` is array access, `(`/`.` is a call, anything else is a plain
  /// variable read.
  fn identifier_term(&mut self, span: span::Span) -> Result<()> {
    match self.peek_next().map(|t| t.kind) {
      Some(TokenKind::LBracket) => {
        let name = self.expect_identifier()?;
        let (kind, index) = self.resolve_variable(&name, span)?;
        self.sink.push(segment_for(kind), index);
        self.expect(TokenKind::LBracket)?;
        self.expression()?;
        self.expect(TokenKind::RBracket)?;
        self.sink.arith(Command::Add);
        self.sink.pop(Segment::Pointer, 1);
        self.sink.push(Segment::That, 0);
        Ok(())
      }
      Some(TokenKind::LParen) | Some(TokenKind::Dot) => self.subroutine_call(),
      _ => {
        let name = self.expect_identifier()?;
        let (kind, index) = self.resolve_variable(&name, span)?;
        self.sink.push(segment_for(kind), index);
        Ok(())
      }
    }
  }

  /// A call is written `f(args)` or `X.f(args)`. `X` is a variable if it
  /// resolves in the symbol table (its value is pushed as the receiver
  /// and the argument count bumped by one); otherwise it names a class.
  /// A bare `f(args)` is a method call on the current object.
  pub(super) fn subroutine_call(&mut self) -> Result<()> {
    let name = self.expect_identifier()?;

    if self.bump_if(TokenKind::Dot) {
      let member = self.expect_identifier()?;
      self.expect(TokenKind::LParen)?;
      if let Some(kind) = self.symtab.kind_of(&name) {
        let index = self.symtab.index_of(&name).expect("kind_of implies index_of");
        let ty = self
          .symtab
          .type_of(&name)
          .expect("kind_of implies type_of")
          .to_string();
        self.sink.push(segment_for(kind), index);
        let n_args = self.expression_list()?;
        self.expect(TokenKind::RParen)?;
        self.sink.call(&format!("{ty}.{member}"), n_args + 1);
      } else {
        let n_args = self.expression_list()?;
        self.expect(TokenKind::RParen)?;
        self.sink.call(&format!("{name}.{member}"), n_args);
      }
    } else {
      self.expect(TokenKind::LParen)?;
      self.sink.push(Segment::Pointer, 0);
      let n_args = self.expression_list()?;
      self.expect(TokenKind::RParen)?;
      self
        .sink
        .call(&format!("{}.{}", self.class_name, name), n_args + 1);
    }
    Ok(())
  }

  /// Compiles a comma-separated list of expressions, returning how many
  /// were compiled.
  fn expression_list(&mut self) -> Result<usize> {
    if self.check(TokenKind::RParen) {
      return Ok(0);
    }
    self.expression()?;
    let mut n = 1;
    while self.bump_if(TokenKind::Comma) {
      self.expression()?;
      n += 1;
    }
    Ok(n)
  }
}
