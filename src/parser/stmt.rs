use super::Parser;
use crate::error::{Error, Result};
use crate::sink::{Command, Segment};
use crate::symtab::StorageKind;
use crate::token::TokenKind;

impl Parser {
  /// Zero or more of `let | if | while | do | return`.
  fn is_statement_start(&self) -> bool {
    matches!(
      self.current().kind,
      TokenKind::Let | TokenKind::If | TokenKind::While | TokenKind::Do | TokenKind::Return
    )
  }

  pub(super) fn statements(&mut self) -> Result<()> {
    while self.is_statement_start() {
      self.statement()?;
    }
    Ok(())
  }

  fn statement(&mut self) -> Result<()> {
    match self.current().kind {
      TokenKind::Let => self.let_statement(),
      TokenKind::If => self.if_statement(),
      TokenKind::While => self.while_statement(),
      TokenKind::Do => self.do_statement(),
      TokenKind::Return => self.return_statement(),
      _ => {
        let tok = self.current().clone();
        Err(Error::parse(
          format!("expected a statement, found `{}`", tok.text_or_kind()),
          tok.span,
        ))
      }
    }
  }

  /// `let name ([ expr ])? = expr ;`
  fn let_statement(&mut self) -> Result<()> {
    self.expect(TokenKind::Let)?;
    let name_tok = self.current().clone();
    let name = self.expect_identifier()?;

    if self.bump_if(TokenKind::LBracket) {
      let (kind, index) = self.resolve_variable(&name, name_tok.span)?;
      self.sink.push(segment_for(kind), index);
      self.expression()?;
      self.expect(TokenKind::RBracket)?;
      self.sink.arith(Command::Add);

      self.expect(TokenKind::Eq)?;
      self.expression()?;
      self.expect(TokenKind::Semicolon)?;

      // RHS is stashed in `temp 0` before `THAT` is reseated, so a
      // nested array subscript on the RHS cannot corrupt it mid-store.
      self.sink.pop(Segment::Temp, 0);
      self.sink.pop(Segment::Pointer, 1);
      self.sink.push(Segment::Temp, 0);
      self.sink.pop(Segment::That, 0);
    } else {
      self.expect(TokenKind::Eq)?;
      self.expression()?;
      self.expect(TokenKind::Semicolon)?;
      let (kind, index) = self.resolve_variable(&name, name_tok.span)?;
      self.sink.pop(segment_for(kind), index);
    }
    Ok(())
  }

  /// `while ( cond ) { body }`
  fn while_statement(&mut self) -> Result<()> {
    self.expect(TokenKind::While)?;
    let k = self.next_label();
    let top = format!("WHILE_EXP{k}");
    let end = format!("WHILE_END{k}");

    self.sink.label(&top);
    self.expect(TokenKind::LParen)?;
    self.expression()?;
    self.expect(TokenKind::RParen)?;
    self.sink.arith(Command::Not);
    self.sink.if_goto(&end);

    self.expect(TokenKind::LBrace)?;
    self.statements()?;
    self.expect(TokenKind::RBrace)?;
    self.sink.goto(&top);
    self.sink.label(&end);
    Ok(())
  }

  /// `if ( cond ) { then } (else { else })?`
  fn if_statement(&mut self) -> Result<()> {
    self.expect(TokenKind::If)?;
    let k = self.next_label();
    let l_true = format!("IF_TRUE{k}");
    let l_false = format!("IF_FALSE{k}");
    let l_end = format!("IF_END{k}");

    self.expect(TokenKind::LParen)?;
    self.expression()?;
    self.expect(TokenKind::RParen)?;
    self.sink.if_goto(&l_true);
    self.sink.goto(&l_false);
    self.sink.label(&l_true);

    self.expect(TokenKind::LBrace)?;
    self.statements()?;
    self.expect(TokenKind::RBrace)?;
    self.sink.goto(&l_end);
    self.sink.label(&l_false);

    if self.bump_if(TokenKind::Else) {
      self.expect(TokenKind::LBrace)?;
      self.statements()?;
      self.expect(TokenKind::RBrace)?;
    }
    self.sink.label(&l_end);
    Ok(())
  }

  /// `do subroutineCall ;`
  fn do_statement(&mut self) -> Result<()> {
    self.expect(TokenKind::Do)?;
    self.subroutine_call()?;
    self.expect(TokenKind::Semicolon)?;
    self.sink.pop(Segment::Temp, 0);
    Ok(())
  }

  /// `return expr? ;`
  fn return_statement(&mut self) -> Result<()> {
    self.expect(TokenKind::Return)?;
    if !self.check(TokenKind::Semicolon) {
      self.expression()?;
    } else {
      self.sink.push(Segment::Constant, 0);
    }
    self.expect(TokenKind::Semicolon)?;
    self.sink.ret();
    Ok(())
  }

  /// Resolves `name` through the symbol table, aborting with
  /// `UnknownIdentifierError` instead of emitting a placeholder.
  pub(super) fn resolve_variable(
    &self,
    name: &str,
    span: span::Span,
  ) -> Result<(StorageKind, usize)> {
    match (self.symtab.kind_of(name), self.symtab.index_of(name)) {
      (Some(kind), Some(index)) => Ok((kind, index)),
      _ => Err(Error::unknown_identifier(name, span)),
    }
  }
}

pub(super) fn segment_for(kind: StorageKind) -> Segment {
  match kind {
    StorageKind::Static => Segment::Static,
    StorageKind::This => Segment::This,
    StorageKind::Argument => Segment::Argument,
    StorageKind::Local => Segment::Local,
  }
}
