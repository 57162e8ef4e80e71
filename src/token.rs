//! Lexical tokenizer: turns raw Jack source into an ordered token sequence
//! with a one-ahead-peekable cursor. Comments are stripped as skip rules in
//! the token matcher rather than in a separate text-rewriting pass.

#![allow(non_camel_case_types)]

use logos::Logos;
use span::Span;

use crate::error::{Error, Result};

/// The coarse category a token belongs to, per the source data model.
/// Most of the grammar only cares about this; `TokenKind` exists so that
/// exact-lexeme dispatch (keywords, symbols) is a type-level match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
  Keyword,
  Symbol,
  IntConst,
  StringConst,
  Identifier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Logos)]
pub enum TokenKind {
  #[token("class")]
  Class,
  #[token("constructor")]
  Constructor,
  #[token("function")]
  Function,
  #[token("method")]
  Method,
  #[token("field")]
  Field,
  #[token("static")]
  Static,
  #[token("var")]
  Var,
  #[token("int")]
  Int,
  #[token("char")]
  Char,
  #[token("boolean")]
  Boolean,
  #[token("void")]
  Void,
  #[token("true")]
  True,
  #[token("false")]
  False,
  #[token("null")]
  Null,
  #[token("this")]
  This,
  #[token("let")]
  Let,
  #[token("do")]
  Do,
  #[token("if")]
  If,
  #[token("else")]
  Else,
  #[token("while")]
  While,
  #[token("return")]
  Return,

  #[token("{")]
  LBrace,
  #[token("}")]
  RBrace,
  #[token("(")]
  LParen,
  #[token(")")]
  RParen,
  #[token("[")]
  LBracket,
  #[token("]")]
  RBracket,
  #[token(".")]
  Dot,
  #[token(",")]
  Comma,
  #[token(";")]
  Semicolon,
  #[token("+")]
  Plus,
  #[token("-")]
  Minus,
  #[token("*")]
  Star,
  #[token("/")]
  Slash,
  #[token("&")]
  Amp,
  #[token("|")]
  Pipe,
  #[token("<")]
  Lt,
  #[token(">")]
  Gt,
  #[token("=")]
  Eq,
  #[token("~")]
  Tilde,

  #[regex("[0-9]+")]
  IntConst,
  #[regex(r#""[^"\n]*""#)]
  StringConst,
  // keyword `#[token]` rules take priority over this regex on equal-length
  // matches, so reserved words are classified before identifiers.
  #[regex("[A-Za-z_][A-Za-z0-9_]*")]
  Identifier,

  #[regex(r"//[^\n]*", logos::skip)]
  LineComment,
  // shortest, non-nesting match of `/* ... */`, including newlines.
  #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
  BlockComment,
  #[regex(r"[ \t\r\n]+", logos::skip)]
  Whitespace,

  #[error]
  Error,
}

impl TokenKind {
  pub fn class(self) -> Kind {
    use TokenKind::*;
    match self {
      Class | Constructor | Function | Method | Field | Static | Var | Int | Char | Boolean
      | Void | True | False | Null | This | Let | Do | If | Else | While | Return => {
        Kind::Keyword
      }
      LBrace | RBrace | LParen | RParen | LBracket | RBracket | Dot | Comma | Semicolon
      | Plus | Minus | Star | Slash | Amp | Pipe | Lt | Gt | Eq | Tilde => Kind::Symbol,
      IntConst => Kind::IntConst,
      StringConst => Kind::StringConst,
      Identifier => Kind::Identifier,
      LineComment | BlockComment | Whitespace | Error => {
        unreachable!("skip/error tokens never reach a `Token`")
      }
    }
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub kind: TokenKind,
  /// The lexeme, with the delimiting quotes stripped for `StringConst`.
  pub text: String,
  pub span: Span,
  pub line: usize,
}

impl Token {
  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}

/// The token stream: an ordered, finite sequence of [`Token`]s with an
/// O(1) cursor (`current`, `peek_next`, `advance`, `has_more`).
#[derive(Debug)]
pub struct Tokenizer {
  tokens: Vec<Token>,
  pos: usize,
  eof: Token,
}

impl Tokenizer {
  pub fn tokenize(src: &str) -> Result<Self> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(src);
    while let Some(kind) = lexer.next() {
      let lexeme = lexer.slice();
      let span: Span = lexer.span().into();
      match kind {
        TokenKind::Error => {
          return Err(Error::lex(format!("unrecognized input `{lexeme}`"), span));
        }
        TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Whitespace => {
          unreachable!("skip rules are filtered by logos before reaching `next()`")
        }
        _ => {
          let line = src[..span.start].matches('\n').count() + 1;
          let text = if kind == TokenKind::StringConst {
            lexeme[1..lexeme.len() - 1].to_string()
          } else {
            lexeme.to_string()
          };
          tokens.push(Token {
            kind,
            text,
            span,
            line,
          });
        }
      }
    }

    let eof_pos = src.len();
    let eof = Token {
      kind: TokenKind::Error,
      text: String::new(),
      span: (eof_pos..eof_pos).into(),
      line: src.matches('\n').count() + 1,
    };

    Ok(Tokenizer {
      tokens,
      pos: 0,
      eof,
    })
  }

  pub fn current(&self) -> &Token {
    self.tokens.get(self.pos).unwrap_or(&self.eof)
  }

  pub fn peek_next(&self) -> Option<&Token> {
    self.tokens.get(self.pos + 1)
  }

  pub fn advance(&mut self) {
    if self.pos < self.tokens.len() {
      self.pos += 1;
    }
  }

  pub fn has_more(&self) -> bool {
    self.pos < self.tokens.len()
  }
}
