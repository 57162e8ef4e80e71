use std::fmt;
use std::path::PathBuf;

use span::Span;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The single error type that crosses every component boundary in this
/// crate. No structured error objects leak out of the tokenizer, symbol
/// table, or parser beyond this.
#[derive(Debug)]
pub enum Error {
  /// A segment of source text matched none of the tokenizer's rules.
  Lex { message: String, span: Span },
  /// The current token did not match what the grammar required.
  Parse { message: String, span: Span },
  /// An identifier was used as a variable but resolves in neither
  /// symbol-table scope.
  UnknownIdentifier { name: String, span: Span },
  /// Opening, reading, or writing a file failed.
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
}

impl Error {
  pub fn lex(message: impl Into<String>, span: impl Into<Span>) -> Self {
    Error::Lex {
      message: message.into(),
      span: span.into(),
    }
  }

  pub fn parse(message: impl Into<String>, span: impl Into<Span>) -> Self {
    Error::Parse {
      message: message.into(),
      span: span.into(),
    }
  }

  pub fn unknown_identifier(name: impl Into<String>, span: impl Into<Span>) -> Self {
    Error::UnknownIdentifier {
      name: name.into(),
      span: span.into(),
    }
  }

  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Error::Io {
      path: path.into(),
      source,
    }
  }

  /// Render this error as a one-shot diagnostic report. `source` and
  /// `file_name` are needed to carve out the snippet the span points at;
  /// IO errors have no meaningful span and render as a plain message.
  pub fn report(&self, source: &str, file_name: &str) -> String {
    use diag::{Report, Source};

    match self {
      Error::Lex { message, span } => Report::error()
        .source(Source::file(file_name.to_string(), source.to_string()))
        .message(message.clone())
        .span(*span)
        .build()
        .emit_to_string()
        .unwrap_or_else(|_| format!("error: {message}")),
      Error::Parse { message, span } => Report::error()
        .source(Source::file(file_name.to_string(), source.to_string()))
        .message(message.clone())
        .span(*span)
        .build()
        .emit_to_string()
        .unwrap_or_else(|_| format!("error: {message}")),
      Error::UnknownIdentifier { name, span } => Report::error()
        .source(Source::file(file_name.to_string(), source.to_string()))
        .message(format!("unknown identifier `{name}`"))
        .span(*span)
        .build()
        .emit_to_string()
        .unwrap_or_else(|_| format!("error: unknown identifier `{name}`")),
      Error::Io { path, source } => {
        format!("error: {}: {source}", path.display())
      }
    }
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::Lex { message, .. } => write!(f, "lex error: {message}"),
      Error::Parse { message, .. } => write!(f, "parse error: {message}"),
      Error::UnknownIdentifier { name, .. } => write!(f, "unknown identifier `{name}`"),
      Error::Io { path, source } => write!(f, "io error: {}: {source}", path.display()),
    }
  }
}

impl std::error::Error for Error {}
