//! The VM instruction sink: an append-only text buffer with one typed emit
//! operation per VM instruction shape. Nothing here knows about Jack.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
  Constant,
  Argument,
  Local,
  Static,
  This,
  That,
  Pointer,
  Temp,
}

impl fmt::Display for Segment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Segment::Constant => "constant",
      Segment::Argument => "argument",
      Segment::Local => "local",
      Segment::Static => "static",
      Segment::This => "this",
      Segment::That => "that",
      Segment::Pointer => "pointer",
      Segment::Temp => "temp",
    };
    write!(f, "{s}")
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
  Add,
  Sub,
  Neg,
  Eq,
  Gt,
  Lt,
  And,
  Or,
  Not,
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Command::Add => "add",
      Command::Sub => "sub",
      Command::Neg => "neg",
      Command::Eq => "eq",
      Command::Gt => "gt",
      Command::Lt => "lt",
      Command::And => "and",
      Command::Or => "or",
      Command::Not => "not",
    };
    write!(f, "{s}")
  }
}

#[derive(Default)]
pub struct Sink {
  buf: String,
}

impl Sink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, seg: Segment, index: usize) {
    self.line(format_args!("push {seg} {index}"));
  }

  pub fn pop(&mut self, seg: Segment, index: usize) {
    self.line(format_args!("pop {seg} {index}"));
  }

  pub fn arith(&mut self, cmd: Command) {
    self.line(format_args!("{cmd}"));
  }

  pub fn label(&mut self, name: &str) {
    self.line(format_args!("label {name}"));
  }

  pub fn goto(&mut self, name: &str) {
    self.line(format_args!("goto {name}"));
  }

  pub fn if_goto(&mut self, name: &str) {
    self.line(format_args!("if-goto {name}"));
  }

  pub fn call(&mut self, name: &str, n_args: usize) {
    self.line(format_args!("call {name} {n_args}"));
  }

  pub fn function(&mut self, name: &str, n_locals: usize) {
    self.line(format_args!("function {name} {n_locals}"));
  }

  pub fn ret(&mut self) {
    self.line(format_args!("return"));
  }

  fn line(&mut self, args: fmt::Arguments<'_>) {
    use std::fmt::Write;
    writeln!(self.buf, "{args}").expect("writing to an in-memory String cannot fail");
  }

  pub fn as_str(&self) -> &str {
    &self.buf
  }

  pub fn flush(&self, path: &Path) -> Result<()> {
    fs::write(path, &self.buf).map_err(|e| Error::io(path, e))
  }
}
