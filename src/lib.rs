//! A single-pass compiler from Jack source to a stack-machine VM language.
//!
//! Tokenizing, symbol resolution, and VM emission all happen in one
//! recursive-descent pass over the token stream; there is no separate AST.

pub mod compile;
pub mod error;
pub mod parser;
pub mod sink;
pub mod symtab;
pub mod token;
