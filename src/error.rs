//! Shared error type for every stage of the compilation pipeline.
//!
//! Each variant maps to exactly one failure kind and carries the context
//! needed to diagnose it. All errors abort the current compile call; no stage
//! attempts to recover.

use snafu::Snafu;

use crate::tokenizer::TokenKind;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  #[snafu(display("unrecognized character '{character}'"))]
  UnrecognizedCharacter { character: char },

  #[snafu(display("unterminated string literal \"{content}"))]
  UnterminatedString { content: String },

  #[snafu(display("unexpected {kind} token \"{text}\""))]
  UnexpectedToken { kind: TokenKind, text: String },

  #[snafu(display("unexpected end of input while parsing {expected}"))]
  UnexpectedEndOfInput { expected: &'static str },

  #[snafu(display("internal error: {kind} node is not allowed in {context}"))]
  InvariantViolation {
    kind: &'static str,
    context: &'static str,
  },

  #[snafu(display("failed to read input: {source}"))]
  ReadInput { source: std::io::Error },
}
