//! Crate root: wires together the compilation pipeline.
//!
//! Text flows through four stages, each a plain function of the previous
//! stage's output:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` builds the s-expression shaped source AST.
//! - `transformer` rewrites it into the call-expression shaped target AST.
//! - `codegen` renders the target AST back to source text.
//!
//! `error` holds the error type shared by all of them and `printer` is a
//! debugging aid for looking at target trees.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod printer;
pub mod tokenizer;
pub mod transformer;

use std::io::Read;

use snafu::ResultExt;
use tracing::debug;

pub use error::{CompileError, CompileResult};
pub use parser::AstNode;
pub use tokenizer::{Lexer, Matcher, Token, TokenKind};
pub use transformer::{Identifier, TargetNode};

/// Every intermediate product of one compile call.
#[derive(Debug, Clone)]
pub struct Compilation {
  pub tokens: Vec<Token>,
  pub program: AstNode,
  pub target: TargetNode,
  pub output: String,
}

/// The four-stage pipeline with its lexer configuration.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
  lexer: Lexer,
}

impl Compiler {
  pub fn new(lexer: Lexer) -> Self {
    Self { lexer }
  }

  /// Run all stages and keep what each of them produced.
  pub fn run(&self, input: &str) -> CompileResult<Compilation> {
    debug!(bytes = input.len(), "compiling");
    let tokens = self.lexer.tokenize(input)?;
    let program = parser::parse(tokens.clone())?;
    let target = transformer::transform(&program)?;
    let output = codegen::generate(&target)?;
    Ok(Compilation {
      tokens,
      program,
      target,
      output,
    })
  }

  pub fn compile(&self, input: &str) -> CompileResult<String> {
    self.run(input).map(|compilation| compilation.output)
  }
}

/// Compile s-expression source into call-expression source, one statement
/// per line.
///
/// Parsing, transformation and rendering recurse once per nesting level, so
/// extremely deep input can exhaust the stack of the calling thread.
pub fn compile(input: &str) -> CompileResult<String> {
  Compiler::default().compile(input)
}

/// Read all of `reader` and compile it.
pub fn compile_reader(mut reader: impl Read) -> CompileResult<String> {
  let mut input = String::new();
  reader
    .read_to_string(&mut input)
    .context(error::ReadInputSnafu)?;
  compile(&input)
}
