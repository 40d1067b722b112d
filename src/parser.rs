//! Recursive-descent parser producing the source AST.
//!
//! The grammar is fully prefix and parenthesised, so one token of lookahead
//! is enough and the parser never backtracks:
//!
//! ```text
//! program    = token*
//! token      = number | string | expression
//! expression = "(" name token* ")"
//! ```

use tracing::debug;

use crate::error::{CompileResult, UnexpectedEndOfInputSnafu, UnexpectedTokenSnafu};
use crate::tokenizer::{Token, TokenKind};

/// Source tree, shaped after the s-expression language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
  Program { body: Vec<AstNode> },
  CallExpression { name: String, params: Vec<AstNode> },
  NumberLiteral { value: String },
  StringLiteral { value: String },
}

impl AstNode {
  pub fn program(body: Vec<AstNode>) -> Self {
    Self::Program { body }
  }

  pub fn call(name: impl Into<String>, params: Vec<AstNode>) -> Self {
    Self::CallExpression {
      name: name.into(),
      params,
    }
  }

  pub fn number(value: impl Into<String>) -> Self {
    Self::NumberLiteral {
      value: value.into(),
    }
  }

  pub fn string(value: impl Into<String>) -> Self {
    Self::StringLiteral {
      value: value.into(),
    }
  }

  /// Name of the variant, as used in diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      AstNode::Program { .. } => "Program",
      AstNode::CallExpression { .. } => "CallExpression",
      AstNode::NumberLiteral { .. } => "NumberLiteral",
      AstNode::StringLiteral { .. } => "StringLiteral",
    }
  }
}

/// Parse the whole token sequence into a `Program` node.
pub fn parse(tokens: Vec<Token>) -> CompileResult<AstNode> {
  let mut stream = TokenStream::new(tokens);
  let mut body = Vec::new();

  while !stream.is_eof() {
    body.push(parse_token(&mut stream)?);
  }

  debug!(statements = body.len(), "parsed program");
  Ok(AstNode::program(body))
}

fn parse_token(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let token = stream.next_or("an expression")?;
  match token.kind {
    TokenKind::Number => Ok(AstNode::number(token.text)),
    TokenKind::String => Ok(AstNode::string(token.text)),
    TokenKind::OpenParen => parse_expression(stream),
    TokenKind::CloseParen | TokenKind::Name => UnexpectedTokenSnafu {
      kind: token.kind,
      text: token.text,
    }
    .fail(),
  }
}

/// Parse the remainder of a call after its opening paren.
fn parse_expression(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let head = stream.next_or("a call expression")?;
  if head.kind != TokenKind::Name {
    return UnexpectedTokenSnafu {
      kind: head.kind,
      text: head.text,
    }
    .fail();
  }

  let mut params = Vec::new();
  loop {
    match stream.peek().map(|token| token.kind) {
      Some(TokenKind::CloseParen) => {
        stream.advance();
        break;
      }
      Some(_) => params.push(parse_token(stream)?),
      None => {
        return UnexpectedEndOfInputSnafu {
          expected: "a call expression",
        }
        .fail();
      }
    }
  }

  Ok(AstNode::call(head.text, params))
}

/// Lightweight cursor over the token vector.
struct TokenStream {
  tokens: std::vec::IntoIter<Token>,
  lookahead: Option<Token>,
}

impl TokenStream {
  fn new(tokens: Vec<Token>) -> Self {
    let mut tokens = tokens.into_iter();
    let lookahead = tokens.next();
    Self { tokens, lookahead }
  }

  fn peek(&self) -> Option<&Token> {
    self.lookahead.as_ref()
  }

  /// Take the current token and move the lookahead forward.
  fn advance(&mut self) -> Option<Token> {
    std::mem::replace(&mut self.lookahead, self.tokens.next())
  }

  /// Like [`advance`](Self::advance) but running off the end is an error.
  fn next_or(&mut self, expected: &'static str) -> CompileResult<Token> {
    match self.advance() {
      Some(token) => Ok(token),
      None => UnexpectedEndOfInputSnafu { expected }.fail(),
    }
  }

  fn is_eof(&self) -> bool {
    self.lookahead.is_none()
  }
}
