//! AST-to-AST rewrite from the s-expression shape to the call-expression
//! shape of the output language.
//!
//! Calls in statement position are wrapped in an `ExpressionStatement`;
//! calls in argument position stay bare. Each call collects its transformed
//! arguments in its own [`OutputSlot`], which is threaded through the walk
//! instead of being stored on the source nodes.

use tracing::{debug, trace};

use crate::error::{CompileResult, InvariantViolationSnafu};
use crate::parser::AstNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
  pub name: String,
}

impl Identifier {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

/// Target tree, shaped after the call-expression language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetNode {
  Program {
    body: Vec<TargetNode>,
  },
  ExpressionStatement {
    expression: Box<TargetNode>,
  },
  CallExpression {
    callee: Identifier,
    arguments: Vec<TargetNode>,
  },
  Identifier(Identifier),
  NumberLiteral {
    value: String,
  },
  StringLiteral {
    value: String,
  },
}

impl TargetNode {
  pub fn program(body: Vec<TargetNode>) -> Self {
    Self::Program { body }
  }

  pub fn statement(expression: TargetNode) -> Self {
    Self::ExpressionStatement {
      expression: Box::new(expression),
    }
  }

  pub fn call(callee: impl Into<String>, arguments: Vec<TargetNode>) -> Self {
    Self::CallExpression {
      callee: Identifier::new(callee),
      arguments,
    }
  }

  pub fn identifier(name: impl Into<String>) -> Self {
    Self::Identifier(Identifier::new(name))
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

  pub fn kind(&self) -> &'static str {
    match self {
      TargetNode::Program { .. } => "Program",
      TargetNode::ExpressionStatement { .. } => "ExpressionStatement",
      TargetNode::CallExpression { .. } => "CallExpression",
      TargetNode::Identifier(_) => "Identifier",
      TargetNode::NumberLiteral { .. } => "NumberLiteral",
      TargetNode::StringLiteral { .. } => "StringLiteral",
    }
  }
}

/// Sequence that the closest enclosing target node is accumulating into.
#[derive(Debug, Default)]
pub struct OutputSlot {
  nodes: Vec<TargetNode>,
}

impl OutputSlot {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn append(&mut self, node: TargetNode) {
    trace!(kind = node.kind(), "append");
    self.nodes.push(node);
  }

  pub fn finish(self) -> Vec<TargetNode> {
    self.nodes
  }
}

/// Where a source node sits, which decides how a call is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
  Statement,
  Argument,
}

/// Rewrite a source `Program` into a target `Program`.
pub fn transform(program: &AstNode) -> CompileResult<TargetNode> {
  let AstNode::Program { body } = program else {
    return InvariantViolationSnafu {
      kind: program.kind(),
      context: "the root of the tree",
    }
    .fail();
  };

  let mut slot = OutputSlot::new();
  for node in body {
    visit(node, Position::Statement, &mut slot)?;
  }

  let body = slot.finish();
  debug!(statements = body.len(), "transformed program");
  Ok(TargetNode::program(body))
}

fn visit(node: &AstNode, position: Position, slot: &mut OutputSlot) -> CompileResult<()> {
  match node {
    AstNode::NumberLiteral { value } => slot.append(TargetNode::number(value.as_str())),
    AstNode::StringLiteral { value } => slot.append(TargetNode::string(value.as_str())),
    AstNode::CallExpression { name, params } => {
      let mut arguments = OutputSlot::new();
      for param in params {
        visit(param, Position::Argument, &mut arguments)?;
      }

      let call = TargetNode::call(name.as_str(), arguments.finish());
      slot.append(match position {
        Position::Statement => TargetNode::statement(call),
        Position::Argument => call,
      });
    }
    AstNode::Program { .. } => {
      return InvariantViolationSnafu {
        kind: node.kind(),
        context: match position {
          Position::Statement => "a program body",
          Position::Argument => "call arguments",
        },
      }
      .fail();
    }
  }
  Ok(())
}
