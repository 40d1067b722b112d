//! Code generation: render the target AST as call-expression source text.
//!
//! Literals are emitted exactly as they were lexed. Numbers are never
//! re-formatted and strings are never escaped, mirroring the lexer which
//! knows no escapes either.

use tracing::debug;

use crate::error::{CompileResult, InvariantViolationSnafu};
use crate::transformer::TargetNode;

/// Render any target node. A `Program` emits one line per body element.
pub fn generate(node: &TargetNode) -> CompileResult<String> {
  let mut out = String::new();

  match node {
    TargetNode::Program { body } => {
      for (i, stmt) in body.iter().enumerate() {
        if i > 0 {
          out.push('\n');
        }
        emit_node(stmt, &mut out)?;
      }
      debug!(lines = body.len(), bytes = out.len(), "generated output");
    }
    _ => emit_node(node, &mut out)?,
  }

  Ok(out)
}

/// Emit a single node below the program level.
fn emit_node(node: &TargetNode, out: &mut String) -> CompileResult<()> {
  match node {
    TargetNode::ExpressionStatement { expression } => {
      emit_node(expression, out)?;
      out.push(';');
    }
    TargetNode::CallExpression { callee, arguments } => {
      out.push_str(&callee.name);
      out.push('(');
      for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        emit_node(arg, out)?;
      }
      out.push(')');
    }
    TargetNode::Identifier(ident) => out.push_str(&ident.name),
    TargetNode::NumberLiteral { value } => out.push_str(value),
    TargetNode::StringLiteral { value } => {
      out.push('"');
      out.push_str(value);
      out.push('"');
    }
    TargetNode::Program { .. } => {
      return InvariantViolationSnafu {
        kind: node.kind(),
        context: "a nested position",
      }
      .fail();
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;

  #[test]
  fn renders_nested_call_statement() {
    let tree = TargetNode::program(vec![TargetNode::statement(TargetNode::call(
      "add",
      vec![
        TargetNode::number("2"),
        TargetNode::call("subtract", vec![TargetNode::number("4"), TargetNode::number("2")]),
      ],
    ))]);
    assert_eq!(generate(&tree).unwrap(), "add(2, subtract(4, 2));");
  }

  #[test]
  fn one_line_per_statement() {
    let tree = TargetNode::program(vec![
      TargetNode::statement(TargetNode::call("a", vec![])),
      TargetNode::statement(TargetNode::call("b", vec![TargetNode::string("x")])),
    ]);
    assert_eq!(generate(&tree).unwrap(), "a();\nb(\"x\");");
  }

  #[test]
  fn literals_are_verbatim() {
    assert_eq!(generate(&TargetNode::number("0042")).unwrap(), "0042");
    assert_eq!(generate(&TargetNode::string("a ' b")).unwrap(), "\"a ' b\"");
    assert_eq!(generate(&TargetNode::identifier("foo")).unwrap(), "foo");
  }

  #[test]
  fn empty_program_renders_nothing() {
    assert_eq!(generate(&TargetNode::program(vec![])).unwrap(), "");
  }

  #[test]
  fn nested_program_is_an_invariant_violation() {
    let tree = TargetNode::program(vec![TargetNode::statement(TargetNode::call(
      "f",
      vec![TargetNode::program(vec![])],
    ))]);
    assert!(matches!(
      generate(&tree),
      Err(CompileError::InvariantViolation {
        kind: "Program",
        ..
      })
    ));
  }
}
