//! Indented listing of a target tree, for debugging the transformer.
//!
//! One node per line, one tab per level. Leaves print their payload after
//! the kind:
//!
//! ```text
//! Program
//! 	ExpressionStatement
//! 		CallExpression
//! 			Identifier - add
//! 			NumberLiteral - 2
//! ```

use std::fmt::{self, Write};

use crate::transformer::TargetNode;

pub fn write_tree(node: &TargetNode, out: &mut impl Write) -> fmt::Result {
  write_node(node, 0, out)
}

pub fn render_tree(node: &TargetNode) -> String {
  let mut out = String::new();
  write_tree(node, &mut out).expect("writing to a String cannot fail");
  out
}

fn write_node(node: &TargetNode, depth: usize, out: &mut impl Write) -> fmt::Result {
  let indent = "\t".repeat(depth);
  match node {
    TargetNode::Program { body } => {
      writeln!(out, "{indent}{}", node.kind())?;
      for child in body {
        write_node(child, depth + 1, out)?;
      }
    }
    TargetNode::ExpressionStatement { expression } => {
      writeln!(out, "{indent}{}", node.kind())?;
      write_node(expression, depth + 1, out)?;
    }
    TargetNode::CallExpression { callee, arguments } => {
      writeln!(out, "{indent}{}", node.kind())?;
      writeln!(out, "{indent}\tIdentifier - {}", callee.name)?;
      for arg in arguments {
        write_node(arg, depth + 1, out)?;
      }
    }
    TargetNode::Identifier(ident) => writeln!(out, "{indent}Identifier - {}", ident.name)?,
    TargetNode::NumberLiteral { value } | TargetNode::StringLiteral { value } => {
      writeln!(out, "{indent}{} - {value}", node.kind())?
    }
  }
  Ok(())
}
