// Copyright 2025 Cowboy AI, LLC.

//! Multi-line justification rendering

use super::{BooleanResult, ResultKind};
use crate::combinators::BinaryOperator;
use crate::config::RenderConfig;
use crate::metadata::Metadata;

pub(super) fn render<T: Metadata>(result: &BooleanResult<T>, config: &RenderConfig) -> String {
    let mut lines = Vec::new();
    write_result(result, 0, config, &mut lines);
    lines.join("\n")
}

fn write_result<T: Metadata>(
    result: &BooleanResult<T>,
    depth: usize,
    config: &RenderConfig,
    lines: &mut Vec<String>,
) {
    let pad = config.pad(depth);
    match result.kind() {
        ResultKind::Leaf { .. } => lines.push(format!("{pad}{}", result.reason())),
        ResultKind::Binary(operator) => {
            lines.push(format!("{pad}{}", operator.keyword()));
            for cause in result.causes() {
                write_operand(cause, *operator, depth + 1, config, lines);
            }
        }
        ResultKind::Not => {
            lines.push(format!("{pad}NOT"));
            for cause in result.causes() {
                write_result(cause, depth + 1, config, lines);
            }
        }
        ResultKind::Quantifier { .. } | ResultKind::Summarized(_) => {
            lines.push(format!("{pad}{}", result.reason()));
            for cause in result.causes() {
                write_result(cause, depth + 1, config, lines);
            }
        }
    }
}

/// Operands of a same-operator chain are written at one level
fn write_operand<T: Metadata>(
    operand: &BooleanResult<T>,
    parent: BinaryOperator,
    depth: usize,
    config: &RenderConfig,
    lines: &mut Vec<String>,
) {
    match operand.kind() {
        ResultKind::Binary(operator) if config.collapse_operators && *operator == parent => {
            for cause in operand.causes() {
                write_operand(cause, parent, depth, config, lines);
            }
        }
        _ => write_result(operand, depth, config, lines),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::combinators::binary;

    fn leaf(satisfied: bool, text: &str) -> BooleanResult {
        BooleanResult::leaf(satisfied, text, text.to_string())
    }

    #[test]
    fn test_same_operator_chain_is_collapsed() {
        let chain = binary::and(
            binary::and(leaf(true, "a"), leaf(true, "b")),
            leaf(true, "c"),
        );
        assert_eq!(
            chain.description().justification(),
            "AND\n    a\n    b\n    c"
        );
    }

    #[test]
    fn test_collapsing_can_be_disabled() {
        let chain = binary::or(binary::or(leaf(true, "a"), leaf(true, "b")), leaf(false, "!c"));
        let config = RenderConfig::new().with_indent(2).with_collapsing(false);
        assert_eq!(
            chain.description().justification_with(&config),
            "OR\n  OR\n    a\n    b"
        );
    }

    #[test]
    fn test_mixed_operators_nest() {
        let result = binary::and(
            binary::or(leaf(false, "!a"), leaf(true, "b")),
            binary::not(leaf(false, "!c")),
        );
        assert_eq!(
            result.description().justification(),
            "AND\n    OR\n        b\n    NOT\n        !c"
        );
    }
}
