// Copyright 2025 Cowboy AI, LLC.

//! Binary logical combinators over results
//!
//! Each combinator decides which operands are causally determinative:
//!
//! | operator  | satisfied                 | unsatisfied               |
//! |-----------|---------------------------|---------------------------|
//! | AND       | both                      | the unsatisfied operands  |
//! | AND ALSO  | both                      | the first unsatisfied one |
//! | OR        | the satisfied operands    | both                      |
//! | OR ELSE   | the first satisfied one   | both                      |
//! | XOR       | both                      | both                      |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::PropositionResult;
use crate::humanize;
use crate::metadata::Metadata;
use crate::result::{BooleanResult, ResultKind};

/// Logical operators joining two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    /// Conjunction evaluating both operands
    And,
    /// Conjunction skipping the right operand when the left fails
    AndAlso,
    /// Disjunction evaluating both operands
    Or,
    /// Disjunction skipping the right operand when the left holds
    OrElse,
    /// Exclusive disjunction
    Xor,
}

impl BinaryOperator {
    /// Symbol used in one-line statements and reasons
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::And => "&",
            BinaryOperator::AndAlso => "&&",
            BinaryOperator::Or => "|",
            BinaryOperator::OrElse => "||",
            BinaryOperator::Xor => "^",
        }
    }

    /// Keyword used as the heading of multi-line renderings
    pub fn keyword(&self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::AndAlso => "AND ALSO",
            BinaryOperator::Or => "OR",
            BinaryOperator::OrElse => "OR ELSE",
            BinaryOperator::Xor => "XOR",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Conjunction of two evaluated operands
pub fn and<T: Metadata>(left: BooleanResult<T>, right: BooleanResult<T>) -> BooleanResult<T> {
    let satisfied = left.satisfied() && right.satisfied();
    let operands = vec![left, right];
    let causes = if satisfied {
        operands.clone()
    } else {
        operands.iter().filter(|r| !r.satisfied()).cloned().collect()
    };
    combine(BinaryOperator::And, satisfied, operands, causes)
}

/// Short-circuit conjunction; `right` only runs when `left` is satisfied
pub fn and_also<T, F>(left: BooleanResult<T>, right: F) -> PropositionResult<BooleanResult<T>>
where
    T: Metadata,
    F: FnOnce() -> PropositionResult<BooleanResult<T>>,
{
    if !left.satisfied() {
        return Ok(combine(
            BinaryOperator::AndAlso,
            false,
            vec![left.clone()],
            vec![left],
        ));
    }

    let right = right()?;
    let satisfied = right.satisfied();
    let causes = if satisfied {
        vec![left.clone(), right.clone()]
    } else {
        vec![right.clone()]
    };
    Ok(combine(
        BinaryOperator::AndAlso,
        satisfied,
        vec![left, right],
        causes,
    ))
}

/// Disjunction of two evaluated operands
pub fn or<T: Metadata>(left: BooleanResult<T>, right: BooleanResult<T>) -> BooleanResult<T> {
    let satisfied = left.satisfied() || right.satisfied();
    let operands = vec![left, right];
    let causes = if satisfied {
        operands.iter().filter(|r| r.satisfied()).cloned().collect()
    } else {
        operands.clone()
    };
    combine(BinaryOperator::Or, satisfied, operands, causes)
}

/// Short-circuit disjunction; `right` only runs when `left` is unsatisfied
pub fn or_else<T, F>(left: BooleanResult<T>, right: F) -> PropositionResult<BooleanResult<T>>
where
    T: Metadata,
    F: FnOnce() -> PropositionResult<BooleanResult<T>>,
{
    if left.satisfied() {
        return Ok(combine(
            BinaryOperator::OrElse,
            true,
            vec![left.clone()],
            vec![left],
        ));
    }

    let right = right()?;
    let satisfied = right.satisfied();
    let causes = if satisfied {
        vec![right.clone()]
    } else {
        vec![left.clone(), right.clone()]
    };
    Ok(combine(
        BinaryOperator::OrElse,
        satisfied,
        vec![left, right],
        causes,
    ))
}

/// Exclusive disjunction of two evaluated operands
pub fn xor<T: Metadata>(left: BooleanResult<T>, right: BooleanResult<T>) -> BooleanResult<T> {
    let satisfied = left.satisfied() != right.satisfied();
    let operands = vec![left, right];
    combine(BinaryOperator::Xor, satisfied, operands.clone(), operands)
}

/// Negation of an evaluated operand
pub fn not<T: Metadata>(operand: BooleanResult<T>) -> BooleanResult<T> {
    BooleanResult::from_parts(
        !operand.satisfied(),
        operand.reason().to_string(),
        ResultKind::Not,
        vec![operand.clone()],
        vec![operand],
    )
}

fn combine<T: Metadata>(
    operator: BinaryOperator,
    satisfied: bool,
    underlying: Vec<BooleanResult<T>>,
    causes: Vec<BooleanResult<T>>,
) -> BooleanResult<T> {
    let reason = render_reason(operator, &causes);
    BooleanResult::from_parts(
        satisfied,
        reason,
        ResultKind::Binary(operator),
        underlying,
        causes,
    )
}

fn render_reason<T: Metadata>(operator: BinaryOperator, causes: &[BooleanResult<T>]) -> String {
    if let [only] = causes {
        return only.reason().to_string();
    }
    causes
        .iter()
        .map(|cause| operand_reason(cause, operator))
        .collect::<Vec<_>>()
        .join(&format!(" {} ", operator.symbol()))
}

/// Reasons of a same-operator chain are inlined, other compounds bracketed
fn operand_reason<T: Metadata>(operand: &BooleanResult<T>, parent: BinaryOperator) -> String {
    let reason = operand.reason();
    match operand.kind() {
        ResultKind::Binary(operator) if *operator == parent && operand.causes().len() > 1 => {
            reason.to_string()
        }
        _ if humanize::is_compound(reason) => format!("({reason})"),
        _ => reason.to_string(),
    }
}

impl<T: Metadata> BooleanResult<T> {
    /// Conjunction with another result
    pub fn and(&self, other: &Self) -> Self {
        and(self.clone(), other.clone())
    }

    /// Short-circuit conjunction; `other` only runs when this result holds
    pub fn and_also<F>(&self, other: F) -> PropositionResult<Self>
    where
        F: FnOnce() -> PropositionResult<Self>,
    {
        and_also(self.clone(), other)
    }

    /// Disjunction with another result
    pub fn or(&self, other: &Self) -> Self {
        or(self.clone(), other.clone())
    }

    /// Short-circuit disjunction; `other` only runs when this result fails
    pub fn or_else<F>(&self, other: F) -> PropositionResult<Self>
    where
        F: FnOnce() -> PropositionResult<Self>,
    {
        or_else(self.clone(), other)
    }

    /// Exclusive disjunction with another result
    pub fn xor(&self, other: &Self) -> Self {
        xor(self.clone(), other.clone())
    }

    /// Negation of this result
    pub fn negate(&self) -> Self {
        not(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(satisfied: bool, text: &str) -> BooleanResult {
        BooleanResult::leaf(satisfied, text, text.to_string())
    }

    fn reasons(results: &[BooleanResult]) -> Vec<&str> {
        results.iter().map(|r| r.reason()).collect()
    }

    #[test]
    fn test_and_causes() {
        let result = and(leaf(true, "a"), leaf(true, "b"));
        assert!(result.satisfied());
        assert_eq!(reasons(result.causes()), vec!["a", "b"]);
        assert_eq!(result.reason(), "a & b");

        let result = and(leaf(true, "a"), leaf(false, "!b"));
        assert!(!result.satisfied());
        assert_eq!(reasons(result.causes()), vec!["!b"]);
        assert_eq!(reasons(result.underlying()), vec!["a", "!b"]);
        assert_eq!(result.reason(), "!b");

        let result = and(leaf(false, "!a"), leaf(false, "!b"));
        assert_eq!(reasons(result.causes()), vec!["!a", "!b"]);
    }

    #[test]
    fn test_and_also_skips_right_operand() {
        let mut calls = 0;
        let result = and_also(leaf(false, "!a"), || {
            calls += 1;
            Ok(leaf(true, "b"))
        })
        .unwrap();
        assert_eq!(calls, 0);
        assert!(!result.satisfied());
        assert_eq!(reasons(result.causes()), vec!["!a"]);
        assert_eq!(result.underlying().len(), 1);

        let result = leaf(true, "a").and_also(|| Ok(leaf(false, "!b"))).unwrap();
        assert_eq!(reasons(result.causes()), vec!["!b"]);
        assert_eq!(result.underlying().len(), 2);
    }

    #[test]
    fn test_or_causes() {
        let result = or(leaf(false, "!a"), leaf(true, "b"));
        assert!(result.satisfied());
        assert_eq!(reasons(result.causes()), vec!["b"]);

        let result = or(leaf(false, "!a"), leaf(false, "!b"));
        assert!(!result.satisfied());
        assert_eq!(reasons(result.causes()), vec!["!a", "!b"]);
        assert_eq!(result.reason(), "!a | !b");
    }

    #[test]
    fn test_or_else_causes() {
        let result = leaf(true, "a").or_else(|| panic!("must not run")).unwrap();
        assert_eq!(reasons(result.causes()), vec!["a"]);

        let result = leaf(false, "!a").or_else(|| Ok(leaf(true, "b"))).unwrap();
        assert_eq!(reasons(result.causes()), vec!["b"]);

        let result = leaf(false, "!a").or_else(|| Ok(leaf(false, "!b"))).unwrap();
        assert!(!result.satisfied());
        assert_eq!(reasons(result.causes()), vec!["!a", "!b"]);
        assert_eq!(result.reason(), "!a || !b");
    }

    #[test]
    fn test_xor_always_cites_both() {
        for (a, b) in [(true, true), (true, false), (false, true), (false, false)] {
            let result = xor(leaf(a, "a"), leaf(b, "b"));
            assert_eq!(result.satisfied(), a != b);
            assert_eq!(result.causes().len(), 2);
        }
    }

    #[test]
    fn test_not() {
        let operand = leaf(false, "!is even");
        let result = operand.negate();
        assert!(result.satisfied());
        assert_eq!(result.causes(), &[operand]);
        assert_eq!(result.reason(), "!is even");
        assert!(!result.negate().satisfied());
    }

    #[test]
    fn test_reason_brackets_mixed_operators() {
        let inner = or(leaf(true, "a"), leaf(true, "b"));
        let result = and(inner, leaf(true, "c"));
        assert_eq!(result.reason(), "(a | b) & c");

        let chain = and(and(leaf(true, "a"), leaf(true, "b")), leaf(true, "c"));
        assert_eq!(chain.reason(), "a & b & c");
    }
}
