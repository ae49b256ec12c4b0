// Copyright 2025 Cowboy AI, LLC.

//! Descriptions of propositions
//!
//! A description holds the one-line statement of a proposition and the tree
//! of operand descriptions it was built from. The statement flattens chains
//! of the same operator (`a & b & c`) and brackets only operands that mix
//! operators; the detailed form renders the tree over several lines.

use std::fmt;
use std::sync::Arc;

use crate::combinators::{BinaryOperator, Quantifier};
use crate::config::RenderConfig;
use crate::humanize;

/// How a proposition was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropositionShape {
    /// A single predicate
    Leaf,
    /// Two operands joined by an operator
    Binary(BinaryOperator),
    /// Negation of one operand
    Not,
    /// An element proposition applied over a collection
    Quantifier(Quantifier),
    /// A re-labelled operand
    Summary,
}

/// Statement and operand tree of a proposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropositionDescription {
    statement: String,
    shape: PropositionShape,
    operands: Vec<Arc<PropositionDescription>>,
}

impl PropositionDescription {
    pub(crate) fn leaf(statement: String) -> Self {
        Self {
            statement,
            shape: PropositionShape::Leaf,
            operands: Vec::new(),
        }
    }

    pub(crate) fn binary(
        operator: BinaryOperator,
        left: &Arc<PropositionDescription>,
        right: &Arc<PropositionDescription>,
    ) -> Self {
        let statement = format!(
            "{} {} {}",
            operand_statement(left, operator),
            operator.symbol(),
            operand_statement(right, operator)
        );
        Self {
            statement,
            shape: PropositionShape::Binary(operator),
            operands: vec![Arc::clone(left), Arc::clone(right)],
        }
    }

    pub(crate) fn not(operand: &Arc<PropositionDescription>) -> Self {
        Self {
            statement: humanize::negate(&operand.statement),
            shape: PropositionShape::Not,
            operands: vec![Arc::clone(operand)],
        }
    }

    pub(crate) fn quantified(
        quantifier: Quantifier,
        statement: Option<String>,
        operand: &Arc<PropositionDescription>,
    ) -> Self {
        let statement =
            statement.unwrap_or_else(|| format!("{}({})", quantifier.label(), operand.statement));
        Self {
            statement,
            shape: PropositionShape::Quantifier(quantifier),
            operands: vec![Arc::clone(operand)],
        }
    }

    pub(crate) fn summary(statement: String, operand: &Arc<PropositionDescription>) -> Self {
        Self {
            statement,
            shape: PropositionShape::Summary,
            operands: vec![Arc::clone(operand)],
        }
    }

    /// One-line statement
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// How the proposition was built
    pub fn shape(&self) -> &PropositionShape {
        &self.shape
    }

    /// Descriptions of the operands
    pub fn operands(&self) -> impl Iterator<Item = &PropositionDescription> + '_ {
        self.operands.iter().map(Arc::as_ref)
    }

    /// Multi-line rendering of the operand tree with the default layout
    pub fn detailed(&self) -> String {
        self.detailed_with(&RenderConfig::default())
    }

    /// Multi-line rendering of the operand tree
    pub fn detailed_with(&self, config: &RenderConfig) -> String {
        let mut lines = Vec::new();
        self.write(0, config, &mut lines);
        lines.join("\n")
    }

    fn write(&self, depth: usize, config: &RenderConfig, lines: &mut Vec<String>) {
        let pad = config.pad(depth);
        match &self.shape {
            PropositionShape::Leaf => lines.push(format!("{pad}{}", self.statement)),
            PropositionShape::Binary(operator) => {
                lines.push(format!("{pad}{}", operator.keyword()));
                for operand in &self.operands {
                    operand.write_operand(*operator, depth + 1, config, lines);
                }
            }
            PropositionShape::Not => {
                lines.push(format!("{pad}NOT"));
                for operand in &self.operands {
                    operand.write(depth + 1, config, lines);
                }
            }
            PropositionShape::Quantifier(_) | PropositionShape::Summary => {
                lines.push(format!("{pad}{}", self.statement));
                for operand in &self.operands {
                    operand.write(depth + 1, config, lines);
                }
            }
        }
    }

    fn write_operand(
        &self,
        parent: BinaryOperator,
        depth: usize,
        config: &RenderConfig,
        lines: &mut Vec<String>,
    ) {
        match self.shape {
            PropositionShape::Binary(operator) if config.collapse_operators && operator == parent => {
                for operand in &self.operands {
                    operand.write_operand(parent, depth, config, lines);
                }
            }
            _ => self.write(depth, config, lines),
        }
    }
}

impl fmt::Display for PropositionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statement)
    }
}

fn operand_statement(operand: &PropositionDescription, parent: BinaryOperator) -> String {
    match operand.shape {
        PropositionShape::Binary(operator) if operator == parent => operand.statement.clone(),
        _ if humanize::is_compound(&operand.statement) => format!("({})", operand.statement),
        _ => operand.statement.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(statement: &str) -> Arc<PropositionDescription> {
        Arc::new(PropositionDescription::leaf(statement.to_string()))
    }

    #[test]
    fn test_same_operator_chain_statement() {
        let ab = Arc::new(PropositionDescription::binary(
            BinaryOperator::And,
            &leaf("a"),
            &leaf("b"),
        ));
        let abc = PropositionDescription::binary(BinaryOperator::And, &ab, &leaf("c"));
        assert_eq!(abc.statement(), "a & b & c");
        assert_eq!(abc.detailed(), "AND\n    a\n    b\n    c");
    }

    #[test]
    fn test_mixed_operator_statement() {
        let ab = Arc::new(PropositionDescription::binary(
            BinaryOperator::Or,
            &leaf("a"),
            &leaf("b"),
        ));
        let result = PropositionDescription::binary(BinaryOperator::Xor, &ab, &leaf("c"));
        assert_eq!(result.statement(), "(a | b) ^ c");
        assert_eq!(result.detailed(), "XOR\n    OR\n        a\n        b\n    c");
    }

    #[test]
    fn test_double_negation_statement() {
        let p = leaf("is even");
        let not_p = Arc::new(PropositionDescription::not(&p));
        assert_eq!(not_p.statement(), "!is even");
        let not_not_p = PropositionDescription::not(&not_p);
        assert_eq!(not_not_p.statement(), "is even");
        assert!(!not_not_p.statement().contains("!!"));
    }

    #[test]
    fn test_negated_compound_statement() {
        let ab = Arc::new(PropositionDescription::binary(
            BinaryOperator::And,
            &leaf("a"),
            &leaf("b"),
        ));
        assert_eq!(PropositionDescription::not(&ab).statement(), "!(a & b)");
    }

    #[test]
    fn test_quantified_statement() {
        let element = leaf("is even");
        let default = PropositionDescription::quantified(Quantifier::AtLeast(2), None, &element);
        assert_eq!(default.statement(), "at least 2(is even)");

        let named = PropositionDescription::quantified(
            Quantifier::All,
            Some("all numbers are even".to_string()),
            &element,
        );
        assert_eq!(named.detailed(), "all numbers are even\n    is even");
    }
}
