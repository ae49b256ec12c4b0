// Copyright 2025 Cowboy AI, LLC.

//! Propositions: named, reusable conditions over a model
//!
//! A [`Proposition`] is immutable and cheap to clone. Evaluating it against a
//! model yields a [`BooleanResult`] explaining the outcome. Propositions are
//! composed with [`and`](Proposition::and), [`or`](Proposition::or),
//! [`xor`](Proposition::xor), [`negate`](Proposition::negate), their
//! short-circuit variants, and the collection quantifiers.

mod description;
mod outcomes;

use std::fmt;
use std::sync::Arc;

use tracing::trace;

pub use description::{PropositionDescription, PropositionShape};
pub use outcomes::{EvaluationFn, ModelFn, Outcomes, QuantifierOutcomes};

use crate::combinators::quantifier::aggregate;
use crate::combinators::{binary, BinaryOperator, Quantifier};
use crate::containment::{self, diagnostic_label};
use crate::errors::{CallbackRole, PropositionError, PropositionResult};
use crate::humanize;
use crate::metadata::Metadata;
use crate::result::{BooleanResult, MetadataOverride};

type Evaluator<M, T> = dyn Fn(&M) -> PropositionResult<BooleanResult<T>> + Send + Sync;

/// A named, evaluable condition over a model of type `M`
pub struct Proposition<M, T: Metadata = String> {
    description: Arc<PropositionDescription>,
    evaluator: Arc<Evaluator<M, T>>,
}

impl<M, T: Metadata> Clone for Proposition<M, T> {
    fn clone(&self) -> Self {
        Self {
            description: Arc::clone(&self.description),
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}

impl<M, T: Metadata> fmt::Debug for Proposition<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proposition")
            .field("statement", &self.description.statement())
            .finish()
    }
}

impl<M, T: Metadata> fmt::Display for Proposition<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description.statement())
    }
}

fn require_statement(statement: impl Into<String>) -> PropositionResult<String> {
    let statement = statement.into();
    if statement.trim().is_empty() {
        return Err(PropositionError::missing("statement"));
    }
    Ok(statement)
}

impl<M: 'static> Proposition<M, String> {
    /// Create a proposition from a boolean predicate
    ///
    /// The assertion is the statement when the predicate holds and its
    /// negation (`!statement`) when it does not.
    pub fn from_predicate<P>(statement: impl Into<String>, predicate: P) -> PropositionResult<Self>
    where
        P: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Self::new(statement, move |model| Ok(predicate(model)), Outcomes::new())
    }
}

impl<M: 'static, T: Metadata> Proposition<M, T> {
    fn from_evaluator<F>(description: PropositionDescription, evaluator: F) -> Self
    where
        F: Fn(&M) -> PropositionResult<BooleanResult<T>> + Send + Sync + 'static,
    {
        Self {
            description: Arc::new(description),
            evaluator: Arc::new(evaluator),
        }
    }

    /// Create a proposition from a fallible predicate and branch metadata
    pub fn new<P>(
        statement: impl Into<String>,
        predicate: P,
        outcomes: Outcomes<M, T>,
    ) -> PropositionResult<Self>
    where
        P: Fn(&M) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        let statement = require_statement(statement)?;
        let branches = outcomes.resolve(&statement)?;
        let label = diagnostic_label::<Self>(&statement);
        let negated = humanize::negate(&statement);
        let description = PropositionDescription::leaf(statement.clone());

        Ok(Self::from_evaluator(description, move |model| {
            let satisfied = containment::guard(&label, CallbackRole::Predicate, || predicate(model))?;
            let (role, branch, fallback) = if satisfied {
                (CallbackRole::WhenTrue, &branches.on_true, &statement)
            } else {
                (CallbackRole::WhenFalse, &branches.on_false, &negated)
            };
            let metadata = containment::guard(&label, role, || branch(model))?;
            let assertion = metadata.assertion().unwrap_or_else(|| fallback.clone());

            trace!(statement = %statement, satisfied, "Evaluated proposition");
            Ok(BooleanResult::leaf(satisfied, assertion, metadata))
        }))
    }

    /// Adopt a function that produces complete results
    pub fn from_result_fn<F>(statement: impl Into<String>, evaluate: F) -> PropositionResult<Self>
    where
        F: Fn(&M) -> anyhow::Result<BooleanResult<T>> + Send + Sync + 'static,
    {
        let statement = require_statement(statement)?;
        let label = diagnostic_label::<Self>(&statement);
        let description = PropositionDescription::leaf(statement);

        Ok(Self::from_evaluator(description, move |model| {
            containment::guard(&label, CallbackRole::Evaluation, || evaluate(model))
        }))
    }

    /// Statement and operand tree
    pub fn description(&self) -> &PropositionDescription {
        &self.description
    }

    /// One-line statement
    pub fn statement(&self) -> &str {
        self.description.statement()
    }

    /// Evaluate against a model
    pub fn evaluate(&self, model: &M) -> PropositionResult<BooleanResult<T>> {
        (self.evaluator)(model)
    }

    /// Evaluate and return only the satisfied flag
    pub fn is_satisfied_by(&self, model: &M) -> PropositionResult<bool> {
        Ok(self.evaluate(model)?.satisfied())
    }

    fn binary<F>(&self, other: &Self, operator: BinaryOperator, combine: F) -> Self
    where
        F: Fn(&Self, &Self, &M) -> PropositionResult<BooleanResult<T>> + Send + Sync + 'static,
    {
        let description =
            PropositionDescription::binary(operator, &self.description, &other.description);
        let left = self.clone();
        let right = other.clone();
        Self::from_evaluator(description, move |model| combine(&left, &right, model))
    }

    /// Both propositions must hold; both are always evaluated
    pub fn and(&self, other: &Self) -> Self {
        self.binary(other, BinaryOperator::And, |left, right, model| {
            Ok(binary::and(left.evaluate(model)?, right.evaluate(model)?))
        })
    }

    /// Both propositions must hold; `other` is skipped once this one fails
    pub fn and_also(&self, other: &Self) -> Self {
        self.binary(other, BinaryOperator::AndAlso, |left, right, model| {
            binary::and_also(left.evaluate(model)?, || right.evaluate(model))
        })
    }

    /// Either proposition must hold; both are always evaluated
    pub fn or(&self, other: &Self) -> Self {
        self.binary(other, BinaryOperator::Or, |left, right, model| {
            Ok(binary::or(left.evaluate(model)?, right.evaluate(model)?))
        })
    }

    /// Either proposition must hold; `other` is skipped once this one holds
    pub fn or_else(&self, other: &Self) -> Self {
        self.binary(other, BinaryOperator::OrElse, |left, right, model| {
            binary::or_else(left.evaluate(model)?, || right.evaluate(model))
        })
    }

    /// Exactly one of the propositions must hold
    pub fn xor(&self, other: &Self) -> Self {
        self.binary(other, BinaryOperator::Xor, |left, right, model| {
            Ok(binary::xor(left.evaluate(model)?, right.evaluate(model)?))
        })
    }

    /// The proposition must not hold
    pub fn negate(&self) -> Self {
        let description = PropositionDescription::not(&self.description);
        let operand = self.clone();
        Self::from_evaluator(description, move |model| {
            Ok(binary::not(operand.evaluate(model)?))
        })
    }

    /// Re-label this proposition with its own statement and branch metadata
    ///
    /// The result carries the substitute metadata while the original result
    /// stays reachable as its sole cause.
    pub fn summarize(
        &self,
        statement: impl Into<String>,
        outcomes: Outcomes<M, T>,
    ) -> PropositionResult<Self> {
        let statement = require_statement(statement)?;
        let branches = outcomes.resolve(&statement)?;
        let label = diagnostic_label::<Self>(&statement);
        let negated = humanize::negate(&statement);
        let description = PropositionDescription::summary(statement.clone(), &self.description);
        let operand = self.clone();

        Ok(Self::from_evaluator(description, move |model| {
            let result = operand.evaluate(model)?;
            let (role, branch, fallback) = if result.satisfied() {
                (CallbackRole::WhenTrue, &branches.on_true, &statement)
            } else {
                (CallbackRole::WhenFalse, &branches.on_false, &negated)
            };
            let metadata = containment::guard(&label, role, || branch(model))?;
            Ok(result.summarized(MetadataOverride::single(metadata, fallback)))
        }))
    }

    /// Every element must satisfy this proposition
    pub fn all(&self) -> Proposition<Vec<M>, T> {
        self.quantified(Quantifier::All, None, QuantifierOutcomes::new())
    }

    /// At least one element must satisfy this proposition
    pub fn any(&self) -> Proposition<Vec<M>, T> {
        self.quantified(Quantifier::Any, None, QuantifierOutcomes::new())
    }

    /// No element may satisfy this proposition
    pub fn none(&self) -> Proposition<Vec<M>, T> {
        self.quantified(Quantifier::NoneOf, None, QuantifierOutcomes::new())
    }

    /// At least `n` elements must satisfy this proposition
    pub fn at_least(&self, n: usize) -> Proposition<Vec<M>, T> {
        self.quantified(Quantifier::AtLeast(n), None, QuantifierOutcomes::new())
    }

    /// At most `n` elements may satisfy this proposition
    pub fn at_most(&self, n: usize) -> Proposition<Vec<M>, T> {
        self.quantified(Quantifier::AtMost(n), None, QuantifierOutcomes::new())
    }

    /// Exactly `n` elements must satisfy this proposition
    pub fn exactly(&self, n: usize) -> Proposition<Vec<M>, T> {
        self.quantified(Quantifier::Exactly(n), None, QuantifierOutcomes::new())
    }

    /// Between `min` and `max` elements (inclusive) must satisfy this proposition
    pub fn in_range(&self, min: usize, max: usize) -> PropositionResult<Proposition<Vec<M>, T>> {
        self.quantify(Quantifier::in_range(min, max)?)
    }

    /// Apply a quantifier with the default statement and no substitutes
    pub fn quantify(&self, quantifier: Quantifier) -> PropositionResult<Proposition<Vec<M>, T>> {
        quantifier.validate()?;
        Ok(self.quantified(quantifier, None, QuantifierOutcomes::new()))
    }

    /// Apply a quantifier with its own statement and substitute metadata
    pub fn quantify_with(
        &self,
        quantifier: Quantifier,
        statement: impl Into<String>,
        outcomes: QuantifierOutcomes<M, T>,
    ) -> PropositionResult<Proposition<Vec<M>, T>> {
        quantifier.validate()?;
        let statement = require_statement(statement)?;
        Ok(self.quantified(quantifier, Some(statement), outcomes))
    }

    fn quantified(
        &self,
        quantifier: Quantifier,
        statement: Option<String>,
        outcomes: QuantifierOutcomes<M, T>,
    ) -> Proposition<Vec<M>, T> {
        let description =
            PropositionDescription::quantified(quantifier, statement, &self.description);
        let statement = description.statement().to_string();
        let label = diagnostic_label::<Proposition<Vec<M>, T>>(&statement);
        let element = self.clone();

        Proposition::from_evaluator(description, move |models: &Vec<M>| {
            let elements = models
                .iter()
                .map(|model| element.evaluate(model).map(|result| (model, result)))
                .collect::<PropositionResult<Vec<_>>>()?;
            aggregate(quantifier, &statement, &label, &outcomes, elements)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_even() -> Proposition<i32> {
        Proposition::from_predicate("is even", |n: &i32| n % 2 == 0).unwrap()
    }

    fn is_positive() -> Proposition<i32> {
        Proposition::from_predicate("is positive", |n: &i32| *n > 0).unwrap()
    }

    #[test]
    fn test_leaf_default_assertions() {
        let result = is_even().evaluate(&4).unwrap();
        assert!(result.satisfied());
        assert_eq!(result.reason(), "is even");

        let result = is_even().evaluate(&3).unwrap();
        assert!(!result.satisfied());
        assert_eq!(result.reason(), "!is even");
    }

    #[test]
    fn test_empty_statement_is_rejected() {
        let err = Proposition::from_predicate("  ", |_: &i32| true).unwrap_err();
        assert_eq!(err, PropositionError::missing("statement"));
    }

    #[test]
    fn test_opaque_metadata_uses_statement_for_assertion() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        enum Code {
            Even,
            Odd,
        }
        impl Metadata for Code {}

        let proposition = Proposition::new(
            "is even",
            |n: &i32| Ok(n % 2 == 0),
            Outcomes::fixed(Code::Even, Code::Odd),
        )
        .unwrap();

        let result = proposition.evaluate(&5).unwrap();
        assert_eq!(result.reason(), "!is even");
        assert!(result.metadata().contains(&Code::Odd));
    }

    #[test]
    fn test_composite_statements() {
        let p = is_even().and(&is_positive()).or(&is_even().negate());
        assert_eq!(p.statement(), "(is even & is positive) | !is even");
        assert_eq!(p.to_string(), p.statement());
    }

    #[test]
    fn test_composite_evaluation() {
        let p = is_even().and(&is_positive());
        let result = p.evaluate(&-2).unwrap();
        assert!(!result.satisfied());
        assert_eq!(result.reason(), "!is positive");
        assert!(p.is_satisfied_by(&2).unwrap());
    }

    #[test]
    fn test_summarize_substitutes_metadata() {
        let eligible = is_even()
            .and(&is_positive())
            .summarize("is eligible", Outcomes::text("eligible", "not eligible"))
            .unwrap();

        let result = eligible.evaluate(&-3).unwrap();
        assert!(!result.satisfied());
        assert_eq!(result.reason(), "not eligible");
        assert_eq!(result.causes().len(), 1);
        assert_eq!(result.causes()[0].reason(), "!is even & !is positive");
        assert_eq!(
            eligible.description().detailed(),
            "is eligible\n    AND\n        is even\n        is positive"
        );
    }

    #[test]
    fn test_from_result_fn_adopts_results() {
        let inner = is_even();
        let adopted = Proposition::from_result_fn("delegates to is even", move |n: &i32| {
            Ok(inner.evaluate(n)?)
        })
        .unwrap();
        assert_eq!(adopted.evaluate(&8).unwrap().reason(), "is even");
    }

    #[test]
    fn test_default_quantifier_statement() {
        assert_eq!(is_even().all().statement(), "all(is even)");
        assert_eq!(is_even().at_most(1).statement(), "at most 1(is even)");
        assert!(is_even().in_range(3, 1).is_err());
    }
}
