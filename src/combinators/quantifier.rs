// Copyright 2025 Cowboy AI, LLC.

//! Quantifier combinators over collections
//!
//! A quantified proposition evaluates its element proposition against every
//! model in a collection, counts the satisfied elements and checks the count
//! against the quantifier. The elements cited as causes are the ones on the
//! side of the threshold that decided the outcome; when that side is empty
//! every element is cited, so a non-empty collection always has causes.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::containment;
use crate::errors::{CallbackRole, PropositionError, PropositionResult};
use crate::humanize;
use crate::metadata::Metadata;
use crate::proposition::QuantifierOutcomes;
use crate::result::{BooleanResult, MetadataOverride, ResultKind};

/// Counting rule applied to the satisfied elements of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantifier {
    /// Every element is satisfied
    All,
    /// At least one element is satisfied
    Any,
    /// No element is satisfied
    NoneOf,
    /// At least `n` elements are satisfied
    AtLeast(usize),
    /// At most `n` elements are satisfied
    AtMost(usize),
    /// Exactly `n` elements are satisfied
    Exactly(usize),
    /// Between `min` and `max` elements (inclusive) are satisfied
    Range {
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },
}

impl Quantifier {
    /// Create a range quantifier, rejecting `min > max`
    pub fn in_range(min: usize, max: usize) -> PropositionResult<Self> {
        let quantifier = Quantifier::Range { min, max };
        quantifier.validate()?;
        Ok(quantifier)
    }

    /// Check the quantifier's arguments
    pub fn validate(&self) -> PropositionResult<()> {
        match self {
            Quantifier::Range { min, max } if min > max => Err(PropositionError::invalid_argument(
                "min",
                format!("must not exceed max ({min} > {max})"),
            )),
            _ => Ok(()),
        }
    }

    /// Whether `true_count` satisfied elements out of `total` meet this rule
    pub fn is_satisfied_by(&self, true_count: usize, total: usize) -> bool {
        match *self {
            Quantifier::All => true_count == total,
            Quantifier::Any => true_count > 0,
            Quantifier::NoneOf => true_count == 0,
            Quantifier::AtLeast(n) => true_count >= n,
            Quantifier::AtMost(n) => true_count <= n,
            Quantifier::Exactly(n) => true_count == n,
            Quantifier::Range { min, max } => (min..=max).contains(&true_count),
        }
    }

    /// Short name used in default statements
    pub fn label(&self) -> String {
        match self {
            Quantifier::All => "all".to_string(),
            Quantifier::Any => "any".to_string(),
            Quantifier::NoneOf => "none".to_string(),
            Quantifier::AtLeast(n) => format!("at least {n}"),
            Quantifier::AtMost(n) => format!("at most {n}"),
            Quantifier::Exactly(n) => format!("exactly {n}"),
            Quantifier::Range { min, max } => format!("between {min} and {max}"),
        }
    }

    /// Which element outcome decided an aggregate outcome
    fn decisive_outcome(&self, satisfied: bool, true_count: usize) -> bool {
        match (*self, satisfied) {
            (Quantifier::All | Quantifier::Any | Quantifier::AtLeast(_), outcome) => outcome,
            (Quantifier::NoneOf, outcome) => !outcome,
            (Quantifier::AtMost(_), _) => true,
            (Quantifier::Exactly(_) | Quantifier::Range { .. }, true) => true,
            (Quantifier::Exactly(n), false) => true_count > n,
            (Quantifier::Range { max, .. }, false) => true_count > max,
        }
    }

    /// Indices of the elements that determined the aggregate outcome
    pub(crate) fn select_causes<T: Metadata>(
        &self,
        satisfied: bool,
        true_count: usize,
        elements: &[BooleanResult<T>],
    ) -> Vec<usize> {
        let decisive = self.decisive_outcome(satisfied, true_count);
        let causes: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, result)| result.satisfied() == decisive)
            .map(|(index, _)| index)
            .collect();
        if causes.is_empty() {
            (0..elements.len()).collect()
        } else {
            causes
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Element results of a quantified proposition paired with their models
///
/// Handed to quantifier metadata factories so they can see which model
/// produced which outcome.
pub struct QuantifierEvaluation<'a, M, T: Metadata> {
    quantifier: Quantifier,
    satisfied: bool,
    true_count: usize,
    models: Vec<&'a M>,
    results: Vec<BooleanResult<T>>,
    causes: Vec<usize>,
}

impl<'a, M, T: Metadata> QuantifierEvaluation<'a, M, T> {
    /// Count the element results and select the causes
    pub(crate) fn new(quantifier: Quantifier, elements: Vec<(&'a M, BooleanResult<T>)>) -> Self {
        let (models, results): (Vec<&'a M>, Vec<BooleanResult<T>>) = elements.into_iter().unzip();
        let true_count = results.iter().filter(|r| r.satisfied()).count();
        let satisfied = quantifier.is_satisfied_by(true_count, results.len());
        let causes = quantifier.select_causes(satisfied, true_count, &results);
        Self {
            quantifier,
            satisfied,
            true_count,
            models,
            results,
            causes,
        }
    }

    /// The counting rule
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Whether the aggregate is satisfied
    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    /// Number of elements
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of satisfied elements
    pub fn true_count(&self) -> usize {
        self.true_count
    }

    /// Number of unsatisfied elements
    pub fn false_count(&self) -> usize {
        self.total() - self.true_count
    }

    /// Whether every element is satisfied
    pub fn all_satisfied(&self) -> bool {
        self.false_count() == 0
    }

    /// Whether no element is satisfied
    pub fn none_satisfied(&self) -> bool {
        self.true_count == 0
    }

    /// Every `(model, result)` pair in collection order
    pub fn elements(&self) -> impl Iterator<Item = (&'a M, &BooleanResult<T>)> + '_ {
        self.models.iter().copied().zip(self.results.iter())
    }

    /// The `(model, result)` pairs cited as causes
    pub fn causes(&self) -> impl Iterator<Item = (&'a M, &BooleanResult<T>)> + '_ {
        self.causes
            .iter()
            .map(|&index| (self.models[index], &self.results[index]))
    }

    /// Models whose element result is satisfied
    pub fn true_models(&self) -> Vec<&'a M> {
        self.elements()
            .filter(|(_, result)| result.satisfied())
            .map(|(model, _)| model)
            .collect()
    }

    /// Models whose element result is unsatisfied
    pub fn false_models(&self) -> Vec<&'a M> {
        self.elements()
            .filter(|(_, result)| !result.satisfied())
            .map(|(model, _)| model)
            .collect()
    }

    /// Deduplicated metadata of the causes
    pub fn cause_metadata(&self) -> IndexSet<T> {
        self.causes()
            .flat_map(|(_, result)| result.metadata().iter().cloned())
            .collect()
    }

    /// Deduplicated assertions of the causes
    pub fn cause_assertions(&self) -> IndexSet<String> {
        self.causes()
            .flat_map(|(_, result)| result.assertions().iter().cloned())
            .collect()
    }
}

/// Reduce evaluated elements into one aggregate result
pub(crate) fn aggregate<M, T: Metadata>(
    quantifier: Quantifier,
    statement: &str,
    label: &str,
    outcomes: &QuantifierOutcomes<M, T>,
    elements: Vec<(&M, BooleanResult<T>)>,
) -> PropositionResult<BooleanResult<T>> {
    let evaluation = QuantifierEvaluation::new(quantifier, elements);
    let satisfied = evaluation.satisfied();

    let (role, branch, fallback) = if satisfied {
        (CallbackRole::WhenTrue, outcomes.on_true.as_ref(), statement.to_string())
    } else {
        (CallbackRole::WhenFalse, outcomes.on_false.as_ref(), humanize::negate(statement))
    };

    let overridden = match branch {
        Some(factory) => {
            let values = containment::guard(label, role, || factory(&evaluation))?;
            MetadataOverride::from_values(values, &fallback)
        }
        None => None,
    };

    let reason = match &overridden {
        Some(substitute) => humanize::join_and(substitute.assertions()),
        None => fallback,
    };

    debug!(
        quantifier = %quantifier,
        total = evaluation.total(),
        true_count = evaluation.true_count(),
        satisfied,
        causes = evaluation.causes.len(),
        "Aggregated quantified proposition"
    );

    let QuantifierEvaluation {
        true_count,
        results,
        causes,
        ..
    } = evaluation;
    let cited = causes.iter().map(|&index| results[index].clone()).collect();

    Ok(BooleanResult::from_parts(
        satisfied,
        reason,
        ResultKind::Quantifier {
            quantifier,
            true_count,
            overridden,
        },
        results,
        cited,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(outcomes: &[bool]) -> Vec<BooleanResult> {
        outcomes
            .iter()
            .map(|&satisfied| {
                let text = if satisfied { "yes" } else { "no" };
                BooleanResult::leaf(satisfied, text, text.to_string())
            })
            .collect()
    }

    #[test]
    fn test_range_validation() {
        assert!(Quantifier::in_range(2, 3).is_ok());
        assert!(Quantifier::in_range(3, 3).is_ok());
        let err = Quantifier::in_range(4, 3).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(Quantifier::Range { min: 5, max: 1 }.validate().is_err());
    }

    #[test]
    fn test_satisfaction_rules() {
        assert!(Quantifier::All.is_satisfied_by(0, 0));
        assert!(!Quantifier::Any.is_satisfied_by(0, 0));
        assert!(Quantifier::NoneOf.is_satisfied_by(0, 3));
        assert!(Quantifier::AtLeast(0).is_satisfied_by(0, 0));
        assert!(Quantifier::AtMost(1).is_satisfied_by(1, 4));
        assert!(!Quantifier::AtMost(1).is_satisfied_by(2, 4));
        assert!(Quantifier::Exactly(0).is_satisfied_by(0, 0));
        assert!(Quantifier::Range { min: 0, max: 2 }.is_satisfied_by(0, 0));
        assert!(!Quantifier::Range { min: 2, max: 3 }.is_satisfied_by(4, 5));
    }

    #[test]
    fn test_range_over_cap_cites_satisfied_elements() {
        let results = elements(&[true, true, false, true, true]);
        let quantifier = Quantifier::Range { min: 2, max: 3 };
        assert!(!quantifier.is_satisfied_by(4, 5));
        assert_eq!(quantifier.select_causes(false, 4, &results), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_at_most_cites_satisfied_elements_either_way() {
        let results = elements(&[true, false, false]);
        assert_eq!(Quantifier::AtMost(1).select_causes(true, 1, &results), vec![0]);

        let results = elements(&[true, true, false]);
        assert_eq!(Quantifier::AtMost(1).select_causes(false, 2, &results), vec![0, 1]);

        // nothing satisfied under the cap: every element is cited
        let results = elements(&[false, false]);
        assert_eq!(Quantifier::AtMost(1).select_causes(true, 0, &results), vec![0, 1]);
    }

    #[test]
    fn test_empty_side_falls_back_to_all_elements() {
        let results = elements(&[false, false]);
        // at least zero holds, yet no element is satisfied
        assert_eq!(Quantifier::AtLeast(0).select_causes(true, 0, &results), vec![0, 1]);
        assert_eq!(Quantifier::Exactly(0).select_causes(true, 0, &results), vec![0, 1]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Quantifier::AtLeast(2).to_string(), "at least 2");
        assert_eq!(Quantifier::Range { min: 1, max: 3 }.to_string(), "between 1 and 3");
        assert_eq!(Quantifier::NoneOf.label(), "none");
    }

    #[test]
    fn test_quantifier_serializes() {
        let json = serde_json::to_string(&Quantifier::AtLeast(2)).unwrap();
        assert_eq!(json, r#"{"at_least":2}"#);
        let back: Quantifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Quantifier::AtLeast(2));
    }
}
