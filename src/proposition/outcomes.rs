// Copyright 2025 Cowboy AI, LLC.

//! Branch metadata configuration
//!
//! [`Outcomes`] configures the metadata a leaf (or summarised) proposition
//! yields for each branch; [`QuantifierOutcomes`] configures the substitute
//! metadata of a quantified proposition. Unset text branches default to the
//! statement and its negation.

use std::fmt;
use std::sync::Arc;

use crate::combinators::QuantifierEvaluation;
use crate::errors::{PropositionError, PropositionResult};
use crate::humanize;
use crate::metadata::Metadata;

/// Function producing metadata from a model
pub type ModelFn<M, T> = Arc<dyn Fn(&M) -> anyhow::Result<T> + Send + Sync>;

/// Function producing substitute metadata from a quantifier evaluation
pub type EvaluationFn<M, T> =
    Arc<dyn for<'a> Fn(&QuantifierEvaluation<'a, M, T>) -> anyhow::Result<Vec<T>> + Send + Sync>;

/// Metadata produced for each branch of a proposition
pub struct Outcomes<M, T> {
    /// Metadata when the predicate holds
    pub on_true: Option<ModelFn<M, T>>,
    /// Metadata when the predicate does not hold
    pub on_false: Option<ModelFn<M, T>>,
}

/// Branch functions after defaults are applied
pub(crate) struct Branches<M, T> {
    pub(crate) on_true: ModelFn<M, T>,
    pub(crate) on_false: ModelFn<M, T>,
}

impl<M, T> fmt::Debug for Branches<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branches").finish_non_exhaustive()
    }
}

impl<M, T> Default for Outcomes<M, T> {
    fn default() -> Self {
        Self {
            on_true: None,
            on_false: None,
        }
    }
}

impl<M, T> Clone for Outcomes<M, T> {
    fn clone(&self) -> Self {
        Self {
            on_true: self.on_true.clone(),
            on_false: self.on_false.clone(),
        }
    }
}

impl<M, T> fmt::Debug for Outcomes<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcomes")
            .field("on_true", &self.on_true.is_some())
            .field("on_false", &self.on_false.is_some())
            .finish()
    }
}

impl<M: 'static, T: Metadata> Outcomes<M, T> {
    /// No branch configured; only valid for text metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed metadata for each branch
    pub fn fixed(on_true: T, on_false: T) -> Self {
        Self::new().when_true(on_true).when_false(on_false)
    }

    /// Model-derived metadata for each branch
    pub fn from_fns<F, G>(on_true: F, on_false: G) -> Self
    where
        F: Fn(&M) -> T + Send + Sync + 'static,
        G: Fn(&M) -> T + Send + Sync + 'static,
    {
        Self::new()
            .when_true_fn(move |model| Ok(on_true(model)))
            .when_false_fn(move |model| Ok(on_false(model)))
    }

    /// Fixed metadata when the predicate holds
    pub fn when_true(self, value: T) -> Self {
        self.when_true_fn(move |_| Ok(value.clone()))
    }

    /// Fixed metadata when the predicate does not hold
    pub fn when_false(self, value: T) -> Self {
        self.when_false_fn(move |_| Ok(value.clone()))
    }

    /// Fallible metadata factory when the predicate holds
    pub fn when_true_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn(&M) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.on_true = Some(Arc::new(factory));
        self
    }

    /// Fallible metadata factory when the predicate does not hold
    pub fn when_false_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn(&M) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.on_false = Some(Arc::new(factory));
        self
    }

    /// Apply defaults to unset branches
    pub(crate) fn resolve(self, statement: &str) -> PropositionResult<Branches<M, T>> {
        Ok(Branches {
            on_true: resolve_branch(self.on_true, statement, "whenTrue")?,
            on_false: resolve_branch(self.on_false, &humanize::negate(statement), "whenFalse")?,
        })
    }
}

impl<M: 'static> Outcomes<M, String> {
    /// Fixed text for each branch
    pub fn text(on_true: impl Into<String>, on_false: impl Into<String>) -> Self {
        Self::fixed(on_true.into(), on_false.into())
    }
}

fn resolve_branch<M: 'static, T: Metadata>(
    branch: Option<ModelFn<M, T>>,
    assertion: &str,
    role: &str,
) -> PropositionResult<ModelFn<M, T>> {
    if let Some(factory) = branch {
        return Ok(factory);
    }
    let value = T::from_assertion(assertion)
        .ok_or_else(|| PropositionError::missing(format!("{role} metadata")))?;
    Ok(Arc::new(move |_: &M| Ok(value.clone())))
}

/// Substitute metadata for each outcome of a quantified proposition
///
/// An unset branch leaves the aggregate's metadata as the union of its
/// causes' metadata. A factory returning no values behaves the same way.
pub struct QuantifierOutcomes<M, T: Metadata> {
    /// Substitute when the quantifier is satisfied
    pub on_true: Option<EvaluationFn<M, T>>,
    /// Substitute when the quantifier is not satisfied
    pub on_false: Option<EvaluationFn<M, T>>,
}

impl<M, T: Metadata> Default for QuantifierOutcomes<M, T> {
    fn default() -> Self {
        Self {
            on_true: None,
            on_false: None,
        }
    }
}

impl<M, T: Metadata> Clone for QuantifierOutcomes<M, T> {
    fn clone(&self) -> Self {
        Self {
            on_true: self.on_true.clone(),
            on_false: self.on_false.clone(),
        }
    }
}

impl<M, T: Metadata> fmt::Debug for QuantifierOutcomes<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantifierOutcomes")
            .field("on_true", &self.on_true.is_some())
            .field("on_false", &self.on_false.is_some())
            .finish()
    }
}

impl<M: 'static, T: Metadata> QuantifierOutcomes<M, T> {
    /// No substitutes; metadata comes from the causes
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed substitute for each outcome
    pub fn fixed(on_true: T, on_false: T) -> Self {
        Self::new().when_true(on_true).when_false(on_false)
    }

    /// Fixed substitute when satisfied
    pub fn when_true(self, value: T) -> Self {
        self.when_true_fn(move |_| Ok(vec![value.clone()]))
    }

    /// Fixed substitute when not satisfied
    pub fn when_false(self, value: T) -> Self {
        self.when_false_fn(move |_| Ok(vec![value.clone()]))
    }

    /// Substitute factory when satisfied
    pub fn when_true_fn<F>(mut self, factory: F) -> Self
    where
        F: for<'a> Fn(&QuantifierEvaluation<'a, M, T>) -> anyhow::Result<Vec<T>>
            + Send
            + Sync
            + 'static,
    {
        self.on_true = Some(Arc::new(factory));
        self
    }

    /// Substitute factory when not satisfied
    pub fn when_false_fn<F>(mut self, factory: F) -> Self
    where
        F: for<'a> Fn(&QuantifierEvaluation<'a, M, T>) -> anyhow::Result<Vec<T>>
            + Send
            + Sync
            + 'static,
    {
        self.on_false = Some(Arc::new(factory));
        self
    }
}

impl<M: 'static> QuantifierOutcomes<M, String> {
    /// Fixed substitute text for each outcome
    pub fn text(on_true: impl Into<String>, on_false: impl Into<String>) -> Self {
        Self::fixed(on_true.into(), on_false.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_branches_default_to_statement() {
        let branches = Outcomes::<i32, String>::new().resolve("is even").unwrap();
        assert_eq!((branches.on_true)(&2).unwrap(), "is even");
        assert_eq!((branches.on_false)(&3).unwrap(), "!is even");
    }

    #[test]
    fn test_explicit_branches_win() {
        let branches = Outcomes::<i32, String>::text("even", "odd")
            .resolve("is even")
            .unwrap();
        assert_eq!((branches.on_true)(&2).unwrap(), "even");
        assert_eq!((branches.on_false)(&3).unwrap(), "odd");
    }

    #[test]
    fn test_opaque_metadata_requires_both_branches() {
        let err = Outcomes::<i32, u8>::new().when_true(1).resolve("x").unwrap_err();
        assert_eq!(err, PropositionError::missing("whenFalse metadata"));
        assert!(Outcomes::<i32, u8>::fixed(1, 0).resolve("x").is_ok());
    }

    #[test]
    fn test_model_derived_branches() {
        let branches = Outcomes::<i32, String>::from_fns(
            |n| format!("{n} is even"),
            |n| format!("{n} is odd"),
        )
        .resolve("is even")
        .unwrap();
        assert_eq!((branches.on_false)(&7).unwrap(), "7 is odd");
    }
}
