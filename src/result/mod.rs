// Copyright 2025 Cowboy AI, LLC.

//! Results of evaluating propositions
//!
//! A [`BooleanResult`] records whether a proposition held for a model, a
//! one-line reason, and the determinative causes of that outcome. The
//! explanation tree, metadata tree and multi-line justification are derived
//! from the causes on first access and cached inside the result; a result is
//! never mutated after construction, so it can be shared and read from any
//! number of threads.

mod explanation;
mod justification;

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub use explanation::{Explanation, MetadataNode};

use crate::combinators::{BinaryOperator, Quantifier};
use crate::config::RenderConfig;
use crate::humanize;
use crate::metadata::Metadata;

/// Substitute assertions and metadata recorded by a combinator
///
/// When present, the substitute becomes the result's own assertion and
/// metadata while the operands stay reachable as the suppressed detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataOverride<T: Metadata> {
    assertions: IndexSet<String>,
    metadata: IndexSet<T>,
}

impl<T: Metadata> MetadataOverride<T> {
    /// Build an override from metadata values, deriving assertion text from
    /// each value or from `fallback` when the value carries none
    pub(crate) fn from_values(values: Vec<T>, fallback: &str) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let assertions = values
            .iter()
            .map(|value| value.assertion().unwrap_or_else(|| fallback.to_string()))
            .collect();
        Some(Self {
            assertions,
            metadata: values.into_iter().collect(),
        })
    }

    /// Build an override from a single metadata value
    pub(crate) fn single(value: T, fallback: &str) -> Self {
        let assertion = value.assertion().unwrap_or_else(|| fallback.to_string());
        Self {
            assertions: IndexSet::from([assertion]),
            metadata: IndexSet::from([value]),
        }
    }

    /// The substituted assertions
    pub fn assertions(&self) -> &IndexSet<String> {
        &self.assertions
    }

    /// The substituted metadata values
    pub fn metadata(&self) -> &IndexSet<T> {
        &self.metadata
    }
}

/// The closed set of result shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultKind<T: Metadata> {
    /// Outcome of a single predicate
    Leaf {
        /// Human-readable assertion for the outcome
        assertion: String,
        /// Metadata produced for the outcome
        metadata: T,
    },
    /// Combination of two operands
    Binary(BinaryOperator),
    /// Negation of one operand
    Not,
    /// Aggregate over the elements of a collection
    Quantifier {
        /// Counting rule applied to the elements
        quantifier: Quantifier,
        /// Number of satisfied elements
        true_count: usize,
        /// Substitute metadata chosen for the outcome, if any
        overridden: Option<MetadataOverride<T>>,
    },
    /// Re-labelled operand with substitute metadata
    Summarized(MetadataOverride<T>),
}

impl<T: Metadata> ResultKind<T> {
    /// The substitute metadata recorded by this shape, if any
    pub fn metadata_override(&self) -> Option<&MetadataOverride<T>> {
        match self {
            ResultKind::Quantifier { overridden, .. } => overridden.as_ref(),
            ResultKind::Summarized(substitute) => Some(substitute),
            _ => None,
        }
    }
}

struct ResultInner<T: Metadata> {
    satisfied: bool,
    reason: String,
    kind: ResultKind<T>,
    underlying: Vec<BooleanResult<T>>,
    causes: Vec<BooleanResult<T>>,
    explanation: OnceLock<Arc<Explanation>>,
    metadata_tree: OnceLock<Arc<MetadataNode<T>>>,
    justification: OnceLock<String>,
}

/// The outcome of evaluating a proposition against a model
pub struct BooleanResult<T: Metadata = String> {
    inner: Arc<ResultInner<T>>,
}

impl<T: Metadata> Clone for BooleanResult<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Metadata> BooleanResult<T> {
    pub(crate) fn from_parts(
        satisfied: bool,
        reason: String,
        kind: ResultKind<T>,
        underlying: Vec<BooleanResult<T>>,
        causes: Vec<BooleanResult<T>>,
    ) -> Self {
        Self {
            inner: Arc::new(ResultInner {
                satisfied,
                reason,
                kind,
                underlying,
                causes,
                explanation: OnceLock::new(),
                metadata_tree: OnceLock::new(),
                justification: OnceLock::new(),
            }),
        }
    }

    /// Create a leaf result for a single predicate outcome
    pub fn leaf(satisfied: bool, assertion: impl Into<String>, metadata: T) -> Self {
        let assertion = assertion.into();
        Self::from_parts(
            satisfied,
            assertion.clone(),
            ResultKind::Leaf {
                assertion,
                metadata,
            },
            Vec::new(),
            Vec::new(),
        )
    }

    /// Re-label this result with substitute metadata
    pub(crate) fn summarized(self, substitute: MetadataOverride<T>) -> Self {
        let reason = humanize::join_and(substitute.assertions());
        let satisfied = self.satisfied();
        Self::from_parts(
            satisfied,
            reason,
            ResultKind::Summarized(substitute),
            vec![self.clone()],
            vec![self],
        )
    }

    /// Whether the proposition held
    pub fn satisfied(&self) -> bool {
        self.inner.satisfied
    }

    /// One-line reason for the outcome
    pub fn reason(&self) -> &str {
        &self.inner.reason
    }

    /// Reason and justification of this result
    pub fn description(&self) -> ResultDescription<'_, T> {
        ResultDescription { result: self }
    }

    /// The shape of this result
    pub fn kind(&self) -> &ResultKind<T> {
        &self.inner.kind
    }

    /// Every immediate operand, regardless of causal relevance
    pub fn underlying(&self) -> &[BooleanResult<T>] {
        &self.inner.underlying
    }

    /// The operands that determined the outcome
    pub fn causes(&self) -> &[BooleanResult<T>] {
        &self.inner.causes
    }

    /// Assertions explaining the outcome
    pub fn assertions(&self) -> &IndexSet<String> {
        self.explanation().assertions()
    }

    /// Metadata explaining the outcome
    pub fn metadata(&self) -> &IndexSet<T> {
        self.metadata_tree().metadata()
    }

    /// The explanation tree, built on first access
    pub fn explanation(&self) -> &Explanation {
        self.explanation_arc_ref()
    }

    /// The metadata tree, built on first access
    pub fn metadata_tree(&self) -> &MetadataNode<T> {
        self.metadata_tree_arc_ref()
    }

    pub(crate) fn explanation_arc_ref(&self) -> &Arc<Explanation> {
        self.inner
            .explanation
            .get_or_init(|| Arc::new(explanation::build_explanation(self)))
    }

    pub(crate) fn metadata_tree_arc_ref(&self) -> &Arc<MetadataNode<T>> {
        self.inner
            .metadata_tree
            .get_or_init(|| Arc::new(explanation::build_metadata_tree(self)))
    }

    /// Serialisable snapshot of this result
    pub fn report(&self) -> ResultReport {
        ResultReport {
            satisfied: self.satisfied(),
            reason: self.reason().to_string(),
            assertions: self.assertions().iter().cloned().collect(),
            justification: self.description().justification().to_string(),
        }
    }
}

impl<T: Metadata> PartialEq for BooleanResult<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.satisfied() == other.satisfied()
                && self.reason() == other.reason()
                && self.kind() == other.kind()
                && self.underlying() == other.underlying()
                && self.causes() == other.causes())
    }
}

impl<T: Metadata> Eq for BooleanResult<T> {}

impl<T: Metadata> fmt::Debug for BooleanResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanResult")
            .field("satisfied", &self.satisfied())
            .field("reason", &self.reason())
            .field("causes", &self.causes())
            .finish()
    }
}

impl<T: Metadata> fmt::Display for BooleanResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Reason and justification view over a result
#[derive(Debug)]
pub struct ResultDescription<'a, T: Metadata> {
    result: &'a BooleanResult<T>,
}

impl<T: Metadata> Clone for ResultDescription<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Metadata> Copy for ResultDescription<'_, T> {}

impl<'a, T: Metadata> ResultDescription<'a, T> {
    /// One-line reason
    pub fn reason(&self) -> &'a str {
        self.result.reason()
    }

    /// Multi-line justification using the default layout, cached per result
    pub fn justification(&self) -> &'a str {
        let result = self.result;
        result
            .inner
            .justification
            .get_or_init(|| justification::render(result, &RenderConfig::default()))
    }

    /// Multi-line justification using a custom layout
    pub fn justification_with(&self, config: &RenderConfig) -> String {
        justification::render(self.result, config)
    }
}

/// Serialisable snapshot of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultReport {
    /// Whether the proposition held
    pub satisfied: bool,
    /// One-line reason
    pub reason: String,
    /// Deduplicated assertions in first-seen order
    pub assertions: Vec<String>,
    /// Multi-line justification
    pub justification: String,
}
