// Copyright 2025 Cowboy AI, LLC.

//! # CIM Proposition
//!
//! Composable, self-explaining boolean propositions.
//!
//! A [`Proposition`] is a named condition over a model. Evaluating it yields
//! a [`BooleanResult`] that records not only whether the condition held but
//! *why*: the determinative causes, a one-line reason, a multi-line
//! justification, and a causal tree of assertions and typed metadata.
//!
//! - **Leaves**: a predicate plus branch metadata ([`Outcomes`])
//! - **Binary combinators**: AND, AND-ALSO, OR, OR-ELSE, XOR, NOT
//! - **Quantifiers**: ALL, ANY, NONE, AT-LEAST, AT-MOST, EXACTLY, RANGE
//! - **Visitors**: flatten a result into metadata or assertions
//!
//! ## Example
//!
//! ```
//! use cim_proposition::Proposition;
//!
//! let is_even = Proposition::from_predicate("is even", |n: &i32| n % 2 == 0)?;
//! let is_positive = Proposition::from_predicate("is positive", |n: &i32| *n > 0)?;
//!
//! let result = is_even.and(&is_positive).evaluate(&-4)?;
//! assert!(!result.satisfied());
//! assert_eq!(result.reason(), "!is positive");
//!
//! let two_evens = is_even.at_least(2).evaluate(&vec![1, 2, 3, 4])?;
//! assert!(two_evens.satisfied());
//! assert_eq!(two_evens.causes().len(), 2);
//! # Ok::<(), cim_proposition::PropositionError>(())
//! ```
//!
//! ## Failure containment
//!
//! An error or panic raised by a user callback is reported once as
//! [`PropositionError::Callback`], naming the proposition and the failing
//! role. Composite propositions propagate operand errors unchanged. The
//! process panic hook is never replaced, so the default hook still prints
//! contained panics to stderr.

#![warn(missing_docs)]

pub mod combinators;
pub mod config;
mod containment;
pub mod errors;
pub mod humanize;
pub mod metadata;
pub mod proposition;
pub mod result;
pub mod visitor;

pub use combinators::{BinaryOperator, Quantifier, QuantifierEvaluation};
pub use config::RenderConfig;
pub use errors::{CallbackRole, PropositionError, PropositionResult};
pub use metadata::Metadata;
pub use proposition::{
    EvaluationFn, ModelFn, Outcomes, Proposition, PropositionDescription, PropositionShape,
    QuantifierOutcomes,
};
pub use result::{
    BooleanResult, Explanation, MetadataNode, MetadataOverride, ResultDescription, ResultKind,
    ResultReport,
};
pub use visitor::{MetadataVisitor, VisitPolicy};
