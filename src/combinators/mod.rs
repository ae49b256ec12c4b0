// Copyright 2025 Cowboy AI, LLC.

//! Logical and quantifier combinators
//!
//! Combinators join evaluated results into composite results and decide
//! which operands are the determinative causes of the composite outcome.

pub mod binary;
pub mod quantifier;

pub use binary::BinaryOperator;
pub use quantifier::{Quantifier, QuantifierEvaluation};
