// Copyright 2025 Cowboy AI, LLC.

//! Error types for proposition construction and evaluation

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The logical role of a user-supplied callback inside a proposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackRole {
    /// The boolean predicate of a leaf proposition
    Predicate,
    /// A function producing a complete result for a proposition
    Evaluation,
    /// The metadata factory used when the predicate holds
    WhenTrue,
    /// The metadata factory used when the predicate does not hold
    WhenFalse,
}

impl CallbackRole {
    /// Name of the role as it appears in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackRole::Predicate => "predicate",
            CallbackRole::Evaluation => "evaluation",
            CallbackRole::WhenTrue => "whenTrue",
            CallbackRole::WhenFalse => "whenFalse",
        }
    }
}

impl fmt::Display for CallbackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building or evaluating propositions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropositionError {
    /// A construction argument is out of range
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        parameter: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A required construction argument was not supplied
    #[error("Missing required value: {0}")]
    MissingValue(String),

    /// A user callback failed while a proposition was being evaluated
    #[error("An exception was thrown while evaluating the '{role}' callback of {proposition}: {message}")]
    Callback {
        /// Pretty type name and statement of the owning proposition
        proposition: String,
        /// Which callback failed
        role: CallbackRole,
        /// The failure reported by the callback
        message: String,
    },
}

/// Result type for proposition operations
pub type PropositionResult<T> = Result<T, PropositionError>;

impl PropositionError {
    /// Create an invalid argument error
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        PropositionError::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing value error
    pub fn missing(what: impl Into<String>) -> Self {
        PropositionError::MissingValue(what.into())
    }

    /// Check if this error was raised at construction time
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PropositionError::InvalidArgument { .. } | PropositionError::MissingValue(_)
        )
    }

    /// Check if this error came from a failing user callback
    pub fn is_callback_error(&self) -> bool {
        matches!(self, PropositionError::Callback { .. })
    }

    /// The callback role, when this is a callback error
    pub fn role(&self) -> Option<CallbackRole> {
        match self {
            PropositionError::Callback { role, .. } => Some(*role),
            _ => None,
        }
    }
}
