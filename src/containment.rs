// Copyright 2025 Cowboy AI, LLC.

//! Containment of failures raised by user callbacks
//!
//! Every predicate and metadata factory runs through [`guard`]. An error or
//! panic escaping the callback becomes a single
//! [`PropositionError::Callback`] naming the proposition and the failing
//! role. A `PropositionError` that is already terminal (for example from a
//! nested proposition evaluated inside the callback) passes through
//! unchanged. Allocation failure and stack overflow abort the process and
//! never reach this point.
//!
//! The panic hook is left to the host. The default hook still prints each
//! contained panic to stderr before it is reported here; install a quieter
//! hook with [`std::panic::set_hook`] if that output is unwanted.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::errors::{CallbackRole, PropositionError, PropositionResult};
use crate::humanize;

/// Diagnostic name of a proposition: pretty type name plus statement
pub(crate) fn diagnostic_label<P: ?Sized>(statement: &str) -> String {
    format!("{}({})", humanize::pretty_type_name::<P>(), statement)
}

/// Run a user callback, converting its failures into a callback error
pub(crate) fn guard<R, F>(proposition: &str, role: CallbackRole, callback: F) -> PropositionResult<R>
where
    F: FnOnce() -> anyhow::Result<R>,
{
    let message = match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(error)) => match error.downcast::<PropositionError>() {
            Ok(terminal) => return Err(terminal),
            Err(error) => format!("{error:#}"),
        },
        Err(payload) => panic_message(payload.as_ref()),
    };

    warn!(
        proposition = %proposition,
        role = %role,
        error = %message,
        "Proposition callback failed"
    );

    Err(PropositionError::Callback {
        proposition: proposition.to_string(),
        role,
        message,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "callback panicked".to_string()
    }
}
