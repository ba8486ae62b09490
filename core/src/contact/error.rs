//! Error types for contact form submission

use thiserror::Error;

/// Failures reported by a [`super::ContactTransport`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("transport rejected message: {0}")]
    Rejected(String),

    #[error("transport unreachable")]
    Unreachable,
}

/// Reasons a submit attempt never reached the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{invalid} field(s) failed validation")]
    Invalid { invalid: usize },

    #[error("a submission is already in flight")]
    InFlight,
}
