//! Error types for the core dashboard logic.

/// Errors raised by form and view state transitions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A form submission was attempted while another is still in flight.
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    /// Coerced form values did not decode into a request body.
    #[error("form does not match its request body: {0}")]
    Draft(#[from] serde_json::Error),
}
