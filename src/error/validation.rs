use thiserror::Error as ThisError;

/// Submission rejected before touching the store.
///
/// The display text is the notice shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingField,

    #[error("Invalid link. It must start with http:// or https://")]
    InvalidLink,
}
