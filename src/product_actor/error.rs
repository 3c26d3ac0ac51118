use thiserror::Error;
use validator::ValidationErrors;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound { id: u64 },
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Product rejected: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Maps an actor-level failure for the product with the given id.
    pub fn from_framework(id: Option<u64>, err: FrameworkError) -> Self {
        match (err, id) {
            (FrameworkError::NotFound(_), Some(id)) => ProductError::NotFound { id },
            (FrameworkError::Rejected(reason), _) => ProductError::Rejected(reason),
            (other, _) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(err: ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();
        messages.sort();
        ProductError::ValidationError(messages.join("; "))
    }
}
