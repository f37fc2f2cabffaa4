use crate::instance::ErrorPtr;
use std::error::Error;
use std::rc::Rc;
use thiserror::Error;

/// Errors related to registering and resolving dependencies.
#[derive(Error, Clone, Debug)]
pub enum ContainerError {
    #[error("Dependency tags cannot be empty")]
    EmptyTag,
    #[error("Duplicate dependency tag: {0}")]
    DuplicateTag(String),
    #[error("Dependency not found: {0}")]
    UnknownTag(String),
    #[error("Malformed callable: {0}")]
    MalformedCallable(String),
    #[error("Dependency cycle detected: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),
    #[error("Dependency '{tag}' is not of the requested type: {expected}")]
    IncompatibleValue { tag: String, expected: String },
    #[error("Requested argument {index}, but only {available} were injected")]
    ArgumentOutOfRange { index: usize, available: usize },
    #[error("Error constructing {name}: {error}")]
    Construction { name: String, error: ErrorPtr },
}

impl ContainerError {
    /// Wraps an error returned by a fallible constructor.
    pub fn construction<N: Into<String>, E: Error + 'static>(name: N, error: E) -> Self {
        Self::Construction {
            name: name.into(),
            error: Rc::new(error),
        }
    }
}
