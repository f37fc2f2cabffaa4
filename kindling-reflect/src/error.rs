use thiserror::Error;

/// Errors related to reflecting callable parameters.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ReflectError {
    #[error("Not a callable with injectable parameters: {0}")]
    MalformedCallable(String),
    #[error("Could not parse callable:\n{callable}\n{message}")]
    Parse { callable: String, message: String },
}
