use thiserror::Error;

/// Failures raised by slimsql itself, as opposed to the ones reported by the driver.
///
/// They travel inside [`crate::Error`], either as the root error or as context on top of the
/// original cause. Inspect them with [`SlimError::of`] or `error.downcast_ref::<SlimError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlimError {
    /// A `@name` placeholder has no entry in the parameters.
    #[error("Missing prepared statement value for SQL variable `@{0}`")]
    MissingParameter(String),
    /// Malformed connection string, or no parser registered for its scheme.
    #[error("Invalid connection string: {0}")]
    ConnectionStringParse(String),
    #[error("A pool is already open, close it before connecting again")]
    PoolAlreadyExists,
    /// `execute` was used on a statement that returned rows.
    #[error("The statement returned rows, use `query` for row-returning statements")]
    InvalidExecuteStatement,
    #[error("The pool is closed, call `connect` before running queries")]
    PoolClosed,
}

impl SlimError {
    /// Find the `SlimError` carried by `error`, if any.
    pub fn of(error: &crate::Error) -> Option<&SlimError> {
        error.downcast_ref::<SlimError>()
    }
}
