//! Errors surfaced when collecting a task's outcome.

use crate::task::TaskState;

use std::any::Any;
use std::error::Error;

/// Boxed error used as the default failure type of a [`Task`](crate::Task).
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The error returned by [`Task::get_result`](crate::Task::get_result).
///
/// `Failed` and `Panicked` carry the computation's own failure; `InvalidState`
/// means the caller broke the task protocol. Use [`is_failure`](Self::is_failure)
/// to tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum TaskError<E> {
    /// The computation returned an error.
    #[error("task failed: {0}")]
    Failed(E),

    /// The computation panicked while being resumed.
    ///
    /// Holds the payload exactly as it was raised, so it can be downcast or
    /// handed back to [`std::panic::resume_unwind`].
    #[error("task panicked: {}", panic_message(.0))]
    Panicked(Box<dyn Any + Send + 'static>),

    /// `get_result` was called in a state that holds no outcome.
    #[error("task result is not available in the {0} state")]
    InvalidState(TaskState),
}

impl<E> TaskError<E> {
    /// Returns `true` if this error came from the computation itself.
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskError::Failed(_) | TaskError::Panicked(_))
    }

    /// Returns `true` if this error is a protocol violation by the caller.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, TaskError::InvalidState(_))
    }

    /// Returns `true` if the computation panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panicked(_))
    }

    /// Extracts the computation's error, if that is what this is.
    pub fn into_failure(self) -> Option<E> {
        match self {
            TaskError::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Extracts the original panic payload, if the computation panicked.
    ///
    /// ```rust
    /// use stepwise::Task;
    ///
    /// let mut task: Task<()> = Task::infallible(async { panic!("boom") });
    /// let payload = task.drive().unwrap_err().into_panic().unwrap();
    ///
    /// assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    /// ```
    pub fn into_panic(self) -> Option<Box<dyn Any + Send + 'static>> {
        match self {
            TaskError::Panicked(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Readable text for a panic payload.
///
/// `panic!` with a literal raises a `&'static str`, with formatting a `String`.
/// Other payloads (from `panic_any`) have no text of their own.
fn panic_message<'a>(payload: &'a Box<dyn Any + Send + 'static>) -> &'a str {
    let payload: &(dyn Any + Send) = &**payload;

    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
