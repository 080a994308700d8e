use std::fmt;

/// Lifecycle state of a [`Task`](super::Task).
///
/// ```text
/// Suspended --resume--> Running --ready(Ok)--> Completed --get_result--> Consumed
///     ^                    |  \---ready(Err)/panic--> Failed --get_result--> Consumed
///     +------pending-------+
/// ```
///
/// `Empty` is the state of a task that holds no computation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Created or parked at a suspension point. The only resumable state.
    Suspended,

    /// The computation frame is being polled.
    ///
    /// Only observable from inside the frame (or after a panic escaped
    /// `resume` with panic capture disabled, which leaves the task `Empty`).
    Running,

    /// The computation returned a value, which is waiting to be collected.
    Completed,

    /// The computation raised an error or panicked.
    Failed,

    /// The outcome has been collected with `get_result`.
    Consumed,

    /// No computation: default-constructed or taken from.
    Empty,
}

impl TaskState {
    /// Returns `true` if no further resumption is meaningful.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Consumed | TaskState::Empty
        )
    }

    /// Returns `true` if an outcome is stored and may be collected.
    pub fn is_collectable(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Suspended => "suspended",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Consumed => "consumed",
            TaskState::Empty => "empty",
        };

        f.write_str(name)
    }
}
