use super::Task;

use std::borrow::Cow;
use std::future::Future;

/// Builder for configuring and creating a [`Task`].
///
/// `Task::new` and `Task::infallible` cover the common case; the builder
/// adds a diagnostic name and control over panic capture.
///
/// # Examples
///
/// ```rust
/// use stepwise::{Task, TaskBuilder};
///
/// let mut task: Task<u32> = TaskBuilder::new()
///     .name("double")
///     .build_infallible(async { 21 * 2 });
///
/// assert_eq!(task.name(), Some("double"));
/// assert_eq!(task.drive().unwrap(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    /// Name reported in traces and `Debug` output.
    name: Option<Cow<'static, str>>,

    /// Whether panics inside the computation are stored as failures.
    catch_panics: bool,
}

impl TaskBuilder {
    /// Creates a builder with no name and panic capture enabled.
    pub fn new() -> Self {
        Self {
            name: None,
            catch_panics: true,
        }
    }

    /// Sets the diagnostic name of the task.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Controls what happens when the computation panics.
    ///
    /// With `true` (the default) the panic is caught at the `resume` boundary
    /// and surfaced later as [`TaskError::Panicked`](crate::TaskError::Panicked).
    /// With `false` the panic propagates out of `resume`, and the task is left
    /// `Empty` with its frame released.
    pub fn catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// Builds a task from a computation that may fail.
    ///
    /// The computation is not started; the task begins `Suspended`.
    pub fn build<F, T, E>(self, future: F) -> Task<T, E>
    where
        F: Future<Output = Result<T, E>> + 'static,
        T: 'static,
        E: 'static,
    {
        Task::from_parts(Box::pin(future), self.name, self.catch_panics)
    }

    /// Builds a task from a computation that cannot fail, short of panicking.
    pub fn build_infallible<F, T, E>(self, future: F) -> Task<T, E>
    where
        F: Future<Output = T> + 'static,
        T: 'static,
        E: 'static,
    {
        self.build(async move { Ok(future.await) })
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
