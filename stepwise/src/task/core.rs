use super::outcome::Outcome;
use super::state::TaskState;
use super::waker::{Signal, make_waker};
use super::TaskBuilder;
use crate::error::{BoxError, TaskError};

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// The owned, suspended execution frame of a computation.
type Frame<T, E> = Pin<Box<dyn Future<Output = Result<T, E>>>>;

/// A suspendable unit of computation with a single eventual result.
///
/// A `Task` owns its computation frame exclusively. It does nothing on its
/// own: a driver calls [`resume`](Task::resume) until it returns `false`,
/// then collects the outcome with [`get_result`](Task::get_result).
///
/// `Task<()>` is the variant that produces no value.
///
/// Tasks are neither `Clone` nor `Send`. Dropping a task releases the frame
/// at whatever suspension point it is parked on; nothing past that point runs.
///
/// # Examples
///
/// ```rust
/// use stepwise::Task;
///
/// let mut task: Task<i32> = Task::infallible(async { 10 * 2 });
///
/// while task.resume() {}
/// assert_eq!(task.get_result().unwrap(), 20);
/// ```
#[must_use = "a task does nothing unless it is resumed"]
pub struct Task<T, E = BoxError> {
    /// The computation. `None` once terminal or for an empty task.
    frame: Option<Frame<T, E>>,

    /// Result or failure, populated once on termination.
    outcome: Outcome<T, E>,

    state: TaskState,

    /// Wake-up flag shared with the wakers given to the frame.
    signal: Arc<Signal>,

    name: Option<Cow<'static, str>>,

    catch_panics: bool,

    /// Number of times the frame has been polled.
    steps: usize,
}

impl<T, E> Task<T, E> {
    /// Creates a task from a computation that may fail.
    ///
    /// The computation does not start until the first `resume`.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + 'static,
        T: 'static,
        E: 'static,
    {
        TaskBuilder::new().build(future)
    }

    /// Creates a task from a computation that only fails by panicking.
    pub fn infallible<F>(future: F) -> Self
    where
        F: Future<Output = T> + 'static,
        T: 'static,
        E: 'static,
    {
        TaskBuilder::new().build_infallible(future)
    }

    /// Creates a task that holds no computation.
    ///
    /// `resume` returns `false` and `get_result` fails with `InvalidState`.
    pub fn empty() -> Self {
        Self {
            frame: None,
            outcome: Outcome::Vacant,
            state: TaskState::Empty,
            signal: Arc::default(),
            name: None,
            catch_panics: true,
            steps: 0,
        }
    }

    pub(crate) fn from_parts(
        frame: Frame<T, E>,
        name: Option<Cow<'static, str>>,
        catch_panics: bool,
    ) -> Self {
        Self {
            frame: Some(frame),
            outcome: Outcome::Vacant,
            state: TaskState::Suspended,
            signal: Arc::default(),
            name,
            catch_panics,
            steps: 0,
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Returns `true` once no further resumption is meaningful.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the diagnostic name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns how many times the computation has been polled.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    /// Runs the computation until it suspends, completes or fails.
    ///
    /// Returns `true` if the task is still suspended and may be resumed
    /// again, `false` if it is terminal (including a task with no
    /// computation). Calling it on a terminal task is a no-op.
    ///
    /// Errors and, unless disabled through the builder, panics raised by
    /// the computation are stored rather than propagated; they surface
    /// from [`get_result`](Task::get_result).
    pub fn resume(&mut self) -> bool {
        if self.state != TaskState::Suspended {
            return false;
        }

        let Some(frame) = self.frame.as_mut() else {
            self.state = TaskState::Empty;
            return false;
        };

        self.state = TaskState::Running;
        self.steps += 1;

        let waker = make_waker(self.signal.clone());
        let mut cx = Context::from_waker(&waker);

        let poll = panic::catch_unwind(AssertUnwindSafe(|| frame.as_mut().poll(&mut cx)));

        match poll {
            Ok(Poll::Pending) => {
                self.state = TaskState::Suspended;

                let woken = self.signal.take();
                tracing::trace!(task = self.label(), step = self.steps, woken, "task suspended");

                true
            }
            Ok(Poll::Ready(Ok(value))) => {
                self.finish(Outcome::Ready(value));
                false
            }
            Ok(Poll::Ready(Err(err))) => {
                self.finish(Outcome::Failed(err));
                false
            }
            Err(payload) if self.catch_panics => {
                self.finish(Outcome::Panicked(payload));
                false
            }
            Err(payload) => {
                self.frame = None;
                self.state = TaskState::Empty;

                tracing::debug!(task = self.label(), step = self.steps, "task panicked, propagating");
                panic::resume_unwind(payload)
            }
        }
    }

    /// Stores the terminal outcome and releases the frame.
    fn finish(&mut self, outcome: Outcome<T, E>) {
        self.frame = None;
        self.state = if outcome.is_failure() {
            TaskState::Failed
        } else {
            TaskState::Completed
        };
        self.outcome = outcome;

        tracing::debug!(task = self.label(), steps = self.steps, state = %self.state, "task finished");
    }

    /// Collects the outcome of a terminated task.
    ///
    /// Returns the produced value, or the computation's failure as
    /// [`TaskError::Failed`] / [`TaskError::Panicked`]. The outcome can be
    /// collected once; afterwards the task is `Consumed`.
    ///
    /// # Errors
    ///
    /// [`TaskError::InvalidState`] if the task is `Suspended`, `Empty` or
    /// already `Consumed`. No value is produced in that case.
    pub fn get_result(&mut self) -> Result<T, TaskError<E>> {
        if !self.state.is_collectable() {
            return Err(TaskError::InvalidState(self.state));
        }

        self.state = TaskState::Consumed;

        self.outcome
            .take()
            .into_result()
            .unwrap_or(Err(TaskError::InvalidState(TaskState::Consumed)))
    }

    /// Consuming form of [`get_result`](Task::get_result).
    pub fn into_result(mut self) -> Result<T, TaskError<E>> {
        self.get_result()
    }

    /// Resumes the task until it stops, then collects its outcome.
    ///
    /// This is the plain drive-then-collect loop, nothing more: every
    /// suspension point is resumed through immediately.
    pub fn drive(&mut self) -> Result<T, TaskError<E>> {
        while self.resume() {}
        self.get_result()
    }

    /// Moves the whole task out, leaving an `Empty` task in its place.
    ///
    /// The returned task has exactly the state `self` had: frame, stored
    /// outcome, name and step count included.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl Task<()> {
    /// Returns a builder for a configured task.
    ///
    /// The builder is not tied to a result type; `T` and `E` are picked when
    /// it builds, so `Task::builder()` needs no annotations.
    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }
}

impl<T, E> Default for Task<T, E> {
    /// Returns an `Empty` task.
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E> Drop for Task<T, E> {
    fn drop(&mut self) {
        match self.state {
            TaskState::Suspended if self.steps > 0 => {
                tracing::debug!(task = self.label(), steps = self.steps, "abandoning suspended task");
            }
            TaskState::Failed => {
                tracing::warn!(task = self.label(), "task dropped without collecting its failure");
            }
            _ => {}
        }
    }
}

impl<T, E> fmt::Debug for Task<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
