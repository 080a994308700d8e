use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future returned by [`suspend`].
#[derive(Debug)]
#[must_use = "suspension only happens when the future is awaited"]
pub struct Suspend {
    yielded: bool,
}

impl Future for Suspend {
    type Output = ();

    /// The first poll parks the computation: `resume` returns `true` to the
    /// driver. The wake-up only marks the step as a voluntary suspension; no
    /// one is scheduled by it. The poll after that lets the computation
    /// continue past the `.await`.
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.yielded {
            return Poll::Ready(());
        }

        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Suspends the running computation exactly once.
///
/// The current `resume` call returns `true`; the next one continues right
/// after the `.await`.
///
/// # Examples
///
/// ```rust
/// use stepwise::{Task, suspend};
///
/// let mut task: Task<u32> = Task::infallible(async {
///     suspend().await;
///     7
/// });
///
/// assert!(task.resume());
/// assert!(!task.resume());
/// assert_eq!(task.get_result().unwrap(), 7);
/// ```
pub fn suspend() -> Suspend {
    Suspend { yielded: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::task::Waker;

    #[test]
    fn yields_exactly_once() {
        let mut fut = suspend();
        let mut cx = Context::from_waker(Waker::noop());

        assert!(Pin::new(&mut fut).poll(&mut cx).is_pending());
        assert!(Pin::new(&mut fut).poll(&mut cx).is_ready());
    }
}
