use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{RawWaker, RawWakerVTable, Waker};

/// Wake-up flag shared between a task and the wakers handed to its frame.
///
/// There is no scheduler to notify: the driver decides when to resume.
/// The flag only records whether the computation asked to be polled again
/// during its last step, which is reported in the step trace.
#[derive(Debug, Default)]
pub(crate) struct Signal {
    woken: AtomicBool,
}

impl Signal {
    pub(crate) fn notify(&self) {
        self.woken.store(true, Ordering::Release);
    }

    /// Returns whether a wake-up arrived since the last call, clearing the flag.
    pub(crate) fn take(&self) -> bool {
        self.woken.swap(false, Ordering::AcqRel)
    }
}

/// Vtable shared by every waker handed to a task's frame.
///
/// # Safety
///
/// Each entry receives a pointer produced by `Arc::<Signal>::into_raw` and
/// must leave the strong count exactly as the [`RawWaker`] contract expects:
/// `clone` adds one reference, `wake` and `drop` release one, `wake_by_ref`
/// leaves it unchanged.
static VTABLE: RawWakerVTable = RawWakerVTable::new(clone_raw, wake_raw, wake_by_ref_raw, drop_raw);

/// Creates a [`Waker`] that sets `signal` when woken.
///
/// The waker may outlive the `resume` call it was created for; a computation
/// is free to stash it and wake it later, which only sets the flag.
///
/// # Safety
///
/// The `unsafe` block is sound because the data pointer comes from
/// `Arc::into_raw`, so it stays valid until the matching `drop_raw` or
/// `wake_raw` turns it back into an `Arc` and releases it.
pub(crate) fn make_waker(signal: Arc<Signal>) -> Waker {
    unsafe { Waker::from_raw(RawWaker::new(Arc::into_raw(signal) as *const (), &VTABLE)) }
}

/// Clones the raw waker.
///
/// Rebuilds the `Arc` only to bump its count, then forgets it so the
/// original waker keeps its own reference.
fn clone_raw(ptr: *const ()) -> RawWaker {
    let arc = unsafe { Arc::<Signal>::from_raw(ptr as *const Signal) };
    let cloned = arc.clone();
    mem::forget(arc);

    RawWaker::new(Arc::into_raw(cloned) as *const (), &VTABLE)
}

/// Wakes and consumes the waker.
///
/// Takes ownership of the waker's reference, sets the flag, and drops the
/// `Arc`, releasing that reference.
fn wake_raw(ptr: *const ()) {
    let arc = unsafe { Arc::<Signal>::from_raw(ptr as *const Signal) };
    arc.notify();
}

/// Wakes without consuming the waker.
///
/// The rebuilt `Arc` is forgotten afterwards so the count is unchanged.
fn wake_by_ref_raw(ptr: *const ()) {
    let arc = unsafe { Arc::<Signal>::from_raw(ptr as *const Signal) };
    arc.notify();
    mem::forget(arc);
}

/// Drops the raw waker, releasing its reference to the signal.
fn drop_raw(ptr: *const ()) {
    unsafe { drop(Arc::<Signal>::from_raw(ptr as *const Signal)) };
}
