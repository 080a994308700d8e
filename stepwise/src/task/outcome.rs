use crate::error::TaskError;

use std::any::Any;
use std::mem;

/// The single slot a task stores its terminal outcome in.
///
/// Being an enum, it can never hold a value and a failure at the same time.
pub(crate) enum Outcome<T, E> {
    /// Nothing stored yet, or already taken.
    Vacant,

    /// The computation returned a value.
    Ready(T),

    /// The computation returned an error.
    Failed(E),

    /// The computation panicked; the payload is kept as raised.
    Panicked(Box<dyn Any + Send>),
}

impl<T, E> Outcome<T, E> {
    /// Takes the stored outcome, leaving the slot `Vacant`.
    pub(crate) fn take(&mut self) -> Outcome<T, E> {
        mem::replace(self, Outcome::Vacant)
    }

    pub(crate) fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_) | Outcome::Panicked(_))
    }

    /// Converts a collected outcome into what `get_result` hands back.
    ///
    /// Returns `None` for a vacant slot.
    pub(crate) fn into_result(self) -> Option<Result<T, TaskError<E>>> {
        match self {
            Outcome::Vacant => None,
            Outcome::Ready(value) => Some(Ok(value)),
            Outcome::Failed(err) => Some(Err(TaskError::Failed(err))),
            Outcome::Panicked(payload) => Some(Err(TaskError::Panicked(payload))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_leaves_slot_vacant() {
        let mut slot: Outcome<i32, ()> = Outcome::Ready(7);

        assert!(matches!(slot.take(), Outcome::Ready(7)));
        assert!(matches!(slot, Outcome::Vacant));
        assert!(slot.take().into_result().is_none());
    }

    #[test]
    fn panic_payload_survives_the_slot() {
        let mut slot: Outcome<(), ()> = Outcome::Panicked(Box::new(42u8));
        assert!(slot.is_failure());

        let payload = match slot.take().into_result() {
            Some(Err(TaskError::Panicked(payload))) => payload,
            _ => panic!("expected a stored panic"),
        };
        assert_eq!(payload.downcast_ref::<u8>(), Some(&42));
    }
}
