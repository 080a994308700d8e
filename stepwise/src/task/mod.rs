//! The task primitive.
//!
//! This module defines [`Task`], its lifecycle states and the builder used
//! to configure it. The outcome slot and the driver waker are internal.

mod builder;
mod core;
mod outcome;
mod state;
mod waker;

pub use builder::TaskBuilder;
pub use self::core::Task;
pub use state::TaskState;
