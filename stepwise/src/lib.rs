//! # Stepwise
//!
//! **Stepwise** provides a single cooperative primitive: the [`Task`], a
//! suspendable unit of computation that produces one typed result, or fails.
//!
//! There is no executor, no event loop and no threads. The caller is the
//! driver: it calls [`Task::resume`] until it returns `false`, then collects
//! the outcome with [`Task::get_result`]. Everything the computation does
//! happens inside those `resume` calls, in program order, interrupted only at
//! the suspension points the computation chooses (see [`suspend`]).
//!
//! - A computation's error (or panic) never escapes `resume`. It is stored
//!   and re-surfaced once, from `get_result`.
//! - Protocol mistakes (collecting too early, twice, or from an empty task)
//!   are reported as [`TaskError::InvalidState`].
//! - A task owns its frame exclusively; dropping it releases the frame at its
//!   last suspension point.
//!
//! ## Quick Start
//!
//! ```rust
//! use stepwise::suspend;
//!
//! #[stepwise::task]
//! async fn compute(x: i32) -> i32 {
//!     suspend().await;
//!     x * 2
//! }
//!
//! let mut first = compute(10);
//! while first.resume() {}
//! let doubled = first.get_result().unwrap();
//!
//! let mut second = compute(doubled);
//! while second.resume() {}
//! assert_eq!(second.get_result().unwrap(), 40);
//! ```
//!
//! ## Getting Started
//!
//! ```toml
//! [dependencies]
//! stepwise = { git = "https://github.com/Nebula-ecosystem/stepwise", package = "stepwise" }
//! ```

mod suspend;
mod task;

pub mod error;

pub use error::{BoxError, TaskError};
pub use suspend::{Suspend, suspend};
pub use task::{Task, TaskBuilder, TaskState};

pub use stepwise_macros::task;
