use stepwise::{Task, TaskState, suspend};

use std::cell::Cell;
use std::rc::Rc;

/// Records when the value holding it is dropped.
struct DropFlag(Rc<Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

#[test]
fn test_drop_fresh_task_never_runs_body() {
    let ran = Rc::new(Cell::new(false));
    let released = Rc::new(Cell::new(false));

    let flag = ran.clone();
    let guard = DropFlag(released.clone());

    let task: Task<()> = Task::infallible(async move {
        let _guard = guard;
        flag.set(true);
    });

    drop(task);

    assert!(!ran.get());
    assert!(released.get());
}

#[test]
fn test_drop_suspended_task_releases_frame() {
    let after_suspend = Rc::new(Cell::new(false));
    let released = Rc::new(Cell::new(false));

    let flag = after_suspend.clone();
    let guard = DropFlag(released.clone());

    let mut task: Task<()> = Task::infallible(async move {
        let _guard = guard;
        suspend().await;
        flag.set(true);
    });

    assert!(task.resume());
    assert_eq!(task.state(), TaskState::Suspended);
    assert!(!released.get());

    drop(task);

    assert!(released.get());
    assert!(!after_suspend.get());
}

#[test]
fn test_frame_released_on_completion() {
    let released = Rc::new(Cell::new(false));
    let guard = DropFlag(released.clone());

    let mut task: Task<i32> = Task::infallible(async move {
        let _captured = &guard;
        suspend().await;
        5
    });

    assert!(task.resume());
    assert!(!released.get());

    assert!(!task.resume());
    assert!(released.get());
    assert_eq!(task.get_result().unwrap(), 5);
}

#[test]
fn test_drop_unconsumed_failure_is_silent() {
    let mut task: Task<(), String> = Task::new(async { Err(String::from("ignored")) });

    assert!(!task.resume());
    assert_eq!(task.state(), TaskState::Failed);

    drop(task);
}

#[test]
fn test_drop_empty_after_take() {
    let mut task: Task<()> = Task::infallible(async {
        suspend().await;
    });
    assert!(task.resume());

    let moved = task.take();

    drop(task);
    drop(moved);
}
