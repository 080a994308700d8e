use stepwise::{Task, TaskError, TaskState, suspend};

fn two_step() -> Task<&'static str> {
    Task::infallible(async {
        suspend().await;
        "done"
    })
}

#[test]
fn test_take_leaves_source_empty() {
    let mut a = two_step();
    let mut b = a.take();

    assert_eq!(a.state(), TaskState::Empty);
    assert!(!a.resume());
    assert!(matches!(
        a.get_result(),
        Err(TaskError::InvalidState(TaskState::Empty))
    ));

    assert_eq!(b.state(), TaskState::Suspended);
    assert_eq!(b.drive().unwrap(), "done");
}

#[test]
fn test_take_mid_execution_preserves_progress() {
    let mut a = two_step();
    assert!(a.resume());

    let mut b = a.take();

    assert_eq!(b.state(), TaskState::Suspended);
    assert_eq!(b.steps(), 1);
    assert!(!b.resume());
    assert_eq!(b.get_result().unwrap(), "done");
}

#[test]
fn test_take_after_completion_moves_result() {
    let mut a = two_step();
    while a.resume() {}

    let mut b = std::mem::take(&mut a);

    assert_eq!(b.state(), TaskState::Completed);
    assert_eq!(b.get_result().unwrap(), "done");
    assert!(a.get_result().unwrap_err().is_invalid_state());
}

#[test]
fn test_take_after_failure_moves_failure() {
    let mut a: Task<u8, &'static str> = Task::new(async { Err("bad") });
    assert!(!a.resume());

    let mut b = a.take();

    assert_eq!(a.state(), TaskState::Empty);
    assert_eq!(b.get_result().unwrap_err().into_failure(), Some("bad"));
}

#[test]
fn test_default_and_empty_tasks() {
    let mut default: Task<i32> = Task::default();
    let mut empty: Task<String> = Task::empty();

    for state in [default.state(), empty.state()] {
        assert_eq!(state, TaskState::Empty);
        assert!(state.is_terminal());
    }

    assert!(!default.resume());
    assert!(!empty.resume());
    assert!(default.drive().unwrap_err().is_invalid_state());
    assert!(empty.get_result().unwrap_err().is_invalid_state());
}

#[test]
fn test_moving_into_a_collection_keeps_state() {
    let mut first = two_step();
    assert!(first.resume());

    let mut tasks = vec![first, two_step()];

    assert_eq!(tasks[0].steps(), 1);
    assert_eq!(tasks[1].steps(), 0);

    for task in tasks.iter_mut() {
        assert_eq!(task.drive().unwrap(), "done");
    }
}
