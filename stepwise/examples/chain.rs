use stepwise::{Task, suspend};
use tracing_subscriber::EnvFilter;

#[stepwise::task(name = "double")]
async fn double(value: i32) -> i32 {
    suspend().await;
    value * 2
}

#[stepwise::task(name = "combined")]
async fn combined() -> i32 {
    let mut first = double(10);
    while first.resume() {}
    let first = first.get_result().unwrap_or_default();

    let mut second = double(first);
    while second.resume() {}
    second.get_result().unwrap_or_default()
}

#[stepwise::task(name = "print")]
async fn print_result(value: i32) {
    println!("Final result: {value}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut task: Task<i32> = combined();
    while task.resume() {}

    let value = match task.get_result() {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let mut print = print_result(value);
    while print.resume() {}

    if let Err(err) = print.get_result() {
        eprintln!("{err}");
    }
}
