//! Handler modules for the window's actions.
//!
//! Each handler runs its external-process work on tokio's blocking pool
//! and reports back with a completion message.

mod capture;
mod dialogs;
mod poll;
mod restart;
mod save;

use std::error::Error;

pub use dialogs::{Notice, NoticeLevel};

/// Run a blocking job on tokio's blocking pool.
///
/// A panic inside the job resumes on the awaiting task.
pub async fn run_blocking<T, F>(job: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(value) => value,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        // Cancelled: the runtime is shutting down with the window.
        Err(_) => std::future::pending().await,
    }
}

/// Error message followed by its source chain, for logs.
pub fn error_chain(error: &dyn Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
