use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Error type a progress callback may return
pub type ProgressError = Box<dyn std::error::Error + Send + Sync>;

type ProgressFn = dyn Fn(usize, usize, &str) -> Result<(), ProgressError> + Send + Sync;

/// Caller-supplied progress hook
///
/// Called with `(done, total, note)` at most once per discovered batch.
/// Whatever the callback does (return an error, panic) never reaches the
/// strategy that reported it.
#[derive(Clone)]
pub struct Progress {
    callback: Arc<ProgressFn>,
}

impl Progress {
    pub fn new(
        callback: impl Fn(usize, usize, &str) -> Result<(), ProgressError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invokes the callback, swallowing any failure
    pub fn report(&self, done: usize, total: usize, note: &str) {
        match catch_unwind(AssertUnwindSafe(|| (self.callback)(done, total, note))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Progress callback failed: {}", e),
            Err(_) => tracing::warn!("Progress callback panicked; ignoring"),
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

/// Reports through an optional hook
pub(crate) fn report(progress: Option<&Progress>, done: usize, total: usize, note: &str) {
    if let Some(progress) = progress {
        progress.report(done, total, note);
    }
}
