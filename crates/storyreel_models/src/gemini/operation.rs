//! Long-running operation polling.

use super::dto::Operation;
use std::future::Future;
use std::time::Duration;
use storyreel_interface::Sleeper;
use tracing::debug;

/// A server-side job that finishes asynchronously.
pub trait LongRunning {
    /// True once the job has finished, successfully or not.
    fn is_done(&self) -> bool;

    /// Resource name used to query the job.
    fn name(&self) -> &str;
}

impl LongRunning for Operation {
    fn is_done(&self) -> bool {
        self.done
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wait for `initial` to finish, refreshing it every `interval`.
///
/// Sleeps once before each refresh. There is no attempt limit and no
/// timeout: the loop ends only when the job reports done or a refresh fails.
pub async fn poll_until_done<O, E, F, Fut>(
    initial: O,
    interval: Duration,
    sleeper: &dyn Sleeper,
    mut refresh: F,
) -> Result<O, E>
where
    O: LongRunning,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<O, E>>,
{
    let mut operation = initial;
    let mut polls: u32 = 0;
    while !operation.is_done() {
        sleeper.sleep(interval).await;
        polls += 1;
        debug!(operation = %operation.name(), polls, "Polling operation");
        operation = refresh(operation.name().to_string()).await?;
    }
    debug!(operation = %operation.name(), polls, "Operation finished");
    Ok(operation)
}
