//! Shell executor port for running planned commands.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::pipeline::outcome::ExecutionOutcome;
use crate::pipeline::strategy::ExecutionPlan;

/// Boxed future type alias used by [`ShellExecutor`] to keep the trait dyn-compatible.
pub type ShellFuture<'a> = Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + 'a>>;

/// Runs commands against the host shell.
///
/// Implementations never return errors: spawn problems, timeouts and failed
/// exits are all reported as [`ExecutionOutcome::Failure`].
pub trait ShellExecutor: Send + Sync {
    /// Runs `plan` once and resolves with its outcome.
    fn run(&self, plan: ExecutionPlan) -> ShellFuture<'_>;
}

impl<T: ShellExecutor + ?Sized> ShellExecutor for Arc<T> {
    fn run(&self, plan: ExecutionPlan) -> ShellFuture<'_> {
        (**self).run(plan)
    }
}
