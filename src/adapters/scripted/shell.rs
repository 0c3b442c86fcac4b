//! Scripted adapter for the `ShellExecutor` port.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::pipeline::outcome::ExecutionOutcome;
use crate::pipeline::strategy::ExecutionPlan;
use crate::ports::shell::{ShellExecutor, ShellFuture};

/// Serves pre-scripted outcomes in order and remembers every plan it received.
///
/// Lets the gateway and transport be exercised without touching the host
/// shell.
#[derive(Default)]
pub struct ScriptedShellExecutor {
    outcomes: Mutex<VecDeque<ExecutionOutcome>>,
    received: Mutex<Vec<ExecutionPlan>>,
}

impl ScriptedShellExecutor {
    /// Creates an executor that answers with `outcomes`, one per call.
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = ExecutionOutcome>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into_iter().collect()), received: Mutex::default() }
    }

    /// Plans received so far, oldest first.
    #[must_use]
    pub fn received(&self) -> Vec<ExecutionPlan> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ShellExecutor for ScriptedShellExecutor {
    /// # Panics
    ///
    /// Panics when called more times than outcomes were scripted, naming the
    /// command that had no answer.
    fn run(&self, plan: ExecutionPlan) -> ShellFuture<'_> {
        let outcome = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        let outcome = outcome.unwrap_or_else(|| {
            panic!("Script exhausted: no outcome left for command {:?}", plan.command)
        });
        self.received.lock().unwrap_or_else(PoisonError::into_inner).push(plan);
        Box::pin(async move { outcome })
    }
}
