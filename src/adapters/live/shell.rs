//! Live shell executor using `tokio::process::Command`.

use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

use super::process_group;
use super::settle::Settlement;
use crate::pipeline::outcome::ExecutionOutcome;
use crate::pipeline::platform::PlatformProfile;
use crate::pipeline::strategy::{ExecutionPlan, ExecutionStrategy};
use crate::ports::shell::{ShellExecutor, ShellFuture};

/// Read size used while draining child output.
const CHUNK_SIZE: usize = 8 * 1024;

/// Live shell executor that runs commands through the host shell.
///
/// Every shell is spawned with `kill_on_drop` as the leader of its own process
/// group. When a command outlives the timeout budget the whole group is
/// killed, including anything the shell started.
pub struct LiveShellExecutor {
    profile: PlatformProfile,
    timeout: Duration,
}

impl LiveShellExecutor {
    /// Creates an executor for `profile` that gives every command `timeout`.
    #[must_use]
    pub fn new(profile: PlatformProfile, timeout: Duration) -> Self {
        Self { profile, timeout }
    }

    fn shell_command(&self, plan: &ExecutionPlan) -> Command {
        let mut command = Command::new(&self.profile.shell_path);
        command
            .arg(&self.profile.shell_flag)
            .arg(&plan.command)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        process_group::isolate(&mut command);
        if let Some(cwd) = &plan.cwd {
            command.current_dir(cwd);
        }
        command
    }

    /// Runs the whole pipeline in one shell call and collects output after exit.
    ///
    /// The exit code is ignored here: whatever the pipeline printed is the answer.
    async fn run_buffered(&self, plan: &ExecutionPlan) -> ExecutionOutcome {
        let mut command = self.shell_command(plan);
        command.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(error = %err, "failed to spawn buffered command");
                return ExecutionOutcome::failure(err.to_string());
            }
        };
        let pid = child.id();

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => ExecutionOutcome::success(
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
            ),
            Ok(Err(err)) => {
                warn!(error = %err, "failed to run buffered command");
                ExecutionOutcome::failure(err.to_string())
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "buffered command timed out");
                process_group::kill(pid);
                ExecutionOutcome::timed_out(self.timeout)
            }
        }
    }

    /// Spawns the shell directly and races process exit against the deadline.
    async fn run_streaming(&self, plan: &ExecutionPlan) -> ExecutionOutcome {
        let mut command = self.shell_command(plan);
        command.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(error = %err, "failed to spawn command");
                return ExecutionOutcome::failure(err.to_string());
            }
        };

        let pid = child.id();
        let (settlement, settled) = Settlement::new();
        let settlement = Arc::new(settlement);

        let watcher = tokio::spawn({
            let settlement = Arc::clone(&settlement);
            async move {
                settlement.settle(collect_streaming(child).await);
            }
        });

        let budget = self.timeout;
        let deadline = tokio::spawn({
            let settlement = Arc::clone(&settlement);
            async move {
                tokio::time::sleep(budget).await;
                if settlement.settle(ExecutionOutcome::timed_out(budget)) {
                    warn!(timeout_secs = budget.as_secs(), "streaming command timed out");
                    process_group::kill(pid);
                }
            }
        });

        let outcome = settled.await.unwrap_or_else(|_| {
            ExecutionOutcome::failure("Command runner stopped before producing a result")
        });

        // Cancels the pending timer, or drops the already killed child after a timeout.
        deadline.abort();
        watcher.abort();

        outcome
    }
}

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, plan: ExecutionPlan) -> ShellFuture<'_> {
        Box::pin(async move {
            debug!(
                shell = %self.profile.shell_path,
                flag = %self.profile.shell_flag,
                command = %plan.command,
                cwd = ?plan.cwd,
                strategy = ?plan.strategy,
                "running command"
            );
            match plan.strategy {
                ExecutionStrategy::Buffered => self.run_buffered(&plan).await,
                ExecutionStrategy::Streaming => self.run_streaming(&plan).await,
            }
        })
    }
}

/// Drains both pipes while waiting for the child to exit.
async fn collect_streaming(mut child: Child) -> ExecutionOutcome {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout, stderr, status) =
        tokio::join!(drain(stdout, "stdout"), drain(stderr, "stderr"), child.wait());

    match status {
        Ok(status) => {
            debug!(code = ?status.code(), "command exited");
            ExecutionOutcome::from_exit(status.code(), stdout, stderr)
        }
        Err(err) => ExecutionOutcome::failure(err.to_string()),
    }
}

/// Accumulates a stream chunk by chunk until EOF.
///
/// Bytes are decoded once at the end so multi-byte characters split across
/// chunks survive.
async fn drain<R>(reader: Option<R>, stream: &'static str) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return String::new();
    };

    let mut collected = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                trace!(stream, bytes = n, "received output chunk");
                collected.extend_from_slice(&chunk[..n]);
            }
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                debug!(stream, error = %err, "stopped reading output");
                break;
            }
        }
    }
    String::from_utf8_lossy(&collected).into_owned()
}
