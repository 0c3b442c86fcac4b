//! Process-group cleanup for timed-out commands.
//!
//! Each shell is started as the leader of its own group, so killing the group
//! also reaches whatever the shell spawned (pipeline stages, `sleep`, ...).
//! Outside unix these helpers do nothing and only the shell itself is killed
//! through `kill_on_drop`.

use tokio::process::Command;
#[cfg(unix)]
use tracing::debug;

/// Makes the spawned shell lead a fresh process group.
pub(crate) fn isolate(command: &mut Command) {
    #[cfg(unix)]
    command.process_group(0);
    #[cfg(not(unix))]
    let _ = command;
}

/// Sends `SIGKILL` to the group led by `pid` (best-effort).
#[cfg(unix)]
pub(crate) fn kill(pid: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(err) => debug!(pgid, error = %err, "failed to kill process group"),
    }
}

/// No-op on non-unix platforms.
#[cfg(not(unix))]
pub(crate) fn kill(_pid: Option<u32>) {}
