//! Host platform profile resolved once at startup.

use std::env;

/// Default shell on Unix-like hosts.
const UNIX_SHELL: &str = "/bin/sh";
/// Flag that makes the Unix shell run its next argument as a command string.
const UNIX_SHELL_FLAG: &str = "-c";
/// Fallback Windows command interpreter when `COMSPEC` is not set.
const WINDOWS_SHELL: &str = "cmd.exe";
/// Flag that makes `cmd.exe` run the rest of the line and exit.
const WINDOWS_SHELL_FLAG: &str = "/c";

/// Describes how commands are handed to the host shell.
///
/// Built once when the gateway starts and shared read-only by the sanitizer,
/// the normalizer and the process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Whether the host uses Windows command conventions.
    pub is_windows: bool,
    /// Path or name of the shell binary.
    pub shell_path: String,
    /// Flag passed before the command string.
    pub shell_flag: String,
}

impl PlatformProfile {
    /// Detects the profile of the current host.
    ///
    /// On Windows the interpreter named by `COMSPEC` is preferred.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(windows) {
            let mut profile = Self::windows();
            if let Ok(comspec) = env::var("COMSPEC") {
                if !comspec.trim().is_empty() {
                    profile.shell_path = comspec;
                }
            }
            profile
        } else {
            Self::unix()
        }
    }

    /// Profile for Unix-like hosts (`/bin/sh -c`).
    #[must_use]
    pub fn unix() -> Self {
        Self {
            is_windows: false,
            shell_path: UNIX_SHELL.to_string(),
            shell_flag: UNIX_SHELL_FLAG.to_string(),
        }
    }

    /// Profile for Windows hosts (`cmd.exe /c`).
    #[must_use]
    pub fn windows() -> Self {
        Self {
            is_windows: true,
            shell_path: WINDOWS_SHELL.to_string(),
            shell_flag: WINDOWS_SHELL_FLAG.to_string(),
        }
    }

    /// Replaces the shell binary while keeping the platform conventions.
    #[must_use]
    pub fn with_shell(mut self, shell_path: impl Into<String>) -> Self {
        self.shell_path = shell_path.into();
        self
    }
}
