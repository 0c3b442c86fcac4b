//! Port traits defining external boundaries.
//!
//! The gateway core only reaches the operating system through these traits.
//! Implementations live in `src/adapters/`.

pub mod shell;

pub use shell::{ShellExecutor, ShellFuture};
