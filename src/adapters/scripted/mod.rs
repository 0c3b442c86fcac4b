//! Scripted adapters that answer from a fixed script.

pub mod shell;

pub use shell::ScriptedShellExecutor;
