//! Live adapters for real external interactions.

mod process_group;
mod settle;
pub mod shell;

pub use shell::LiveShellExecutor;
