//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `shellgate`.
#[derive(Debug, Parser)]
#[command(name = "shellgate", version, about = "Run shell commands on behalf of a tool client")]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute; defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the `execute_command` tool over stdio.
    Serve,
    /// Run one command through the gateway pipeline and print the response.
    Exec {
        /// Command string, passed to the shell after sanitization.
        command: String,
        /// Working directory for the command.
        #[arg(long)]
        cwd: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["shellgate"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_serve_subcommand() {
        let cli = Cli::parse_from(["shellgate", "serve"]);
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn parses_exec_with_cwd() {
        let cli = Cli::parse_from(["shellgate", "exec", "ls -la", "--cwd", "/tmp"]);
        match cli.command {
            Some(Command::Exec { command, cwd }) => {
                assert_eq!(command, "ls -la");
                assert_eq!(cwd.as_deref(), Some("/tmp"));
            }
            other => panic!("expected exec, got {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["shellgate", "serve", "--config", "gate.yaml"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("gate.yaml")));
    }

    #[test]
    fn exec_requires_command() {
        assert!(Cli::try_parse_from(["shellgate", "exec"]).is_err());
    }
}
