//! `shellgate exec` command.

use super::runtime;
use crate::config::GatewayConfig;
use crate::context::ServiceContext;
use crate::pipeline::{self, CommandRequest};

/// Execute the `exec` command.
///
/// Prints the formatted response on success.
///
/// # Errors
///
/// Returns the formatted failure text when the command fails, or an error
/// string if the runtime cannot start.
pub fn run(config: &GatewayConfig, command: &str, cwd: Option<&str>) -> Result<(), String> {
    let runtime = runtime()?;
    let ctx = ServiceContext::live(config);

    let mut request = CommandRequest::new(command);
    request.cwd = cwd.map(str::to_string);

    let response = runtime.block_on(pipeline::execute(&ctx, &request));
    if response.is_error {
        return Err(response.text);
    }
    println!("{}", response.text);
    Ok(())
}
