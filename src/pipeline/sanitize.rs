//! Best-effort stripping of a few shell metacharacters.
//!
//! This is not a security boundary. Command substitution, redirection,
//! backticks and every other shell feature pass through untouched; only the
//! cheapest chaining tokens are removed. Single pipes are kept so that
//! one-pipeline commands such as `ps aux | grep sshd` still work.

use super::platform::PlatformProfile;

/// Logical-OR chain operator, removed on every platform.
const OR_CHAIN: &str = "||";
/// Statement separator, removed on non-Windows hosts.
const SEPARATOR: char = ';';

/// Strips null bytes, `||` and (outside Windows) `;` from `raw`.
///
/// Separators are removed before `||` so that input like `|;|` cannot
/// collapse into a fresh `||` after filtering.
#[must_use]
pub fn sanitize(raw: &str, profile: &PlatformProfile) -> String {
    let mut cleaned: String = raw.chars().filter(|&c| c != '\0').collect();
    if !profile.is_windows {
        cleaned.retain(|c| c != SEPARATOR);
    }
    cleaned.replace(OR_CHAIN, "")
}
