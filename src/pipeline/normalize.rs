//! Rewrites the directory-listing command to the host's spelling.

use super::platform::PlatformProfile;

const UNIX_LIST: &str = "ls";
const WINDOWS_LIST: &str = "dir";

/// Translates a leading `ls` into `dir` on Windows and a leading `dir` into
/// `ls` elsewhere.
///
/// The token only matches when it is followed by whitespace, so `lsblk`,
/// `dirname` and a bare `ls` are left untouched. Only this one command pair is
/// translated; arguments are passed through as written.
#[must_use]
pub fn normalize(command: &str, profile: &PlatformProfile) -> String {
    let (from, to) = if profile.is_windows {
        (UNIX_LIST, WINDOWS_LIST)
    } else {
        (WINDOWS_LIST, UNIX_LIST)
    };

    match command.strip_prefix(from) {
        Some(rest) if rest.starts_with(char::is_whitespace) => format!("{to}{rest}"),
        _ => command.to_string(),
    }
}
