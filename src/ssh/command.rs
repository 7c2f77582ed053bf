//! Remote command construction
//!
//! The remote side receives a single string:
//!
//! ```text
//! /bin/sh -c ". ~/.profile && [cd <dir> && ]<program> "arg1" "arg2""
//! ```
//!
//! Each argument is wrapped in double quotes without escaping. Existing remote
//! setups depend on this exact form, so arguments containing `"`, `$`, `` ` ``
//! or `\` are passed through unmodified and are interpreted by the remote shell.

use super::config::SshConfig;

/// The ssh client binary
pub const SSH_BINARY: &str = "ssh";

/// Sourced before every remote command so zopen is on the remote PATH
pub const REMOTE_PROFILE: &str = ". ~/.profile";

/// Wrap each argument in double quotes and join with spaces
///
/// # Example
/// ```
/// use zopen_mcp::ssh::quote_remote_args;
///
/// let quoted = quote_remote_args(&["list".to_string(), "--verbose".to_string()]);
/// assert_eq!(quoted, r#""list" "--verbose""#);
/// ```
pub fn quote_remote_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| format!("\"{}\"", arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the login-shell command string run on the remote host
pub fn remote_shell_command(program: &str, args: &[String], directory: Option<&str>) -> String {
    let mut inner = String::from(REMOTE_PROFILE);
    inner.push_str(" && ");

    if let Some(dir) = directory {
        inner.push_str("cd ");
        inner.push_str(dir);
        inner.push_str(" && ");
    }

    inner.push_str(program);
    if !args.is_empty() {
        inner.push(' ');
        inner.push_str(&quote_remote_args(args));
    }

    format!("/bin/sh -c \"{}\"", inner)
}

impl SshConfig {
    /// Full argument vector (without the `ssh` binary itself) for running
    /// `program args...` on the remote host.
    pub fn remote_args(&self, program: &str, args: &[String], directory: Option<&str>) -> Vec<String> {
        let mut argv = self.client_args();
        argv.push(remote_shell_command(program, args, directory));
        argv
    }
}
