//! Remote execution through the system `ssh` client
//!
//! zopen commands are not run over an in-process SSH session: the server
//! builds an argument vector for the `ssh` binary that sources the remote
//! login profile and then runs zopen in a `/bin/sh -c` wrapper.

pub mod command;
pub mod config;

// Re-exports
pub use command::{quote_remote_args, remote_shell_command, REMOTE_PROFILE, SSH_BINARY};
pub use config::SshConfig;
