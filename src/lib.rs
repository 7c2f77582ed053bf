//! zopen MCP Server - A Model Context Protocol server for zopen package management
//!
//! This crate exposes the `zopen` package manager and the `zopen-generate`
//! project generator as MCP tools. Commands run on this machine, or on a
//! remote z/OS system through the system `ssh` client.
//!
//! # Features
//!
//! - Package management tools (`zopen_list`, `zopen_install`, `zopen_upgrade`, ...)
//! - Port building in a project directory (`zopen_build`)
//! - Project generation (`zopen_generate` and its listing tools)
//! - Local or remote (SSH) execution
//! - Failed commands reported as readable tool output
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! # local
//! zopen-mcp
//!
//! # remote
//! zopen-mcp --remote --host=zos.example.com --user=ibmuser --key=~/.ssh/id_ed25519
//! ```
//!
//! # Example Usage (MCP Inspector)
//!
//! ```bash
//! DEBUG=1 npx @modelcontextprotocol/inspector ./target/release/zopen-mcp -- \
//!   --remote --host=YOUR_HOST --user=YOUR_USER
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod server;
pub mod ssh;
pub mod tools;

// Re-exports for convenience
pub use command::{CommandBuilder, CommandSpec, Program};
pub use config::{Args, Config, ExecutionMode};
pub use error::{Result, ZopenMcpError};
pub use runner::{CommandRunner, ExecutionResult, ProcessRunner};
pub use server::ZopenMcpServer;
pub use ssh::SshConfig;
pub use tools::{ToolName, ToolOutput, ZopenTools};
