//! Configuration and CLI argument parsing for the zopen MCP server

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ZopenMcpError};

/// Default SSH port
pub const DEFAULT_SSH_PORT: u16 = 22;

/// zopen MCP Server CLI Arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "zopen-mcp")]
#[command(version)]
#[command(about = "MCP server exposing zopen package management, locally or over SSH")]
pub struct Args {
    /// Run in remote mode. Requires SSH details.
    #[arg(long, default_value = "false", env = "ZOPEN_MCP_REMOTE")]
    pub remote: bool,

    /// Remote z/OS hostname or IP (required for remote mode)
    #[arg(long, default_value = "", env = "ZOPEN_MCP_HOST")]
    pub host: String,

    /// SSH username for the remote system
    #[arg(long, env = "ZOPEN_MCP_USER")]
    pub user: Option<String>,

    /// Path to the SSH private key file
    #[arg(long, env = "ZOPEN_MCP_KEY")]
    pub key: Option<PathBuf>,

    /// SSH port number
    #[arg(long, default_value_t = DEFAULT_SSH_PORT, env = "ZOPEN_MCP_PORT")]
    pub port: u16,

    /// Path to the zopen executable (optional, will use PATH if not specified)
    #[arg(long = "zopen-path", env = "ZOPEN_MCP_ZOPEN_PATH")]
    pub zopen_path: Option<PathBuf>,

    /// Path to the zopen-generate executable (optional, will use PATH if not specified)
    #[arg(long = "zopen-generate-path", env = "ZOPEN_MCP_ZOPEN_GENERATE_PATH")]
    pub zopen_generate_path: Option<PathBuf>,

    /// Per-command timeout in milliseconds. 0 or unset disables the deadline.
    #[arg(long, env = "ZOPEN_MCP_TIMEOUT")]
    pub timeout: Option<u64>,
}

/// Where zopen commands run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// On this machine
    Local,
    /// On a remote host through the `ssh` client
    Remote,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Local => "LOCAL",
            ExecutionMode::Remote => "REMOTE",
        }
    }
}

/// Parsed and validated configuration
///
/// Built once at startup and never mutated; every tool call reads it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local or remote execution
    pub mode: ExecutionMode,

    /// Remote host (empty in local mode)
    pub host: String,

    /// Remote username
    pub user: Option<String>,

    /// Path to SSH private key
    pub key: Option<PathBuf>,

    /// SSH port
    pub port: u16,

    /// Explicit zopen binary
    pub zopen_path: Option<PathBuf>,

    /// Explicit zopen-generate binary
    pub zopen_generate_path: Option<PathBuf>,

    /// Per-command deadline (None = wait until the command exits)
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create Config from CLI Args
    pub fn from_args(args: Args) -> Result<Self> {
        validate_args(&args)?;

        let mode = if args.remote {
            ExecutionMode::Remote
        } else {
            ExecutionMode::Local
        };

        Ok(Config {
            mode,
            host: args.host.trim().to_string(),
            user: non_blank(args.user),
            key: non_blank_path(args.key),
            port: args.port,
            zopen_path: non_blank_path(args.zopen_path),
            zopen_generate_path: non_blank_path(args.zopen_generate_path),
            timeout: parse_timeout(args.timeout),
        })
    }

    /// Local-mode configuration with defaults for everything else
    pub fn local() -> Self {
        Config {
            mode: ExecutionMode::Local,
            host: String::new(),
            user: None,
            key: None,
            port: DEFAULT_SSH_PORT,
            zopen_path: None,
            zopen_generate_path: None,
            timeout: None,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.mode == ExecutionMode::Remote
    }
}

/// Validate CLI arguments
fn validate_args(args: &Args) -> Result<()> {
    let mut errors = Vec::new();

    if args.remote && args.host.trim().is_empty() {
        errors.push("--host is required when using --remote mode.".to_string());
    }

    if args.remote {
        if let Some(key_path) = non_blank_path(args.key.clone()) {
            if !key_path.exists() {
                errors.push(format!("SSH key file not found: {}", key_path.display()));
            }
        }
    }

    if !errors.is_empty() {
        return Err(ZopenMcpError::Config(errors.join("\n")));
    }

    Ok(())
}

/// Parse the timeout argument
///
/// - None or 0 → no deadline
/// - positive → that many milliseconds
pub fn parse_timeout(value: Option<u64>) -> Option<Duration> {
    value.filter(|ms| *ms > 0).map(Duration::from_millis)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("zopen-mcp").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_are_local() {
        let config = Config::from_args(parse(&[])).unwrap();
        assert_eq!(config.mode, ExecutionMode::Local);
        assert_eq!(config.port, 22);
        assert!(config.zopen_path.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_remote_requires_host() {
        let err = Config::from_args(parse(&["--remote"])).unwrap_err();
        assert!(matches!(err, ZopenMcpError::Config(_)));
        assert!(err.to_string().contains("--host is required"));

        let err = Config::from_args(parse(&["--remote", "--host", "  "])).unwrap_err();
        assert!(err.to_string().contains("--host is required"));
    }

    #[test]
    fn test_remote_with_host() {
        let config = Config::from_args(parse(&[
            "--remote", "--host", "zos.example.com", "--user", "ibmuser", "--port", "2222",
        ]))
        .unwrap();
        assert!(config.is_remote());
        assert_eq!(config.port, 2222);
        assert_eq!(config.host, "zos.example.com");
        assert_eq!(config.user.as_deref(), Some("ibmuser"));
    }

    #[test]
    fn test_blank_user_is_absent() {
        let config = Config::from_args(parse(&["--remote", "--host", "h", "--user", ""])).unwrap();
        assert!(config.user.is_none());
    }

    #[test]
    fn test_missing_key_file_is_reported() {
        let err = Config::from_args(parse(&[
            "--remote",
            "--host",
            "h",
            "--key",
            "/definitely/not/a/key",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SSH key file not found"));
    }

    #[test]
    fn test_existing_key_file_is_accepted() {
        let key = tempfile::NamedTempFile::new().unwrap();
        let config = Config::from_args(parse(&[
            "--remote",
            "--host",
            "h",
            "--key",
            key.path().to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(config.key.as_deref(), Some(key.path()));
    }

    #[test]
    fn test_all_errors_collected() {
        let err = Config::from_args(parse(&["--remote", "--key", "/no/such/key"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--host is required"));
        assert!(msg.contains("SSH key file not found"));
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(None), None);
        assert_eq!(parse_timeout(Some(0)), None);
        assert_eq!(parse_timeout(Some(1500)), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_zopen_path_override() {
        let config = Config::from_args(parse(&["--zopen-path", "/opt/zopen/bin/zopen"])).unwrap();
        assert_eq!(
            config.zopen_path,
            Some(PathBuf::from("/opt/zopen/bin/zopen"))
        );
    }
}
