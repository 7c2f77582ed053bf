//! SSH client configuration types
//!
//! Connection parameters handed to the `ssh` client on every remote call.

use std::path::PathBuf;

use crate::config::{Config, DEFAULT_SSH_PORT};

/// Options that keep `ssh` from prompting or writing `known_hosts`.
///
/// Host keys are not verified; this server trades host-key pinning for
/// unattended operation against freshly provisioned systems.
pub const HARDENED_OPTIONS: [&str; 3] = [
    "StrictHostKeyChecking=no",
    "UserKnownHostsFile=/dev/null",
    "LogLevel=ERROR",
];

/// SSH client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshConfig {
    /// Remote hostname or IP address
    pub host: String,

    /// SSH port (default: 22)
    pub port: u16,

    /// Username, if different from the local login
    pub username: Option<String>,

    /// Private key file passed with `-i`
    pub key_path: Option<PathBuf>,
}

impl SshConfig {
    /// Create a new SSH configuration with minimal required fields
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: None,
            key_path: None,
        }
    }

    /// Build from the server configuration
    pub fn from_config(config: &Config) -> Self {
        let mut ssh = SshConfig::new(&config.host).with_port(config.port);
        if let Some(ref user) = config.user {
            ssh = ssh.with_username(user);
        }
        if let Some(ref key) = config.key {
            ssh = ssh.with_key_path(key);
        }
        ssh
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the remote username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the private key file
    pub fn with_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_path = Some(path.into());
        self
    }

    /// `user@host`, or `host` alone
    pub fn target(&self) -> String {
        match self.username {
            Some(ref user) => format!("{}@{}", user, self.host),
            None => self.host.clone(),
        }
    }

    /// Client arguments preceding the remote command:
    /// port, key, hardened options, then the target.
    pub fn client_args(&self) -> Vec<String> {
        let mut args = vec!["-p".to_string(), self.port.to_string()];

        if let Some(ref key) = self.key_path {
            args.push("-i".to_string());
            args.push(key.display().to_string());
        }

        for option in HARDENED_OPTIONS {
            args.push("-o".to_string());
            args.push(option.to_string());
        }

        args.push(self.target());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_config_builder() {
        let config = SshConfig::new("zos.example.com")
            .with_port(2222)
            .with_username("ibmuser")
            .with_key_path("/home/me/.ssh/id_ed25519");

        assert_eq!(config.host, "zos.example.com");
        assert_eq!(config.port, 2222);
        assert_eq!(config.target(), "ibmuser@zos.example.com");
        assert_eq!(
            config.key_path,
            Some(PathBuf::from("/home/me/.ssh/id_ed25519"))
        );
    }

    #[test]
    fn test_client_args_minimal() {
        let args = SshConfig::new("h").client_args();
        assert_eq!(
            args,
            vec![
                "-p",
                "22",
                "-o",
                "StrictHostKeyChecking=no",
                "-o",
                "UserKnownHostsFile=/dev/null",
                "-o",
                "LogLevel=ERROR",
                "h",
            ]
        );
    }

    #[test]
    fn test_client_args_with_key_and_user() {
        let args = SshConfig::new("h")
            .with_port(2222)
            .with_username("u")
            .with_key_path("/k")
            .client_args();
        assert_eq!(&args[..4], &["-p", "2222", "-i", "/k"]);
        assert_eq!(args.last().map(String::as_str), Some("u@h"));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::local();
        config.host = "h".to_string();
        config.user = Some("u".to_string());
        config.port = 2022;

        let ssh = SshConfig::from_config(&config);
        assert_eq!(ssh.target(), "u@h");
        assert_eq!(ssh.port, 2022);
        assert!(ssh.key_path.is_none());
    }
}
