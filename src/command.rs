//! Command construction
//!
//! Turns a program and its logical arguments into the exact argument vector
//! that gets spawned, either directly or wrapped in an `ssh` invocation.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{Config, ExecutionMode};
use crate::ssh::{SshConfig, SSH_BINARY};

/// External programs this server drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// The zopen package manager
    Zopen,
    /// The zopen project generator
    ZopenGenerate,
}

impl Program {
    /// Name looked up on the search path (and on the remote host)
    pub fn binary_name(&self) -> &'static str {
        match self {
            Program::Zopen => "zopen",
            Program::ZopenGenerate => "zopen-generate",
        }
    }
}

/// A fully prepared command, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    mode: ExecutionMode,
}

impl CommandSpec {
    /// Create a local command spec
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            mode: ExecutionMode::Local,
        }
    }

    /// Run in the given directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Executable (first element of the argument vector)
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the executable
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Complete argument vector, executable first
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Builds [`CommandSpec`]s for the configured execution mode
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    mode: ExecutionMode,
    zopen_path: Option<PathBuf>,
    zopen_generate_path: Option<PathBuf>,
    ssh: SshConfig,
}

impl CommandBuilder {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.mode,
            zopen_path: config.zopen_path.clone(),
            zopen_generate_path: config.zopen_generate_path.clone(),
            ssh: SshConfig::from_config(config),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Command for `program args...` in the configured mode
    pub fn build(&self, program: Program, args: &[String]) -> CommandSpec {
        match self.mode {
            ExecutionMode::Local => self.local(program, args),
            ExecutionMode::Remote => self.remote(program, args, None),
        }
    }

    /// Command for `program args...` run from `dir`
    ///
    /// Locally the child's working directory is set; remotely the shell
    /// changes into `dir` before running the program.
    pub fn build_in_dir(&self, program: Program, dir: &Path, args: &[String]) -> CommandSpec {
        match self.mode {
            ExecutionMode::Local => self.local(program, args).with_working_dir(dir),
            ExecutionMode::Remote => {
                let dir = dir.display().to_string();
                self.remote(program, args, Some(&dir))
            }
        }
    }

    /// Command that always runs on this machine
    pub fn local(&self, program: Program, args: &[String]) -> CommandSpec {
        CommandSpec::new(self.local_binary(program), args.iter().cloned())
    }

    fn remote(&self, program: Program, args: &[String], dir: Option<&str>) -> CommandSpec {
        let ssh_args = self.ssh.remote_args(program.binary_name(), args, dir);
        CommandSpec::new(SSH_BINARY, ssh_args).with_mode(ExecutionMode::Remote)
    }

    fn local_binary(&self, program: Program) -> String {
        let explicit = match program {
            Program::Zopen => self.zopen_path.as_ref(),
            Program::ZopenGenerate => self.zopen_generate_path.as_ref(),
        };

        match explicit {
            Some(path) => path.display().to_string(),
            None => program.binary_name().to_string(),
        }
    }
}
