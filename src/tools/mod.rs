//! MCP Tools module
//!
//! One entry per tool name: parameter decoding and validation, argument
//! construction, execution through a [`CommandRunner`], and formatting of the
//! outcome as a [`ToolOutput`].
//!
//! zopen tools run in the configured mode (locally or over SSH). The
//! zopen-generate tools always run on this machine.

pub mod args;
pub mod generate;
pub mod output;
pub mod params;
pub mod zopen;

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::command::{CommandBuilder, CommandSpec, Program};
use crate::config::ExecutionMode;
use crate::error::{Result, ZopenMcpError};
use crate::runner::CommandRunner;

pub use output::{missing_required, OutputPolicy, ToolOutput, FAILURE_MARKER, SUCCESS_NO_OUTPUT};
pub use params::*;

/// Every tool this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    List,
    Query,
    Install,
    Remove,
    Upgrade,
    Info,
    Version,
    Init,
    Clean,
    Alt,
    Build,
    BuildHelp,
    CreateRepo,
    Generate,
    GenerateHelp,
    GenerateVersion,
    GenerateListLicenses,
    GenerateListCategories,
    GenerateListBuildSystems,
}

impl ToolName {
    /// Registration order
    pub const ALL: [ToolName; 19] = [
        ToolName::List,
        ToolName::Query,
        ToolName::Install,
        ToolName::Remove,
        ToolName::Upgrade,
        ToolName::Info,
        ToolName::Version,
        ToolName::Init,
        ToolName::Clean,
        ToolName::Alt,
        ToolName::Build,
        ToolName::BuildHelp,
        ToolName::CreateRepo,
        ToolName::Generate,
        ToolName::GenerateHelp,
        ToolName::GenerateVersion,
        ToolName::GenerateListLicenses,
        ToolName::GenerateListCategories,
        ToolName::GenerateListBuildSystems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::List => "zopen_list",
            ToolName::Query => "zopen_query",
            ToolName::Install => "zopen_install",
            ToolName::Remove => "zopen_remove",
            ToolName::Upgrade => "zopen_upgrade",
            ToolName::Info => "zopen_info",
            ToolName::Version => "zopen_version",
            ToolName::Init => "zopen_init",
            ToolName::Clean => "zopen_clean",
            ToolName::Alt => "zopen_alt",
            ToolName::Build => "zopen_build",
            ToolName::BuildHelp => "zopen_build_help",
            ToolName::CreateRepo => "zopen_create_repo",
            ToolName::Generate => "zopen_generate",
            ToolName::GenerateHelp => "zopen_generate_help",
            ToolName::GenerateVersion => "zopen_generate_version",
            ToolName::GenerateListLicenses => "zopen_generate_list_licenses",
            ToolName::GenerateListCategories => "zopen_generate_list_categories",
            ToolName::GenerateListBuildSystems => "zopen_generate_list_build_systems",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::List => "Lists information about zopen community packages",
            ToolName::Query => "List local or remote info about zopen community packages",
            ToolName::Install => "Installs one or more zopen community packages",
            ToolName::Remove => "Removes installed zopen community packages",
            ToolName::Upgrade => "Upgrades existing zopen community packages",
            ToolName::Info => "Displays detailed information about a package",
            ToolName::Version => "Display the installed zopen version",
            ToolName::Init => "Initializes the zopen environment",
            ToolName::Clean => "Removes unused resources",
            ToolName::Alt => "Switch between different versions of a package",
            ToolName::Build => "Build a zopen project in the specified directory",
            ToolName::BuildHelp => "Display help information for zopen build",
            ToolName::CreateRepo => {
                "Create a new port repository in zopencommunity (core contributors only)"
            }
            ToolName::Generate => {
                "Generate a zopen compatible project with customizable parameters"
            }
            ToolName::GenerateHelp => "Display help information for zopen-generate",
            ToolName::GenerateVersion => "Display version information for zopen-generate",
            ToolName::GenerateListLicenses => "List all valid license identifiers (returns JSON)",
            ToolName::GenerateListCategories => "List all valid project categories (returns JSON)",
            ToolName::GenerateListBuildSystems => "List all valid build systems (returns JSON)",
        }
    }

    /// JSON schema of the tool's parameters
    pub fn input_schema(&self) -> Arc<JsonObject> {
        match self {
            ToolName::List => schema_for::<ListParams>(),
            ToolName::Query => schema_for::<QueryParams>(),
            ToolName::Install | ToolName::Remove => schema_for::<PackagesParams>(),
            ToolName::Upgrade => schema_for::<UpgradeParams>(),
            ToolName::Info => schema_for::<InfoParams>(),
            ToolName::Clean => schema_for::<CleanParams>(),
            ToolName::Alt => schema_for::<AltParams>(),
            ToolName::Build => schema_for::<BuildParams>(),
            ToolName::CreateRepo => schema_for::<CreateRepoParams>(),
            ToolName::Generate => schema_for::<GenerateParams>(),
            ToolName::Version
            | ToolName::Init
            | ToolName::BuildHelp
            | ToolName::GenerateHelp
            | ToolName::GenerateVersion
            | ToolName::GenerateListLicenses
            | ToolName::GenerateListCategories
            | ToolName::GenerateListBuildSystems => schema_for::<NoParams>(),
        }
    }

    /// MCP tool definition
    pub fn definition(&self) -> Tool {
        Tool::new(self.as_str(), self.description(), self.input_schema())
    }

    /// Definitions of every tool, in registration order
    pub fn definitions() -> Vec<Tool> {
        Self::ALL.iter().map(ToolName::definition).collect()
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ZopenMcpError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| ZopenMcpError::unknown_tool(name))
    }
}

fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    let value = serde_json::to_value(&schema).unwrap_or_default();
    Arc::new(value.as_object().cloned().unwrap_or_default())
}

fn decode<T: DeserializeOwned>(tool: ToolName, arguments: JsonObject) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ZopenMcpError::invalid_params(format!("{}: {}", tool, e)))
}

/// Tool dispatcher
///
/// Holds only immutable state, so one instance serves concurrent calls.
#[derive(Clone)]
pub struct ZopenTools {
    builder: CommandBuilder,
    runner: Arc<dyn CommandRunner>,
}

impl ZopenTools {
    pub fn new(builder: CommandBuilder, runner: Arc<dyn CommandRunner>) -> Self {
        Self { builder, runner }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.builder.mode()
    }

    /// Run one tool call
    ///
    /// Returns `Err` only for arguments that do not decode; everything else,
    /// including failed commands, is a [`ToolOutput`].
    pub async fn call(
        &self,
        tool: ToolName,
        arguments: JsonObject,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput> {
        debug!("Dispatching {}", tool);

        let output = match tool {
            ToolName::List => {
                let params: ListParams = decode(tool, arguments)?;
                self.zopen(zopen::list_args(&params), cancel).await
            }
            ToolName::Query => {
                let params: QueryParams = decode(tool, arguments)?;
                self.zopen(zopen::query_args(&params), cancel).await
            }
            ToolName::Install | ToolName::Remove => {
                let params: PackagesParams = decode(tool, arguments)?;
                if let Some(missing) = missing_required(&[("packages", any_set(&params.packages))]) {
                    return Ok(missing);
                }
                let command = if tool == ToolName::Install {
                    "install"
                } else {
                    "remove"
                };
                self.zopen(zopen::packages_args(command, &params), cancel)
                    .await
            }
            ToolName::Upgrade => {
                let params: UpgradeParams = decode(tool, arguments)?;
                self.zopen(zopen::upgrade_args(&params), cancel).await
            }
            ToolName::Info => {
                let params: InfoParams = decode(tool, arguments)?;
                if let Some(missing) = missing_required(&[("package", is_set(&params.package))]) {
                    return Ok(missing);
                }
                self.zopen(zopen::info_args(&params), cancel).await
            }
            ToolName::Version => self.zopen(zopen::version_args(), cancel).await,
            ToolName::Init => self.zopen(zopen::init_args(), cancel).await,
            ToolName::Clean => {
                let params: CleanParams = decode(tool, arguments)?;
                self.zopen(zopen::clean_args(&params), cancel).await
            }
            ToolName::Alt => {
                let params: AltParams = decode(tool, arguments)?;
                self.zopen(zopen::alt_args(&params), cancel).await
            }
            ToolName::Build => {
                let params: BuildParams = decode(tool, arguments)?;
                self.build(&params, cancel).await
            }
            ToolName::BuildHelp => self.zopen(zopen::build_help_args(), cancel).await,
            ToolName::CreateRepo => {
                let params: CreateRepoParams = decode(tool, arguments)?;
                if let Some(missing) = missing_required(&[("name", is_set(&params.name))]) {
                    return Ok(missing);
                }
                self.zopen(zopen::create_repo_args(&params), cancel).await
            }
            ToolName::Generate => {
                let params: GenerateParams = decode(tool, arguments)?;
                if let Some(missing) = missing_required(&[
                    ("name", is_set(&params.name)),
                    ("description", is_set(&params.description)),
                    ("categories", is_set(&params.categories)),
                    ("license", is_set(&params.license)),
                ]) {
                    return Ok(missing);
                }
                self.generate(generate::generate_args(&params), cancel)
                    .await
            }
            ToolName::GenerateHelp => self.generate(generate::help_args(), cancel).await,
            ToolName::GenerateVersion => self.generate(generate::version_args(), cancel).await,
            ToolName::GenerateListLicenses => {
                self.generate(generate::json_list_args("--list-licenses"), cancel)
                    .await
            }
            ToolName::GenerateListCategories => {
                self.generate(generate::json_list_args("--list-categories"), cancel)
                    .await
            }
            ToolName::GenerateListBuildSystems => {
                self.generate(generate::json_list_args("--list-build-systems"), cancel)
                    .await
            }
        };

        Ok(output)
    }

    async fn zopen(&self, args: Vec<String>, cancel: &CancellationToken) -> ToolOutput {
        let spec = self.builder.build(Program::Zopen, &args);
        self.execute(&spec, OutputPolicy::StdoutOnly, cancel).await
    }

    async fn generate(&self, args: Vec<String>, cancel: &CancellationToken) -> ToolOutput {
        let spec = self.builder.local(Program::ZopenGenerate, &args);
        self.execute(&spec, OutputPolicy::Combined, cancel).await
    }

    /// `zopen build` from a project directory
    ///
    /// Locally the directory must exist and becomes the child's working
    /// directory. Remotely it is handed to `cd` on the remote host unchecked.
    async fn build(&self, params: &BuildParams, cancel: &CancellationToken) -> ToolOutput {
        if let Some(missing) = missing_required(&[("directory", is_set(&params.directory))]) {
            return missing;
        }

        let directory = params.directory.trim();
        let args = zopen::build_args(params);

        match self.builder.mode() {
            ExecutionMode::Local => {
                let dir = match resolve_directory(directory).await {
                    Ok(dir) => dir,
                    Err(output) => return output,
                };
                let spec = self.builder.build_in_dir(Program::Zopen, &dir, &args);
                self.execute(&spec, OutputPolicy::Build, cancel).await
            }
            ExecutionMode::Remote => {
                let spec = self
                    .builder
                    .build_in_dir(Program::Zopen, Path::new(directory), &args);
                self.execute(&spec, OutputPolicy::StdoutOnly, cancel).await
            }
        }
    }

    async fn execute(
        &self,
        spec: &CommandSpec,
        policy: OutputPolicy,
        cancel: &CancellationToken,
    ) -> ToolOutput {
        let result = self.runner.run(spec, cancel).await;
        ToolOutput::from_execution(result, policy)
    }
}

/// Absolute path of an existing local directory, or the error to report
async fn resolve_directory(directory: &str) -> std::result::Result<PathBuf, ToolOutput> {
    let abs = std::path::absolute(directory)
        .map(|abs| clean_path(&abs))
        .map_err(|e| ToolOutput::failure(format!("failed to get absolute path: {}", e)))?;

    match tokio::fs::metadata(&abs).await {
        Ok(meta) if meta.is_dir() => Ok(abs),
        Ok(_) => Err(ToolOutput::failure(format!(
            "not a directory: {}",
            abs.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ToolOutput::failure(format!(
            "directory does not exist: {}",
            abs.display()
        ))),
        Err(e) => Err(ToolOutput::failure(format!(
            "cannot access directory {}: {}",
            abs.display(),
            e
        ))),
    }
}

/// Lexically drop `.` and resolve `..` against the preceding component.
/// `..` directly under the root stays at the root.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
