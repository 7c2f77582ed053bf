//! Tool parameter types
//!
//! Every field is optional at the decoding level so that a missing required
//! value becomes a readable tool error rather than a protocol error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tools that take no parameters
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct NoParams {}

/// Parameters for zopen_list
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ListParams {
    /// Show verbose output
    pub verbose: bool,
}

/// Parameters for zopen_query
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct QueryParams {
    /// Packages to query (all packages when empty)
    pub packages: Vec<String>,

    /// Show verbose output
    pub verbose: bool,
}

/// Parameters for zopen_install and zopen_remove
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct PackagesParams {
    /// Packages to act on (required)
    pub packages: Vec<String>,

    /// Show verbose output
    pub verbose: bool,
}

/// Parameters for zopen_upgrade
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct UpgradeParams {
    /// Packages to upgrade (all installed packages when empty)
    pub packages: Vec<String>,

    /// Show verbose output
    pub verbose: bool,

    /// Answer yes to all prompts
    pub yes: bool,
}

/// Parameters for zopen_info
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct InfoParams {
    /// Package name (required)
    pub package: String,

    /// Show verbose output
    pub verbose: bool,
}

/// Parameters for zopen_clean
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct CleanParams {
    /// Remove cached package files
    pub cache: bool,

    /// Remove unused package versions
    pub unused: bool,

    /// Remove dangling symlinks
    pub dangling: bool,

    /// Clean everything
    pub all: bool,
}

/// Parameters for zopen_alt
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct AltParams {
    /// Package whose alternatives to list or switch
    pub package: String,

    /// Version to switch to
    pub switch: String,
}

/// Parameters for zopen_build
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BuildParams {
    /// Project directory to build in (required)
    pub directory: String,

    /// Very verbose build output
    pub verbose: bool,

    /// Force a rebuild
    pub force: bool,
}

/// Parameters for zopen_create_repo
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct CreateRepoParams {
    /// Repository name (required)
    pub name: String,

    /// Repository description
    pub description: String,

    /// GitHub user to create the repository for
    pub user: String,
}

/// Parameters for zopen_generate
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct GenerateParams {
    /// Project name (required)
    pub name: String,

    /// Project description (required)
    pub description: String,

    /// Space separated project categories (required)
    pub categories: String,

    /// License identifier (required)
    pub license: String,

    /// Project type
    #[serde(rename = "type")]
    pub project_type: String,

    /// Build system
    pub build_system: String,

    /// Stable source URL
    pub stable_url: String,

    /// Stable build dependencies
    pub stable_deps: String,

    /// Development source URL
    pub dev_url: String,

    /// Development build dependencies
    pub dev_deps: String,

    /// Build line (stable or dev)
    pub build_line: String,

    /// Runtime dependencies
    pub runtime_deps: String,

    /// Overwrite an existing project
    pub force: bool,
}

/// True when a string parameter carries a value
pub fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when a list parameter has at least one non-blank entry
pub fn any_set(values: &[String]) -> bool {
    values.iter().any(|v| is_set(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let params: InfoParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.package, "");
        assert!(!params.verbose);
    }

    #[test]
    fn test_packages_deserialize() {
        let params: PackagesParams =
            serde_json::from_str(r#"{"packages": ["git", "curl"], "verbose": true}"#).unwrap();
        assert_eq!(params.packages, vec!["git", "curl"]);
        assert!(params.verbose);
    }

    #[test]
    fn test_generate_type_field() {
        let params: GenerateParams =
            serde_json::from_str(r#"{"name": "jq", "type": "BUILD"}"#).unwrap();
        assert_eq!(params.project_type, "BUILD");
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_str::<ListParams>(r#"{"verbose": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_set() {
        assert!(is_set("git"));
        assert!(!is_set(""));
        assert!(!is_set("   "));
        assert!(any_set(&["".to_string(), "git".to_string()]));
        assert!(!any_set(&[]));
    }
}
