//! Argument construction for the zopen-generate tools

use super::args::ArgList;
use super::params::GenerateParams;

/// Keeps zopen-generate from waiting on a terminal prompt
pub const NON_INTERACTIVE: &str = "--non-interactive";

pub fn generate_args(params: &GenerateParams) -> Vec<String> {
    ArgList::empty()
        .arg("--name")
        .arg(params.name.as_str())
        .arg("--description")
        .arg(params.description.as_str())
        .arg("--categories")
        .arg(params.categories.as_str())
        .arg("--license")
        .arg(params.license.as_str())
        .arg(NON_INTERACTIVE)
        .option("--type", &params.project_type)
        .option("--build-system", &params.build_system)
        .option("--stable-url", &params.stable_url)
        .option("--stable-deps", &params.stable_deps)
        .option("--dev-url", &params.dev_url)
        .option("--dev-deps", &params.dev_deps)
        .option("--build-line", &params.build_line)
        .option("--runtime-deps", &params.runtime_deps)
        .flag("--force", params.force)
        .into_vec()
}

pub fn help_args() -> Vec<String> {
    ArgList::empty().arg("--help").into_vec()
}

pub fn version_args() -> Vec<String> {
    ArgList::empty().arg("--version").into_vec()
}

/// Structured (JSON) listing, e.g. `--list-licenses`
pub fn json_list_args(list_flag: &str) -> Vec<String> {
    ArgList::empty().arg("--json").arg(list_flag).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> GenerateParams {
        GenerateParams {
            name: "jq".to_string(),
            description: "Command-line JSON processor".to_string(),
            categories: "utilities".to_string(),
            license: "MIT".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_required_only() {
        assert_eq!(
            generate_args(&required()),
            vec![
                "--name",
                "jq",
                "--description",
                "Command-line JSON processor",
                "--categories",
                "utilities",
                "--license",
                "MIT",
                "--non-interactive",
            ]
        );
    }

    #[test]
    fn test_generate_optional_flags() {
        let params = GenerateParams {
            build_system: "GNU Make".to_string(),
            stable_url: "https://github.com/jqlang/jq.git".to_string(),
            runtime_deps: "oniguruma".to_string(),
            force: true,
            ..required()
        };
        let args = generate_args(&params);

        assert!(args.contains(&NON_INTERACTIVE.to_string()));
        assert_eq!(
            &args[9..],
            &[
                "--build-system",
                "GNU Make",
                "--stable-url",
                "https://github.com/jqlang/jq.git",
                "--runtime-deps",
                "oniguruma",
                "--force",
            ]
        );
    }

    #[test]
    fn test_fixed_commands() {
        assert_eq!(help_args(), vec!["--help"]);
        assert_eq!(version_args(), vec!["--version"]);
        assert_eq!(
            json_list_args("--list-licenses"),
            vec!["--json", "--list-licenses"]
        );
    }
}
