//! Argument construction for the zopen package manager tools

use super::args::ArgList;
use super::params::{
    AltParams, BuildParams, CleanParams, CreateRepoParams, InfoParams, ListParams,
    PackagesParams, QueryParams, UpgradeParams,
};

pub fn list_args(params: &ListParams) -> Vec<String> {
    ArgList::command("list")
        .flag("--verbose", params.verbose)
        .into_vec()
}

pub fn query_args(params: &QueryParams) -> Vec<String> {
    ArgList::command("query")
        .flag("--verbose", params.verbose)
        .values(&params.packages)
        .into_vec()
}

/// `install` and `remove` share a shape
pub fn packages_args(command: &str, params: &PackagesParams) -> Vec<String> {
    ArgList::command(command)
        .flag("--verbose", params.verbose)
        .values(&params.packages)
        .into_vec()
}

pub fn upgrade_args(params: &UpgradeParams) -> Vec<String> {
    ArgList::command("upgrade")
        .flag("--yes", params.yes)
        .flag("--verbose", params.verbose)
        .values(&params.packages)
        .into_vec()
}

pub fn info_args(params: &InfoParams) -> Vec<String> {
    ArgList::command("info")
        .arg(params.package.as_str())
        .flag("--verbose", params.verbose)
        .into_vec()
}

pub fn version_args() -> Vec<String> {
    ArgList::command("version").into_vec()
}

pub fn init_args() -> Vec<String> {
    ArgList::command("init").into_vec()
}

/// Flags follow a fixed order regardless of how they were supplied
pub fn clean_args(params: &CleanParams) -> Vec<String> {
    ArgList::command("clean")
        .flag("--cache", params.cache)
        .flag("--unused", params.unused)
        .flag("--dangling", params.dangling)
        .flag("--all", params.all)
        .into_vec()
}

pub fn alt_args(params: &AltParams) -> Vec<String> {
    ArgList::command("alt")
        .value(&params.package)
        .option("-s", &params.switch)
        .into_vec()
}

pub fn build_args(params: &BuildParams) -> Vec<String> {
    ArgList::command("build")
        .flag("-vv", params.verbose)
        .flag("-f", params.force)
        .into_vec()
}

pub fn build_help_args() -> Vec<String> {
    ArgList::command("build").arg("--help").into_vec()
}

pub fn create_repo_args(params: &CreateRepoParams) -> Vec<String> {
    ArgList::command("create-repo")
        .arg("-v")
        .arg("-n")
        .arg(params.name.as_str())
        .option("-d", &params.description)
        .option("-u", &params.user)
        .into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_args() {
        assert_eq!(list_args(&ListParams { verbose: false }), vec!["list"]);
        assert_eq!(
            list_args(&ListParams { verbose: true }),
            vec!["list", "--verbose"]
        );
    }

    #[test]
    fn test_query_args() {
        let params = QueryParams {
            packages: strings(&["git", "make"]),
            verbose: true,
        };
        assert_eq!(query_args(&params), vec!["query", "--verbose", "git", "make"]);
        assert_eq!(query_args(&QueryParams::default()), vec!["query"]);
    }

    #[test]
    fn test_packages_args() {
        let params = PackagesParams {
            packages: strings(&["git"]),
            verbose: false,
        };
        assert_eq!(packages_args("install", &params), vec!["install", "git"]);
        assert_eq!(packages_args("remove", &params), vec!["remove", "git"]);
    }

    #[test]
    fn test_upgrade_args_order() {
        let params = UpgradeParams {
            packages: strings(&["curl"]),
            verbose: true,
            yes: true,
        };
        assert_eq!(
            upgrade_args(&params),
            vec!["upgrade", "--yes", "--verbose", "curl"]
        );
    }

    #[test]
    fn test_info_args() {
        let params = InfoParams {
            package: "git".to_string(),
            verbose: true,
        };
        assert_eq!(info_args(&params), vec!["info", "git", "--verbose"]);
    }

    #[test]
    fn test_clean_args_all_combinations() {
        let flags = ["--cache", "--unused", "--dangling", "--all"];

        for mask in 0u8..16 {
            let params = CleanParams {
                cache: mask & 1 != 0,
                unused: mask & 2 != 0,
                dangling: mask & 4 != 0,
                all: mask & 8 != 0,
            };

            let mut expected = vec!["clean".to_string()];
            for (bit, flag) in flags.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    expected.push(flag.to_string());
                }
            }

            assert_eq!(clean_args(&params), expected, "mask {:04b}", mask);
        }
    }

    #[test]
    fn test_alt_args() {
        assert_eq!(alt_args(&AltParams::default()), vec!["alt"]);

        let params = AltParams {
            package: "bash".to_string(),
            switch: "5.2".to_string(),
        };
        assert_eq!(alt_args(&params), vec!["alt", "bash", "-s", "5.2"]);
    }

    #[test]
    fn test_build_args() {
        let params = BuildParams {
            directory: "/tmp/port".to_string(),
            verbose: true,
            force: true,
        };
        assert_eq!(build_args(&params), vec!["build", "-vv", "-f"]);
        assert_eq!(build_help_args(), vec!["build", "--help"]);
    }

    #[test]
    fn test_create_repo_args() {
        let params = CreateRepoParams {
            name: "jqport".to_string(),
            description: "jq for z/OS".to_string(),
            user: String::new(),
        };
        assert_eq!(
            create_repo_args(&params),
            vec!["create-repo", "-v", "-n", "jqport", "-d", "jq for z/OS"]
        );
    }

    #[test]
    fn test_fixed_commands() {
        assert_eq!(version_args(), vec!["version"]);
        assert_eq!(init_args(), vec!["init"]);
    }
}
