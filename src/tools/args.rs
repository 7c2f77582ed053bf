//! Argument list builder shared by the tool handlers

use super::params::is_set;

/// Ordered command-line arguments for one zopen invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList(Vec<String>);

impl ArgList {
    /// Start with a subcommand
    pub fn command(name: &str) -> Self {
        Self(vec![name.to_string()])
    }

    /// Start with nothing (zopen-generate has no subcommands)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Always append `arg`
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.0.push(arg.into());
        self
    }

    /// Append `flag` when `enabled`
    pub fn flag(mut self, flag: &str, enabled: bool) -> Self {
        if enabled {
            self.0.push(flag.to_string());
        }
        self
    }

    /// Append `flag value` when `value` is not blank
    pub fn option(mut self, flag: &str, value: &str) -> Self {
        if is_set(value) {
            self.0.push(flag.to_string());
            self.0.push(value.to_string());
        }
        self
    }

    /// Append `value` when it is not blank
    pub fn value(mut self, value: &str) -> Self {
        if is_set(value) {
            self.0.push(value.to_string());
        }
        self
    }

    /// Append every non-blank value
    pub fn values(mut self, values: &[String]) -> Self {
        self.0
            .extend(values.iter().filter(|v| is_set(v)).cloned());
        self
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let args = ArgList::command("install")
            .flag("--verbose", false)
            .flag("--yes", true)
            .option("-d", "")
            .option("-u", "me")
            .values(&["git".to_string(), " ".to_string(), "curl".to_string()])
            .into_vec();

        assert_eq!(args, vec!["install", "--yes", "-u", "me", "git", "curl"]);
    }

    #[test]
    fn test_empty() {
        assert!(ArgList::empty().into_vec().is_empty());
        assert_eq!(ArgList::empty().arg("--help").into_vec(), vec!["--help"]);
    }
}
