//! Snapshots of the process environment.
//!
//! Responsibilities:
//! - Abstract access to environment variables and invocation arguments so
//!   aggregation can run against the real process or a fixed set of inputs.
//!
//! Does NOT handle:
//! - Interpreting variables or arguments (see env.rs and args.rs).
//!
//! Invariants:
//! - Non-UTF-8 variables and arguments are skipped, never lossily converted.
//! - Every call returns a fresh snapshot; nothing is cached between passes.

use std::fmt;

/// Source of environment variables and invocation arguments.
pub trait Environment: Send + Sync + fmt::Debug {
    /// All variables as `(name, value)` pairs.
    fn vars(&self) -> Vec<(String, String)>;

    /// A single variable by name.
    fn var(&self, key: &str) -> Option<String> {
        self.vars()
            .into_iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Invocation arguments, excluding the program name.
    fn args(&self) -> Vec<String>;
}

/// The real process environment.
///
/// Arguments come from `std::env::args_os` unless replaced with
/// [`ProcessEnvironment::with_args`], which lets a binary that parses its own
/// flags hand only the passthrough arguments to the CLI source.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvironment {
    args: Option<Vec<String>>,
}

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }
}

impl Environment for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn args(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => std::env::args_os()
                .skip(1)
                .filter_map(|arg| arg.into_string().ok())
                .collect(),
        }
    }
}

/// A fixed environment, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: Vec<(String, String)>,
    args: Vec<String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Environment for StaticEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars.clone()
    }

    fn args(&self) -> Vec<String> {
        self.args.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_static_environment_lookup() {
        let env = StaticEnvironment::new()
            .with_var("A", "1")
            .with_var("B", "2")
            .with_arg("--x=y");
        assert_eq!(env.var("B").as_deref(), Some("2"));
        assert_eq!(env.var("C"), None);
        assert_eq!(env.args(), vec!["--x=y"]);
    }

    #[test]
    #[serial]
    fn test_process_environment_reads_vars() {
        temp_env::with_var("WRANGLER_TEST_PROCESS_VAR", Some("present"), || {
            let env = ProcessEnvironment::new();
            assert_eq!(
                env.var("WRANGLER_TEST_PROCESS_VAR").as_deref(),
                Some("present")
            );
            assert!(
                env.vars()
                    .iter()
                    .any(|(k, v)| k == "WRANGLER_TEST_PROCESS_VAR" && v == "present")
            );
        });
    }

    #[test]
    fn test_process_environment_args_override() {
        let env = ProcessEnvironment::new().with_args(["--a=b"]);
        assert_eq!(env.args(), vec!["--a=b"]);
    }
}
