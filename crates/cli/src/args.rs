//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Build the [`ConfigDescriptor`] from a descriptor file and flag overrides.
//!
//! Non-responsibilities:
//! - Does not load configuration (see `main`).
//! - Does not interpret passthrough arguments; they are handed to the
//!   aggregator's command-line source untouched.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use config_wrangler::{ConfigDescriptor, RetryPolicy};
use wrangler_config::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "config-wrangler")]
#[command(
    about = "Aggregate configuration from etcd, environment variables and arguments",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  config-wrangler --etcd-namespace cfg/service/ --env-namespace SERVICE\n  config-wrangler --descriptor wrangler.json --format yaml -- --db-host=localhost\n  ETCD_CONN=etcd:2379 config-wrangler --etcd-namespace cfg/service/ --watch\n"
)]
pub struct Cli {
    /// etcd key prefix to read (e.g. cfg/service/). Unset disables the remote store.
    #[arg(long, env = "WRANGLER_ETCD_NAMESPACE")]
    pub etcd_namespace: Option<String>,

    /// Environment variable prefix, without the trailing underscore.
    #[arg(long, env = "WRANGLER_ENV_NAMESPACE")]
    pub env_namespace: Option<String>,

    /// etcd gateway API path segment (default: v3alpha)
    #[arg(long, env = "WRANGLER_ETCD_API_PATH")]
    pub etcd_api_path: Option<String>,

    /// Comma-separated keys that must be present after loading
    #[arg(long, env = "WRANGLER_REQUIRED_KEYS", value_delimiter = ',')]
    pub required_keys: Vec<String>,

    /// JSON descriptor file (etcdNameSpace, envNameSpace, etcdApiPath, requiredKeys).
    ///
    /// Flags given alongside it override the file's fields.
    #[arg(long, env = "WRANGLER_DESCRIPTOR", value_name = "FILE")]
    pub descriptor: Option<PathBuf>,

    /// Keep running and print the configuration again after every remote change
    #[arg(long)]
    pub watch: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Give up after this many attempts when etcd is unreachable (default: retry forever)
    #[arg(long, env = "WRANGLER_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Delay between attempts when etcd is unreachable, in milliseconds
    #[arg(long, env = "WRANGLER_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// Configuration arguments of the form --key=value, given after `--`
    #[arg(last = true, value_name = "ARGS")]
    pub passthrough: Vec<String>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Cli {
    /// The descriptor file (if any) with flag values layered on top.
    pub fn descriptor(&self) -> Result<ConfigDescriptor, ConfigError> {
        let mut descriptor = match &self.descriptor {
            Some(path) if !path.as_os_str().is_empty() => ConfigDescriptor::from_json_file(path)?,
            _ => ConfigDescriptor::new(),
        };

        if let Some(namespace) = &self.etcd_namespace {
            descriptor = descriptor.with_etcd_namespace(namespace.clone());
        }
        if let Some(namespace) = &self.env_namespace {
            descriptor = descriptor.with_env_namespace(namespace.clone());
        }
        if let Some(path) = &self.etcd_api_path {
            descriptor = descriptor.with_etcd_api_path(path.clone());
        }
        let required: Vec<&str> = self
            .required_keys
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .collect();
        if !required.is_empty() {
            descriptor = descriptor.with_required_keys(required);
        }

        Ok(descriptor)
    }

    /// Retry policy from the flags, or `None` to keep the default.
    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        if self.max_retries.is_none() && self.retry_delay_ms.is_none() {
            return None;
        }
        let mut policy = RetryPolicy::new();
        if let Some(delay) = self.retry_delay_ms {
            policy = policy.with_delay(Duration::from_millis(delay));
        }
        if let Some(attempts) = self.max_retries {
            policy = policy.with_max_attempts(attempts);
        }
        Some(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("config-wrangler").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_passthrough_after_double_dash() {
        let cli = parse(&["--env-namespace", "SVC", "--", "--db-host=x", "--port=1"]);
        assert_eq!(cli.passthrough, ["--db-host=x", "--port=1"]);
        assert_eq!(cli.env_namespace.as_deref(), Some("SVC"));
    }

    #[test]
    fn test_required_keys_split_on_commas() {
        let cli = parse(&["--required-keys", "dbHost, apiKey,,"]);
        let descriptor = cli.descriptor().unwrap();
        assert_eq!(descriptor.required_keys, ["dbHost", "apiKey"]);
    }

    #[test]
    fn test_flags_override_descriptor_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"etcdNameSpace":"cfg/a/","envNameSpace":"A","requiredKeys":["x"]}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["--descriptor", path, "--etcd-namespace", "cfg/b/"]);
        let descriptor = cli.descriptor().unwrap();

        assert_eq!(descriptor.etcd_namespace(), Some("cfg/b/"));
        assert_eq!(descriptor.env_namespace(), Some("A"));
        assert_eq!(descriptor.required_keys, ["x"]);
    }

    #[test]
    fn test_retry_policy_defaults_to_none() {
        assert!(parse(&[]).retry_policy().is_none());
        let policy = parse(&["--max-retries", "2", "--retry-delay-ms", "10"])
            .retry_policy()
            .unwrap();
        assert_eq!(policy.max_attempts(), Some(2));
        assert_eq!(policy.delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(parse(&["--format", "yaml"]).format, OutputFormat::Yaml);
        assert_eq!(parse(&[]).format, OutputFormat::Json);
    }
}
