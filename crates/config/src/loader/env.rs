//! Environment variable extraction.
//!
//! Responsibilities:
//! - Collect namespaced environment variables under normalized keys.
//! - Resolve the remote store endpoint from `ETCD_CONN`.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Deciding whether the environment source is enabled (the aggregator checks the descriptor).
//! - .env file loading (see `load_dotenv`).
//!
//! Invariants:
//! - Only variables named `{namespace}_...` are collected; the prefix including the
//!   underscore is stripped before normalization.
//! - Empty or whitespace-only values of `ETCD_CONN` are treated as unset.

use tracing::debug;

use super::environment::Environment;
use crate::constants::{DEFAULT_ETCD_ENDPOINT, ETCD_CONN_ENV};
use crate::normalize::strip_lower_camel;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Collect every variable named `{namespace}_*` as a normalized key/value pair.
pub fn collect_env<I>(namespace: &str, vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = format!("{namespace}_");
    vars.into_iter()
        .filter(|(name, _)| name.starts_with(&prefix))
        .map(|(name, value)| {
            let key = strip_lower_camel(&name, Some(&prefix));
            debug!(var = %name, key = %key, "Collected environment variable");
            (key, value)
        })
        .collect()
}

/// Resolve the store endpoint as `host:port`.
///
/// Reads `ETCD_CONN`, dropping an `http://` scheme and trailing slashes, and
/// falls back to `localhost:2379`.
pub fn resolve_endpoint(env: &dyn Environment) -> String {
    match non_blank(env.var(ETCD_CONN_ENV)) {
        Some(conn) => {
            let conn = conn.strip_prefix("http://").unwrap_or(&conn);
            conn.trim_end_matches('/').to_string()
        }
        None => DEFAULT_ETCD_ENDPOINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::environment::StaticEnvironment;
    use crate::test_util::global_test_lock;
    use serial_test::serial;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let _lock = global_test_lock().lock().unwrap();
        temp_env::with_vars(
            [
                ("WRANGLER_TEST_EMPTY", Some("")),
                ("WRANGLER_TEST_BLANK", Some("   ")),
                ("WRANGLER_TEST_PADDED", Some("  value  ")),
            ],
            || {
                assert_eq!(env_var_or_none("WRANGLER_TEST_EMPTY"), None);
                assert_eq!(env_var_or_none("WRANGLER_TEST_BLANK"), None);
                assert_eq!(
                    env_var_or_none("WRANGLER_TEST_PADDED").as_deref(),
                    Some("value")
                );
                assert_eq!(env_var_or_none("WRANGLER_TEST_UNSET_VAR"), None);
            },
        );
    }

    #[test]
    fn test_collect_env_filters_by_prefix() {
        let collected = collect_env(
            "FLASH",
            vars(&[
                ("FLASH_DB_HOST", "db.internal"),
                ("FLASH_PORT", "8080"),
                ("FLASHY_OTHER", "nope"),
                ("PATH", "/usr/bin"),
            ]),
        );
        assert_eq!(
            collected,
            vars(&[("dbHost", "db.internal"), ("port", "8080")])
        );
    }

    #[test]
    fn test_collect_env_requires_underscore() {
        let collected = collect_env("APP", vars(&[("APP", "bare"), ("APPNAME", "x")]));
        assert!(collected.is_empty());
    }

    #[test]
    fn test_resolve_endpoint_default() {
        let env = StaticEnvironment::new();
        assert_eq!(resolve_endpoint(&env), "localhost:2379");
    }

    #[test]
    fn test_resolve_endpoint_strips_scheme() {
        let env = StaticEnvironment::new().with_var("ETCD_CONN", "http://etcd.internal:4001/");
        assert_eq!(resolve_endpoint(&env), "etcd.internal:4001");
    }

    #[test]
    fn test_resolve_endpoint_blank_is_default() {
        let env = StaticEnvironment::new().with_var("ETCD_CONN", "  ");
        assert_eq!(resolve_endpoint(&env), "localhost:2379");
    }
}
