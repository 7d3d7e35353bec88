//! Shared test utilities for config-wrangler CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//!
//! Invariants / Assumptions:
//! - No `WRANGLER_*` or `ETCD_CONN` value leaks in from the host.

use assert_cmd::Command;

/// Returns a hermetic `config-wrangler` command for integration testing.
pub fn wrangler_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("config-wrangler");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("ETCD_CONN")
        .env_remove("WRANGLER_ETCD_NAMESPACE")
        .env_remove("WRANGLER_ENV_NAMESPACE")
        .env_remove("WRANGLER_ETCD_API_PATH")
        .env_remove("WRANGLER_REQUIRED_KEYS")
        .env_remove("WRANGLER_DESCRIPTOR")
        .env_remove("WRANGLER_MAX_RETRIES")
        .env_remove("WRANGLER_RETRY_DELAY_MS");

    cmd
}

/// Returns a hermetic command pointed at a mock etcd gateway.
#[allow(dead_code)]
pub fn wrangler_cmd_with_etcd(uri: &str) -> Command {
    let mut cmd = wrangler_cmd();
    cmd.env("ETCD_CONN", uri);
    cmd
}
