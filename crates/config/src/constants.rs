//! Centralized constants for the config-wrangler workspace.
//!
//! This module contains default values used across crates to avoid
//! magic string and number duplication.

// =============================================================================
// Remote Store Defaults
// =============================================================================

/// Environment variable overriding the key-value store endpoint (`host:port`).
pub const ETCD_CONN_ENV: &str = "ETCD_CONN";

/// Endpoint used when `ETCD_CONN` is unset or blank.
pub const DEFAULT_ETCD_ENDPOINT: &str = "localhost:2379";

/// API path segment used when the descriptor does not name one.
pub const DEFAULT_ETCD_API_PATH: &str = "v3alpha";

/// Suffix appended to a namespace to form the exclusive end of a prefix scan.
pub const RANGE_END_SUFFIX: &str = "zzzzz";

// =============================================================================
// Retry Defaults
// =============================================================================

/// Fixed delay between attempts after a transport failure, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 3000;

// =============================================================================
// Process Behavior
// =============================================================================

/// Exit code used when a required configuration key is missing.
pub const MISSING_REQUIRED_KEY_EXIT_CODE: i32 = 1;

/// Setting this variable to any non-blank value skips `.env` loading.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";
