//! Common test utilities for config-wrangler integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::sync::Arc;
use std::time::Duration;

#[allow(unused_imports)]
pub use config_wrangler::{
    ConfigDescriptor, ConfigWrangler, FoundVars, LoadError, RetryPolicy, StaticEnvironment,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};
#[allow(unused_imports)]
pub use wrangler_client::testing::{
    created_frame, empty_range_body, event_frame, range_body, watch_stream_body,
};

/// Environment whose `ETCD_CONN` points at the mock server.
#[allow(dead_code)]
pub fn env_for(server: &MockServer) -> StaticEnvironment {
    StaticEnvironment::new().with_var("ETCD_CONN", server.uri())
}

/// Wrangler reading from `env` with a retry delay short enough for tests.
#[allow(dead_code)]
pub fn wrangler_with(descriptor: ConfigDescriptor, env: StaticEnvironment) -> ConfigWrangler {
    ConfigWrangler::builder(descriptor)
        .environment(Arc::new(env))
        .retry_policy(RetryPolicy::new().with_delay(Duration::from_millis(20)))
        .build()
        .expect("wrangler should build")
}

/// A watch response body made of the given frames.
#[allow(dead_code)]
pub fn stream_response(frames: &[serde_json::Value]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/json")
        .set_body_string(watch_stream_body(frames))
}
