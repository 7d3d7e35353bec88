//! Gateway endpoint implementations.

mod frame;
mod range;
pub mod request;
mod watch;

pub use frame::FrameDecoder;
pub use range::{parse_range_response, range};
pub use request::{FORM_CONTENT_TYPE, Transport};
pub use watch::{WatchStream, watch};

/// Join the base URL, API path segment and endpoint path.
pub fn endpoint_url(base_url: &str, api_path: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let api_path = api_path.trim_matches('/');
    if api_path.is_empty() {
        format!("{base}/{endpoint}")
    } else {
        format!("{base}/{api_path}/{endpoint}")
    }
}
