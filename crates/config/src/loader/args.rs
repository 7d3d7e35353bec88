//! Command-line argument extraction.
//!
//! Only the generic `--key=value` shape is recognized. The key is normalized
//! without stripping any prefix; the value is kept verbatim up to a second
//! `=`, if any.

use tracing::debug;

use crate::normalize::strip_lower_camel;

/// Collect `--key=value` arguments as normalized key/value pairs.
///
/// Arguments that do not start with `--` or contain no `=` are ignored.
pub fn collect_args<I, S>(args: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .filter_map(|arg| {
            let body = arg.as_ref().strip_prefix("--")?;
            let mut parts = body.split('=');
            let key = parts.next()?;
            let value = parts.next()?;
            let normalized = strip_lower_camel(key, None);
            debug!(key = %normalized, "Collected command-line argument");
            Some((normalized, value.to_string()))
        })
        .collect()
}
