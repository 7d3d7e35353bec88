//! Key normalization shared by every configuration source.
//!
//! Responsibilities:
//! - Strip a source-specific prefix from a raw key.
//! - Collapse the remainder into a lower-camel identifier.
//!
//! Invariants:
//! - Output only ever contains ASCII letters and digits.
//! - A word-initial `0` is dropped along with separator runs (`db_0` -> `db`).

/// Normalize `raw` into a lower-camel identifier.
///
/// When `prefix` is given it is removed first. Keys that do not literally
/// start with the prefix lose the same number of leading characters instead,
/// matching how remote keys inside a prefix scan are treated.
///
/// ```
/// use wrangler_config::strip_lower_camel;
///
/// assert_eq!(strip_lower_camel("FOO_BAR_BAZ", Some("FOO_")), "barBaz");
/// assert_eq!(strip_lower_camel("cfg/svc/db-host", Some("cfg/svc/")), "dbHost");
/// ```
pub fn strip_lower_camel(raw: &str, prefix: Option<&str>) -> String {
    let rest = match prefix {
        Some(prefix) if !prefix.is_empty() => strip_leading(raw, prefix),
        _ => raw,
    };

    let spaced: String = rest
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;
    for (index, c) in spaced.char_indices() {
        if c == ' ' {
            word_start = true;
            continue;
        }
        if !word_start {
            out.push(c);
            continue;
        }
        word_start = false;
        if c == '0' {
            continue;
        }
        if index == 0 {
            out.push(c);
        } else {
            out.push(c.to_ascii_uppercase());
        }
    }
    out
}

fn strip_leading<'a>(raw: &'a str, prefix: &str) -> &'a str {
    if let Some(rest) = raw.strip_prefix(prefix) {
        return rest;
    }
    match raw.char_indices().nth(prefix.chars().count()) {
        Some((offset, _)) => &raw[offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_prefix_and_camel_cases() {
        assert_eq!(strip_lower_camel("FOO_BAR_BAZ", Some("FOO_")), "barBaz");
        assert_eq!(strip_lower_camel("APP_LOG_LEVEL", Some("APP_")), "logLevel");
    }

    #[test]
    fn test_no_prefix() {
        assert_eq!(strip_lower_camel("db-host", None), "dbHost");
        assert_eq!(strip_lower_camel("db.pool.max_size", None), "dbPoolMaxSize");
        assert_eq!(strip_lower_camel("", None), "");
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        assert_eq!(strip_lower_camel("log_level", Some("")), "logLevel");
    }

    #[test]
    fn test_separator_only_keys_collapse() {
        assert_eq!(strip_lower_camel("-", None), "");
        assert_eq!(strip_lower_camel(".", None), "");
        assert_eq!(strip_lower_camel("--..__", None), "");
    }

    #[test]
    fn test_zero_tokens_collapse() {
        assert_eq!(strip_lower_camel("0", None), "");
        assert_eq!(strip_lower_camel("db_0", None), "db");
        assert_eq!(strip_lower_camel("000", None), "00");
    }

    #[test]
    fn test_non_zero_digits_survive() {
        assert_eq!(strip_lower_camel("server_2", None), "server2");
        assert_eq!(strip_lower_camel("shard_10_host", None), "shard10Host");
    }

    #[test]
    fn test_camel_input_is_lowered() {
        assert_eq!(strip_lower_camel("fooBar", None), "foobar");
        assert_eq!(strip_lower_camel("foobar", None), "foobar");
    }

    #[test]
    fn test_leading_separator_capitalizes_first_word() {
        assert_eq!(strip_lower_camel("/db/host", None), "DbHost");
        assert_eq!(strip_lower_camel("cfg/svc/db/host", Some("cfg/svc")), "DbHost");
    }

    #[test]
    fn test_mismatched_prefix_strips_by_length() {
        assert_eq!(strip_lower_camel("abcdkey", Some("wxyz")), "key");
        assert_eq!(strip_lower_camel("abcd_key", Some("wxyz")), "Key");
        assert_eq!(strip_lower_camel("ab", Some("wxyz")), "");
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(strip_lower_camel("café_name", None), "cafName");
    }
}
