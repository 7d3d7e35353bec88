//! Output formatters for the aggregated configuration.
//!
//! Invariants:
//! - Keys are written in the mapping's (lexicographic) order.
//! - In watch mode every YAML document starts with `---` so consecutive
//!   reloads stay separable.

use anyhow::Result;
use config_wrangler::FoundVars;

use crate::args::OutputFormat;

/// Render `vars` as a complete document, ending with a newline.
pub fn format_vars(vars: &FoundVars, format: OutputFormat, streaming: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if streaming => format!("{}\n", serde_json::to_string(vars)?),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(vars)?),
        OutputFormat::Yaml if streaming => format!("---\n{}", serde_yaml::to_string(vars)?),
        OutputFormat::Yaml => serde_yaml::to_string(vars)?,
    };
    Ok(rendered)
}
