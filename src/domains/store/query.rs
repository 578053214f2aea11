//! Path templates and filter-to-query mapping.

use serde_json::Value;

use crate::domains::tools::{ToolError, ValidatedArguments};

/// Maps a tool parameter onto an upstream query-string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryFilter {
    pub param: &'static str,
    pub key: &'static str,
}

impl QueryFilter {
    /// Parameter forwarded under its own name.
    pub const fn same(name: &'static str) -> Self {
        Self {
            param: name,
            key: name,
        }
    }

    /// Parameter forwarded under a different upstream key.
    pub const fn renamed(param: &'static str, key: &'static str) -> Self {
        Self { param, key }
    }
}

/// Collect the `(key, value)` pairs for every filter present in `arguments`.
///
/// Absent and `null` arguments are skipped; order follows `filters`.
pub fn build_query(
    filters: &[QueryFilter],
    arguments: &ValidatedArguments,
) -> Result<Vec<(String, String)>, ToolError> {
    filters
        .iter()
        .filter_map(|f| arguments.get(f.param).map(|v| (f, v)))
        .map(|(f, v)| Ok((f.key.to_string(), query_value(f.param, v)?)))
        .collect()
}

/// Form-encode query pairs.
pub fn encode_query(pairs: &[(String, String)]) -> Result<String, ToolError> {
    serde_urlencoded::to_string(pairs).map_err(|e| ToolError::internal(e.to_string()))
}

/// Split `template` into path segments, substituting whole-segment
/// `{name}` placeholders with argument values.
///
/// Segments are returned unencoded; the client percent-encodes them when it
/// builds the URL.
pub fn render_path(
    template: &str,
    arguments: &ValidatedArguments,
) -> Result<Vec<String>, ToolError> {
    template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = arguments.get(name).ok_or_else(|| {
                        ToolError::invalid_arguments(format!("'{name}' is missing or null"))
                    })?;
                    path_segment(name, value)
                }
                None => Ok(segment.to_string()),
            }
        })
        .collect()
}

fn path_segment(name: &str, value: &Value) -> Result<String, ToolError> {
    let segment = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            return Err(ToolError::invalid_arguments(format!(
                "'{name}' must be a string or a number"
            )));
        }
    };

    // Dot segments would be collapsed by URL normalisation.
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '?', '#'])
    {
        return Err(ToolError::invalid_arguments(format!(
            "'{name}' is not a valid path segment: {segment:?}"
        )));
    }
    Ok(segment)
}

fn query_value(name: &str, value: &Value) -> Result<String, ToolError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::Object(_) | Value::Null => Err(
                    ToolError::invalid_arguments(format!("'{name}' must be a flat list")),
                ),
                other => query_value(name, other),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|parts| parts.join(",")),
        Value::Object(_) | Value::Null => Err(ToolError::invalid_arguments(format!(
            "'{name}' cannot be used as a filter value"
        ))),
    }
}
