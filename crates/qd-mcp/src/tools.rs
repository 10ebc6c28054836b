//! Tool handlers — turn validated arguments into text results.

use crate::McpError;
use qd_core::extract::extract;
use qd_core::package::Package;
use qd_core::section::{PackageDocs, Section};
use qd_search::{SearchIndex, SearchOptions};
use qd_store::ContentStore;
use serde_json::{json, Value};

/// Text payload of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// MCP `tools/call` result body.
    pub fn to_json(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.text }],
            "isError": self.is_error,
        })
    }
}

impl From<McpError> for ToolOutput {
    fn from(e: McpError) -> Self {
        Self::error(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub fn list_packages(store: &ContentStore) -> Result<ToolOutput, McpError> {
    let packages = store.list_packages();
    let text =
        serde_json::to_string_pretty(&packages).map_err(|e| McpError::Internal(e.to_string()))?;
    Ok(ToolOutput::text(text))
}

pub fn get_package_docs(store: &ContentStore, args: &Value) -> Result<ToolOutput, McpError> {
    let package_id = required_str(args, "packageId")?;
    match optional_str(args, "section")? {
        Some(section) => {
            let not_found = || {
                McpError::NotFound(format!(
                    "Package \"{package_id}\" not found or section \"{section}\" does not exist."
                ))
            };
            let package = store.package(package_id).ok_or_else(not_found)?;
            let found = store.get_section(package_id, section).ok_or_else(not_found)?;
            Ok(ToolOutput::text(render_section(package, found)))
        }
        None => get_all_package_docs(store, args),
    }
}

pub fn get_all_package_docs(store: &ContentStore, args: &Value) -> Result<ToolOutput, McpError> {
    let package_id = required_str(args, "packageId")?;
    let not_found = || McpError::NotFound(format!("Package \"{package_id}\" not found."));
    let package = store.package(package_id).ok_or_else(not_found)?;
    let docs = store.get_all_sections(package_id).ok_or_else(not_found)?;
    Ok(ToolOutput::text(render_all(package, docs)))
}

/// Run a search. An invalid query is reported as `{"results": [], "error": ...}`
/// with the error flag set; zero matches is a normal result.
pub fn search_docs(
    store: &ContentStore,
    args: &Value,
    defaults: SearchOptions,
) -> Result<ToolOutput, McpError> {
    let query = required_str(args, "query")?;
    let limit = optional_usize(args, "limit")?.unwrap_or(defaults.limit);

    let output = match SearchIndex::new(store).search(query, defaults.with_limit(limit)) {
        Ok(hits) => ToolOutput::text(to_pretty(&hits)?),
        Err(e) => ToolOutput::error(to_pretty(&json!({ "results": [], "error": e.to_string() }))?),
    };
    Ok(output)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_header(package: &Package) -> String {
    format!(
        "# {} Documentation\n\n**Version:** {}\n**Status:** {}\n**Description:** {}\n\n---\n\n",
        package.name, package.version, package.status, package.description
    )
}

/// Header plus one section.
pub fn render_section(package: &Package, section: &Section) -> String {
    let mut out = render_header(package);
    out.push_str(&format!("## {}\n\n", section.title));
    out.push_str(&extract(&section.content));
    out
}

/// Header plus every section in authoring order, each followed by a rule.
pub fn render_all(package: &Package, docs: &PackageDocs) -> String {
    let mut out = render_header(package);
    if docs.is_empty() {
        out.push_str("_No documentation sections are defined for this package._\n");
        return out;
    }
    for (_, section) in docs.iter() {
        out.push_str(&format!("## {}\n\n", section.title));
        out.push_str(&extract(&section.content));
        out.push_str("\n\n---\n\n");
    }
    out
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

fn arg<'a>(args: &'a Value, key: &str) -> Result<Option<&'a Value>, McpError> {
    match args {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(map.get(key).filter(|v| !v.is_null())),
        _ => Err(McpError::InvalidArguments(
            "arguments must be an object".into(),
        )),
    }
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, McpError> {
    optional_str(args, key)?
        .ok_or_else(|| McpError::InvalidArguments(format!("missing required parameter: {key}")))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>, McpError> {
    match arg(args, key)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(McpError::InvalidArguments(format!("{key} must be a string"))),
    }
}

fn optional_usize(args: &Value, key: &str) -> Result<Option<usize>, McpError> {
    let Some(value) = arg(args, key)? else {
        return Ok(None);
    };
    // Integral floats such as 5.0 are accepted.
    let n = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
        .ok_or_else(|| {
            McpError::InvalidArguments(format!("{key} must be a non-negative integer"))
        })?;
    Ok(Some(usize::try_from(n).unwrap_or(usize::MAX)))
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::Internal(e.to_string()))
}
