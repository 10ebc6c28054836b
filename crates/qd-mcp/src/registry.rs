//! Tool Registry — descriptors advertised through `tools/list`, each bound
//! to the handler `tools/call` dispatches to.

use crate::tools::{self, ToolOutput};
use crate::McpError;
use qd_core::section::SectionKey;
use qd_search::SearchOptions;
use qd_store::ContentStore;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

pub const LIST_PACKAGES: &str = "list_packages";
pub const GET_PACKAGE_DOCS: &str = "get_package_docs";
pub const GET_ALL_PACKAGE_DOCS: &str = "get_all_package_docs";
pub const SEARCH_DOCS: &str = "search_docs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

/// One input parameter of a tool.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
    /// Fixed set of valid values, empty if unconstrained.
    pub enum_values: Vec<&'static str>,
    pub default: Option<Value>,
}

impl ParamSpec {
    fn new(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            required: false,
            enum_values: vec![],
            default: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn one_of(mut self, values: Vec<&'static str>) -> Self {
        self.enum_values = values;
        self
    }

    fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.param_type));
        schema.insert("description".into(), json!(self.description));
        if !self.enum_values.is_empty() {
            schema.insert("enum".into(), json!(self.enum_values));
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        if self.param_type == ParamType::Integer {
            schema.insert("minimum".into(), json!(0));
        }
        Value::Object(schema)
    }
}

/// What a handler sees besides its arguments.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub store: &'a ContentStore,
    pub search: SearchOptions,
}

pub type ToolHandler = fn(&ToolContext<'_>, &Value) -> Result<ToolOutput, McpError>;

/// A callable operation with its input schema.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub handler: ToolHandler,
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    /// JSON Schema object describing the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    /// Entry for a `tools/list` response.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// Ordered tool registry. Listing order is registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four documentation tools. `default_limit` is advertised as the
    /// `search_docs` limit default.
    pub fn builtin(default_limit: usize) -> Self {
        let sections: Vec<&'static str> = SectionKey::ALL.iter().map(|k| k.as_str()).collect();
        let package_id = ParamSpec::new(
            "packageId",
            ParamType::String,
            "Package ID (e.g., data-grid, ui-kit, flow)",
        )
        .required();

        let mut registry = Self::new();
        registry.register(ToolDescriptor {
            name: LIST_PACKAGES,
            description: "List all available Quivly packages with their metadata",
            params: vec![],
            handler: |ctx, _| tools::list_packages(ctx.store),
        });
        registry.register(ToolDescriptor {
            name: GET_PACKAGE_DOCS,
            description: "Get documentation for a specific package and section",
            params: vec![
                package_id.clone(),
                ParamSpec::new(
                    "section",
                    ParamType::String,
                    "Documentation section; omit to get every section",
                )
                .one_of(sections),
            ],
            handler: |ctx, args| tools::get_package_docs(ctx.store, args),
        });
        registry.register(ToolDescriptor {
            name: GET_ALL_PACKAGE_DOCS,
            description: "Get all documentation sections for a specific package",
            params: vec![package_id],
            handler: |ctx, args| tools::get_all_package_docs(ctx.store, args),
        });
        registry.register(ToolDescriptor {
            name: SEARCH_DOCS,
            description: "Search across all documentation content",
            params: vec![
                ParamSpec::new("query", ParamType::String, "Search query string (at least 2 characters)")
                    .required(),
                ParamSpec::new(
                    "limit",
                    ParamType::Integer,
                    "Maximum number of results to return",
                )
                .default_value(json!(default_limit)),
            ],
            handler: |ctx, args| tools::search_docs(ctx.store, args, ctx.search),
        });
        registry
    }

    /// Register a tool. Replaces an existing tool with the same name in place.
    pub fn register(&mut self, tool: ToolDescriptor) {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
