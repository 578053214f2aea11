//! Tool descriptors and their declarative parameter schemas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;

use super::error::ToolError;
use super::handlers::{ArgumentBag, ToolOperation, ValidatedArguments};

/// JSON type tag of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParameterKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParameterKind,
    pub description: String,
}

/// Declared parameters of a tool plus the ones a call must provide.
///
/// Required parameters can only be added through [`ParameterSchema::required`],
/// which also declares them, so `required` is always a subset of the
/// declared names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSchema {
    parameters: Vec<ParameterSpec>,
    required: Vec<String>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter every call must include.
    pub fn required(
        mut self,
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.declare(name, kind, description.into());
        self
    }

    /// Declare a parameter a call may include.
    pub fn optional(
        mut self,
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
    ) -> Self {
        self.declare(name.into(), kind, description.into());
        self
    }

    fn declare(&mut self, name: String, kind: ParameterKind, description: String) {
        // Re-declaring replaces the earlier declaration but keeps its position.
        if let Some(existing) = self.parameters.iter_mut().find(|p| p.name == name) {
            existing.kind = kind;
            existing.description = description;
        } else {
            self.parameters.push(ParameterSpec {
                name,
                kind,
                description,
            });
        }
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Required parameter names, in declaration order.
    pub fn required_parameters(&self) -> &[String] {
        &self.required
    }

    /// Presence check over the required parameters.
    ///
    /// Fails on the first missing name in declaration order. Types, values
    /// and undeclared keys are not examined.
    pub fn validate(&self, arguments: ArgumentBag) -> Result<ValidatedArguments, ToolError> {
        if let Some(missing) = self
            .required
            .iter()
            .find(|name| !arguments.contains_key(name.as_str()))
        {
            return Err(ToolError::missing_parameter(missing.clone()));
        }
        Ok(ValidatedArguments::new(arguments))
    }

    /// Render as a JSON Schema object for discovery responses.
    ///
    /// Built by hand rather than derived with schemars: arguments are dynamic
    /// bags, so the schema only describes names, JSON types and presence.
    pub fn to_input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    json!({ "type": p.kind.as_str(), "description": p.description }),
                )
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }
}

/// A callable tool: name, description, schema and operation.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub schema: ParameterSchema,
    pub operation: Arc<dyn ToolOperation>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ParameterSchema,
        operation: Arc<dyn ToolOperation>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            operation,
        }
    }

    /// Discovery projection of this descriptor.
    pub fn listing(&self) -> ToolListing {
        ToolListing {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.schema.to_input_schema(),
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Entry of a `tools/list` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolListing {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
