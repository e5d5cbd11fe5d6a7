//! CloudFormation-style manifest rendering.
//!
//! Turns an assembled [`Stack`] into the declarative resource manifest the
//! provisioning engine consumes: a `Resources` map emitted in topological
//! order with explicit `DependsOn` edges, and an `Outputs` map with export
//! names for cross-stack consumption. Each rendered template carries a
//! SHA-256 content digest used by `synth` for staleness detection.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

use crate::resource::OutputValue;
use crate::stack::Stack;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A rendered resource manifest.
#[derive(Debug, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Resources")]
    pub resources: Map<String, Value>,
    #[serde(rename = "Outputs", skip_serializing_if = "serde_json::Map::is_empty")]
    pub outputs: Map<String, Value>,
}

impl Template {
    /// Render the stack into a manifest. Resources are emitted in
    /// topological order, so rendering also proves the graph acyclic.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph has a dependency cycle or an output
    /// references an undeclared resource.
    pub fn render(stack: &Stack) -> Result<Self> {
        let mut resources = Map::new();
        for node in stack.graph.topo_order()? {
            let mut entry = Map::new();
            entry.insert("Type".to_string(), json!(node.props.resource_type()));

            let mut props = node.props.to_properties();
            if node.props.taggable() && !stack.tags.is_empty() {
                props.insert("Tags".to_string(), json!(stack.tags));
            }
            entry.insert("Properties".to_string(), Value::Object(props));

            let deps: Vec<&str> = stack
                .graph
                .dependencies_of(&node.logical_id)
                .into_iter()
                .map(|id| id.as_str())
                .collect();
            if !deps.is_empty() {
                entry.insert("DependsOn".to_string(), json!(deps));
            }

            resources.insert(node.logical_id.to_string(), Value::Object(entry));
        }

        let mut outputs = Map::new();
        for out in &stack.outputs {
            if let OutputValue::GetAtt { logical_id, .. } = &out.value {
                if !stack.graph.contains(logical_id) {
                    bail!(
                        "output '{}' references undeclared resource '{}'",
                        out.name,
                        logical_id
                    );
                }
            }
            outputs.insert(
                out.name.clone(),
                json!({
                    "Description": out.description,
                    "Value": render_output_value(&out.value),
                    "Export": { "Name": out.export_name },
                }),
            );
        }

        Ok(Template {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description: stack.description.clone(),
            resources,
            outputs,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Hex SHA-256 of the rendered JSON, for staleness detection.
    pub fn digest(&self) -> Result<String> {
        Ok(digest_hex(&self.to_json_pretty()?))
    }
}

/// Hex SHA-256 of arbitrary manifest text.
pub fn digest_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

fn render_output_value(value: &OutputValue) -> Value {
    match value {
        OutputValue::Literal(s) => json!(s),
        OutputValue::GetAtt {
            logical_id,
            attribute,
        } => json!({ "Fn::GetAtt": [logical_id.as_str(), attribute] }),
    }
}
