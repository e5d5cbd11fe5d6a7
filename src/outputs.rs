//! Exported outputs listing.
//!
//! Prints the stack's exported values, the bucket name and the index
//! identifier, as the consuming stacks will see them. Human output is an
//! aligned table; `--format json` emits the same rows for machine use.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::resource::OutputValue;
use crate::stack::{build_stack, DeployEnv};

#[derive(Debug, Serialize)]
struct OutputRow {
    name: String,
    value: serde_json::Value,
    description: String,
    export: String,
}

pub fn run_outputs(config: &Config, format: &str) -> Result<()> {
    let env = DeployEnv::from_env();
    let stack = build_stack(config, &env)?;

    let rows: Vec<OutputRow> = stack
        .outputs
        .iter()
        .map(|out| OutputRow {
            name: out.name.clone(),
            value: match &out.value {
                OutputValue::Literal(s) => json!(s),
                OutputValue::GetAtt {
                    logical_id,
                    attribute,
                } => json!({ "Fn::GetAtt": [logical_id.as_str(), attribute] }),
            },
            description: out.description.clone(),
            export: out.export_name.clone(),
        })
        .collect();

    match format {
        "table" => {
            println!("{:<18} {:<42} EXPORT", "OUTPUT", "VALUE");
            for row in &rows {
                let value = match &row.value {
                    serde_json::Value::String(s) => s.clone(),
                    other => format!(
                        "!GetAtt {}",
                        other["Fn::GetAtt"]
                            .as_array()
                            .map(|parts| parts
                                .iter()
                                .filter_map(|p| p.as_str())
                                .collect::<Vec<_>>()
                                .join("."))
                            .unwrap_or_default()
                    ),
                };
                println!("{:<18} {:<42} {}", row.name, value, row.export);
            }
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        other => bail!("unknown output format '{}'. Must be table or json.", other),
    }

    Ok(())
}
