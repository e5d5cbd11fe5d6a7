//! Stack validation command.
//!
//! Builds the resource graph from config and reports what would be
//! synthesized: resources in creation order, their dependencies, outputs,
//! and the ambient deployment target. All naming and acyclicity failures
//! surface here as fatal errors before anything is written.

use anyhow::Result;

use crate::config::Config;
use crate::stack::{build_stack, DeployEnv};

pub fn run_validate(config: &Config) -> Result<()> {
    let env = DeployEnv::from_env();
    let stack = build_stack(config, &env)?;
    let order = stack.graph.topo_order()?;

    println!("stack {}", stack.name);
    println!(
        "  target: region {}, account {}",
        env.region,
        env.account.as_deref().unwrap_or("(ambient)")
    );
    println!();
    println!("  {:<14} {:<32} {:<30} DEPENDS ON", "LOGICAL ID", "TYPE", "NAME");
    for node in &order {
        let deps: Vec<&str> = stack
            .graph
            .dependencies_of(&node.logical_id)
            .into_iter()
            .map(|id| id.as_str())
            .collect();
        let deps = if deps.is_empty() {
            "-".to_string()
        } else {
            deps.join(", ")
        };
        println!(
            "  {:<14} {:<32} {:<30} {}",
            node.logical_id.as_str(),
            node.props.resource_type(),
            node.props.display_name(),
            deps
        );
    }
    println!();
    println!(
        "  {} resources, {} outputs, {} tags — ok",
        order.len(),
        stack.outputs.len(),
        stack.tags.len()
    );

    Ok(())
}
