//! The code-mapping vector storage stack.
//!
//! Assembles the two-node resource graph (one vector bucket, one vector
//! index that depends on it) plus the stack's exported outputs. The index
//! references the bucket by configured name, so renaming the bucket in
//! config and re-synthesizing updates both the index's reference and the
//! exported outputs.

use anyhow::Result;

use crate::config::Config;
use crate::graph::{ResourceGraph, ResourceNode};
use crate::resource::{
    DistanceMetric, LogicalId, OutputDef, OutputValue, ResourceProps, Tag, VectorBucketProps,
    VectorDataType, VectorIndexProps,
};

pub const BUCKET_LOGICAL_ID: &str = "VectorBucket";
pub const INDEX_LOGICAL_ID: &str = "VectorIndex";

/// Attribute of the index resource exported as the index output.
pub const INDEX_ARN_ATTRIBUTE: &str = "IndexArn";

/// Ambient deployment context. Consumed at declaration time only; nothing
/// in the rendered manifest embeds it.
#[derive(Debug, Clone)]
pub struct DeployEnv {
    pub account: Option<String>,
    pub region: String,
}

impl DeployEnv {
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    /// Read `CDK_DEFAULT_ACCOUNT` / `CDK_DEFAULT_REGION` from the
    /// environment, falling back to the default region.
    pub fn from_env() -> Self {
        Self {
            account: std::env::var("CDK_DEFAULT_ACCOUNT")
                .ok()
                .filter(|s| !s.is_empty()),
            region: std::env::var("CDK_DEFAULT_REGION")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_REGION.to_string()),
        }
    }
}

/// A fully assembled stack, ready for manifest rendering.
#[derive(Debug)]
pub struct Stack {
    pub name: String,
    pub description: Option<String>,
    pub env: DeployEnv,
    pub tags: Vec<Tag>,
    pub graph: ResourceGraph,
    pub outputs: Vec<OutputDef>,
}

/// Build the code-mapping stack from configuration.
pub fn build_stack(config: &Config, env: &DeployEnv) -> Result<Stack> {
    let bucket_id = LogicalId::new(BUCKET_LOGICAL_ID)?;
    let index_id = LogicalId::new(INDEX_LOGICAL_ID)?;

    let mut graph = ResourceGraph::new();
    graph.insert(ResourceNode {
        logical_id: bucket_id.clone(),
        props: ResourceProps::VectorBucket(VectorBucketProps {
            bucket_name: config.vector_bucket.name.clone(),
        }),
    })?;
    graph.insert(ResourceNode {
        logical_id: index_id.clone(),
        props: ResourceProps::VectorIndex(VectorIndexProps {
            bucket_name: config.vector_bucket.name.clone(),
            index_name: config.vector_index.name.clone(),
            data_type: VectorDataType::Float32,
            dimension: config.vector_index.dimension,
            distance_metric: DistanceMetric::parse(&config.vector_index.distance_metric)?,
        }),
    })?;
    // The only ordering invariant in the stack: the index is created after
    // the bucket and destroyed before it.
    graph.add_dependency(&index_id, &bucket_id)?;

    let outputs = vec![
        OutputDef {
            name: "VectorBucketName".to_string(),
            value: OutputValue::Literal(config.vector_bucket.name.clone()),
            description: "S3 Vectors bucket name".to_string(),
            export_name: format!("{}VectorBucketName", config.stack.name),
        },
        OutputDef {
            name: "VectorIndexArn".to_string(),
            value: OutputValue::GetAtt {
                logical_id: index_id,
                attribute: INDEX_ARN_ATTRIBUTE.to_string(),
            },
            description: "S3 Vectors index ARN".to_string(),
            export_name: format!("{}VectorIndexArn", config.stack.name),
        },
    ];

    let tags = config
        .stack
        .tags
        .iter()
        .map(|(key, value)| Tag {
            key: key.clone(),
            value: value.clone(),
        })
        .collect();

    Ok(Stack {
        name: config.stack.name.clone(),
        description: config.stack.description.clone(),
        env: env.clone(),
        tags,
        graph,
        outputs,
    })
}
