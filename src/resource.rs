//! Typed resource model for the vector storage stack.
//!
//! These types describe the two managed resources the stack declares (a
//! vector bucket and a vector search index) plus the tags and exported
//! outputs that accompany them in the rendered manifest. Resource identity
//! is declarative: a bucket is its name, an index is its (bucket, index)
//! name pair, and neither is ever mutated after declaration.

use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Manifest key for a declared resource (e.g. `VectorBucket`).
///
/// Logical ids are ASCII alphanumeric and unique within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!("logical id must be non-empty ASCII alphanumeric, got '{}'", id);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element type stored in a vector index. The provider currently accepts
/// only 32-bit floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorDataType {
    Float32,
}

impl VectorDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorDataType::Float32 => "float32",
        }
    }
}

/// Distance metric used for similarity queries over an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    Cosine,
    Euclidean,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "cosine" => Ok(DistanceMetric::Cosine),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            other => bail!(
                "unknown distance metric '{}'. Must be cosine or euclidean.",
                other
            ),
        }
    }
}

/// Properties of a vector storage bucket.
#[derive(Debug, Clone)]
pub struct VectorBucketProps {
    pub bucket_name: String,
}

/// Properties of a vector search index. The index lives inside a bucket and
/// references it by name.
#[derive(Debug, Clone)]
pub struct VectorIndexProps {
    pub bucket_name: String,
    pub index_name: String,
    pub data_type: VectorDataType,
    pub dimension: u32,
    pub distance_metric: DistanceMetric,
}

/// Typed properties for the resource kinds this stack can declare.
#[derive(Debug, Clone)]
pub enum ResourceProps {
    VectorBucket(VectorBucketProps),
    VectorIndex(VectorIndexProps),
}

impl ResourceProps {
    /// Provider resource type identifier for the manifest `Type` field.
    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceProps::VectorBucket(_) => "AWS::S3Vectors::VectorBucket",
            ResourceProps::VectorIndex(_) => "AWS::S3Vectors::Index",
        }
    }

    /// Human label for listings (`validate` output).
    pub fn display_name(&self) -> &str {
        match self {
            ResourceProps::VectorBucket(p) => &p.bucket_name,
            ResourceProps::VectorIndex(p) => &p.index_name,
        }
    }

    /// Whether stack-level tags propagate onto this resource at render time.
    pub fn taggable(&self) -> bool {
        match self {
            ResourceProps::VectorBucket(_) | ResourceProps::VectorIndex(_) => true,
        }
    }

    /// Render the manifest `Properties` map for this resource.
    pub fn to_properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        match self {
            ResourceProps::VectorBucket(p) => {
                props.insert("VectorBucketName".to_string(), json!(p.bucket_name));
            }
            ResourceProps::VectorIndex(p) => {
                props.insert("VectorBucketName".to_string(), json!(p.bucket_name));
                props.insert("IndexName".to_string(), json!(p.index_name));
                props.insert("DataType".to_string(), json!(p.data_type.as_str()));
                props.insert("Dimension".to_string(), json!(p.dimension));
                props.insert(
                    "DistanceMetric".to_string(),
                    json!(p.distance_metric.as_str()),
                );
            }
        }
        props
    }
}

/// A stack-level tag, propagated onto every taggable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Value of an exported output: a literal string or an attribute of a
/// declared resource (rendered as `Fn::GetAtt`).
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Literal(String),
    GetAtt {
        logical_id: LogicalId,
        attribute: String,
    },
}

/// One exported output of the stack, published for cross-stack consumption.
#[derive(Debug, Clone)]
pub struct OutputDef {
    pub name: String,
    pub value: OutputValue,
    pub description: String,
    pub export_name: String,
}

/// Validate a bucket or index name against the provider's naming rules:
/// 3–63 characters, lowercase letters, digits, and hyphens, starting and
/// ending with a letter or digit.
pub fn validate_resource_name(kind: &str, name: &str) -> Result<()> {
    if name.len() < 3 || name.len() > 63 {
        bail!(
            "{} name must be 3-63 characters, got {} ('{}')",
            kind,
            name.len(),
            name
        );
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!(
            "{} name may contain only lowercase letters, digits, and hyphens: '{}'",
            kind,
            name
        );
    }
    let first = name.chars().next().unwrap_or('-');
    let last = name.chars().last().unwrap_or('-');
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        bail!(
            "{} name must start and end with a letter or digit: '{}'",
            kind,
            name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_id_rejects_non_alphanumeric() {
        assert!(LogicalId::new("VectorBucket").is_ok());
        assert!(LogicalId::new("").is_err());
        assert!(LogicalId::new("Vector-Bucket").is_err());
        assert!(LogicalId::new("Vector Bucket").is_err());
    }

    #[test]
    fn distance_metric_parse() {
        assert_eq!(DistanceMetric::parse("cosine").unwrap(), DistanceMetric::Cosine);
        assert_eq!(
            DistanceMetric::parse("euclidean").unwrap(),
            DistanceMetric::Euclidean
        );
        assert!(DistanceMetric::parse("manhattan").is_err());
    }

    #[test]
    fn index_properties_shape() {
        let props = ResourceProps::VectorIndex(VectorIndexProps {
            bucket_name: "code-mapping-vector-bucket".to_string(),
            index_name: "code-mapping-vector-index".to_string(),
            data_type: VectorDataType::Float32,
            dimension: 1024,
            distance_metric: DistanceMetric::Cosine,
        });
        let map = props.to_properties();
        assert_eq!(map["VectorBucketName"], json!("code-mapping-vector-bucket"));
        assert_eq!(map["IndexName"], json!("code-mapping-vector-index"));
        assert_eq!(map["DataType"], json!("float32"));
        assert_eq!(map["Dimension"], json!(1024));
        assert_eq!(map["DistanceMetric"], json!("cosine"));
    }

    #[test]
    fn resource_name_rules() {
        assert!(validate_resource_name("bucket", "code-mapping-vector-bucket").is_ok());
        assert!(validate_resource_name("bucket", "ab").is_err());
        assert!(validate_resource_name("bucket", "Uppercase-Name").is_err());
        assert!(validate_resource_name("bucket", "-leading-hyphen").is_err());
        assert!(validate_resource_name("bucket", "trailing-hyphen-").is_err());
        assert!(validate_resource_name("bucket", &"x".repeat(64)).is_err());
    }
}
