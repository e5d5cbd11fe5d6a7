use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::resource::{validate_resource_name, DistanceMetric};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub stack: StackConfig,
    pub vector_bucket: VectorBucketConfig,
    pub vector_index: VectorIndexConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StackConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_tags")]
    pub tags: BTreeMap<String, String>,
}

fn default_tags() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Project".to_string(), "code-field-mapping".to_string()),
        ("ManagedBy".to_string(), "cmsite".to_string()),
    ])
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorBucketConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorIndexConfig {
    pub name: String,
    #[serde(default = "default_dimension")]
    pub dimension: u32,
    #[serde(default = "default_distance_metric")]
    pub distance_metric: String,
}

fn default_dimension() -> u32 {
    1024
}
fn default_distance_metric() -> String {
    "cosine".to_string()
}

/// Thresholds and timings for the landing-page interaction engine.
#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    /// An element reveals once its top is this many px above the viewport
    /// bottom.
    #[serde(default = "default_reveal_margin")]
    pub reveal_margin_px: i64,
    /// Scroll offsets strictly greater than this switch the nav to its
    /// opaque style.
    #[serde(default = "default_nav_threshold")]
    pub nav_threshold_px: i64,
    /// Carousel advance period.
    #[serde(default = "default_carousel_interval")]
    pub carousel_interval_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal_margin_px: default_reveal_margin(),
            nav_threshold_px: default_nav_threshold(),
            carousel_interval_ms: default_carousel_interval(),
        }
    }
}

fn default_reveal_margin() -> i64 {
    150
}
fn default_nav_threshold() -> i64 {
    100
}
fn default_carousel_interval() -> u64 {
    3000
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate stack
    if config.stack.name.is_empty()
        || !config
            .stack
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        anyhow::bail!(
            "stack.name must be non-empty alphanumeric (hyphens allowed): '{}'",
            config.stack.name
        );
    }

    // Validate resources
    validate_resource_name("vector_bucket", &config.vector_bucket.name)?;
    validate_resource_name("vector_index", &config.vector_index.name)?;

    if config.vector_index.dimension == 0 || config.vector_index.dimension > 4096 {
        anyhow::bail!(
            "vector_index.dimension must be in 1..=4096, got {}",
            config.vector_index.dimension
        );
    }
    DistanceMetric::parse(&config.vector_index.distance_metric)?;

    // Validate page thresholds
    if config.page.reveal_margin_px < 0 {
        anyhow::bail!("page.reveal_margin_px must be >= 0");
    }
    if config.page.nav_threshold_px < 0 {
        anyhow::bail!("page.nav_threshold_px must be >= 0");
    }
    if config.page.carousel_interval_ms == 0 {
        anyhow::bail!("page.carousel_interval_ms must be > 0");
    }

    Ok(config)
}
