//! Resource dependency graph.
//!
//! A small directed acyclic graph of typed resource nodes with explicit
//! dependency edges. Emission order is topological, so every resource
//! appears in the manifest after everything it depends on. The graph is
//! built once at synthesis time and never mutated afterwards.

use anyhow::{bail, Result};

use crate::resource::{LogicalId, ResourceProps};

/// One declared resource in the graph.
#[derive(Debug, Clone)]
pub struct ResourceNode {
    pub logical_id: LogicalId,
    pub props: ResourceProps,
}

/// Directed acyclic graph of resources. Insertion order is preserved and
/// breaks ties in topological ordering, keeping emission deterministic.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    nodes: Vec<ResourceNode>,
    /// Edges as (dependent, dependency) node indices.
    edges: Vec<(usize, usize)>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: ResourceNode) -> Result<()> {
        if self.index_of(&node.logical_id).is_some() {
            bail!("duplicate logical id '{}'", node.logical_id);
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Record that `dependent` must be created after (and destroyed before)
    /// `dependency`.
    pub fn add_dependency(&mut self, dependent: &LogicalId, dependency: &LogicalId) -> Result<()> {
        let from = self
            .index_of(dependent)
            .ok_or_else(|| anyhow::anyhow!("unknown logical id '{}'", dependent))?;
        let to = self
            .index_of(dependency)
            .ok_or_else(|| anyhow::anyhow!("unknown logical id '{}'", dependency))?;
        if from == to {
            bail!("resource '{}' cannot depend on itself", dependent);
        }
        if !self.edges.contains(&(from, to)) {
            self.edges.push((from, to));
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &LogicalId) -> bool {
        self.index_of(id).is_some()
    }

    /// Logical ids this resource depends on, in edge-insertion order.
    pub fn dependencies_of(&self, id: &LogicalId) -> Vec<&LogicalId> {
        match self.index_of(id) {
            Some(idx) => self
                .edges
                .iter()
                .filter(|(from, _)| *from == idx)
                .map(|(_, to)| &self.nodes[*to].logical_id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nodes in topological order (dependencies before dependents), via
    /// Kahn's algorithm. Ties are broken by insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains a dependency cycle.
    pub fn topo_order(&self) -> Result<Vec<&ResourceNode>> {
        // in_degree[i] = number of unemitted dependencies of node i
        let mut in_degree = vec![0usize; self.nodes.len()];
        for (from, _) in &self.edges {
            in_degree[*from] += 1;
        }

        let mut emitted = vec![false; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());

        while order.len() < self.nodes.len() {
            let next = (0..self.nodes.len()).find(|&i| !emitted[i] && in_degree[i] == 0);
            let Some(idx) = next else {
                let stuck: Vec<&str> = (0..self.nodes.len())
                    .filter(|&i| !emitted[i])
                    .map(|i| self.nodes[i].logical_id.as_str())
                    .collect();
                bail!("dependency cycle among resources: {}", stuck.join(", "));
            };
            emitted[idx] = true;
            order.push(&self.nodes[idx]);
            for (from, to) in &self.edges {
                if *to == idx {
                    in_degree[*from] -= 1;
                }
            }
        }

        Ok(order)
    }

    fn index_of(&self, id: &LogicalId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.logical_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{VectorBucketProps, VectorIndexProps};
    use crate::resource::{DistanceMetric, VectorDataType};

    fn bucket_node(id: &str, name: &str) -> ResourceNode {
        ResourceNode {
            logical_id: LogicalId::new(id).unwrap(),
            props: ResourceProps::VectorBucket(VectorBucketProps {
                bucket_name: name.to_string(),
            }),
        }
    }

    fn index_node(id: &str, bucket: &str, name: &str) -> ResourceNode {
        ResourceNode {
            logical_id: LogicalId::new(id).unwrap(),
            props: ResourceProps::VectorIndex(VectorIndexProps {
                bucket_name: bucket.to_string(),
                index_name: name.to_string(),
                data_type: VectorDataType::Float32,
                dimension: 1024,
                distance_metric: DistanceMetric::Cosine,
            }),
        }
    }

    #[test]
    fn topo_orders_dependency_first() {
        let mut graph = ResourceGraph::new();
        // Insert the index first so ordering must come from the edge,
        // not from insertion order.
        graph.insert(index_node("VectorIndex", "b", "i")).unwrap();
        graph.insert(bucket_node("VectorBucket", "b")).unwrap();
        graph
            .add_dependency(
                &LogicalId::new("VectorIndex").unwrap(),
                &LogicalId::new("VectorBucket").unwrap(),
            )
            .unwrap();

        let order = graph.topo_order().unwrap();
        let ids: Vec<&str> = order.iter().map(|n| n.logical_id.as_str()).collect();
        assert_eq!(ids, vec!["VectorBucket", "VectorIndex"]);
    }

    #[test]
    fn independent_nodes_keep_insertion_order() {
        let mut graph = ResourceGraph::new();
        graph.insert(bucket_node("BucketB", "b")).unwrap();
        graph.insert(bucket_node("BucketA", "a")).unwrap();

        let order = graph.topo_order().unwrap();
        let ids: Vec<&str> = order.iter().map(|n| n.logical_id.as_str()).collect();
        assert_eq!(ids, vec!["BucketB", "BucketA"]);
    }

    #[test]
    fn duplicate_logical_id_rejected() {
        let mut graph = ResourceGraph::new();
        graph.insert(bucket_node("VectorBucket", "b1")).unwrap();
        assert!(graph.insert(bucket_node("VectorBucket", "b2")).is_err());
    }

    #[test]
    fn unknown_edge_endpoint_rejected() {
        let mut graph = ResourceGraph::new();
        graph.insert(bucket_node("VectorBucket", "b")).unwrap();
        let missing = LogicalId::new("Missing").unwrap();
        let bucket = LogicalId::new("VectorBucket").unwrap();
        assert!(graph.add_dependency(&missing, &bucket).is_err());
        assert!(graph.add_dependency(&bucket, &missing).is_err());
    }

    #[test]
    fn self_dependency_rejected() {
        let mut graph = ResourceGraph::new();
        graph.insert(bucket_node("VectorBucket", "b")).unwrap();
        let bucket = LogicalId::new("VectorBucket").unwrap();
        assert!(graph.add_dependency(&bucket, &bucket).is_err());
    }

    #[test]
    fn cycle_detected() {
        let mut graph = ResourceGraph::new();
        graph.insert(bucket_node("A", "a-b")).unwrap();
        graph.insert(bucket_node("B", "b-b")).unwrap();
        let a = LogicalId::new("A").unwrap();
        let b = LogicalId::new("B").unwrap();
        graph.add_dependency(&a, &b).unwrap();
        graph.add_dependency(&b, &a).unwrap();

        let err = graph.topo_order().unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn dependencies_of_lists_edges() {
        let mut graph = ResourceGraph::new();
        graph.insert(bucket_node("VectorBucket", "b")).unwrap();
        graph.insert(index_node("VectorIndex", "b", "i")).unwrap();
        let index = LogicalId::new("VectorIndex").unwrap();
        let bucket = LogicalId::new("VectorBucket").unwrap();
        graph.add_dependency(&index, &bucket).unwrap();

        let deps = graph.dependencies_of(&index);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].as_str(), "VectorBucket");
        assert!(graph.dependencies_of(&bucket).is_empty());
    }
}
