use std::collections::BTreeMap;
use serde::Serialize;
use crate::structs::resource_details::ResourceDetails;
use crate::structs::resource_summary::ResourceSummary;
use crate::structs::security_summary::SecuritySummary;

/// Formatted output of the resource discovery stage. Resources are grouped
/// by the trailing segment of their resource type.
#[derive(Debug, Clone, Serialize, Default)]
pub struct DiscoveryReport {
    pub total_resources: usize,
    pub resources_by_type: BTreeMap<String, Vec<ResourceSummary>>,
    pub security_summary: SecuritySummary,
    /// Adjacency lists keyed by resource id; only compute resources carry
    /// storage-account dependencies
    pub dependency_graph: BTreeMap<String, Vec<String>>,
    /// Deep per-resource detail, populated in verbose runs only
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub resource_details: BTreeMap<String, ResourceDetails>,
}
