use serde::Serialize;
use crate::structs::nsg_details::NsgDetails;
use crate::structs::route_table_details::RouteTableDetails;
use crate::structs::subnet_details::SubnetDetails;
use crate::structs::vnet_details::VnetDetails;

/// Best-effort aggregation of the customer-managed VNet topology. Whatever
/// resolved is kept even when individual lookups failed.
#[derive(Debug, Clone, Serialize, Default)]
pub struct VnetReport {
    pub vnets: Vec<VnetDetails>,
    pub subnets: Vec<SubnetDetails>,
    pub network_security_groups: Vec<NsgDetails>,
    pub route_tables: Vec<RouteTableDetails>,
    pub analysis_summary: VnetSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct VnetSummary {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub vnets_analyzed: usize,
    pub subnets_analyzed: usize,
    pub nsgs_analyzed: usize,
    pub route_tables_analyzed: usize,
    pub security_insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Default for VnetSummary {
    fn default() -> Self {
        Self {
            status: "completed".to_string(),
            error: None,
            vnets_analyzed: 0,
            subnets_analyzed: 0,
            nsgs_analyzed: 0,
            route_tables_analyzed: 0,
            security_insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}
