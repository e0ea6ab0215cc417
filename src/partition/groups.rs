//! Interior and separator groups of a subdomain
use crate::types::GlobalIndex;

/// A cluster of subdomain boundary nodes that share the same set of neighbouring subdomains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorGroup {
    /// Variable type of every node in the group
    pub variable_type: usize,
    /// Ids of the neighbouring subdomains (the group links), ascending
    pub links: Vec<usize>,
    /// Global indices of the nodes, ascending
    pub nodes: Vec<GlobalIndex>,
}

/// The interior nodes and separator groups of one subdomain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubdomainGroups {
    /// Nodes whose neighbours all lie in the subdomain, ascending
    pub interior: Vec<GlobalIndex>,
    /// Separator groups ordered by variable type, then by links
    pub separators: Vec<SeparatorGroup>,
}

impl SubdomainGroups {
    /// Number of nodes in the subdomain
    pub fn node_count(&self) -> usize {
        self.interior.len() + self.separators.iter().map(|g| g.nodes.len()).sum::<usize>()
    }
}
