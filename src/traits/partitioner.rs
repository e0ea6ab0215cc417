//! Partitioners
use crate::{
    error::Result,
    map::IndexMap,
    partition::{PartitionerParameters, SubdomainGroups},
    types::GlobalIndex,
};
use std::rc::Rc;

/// Decomposition of a grid into non-overlapping subdomains.
///
/// The partitioning methods are collective.
pub trait Partitioner {
    /// Partition the grid. If `repart` is true the partitioner may change which processes
    /// own the nodes, and may deactivate processes.
    ///
    /// On error nothing is modified.
    fn partition(&mut self, repart: bool) -> Result<()>;

    /// Interior nodes and separator groups of the locally owned subdomain `sd`
    fn groups(&self, sd: usize) -> Result<SubdomainGroups>;

    /// Number of subdomains owned by this process
    fn num_local_parts(&self) -> usize;

    /// Number of subdomains when using subdomains of `sx × sy × sz` nodes
    fn num_global_parts(&self, sx: usize, sy: usize, sz: usize) -> usize;

    /// Has [Partitioner::partition] completed successfully?
    fn partitioned(&self) -> bool;

    /// Number of variables per grid node
    fn dof_per_node(&self) -> usize;

    /// Type tag of the variable with global index `gid`
    fn variable_type(&self, gid: GlobalIndex) -> usize;

    /// Subdomain containing `gid`. This only depends on the grid parameters.
    fn subdomain(&self, gid: GlobalIndex) -> usize;

    /// The partitioned map, in which the elements of each local subdomain are contiguous
    fn map(&self) -> Result<Rc<IndexMap>>;

    /// Map of the global ids of the subdomains owned by each process
    fn subdomain_map(&self) -> Result<Rc<IndexMap>>;

    /// Move every locally owned element of `base` to this process's destination process
    fn move_map(&self, base: &IndexMap) -> Result<IndexMap>;

    /// Parameters for the next coarser level of the hierarchy
    fn next_level_parameters(&self) -> PartitionerParameters;
}
