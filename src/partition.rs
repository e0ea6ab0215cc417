//! Partitioning of Cartesian grids into subdomains
mod cartesian;
mod groups;
mod layout;
mod parameters;
mod pid_map;

pub use cartesian::CartesianPartitioner;
pub use groups::{SeparatorGroup, SubdomainGroups};
pub use layout::SubdomainLayout;
pub use parameters::{PartitionerParameters, SubdomainSizing};
pub use pid_map::{active_processes, create_pid_map};
