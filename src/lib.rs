//! Cartesian subdomain partitioning and bordered linear algebra for domain-decomposition solvers
#![cfg_attr(feature = "strict", deny(warnings), deny(unused_crate_dependencies))]
#![warn(missing_docs)]

pub mod comm;
pub mod error;
pub mod linalg;
pub mod map;
pub mod partition;
pub mod topology;
pub mod traits;
pub mod types;

pub use comm::SingleProcess;
pub use error::{Error, Result};
pub use linalg::{BorderedOperator, BorderedVector, MultiVector};
pub use map::IndexMap;
pub use partition::{CartesianPartitioner, PartitionerParameters};
pub use topology::CartesianGrid;
