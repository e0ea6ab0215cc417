//! Traits

mod bordered;
mod comm;
mod multivec;
mod operator;
mod partitioner;

pub use bordered::BorderedApply;
pub use comm::{DistributedComm, Reduction};
pub use multivec::MultiVec;
pub use operator::Operator;
pub use partitioner::Partitioner;
