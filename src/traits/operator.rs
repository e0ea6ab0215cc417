//! Linear operators on distributed multivectors
use crate::{
    error::Result,
    linalg::MultiVector,
    map::IndexMap,
    traits::DistributedComm,
    types::RealScalar,
};
use std::rc::Rc;

/// A linear operator `A` acting on distributed multivectors
pub trait Operator<T: RealScalar, C: DistributedComm> {
    /// Distribution of the input vectors
    fn domain_map(&self) -> &Rc<IndexMap>;

    /// Distribution of the output vectors
    fn range_map(&self) -> &Rc<IndexMap>;

    /// Compute `y = A · x`, column by column
    fn apply(&self, x: &MultiVector<'_, T, C>, y: &mut MultiVector<'_, T, C>) -> Result<()>;
}
