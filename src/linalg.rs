//! Distributed and bordered linear algebra
mod block;
mod bordered_operator;
mod bordered_vector;
pub mod dense;
mod multivec_adapter;
mod multivector;

pub use block::ColumnBlock;
pub use bordered_operator::BorderedOperator;
pub use bordered_vector::BorderedVector;
pub use multivector::MultiVector;
