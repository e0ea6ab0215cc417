//! Types

mod access;
mod norm;
mod periodicity;

pub use access::{ApplyOutcome, DataAccess, ReadOnly};
pub use norm::NormType;
pub use periodicity::Periodicity;

use mpi::traits::Equivalence;
use num::Float;
use rand::distr::uniform::SampleUniform;
use rlst::{Gemm, RlstScalar};
use std::fmt::{Debug, Display};

/// Global index of a degree of freedom
pub type GlobalIndex = i64;

/// Real scalar type that can be stored in a distributed vector and reduced across processes
pub trait RealScalar:
    Float
    + Gemm
    + RlstScalar<Real = Self>
    + Equivalence
    + SampleUniform
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
}

impl<T> RealScalar for T where
    T: Float
        + Gemm
        + RlstScalar<Real = T>
        + Equivalence
        + SampleUniform
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + 'static
{
}
