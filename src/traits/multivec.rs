//! The multivector interface used by block Krylov solvers
use crate::{
    error::Result,
    types::{NormType, ReadOnly, RealScalar},
};
use rlst::DynArray;
use std::{io::Write, ops::Range};

/// Operations that an iterative solver performs on its blocks of vectors.
///
/// Views borrow the vector they are taken from. Arguments of type [MultiVec::Block] may
/// be the vector itself or a view of any vector of the same kind. Methods that reduce
/// over the processes are collective. Invalid column selections and mismatched shapes
/// are reported as [crate::error::Error::InvalidArgument].
pub trait MultiVec<T: RealScalar>: Sized {
    /// A vector or view with a possibly shorter borrow
    type Block<'v>: MultiVec<T>
    where
        Self: 'v;

    /// A new vector with `numvecs` columns, distributed like `self`
    fn clone_with_vecs(&self, numvecs: usize) -> Result<Self>;

    /// A deep copy
    fn clone_copy(&self) -> Self;

    /// A deep copy of the selected columns
    fn clone_copy_indices(&self, index: &[usize]) -> Result<Self>;

    /// A deep copy of a range of columns
    fn clone_copy_range(&self, range: Range<usize>) -> Result<Self>;

    /// A read-only view of the selected columns
    fn clone_view(&self, index: &[usize]) -> Result<ReadOnly<Self::Block<'_>>>;

    /// A read-only view of a range of columns
    fn clone_view_range(&self, range: Range<usize>) -> Result<ReadOnly<Self::Block<'_>>>;

    /// A writable view of the selected columns
    fn clone_view_mut(&mut self, index: &[usize]) -> Result<Self::Block<'_>>;

    /// A writable view of a range of columns
    fn clone_view_mut_range(&mut self, range: Range<usize>) -> Result<Self::Block<'_>>;

    /// Global length of each column
    fn vec_length(&self) -> usize;

    /// Number of columns
    fn number_vecs(&self) -> usize;

    /// Are the columns adjacent in memory?
    fn has_constant_stride(&self) -> bool;

    /// `self = alpha · a · b + beta · self`
    fn mv_times_mat_add_mv(
        &mut self,
        alpha: T,
        a: &Self::Block<'_>,
        b: &DynArray<T, 2>,
        beta: T,
    ) -> Result<()>;

    /// `self = alpha · a + beta · b`
    fn mv_add_mv(
        &mut self,
        alpha: T,
        a: &Self::Block<'_>,
        beta: T,
        b: &Self::Block<'_>,
    ) -> Result<()>;

    /// `self = alpha · self`
    fn mv_scale(&mut self, alpha: T);

    /// Multiply column `j` by `alphas[j]`
    fn mv_scale_columns(&mut self, alphas: &[T]) -> Result<()>;

    /// `b = alpha · aᵗ · self`
    fn mv_trans_mv(&self, alpha: T, a: &Self::Block<'_>, b: &mut DynArray<T, 2>) -> Result<()>;

    /// Inner products of the matching columns of `self` and `a`
    fn mv_dot(&self, a: &Self::Block<'_>) -> Result<Vec<T>>;

    /// Norm of each column
    fn mv_norm(&self, norm_type: NormType) -> Vec<T>;

    /// Copy the first `index.len()` columns of `a` into the columns `index` of `self`
    fn set_block(&mut self, a: &Self::Block<'_>, index: &[usize]) -> Result<()>;

    /// Copy the first `range.len()` columns of `a` into the columns `range` of `self`
    fn set_block_range(&mut self, a: &Self::Block<'_>, range: Range<usize>) -> Result<()>;

    /// Copy `a` into the first columns of `self`
    fn assign(&mut self, a: &Self::Block<'_>) -> Result<()>;

    /// Fill with random values
    fn mv_random(&mut self);

    /// Set every entry to `alpha`
    fn mv_init(&mut self, alpha: T);

    /// Write a human readable representation
    fn mv_print(&self, out: &mut dyn Write) -> std::io::Result<()>;
}
