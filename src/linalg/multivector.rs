//! Distributed multivectors
use super::ColumnBlock;
use crate::{
    error::{Error, Result},
    map::IndexMap,
    traits::{DistributedComm, Reduction},
    types::RealScalar,
};
use rand::{rngs::StdRng, SeedableRng};
use rlst::{DynArray, RlstScalar};
use std::rc::Rc;

/// A block of columns distributed over the processes by an [IndexMap].
///
/// Row `i` of the local block holds the entry with global index `map.global_index(i)`.
#[derive(Debug)]
pub struct MultiVector<'a, T: RealScalar, C: DistributedComm> {
    comm: &'a C,
    map: Rc<IndexMap>,
    block: ColumnBlock<'a, T>,
}

impl<'a, T: RealScalar, C: DistributedComm> MultiVector<'a, T, C> {
    /// A multivector of zeros with `ncols` columns
    pub fn new(comm: &'a C, map: Rc<IndexMap>, ncols: usize) -> Self {
        let block = ColumnBlock::zeros(map.local_len(), ncols);
        Self { comm, map, block }
    }

    /// Create from the local rows of each column
    pub fn from_array(comm: &'a C, map: Rc<IndexMap>, array: DynArray<T, 2>) -> Result<Self> {
        if array.shape()[0] != map.local_len() {
            return Err(Error::invalid_argument(
                "MultiVector::from_array",
                format!(
                    "array has {} rows but the map has {} local indices",
                    array.shape()[0],
                    map.local_len()
                ),
            ));
        }
        Ok(Self {
            comm,
            map,
            block: ColumnBlock::from_array(array),
        })
    }

    /// Communicator
    pub fn comm(&self) -> &'a C {
        self.comm
    }

    /// The map that distributes the rows
    pub fn map(&self) -> &Rc<IndexMap> {
        &self.map
    }

    /// Number of rows on this process
    pub fn local_len(&self) -> usize {
        self.block.rows()
    }

    /// Number of rows over all processes
    pub fn global_len(&self) -> usize {
        self.map.global_len()
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.block.ncols()
    }

    /// The local rows
    pub fn block(&self) -> &ColumnBlock<'a, T> {
        &self.block
    }

    /// The local rows, mutably
    pub fn block_mut(&mut self) -> &mut ColumnBlock<'a, T> {
        &mut self.block
    }

    /// Local rows of column `j`
    pub fn column(&self, j: usize) -> &[T] {
        self.block.column(j)
    }

    /// Local rows of column `j`, mutably
    pub fn column_mut(&mut self, j: usize) -> &mut [T] {
        self.block.column_mut(j)
    }

    /// A read-only view of some of the columns
    pub fn view(&self, columns: &[usize]) -> MultiVector<'_, T, C> {
        MultiVector {
            comm: self.comm,
            map: Rc::clone(&self.map),
            block: self.block.view(columns),
        }
    }

    /// A writable view of some of the columns
    pub fn view_mut(&mut self, columns: &[usize]) -> MultiVector<'_, T, C> {
        MultiVector {
            comm: self.comm,
            map: Rc::clone(&self.map),
            block: self.block.view_mut(columns),
        }
    }

    /// Copy some of the columns into a new multivector
    pub fn copy_columns(&self, columns: &[usize]) -> MultiVector<'a, T, C> {
        MultiVector {
            comm: self.comm,
            map: Rc::clone(&self.map),
            block: self.block.view(columns).to_owned_block(),
        }
    }

    /// Is the multivector distributed the same way as `other`? Collective.
    pub fn same_distribution(&self, other: &MultiVector<'_, T, C>) -> bool {
        Rc::ptr_eq(&self.map, &other.map) || self.map.same_as(&other.map, self.comm)
    }

    /// Global inner products of matching columns. Collective.
    pub fn dot(&self, other: &MultiVector<'_, T, C>) -> Vec<T> {
        self.comm
            .all_reduce(&self.block.dots(&other.block), Reduction::Sum)
    }

    /// Global sums of absolute values of each column. Collective.
    pub fn norm1(&self) -> Vec<T> {
        self.comm.all_reduce(&self.block.abs_sums(), Reduction::Sum)
    }

    /// Global sums of squares of each column. Collective.
    pub fn square_sums(&self) -> Vec<T> {
        self.comm
            .all_reduce(&self.block.square_sums(), Reduction::Sum)
    }

    /// Euclidean norm of each column. Collective.
    pub fn norm2(&self) -> Vec<T> {
        self.square_sums().into_iter().map(RlstScalar::sqrt).collect()
    }

    /// Largest absolute value of each column. Collective.
    pub fn norm_inf(&self) -> Vec<T> {
        self.comm.all_reduce(&self.block.abs_maxes(), Reduction::Max)
    }

    /// `selfᵗ · other` summed over all processes, column-major with shape
    /// `self.ncols() × other.ncols()`. Collective.
    pub fn trans_multiply(&self, other: &MultiVector<'_, T, C>) -> Vec<T> {
        self.comm
            .all_reduce(&self.block.trans_mat(&other.block), Reduction::Sum)
    }

    /// Fill the local rows with uniform values in `[-1, 1]` drawn from a generator seeded
    /// with `seed`
    pub fn random_with_seed(&mut self, seed: u64) {
        self.block.randomize(&mut StdRng::seed_from_u64(seed));
    }
}
