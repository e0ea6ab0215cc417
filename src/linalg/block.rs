//! Dense column blocks that own their data or borrow it from another block
use super::dense;
use crate::types::RealScalar;
use num::Float;
use rand::Rng;
use rlst::{DynArray, RlstScalar};
use std::fmt::{Debug, Formatter};

enum Storage<'a, T> {
    Owned(DynArray<T, 2>),
    Shared(&'a DynArray<T, 2>),
    Exclusive(&'a mut DynArray<T, 2>),
}

/// A selection of columns of a column-major dense array.
///
/// The array is either owned, or borrowed from another block. A block created by
/// [ColumnBlock::view] is read-only, and writing to it panics.
pub struct ColumnBlock<'a, T: RealScalar> {
    storage: Storage<'a, T>,
    columns: Vec<usize>,
}

impl<T: RealScalar> Debug for ColumnBlock<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.debug_struct("ColumnBlock")
            .field("rows", &self.rows())
            .field("columns", &self.columns)
            .field("view", &self.is_view())
            .finish()
    }
}

impl<T: RealScalar> ColumnBlock<'static, T> {
    /// A block of zeros
    pub fn zeros(rows: usize, ncols: usize) -> Self {
        let mut array = DynArray::<T, 2>::from_shape([rows, ncols]);
        array.data_mut().unwrap().fill(T::zero());
        Self::from_array(array)
    }

    /// Take ownership of an array
    pub fn from_array(array: DynArray<T, 2>) -> Self {
        let ncols = array.shape()[1];
        Self {
            storage: Storage::Owned(array),
            columns: (0..ncols).collect(),
        }
    }
}

impl<'a, T: RealScalar> ColumnBlock<'a, T> {
    /// All columns of a borrowed array. Writes go to the array.
    pub fn from_array_mut(array: &'a mut DynArray<T, 2>) -> Self {
        let ncols = array.shape()[1];
        Self {
            storage: Storage::Exclusive(array),
            columns: (0..ncols).collect(),
        }
    }

    fn array(&self) -> &DynArray<T, 2> {
        match &self.storage {
            Storage::Owned(a) => a,
            Storage::Shared(a) => a,
            Storage::Exclusive(a) => a,
        }
    }

    fn array_mut(&mut self) -> &mut DynArray<T, 2> {
        match &mut self.storage {
            Storage::Owned(a) => a,
            Storage::Exclusive(a) => a,
            Storage::Shared(_) => panic!("Cannot write to a read-only view"),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.array().shape()[0]
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Does this block borrow its data?
    pub fn is_view(&self) -> bool {
        !matches!(self.storage, Storage::Owned(_))
    }

    /// Are the selected columns adjacent and increasing in the underlying array?
    pub fn is_contiguous(&self) -> bool {
        self.columns.windows(2).all(|w| w[1] == w[0] + 1)
    }

    /// Column `j` of the block
    pub fn column(&self, j: usize) -> &[T] {
        let rows = self.rows();
        let c = self.columns[j];
        &self.array().data().unwrap()[c * rows..(c + 1) * rows]
    }

    /// Mutable column `j` of the block
    pub fn column_mut(&mut self, j: usize) -> &mut [T] {
        let rows = self.rows();
        let c = self.columns[j];
        &mut self.array_mut().data_mut().unwrap()[c * rows..(c + 1) * rows]
    }

    /// A read-only view of some of the columns of this block
    pub fn view(&self, columns: &[usize]) -> ColumnBlock<'_, T> {
        ColumnBlock {
            columns: columns.iter().map(|&j| self.columns[j]).collect(),
            storage: Storage::Shared(self.array()),
        }
    }

    /// A writable view of some of the columns of this block
    pub fn view_mut(&mut self, columns: &[usize]) -> ColumnBlock<'_, T> {
        let columns = columns.iter().map(|&j| self.columns[j]).collect();
        ColumnBlock {
            columns,
            storage: Storage::Exclusive(self.array_mut()),
        }
    }

    /// Copy the selected columns into a new array
    pub fn to_array(&self) -> DynArray<T, 2> {
        let rows = self.rows();
        let mut array = DynArray::<T, 2>::from_shape([rows, self.ncols()]);
        let data = array.data_mut().unwrap();
        for j in 0..self.ncols() {
            data[j * rows..(j + 1) * rows].copy_from_slice(self.column(j));
        }
        array
    }

    /// Copy the selected columns into a new block that owns its data
    pub fn to_owned_block(&self) -> ColumnBlock<'static, T> {
        ColumnBlock::from_array(self.to_array())
    }

    fn assert_same_shape(&self, other: &ColumnBlock<'_, T>) {
        assert_eq!(
            (self.rows(), self.ncols()),
            (other.rows(), other.ncols()),
            "Column blocks have different shapes"
        );
    }

    /// Set every entry to `alpha`
    pub fn fill(&mut self, alpha: T) {
        for j in 0..self.ncols() {
            self.column_mut(j).fill(alpha);
        }
    }

    /// Copy the values of `other`, which must have the same shape
    pub fn assign(&mut self, other: &ColumnBlock<'_, T>) {
        self.assert_same_shape(other);
        for j in 0..self.ncols() {
            self.column_mut(j).copy_from_slice(other.column(j));
        }
    }

    /// Multiply column `j` by `alphas[j]`
    pub fn scale_columns(&mut self, alphas: &[T]) {
        assert_eq!(alphas.len(), self.ncols());
        for (j, &alpha) in alphas.iter().enumerate() {
            for v in self.column_mut(j) {
                *v = *v * alpha;
            }
        }
    }

    /// Multiply every entry by `alpha`
    pub fn scale(&mut self, alpha: T) {
        self.scale_columns(&vec![alpha; self.ncols()]);
    }

    /// `self = alpha * a + beta * self`. When `beta` is zero, `self` is overwritten.
    pub fn update(&mut self, alpha: T, a: &ColumnBlock<'_, T>, beta: T) {
        self.assert_same_shape(a);
        for j in 0..self.ncols() {
            for (s, &x) in self.column_mut(j).iter_mut().zip(a.column(j)) {
                *s = if beta == T::zero() {
                    alpha * x
                } else {
                    alpha * x + beta * *s
                };
            }
        }
    }

    /// `self = alpha * a + beta * b + gamma * self`. When `gamma` is zero, `self` is overwritten.
    pub fn update2(
        &mut self,
        alpha: T,
        a: &ColumnBlock<'_, T>,
        beta: T,
        b: &ColumnBlock<'_, T>,
        gamma: T,
    ) {
        self.assert_same_shape(a);
        self.assert_same_shape(b);
        for j in 0..self.ncols() {
            for ((s, &x), &y) in self
                .column_mut(j)
                .iter_mut()
                .zip(a.column(j))
                .zip(b.column(j))
            {
                *s = if gamma == T::zero() {
                    alpha * x + beta * y
                } else {
                    alpha * x + beta * y + gamma * *s
                };
            }
        }
    }

    /// `self = alpha * a * b + beta * self`, where `b` is a dense `a.ncols() × self.ncols()`
    /// matrix. When `beta` is zero, `self` is overwritten.
    pub fn times_mat_add(
        &mut self,
        alpha: T,
        a: &ColumnBlock<'_, T>,
        b: &DynArray<T, 2>,
        beta: T,
    ) {
        assert_eq!(b.shape(), [a.ncols(), self.ncols()]);
        let product = ColumnBlock::from_array(dense::matmul(&a.to_array(), b));
        self.update(alpha, &product, beta);
    }

    /// Local inner products of the columns of `self` and `other`
    pub fn dots(&self, other: &ColumnBlock<'_, T>) -> Vec<T> {
        self.assert_same_shape(other);
        (0..self.ncols())
            .map(|j| {
                self.column(j)
                    .iter()
                    .zip(other.column(j))
                    .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
            })
            .collect()
    }

    /// Local `selfᵗ · other`, column-major with shape `self.ncols() × other.ncols()`
    pub fn trans_mat(&self, other: &ColumnBlock<'_, T>) -> Vec<T> {
        assert_eq!(self.rows(), other.rows());
        dense::matmul(&dense::transpose(&self.to_array()), &other.to_array())
            .data()
            .unwrap()
            .to_vec()
    }

    /// Sum of the absolute values of each column
    pub fn abs_sums(&self) -> Vec<T> {
        self.column_reduce(|acc, x| acc + RlstScalar::abs(x))
    }

    /// Sum of the squares of each column
    pub fn square_sums(&self) -> Vec<T> {
        self.column_reduce(|acc, x| acc + x * x)
    }

    /// Largest absolute value of each column. Zero for an empty column.
    pub fn abs_maxes(&self) -> Vec<T> {
        self.column_reduce(|acc, x| Float::max(acc, RlstScalar::abs(x)))
    }

    fn column_reduce(&self, f: impl Fn(T, T) -> T) -> Vec<T> {
        (0..self.ncols())
            .map(|j| self.column(j).iter().fold(T::zero(), |acc, &x| f(acc, x)))
            .collect()
    }

    /// Fill with values drawn uniformly from `[-1, 1]`
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        for j in 0..self.ncols() {
            for v in self.column_mut(j) {
                *v = rng.random_range(-T::one()..=T::one());
            }
        }
    }
}
