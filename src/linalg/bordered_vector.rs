//! Distributed multivectors augmented with a small replicated border
use super::{ColumnBlock, MultiVector};
use crate::{
    error::{Error, Result},
    map::IndexMap,
    traits::{DistributedComm, Reduction},
    types::{DataAccess, ReadOnly, RealScalar},
};
use itertools::izip;
use num::Float;
use rand::{rngs::StdRng, SeedableRng};
use rlst::{DynArray, RlstScalar};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
    rc::Rc,
};

/// Check a list of column indices against the number of columns
pub(crate) fn check_columns(
    operation: &'static str,
    columns: &[usize],
    ncols: usize,
) -> Result<()> {
    if columns.is_empty() {
        return Err(Error::invalid_argument(operation, "no columns selected"));
    }
    if let Some(c) = columns.iter().find(|&&c| c >= ncols) {
        return Err(Error::invalid_argument(
            operation,
            format!("column {c} is out of range for {ncols} columns"),
        ));
    }
    Ok(())
}

/// Check a range of columns against the number of columns
pub(crate) fn check_range(
    operation: &'static str,
    range: &Range<usize>,
    ncols: usize,
) -> Result<()> {
    if range.is_empty() {
        return Err(Error::invalid_argument(
            operation,
            format!("empty column range {range:?}"),
        ));
    }
    if range.end > ncols {
        return Err(Error::invalid_argument(
            operation,
            format!("column range {range:?} is out of range for {ncols} columns"),
        ));
    }
    Ok(())
}

/// A distributed multivector `X` with `k` columns paired with a dense `m × k` border `S`.
///
/// The pair behaves like the concatenated vector `[X; S]`. The border is replicated: every
/// process holds the same values, and reductions add its contribution once.
#[derive(Debug)]
pub struct BorderedVector<'a, T: RealScalar, C: DistributedComm> {
    vector: MultiVector<'a, T, C>,
    border: ColumnBlock<'a, T>,
}

impl<T: RealScalar, C: DistributedComm> Clone for BorderedVector<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            vector: self.vector.copy_columns(&self.all_columns()),
            border: self.border.to_owned_block(),
        }
    }
}

impl<'a, T: RealScalar, C: DistributedComm> BorderedVector<'a, T, C> {
    /// A zero vector with `ncols` columns and `border_rows` border rows
    pub fn new(comm: &'a C, map: Rc<IndexMap>, border_rows: usize, ncols: usize) -> Self {
        Self {
            vector: MultiVector::new(comm, map, ncols),
            border: ColumnBlock::zeros(border_rows, ncols),
        }
    }

    /// Pair a multivector with a dense border.
    ///
    /// With [DataAccess::View] the result writes through to `vector` and `border`.
    pub fn from_parts(
        access: DataAccess,
        vector: &'a mut MultiVector<'_, T, C>,
        border: &'a mut DynArray<T, 2>,
    ) -> Result<Self> {
        if border.shape()[1] != vector.ncols() {
            return Err(Error::invalid_argument(
                "BorderedVector::from_parts",
                format!(
                    "the border has {} columns but the vector has {}",
                    border.shape()[1],
                    vector.ncols()
                ),
            ));
        }
        let columns = (0..vector.ncols()).collect::<Vec<_>>();
        Ok(match access {
            DataAccess::Copy => Self {
                vector: vector.copy_columns(&columns),
                border: ColumnBlock::from_array_mut(border).to_owned_block(),
            },
            DataAccess::View => Self {
                vector: vector.view_mut(&columns),
                border: ColumnBlock::from_array_mut(border),
            },
        })
    }

    /// Pair a multivector with a second multivector whose rows form the border.
    ///
    /// Every process must hold all rows of `border`. Collective.
    pub fn from_vectors(
        access: DataAccess,
        vector: &'a mut MultiVector<'_, T, C>,
        border: &'a mut MultiVector<'_, T, C>,
    ) -> Result<Self> {
        let replicated = border.local_len() == border.global_len();
        let replicated = vector
            .comm()
            .all_reduce(&[u8::from(replicated)], Reduction::Min)[0]
            == 1;
        if !replicated {
            return Err(Error::invalid_argument(
                "BorderedVector::from_vectors",
                format!(
                    "the border has {} rows but not every process holds all of them",
                    border.global_len()
                ),
            ));
        }
        if border.ncols() != vector.ncols() {
            return Err(Error::invalid_argument(
                "BorderedVector::from_vectors",
                format!(
                    "the border has {} columns but the vector has {}",
                    border.ncols(),
                    vector.ncols()
                ),
            ));
        }
        let columns = (0..vector.ncols()).collect::<Vec<_>>();
        Ok(match access {
            DataAccess::Copy => Self {
                vector: vector.copy_columns(&columns),
                border: border.block().to_owned_block(),
            },
            DataAccess::View => Self {
                vector: vector.view_mut(&columns),
                border: border.block_mut().view_mut(&columns),
            },
        })
    }

    fn all_columns(&self) -> Vec<usize> {
        (0..self.num_vecs()).collect()
    }

    /// Copy the selected columns
    pub fn copy_columns(&self, columns: &[usize]) -> Result<BorderedVector<'a, T, C>> {
        check_columns("BorderedVector::copy_columns", columns, self.num_vecs())?;
        Ok(BorderedVector {
            vector: self.vector.copy_columns(columns),
            border: self.border.view(columns).to_owned_block(),
        })
    }

    /// Copy a range of columns
    pub fn copy_range(&self, range: Range<usize>) -> Result<BorderedVector<'a, T, C>> {
        check_range("BorderedVector::copy_range", &range, self.num_vecs())?;
        self.copy_columns(&range.collect::<Vec<_>>())
    }

    /// A read-only view of the selected columns
    pub fn view(&self, columns: &[usize]) -> Result<ReadOnly<BorderedVector<'_, T, C>>> {
        check_columns("BorderedVector::view", columns, self.num_vecs())?;
        Ok(ReadOnly::new(BorderedVector {
            vector: self.vector.view(columns),
            border: self.border.view(columns),
        }))
    }

    /// A read-only view of a range of columns
    pub fn view_range(&self, range: Range<usize>) -> Result<ReadOnly<BorderedVector<'_, T, C>>> {
        check_range("BorderedVector::view_range", &range, self.num_vecs())?;
        self.view(&range.collect::<Vec<_>>())
    }

    /// A writable view of the selected columns
    pub fn view_mut(&mut self, columns: &[usize]) -> Result<BorderedVector<'_, T, C>> {
        check_columns("BorderedVector::view_mut", columns, self.num_vecs())?;
        Ok(BorderedVector {
            vector: self.vector.view_mut(columns),
            border: self.border.view_mut(columns),
        })
    }

    /// A writable view of a range of columns
    pub fn view_mut_range(&mut self, range: Range<usize>) -> Result<BorderedVector<'_, T, C>> {
        check_range("BorderedVector::view_mut_range", &range, self.num_vecs())?;
        self.view_mut(&range.collect::<Vec<_>>())
    }

    /// The distributed part
    pub fn vector(&self) -> &MultiVector<'a, T, C> {
        &self.vector
    }

    /// The distributed part, mutably
    pub fn vector_mut(&mut self) -> &mut MultiVector<'a, T, C> {
        &mut self.vector
    }

    /// The border
    pub fn border(&self) -> &ColumnBlock<'a, T> {
        &self.border
    }

    /// A copy of the border as a dense matrix
    pub fn border_matrix(&self) -> DynArray<T, 2> {
        self.border.to_array()
    }

    /// Overwrite the border with the values of `border`, which must be `border_rows × num_vecs`
    pub fn set_border(&mut self, border: &DynArray<T, 2>) -> Result<()> {
        let expected = [self.border_rows(), self.num_vecs()];
        if border.shape() != expected {
            return Err(Error::invalid_argument(
                "BorderedVector::set_border",
                format!("expected a {expected:?} border, got {:?}", border.shape()),
            ));
        }
        let rows = expected[0];
        let data = border.data().unwrap();
        for j in 0..self.num_vecs() {
            self.border
                .column_mut(j)
                .copy_from_slice(&data[j * rows..(j + 1) * rows]);
        }
        Ok(())
    }

    /// Number of columns
    pub fn num_vecs(&self) -> usize {
        self.vector.ncols()
    }

    /// Number of border rows
    pub fn border_rows(&self) -> usize {
        self.border.rows()
    }

    /// Length of each column: the global length of the distributed part plus the border
    pub fn global_length(&self) -> usize {
        self.vector.global_len() + self.border_rows()
    }

    /// Number of rows held by this process, including the border
    pub fn my_length(&self) -> usize {
        self.vector.local_len() + self.border_rows()
    }

    /// Are the columns adjacent in memory?
    pub fn has_constant_stride(&self) -> bool {
        self.vector.block().is_contiguous() && self.border.is_contiguous()
    }

    fn check_compatible(
        &self,
        operation: &'static str,
        other: &BorderedVector<'_, T, C>,
        same_width: bool,
    ) -> Result<()> {
        if self.vector.local_len() != other.vector.local_len()
            || self.border_rows() != other.border_rows()
        {
            return Err(Error::invalid_argument(
                operation,
                format!(
                    "vectors with {} + {} and {} + {} rows",
                    self.vector.local_len(),
                    self.border_rows(),
                    other.vector.local_len(),
                    other.border_rows()
                ),
            ));
        }
        if same_width && self.num_vecs() != other.num_vecs() {
            return Err(Error::invalid_argument(
                operation,
                format!(
                    "vectors with {} and {} columns",
                    self.num_vecs(),
                    other.num_vecs()
                ),
            ));
        }
        Ok(())
    }

    /// `self = alpha · a · b + beta · self`, where `b` is a dense
    /// `a.num_vecs() × self.num_vecs()` matrix
    pub fn multiply(
        &mut self,
        alpha: T,
        a: &BorderedVector<'_, T, C>,
        b: &DynArray<T, 2>,
        beta: T,
    ) -> Result<()> {
        self.check_compatible("BorderedVector::multiply", a, false)?;
        let expected = [a.num_vecs(), self.num_vecs()];
        if b.shape() != expected {
            return Err(Error::invalid_argument(
                "BorderedVector::multiply",
                format!("expected a {expected:?} matrix, got {:?}", b.shape()),
            ));
        }
        self.vector.block_mut().times_mat_add(alpha, a.vector.block(), b, beta);
        self.border.times_mat_add(alpha, &a.border, b, beta);
        Ok(())
    }

    /// `self = alpha · a + beta · self`
    pub fn update(&mut self, alpha: T, a: &BorderedVector<'_, T, C>, beta: T) -> Result<()> {
        self.check_compatible("BorderedVector::update", a, true)?;
        self.vector.block_mut().update(alpha, a.vector.block(), beta);
        self.border.update(alpha, &a.border, beta);
        Ok(())
    }

    /// `self = alpha · a + beta · b + gamma · self`
    pub fn update2(
        &mut self,
        alpha: T,
        a: &BorderedVector<'_, T, C>,
        beta: T,
        b: &BorderedVector<'_, T, C>,
        gamma: T,
    ) -> Result<()> {
        self.check_compatible("BorderedVector::update2", a, true)?;
        self.check_compatible("BorderedVector::update2", b, true)?;
        self.vector
            .block_mut()
            .update2(alpha, a.vector.block(), beta, b.vector.block(), gamma);
        self.border.update2(alpha, &a.border, beta, &b.border, gamma);
        Ok(())
    }

    /// Inner products of matching columns. Collective.
    pub fn dot(&self, a: &BorderedVector<'_, T, C>) -> Result<Vec<T>> {
        self.check_compatible("BorderedVector::dot", a, true)?;
        Ok(self
            .vector
            .dot(&a.vector)
            .into_iter()
            .zip(self.border.dots(&a.border))
            .map(|(v, b)| v + b)
            .collect())
    }

    /// Multiply every entry by `alpha`
    pub fn scale(&mut self, alpha: T) {
        self.vector.block_mut().scale(alpha);
        self.border.scale(alpha);
    }

    /// Multiply column `j` by `alphas[j]`
    pub fn scale_columns(&mut self, alphas: &[T]) -> Result<()> {
        if alphas.len() != self.num_vecs() {
            return Err(Error::invalid_argument(
                "BorderedVector::scale_columns",
                format!(
                    "{} factors for {} columns",
                    alphas.len(),
                    self.num_vecs()
                ),
            ));
        }
        self.vector.block_mut().scale_columns(alphas);
        self.border.scale_columns(alphas);
        Ok(())
    }

    /// Sum of absolute values of each column. Collective.
    pub fn norm1(&self) -> Vec<T> {
        izip!(self.vector.norm1(), self.border.abs_sums())
            .map(|(v, b)| v + b)
            .collect()
    }

    /// Euclidean norm of each column. Collective.
    pub fn norm2(&self) -> Vec<T> {
        izip!(self.vector.square_sums(), self.border.square_sums())
            .map(|(v, b)| RlstScalar::sqrt(v + b))
            .collect()
    }

    /// Largest absolute value of each column. Collective.
    pub fn norm_inf(&self) -> Vec<T> {
        izip!(self.vector.norm_inf(), self.border.abs_maxes())
            .map(|(v, b)| Float::max(v, b))
            .collect()
    }

    /// Fill with uniform random values in `[-1, 1]`. Collective.
    ///
    /// The processes agree on a seed, so that the border is identical everywhere while the
    /// distributed rows differ between processes.
    pub fn random(&mut self) {
        let comm = self.vector.comm();
        let seed = comm.all_reduce(&[rand::random::<u32>()], Reduction::Max)[0] as u64;
        self.vector.random_with_seed(seed + comm.rank() as u64 + 1);
        self.border.randomize(&mut StdRng::seed_from_u64(seed));
    }

    /// Set every entry to `alpha`
    pub fn put_scalar(&mut self, alpha: T) {
        self.vector.block_mut().fill(alpha);
        self.border.fill(alpha);
    }

    /// Copy the values of `a`, which must have the same shape
    pub fn assign(&mut self, a: &BorderedVector<'_, T, C>) -> Result<()> {
        self.check_compatible("BorderedVector::assign", a, true)?;
        self.vector.block_mut().assign(a.vector.block());
        self.border.assign(&a.border);
        Ok(())
    }

    /// `alpha · selfᵗ · b`, a dense `self.num_vecs() × b.num_vecs()` matrix. Collective.
    pub fn trans_multiply(&self, alpha: T, b: &BorderedVector<'_, T, C>) -> Result<DynArray<T, 2>> {
        self.check_compatible("BorderedVector::trans_multiply", b, false)?;
        let values = izip!(
            self.vector.trans_multiply(&b.vector),
            self.border.trans_mat(&b.border)
        )
        .map(|(v, s)| alpha * (v + s))
        .collect::<Vec<_>>();
        Ok(super::dense::from_column_major(
            self.num_vecs(),
            b.num_vecs(),
            &values,
        ))
    }
}

impl<T: RealScalar, C: DistributedComm> Display for BorderedVector<'_, T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "BorderedVector on process {}: {} vectors, {} local rows, {} border rows",
            self.vector.comm().rank(),
            self.num_vecs(),
            self.vector.local_len(),
            self.border_rows()
        )?;
        for (i, gid) in self.vector.map().global_indices().iter().enumerate() {
            write!(f, "{gid:>8}")?;
            for j in 0..self.num_vecs() {
                write!(f, " {:>12.6}", self.vector.column(j)[i])?;
            }
            writeln!(f)?;
        }
        for i in 0..self.border_rows() {
            write!(f, "{:>8}", format!("b{i}"))?;
            for j in 0..self.num_vecs() {
                write!(f, " {:>12.6}", self.border.column(j)[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
