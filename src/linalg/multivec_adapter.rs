//! [MultiVec] for bordered vectors
use super::{
    bordered_vector::{check_columns, check_range},
    BorderedVector,
};
use crate::{
    error::{Error, Result},
    traits::{DistributedComm, MultiVec},
    types::{NormType, ReadOnly, RealScalar},
};
use rlst::DynArray;
use std::{io::Write, ops::Range, rc::Rc};

impl<'a, T: RealScalar, C: DistributedComm> MultiVec<T> for BorderedVector<'a, T, C> {
    type Block<'v>
        = BorderedVector<'v, T, C>
    where
        Self: 'v;

    fn clone_with_vecs(&self, numvecs: usize) -> Result<Self> {
        if numvecs == 0 {
            return Err(Error::invalid_argument(
                "clone_with_vecs",
                "a multivector needs at least one column",
            ));
        }
        Ok(BorderedVector::new(
            self.vector().comm(),
            Rc::clone(self.vector().map()),
            self.border_rows(),
            numvecs,
        ))
    }

    fn clone_copy(&self) -> Self {
        self.clone()
    }

    fn clone_copy_indices(&self, index: &[usize]) -> Result<Self> {
        self.copy_columns(index)
    }

    fn clone_copy_range(&self, range: Range<usize>) -> Result<Self> {
        self.copy_range(range)
    }

    fn clone_view(&self, index: &[usize]) -> Result<ReadOnly<Self::Block<'_>>> {
        self.view(index)
    }

    fn clone_view_range(&self, range: Range<usize>) -> Result<ReadOnly<Self::Block<'_>>> {
        self.view_range(range)
    }

    fn clone_view_mut(&mut self, index: &[usize]) -> Result<Self::Block<'_>> {
        self.view_mut(index)
    }

    fn clone_view_mut_range(&mut self, range: Range<usize>) -> Result<Self::Block<'_>> {
        self.view_mut_range(range)
    }

    fn vec_length(&self) -> usize {
        self.global_length()
    }

    fn number_vecs(&self) -> usize {
        self.num_vecs()
    }

    fn has_constant_stride(&self) -> bool {
        BorderedVector::has_constant_stride(self)
    }

    fn mv_times_mat_add_mv(
        &mut self,
        alpha: T,
        a: &Self::Block<'_>,
        b: &DynArray<T, 2>,
        beta: T,
    ) -> Result<()> {
        self.multiply(alpha, a, b, beta)
    }

    fn mv_add_mv(
        &mut self,
        alpha: T,
        a: &Self::Block<'_>,
        beta: T,
        b: &Self::Block<'_>,
    ) -> Result<()> {
        self.update2(alpha, a, beta, b, T::zero())
    }

    fn mv_scale(&mut self, alpha: T) {
        self.scale(alpha);
    }

    fn mv_scale_columns(&mut self, alphas: &[T]) -> Result<()> {
        self.scale_columns(alphas)
    }

    fn mv_trans_mv(&self, alpha: T, a: &Self::Block<'_>, b: &mut DynArray<T, 2>) -> Result<()> {
        let expected = [a.num_vecs(), self.num_vecs()];
        if b.shape() != expected {
            return Err(Error::invalid_argument(
                "mv_trans_mv",
                format!("expected a {expected:?} matrix, got {:?}", b.shape()),
            ));
        }
        let product = a.trans_multiply(alpha, self)?;
        b.data_mut()
            .unwrap()
            .copy_from_slice(product.data().unwrap());
        Ok(())
    }

    fn mv_dot(&self, a: &Self::Block<'_>) -> Result<Vec<T>> {
        self.dot(a)
    }

    fn mv_norm(&self, norm_type: NormType) -> Vec<T> {
        match norm_type {
            NormType::One => self.norm1(),
            NormType::Two => self.norm2(),
            NormType::Inf => self.norm_inf(),
        }
    }

    fn set_block(&mut self, a: &Self::Block<'_>, index: &[usize]) -> Result<()> {
        check_columns("set_block", index, self.num_vecs())?;
        if index.len() > a.num_vecs() {
            return Err(Error::invalid_argument(
                "set_block",
                format!(
                    "{} target columns but the source has only {}",
                    index.len(),
                    a.num_vecs()
                ),
            ));
        }
        let source = a.view_range(0..index.len())?;
        let mut target = self.view_mut(index)?;
        BorderedVector::assign(&mut target, &source)
    }

    fn set_block_range(&mut self, a: &Self::Block<'_>, range: Range<usize>) -> Result<()> {
        check_range("set_block_range", &range, self.num_vecs())?;
        self.set_block(a, &range.collect::<Vec<_>>())
    }

    fn assign(&mut self, a: &Self::Block<'_>) -> Result<()> {
        if a.num_vecs() > self.num_vecs() {
            return Err(Error::invalid_argument(
                "assign",
                format!(
                    "the source has {} columns but the target only {}",
                    a.num_vecs(),
                    self.num_vecs()
                ),
            ));
        }
        let mut target = self.view_mut_range(0..a.num_vecs())?;
        BorderedVector::assign(&mut target, a)
    }

    fn mv_random(&mut self) {
        self.random();
    }

    fn mv_init(&mut self, alpha: T) {
        self.put_scalar(alpha);
    }

    fn mv_print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        write!(out, "{self}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{comm::SingleProcess, linalg::dense, map::IndexMap};
    use approx::assert_relative_eq;

    fn vector(comm: &SingleProcess, ncols: usize) -> BorderedVector<'_, f64, SingleProcess> {
        let mut v = BorderedVector::new(comm, Rc::new(IndexMap::linear(comm, 3)), 1, ncols);
        for j in 0..ncols {
            v.vector_mut().column_mut(j).fill(j as f64 + 1.0);
        }
        v
    }

    // Normalise every column using only the multivector interface
    fn normalise<V: MultiVec<f64>>(v: &mut V) {
        let norms = v.mv_norm(NormType::Two);
        v.mv_scale_columns(&norms.iter().map(|n| 1.0 / n).collect::<Vec<_>>())
            .unwrap();
    }

    #[test]
    fn test_normalise_through_interface() {
        let comm = SingleProcess;
        let mut v = vector(&comm, 3);
        v.mv_random();
        normalise(&mut v);
        for n in v.mv_norm(NormType::Two) {
            assert_relative_eq!(n, 1.0, epsilon = 1e-12);
        }
        {
            let mut view = v.clone_view_mut_range(1..3).unwrap();
            normalise(&mut view);
        }
    }

    #[test]
    fn test_set_block() {
        let comm = SingleProcess;
        let mut v = vector(&comm, 3);
        let a = vector(&comm, 2);
        v.set_block(&a, &[2, 0]).unwrap();
        assert_eq!(v.vector().column(2), &[1.0; 3]);
        assert_eq!(v.vector().column(0), &[2.0; 3]);
        assert_eq!(v.vector().column(1), &[2.0; 3]);

        v.set_block_range(&*a.clone_view(&[1]).unwrap(), 1..2)
            .unwrap();
        assert_eq!(v.vector().column(1), &[2.0; 3]);
    }

    #[test]
    fn test_set_block_errors() {
        let comm = SingleProcess;
        let mut v = vector(&comm, 3);
        let a = vector(&comm, 1);
        assert!(matches!(v.set_block(&a, &[]), Err(Error::InvalidArgument { .. })));
        assert!(matches!(v.set_block(&a, &[3]), Err(Error::InvalidArgument { .. })));
        assert!(matches!(v.set_block(&a, &[0, 1]), Err(Error::InvalidArgument { .. })));
        assert!(matches!(
            v.set_block_range(&a, 2..4),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_assign() {
        let comm = SingleProcess;
        let mut v = vector(&comm, 3);
        let mut a = vector(&comm, 2);
        a.mv_init(-1.0);
        MultiVec::assign(&mut v, &a).unwrap();
        assert_eq!(v.vector().column(1), &[-1.0; 3]);
        assert_eq!(v.vector().column(2), &[3.0; 3]);
        assert!(MultiVec::assign(&mut a, &v).is_err());
    }

    #[test]
    fn test_clone_errors() {
        let comm = SingleProcess;
        let mut v = vector(&comm, 2);
        assert!(v.clone_with_vecs(0).is_err());
        assert!(v.clone_copy_indices(&[0, 2]).is_err());
        assert!(v.clone_copy_range(2..2).is_err());
        assert!(v.clone_view(&[]).is_err());
        assert!(v.clone_view_mut(&[5]).is_err());
        assert!(v.clone_view_mut_range(0..3).is_err());

        let w = v.clone_with_vecs(4).unwrap();
        assert_eq!(w.number_vecs(), 4);
        assert_eq!(w.vec_length(), 4);
        assert_eq!(w.mv_norm(NormType::Inf), vec![0.0; 4]);
    }

    #[test]
    fn test_times_mat_and_trans_mv() {
        let comm = SingleProcess;
        let a = vector(&comm, 2);
        let mut v = vector(&comm, 1);
        // v = 1·a·[1, -1]ᵗ + 2·v = [1 - 2 + 2] in every distributed row
        v.mv_times_mat_add_mv(1.0, &a, &dense::from_column_major(2, 1, &[1.0, -1.0]), 2.0)
            .unwrap();
        assert_eq!(v.vector().column(0), &[1.0; 3]);

        let mut b = dense::zeros(2, 1);
        v.mv_trans_mv(0.5, &a, &mut b).unwrap();
        assert_eq!(b.data().unwrap(), &[1.5, 3.0]);
        let mut wrong = dense::zeros(1, 1);
        assert!(v.mv_trans_mv(1.0, &a, &mut wrong).is_err());
    }

    #[test]
    fn test_add_and_dot() {
        let comm = SingleProcess;
        let a = vector(&comm, 2);
        let mut v = vector(&comm, 2);
        v.mv_add_mv(1.0, &a, -1.0, &a).unwrap();
        assert_eq!(v.mv_norm(NormType::One), vec![0.0, 0.0]);
        assert_eq!(a.mv_dot(&a).unwrap(), vec![3.0, 12.0]);
        assert!(a.mv_dot(&vector(&comm, 1)).is_err());
        assert!(v.mv_scale_columns(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_print() {
        let comm = SingleProcess;
        let v = vector(&comm, 1);
        let mut out = Vec::new();
        v.mv_print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1 vectors"));
        assert!(v.has_constant_stride());
    }
}
