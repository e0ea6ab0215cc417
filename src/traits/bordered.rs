//! Operators augmented with a border
use crate::{
    error::{Error, Result},
    linalg::{dense, BorderedVector, MultiVector},
    traits::DistributedComm,
    types::{ApplyOutcome, RealScalar},
};
use rlst::DynArray;

/// An augmented operator `[[A, V], [Wᵗ, C]]` acting on bordered vectors
pub trait BorderedApply<T: RealScalar, C: DistributedComm> {
    /// Compute `[Y; T] = [[A, V], [Wᵗ, C]] · [X; S]`.
    ///
    /// If there is no border only `Y = A · X` is computed, `t` is left untouched and
    /// [ApplyOutcome::Unbordered] is returned.
    fn apply_parts(
        &self,
        x: &MultiVector<'_, T, C>,
        s: &DynArray<T, 2>,
        y: &mut MultiVector<'_, T, C>,
        t: &mut DynArray<T, 2>,
    ) -> Result<ApplyOutcome>;

    /// Solve `[[A, V], [Wᵗ, C]] · [Y; T] = [X; S]`
    fn apply_inverse_parts(
        &self,
        _x: &MultiVector<'_, T, C>,
        _s: &DynArray<T, 2>,
        _y: &mut MultiVector<'_, T, C>,
        _t: &mut DynArray<T, 2>,
    ) -> Result<ApplyOutcome> {
        Err(Error::NotImplemented("apply_inverse"))
    }

    /// Apply to a bordered vector. Without a border the border of `y` is set to zero.
    fn apply(
        &self,
        x: &BorderedVector<'_, T, C>,
        y: &mut BorderedVector<'_, T, C>,
    ) -> Result<ApplyOutcome> {
        let s = x.border_matrix();
        let mut t = y.border_matrix();
        let outcome = self.apply_parts(x.vector(), &s, y.vector_mut(), &mut t)?;
        store_border(y, outcome, &t)?;
        Ok(outcome)
    }

    /// Solve with a bordered right hand side. Without a border the border of `y` is set to zero.
    fn apply_inverse(
        &self,
        x: &BorderedVector<'_, T, C>,
        y: &mut BorderedVector<'_, T, C>,
    ) -> Result<ApplyOutcome> {
        let s = x.border_matrix();
        let mut t = y.border_matrix();
        let outcome = self.apply_inverse_parts(x.vector(), &s, y.vector_mut(), &mut t)?;
        store_border(y, outcome, &t)?;
        Ok(outcome)
    }
}

fn store_border<T: RealScalar, C: DistributedComm>(
    y: &mut BorderedVector<'_, T, C>,
    outcome: ApplyOutcome,
    t: &DynArray<T, 2>,
) -> Result<()> {
    match outcome {
        ApplyOutcome::Bordered => y.set_border(t),
        ApplyOutcome::Unbordered => y.set_border(&dense::zeros(y.border_rows(), y.num_vecs())),
    }
}
