//! Operators augmented with a border
use super::{dense, MultiVector};
use crate::{
    error::{Error, Result},
    map::IndexMap,
    traits::{BorderedApply, DistributedComm, Operator},
    types::{ApplyOutcome, RealScalar},
};
use rlst::DynArray;
use std::rc::Rc;

/// The border blocks `V`, `W` and `C`
struct Border<'a, T: RealScalar, C: DistributedComm> {
    v: Rc<MultiVector<'a, T, C>>,
    w: Rc<MultiVector<'a, T, C>>,
    c: Option<Rc<DynArray<T, 2>>>,
}

/// The augmented operator `[[A, V], [Wᵗ, C]]`.
///
/// `A` must be square. Without a border the operator acts as `A` and reports
/// [ApplyOutcome::Unbordered].
pub struct BorderedOperator<'a, T: RealScalar, C: DistributedComm, O: Operator<T, C>> {
    comm: &'a C,
    operator: Rc<O>,
    border: Option<Border<'a, T, C>>,
}

impl<'a, T: RealScalar, C: DistributedComm, O: Operator<T, C>> BorderedOperator<'a, T, C, O> {
    /// Wrap a square operator without a border. Collective.
    pub fn new(comm: &'a C, operator: Rc<O>) -> Result<Self> {
        if !operator
            .range_map()
            .same_as(operator.domain_map(), comm)
        {
            return Err(Error::configuration(
                "the range and domain maps of the operator differ",
            ));
        }
        Ok(Self {
            comm,
            operator,
            border: None,
        })
    }

    /// Wrap a square operator with border blocks. Collective.
    ///
    /// `w` defaults to `v`. Without `c` the lower right block is zero.
    pub fn with_border(
        comm: &'a C,
        operator: Rc<O>,
        v: Rc<MultiVector<'a, T, C>>,
        w: Option<Rc<MultiVector<'a, T, C>>>,
        c: Option<Rc<DynArray<T, 2>>>,
    ) -> Result<Self> {
        let mut op = Self::new(comm, operator)?;
        op.set_border(v, w, c)?;
        Ok(op)
    }

    /// Replace the border. Collective. On error the previous border is kept.
    pub fn set_border(
        &mut self,
        v: Rc<MultiVector<'a, T, C>>,
        w: Option<Rc<MultiVector<'a, T, C>>>,
        c: Option<Rc<DynArray<T, 2>>>,
    ) -> Result<()> {
        if !v.map().same_as(self.operator.range_map(), self.comm) {
            return Err(Error::configuration(
                "V is not distributed like the range of the operator",
            ));
        }
        let w = w.unwrap_or_else(|| Rc::clone(&v));
        if w.ncols() != v.ncols() {
            return Err(Error::configuration(format!(
                "W has {} columns but V has {}",
                w.ncols(),
                v.ncols()
            )));
        }
        if !w.same_distribution(&v) {
            return Err(Error::configuration("W is not distributed like V"));
        }
        if let Some(c) = &c {
            let expected = [w.ncols(), v.ncols()];
            if c.shape() != expected {
                return Err(Error::configuration(format!(
                    "C has shape {:?} but should be {expected:?}",
                    c.shape()
                )));
            }
        }
        self.border = Some(Border { v, w, c });
        Ok(())
    }

    /// Remove the border
    pub fn clear_border(&mut self) {
        self.border = None;
    }

    /// Is a border set?
    pub fn has_border(&self) -> bool {
        self.border.is_some()
    }

    /// Number of border rows, zero without a border
    pub fn border_size(&self) -> usize {
        self.border.as_ref().map_or(0, |b| b.v.ncols())
    }

    /// The operator `A`
    pub fn operator(&self) -> &Rc<O> {
        &self.operator
    }

    /// Distribution of the distributed part of the vectors
    pub fn map(&self) -> &Rc<IndexMap> {
        self.operator.range_map()
    }
}

impl<T: RealScalar, C: DistributedComm, O: Operator<T, C>> BorderedApply<T, C>
    for BorderedOperator<'_, T, C, O>
{
    fn apply_parts(
        &self,
        x: &MultiVector<'_, T, C>,
        s: &DynArray<T, 2>,
        y: &mut MultiVector<'_, T, C>,
        t: &mut DynArray<T, 2>,
    ) -> Result<ApplyOutcome> {
        if x.ncols() != y.ncols() {
            return Err(Error::invalid_argument(
                "BorderedOperator::apply",
                format!("{} input and {} output columns", x.ncols(), y.ncols()),
            ));
        }
        let Some(border) = &self.border else {
            self.operator.apply(x, y)?;
            return Ok(ApplyOutcome::Unbordered);
        };
        let expected = [border.v.ncols(), x.ncols()];
        if s.shape() != expected || t.shape() != expected {
            return Err(Error::invalid_argument(
                "BorderedOperator::apply",
                format!(
                    "border blocks of shape {:?} and {:?}, expected {expected:?}",
                    s.shape(),
                    t.shape()
                ),
            ));
        }

        self.operator.apply(x, y)?;
        y.block_mut().times_mat_add(T::one(), border.v.block(), s, T::one());

        let wtx = border.w.trans_multiply(x);
        let t_data = t.data_mut().unwrap();
        match &border.c {
            Some(c) => {
                let cs = dense::matmul(c, s);
                let cs = cs.data().unwrap();
                for (entry, (&a, &b)) in t_data.iter_mut().zip(cs.iter().zip(&wtx)) {
                    *entry = a + b;
                }
            }
            None => t_data.copy_from_slice(&wtx),
        }
        Ok(ApplyOutcome::Bordered)
    }
}
