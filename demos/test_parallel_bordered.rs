use approx::assert_relative_eq;
use ddgrid::{
    linalg::{dense, BorderedOperator, BorderedVector, MultiVector},
    traits::{BorderedApply, DistributedComm, MultiVec, Operator},
    types::{ApplyOutcome, NormType},
    IndexMap, Result,
};
use mpi::environment::Universe;
use std::rc::Rc;

/// `A = 2 I`
struct Scaling {
    map: Rc<IndexMap>,
}

impl<C: DistributedComm> Operator<f64, C> for Scaling {
    fn domain_map(&self) -> &Rc<IndexMap> {
        &self.map
    }
    fn range_map(&self) -> &Rc<IndexMap> {
        &self.map
    }
    fn apply(&self, x: &MultiVector<'_, f64, C>, y: &mut MultiVector<'_, f64, C>) -> Result<()> {
        y.block_mut().update(2.0, x.block(), 0.0);
        Ok(())
    }
}

fn run_test<C: DistributedComm>(comm: &C) {
    let n = 10 * comm.size();
    let map = Rc::new(IndexMap::linear(comm, n));

    // The border is replicated, so the dot product counts it once
    let mut x = BorderedVector::new(comm, Rc::clone(&map), 2, 3);
    x.mv_init(1.0);
    let dots = x.mv_dot(&x).unwrap();
    for d in dots {
        assert_relative_eq!(d, (n + 2) as f64);
    }
    assert_eq!(x.vec_length(), n + 2);

    // Random vectors have identical borders on all processes
    x.mv_random();
    let border = x.border_matrix();
    let data = border.data().unwrap();
    let max = comm.all_reduce(data, ddgrid::traits::Reduction::Max);
    let min = comm.all_reduce(data, ddgrid::traits::Reduction::Min);
    assert_eq!(max, min);

    // [[2I, V], [Vᵗ, 0]] with V = ones
    let mut v = MultiVector::new(comm, Rc::clone(&map), 1);
    v.column_mut(0).fill(1.0);
    let op = BorderedOperator::with_border(
        comm,
        Rc::new(Scaling {
            map: Rc::clone(&map),
        }),
        Rc::new(v),
        None,
        None,
    )
    .unwrap();
    let mut x = BorderedVector::new(comm, Rc::clone(&map), 1, 1);
    x.mv_init(1.0);
    let mut y = x.clone_with_vecs(1).unwrap();
    assert_eq!(op.apply(&x, &mut y).unwrap(), ApplyOutcome::Bordered);
    assert_eq!(y.vector().column(0), vec![3.0; 10].as_slice());
    assert_relative_eq!(dense::entry(&y.border_matrix(), 0, 0), n as f64);
    assert_relative_eq!(y.mv_norm(NormType::Inf)[0], n as f64);
}

/// Run tests
fn main() {
    let universe: Universe = mpi::initialize().unwrap();
    let comm = universe.world();
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    if comm.rank() == 0 {
        println!("Testing bordered vectors and operators");
    }
    run_test(&comm);
}
