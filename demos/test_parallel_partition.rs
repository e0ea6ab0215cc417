use ddgrid::{
    partition::{CartesianPartitioner, PartitionerParameters},
    traits::{DistributedComm, Partitioner, Reduction},
    types::Periodicity,
    Error, IndexMap,
};
use itertools::Itertools;
use mpi::environment::Universe;
use std::rc::Rc;

/// Check that every node lands in exactly one subdomain, owned by exactly one process
fn check_partition<C: DistributedComm>(comm: &C, partitioner: &CartesianPartitioner<'_, C>) {
    let map = partitioner.map().unwrap();
    let n = map.global_len();

    let mut counts = vec![0_usize; n];
    for sd in partitioner.local_subdomains().to_vec() {
        let groups = partitioner.groups(sd).unwrap();
        for gid in groups
            .interior
            .iter()
            .chain(groups.separators.iter().flat_map(|g| g.nodes.iter()))
        {
            assert_eq!(partitioner.subdomain(*gid), sd);
            assert_eq!(partitioner.pid(*gid).unwrap(), comm.rank());
            counts[*gid as usize] += 1;
        }
        for g in &groups.separators {
            assert!(!g.links.contains(&sd));
            assert!(g
                .nodes
                .iter()
                .all(|&gid| partitioner.variable_type(gid) == g.variable_type));
        }
    }
    let counts = comm.all_reduce(&counts, Reduction::Sum);
    assert!(counts.iter().all(|&c| c == 1));

    let total = comm.all_reduce(&[map.local_len()], Reduction::Sum)[0];
    assert_eq!(total, n);
    assert!(map
        .global_indices()
        .iter()
        .all(|&gid| partitioner.pid(gid).unwrap() == comm.rank()));

    // The owned subdomains of all processes are exactly 0..nparts
    let parts = partitioner.subdomain_map().unwrap();
    assert_eq!(parts.local_len(), partitioner.num_local_parts());
    let nparts = parts.global_len();
    let mut owned = vec![0_usize; nparts];
    for &sd in parts.global_indices() {
        owned[sd as usize] += 1;
    }
    let owned = comm.all_reduce(&owned, Reduction::Sum);
    assert!(owned.iter().all(|&c| c == 1));
}

/// Partition with repartitioning, then partition the result again without moving nodes
fn run_test<C: DistributedComm>(comm: &C, parameters: PartitionerParameters) {
    let n = parameters.dof * parameters.nx * parameters.ny * parameters.nz;
    let base = Rc::new(IndexMap::linear(comm, n));
    let mut partitioner = CartesianPartitioner::new(comm, base, parameters.clone()).unwrap();
    partitioner.partition(true).unwrap();
    check_partition(comm, &partitioner);

    // Processes beyond the number of subdomains own nothing
    let nparts = partitioner.subdomain_map().unwrap().global_len();
    let idle = usize::from(partitioner.num_local_parts() == 0);
    let idle = comm.all_reduce(&[idle], Reduction::Sum)[0];
    assert_eq!(idle, comm.size() - nparts.min(comm.size()));

    let moved = partitioner.move_map(&IndexMap::linear(comm, n)).unwrap();
    let moved_total = comm.all_reduce(&[moved.local_len()], Reduction::Sum)[0];
    assert_eq!(moved_total, n);

    // The repartitioned map keeps every subdomain on one process, so nothing moves
    let aligned = partitioner.map().unwrap();
    let mut again = CartesianPartitioner::new(comm, Rc::clone(&aligned), parameters).unwrap();
    again.partition(false).unwrap();
    check_partition(comm, &again);
    assert_eq!(
        again.map().unwrap().global_indices().iter().sorted().collect_vec(),
        aligned.global_indices().iter().sorted().collect_vec()
    );
    assert_eq!(again.destination_pid(), None);
}

/// Partitioning without repartitioning fails if a subdomain is split between processes
fn run_split_test<C: DistributedComm>(comm: &C, parameters: PartitionerParameters) {
    let n = parameters.dof * parameters.nx * parameters.ny * parameters.nz;
    let base = Rc::new(IndexMap::linear(comm, n));
    let mut partitioner =
        CartesianPartitioner::new(comm, Rc::clone(&base), parameters).unwrap();

    let [sx, sy, sz] = partitioner.subdomain_extents();
    let nparts = partitioner.num_global_parts(sx, sy, sz);
    let mut holders = vec![0_usize; nparts];
    for sd in base
        .global_indices()
        .iter()
        .map(|&gid| partitioner.subdomain(gid))
        .unique()
    {
        holders[sd] += 1;
    }
    let split = comm
        .all_reduce(&holders, Reduction::Sum)
        .iter()
        .any(|&h| h > 1);

    match partitioner.partition(false) {
        Ok(()) => {
            assert!(!split);
            check_partition(comm, &partitioner);
            assert_eq!(
                partitioner.map().unwrap().global_indices().iter().sorted().collect_vec(),
                base.global_indices().iter().sorted().collect_vec()
            );
        }
        Err(Error::Configuration(_)) => {
            assert!(split);
            assert!(!partitioner.partitioned());
        }
        Err(e) => panic!("Unexpected error: {e}"),
    }
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
        println!("Testing a 2D Stokes-like grid");
    }
    let stokes = PartitionerParameters::new(16, 16, 1)
        .with_dof(3)
        .with_variable_types(vec![0, 0, 1])
        .with_subdomain_extents(4, 4, 1);
    run_test(&comm, stokes.clone());
    run_split_test(&comm, stokes);

    if comm.rank() == 0 {
        println!("Testing a periodic 3D grid");
    }
    run_test(
        &comm,
        PartitionerParameters::new(8, 8, 8)
            .with_subdomain_extents(4, 4, 4)
            .with_periodicity(Periodicity::XYZ),
    );

    if comm.rank() == 0 {
        println!("Testing a grid with truncated subdomains");
    }
    let truncated = PartitionerParameters::new(10, 7, 1).with_target_parts(6);
    run_test(&comm, truncated.clone());
    run_split_test(&comm, truncated);

    if comm.rank() == 0 {
        println!("Testing a grid with two subdomains");
    }
    run_test(
        &comm,
        PartitionerParameters::new(8, 4, 1).with_subdomain_extents(4, 4, 1),
    );
}
