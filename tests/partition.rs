//! Test partitioning of Cartesian grids
use ddgrid::{
    partition::{CartesianPartitioner, PartitionerParameters, SubdomainLayout},
    topology::CartesianGrid,
    traits::Partitioner,
    types::{GlobalIndex, Periodicity},
    Error, IndexMap, SingleProcess,
};
use itertools::Itertools;
use std::rc::Rc;

fn partitioned(
    comm: &SingleProcess,
    p: PartitionerParameters,
) -> CartesianPartitioner<'_, SingleProcess> {
    let n = p.dof * p.nx * p.ny * p.nz;
    let mut partitioner =
        CartesianPartitioner::new(comm, Rc::new(IndexMap::linear(comm, n)), p).unwrap();
    partitioner.partition(false).unwrap();
    partitioner
}

macro_rules! make_tests {
    ($name:ident, $nx:literal, $ny:literal, $nz:literal, $dof:literal, $sx:literal, $sy:literal, $sz:literal, $periodicity:expr) => {
        paste::item! {
            fn [< parameters_ $name >]() -> PartitionerParameters {
                PartitionerParameters::new($nx, $ny, $nz)
                    .with_dof($dof)
                    .with_variable_types((0..$dof).map(|v| usize::from(v + 1 == $dof)).collect())
                    .with_subdomain_extents($sx, $sy, $sz)
                    .with_periodicity($periodicity)
            }

            #[test]
            fn [< test_cover_ $name >]() {
                //! Test that the groups of all subdomains cover every variable exactly once
                let comm = SingleProcess;
                let p = partitioned(&comm, [< parameters_ $name >]());
                let mut seen = vec![0; $nx * $ny * $nz * $dof];
                for sd in p.local_subdomains().to_vec() {
                    let groups = p.groups(sd).unwrap();
                    for gid in groups.interior.iter().chain(groups.separators.iter().flat_map(|g| g.nodes.iter())) {
                        seen[*gid as usize] += 1;
                    }
                }
                assert!(seen.iter().all(|&c| c == 1));
            }

            #[test]
            fn [< test_map_contiguous_ $name >]() {
                //! Test that the partitioned map lists each subdomain as one contiguous range
                let comm = SingleProcess;
                let p = partitioned(&comm, [< parameters_ $name >]());
                let map = p.map().unwrap();
                let subdomains = map
                    .global_indices()
                    .iter()
                    .map(|&gid| p.subdomain(gid))
                    .dedup()
                    .collect::<Vec<_>>();
                assert_eq!(subdomains, p.local_subdomains());
                assert_eq!(map.global_len(), $nx * $ny * $nz * $dof);
            }

            #[test]
            fn [< test_links_ $name >]() {
                //! Test that the nodes of a group all touch exactly the linked subdomains
                let comm = SingleProcess;
                let p = partitioned(&comm, [< parameters_ $name >]());
                for sd in p.local_subdomains().to_vec() {
                    for g in p.groups(sd).unwrap().separators {
                        assert!(!g.links.is_empty());
                        for &gid in &g.nodes {
                            assert_eq!(p.variable_type(gid), g.variable_type);
                            let links = p
                                .grid()
                                .neighbours(gid as usize / $dof)
                                .iter()
                                .map(|n| p.subdomain((n * $dof) as GlobalIndex))
                                .filter(|&s| s != sd)
                                .sorted()
                                .dedup()
                                .collect::<Vec<_>>();
                            assert_eq!(links, g.links);
                        }
                    }
                }
            }

            #[test]
            fn [< test_deterministic_ $name >]() {
                //! Test that two partitioners agree
                let comm = SingleProcess;
                let p = partitioned(&comm, [< parameters_ $name >]());
                let q = partitioned(&comm, [< parameters_ $name >]());
                assert_eq!(*p.map().unwrap(), *q.map().unwrap());
                for sd in p.local_subdomains().to_vec() {
                    assert_eq!(p.groups(sd).unwrap(), q.groups(sd).unwrap());
                }
            }
        }
    };
}

make_tests!(laplace_2d, 8, 8, 1, 1, 4, 4, 1, Periodicity::NONE);
make_tests!(stokes_2d, 12, 8, 1, 3, 4, 4, 1, Periodicity::NONE);
make_tests!(truncated_2d, 10, 7, 1, 1, 4, 3, 1, Periodicity::NONE);
make_tests!(periodic_2d, 8, 8, 1, 1, 2, 4, 1, Periodicity::XY);
make_tests!(darcy_3d, 6, 6, 6, 4, 3, 3, 3, Periodicity::NONE);
make_tests!(periodic_3d, 6, 4, 4, 2, 3, 2, 2, Periodicity::X);

#[test]
fn test_3x3x3_single_subdomain() {
    let comm = SingleProcess;
    let p = partitioned(
        &comm,
        PartitionerParameters::new(3, 3, 3).with_subdomain_extents(3, 3, 3),
    );
    assert_eq!(p.num_global_parts(3, 3, 3), 1);
    let groups = p.groups(0).unwrap();
    assert_eq!(groups.interior.len(), 27);
    assert!(groups.separators.is_empty());
}

#[test]
fn test_subdomain_position_round_trip() {
    let grid = CartesianGrid::new(11, 5, 3, Periodicity::NONE);
    let layout = SubdomainLayout::new(grid, [4, 2, 2]);
    assert_eq!(layout.counts(), [3, 3, 2]);
    for sd in 0..layout.num_parts() {
        let (x, y, z) = layout.subdomain_position(sd);
        assert_eq!(layout.subdomain_id(x, y, z), sd);
    }
}

#[test]
fn test_next_level_has_fewer_parts() {
    let comm = SingleProcess;
    let p = partitioned(
        &comm,
        PartitionerParameters::new(16, 16, 1).with_subdomain_extents(2, 2, 1),
    );
    let next = p.next_level_parameters();
    let [sx, sy, sz] = next.subdomain_extents().unwrap();
    assert_eq!([sx, sy, sz], [4, 4, 1]);
    assert_eq!(p.num_global_parts(2, 2, 1), 64);
    assert_eq!(p.num_global_parts(sx, sy, sz), 16);

    let coarse =
        CartesianPartitioner::new(&comm, Rc::new(IndexMap::linear(&comm, 256)), next).unwrap();
    assert!(!coarse.partitioned());
}

#[test]
fn test_configuration_errors() {
    let comm = SingleProcess;
    let base = Rc::new(IndexMap::linear(&comm, 16));

    let mut p = CartesianPartitioner::new(
        &comm,
        Rc::clone(&base),
        PartitionerParameters::new(4, 4, 1)
            .with_dof(2)
            .with_subdomain_extents(2, 2, 1),
    )
    .unwrap();
    assert!(matches!(p.partition(false), Err(Error::Configuration(_))));
    assert!(!p.partitioned());
    assert!(matches!(p.groups(0), Err(Error::Configuration(_))));
    assert!(matches!(p.pid(3), Err(Error::Configuration(_))));

    let p = CartesianPartitioner::new(
        &comm,
        Rc::clone(&base),
        PartitionerParameters::new(4, 4, 1)
            .with_variable_types(vec![0, 1])
            .with_subdomain_extents(2, 2, 1),
    );
    assert!(matches!(p, Err(Error::Configuration(_))));

    let p = CartesianPartitioner::new(
        &comm,
        Rc::clone(&base),
        PartitionerParameters::new(4, 4, 1).with_target_parts(0),
    );
    assert!(matches!(p, Err(Error::Configuration(_))));

    let mut p = CartesianPartitioner::new(
        &comm,
        Rc::new(IndexMap::from_parts(vec![0, 1, 2, 99], 16)),
        PartitionerParameters::new(4, 4, 1).with_subdomain_extents(2, 2, 1),
    )
    .unwrap();
    assert!(matches!(p.partition(false), Err(Error::Configuration(_))));
    assert!(p.map().is_err());
}

#[test]
fn test_repartition_single_process() {
    let comm = SingleProcess;
    let mut p = CartesianPartitioner::new(
        &comm,
        Rc::new(IndexMap::linear(&comm, 64)),
        PartitionerParameters::new(8, 8, 1).with_target_parts(4),
    )
    .unwrap();
    p.partition(true).unwrap();
    assert_eq!(p.subdomain_extents(), [4, 4, 1]);
    assert_eq!(p.num_local_parts(), 4);
    assert_eq!(p.destination_pid(), Some(0));
    let moved = p.move_map(&IndexMap::linear(&comm, 64)).unwrap();
    assert_eq!(moved.local_len(), 64);
    assert_eq!(
        p.local_subdomains().iter().map(|&sd| p.subdomain_pid(sd).unwrap()).collect_vec(),
        vec![0; 4]
    );
}
