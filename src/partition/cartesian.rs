//! Block partitioning of Cartesian grids
use super::{
    create_pid_map,
    layout::{parts_on_axis, SubdomainLayout},
    pid_map::active_processes,
    PartitionerParameters, SeparatorGroup, SubdomainGroups,
};
use crate::{
    error::{Error, Result},
    map::IndexMap,
    topology::CartesianGrid,
    traits::{DistributedComm, Partitioner, Reduction},
    types::GlobalIndex,
};
use itertools::{izip, Itertools};
use log::{debug, info, warn};
use std::{
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

// The result of a successful call to `partition`.
#[derive(Debug)]
struct PartitionData {
    layout: SubdomainLayout,
    pid_map: Vec<usize>,
    map: Rc<IndexMap>,
    subdomain_map: Rc<IndexMap>,
    // Global ids of the local subdomains, ascending. Local subdomain `i` occupies
    // `offsets[i]..offsets[i + 1]` of `map`.
    local_parts: Vec<usize>,
    offsets: Vec<usize>,
}

/// Partitions a Cartesian grid into blocks of `sx × sy × sz` nodes
#[derive(Debug)]
pub struct CartesianPartitioner<'a, C: DistributedComm> {
    comm: &'a C,
    base_map: Rc<IndexMap>,
    parameters: PartitionerParameters,
    grid: CartesianGrid,
    layout: SubdomainLayout,
    data: Option<PartitionData>,
    destination_pid: Option<usize>,
}

impl<'a, C: DistributedComm> CartesianPartitioner<'a, C> {
    /// Create new.
    ///
    /// `base_map` is the current distribution of the `dof · nx · ny · nz` unknowns. It is
    /// checked against the parameters by [Partitioner::partition].
    pub fn new(
        comm: &'a C,
        base_map: Rc<IndexMap>,
        parameters: PartitionerParameters,
    ) -> Result<Self> {
        let grid = CartesianGrid::new(
            parameters.nx,
            parameters.ny,
            parameters.nz,
            parameters.periodicity,
        );
        let layout = check_parameters(&parameters, grid)?;
        Ok(Self {
            comm,
            base_map,
            parameters,
            grid,
            layout,
            data: None,
            destination_pid: None,
        })
    }

    /// The grid being partitioned
    pub fn grid(&self) -> &CartesianGrid {
        &self.grid
    }

    /// The parameters of this level
    pub fn parameters(&self) -> &PartitionerParameters {
        &self.parameters
    }

    /// Subdomain extents `[sx, sy, sz]`
    pub fn subdomain_extents(&self) -> [usize; 3] {
        self.layout.extents()
    }

    /// Id of the subdomain of `sx × sy × sz` nodes that contains the node at `(x, y, z)`
    pub fn subdomain_id(
        &self,
        sx: usize,
        sy: usize,
        sz: usize,
        x: usize,
        y: usize,
        z: usize,
    ) -> usize {
        SubdomainLayout::new(self.grid, [sx, sy, sz]).subdomain_id(x, y, z)
    }

    /// Position of the first node of subdomain `sd` when using subdomains of `sx × sy × sz` nodes
    pub fn subdomain_position(
        &self,
        sd: usize,
        sx: usize,
        sy: usize,
        sz: usize,
    ) -> (usize, usize, usize) {
        SubdomainLayout::new(self.grid, [sx, sy, sz]).subdomain_position(sd)
    }

    /// Global ids of the subdomains owned by this process, ascending
    pub fn local_subdomains(&self) -> &[usize] {
        self.data.as_ref().map_or(&[], |d| &d.local_parts)
    }

    /// The process that owns subdomain `sd`
    pub fn subdomain_pid(&self, sd: usize) -> Result<usize> {
        let data = self.partition_data()?;
        data.pid_map.get(sd).copied().ok_or_else(|| {
            Error::invalid_argument(
                "subdomain_pid",
                format!("subdomain {sd} is not below {}", data.pid_map.len()),
            )
        })
    }

    /// The process that owns `gid` after partitioning
    pub fn pid(&self, gid: GlobalIndex) -> Result<usize> {
        let data = self.partition_data()?;
        self.subdomain_pid(data.layout.subdomain_of_node(self.node(gid)))
    }

    /// The process that owns the node at `(x, y, z)` after partitioning
    pub fn pid_at(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        let data = self.partition_data()?;
        self.subdomain_pid(data.layout.subdomain_id(x, y, z))
    }

    /// The process that the nodes of this process move to when maps are moved
    pub fn destination_pid(&self) -> Option<usize> {
        self.destination_pid
    }

    /// Set the destination process: the owner of the subdomain of the first node that this
    /// process owns in `base`. A process without nodes keeps its own rank.
    pub fn set_destination_pid(&mut self, base: &IndexMap) -> Result<usize> {
        let data = self.partition_data()?;
        let destination = match base.global_indices().first() {
            Some(&gid) => data.pid_map[data.layout.subdomain_of_node(self.node(gid))],
            None => self.comm.rank(),
        };
        self.destination_pid = Some(destination);
        Ok(destination)
    }

    /// Send every element of `base` to the owner of its subdomain.
    ///
    /// Collective. The elements of each subdomain are contiguous in the result.
    pub fn repartition_map(&self, base: &IndexMap) -> Result<IndexMap> {
        let data = self.partition_data()?;
        Ok(self.redistribute(&data.layout, &data.pid_map, base))
    }

    fn partition_data(&self) -> Result<&PartitionData> {
        self.data
            .as_ref()
            .ok_or_else(|| Error::configuration("the grid has not been partitioned"))
    }

    fn node(&self, gid: GlobalIndex) -> usize {
        gid as usize / self.parameters.dof
    }

    // Check the parameters against the base map. Returns the subdomain layout.
    fn check(&self) -> Result<SubdomainLayout> {
        let p = &self.parameters;
        let layout = check_parameters(p, self.grid)?;
        let expected = p.dof * self.grid.node_count();
        if expected != self.base_map.global_len() {
            return Err(Error::configuration(format!(
                "the map has {} elements but a {}x{}x{} grid with {} dof per node has {}",
                self.base_map.global_len(),
                p.nx,
                p.ny,
                p.nz,
                p.dof,
                expected
            )));
        }
        let out_of_range = self
            .base_map
            .global_indices()
            .iter()
            .any(|&g| g < 0 || g as usize >= expected);
        if self
            .comm
            .all_reduce(&[u8::from(out_of_range)], Reduction::Max)[0]
            == 1
        {
            return Err(Error::configuration(format!(
                "the map contains indices outside 0..{expected}"
            )));
        }
        Ok(layout)
    }

    // Each subdomain stays with the process that holds its nodes.
    fn owner_pid_map(&self, layout: &SubdomainLayout) -> Result<Vec<usize>> {
        let size = self.comm.size();
        let rank = self.comm.rank();
        let mut lowest = vec![size; layout.num_parts()];
        let mut highest = vec![0; layout.num_parts()];
        for &gid in self.base_map.global_indices() {
            let sd = layout.subdomain_of_node(self.node(gid));
            lowest[sd] = rank;
            highest[sd] = rank;
        }
        subdomain_owners(
            &self.comm.all_reduce(&lowest, Reduction::Min),
            &self.comm.all_reduce(&highest, Reduction::Max),
            size,
        )
    }

    // Order global ids by (subdomain, gid)
    fn sorted_by_subdomain(
        &self,
        layout: &SubdomainLayout,
        mut gids: Vec<GlobalIndex>,
    ) -> Vec<GlobalIndex> {
        gids.sort_by_key(|&gid| (layout.subdomain_of_node(self.node(gid)), gid));
        gids
    }

    fn redistribute(
        &self,
        layout: &SubdomainLayout,
        pid_map: &[usize],
        base: &IndexMap,
    ) -> IndexMap {
        let mut per_process = vec![vec![]; self.comm.size()];
        for &gid in base.global_indices() {
            per_process[pid_map[layout.subdomain_of_node(self.node(gid))]].push(gid);
        }
        let counts = per_process.iter().map(Vec::len).collect_vec();
        let (received_counts, received) = self
            .comm
            .all_to_all_varcount(&counts, &per_process.concat());
        debug!(
            "[{}] sent {:?} and received {:?} indices",
            self.comm.rank(),
            counts,
            received_counts
        );

        IndexMap::from_parts(
            self.sorted_by_subdomain(layout, received),
            base.global_len(),
        )
    }
}

// Check the parameters on their own. Returns the subdomain layout.
fn check_parameters(p: &PartitionerParameters, grid: CartesianGrid) -> Result<SubdomainLayout> {
    if p.dof == 0 {
        return Err(Error::configuration("dof per node must be positive"));
    }
    if p.variable_types.len() != p.dof {
        return Err(Error::configuration(format!(
            "{} variable types given for {} dof per node",
            p.variable_types.len(),
            p.dof
        )));
    }
    let layout = SubdomainLayout::new(grid, p.subdomain_extents()?);
    if layout.num_parts() == 0 {
        return Err(Error::configuration("the grid has no subdomains"));
    }
    Ok(layout)
}

// Owner of each subdomain from the lowest and highest rank that hold one of its nodes. A
// lowest rank of `size` marks a subdomain without nodes, which follows the block rule.
fn subdomain_owners(lowest: &[usize], highest: &[usize], size: usize) -> Result<Vec<usize>> {
    izip!(lowest, highest, create_pid_map(lowest.len(), size))
        .enumerate()
        .map(|(sd, (&low, &high, block))| {
            if low == size {
                Ok(block)
            } else if low == high {
                Ok(low)
            } else {
                Err(Error::configuration(format!(
                    "subdomain {sd} is split between processes {low} and {high}; \
                     partition with repart to move its nodes"
                )))
            }
        })
        .collect()
}

impl<C: DistributedComm> Partitioner for CartesianPartitioner<'_, C> {
    fn partition(&mut self, repart: bool) -> Result<()> {
        let layout = self.check()?;
        let nparts = layout.num_parts();
        let rank = self.comm.rank();
        let size = self.comm.size();

        let (pid_map, map) = if repart {
            let pid_map = create_pid_map(nparts, size);
            let map = self.redistribute(&layout, &pid_map, &self.base_map);
            (pid_map, map)
        } else {
            let pid_map = self.owner_pid_map(&layout)?;
            let gids = self.base_map.global_indices().to_vec();
            let map = IndexMap::from_parts(
                self.sorted_by_subdomain(&layout, gids),
                self.base_map.global_len(),
            );
            (pid_map, map)
        };
        let active = active_processes(&pid_map);
        if active < size {
            warn!("{} of {size} processes own no subdomains", size - active);
        }

        let local_parts = (0..nparts).filter(|&sd| pid_map[sd] == rank).collect_vec();
        let mut offsets = vec![0; local_parts.len() + 1];
        let mut position = 0;
        for (i, &sd) in local_parts.iter().enumerate() {
            while position < map.local_len()
                && layout.subdomain_of_node(self.node(map.global_index(position))) == sd
            {
                position += 1;
            }
            offsets[i + 1] = position;
        }
        let subdomain_map = IndexMap::from_parts(
            local_parts.iter().map(|&sd| sd as GlobalIndex).collect(),
            nparts,
        );

        info!(
            "[{rank}] partitioned a {}x{}x{} grid into {nparts} subdomains of {:?}; {} local",
            self.parameters.nx,
            self.parameters.ny,
            self.parameters.nz,
            layout.extents(),
            local_parts.len()
        );

        self.layout = layout;
        self.data = Some(PartitionData {
            layout,
            pid_map,
            map: Rc::new(map),
            subdomain_map: Rc::new(subdomain_map),
            local_parts,
            offsets,
        });
        self.destination_pid = None;
        if repart {
            let base_map = Rc::clone(&self.base_map);
            self.set_destination_pid(&base_map)?;
        }
        Ok(())
    }

    fn groups(&self, sd: usize) -> Result<SubdomainGroups> {
        let data = self.partition_data()?;
        let local = data.local_parts.binary_search(&sd).map_err(|_| {
            Error::invalid_argument(
                "groups",
                format!(
                    "subdomain {sd} is not owned by process {}",
                    self.comm.rank()
                ),
            )
        })?;
        let gids = &data.map.global_indices()[data.offsets[local]..data.offsets[local + 1]];

        let mut interior = vec![];
        let mut separators = BTreeMap::<(usize, Vec<usize>), Vec<GlobalIndex>>::new();
        for &gid in gids {
            let links = self
                .grid
                .neighbours(self.node(gid))
                .iter()
                .map(|n| data.layout.subdomain_of_node(n))
                .filter(|&other| other != sd)
                .collect::<BTreeSet<_>>();
            if links.is_empty() {
                interior.push(gid);
            } else {
                separators
                    .entry((self.variable_type(gid), links.into_iter().collect()))
                    .or_default()
                    .push(gid);
            }
        }

        Ok(SubdomainGroups {
            interior,
            separators: separators
                .into_iter()
                .map(|((variable_type, links), nodes)| SeparatorGroup {
                    variable_type,
                    links,
                    nodes,
                })
                .collect(),
        })
    }

    fn num_local_parts(&self) -> usize {
        self.local_subdomains().len()
    }

    fn num_global_parts(&self, sx: usize, sy: usize, sz: usize) -> usize {
        let [nx, ny, nz] = self.grid.extents();
        parts_on_axis(nx, sx) * parts_on_axis(ny, sy) * parts_on_axis(nz, sz)
    }

    fn partitioned(&self) -> bool {
        self.data.is_some()
    }

    fn dof_per_node(&self) -> usize {
        self.parameters.dof
    }

    fn variable_type(&self, gid: GlobalIndex) -> usize {
        self.parameters.variable_types[gid as usize % self.parameters.dof]
    }

    fn subdomain(&self, gid: GlobalIndex) -> usize {
        self.layout.subdomain_of_node(self.node(gid))
    }

    fn map(&self) -> Result<Rc<IndexMap>> {
        Ok(Rc::clone(&self.partition_data()?.map))
    }

    fn subdomain_map(&self) -> Result<Rc<IndexMap>> {
        Ok(Rc::clone(&self.partition_data()?.subdomain_map))
    }

    fn move_map(&self, base: &IndexMap) -> Result<IndexMap> {
        let destination = self.destination_pid.ok_or_else(|| {
            Error::configuration("no destination process; partition with repart first")
        })?;
        let mut counts = vec![0; self.comm.size()];
        counts[destination] = base.local_len();
        let (_, received) = self
            .comm
            .all_to_all_varcount(&counts, base.global_indices());
        Ok(IndexMap::from_parts(received, base.global_len()))
    }

    fn next_level_parameters(&self) -> PartitionerParameters {
        self.parameters.next_level()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{comm::SingleProcess, types::Periodicity};

    fn partitioner(
        comm: &SingleProcess,
        parameters: PartitionerParameters,
    ) -> CartesianPartitioner<'_, SingleProcess> {
        let n = parameters.dof * parameters.nx * parameters.ny * parameters.nz;
        CartesianPartitioner::new(comm, Rc::new(IndexMap::linear(comm, n)), parameters).unwrap()
    }

    #[test]
    fn test_single_subdomain() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(3, 3, 3).with_subdomain_extents(3, 3, 3),
        );
        p.partition(false).unwrap();
        assert_eq!(p.num_global_parts(3, 3, 3), 1);
        assert_eq!(p.num_local_parts(), 1);
        let groups = p.groups(0).unwrap();
        assert_eq!(groups.interior.len(), 27);
        assert!(groups.separators.is_empty());
    }

    #[test]
    fn test_two_subdomains_in_x() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(4, 2, 1).with_subdomain_extents(2, 2, 1),
        );
        p.partition(false).unwrap();
        assert_eq!(p.num_local_parts(), 2);

        // Subdomain 0 has nodes 0, 1, 4, 5; nodes 1 and 5 touch subdomain 1
        let groups = p.groups(0).unwrap();
        assert_eq!(groups.interior, vec![0, 4]);
        assert_eq!(groups.separators.len(), 1);
        assert_eq!(groups.separators[0].links, vec![1]);
        assert_eq!(groups.separators[0].nodes, vec![1, 5]);

        let map = p.map().unwrap();
        assert_eq!(map.global_indices(), &[0, 1, 4, 5, 2, 3, 6, 7]);
    }

    #[test]
    fn test_groups_have_identical_links() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(6, 6, 1).with_subdomain_extents(2, 2, 1),
        );
        p.partition(false).unwrap();

        // Each node of the centre subdomain touches two other subdomains
        let groups = p.groups(4).unwrap();
        assert!(groups.interior.is_empty());
        assert_eq!(groups.node_count(), 4);
        for g in &groups.separators {
            for &gid in &g.nodes {
                let node = gid as usize;
                let mut links = p
                    .grid()
                    .neighbours(node)
                    .iter()
                    .map(|n| p.subdomain(n as GlobalIndex))
                    .filter(|&s| s != 4)
                    .collect_vec();
                links.sort();
                links.dedup();
                assert_eq!(links, g.links);
            }
        }
        let links = groups.separators.iter().map(|g| g.links.clone()).collect_vec();
        assert_eq!(links, vec![vec![1, 3], vec![1, 5], vec![3, 7], vec![5, 7]]);
    }

    #[test]
    fn test_variable_types_are_not_merged() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(4, 4, 1)
                .with_dof(3)
                .with_variable_types(vec![0, 0, 1])
                .with_subdomain_extents(2, 2, 1),
        );
        p.partition(false).unwrap();
        for sd in p.local_subdomains().to_vec() {
            let groups = p.groups(sd).unwrap();
            for g in &groups.separators {
                assert!(g.nodes.iter().all(|&gid| p.variable_type(gid) == g.variable_type));
            }
            let pressure = groups
                .separators
                .iter()
                .filter(|g| g.variable_type == 1)
                .count();
            let velocity = groups
                .separators
                .iter()
                .filter(|g| g.variable_type == 0)
                .count();
            assert_eq!(pressure, velocity);
            assert!(pressure > 0);
        }
    }

    #[test]
    fn test_periodic_links() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(4, 1, 1)
                .with_subdomain_extents(2, 1, 1)
                .with_periodicity(Periodicity::X),
        );
        p.partition(false).unwrap();
        // Node 0 wraps around to node 3 in subdomain 1
        let groups = p.groups(0).unwrap();
        assert!(groups.interior.is_empty());
        assert_eq!(groups.separators.len(), 1);
        assert_eq!(groups.separators[0].nodes, vec![0, 1]);
    }

    #[test]
    fn test_partition_is_idempotent() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(7, 5, 3)
                .with_dof(2)
                .with_subdomain_extents(3, 2, 2),
        );
        p.partition(false).unwrap();
        let map = p.map().unwrap();
        let groups = p
            .local_subdomains()
            .iter()
            .map(|&sd| p.groups(sd).unwrap())
            .collect_vec();
        p.partition(false).unwrap();
        assert_eq!(*p.map().unwrap(), *map);
        for (&sd, g) in p.local_subdomains().iter().zip(&groups) {
            assert_eq!(&p.groups(sd).unwrap(), g);
        }
    }

    #[test]
    fn test_every_node_in_one_subdomain() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(5, 4, 3)
                .with_dof(2)
                .with_subdomain_extents(2, 3, 2),
        );
        p.partition(false).unwrap();
        let mut seen = vec![0; 5 * 4 * 3 * 2];
        for sd in p.local_subdomains().to_vec() {
            let groups = p.groups(sd).unwrap();
            for gid in groups
                .interior
                .iter()
                .chain(groups.separators.iter().flat_map(|g| g.nodes.iter()))
            {
                assert_eq!(p.subdomain(*gid), sd);
                seen[*gid as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_map_size_mismatch() {
        let comm = SingleProcess;
        let mut p = CartesianPartitioner::new(
            &comm,
            Rc::new(IndexMap::linear(&comm, 10)),
            PartitionerParameters::new(3, 3, 1).with_subdomain_extents(3, 3, 1),
        )
        .unwrap();
        assert!(matches!(p.partition(false), Err(Error::Configuration(_))));
        assert!(!p.partitioned());
        assert!(p.map().is_err());
    }

    fn create(
        comm: &SingleProcess,
        parameters: PartitionerParameters,
    ) -> Result<CartesianPartitioner<'_, SingleProcess>> {
        CartesianPartitioner::new(comm, Rc::new(IndexMap::linear(comm, 16)), parameters)
    }

    #[test]
    fn test_zero_extents() {
        let comm = SingleProcess;
        let parameters = PartitionerParameters::new(4, 4, 1).with_subdomain_extents(0, 4, 1);
        assert!(matches!(create(&comm, parameters), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_zero_target_parts() {
        let comm = SingleProcess;
        let parameters = PartitionerParameters::new(4, 4, 1).with_target_parts(0);
        assert!(matches!(create(&comm, parameters), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_zero_dof() {
        let comm = SingleProcess;
        let parameters = PartitionerParameters::new(4, 4, 1)
            .with_dof(0)
            .with_subdomain_extents(2, 2, 1);
        assert!(matches!(create(&comm, parameters), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_empty_grid() {
        let comm = SingleProcess;
        let parameters = PartitionerParameters::new(0, 3, 1).with_subdomain_extents(1, 1, 1);
        assert!(matches!(create(&comm, parameters), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_queries_before_partition() {
        let comm = SingleProcess;
        let p = create(
            &comm,
            PartitionerParameters::new(4, 4, 1).with_target_parts(4),
        )
        .unwrap();
        assert_eq!(p.subdomain(15), 3);
        assert_eq!(p.variable_type(15), 0);
        assert!(matches!(p.pid(15), Err(Error::Configuration(_))));
        assert!(matches!(p.pid_at(0, 0, 0), Err(Error::Configuration(_))));
        assert!(matches!(p.subdomain_pid(0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_subdomain_owners() {
        // Subdomain 1 has no nodes and follows the block rule
        assert_eq!(
            subdomain_owners(&[0, 3, 2, 1], &[0, 0, 2, 1], 3).unwrap(),
            vec![0, 0, 2, 1]
        );
        // Subdomain 0 has nodes on processes 0 and 1
        assert!(matches!(
            subdomain_owners(&[0, 1], &[1, 1], 2),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_partition_keeps_owned_nodes() {
        let comm = SingleProcess;
        let base = IndexMap::from_parts(vec![7, 6, 5, 4, 3, 2, 1, 0], 8);
        let mut p = CartesianPartitioner::new(
            &comm,
            Rc::new(base),
            PartitionerParameters::new(4, 2, 1).with_subdomain_extents(2, 2, 1),
        )
        .unwrap();
        p.partition(false).unwrap();
        assert_eq!(p.map().unwrap().global_indices(), &[0, 1, 4, 5, 2, 3, 6, 7]);
        assert_eq!(p.destination_pid(), None);
    }

    #[test]
    fn test_failed_partition_keeps_previous_state() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(4, 4, 1).with_subdomain_extents(2, 2, 1),
        );
        p.partition(false).unwrap();
        let map = p.map().unwrap();
        p.parameters.variable_types = vec![];
        assert!(p.partition(false).is_err());
        assert_eq!(*p.map().unwrap(), *map);
    }

    #[test]
    fn test_repartition_and_move() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(4, 4, 1).with_subdomain_extents(2, 2, 1),
        );
        assert!(p.move_map(&IndexMap::linear(&comm, 16)).is_err());
        p.partition(true).unwrap();
        assert_eq!(p.destination_pid(), Some(0));
        assert_eq!(p.pid(15).unwrap(), 0);
        assert_eq!(p.pid_at(3, 3, 0).unwrap(), 0);

        let coarse = IndexMap::from_parts(vec![0, 2, 8, 10], 16);
        let moved = p.move_map(&coarse).unwrap();
        assert_eq!(moved.global_indices(), coarse.global_indices());

        let repartitioned = p.repartition_map(&coarse).unwrap();
        assert_eq!(repartitioned.global_indices(), &[0, 2, 8, 10]);
        assert_eq!(repartitioned.global_len(), 16);
    }

    #[test]
    fn test_subdomain_map() {
        let comm = SingleProcess;
        let mut p = partitioner(
            &comm,
            PartitionerParameters::new(6, 4, 1).with_subdomain_extents(2, 2, 1),
        );
        p.partition(true).unwrap();
        let sm = p.subdomain_map().unwrap();
        assert_eq!(sm.global_len(), 6);
        assert_eq!(sm.global_indices(), &[0, 1, 2, 3, 4, 5]);
        assert!(matches!(p.groups(6), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn test_subdomain_position_inverse() {
        let comm = SingleProcess;
        let p = partitioner(&comm, PartitionerParameters::new(9, 7, 5));
        for sd in 0..p.num_global_parts(4, 3, 2) {
            let (x, y, z) = p.subdomain_position(sd, 4, 3, 2);
            assert_eq!(p.subdomain_id(4, 3, 2, x, y, z), sd);
        }
    }
}
