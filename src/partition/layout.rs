//! Block layout of subdomains on a Cartesian grid
use crate::topology::CartesianGrid;

/// Number of subdomains of extent `s` needed to cover `n` nodes. Zero if `s` is zero.
pub(crate) fn parts_on_axis(n: usize, s: usize) -> usize {
    if s == 0 {
        0
    } else {
        n.div_ceil(s)
    }
}

/// Subdomains of `sx × sy × sz` nodes covering a Cartesian grid.
///
/// Subdomains are numbered with x fastest. The subdomains at the end of an axis are
/// truncated when the grid extent is not a multiple of the subdomain extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubdomainLayout {
    grid: CartesianGrid,
    extents: [usize; 3],
    counts: [usize; 3],
}

impl SubdomainLayout {
    /// Create new. All extents must be positive.
    pub fn new(grid: CartesianGrid, extents: [usize; 3]) -> Self {
        assert!(
            !extents.contains(&0),
            "Subdomain extents must be positive: {extents:?}"
        );
        let n = grid.extents();
        Self {
            grid,
            extents,
            counts: [
                parts_on_axis(n[0], extents[0]),
                parts_on_axis(n[1], extents[1]),
                parts_on_axis(n[2], extents[2]),
            ],
        }
    }

    /// Subdomain extents
    pub fn extents(&self) -> [usize; 3] {
        self.extents
    }

    /// Number of subdomains along each axis
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Total number of subdomains
    pub fn num_parts(&self) -> usize {
        self.counts.iter().product()
    }

    /// Id of the subdomain that contains the node at `(x, y, z)`
    pub fn subdomain_id(&self, x: usize, y: usize, z: usize) -> usize {
        let [sx, sy, sz] = self.extents;
        let [npx, npy, _] = self.counts;
        x / sx + npx * (y / sy + npy * (z / sz))
    }

    /// Position of the first node of a subdomain
    pub fn subdomain_position(&self, sd: usize) -> (usize, usize, usize) {
        let [sx, sy, sz] = self.extents;
        let [npx, npy, _] = self.counts;
        (
            (sd % npx) * sx,
            ((sd / npx) % npy) * sy,
            (sd / (npx * npy)) * sz,
        )
    }

    /// Id of the subdomain containing a node
    pub fn subdomain_of_node(&self, node: usize) -> usize {
        let (x, y, z) = self.grid.position(node);
        self.subdomain_id(x, y, z)
    }

    /// The nodes of a subdomain, x fastest
    pub fn nodes(&self, sd: usize) -> Vec<usize> {
        let (x0, y0, z0) = self.subdomain_position(sd);
        let [nx, ny, nz] = self.grid.extents();
        let [sx, sy, sz] = self.extents;
        let mut nodes = Vec::with_capacity(sx * sy * sz);
        for z in z0..nz.min(z0 + sz) {
            for y in y0..ny.min(y0 + sy) {
                for x in x0..nx.min(x0 + sx) {
                    nodes.push(self.grid.index(x, y, z));
                }
            }
        }
        nodes
    }
}
