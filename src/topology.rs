//! Cartesian grid topology
use crate::types::Periodicity;

/// The six axis neighbours of a grid node. `None` means there is no neighbour.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Neighbours {
    /// Neighbour at x - 1
    pub left: Option<usize>,
    /// Neighbour at x + 1
    pub right: Option<usize>,
    /// Neighbour at y - 1
    pub lower: Option<usize>,
    /// Neighbour at y + 1
    pub upper: Option<usize>,
    /// Neighbour at z - 1
    pub below: Option<usize>,
    /// Neighbour at z + 1
    pub above: Option<usize>,
}

impl Neighbours {
    /// Iterate over the neighbours that exist
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        [
            self.left,
            self.right,
            self.lower,
            self.upper,
            self.below,
            self.above,
        ]
        .into_iter()
        .flatten()
    }
}

/// A structured `nx × ny × nz` grid, nodes numbered with x fastest
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct CartesianGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    periodicity: Periodicity,
}

impl CartesianGrid {
    /// Create new
    pub fn new(nx: usize, ny: usize, nz: usize, periodicity: Periodicity) -> Self {
        Self {
            nx,
            ny,
            nz,
            periodicity,
        }
    }

    /// Grid extents
    pub fn extents(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Periodicity
    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Dimension of the problem: 2 for a single layer in z, 3 otherwise
    pub fn dim(&self) -> usize {
        if self.nz == 1 {
            2
        } else {
            3
        }
    }

    /// Position `(x, y, z)` of a node
    pub fn position(&self, node: usize) -> (usize, usize, usize) {
        (
            node % self.nx,
            (node / self.nx) % self.ny,
            node / (self.nx * self.ny),
        )
    }

    /// Node at position `(x, y, z)`
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.nx * (y + self.ny * z)
    }

    /// The axis neighbours of a node
    pub fn neighbours(&self, node: usize) -> Neighbours {
        let (x, y, z) = self.position(node);
        let [left, right] = step(x, self.nx, self.periodicity.x);
        let [lower, upper] = step(y, self.ny, self.periodicity.y);
        let [below, above] = step(z, self.nz, self.periodicity.z);
        Neighbours {
            left: left.map(|i| self.index(i, y, z)),
            right: right.map(|i| self.index(i, y, z)),
            lower: lower.map(|j| self.index(x, j, z)),
            upper: upper.map(|j| self.index(x, j, z)),
            below: below.map(|k| self.index(x, y, k)),
            above: above.map(|k| self.index(x, y, k)),
        }
    }
}

// The coordinates before and after `i` on an axis of length `n`.
fn step(i: usize, n: usize, periodic: bool) -> [Option<usize>; 2] {
    let before = if i > 0 {
        Some(i - 1)
    } else if periodic {
        Some(n - 1)
    } else {
        None
    };
    let after = if i + 1 < n {
        Some(i + 1)
    } else if periodic {
        Some(0)
    } else {
        None
    };
    [before, after]
}
