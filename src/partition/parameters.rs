//! Partitioner configuration
use crate::{
    error::{Error, Result},
    types::Periodicity,
};
#[cfg(feature = "serde")]
use std::fs;

/// How the size of the subdomains is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubdomainSizing {
    /// Subdomains of `[sx, sy, sz]` nodes. Subdomains at the end of an axis are truncated.
    Extents([usize; 3]),
    /// Aim for roughly this many subdomains, split evenly over the axes of the grid
    TargetParts(usize),
}

/// Parameters of a Cartesian partitioner for one level of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartitionerParameters {
    /// Number of nodes in the x direction
    pub nx: usize,
    /// Number of nodes in the y direction
    pub ny: usize,
    /// Number of nodes in the z direction
    pub nz: usize,
    /// Degrees of freedom per node
    pub dof: usize,
    /// Subdomain sizing
    pub sizing: SubdomainSizing,
    /// Periodic axes
    pub periodicity: Periodicity,
    /// Type tag of each of the `dof` variables of a node
    pub variable_types: Vec<usize>,
    /// Factor by which the subdomain extents grow from one level to the next
    pub coarsening: [usize; 3],
}

impl Default for PartitionerParameters {
    fn default() -> Self {
        Self {
            nx: 1,
            ny: 1,
            nz: 1,
            dof: 1,
            sizing: SubdomainSizing::Extents([1, 1, 1]),
            periodicity: Periodicity::NONE,
            variable_types: vec![0],
            coarsening: [2, 2, 2],
        }
    }
}

impl PartitionerParameters {
    /// Create parameters for an `nx × ny × nz` grid with one variable per node
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            ..Default::default()
        }
    }

    /// Set the number of variables per node. All variables get type 0.
    pub fn with_dof(mut self, dof: usize) -> Self {
        self.dof = dof;
        self.variable_types = vec![0; dof];
        self
    }

    /// Set the type tag of each variable of a node
    pub fn with_variable_types(mut self, variable_types: Vec<usize>) -> Self {
        self.variable_types = variable_types;
        self
    }

    /// Use subdomains of `sx × sy × sz` nodes
    pub fn with_subdomain_extents(mut self, sx: usize, sy: usize, sz: usize) -> Self {
        self.sizing = SubdomainSizing::Extents([sx, sy, sz]);
        self
    }

    /// Aim for `parts` subdomains
    pub fn with_target_parts(mut self, parts: usize) -> Self {
        self.sizing = SubdomainSizing::TargetParts(parts);
        self
    }

    /// Set the periodic axes
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Set the coarsening factors used by [PartitionerParameters::next_level]
    pub fn with_coarsening(mut self, cx: usize, cy: usize, cz: usize) -> Self {
        self.coarsening = [cx, cy, cz];
        self
    }

    /// Grid extents `[nx, ny, nz]`
    pub fn grid_extents(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Subdomain extents `[sx, sy, sz]` implied by the sizing
    pub fn subdomain_extents(&self) -> Result<[usize; 3]> {
        match &self.sizing {
            SubdomainSizing::Extents(extents) => {
                if extents.contains(&0) {
                    Err(Error::configuration(format!(
                        "subdomain extents must be positive, got {extents:?}"
                    )))
                } else {
                    Ok(*extents)
                }
            }
            SubdomainSizing::TargetParts(0) => Err(Error::configuration(
                "the target number of subdomains must be positive",
            )),
            SubdomainSizing::TargetParts(parts) => {
                let n = self.grid_extents();
                let dim = n.iter().filter(|&&i| i > 1).count().max(1);
                let per_axis = ((*parts as f64).powf(1.0 / dim as f64).round() as usize).max(1);
                Ok(n.map(|i| {
                    if i > 1 {
                        i.div_ceil(per_axis.min(i))
                    } else {
                        1
                    }
                }))
            }
        }
    }

    /// Parameters for the next coarser level: subdomain extents grow by the coarsening factors.
    ///
    /// A grid with a single layer in z keeps its z extent.
    pub fn next_level(&self) -> Self {
        let mut c = self.coarsening;
        if self.nz == 1 {
            c[2] = 1;
        }
        let sizing = match &self.sizing {
            SubdomainSizing::Extents([sx, sy, sz]) => {
                SubdomainSizing::Extents([sx * c[0], sy * c[1], sz * c[2]])
            }
            SubdomainSizing::TargetParts(parts) => {
                SubdomainSizing::TargetParts((parts / (c[0] * c[1] * c[2]).max(1)).max(1))
            }
        };
        Self {
            sizing,
            ..self.clone()
        }
    }
}

#[cfg(feature = "serde")]
impl PartitionerParameters {
    /// Read parameters from a RON string
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::from_str(s)
            .map_err(|e| Error::configuration(format!("invalid partitioner parameters: {e}")))
    }

    /// Write the parameters as a RON string
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::configuration(format!("cannot serialize parameters: {e}")))
    }

    /// Import parameters from a RON file
    pub fn import_from_ron(filename: &str) -> Result<Self> {
        let content = fs::read_to_string(filename)
            .map_err(|e| Error::configuration(format!("unable to read {filename}: {e}")))?;
        Self::from_ron_str(&content)
    }

    /// Export the parameters as a RON file
    pub fn export_as_ron(&self, filename: &str) -> Result<()> {
        fs::write(filename, self.to_ron_string()?)
            .map_err(|e| Error::configuration(format!("unable to write {filename}: {e}")))
    }
}
