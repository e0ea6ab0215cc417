//! Distributed index maps
use crate::{
    traits::{DistributedComm, Reduction},
    types::GlobalIndex,
};

/// The global indices owned by the current process, in local order, together with
/// the total number of indices over all processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    global_indices: Vec<GlobalIndex>,
    global_len: usize,
}

impl IndexMap {
    /// Create a map from the indices owned by this process.
    ///
    /// Collective: the global length is summed over all processes.
    pub fn new<C: DistributedComm>(comm: &C, global_indices: Vec<GlobalIndex>) -> Self {
        let global_len = comm.all_reduce(&[global_indices.len()], Reduction::Sum)[0];
        Self {
            global_indices,
            global_len,
        }
    }

    /// Create a map whose global length is already known
    pub fn from_parts(global_indices: Vec<GlobalIndex>, global_len: usize) -> Self {
        Self {
            global_indices,
            global_len,
        }
    }

    /// Distribute `0..global_len` over the processes in contiguous, almost equally sized blocks
    pub fn linear<C: DistributedComm>(comm: &C, global_len: usize) -> Self {
        let rank = comm.rank();
        let size = comm.size();
        let start = global_len * rank / size;
        let end = global_len * (rank + 1) / size;
        Self {
            global_indices: (start as GlobalIndex..end as GlobalIndex).collect(),
            global_len,
        }
    }

    /// A map that holds all of `0..len` on every process
    pub fn replicated(len: usize) -> Self {
        Self {
            global_indices: (0..len as GlobalIndex).collect(),
            global_len: len,
        }
    }

    /// Number of indices owned by this process
    pub fn local_len(&self) -> usize {
        self.global_indices.len()
    }

    /// Number of indices over all processes
    pub fn global_len(&self) -> usize {
        self.global_len
    }

    /// Global indices owned by this process
    pub fn global_indices(&self) -> &[GlobalIndex] {
        &self.global_indices
    }

    /// Global index of a local index
    pub fn global_index(&self, local_index: usize) -> GlobalIndex {
        self.global_indices[local_index]
    }

    /// Local index of a global index, if it is owned by this process
    pub fn local_index(&self, global_index: GlobalIndex) -> Option<usize> {
        self.global_indices.iter().position(|&g| g == global_index)
    }

    /// Check if two maps are identical on every process.
    ///
    /// Collective, so that all processes reach the same answer.
    pub fn same_as<C: DistributedComm>(&self, other: &IndexMap, comm: &C) -> bool {
        let same = u8::from(self == other);
        comm.all_reduce(&[same], Reduction::Min)[0] == 1
    }
}
