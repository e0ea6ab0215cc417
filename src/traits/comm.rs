//! Collective communication
use mpi::traits::Equivalence;

/// Elementwise reduction applied by [DistributedComm::all_reduce]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Reduction {
    /// Sum over all processes
    Sum,
    /// Minimum over all processes
    Min,
    /// Maximum over all processes
    Max,
}

/// Collective operations used by distributed maps, partitioners and vectors.
///
/// Every method except `rank` and `size` is collective: all processes must call
/// them in the same order. Diverging call sequences are undefined behaviour.
pub trait DistributedComm: 'static {
    /// Rank of the current process
    fn rank(&self) -> usize;

    /// Number of processes
    fn size(&self) -> usize;

    /// Reduce `values` elementwise over all processes. Every process receives the result.
    fn all_reduce<T: Equivalence + Copy>(&self, values: &[T], op: Reduction) -> Vec<T>;

    /// Exchange variable sized chunks between all processes.
    ///
    /// `data` is split into consecutive chunks, the `p`-th chunk having `counts[p]` entries;
    /// chunk `p` is sent to process `p`. Returns the number of entries received from each
    /// process and the received data ordered by source rank.
    fn all_to_all_varcount<T: Equivalence + Copy + Default>(
        &self,
        counts: &[usize],
        data: &[T],
    ) -> (Vec<usize>, Vec<T>);
}
