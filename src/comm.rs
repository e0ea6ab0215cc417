//! Communicators
use crate::traits::{DistributedComm, Reduction};
use itertools::Itertools;
use mpi::{
    collective::SystemOperation,
    traits::{Communicator, CommunicatorCollectives, Equivalence},
};

impl<C: Communicator + 'static> DistributedComm for C {
    fn rank(&self) -> usize {
        Communicator::rank(self) as usize
    }

    fn size(&self) -> usize {
        Communicator::size(self) as usize
    }

    fn all_reduce<T: Equivalence + Copy>(&self, values: &[T], op: Reduction) -> Vec<T> {
        let mut result = values.to_vec();
        match op {
            Reduction::Sum => self.all_reduce_into(values, &mut result[..], SystemOperation::sum()),
            Reduction::Min => self.all_reduce_into(values, &mut result[..], SystemOperation::min()),
            Reduction::Max => self.all_reduce_into(values, &mut result[..], SystemOperation::max()),
        }
        result
    }

    fn all_to_all_varcount<T: Equivalence + Copy + Default>(
        &self,
        counts: &[usize],
        data: &[T],
    ) -> (Vec<usize>, Vec<T>) {
        // MPI counts are i32.
        let counts = counts.iter().map(|&x| x as i32).collect_vec();

        // First send around the counts via an all-to-all
        let mut recv_counts = vec![0_i32; Communicator::size(self) as usize];
        self.all_to_all_into(&counts, &mut recv_counts);

        let mut receive_data = vec![T::default(); recv_counts.iter().sum::<i32>() as usize];

        let send_displacements = counts
            .iter()
            .scan(0, |acc, &x| {
                let old = *acc;
                *acc += x;
                Some(old)
            })
            .collect_vec();

        let receive_displacements = recv_counts
            .iter()
            .scan(0, |acc, &x| {
                let old = *acc;
                *acc += x;
                Some(old)
            })
            .collect_vec();

        {
            let send_partition = mpi::datatype::Partition::new(data, counts, send_displacements);
            let mut receive_partition = mpi::datatype::PartitionMut::new(
                &mut receive_data[..],
                &recv_counts[..],
                receive_displacements,
            );
            self.all_to_all_varcount_into(&send_partition, &mut receive_partition);
        }

        (
            recv_counts.iter().map(|i| *i as usize).collect_vec(),
            receive_data,
        )
    }
}

/// A communicator for a single process that does not need an MPI runtime.
///
/// Every collective operation is the identity. Useful for serial runs and for tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SingleProcess;

impl DistributedComm for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn all_reduce<T: Equivalence + Copy>(&self, values: &[T], _op: Reduction) -> Vec<T> {
        values.to_vec()
    }

    fn all_to_all_varcount<T: Equivalence + Copy + Default>(
        &self,
        counts: &[usize],
        data: &[T],
    ) -> (Vec<usize>, Vec<T>) {
        assert_eq!(counts.len(), 1, "A single process exchanges exactly one chunk");
        (counts.to_vec(), data.to_vec())
    }
}
