//! Small dense matrices
use crate::types::RealScalar;
use rlst::DynArray;

/// An `m × n` matrix of zeros
pub fn zeros<T: RealScalar>(m: usize, n: usize) -> DynArray<T, 2> {
    let mut a = DynArray::<T, 2>::from_shape([m, n]);
    a.data_mut().unwrap().fill(T::zero());
    a
}

/// An `m × n` matrix from values in column-major order
pub fn from_column_major<T: RealScalar>(m: usize, n: usize, data: &[T]) -> DynArray<T, 2> {
    assert_eq!(data.len(), m * n, "Expected {} values", m * n);
    let mut a = DynArray::<T, 2>::from_shape([m, n]);
    a.data_mut().unwrap().copy_from_slice(data);
    a
}

/// The entry at row `i`, column `j`
pub fn entry<T: RealScalar>(a: &DynArray<T, 2>, i: usize, j: usize) -> T {
    a.data().unwrap()[i + a.shape()[0] * j]
}

/// The transpose of `a`
pub fn transpose<T: RealScalar>(a: &DynArray<T, 2>) -> DynArray<T, 2> {
    let [m, n] = a.shape();
    let mut t = DynArray::<T, 2>::from_shape([n, m]);
    for i in 0..m {
        for j in 0..n {
            t[[j, i]] = a[[i, j]];
        }
    }
    t
}

/// `a · b`
pub fn matmul<T: RealScalar>(a: &DynArray<T, 2>, b: &DynArray<T, 2>) -> DynArray<T, 2> {
    let [m, k] = a.shape();
    let [kb, n] = b.shape();
    assert_eq!(k, kb, "Inner dimensions do not match");
    // A process may hold no rows of a distributed block
    if m == 0 || n == 0 || k == 0 {
        return zeros(m, n);
    }
    rlst::dot!(a.r(), b.r())
}
