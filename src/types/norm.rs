//! Norm types

/// Norm used when measuring the columns of a multivector
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum NormType {
    /// Sum of absolute values
    One,
    /// Euclidean norm
    #[default]
    Two,
    /// Largest absolute value
    Inf,
}
