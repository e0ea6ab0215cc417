//! Access modes and view wrappers
use std::ops::Deref;

/// How data is taken from an existing object when constructing a new one
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DataAccess {
    /// Copy the data into new storage
    Copy,
    /// Borrow the data of the source. The source keeps ownership and must outlive the view.
    View,
}

/// A view that can only be read.
///
/// Dereferences to the viewed object, but never mutably.
#[derive(Debug)]
pub struct ReadOnly<V>(V);

impl<V> ReadOnly<V> {
    pub(crate) fn new(view: V) -> Self {
        Self(view)
    }
}

impl<V> Deref for ReadOnly<V> {
    type Target = V;
    fn deref(&self) -> &V {
        &self.0
    }
}

/// Result of applying a bordered operator
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ApplyOutcome {
    /// The border blocks were applied
    Bordered,
    /// No border was set, so only the base operator was applied
    Unbordered,
}
