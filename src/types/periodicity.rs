//! Periodicity

/// Per-axis periodicity of a Cartesian grid
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodicity {
    /// Periodic in the x direction
    pub x: bool,
    /// Periodic in the y direction
    pub y: bool,
    /// Periodic in the z direction
    pub z: bool,
}

impl Periodicity {
    /// No periodic axes
    pub const NONE: Self = Self::new(false, false, false);
    /// Periodic in x
    pub const X: Self = Self::new(true, false, false);
    /// Periodic in y
    pub const Y: Self = Self::new(false, true, false);
    /// Periodic in z
    pub const Z: Self = Self::new(false, false, true);
    /// Periodic in x and y
    pub const XY: Self = Self::new(true, true, false);
    /// Periodic in all directions
    pub const XYZ: Self = Self::new(true, true, true);

    /// Create new
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }
}
