//! Coordinate tuples.

use serde::{Deserialize, Serialize};

use crate::dims::Dimensions;

/// One coordinate tuple.
///
/// The `z` and `m` components are stored unconditionally but are meaningful
/// only when the owning geometry's [`Dimensions`] flags say so. Clearing a
/// flag on the owning geometry zeroes the corresponding component.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Easting / longitude.
    pub x: f64,
    /// Northing / latitude.
    pub y: f64,
    /// Elevation; meaningful only with the Z flag.
    pub z: f64,
    /// Measure; meaningful only with the M flag.
    pub m: f64,
}

impl Coord {
    /// Creates a 2D coordinate.
    pub fn xy(x: f64, y: f64) -> Self {
        Coord { x, y, z: 0.0, m: 0.0 }
    }

    /// Creates a 3D coordinate.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Coord { x, y, z, m: 0.0 }
    }

    /// Creates a measured 3D coordinate.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Coord { x, y, z, m }
    }

    /// Swaps the X and Y components in place.
    pub fn swap_xy(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
    }

    /// Compares the components selected by `dims` for exact equality.
    pub(crate) fn eq_with_dims(&self, other: &Coord, dims: Dimensions) -> bool {
        self.x == other.x
            && self.y == other.y
            && (!dims.z || self.z == other.z)
            && (!dims.m || self.m == other.m)
    }
}
