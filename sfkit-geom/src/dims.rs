//! Dimensionality flags.

use serde::{Deserialize, Serialize};

/// Presence of the optional Z (elevation) and M (measure) coordinate
/// components of a geometry.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// The geometry carries Z values.
    pub z: bool,
    /// The geometry carries M values.
    pub m: bool,
}

impl Dimensions {
    /// Plain 2D.
    pub const XY: Dimensions = Dimensions { z: false, m: false };
    /// 3D.
    pub const XYZ: Dimensions = Dimensions { z: true, m: false };
    /// 2D with measure.
    pub const XYM: Dimensions = Dimensions { z: false, m: true };
    /// 3D with measure.
    pub const XYZM: Dimensions = Dimensions { z: true, m: true };

    /// Flags present in either of the two sets.
    pub fn union(self, other: Dimensions) -> Dimensions {
        Dimensions {
            z: self.z || other.z,
            m: self.m || other.m,
        }
    }

    /// Number of components of one coordinate (2 to 4).
    pub fn coord_len(self) -> usize {
        2 + usize::from(self.z) + usize::from(self.m)
    }
}
