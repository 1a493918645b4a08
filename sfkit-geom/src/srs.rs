//! Spatial reference descriptors.
//!
//! The geometry model never performs coordinate reference system math; it
//! only carries an externally-defined descriptor and propagates it through
//! collections. Descriptors are shared between a collection and its members
//! via [`Arc`](std::sync::Arc).

use serde::{Deserialize, Serialize};

/// Reference ellipsoid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// The WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Creates a datum from the semimajor axis (meters) and inverse
    /// flattening.
    pub fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Semimajor axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Semiminor axis in meters.
    pub fn semiminor(&self) -> f64 {
        self.semimajor * (1.0 - 1.0 / self.inv_flattening)
    }

    /// Mean radius of the ellipsoid in meters.
    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.semimajor + self.semiminor()) / 3.0
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

/// What kind of coordinate system a [`SpatialRef`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SrsKind {
    /// Angular longitude/latitude coordinates on the datum ellipsoid.
    Geographic,
    /// Planar coordinates produced by some projection.
    Projected,
}

/// Externally-owned coordinate reference system descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialRef {
    datum: Datum,
    kind: SrsKind,
    epsg: Option<u32>,
}

impl SpatialRef {
    /// Geographic WGS84 (EPSG:4326).
    pub const WGS84: SpatialRef = SpatialRef {
        datum: Datum::WGS84,
        kind: SrsKind::Geographic,
        epsg: Some(4326),
    };

    /// Creates a new descriptor.
    pub fn new(datum: Datum, kind: SrsKind, epsg: Option<u32>) -> Self {
        Self { datum, kind, epsg }
    }

    /// Datum of the reference system.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Kind of the reference system.
    pub fn kind(&self) -> SrsKind {
        self.kind
    }

    /// EPSG code, if one is known.
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Whether coordinates in this reference system are longitude/latitude
    /// angles.
    pub fn is_geographic(&self) -> bool {
        self.kind == SrsKind::Geographic
    }
}
