//! Point geometry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::dims::Dimensions;
use crate::envelope::Envelope;
use crate::error::GeomError;
use crate::srs::SpatialRef;
use crate::tag::GeometryTag;
use crate::transform::CoordTransform;

/// A single position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Point {
    coord: Option<Coord>,
    dims: Dimensions,
    srs: Option<Arc<SpatialRef>>,
}

impl Point {
    /// Creates a point from a coordinate and explicit dimensionality.
    pub fn new(coord: Coord, dims: Dimensions) -> Self {
        Self {
            coord: Some(coord),
            dims,
            srs: None,
        }
    }

    /// Creates an empty point.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a 2D point.
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(Coord::xy(x, y), Dimensions::XY)
    }

    /// Creates a 3D point.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Coord::xyz(x, y, z), Dimensions::XYZ)
    }

    /// Type tag of the geometry.
    pub fn tag(&self) -> GeometryTag {
        GeometryTag::Point
    }

    /// Dimensionality flags.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Whether the point has no position.
    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }

    /// The position, if any.
    pub fn coord(&self) -> Option<Coord> {
        self.coord
    }

    /// Sets the position, keeping the dimensionality flags.
    pub fn set_coord(&mut self, coord: Coord) {
        self.coord = Some(coord);
    }

    /// Adds or removes the Z component. Removing zeroes the stored value.
    pub fn set_3d(&mut self, enabled: bool) {
        if !enabled {
            if let Some(c) = &mut self.coord {
                c.z = 0.0;
            }
        }
        self.dims.z = enabled;
    }

    /// Adds or removes the M component. Removing zeroes the stored value.
    pub fn set_measured(&mut self, enabled: bool) {
        if !enabled {
            if let Some(c) = &mut self.coord {
                c.m = 0.0;
            }
        }
        self.dims.m = enabled;
    }

    /// Drops both the Z and M components.
    pub fn flatten_to_2d(&mut self) {
        self.set_3d(false);
        self.set_measured(false);
    }

    /// Swaps the X and Y components of the position.
    pub fn swap_xy(&mut self) {
        if let Some(c) = &mut self.coord {
            c.swap_xy();
        }
    }

    /// Bounding rectangle, or `None` when empty.
    pub fn envelope(&self) -> Option<Envelope> {
        self.coord.map(|c| Envelope::new(c.x, c.y, c.x, c.y))
    }

    /// Applies a coordinate transform in place and takes over its target
    /// spatial reference.
    pub fn transform(&mut self, transform: &dyn CoordTransform) -> Result<(), GeomError> {
        if let Some(c) = &mut self.coord {
            transform.transform_coord(c)?;
        }
        self.srs = transform.target_srs();
        Ok(())
    }

    /// Spatial reference of the point.
    pub fn srs(&self) -> Option<&Arc<SpatialRef>> {
        self.srs.as_ref()
    }

    /// Assigns a spatial reference.
    pub fn assign_spatial_ref(&mut self, srs: Option<Arc<SpatialRef>>) {
        self.srs = srs;
    }
}

impl PartialEq for Point {
    /// Geometric equality: same dimensionality and exactly equal coordinate
    /// components. The spatial reference is not compared.
    fn eq(&self, other: &Self) -> bool {
        if self.dims != other.dims {
            return false;
        }
        match (&self.coord, &other.coord) {
            (None, None) => true,
            (Some(a), Some(b)) => a.eq_with_dims(b, self.dims),
            _ => false,
        }
    }
}
