//! Coordinate transform seam.

use std::sync::Arc;

use crate::coord::Coord;
use crate::error::GeomError;
use crate::srs::SpatialRef;

/// Per-coordinate transformation callback.
///
/// Geometries apply the callback to every coordinate in place and, on
/// success, take over the transform's target spatial reference. The
/// transformation math itself lives outside this crate.
pub trait CoordTransform {
    /// Transforms one coordinate in place.
    fn transform_coord(&self, coord: &mut Coord) -> Result<(), GeomError>;

    /// Spatial reference of the transform output, assigned to geometries
    /// after a successful transform.
    fn target_srs(&self) -> Option<Arc<SpatialRef>> {
        None
    }
}
