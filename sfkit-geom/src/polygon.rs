//! Polygon geometry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dims::Dimensions;
use crate::envelope::Envelope;
use crate::error::GeomError;
use crate::geodesic;
use crate::line_string::{shoelace, LineString};
use crate::srs::SpatialRef;
use crate::tag::GeometryTag;
use crate::transform::CoordTransform;

/// A surface bounded by linear rings.
///
/// Ring 0 is the exterior; any further rings are holes. Rings are implicitly
/// closed and share the polygon's dimensionality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Polygon {
    rings: Vec<LineString>,
    dims: Dimensions,
    srs: Option<Arc<SpatialRef>>,
}

impl Polygon {
    /// Creates a polygon from rings and explicit dimensionality.
    ///
    /// Every ring is coerced to the polygon's dimensionality.
    pub fn new(rings: Vec<LineString>, dims: Dimensions) -> Self {
        let mut polygon = Self {
            rings: Vec::new(),
            dims,
            srs: None,
        };
        for ring in rings {
            polygon.add_ring(ring);
        }
        polygon
    }

    /// Creates an empty polygon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a ring, coercing it to the polygon's dimensionality.
    pub fn add_ring(&mut self, mut ring: LineString) {
        ring.set_3d(self.dims.z);
        ring.set_measured(self.dims.m);
        self.rings.push(ring);
    }

    /// Type tag of the geometry.
    pub fn tag(&self) -> GeometryTag {
        GeometryTag::Polygon
    }

    /// Dimensionality flags.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Whether the polygon has no non-empty rings.
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|r| r.is_empty())
    }

    /// The rings of the polygon.
    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    /// The exterior ring, if any.
    pub fn exterior(&self) -> Option<&LineString> {
        self.rings.first()
    }

    /// The hole rings.
    pub fn interiors(&self) -> &[LineString] {
        if self.rings.is_empty() {
            &[]
        } else {
            &self.rings[1..]
        }
    }

    /// Adds or removes the Z component on the polygon and every ring.
    pub fn set_3d(&mut self, enabled: bool) {
        for ring in &mut self.rings {
            ring.set_3d(enabled);
        }
        self.dims.z = enabled;
    }

    /// Adds or removes the M component on the polygon and every ring.
    pub fn set_measured(&mut self, enabled: bool) {
        for ring in &mut self.rings {
            ring.set_measured(enabled);
        }
        self.dims.m = enabled;
    }

    /// Drops both the Z and M components.
    pub fn flatten_to_2d(&mut self) {
        self.set_3d(false);
        self.set_measured(false);
    }

    /// Densifies every ring so that no segment is longer than `max_length`.
    pub fn segmentize(&mut self, max_length: f64) -> Result<(), GeomError> {
        for ring in &mut self.rings {
            ring.segmentize(max_length)?;
        }
        Ok(())
    }

    /// Swaps the X and Y components of every position.
    pub fn swap_xy(&mut self) {
        for ring in &mut self.rings {
            ring.swap_xy();
        }
    }

    /// Bounding rectangle of the exterior ring, or `None` when empty.
    pub fn envelope(&self) -> Option<Envelope> {
        let mut env: Option<Envelope> = None;
        for ring in &self.rings {
            env = match (env, ring.envelope()) {
                (Some(acc), Some(e)) => Some(acc.merge(e)),
                (None, e) => e,
                (acc, None) => acc,
            };
        }
        env
    }

    /// Planar perimeter: sum of the lengths of all rings, closing segments
    /// included.
    pub fn length(&self) -> f64 {
        self.rings.iter().map(ring_perimeter).sum()
    }

    /// Planar area: exterior ring area minus hole areas.
    pub fn area(&self) -> f64 {
        let Some(exterior) = self.rings.first() else {
            return 0.0;
        };
        let holes: f64 = self.rings[1..]
            .iter()
            .map(|r| shoelace(r.coords()).abs())
            .sum();
        shoelace(exterior.coords()).abs() - holes
    }

    /// Great-circle perimeter in meters on the attached geographic reference
    /// system, or a negative value when none is attached.
    pub fn geodesic_length(&self) -> f64 {
        match self.srs.as_deref() {
            Some(srs) if srs.is_geographic() => {
                let datum = srs.datum();
                self.rings
                    .iter()
                    .map(|r| geodesic::ring_length(r.coords(), &datum))
                    .sum()
            }
            _ => -1.0,
        }
    }

    /// Spherical area in square meters on the attached geographic reference
    /// system, or a negative value when none is attached.
    pub fn geodesic_area(&self) -> f64 {
        match self.srs.as_deref() {
            Some(srs) if srs.is_geographic() => {
                let datum = srs.datum();
                let Some(exterior) = self.rings.first() else {
                    return 0.0;
                };
                let holes: f64 = self.rings[1..]
                    .iter()
                    .map(|r| geodesic::ring_area(r.coords(), &datum))
                    .sum();
                geodesic::ring_area(exterior.coords(), &datum) - holes
            }
            _ => -1.0,
        }
    }

    /// Applies a coordinate transform in place and takes over its target
    /// spatial reference.
    pub fn transform(&mut self, transform: &dyn CoordTransform) -> Result<(), GeomError> {
        for ring in &mut self.rings {
            ring.transform(transform)?;
        }
        self.srs = transform.target_srs();
        Ok(())
    }

    /// Spatial reference of the polygon.
    pub fn srs(&self) -> Option<&Arc<SpatialRef>> {
        self.srs.as_ref()
    }

    /// Assigns a spatial reference.
    pub fn assign_spatial_ref(&mut self, srs: Option<Arc<SpatialRef>>) {
        self.srs = srs;
    }
}

impl PartialEq for Polygon {
    /// Geometric equality: same dimensionality and pairwise equal rings. The
    /// spatial reference is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.rings == other.rings
    }
}

fn ring_perimeter(ring: &LineString) -> f64 {
    let coords = ring.coords();
    let mut length = ring.length();
    if coords.len() > 1 {
        let first = &coords[0];
        let last = &coords[coords.len() - 1];
        if first.x != last.x || first.y != last.y {
            let dx = first.x - last.x;
            let dy = first.y - last.y;
            length += (dx * dx + dy * dy).sqrt();
        }
    }
    length
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::coord::Coord;

    fn square(size: f64) -> LineString {
        LineString::new(
            vec![
                Coord::xy(0.0, 0.0),
                Coord::xy(size, 0.0),
                Coord::xy(size, size),
                Coord::xy(0.0, size),
            ],
            Dimensions::XY,
        )
    }

    #[test]
    fn area_subtracts_holes() {
        let mut polygon = Polygon::new(vec![square(4.0)], Dimensions::XY);
        polygon.add_ring(square(1.0));
        assert_relative_eq!(polygon.area(), 15.0);
    }

    #[test]
    fn perimeter_closes_rings() {
        let polygon = Polygon::new(vec![square(2.0)], Dimensions::XY);
        assert_relative_eq!(polygon.length(), 8.0);
    }

    #[test]
    fn segmentize_densifies_rings() {
        let mut polygon = Polygon::new(vec![square(2.0)], Dimensions::XY);
        polygon.segmentize(1.0).unwrap();
        // Each of the three explicit segments gains a midpoint.
        assert_eq!(polygon.rings()[0].len(), 7);
        assert_relative_eq!(polygon.area(), 4.0);
    }

    #[test]
    fn rings_inherit_dimensionality() {
        let mut polygon = Polygon::new(vec![], Dimensions::XYZ);
        polygon.add_ring(square(1.0));
        assert!(polygon.rings()[0].dims().z);
    }
}
