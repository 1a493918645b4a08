//! LineString geometry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::dims::Dimensions;
use crate::envelope::Envelope;
use crate::error::GeomError;
use crate::geodesic;
use crate::srs::SpatialRef;
use crate::tag::GeometryTag;
use crate::transform::CoordTransform;

/// An ordered sequence of positions forming a polyline.
///
/// This is the only curve type of the closed geometry set; polygon rings
/// reuse it as an implicitly closed ring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineString {
    coords: Vec<Coord>,
    dims: Dimensions,
    srs: Option<Arc<SpatialRef>>,
}

impl LineString {
    /// Creates a linestring from coordinates and explicit dimensionality.
    pub fn new(coords: Vec<Coord>, dims: Dimensions) -> Self {
        Self {
            coords,
            dims,
            srs: None,
        }
    }

    /// Creates an empty linestring.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Type tag of the geometry.
    pub fn tag(&self) -> GeometryTag {
        GeometryTag::LineString
    }

    /// Dimensionality flags.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Whether the linestring has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate sequence.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Mutable access to the coordinate sequence.
    pub fn coords_mut(&mut self) -> &mut Vec<Coord> {
        &mut self.coords
    }

    /// Appends a coordinate.
    pub fn push(&mut self, coord: Coord) {
        self.coords.push(coord);
    }

    /// Adds or removes the Z component. Removing zeroes the stored values.
    pub fn set_3d(&mut self, enabled: bool) {
        if !enabled {
            for c in &mut self.coords {
                c.z = 0.0;
            }
        }
        self.dims.z = enabled;
    }

    /// Adds or removes the M component. Removing zeroes the stored values.
    pub fn set_measured(&mut self, enabled: bool) {
        if !enabled {
            for c in &mut self.coords {
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

    /// Inserts linearly interpolated positions so that no segment is longer
    /// than `max_length` in the XY plane. Z and M values of the inserted
    /// positions are interpolated as well.
    pub fn segmentize(&mut self, max_length: f64) -> Result<(), GeomError> {
        if !(max_length > 0.0) {
            return Err(GeomError::Generic(
                "segmentize requires a positive maximum length".into(),
            ));
        }
        if self.coords.len() < 2 {
            return Ok(());
        }

        let mut densified: Vec<Coord> = Vec::new();
        if let Err(err) = densified.try_reserve(self.coords.len()) {
            return Err(GeomError::OutOfMemory(err.to_string()));
        }
        for pair in self.coords.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            densified.push(a);

            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance <= max_length {
                continue;
            }
            let pieces = (distance / max_length).ceil();
            if pieces >= i32::MAX as f64 {
                return Err(GeomError::Generic(
                    "segmentize would generate too many points".into(),
                ));
            }
            let pieces = pieces as usize;
            if let Err(err) = densified.try_reserve(pieces - 1) {
                return Err(GeomError::OutOfMemory(err.to_string()));
            }
            for k in 1..pieces {
                let t = k as f64 / pieces as f64;
                densified.push(Coord {
                    x: a.x + dx * t,
                    y: a.y + dy * t,
                    z: a.z + (b.z - a.z) * t,
                    m: a.m + (b.m - a.m) * t,
                });
            }
        }
        if let Some(last) = self.coords.last() {
            densified.push(*last);
        }
        self.coords = densified;
        Ok(())
    }

    /// Swaps the X and Y components of every position.
    pub fn swap_xy(&mut self) {
        for c in &mut self.coords {
            c.swap_xy();
        }
    }

    /// Bounding rectangle, or `None` when empty.
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_coords(self.coords.iter())
    }

    /// Planar length of the polyline.
    pub fn length(&self) -> f64 {
        self.coords
            .windows(2)
            .map(|pair| {
                let dx = pair[1].x - pair[0].x;
                let dy = pair[1].y - pair[0].y;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    /// Planar area of the implicitly closed ring formed by the coordinates.
    pub fn area(&self) -> f64 {
        shoelace(&self.coords).abs()
    }

    /// Great-circle length in meters, treating the coordinates as lon/lat
    /// degrees on the attached geographic reference system.
    ///
    /// Returns a negative value when no geographic reference system is
    /// attached.
    pub fn geodesic_length(&self) -> f64 {
        match self.srs.as_deref() {
            Some(srs) if srs.is_geographic() => geodesic::line_length(&self.coords, &srs.datum()),
            _ => -1.0,
        }
    }

    /// Spherical area in square meters of the implicitly closed ring.
    ///
    /// Returns a negative value when no geographic reference system is
    /// attached.
    pub fn geodesic_area(&self) -> f64 {
        match self.srs.as_deref() {
            Some(srs) if srs.is_geographic() => geodesic::ring_area(&self.coords, &srs.datum()),
            _ => -1.0,
        }
    }

    /// Applies a coordinate transform in place and takes over its target
    /// spatial reference.
    pub fn transform(&mut self, transform: &dyn CoordTransform) -> Result<(), GeomError> {
        for c in &mut self.coords {
            transform.transform_coord(c)?;
        }
        self.srs = transform.target_srs();
        Ok(())
    }

    /// Spatial reference of the linestring.
    pub fn srs(&self) -> Option<&Arc<SpatialRef>> {
        self.srs.as_ref()
    }

    /// Assigns a spatial reference.
    pub fn assign_spatial_ref(&mut self, srs: Option<Arc<SpatialRef>>) {
        self.srs = srs;
    }
}

impl PartialEq for LineString {
    /// Geometric equality: same dimensionality and pairwise equal
    /// coordinates. The spatial reference is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims
            && self.coords.len() == other.coords.len()
            && self
                .coords
                .iter()
                .zip(&other.coords)
                .all(|(a, b)| a.eq_with_dims(b, self.dims))
    }
}

/// Signed area of the implicitly closed ring over `coords`.
pub(crate) fn shoelace(coords: &[Coord]) -> f64 {
    if coords.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..coords.len() {
        let a = &coords[i];
        let b = &coords[(i + 1) % coords.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}
