//! The closed geometry variant set.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::{CollectionKind, GeometryCollection};
use crate::dims::Dimensions;
use crate::envelope::Envelope;
use crate::error::GeomError;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::srs::SpatialRef;
use crate::tag::GeometryTag;
use crate::transform::CoordTransform;

/// Any geometry of the closed variant set.
///
/// All capability methods dispatch on the variant; callers never need to
/// inspect concrete member types except through [`Geometry::tag`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    /// A single position.
    Point(Point),
    /// A polyline.
    LineString(LineString),
    /// A surface bounded by rings.
    Polygon(Polygon),
    /// A container of other geometries, of any [`CollectionKind`].
    Collection(GeometryCollection),
}

impl Geometry {
    /// Creates an empty geometry of the given type. This is the factory
    /// entry point used by the decoders.
    pub fn create(tag: GeometryTag) -> Geometry {
        match tag {
            GeometryTag::Point => Point::empty().into(),
            GeometryTag::LineString => LineString::empty().into(),
            GeometryTag::Polygon => Polygon::empty().into(),
            GeometryTag::MultiPoint => GeometryCollection::new(CollectionKind::MultiPoint).into(),
            GeometryTag::MultiLineString => {
                GeometryCollection::new(CollectionKind::MultiLineString).into()
            }
            GeometryTag::MultiPolygon => {
                GeometryCollection::new(CollectionKind::MultiPolygon).into()
            }
            GeometryTag::MultiCurve => GeometryCollection::new(CollectionKind::MultiCurve).into(),
            GeometryTag::MultiSurface => {
                GeometryCollection::new(CollectionKind::MultiSurface).into()
            }
            GeometryTag::GeometryCollection => {
                GeometryCollection::new(CollectionKind::GeometryCollection).into()
            }
        }
    }

    /// Type tag of the geometry.
    pub fn tag(&self) -> GeometryTag {
        match self {
            Geometry::Point(g) => g.tag(),
            Geometry::LineString(g) => g.tag(),
            Geometry::Polygon(g) => g.tag(),
            Geometry::Collection(g) => g.tag(),
        }
    }

    /// Dimensionality flags.
    pub fn dims(&self) -> Dimensions {
        match self {
            Geometry::Point(g) => g.dims(),
            Geometry::LineString(g) => g.dims(),
            Geometry::Polygon(g) => g.dims(),
            Geometry::Collection(g) => g.dims(),
        }
    }

    /// Whether the geometry contains no positions.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::Collection(g) => g.is_empty(),
        }
    }

    /// Topological dimension of the geometry: 0 for points, 1 for curves,
    /// 2 for surfaces; for collections, the maximum over members.
    pub fn dimension(&self) -> u8 {
        match self {
            Geometry::Point(_) => 0,
            Geometry::LineString(_) => 1,
            Geometry::Polygon(_) => 2,
            Geometry::Collection(g) => g.dimension(),
        }
    }

    /// Adds or removes the Z component, recursively for collections.
    pub fn set_3d(&mut self, enabled: bool) {
        match self {
            Geometry::Point(g) => g.set_3d(enabled),
            Geometry::LineString(g) => g.set_3d(enabled),
            Geometry::Polygon(g) => g.set_3d(enabled),
            Geometry::Collection(g) => g.set_3d(enabled),
        }
    }

    /// Adds or removes the M component, recursively for collections.
    pub fn set_measured(&mut self, enabled: bool) {
        match self {
            Geometry::Point(g) => g.set_measured(enabled),
            Geometry::LineString(g) => g.set_measured(enabled),
            Geometry::Polygon(g) => g.set_measured(enabled),
            Geometry::Collection(g) => g.set_measured(enabled),
        }
    }

    /// Drops both the Z and M components.
    pub fn flatten_to_2d(&mut self) {
        self.set_3d(false);
        self.set_measured(false);
    }

    /// Densifies curves so that no segment is longer than `max_length`.
    /// A no-op for points.
    pub fn segmentize(&mut self, max_length: f64) -> Result<(), GeomError> {
        match self {
            Geometry::Point(_) => Ok(()),
            Geometry::LineString(g) => g.segmentize(max_length),
            Geometry::Polygon(g) => g.segmentize(max_length),
            Geometry::Collection(g) => g.segmentize(max_length),
        }
    }

    /// Swaps the X and Y components of every position, recursively.
    pub fn swap_xy(&mut self) {
        match self {
            Geometry::Point(g) => g.swap_xy(),
            Geometry::LineString(g) => g.swap_xy(),
            Geometry::Polygon(g) => g.swap_xy(),
            Geometry::Collection(g) => g.swap_xy(),
        }
    }

    /// Bounding rectangle, or `None` when the geometry is empty.
    pub fn envelope(&self) -> Option<Envelope> {
        match self {
            Geometry::Point(g) => g.envelope(),
            Geometry::LineString(g) => g.envelope(),
            Geometry::Polygon(g) => g.envelope(),
            Geometry::Collection(g) => {
                if g.is_empty() {
                    None
                } else {
                    Some(g.envelope())
                }
            }
        }
    }

    /// Planar length. Zero for geometries with no length measure.
    pub fn length(&self) -> f64 {
        match self {
            Geometry::Point(_) => 0.0,
            Geometry::LineString(g) => g.length(),
            Geometry::Polygon(g) => g.length(),
            Geometry::Collection(g) => g.length(),
        }
    }

    /// Planar area. Zero for geometries with no area measure.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Point(_) => 0.0,
            Geometry::LineString(g) => g.area(),
            Geometry::Polygon(g) => g.area(),
            Geometry::Collection(g) => g.area(),
        }
    }

    /// Great-circle length in meters; negative when the computation is not
    /// possible (see [`LineString::geodesic_length`]).
    pub fn geodesic_length(&self) -> f64 {
        match self {
            Geometry::Point(_) => 0.0,
            Geometry::LineString(g) => g.geodesic_length(),
            Geometry::Polygon(g) => g.geodesic_length(),
            Geometry::Collection(g) => g.geodesic_length(),
        }
    }

    /// Spherical area in square meters; negative when the computation is not
    /// possible.
    pub fn geodesic_area(&self) -> f64 {
        match self {
            Geometry::Point(_) => 0.0,
            Geometry::LineString(g) => g.geodesic_area(),
            Geometry::Polygon(g) => g.geodesic_area(),
            Geometry::Collection(g) => g.geodesic_area(),
        }
    }

    /// Whether the geometry or any nested part is empty.
    pub fn has_empty_parts(&self) -> bool {
        match self {
            Geometry::Collection(g) => g.has_empty_parts(),
            _ => false,
        }
    }

    /// Recursively prunes empty parts from nested collections.
    pub fn remove_empty_parts(&mut self) {
        if let Geometry::Collection(g) = self {
            g.remove_empty_parts();
        }
    }

    /// Applies a coordinate transform in place.
    pub fn transform(&mut self, transform: &dyn CoordTransform) -> Result<(), GeomError> {
        match self {
            Geometry::Point(g) => g.transform(transform),
            Geometry::LineString(g) => g.transform(transform),
            Geometry::Polygon(g) => g.transform(transform),
            Geometry::Collection(g) => g.transform(transform),
        }
    }

    /// Spatial reference of the geometry.
    pub fn srs(&self) -> Option<&Arc<SpatialRef>> {
        match self {
            Geometry::Point(g) => g.srs(),
            Geometry::LineString(g) => g.srs(),
            Geometry::Polygon(g) => g.srs(),
            Geometry::Collection(g) => g.srs(),
        }
    }

    /// Assigns a spatial reference, recursively for collections.
    pub fn assign_spatial_ref(&mut self, srs: Option<Arc<SpatialRef>>) {
        match self {
            Geometry::Point(g) => g.assign_spatial_ref(srs),
            Geometry::LineString(g) => g.assign_spatial_ref(srs),
            Geometry::Polygon(g) => g.assign_spatial_ref(srs),
            Geometry::Collection(g) => g.assign_spatial_ref(srs),
        }
    }

    /// The contained collection, if the geometry is a collection.
    pub fn as_collection(&self) -> Option<&GeometryCollection> {
        match self {
            Geometry::Collection(g) => Some(g),
            _ => None,
        }
    }

    /// Mutable access to the contained collection.
    pub fn as_collection_mut(&mut self) -> Option<&mut GeometryCollection> {
        match self {
            Geometry::Collection(g) => Some(g),
            _ => None,
        }
    }
}

impl PartialEq for Geometry {
    /// Geometric equality; order-sensitive for collections.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a == b,
            (Geometry::LineString(a), Geometry::LineString(b)) => a == b,
            (Geometry::Polygon(a), Geometry::Polygon(b)) => a == b,
            (Geometry::Collection(a), Geometry::Collection(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::Collection(value)
    }
}
