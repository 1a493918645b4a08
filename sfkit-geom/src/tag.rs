//! Geometry type tags.

use serde::{Deserialize, Serialize};

/// Flat geometry type tag.
///
/// The tag identifies the logical type only; presence of Z and M coordinate
/// components is tracked separately by [`Dimensions`](crate::Dimensions).
/// Collection compatibility checks and codec dispatch both go through this
/// tag, never through concrete member types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryTag {
    /// A single position.
    Point,
    /// A polyline.
    LineString,
    /// A surface bounded by linear rings.
    Polygon,
    /// A collection of points.
    MultiPoint,
    /// A collection of linestrings.
    MultiLineString,
    /// A collection of polygons.
    MultiPolygon,
    /// A collection of arbitrary curves.
    MultiCurve,
    /// A collection of arbitrary surfaces.
    MultiSurface,
    /// A collection of arbitrary geometries.
    GeometryCollection,
}

impl GeometryTag {
    /// Whether the type is a one-dimensional curve type.
    pub fn is_curve(&self) -> bool {
        matches!(self, GeometryTag::LineString)
    }

    /// Whether the type is a two-dimensional surface type.
    pub fn is_surface(&self) -> bool {
        matches!(self, GeometryTag::Polygon)
    }

    /// Whether the type is a container type.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            GeometryTag::MultiPoint
                | GeometryTag::MultiLineString
                | GeometryTag::MultiPolygon
                | GeometryTag::MultiCurve
                | GeometryTag::MultiSurface
                | GeometryTag::GeometryCollection
        )
    }

    /// WKT type name of the geometry type.
    pub fn wkt_name(&self) -> &'static str {
        match self {
            GeometryTag::Point => "POINT",
            GeometryTag::LineString => "LINESTRING",
            GeometryTag::Polygon => "POLYGON",
            GeometryTag::MultiPoint => "MULTIPOINT",
            GeometryTag::MultiLineString => "MULTILINESTRING",
            GeometryTag::MultiPolygon => "MULTIPOLYGON",
            GeometryTag::MultiCurve => "MULTICURVE",
            GeometryTag::MultiSurface => "MULTISURFACE",
            GeometryTag::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}
