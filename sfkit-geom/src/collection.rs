//! Heterogeneous geometry container and its specialized kinds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dims::Dimensions;
use crate::envelope::Envelope;
use crate::error::{GeomError, Rejected};
use crate::geometry::Geometry;
use crate::srs::SpatialRef;
use crate::tag::GeometryTag;
use crate::transform::CoordTransform;

/// Hard cap on the number of direct members of one collection.
///
/// Counts must stay representable in the 32-bit count fields of the binary
/// encodings.
pub const MAX_MEMBERS: usize = i32::MAX as usize;

/// The kind of a [`GeometryCollection`].
///
/// The generic kind accepts any member; the specialized kinds restrict the
/// member types and render with a compact text form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Accepts any geometry, including nested collections.
    GeometryCollection,
    /// Accepts points only.
    MultiPoint,
    /// Accepts linestrings only.
    MultiLineString,
    /// Accepts polygons only.
    MultiPolygon,
    /// Accepts any curve type.
    MultiCurve,
    /// Accepts any surface type.
    MultiSurface,
}

impl CollectionKind {
    /// Type tag a collection of this kind reports.
    pub fn tag(&self) -> GeometryTag {
        match self {
            CollectionKind::GeometryCollection => GeometryTag::GeometryCollection,
            CollectionKind::MultiPoint => GeometryTag::MultiPoint,
            CollectionKind::MultiLineString => GeometryTag::MultiLineString,
            CollectionKind::MultiPolygon => GeometryTag::MultiPolygon,
            CollectionKind::MultiCurve => GeometryTag::MultiCurve,
            CollectionKind::MultiSurface => GeometryTag::MultiSurface,
        }
    }

    /// The kind corresponding to a collection type tag, if the tag names a
    /// collection.
    pub fn from_tag(tag: GeometryTag) -> Option<CollectionKind> {
        match tag {
            GeometryTag::GeometryCollection => Some(CollectionKind::GeometryCollection),
            GeometryTag::MultiPoint => Some(CollectionKind::MultiPoint),
            GeometryTag::MultiLineString => Some(CollectionKind::MultiLineString),
            GeometryTag::MultiPolygon => Some(CollectionKind::MultiPolygon),
            GeometryTag::MultiCurve => Some(CollectionKind::MultiCurve),
            GeometryTag::MultiSurface => Some(CollectionKind::MultiSurface),
            _ => None,
        }
    }

    /// Whether a geometry of the given type may be a direct member of this
    /// collection kind.
    pub fn is_compatible_sub_type(&self, tag: GeometryTag) -> bool {
        match self {
            CollectionKind::GeometryCollection => true,
            CollectionKind::MultiPoint => tag == GeometryTag::Point,
            CollectionKind::MultiLineString => tag == GeometryTag::LineString,
            CollectionKind::MultiPolygon => tag == GeometryTag::Polygon,
            CollectionKind::MultiCurve => tag.is_curve(),
            CollectionKind::MultiSurface => tag.is_surface(),
        }
    }

    /// Member type implied by the compact text form of the kind, if the kind
    /// has one. Members of this type are written without their own type name.
    pub fn implied_member_tag(&self) -> Option<GeometryTag> {
        match self {
            CollectionKind::GeometryCollection => None,
            CollectionKind::MultiPoint => Some(GeometryTag::Point),
            CollectionKind::MultiLineString | CollectionKind::MultiCurve => {
                Some(GeometryTag::LineString)
            }
            CollectionKind::MultiPolygon | CollectionKind::MultiSurface => {
                Some(GeometryTag::Polygon)
            }
        }
    }
}

/// A heterogeneous, ordered container of geometries.
///
/// The collection owns its members and keeps two invariants at all times: the
/// member count never exceeds [`MAX_MEMBERS`], and every member type is
/// compatible with the collection [`CollectionKind`]. On insertion the
/// dimensionality of the member and of the collection are harmonized to their
/// union.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CollectionRepr")]
pub struct GeometryCollection {
    kind: CollectionKind,
    members: Vec<Geometry>,
    dims: Dimensions,
    srs: Option<Arc<SpatialRef>>,
}

/// Serde mirror of [`GeometryCollection`]; re-checks the member
/// compatibility and count invariants on deserialization, which a derived
/// impl on the collection itself would bypass.
#[derive(Deserialize)]
struct CollectionRepr {
    kind: CollectionKind,
    members: Vec<Geometry>,
    dims: Dimensions,
    srs: Option<Arc<SpatialRef>>,
}

impl TryFrom<CollectionRepr> for GeometryCollection {
    type Error = GeomError;

    fn try_from(repr: CollectionRepr) -> Result<Self, Self::Error> {
        if repr.members.len() > MAX_MEMBERS {
            return Err(GeomError::CorruptData(
                "too many members in serialized collection".into(),
            ));
        }
        if let Some(member) = repr
            .members
            .iter()
            .find(|m| !repr.kind.is_compatible_sub_type(m.tag()))
        {
            return Err(GeomError::CorruptData(format!(
                "{} is not a valid member of {}",
                member.tag().wkt_name(),
                repr.kind.tag().wkt_name()
            )));
        }
        Ok(Self {
            kind: repr.kind,
            members: repr.members,
            dims: repr.dims,
            srs: repr.srs,
        })
    }
}

impl GeometryCollection {
    /// Creates an empty collection of the given kind.
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
            dims: Dimensions::XY,
            srs: None,
        }
    }

    /// The kind of the collection.
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Type tag of the collection.
    pub fn tag(&self) -> GeometryTag {
        self.kind.tag()
    }

    /// Dimensionality flags.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection has no members at all.
    ///
    /// Empty members do not make the collection non-empty: a collection of
    /// empty geometries is itself empty.
    pub fn is_empty(&self) -> bool {
        self.members.iter().all(|m| m.is_empty())
    }

    /// The direct members.
    pub fn members(&self) -> &[Geometry] {
        &self.members
    }

    /// The member at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Geometry> {
        self.members.get(index)
    }

    /// Mutable access to the member at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Geometry> {
        self.members.get_mut(index)
    }

    /// Iterator over the direct members.
    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.members.iter()
    }

    /// Mutable iterator over the direct members.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Geometry> {
        self.members.iter_mut()
    }

    /// Appends a copy of the geometry to the collection.
    pub fn add_geometry(&mut self, geometry: &Geometry) -> Result<(), GeomError> {
        self.add_geometry_owned(geometry.clone())
            .map_err(GeomError::from)
    }

    /// Appends the geometry to the collection, taking ownership.
    ///
    /// On failure the geometry is handed back unchanged inside the error, so
    /// a caller that wants to keep it can.
    pub fn add_geometry_owned(&mut self, mut geometry: Geometry) -> Result<(), Rejected<Geometry>> {
        if !self.kind.is_compatible_sub_type(geometry.tag()) {
            return Err(Rejected::new(geometry, GeomError::UnsupportedType));
        }
        if self.members.len() >= MAX_MEMBERS {
            return Err(Rejected::new(
                geometry,
                GeomError::OutOfMemory("too many members in collection".into()),
            ));
        }
        if let Err(err) = self.members.try_reserve(1) {
            return Err(Rejected::new(geometry, GeomError::OutOfMemory(err.to_string())));
        }

        self.homogenize_with(&mut geometry);
        self.members.push(geometry);
        Ok(())
    }

    /// Promotes either side so both carry the union of the dimensionality
    /// flags.
    fn homogenize_with(&mut self, geometry: &mut Geometry) {
        let member_dims = geometry.dims();
        if self.dims.z && !member_dims.z {
            geometry.set_3d(true);
        }
        if member_dims.z && !self.dims.z {
            self.set_3d(true);
        }
        if self.dims.m && !member_dims.m {
            geometry.set_measured(true);
        }
        if member_dims.m && !self.dims.m {
            self.set_measured(true);
        }
    }

    /// Removes and drops the member at `index`.
    pub fn remove_geometry(&mut self, index: usize) -> Result<(), GeomError> {
        if index >= self.members.len() {
            return Err(GeomError::Generic(format!(
                "no member at index {index} to remove"
            )));
        }
        self.members.remove(index);
        Ok(())
    }

    /// Removes the member at `index` and returns it to the caller.
    pub fn steal_geometry(&mut self, index: usize) -> Option<Geometry> {
        if index < self.members.len() {
            Some(self.members.remove(index))
        } else {
            None
        }
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Whether any member, at any nesting depth, is empty.
    pub fn has_empty_parts(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.is_empty() || m.has_empty_parts())
    }

    /// Recursively removes empty members. Nested collections are pruned
    /// first, so a collection that becomes empty by pruning is removed too.
    pub fn remove_empty_parts(&mut self) {
        self.members.retain_mut(|m| {
            m.remove_empty_parts();
            !m.is_empty()
        });
    }

    /// Converts the collection to another kind.
    ///
    /// Succeeds only when every member is compatible with the target kind; on
    /// failure the collection is handed back unchanged inside the error.
    pub fn try_cast(self, kind: CollectionKind) -> Result<Self, Rejected<Self>> {
        if self
            .members
            .iter()
            .any(|m| !kind.is_compatible_sub_type(m.tag()))
        {
            return Err(Rejected::new(self, GeomError::UnsupportedType));
        }
        Ok(Self { kind, ..self })
    }

    /// Adds or removes the Z component on the collection and every member.
    pub fn set_3d(&mut self, enabled: bool) {
        for member in &mut self.members {
            member.set_3d(enabled);
        }
        self.dims.z = enabled;
    }

    /// Adds or removes the M component on the collection and every member.
    pub fn set_measured(&mut self, enabled: bool) {
        for member in &mut self.members {
            member.set_measured(enabled);
        }
        self.dims.m = enabled;
    }

    /// Drops both the Z and M components.
    pub fn flatten_to_2d(&mut self) {
        self.set_3d(false);
        self.set_measured(false);
    }

    /// Densifies every member so that no segment is longer than
    /// `max_length`. Stops at the first member that fails.
    pub fn segmentize(&mut self, max_length: f64) -> Result<(), GeomError> {
        for member in &mut self.members {
            member.segmentize(max_length)?;
        }
        Ok(())
    }

    /// Swaps the X and Y components of every position, recursively.
    pub fn swap_xy(&mut self) {
        for member in &mut self.members {
            member.swap_xy();
        }
    }

    /// Topological dimension: the maximum over the members, zero when there
    /// are none.
    pub fn dimension(&self) -> u8 {
        self.members
            .iter()
            .map(|m| m.dimension())
            .max()
            .unwrap_or(0)
    }

    /// Bounding rectangle over the non-empty members. A collection with no
    /// positions gets the zero envelope.
    pub fn envelope(&self) -> Envelope {
        let mut env: Option<Envelope> = None;
        for member in &self.members {
            if member.is_empty() {
                continue;
            }
            env = match (env, member.envelope()) {
                (Some(acc), Some(e)) => Some(acc.merge(e)),
                (None, e) => e,
                (acc, None) => acc,
            };
        }
        env.unwrap_or_default()
    }

    /// Planar length: the sum over all members that have a length measure,
    /// including surface boundaries and nested collections.
    pub fn length(&self) -> f64 {
        self.members
            .iter()
            .filter(|m| {
                let tag = m.tag();
                tag.is_curve() || tag.is_surface() || tag.is_collection()
            })
            .map(|m| m.length())
            .sum()
    }

    /// Planar area: the sum over surface members and curve members, the
    /// latter taken as implicitly closed rings.
    ///
    /// Only collection kinds that can hold surfaces are recursed into;
    /// nested multi-points and multi-curves contribute nothing.
    pub fn area(&self) -> f64 {
        let mut total = 0.0;
        for member in &self.members {
            match member {
                Geometry::Polygon(polygon) => total += polygon.area(),
                Geometry::LineString(line) => total += line.area(),
                Geometry::Collection(collection) if collection.can_hold_surfaces() => {
                    total += collection.area();
                }
                _ => {}
            }
        }
        total
    }

    /// Great-circle length in meters over all members with a length measure.
    ///
    /// The first member that cannot compute its geodesic length (no
    /// geographic reference system attached) makes the whole result negative.
    pub fn geodesic_length(&self) -> f64 {
        let mut total = 0.0;
        for member in &self.members {
            let tag = member.tag();
            if !(tag.is_curve() || tag.is_surface() || tag.is_collection()) {
                continue;
            }
            let length = member.geodesic_length();
            if length < 0.0 {
                return length;
            }
            total += length;
        }
        total
    }

    /// Spherical area in square meters, summed over surface members, curve
    /// members taken as implicitly closed rings, and every nested collection.
    ///
    /// Unlike [`GeometryCollection::area`] this recurses into all collection
    /// kinds, so the sentinel of a deeply nested member is never lost. The
    /// first member that cannot compute its geodesic area makes the whole
    /// result negative.
    pub fn geodesic_area(&self) -> f64 {
        let mut total = 0.0;
        for member in &self.members {
            let area = match member {
                Geometry::Polygon(polygon) => polygon.geodesic_area(),
                Geometry::LineString(line) => line.geodesic_area(),
                Geometry::Collection(collection) => collection.geodesic_area(),
                Geometry::Point(_) => continue,
            };
            if area < 0.0 {
                return area;
            }
            total += area;
        }
        total
    }

    fn can_hold_surfaces(&self) -> bool {
        matches!(
            self.kind,
            CollectionKind::MultiPolygon
                | CollectionKind::MultiSurface
                | CollectionKind::GeometryCollection
        )
    }

    /// Applies a coordinate transform to every member.
    ///
    /// If a member past the first fails, earlier members are already
    /// transformed and the error is reported as
    /// [`GeomError::PartialTransform`]; a failure on the first member
    /// propagates the member's own error since nothing was changed yet.
    pub fn transform(&mut self, transform: &dyn CoordTransform) -> Result<(), GeomError> {
        for (i, member) in self.members.iter_mut().enumerate() {
            if let Err(err) = member.transform(transform) {
                if i == 0 {
                    return Err(err);
                }
                log::warn!("transform failed after {i} members were already transformed: {err}");
                return Err(GeomError::PartialTransform);
            }
        }
        self.srs = transform.target_srs();
        Ok(())
    }

    /// Spatial reference of the collection.
    pub fn srs(&self) -> Option<&Arc<SpatialRef>> {
        self.srs.as_ref()
    }

    /// Assigns a spatial reference to the collection and every member.
    pub fn assign_spatial_ref(&mut self, srs: Option<Arc<SpatialRef>>) {
        for member in &mut self.members {
            member.assign_spatial_ref(srs.clone());
        }
        self.srs = srs;
    }
}

impl PartialEq for GeometryCollection {
    /// Geometric equality: same kind, same dimensionality, then members
    /// compared pairwise in order. Two empty collections of the same kind are
    /// equal regardless of member layout. The spatial reference is not
    /// compared.
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.dims != other.dims {
            return false;
        }
        if self.is_empty() && other.is_empty() {
            return true;
        }
        self.members.len() == other.members.len() && self.members == other.members
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::coord::Coord;
    use crate::line_string::LineString;
    use crate::point::Point;
    use crate::polygon::Polygon;

    fn multi_point(coords: &[(f64, f64)]) -> GeometryCollection {
        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        for &(x, y) in coords {
            collection
                .add_geometry_owned(Point::xy(x, y).into())
                .map_err(|r| r.into_error())
                .unwrap();
        }
        collection
    }

    #[test]
    fn incompatible_member_is_handed_back() {
        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        let line: Geometry = LineString::new(
            vec![Coord::xy(0.0, 0.0), Coord::xy(1.0, 1.0)],
            Dimensions::XY,
        )
        .into();

        let rejected = collection.add_geometry_owned(line).unwrap_err();
        assert_matches!(rejected.error, GeomError::UnsupportedType);
        assert_eq!(rejected.value.tag(), GeometryTag::LineString);
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn insertion_harmonizes_dimensionality_both_ways() {
        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        collection
            .add_geometry_owned(Point::xy(0.0, 0.0).into())
            .map_err(|r| r.into_error())
            .unwrap();
        collection
            .add_geometry_owned(Point::xyz(1.0, 1.0, 5.0).into())
            .map_err(|r| r.into_error())
            .unwrap();

        assert!(collection.dims().z);
        assert!(collection.members()[0].dims().z);

        collection
            .add_geometry_owned(Point::xy(2.0, 2.0).into())
            .map_err(|r| r.into_error())
            .unwrap();
        assert!(collection.members()[2].dims().z);
    }

    #[test]
    fn steal_returns_the_member() {
        let mut collection = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        let stolen = collection.steal_geometry(0).unwrap();
        assert_eq!(stolen, Point::xy(0.0, 0.0).into());
        assert_eq!(collection.len(), 1);
        assert!(collection.steal_geometry(5).is_none());
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let mut collection = multi_point(&[(0.0, 0.0)]);
        assert_matches!(collection.remove_geometry(3), Err(GeomError::Generic(_)));
        collection.remove_geometry(0).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn empty_parts_are_pruned_recursively() {
        let mut inner = GeometryCollection::new(CollectionKind::GeometryCollection);
        inner
            .add_geometry_owned(Point::empty().into())
            .map_err(|r| r.into_error())
            .unwrap();

        let mut outer = GeometryCollection::new(CollectionKind::GeometryCollection);
        outer
            .add_geometry_owned(inner.into())
            .map_err(|r| r.into_error())
            .unwrap();
        outer
            .add_geometry_owned(Point::xy(1.0, 2.0).into())
            .map_err(|r| r.into_error())
            .unwrap();

        assert!(outer.has_empty_parts());
        outer.remove_empty_parts();
        assert_eq!(outer.len(), 1);
        assert!(!outer.has_empty_parts());
    }

    #[test]
    fn try_cast_checks_every_member() {
        let collection = multi_point(&[(0.0, 0.0)]);
        let generic = collection
            .try_cast(CollectionKind::GeometryCollection)
            .map_err(|r| r.into_error())
            .unwrap();
        assert_eq!(generic.tag(), GeometryTag::GeometryCollection);

        let rejected = generic.try_cast(CollectionKind::MultiLineString).unwrap_err();
        assert_matches!(rejected.error, GeomError::UnsupportedType);
        assert_eq!(rejected.value.len(), 1);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        let b = multi_point(&[(1.0, 1.0), (0.0, 0.0)]);
        assert_ne!(a, b);
        assert_eq!(a, multi_point(&[(0.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn collections_of_empty_members_are_empty() {
        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        collection
            .add_geometry_owned(Point::empty().into())
            .map_err(|r| r.into_error())
            .unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.envelope(), Envelope::default());
    }

    #[test]
    fn transform_errors_tell_whether_anything_changed() {
        struct Failing {
            allow: std::cell::Cell<usize>,
        }
        impl CoordTransform for Failing {
            fn transform_coord(&self, coord: &mut Coord) -> Result<(), GeomError> {
                if self.allow.get() == 0 {
                    return Err(GeomError::Generic("projection failed".into()));
                }
                self.allow.set(self.allow.get() - 1);
                coord.x += 1.0;
                Ok(())
            }
        }

        // Failing on the first member: nothing was transformed, the member's
        // own error comes through.
        let mut collection = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        let err = collection
            .transform(&Failing {
                allow: std::cell::Cell::new(0),
            })
            .unwrap_err();
        assert_matches!(err, GeomError::Generic(_));

        // Failing later: the collection is in a mixed state.
        let mut collection = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        let err = collection
            .transform(&Failing {
                allow: std::cell::Cell::new(1),
            })
            .unwrap_err();
        assert_matches!(err, GeomError::PartialTransform);
    }

    #[test]
    fn aggregate_member_dispatch() {
        let square = Polygon::new(
            vec![LineString::new(
                vec![
                    Coord::xy(0.0, 0.0),
                    Coord::xy(2.0, 0.0),
                    Coord::xy(2.0, 2.0),
                    Coord::xy(0.0, 2.0),
                ],
                Dimensions::XY,
            )],
            Dimensions::XY,
        );
        // An open unit ring: length 3, implicitly-closed area 1.
        let ring = LineString::new(
            vec![
                Coord::xy(0.0, 0.0),
                Coord::xy(1.0, 0.0),
                Coord::xy(1.0, 1.0),
                Coord::xy(0.0, 1.0),
            ],
            Dimensions::XY,
        );

        let mut collection = GeometryCollection::new(CollectionKind::GeometryCollection);
        collection
            .add_geometry_owned(square.into())
            .map_err(|r| r.into_error())
            .unwrap();
        collection
            .add_geometry_owned(ring.into())
            .map_err(|r| r.into_error())
            .unwrap();
        // A nested multi-point contributes to neither measure.
        collection
            .add_geometry_owned(multi_point(&[(9.0, 9.0)]).into())
            .map_err(|r| r.into_error())
            .unwrap();

        assert_eq!(collection.area(), 5.0);
        assert_eq!(collection.length(), 11.0);
    }

    #[test]
    fn geodesic_area_recurses_into_every_collection_kind() {
        // A 0.1 x 0.1 degree cell at the equator, about 123.6 km^2.
        let ring = LineString::new(
            vec![
                Coord::xy(0.0, 0.0),
                Coord::xy(0.1, 0.0),
                Coord::xy(0.1, 0.1),
                Coord::xy(0.0, 0.1),
            ],
            Dimensions::XY,
        );
        let mut lines = GeometryCollection::new(CollectionKind::MultiLineString);
        lines
            .add_geometry_owned(ring.into())
            .map_err(|r| r.into_error())
            .unwrap();

        let mut outer = GeometryCollection::new(CollectionKind::GeometryCollection);
        outer
            .add_geometry_owned(lines.into())
            .map_err(|r| r.into_error())
            .unwrap();

        // Without a geographic reference system the nested member's sentinel
        // must come through, not be silently dropped.
        assert!(outer.geodesic_area() < 0.0);

        outer.assign_spatial_ref(Some(Arc::new(SpatialRef::WGS84)));
        assert_relative_eq!(outer.geodesic_area(), 123.6e6, max_relative = 0.01);
    }

    #[test]
    fn segmentize_and_swap_reach_nested_members() {
        let mut inner = GeometryCollection::new(CollectionKind::MultiLineString);
        inner
            .add_geometry_owned(
                LineString::new(vec![Coord::xy(0.0, 0.0), Coord::xy(4.0, 0.0)], Dimensions::XY)
                    .into(),
            )
            .map_err(|r| r.into_error())
            .unwrap();

        let mut outer = GeometryCollection::new(CollectionKind::GeometryCollection);
        outer
            .add_geometry_owned(inner.into())
            .map_err(|r| r.into_error())
            .unwrap();

        outer.segmentize(1.0).unwrap();
        let line = outer.members()[0]
            .as_collection()
            .and_then(|c| c.get(0))
            .unwrap();
        assert_eq!(
            line,
            &LineString::new(
                vec![
                    Coord::xy(0.0, 0.0),
                    Coord::xy(1.0, 0.0),
                    Coord::xy(2.0, 0.0),
                    Coord::xy(3.0, 0.0),
                    Coord::xy(4.0, 0.0),
                ],
                Dimensions::XY,
            )
            .into()
        );

        outer.swap_xy();
        let line = outer.members()[0]
            .as_collection()
            .and_then(|c| c.get(0))
            .unwrap();
        assert_eq!(line.envelope(), Some(Envelope::new(0.0, 0.0, 0.0, 4.0)));

        assert_matches!(outer.segmentize(0.0), Err(GeomError::Generic(_)));
    }

    #[test]
    fn set_3d_promotes_already_present_members() {
        let mut collection = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!collection.dims().z);

        collection.set_3d(true);
        assert!(collection.dims().z);
        assert!(collection.members().iter().all(|m| m.dims().z));

        collection.set_3d(false);
        assert!(collection.members().iter().all(|m| !m.dims().z));
    }

    #[test]
    fn clear_removes_every_member() {
        let mut collection = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        collection.clear();
        assert_eq!(collection.len(), 0);
        assert!(collection.is_empty());

        // Clearing an already-empty collection stays a no-op.
        collection.clear();
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn deserialization_rechecks_member_compatibility() {
        let mut generic = GeometryCollection::new(CollectionKind::GeometryCollection);
        generic
            .add_geometry_owned(
                LineString::new(vec![Coord::xy(0.0, 0.0), Coord::xy(1.0, 1.0)], Dimensions::XY)
                    .into(),
            )
            .map_err(|r| r.into_error())
            .unwrap();

        let mut value = serde_json::to_value(&generic).unwrap();
        let roundtripped: GeometryCollection = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(roundtripped, generic);

        // Relabeling the kind makes the serialized members incompatible.
        value["kind"] = serde_json::json!("MultiPoint");
        let err = serde_json::from_value::<GeometryCollection>(value).unwrap_err();
        assert!(err.to_string().contains("LINESTRING"));
    }
}
