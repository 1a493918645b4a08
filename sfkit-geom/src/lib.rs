//! Geometry model for simple-feature data.
//!
//! The crate provides a closed set of geometry types built around the
//! heterogeneous [`GeometryCollection`] container: leaf types ([`Point`],
//! [`LineString`], [`Polygon`]), the specialized collection kinds
//! (multi-point through multi-surface), dimensionality handling for Z and M
//! coordinate components, and aggregate queries (envelope, length, area and
//! their geodesic counterparts).
//!
//! Wire formats live in the companion codec crate; this crate only defines
//! the in-memory model and its algebra.

mod collection;
mod coord;
mod dims;
mod envelope;
pub mod error;
mod geodesic;
mod geometry;
mod line_string;
mod point;
mod polygon;
mod srs;
mod tag;
mod transform;

pub use collection::{CollectionKind, GeometryCollection, MAX_MEMBERS};
pub use coord::Coord;
pub use dims::Dimensions;
pub use envelope::Envelope;
pub use error::{GeomError, Rejected};
pub use geometry::Geometry;
pub use line_string::LineString;
pub use point::Point;
pub use polygon::Polygon;
pub use srs::{Datum, SpatialRef, SrsKind};
pub use tag::GeometryTag;
pub use transform::CoordTransform;
