//! Well-Known Text codec.
//!
//! Grammar: `TYPENAME [Z|M|ZM] (member, member, ...)` or
//! `TYPENAME [Z|M|ZM] EMPTY`. Members of the specialized collection kinds
//! are written without their redundant type names.

mod reader;
mod token;
mod writer;

pub use reader::{read_collection_into, read_geometry};
pub use writer::write_geometry;

/// Dialect of the text output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WktVariant {
    /// ISO SQL/MM text: dimensionality marked with `Z`/`M`/`ZM` after the
    /// type name.
    #[default]
    Iso,
    /// Pre-ISO text: no dimensionality markers; 3D is implied by the tuple
    /// width and measures are not representable.
    OldOgc,
}

/// Encoder options.
#[derive(Debug, Copy, Clone, Default)]
pub struct WktOptions {
    /// Dialect of the output.
    pub variant: WktVariant,
}

#[cfg(test)]
mod tests {
    use sfkit_geom::{
        CollectionKind, Coord, Dimensions, Geometry, GeometryCollection, LineString, Point,
        Polygon,
    };

    use super::*;

    fn nested_sample() -> Geometry {
        let mut inner = GeometryCollection::new(CollectionKind::MultiLineString);
        inner
            .add_geometry_owned(
                LineString::new(
                    vec![Coord::xy(0.0, 0.0), Coord::xy(1.0, 1.0)],
                    Dimensions::XY,
                )
                .into(),
            )
            .map_err(|r| r.into_error())
            .unwrap();

        let mut outer = GeometryCollection::new(CollectionKind::GeometryCollection);
        outer
            .add_geometry_owned(Point::xy(5.0, 6.0).into())
            .map_err(|r| r.into_error())
            .unwrap();
        outer
            .add_geometry_owned(inner.into())
            .map_err(|r| r.into_error())
            .unwrap();
        outer
            .add_geometry_owned(
                Polygon::new(
                    vec![LineString::new(
                        vec![
                            Coord::xy(0.0, 0.0),
                            Coord::xy(2.0, 0.0),
                            Coord::xy(2.0, 2.0),
                        ],
                        Dimensions::XY,
                    )],
                    Dimensions::XY,
                )
                .into(),
            )
            .map_err(|r| r.into_error())
            .unwrap();
        outer.into()
    }

    #[test]
    fn round_trip_nested_collection() {
        let geometry = nested_sample();
        let wkt = write_geometry(&geometry, &WktOptions::default()).unwrap();
        let (decoded, rest) = read_geometry(&wkt).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decoded, geometry);
    }

    #[test]
    fn round_trip_dimensional_variants() {
        for dims in [Dimensions::XYZ, Dimensions::XYM, Dimensions::XYZM] {
            let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
            collection
                .add_geometry_owned(
                    Point::new(Coord::xyzm(1.0, 2.0, 3.0, 4.0), dims).into(),
                )
                .map_err(|r| r.into_error())
                .unwrap();
            let geometry: Geometry = collection.into();

            let wkt = write_geometry(&geometry, &WktOptions::default()).unwrap();
            let (decoded, _) = read_geometry(&wkt).unwrap();
            assert_eq!(decoded, geometry, "{wkt}");
        }
    }

    #[test]
    fn round_trip_empty_collections() {
        for kind in [
            CollectionKind::GeometryCollection,
            CollectionKind::MultiPoint,
            CollectionKind::MultiSurface,
        ] {
            let geometry: Geometry = GeometryCollection::new(kind).into();
            let wkt = write_geometry(&geometry, &WktOptions::default()).unwrap();
            let (decoded, _) = read_geometry(&wkt).unwrap();
            assert_eq!(decoded, geometry, "{wkt}");
        }
    }
}
