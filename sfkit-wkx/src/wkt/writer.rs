//! WKT encoding.

use sfkit_geom::{
    Coord, Dimensions, GeomError, Geometry, GeometryCollection, GeometryTag, LineString, Point,
    Polygon,
};

use super::{WktOptions, WktVariant};

/// Encodes the geometry as WKT.
pub fn write_geometry(geometry: &Geometry, options: &WktOptions) -> Result<String, GeomError> {
    write_any(geometry, options.variant)
}

fn write_any(geometry: &Geometry, variant: WktVariant) -> Result<String, GeomError> {
    match geometry {
        Geometry::Point(point) => write_point(point, variant),
        Geometry::LineString(line) => write_line_string(line, variant),
        Geometry::Polygon(polygon) => write_polygon(polygon, variant),
        Geometry::Collection(collection) => write_collection(collection, variant),
    }
}

fn write_collection(
    collection: &GeometryCollection,
    variant: WktVariant,
) -> Result<String, GeomError> {
    let mut parts = Vec::new();
    let exclude = collection
        .kind()
        .implied_member_tag()
        .map(|tag| tag.wkt_name());

    for member in collection.iter() {
        let mut text = write_any(member, variant)?;

        // A member of the kind's implied type is written without its
        // redundant type name; if it has no body to keep, it is dropped.
        if let Some(exclude) = exclude {
            if text.starts_with(exclude) {
                match text.find('(') {
                    Some(index) => text.replace_range(..index, ""),
                    None => continue,
                }
            }
        }
        if variant != WktVariant::Iso {
            strip_dim_markers(&mut text);
        }

        parts.push(text);
    }

    let mut out = header(collection.tag(), collection.dims(), variant)?;
    if parts.is_empty() {
        append(&mut out, " EMPTY")?;
        return Ok(out);
    }

    append(&mut out, " (")?;
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            append(&mut out, ",")?;
        }
        append(&mut out, part)?;
    }
    append(&mut out, ")")?;
    Ok(out)
}

fn write_point(point: &Point, variant: WktVariant) -> Result<String, GeomError> {
    let mut out = header(GeometryTag::Point, point.dims(), variant)?;
    match point.coord() {
        None => append(&mut out, " EMPTY")?,
        Some(coord) => {
            append(&mut out, " (")?;
            append(&mut out, &format_coord(&coord, point.dims()))?;
            append(&mut out, ")")?;
        }
    }
    Ok(out)
}

fn write_line_string(line: &LineString, variant: WktVariant) -> Result<String, GeomError> {
    let mut out = header(GeometryTag::LineString, line.dims(), variant)?;
    if line.is_empty() {
        append(&mut out, " EMPTY")?;
        return Ok(out);
    }
    append(&mut out, " ")?;
    append_coord_list(&mut out, line.coords(), line.dims())?;
    Ok(out)
}

fn write_polygon(polygon: &Polygon, variant: WktVariant) -> Result<String, GeomError> {
    let mut out = header(GeometryTag::Polygon, polygon.dims(), variant)?;
    if polygon.is_empty() {
        append(&mut out, " EMPTY")?;
        return Ok(out);
    }
    append(&mut out, " (")?;
    for (index, ring) in polygon.rings().iter().enumerate() {
        if index > 0 {
            append(&mut out, ",")?;
        }
        append_coord_list(&mut out, ring.coords(), polygon.dims())?;
    }
    append(&mut out, ")")?;
    Ok(out)
}

fn header(tag: GeometryTag, dims: Dimensions, variant: WktVariant) -> Result<String, GeomError> {
    let mut out = String::new();
    append(&mut out, tag.wkt_name())?;
    if variant == WktVariant::Iso {
        match (dims.z, dims.m) {
            (true, true) => append(&mut out, " ZM")?,
            (true, false) => append(&mut out, " Z")?,
            (false, true) => append(&mut out, " M")?,
            (false, false) => {}
        }
    }
    Ok(out)
}

fn append_coord_list(
    out: &mut String,
    coords: &[Coord],
    dims: Dimensions,
) -> Result<(), GeomError> {
    append(out, "(")?;
    for (index, coord) in coords.iter().enumerate() {
        if index > 0 {
            append(out, ",")?;
        }
        append(out, &format_coord(coord, dims))?;
    }
    append(out, ")")
}

fn format_coord(coord: &Coord, dims: Dimensions) -> String {
    let mut text = format!("{} {}", coord.x, coord.y);
    if dims.z {
        text.push_str(&format!(" {}", coord.z));
    }
    if dims.m {
        text.push_str(&format!(" {}", coord.m));
    }
    text
}

/// Removes the first occurrence of each ISO dimensionality marker from an
/// already-rendered member.
fn strip_dim_markers(text: &mut String) {
    for marker in [" Z ", " M ", " ZM "] {
        if let Some(index) = text.find(marker) {
            text.replace_range(index..index + marker.len(), " ");
        }
    }
}

fn append(out: &mut String, text: &str) -> Result<(), GeomError> {
    out.try_reserve(text.len())
        .map_err(|err| GeomError::OutOfMemory(err.to_string()))?;
    out.push_str(text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use sfkit_geom::CollectionKind;

    use super::*;

    fn options(variant: WktVariant) -> WktOptions {
        WktOptions { variant }
    }

    fn multi_point(coords: &[(f64, f64)]) -> Geometry {
        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        for &(x, y) in coords {
            collection
                .add_geometry_owned(Point::xy(x, y).into())
                .map_err(|r| r.into_error())
                .unwrap();
        }
        collection.into()
    }

    #[test]
    fn empty_multi_point_is_exact() {
        let geometry = multi_point(&[]);
        assert_eq!(
            write_geometry(&geometry, &WktOptions::default()).unwrap(),
            "MULTIPOINT EMPTY"
        );
    }

    #[test]
    fn inner_type_names_are_excluded() {
        let geometry = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(
            write_geometry(&geometry, &WktOptions::default()).unwrap(),
            "MULTIPOINT ((0 0),(1 1))"
        );
    }

    #[test]
    fn generic_collection_keeps_member_names() {
        let mut collection = GeometryCollection::new(CollectionKind::GeometryCollection);
        collection
            .add_geometry_owned(Point::xy(1.0, 2.0).into())
            .map_err(|r| r.into_error())
            .unwrap();
        collection
            .add_geometry_owned(
                LineString::new(
                    vec![Coord::xy(0.0, 0.0), Coord::xy(1.0, 1.0)],
                    Dimensions::XY,
                )
                .into(),
            )
            .map_err(|r| r.into_error())
            .unwrap();

        assert_eq!(
            write_geometry(&collection.into(), &WktOptions::default()).unwrap(),
            "GEOMETRYCOLLECTION (POINT (1 2),LINESTRING (0 0,1 1))"
        );
    }

    #[test]
    fn iso_marks_dimensionality() {
        let geometry: Geometry = Point::xyz(1.0, 2.0, 3.0).into();
        assert_eq!(
            write_geometry(&geometry, &options(WktVariant::Iso)).unwrap(),
            "POINT Z (1 2 3)"
        );
        assert_eq!(
            write_geometry(&geometry, &options(WktVariant::OldOgc)).unwrap(),
            "POINT (1 2 3)"
        );
    }

    #[test]
    fn excluded_empty_member_is_skipped() {
        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        collection
            .add_geometry_owned(Point::empty().into())
            .map_err(|r| r.into_error())
            .unwrap();
        collection
            .add_geometry_owned(Point::xy(3.0, 4.0).into())
            .map_err(|r| r.into_error())
            .unwrap();

        assert_eq!(
            write_geometry(&collection.into(), &WktOptions::default()).unwrap(),
            "MULTIPOINT ((3 4))"
        );
    }

    #[test]
    fn polygon_with_hole() {
        let polygon = Polygon::new(
            vec![
                LineString::new(
                    vec![
                        Coord::xy(0.0, 0.0),
                        Coord::xy(4.0, 0.0),
                        Coord::xy(4.0, 4.0),
                        Coord::xy(0.0, 4.0),
                    ],
                    Dimensions::XY,
                ),
                LineString::new(
                    vec![
                        Coord::xy(1.0, 1.0),
                        Coord::xy(2.0, 1.0),
                        Coord::xy(2.0, 2.0),
                    ],
                    Dimensions::XY,
                ),
            ],
            Dimensions::XY,
        );
        assert_eq!(
            write_geometry(&polygon.into(), &WktOptions::default()).unwrap(),
            "POLYGON ((0 0,4 0,4 4,0 4),(1 1,2 1,2 2))"
        );
    }
}
