//! WKB encoding.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use sfkit_geom::{
    Coord, Dimensions, GeomError, Geometry, GeometryCollection, GeometryTag, LineString, Point,
    Polygon,
};

use super::{codes, wkb_size, WkbByteOrder, WkbOptions, WkbVariant};

/// Encodes the geometry, appending exactly [`wkb_size`](super::wkb_size)
/// bytes to `out`.
pub fn write_geometry(
    out: &mut Vec<u8>,
    geometry: &Geometry,
    options: &WkbOptions,
) -> Result<(), GeomError> {
    out.try_reserve(wkb_size(geometry))
        .map_err(|err| GeomError::OutOfMemory(err.to_string()))?;
    write_any(out, geometry, *options);
    Ok(())
}

fn write_any(out: &mut Vec<u8>, geometry: &Geometry, options: WkbOptions) {
    match geometry {
        Geometry::Point(point) => write_point(out, point, options),
        Geometry::LineString(line) => write_line_string(out, line, options),
        Geometry::Polygon(polygon) => write_polygon(out, polygon, options),
        Geometry::Collection(collection) => write_collection(out, collection, options),
    }
}

fn write_collection(out: &mut Vec<u8>, collection: &GeometryCollection, mut options: WkbOptions) {
    // The pre-ISO scheme has no codes for these two kinds; they are written
    // with ISO codes instead, members included.
    if options.variant == WkbVariant::OldOgc
        && matches!(
            collection.tag(),
            GeometryTag::MultiCurve | GeometryTag::MultiSurface
        )
    {
        options.variant = WkbVariant::Iso;
    }

    header(out, collection.tag(), collection.dims(), options);
    put_u32(out, collection.len() as u32, options.byte_order);

    for member in collection.iter() {
        if member.dims() != collection.dims() {
            // The format does not enforce uniform dimensionality; only the
            // logical model does.
            log::warn!(
                "wkb member of type {} does not match the dimensionality of its collection",
                member.tag().wkt_name()
            );
        }
        write_any(out, member, options);
    }
}

fn write_point(out: &mut Vec<u8>, point: &Point, options: WkbOptions) {
    header(out, GeometryTag::Point, point.dims(), options);
    let coord = point
        .coord()
        .unwrap_or(Coord::xyzm(f64::NAN, f64::NAN, f64::NAN, f64::NAN));
    put_coord(out, &coord, point.dims(), options.byte_order);
}

fn write_line_string(out: &mut Vec<u8>, line: &LineString, options: WkbOptions) {
    header(out, GeometryTag::LineString, line.dims(), options);
    put_u32(out, line.len() as u32, options.byte_order);
    for coord in line.coords() {
        put_coord(out, coord, line.dims(), options.byte_order);
    }
}

fn write_polygon(out: &mut Vec<u8>, polygon: &Polygon, options: WkbOptions) {
    header(out, GeometryTag::Polygon, polygon.dims(), options);
    put_u32(out, polygon.rings().len() as u32, options.byte_order);
    for ring in polygon.rings() {
        put_u32(out, ring.len() as u32, options.byte_order);
        for coord in ring.coords() {
            put_coord(out, coord, polygon.dims(), options.byte_order);
        }
    }
}

fn header(out: &mut Vec<u8>, tag: GeometryTag, dims: Dimensions, options: WkbOptions) {
    out.push(options.byte_order.to_byte());
    put_u32(
        out,
        codes::wkb_code(tag, dims, options.variant),
        options.byte_order,
    );
}

fn put_coord(out: &mut Vec<u8>, coord: &Coord, dims: Dimensions, order: WkbByteOrder) {
    put_f64(out, coord.x, order);
    put_f64(out, coord.y, order);
    if dims.z {
        put_f64(out, coord.z, order);
    }
    if dims.m {
        put_f64(out, coord.m, order);
    }
}

fn put_u32(out: &mut Vec<u8>, value: u32, order: WkbByteOrder) {
    let mut bytes = [0u8; 4];
    match order {
        WkbByteOrder::Xdr => BigEndian::write_u32(&mut bytes, value),
        WkbByteOrder::Ndr => LittleEndian::write_u32(&mut bytes, value),
    }
    out.extend_from_slice(&bytes);
}

fn put_f64(out: &mut Vec<u8>, value: f64, order: WkbByteOrder) {
    let mut bytes = [0u8; 8];
    match order {
        WkbByteOrder::Xdr => BigEndian::write_f64(&mut bytes, value),
        WkbByteOrder::Ndr => LittleEndian::write_f64(&mut bytes, value),
    }
    out.extend_from_slice(&bytes);
}

#[cfg(test)]
mod tests {
    use sfkit_geom::CollectionKind;

    use super::*;

    fn multi_curve_z() -> Geometry {
        let mut collection = GeometryCollection::new(CollectionKind::MultiCurve);
        collection
            .add_geometry_owned(
                LineString::new(
                    vec![Coord::xyz(0.0, 0.0, 1.0), Coord::xyz(1.0, 1.0, 2.0)],
                    Dimensions::XYZ,
                )
                .into(),
            )
            .map_err(|r| r.into_error())
            .unwrap();
        collection.into()
    }

    #[test]
    fn size_contract_holds() {
        let geometry = multi_curve_z();
        for variant in [WkbVariant::OldOgc, WkbVariant::Iso, WkbVariant::PostGis1] {
            let mut out = Vec::new();
            write_geometry(
                &mut out,
                &geometry,
                &WkbOptions {
                    variant,
                    ..WkbOptions::default()
                },
            )
            .unwrap();
            assert_eq!(out.len(), wkb_size(&geometry));
        }
    }

    #[test]
    fn old_ogc_multi_curve_upgrades_to_iso() {
        let mut out = Vec::new();
        write_geometry(&mut out, &multi_curve_z(), &WkbOptions::default()).unwrap();
        // ISO MultiCurve Z, little-endian.
        assert_eq!(u32::from_le_bytes([out[1], out[2], out[3], out[4]]), 1011);
    }

    #[test]
    fn postgis_legacy_uses_its_own_codes() {
        let mut out = Vec::new();
        write_geometry(
            &mut out,
            &multi_curve_z(),
            &WkbOptions {
                variant: WkbVariant::PostGis1,
                ..WkbOptions::default()
            },
        )
        .unwrap();
        assert_eq!(
            u32::from_le_bytes([out[1], out[2], out[3], out[4]]),
            14 | 0x8000_0000
        );
    }

    #[test]
    fn empty_point_encodes_as_nan() {
        let mut out = Vec::new();
        write_geometry(&mut out, &Point::empty().into(), &WkbOptions::default()).unwrap();
        assert_eq!(out.len(), 21);
        let x = f64::from_le_bytes(out[5..13].try_into().unwrap());
        assert!(x.is_nan());
    }
}
