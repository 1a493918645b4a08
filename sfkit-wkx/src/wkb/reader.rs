//! WKB decoding.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use sfkit_geom::{
    CollectionKind, Coord, Dimensions, GeomError, Geometry, GeometryCollection, GeometryTag,
    LineString, Point, Polygon,
};

use super::{codes, WkbByteOrder};
use crate::MAX_RECURSION_DEPTH;

/// Smallest possible encoded geometry: an empty linestring or collection.
/// Declared member counts are sanity-checked against this before any
/// allocation happens.
const MIN_GEOMETRY_SIZE: usize = 9;

/// Decodes one geometry from the start of `buf`.
///
/// Returns the geometry and the number of bytes it occupied; trailing bytes
/// are left for the caller.
pub fn read_geometry(buf: &[u8]) -> Result<(Geometry, usize), GeomError> {
    read_any(buf, 0)
}

/// Decodes a collection from the start of `buf` into an existing collection
/// of the same kind.
///
/// The collection is cleared first. On error it holds the members that were
/// successfully decoded before the failure; the error is still fatal for the
/// parse attempt.
pub fn read_collection_into(
    collection: &mut GeometryCollection,
    buf: &[u8],
) -> Result<usize, GeomError> {
    read_collection_body(collection, buf, 0)
}

fn read_any(buf: &[u8], depth: usize) -> Result<(Geometry, usize), GeomError> {
    let (order, tag, dims) = read_preamble(buf)?;
    match tag {
        GeometryTag::Point => read_point(buf, order, dims).map(|(g, n)| (g.into(), n)),
        GeometryTag::LineString => read_line_string(buf, order, dims).map(|(g, n)| (g.into(), n)),
        GeometryTag::Polygon => read_polygon(buf, order, dims).map(|(g, n)| (g.into(), n)),
        _ => {
            let kind = CollectionKind::from_tag(tag).ok_or_else(|| {
                GeomError::CorruptData(format!("type {} is not a collection", tag.wkt_name()))
            })?;
            let mut collection = GeometryCollection::new(kind);
            let used = read_collection_body(&mut collection, buf, depth)?;
            Ok((collection.into(), used))
        }
    }
}

fn read_collection_body(
    collection: &mut GeometryCollection,
    buf: &[u8],
    depth: usize,
) -> Result<usize, GeomError> {
    if depth >= MAX_RECURSION_DEPTH {
        return Err(GeomError::CorruptData(
            "too many nesting levels in wkb input".into(),
        ));
    }

    collection.clear();

    let (order, tag, dims) = read_preamble(buf)?;
    if tag != collection.tag() {
        return Err(GeomError::CorruptData(format!(
            "expected {} data, found {}",
            collection.tag().wkt_name(),
            tag.wkt_name()
        )));
    }

    if buf.len() < MIN_GEOMETRY_SIZE {
        return Err(GeomError::NotEnoughData);
    }
    let count = read_u32(&buf[5..], order)? as usize;

    collection.set_3d(dims.z);
    collection.set_measured(dims.m);

    let mut offset = MIN_GEOMETRY_SIZE;
    // Each member takes at least MIN_GEOMETRY_SIZE bytes, so a count beyond
    // this bound declares more data than the buffer holds.
    if count > (buf.len() - offset) / MIN_GEOMETRY_SIZE {
        return Err(GeomError::NotEnoughData);
    }

    for _ in 0..count {
        let remaining = &buf[offset..];

        // Peek the member's type tag before decoding it, so an incompatible
        // member is reported without being consumed.
        let (_, member_tag, member_dims) = read_preamble(remaining)?;
        if !collection.kind().is_compatible_sub_type(member_tag) {
            log::debug!(
                "wkb member of type {} is not allowed in {}",
                member_tag.wkt_name(),
                collection.tag().wkt_name()
            );
            return Err(GeomError::CorruptData(format!(
                "member of type {} is not allowed in {}",
                member_tag.wkt_name(),
                collection.tag().wkt_name()
            )));
        }

        let (member, used) = read_any(remaining, depth + 1)?;
        debug_assert!(used > 0 && used <= remaining.len());

        if (collection.dims().z && !member_dims.z) || (collection.dims().m && !member_dims.m) {
            log::debug!(
                "promoting wkb member of type {} to the dimensionality of its collection",
                member_tag.wkt_name()
            );
        }
        collection
            .add_geometry_owned(member)
            .map_err(GeomError::from)?;

        offset += used;
    }

    Ok(offset)
}

fn read_point(
    buf: &[u8],
    order: WkbByteOrder,
    dims: Dimensions,
) -> Result<(Point, usize), GeomError> {
    let size = 5 + 8 * dims.coord_len();
    if buf.len() < size {
        return Err(GeomError::NotEnoughData);
    }

    let coord = read_coord(&buf[5..], order, dims)?;
    // An empty point is encoded as NaN coordinates.
    let point = if coord.x.is_nan() && coord.y.is_nan() {
        let mut point = Point::empty();
        point.set_3d(dims.z);
        point.set_measured(dims.m);
        point
    } else {
        Point::new(coord, dims)
    };

    Ok((point, size))
}

fn read_line_string(
    buf: &[u8],
    order: WkbByteOrder,
    dims: Dimensions,
) -> Result<(LineString, usize), GeomError> {
    if buf.len() < 9 {
        return Err(GeomError::NotEnoughData);
    }
    let count = read_u32(&buf[5..], order)? as usize;

    let coord_size = 8 * dims.coord_len();
    let size = count
        .checked_mul(coord_size)
        .and_then(|body| body.checked_add(9))
        .ok_or(GeomError::NotEnoughData)?;
    if buf.len() < size {
        return Err(GeomError::NotEnoughData);
    }

    let coords = read_coords(&buf[9..], count, order, dims)?;
    Ok((LineString::new(coords, dims), size))
}

fn read_polygon(
    buf: &[u8],
    order: WkbByteOrder,
    dims: Dimensions,
) -> Result<(Polygon, usize), GeomError> {
    if buf.len() < 9 {
        return Err(GeomError::NotEnoughData);
    }
    let ring_count = read_u32(&buf[5..], order)? as usize;

    let mut offset = 9;
    // Each ring carries at least its own 4-byte count.
    if ring_count > (buf.len() - offset) / 4 {
        return Err(GeomError::NotEnoughData);
    }

    let mut rings = Vec::new();
    rings
        .try_reserve_exact(ring_count)
        .map_err(|err| GeomError::OutOfMemory(err.to_string()))?;

    let coord_size = 8 * dims.coord_len();
    for _ in 0..ring_count {
        let count = read_u32(&buf[offset..], order)? as usize;
        offset += 4;

        let end = count
            .checked_mul(coord_size)
            .and_then(|body| body.checked_add(offset))
            .ok_or(GeomError::NotEnoughData)?;
        if buf.len() < end {
            return Err(GeomError::NotEnoughData);
        }

        let coords = read_coords(&buf[offset..], count, order, dims)?;
        rings.push(LineString::new(coords, dims));
        offset = end;
    }

    Ok((Polygon::new(rings, dims), offset))
}

fn read_coords(
    buf: &[u8],
    count: usize,
    order: WkbByteOrder,
    dims: Dimensions,
) -> Result<Vec<Coord>, GeomError> {
    let coord_size = 8 * dims.coord_len();
    let mut coords = Vec::new();
    coords
        .try_reserve_exact(count)
        .map_err(|err| GeomError::OutOfMemory(err.to_string()))?;
    for i in 0..count {
        coords.push(read_coord(&buf[i * coord_size..], order, dims)?);
    }
    Ok(coords)
}

fn read_coord(buf: &[u8], order: WkbByteOrder, dims: Dimensions) -> Result<Coord, GeomError> {
    let x = read_f64_at(buf, 0, order)?;
    let y = read_f64_at(buf, 8, order)?;
    let mut offset = 16;
    let z = if dims.z {
        let value = read_f64_at(buf, offset, order)?;
        offset += 8;
        value
    } else {
        0.0
    };
    let m = if dims.m {
        read_f64_at(buf, offset, order)?
    } else {
        0.0
    };
    Ok(Coord::xyzm(x, y, z, m))
}

fn read_preamble(buf: &[u8]) -> Result<(WkbByteOrder, GeometryTag, Dimensions), GeomError> {
    let order = WkbByteOrder::from_byte(*buf.first().ok_or(GeomError::NotEnoughData)?)?;
    let code = read_u32(&buf[1..], order)?;
    let (tag, dims) = codes::from_code(code)?;
    Ok((order, tag, dims))
}

fn read_u32(buf: &[u8], order: WkbByteOrder) -> Result<u32, GeomError> {
    let bytes = buf.get(..4).ok_or(GeomError::NotEnoughData)?;
    Ok(match order {
        WkbByteOrder::Xdr => BigEndian::read_u32(bytes),
        WkbByteOrder::Ndr => LittleEndian::read_u32(bytes),
    })
}

fn read_f64_at(buf: &[u8], offset: usize, order: WkbByteOrder) -> Result<f64, GeomError> {
    let bytes = buf
        .get(offset..offset + 8)
        .ok_or(GeomError::NotEnoughData)?;
    Ok(match order {
        WkbByteOrder::Xdr => BigEndian::read_f64(bytes),
        WkbByteOrder::Ndr => LittleEndian::read_f64(bytes),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn le_geometry(code: u32, body: &[&[u8]]) -> Vec<u8> {
        let mut out = vec![1u8];
        out.extend_from_slice(&code.to_le_bytes());
        for part in body {
            out.extend_from_slice(part);
        }
        out
    }

    fn le_point(x: f64, y: f64) -> Vec<u8> {
        le_geometry(1, &[&x.to_le_bytes(), &y.to_le_bytes()])
    }

    #[test]
    fn point_little_endian() {
        let (geometry, used) = read_geometry(&le_point(1.0, 2.0)).unwrap();
        assert_eq!(used, 21);
        assert_eq!(geometry, Point::xy(1.0, 2.0).into());
    }

    #[test]
    fn point_big_endian() {
        let mut buf = vec![0u8];
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&3.0f64.to_be_bytes());
        buf.extend_from_slice(&4.0f64.to_be_bytes());

        let (geometry, _) = read_geometry(&buf).unwrap();
        assert_eq!(geometry, Point::xy(3.0, 4.0).into());
    }

    #[test]
    fn nan_point_is_empty() {
        let (geometry, _) = read_geometry(&le_point(f64::NAN, f64::NAN)).unwrap();
        assert!(geometry.is_empty());
        assert_eq!(geometry.tag(), GeometryTag::Point);
    }

    #[test]
    fn invalid_byte_order_byte() {
        let mut buf = le_point(1.0, 2.0);
        buf[0] = 5;
        assert_matches!(read_geometry(&buf), Err(GeomError::CorruptData(_)));
    }

    #[test]
    fn truncated_buffers() {
        let buf = le_point(1.0, 2.0);
        for len in [0, 3, 5, 20] {
            assert_matches!(read_geometry(&buf[..len]), Err(GeomError::NotEnoughData));
        }
    }

    #[test]
    fn overdeclared_member_count() {
        // A MultiPoint declaring u32::MAX members in a 9-byte buffer.
        let buf = le_geometry(4, &[&u32::MAX.to_le_bytes()]);
        assert_matches!(read_geometry(&buf), Err(GeomError::NotEnoughData));
    }

    #[test]
    fn incompatible_member_keeps_parsed_prefix() {
        // A MultiPoint holding a point and then a linestring.
        let line = le_geometry(2, &[&0u32.to_le_bytes()]);
        let buf = le_geometry(
            4,
            &[&2u32.to_le_bytes(), &le_point(1.0, 2.0), &line],
        );

        let mut collection = GeometryCollection::new(CollectionKind::MultiPoint);
        let err = read_collection_into(&mut collection, &buf).unwrap_err();
        assert_matches!(err, GeomError::CorruptData(_));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn nesting_bomb_is_rejected() {
        // 33 collections nested inside each other.
        let mut buf = le_geometry(7, &[&0u32.to_le_bytes()]);
        for _ in 0..32 {
            buf = le_geometry(7, &[&1u32.to_le_bytes(), &buf]);
        }
        assert_matches!(read_geometry(&buf), Err(GeomError::CorruptData(_)));

        // 32 levels are still fine.
        let mut buf = le_geometry(7, &[&0u32.to_le_bytes()]);
        for _ in 0..31 {
            buf = le_geometry(7, &[&1u32.to_le_bytes(), &buf]);
        }
        assert!(read_geometry(&buf).is_ok());
    }

    #[test]
    fn children_promote_to_collection_dimensionality() {
        // An ISO 3D MultiPoint holding a 2D point.
        let buf = le_geometry(1004, &[&1u32.to_le_bytes(), &le_point(1.0, 2.0)]);
        let (geometry, _) = read_geometry(&buf).unwrap();
        assert!(geometry.dims().z);
        let collection = geometry.as_collection().unwrap();
        assert!(collection.members()[0].dims().z);
    }
}
