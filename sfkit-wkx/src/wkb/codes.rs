//! The wire type-code table.
//!
//! Three numbering schemes exist in the wild for the same logical types.
//! All mapping in both directions goes through this module; the codecs never
//! hold tag arithmetic of their own.

use sfkit_geom::{Dimensions, GeomError, GeometryTag};

use super::WkbVariant;

/// High bit marking a 3D geometry in the pre-ISO and PostGIS schemes.
const Z_BIT: u32 = 0x8000_0000;

/// ISO base code, PostGIS-legacy base code.
const CODE_TABLE: [(GeometryTag, u32, u32); 9] = [
    (GeometryTag::Point, 1, 1),
    (GeometryTag::LineString, 2, 2),
    (GeometryTag::Polygon, 3, 3),
    (GeometryTag::MultiPoint, 4, 4),
    (GeometryTag::MultiLineString, 5, 5),
    (GeometryTag::MultiPolygon, 6, 6),
    (GeometryTag::GeometryCollection, 7, 7),
    (GeometryTag::MultiCurve, 11, 14),
    (GeometryTag::MultiSurface, 12, 15),
];

/// Decodes a wire type code into a type tag and dimensionality flags.
///
/// Accepts every numbering scheme; the decoders never need to be told which
/// variant produced their input.
pub fn from_code(code: u32) -> Result<(GeometryTag, Dimensions), GeomError> {
    let mut dims = Dimensions::XY;

    let mut code = code;
    if code & Z_BIT != 0 {
        dims.z = true;
        code &= !Z_BIT;
    }

    if code >= 1000 {
        match code / 1000 {
            1 => dims.z = true,
            2 => dims.m = true,
            3 => {
                dims.z = true;
                dims.m = true;
            }
            _ => return Err(GeomError::CorruptData(format!("invalid wkb type code {code}"))),
        }
        code %= 1000;
    }

    let tag = CODE_TABLE
        .iter()
        .find(|(_, iso, postgis)| code == *iso || code == *postgis)
        .map(|(tag, _, _)| *tag)
        .ok_or_else(|| GeomError::CorruptData(format!("unknown wkb type code {code}")))?;

    Ok((tag, dims))
}

/// Encodes a type tag and dimensionality into the wire code of the requested
/// variant.
///
/// The pre-ISO scheme marks 3D with the high bit and has no marker of its
/// own for measures, so measured output borrows the ISO offsets there. The
/// PostGIS-legacy scheme cannot represent measures at all; the flag is
/// dropped.
pub fn wkb_code(tag: GeometryTag, dims: Dimensions, variant: WkbVariant) -> u32 {
    let (_, iso, postgis) = CODE_TABLE
        .iter()
        .find(|(t, _, _)| *t == tag)
        .copied()
        .unwrap_or((tag, 0, 0));

    match variant {
        WkbVariant::Iso => {
            let mut code = iso;
            if dims.z {
                code += 1000;
            }
            if dims.m {
                code += 2000;
            }
            code
        }
        WkbVariant::OldOgc => {
            if dims.z && dims.m {
                3000 + iso
            } else if dims.m {
                2000 + iso
            } else if dims.z {
                iso | Z_BIT
            } else {
                iso
            }
        }
        WkbVariant::PostGis1 => {
            if dims.z {
                postgis | Z_BIT
            } else {
                postgis
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn iso_codes_round_trip() {
        for dims in [Dimensions::XY, Dimensions::XYZ, Dimensions::XYM, Dimensions::XYZM] {
            for (tag, _, _) in CODE_TABLE {
                let code = wkb_code(tag, dims, WkbVariant::Iso);
                assert_eq!(from_code(code).unwrap(), (tag, dims));
            }
        }
    }

    #[test]
    fn postgis_codes_decode_without_being_asked() {
        assert_eq!(
            from_code(14).unwrap(),
            (GeometryTag::MultiCurve, Dimensions::XY)
        );
        assert_eq!(
            from_code(15 | Z_BIT).unwrap(),
            (GeometryTag::MultiSurface, Dimensions::XYZ)
        );
    }

    #[test]
    fn old_ogc_high_bit_means_3d() {
        let code = wkb_code(GeometryTag::MultiPoint, Dimensions::XYZ, WkbVariant::OldOgc);
        assert_eq!(code, 4 | Z_BIT);
        assert_eq!(
            from_code(code).unwrap(),
            (GeometryTag::MultiPoint, Dimensions::XYZ)
        );
    }

    #[test]
    fn curve_polygon_code_is_rejected() {
        // Code 13 belongs to a type outside the supported set.
        assert_matches!(from_code(13), Err(GeomError::CorruptData(_)));
        assert_matches!(from_code(0), Err(GeomError::CorruptData(_)));
        assert_matches!(from_code(99), Err(GeomError::CorruptData(_)));
    }
}
