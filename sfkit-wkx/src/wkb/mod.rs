//! Well-Known Binary codec.
//!
//! Layout of every geometry: `[byte-order: 1][type-code: 4]` followed by the
//! type-specific body. Collections carry a 4-byte member count and then the
//! members back to back, each a complete WKB geometry of its own.

use sfkit_geom::{GeomError, Geometry};

mod codes;
mod reader;
mod writer;

pub use codes::{from_code, wkb_code};
pub use reader::{read_collection_into, read_geometry};
pub use writer::write_geometry;

/// Byte order of an encoded geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WkbByteOrder {
    /// Big-endian (XDR), byte-order byte 0.
    Xdr,
    /// Little-endian (NDR), byte-order byte 1.
    #[default]
    Ndr,
}

/// Type-code numbering scheme to write.
///
/// Decoding accepts all of them without being told which one to expect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WkbVariant {
    /// Pre-ISO OGC numbering: 3D marked with the high bit. Has no codes for
    /// multi-curve and multi-surface; those are written with ISO codes.
    #[default]
    OldOgc,
    /// ISO SQL/MM numbering: Z/M/ZM as +1000/+2000/+3000 offsets.
    Iso,
    /// PostGIS 1.x EWKB numbering: own codes for multi-curve and
    /// multi-surface, 3D via the high bit, measures not representable.
    PostGis1,
}

/// Encoder options.
#[derive(Debug, Copy, Clone, Default)]
pub struct WkbOptions {
    /// Byte order of the output.
    pub byte_order: WkbByteOrder,
    /// Type-code numbering scheme of the output.
    pub variant: WkbVariant,
}

/// Exact number of bytes [`write_geometry`] produces for this geometry.
pub fn wkb_size(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Point(point) => 5 + 8 * point.dims().coord_len(),
        Geometry::LineString(line) => 9 + 8 * line.dims().coord_len() * line.len(),
        Geometry::Polygon(polygon) => {
            let coord_size = 8 * polygon.dims().coord_len();
            9 + polygon
                .rings()
                .iter()
                .map(|ring| 4 + coord_size * ring.len())
                .sum::<usize>()
        }
        Geometry::Collection(collection) => {
            9 + collection.iter().map(wkb_size).sum::<usize>()
        }
    }
}

impl WkbByteOrder {
    fn from_byte(byte: u8) -> Result<Self, GeomError> {
        match byte {
            0 => Ok(WkbByteOrder::Xdr),
            1 => Ok(WkbByteOrder::Ndr),
            other => Err(GeomError::CorruptData(format!(
                "invalid byte-order byte {other:#04x}"
            ))),
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            WkbByteOrder::Xdr => 0,
            WkbByteOrder::Ndr => 1,
        }
    }
}
