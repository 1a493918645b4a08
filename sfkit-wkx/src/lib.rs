//! WKB and WKT codecs for the `sfkit-geom` geometry model.
//!
//! Both formats are self-describing and recursive; both decoders accept any
//! of the historical type-tag numbering schemes (ISO SQL/MM, PostGIS legacy
//! EWKB, pre-ISO OGC) and guard against engineered deeply-nested input with
//! an explicit recursion limit. Encoders pick the numbering scheme through
//! the options structs.
//!
//! Decode errors leave a target collection holding the successfully parsed
//! prefix of the input; callers must treat the error as fatal for the parse
//! attempt regardless of partial content.

pub mod wkb;
pub mod wkt;

/// Nesting levels a decoder will follow before declaring the input corrupt.
///
/// This is a stack-exhaustion defense against adversarial input, not a limit
/// real data gets anywhere near.
pub(crate) const MAX_RECURSION_DEPTH: usize = 32;
