//! WKT decoding: recursive descent over the token stream.

use sfkit_geom::{
    CollectionKind, Coord, Dimensions, GeomError, Geometry, GeometryCollection, GeometryTag,
    LineString, Point, Polygon,
};

use super::token::{Token, Tokens};
use crate::MAX_RECURSION_DEPTH;

/// Decodes one geometry from the start of `input`.
///
/// Returns the geometry and the unconsumed remainder of the input.
pub fn read_geometry(input: &str) -> Result<(Geometry, &str), GeomError> {
    let mut tokens = Tokens::new(input);
    let geometry = parse_any(&mut tokens, 0)?;
    Ok((geometry, tokens.rest()))
}

/// Decodes a collection from the start of `input` into an existing
/// collection of the same kind.
///
/// The collection is cleared first. On error it holds the members that were
/// successfully parsed before the failure.
pub fn read_collection_into<'a>(
    collection: &mut GeometryCollection,
    input: &'a str,
) -> Result<&'a str, GeomError> {
    let mut tokens = Tokens::new(input);
    collection.clear();
    collection.flatten_to_2d();

    let word = expect_word(&mut tokens)?;
    let tag = tag_from_name(word).ok_or_else(|| {
        GeomError::CorruptData(format!("unknown geometry type name `{word}`"))
    })?;
    if tag != collection.tag() {
        return Err(GeomError::CorruptData(format!(
            "expected {} data, found {}",
            collection.tag().wkt_name(),
            tag.wkt_name()
        )));
    }

    let declared = parse_dims_suffix(&mut tokens);
    if let Some(declared) = declared {
        collection.set_3d(declared.z);
        collection.set_measured(declared.m);
    }
    parse_collection_tail(collection, &mut tokens, 0, declared)?;
    Ok(tokens.rest())
}

fn parse_any(tokens: &mut Tokens, depth: usize) -> Result<Geometry, GeomError> {
    let word = expect_word(tokens)?;
    let tag = tag_from_name(word).ok_or_else(|| {
        GeomError::CorruptData(format!("unknown geometry type name `{word}`"))
    })?;
    parse_tagged(tag, tokens, depth)
}

fn parse_tagged(tag: GeometryTag, tokens: &mut Tokens, depth: usize) -> Result<Geometry, GeomError> {
    let declared = parse_dims_suffix(tokens);
    match tag {
        GeometryTag::Point => parse_point_tail(tokens, declared).map(Into::into),
        GeometryTag::LineString => parse_line_string_tail(tokens, declared).map(Into::into),
        GeometryTag::Polygon => parse_polygon_tail(tokens, declared).map(Into::into),
        _ => {
            let kind = CollectionKind::from_tag(tag).ok_or_else(|| {
                GeomError::CorruptData(format!("type {} is not a collection", tag.wkt_name()))
            })?;
            let mut collection = GeometryCollection::new(kind);
            if let Some(declared) = declared {
                collection.set_3d(declared.z);
                collection.set_measured(declared.m);
            }
            parse_collection_tail(&mut collection, tokens, depth, declared)?;
            Ok(collection.into())
        }
    }
}

fn parse_collection_tail(
    collection: &mut GeometryCollection,
    tokens: &mut Tokens,
    depth: usize,
    declared: Option<Dimensions>,
) -> Result<(), GeomError> {
    if depth >= MAX_RECURSION_DEPTH {
        return Err(GeomError::CorruptData(
            "too many nesting levels in wkt input".into(),
        ));
    }

    if take_empty(tokens) {
        return Ok(());
    }
    expect_open(tokens)?;

    loop {
        let member = match tokens.peek() {
            Some(Token::Word(word)) => match tag_from_name(word) {
                Some(member_tag) => {
                    tokens.next();
                    parse_tagged(member_tag, tokens, depth + 1)?
                }
                None => parse_implied_member(collection.kind(), tokens, declared)?,
            },
            Some(Token::Open) => parse_implied_member(collection.kind(), tokens, declared)?,
            _ => {
                return Err(GeomError::CorruptData(
                    "unexpected token in collection body".into(),
                ))
            }
        };

        // A measured 2D collection cannot absorb an unmeasured member; the
        // binary decoder promotes in that situation, the text decoder does
        // not.
        let dims = collection.dims();
        if dims.m && !dims.z && !member.dims().m {
            return Err(GeomError::CorruptData(
                "measured collection contains a member without measure values".into(),
            ));
        }

        collection
            .add_geometry_owned(member)
            .map_err(GeomError::from)?;

        match tokens.next() {
            Some(Token::Comma) => {}
            Some(Token::Close) => break,
            _ => {
                return Err(GeomError::CorruptData(
                    "expected `,` or `)` in collection body".into(),
                ))
            }
        }
    }

    Ok(())
}

/// Parses a member written without its own type name; only the specialized
/// kinds imply what it is. A dimensionality declared on the collection
/// applies to such members, since they have no suffix of their own.
fn parse_implied_member(
    kind: CollectionKind,
    tokens: &mut Tokens,
    declared: Option<Dimensions>,
) -> Result<Geometry, GeomError> {
    let implied = kind.implied_member_tag().ok_or_else(|| {
        GeomError::CorruptData("members of a geometry collection must carry a type name".into())
    })?;

    if take_empty(tokens) {
        return Ok(Geometry::create(implied));
    }
    match implied {
        GeometryTag::Point => {
            // Both `(1 2)` and the bare legacy form `1 2` are accepted.
            if tokens.peek() == Some(Token::Open) {
                parse_point_tail(tokens, declared).map(Into::into)
            } else {
                let (coord, dims) = parse_coord(tokens, declared)?;
                Ok(Point::new(coord, dims).into())
            }
        }
        GeometryTag::LineString => parse_line_string_tail(tokens, declared).map(Into::into),
        GeometryTag::Polygon => parse_polygon_tail(tokens, declared).map(Into::into),
        _ => Err(GeomError::CorruptData(format!(
            "type {} cannot be an implied member",
            implied.wkt_name()
        ))),
    }
}

fn parse_point_tail(
    tokens: &mut Tokens,
    declared: Option<Dimensions>,
) -> Result<Point, GeomError> {
    if take_empty(tokens) {
        let mut point = Point::empty();
        if let Some(declared) = declared {
            point.set_3d(declared.z);
            point.set_measured(declared.m);
        }
        return Ok(point);
    }

    expect_open(tokens)?;
    let (coord, dims) = parse_coord(tokens, declared)?;
    expect_close(tokens)?;
    Ok(Point::new(coord, dims))
}

fn parse_line_string_tail(
    tokens: &mut Tokens,
    declared: Option<Dimensions>,
) -> Result<LineString, GeomError> {
    if take_empty(tokens) {
        let mut line = LineString::empty();
        if let Some(declared) = declared {
            line.set_3d(declared.z);
            line.set_measured(declared.m);
        }
        return Ok(line);
    }

    let (coords, dims) = parse_coord_list(tokens, declared)?;
    Ok(LineString::new(coords, dims))
}

fn parse_polygon_tail(
    tokens: &mut Tokens,
    declared: Option<Dimensions>,
) -> Result<Polygon, GeomError> {
    if take_empty(tokens) {
        let mut polygon = Polygon::empty();
        if let Some(declared) = declared {
            polygon.set_3d(declared.z);
            polygon.set_measured(declared.m);
        }
        return Ok(polygon);
    }

    expect_open(tokens)?;
    let mut rings = Vec::new();
    let mut dims = declared;
    loop {
        let (coords, ring_dims) = parse_coord_list(tokens, dims)?;
        dims = Some(ring_dims);
        rings.push(LineString::new(coords, ring_dims));

        match tokens.next() {
            Some(Token::Comma) => {}
            Some(Token::Close) => break,
            _ => {
                return Err(GeomError::CorruptData(
                    "expected `,` or `)` after a polygon ring".into(),
                ))
            }
        }
    }
    Ok(Polygon::new(rings, dims.unwrap_or(Dimensions::XY)))
}

/// Parses `(x y [z] [m], x y [z] [m], ...)`. The first tuple fixes the
/// dimensionality unless the caller declared one; every further tuple must
/// match it.
fn parse_coord_list(
    tokens: &mut Tokens,
    declared: Option<Dimensions>,
) -> Result<(Vec<Coord>, Dimensions), GeomError> {
    expect_open(tokens)?;
    let mut coords = Vec::new();
    let mut dims = declared;
    loop {
        let (coord, coord_dims) = parse_coord(tokens, dims)?;
        dims = Some(coord_dims);
        coords.push(coord);

        match tokens.next() {
            Some(Token::Comma) => {}
            Some(Token::Close) => break,
            _ => {
                return Err(GeomError::CorruptData(
                    "expected `,` or `)` in coordinate list".into(),
                ))
            }
        }
    }
    Ok((coords, dims.unwrap_or(Dimensions::XY)))
}

fn parse_coord(
    tokens: &mut Tokens,
    declared: Option<Dimensions>,
) -> Result<(Coord, Dimensions), GeomError> {
    let mut values = Vec::new();
    while let Some(Token::Word(word)) = tokens.peek() {
        tokens.next();
        values.push(parse_number(word)?);
    }

    let dims = match declared {
        Some(dims) if values.len() == dims.coord_len() => dims,
        Some(dims) => {
            return Err(GeomError::CorruptData(format!(
                "expected {} coordinate values, found {}",
                dims.coord_len(),
                values.len()
            )))
        }
        None => match values.len() {
            2 => Dimensions::XY,
            3 => Dimensions::XYZ,
            4 => Dimensions::XYZM,
            n => {
                return Err(GeomError::CorruptData(format!(
                    "a coordinate tuple must have 2 to 4 values, found {n}"
                )))
            }
        },
    };

    let mut coord = Coord::xy(values[0], values[1]);
    let mut index = 2;
    if dims.z {
        coord.z = values[index];
        index += 1;
    }
    if dims.m {
        coord.m = values[index];
    }
    Ok((coord, dims))
}

fn parse_dims_suffix(tokens: &mut Tokens) -> Option<Dimensions> {
    if let Some(Token::Word(word)) = tokens.peek() {
        let dims = if word.eq_ignore_ascii_case("Z") {
            Dimensions::XYZ
        } else if word.eq_ignore_ascii_case("M") {
            Dimensions::XYM
        } else if word.eq_ignore_ascii_case("ZM") {
            Dimensions::XYZM
        } else {
            return None;
        };
        tokens.next();
        return Some(dims);
    }
    None
}

fn take_empty(tokens: &mut Tokens) -> bool {
    if let Some(Token::Word(word)) = tokens.peek() {
        if word.eq_ignore_ascii_case("EMPTY") {
            tokens.next();
            return true;
        }
    }
    false
}

fn tag_from_name(word: &str) -> Option<GeometryTag> {
    let upper = word.to_ascii_uppercase();
    Some(match upper.as_str() {
        "POINT" => GeometryTag::Point,
        "LINESTRING" => GeometryTag::LineString,
        "POLYGON" => GeometryTag::Polygon,
        "MULTIPOINT" => GeometryTag::MultiPoint,
        "MULTILINESTRING" => GeometryTag::MultiLineString,
        "MULTIPOLYGON" => GeometryTag::MultiPolygon,
        "MULTICURVE" => GeometryTag::MultiCurve,
        "MULTISURFACE" => GeometryTag::MultiSurface,
        "GEOMETRYCOLLECTION" => GeometryTag::GeometryCollection,
        _ => return None,
    })
}

fn parse_number(word: &str) -> Result<f64, GeomError> {
    word.parse()
        .map_err(|_| GeomError::CorruptData(format!("expected a number, found `{word}`")))
}

fn expect_word<'a>(tokens: &mut Tokens<'a>) -> Result<&'a str, GeomError> {
    match tokens.next() {
        Some(Token::Word(word)) => Ok(word),
        _ => Err(GeomError::CorruptData(
            "expected a geometry type name".into(),
        )),
    }
}

fn expect_open(tokens: &mut Tokens) -> Result<(), GeomError> {
    match tokens.next() {
        Some(Token::Open) => Ok(()),
        _ => Err(GeomError::CorruptData("expected `(`".into())),
    }
}

fn expect_close(tokens: &mut Tokens) -> Result<(), GeomError> {
    match tokens.next() {
        Some(Token::Close) => Ok(()),
        _ => Err(GeomError::CorruptData("expected `)`".into())),
    }
}
