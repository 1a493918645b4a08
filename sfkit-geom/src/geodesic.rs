//! Spherical length and area helpers for geographic coordinates.
//!
//! These operate on the mean radius of the datum ellipsoid; a dedicated
//! geodesy subsystem can provide sub-meter accuracy, this crate only needs
//! results good enough for aggregate queries over lon/lat geometries.

use crate::coord::Coord;
use crate::srs::Datum;

/// Great-circle length of a polyline whose coordinates are lon/lat degrees.
pub(crate) fn line_length(coords: &[Coord], datum: &Datum) -> f64 {
    let radius = datum.mean_radius();
    coords
        .windows(2)
        .map(|pair| haversine(&pair[0], &pair[1]) * radius)
        .sum()
}

/// Great-circle perimeter of an implicitly closed ring.
pub(crate) fn ring_length(coords: &[Coord], datum: &Datum) -> f64 {
    let mut length = line_length(coords, datum);
    if coords.len() > 1 {
        let first = &coords[0];
        let last = &coords[coords.len() - 1];
        if first.x != last.x || first.y != last.y {
            length += haversine(last, first) * datum.mean_radius();
        }
    }
    length
}

/// Unsigned spherical area of an implicitly closed ring, in square meters.
pub(crate) fn ring_area(coords: &[Coord], datum: &Datum) -> f64 {
    if coords.len() < 3 {
        return 0.0;
    }

    let radius = datum.mean_radius();
    let mut sum = 0.0;
    for i in 0..coords.len() {
        let a = &coords[i];
        let b = &coords[(i + 1) % coords.len()];
        let lon_a = a.x.to_radians();
        let lon_b = b.x.to_radians();
        let lat_a = a.y.to_radians();
        let lat_b = b.y.to_radians();
        sum += (lon_b - lon_a) * (2.0 + lat_a.sin() + lat_b.sin());
    }

    (sum * radius * radius / 2.0).abs()
}

/// Central angle between two lon/lat positions.
fn haversine(a: &Coord, b: &Coord) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn meridian_arc_length() {
        // One degree of latitude along a meridian is about 111 km.
        let coords = [Coord::xy(0.0, 0.0), Coord::xy(0.0, 1.0)];
        let length = line_length(&coords, &Datum::WGS84);
        assert_relative_eq!(length, 111_195.0, max_relative = 0.01);
    }

    #[test]
    fn small_square_area() {
        // A 0.1 x 0.1 degree cell at the equator is about 123.6 km^2.
        let coords = [
            Coord::xy(0.0, 0.0),
            Coord::xy(0.1, 0.0),
            Coord::xy(0.1, 0.1),
            Coord::xy(0.0, 0.1),
        ];
        let area = ring_area(&coords, &Datum::WGS84);
        assert_relative_eq!(area, 123.6e6, max_relative = 0.01);
    }
}
