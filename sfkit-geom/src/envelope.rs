//! Axis-aligned bounding rectangles.

use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// Axis-aligned bounding rectangle of a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<N = f64> {
    /// Left bound.
    pub x_min: N,
    /// Bottom bound.
    pub y_min: N,
    /// Right bound.
    pub x_max: N,
    /// Top bound.
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd> Envelope<N> {
    /// Creates a new envelope.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Envelope with all bounds set to zero.
    ///
    /// This is what aggregate envelope queries return for geometries with no
    /// non-empty parts.
    pub fn zero() -> Self {
        Self {
            x_min: N::zero(),
            y_min: N::zero(),
            x_max: N::zero(),
            y_max: N::zero(),
        }
    }

    /// Width of the envelope.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the envelope.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Smallest envelope containing both inputs.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: if self.x_min < other.x_min {
                self.x_min
            } else {
                other.x_min
            },
            y_min: if self.y_min < other.y_min {
                self.y_min
            } else {
                other.y_min
            },
            x_max: if self.x_max > other.x_max {
                self.x_max
            } else {
                other.x_max
            },
            y_max: if self.y_max > other.y_max {
                self.y_max
            } else {
                other.y_max
            },
        }
    }
}

impl<N: Num + Copy + PartialOrd> Default for Envelope<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl Envelope<f64> {
    /// Bounding rectangle of a coordinate sequence, or `None` when the
    /// sequence is empty.
    pub fn from_coords<'a>(mut coords: impl Iterator<Item = &'a Coord>) -> Option<Self> {
        let first = coords.next()?;
        let mut env = Envelope::new(first.x, first.y, first.x, first.y);

        for c in coords {
            if env.x_min > c.x {
                env.x_min = c.x;
            }
            if env.y_min > c.y {
                env.y_min = c.y;
            }
            if env.x_max < c.x {
                env.x_max = c.x;
            }
            if env.y_max < c.y {
                env.y_max = c.y;
            }
        }

        Some(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_extends_bounds() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0);
        let b = Envelope::new(-1.0, 0.5, 0.5, 2.0);
        assert_eq!(a.merge(b), Envelope::new(-1.0, 0.0, 1.0, 2.0));
    }

    #[test]
    fn from_coords_empty() {
        assert_eq!(Envelope::from_coords([].iter()), None);
    }
}
