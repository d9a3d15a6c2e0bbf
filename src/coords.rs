//! Schematic coordinates and the spatial key comparator.
//!
//! Wire endpoints and pin positions come out of geometric construction with
//! floating-point jitter, so two points are treated as the same electrical
//! point when they agree within [`HASH_EPSILON`] on both axes.
//! [`coords_hash`] and [`coords_equal`] are meant to be used together when
//! indexing nodes by position.

use std::fmt;
use std::ops::{Add, Sub};

/// Maximum per-axis difference for two coordinates to be the same point.
pub const HASH_EPSILON: f64 = 1e-3;

/// Maximum cross-product magnitude for a point to count as lying on a wire's line.
pub const ON_WIRE_EPSILON: f64 = 1e-5;

/// A position (or a length vector) in schematic space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

impl Coords {
    pub const ORIGIN: Coords = Coords { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Coords {
    type Output = Coords;

    fn add(self, rhs: Coords) -> Coords {
        Coords::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coords {
    type Output = Coords;

    fn sub(self, rhs: Coords) -> Coords {
        Coords::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Coords {
    fn from((x, y): (f64, f64)) -> Self {
        Coords::new(x, y)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const HALF_WORD: u32 = u32::BITS / 2;
const HALF_MASK: u32 = (1 << HALF_WORD) - 1;

/// Hash a coordinate for bucketed lookup.
///
/// Each axis is rounded to the nearest integer and truncated to half a word;
/// `y` lands in the high half and `x` in the low half. Rounding (rather than
/// truncating toward zero) keeps points that [`coords_equal`] considers
/// identical in the same bucket, except for points straddling a half-integer
/// boundary. Lookups that must be exact should also probe the neighbours of
/// the query point, as [`NodeStore`](crate::NodeStore) does.
pub fn coords_hash(c: &Coords) -> u32 {
    let x = (c.x.round() as i64 as u32) & HALF_MASK;
    let y = (c.y.round() as i64 as u32) & HALF_MASK;
    (y << HALF_WORD) | x
}

/// Authoritative "same electrical point" test.
pub fn coords_equal(a: &Coords, b: &Coords) -> bool {
    (a.y - b.y).abs() <= HASH_EPSILON && (a.x - b.x).abs() <= HASH_EPSILON
}

/// Check whether `p` lies on the infinite line through `start` and `end`.
///
/// This is a collinearity test only; it does not check that `p` falls between
/// the two endpoints.
pub fn on_the_wire(p: &Coords, start: &Coords, end: &Coords) -> bool {
    let cross = (end.y - start.y) * (p.x - start.x) - (end.x - start.x) * (p.y - start.y);
    cross.abs() < ON_WIRE_EPSILON
}
