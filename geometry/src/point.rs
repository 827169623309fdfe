use common::{fmt_float, hash_float, DEFAULT_F64_MARGIN};
use float_cmp::ApproxEq;
use std::ops::{Add, Sub};

pub const ORIGIN: Point = Point(0., 0.);

pub const DISPLAY_PRECISION: u32 = 2;

// KEY_PRECISION is the number of decimals kept when a point is used as a lookup key
pub const KEY_PRECISION: u32 = 3;

#[derive(Clone, Copy, Debug, Default)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    // arg returns the angle of the vector from the origin to this point, in (-PI, PI]
    pub fn arg(&self) -> f64 {
        self.1.atan2(self.0)
    }

    // cross returns the z component of the cross product of the two vectors
    pub fn cross(&self, other: &Point) -> f64 {
        self.0 * other.1 - self.1 * other.0
    }

    pub fn mul(&self, val: f64) -> Point {
        Point(self.0 * val, self.1 * val)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.0.powi(2) + self.1.powi(2)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self - other).norm()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point((self.0 + other.0) / 2., (self.1 + other.1) / 2.)
    }

    // key rounds the coordinates to KEY_PRECISION decimals so nearby points collapse onto one key
    pub fn key(&self) -> (i64, i64) {
        (hash_float(self.0, KEY_PRECISION), hash_float(self.1, KEY_PRECISION))
    }

    // weighted_sum combines two points weighted by wa and wb and divides by total
    pub fn weighted_sum(a: &Point, b: &Point, wa: f64, wb: f64, total: f64) -> Point {
        Point((a.0 * wa + b.0 * wb) / total, (a.1 * wa + b.1 * wb) / total)
    }
}

impl Add for &Point {
    type Output = Point;
    fn add(self, other: &Point) -> Self::Output {
        Point(self.0 + other.0, self.1 + other.1)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Self::Output {
        &self + &other
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0.approx_eq(other.0, DEFAULT_F64_MARGIN) && self.1.approx_eq(other.1, DEFAULT_F64_MARGIN)
    }
}

impl Sub for &Point {
    type Output = Point;
    fn sub(self, other: &Point) -> Self::Output {
        Point(self.0 - other.0, self.1 - other.1)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Self::Output {
        &self - &other
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{}]",
            fmt_float::<f64>(self.0, DISPLAY_PRECISION),
            fmt_float::<f64>(self.1, DISPLAY_PRECISION)
        )
    }
}
