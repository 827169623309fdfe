use itertools::Itertools;
use num_traits::{cast::NumCast, Float};
use std::{
    collections::HashMap,
    f64::consts::{PI, TAU},
    hash::Hash,
};

pub use float_cmp;

// EPSILON is the tolerance used for angle and length comparisons across the workspace
pub const EPSILON: f64 = 1e-5;
pub const DEFAULT_F64_MARGIN: (f64, i64) = (EPSILON, 4);
pub const DEFAULT_PRECISION: u32 = 5;

pub const DEG2RAD: f64 = PI / 180.;
pub const RAD2DEG: f64 = 180. / PI;

// approx_eq asserts that two floats are equal within EPSILON
#[macro_export]
macro_rules! approx_eq {
    ($t:ty, $a:expr, $b:expr) => {{
        let (a, b): ($t, $t) = ($a, $b);
        assert!(
            $crate::float_cmp::approx_eq!($t, a, b, epsilon = $crate::EPSILON),
            "assertion failed: `{:?}` is not approximately equal to `{:?}`",
            a,
            b,
        );
    }};
}

// fmt_float formats a float with a fixed number of decimal digits
pub fn fmt_float<F: Float>(f: F, decimal_precision: u32) -> String {
    let pow = 10_i64.pow(decimal_precision);
    let i = (f * NumCast::from(pow).unwrap_or_else(F::one)).round().to_i64().unwrap_or(0);
    let sign = if i < 0 { "-" } else { "" };
    if decimal_precision == 0 {
        return format!("{}{}", sign, i.abs());
    }
    format!(
        "{}{}.{:0width$}",
        sign,
        (i / pow).abs(),
        (i % pow).abs(),
        width = decimal_precision as usize,
    )
}

// hash_float multiplies f by a power of 10 then cuts off all fractional digits by rounding
pub fn hash_float<F: Float>(f: F, decimal_precision: u32) -> i64 {
    (f * NumCast::from(10_i64.pow(decimal_precision)).unwrap_or_else(F::one))
        .round()
        .to_i64()
        .unwrap_or(0)
}

// rad normalizes an angle in radians into [0, TAU)
pub fn rad(angle: f64) -> f64 {
    let angle = angle % TAU;
    if angle < 0. { angle + TAU } else { angle }
}

pub fn deg2rad(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

pub fn rad2deg(radians: f64) -> f64 {
    radians * RAD2DEG
}

// wrap_index returns the index found by moving delta steps from index in a cycle of the given size
pub fn wrap_index(size: usize, index: usize, delta: isize) -> usize {
    let size = size as isize;
    ((index as isize + (delta % size) + size) % size) as usize
}

// rotate_array returns a copy of arr with result[i] = arr[i + offset]
pub fn rotate_array<T: Clone>(arr: &[T], offset: usize) -> Vec<T> {
    let n = arr.len();
    (0..n).map(|i| arr[(i + offset) % n].clone()).collect()
}

// map_to_index replaces each element by the order in which its value was first seen
pub fn map_to_index<T: Hash + Eq>(arr: &[T]) -> Vec<usize> {
    let mut seen: HashMap<&T, usize> = HashMap::with_capacity(arr.len());
    arr.iter()
        .map(|value| {
            let next = seen.len();
            *seen.entry(value).or_insert(next)
        })
        .collect()
}

// canonical_rotation returns the lexicographically smallest cyclic rotation of seq,
// so that [1, 2, 0] and [0, 1, 2] share one key
pub fn canonical_rotation<T: Ord + Clone>(seq: &[T]) -> Vec<T> {
    (0..seq.len().max(1))
        .map(|r| rotate_array(seq, r))
        .min()
        .unwrap_or_default()
}

// is_cyclic_rotation checks whether b equals a after some rotation
pub fn is_cyclic_rotation<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    n == 0 || (0..n).any(|r| (0..n).all(|i| a[i] == b[(i + r) % n]))
}

// divisors lists all divisors of n in ascending order
pub fn divisors(n: usize) -> Vec<usize> {
    (1..=n).filter(|d| n % d == 0).collect_vec()
}
