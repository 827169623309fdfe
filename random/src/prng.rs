use common::rotate_array;
use rand::{Error, RngCore, SeedableRng};

const GOLDEN_GAMMA: u32 = 0x9e3779b9;
const TWO_POW_32: f64 = 4294967296.;

// Prng is a source of uniformly distributed floats in [0, 1)
pub trait Prng {
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> Prng for R {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }
}

// SeededRandom is a 32 bit splitmix generator: the same seed always yields the same sequence
#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> SeededRandom {
        SeededRandom { state: seed }
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state ^ (self.state >> 16);
        t = t.wrapping_mul(0x21f0aaad);
        t ^= t >> 15;
        t = t.wrapping_mul(0x735a2d97);
        t ^ (t >> 15)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRandom {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> SeededRandom {
        SeededRandom::new(u32::from_le_bytes(seed))
    }
}

// select_random picks elements[floor(r * n)], or None if there are no elements
pub fn select_random<T>(elements: &[T], r: f64) -> Option<&T> {
    if elements.is_empty() {
        return None;
    }
    let index = ((r * elements.len() as f64).floor() as usize).min(elements.len() - 1);
    elements.get(index)
}

// shuffle performs an in-place Fisher-Yates shuffle
pub fn shuffle<T, R: Prng + ?Sized>(elements: &mut [T], rng: &mut R) {
    for i in (1..elements.len()).rev() {
        let j = ((rng.next_f64() * (i + 1) as f64).floor() as usize).min(i);
        elements.swap(i, j);
    }
}

// random_rotate returns a copy of elements rotated by a random offset
pub fn random_rotate<T: Clone, R: Prng + ?Sized>(elements: &[T], rng: &mut R) -> Vec<T> {
    if elements.len() < 2 {
        return elements.to_vec();
    }
    let offset = ((rng.next_f64() * elements.len() as f64).floor() as usize).min(elements.len() - 1);
    rotate_array(elements, offset)
}
