mod prng;
mod sampler;

pub use self::prng::*;
pub use self::sampler::*;
