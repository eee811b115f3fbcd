use rand::{
    distributions::{Distribution, Uniform},
    rngs::StdRng,
    RngCore, SeedableRng,
};

/// A source of uniform draws on `[0, 1)`.
///
/// Samplers take one of these explicitly instead of reaching for a global
/// generator, so callers decide how it is seeded and who owns it.
pub trait UniformSource {
    /// The next draw on `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// A generator paired with a `Uniform(0, 1)` distribution.
pub struct Random<R = StdRng> {
    uniform: Uniform<f64>,
    rng: R,
}

impl Random<StdRng> {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Same seed, same sequence of draws.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Random<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Random<R> {
    /// Wraps an existing generator.
    pub fn from_rng(rng: R) -> Self {
        Self {
            uniform: Uniform::new(0.0, 1.0),
            rng,
        }
    }

    /// One draw on `[0, 1)`.
    pub fn sample(&mut self) -> f64 {
        self.uniform.sample(&mut self.rng)
    }
}

impl<R: RngCore> UniformSource for Random<R> {
    fn next_uniform(&mut self) -> f64 {
        self.sample()
    }
}
