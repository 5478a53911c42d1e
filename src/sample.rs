use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// A source of uniformly distributed integers for every random decision the
/// generator makes.
///
/// [`Sampler::secure`] (also the `Default`) draws from a ChaCha based CSPRNG
/// seeded by the operating system, so its output is neither predictable nor
/// reproducible. Use [`Sampler::new`] with a seeded RNG when reproducible
/// output is needed, e.g. in tests.
///
/// A sampler is not `Clone`. A copy would replay the exact same sequence of
/// decisions as the original.
#[derive(Debug)]
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler {
    /// Create a sampler seeded from the operating system's entropy source.
    ///
    /// # Panics
    ///
    /// This panics if the operating system's entropy source fails.
    pub fn secure() -> Sampler {
        Sampler { rng: StdRng::from_os_rng() }
    }
}

impl Default for Sampler {
    fn default() -> Sampler {
        Sampler::secure()
    }
}

impl<R: RngCore> Sampler<R> {
    /// Create a sampler that draws from the given random number generator.
    pub fn new(rng: R) -> Sampler<R> {
        Sampler { rng }
    }

    /// Return an integer drawn uniformly from `[0, max)`.
    ///
    /// # Panics
    ///
    /// This panics when `max` is zero. There is no integer to return in
    /// that case, and silently returning `0` would hide off-by-one bugs in
    /// callers. Callers holding a possibly empty candidate set should use
    /// [`Sampler::choose`] instead.
    pub fn below(&mut self, max: usize) -> usize {
        assert!(max > 0, "sample bound must be positive");
        self.rng.random_range(0..max)
    }

    /// Return an integer drawn uniformly from `[0, max]`.
    ///
    /// Unlike [`Sampler::below`], every `max` is valid, including
    /// `u32::MAX`.
    pub fn below_inclusive(&mut self, max: u32) -> u32 {
        self.rng.random_range(0..=max)
    }

    /// Flip a fair coin.
    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Pick an element of `items` uniformly at random, or `None` when
    /// `items` is empty.
    pub fn choose<'i, T>(&mut self, items: &'i [T]) -> Option<&'i T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}
