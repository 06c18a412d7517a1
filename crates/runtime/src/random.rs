//! OS-seeded randomness for live calculations.
use rand::RngCore;
use rand::rngs::ThreadRng;
use rules_core::RandomSource;

/// [`RandomSource`] backed by the thread-local `rand` generator.
#[derive(Clone, Debug, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
