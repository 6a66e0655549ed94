//! Seedable xorshift64 generator used to sample emitter variances.
//! Deterministic for a given seed so editor previews replay identically.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in [-1, 1).
    pub fn next_signed(&mut self) -> f32 {
        self.next_unit() * 2.0 - 1.0
    }

    /// `base` perturbed by up to `variance` in either direction.
    pub fn vary(&mut self, base: f32, variance: f32) -> f32 {
        if variance == 0.0 {
            return base;
        }
        base + variance * self.next_signed()
    }
}
