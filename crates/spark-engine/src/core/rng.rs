//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic across platforms, so a given seed always lays out the same field.

/// Seedable pseudo-random number generator (xorshift64).
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

    /// Uniform float in [0, 1), using the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [min, max). Returns `min` when the range is empty.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        let v = min + self.next_f64() * (max - min);
        // Rounding can land exactly on `max` for wide ranges.
        if v >= max {
            min
        } else {
            v
        }
    }

    /// Uniform float in [min, max], both ends reachable.
    pub fn range_inclusive(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        let t = (self.next_u64() >> 11) as f64 / ((1u64 << 53) - 1) as f64;
        (min + t * (max - min)).clamp(min, max)
    }
}
