//! Random source for the spreading engine
//!
//! Every estimate takes an explicit `RandomSource` so each Monte Carlo trial
//! owns an independent, seedable stream.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// The three kinds of draws the spreaders make
pub trait RandomSource {
    /// Uniform draw in [0, 1)
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`; `len` is never zero
    fn choose_index(&mut self, len: usize) -> usize;

    /// Inter-arrival time of a Poisson process with the given rate
    fn exponential(&mut self, rate: f64) -> f64;
}

/// `StdRng`-backed source, seeded the same way the simulators seed their runs
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: StdRng::from_seed(seed),
        }
    }

    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derive an independent child stream (one per trial)
    pub fn fork(&mut self) -> Self {
        let mut seed = [0u8; 32];
        self.rng.fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Direct access for topology generation
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn exponential(&mut self, rate: f64) -> f64 {
        // 1 - U lies in (0, 1], so the log stays finite
        let u = 1.0 - self.rng.gen::<f64>();
        -u.ln() / rate
    }
}

/// Get or generate seed
pub fn resolve_seed(seed: Option<[u8; 32]>) -> [u8; 32] {
    seed.unwrap_or_else(|| {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill(&mut seed);
        seed
    })
}

/// Parse a `0x...` hex string into a seed; missing trailing bytes are zero
pub fn parse_seed_hex(hex: &str) -> Result<[u8; 32], String> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk).map_err(|e| e.to_string())?;
        seed[i] = u8::from_str_radix(byte_str, 16)
            .map_err(|e| format!("Invalid hex seed '{}': {}", byte_str, e))?;
    }

    Ok(seed)
}

/// Fixed-answer source for forcing identical decisions in tests
#[cfg(test)]
pub(crate) struct ScriptedSource {
    uniform: f64,
    index: usize,
    delay: f64,
}

#[cfg(test)]
impl ScriptedSource {
    /// Always draws `uniform`, picks neighbor `index` (clamped), waits `delay`
    pub(crate) fn new(uniform: f64, index: usize, delay: f64) -> Self {
        Self {
            uniform,
            index,
            delay,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        self.uniform
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.index.min(len - 1)
    }

    fn exponential(&mut self, _rate: f64) -> f64 {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededSource::seed_from_u64(42);
        let mut b = SeededSource::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
            assert_eq!(a.choose_index(17), b.choose_index(17));
        }
    }

    #[test]
    fn test_forks_are_independent() {
        let mut parent = SeededSource::seed_from_u64(7);
        let mut first = parent.fork();
        let mut second = parent.fork();
        let xs: Vec<f64> = (0..8).map(|_| first.uniform()).collect();
        let ys: Vec<f64> = (0..8).map(|_| second.uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_draw_ranges() {
        let mut source = SeededSource::seed_from_u64(1);
        for _ in 0..10_000 {
            let u = source.uniform();
            assert!((0.0..1.0).contains(&u));
            assert!(source.choose_index(3) < 3);
            let e = source.exponential(1.0);
            assert!(e.is_finite() && e >= 0.0);
        }
    }

    #[test]
    fn test_exponential_mean() {
        let mut source = SeededSource::seed_from_u64(99);
        let samples = 50_000;
        let mean: f64 =
            (0..samples).map(|_| source.exponential(2.0)).sum::<f64>() / samples as f64;
        // rate 2 => mean 0.5, standard error ~0.0022
        assert!((mean - 0.5).abs() < 0.02, "mean was {}", mean);
    }

    #[test]
    fn test_parse_seed_hex() {
        let seed = parse_seed_hex("0x0102ff").unwrap();
        assert_eq!(&seed[..3], &[1, 2, 255]);
        assert!(seed[3..].iter().all(|&b| b == 0));

        assert!(parse_seed_hex("0xzz").is_err());
    }

    #[test]
    fn test_resolve_seed_keeps_explicit_seed() {
        let seed = [9u8; 32];
        assert_eq!(resolve_seed(Some(seed)), seed);
    }
}
