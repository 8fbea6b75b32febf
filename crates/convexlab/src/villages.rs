//! Seeded village layouts for the facility-location demo.
//!
//! Model
//! - `count` points drawn independently and uniformly from `[lo, hi]²`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so the CLI, tests and benches can name a layout by its token.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sampling box and number of villages.
#[derive(Clone, Copy, Debug)]
pub struct VillageCfg {
    pub count: usize,
    pub lo: f64,
    pub hi: f64,
}

impl Default for VillageCfg {
    fn default() -> Self {
        Self {
            count: 20,
            lo: 0.0,
            hi: 10.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` villages uniformly in the sampling box.
///
/// A degenerate box (`hi <= lo`) places every village at `lo`.
pub fn draw_villages(cfg: VillageCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let width = (cfg.hi - cfg.lo).max(0.0);
    (0..cfg.count)
        .map(|_| {
            let x = cfg.lo + rng.gen::<f64>() * width;
            let y = cfg.lo + rng.gen::<f64>() * width;
            Vector2::new(x, y)
        })
        .collect()
}
