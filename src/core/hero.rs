//! Floating-cube backdrop for the hero banner.
//!
//! Cubes are laid out once from a seeded RNG so a given seed always yields
//! the same field.  Each cube bobs on its own period; the renderer combines
//! the bob with the parallax offset.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability threshold above which a cube glows.
const GLOW_THRESHOLD: f64 = 0.65;

#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    /// Edge length in abstract units, `30..80`.
    pub size: f64,
    /// Horizontal position as a fraction of the banner width.
    pub x: f64,
    /// Vertical position as a fraction of the banner height.
    pub y: f64,
    pub glowing: bool,
    /// Phase delay before the bob cycle starts.
    pub delay: Duration,
    /// Full bob period, `5..10` s.
    pub period: Duration,
}

impl Cube {
    /// Vertical bob in `[0, 1]` at `elapsed`: 0 at rest, 1 at the top of the
    /// float.  Smooth at both ends (ease-in-out).
    pub fn lift(&self, elapsed: Duration) -> f64 {
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        let t = elapsed.saturating_sub(self.delay).as_secs_f64();
        let phase = (t % period) / period;
        (1.0 - (phase * std::f64::consts::TAU).cos()) / 2.0
    }

    /// Depth factor for parallax: larger cubes sit closer and move more.
    pub fn depth(&self) -> f64 {
        self.size / 80.0
    }
}

#[derive(Debug, Clone)]
pub struct CubeField {
    cubes: Vec<Cube>,
}

impl CubeField {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cubes = (0..count)
            .map(|_| Cube {
                size: rng.gen_range(30.0..80.0),
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                glowing: rng.gen::<f64>() > GLOW_THRESHOLD,
                delay: Duration::from_secs_f64(rng.gen_range(0.0..5.0)),
                period: Duration::from_secs_f64(rng.gen_range(5.0..10.0)),
            })
            .collect();
        Self { cubes }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }
}
