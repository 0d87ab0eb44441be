//! Pointer-driven parallax with exponential smoothing.
//!
//! Input handlers only ever call [`Parallax::set_target`] with the latest
//! pointer (or tilt) sample.  The frame loop calls [`Parallax::tick`], which
//! moves the rendered position a fixed fraction of the way toward that
//! target.  Motion is therefore tied to the frame rate, not to how often the
//! terminal reports mouse movement.

/// A normalised 2-D sample: both axes in `[-1, 1]`, `(0, 0)` at the centre.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Map a cell position inside a `width × height` surface to a sample.
    pub fn from_cell(col: u16, row: u16, width: u16, height: u16) -> Self {
        let norm = |v: u16, extent: u16| {
            if extent <= 1 {
                0.0
            } else {
                (v as f64 / (extent - 1) as f64) * 2.0 - 1.0
            }
        };
        Self::new(norm(col, width), norm(row, height))
    }
}

/// Smoothed follower of the latest [`Sample`].
#[derive(Debug, Clone)]
pub struct Parallax {
    target: Sample,
    current: Sample,
    /// Fraction of the remaining distance covered per frame.
    smoothing: f64,
}

/// Below this distance the follower snaps onto the target.
const SETTLE_EPSILON: f64 = 1e-3;

impl Parallax {
    pub fn new(smoothing: f64) -> Self {
        Self {
            target: Sample::default(),
            current: Sample::default(),
            smoothing: smoothing.clamp(0.01, 1.0),
        }
    }

    /// Producer side: remember the newest input sample.
    pub fn set_target(&mut self, sample: Sample) {
        self.target = sample;
    }

    /// Consumer side: one smoothing step.  Call once per frame.
    pub fn tick(&mut self) {
        let lerp = |from: f64, to: f64| {
            let next = from + (to - from) * self.smoothing;
            if (to - next).abs() < SETTLE_EPSILON {
                to
            } else {
                next
            }
        };
        self.current = Sample {
            x: lerp(self.current.x, self.target.x),
            y: lerp(self.current.y, self.target.y),
        };
    }

    #[cfg(test)]
    pub fn current(&self) -> Sample {
        self.current
    }

    /// Displacement for a layer at `depth` (larger = moves more), in the
    /// caller's units.
    pub fn offset(&self, depth: f64) -> (f64, f64) {
        (self.current.x * depth, self.current.y * depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_maps_corners_and_centre() {
        assert_eq!(Sample::from_cell(0, 0, 81, 21), Sample::new(-1.0, -1.0));
        assert_eq!(Sample::from_cell(80, 20, 81, 21), Sample::new(1.0, 1.0));
        assert_eq!(Sample::from_cell(40, 10, 81, 21), Sample::new(0.0, 0.0));
    }

    #[test]
    fn degenerate_surface_is_centred() {
        assert_eq!(Sample::from_cell(0, 0, 1, 0), Sample::default());
    }

    #[test]
    fn tick_moves_fixed_fraction() {
        let mut p = Parallax::new(0.25);
        p.set_target(Sample::new(1.0, -1.0));
        p.tick();
        assert_eq!(p.current(), Sample { x: 0.25, y: -0.25 });
        p.tick();
        assert!((p.current().x - 0.4375).abs() < 1e-12);
    }

    #[test]
    fn converges_and_settles() {
        let mut p = Parallax::new(0.1);
        p.set_target(Sample::new(0.6, 0.2));
        for _ in 0..200 {
            p.tick();
        }
        assert_eq!(p.current(), Sample::new(0.6, 0.2));
    }

    #[test]
    fn only_latest_target_matters() {
        let mut p = Parallax::new(0.5);
        p.set_target(Sample::new(1.0, 1.0));
        p.set_target(Sample::new(-1.0, 0.0));
        p.tick();
        assert_eq!(p.current(), Sample { x: -0.5, y: 0.0 });
    }

    #[test]
    fn offset_scales_with_depth() {
        let mut p = Parallax::new(1.0);
        p.set_target(Sample::new(0.5, -0.5));
        p.tick();
        assert_eq!(p.offset(4.0), (2.0, -2.0));
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Sample::new(3.0, -9.0), Sample { x: 1.0, y: -1.0 });
    }
}
