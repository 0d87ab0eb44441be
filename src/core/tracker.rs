//! Scroll-offset ↔ project-index bookkeeping for the tripled card strip.
//!
//! The strip renders the project list [`BUFFER_FACTOR`] times back to back.
//! Steady state keeps the offset inside the middle copy; when a passive
//! scroll pushes it towards either outer copy the tracker proposes a
//! rewrite by exactly one set width, which lands on a visually identical
//! card.

/// How many copies of the project list are rendered.
pub const BUFFER_FACTOR: usize = 3;

/// Card dimensions along the scroll axis, in the host's units (pixels for a
/// browser, columns for a terminal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub card_width: f64,
    pub gap: f64,
}

impl CardGeometry {
    pub fn new(card_width: f64, gap: f64) -> Self {
        Self { card_width, gap }
    }

    /// Distance from one card's snap position to the next.
    pub fn stride(&self) -> f64 {
        self.card_width + self.gap
    }
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self::new(400.0, 32.0)
    }
}

/// Recenter thresholds, expressed as multiples of one set width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecenterBounds {
    /// Below `low × set_width` the offset is pushed forward one set.
    pub low: f64,
    /// Above `high × set_width` the offset is pulled back one set.
    pub high: f64,
}

impl Default for RecenterBounds {
    fn default() -> Self {
        Self {
            low: 0.5,
            high: 2.5,
        }
    }
}

/// Maps raw offsets onto logical project indices for a list of `len` items.
#[derive(Debug, Clone, Copy)]
pub struct IndexTracker {
    geometry: CardGeometry,
    bounds: RecenterBounds,
    len: usize,
}

impl IndexTracker {
    /// `len` must be non-zero; the carousel constructor enforces this.
    pub fn new(geometry: CardGeometry, bounds: RecenterBounds, len: usize) -> Self {
        debug_assert!(len > 0, "tracker needs at least one project");
        Self {
            geometry,
            bounds,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn geometry(&self) -> CardGeometry {
        self.geometry
    }

    pub fn stride(&self) -> f64 {
        self.geometry.stride()
    }

    /// Pixel span of one non-repeated pass through the list.
    pub fn set_width(&self) -> f64 {
        self.stride() * self.len as f64
    }

    /// Number of rendered cards.
    pub fn rendered_len(&self) -> usize {
        self.len * BUFFER_FACTOR
    }

    /// Offset at which logical `index` sits in the middle copy.
    pub fn middle_offset(&self, index: usize) -> f64 {
        (index + self.len) as f64 * self.stride()
    }

    /// Nearest rendered slot to `offset`; may be negative or past the end
    /// while a drag overshoots.
    pub fn raw_index(&self, offset: f64) -> i64 {
        (offset / self.stride()).round() as i64
    }

    /// Logical project index (always in `0..len`) for `offset`.
    pub fn logical_index(&self, offset: f64) -> usize {
        self.raw_index(offset).rem_euclid(self.len as i64) as usize
    }

    /// The rewritten offset when `offset` has drifted out of the comfort
    /// zone around the middle copy, or `None` when it is fine where it is.
    pub fn recenter(&self, offset: f64) -> Option<f64> {
        let set = self.set_width();
        if offset < set * self.bounds.low {
            Some(offset + set)
        } else if offset > set * self.bounds.high {
            Some(offset - set)
        } else {
            None
        }
    }
}
