//! Infinite project carousel — the state machine behind the card strip.
//!
//! The controller owns the strip's scroll offset and is its only writer:
//! programmatic moves (`next` / `previous`) go through a
//! [`ScrollAnimation`], passive moves (wheel, drag) arrive as
//! [`CarouselController::on_scroll`] notifications from the host.
//!
//! ```text
//!            next() / previous()
//!   Idle ─────────────────────────▶ Animating
//!    ▲  │                              │  next()/previous() dropped
//!    │  │ on_scroll: recenter +        │  on_scroll ignored
//!    │  ▼ reindex                      │
//!   Idle ◀──────── tick(): done ───────┘
//! ```

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::animator::ScrollAnimation;
use super::project::Project;
use super::tracker::IndexTracker;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel needs at least one project")]
    NoProjects,
    #[error("card stride must be positive")]
    BadGeometry,
}

/// Identity of one rendered card: the project plus the slot it occupies in
/// the tripled strip.  The same project shows up under three keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub project_id: u32,
    pub slot: usize,
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project_id, self.slot)
    }
}

/// Per-card thumbnail bookkeeping.  A card is requested at most once and a
/// failure is permanent for the session.
#[derive(Debug, Default, Clone)]
pub struct ThumbnailStates {
    requested: HashSet<CardKey>,
    failed: HashSet<CardKey>,
}

impl ThumbnailStates {
    /// Record a load attempt.  Returns `false` if this card was already
    /// requested, in which case no new load should start.
    pub fn begin(&mut self, key: CardKey) -> bool {
        self.requested.insert(key)
    }

    pub fn mark_failed(&mut self, key: CardKey) {
        self.requested.insert(key);
        self.failed.insert(key);
    }

    pub fn has_failed(&self, key: CardKey) -> bool {
        self.failed.contains(&key)
    }
}

/// What the controller is doing right now.
#[derive(Debug, Clone, Copy)]
pub enum Phase {
    Idle,
    Animating(ScrollAnimation),
}

/// A card as the host should draw it.
#[derive(Debug, Clone, Copy)]
pub struct CardSlot<'a> {
    pub key: CardKey,
    pub project: &'a Project,
    /// Leading edge of the card relative to the current offset.
    pub position: f64,
    /// Whether this card's thumbnail should be replaced by the placeholder.
    pub placeholder: bool,
}

#[derive(Debug)]
pub struct CarouselController {
    projects: Vec<Project>,
    tracker: IndexTracker,
    duration: Duration,
    offset: f64,
    current: usize,
    phase: Phase,
    thumbnails: ThumbnailStates,
}

impl CarouselController {
    /// Build a controller pre-positioned at the start of the middle copy.
    pub fn new(
        projects: Vec<Project>,
        tracker: IndexTracker,
        duration: Duration,
    ) -> Result<Self, CarouselError> {
        if projects.is_empty() {
            return Err(CarouselError::NoProjects);
        }
        if !(tracker.stride() > 0.0) {
            return Err(CarouselError::BadGeometry);
        }
        debug_assert_eq!(projects.len(), tracker.len());
        let offset = tracker.set_width();
        Ok(Self {
            projects,
            tracker,
            duration,
            offset,
            current: 0,
            phase: Phase::Idle,
            thumbnails: ThumbnailStates::default(),
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_project(&self) -> &Project {
        &self.projects[self.current]
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn tracker(&self) -> &IndexTracker {
        &self.tracker
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    #[cfg(test)]
    pub fn thumbnails(&self) -> &ThumbnailStates {
        &self.thumbnails
    }

    pub fn thumbnails_mut(&mut self) -> &mut ThumbnailStates {
        &mut self.thumbnails
    }

    /// Advance one project.  Returns `false` when dropped because an
    /// animation is already running.
    pub fn next(&mut self, now: Instant) -> bool {
        let n = self.projects.len();
        self.go_to((self.current + 1) % n, now)
    }

    /// Step back one project.  Returns `false` when dropped.
    pub fn previous(&mut self, now: Instant) -> bool {
        let n = self.projects.len();
        self.go_to((self.current + n - 1) % n, now)
    }

    fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if self.is_animating() {
            tracing::trace!(index, "navigation dropped while animating");
            return false;
        }
        self.current = index;
        let target = self.tracker.middle_offset(index);
        tracing::debug!(index, from = self.offset, to = target, "scroll animation start");
        self.phase = Phase::Animating(ScrollAnimation::new(
            self.offset,
            target,
            now,
            self.duration,
        ));
        true
    }

    /// Advance the running animation to `now`.  Returns `true` while frames
    /// are still needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Phase::Animating(anim) = self.phase else {
            return false;
        };
        let frame = anim.sample(now);
        self.offset = frame.offset();
        if !frame.is_done() {
            return true;
        }
        self.phase = Phase::Idle;
        tracing::debug!(
            offset = self.offset,
            target = anim.target(),
            index = self.current,
            "scroll animation done"
        );
        false
    }

    /// Passive scroll notification: the host moved the strip to `offset`
    /// (wheel, drag, native scrolling).  Ignored while an animation owns
    /// the offset.
    pub fn on_scroll(&mut self, offset: f64) {
        if self.is_animating() {
            return;
        }
        self.offset = match self.tracker.recenter(offset) {
            Some(rewritten) => {
                tracing::trace!(from = offset, to = rewritten, "recenter");
                rewritten
            }
            None => offset,
        };
        let index = self.tracker.logical_index(offset);
        if index != self.current {
            self.current = index;
        }
    }

    /// Convenience for hosts that report deltas rather than absolutes.
    pub fn scroll_by(&mut self, delta: f64) {
        self.on_scroll(self.offset + delta);
    }

    /// Settle a passive scroll onto a card boundary.  A positive `bias`
    /// takes the next boundary at or after the offset, a negative one the
    /// boundary at or before it, zero the nearest.  Goes through
    /// [`on_scroll`](Self::on_scroll), so it never animates and is ignored
    /// while an animation runs.
    pub fn snap(&mut self, bias: f64) {
        let stride = self.tracker.stride();
        let slots = self.offset / stride;
        let slot = if bias > 0.0 {
            slots.ceil()
        } else if bias < 0.0 {
            slots.floor()
        } else {
            slots.round()
        };
        let target = slot * stride;
        if target != self.offset {
            self.on_scroll(target);
        }
    }

    /// Cards overlapping the window `[offset - before, offset + after]`,
    /// in slot order.
    pub fn visible_cards(&self, before: f64, after: f64) -> Vec<CardSlot<'_>> {
        let stride = self.tracker.stride();
        let width = self.tracker.geometry().card_width;
        let n = self.projects.len();
        let lo = self.offset - before;
        let hi = self.offset + after;

        let first = ((lo - width) / stride).ceil().max(0.0) as usize;
        let last = ((hi / stride).floor().max(0.0) as usize).min(self.tracker.rendered_len() - 1);

        (first..=last)
            .filter_map(|slot| {
                let position = slot as f64 * stride - self.offset;
                let start = slot as f64 * stride;
                if start + width < lo || start > hi {
                    return None;
                }
                let project = &self.projects[slot % n];
                let key = CardKey {
                    project_id: project.id,
                    slot,
                };
                Some(CardSlot {
                    key,
                    project,
                    position,
                    placeholder: project.thumbnail.is_none() || self.thumbnails.has_failed(key),
                })
            })
            .collect()
    }
}
