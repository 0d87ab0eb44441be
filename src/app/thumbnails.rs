//! Background thumbnail decoding to keep the UI thread responsive.
//!
//! Each rendered card gets its own request, so the three copies of a
//! project load (and may fail) independently.  A card is never requested
//! twice; a failure leaves the placeholder in place for the session.
//! Cards that ask for a file already being decoded wait on that decode
//! instead of starting another one.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;
use tokio::sync::mpsc;

use super::state::AppState;
use crate::core::carousel::CardKey;
use crate::ui::carousel::{visible_window, THUMB_ROWS};

pub struct ThumbnailUpdate {
    pub path: PathBuf,
    pub result: anyhow::Result<Arc<RgbaImage>>,
}

/// Decode bookkeeping by file.
#[derive(Debug, Default)]
pub struct ThumbnailJobs {
    /// Cards waiting on a decode in flight.
    waiting: HashMap<PathBuf, Vec<CardKey>>,
    /// Finished decodes, handed straight to later copies.
    decoded: HashMap<PathBuf, Arc<RgbaImage>>,
}

impl ThumbnailJobs {
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.waiting.len()
    }
}

/// Start loads for every visible card that has a thumbnail reference and
/// has not been requested yet.
pub fn request_visible(state: &mut AppState, tx: &mpsc::UnboundedSender<ThumbnailUpdate>) {
    let area = state.hit_zones.carousel;
    if area.width == 0 {
        return;
    }
    let card_width = state.config.carousel.card_width;
    let (before, after) = visible_window(area.width, card_width);

    let wanted: Vec<(CardKey, PathBuf)> = state
        .carousel
        .visible_cards(before, after)
        .into_iter()
        .filter_map(|card| Some((card.key, card.project.thumbnail.clone()?)))
        .collect();

    for (key, path) in wanted {
        if !state.carousel.thumbnails_mut().begin(key) {
            continue;
        }
        let jobs = &mut state.thumbnail_jobs;
        if let Some(img) = jobs.decoded.get(&path) {
            state.thumbnails.insert(key, Arc::clone(img));
            continue;
        }
        if let Some(waiters) = jobs.waiting.get_mut(&path) {
            waiters.push(key);
            continue;
        }
        tracing::debug!(%key, path = %path.display(), "thumbnail requested");
        jobs.waiting.insert(path.clone(), vec![key]);
        spawn_load(tx.clone(), path, card_width as u32, (THUMB_ROWS * 2) as u32);
    }
}

fn spawn_load(tx: mpsc::UnboundedSender<ThumbnailUpdate>, path: PathBuf, max_w: u32, max_h: u32) {
    std::thread::spawn(move || {
        let result = image::open(&path)
            .with_context(|| format!("decoding {}", path.display()))
            .map(|img| Arc::new(img.thumbnail(max_w, max_h).to_rgba8()));
        let _ = tx.send(ThumbnailUpdate { path, result });
    });
}

/// Fold a finished decode into the state, for every card waiting on it.
pub fn apply_update(state: &mut AppState, update: ThumbnailUpdate) {
    let waiters = state
        .thumbnail_jobs
        .waiting
        .remove(&update.path)
        .unwrap_or_default();
    match update.result {
        Ok(img) => {
            for key in waiters {
                state.thumbnails.insert(key, Arc::clone(&img));
            }
            state.thumbnail_jobs.decoded.insert(update.path, img);
        }
        Err(err) => {
            tracing::warn!(path = %update.path.display(), "thumbnail failed: {err:#}");
            let Some(&first) = waiters.first() else {
                return;
            };
            for key in waiters {
                state.carousel.thumbnails_mut().mark_failed(key);
            }
            // Failures are not remembered by path: another copy that scrolls
            // into view later gets its own attempt.
            if let Some(project) = state
                .carousel
                .projects()
                .iter()
                .find(|p| p.id == first.project_id)
            {
                state.status_message = Some(format!("No thumbnail for {}", project.title));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use crate::app::state::HitZones;
    use crate::config::AppConfig;
    use crate::core::carousel::CarouselController;
    use crate::core::project::Catalog;
    use crate::core::tracker::IndexTracker;
    use crate::ui::carousel::CarouselWidget;

    const PHARMA_COVER: &str = "assets/pharmachain_cover.png";

    /// Built-in catalog on a 100-column strip: slots 5, 6 and 7 are in view
    /// (Smart Rehab, PharmaChain, MarkerGo).
    fn state() -> AppState {
        let config = AppConfig::default();
        let (projects, profile) = Catalog::builtin().into_parts();
        let tracker = IndexTracker::new(
            config.carousel.geometry(),
            config.carousel.recenter,
            projects.len(),
        );
        let carousel =
            CarouselController::new(projects, tracker, config.carousel.scroll_duration).unwrap();
        let mut state = AppState::new(carousel, profile, config);
        state.hit_zones = HitZones {
            carousel: Rect::new(0, 10, 100, 18),
            ..HitZones::default()
        };
        state
    }

    fn pharma(slot: usize) -> CardKey {
        CardKey { project_id: 1, slot }
    }

    /// Requests every visible card, then waits for all decodes to report.
    fn load_all(state: &mut AppState) -> usize {
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_visible(state, &tx);
        drop(tx);
        let mut decodes = 0;
        while let Some(update) = rx.blocking_recv() {
            decodes += 1;
            apply_update(state, update);
        }
        decodes
    }

    fn render(state: &AppState) -> String {
        let area = Rect::new(0, 0, 100, crate::ui::carousel::CAROUSEL_HEIGHT);
        let mut buf = Buffer::empty(area);
        CarouselWidget {
            carousel: &state.carousel,
            thumbnails: &state.thumbnails,
            frame: 0,
        }
        .render_and_hit(area, &mut buf);
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn each_card_is_requested_once() {
        let mut s = state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_visible(&mut s, &tx);
        // Two files in view; MarkerGo has no cover.
        assert_eq!(s.thumbnail_jobs.in_flight(), 2);
        request_visible(&mut s, &tx);
        assert_eq!(s.thumbnail_jobs.in_flight(), 2);
        drop(tx);

        let mut decodes = 0;
        while let Some(update) = rx.blocking_recv() {
            decodes += 1;
            apply_update(&mut s, update);
        }
        assert_eq!(decodes, 2);
        assert_eq!(s.thumbnail_jobs.in_flight(), 0);

        // Failed cards are not retried.
        assert_eq!(load_all(&mut s), 0);
    }

    #[test]
    fn failure_marks_only_that_copy() {
        let mut s = state();
        // No covers ship with the built-in catalog, so both decodes fail.
        load_all(&mut s);

        assert!(s.carousel.thumbnails().has_failed(pharma(6)));
        assert!(!s.carousel.thumbnails().has_failed(pharma(12)));
        assert!(s.thumbnails.is_empty());
        assert!(s.status_message.as_deref().is_some_and(|m| m.starts_with("No thumbnail for")));

        let card = s
            .carousel
            .visible_cards(32.0, 68.0)
            .into_iter()
            .find(|c| c.key == pharma(6))
            .expect("PharmaChain in view");
        assert!(card.placeholder);
        assert!(render(&s).contains("\"PharmaChain\""));
    }

    #[test]
    fn success_is_cached_per_card_and_shared_by_copies() {
        let mut s = state();
        let (tx, rx) = mpsc::unbounded_channel();
        request_visible(&mut s, &tx);
        drop(rx);

        let img = Arc::new(RgbaImage::from_pixel(4, 4, image::Rgba([200, 30, 30, 255])));
        apply_update(
            &mut s,
            ThumbnailUpdate {
                path: PathBuf::from(PHARMA_COVER),
                result: Ok(Arc::clone(&img)),
            },
        );
        assert!(Arc::ptr_eq(&s.thumbnails[&pharma(6)], &img));
        assert!(!s.carousel.thumbnails().has_failed(pharma(6)));
        assert!(render(&s).contains('▀'));

        // Bring the next PharmaChain copy into view: it reuses the decode.
        s.carousel.on_scroll(12.0 * 38.0);
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_visible(&mut s, &tx);
        drop(tx);
        assert!(rx.blocking_recv().is_none());
        assert!(Arc::ptr_eq(&s.thumbnails[&pharma(12)], &img));
    }

    #[test]
    fn late_result_with_no_waiters_is_ignored() {
        let mut s = state();
        apply_update(
            &mut s,
            ThumbnailUpdate {
                path: PathBuf::from(PHARMA_COVER),
                result: Err(anyhow::anyhow!("gone")),
            },
        );
        assert_eq!(s.status_message, None);
        assert!(s.thumbnails.is_empty());
    }
}
