//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;

use super::thumbnails::ThumbnailJobs;
use crate::config::AppConfig;
use crate::core::carousel::{CardKey, CarouselController};
use crate::core::hero::CubeField;
use crate::core::parallax::Parallax;
use crate::core::project::Profile;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Portfolio,
    /// Full-screen about page.
    About,
    /// Full-screen technology and certification showcase.
    Technologies,
    Controls,
}

impl ActiveView {
    /// Whether this view replaces the hero and carousel with a text page.
    pub fn is_page(self) -> bool {
        matches!(self, ActiveView::About | ActiveView::Technologies)
    }
}

/// Screen regions recorded at draw time, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitZones {
    pub carousel: Rect,
    pub prev_arrow: Rect,
    pub next_arrow: Rect,
    /// Full terminal area (parallax samples are relative to it).
    pub screen: Rect,
}

/// Top-level application state.
pub struct AppState {
    /// The carousel state machine; sole owner of the strip's offset.
    pub carousel: CarouselController,
    /// Smoothed pointer follower for the hero backdrop.
    pub parallax: Parallax,
    /// Decorative cubes behind the hero title.
    pub cubes: CubeField,
    /// Decoded, downsized thumbnails keyed by rendered card.
    pub thumbnails: HashMap<CardKey, Arc<image::RgbaImage>>,
    /// Decodes in flight and finished, shared between copies of a project.
    pub thumbnail_jobs: ThumbnailJobs,
    /// About text, technologies and certifications.
    pub profile: Profile,
    /// First visible line of the open page.
    pub page_scroll: u16,
    /// When the app started; drives the cube bob animation.
    pub started_at: Instant,
    /// Frames drawn so far (spinner and scanline phase).
    pub frame: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Link chosen by the user, printed to stdout on exit.
    pub chosen_link: Option<String>,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User configuration.
    pub config: AppConfig,
    /// Regions from the most recent frame.
    pub hit_zones: HitZones,
    /// Column of the last left-button press/drag, for drag scrolling.
    pub drag_anchor: Option<u16>,
}

impl AppState {
    pub fn new(carousel: CarouselController, profile: Profile, config: AppConfig) -> Self {
        Self {
            carousel,
            parallax: Parallax::new(config.hero.parallax_smoothing),
            cubes: CubeField::generate(config.hero.cubes, config.hero.seed),
            thumbnails: HashMap::new(),
            thumbnail_jobs: ThumbnailJobs::default(),
            profile,
            page_scroll: 0,
            started_at: Instant::now(),
            frame: 0,
            should_quit: false,
            chosen_link: None,
            status_message: None,
            active_view: ActiveView::default(),
            config,
            hit_zones: HitZones::default(),
            drag_anchor: None,
        }
    }
}
