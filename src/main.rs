//! A terminal portfolio: an infinite project carousel under a parallax hero.
//!
//! Run the binary to browse the built-in catalog, or pass a TOML catalog.
//! Pressing Enter on a project prints its link to stdout, so the chooser
//! composes with shell pipelines (`folio | xargs xdg-open`).

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    widgets::{Paragraph, Widget},
    Terminal,
};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState, HitZones},
    thumbnails::{self, ThumbnailUpdate},
};
use crate::core::carousel::CarouselController;
use crate::core::project::Catalog;
use crate::core::tracker::IndexTracker;
use crate::ui::{
    carousel::CarouselWidget,
    hero::HeroWidget,
    layout::AppLayout,
    pages::{AboutPage, TechnologiesPage},
    popup::ControlsPopup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Infinite project carousel for the terminal")]
struct Cli {
    /// Project catalog (TOML).  Defaults to the built-in showcase.
    catalog: Option<PathBuf>,

    /// Frames per second for animation.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for the hero cube layout (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut user_config = config::AppConfig::load();
    if let Some(seed) = cli.seed {
        user_config.hero.seed = seed;
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── build the carousel ────────────────────────────────────
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    tracing::info!(projects = catalog.projects().len(), "catalog ready");
    let (projects, profile) = catalog.into_parts();
    let tracker = IndexTracker::new(
        user_config.carousel.geometry(),
        user_config.carousel.recenter,
        projects.len(),
    );
    let carousel = CarouselController::new(projects, tracker, user_config.carousel.scroll_duration)
        .context("building carousel")?;
    let mut state = AppState::new(carousel, profile, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let fps = cli.fps.clamp(1, 240);
    let result = run(&mut terminal, &mut state, Duration::from_secs_f64(1.0 / fps as f64)).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result?;

    if let Some(link) = &state.chosen_link {
        println!("{link}");
    }

    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    frame_interval: Duration,
) -> Result<()> {
    let mut events = spawn_event_reader(frame_interval);
    let (thumb_tx, mut thumb_rx) = mpsc::unbounded_channel::<ThumbnailUpdate>();

    loop {
        terminal.draw(|frame| {
            let screen = frame.area();
            let layout = AppLayout::from_area(screen);

            match state.active_view {
                ActiveView::About => {
                    state.page_scroll = AboutPage {
                        about: &state.profile.about,
                        scroll: state.page_scroll,
                    }
                    .render_scrolled(layout.body_area(), frame.buffer_mut());
                    // Nothing to click or load behind a page.
                    state.hit_zones = HitZones { screen, ..HitZones::default() };
                }
                ActiveView::Technologies => {
                    state.page_scroll = TechnologiesPage {
                        technologies: &state.profile.technologies,
                        certifications: &state.profile.certifications,
                        scroll: state.page_scroll,
                    }
                    .render_scrolled(layout.body_area(), frame.buffer_mut());
                    state.hit_zones = HitZones { screen, ..HitZones::default() };
                }
                ActiveView::Portfolio | ActiveView::Controls => {
                    HeroWidget {
                        cubes: state.cubes.cubes(),
                        parallax: &state.parallax,
                        elapsed: state.started_at.elapsed(),
                    }
                    .render(layout.hero_area, frame.buffer_mut());

                    let zones = CarouselWidget {
                        carousel: &state.carousel,
                        thumbnails: &state.thumbnails,
                        frame: state.frame,
                    }
                    .render_and_hit(layout.carousel_area, frame.buffer_mut());

                    state.hit_zones = HitZones {
                        carousel: layout.carousel_area,
                        prev_arrow: zones.prev_rect,
                        next_arrow: zones.next_rect,
                        screen,
                    };
                }
            }

            render_status(state, layout.status_area, frame.buffer_mut());

            if state.active_view == ActiveView::Controls {
                frame.render_widget(ControlsPopup { config: &state.config }, screen);
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
                    AppEvent::Resize(w, h) => {
                        tracing::debug!(w, h, "terminal resized");
                    }
                    AppEvent::Tick => handler::handle_tick(state, now, &thumb_tx),
                }
            }

            Some(update) = thumb_rx.recv() => {
                thumbnails::apply_update(state, update);
                // Drain everything currently queued without blocking.
                while let Ok(update) = thumb_rx.try_recv() {
                    thumbnails::apply_update(state, update);
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

/// Bottom bar: key hints (or a transient message) on the left, the current
/// project on the right.
fn render_status(state: &AppState, area: Rect, buf: &mut ratatui::buffer::Buffer) {
    let hint = if state.active_view.is_page() {
        state.config.page_hint()
    } else {
        state.config.status_bar_hint()
    };
    let left = state.status_message.as_deref().unwrap_or(&hint);
    Paragraph::new(left)
        .style(Theme::status_bar_style())
        .render(area, buf);

    let project = state.carousel.current_project();
    let position = format!(
        "{} / {} · {} ",
        state.carousel.current_index() + 1,
        state.carousel.projects().len(),
        project.title
    );
    Paragraph::new(position)
        .style(Theme::status_bar_style())
        .alignment(Alignment::Right)
        .render(area, buf);
}
