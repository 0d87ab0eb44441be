//! Input handling — maps key/mouse/tick events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use super::state::{ActiveView, AppState};
use super::thumbnails::{self, ThumbnailUpdate};
use crate::config::Action;
use crate::core::parallax::Sample;

/// Fraction of a card stride moved by one wheel notch or nudge key before
/// the strip snaps onward to the next card.
const NUDGE_FRACTION: f64 = 0.25;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Portfolio => handle_portfolio_key(state, key, now),
        ActiveView::About | ActiveView::Technologies => handle_page_key(state, key),
        ActiveView::Controls => {
            // Any key closes the overlay.
            state.active_view = ActiveView::Portfolio;
        }
    }
}

/// Switch to `view`, or back to the carousel if it is already open.
fn toggle_page(state: &mut AppState, view: ActiveView) {
    state.active_view = if state.active_view == view {
        ActiveView::Portfolio
    } else {
        view
    };
    state.page_scroll = 0;
}

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            state.active_view = ActiveView::Portfolio;
            return;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.page_scroll = state.page_scroll.saturating_add(1);
            return;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.page_scroll = state.page_scroll.saturating_sub(1);
            return;
        }
        _ => {}
    }
    match state.config.match_key(key) {
        Some(Action::ShowAbout) => toggle_page(state, ActiveView::About),
        Some(Action::ShowTechnologies) => toggle_page(state, ActiveView::Technologies),
        Some(Action::ShowControls) => state.active_view = ActiveView::Controls,
        Some(Action::Quit) => state.should_quit = true,
        _ => {}
    }
}

fn handle_portfolio_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Next => {
            state.carousel.next(now);
        }
        Action::Previous => {
            state.carousel.previous(now);
        }
        Action::NudgeLeft => nudge(state, -1.0),
        Action::NudgeRight => nudge(state, 1.0),
        Action::ShowAbout => toggle_page(state, ActiveView::About),
        Action::ShowTechnologies => toggle_page(state, ActiveView::Technologies),
        Action::OpenLink => {
            let project = state.carousel.current_project();
            tracing::info!(title = %project.title, link = %project.link, "project chosen");
            state.chosen_link = Some(project.link.clone());
            state.should_quit = true;
        }
        Action::ShowControls => {
            state.active_view = ActiveView::Controls;
        }
        Action::Quit => {
            state.should_quit = true;
        }
    }
}

/// Passive scroll by a fraction of a card in `direction` (±1), then snap
/// onto the next card that way.
fn nudge(state: &mut AppState, direction: f64) {
    let step = state.carousel.tracker().stride() * NUDGE_FRACTION;
    state.carousel.scroll_by(direction * step);
    state.carousel.snap(direction);
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let pos = Position::new(mouse.column, mouse.row);
    let zones = state.hit_zones;

    // Every pointer report feeds the parallax target, whatever the view.
    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
        state.parallax.set_target(Sample::from_cell(
            mouse.column.saturating_sub(zones.screen.x),
            mouse.row.saturating_sub(zones.screen.y),
            zones.screen.width,
            zones.screen.height,
        ));
    }

    match state.active_view {
        ActiveView::Portfolio => {}
        ActiveView::Controls => {
            if matches!(mouse.kind, MouseEventKind::Down(_)) {
                state.active_view = ActiveView::Portfolio;
            }
            return;
        }
        ActiveView::About | ActiveView::Technologies => {
            match mouse.kind {
                MouseEventKind::ScrollDown => {
                    state.page_scroll = state.page_scroll.saturating_add(1);
                }
                MouseEventKind::ScrollUp => {
                    state.page_scroll = state.page_scroll.saturating_sub(1);
                }
                _ => {}
            }
            return;
        }
    }

    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if contains(zones.carousel, pos) => {
            nudge(state, 1.0);
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if contains(zones.carousel, pos) => {
            nudge(state, -1.0);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(zones.prev_arrow, pos) {
                state.carousel.previous(now);
            } else if contains(zones.next_arrow, pos) {
                state.carousel.next(now);
            } else if contains(zones.carousel, pos) {
                state.drag_anchor = Some(mouse.column);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(anchor) = state.drag_anchor {
                // Dragging right pulls earlier cards into view.
                let delta = anchor as f64 - mouse.column as f64;
                if delta != 0.0 {
                    state.carousel.scroll_by(delta);
                }
                state.drag_anchor = Some(mouse.column);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.drag_anchor.take().is_some() {
                // Released between cards: settle on the nearest one.
                state.carousel.snap(0.0);
                tracing::trace!(offset = state.carousel.offset(), "drag released");
            }
        }
        _ => {}
    }
}

/// Advance everything that moves once per frame.
pub fn handle_tick(
    state: &mut AppState,
    now: Instant,
    thumb_tx: &mpsc::UnboundedSender<ThumbnailUpdate>,
) {
    state.frame = state.frame.wrapping_add(1);
    state.carousel.tick(now);
    state.parallax.tick();
    thumbnails::request_visible(state, thumb_tx);
}

fn contains(rect: Rect, pos: Position) -> bool {
    rect.width > 0 && rect.height > 0 && rect.contains(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossterm::event::KeyEventKind;

    use crate::app::state::HitZones;
    use crate::config::AppConfig;
    use crate::core::carousel::CarouselController;
    use crate::core::project::Catalog;
    use crate::core::tracker::IndexTracker;

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
            carousel: Rect::new(0, 10, 100, 20),
            prev_arrow: Rect::new(0, 18, 3, 1),
            next_arrow: Rect::new(97, 18, 3, 1),
            screen: Rect::new(0, 0, 100, 31),
        };
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn right_arrow_advances_once_per_animation() {
        let mut s = state();
        let now = Instant::now();
        handle_key(&mut s, press(KeyCode::Right), now);
        handle_key(&mut s, press(KeyCode::Right), now);
        assert_eq!(s.carousel.current_index(), 1);
        assert!(s.carousel.is_animating());
    }

    #[test]
    fn left_arrow_wraps_backwards() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Left), Instant::now());
        assert_eq!(s.carousel.current_index(), 5);
    }

    #[test]
    fn enter_chooses_current_link_and_quits() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Enter), Instant::now());
        assert!(s.should_quit);
        assert_eq!(
            s.chosen_link.as_deref(),
            Some("https://github.com/ayoubharati/medProject")
        );
    }

    #[test]
    fn controls_overlay_opens_and_any_key_closes() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('?')), Instant::now());
        assert_eq!(s.active_view, ActiveView::Controls);
        handle_key(&mut s, press(KeyCode::Right), Instant::now());
        assert_eq!(s.active_view, ActiveView::Portfolio);
        // The key that closed the overlay did not navigate.
        assert_eq!(s.carousel.current_index(), 0);
    }

    #[test]
    fn ctrl_c_quits_from_overlay() {
        let mut s = state();
        s.active_view = ActiveView::Controls;
        let mut ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        ev.kind = KeyEventKind::Press;
        handle_key(&mut s, ev, Instant::now());
        assert!(s.should_quit);
    }

    #[test]
    fn wheel_over_carousel_snaps_to_adjacent_card() {
        let mut s = state();
        let start = s.carousel.offset();
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 50, 15), Instant::now());
        assert_eq!(s.carousel.offset(), start + 38.0);
        assert_eq!(s.carousel.offset() % 38.0, 0.0);
        assert_eq!(s.carousel.current_index(), 1);
        assert!(!s.carousel.is_animating());

        // Outside the strip the wheel does nothing.
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 50, 2), Instant::now());
        assert_eq!(s.carousel.offset(), start + 38.0);

        handle_mouse(&mut s, mouse(MouseEventKind::ScrollUp, 50, 15), Instant::now());
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollUp, 50, 15), Instant::now());
        assert_eq!(s.carousel.offset() % 38.0, 0.0);
        assert_eq!(s.carousel.current_index(), 5);
    }

    #[test]
    fn wheel_stays_on_card_across_ticks() {
        let mut s = state();
        let (tx, _rx) = mpsc::unbounded_channel();
        let t0 = Instant::now();
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 50, 15), t0);
        for i in 0..120 {
            handle_tick(&mut s, t0 + Duration::from_millis(16 * i), &tx);
        }
        assert_eq!(s.carousel.offset() % 38.0, 0.0);
        assert_eq!(s.carousel.current_index(), 1);
    }

    #[test]
    fn nudge_keys_snap_like_the_wheel() {
        let mut s = state();
        let start = s.carousel.offset();
        handle_key(&mut s, KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT), Instant::now());
        assert_eq!(s.carousel.offset(), start + 38.0);
        handle_key(&mut s, press(KeyCode::Char('H')), Instant::now());
        assert_eq!(s.carousel.offset(), start);
        assert!(!s.carousel.is_animating());
    }

    #[test]
    fn arrow_clicks_navigate() {
        let mut s = state();
        let t0 = Instant::now();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 98, 18), t0);
        assert_eq!(s.carousel.current_index(), 1);

        let later = t0 + Duration::from_secs(1);
        handle_tick(&mut s, later, &mpsc::unbounded_channel().0);
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 1, 18), later);
        assert_eq!(s.carousel.current_index(), 0);
    }

    #[test]
    fn drag_scrolls_opposite_to_pointer() {
        let mut s = state();
        let now = Instant::now();
        let start = s.carousel.offset();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 50, 15), now);
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 15), now);
        assert_eq!(s.carousel.offset(), start + 10.0);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 40, 15), now);
        assert_eq!(s.drag_anchor, None);
        // Released a quarter card along: back onto the card we started from.
        assert_eq!(s.carousel.offset(), start);
        assert_eq!(s.carousel.offset() % 38.0, 0.0);
    }

    #[test]
    fn drag_release_snaps_to_nearest_card() {
        let mut s = state();
        let now = Instant::now();
        let start = s.carousel.offset();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 60, 15), now);
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 35, 15), now);
        assert_eq!(s.carousel.offset(), start + 25.0);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 35, 15), now);
        assert_eq!(s.carousel.offset(), start + 38.0);
        assert_eq!(s.carousel.current_index(), 1);
    }

    #[test]
    fn about_and_technologies_pages_toggle() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('a')), Instant::now());
        assert_eq!(s.active_view, ActiveView::About);
        handle_key(&mut s, press(KeyCode::Down), Instant::now());
        handle_key(&mut s, press(KeyCode::Char('j')), Instant::now());
        assert_eq!(s.page_scroll, 2);

        // Switching page resets the scroll.
        handle_key(&mut s, press(KeyCode::Char('t')), Instant::now());
        assert_eq!(s.active_view, ActiveView::Technologies);
        assert_eq!(s.page_scroll, 0);

        handle_key(&mut s, press(KeyCode::Char('t')), Instant::now());
        assert_eq!(s.active_view, ActiveView::Portfolio);
    }

    #[test]
    fn esc_leaves_page_without_quitting() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('t')), Instant::now());
        handle_key(&mut s, press(KeyCode::Esc), Instant::now());
        assert_eq!(s.active_view, ActiveView::Portfolio);
        assert!(!s.should_quit);
    }

    #[test]
    fn page_ignores_carousel_input() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('a')), Instant::now());
        handle_key(&mut s, press(KeyCode::Right), Instant::now());
        assert_eq!(s.carousel.current_index(), 0);
        assert!(!s.carousel.is_animating());

        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 50, 15), Instant::now());
        assert_eq!(s.page_scroll, 1);
        assert_eq!(s.carousel.offset(), 228.0);
    }

    #[test]
    fn pointer_motion_feeds_parallax_target() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 99, 30), Instant::now());
        s.parallax.tick();
        let cur = s.parallax.current();
        assert!(cur.x > 0.0 && cur.y > 0.0);
    }

    #[test]
    fn tick_finishes_animation() {
        let mut s = state();
        let t0 = Instant::now();
        handle_key(&mut s, press(KeyCode::Right), t0);
        let (tx, _rx) = mpsc::unbounded_channel();
        handle_tick(&mut s, t0 + Duration::from_millis(900), &tx);
        assert!(!s.carousel.is_animating());
        assert_eq!(s.carousel.offset(), 7.0 * 38.0);
    }
}
