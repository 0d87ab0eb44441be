//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::carousel::CAROUSEL_HEIGHT;

/// Primary screen layout: hero banner, project carousel, status bar.
pub struct AppLayout {
    pub hero_area: Rect,
    pub carousel_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),                  // hero (takes all remaining space)
                Constraint::Length(CAROUSEL_HEIGHT), // project strip
                Constraint::Length(1),               // status bar
            ])
            .split(area);

        Self {
            hero_area: chunks[0],
            carousel_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Hero and carousel together, where the full-screen pages go.
    pub fn body_area(&self) -> Rect {
        self.hero_area.union(self.carousel_area)
    }
}
