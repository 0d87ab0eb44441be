//! Loading indicator — a small spinner + label centred in the thumbnail slot
//! of a card whose image is still decoding.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each frame.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frames each spinner glyph is held for (at 60 fps ≈ 10 glyphs/s).
const FRAMES_PER_GLYPH: u64 = 6;

pub struct LoadingIndicator {
    /// Monotonically increasing frame counter (drives the spinner glyph).
    pub frame: u64,
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 12 || area.height == 0 {
            return;
        }

        let glyph = SPINNER_FRAMES[((self.frame / FRAMES_PER_GLYPH) as usize) % SPINNER_FRAMES.len()];
        let label = format!("{glyph} loading");

        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width) / 2;
        let y = area.y + area.height / 2;

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, y, &line, label_width);
    }
}
