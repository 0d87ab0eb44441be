//! Project strip renderer.
//!
//! Cards are laid out left to right at `slot × stride − offset` columns from
//! the strip's anchor, where the anchor is chosen so the card at the current
//! offset sits centred in the viewport.  Partially visible cards are drawn
//! into a scratch buffer and clipped column by column.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::spinner::LoadingIndicator;
use super::theme::Theme;
use crate::core::carousel::{CardKey, CardSlot, CarouselController};

/// Rows reserved for the thumbnail (two image pixels per row).
pub const THUMB_ROWS: u16 = 8;
/// Rows of description text shown per card.
const DESCRIPTION_ROWS: u16 = 3;
/// Tags shown before collapsing the rest into `+k`.
const MAX_TAGS: usize = 4;
/// Border + thumbnail + title + description + tags + link + border.
pub const CARD_HEIGHT: u16 = 1 + THUMB_ROWS + 1 + DESCRIPTION_ROWS + 1 + 1 + 1;
/// Section title + cards + page dots.
pub const CAROUSEL_HEIGHT: u16 = 1 + CARD_HEIGHT + 1;

/// How far the viewport extends before and after the current offset, for a
/// strip `width` columns wide showing `card_width`-column cards.
pub fn visible_window(width: u16, card_width: u16) -> (f64, f64) {
    let inset = width.saturating_sub(card_width) / 2;
    (inset as f64, (width - inset) as f64)
}

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct CarouselHitZones {
    pub prev_rect: Rect,
    pub next_rect: Rect,
}

/// The project strip widget.
pub struct CarouselWidget<'a> {
    pub carousel: &'a CarouselController,
    /// Decoded thumbnails keyed by rendered card.
    pub thumbnails: &'a HashMap<CardKey, Arc<image::RgbaImage>>,
    /// Frame counter (spinner and placeholder scanline).
    pub frame: u64,
}

impl<'a> CarouselWidget<'a> {
    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> CarouselHitZones {
        buf.set_style(area, Theme::strip_background());
        if area.height < 3 || area.width < 8 {
            return CarouselHitZones {
                prev_rect: Rect::default(),
                next_rect: Rect::default(),
            };
        }

        // ── section title ───────────────────────────────────────
        let title = "My Projects";
        let tx = area.x + area.width.saturating_sub(title.len() as u16) / 2;
        buf.set_string(tx, area.y, title, Theme::section_title_style());

        // ── cards ───────────────────────────────────────────────
        let cards_area = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            CARD_HEIGHT.min(area.height.saturating_sub(2)),
        );
        let card_width = self.carousel.tracker().geometry().card_width as u16;
        let (before, after) = visible_window(area.width, card_width);
        let anchor = cards_area.x as f64 + before;
        let current = self.carousel.current_index();
        let n = self.carousel.projects().len();

        for card in self.carousel.visible_cards(before, after) {
            let x = (anchor + card.position).round() as i32;
            let is_current = card.key.slot % n == current;
            self.render_card(&card, is_current, x, card_width, cards_area, buf);
        }

        // ── arrows ──────────────────────────────────────────────
        let arrow_y = cards_area.y + cards_area.height / 2;
        let prev_rect = Rect::new(area.x + 1, arrow_y, 3, 1);
        let next_rect = Rect::new(area.x + area.width.saturating_sub(4), arrow_y, 3, 1);
        buf.set_string(prev_rect.x, prev_rect.y, " ‹ ", Theme::arrow_style());
        buf.set_string(next_rect.x, next_rect.y, " › ", Theme::arrow_style());

        // ── page dots ───────────────────────────────────────────
        let dots_y = area.y + area.height - 1;
        let dots_width = (n * 2).saturating_sub(1) as u16;
        let dx = area.x + area.width.saturating_sub(dots_width) / 2;
        for i in 0..n {
            let glyph = if i == current { "●" } else { "○" };
            buf.set_string(dx + (i * 2) as u16, dots_y, glyph, Theme::dot_style(i == current));
        }

        CarouselHitZones {
            prev_rect,
            next_rect,
        }
    }

    /// Draw one card whose left edge is at column `x` (may be off-screen),
    /// clipped to `clip`.
    fn render_card(
        &self,
        card: &CardSlot<'_>,
        is_current: bool,
        x: i32,
        width: u16,
        clip: Rect,
        buf: &mut Buffer,
    ) {
        let scratch_area = Rect::new(0, 0, width, clip.height);
        let mut scratch = Buffer::empty(scratch_area);
        self.draw_card(card, is_current, scratch_area, &mut scratch);

        for col in 0..width {
            let sx = x + col as i32;
            if sx < clip.x as i32 || sx >= (clip.x + clip.width) as i32 {
                continue;
            }
            for row in 0..clip.height {
                let (Some(src), Some(dst)) = (
                    scratch.cell(Position::new(col, row)),
                    buf.cell_mut(Position::new(sx as u16, clip.y + row)),
                ) else {
                    continue;
                };
                *dst = src.clone();
            }
        }
    }

    fn draw_card(&self, card: &CardSlot<'_>, is_current: bool, area: Rect, buf: &mut Buffer) {
        let project = card.project;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style(is_current));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // ── thumbnail slot ──────────────────────────────────────
        let thumb_area = Rect::new(inner.x, inner.y, inner.width, THUMB_ROWS.min(inner.height));
        if card.placeholder {
            render_placeholder(&project.title, self.frame, thumb_area, buf);
        } else if let Some(img) = self.thumbnails.get(&card.key) {
            render_image_halfblocks(img, thumb_area, buf);
        } else {
            LoadingIndicator { frame: self.frame }.render(thumb_area, buf);
        }

        // ── text ────────────────────────────────────────────────
        let mut y = thumb_area.y + thumb_area.height;
        let bottom = inner.y + inner.height;
        let mut row = |h: u16| {
            let r = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), h.min(bottom.saturating_sub(y)));
            y += r.height;
            r
        };

        Paragraph::new(Span::styled(project.title.as_str(), Theme::card_title_style()))
            .render(row(1), buf);

        Paragraph::new(project.description.as_str())
            .style(Theme::card_body_style())
            .wrap(Wrap { trim: true })
            .render(row(DESCRIPTION_ROWS), buf);

        let tag_row = row(1);
        let (candidates, overflow) = project.visible_tags(MAX_TAGS);
        Paragraph::new(tag_line(candidates, overflow, tag_row.width)).render(tag_row, buf);

        let link = project
            .link
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        Paragraph::new(Line::from(vec![
            Span::styled("View Project → ", Theme::card_title_style()),
            Span::styled(link, Theme::link_style()),
        ]))
        .render(row(1), buf);
    }
}

/// Chips for as many of `candidates` as fit in `width` columns, followed by
/// a `+k` chip counting those dropped plus the `overflow` already cut.
fn tag_line(candidates: &[String], overflow: usize, width: u16) -> Line<'_> {
    const OVERFLOW_RESERVE: usize = 5;
    let avail = width as usize;
    let mut used = 0;
    let mut spans = Vec::new();
    let mut shown = 0;
    for tag in candidates {
        let w = tag.chars().count() + 3;
        let reserve = if overflow + candidates.len() > shown + 1 {
            OVERFLOW_RESERVE
        } else {
            0
        };
        if used + w + reserve > avail {
            break;
        }
        spans.push(Span::styled(format!(" {tag} "), Theme::tag_style()));
        spans.push(Span::raw(" "));
        used += w;
        shown += 1;
    }
    let more = overflow + candidates.len() - shown;
    if more > 0 {
        spans.push(Span::styled(format!(" +{more} "), Theme::tag_style()));
    }
    Line::from(spans)
}

// ─── placeholder ────────────────────────────────────────────────

const PLACEHOLDER_BG: Color = Color::Rgb(24, 24, 27);
const SCANLINE_BG: Color = Color::Rgb(40, 40, 44);
/// Frames per scanline row step (one sweep ≈ 3 s at 60 fps over 8 rows).
const SCANLINE_FRAMES_PER_ROW: u64 = 22;

/// A mock terminal standing in for a missing or broken thumbnail.  Depends
/// only on the title and the frame counter.
fn render_placeholder(title: &str, frame: u64, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    buf.set_style(area, Style::default().bg(PLACEHOLDER_BG));

    let scan_row = (frame / SCANLINE_FRAMES_PER_ROW) % area.height as u64;
    buf.set_style(
        Rect::new(area.x, area.y + scan_row as u16, area.width, 1),
        Style::default().bg(SCANLINE_BG),
    );

    let dim = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(" ●", Style::default().fg(Color::Red)),
            Span::styled(" ●", Style::default().fg(Color::Yellow)),
            Span::styled(" ●", Style::default().fg(Color::Green)),
            Span::styled(
                format!("{:>w$}", "bash ", w = (area.width as usize).saturating_sub(6)),
                dim,
            ),
        ]),
        Line::raw(""),
        Line::from(Span::styled(" $ cargo build", Style::default().fg(Color::Green))),
        Line::from(vec![
            Span::styled(" Building ", Style::default().fg(Color::Gray)),
            Span::styled(format!("\"{title}\""), Style::default().fg(Color::Yellow)),
            Span::styled("...", Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(" Done in 1.2s", dim)),
    ];
    Paragraph::new(lines).render(area, buf);
}

// ─── image preview (halfblock renderer) ─────────────────────────

/// Render a pre-resized `RgbaImage` using Unicode `▀` half-blocks (2 pixels per cell).
///
/// Aspect ratio is preserved: the image is fitted inside `area` and centred
/// horizontally.
fn render_image_halfblocks(thumb: &image::RgbaImage, area: Rect, buf: &mut Buffer) {
    use image::imageops::FilterType;

    if area.width == 0 || area.height == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;

    let src_w = thumb.width() as f64;
    let src_h = thumb.height() as f64;

    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = image::imageops::resize(thumb, fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());

    let col_offset = (area.width.saturating_sub(iw as u16)) / 2;

    for row in 0..area.height {
        let yt = (row as u32) * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        for col in 0..iw.min(area.width as u32) {
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            if let Some(cell) =
                buf.cell_mut(Position::new(area.x + col_offset + col as u16, area.y + row))
            {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}
