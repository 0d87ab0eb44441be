//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

const FOREST: Color = Color::Rgb(6, 63, 31);
const DEEP_FOREST: Color = Color::Rgb(4, 42, 21);
const GOLD: Color = Color::Rgb(255, 215, 0);
const GLOW: Color = Color::Rgb(228, 234, 107);

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── hero ───────────────────────────────────────────────────
    pub fn hero_background() -> Style {
        Style::default().bg(FOREST)
    }

    pub fn hero_title_style() -> Style {
        Style::default()
            .fg(GOLD)
            .bg(FOREST)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hero_subtitle_style() -> Style {
        Style::default().fg(GOLD).bg(FOREST)
    }

    pub fn cube_style(glowing: bool) -> Style {
        if glowing {
            Style::default().fg(GLOW).bg(FOREST)
        } else {
            Style::default().fg(Color::Rgb(70, 70, 70)).bg(FOREST)
        }
    }

    // ── carousel ───────────────────────────────────────────────
    pub fn strip_background() -> Style {
        Style::default().bg(DEEP_FOREST)
    }

    pub fn section_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(DEEP_FOREST)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_border_style(current: bool) -> Style {
        if current {
            Style::default().fg(GOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn tag_style() -> Style {
        Style::default().fg(Color::Black).bg(Color::Gray)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(GOLD)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn arrow_style() -> Style {
        Style::default()
            .fg(FOREST)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default().fg(GOLD).bg(DEEP_FOREST)
        } else {
            Style::default().fg(Color::DarkGray).bg(DEEP_FOREST)
        }
    }

    // ── pages ──────────────────────────────────────────────────
    pub fn page_heading_style() -> Style {
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
    }

    pub fn page_body_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn page_border_style() -> Style {
        Style::default().fg(FOREST)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
