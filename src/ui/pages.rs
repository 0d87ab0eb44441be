//! Full-screen text pages: the about blurb and the technology showcase.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::core::project::{About, Certification, TechCategory};

pub const TECH_HEADING: &str = "Technologies I Use";
pub const TECH_INTRO: &str = "A collection of technologies, frameworks, and tools I work with \
     across development, data, and cloud.";
pub const CERT_HEADING: &str = "My Certifications";

pub struct AboutPage<'a> {
    pub about: &'a About,
    pub scroll: u16,
}

impl AboutPage<'_> {
    /// Draw the page and return the scroll actually used.
    pub fn render_scrolled(self, area: Rect, buf: &mut Buffer) -> u16 {
        let mut lines = Vec::new();
        if !self.about.heading.is_empty() {
            lines.push(Line::styled(self.about.heading.as_str(), Theme::page_heading_style()));
            lines.push(Line::raw(""));
        }
        for (i, para) in self.about.paragraphs.iter().enumerate() {
            if i > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(Line::styled(para.as_str(), Theme::page_body_style()));
        }
        render_page(" About ", lines, self.scroll, area, buf)
    }
}

pub struct TechnologiesPage<'a> {
    pub technologies: &'a [TechCategory],
    pub certifications: &'a [Certification],
    pub scroll: u16,
}

impl TechnologiesPage<'_> {
    pub fn render_scrolled(self, area: Rect, buf: &mut Buffer) -> u16 {
        let mut lines = vec![
            Line::styled(TECH_HEADING, Theme::page_heading_style()),
            Line::styled(TECH_INTRO, Theme::page_body_style()),
        ];
        for group in self.technologies {
            lines.push(Line::raw(""));
            lines.push(Line::styled(group.category.as_str(), Theme::page_heading_style()));
            lines.push(Line::styled(group.items.join(" · "), Theme::page_body_style()));
        }
        if !self.certifications.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(CERT_HEADING, Theme::page_heading_style()));
            for cert in self.certifications {
                lines.push(Line::from(vec![
                    Span::styled("• ", Theme::page_heading_style()),
                    Span::styled(cert.name.as_str(), Theme::page_body_style()),
                ]));
            }
        }
        render_page(" Technologies ", lines, self.scroll, area, buf)
    }
}

fn render_page(title: &str, lines: Vec<Line<'_>>, scroll: u16, area: Rect, buf: &mut Buffer) -> u16 {
    Clear.render(area, buf);
    let block = Block::default()
        .title(title)
        .title_style(Theme::page_heading_style())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::page_border_style())
        .padding(Padding::horizontal(2));

    // Scrolling stops with the last line still on screen.
    let scroll = scroll.min(lines.len().saturating_sub(1) as u16);
    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(area, buf);
    scroll
}
