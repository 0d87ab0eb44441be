//! Hero banner: floating cubes behind a centred title.

use std::time::Duration;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;
use crate::core::hero::Cube;
use crate::core::parallax::Parallax;

pub const TITLE: &str = "Innovate with Ayoub";
pub const SUBTITLE: &str =
    "Unlocking Cutting-Edge Solutions Through Software Engineering Excellence";

/// Rows a cube rises at the top of its bob.
const BOB_ROWS: f64 = 2.0;
/// Columns a depth-1.0 cube moves at full pointer deflection.
const PARALLAX_COLS: f64 = 4.0;
/// Rows a depth-1.0 cube moves at full pointer deflection.
const PARALLAX_ROWS: f64 = 2.0;

pub struct HeroWidget<'a> {
    pub cubes: &'a [Cube],
    pub parallax: &'a Parallax,
    /// Time since start-up (drives the bob).
    pub elapsed: Duration,
}

impl<'a> Widget for HeroWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::hero_background());
        if area.width == 0 || area.height == 0 {
            return;
        }

        for cube in self.cubes {
            self.draw_cube(cube, area, buf);
        }

        if area.height < 3 {
            return;
        }
        let title_y = area.y + (area.height / 2).saturating_sub(1);
        centre_line(TITLE, title_y, area, Theme::hero_title_style(), buf);
        centre_line(SUBTITLE, title_y + 2, area, Theme::hero_subtitle_style(), buf);
    }
}

impl HeroWidget<'_> {
    fn draw_cube(&self, cube: &Cube, area: Rect, buf: &mut Buffer) {
        // Cells are roughly twice as tall as they are wide.
        let w = (cube.size / 10.0).round().max(1.0) as u16;
        let h = (w / 2).max(1);

        let (px, py) = self.parallax.offset(cube.depth());
        let lift = cube.lift(self.elapsed);
        let x = area.width.saturating_sub(w) as f64 * cube.x + px * PARALLAX_COLS;
        let y = area.height.saturating_sub(h) as f64 * cube.y - lift * BOB_ROWS
            + py * PARALLAX_ROWS;
        let (x, y) = (area.x as i32 + x.round() as i32, area.y as i32 + y.round() as i32);

        let glyph = if cube.glowing { "▓" } else { "░" };
        let style = Theme::cube_style(cube.glowing);
        let right = (area.x + area.width) as i32;
        let bottom = (area.y + area.height) as i32;
        for row in y..y + h as i32 {
            if row < area.y as i32 || row >= bottom {
                continue;
            }
            for col in x..x + w as i32 {
                if col < area.x as i32 || col >= right {
                    continue;
                }
                buf.set_string(col as u16, row as u16, glyph, style);
            }
        }
    }
}

fn centre_line(text: &str, y: u16, area: Rect, style: ratatui::style::Style, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    buf.set_stringn(x, y, text, area.width as usize, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parallax::Sample;

    fn cube(y: f64) -> Cube {
        Cube {
            size: 50.0,
            x: 0.5,
            y,
            glowing: false,
            delay: Duration::ZERO,
            period: Duration::from_secs(4),
        }
    }

    fn draw(cubes: &[Cube], parallax: &Parallax, elapsed: Duration, w: u16, h: u16) -> Buffer {
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        HeroWidget {
            cubes,
            parallax,
            elapsed,
        }
        .render(area, &mut buf);
        buf
    }

    /// (leftmost column, topmost row) of any cube cell.
    fn cube_origin(buf: &Buffer) -> (u16, u16) {
        let mut origin = (u16::MAX, u16::MAX);
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                if buf[(x, y)].symbol() == "░" {
                    origin.0 = origin.0.min(x);
                    origin.1 = origin.1.min(y);
                }
            }
        }
        origin
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn title_and_subtitle_are_centred() {
        let buf = draw(&[], &Parallax::new(1.0), Duration::ZERO, 100, 12);
        let title_row = row_text(&buf, 5);
        let x = title_row.find(TITLE).expect("title on row 5");
        assert_eq!(x, (100 - TITLE.len()) / 2);
        assert!(row_text(&buf, 7).contains(SUBTITLE));
    }

    #[test]
    fn cube_bobs_upward_over_its_period() {
        let cubes = [cube(0.2)];
        let parallax = Parallax::new(1.0);
        let rest = cube_origin(&draw(&cubes, &parallax, Duration::ZERO, 40, 20));
        let top = cube_origin(&draw(&cubes, &parallax, Duration::from_secs(2), 40, 20));
        assert_eq!(rest.1, 4);
        assert_eq!(top.1, 2);
        assert_eq!(rest.0, top.0);
    }

    #[test]
    fn pointer_shifts_cubes_by_depth() {
        let cubes = [cube(0.1)];
        let still = Parallax::new(1.0);
        let mut moved = Parallax::new(1.0);
        moved.set_target(Sample::new(1.0, 0.0));
        moved.tick();

        let a = cube_origin(&draw(&cubes, &still, Duration::ZERO, 40, 12));
        let b = cube_origin(&draw(&cubes, &moved, Duration::ZERO, 40, 12));
        assert!(b.0 > a.0, "{a:?} -> {b:?}");
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn offscreen_cubes_are_clipped() {
        let cubes = [Cube {
            x: 1.0,
            ..cube(1.0)
        }];
        let mut parallax = Parallax::new(1.0);
        parallax.set_target(Sample::new(1.0, 1.0));
        parallax.tick();
        // Must not panic writing outside the buffer.
        draw(&cubes, &parallax, Duration::ZERO, 10, 4);
    }
}
