use crate::framebuffer::FrameBuffer;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Presents the engine's frame. Implementations own whatever backend they
/// draw with, so a variety of kinds of screen can sit behind the same host
/// loop.
pub trait Display {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error>;
}

/// lit pixels as canvas coordinates; the canvas y axis points up, so rows
/// are negated to keep (0, 0) in the top-left corner
fn lit_points(frame: &FrameBuffer) -> Vec<(f64, f64)> {
    frame
        .rows()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &lit)| lit)
                .map(move |(x, _)| (x as f64, -1.0 * y as f64))
        })
        .collect()
}

/// monochrome display in a terminal, rendered on a TUI canvas
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay { terminal })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        let coords = lit_points(frame);
        // 1:1 between emulated pixels and terminal cells, plus the border
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + SCREEN_WIDTH as u16, 2 + SCREEN_HEIGHT as u16);
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds([0.0, (SCREEN_WIDTH - 1) as f64])
                .y_bounds([-1.0 * (SCREEN_HEIGHT - 1) as f64, 0.0])
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &coords,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay {
    pub draws: usize,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay { draws: 0 }
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, _frame: &FrameBuffer) -> Result<(), io::Error> {
        self.draws += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame_has_no_points() {
        assert!(lit_points(&FrameBuffer::new()).is_empty());
    }

    #[test]
    fn test_points_map_top_left_down() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0b1000_0000]);
        frame.draw_sprite(3, 2, &[0b1000_0000]);
        assert_eq!(lit_points(&frame), vec![(0.0, 0.0), (3.0, -2.0)]);
    }

    #[test]
    fn test_dummy_display_counts_draws() {
        let mut d = DummyDisplay::new();
        d.draw(&FrameBuffer::new()).unwrap();
        d.draw(&FrameBuffer::new()).unwrap();
        assert_eq!(d.draws, 2);
    }
}
