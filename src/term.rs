use crate::{TermInt, Coords};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, read, poll};

use crate::grid::Grid;
use crate::input::{map_key, InputEvent, InputSource};
use crate::render::{self, Glyph, Renderer, INTRO_LINES};
use crate::state::GameState;

#[derive(Copy, Clone, PartialEq, Eq)]
struct ScreenCell {
    ch: char,
    color: Color,
}

const BLANK: ScreenCell = ScreenCell { ch: ' ', color: Color::Reset };
const BORDER_COLOR: Color = Color::Grey;
const TEXT_COLOR: Color = Color::White;

/// A full terminal's worth of characters.
struct Frame {
    width: TermInt,
    height: TermInt,
    cells: Vec<ScreenCell>,
}

impl Frame {
    fn blank(width: TermInt, height: TermInt) -> Self {
        Frame { width, height, cells: vec![BLANK; width as usize * height as usize] }
    }

    fn put(&mut self, pos: Coords, ch: char, color: Color) {
        // Anything past the edge of the terminal is dropped
        if pos.0 < self.width && pos.1 < self.height {
            self.cells[self.width as usize * pos.1 as usize + pos.0 as usize] = ScreenCell { ch, color };
        }
    }

    fn put_str(&mut self, pos: Coords, text: &str, color: Color) {
        for (x_diff, ch) in text.chars().enumerate() {
            self.put((pos.0 + x_diff as TermInt, pos.1), ch, color);
        }
    }
}

/// Owns the terminal: screen setup and teardown, drawing and key polling.
///
/// Keeps a copy of what is on screen and only prints the characters that
/// changed from one frame to the next.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Frame,
    columns: TermInt,
    rows: TermInt,
    top_left: Coords,
}

impl TermManager {
    /// Fails when the terminal cannot fit the board, its border and the HUD line.
    pub fn new(grid: &Grid) -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let (columns, rows) = (grid.columns(), grid.rows());
        let (need_w, need_h) = (columns * 2 + 2, rows + 3);

        if need_w > width || need_h > height {
            bail!("Terminal is {}x{} but the board needs at least {}x{}", width, height, need_w, need_h);
        }

        let top_left = ((width - need_w) / 2, (height - need_h) / 2);
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            screen: Frame::blank(width, height),
            columns,
            rows,
            top_left,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen).context("Error leaving alt screen")
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = Frame::blank(self.width, self.height);
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&self, frame: &mut Frame) {
        let (left, top) = (self.top_left.0, self.top_left.1 + 1);
        let end_x = left + self.columns * 2 + 1;
        let end_y = top + self.rows + 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            frame.put((x, top), ch, BORDER_COLOR);
            frame.put((x, end_y), ch, BORDER_COLOR);
        }

        for y in top + 1..end_y {
            frame.put((left, y), '|', BORDER_COLOR);
            frame.put((end_x, y), '|', BORDER_COLOR);
        }
    }

    fn draw_board(&self, frame: &mut Frame, glyphs: &[Glyph]) {
        let origin = (self.top_left.0 + 1, self.top_left.1 + 2);

        for (i, glyph) in glyphs.iter().enumerate() {
            let col = (i % self.columns as usize) as TermInt;
            let row = (i / self.columns as usize) as TermInt;
            let x = origin.0 + col * 2;
            frame.put((x, origin.1 + row), glyph.text[0], glyph.color);
            frame.put((x + 1, origin.1 + row), glyph.text[1], glyph.color);
        }
    }

    /// Centred box of text on top of whatever is already in `frame`.
    fn show_message<S: AsRef<str>>(&self, frame: &mut Frame, lines: &[S]) {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.as_ref().chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y_diff in 0..msg_height {
            for x_diff in 0..msg_width {
                frame.put((top_left.0 + x_diff, top_left.1 + y_diff), ' ', TEXT_COLOR);
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line.as_ref(), width = msg_width as usize);
            frame.put_str((top_left.0, top_left.1 + i as TermInt + 1), &padded_line, TEXT_COLOR);
        }
    }

    fn present(&mut self, frame: Frame) -> Result<()> {
        let width = self.width as usize;

        for (i, (new, old)) in frame.cells.iter().zip(&self.screen.cells).enumerate() {
            if new != old {
                let pos = ((i % width) as TermInt, (i / width) as TermInt);
                queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::SetForegroundColor(new.color), style::Print(new.ch))?;
            }
        }

        self.stdout.flush().context("Error flushing")?;
        self.screen = frame;
        Ok(())
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode")
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.context("Error setting cursor blink")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("Error setting cursor visibility")
    }
}

impl Renderer for TermManager {
    fn draw_intro(&mut self) -> Result<()> {
        let mut frame = Frame::blank(self.width, self.height);
        self.draw_borders(&mut frame);
        self.show_message(&mut frame, &INTRO_LINES);
        self.present(frame)
    }

    fn draw_frame(&mut self, state: &GameState) -> Result<()> {
        let mut frame = Frame::blank(self.width, self.height);
        frame.put_str(self.top_left, &render::hud_line(state), TEXT_COLOR);
        self.draw_borders(&mut frame);
        self.draw_board(&mut frame, &render::board_glyphs(state));
        self.present(frame)
    }

    fn draw_game_over(&mut self, score: u32) -> Result<()> {
        let mut frame = Frame::blank(self.width, self.height);
        self.show_message(&mut frame, &render::game_over_lines(score));
        self.present(frame)
    }
}

impl InputSource for TermManager {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.extend(map_key(&ev));
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_drops_writes_past_the_edge() {
        let mut frame = Frame::blank(4, 2);
        frame.put_str((2, 1), "abc", TEXT_COLOR);
        frame.put((0, 5), 'z', TEXT_COLOR);

        let text: String = frame.cells.iter().map(|cell| cell.ch).collect();
        assert_eq!(text, "      ab");
    }
}
