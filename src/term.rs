use crate::{TermCoords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

pub struct TermManager {
    stdout: Stdout,
    screen: ScreenBuffer,
    active: bool,
}

/// What is drawn on screen, kept so a message box can be taken down again.
pub struct ScreenBuffer {
    width: TermInt,
    height: TermInt,
    cells: Vec<char>,
    current_msg: Option<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl Message {
    /// Box for `lines` with a blank border, centred on a `screen` sized area.
    pub fn centred(screen: TermCoords, lines: &[&str]) -> Self {
        let height = (lines.len() + 2) as TermInt;
        let width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = (
            (screen.0 / 2).saturating_sub(width / 2),
            (screen.1 / 2).saturating_sub(height / 2),
        );
        Message { top_left, width, height }
    }

    pub fn top_left(&self) -> TermCoords {
        self.top_left
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }
}

impl ScreenBuffer {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        ScreenBuffer {
            width,
            height,
            cells: vec![' '; width as usize * height as usize],
            current_msg: None,
        }
    }

    pub fn size(&self) -> TermCoords {
        (self.width, self.height)
    }

    pub fn set(&mut self, pos: TermCoords, ch: char) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = ch;
        }
    }

    pub fn get(&self, pos: TermCoords) -> char {
        self.index(pos).map_or(' ', |idx| self.cells[idx])
    }

    /// Blanks every cell. Any message on screen is gone with it.
    pub fn clear(&mut self) {
        self.cells = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
    }

    pub fn message(&self) -> Option<Message> {
        self.current_msg
    }

    pub fn set_message(&mut self, msg: Message) {
        self.current_msg = Some(msg);
    }

    pub fn take_message(&mut self) -> Option<Message> {
        self.current_msg.take()
    }

    fn index(&self, pos: TermCoords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager { stdout: stdout(), screen: ScreenBuffer::new(width, height), active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    /// Undoes `setup`, including a setup that failed halfway. No-op if setup never ran.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = terminal::disable_raw_mode().context("Error disabling raw mode");
        let screen = execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen");
        raw.and(screen)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                return Ok(ev);
            }
        }
    }

    /// Waits up to `timeout` for input, then drains every pending key event.
    pub fn read_key_events_queue(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        if !poll(timeout).context("Error polling events")? {
            return Ok(events);
        }

        while poll(Duration::from_millis(0)).context("Error polling events")? {
            if let Event::Key(ev) = read().context("Error reading event")? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> TermCoords {
        self.screen.size()
    }

    /// Draws a frame around an `inner` sized area whose corner sits at `top_left`.
    pub fn draw_borders(&mut self, top_left: TermCoords, inner: TermCoords) -> Result<()> {
        let (x0, y0) = top_left;
        let end_x = x0 + inner.0 + 1;
        let end_y = y0 + inner.1 + 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            self.print_at((x, y0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg = Message::centred(self.screen.size(), lines);
        let (left, top) = msg.top_left();

        // Blank padding rows above and below the text
        for y in [top, top + msg.height() - 1].iter() {
            for x_diff in 0..msg.width() {
                self.print_at_no_save((left + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg.width() as usize);
            let y = top + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((left + x_diff as TermInt, y), ch)?;
            }
        }

        self.screen.set_message(msg);
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.screen.take_message() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let (left, top) = msg.top_left();

        // Put back whatever the message covered
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (left + x_diff, top + y_diff);
                let ch = self.screen.get(pos);
                self.print_at_no_save(pos, ch)?;
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: TermCoords, ch: char) -> Result<()> {
        self.print_at_no_save(pos, ch)?;
        self.screen.set(pos, ch);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen.clear();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.screen.message().is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    // Messages skip the screen buffer so hide_message can restore what was underneath
    fn print_at_no_save(&mut self, pos: TermCoords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
            .context("Error printing")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_centred() {
        let msg = Message::centred((80, 24), &["Game Over.", "Your Score: 3"]);

        assert_eq!((msg.width(), msg.height()), (15, 4));
        assert_eq!(msg.top_left(), (33, 10));
    }

    #[test]
    fn test_message_on_tiny_screen_stays_on_screen() {
        let msg = Message::centred((4, 2), &["Press any key to begin"]);
        assert_eq!(msg.top_left(), (0, 0));
    }

    #[test]
    fn test_buffer_keeps_cells_and_ignores_off_screen() {
        let mut screen = ScreenBuffer::new(10, 5);
        screen.set((3, 2), '#');
        screen.set((10, 2), '#');

        assert_eq!(screen.get((3, 2)), '#');
        assert_eq!(screen.get((10, 2)), ' ');
    }

    #[test]
    fn test_clear_drops_stale_message() {
        let mut screen = ScreenBuffer::new(80, 24);
        screen.set((1, 1), '+');
        screen.set_message(Message::centred((80, 24), &["Game Over."]));

        screen.clear();

        assert_eq!(screen.message(), None);
        assert_eq!(screen.take_message(), None);
        assert_eq!(screen.get((1, 1)), ' ');
    }
}
