//! Display rendering

use fencematch::{MatchResult, Result, Settings, TextView};
use unicode_width::UnicodeWidthChar;

use crate::document::Document;
use crate::surface::ScreenSurface;
use crate::terminal::Terminal;

const TAB_WIDTH: usize = 8;

/// Display width of a char drawn at screen column `col`
fn char_width(ch: char, col: usize) -> usize {
    if ch == '\t' {
        TAB_WIDTH - col % TAB_WIDTH
    } else {
        ch.width().unwrap_or(1)
    }
}

/// Screen column of the char at index `idx` within a line
fn display_col(line: &[char], idx: usize) -> usize {
    line.iter()
        .take(idx)
        .fold(0, |col, &ch| col + char_width(ch, col))
}

/// Short description of a match for the mode line
fn describe_match(result: MatchResult, doc: &Document) -> String {
    match result.offsets() {
        Some((start, end)) => {
            let (sl, sc) = doc.line_col(start);
            let (el, ec) = doc.line_col(end);
            format!("{}:{}-{}:{}", sl + 1, sc + 1, el + 1, ec + 1)
        }
        None => "-".to_string(),
    }
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in the bottom line
    message: Option<String>,
    /// First document line shown on screen
    top_line: usize,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
            top_line: 0,
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    #[cfg(test)]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Scroll so the cursor line is within `height` rows
    fn scroll_to(&mut self, cursor_line: usize, height: usize) {
        if cursor_line < self.top_line {
            self.top_line = cursor_line;
        } else if height > 0 && cursor_line >= self.top_line + height {
            self.top_line = cursor_line + 1 - height;
        }
    }

    /// Render the editor display
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        doc: &Document,
        surface: &ScreenSurface,
        settings: &Settings,
        current: MatchResult,
    ) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        // Leave one row for the mode line and one for messages
        let height = rows.saturating_sub(2) as usize;

        let (cursor_line, cursor_col) = doc.line_col(doc.cursor());
        self.scroll_to(cursor_line, height);

        terminal.set_cursor_visible(false)?;
        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        let spans = doc.line_spans();
        for row in 0..height {
            let line_idx = self.top_line + row;
            terminal.move_cursor(row as u16, 0)?;

            match spans.get(line_idx) {
                Some(span) => {
                    let line = &doc.text()[span.clone()];
                    self.render_line(terminal, line, span.start, surface, cols)?;
                }
                None => terminal.write_char('~')?,
            }
            terminal.clear_to_eol()?;
        }

        self.render_mode_line(terminal, doc, settings, current, height as u16, cols)?;
        self.render_message(terminal, rows.saturating_sub(1), cols)?;

        let screen_col = spans
            .get(cursor_line)
            .map(|span| display_col(&doc.text()[span.clone()], cursor_col))
            .unwrap_or(0);
        terminal.move_cursor(
            (cursor_line - self.top_line) as u16,
            screen_col.min(cols.saturating_sub(1)) as u16,
        )?;
        terminal.set_cursor_visible(true)?;
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Render one line, painting highlighted fences
    fn render_line(
        &self,
        terminal: &mut Terminal,
        line: &[char],
        line_start: usize,
        surface: &ScreenSurface,
        max_cols: usize,
    ) -> Result<()> {
        let mut col = 0;
        for (i, &ch) in line.iter().enumerate() {
            let width = char_width(ch, col);
            if col + width > max_cols {
                break;
            }

            let highlight = surface.color_at(line_start + i);
            if let Some(color) = highlight {
                terminal.set_highlight(color)?;
            }

            if ch == '\t' {
                terminal.write_str(&" ".repeat(width))?;
            } else if ch.is_control() {
                terminal.write_char('?')?;
            } else {
                terminal.write_char(ch)?;
            }

            if highlight.is_some() {
                terminal.reset_attributes()?;
            }
            col += width;
        }
        Ok(())
    }

    fn render_mode_line(
        &self,
        terminal: &mut Terminal,
        doc: &Document,
        settings: &Settings,
        current: MatchResult,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        let (line, col) = doc.line_col(doc.cursor());
        let fence = if settings.enabled { "on" } else { "off" };
        let mut text = format!(
            "-- fencematch: {}  L{} C{}  (fence {} {})  match {}",
            doc.name(),
            line + 1,
            col + 1,
            fence,
            settings.highlight_color,
            describe_match(current, doc),
        );
        let width: usize = text.chars().map(|c| c.width().unwrap_or(1)).sum();
        if width < cols {
            text.push_str(&"-".repeat(cols - width));
        }
        let text: String = text.chars().take(cols).collect();

        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;
        terminal.write_str(&text)?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    fn render_message(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        if let Some(msg) = &self.message {
            let msg: String = msg.chars().take(cols).collect();
            terminal.write_str(&msg)?;
        }
        terminal.clear_to_eol()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
