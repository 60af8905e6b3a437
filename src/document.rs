//! Document representation - the text of the single host view and its cursor
//!
//! Text is held as a flat sequence of chars with `'\n'` separating lines, so
//! the cursor is a plain char offset the fence core can consume directly.

use std::ops::Range;
use std::path::Path;

use fencematch::{TextView, ViewId};

use fencematch::Result;

/// An editable text view
#[derive(Debug)]
pub struct Document {
    id: ViewId,
    /// Full text, lines separated by '\n'
    text: Vec<char>,
    /// Cursor position (char offset, 0..=text.len())
    cursor: usize,
    /// Display name (file name or "*scratch*")
    name: String,
    /// Bumped on every text change
    revision: u64,
    /// Goal column for vertical movement
    goal_col: Option<usize>,
}

impl Document {
    /// Create an empty document
    pub fn new(id: ViewId, name: impl Into<String>) -> Self {
        Self {
            id,
            text: Vec::new(),
            cursor: 0,
            name: name.into(),
            revision: 0,
            goal_col: None,
        }
    }

    /// Create a document from a string, cursor at the start
    pub fn from_text(id: ViewId, name: impl Into<String>, text: &str) -> Self {
        let mut doc = Self::new(id, name);
        doc.text = text.chars().collect();
        doc
    }

    /// Load a document from file contents
    pub fn from_file(id: ViewId, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        Ok(Self::from_text(id, name, &content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set cursor position, clamped to the text
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.text.len());
        self.goal_col = None;
    }

    /// Char range of each line, without the trailing newline
    pub fn line_spans(&self) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (i, &c) in self.text.iter().enumerate() {
            if c == '\n' {
                spans.push(start..i);
                start = i + 1;
            }
        }
        spans.push(start..self.text.len());
        spans
    }

    /// Number of lines (an empty document has one)
    pub fn line_count(&self) -> usize {
        self.text.iter().filter(|&&c| c == '\n').count() + 1
    }

    /// Convert a char offset into (line, column), both 0-indexed
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.text.len());
        let line = self.text[..pos].iter().filter(|&&c| c == '\n').count();
        let line_start = self.text[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        (line, pos - line_start)
    }

    /// Convert (line, column) into a char offset, clamping the column to the line
    pub fn offset_of(&self, line: usize, col: usize) -> usize {
        match self.line_spans().get(line) {
            Some(span) => span.start + col.min(span.len()),
            None => self.text.len(),
        }
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
        self.goal_col = None;
        self.revision += 1;
    }

    /// Insert a newline at the cursor
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (backspace), returns it
    pub fn delete_backward(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.goal_col = None;
        self.revision += 1;
        Some(self.text.remove(self.cursor))
    }

    /// Delete the character at the cursor, returns it
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.cursor >= self.text.len() {
            return None;
        }
        self.goal_col = None;
        self.revision += 1;
        Some(self.text.remove(self.cursor))
    }

    /// Move cursor one character right; false at end of text
    pub fn move_right(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.set_cursor(self.cursor + 1);
            true
        } else {
            false
        }
    }

    /// Move cursor one character left; false at start of text
    pub fn move_left(&mut self) -> bool {
        if self.cursor > 0 {
            self.set_cursor(self.cursor - 1);
            true
        } else {
            false
        }
    }

    /// Move cursor to the next line, keeping the goal column
    pub fn move_down(&mut self) -> bool {
        let (line, col) = self.line_col(self.cursor);
        if line + 1 >= self.line_count() {
            return false;
        }
        let goal = self.goal_col.unwrap_or(col);
        self.cursor = self.offset_of(line + 1, goal);
        self.goal_col = Some(goal);
        true
    }

    /// Move cursor to the previous line, keeping the goal column
    pub fn move_up(&mut self) -> bool {
        let (line, col) = self.line_col(self.cursor);
        if line == 0 {
            return false;
        }
        let goal = self.goal_col.unwrap_or(col);
        self.cursor = self.offset_of(line - 1, goal);
        self.goal_col = Some(goal);
        true
    }

    pub fn move_to_bol(&mut self) {
        let (line, _) = self.line_col(self.cursor);
        self.set_cursor(self.offset_of(line, 0));
    }

    pub fn move_to_eol(&mut self) {
        let (line, _) = self.line_col(self.cursor);
        self.set_cursor(self.offset_of(line, usize::MAX));
    }

    pub fn move_to_start(&mut self) {
        self.set_cursor(0);
    }

    pub fn move_to_end(&mut self) {
        self.set_cursor(self.text.len());
    }
}

impl TextView for Document {
    fn id(&self) -> ViewId {
        self.id
    }

    fn text(&self) -> &[char] {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::from_text(ViewId(0), "test", text)
    }

    fn text_of(doc: &Document) -> String {
        doc.text().iter().collect()
    }

    #[test]
    fn test_insert_and_delete() {
        let mut d = doc("");
        for ch in "f(x)".chars() {
            d.insert_char(ch);
        }
        assert_eq!(text_of(&d), "f(x)");
        assert_eq!(d.cursor(), 4);

        assert_eq!(d.delete_backward(), Some(')'));
        d.move_to_start();
        assert_eq!(d.delete_forward(), Some('f'));
        assert_eq!(text_of(&d), "(x");
        assert_eq!(d.delete_backward(), None);
        assert_eq!(d.revision(), 6);
    }

    #[test]
    fn test_line_count() {
        let d = doc("ab\n\ncde");
        assert_eq!(d.line_count(), 3);
        assert_eq!(doc("").line_count(), 1);
    }

    #[test]
    fn test_line_spans_exclude_newlines() {
        assert_eq!(doc("ab\n\ncde").line_spans(), vec![0..2, 3..3, 4..7]);
        assert_eq!(doc("").line_spans(), vec![0..0]);
        assert_eq!(doc("x\n").line_spans(), vec![0..1, 2..2]);
    }

    #[test]
    fn test_line_col_round_trip() {
        let d = doc("ab\n\ncde");
        assert_eq!(d.line_col(0), (0, 0));
        assert_eq!(d.line_col(2), (0, 2));
        assert_eq!(d.line_col(3), (1, 0));
        assert_eq!(d.line_col(6), (2, 2));
        assert_eq!(d.offset_of(2, 2), 6);
        assert_eq!(d.offset_of(0, 99), 2);
        assert_eq!(d.offset_of(9, 0), d.text().len());
    }

    #[test]
    fn test_vertical_movement_keeps_goal_column() {
        let mut d = doc("abcd\nx\nabcd");
        d.set_cursor(3);
        assert!(d.move_down());
        assert_eq!(d.line_col(d.cursor()), (1, 1));
        assert!(d.move_down());
        assert_eq!(d.line_col(d.cursor()), (2, 3));
        assert!(!d.move_down());
        assert!(d.move_up());
        assert!(d.move_up());
        assert_eq!(d.cursor(), 3);
        assert!(!d.move_up());
    }

    #[test]
    fn test_line_bounds() {
        let mut d = doc("one\ntwo");
        d.set_cursor(5);
        d.move_to_eol();
        assert_eq!(d.cursor(), 7);
        d.move_to_bol();
        assert_eq!(d.cursor(), 4);
        d.move_to_end();
        assert!(!d.move_right());
        d.move_to_start();
        assert!(!d.move_left());
    }
}
