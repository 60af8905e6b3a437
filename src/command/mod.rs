//! Key bindings for the fence editor.
//!
//! Every binding maps a uEmacs-style key to a named command. The fence
//! commands live in `navigation` (M-C-f) and `misc` (C-x f, C-x c, C-x C-s).

mod editing;
mod misc;
mod navigation;

use std::collections::HashMap;

use fencematch::Result;

use crate::editor::EditorState;
use crate::input::{special, Key};

/// Outcome of a command; failures and aborts ring the bell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    Abort,
}

pub type CommandFn = fn(&mut EditorState) -> Result<CommandStatus>;

struct Binding {
    command: CommandFn,
    name: &'static str,
}

/// Key code to command lookup
pub struct KeyTable {
    bindings: HashMap<u32, Binding>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Table with the editor's standard bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.bind_defaults();
        table
    }

    /// Bind `key`, replacing any earlier binding
    pub fn bind(&mut self, key: Key, command: CommandFn, name: &'static str) {
        self.bindings.insert(key.code(), Binding { command, name });
    }

    pub fn lookup(&self, key: Key) -> Option<CommandFn> {
        self.bindings.get(&key.code()).map(|b| b.command)
    }

    /// Command name, for logging
    pub fn lookup_name(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).map(|b| b.name)
    }

    fn bind_defaults(&mut self) {
        use editing::*;
        use misc::*;
        use navigation::*;

        // Cursor movement
        self.bind(Key::ctrl('f'), forward_char, "forward-char");
        self.bind(Key::ctrl('b'), backward_char, "backward-char");
        self.bind(Key::ctrl('n'), next_line, "next-line");
        self.bind(Key::ctrl('p'), previous_line, "previous-line");
        self.bind(Key::ctrl('a'), beginning_of_line, "beginning-of-line");
        self.bind(Key::ctrl('e'), end_of_line, "end-of-line");
        self.bind(Key::meta('<'), beginning_of_buffer, "beginning-of-buffer");
        self.bind(Key::meta('>'), end_of_buffer, "end-of-buffer");
        self.bind(Key::meta_ctrl('f'), goto_matching_fence, "goto-matching-fence");

        self.bind(Key::special(special::RIGHT), forward_char, "forward-char");
        self.bind(Key::special(special::LEFT), backward_char, "backward-char");
        self.bind(Key::special(special::DOWN), next_line, "next-line");
        self.bind(Key::special(special::UP), previous_line, "previous-line");
        self.bind(Key::special(special::HOME), beginning_of_line, "beginning-of-line");
        self.bind(Key::special(special::END), end_of_line, "end-of-line");

        // Editing
        self.bind(Key::ctrl('m'), newline, "newline");
        self.bind(Key::char('\t'), insert_tab, "insert-tab");
        self.bind(Key::ctrl('d'), delete_char_forward, "delete-char");
        self.bind(Key::special(special::DELETE), delete_char_forward, "delete-char");
        self.bind(Key(0x7f), delete_char_backward, "delete-backward-char");
        self.bind(Key::ctrl('h'), delete_char_backward, "delete-backward-char");

        // Fence highlighting
        self.bind(Key::ctlx('f'), toggle_fence_highlighting, "toggle-fence-highlighting");
        self.bind(Key::ctlx('c'), cycle_highlight_color, "cycle-highlight-color");
        self.bind(Key::ctlx_ctrl('s'), save_settings, "save-settings");

        // Editor control
        self.bind(Key::ctrl('l'), redraw_display, "redraw-display");
        self.bind(Key::ctrl('g'), abort, "keyboard-quit");
        self.bind(Key::ctlx_ctrl('c'), quit, "save-buffers-kill-emacs");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let table = KeyTable::with_defaults();
        assert_eq!(table.lookup_name(Key::meta_ctrl('f')), Some("goto-matching-fence"));
        assert_eq!(table.lookup_name(Key::ctlx('f')), Some("toggle-fence-highlighting"));
        assert_eq!(table.lookup_name(Key::special(special::LEFT)), Some("backward-char"));
        assert!(table.lookup(Key::char('(')).is_none());
    }
}
