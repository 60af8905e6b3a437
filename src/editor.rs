//! Editor state and main loop

use std::path::PathBuf;

use fencematch::{
    FenceHighlighter, Result, SelectionChanged, SelectionHandler, Settings, TextView,
};
use tracing::debug;

use crate::command::{CommandStatus, KeyTable};
use crate::display::Display;
use crate::document::Document;
use crate::input::{InputState, Key};
use crate::surface::ScreenSurface;
use crate::terminal::Terminal;

/// Main editor state
pub struct EditorState {
    /// The single document being edited
    pub document: Document,
    /// Display state
    pub display: Display,
    /// Visible fence highlights
    pub surface: ScreenSurface,
    /// Fence matching for the document view
    pub highlighter: FenceHighlighter,
    /// Input state
    pub input: InputState,
    /// Key bindings
    pub keytab: KeyTable,
    /// Whether editor is running
    pub running: bool,
    /// Where C-x C-s writes settings
    pub settings_path: Option<PathBuf>,
    /// Cursor and text revision last reported to the highlighter
    last_selection: Option<(usize, u64)>,
}

impl EditorState {
    /// Create editor state around a document
    pub fn new(document: Document, settings: Settings) -> Self {
        let surface = ScreenSurface::new(document.id());
        Self {
            document,
            display: Display::new(),
            surface,
            highlighter: FenceHighlighter::new(settings),
            input: InputState::new(),
            keytab: KeyTable::with_defaults(),
            running: true,
            settings_path: Settings::config_path(),
            last_selection: None,
        }
    }

    /// Run the main editor loop
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        self.notify_selection()?;
        self.display.force_redraw();

        while self.running {
            let current = self.highlighter.current_match(self.document.id());
            self.display.render(
                terminal,
                &self.document,
                &self.surface,
                &self.highlighter.settings(),
                current,
            )?;

            let key_event = terminal.read_key()?;

            if let Some(key) = self.input.translate_key(key_event) {
                match self.handle_key(key)? {
                    CommandStatus::Success => {}
                    CommandStatus::Failure => terminal.beep()?,
                    CommandStatus::Abort => {
                        self.display.set_message("Quit");
                        terminal.beep()?;
                    }
                }
            } else if self.input.is_pending() {
                if self.input.is_ctlx_pending() {
                    self.display.set_message("C-x -");
                } else {
                    self.display.set_message("ESC -");
                }
            }
        }

        let view = self.document.id();
        self.highlighter.close_view(view, &mut self.surface);
        Ok(())
    }

    /// Handle a key press, then report any selection change
    pub fn handle_key(&mut self, key: Key) -> Result<CommandStatus> {
        self.display.clear_message();

        let status = if let Some(cmd) = self.keytab.lookup(key) {
            debug!(key = %key.display_name(), command = self.keytab.lookup_name(key), "dispatch");
            cmd(self)?
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.document.insert_char(ch);
            }
            CommandStatus::Success
        } else {
            self.display
                .set_message(format!("{} is not bound", key.display_name()));
            CommandStatus::Failure
        };

        self.notify_selection()?;
        Ok(status)
    }

    /// Send a selection-changed event if cursor or text moved since the last one
    pub fn notify_selection(&mut self) -> Result<()> {
        let snapshot = (self.document.cursor(), self.document.revision());
        if self.last_selection == Some(snapshot) {
            return Ok(());
        }
        self.last_selection = Some(snapshot);

        let event = SelectionChanged::from_view(&self.document);
        let result = self.highlighter.selection_changed(event, &mut self.surface)?;
        debug!(cursor = snapshot.0, ?result, "selection changed");
        Ok(())
    }
}
