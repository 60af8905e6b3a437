//! Miscellaneous commands - fence highlighting settings and editor control

use fencematch::Result;
use tracing::warn;

use super::CommandStatus;
use crate::editor::EditorState;

/// Toggle fence highlighting (C-x f)
pub fn toggle_fence_highlighting(editor: &mut EditorState) -> Result<CommandStatus> {
    let enabled = !editor.highlighter.settings().enabled;
    editor.highlighter.set_enabled(enabled, &mut editor.surface);
    let status = if enabled {
        "Fence highlighting enabled"
    } else {
        "Fence highlighting disabled"
    };
    editor.display.set_message(status);
    Ok(CommandStatus::Success)
}

/// Switch to the next highlight color (C-x c)
pub fn cycle_highlight_color(editor: &mut EditorState) -> Result<CommandStatus> {
    let color = editor.highlighter.settings().highlight_color.next_highlight();
    editor.highlighter.set_color(color, &mut editor.surface);
    editor.display.set_message(format!("Highlight color: {}", color));
    Ok(CommandStatus::Success)
}

/// Persist the current settings (C-x C-s)
pub fn save_settings(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(path) = editor.settings_path.clone() else {
        editor.display.set_message("No settings file location");
        return Ok(CommandStatus::Failure);
    };

    match editor.highlighter.settings().save_to(&path) {
        Ok(()) => {
            editor.display.set_message(format!("Wrote {}", path.display()));
            Ok(CommandStatus::Success)
        }
        Err(e) => {
            warn!(path = %path.display(), "could not save settings: {}", e);
            editor.display.set_message(format!("Cannot write {}: {}", path.display(), e));
            Ok(CommandStatus::Failure)
        }
    }
}

/// Redraw the display (C-l)
pub fn redraw_display(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}

/// Abort current operation (C-g)
pub fn abort(_editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(CommandStatus::Abort)
}

/// Quit the editor (C-x C-c)
pub fn quit(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.running = false;
    Ok(CommandStatus::Success)
}
