//! Editing commands - text modification operations

use fencematch::Result;

use super::CommandStatus;
use crate::editor::EditorState;

/// Insert a newline at the cursor (RET)
pub fn newline(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.document.insert_newline();
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}

/// Insert a literal tab (TAB)
pub fn insert_tab(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.document.insert_char('\t');
    Ok(CommandStatus::Success)
}

/// Delete character at cursor (C-d)
pub fn delete_char_forward(editor: &mut EditorState) -> Result<CommandStatus> {
    match editor.document.delete_forward() {
        Some(ch) => {
            if ch == '\n' {
                editor.display.force_redraw();
            }
            Ok(CommandStatus::Success)
        }
        None => Ok(CommandStatus::Failure),
    }
}

/// Delete character before cursor (Backspace)
pub fn delete_char_backward(editor: &mut EditorState) -> Result<CommandStatus> {
    match editor.document.delete_backward() {
        Some(ch) => {
            if ch == '\n' {
                editor.display.force_redraw();
            }
            Ok(CommandStatus::Success)
        }
        None => Ok(CommandStatus::Failure),
    }
}
