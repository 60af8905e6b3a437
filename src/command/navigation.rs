//! Navigation commands - cursor movement

use fencematch::{Result, TextView};

use super::CommandStatus;
use crate::editor::EditorState;

fn status(moved: bool) -> CommandStatus {
    if moved {
        CommandStatus::Success
    } else {
        CommandStatus::Failure
    }
}

/// Move cursor forward one character (C-f)
pub fn forward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(status(editor.document.move_right()))
}

/// Move cursor backward one character (C-b)
pub fn backward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(status(editor.document.move_left()))
}

/// Move cursor to next line (C-n)
pub fn next_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(status(editor.document.move_down()))
}

/// Move cursor to previous line (C-p)
pub fn previous_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(status(editor.document.move_up()))
}

/// Move to beginning of line (C-a)
pub fn beginning_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.document.move_to_bol();
    Ok(CommandStatus::Success)
}

/// Move to end of line (C-e)
pub fn end_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.document.move_to_eol();
    Ok(CommandStatus::Success)
}

/// Move to beginning of buffer (M-<)
pub fn beginning_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.document.move_to_start();
    Ok(CommandStatus::Success)
}

/// Move to end of buffer (M->)
pub fn end_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.document.move_to_end();
    Ok(CommandStatus::Success)
}

/// Jump past the fence matching the one left of the cursor (M-C-f)
///
/// Uses the match already computed for the current selection, so the cursor
/// lands right after the partner and jumping again returns to the start.
pub fn goto_matching_fence(editor: &mut EditorState) -> Result<CommandStatus> {
    let cursor = editor.document.cursor();
    if cursor == 0 {
        editor.display.set_message("Not after a fence character");
        return Ok(CommandStatus::Failure);
    }

    let current = editor.highlighter.current_match(editor.document.id());
    match current.partner_of(cursor - 1) {
        Some(partner) => {
            editor.document.set_cursor(partner + 1);
            Ok(CommandStatus::Success)
        }
        None if fencematch::fence::is_fence(editor.document.text()[cursor - 1]) => {
            editor.display.set_message("No matching fence found");
            Ok(CommandStatus::Failure)
        }
        None => {
            editor.display.set_message("Not after a fence character");
            Ok(CommandStatus::Failure)
        }
    }
}
