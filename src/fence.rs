//! Fence (delimiter) matching
//!
//! Given a character buffer and a cursor offset, decides whether the
//! character immediately left of the cursor is a fence character and, if
//! so, scans for its partner. Only the left neighbour is ever an anchor:
//! a cursor sitting just before a fence does not match.

use tracing::debug;

use crate::error::{FenceError, Result};

/// Fence characters, paired by position: index `i` pairs with `i ^ 1`.
/// Openers sit at even indices, closers at odd indices.
pub const FENCES: [char; 6] = ['{', '}', '[', ']', '(', ')'];

/// Scan direction away from the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Outcome of a single match query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchResult {
    /// No fence left of the cursor, or the fence is unbalanced
    #[default]
    NoDelimiter,
    /// Offsets of the opening and closing fence (`start < end`)
    Matched { start: usize, end: usize },
}

impl MatchResult {
    /// Build a match from the anchor and found offsets, in either order
    fn from_pair(a: usize, b: usize) -> Self {
        Self::Matched {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Get the `(start, end)` offsets if matched
    pub fn offsets(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Matched { start, end } => Some((start, end)),
            Self::NoDelimiter => None,
        }
    }

    /// Given one end of the pair, return the other
    pub fn partner_of(&self, offset: usize) -> Option<usize> {
        match *self {
            Self::Matched { start, end } if offset == start => Some(end),
            Self::Matched { start, end } if offset == end => Some(start),
            _ => None,
        }
    }
}

/// Index of a character in [`FENCES`]
fn fence_index(c: char) -> Option<usize> {
    FENCES.iter().position(|&f| f == c)
}

/// Check if a character is one of the six fence characters
pub fn is_fence(c: char) -> bool {
    fence_index(c).is_some()
}

/// Get the partner of a fence character and the direction to scan for it
pub fn partner_of(c: char) -> Option<(char, Direction)> {
    let idx = fence_index(c)?;
    let direction = if idx % 2 == 0 {
        Direction::Forward
    } else {
        Direction::Backward
    };
    Some((FENCES[idx ^ 1], direction))
}

/// Find the fence matching the character left of `cursor`.
///
/// `cursor` must lie in `0..=buffer.len()`; anything else is rejected with
/// [`FenceError::InvalidOffset`]. Running off either end of the buffer
/// before the nesting count returns to zero yields
/// [`MatchResult::NoDelimiter`].
pub fn find_match(buffer: &[char], cursor: usize) -> Result<MatchResult> {
    if cursor > buffer.len() {
        return Err(FenceError::InvalidOffset {
            offset: cursor,
            len: buffer.len(),
        });
    }
    if cursor == 0 {
        return Ok(MatchResult::NoDelimiter);
    }

    let anchor_pos = cursor - 1;
    let anchor = buffer[anchor_pos];
    let Some((partner, direction)) = partner_of(anchor) else {
        return Ok(MatchResult::NoDelimiter);
    };

    let found = match direction {
        Direction::Forward => {
            let ahead = buffer.iter().enumerate().skip(anchor_pos);
            scan(ahead, anchor, partner)
        }
        Direction::Backward => {
            let behind = buffer[..=anchor_pos].iter().enumerate().rev();
            scan(behind, anchor, partner)
        }
    };

    let result = match found {
        Some(pos) => MatchResult::from_pair(anchor_pos, pos),
        None => MatchResult::NoDelimiter,
    };
    debug!(cursor, %anchor, ?result, "fence query");
    Ok(result)
}

/// Find a match in a string, treating `cursor` as a character index
pub fn find_match_in_str(text: &str, cursor: usize) -> Result<MatchResult> {
    let chars: Vec<char> = text.chars().collect();
    find_match(&chars, cursor)
}

/// Walk `(offset, char)` pairs starting on the anchor, tracking nesting
fn scan<'a, I>(chars: I, anchor: char, partner: char) -> Option<usize>
where
    I: Iterator<Item = (usize, &'a char)>,
{
    let mut depth = 0usize;
    for (pos, &c) in chars {
        if c == anchor {
            depth += 1;
        } else if c == partner {
            // The anchor is always seen first, so depth >= 1 here
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}
