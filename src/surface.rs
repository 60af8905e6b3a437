//! Screen-side record of visible fence highlights

use std::collections::HashMap;

use fencematch::{Color, HighlightSurface, ViewId};

/// Highlight surface backing the terminal display
#[derive(Debug)]
pub struct ScreenSurface {
    view: ViewId,
    /// Highlighted char offsets and their colors
    highlights: HashMap<usize, Color>,
}

impl ScreenSurface {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            highlights: HashMap::new(),
        }
    }

    /// Color for a char offset, if highlighted
    pub fn color_at(&self, offset: usize) -> Option<Color> {
        self.highlights.get(&offset).copied()
    }

    /// Highlighted offsets in ascending order
    #[cfg(test)]
    pub fn offsets(&self) -> Vec<usize> {
        let mut offsets: Vec<_> = self.highlights.keys().copied().collect();
        offsets.sort_unstable();
        offsets
    }
}

impl HighlightSurface for ScreenSurface {
    fn apply_highlight(&mut self, view: ViewId, offset: usize, color: Color) {
        if view == self.view {
            self.highlights.insert(offset, color);
        }
    }

    fn remove_highlight(&mut self, view: ViewId, offset: usize) {
        if view == self.view {
            self.highlights.remove(&offset);
        }
    }
}
