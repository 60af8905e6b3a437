//! Fence highlighting across all observed views
//!
//! The host constructs one [`FenceHighlighter`] at setup, forwards every
//! selection change to it, and drops it at teardown.

use std::collections::HashMap;

use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::fence::{self, MatchResult};
use crate::highlight::{HighlightStateMachine, HighlightSurface, ViewId};
use crate::style::Color;

/// Capability a host view must provide before it is handed to the core
pub trait TextView {
    fn id(&self) -> ViewId;
    /// Full text of the view at this moment
    fn text(&self) -> &[char];
    /// Cursor as a character offset into [`TextView::text`]
    fn cursor(&self) -> usize;
}

/// A selection changed in a view
#[derive(Debug, Clone, Copy)]
pub struct SelectionChanged<'a> {
    pub view: ViewId,
    pub text: &'a [char],
    pub cursor: usize,
}

impl<'a> SelectionChanged<'a> {
    pub fn from_view<V: TextView + ?Sized>(view: &'a V) -> Self {
        Self {
            view: view.id(),
            text: view.text(),
            cursor: view.cursor(),
        }
    }
}

/// Handler for selection-changed notifications, called synchronously by the host
pub trait SelectionHandler {
    fn selection_changed(
        &mut self,
        event: SelectionChanged<'_>,
        surface: &mut dyn HighlightSurface,
    ) -> Result<MatchResult>;
}

struct ViewEntry {
    machine: HighlightStateMachine,
    last_match: MatchResult,
}

/// Owns the settings and one highlight state machine per view
pub struct FenceHighlighter {
    settings: Settings,
    views: HashMap<ViewId, ViewEntry>,
}

impl FenceHighlighter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            views: HashMap::new(),
        }
    }

    /// Current settings snapshot
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Last match computed for a view
    pub fn current_match(&self, view: ViewId) -> MatchResult {
        self.views
            .get(&view)
            .map(|entry| entry.last_match)
            .unwrap_or_default()
    }

    /// Number of views with live highlight state
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Toggle highlighting for every view
    pub fn set_enabled(&mut self, enabled: bool, surface: &mut dyn HighlightSurface) {
        if self.settings.enabled == enabled {
            return;
        }
        self.settings.enabled = enabled;
        info!(enabled, "fence highlighting toggled");

        for entry in self.views.values_mut() {
            entry.machine.set_enabled(&self.settings, surface);
        }
    }

    /// Change the highlight color for every view
    pub fn set_color(&mut self, color: Color, surface: &mut dyn HighlightSurface) {
        self.settings.highlight_color = color;
        info!(%color, "highlight color changed");

        for entry in self.views.values_mut() {
            entry.machine.set_color(&self.settings, surface);
        }
    }

    /// Forget a view, removing whatever it still shows
    pub fn close_view(&mut self, view: ViewId, surface: &mut dyn HighlightSurface) {
        if let Some(mut entry) = self.views.remove(&view) {
            entry.machine.clear(surface);
        }
    }
}

impl SelectionHandler for FenceHighlighter {
    fn selection_changed(
        &mut self,
        event: SelectionChanged<'_>,
        surface: &mut dyn HighlightSurface,
    ) -> Result<MatchResult> {
        let result = fence::find_match(event.text, event.cursor)?;
        let settings = self.settings;

        let entry = self.views.entry(event.view).or_insert_with(|| ViewEntry {
            machine: HighlightStateMachine::new(event.view),
            last_match: MatchResult::NoDelimiter,
        });
        entry.machine.update(result, &settings, surface);
        entry.last_match = result;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FenceError;
    use crate::highlight::{Effect, RecordingSurface};
    use pretty_assertions::assert_eq;

    struct StubView {
        id: ViewId,
        text: Vec<char>,
        cursor: usize,
    }

    impl StubView {
        fn new(id: u64, text: &str, cursor: usize) -> Self {
            Self {
                id: ViewId(id),
                text: text.chars().collect(),
                cursor,
            }
        }
    }

    impl TextView for StubView {
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

    fn matched(start: usize, end: usize) -> MatchResult {
        MatchResult::Matched { start, end }
    }

    #[test]
    fn test_selection_changed_highlights_pair() {
        let mut highlighter = FenceHighlighter::new(Settings::default());
        let mut surface = RecordingSurface::default();
        let view = StubView::new(1, "f(a(b)c)", 4);

        let result = highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap();
        assert_eq!(result, matched(3, 5));
        assert_eq!(highlighter.current_match(view.id), matched(3, 5));
        assert_eq!(
            surface.take(),
            vec![
                Effect::Apply(ViewId(1), 3, Color::Yellow),
                Effect::Apply(ViewId(1), 5, Color::Yellow),
            ]
        );
    }

    #[test]
    fn test_moving_off_fence_removes_exactly_once() {
        let mut highlighter = FenceHighlighter::new(Settings::default());
        let mut surface = RecordingSurface::default();
        let mut view = StubView::new(1, "(a(b)c)", 3);

        highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap();
        surface.take();

        view.cursor = 4;
        let result = highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap();
        assert_eq!(result, MatchResult::NoDelimiter);
        assert_eq!(
            surface.take(),
            vec![Effect::Remove(ViewId(1), 2), Effect::Remove(ViewId(1), 4)]
        );
        assert_eq!(highlighter.current_match(view.id), MatchResult::NoDelimiter);
    }

    #[test]
    fn test_reenable_applies_remembered_pair() {
        let settings = Settings {
            enabled: false,
            ..Settings::default()
        };
        let mut highlighter = FenceHighlighter::new(settings);
        let mut surface = RecordingSurface::default();
        let view = StubView::new(7, "x[y]", 2);

        highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap();
        assert!(surface.take().is_empty());
        assert_eq!(highlighter.current_match(view.id), matched(1, 3));

        highlighter.set_enabled(true, &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Effect::Apply(ViewId(7), 1, Color::Yellow),
                Effect::Apply(ViewId(7), 3, Color::Yellow),
            ]
        );

        highlighter.set_enabled(false, &mut surface);
        assert_eq!(
            surface.take(),
            vec![Effect::Remove(ViewId(7), 1), Effect::Remove(ViewId(7), 3)]
        );
    }

    #[test]
    fn test_views_are_independent() {
        let mut highlighter = FenceHighlighter::new(Settings::default());
        let mut surface = RecordingSurface::default();
        let first = StubView::new(1, "()", 1);
        let second = StubView::new(2, "{}", 2);

        highlighter
            .selection_changed(SelectionChanged::from_view(&first), &mut surface)
            .unwrap();
        highlighter
            .selection_changed(SelectionChanged::from_view(&second), &mut surface)
            .unwrap();
        surface.take();

        assert_eq!(highlighter.view_count(), 2);
        assert_eq!(highlighter.current_match(ViewId(1)), matched(0, 1));
        assert_eq!(highlighter.current_match(ViewId(2)), matched(0, 1));
        assert_eq!(highlighter.current_match(ViewId(3)), MatchResult::NoDelimiter);

        highlighter.close_view(ViewId(1), &mut surface);
        assert_eq!(
            surface.take(),
            vec![Effect::Remove(ViewId(1), 0), Effect::Remove(ViewId(1), 1)]
        );
        assert_eq!(highlighter.view_count(), 1);
        assert_eq!(highlighter.current_match(ViewId(1)), MatchResult::NoDelimiter);
    }

    #[test]
    fn test_color_change_fans_out() {
        let mut highlighter = FenceHighlighter::new(Settings::default());
        let mut surface = RecordingSurface::default();
        let view = StubView::new(1, "()", 1);
        highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap();
        surface.take();

        highlighter.set_color(Color::Red, &mut surface);
        assert_eq!(highlighter.settings().highlight_color, Color::Red);
        assert_eq!(
            surface.take(),
            vec![
                Effect::Remove(ViewId(1), 0),
                Effect::Remove(ViewId(1), 1),
                Effect::Apply(ViewId(1), 0, Color::Red),
                Effect::Apply(ViewId(1), 1, Color::Red),
            ]
        );
    }

    #[test]
    fn test_invalid_cursor_leaves_state_alone() {
        let mut highlighter = FenceHighlighter::new(Settings::default());
        let mut surface = RecordingSurface::default();
        let mut view = StubView::new(1, "()", 1);
        highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap();
        surface.take();

        view.cursor = 10;
        let err = highlighter
            .selection_changed(SelectionChanged::from_view(&view), &mut surface)
            .unwrap_err();
        assert!(matches!(err, FenceError::InvalidOffset { offset: 10, len: 2 }));
        assert!(surface.take().is_empty());
        assert_eq!(highlighter.current_match(view.id), matched(0, 1));
    }

    #[test]
    fn test_redundant_toggle_is_ignored() {
        let mut highlighter = FenceHighlighter::new(Settings::default());
        let mut surface = RecordingSurface::default();
        highlighter.set_enabled(true, &mut surface);
        assert!(surface.effects.is_empty());
        assert!(highlighter.settings().enabled);
    }
}
