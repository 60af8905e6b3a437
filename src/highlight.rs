//! Highlight state for one text view
//!
//! Turns match results into apply/remove effects on a rendering surface.
//! Removals for the previous pair are always issued before additions for the
//! next, so the surface never shows two pairs at once.

use tracing::debug;

use crate::config::Settings;
use crate::fence::MatchResult;
use crate::style::Color;

/// Opaque identity of a text view observed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Rendering surface receiving highlight effects.
///
/// Each call addresses the single-character range `[offset, offset + 1)`.
/// Both operations must be idempotent.
pub trait HighlightSurface {
    fn apply_highlight(&mut self, view: ViewId, offset: usize, color: Color);
    fn remove_highlight(&mut self, view: ViewId, offset: usize);
}

/// Remembered highlight positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighting { start: usize, end: usize },
}

impl HighlightState {
    fn offsets(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Highlighting { start, end } => Some((start, end)),
            Self::Idle => None,
        }
    }
}

/// Per-view highlight state machine
#[derive(Debug)]
pub struct HighlightStateMachine {
    view: ViewId,
    state: HighlightState,
    /// Color of the ranges currently shown on the surface, if any
    shown: Option<Color>,
}

impl HighlightStateMachine {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            state: HighlightState::Idle,
            shown: None,
        }
    }

    /// Remembered positions, whether or not they are visible
    pub fn state(&self) -> HighlightState {
        self.state
    }

    /// Check whether the remembered positions are currently on the surface
    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }

    /// Feed a fresh match result for this view
    pub fn update(
        &mut self,
        result: MatchResult,
        settings: &Settings,
        surface: &mut dyn HighlightSurface,
    ) {
        self.hide(surface);

        self.state = match result {
            MatchResult::Matched { start, end } => HighlightState::Highlighting { start, end },
            MatchResult::NoDelimiter => HighlightState::Idle,
        };

        if settings.enabled {
            self.show(settings.highlight_color, surface);
        }
        debug!(
            view = self.view.0,
            state = ?self.state,
            visible = self.is_visible(),
            "highlight update"
        );
    }

    /// React to the global enabled flag being toggled.
    ///
    /// Disabling hides the highlight but keeps the positions; enabling shows
    /// the remembered positions again without a new match.
    pub fn set_enabled(&mut self, settings: &Settings, surface: &mut dyn HighlightSurface) {
        if settings.enabled {
            if !self.is_visible() {
                self.show(settings.highlight_color, surface);
            }
        } else {
            self.hide(surface);
        }
    }

    /// Repaint a visible highlight in a new color
    pub fn set_color(&mut self, settings: &Settings, surface: &mut dyn HighlightSurface) {
        if self.shown.is_some_and(|c| c != settings.highlight_color) {
            self.hide(surface);
            self.show(settings.highlight_color, surface);
        }
    }

    /// Remove anything visible and forget the positions
    pub fn clear(&mut self, surface: &mut dyn HighlightSurface) {
        self.hide(surface);
        self.state = HighlightState::Idle;
    }

    fn show(&mut self, color: Color, surface: &mut dyn HighlightSurface) {
        if let Some((start, end)) = self.state.offsets() {
            surface.apply_highlight(self.view, start, color);
            surface.apply_highlight(self.view, end, color);
            self.shown = Some(color);
        }
    }

    fn hide(&mut self, surface: &mut dyn HighlightSurface) {
        if self.shown.take().is_some() {
            if let Some((start, end)) = self.state.offsets() {
                surface.remove_highlight(self.view, start);
                surface.remove_highlight(self.view, end);
            }
        }
    }
}

/// Surface that records every effect, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub effects: Vec<Effect>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    Apply(ViewId, usize, Color),
    Remove(ViewId, usize),
}

#[cfg(test)]
impl RecordingSurface {
    pub fn take(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
impl HighlightSurface for RecordingSurface {
    fn apply_highlight(&mut self, view: ViewId, offset: usize, color: Color) {
        self.effects.push(Effect::Apply(view, offset, color));
    }

    fn remove_highlight(&mut self, view: ViewId, offset: usize) {
        self.effects.push(Effect::Remove(view, offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VIEW: ViewId = ViewId(1);

    fn matched(start: usize, end: usize) -> MatchResult {
        MatchResult::Matched { start, end }
    }

    fn enabled() -> Settings {
        Settings {
            enabled: true,
            highlight_color: Color::Yellow,
        }
    }

    fn disabled() -> Settings {
        Settings {
            enabled: false,
            ..enabled()
        }
    }

    #[test]
    fn test_idle_to_idle_emits_nothing() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();
        machine.update(MatchResult::NoDelimiter, &enabled(), &mut surface);
        assert!(surface.effects.is_empty());
        assert_eq!(machine.state(), HighlightState::Idle);
    }

    #[test]
    fn test_match_then_no_delimiter() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();

        machine.update(matched(2, 4), &enabled(), &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Effect::Apply(VIEW, 2, Color::Yellow),
                Effect::Apply(VIEW, 4, Color::Yellow),
            ]
        );

        machine.update(MatchResult::NoDelimiter, &enabled(), &mut surface);
        assert_eq!(surface.take(), vec![Effect::Remove(VIEW, 2), Effect::Remove(VIEW, 4)]);
        assert_eq!(machine.state(), HighlightState::Idle);
    }

    #[test]
    fn test_new_pair_removes_old_first() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();

        machine.update(matched(0, 9), &enabled(), &mut surface);
        surface.take();
        machine.update(matched(3, 5), &enabled(), &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Effect::Remove(VIEW, 0),
                Effect::Remove(VIEW, 9),
                Effect::Apply(VIEW, 3, Color::Yellow),
                Effect::Apply(VIEW, 5, Color::Yellow),
            ]
        );
        assert_eq!(machine.state(), HighlightState::Highlighting { start: 3, end: 5 });
    }

    #[test]
    fn test_disabled_remembers_without_applying() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();

        machine.update(matched(1, 7), &disabled(), &mut surface);
        assert!(surface.take().is_empty());
        assert_eq!(machine.state(), HighlightState::Highlighting { start: 1, end: 7 });
        assert!(!machine.is_visible());

        machine.set_enabled(&enabled(), &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Effect::Apply(VIEW, 1, Color::Yellow),
                Effect::Apply(VIEW, 7, Color::Yellow),
            ]
        );
    }

    #[test]
    fn test_toggle_off_keeps_positions() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();

        machine.update(matched(2, 4), &enabled(), &mut surface);
        surface.take();

        machine.set_enabled(&disabled(), &mut surface);
        assert_eq!(surface.take(), vec![Effect::Remove(VIEW, 2), Effect::Remove(VIEW, 4)]);
        assert_eq!(machine.state(), HighlightState::Highlighting { start: 2, end: 4 });

        // Disabling twice emits nothing more
        machine.set_enabled(&disabled(), &mut surface);
        assert!(surface.take().is_empty());

        // Nothing visible, so a cleared state has nothing to remove
        machine.update(MatchResult::NoDelimiter, &disabled(), &mut surface);
        assert!(surface.take().is_empty());
    }

    #[test]
    fn test_enable_when_idle_emits_nothing() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();
        machine.set_enabled(&enabled(), &mut surface);
        assert!(surface.effects.is_empty());
    }

    #[test]
    fn test_color_change_repaints() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();
        machine.update(matched(2, 4), &enabled(), &mut surface);
        surface.take();

        let cyan = Settings {
            highlight_color: Color::Cyan,
            ..enabled()
        };
        machine.set_color(&cyan, &mut surface);
        assert_eq!(
            surface.take(),
            vec![
                Effect::Remove(VIEW, 2),
                Effect::Remove(VIEW, 4),
                Effect::Apply(VIEW, 2, Color::Cyan),
                Effect::Apply(VIEW, 4, Color::Cyan),
            ]
        );

        machine.set_color(&cyan, &mut surface);
        assert!(surface.take().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut machine = HighlightStateMachine::new(VIEW);
        let mut surface = RecordingSurface::default();
        machine.update(matched(2, 4), &enabled(), &mut surface);
        surface.take();

        machine.clear(&mut surface);
        assert_eq!(surface.take(), vec![Effect::Remove(VIEW, 2), Effect::Remove(VIEW, 4)]);
        assert_eq!(machine.state(), HighlightState::Idle);
        assert!(!machine.is_visible());
    }
}
