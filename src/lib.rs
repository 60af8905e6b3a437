//! fencematch - matching-fence highlighting for text editors
//!
//! The core finds the fence (bracket) paired with the character left of a
//! cursor and tracks which two positions a view should highlight. Hosts feed
//! it selection changes through [`SelectionHandler`] and render its effects
//! through [`HighlightSurface`].

pub mod config;
pub mod error;
pub mod fence;
pub mod highlight;
pub mod session;
pub mod style;

pub use config::Settings;
pub use error::{FenceError, Result};
pub use fence::{find_match, find_match_in_str, MatchResult};
pub use highlight::{HighlightState, HighlightStateMachine, HighlightSurface, ViewId};
pub use session::{FenceHighlighter, SelectionChanged, SelectionHandler, TextView};
pub use style::Color;
