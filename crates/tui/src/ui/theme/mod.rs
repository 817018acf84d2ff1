//! Theme styling module for the TUI UI layer.
//!
//! Semantic theme roles plus helper builders for ratatui widgets. Prefer
//! these helpers over hard-coding colors.

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::NordTheme;
pub use roles::Theme;

/// Theme used by the runtime.
pub fn load() -> Box<dyn Theme> {
    Box::new(NordTheme::new())
}
