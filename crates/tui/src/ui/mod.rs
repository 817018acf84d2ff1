//! UI layer: components, theme, layout helpers and the runtime loop.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
