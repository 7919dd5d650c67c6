//! Interactive terminal front-end for the select control.
//!
//! [`SelectUi`] builds an [`App`] around an adapter and a page source. The
//! remaining submodules implement the event loop, key and pointer routing,
//! rendering, and the pointer-listener lifecycle tied to the dropdown.

mod actions;
mod builder;
mod input;
mod listeners;
mod render;
mod runtime;
mod state;
pub mod theme;

#[cfg(test)]
mod tests;

pub use builder::SelectUi;
pub use input::SearchInput;
pub use state::{Anchor, App, SelectOutcome};
pub use theme::Theme;
