//! Configuration loading and resolution.
//!
//! `load` merges config files, environment variables and CLI flags into a
//! validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub(crate) use loader::load;
pub(crate) use resolved::{ResolvedConfig, SourceConfig};
