//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI while a session runs, so events go to
//! `<data dir>/fetch-select.log` instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

pub const LOG_FILE_NAME: &str = "fetch-select.log";
pub const LOG_ENV: &str = "FETCH_SELECT_LOG";

static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// `FETCH_SELECT_LOG`, then `RUST_LOG`, then `info`.
pub fn env_filter() -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV)
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
	fs::create_dir_all(dir)
		.with_context(|| format!("failed to create log directory {}", dir.display()))?;
	let path = dir.join(LOG_FILE_NAME);
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;
	Ok((file, path))
}

fn install(dir: &Path) -> Result<PathBuf> {
	let (file, path) = open_log_file(dir)?;
	tracing_subscriber::fmt()
		.with_env_filter(env_filter())
		.with_writer(Arc::new(file))
		.with_ansi(false)
		.with_target(true)
		.try_init()
		.map_err(|err| anyhow!(err))?;
	Ok(path)
}

/// Install the global subscriber once. Failures (read-only data directory,
/// a subscriber installed by an embedder) leave logging disabled rather than
/// blocking the picker.
pub fn initialize() -> Option<&'static Path> {
	LOG_PATH
		.get_or_init(|| {
			let dir = app_dirs::get_data_dir().ok()?;
			install(&dir).ok()
		})
		.as_deref()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn log_file_is_created_inside_missing_directories() {
		let temp = tempfile::tempdir().unwrap();
		let dir = temp.path().join("nested").join("data");
		let (_, path) = open_log_file(&dir).unwrap();
		assert!(path.ends_with(LOG_FILE_NAME));
		assert!(path.exists());
	}
}
