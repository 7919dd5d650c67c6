//! Built-in colour themes for the select control.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub border: Style,
	pub focused_border: Style,
	pub title: Style,
	pub placeholder: Style,
	pub chip: Style,
	pub row_highlight: Style,
	pub muted: Style,
	pub error: Style,
}

impl Default for Theme {
	fn default() -> Self {
		DEFAULT
	}
}

pub const DEFAULT: Theme = Theme {
	border: Style::new().fg(Color::DarkGray),
	focused_border: Style::new().fg(Color::Cyan),
	title: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
	placeholder: Style::new().fg(Color::DarkGray),
	chip: Style::new().fg(Color::Black).bg(Color::Cyan),
	row_highlight: Style::new()
		.fg(Color::Black)
		.bg(Color::Cyan)
		.add_modifier(Modifier::BOLD),
	muted: Style::new().fg(Color::DarkGray),
	error: Style::new().fg(Color::Red),
};

pub const LIGHT: Theme = Theme {
	border: Style::new().fg(Color::Gray),
	focused_border: Style::new().fg(Color::Blue),
	title: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
	placeholder: Style::new().fg(Color::Gray),
	chip: Style::new().fg(Color::White).bg(Color::Blue),
	row_highlight: Style::new().fg(Color::White).bg(Color::Blue),
	muted: Style::new().fg(Color::Gray),
	error: Style::new().fg(Color::LightRed),
};

pub const SOLARIZED: Theme = Theme {
	border: Style::new().fg(Color::Rgb(88, 110, 117)),
	focused_border: Style::new().fg(Color::Rgb(38, 139, 210)),
	title: Style::new()
		.fg(Color::Rgb(181, 137, 0))
		.add_modifier(Modifier::BOLD),
	placeholder: Style::new().fg(Color::Rgb(88, 110, 117)),
	chip: Style::new()
		.fg(Color::Rgb(253, 246, 227))
		.bg(Color::Rgb(7, 54, 66)),
	row_highlight: Style::new()
		.bg(Color::Rgb(0, 43, 54))
		.fg(Color::Rgb(181, 137, 0)),
	muted: Style::new().fg(Color::Rgb(88, 110, 117)),
	error: Style::new().fg(Color::Rgb(220, 50, 47)),
};

const BUILT_IN: &[(&str, Theme)] = &[("default", DEFAULT), ("light", LIGHT), ("solarized", SOLARIZED)];

fn normalize_name(name: &str) -> String {
	name.trim().to_ascii_lowercase()
}

/// Lookup a theme by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let normalized = normalize_name(name);
	BUILT_IN
		.iter()
		.find(|(candidate, _)| *candidate == normalized)
		.map(|(_, theme)| *theme)
}

/// Names of the built-in themes, sorted.
#[must_use]
pub fn names() -> Vec<&'static str> {
	let mut names: Vec<_> = BUILT_IN.iter().map(|(name, _)| *name).collect();
	names.sort_unstable();
	names
}
