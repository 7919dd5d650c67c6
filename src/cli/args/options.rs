use clap::ValueEnum;
use fetch_select::Anchor;

/// Where the control sits in the terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum AnchorArg {
	Top,
	Center,
	Bottom,
}

impl AnchorArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		self.anchor().as_str()
	}

	fn anchor(self) -> Anchor {
		match self {
			AnchorArg::Top => Anchor::Top,
			AnchorArg::Center => Anchor::Center,
			AnchorArg::Bottom => Anchor::Bottom,
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
