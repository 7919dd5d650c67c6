use std::io::{self, Write};

use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;

/// Change to the terminal's pointer reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerChange {
	Attach,
	Detach,
}

/// Tracks whether pointer reporting is on. It is attached exactly while the
/// dropdown is open so clicks outside can close it, and released otherwise
/// so the terminal keeps its native selection behaviour.
#[derive(Debug, Default)]
pub(crate) struct PointerListeners {
	attached: bool,
}

impl PointerListeners {
	pub(crate) fn reconcile(&mut self, open: bool) -> Option<ListenerChange> {
		match (open, self.attached) {
			(true, false) => {
				self.attached = true;
				Some(ListenerChange::Attach)
			}
			(false, true) => {
				self.attached = false;
				Some(ListenerChange::Detach)
			}
			_ => None,
		}
	}

	pub(crate) fn is_attached(&self) -> bool {
		self.attached
	}
}

pub(crate) fn apply(change: ListenerChange, out: &mut impl Write) -> io::Result<()> {
	match change {
		ListenerChange::Attach => execute!(out, EnableMouseCapture),
		ListenerChange::Detach => execute!(out, DisableMouseCapture),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn attaches_only_on_transitions() {
		let mut listeners = PointerListeners::default();
		assert_eq!(listeners.reconcile(false), None);
		assert_eq!(listeners.reconcile(true), Some(ListenerChange::Attach));
		assert_eq!(listeners.reconcile(true), None);
		assert!(listeners.is_attached());
		assert_eq!(listeners.reconcile(false), Some(ListenerChange::Detach));
		assert!(!listeners.is_attached());
	}

	#[test]
	fn apply_writes_escape_sequences() {
		let mut out = Vec::new();
		apply(ListenerChange::Attach, &mut out).unwrap();
		assert!(!out.is_empty());
	}
}
