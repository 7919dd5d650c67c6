use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use super::listeners::{self, ListenerChange};
use super::state::{App, SelectOutcome};

impl<T: Clone + Send + 'static> App<T> {
	/// Pump the terminal event loop until the user submits or cancels.
	pub fn run(&mut self) -> Result<SelectOutcome<T>> {
		let mut terminal = ratatui::init();
		terminal.clear()?;
		self.select.focus();
		info!(field = %self.field, "select session started");

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<SelectOutcome<T>> = 'event_loop: loop {
			self.tick(Instant::now());
			if self.select.is_loading() {
				self.throbber_state.calc_next();
			}

			loop {
				match event_rx.try_recv() {
					Ok(Event::Resize(_, _)) => {}
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
				break Err(err).context("failed to draw frame");
			}

			let mut maybe_outcome = None;
			while let Some(event) = pending_events.pop_front() {
				let now = Instant::now();
				match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => {
						if let Some(outcome) = self.handle_key(key, now) {
							maybe_outcome = Some(outcome);
							break;
						}
					}
					Event::Mouse(mouse) => self.handle_mouse(mouse, now),
					_ => {}
				}
			}

			if let Some(change) = self.listeners.reconcile(self.select.is_open()) {
				if let Err(err) = listeners::apply(change, &mut io::stdout()) {
					break Err(err).context("failed to toggle mouse capture");
				}
			}

			if let Some(outcome) = maybe_outcome {
				break Ok(outcome);
			}

			thread::sleep(Duration::from_millis(16));
		};

		if self.listeners.reconcile(false).is_some() {
			let _ = listeners::apply(ListenerChange::Detach, &mut io::stdout());
		}
		ratatui::restore();

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		if let Ok(outcome) = &result {
			info!(accepted = outcome.accepted, value = %outcome.value, "select session finished");
		}
		result
	}
}
