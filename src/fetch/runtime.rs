use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use fetch_select_api::PageSource;

use super::commands::{FetchCommand, FetchResult};
use super::worker;
use crate::select::{FetchRequest, FetchTicket};

/// UI-side handle to the fetch worker.
pub struct FetchRuntime<T> {
	tx: Sender<FetchCommand>,
	rx: Receiver<FetchResult<T>>,
	latest_epoch: Arc<AtomicU64>,
	in_flight: usize,
}

impl<T: Send + 'static> FetchRuntime<T> {
	pub fn spawn(source: Arc<dyn PageSource<T>>) -> Self {
		let (tx, rx, latest_epoch) = worker::spawn(source);
		Self::new(tx, rx, latest_epoch)
	}
}

impl<T> FetchRuntime<T> {
	pub fn new(
		tx: Sender<FetchCommand>,
		rx: Receiver<FetchResult<T>>,
		latest_epoch: Arc<AtomicU64>,
	) -> Self {
		Self {
			tx,
			rx,
			latest_epoch,
			in_flight: 0,
		}
	}

	/// Hand a request to the worker. Publishing its epoch lets the worker
	/// drop anything still queued from earlier terms.
	///
	/// Returns the ticket back when the worker is gone so the caller can fail
	/// it instead of waiting forever.
	pub fn issue(&mut self, request: FetchRequest) -> Result<(), FetchTicket> {
		let ticket = request.ticket.clone();
		self.latest_epoch.fetch_max(ticket.epoch, Ordering::AcqRel);
		match self.tx.send(FetchCommand::Fetch(request)) {
			Ok(()) => {
				self.in_flight += 1;
				Ok(())
			}
			Err(_) => Err(ticket),
		}
	}

	/// Next answer from the worker. Once the worker is gone nothing is
	/// outstanding any more.
	pub fn try_recv(&mut self) -> Result<FetchResult<T>, TryRecvError> {
		match self.rx.try_recv() {
			Ok(result) => {
				self.in_flight = self.in_flight.saturating_sub(1);
				Ok(result)
			}
			Err(TryRecvError::Disconnected) => {
				self.in_flight = 0;
				Err(TryRecvError::Disconnected)
			}
			Err(err) => Err(err),
		}
	}

	/// Requests handed to the worker that have not been answered yet.
	pub fn in_flight(&self) -> usize {
		self.in_flight
	}

	pub fn shutdown(&self) {
		let _ = self.tx.send(FetchCommand::Shutdown);
	}
}

impl<T> Drop for FetchRuntime<T> {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use fetch_select_api::{FetchError, Page, PageRequest};

	use super::*;
	use crate::fetch::FetchOutcome;
	use crate::select::PageKey;

	fn request(epoch: u64) -> FetchRequest {
		FetchRequest {
			ticket: FetchTicket {
				epoch,
				key: PageKey::new("", 0),
			},
			request: PageRequest::for_page("", 0, 10),
		}
	}

	#[test]
	fn tracks_outstanding_requests() {
		let source: Arc<dyn PageSource<u8>> =
			Arc::new(|_: &PageRequest| -> Result<Page<u8>, FetchError> { Ok(Page::new(vec![1], 1)) });
		let mut runtime = FetchRuntime::spawn(source);
		runtime.issue(request(1)).expect("worker running");
		assert_eq!(runtime.in_flight(), 1);

		let deadline = Instant::now() + Duration::from_secs(5);
		let result = loop {
			match runtime.try_recv() {
				Ok(result) => break result,
				Err(TryRecvError::Empty) if Instant::now() < deadline => {
					std::thread::sleep(Duration::from_millis(5));
				}
				Err(err) => panic!("no result: {err:?}"),
			}
		};
		assert!(matches!(result.outcome, FetchOutcome::Completed(Ok(_))));
		assert_eq!(runtime.in_flight(), 0);
	}

	#[test]
	fn a_panicking_source_leaves_nothing_outstanding() {
		let source: Arc<dyn PageSource<u8>> =
			Arc::new(|_: &PageRequest| -> Result<Page<u8>, FetchError> { panic!("source failed") });
		let mut runtime = FetchRuntime::spawn(source);
		runtime.issue(request(1)).expect("worker running");

		let deadline = Instant::now() + Duration::from_secs(5);
		loop {
			match runtime.try_recv() {
				Err(TryRecvError::Disconnected) => break,
				Err(TryRecvError::Empty) if Instant::now() < deadline => {
					std::thread::sleep(Duration::from_millis(5));
				}
				other => panic!("unexpected reply: {other:?}"),
			}
		}
		assert_eq!(runtime.in_flight(), 0);
	}

	#[test]
	fn issuing_to_a_dead_worker_returns_the_ticket() {
		let (tx, rx) = std::sync::mpsc::channel::<FetchCommand>();
		let (_result_tx, result_rx) = std::sync::mpsc::channel::<FetchResult<u8>>();
		drop(rx);
		let mut runtime = FetchRuntime::new(tx, result_rx, Arc::new(AtomicU64::new(0)));
		let ticket = runtime.issue(request(4)).expect_err("worker gone");
		assert_eq!(ticket.epoch, 4);
		assert_eq!(runtime.in_flight(), 0);
	}
}
