use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use fetch_select_api::PageSource;
use tracing::{debug, trace};

use super::commands::{FetchCommand, FetchOutcome, FetchResult};

/// Launch the fetch worker thread and return its channels plus the shared
/// "latest epoch" marker the worker consults before running a request.
pub fn spawn<T: Send + 'static>(
	source: Arc<dyn PageSource<T>>,
) -> (Sender<FetchCommand>, Receiver<FetchResult<T>>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();
	let latest_epoch = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_epoch);

	thread::spawn(move || worker_loop(source.as_ref(), command_rx, result_tx, &thread_latest));

	(command_tx, result_rx, latest_epoch)
}

fn worker_loop<T>(
	source: &dyn PageSource<T>,
	command_rx: Receiver<FetchCommand>,
	result_tx: Sender<FetchResult<T>>,
	latest_epoch: &AtomicU64,
) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(source, &result_tx, latest_epoch, command) {
			break;
		}
	}
	trace!("fetch worker stopped");
}

fn handle_command<T>(
	source: &dyn PageSource<T>,
	result_tx: &Sender<FetchResult<T>>,
	latest_epoch: &AtomicU64,
	command: FetchCommand,
) -> bool {
	match command {
		FetchCommand::Fetch(request) => {
			let outcome = if request.ticket.epoch < latest_epoch.load(Ordering::Acquire) {
				debug!(
					epoch = request.ticket.epoch,
					term = %request.ticket.key.term,
					"skipping superseded fetch"
				);
				FetchOutcome::Superseded
			} else {
				FetchOutcome::Completed(source.fetch_page(&request.request))
			};
			result_tx
				.send(FetchResult {
					ticket: request.ticket,
					outcome,
				})
				.is_ok()
		}
		FetchCommand::Shutdown => false,
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use fetch_select_api::{FetchError, Page, PageRequest};

	use super::*;
	use crate::select::{FetchRequest, FetchTicket, PageKey};

	fn request(epoch: u64, term: &str) -> FetchRequest {
		FetchRequest {
			ticket: FetchTicket {
				epoch,
				key: PageKey::new(term, 0),
			},
			request: PageRequest::for_page(term, 0, 5),
		}
	}

	fn echo() -> Arc<dyn PageSource<String>> {
		Arc::new(|request: &PageRequest| -> Result<Page<String>, FetchError> {
			Ok(Page::new(vec![request.search.clone()], 1))
		})
	}

	#[test]
	fn runs_requests_in_order() {
		let (tx, rx, _latest) = spawn(echo());
		tx.send(FetchCommand::Fetch(request(1, "a"))).unwrap();
		tx.send(FetchCommand::Fetch(request(1, "b"))).unwrap();

		let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
		let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
		assert_eq!(first.ticket.key.term, "a");
		assert_eq!(second.ticket.key.term, "b");
		match second.outcome {
			FetchOutcome::Completed(Ok(page)) => assert_eq!(page.data, vec!["b".to_string()]),
			other => panic!("unexpected outcome {other:?}"),
		}
		tx.send(FetchCommand::Shutdown).unwrap();
	}

	#[test]
	fn superseded_requests_are_not_executed() {
		let (tx, rx, latest) = spawn(echo());
		latest.store(3, Ordering::Release);
		tx.send(FetchCommand::Fetch(request(2, "old"))).unwrap();
		let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
		assert!(matches!(result.outcome, FetchOutcome::Superseded));
		tx.send(FetchCommand::Shutdown).unwrap();
	}
}
