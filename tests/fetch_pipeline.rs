//! Drives the select control through the background fetch worker.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use fetch_select::fetch::{FetchOutcome, FetchResult, FetchRuntime};
use fetch_select::select::{Resolution, SelectOptions};
use fetch_select::sources::{RecordAdapter, RecordFields, StaticSource};
use fetch_select::{FetchError, IncrementalSearchSelect, Page, PageRequest, PageSource};
use serde_json::{Value, json};

fn brands(count: usize) -> Vec<Value> {
	(1..=count)
		.map(|id| json!({"id": id, "name": format!("Brand {id:02}")}))
		.collect()
}

fn options() -> SelectOptions {
	SelectOptions {
		multiple: true,
		debounce: Duration::ZERO,
		page_size: 4,
		..SelectOptions::default()
	}
}

fn next_result<T>(runtime: &mut FetchRuntime<T>) -> FetchResult<T> {
	let deadline = Instant::now() + Duration::from_secs(5);
	loop {
		if let Ok(result) = runtime.try_recv() {
			return result;
		}
		assert!(Instant::now() < deadline, "worker did not answer");
		thread::sleep(Duration::from_millis(2));
	}
}

fn apply(select: &mut IncrementalSearchSelect<Value>, result: FetchResult<Value>) -> Option<Resolution> {
	match result.outcome {
		FetchOutcome::Completed(page) => Some(select.resolve(result.ticket, page)),
		FetchOutcome::Superseded => None,
	}
}

#[test]
fn worker_pages_until_the_source_is_exhausted() {
	let adapter = RecordAdapter::default();
	let matcher = adapter.clone();
	let source = StaticSource::new(brands(10), move |record: &Value, term: &str| {
		matcher.matches(record, term)
	});
	let mut runtime = FetchRuntime::spawn(Arc::new(source));
	let mut select = IncrementalSearchSelect::new(adapter, options());
	select.set_viewport_height(4);

	let now = Instant::now();
	select.open(now, 0, 20);
	let mut requests = 0;
	while !select.all_fetched() {
		let request = select.poll(now).expect("a page is due");
		runtime.issue(request).expect("worker running");
		requests += 1;
		let result = next_result(&mut runtime);
		assert_eq!(apply(&mut select, result), Some(Resolution::Applied));
		select.scroll_by(100, now);
		assert!(requests <= 3, "pagination must terminate");
	}

	assert_eq!(requests, 3);
	assert_eq!(select.results().len(), 10);
	select.scroll_by(100, now);
	assert!(select.poll(now).is_none());
	assert_eq!(runtime.in_flight(), 0);
}

/// Blocks requests for one term until the test releases them.
struct GatedSource {
	gated_term: &'static str,
	gate: Mutex<Receiver<()>>,
	records: Vec<Value>,
}

impl GatedSource {
	fn new(gated_term: &'static str) -> (Self, Sender<()>) {
		let (tx, rx) = mpsc::channel();
		let source = Self {
			gated_term,
			gate: Mutex::new(rx),
			records: vec![
				json!({"id": 1, "name": "Acme"}),
				json!({"id": 2, "name": "Abacus"}),
			],
		};
		(source, tx)
	}
}

impl PageSource<Value> for GatedSource {
	fn fetch_page(&self, request: &PageRequest) -> Result<Page<Value>, FetchError> {
		if request.search == self.gated_term {
			let gate = self.gate.lock().map_err(|_| FetchError::Disconnected)?;
			let _ = gate.recv();
		}
		let needle = request.search.to_lowercase();
		let data = self
			.records
			.iter()
			.filter(|record| {
				record["name"]
					.as_str()
					.is_some_and(|name| name.to_lowercase().contains(&needle))
			})
			.cloned()
			.collect();
		Ok(Page::new(data, 1))
	}
}

#[test]
fn responses_for_an_abandoned_term_never_reach_the_buffer() {
	let (source, release) = GatedSource::new("a");
	let mut runtime = FetchRuntime::spawn(Arc::new(source));
	let adapter = RecordAdapter::new(RecordFields::default());
	let mut select = IncrementalSearchSelect::new(adapter, options());

	let now = Instant::now();
	select.open(now, 0, 20);
	select.set_query("a", now);
	runtime.issue(select.poll(now).expect("first term due")).unwrap();

	select.set_query("acm", now);
	runtime.issue(select.poll(now).expect("second term due")).unwrap();
	release.send(()).unwrap();

	let first = next_result(&mut runtime);
	assert_eq!(first.ticket.key.term, "a");
	let outcome = apply(&mut select, first);
	assert!(matches!(outcome, None | Some(Resolution::Stale)));
	assert!(select.results().is_empty());

	let second = next_result(&mut runtime);
	assert_eq!(apply(&mut select, second), Some(Resolution::Applied));
	assert_eq!(select.results(), &[json!({"id": 1, "name": "Acme"})]);
	assert!(!select.is_loading());
}
