use std::time::{Duration, Instant};

/// Deadline-based debounce timer driven by the caller's clock.
///
/// Scheduling always replaces the pending deadline, so a burst of triggers
/// fires once, `delay` after the last one.
#[derive(Debug, Default, Clone)]
pub(crate) struct Debouncer {
	deadline: Option<Instant>,
}

impl Debouncer {
	pub(crate) fn schedule(&mut self, now: Instant, delay: Duration) {
		self.deadline = Some(now + delay);
	}

	pub(crate) fn cancel(&mut self) {
		self.deadline = None;
	}

	pub(crate) fn is_pending(&self) -> bool {
		self.deadline.is_some()
	}

	/// Consume the deadline if it has passed.
	pub(crate) fn fire(&mut self, now: Instant) -> bool {
		match self.deadline {
			Some(deadline) if now >= deadline => {
				self.deadline = None;
				true
			}
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rescheduling_pushes_the_deadline_back() {
		let start = Instant::now();
		let delay = Duration::from_millis(300);
		let mut debouncer = Debouncer::default();
		debouncer.schedule(start, delay);
		debouncer.schedule(start + Duration::from_millis(200), delay);
		assert!(!debouncer.fire(start + Duration::from_millis(350)));
		assert!(debouncer.fire(start + Duration::from_millis(500)));
		assert!(!debouncer.fire(start + Duration::from_millis(900)));
	}

	#[test]
	fn zero_delay_fires_immediately() {
		let now = Instant::now();
		let mut debouncer = Debouncer::default();
		debouncer.schedule(now, Duration::ZERO);
		assert!(debouncer.is_pending());
		assert!(debouncer.fire(now));
		assert!(!debouncer.is_pending());
	}
}
