use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Write-side view of an external form model.
///
/// The control writes its serialized selection into one named field on every
/// change and reads that field's error message for display. It never reads
/// field values back.
pub trait FormBinding {
	fn set_field(&mut self, name: &str, value: String);

	fn error(&self, name: &str) -> Option<String>;
}

/// A form model shared between the control and the code that owns the form.
impl<F: FormBinding> FormBinding for Rc<RefCell<F>> {
	fn set_field(&mut self, name: &str, value: String) {
		self.borrow_mut().set_field(name, value);
	}

	fn error(&self, name: &str) -> Option<String> {
		self.borrow().error(name)
	}
}

/// Minimal in-memory form model: field values plus per-field error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
	values: BTreeMap<String, String>,
	errors: BTreeMap<String, String>,
	writes: usize,
}

impl FormModel {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn value(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	pub fn set_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
		self.errors.insert(name.into(), message.into());
	}

	pub fn clear_error(&mut self, name: &str) {
		self.errors.remove(name);
	}

	/// Number of `set_field` calls observed so far.
	#[must_use]
	pub fn writes(&self) -> usize {
		self.writes
	}

	#[must_use]
	pub fn values(&self) -> &BTreeMap<String, String> {
		&self.values
	}
}

impl FormBinding for FormModel {
	fn set_field(&mut self, name: &str, value: String) {
		self.writes += 1;
		self.values.insert(name.to_string(), value);
	}

	fn error(&self, name: &str) -> Option<String> {
		self.errors.get(name).cloned()
	}
}
