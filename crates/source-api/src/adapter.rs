use std::sync::Arc;

use ratatui::text::Line;

use crate::types::OptionKey;

/// Describes how the control reads an item of type `T`.
pub trait OptionAdapter<T>: Send + Sync {
	/// Unique key used for selection membership and form serialization.
	fn value(&self, item: &T) -> OptionKey;

	/// Rich label rendered in the dropdown and on chips.
	fn label(&self, item: &T) -> Line<'static>;

	/// Plain text shown in the input when a single item is selected.
	///
	/// Defaults to the label's text, or the key when the label is empty.
	fn display_text(&self, item: &T) -> String {
		let text = plain_text(&self.label(item));
		if text.is_empty() {
			self.value(item).to_string()
		} else {
			text
		}
	}
}

/// Concatenate the contents of every span in `line`.
#[must_use]
pub fn plain_text(line: &Line<'_>) -> String {
	line.spans.iter().map(|span| span.content.as_ref()).collect()
}

type ValueFn<T> = Arc<dyn Fn(&T) -> OptionKey + Send + Sync>;
type LabelFn<T> = Arc<dyn Fn(&T) -> Line<'static> + Send + Sync>;
type DisplayFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// [`OptionAdapter`] assembled from closures.
pub struct FnAdapter<T> {
	value: ValueFn<T>,
	label: LabelFn<T>,
	display: Option<DisplayFn<T>>,
}

impl<T> Clone for FnAdapter<T> {
	fn clone(&self) -> Self {
		Self {
			value: Arc::clone(&self.value),
			label: Arc::clone(&self.label),
			display: self.display.clone(),
		}
	}
}

impl<T> FnAdapter<T> {
	pub fn new<V, L>(value: V, label: L) -> Self
	where
		V: Fn(&T) -> OptionKey + Send + Sync + 'static,
		L: Fn(&T) -> Line<'static> + Send + Sync + 'static,
	{
		Self {
			value: Arc::new(value),
			label: Arc::new(label),
			display: None,
		}
	}

	#[must_use]
	pub fn with_display_text<D>(mut self, display: D) -> Self
	where
		D: Fn(&T) -> String + Send + Sync + 'static,
	{
		self.display = Some(Arc::new(display));
		self
	}
}

impl<T> OptionAdapter<T> for FnAdapter<T> {
	fn value(&self, item: &T) -> OptionKey {
		(self.value)(item)
	}

	fn label(&self, item: &T) -> Line<'static> {
		(self.label)(item)
	}

	fn display_text(&self, item: &T) -> String {
		match &self.display {
			Some(display) => display(item),
			None => {
				let text = plain_text(&self.label(item));
				if text.is_empty() {
					self.value(item).to_string()
				} else {
					text
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use ratatui::text::Span;

	use super::*;

	struct Brand {
		id: i64,
		name: &'static str,
	}

	#[test]
	fn display_text_falls_back_to_label_then_value() {
		let adapter = FnAdapter::new(
			|brand: &Brand| OptionKey::from(brand.id),
			|brand: &Brand| Line::from(vec![Span::raw(brand.name), Span::raw("")]),
		);
		let named = Brand { id: 1, name: "Acme" };
		let unnamed = Brand { id: 2, name: "" };
		assert_eq!(adapter.display_text(&named), "Acme");
		assert_eq!(adapter.display_text(&unnamed), "2");
	}

	#[test]
	fn explicit_display_text_wins() {
		let adapter = FnAdapter::new(
			|brand: &Brand| OptionKey::from(brand.id),
			|brand: &Brand| Line::from(brand.name),
		)
		.with_display_text(|brand: &Brand| format!("#{} {}", brand.id, brand.name));
		assert_eq!(adapter.display_text(&Brand { id: 9, name: "Zed" }), "#9 Zed");
	}
}
