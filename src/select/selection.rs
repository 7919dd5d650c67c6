use fetch_select_api::OptionKey;
use indexmap::IndexMap;

/// Ordered set of selected items, unique by key.
#[derive(Debug, Clone)]
pub struct SelectionSet<T> {
	items: IndexMap<OptionKey, T>,
}

impl<T> Default for SelectionSet<T> {
	fn default() -> Self {
		Self {
			items: IndexMap::new(),
		}
	}
}

impl<T> SelectionSet<T> {
	/// Build a set from `(key, item)` pairs, keeping the first item of each key.
	pub fn from_keyed(pairs: impl IntoIterator<Item = (OptionKey, T)>) -> Self {
		let mut set = Self::default();
		for (key, item) in pairs {
			set.items.entry(key).or_insert(item);
		}
		set
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	#[must_use]
	pub fn contains(&self, key: &OptionKey) -> bool {
		self.items.contains_key(key)
	}

	pub fn items(&self) -> impl Iterator<Item = &T> {
		self.items.values()
	}

	pub fn keys(&self) -> impl Iterator<Item = &OptionKey> {
		self.items.keys()
	}

	#[must_use]
	pub fn first(&self) -> Option<&T> {
		self.items.first().map(|(_, item)| item)
	}

	#[must_use]
	pub fn last_key(&self) -> Option<&OptionKey> {
		self.items.last().map(|(key, _)| key)
	}

	/// Replace the whole set with a single item.
	pub fn replace(&mut self, key: OptionKey, item: T) {
		self.items.clear();
		self.items.insert(key, item);
	}

	/// Add the item if absent, remove it if present. Returns `true` when the
	/// item ended up selected.
	pub fn toggle(&mut self, key: OptionKey, item: T) -> bool {
		if self.items.shift_remove(&key).is_some() {
			false
		} else {
			self.items.insert(key, item);
			true
		}
	}

	pub fn remove(&mut self, key: &OptionKey) -> Option<T> {
		self.items.shift_remove(key)
	}

	pub fn clear(&mut self) {
		self.items.clear();
	}

	/// Serialized form written to a bound form field: comma-joined keys, or the
	/// empty string when nothing is selected.
	#[must_use]
	pub fn serialize_keys(&self) -> String {
		self.items
			.keys()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(",")
	}
}

impl<T: Clone> SelectionSet<T> {
	#[must_use]
	pub fn to_vec(&self) -> Vec<T> {
		self.items.values().cloned().collect()
	}
}
