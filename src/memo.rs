/* src/memo.rs */

//!
//! Identity-keyed caches.
//!
//! Inputs are compared by `Arc` pointer, never by value: a container that
//! produces a new collection signals a change by producing a new `Arc`. Each
//! slot keeps its input alive, so a cached pointer cannot be reused by an
//! unrelated allocation.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};

struct Slot<I, O> {
	input: Arc<I>,
	output: O,
}

/// Remembers the most recent input/output pair.
pub(crate) struct Memo<I, O> {
	slot: ArcSwapOption<Slot<I, O>>,
}

impl<I, O: Clone> Memo<I, O> {
	pub fn new() -> Self {
		Self {
			slot: ArcSwapOption::empty(),
		}
	}

	/// Returns the cached output if `input` is the last seen input, otherwise
	/// computes, caches and returns a fresh output.
	pub fn get_or_compute(&self, input: &Arc<I>, compute: impl FnOnce(&I) -> O) -> O {
		if let Some(slot) = &*self.slot.load()
			&& Arc::ptr_eq(&slot.input, input)
		{
			return slot.output.clone();
		}

		let output = compute(input);
		self.slot.store(Some(Arc::new(Slot {
			input: Arc::clone(input),
			output: output.clone(),
		})));
		output
	}

	pub fn clear(&self) {
		self.slot.store(None);
	}
}

/// One [`Memo`] per key, so that inputs under different keys are cached
/// independently.
pub(crate) struct KeyedMemo<I, O> {
	entries: ArcSwap<HashMap<String, Arc<Memo<I, O>>>>,
}

impl<I, O: Clone> KeyedMemo<I, O> {
	pub fn new() -> Self {
		Self {
			entries: ArcSwap::from_pointee(HashMap::new()),
		}
	}

	/// Returns the memo for `key`, creating it on first use.
	pub fn entry(&self, key: &str) -> Arc<Memo<I, O>> {
		if let Some(memo) = self.entries.load().get(key) {
			return Arc::clone(memo);
		}

		let created = Arc::new(Memo::new());
		let mut result = Arc::clone(&created);
		self.entries.rcu(|map| {
			if let Some(existing) = map.get(key) {
				result = Arc::clone(existing);
				return Arc::clone(map);
			}
			result = Arc::clone(&created);
			let mut new_map = (**map).clone();
			new_map.insert(key.to_string(), Arc::clone(&created));
			Arc::new(new_map)
		});
		result
	}

	/// Drops every memo whose key is rejected by `keep`.
	pub fn retain(&self, keep: impl Fn(&str) -> bool) {
		self.entries.rcu(|map| {
			let mut new_map = (**map).clone();
			new_map.retain(|key, _| keep(key));
			new_map
		});
	}

	pub fn clear(&self) {
		self.entries.store(Arc::new(HashMap::new()));
	}

	pub fn len(&self) -> usize {
		self.entries.load().len()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn memo_reuses_output_for_same_input() {
		let memo = Memo::<Vec<i32>, i32>::new();
		let input = Arc::new(vec![1, 2, 3]);
		let calls = Cell::new(0);

		let sum = |v: &Vec<i32>| {
			calls.set(calls.get() + 1);
			v.iter().sum()
		};
		assert_eq!(memo.get_or_compute(&input, sum), 6);
		assert_eq!(memo.get_or_compute(&input, sum), 6);
		assert_eq!(calls.get(), 1);
	}

	#[test]
	fn memo_compares_identity_not_value() {
		let memo = Memo::<Vec<i32>, i32>::new();
		let calls = Cell::new(0);
		let len = |v: &Vec<i32>| {
			calls.set(calls.get() + 1);
			v.len() as i32
		};

		memo.get_or_compute(&Arc::new(vec![1]), len);
		memo.get_or_compute(&Arc::new(vec![1]), len);
		assert_eq!(calls.get(), 2);

		memo.clear();
		memo.get_or_compute(&Arc::new(vec![1]), len);
		assert_eq!(calls.get(), 3);
	}

	#[test]
	fn keyed_memo_isolates_keys() {
		let keyed = KeyedMemo::<i32, i32>::new();
		let a = keyed.entry("a");
		let b = keyed.entry("b");

		assert!(Arc::ptr_eq(&a, &keyed.entry("a")));
		assert!(!Arc::ptr_eq(&a, &b));

		keyed.retain(|key| key == "a");
		assert_eq!(keyed.len(), 1);
		assert!(Arc::ptr_eq(&a, &keyed.entry("a")));

		keyed.clear();
		assert_eq!(keyed.len(), 0);
	}
}
