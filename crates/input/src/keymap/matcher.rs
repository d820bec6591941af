use std::collections::HashMap;

use vix_keymap_parser::{canonical, tokens};

/// Outcome of matching a key stream against a [`Matcher`].
#[derive(Debug)]
pub enum MatchResult<'a, T> {
	/// The longest binding that is a prefix of the keys, and its byte length.
	/// No longer binding can match whatever follows.
	Complete { value: &'a T, len: usize },
	/// The keys ran out inside a longer binding. `longest` is the longest
	/// complete binding seen so far, if any.
	Partial { longest: Option<(&'a T, usize)> },
	None,
}

#[derive(Debug)]
struct Node<T> {
	value: Option<T>,
	children: HashMap<Box<[u8]>, Node<T>>,
}

impl<T> Default for Node<T> {
	fn default() -> Self {
		Self {
			value: None,
			children: HashMap::new(),
		}
	}
}

/// A trie over key tokens.
///
/// Edges are whole tokens as split by the key tokenizer, so `<C-w>` is a
/// single step and never a prefix of `<`. Modified keys are stored and
/// looked up in canonical modifier order.
#[derive(Debug)]
pub struct Matcher<T> {
	root: Node<T>,
	len: usize,
}

impl<T> Default for Matcher<T> {
	fn default() -> Self {
		Self {
			root: Node::default(),
			len: 0,
		}
	}
}

impl<T> Matcher<T> {
	/// Binds `keys` to `value` unless the sequence is already bound.
	///
	/// Returns false, dropping `value`, if it was. Empty sequences are never
	/// bound.
	pub fn add(&mut self, keys: &[u8], value: T) -> bool {
		if keys.is_empty() {
			return false;
		}
		let mut node = &mut self.root;
		for token in tokens(keys) {
			node = node.children.entry(canonical(token).into()).or_default();
		}
		if node.value.is_some() {
			return false;
		}
		node.value = Some(value);
		self.len += 1;
		true
	}

	/// Matches the longest bound prefix of `keys`.
	pub fn lookup(&self, keys: &[u8]) -> MatchResult<'_, T> {
		let mut node = &self.root;
		let mut pos = 0;
		let mut longest = None;
		for token in tokens(keys) {
			let Some(child) = node.children.get(&*canonical(token)) else {
				return match longest {
					Some((value, len)) => MatchResult::Complete { value, len },
					None => MatchResult::None,
				};
			};
			node = child;
			pos += token.len();
			if let Some(value) = &node.value {
				longest = Some((value, pos));
			}
		}
		match longest {
			_ if pos == 0 => MatchResult::None,
			Some((value, len)) if node.children.is_empty() => MatchResult::Complete { value, len },
			longest => MatchResult::Partial { longest },
		}
	}

	/// Returns the value bound to exactly `keys`.
	pub fn get(&self, keys: &[u8]) -> Option<&T> {
		let mut node = &self.root;
		for token in tokens(keys) {
			node = node.children.get(&*canonical(token))?;
		}
		node.value.as_ref()
	}

	/// Number of bound sequences.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}
