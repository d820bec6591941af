//! Binding trees: one token trie per mode.
//!
//! A binding maps a key sequence either to an alias, a key string that is
//! substituted into the input, or directly to an action. Bindings are added
//! in order and the first definition of a sequence wins, so configured
//! bindings are added before the defaults. A built [`Keymap`] is immutable
//! and shared between editors.

mod defaults;
mod matcher;

#[cfg(test)]
mod tests;

pub use defaults::DEFAULT_TABLES;
pub use matcher::{MatchResult, Matcher};
use tracing::debug;
use vix_keymap_parser::Token;
use vix_primitives::Mode;

use crate::action::{self, KeyAction};

/// What a key sequence is bound to.
#[derive(Debug)]
pub enum Binding {
	/// Keys substituted for the matched sequence.
	Alias(Box<[u8]>),
	/// An action run with the keys following the matched sequence.
	Action(&'static KeyAction),
}

impl Binding {
	/// Resolves an expansion that names exactly one known action to that
	/// action, keeping everything else as an alias.
	fn new(alias: &str) -> Self {
		if let Some((token, len)) = Token::parse(alias.as_bytes())
			&& len == alias.len()
			&& let Some(action) = token.action_name().and_then(action::find)
		{
			return Binding::Action(action);
		}
		Binding::Alias(alias.as_bytes().into())
	}
}

/// Mode whose bindings apply when a mode's own bindings do not match.
pub fn parent(mode: Mode) -> Option<Mode> {
	match mode {
		Mode::VisualLine => Some(Mode::Visual),
		Mode::Replace => Some(Mode::Insert),
		_ => None,
	}
}

/// Immutable per-mode binding trees.
#[derive(Debug)]
pub struct Keymap {
	modes: [Matcher<Binding>; Mode::ALL.len()],
}

impl Default for Keymap {
	fn default() -> Self {
		Self::builder().defaults().build()
	}
}

impl Keymap {
	pub fn builder() -> KeymapBuilder {
		KeymapBuilder {
			modes: std::array::from_fn(|_| Matcher::default()),
		}
	}

	/// Matches `keys` in `mode`, falling back to the parent mode when the
	/// mode's own tree has no binding at all.
	pub fn lookup(&self, mode: Mode, keys: &[u8]) -> MatchResult<'_, Binding> {
		match self.modes[mode.index()].lookup(keys) {
			MatchResult::None => match parent(mode) {
				Some(parent) => self.lookup(parent, keys),
				None => MatchResult::None,
			},
			found => found,
		}
	}

	/// Returns the binding of exactly `keys` in `mode` itself.
	pub fn get(&self, mode: Mode, keys: &str) -> Option<&Binding> {
		self.modes[mode.index()].get(keys.as_bytes())
	}

	/// Number of bindings defined directly in `mode`.
	pub fn len(&self, mode: Mode) -> usize {
		self.modes[mode.index()].len()
	}
}

/// Collects bindings for a [`Keymap`].
pub struct KeymapBuilder {
	modes: [Matcher<Binding>; Mode::ALL.len()],
}

impl KeymapBuilder {
	/// Binds `keys` to `alias` in `mode` unless already bound there.
	pub fn bind(mut self, mode: Mode, keys: &str, alias: &str) -> Self {
		if !self.modes[mode.index()].add(keys.as_bytes(), Binding::new(alias)) {
			debug!(mode = ?mode, keys, alias, "binding shadowed by an earlier one");
		}
		self
	}

	/// Binds every entry of `table` in `mode`.
	pub fn table(self, mode: Mode, table: &[(&str, &str)]) -> Self {
		table.iter().fold(self, |builder, (keys, alias)| builder.bind(mode, keys, alias))
	}

	/// Adds the default tables of every mode after what is bound already.
	pub fn defaults(self) -> Self {
		DEFAULT_TABLES.iter().fold(self, |builder, (mode, tables)| {
			tables.iter().fold(builder, |builder, table| builder.table(*mode, table))
		})
	}

	pub fn build(self) -> Keymap {
		Keymap { modes: self.modes }
	}
}
