//! Marks: named, buffer-scoped snapshots of a selection set.
//!
//! A mark stores the ordered byte ranges of a selection set. Edits made
//! through the editor move the ranges along with the text. The anchored
//! state of the selections is not kept; whoever restores a mark decides it
//! from the current mode.

use crate::range::Filerange;

const SLOTS: usize = 26 + 26 + 3;

/// A valid mark name: `a`-`z`, `A`-`Z`, `^`, `<` or `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark(u8);

impl Mark {
	/// Mark holding the selections of the last visual mode, and the default
	/// target of selection-set actions.
	pub const SELECTION: Mark = Mark(b'^');

	/// Validates a mark name.
	pub fn from_byte(name: u8) -> Option<Self> {
		match name {
			b'a'..=b'z' | b'A'..=b'Z' | b'^' | b'<' | b'>' => Some(Self(name)),
			_ => None,
		}
	}

	/// Returns the mark name.
	pub fn name(self) -> char {
		self.0 as char
	}

	fn slot(self) -> usize {
		match self.0 {
			b @ b'a'..=b'z' => (b - b'a') as usize,
			b @ b'A'..=b'Z' => 26 + (b - b'A') as usize,
			b'^' => 52,
			b'<' => 53,
			_ => 54,
		}
	}
}

/// Mark table of one buffer.
#[derive(Debug, Clone)]
pub struct Marks {
	slots: [Vec<Filerange>; SLOTS],
}

impl Default for Marks {
	fn default() -> Self {
		Self {
			slots: std::array::from_fn(|_| Vec::new()),
		}
	}
}

impl Marks {
	/// Stores `ranges` under `mark`, replacing what was there.
	pub fn set(&mut self, mark: Mark, ranges: &[Filerange]) {
		self.slots[mark.slot()] = ranges.to_vec();
	}

	/// Returns the saved ranges, empty if the mark was never set.
	pub fn get(&self, mark: Mark) -> &[Filerange] {
		&self.slots[mark.slot()]
	}

	/// Returns the saved ranges clamped to a text of `size` bytes.
	///
	/// Ranges left empty by the clamp are dropped.
	pub fn get_clamped(&self, mark: Mark, size: usize) -> Vec<Filerange> {
		self.get(mark)
			.iter()
			.map(|r| r.clamp(size))
			.filter(|r| !r.is_empty())
			.collect()
	}

	/// Forgets `mark`.
	pub fn clear(&mut self, mark: Mark) {
		self.slots[mark.slot()].clear();
	}

	/// Moves saved ranges after `len` bytes were inserted at `pos`.
	///
	/// A range containing `pos` grows; one starting at `pos` moves.
	pub fn adjust_insert(&mut self, pos: usize, len: usize) {
		for r in self.slots.iter_mut().flatten() {
			if r.start >= pos {
				r.start += len;
				r.end += len;
			} else if r.end > pos {
				r.end += len;
			}
		}
	}

	/// Moves saved ranges after `range` was deleted; their overlap with it
	/// is cut away.
	pub fn adjust_delete(&mut self, range: Filerange) {
		let shift = |p: usize| {
			if p >= range.end {
				p - range.len()
			} else {
				p.min(range.start)
			}
		};
		for r in self.slots.iter_mut().flatten() {
			r.start = shift(r.start);
			r.end = shift(r.end);
		}
	}
}
