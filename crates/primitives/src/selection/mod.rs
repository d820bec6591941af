//! Multiple selections over a text.
//!
//! A [`Selection`] is an anchor and a cursor, both inclusive character
//! positions. An unanchored selection covers only the character under its
//! cursor. A [`SelectionSet`] keeps its selections sorted by position with
//! a designated primary and is never empty.

pub mod ops;

use slab::Slab;

use crate::range::Filerange;
use crate::text::TextEngine;

#[cfg(test)]
mod tests;

/// One selection: an anchor and a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
	anchor: usize,
	cursor: usize,
	anchored: bool,
}

impl Selection {
	/// Creates an unanchored selection with its cursor at `pos`.
	pub fn new(pos: usize) -> Self {
		Self {
			anchor: pos,
			cursor: pos,
			anchored: false,
		}
	}

	/// Creates an anchored selection spanning `anchor` to `cursor`, inclusive.
	pub fn spanning(anchor: usize, cursor: usize) -> Self {
		Self {
			anchor,
			cursor,
			anchored: true,
		}
	}

	/// Creates an anchored selection covering `range`.
	///
	/// For a forward selection the cursor lands on the last character of
	/// the range, otherwise on its first.
	pub fn from_range(text: &dyn TextEngine, range: Filerange, forward: bool) -> Self {
		if range.is_empty() {
			return Self::spanning(range.start, range.start);
		}
		let last = text.char_prev(range.end);
		if forward {
			Self::spanning(range.start, last)
		} else {
			Self::spanning(last, range.start)
		}
	}

	pub fn anchor(&self) -> usize {
		self.anchor
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn is_anchored(&self) -> bool {
		self.anchored
	}

	/// Sets the anchored flag; unanchoring drops the anchor onto the cursor.
	pub fn set_anchored(&mut self, anchored: bool) {
		self.anchored = anchored;
		if !anchored {
			self.anchor = self.cursor;
		}
	}

	/// Returns the smaller of anchor and cursor.
	pub fn start(&self) -> usize {
		if self.anchored {
			self.anchor.min(self.cursor)
		} else {
			self.cursor
		}
	}

	/// Returns true unless the cursor lies before the anchor.
	pub fn is_forward(&self) -> bool {
		self.anchor <= self.cursor
	}

	/// Returns the covered bytes, including the character under the cursor.
	pub fn range(&self, text: &dyn TextEngine) -> Filerange {
		let (lo, hi) = if self.anchored {
			(self.anchor.min(self.cursor), self.anchor.max(self.cursor))
		} else {
			(self.cursor, self.cursor)
		};
		Filerange::new(lo, text.char_next(hi))
	}

	/// Moves the cursor; the anchor follows unless anchored.
	pub fn move_to(&mut self, pos: usize) {
		self.cursor = pos;
		if !self.anchored {
			self.anchor = pos;
		}
	}

	/// Swaps anchor and cursor.
	pub fn flip(&mut self) {
		std::mem::swap(&mut self.anchor, &mut self.cursor);
	}

	/// Reduces the selection to an unanchored cursor.
	pub fn collapse(&mut self) {
		self.set_anchored(false);
	}

	/// Shifts positions at or after `pos` by `len` inserted bytes.
	pub fn adjust_insert(&mut self, pos: usize, len: usize) {
		for p in [&mut self.anchor, &mut self.cursor] {
			if *p >= pos {
				*p += len;
			}
		}
	}

	/// Moves positions after a deleted `range` back, and into it to its start.
	pub fn adjust_delete(&mut self, range: Filerange) {
		for p in [&mut self.anchor, &mut self.cursor] {
			if *p >= range.end {
				*p -= range.len();
			} else if *p > range.start {
				*p = range.start;
			}
		}
	}
}

/// Handle of a selection within a [`SelectionSet`].
///
/// Handles stay valid until their selection is disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionId(usize);

/// A non-empty, position ordered set of selections with a primary.
#[derive(Debug, Clone)]
pub struct SelectionSet {
	slab: Slab<Selection>,
	order: Vec<SelectionId>,
	primary: SelectionId,
}

impl SelectionSet {
	/// Creates a set holding `sel` as its primary.
	pub fn new(sel: Selection) -> Self {
		let mut slab = Slab::new();
		let primary = SelectionId(slab.insert(sel));
		Self {
			slab,
			order: vec![primary],
			primary,
		}
	}

	#[allow(clippy::len_without_is_empty, reason = "a selection set is never empty")]
	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn primary_id(&self) -> SelectionId {
		self.primary
	}

	pub fn primary(&self) -> &Selection {
		&self.slab[self.primary.0]
	}

	/// Mutable access to the primary; call [`Self::normalize`] after moving it.
	pub fn primary_mut(&mut self) -> &mut Selection {
		&mut self.slab[self.primary.0]
	}

	/// Makes `id` the primary. Returns false for a disposed handle.
	pub fn set_primary(&mut self, id: SelectionId) -> bool {
		if !self.slab.contains(id.0) {
			return false;
		}
		self.primary = id;
		true
	}

	pub fn get(&self, id: SelectionId) -> Option<&Selection> {
		self.slab.get(id.0)
	}

	/// Mutable access to one selection; call [`Self::normalize`] after moving it.
	pub fn get_mut(&mut self, id: SelectionId) -> Option<&mut Selection> {
		self.slab.get_mut(id.0)
	}

	/// Iterates selections in position order.
	pub fn iter(&self) -> impl Iterator<Item = (SelectionId, &Selection)> + '_ {
		self.order.iter().map(|&id| (id, &self.slab[id.0]))
	}

	/// Selection handles in position order.
	pub fn ids(&self) -> Vec<SelectionId> {
		self.order.clone()
	}

	pub fn first(&self) -> SelectionId {
		self.order[0]
	}

	pub fn last(&self) -> SelectionId {
		self.order[self.order.len() - 1]
	}

	/// Position of `id` in the ordering.
	pub fn index_of(&self, id: SelectionId) -> Option<usize> {
		self.order.iter().position(|&o| o == id)
	}

	/// Index of the primary in the ordering.
	pub fn primary_index(&self) -> usize {
		self.index_of(self.primary).unwrap_or(0)
	}

	/// The selection after `id`, without wrapping.
	pub fn next(&self, id: SelectionId) -> Option<SelectionId> {
		self.index_of(id).and_then(|i| self.order.get(i + 1).copied())
	}

	/// The selection before `id`, without wrapping.
	pub fn prev(&self, id: SelectionId) -> Option<SelectionId> {
		self.index_of(id).and_then(|i| i.checked_sub(1)).map(|i| self.order[i])
	}

	/// Adds `sel` unless an existing selection has its cursor at the same
	/// position. The primary is unchanged.
	pub fn insert(&mut self, sel: Selection) -> Option<SelectionId> {
		if self.slab.iter().any(|(_, s)| s.cursor == sel.cursor) {
			return None;
		}
		let id = SelectionId(self.slab.insert(sel));
		self.order.push(id);
		self.sort();
		Some(id)
	}

	/// Removes a selection. The last remaining selection is never removed.
	///
	/// Disposing the primary hands the role to the next selection, or the
	/// previous one if it was last.
	pub fn dispose(&mut self, id: SelectionId) -> bool {
		if self.order.len() <= 1 {
			return false;
		}
		let Some(idx) = self.index_of(id) else {
			return false;
		};
		if id == self.primary {
			let heir = if idx + 1 < self.order.len() { idx + 1 } else { idx - 1 };
			self.primary = self.order[heir];
		}
		self.order.remove(idx);
		self.slab.remove(id.0);
		true
	}

	/// Removes every selection except the primary.
	pub fn clear(&mut self) {
		let primary = self.primary;
		self.slab.retain(|key, _| key == primary.0);
		self.order = vec![primary];
	}

	/// Restores position order after selections were moved.
	pub fn sort(&mut self) {
		let slab = &self.slab;
		self.order.sort_by_key(|id| {
			let s = &slab[id.0];
			(s.start(), s.cursor)
		});
	}

	/// Sorts and merges selections that overlap or share a cursor.
	///
	/// A merged selection keeps the handle of the primary if either was.
	pub fn normalize(&mut self, text: &dyn TextEngine) {
		self.sort();
		let mut i = 1;
		while i < self.order.len() {
			let (a_id, b_id) = (self.order[i - 1], self.order[i]);
			let (a, b) = (self.slab[a_id.0], self.slab[b_id.0]);
			let (ra, rb) = (a.range(text), b.range(text));
			if a.cursor != b.cursor && ra.end <= rb.start {
				i += 1;
				continue;
			}
			let (keep, drop) = if b_id == self.primary { (b_id, a_id) } else { (a_id, b_id) };
			if a.anchored || b.anchored {
				let forward = self.slab[keep.0].is_forward();
				self.slab[keep.0] = Selection::from_range(text, ra.hull(&rb), forward);
			}
			if let Some(pos) = self.index_of(drop) {
				self.order.remove(pos);
			}
			self.slab.remove(drop.0);
			self.sort();
		}
	}

	/// Ranges of all selections in position order.
	pub fn ranges(&self, text: &dyn TextEngine) -> Vec<Filerange> {
		self.iter().map(|(_, s)| s.range(text)).collect()
	}

	/// Replaces all selections with ones covering `ranges`.
	///
	/// Unanchored selections are reduced to their cursors. The first range
	/// becomes the primary. Returns false, leaving the set untouched, if
	/// `ranges` is empty.
	pub fn set_ranges(&mut self, text: &dyn TextEngine, ranges: &[Filerange], anchored: bool) -> bool {
		if ranges.is_empty() {
			return false;
		}
		self.slab.clear();
		self.order.clear();
		for &r in ranges {
			let mut sel = Selection::from_range(text, r, true);
			if !anchored {
				sel.collapse();
			}
			self.order.push(SelectionId(self.slab.insert(sel)));
		}
		self.primary = self.order[0];
		self.normalize(text);
		true
	}

	/// Sets the anchored flag of every selection.
	pub fn anchor_all(&mut self, anchored: bool) {
		for (_, sel) in self.slab.iter_mut() {
			sel.set_anchored(anchored);
		}
	}

	/// Shifts every selection after an insertion.
	pub fn adjust_insert(&mut self, pos: usize, len: usize) {
		for (_, sel) in self.slab.iter_mut() {
			sel.adjust_insert(pos, len);
		}
	}

	/// Shifts every selection after a deletion.
	pub fn adjust_delete(&mut self, range: Filerange) {
		for (_, sel) in self.slab.iter_mut() {
			sel.adjust_delete(range);
		}
	}

	/// Pairs each selection with its ordinal among the selections whose
	/// cursors share its line.
	pub fn columns(&self, text: &dyn TextEngine) -> Vec<(SelectionId, usize)> {
		let mut out = Vec::with_capacity(self.order.len());
		let mut line = 0;
		let mut col = 0;
		for (id, sel) in self.iter() {
			let l = text.lineno(sel.cursor);
			col = if l == line { col + 1 } else { 0 };
			line = l;
			out.push((id, col));
		}
		out
	}

	/// Largest number of selections on one line.
	pub fn column_count(&self, text: &dyn TextEngine) -> usize {
		self.columns(text).iter().map(|&(_, c)| c + 1).max().unwrap_or(1)
	}

	/// Selections that are the `col`-th (zero-based) on their line.
	pub fn column(&self, text: &dyn TextEngine, col: usize) -> Vec<SelectionId> {
		self.columns(text).into_iter().filter(|&(_, c)| c == col).map(|(id, _)| id).collect()
	}
}
