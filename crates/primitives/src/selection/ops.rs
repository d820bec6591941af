//! Multi-selection commands: creating, aligning, matching, rotating and
//! pruning selections.

use smallvec::SmallVec;
use tracing::debug;

use super::{Selection, SelectionId, SelectionSet};
use crate::movement::{Motion, TextObject, display_column, find_word_next, find_word_prev, line_start, pos_at_display_column};
use crate::range::Filerange;
use crate::text::{TextEngine, TextError};

/// Where [`new_on_line`] places a new cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewSelection {
	/// On the line above the primary.
	Above,
	/// On the line below the primary.
	Below,
	/// On the line above the first selection.
	AboveFirst,
	/// On the line below the last selection.
	BelowLast,
}

/// Adds `count` cursors on adjacent lines, each becoming the primary.
///
/// When the target position is already occupied the primary moves to the
/// neighbouring selection instead.
pub fn new_on_line(sels: &mut SelectionSet, text: &dyn TextEngine, dir: NewSelection, count: usize) {
	let anchored = sels.primary().is_anchored();
	for _ in 0..count.max(1) {
		let from = match dir {
			NewSelection::Above | NewSelection::Below => sels.primary_id(),
			NewSelection::AboveFirst => sels.first(),
			NewSelection::BelowLast => sels.last(),
		};
		let Some(pos) = sels.get(from).map(Selection::cursor) else {
			return;
		};
		let motion = match dir {
			NewSelection::Above | NewSelection::AboveFirst => Motion::LineUp,
			NewSelection::Below | NewSelection::BelowLast => Motion::LineDown,
		};
		let target = motion.apply(text, pos, 1).unwrap_or(pos);
		let created = sels.insert(Selection::new(target)).or_else(|| match dir {
			NewSelection::Above => sels.prev(from),
			NewSelection::Below => sels.next(from),
			_ => None,
		});
		if let Some(id) = created {
			sels.set_primary(id);
			if let Some(sel) = sels.get_mut(id) {
				sel.set_anchored(anchored);
			}
		}
	}
}

/// Moves every cursor to the leftmost display column among them.
pub fn align(sels: &mut SelectionSet, text: &dyn TextEngine, tabwidth: usize) {
	let Some(mincol) = sels.iter().map(|(_, s)| display_column(text, s.cursor(), tabwidth)).min() else {
		return;
	};
	for id in sels.ids() {
		if let Some(sel) = sels.get_mut(id) {
			let pos = pos_at_display_column(text, sel.cursor(), mincol, tabwidth);
			sel.move_to(pos);
		}
	}
	sels.normalize(text);
}

/// Inserts spaces so that selections of each column line up.
///
/// Left alignment lines up the selection starts, right alignment their
/// ends. Padding goes before each selection. If an insertion fails, the
/// padding added so far is removed again.
pub fn align_indent(sels: &mut SelectionSet, text: &mut dyn TextEngine, left: bool, tabwidth: usize) -> Result<(), TextError> {
	let mut applied = Vec::new();
	let result = pad_columns(sels, text, left, tabwidth, &mut applied);
	if result.is_err() {
		for (start, pad) in applied.into_iter().rev() {
			let range = Filerange::new(start, start + pad);
			if text.delete(range).is_ok() {
				sels.adjust_delete(range);
			}
		}
	}
	result
}

/// Pads each column, recording every insertion in `applied`.
fn pad_columns(sels: &mut SelectionSet, text: &mut dyn TextEngine, left: bool, tabwidth: usize, applied: &mut Vec<(usize, usize)>) -> Result<(), TextError> {
	let edge = |sels: &SelectionSet, text: &dyn TextEngine, id: SelectionId| {
		let r = sels.get(id).map(|s| s.range(text)).unwrap_or_default();
		let pos = if left { r.start } else { r.end };
		(r.start, display_column(text, pos, tabwidth))
	};
	for col in 0..sels.column_count(&*text) {
		let ids = sels.column(&*text, col);
		let Some(maxcol) = ids.iter().map(|&id| edge(sels, &*text, id).1).max() else {
			continue;
		};
		for id in ids {
			let (start, cur) = edge(sels, &*text, id);
			if cur >= maxcol {
				continue;
			}
			let pad = maxcol - cur;
			text.insert(start, " ".repeat(pad).as_bytes())?;
			sels.adjust_insert(start, pad);
			applied.push((start, pad));
		}
	}
	Ok(())
}

fn select_match(sels: &mut SelectionSet, text: &dyn TextEngine, range: Filerange, primary: bool) -> bool {
	let mut sel = Selection::from_range(text, range, true);
	sel.set_anchored(true);
	match sels.insert(sel) {
		Some(id) => {
			if primary {
				sels.set_primary(id);
			}
			true
		}
		None => false,
	}
}

/// Selects the next occurrence of the primary selection's text.
///
/// Searches forward from the primary, then backward if nothing new was
/// found. `word_mode` is recomputed whenever there is a single selection:
/// it becomes true if the selection is exactly the word under the cursor,
/// in which case only whole-word occurrences match. With `all` set every
/// occurrence is selected and the primary stays put.
///
/// Returns true if at least one selection was added.
pub fn match_next(sels: &mut SelectionSet, text: &dyn TextEngine, word_mode: &mut bool, all: bool) -> bool {
	let primary = *sels.primary();
	let range = primary.range(text);
	if range.is_empty() {
		return false;
	}
	if sels.len() == 1 {
		*word_mode = TextObject::WordInner.range(text, primary.cursor()) == Some(range);
	}
	let needle = text.bytes(range);
	let find_next = |from: usize| {
		if *word_mode {
			find_word_next(text, from, &needle)
		} else {
			text.find_next(from, &needle).map(|p| Filerange::new(p, p + needle.len()))
		}
	};
	let find_prev = |before: usize| {
		if *word_mode {
			find_word_prev(text, before, &needle)
		} else {
			text.find_prev(before, &needle).map(|p| Filerange::new(p, p + needle.len()))
		}
	};

	let mut added = false;
	let mut cur = range;
	while let Some(found) = find_next(cur.end) {
		cur = found;
		if select_match(sels, text, found, !all) {
			added = true;
			if !all {
				return true;
			}
		}
	}
	cur = range;
	while let Some(found) = find_prev(cur.start) {
		cur = found;
		if select_match(sels, text, found, !all) {
			added = true;
			if !all {
				break;
			}
		}
	}
	debug!(word_mode = *word_mode, all, added, "match next");
	added
}

/// Like [`match_next`], but drops the old primary if a match was selected.
pub fn match_skip(sels: &mut SelectionSet, text: &dyn TextEngine, word_mode: &mut bool) -> bool {
	let old = sels.primary_id();
	let added = match_next(sels, text, word_mode, false);
	if sels.primary_id() != old {
		sels.dispose(old);
	}
	added
}

/// Replaces the contents of one selection, keeping the others in place.
fn replace_contents(sels: &mut SelectionSet, text: &mut dyn TextEngine, id: SelectionId, data: &[u8]) -> Result<(), TextError> {
	let Some(&sel) = sels.get(id) else {
		return Ok(());
	};
	let range = sel.range(text);
	if !range.is_empty() {
		text.delete(range)?;
		sels.adjust_delete(range);
	}
	text.insert(range.start, data)?;
	sels.adjust_insert(range.start, data.len());
	let mut new = Selection::from_range(text, Filerange::new(range.start, range.start + data.len()), sel.is_forward());
	new.set_anchored(sel.is_anchored());
	if let Some(slot) = sels.get_mut(id) {
		*slot = new;
	}
	Ok(())
}

/// Rotates selection contents `count` places to the right, or left.
///
/// With more than one selection on a line each line rotates on its own,
/// otherwise all selections form one ring.
pub fn rotate(sels: &mut SelectionSet, text: &mut dyn TextEngine, count: usize, right: bool) -> Result<(), TextError> {
	let per_line = sels.column_count(text) > 1;
	let ids = sels.ids();
	let mut group: SmallVec<[(SelectionId, Vec<u8>); 4]> = SmallVec::new();
	let mut line = 0;

	for (i, &id) in ids.iter().enumerate() {
		let Some(sel) = sels.get(id) else {
			continue;
		};
		let range = sel.range(text);
		if group.is_empty() {
			line = text.lineno(range.start);
		}
		group.push((id, text.bytes(range)));

		let next_line = ids.get(i + 1).and_then(|&n| sels.get(n)).map(|s| text.lineno(s.start()));
		let closes = match next_line {
			None => true,
			Some(l) => per_line && l != line,
		};
		if !closes {
			continue;
		}
		let len = group.len();
		let off = if right { count % len } else { len - count % len };
		for j in 0..len {
			let k = (j + off) % len;
			if j == k {
				continue;
			}
			let target = group[k].0;
			replace_contents(sels, text, target, &group[j].1)?;
		}
		group.clear();
	}
	sels.normalize(text);
	Ok(())
}

/// Shrinks selections to exclude surrounding whitespace.
///
/// Selections holding only whitespace are removed. Returns false if that
/// would have removed the last one.
pub fn trim(sels: &mut SelectionSet, text: &dyn TextEngine) -> bool {
	let is_space = |pos: usize| text.byte_at(pos).is_some_and(|b| b.is_ascii_whitespace());
	let mut ok = true;
	for id in sels.ids() {
		let Some(&sel) = sels.get(id) else {
			continue;
		};
		let mut r = sel.range(text);
		while r.start < r.end && is_space(r.end - 1) {
			r.end -= 1;
		}
		while r.start < r.end && is_space(r.start) {
			r.start += 1;
		}
		if r.is_empty() {
			if !sels.dispose(id) {
				ok = false;
			}
			continue;
		}
		let mut new = Selection::from_range(text, r, sel.is_forward());
		new.set_anchored(sel.is_anchored());
		if let Some(slot) = sels.get_mut(id) {
			*slot = new;
		}
	}
	sels.normalize(text);
	ok
}

/// Removes the `column`-th (one-based) selection of every line.
///
/// Columns past the last are clamped. Returns false, changing nothing,
/// when only one selection exists.
pub fn remove_column(sels: &mut SelectionSet, text: &dyn TextEngine, column: usize) -> bool {
	if sels.len() == 1 {
		return false;
	}
	let col = column.clamp(1, sels.column_count(text)) - 1;
	for id in sels.column(text, col) {
		sels.dispose(id);
	}
	true
}

/// Keeps only the `column`-th (one-based) selection of every line.
pub fn remove_column_except(sels: &mut SelectionSet, text: &dyn TextEngine, column: usize) {
	if sels.len() == 1 {
		return;
	}
	let col = column.clamp(1, sels.column_count(text)) - 1;
	let keep = sels.column(text, col);
	for id in sels.ids() {
		if !keep.contains(&id) {
			sels.dispose(id);
		}
	}
}

/// Moves the primary role `count` selections forward or backward, wrapping.
pub fn navigate(sels: &mut SelectionSet, count: usize, forward: bool) {
	let len = sels.len();
	if len == 1 {
		return;
	}
	let idx = sels.primary_index();
	let step = count.max(1) % len;
	let target = if forward { (idx + step) % len } else { (idx + len - step) % len };
	let id = sels.ids()[target];
	sels.set_primary(id);
}

/// Swaps anchor and cursor of every selection.
pub fn flip(sels: &mut SelectionSet) {
	for id in sels.ids() {
		if let Some(sel) = sels.get_mut(id) {
			sel.flip();
		}
	}
}

/// Replaces the selections with one cursor per covered line, at the first
/// non-blank character or at the end of the line.
pub fn new_lines_edge(sels: &mut SelectionSet, text: &dyn TextEngine, end: bool) {
	let mut cursors = Vec::new();
	for r in sels.ranges(text) {
		let last = if r.is_empty() { r.start } else { text.char_prev(r.end) };
		let mut line = text.line_begin(r.start);
		loop {
			let pos = if end { text.line_end(line) } else { line_start(text, line) };
			cursors.push(Filerange::empty_at(pos));
			let next = text.line_next(line);
			if next > last || next == line {
				break;
			}
			line = next;
		}
	}
	sels.set_ranges(text, &cursors, false);
}
