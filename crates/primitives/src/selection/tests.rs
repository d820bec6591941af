use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::ops::{self, NewSelection};
use super::*;
use crate::text::{RopeText, TextEngine, TextError};

fn fr(start: usize, end: usize) -> Filerange {
	Filerange::new(start, end)
}

fn set_of(text: &RopeText, ranges: &[Filerange]) -> SelectionSet {
	let mut sels = SelectionSet::new(Selection::new(0));
	assert!(sels.set_ranges(text, ranges, true));
	sels
}

#[test]
fn unanchored_selection_covers_cursor_cell() {
	let text = RopeText::new("aä\n");
	let mut sel = Selection::new(1);
	assert_eq!(sel.range(&text), fr(1, 3));
	sel.move_to(3);
	assert_eq!(sel.anchor(), 3);
	assert_eq!(sel.range(&text), fr(3, 4));
	sel.move_to(4);
	assert!(sel.range(&text).is_empty());
}

#[test]
fn anchored_selection_is_inclusive() {
	let text = RopeText::new("hello world");
	let mut sel = Selection::spanning(6, 2);
	assert!(!sel.is_forward());
	assert_eq!(sel.start(), 2);
	assert_eq!(sel.range(&text), fr(2, 7));
	sel.flip();
	assert!(sel.is_forward());
	assert_eq!(Selection::from_range(&text, fr(2, 7), false), Selection::spanning(6, 2));
	sel.collapse();
	assert!(!sel.is_anchored());
	assert_eq!(sel.range(&text), fr(6, 7));
}

#[test]
fn selection_adjusts_to_edits() {
	let mut sel = Selection::spanning(4, 8);
	sel.adjust_insert(4, 2);
	assert_eq!((sel.anchor(), sel.cursor()), (6, 10));
	sel.adjust_insert(11, 5);
	assert_eq!((sel.anchor(), sel.cursor()), (6, 10));
	sel.adjust_delete(fr(0, 2));
	assert_eq!((sel.anchor(), sel.cursor()), (4, 8));
	sel.adjust_delete(fr(6, 12));
	assert_eq!((sel.anchor(), sel.cursor()), (4, 6));
}

#[test]
fn insert_rejects_occupied_cursor() {
	let mut sels = SelectionSet::new(Selection::new(5));
	assert_eq!(sels.insert(Selection::new(5)), None);
	let b = sels.insert(Selection::new(2)).unwrap();
	assert_eq!(sels.len(), 2);
	assert_eq!(sels.first(), b);
	assert_eq!(sels.primary().cursor(), 5);
	assert_eq!(sels.insert(Selection::spanning(0, 2)), None);
}

#[test]
fn dispose_moves_primary_and_keeps_last() {
	let mut sels = SelectionSet::new(Selection::new(0));
	let b = sels.insert(Selection::new(4)).unwrap();
	let c = sels.insert(Selection::new(8)).unwrap();
	sels.set_primary(b);
	assert!(sels.dispose(b));
	assert_eq!(sels.primary_id(), c);
	assert!(sels.dispose(c));
	assert_eq!(sels.primary().cursor(), 0);
	assert!(!sels.dispose(sels.primary_id()));
	assert_eq!(sels.len(), 1);
}

#[test]
fn navigation_helpers() {
	let mut sels = SelectionSet::new(Selection::new(4));
	let a = sels.insert(Selection::new(0)).unwrap();
	let c = sels.insert(Selection::new(8)).unwrap();
	let b = sels.primary_id();
	assert_eq!(sels.ids(), vec![a, b, c]);
	assert_eq!(sels.next(b), Some(c));
	assert_eq!(sels.next(c), None);
	assert_eq!(sels.prev(a), None);
	assert_eq!(sels.primary_index(), 1);
	sels.clear();
	assert_eq!(sels.ids(), vec![b]);
}

#[test]
fn normalize_merges_overlaps_and_keeps_primary() {
	let text = RopeText::new("0123456789");
	let mut sels = SelectionSet::new(Selection::spanning(2, 5));
	let other = sels.insert(Selection::spanning(4, 7)).unwrap();
	sels.insert(Selection::new(9)).unwrap();
	sels.set_primary(other);
	sels.normalize(&text);
	assert_eq!(sels.ranges(&text), vec![fr(2, 8), fr(9, 10)]);
	assert_eq!(sels.primary_id(), other);
}

#[test]
fn normalize_merges_equal_cursors() {
	let text = RopeText::new("abc");
	let mut sels = SelectionSet::new(Selection::new(0));
	let b = sels.insert(Selection::new(2)).unwrap();
	sels.get_mut(b).unwrap().move_to(0);
	sels.normalize(&text);
	assert_eq!(sels.len(), 1);
	assert_eq!(sels.ranges(&text), vec![fr(0, 1)]);
}

#[test]
fn set_ranges_by_anchoring() {
	let text = RopeText::new("one two three");
	let mut sels = SelectionSet::new(Selection::new(0));
	assert!(!sels.set_ranges(&text, &[], true));
	assert!(sels.set_ranges(&text, &[fr(8, 13), fr(0, 3)], true));
	assert_eq!(sels.ranges(&text), vec![fr(0, 3), fr(8, 13)]);
	assert_eq!(sels.primary().cursor(), 12);
	assert!(sels.set_ranges(&text, &[fr(0, 3), fr(4, 7)], false));
	assert_eq!(sels.ranges(&text), vec![fr(2, 3), fr(6, 7)]);
}

#[test]
fn columns_count_per_line() {
	let text = RopeText::new("ab cd\nef\ngh ij kl");
	let mut sels = SelectionSet::new(Selection::new(0));
	for pos in [3, 6, 9, 12, 15] {
		sels.insert(Selection::new(pos)).unwrap();
	}
	assert_eq!(sels.column_count(&text), 3);
	let cols: Vec<usize> = sels.columns(&text).into_iter().map(|(_, c)| c).collect();
	assert_eq!(cols, vec![0, 1, 0, 0, 1, 2]);
	let second: Vec<usize> = sels.column(&text, 1).into_iter().map(|id| sels.get(id).unwrap().cursor()).collect();
	assert_eq!(second, vec![3, 12]);
}

#[test]
fn new_selection_below_and_above() {
	let text = RopeText::new("abc\ndef\nghi");
	let mut sels = SelectionSet::new(Selection::new(1));
	ops::new_on_line(&mut sels, &text, NewSelection::Below, 2);
	let cursors: Vec<usize> = sels.iter().map(|(_, s)| s.cursor()).collect();
	assert_eq!(cursors, vec![1, 5, 9]);
	assert_eq!(sels.primary().cursor(), 9);

	ops::new_on_line(&mut sels, &text, NewSelection::Above, 1);
	assert_eq!(sels.len(), 3);
	assert_eq!(sels.primary().cursor(), 5);

	ops::new_on_line(&mut sels, &text, NewSelection::BelowLast, 1);
	assert_eq!(sels.len(), 3);
}

#[test]
fn align_moves_to_leftmost_column() {
	let text = RopeText::new("abcdef\nabcdef\nab");
	let mut sels = SelectionSet::new(Selection::new(4));
	sels.insert(Selection::new(9)).unwrap();
	sels.insert(Selection::new(15)).unwrap();
	ops::align(&mut sels, &text, 8);
	let cursors: Vec<usize> = sels.iter().map(|(_, s)| s.cursor()).collect();
	assert_eq!(cursors, vec![1, 8, 15]);
}

#[test]
fn align_indent_pads_before_selections() {
	let mut text = RopeText::new("a=1\nlong=2\n");
	let mut sels = SelectionSet::new(Selection::new(1));
	sels.insert(Selection::new(8)).unwrap();
	ops::align_indent(&mut sels, &mut text, true, 8).unwrap();
	assert_eq!(text.contents(), "a   =1\nlong=2\n");
	let cursors: Vec<usize> = sels.iter().map(|(_, s)| s.cursor()).collect();
	assert_eq!(cursors, vec![4, 11]);
}

/// Text that refuses insertions once `inserts` is used up.
struct Refusing {
	text: RopeText,
	inserts: usize,
}

impl TextEngine for Refusing {
	fn size(&self) -> usize {
		self.text.size()
	}

	fn byte_at(&self, pos: usize) -> Option<u8> {
		self.text.byte_at(pos)
	}

	fn bytes(&self, range: Filerange) -> Vec<u8> {
		self.text.bytes(range)
	}

	fn insert(&mut self, pos: usize, data: &[u8]) -> Result<(), TextError> {
		if self.inserts == 0 {
			return Err(TextError::OutOfBounds { pos, size: self.size() });
		}
		self.inserts -= 1;
		self.text.insert(pos, data)
	}

	fn delete(&mut self, range: Filerange) -> Result<(), TextError> {
		self.text.delete(range)
	}

	fn snapshot(&mut self) {
		self.text.snapshot();
	}

	fn undo(&mut self) -> Option<usize> {
		self.text.undo()
	}

	fn redo(&mut self) -> Option<usize> {
		self.text.redo()
	}
}

#[test]
fn align_indent_failure_leaves_text_unchanged() {
	let mut text = Refusing {
		text: RopeText::new("a=1\nbb=2\nlong=3\n"),
		inserts: 1,
	};
	let mut sels = SelectionSet::new(Selection::new(1));
	sels.insert(Selection::new(6)).unwrap();
	sels.insert(Selection::new(13)).unwrap();

	assert!(ops::align_indent(&mut sels, &mut text, true, 8).is_err());
	assert_eq!(text.text.contents(), "a=1\nbb=2\nlong=3\n");
	let cursors: Vec<usize> = sels.iter().map(|(_, s)| s.cursor()).collect();
	assert_eq!(cursors, vec![1, 6, 13]);
}

#[test]
fn match_next_selects_whole_words() {
	let text = RopeText::new("foo foobar foo");
	let mut sels = set_of(&text, &[fr(0, 3)]);
	let mut word = false;
	assert!(ops::match_next(&mut sels, &text, &mut word, false));
	assert!(word);
	assert_eq!(sels.ranges(&text), vec![fr(0, 3), fr(11, 14)]);
	assert_eq!(sels.primary().range(&text), fr(11, 14));
	assert!(!ops::match_next(&mut sels, &text, &mut word, false));
}

#[test]
fn match_next_literal_and_wraps_backward() {
	let text = RopeText::new("xoo foo oo");
	let mut sels = set_of(&text, &[fr(5, 7)]);
	let mut word = false;
	assert!(ops::match_next(&mut sels, &text, &mut word, false));
	assert!(!word);
	assert_eq!(sels.primary().range(&text), fr(8, 10));
	assert!(ops::match_next(&mut sels, &text, &mut word, false));
	assert_eq!(sels.primary().range(&text), fr(1, 3));
}

#[test]
fn match_all_and_skip() {
	let text = RopeText::new("ab ab ab");
	let mut sels = set_of(&text, &[fr(3, 5)]);
	let mut word = false;
	assert!(ops::match_next(&mut sels, &text, &mut word, true));
	assert_eq!(sels.ranges(&text), vec![fr(0, 2), fr(3, 5), fr(6, 8)]);
	assert_eq!(sels.primary().range(&text), fr(3, 5));

	let mut sels = set_of(&text, &[fr(0, 2)]);
	assert!(ops::match_skip(&mut sels, &text, &mut word));
	assert_eq!(sels.ranges(&text), vec![fr(3, 5)]);
}

#[test]
fn rotate_swaps_contents() {
	let mut text = RopeText::new("ab cd");
	let mut sels = set_of(&text, &[fr(0, 2), fr(3, 5)]);
	ops::rotate(&mut sels, &mut text, 1, true).unwrap();
	assert_eq!(text.contents(), "cd ab");
	assert_eq!(sels.ranges(&text), vec![fr(0, 2), fr(3, 5)]);
}

#[test]
fn rotate_unequal_lengths_left() {
	let mut text = RopeText::new("a\nbb\nccc\n");
	let mut sels = set_of(&text, &[fr(0, 1), fr(2, 4), fr(5, 8)]);
	ops::rotate(&mut sels, &mut text, 1, false).unwrap();
	assert_eq!(text.contents(), "bb\nccc\na\n");
	assert_eq!(sels.ranges(&text), vec![fr(0, 2), fr(3, 6), fr(7, 8)]);
}

#[test]
fn rotate_per_line_with_columns() {
	let mut text = RopeText::new("a b\nc d\n");
	let mut sels = set_of(&text, &[fr(0, 1), fr(2, 3), fr(4, 5), fr(6, 7)]);
	ops::rotate(&mut sels, &mut text, 1, true).unwrap();
	assert_eq!(text.contents(), "b a\nd c\n");
}

#[test]
fn trim_drops_whitespace() {
	let text = RopeText::new("  ab  \n   ");
	let mut sels = set_of(&text, &[fr(0, 6), fr(7, 10)]);
	assert!(ops::trim(&mut sels, &text));
	assert_eq!(sels.ranges(&text), vec![fr(2, 4)]);

	let mut sels = set_of(&text, &[fr(7, 10)]);
	assert!(!ops::trim(&mut sels, &text));
	assert_eq!(sels.len(), 1);
}

#[test]
fn remove_columns() {
	let text = RopeText::new("a b c\nd e");
	let cursors = [0, 2, 4, 6, 8];
	let build = || {
		let mut sels = SelectionSet::new(Selection::new(0));
		for &pos in &cursors[1..] {
			sels.insert(Selection::new(pos)).unwrap();
		}
		sels
	};
	let positions = |sels: &SelectionSet| sels.iter().map(|(_, s)| s.cursor()).collect::<Vec<_>>();

	let mut sels = build();
	assert!(ops::remove_column(&mut sels, &text, 2));
	assert_eq!(positions(&sels), vec![0, 4, 6]);

	let mut sels = build();
	ops::remove_column(&mut sels, &text, 99);
	assert_eq!(positions(&sels), vec![0, 2, 6, 8]);

	let mut sels = build();
	ops::remove_column_except(&mut sels, &text, 1);
	assert_eq!(positions(&sels), vec![0, 6]);

	let mut single = SelectionSet::new(Selection::new(0));
	assert!(!ops::remove_column(&mut single, &text, 1));
}

#[test]
fn navigate_wraps() {
	let mut sels = SelectionSet::new(Selection::new(0));
	sels.insert(Selection::new(2)).unwrap();
	sels.insert(Selection::new(4)).unwrap();
	ops::navigate(&mut sels, 1, false);
	assert_eq!(sels.primary().cursor(), 4);
	ops::navigate(&mut sels, 2, true);
	assert_eq!(sels.primary().cursor(), 2);
}

#[test]
fn new_lines_edge_places_cursor_per_line() {
	let text = RopeText::new("  ab\ncd\n ef\n");
	let mut sels = set_of(&text, &[fr(1, 10)]);
	ops::new_lines_edge(&mut sels, &text, false);
	let cursors: Vec<usize> = sels.iter().map(|(_, s)| s.cursor()).collect();
	assert_eq!(cursors, vec![2, 5, 9]);
	assert!(!sels.primary().is_anchored());

	let mut sels = set_of(&text, &[fr(1, 10)]);
	ops::new_lines_edge(&mut sels, &text, true);
	let cursors: Vec<usize> = sels.iter().map(|(_, s)| s.cursor()).collect();
	assert_eq!(cursors, vec![4, 7, 11]);
}

proptest! {
	#[test]
	fn normalize_yields_disjoint_sorted(spans in prop::collection::vec((0usize..40, 0usize..6, any::<bool>()), 1..8)) {
		let text = RopeText::new(&"x".repeat(48));
		let mut sels = SelectionSet::new(Selection::new(spans[0].0));
		for &(pos, len, anchored) in &spans[1..] {
			let sel = if anchored { Selection::spanning(pos, pos + len) } else { Selection::new(pos) };
			let _ = sels.insert(sel);
		}
		sels.normalize(&text);
		let ranges = sels.ranges(&text);
		for pair in ranges.windows(2) {
			prop_assert!(pair[0].end <= pair[1].start);
		}
		prop_assert!(sels.len() >= 1);
		prop_assert!(sels.get(sels.primary_id()).is_some());
	}
}
