use proptest::prelude::*;

use super::*;
use crate::text::RopeText;

fn at(text: &str, motion: Motion, pos: usize, count: usize) -> Option<usize> {
	motion.apply(&RopeText::new(text), pos, count)
}

#[test]
fn char_motions_stay_on_line() {
	let text = "ab\ncd";
	assert_eq!(at(text, Motion::LineCharNext, 0, 1), Some(1));
	assert_eq!(at(text, Motion::LineCharNext, 1, 5), Some(2));
	assert_eq!(at(text, Motion::LineCharPrev, 3, 1), Some(3));
	assert_eq!(at(text, Motion::LineCharPrev, 4, 9), Some(3));
}

#[test]
fn char_motions_cross_lines() {
	let text = "ab\ncd";
	assert_eq!(at(text, Motion::CharNext, 1, 2), Some(3));
	assert_eq!(at(text, Motion::CharPrev, 3, 1), Some(2));
	assert_eq!(at(text, Motion::CharNext, 4, 3), Some(5));
	assert_eq!(at(text, Motion::CharPrev, 1, 4), Some(0));
}

#[test]
fn line_positions() {
	let text = "  foo bar  \nx";
	assert_eq!(at(text, Motion::LineBegin, 5, 1), Some(0));
	assert_eq!(at(text, Motion::LineStart, 9, 1), Some(2));
	assert_eq!(at(text, Motion::LineFinish, 0, 1), Some(8));
	assert_eq!(at(text, Motion::LineEnd, 0, 1), Some(11));
}

#[test]
fn vertical_motion_keeps_column() {
	let text = "hello\nab\nworld";
	assert_eq!(at(text, Motion::LineDown, 4, 1), Some(8));
	assert_eq!(at(text, Motion::LineDown, 4, 2), Some(13));
	assert_eq!(at(text, Motion::LineUp, 13, 2), Some(4));
	assert_eq!(at(text, Motion::LineUp, 2, 1), None);
	assert_eq!(at(text, Motion::LineDown, 10, 1), None);
}

#[test]
fn word_start_next() {
	let text = "foo.bar baz\n\nqux";
	assert_eq!(at(text, Motion::WordStartNext, 0, 1), Some(3));
	assert_eq!(at(text, Motion::WordStartNext, 3, 1), Some(4));
	assert_eq!(at(text, Motion::WordStartNext, 4, 1), Some(8));
	assert_eq!(at(text, Motion::WordStartNext, 8, 1), Some(12));
	assert_eq!(at(text, Motion::WordStartNext, 12, 1), Some(13));
	assert_eq!(at(text, Motion::BigwordStartNext, 0, 1), Some(8));
	assert_eq!(at(text, Motion::WordStartNext, 0, 3), Some(8));
}

#[test]
fn word_start_next_at_end() {
	assert_eq!(at("one two", Motion::WordStartNext, 4, 1), Some(7));
	assert_eq!(at("one two", Motion::WordStartNext, 7, 1), Some(7));
}

#[test]
fn word_end_motions() {
	let text = "foo.bar baz";
	assert_eq!(at(text, Motion::WordEndNext, 0, 1), Some(2));
	assert_eq!(at(text, Motion::WordEndNext, 2, 1), Some(3));
	assert_eq!(at(text, Motion::BigwordEndNext, 0, 1), Some(6));
	assert_eq!(at(text, Motion::WordEndNext, 10, 1), Some(10));
	assert_eq!(at(text, Motion::WordEndPrev, 9, 1), Some(6));
	assert_eq!(at(text, Motion::BigwordEndPrev, 9, 1), Some(6));
	assert_eq!(at(text, Motion::WordEndPrev, 5, 1), Some(3));
}

#[test]
fn word_start_prev() {
	let text = "foo.bar  baz";
	assert_eq!(at(text, Motion::WordStartPrev, 11, 1), Some(9));
	assert_eq!(at(text, Motion::WordStartPrev, 9, 1), Some(4));
	assert_eq!(at(text, Motion::WordStartPrev, 4, 1), Some(3));
	assert_eq!(at(text, Motion::BigwordStartPrev, 9, 1), Some(0));
	assert_eq!(at(text, Motion::WordStartPrev, 0, 1), Some(0));
}

#[test]
fn find_within_line() {
	let text = "a-b-c-d\n-";
	let f = |till, forward| Motion::Find { target: '-', till, forward };
	assert_eq!(at(text, f(false, true), 0, 1), Some(1));
	assert_eq!(at(text, f(false, true), 0, 3), Some(5));
	assert_eq!(at(text, f(false, true), 0, 4), None);
	assert_eq!(at(text, f(true, true), 0, 1), Some(2));
	assert_eq!(at(text, f(true, true), 0, 2), Some(4));
	assert_eq!(at(text, f(true, true), 2, 1), Some(4));
	assert_eq!(at(text, f(false, false), 6, 1), Some(5));
	assert_eq!(at(text, f(true, false), 6, 1), Some(4));
	assert_eq!(at(text, f(true, false), 6, 2), Some(2));
	assert_eq!(f(true, true).reversed(), f(true, false));
}

#[test]
fn file_and_line_motions() {
	let text = "  one\ntwo\n  three\n";
	assert_eq!(at(text, Motion::FileBegin, 12, 1), Some(2));
	assert_eq!(at(text, Motion::FileEnd, 0, 1), Some(12));
	assert_eq!(at(text, Motion::Line(2), 0, 1), Some(6));
	assert_eq!(at(text, Motion::Line(99), 0, 1), Some(12));
}

#[test]
fn motion_kinds() {
	assert_eq!(Motion::WordStartNext.kind(), MotionKind::Exclusive);
	assert_eq!(Motion::WordEndNext.kind(), MotionKind::Inclusive);
	assert_eq!(Motion::LineDown.kind(), MotionKind::Linewise);
	assert_eq!(Motion::LineEnd.kind(), MotionKind::Exclusive);
	let find = |forward| Motion::Find {
		target: 'x',
		till: false,
		forward,
	};
	assert_eq!(find(true).kind(), MotionKind::Inclusive);
	assert_eq!(find(false).kind(), MotionKind::Exclusive);
}

#[test]
fn word_objects() {
	let text = RopeText::new("foo  bar.baz\nqux");
	let r = |obj: TextObject, pos| obj.range(&text, pos);
	assert_eq!(r(TextObject::WordInner, 1), Some(Filerange::new(0, 3)));
	assert_eq!(r(TextObject::WordOuter, 1), Some(Filerange::new(0, 5)));
	assert_eq!(r(TextObject::WordInner, 3), Some(Filerange::new(3, 5)));
	assert_eq!(r(TextObject::WordOuter, 3), Some(Filerange::new(3, 8)));
	assert_eq!(r(TextObject::WordOuter, 10), Some(Filerange::new(9, 12)));
	assert_eq!(r(TextObject::WordInner, 8), Some(Filerange::new(8, 9)));
	assert_eq!(r(TextObject::BigwordInner, 6), Some(Filerange::new(5, 12)));
	assert_eq!(r(TextObject::WordInner, 12), Some(Filerange::new(12, 13)));
	assert_eq!(r(TextObject::WordInner, 16), None);
}

#[test]
fn line_objects() {
	let text = RopeText::new("  foo bar \n\nlast");
	let r = |obj: TextObject, pos| obj.range(&text, pos);
	assert_eq!(r(TextObject::LineInner, 0), Some(Filerange::new(2, 9)));
	assert_eq!(r(TextObject::LineOuter, 4), Some(Filerange::new(0, 11)));
	assert_eq!(r(TextObject::LineInner, 11), Some(Filerange::empty_at(11)));
	assert_eq!(r(TextObject::LineOuter, 14), Some(Filerange::new(12, 16)));
	assert!(TextObject::LineOuter.is_linewise());
	assert!(!TextObject::LineInner.is_linewise());
}

#[test]
fn linewise_extension() {
	let text = RopeText::new("ab\ncd\nef");
	assert_eq!(linewise(&text, Filerange::new(1, 4)), Filerange::new(0, 6));
	assert_eq!(linewise(&text, Filerange::empty_at(7)), Filerange::new(6, 8));
	assert_eq!(linewise(&text, Filerange::new(0, 3)), Filerange::new(0, 3));
}

#[test]
fn whole_word_search() {
	let text = RopeText::new("foo foobar barfoo foo");
	assert_eq!(find_word_next(&text, 1, b"foo"), Some(Filerange::new(18, 21)));
	assert_eq!(find_word_next(&text, 0, b"foo"), Some(Filerange::new(0, 3)));
	assert_eq!(find_word_prev(&text, 18, b"foo"), Some(Filerange::new(0, 3)));
	assert_eq!(find_word_prev(&text, 0, b"foo"), None);
	assert_eq!(find_word_next(&text, 0, b"bar"), None);
}

#[test]
fn columns_expand_tabs_and_wide_chars() {
	let text = RopeText::new("\tx\n日本y");
	assert_eq!(char_column(&text, 1), 1);
	assert_eq!(display_column(&text, 1, 8), 8);
	assert_eq!(display_column(&text, 1, 4), 4);
	assert_eq!(display_column(&text, 9, 8), 4);
	assert_eq!(pos_at_display_column(&text, 3, 2, 8), 6);
	assert_eq!(pos_at_display_column(&text, 3, 40, 8), 10);
	assert_eq!(pos_at_char_column(&text, 3, 2), 9);
	assert_eq!(pos_at_char_column(&text, 0, 9), 2);
}

proptest! {
	#[test]
	fn motions_stay_in_bounds(text in "[a-c .\n\t]{0,40}", pos in 0usize..48, count in 1usize..4) {
		let rope = RopeText::new(&text);
		let size = text.len();
		for motion in [
			Motion::CharPrev,
			Motion::CharNext,
			Motion::LineCharPrev,
			Motion::LineCharNext,
			Motion::LineUp,
			Motion::LineDown,
			Motion::LineStart,
			Motion::LineFinish,
			Motion::WordStartNext,
			Motion::WordStartPrev,
			Motion::WordEndNext,
			Motion::WordEndPrev,
			Motion::BigwordStartNext,
			Motion::BigwordEndPrev,
			Motion::FileEnd,
		] {
			if let Some(p) = motion.apply(&rope, pos.min(size), count) {
				prop_assert!(p <= size, "{motion:?} moved to {p} past {size}");
			}
		}
	}

	#[test]
	fn word_start_next_never_moves_back(text in "[ab .\n]{0,40}", pos in 0usize..40) {
		let rope = RopeText::new(&text);
		let pos = pos.min(text.len());
		let next = Motion::WordStartNext.apply(&rope, pos, 1);
		prop_assert!(next.is_some_and(|p| p >= pos));
	}
}
