//! Motion and text object geometry.
//!
//! Motions map a cursor position to a new position; text objects map a
//! position to a range around it. Both work on byte positions through the
//! [`TextEngine`] trait and never modify the text.

mod column;
mod objects;
mod word;

pub use column::{char_column, display_column, pos_at_char_column, pos_at_display_column};
pub use objects::{TextObject, find_word_next, find_word_prev};
pub use word::{WordKind, is_word_char};

use crate::range::Filerange;
use crate::text::TextEngine;

#[cfg(test)]
mod tests;

/// How an operator treats the span between the old and new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
	/// The character at the target is not included.
	Exclusive,
	/// The character at the target is included.
	Inclusive,
	/// Whole lines from start to target are included.
	Linewise,
}

/// A cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
	/// Previous character, crossing line breaks.
	CharPrev,
	/// Next character, crossing line breaks.
	CharNext,
	/// Previous character on the same line.
	LineCharPrev,
	/// Next character on the same line.
	LineCharNext,
	LineUp,
	LineDown,
	/// First byte of the line.
	LineBegin,
	/// First non-blank character of the line.
	LineStart,
	/// Last non-blank character of the line.
	LineFinish,
	/// The newline ending the line.
	LineEnd,
	WordStartNext,
	WordStartPrev,
	WordEndNext,
	WordEndPrev,
	BigwordStartNext,
	BigwordStartPrev,
	BigwordEndNext,
	BigwordEndPrev,
	/// First non-blank of the first line.
	FileBegin,
	/// First non-blank of the last line.
	FileEnd,
	/// First non-blank of the given one-based line.
	Line(usize),
	/// Occurrence of `target` on the current line (`f`, `t`, `F`, `T`).
	Find { target: char, till: bool, forward: bool },
	/// Stays in place.
	Nop,
}

impl Motion {
	/// Returns how operators treat this motion.
	pub fn kind(self) -> MotionKind {
		match self {
			Motion::LineUp | Motion::LineDown | Motion::FileBegin | Motion::FileEnd | Motion::Line(_) => MotionKind::Linewise,
			Motion::LineFinish | Motion::WordEndNext | Motion::WordEndPrev | Motion::BigwordEndNext | Motion::BigwordEndPrev => {
				MotionKind::Inclusive
			}
			Motion::Find { forward, .. } => {
				if forward {
					MotionKind::Inclusive
				} else {
					MotionKind::Exclusive
				}
			}
			_ => MotionKind::Exclusive,
		}
	}

	/// Returns true if a count is part of the motion rather than a repeat.
	pub fn takes_count_as_argument(self) -> bool {
		matches!(self, Motion::FileBegin | Motion::FileEnd | Motion::Line(_))
	}

	/// Returns the same motion in the opposite direction, for `,`.
	pub fn reversed(self) -> Self {
		match self {
			Motion::Find { target, till, forward } => Motion::Find {
				target,
				till,
				forward: !forward,
			},
			other => other,
		}
	}

	/// Applies the motion `count` times starting at `pos`.
	///
	/// Returns `None` if the motion cannot move at all, e.g. a `f` target
	/// that does not occur on the line.
	pub fn apply(self, text: &dyn TextEngine, pos: usize, count: usize) -> Option<usize> {
		let count = count.max(1);
		match self {
			Motion::FileBegin => return Some(line_start(text, 0)),
			Motion::FileEnd => return Some(line_start(text, text.pos_by_lineno(text.line_count()))),
			Motion::Line(n) => return Some(line_start(text, text.pos_by_lineno(n))),
			Motion::Find { target, till, forward } => return find_in_line(text, pos, target, count, till, forward),
			Motion::LineUp | Motion::LineDown => return line_vertical(text, pos, count, self == Motion::LineDown),
			_ => {}
		}

		let mut p = pos.min(text.size());
		for _ in 0..count {
			let next = self.step(text, p);
			if next == p {
				break;
			}
			p = next;
		}
		Some(p)
	}

	fn step(self, text: &dyn TextEngine, pos: usize) -> usize {
		match self {
			Motion::CharPrev => text.char_prev(pos),
			Motion::CharNext => text.char_next(pos),
			Motion::LineCharPrev => {
				if pos > text.line_begin(pos) {
					text.char_prev(pos)
				} else {
					pos
				}
			}
			Motion::LineCharNext => {
				if pos < text.line_end(pos) {
					text.char_next(pos)
				} else {
					pos
				}
			}
			Motion::LineBegin => text.line_begin(pos),
			Motion::LineStart => line_start(text, pos),
			Motion::LineFinish => line_finish(text, pos),
			Motion::LineEnd => text.line_end(pos),
			Motion::WordStartNext => word::start_next(text, pos, WordKind::Word),
			Motion::WordStartPrev => word::start_prev(text, pos, WordKind::Word),
			Motion::WordEndNext => word::end_next(text, pos, WordKind::Word),
			Motion::WordEndPrev => word::end_prev(text, pos, WordKind::Word),
			Motion::BigwordStartNext => word::start_next(text, pos, WordKind::Bigword),
			Motion::BigwordStartPrev => word::start_prev(text, pos, WordKind::Bigword),
			Motion::BigwordEndNext => word::end_next(text, pos, WordKind::Bigword),
			Motion::BigwordEndPrev => word::end_prev(text, pos, WordKind::Bigword),
			_ => pos,
		}
	}
}

#[inline]
fn is_blank(b: u8) -> bool {
	b == b' ' || b == b'\t'
}

/// First non-blank character of the line at `pos`, or its newline.
pub fn line_start(text: &dyn TextEngine, pos: usize) -> usize {
	let end = text.line_end(pos);
	let mut p = text.line_begin(pos);
	while p < end && text.byte_at(p).is_some_and(is_blank) {
		p += 1;
	}
	p
}

/// Last non-blank character of the line at `pos`, or its first byte.
pub fn line_finish(text: &dyn TextEngine, pos: usize) -> usize {
	let begin = text.line_begin(pos);
	let mut p = text.line_end(pos);
	while p > begin {
		let prev = text.char_prev(p);
		if !text.byte_at(prev).is_some_and(is_blank) {
			return prev;
		}
		p = prev;
	}
	begin
}

/// Extends `range` to cover whole lines, including the final newline.
pub fn linewise(text: &dyn TextEngine, range: Filerange) -> Filerange {
	let last = if range.is_empty() {
		range.start
	} else {
		text.char_prev(range.end)
	};
	Filerange::new(text.line_begin(range.start), text.line_next(last))
}

fn line_vertical(text: &dyn TextEngine, pos: usize, count: usize, down: bool) -> Option<usize> {
	let lineno = text.lineno(pos);
	let target = if down {
		(lineno + count).min(text.line_count())
	} else {
		lineno.saturating_sub(count).max(1)
	};
	if target == lineno {
		return None;
	}
	let col = char_column(text, pos);
	Some(pos_at_char_column(text, text.pos_by_lineno(target), col))
}

fn find_in_line(text: &dyn TextEngine, pos: usize, target: char, count: usize, till: bool, forward: bool) -> Option<usize> {
	let begin = text.line_begin(pos);
	let end = text.line_end(pos);
	let mut p = pos;
	let mut found = 0;
	// `t` starting right before a match must not stick to it.
	if till {
		let adjacent = if forward { text.char_next(p) } else { text.char_prev(p) };
		if adjacent != p && text.char_at(adjacent) == Some(target) {
			p = adjacent;
		}
	}
	loop {
		let next = if forward { text.char_next(p) } else { text.char_prev(p) };
		if next == p || (forward && next >= end) || (!forward && next < begin) {
			return None;
		}
		p = next;
		if text.char_at(p) == Some(target) {
			found += 1;
			if found == count {
				break;
			}
		}
	}
	Some(match (till, forward) {
		(false, _) => p,
		(true, true) => text.char_prev(p),
		(true, false) => text.char_next(p),
	})
}
