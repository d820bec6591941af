use super::word::{Class, WordKind, class_at, is_word_char};
use super::{line_finish, line_start};
use crate::range::Filerange;
use crate::text::TextEngine;

/// A text object: a range computed around a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextObject {
	/// `iw`
	WordInner,
	/// `aw`: the word plus trailing (or else leading) blanks.
	WordOuter,
	BigwordInner,
	BigwordOuter,
	/// `il`: the line without surrounding blanks.
	LineInner,
	/// `al`: the whole line including its newline.
	LineOuter,
}

impl TextObject {
	/// Returns true if operators should treat the range as whole lines.
	pub fn is_linewise(self) -> bool {
		self == TextObject::LineOuter
	}

	/// Computes the object around `pos`, `None` past the end of the text.
	pub fn range(self, text: &dyn TextEngine, pos: usize) -> Option<Filerange> {
		if pos >= text.size() && !matches!(self, TextObject::LineInner | TextObject::LineOuter) {
			return None;
		}
		match self {
			TextObject::WordInner => Some(word_inner(text, pos, WordKind::Word)),
			TextObject::WordOuter => Some(word_outer(text, pos, WordKind::Word)),
			TextObject::BigwordInner => Some(word_inner(text, pos, WordKind::Bigword)),
			TextObject::BigwordOuter => Some(word_outer(text, pos, WordKind::Bigword)),
			TextObject::LineInner => {
				let start = line_start(text, pos);
				if start == text.line_end(pos) {
					return Some(Filerange::empty_at(start));
				}
				Some(Filerange::new(start, text.char_next(line_finish(text, pos))))
			}
			TextObject::LineOuter => Some(Filerange::new(text.line_begin(pos), text.line_next(pos))),
		}
	}
}

fn word_inner(text: &dyn TextEngine, pos: usize, kind: WordKind) -> Filerange {
	let class = class_at(text, pos, kind);
	if class == Class::Newline {
		return Filerange::new(pos, text.char_next(pos));
	}
	let mut start = pos;
	while start > 0 {
		let prev = text.char_prev(start);
		if class_at(text, prev, kind) != class {
			break;
		}
		start = prev;
	}
	let size = text.size();
	let mut end = pos;
	while end < size && class_at(text, end, kind) == class {
		end = text.char_next(end);
	}
	Filerange::new(start, end)
}

fn word_outer(text: &dyn TextEngine, pos: usize, kind: WordKind) -> Filerange {
	let inner = word_inner(text, pos, kind);
	let size = text.size();
	let mut end = inner.end;
	match class_at(text, pos, kind) {
		Class::Newline => inner,
		Class::Blank => {
			let class = class_at(text, end, kind);
			if matches!(class, Class::Word | Class::Punct) {
				while end < size && class_at(text, end, kind) == class {
					end = text.char_next(end);
				}
			}
			Filerange::new(inner.start, end)
		}
		_ => {
			while end < size && class_at(text, end, kind) == Class::Blank {
				end = text.char_next(end);
			}
			if end > inner.end {
				return Filerange::new(inner.start, end);
			}
			let mut start = inner.start;
			while start > 0 {
				let prev = text.char_prev(start);
				if class_at(text, prev, kind) != Class::Blank {
					break;
				}
				start = prev;
			}
			Filerange::new(start, end)
		}
	}
}

fn is_word_bounded(text: &dyn TextEngine, range: Filerange) -> bool {
	let before = range.start > 0 && text.char_at(text.char_prev(range.start)).is_some_and(is_word_char);
	let after = text.char_at(range.end).is_some_and(is_word_char);
	!before && !after
}

/// Next whole-word occurrence of `word` starting at or after `from`.
pub fn find_word_next(text: &dyn TextEngine, from: usize, word: &[u8]) -> Option<Filerange> {
	let mut from = from;
	loop {
		let start = text.find_next(from, word)?;
		let range = Filerange::new(start, start + word.len());
		if is_word_bounded(text, range) {
			return Some(range);
		}
		from = start + 1;
	}
}

/// Last whole-word occurrence of `word` starting before `before`.
pub fn find_word_prev(text: &dyn TextEngine, before: usize, word: &[u8]) -> Option<Filerange> {
	let mut before = before;
	loop {
		let start = text.find_prev(before, word)?;
		let range = Filerange::new(start, start + word.len());
		if is_word_bounded(text, range) {
			return Some(range);
		}
		before = start;
	}
}
