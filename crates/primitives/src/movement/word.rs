use crate::text::TextEngine;

/// Which characters make up a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
	/// Runs of word characters, or runs of other non-blank characters.
	Word,
	/// Runs of non-blank characters.
	Bigword,
}

/// Returns true for characters that form a word: alphanumerics and `_`.
#[inline]
pub fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Class {
	Blank,
	Newline,
	Word,
	Punct,
}

impl Class {
	fn is_space(self) -> bool {
		matches!(self, Class::Blank | Class::Newline)
	}
}

pub(super) fn class_of(c: char, kind: WordKind) -> Class {
	match c {
		'\n' => Class::Newline,
		c if c.is_whitespace() => Class::Blank,
		c if kind == WordKind::Bigword || is_word_char(c) => Class::Word,
		_ => Class::Punct,
	}
}

/// Class of the character at `pos`; the end of the text counts as a newline.
pub(super) fn class_at(text: &dyn TextEngine, pos: usize, kind: WordKind) -> Class {
	text.char_at(pos).map_or(Class::Newline, |c| class_of(c, kind))
}

/// `w`: start of the next word, stopping at empty lines.
pub(super) fn start_next(text: &dyn TextEngine, pos: usize, kind: WordKind) -> usize {
	let size = text.size();
	if pos >= size {
		return size;
	}
	let mut p = pos;
	let class = class_at(text, p, kind);
	if !class.is_space() {
		while p < size && class_at(text, p, kind) == class {
			p = text.char_next(p);
		}
	}
	while p < size {
		match class_at(text, p, kind) {
			Class::Blank => p = text.char_next(p),
			Class::Newline => {
				p = text.char_next(p);
				if p < size && class_at(text, p, kind) == Class::Newline {
					break;
				}
			}
			_ => break,
		}
	}
	p
}

/// `b`: start of the current or previous word.
pub(super) fn start_prev(text: &dyn TextEngine, pos: usize, kind: WordKind) -> usize {
	if pos == 0 {
		return 0;
	}
	let mut p = text.char_prev(pos);
	while p > 0 && class_at(text, p, kind).is_space() {
		p = text.char_prev(p);
	}
	let class = class_at(text, p, kind);
	while p > 0 {
		let prev = text.char_prev(p);
		if class_at(text, prev, kind) != class {
			break;
		}
		p = prev;
	}
	p
}

/// `e`: last character of the current or next word.
pub(super) fn end_next(text: &dyn TextEngine, pos: usize, kind: WordKind) -> usize {
	let size = text.size();
	let mut p = text.char_next(pos);
	while p < size && class_at(text, p, kind).is_space() {
		p = text.char_next(p);
	}
	if p >= size {
		return pos;
	}
	let class = class_at(text, p, kind);
	loop {
		let next = text.char_next(p);
		if next >= size || class_at(text, next, kind) != class {
			return p;
		}
		p = next;
	}
}

/// `ge`: last character of the previous word.
pub(super) fn end_prev(text: &dyn TextEngine, pos: usize, kind: WordKind) -> usize {
	let mut p = pos.min(text.size());
	let class = class_at(text, p, kind);
	if !class.is_space() {
		while p > 0 && class_at(text, p, kind) == class {
			p = text.char_prev(p);
		}
		if p == 0 && class_at(text, 0, kind) == class {
			return pos;
		}
	}
	while p > 0 && class_at(text, p, kind).is_space() {
		p = text.char_prev(p);
	}
	p
}
