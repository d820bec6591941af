use unicode_width::UnicodeWidthChar;

use crate::text::TextEngine;

/// Number of characters between the start of the line and `pos`.
pub fn char_column(text: &dyn TextEngine, pos: usize) -> usize {
	let mut p = text.line_begin(pos);
	let mut col = 0;
	while p < pos {
		p = text.char_next(p);
		col += 1;
	}
	col
}

/// Position `col` characters into the line at `pos`, stopping at its newline.
pub fn pos_at_char_column(text: &dyn TextEngine, pos: usize, col: usize) -> usize {
	let end = text.line_end(pos);
	let mut p = text.line_begin(pos);
	for _ in 0..col {
		if p >= end {
			break;
		}
		p = text.char_next(p);
	}
	p
}

fn cell_width(c: char, col: usize, tabwidth: usize) -> usize {
	if c == '\t' {
		let tabwidth = tabwidth.max(1);
		tabwidth - col % tabwidth
	} else {
		c.width().unwrap_or(0)
	}
}

/// Screen column of `pos` within its line, expanding tabs to `tabwidth`.
pub fn display_column(text: &dyn TextEngine, pos: usize, tabwidth: usize) -> usize {
	let mut p = text.line_begin(pos);
	let mut col = 0;
	while p < pos {
		if let Some(c) = text.char_at(p) {
			col += cell_width(c, col, tabwidth);
		}
		p = text.char_next(p);
	}
	col
}

/// First position of the line at `pos` whose screen column reaches `col`.
///
/// Short lines yield their newline position.
pub fn pos_at_display_column(text: &dyn TextEngine, pos: usize, col: usize, tabwidth: usize) -> usize {
	let end = text.line_end(pos);
	let mut p = text.line_begin(pos);
	let mut cur = 0;
	while p < end && cur < col {
		if let Some(c) = text.char_at(p) {
			cur += cell_width(c, cur, tabwidth);
		}
		p = text.char_next(p);
	}
	p
}
