use tracing::debug;
use vix_primitives::selection::ops;
use vix_primitives::{Filerange, Mark, Mode, ranges};

use super::{Arg, Keys, SetOp, done};
use crate::editor::Editor;
use crate::error::DispatchError;

fn count(editor: &mut Editor) -> usize {
	editor.pending.take_count().unwrap_or(1)
}

pub(super) fn flip(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	ops::flip(&mut editor.sels);
	done(editor)
}

pub(super) fn new_lines(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if let Arg::NewSelection(dir) = *arg {
		let count = count(editor);
		ops::new_on_line(&mut editor.sels, &*editor.text, dir, count);
	}
	done(editor)
}

pub(super) fn match_next(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let all = matches!(arg, Arg::Bool(true));
	ops::match_next(&mut editor.sels, &*editor.text, &mut editor.match_word, all);
	done(editor)
}

pub(super) fn match_skip(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	ops::match_skip(&mut editor.sels, &*editor.text, &mut editor.match_word);
	done(editor)
}

pub(super) fn navigate(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let count = count(editor);
	ops::navigate(&mut editor.sels, count, matches!(arg, Arg::Bool(true)));
	done(editor)
}

pub(super) fn align(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	ops::align(&mut editor.sels, &*editor.text, editor.options.tabwidth.max(1));
	done(editor)
}

pub(super) fn align_indent(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let left = matches!(arg, Arg::Bool(true));
	if let Err(err) = ops::align_indent(&mut editor.sels, &mut *editor.text, left, editor.options.tabwidth.max(1)) {
		debug!(%err, "align aborted");
	}
	editor.sels.normalize(&*editor.text);
	done(editor)
}

pub(super) fn remove_all(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.sels.clear();
	done(editor)
}

pub(super) fn remove_last(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let primary = editor.sels.primary_id();
	editor.sels.dispose(primary);
	done(editor)
}

/// Removes column COUNT; with a single selection this leaves visual mode.
pub(super) fn remove_column(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let column = count(editor);
	if !ops::remove_column(&mut editor.sels, &*editor.text, column) {
		editor.visual_escape();
	}
	done(editor)
}

pub(super) fn remove_column_except(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let column = count(editor);
	ops::remove_column_except(&mut editor.sels, &*editor.text, column);
	done(editor)
}

pub(super) fn rotate(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let count = count(editor);
	if let Err(err) = ops::rotate(&mut editor.sels, &mut *editor.text, count, matches!(arg, Arg::Bool(true))) {
		debug!(%err, "rotate aborted");
	}
	done(editor)
}

/// Trims whitespace off every selection, leaving visual mode when nothing
/// but whitespace was selected.
pub(super) fn trim(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if !ops::trim(&mut editor.sels, &*editor.text) {
		editor.switch_mode(Mode::Normal);
	}
	done(editor)
}

fn mark(editor: &mut Editor) -> Mark {
	editor.pending.mark.take().unwrap_or(Mark::SELECTION)
}

pub(super) fn save(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let mark = mark(editor);
	let ranges = editor.sels.ranges(&*editor.text);
	debug!(mark = %mark.name(), count = ranges.len(), "selections saved");
	editor.marks.set(mark, &ranges);
	done(editor)
}

pub(super) fn restore(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let mark = mark(editor);
	let ranges = editor.marks.get_clamped(mark, editor.text.size());
	replace_selections(editor, &ranges);
	done(editor)
}

/// Combines the selections with a mark by union, intersection or
/// difference; complement ignores the mark.
pub(super) fn combine(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::SetOp(op) = *arg else {
		return done(editor);
	};
	let mark = mark(editor);
	let universe = Filerange::new(0, editor.text.size());
	let current = editor.sels.ranges(&*editor.text);
	let saved = editor.marks.get_clamped(mark, universe.end);
	let result = match op {
		SetOp::Union => ranges::union(&current, &saved),
		SetOp::Intersect => ranges::intersect(&current, &saved),
		SetOp::Complement => ranges::complement(&current, universe),
		SetOp::Minus => ranges::minus(&current, &saved, universe),
	};
	debug!(?op, mark = %mark.name(), count = result.len(), "selections combined");
	replace_selections(editor, &result);
	done(editor)
}

/// Selections become `ranges`, anchored in visual mode and cursors
/// otherwise. An empty list changes nothing.
fn replace_selections(editor: &mut Editor, ranges: &[Filerange]) {
	let anchored = editor.mode.is_visual();
	editor.sels.set_ranges(&*editor.text, ranges, anchored);
}
