//! The action table.
//!
//! An action is a plain function with a static argument. Bindings name
//! actions as `<vis-...>`; the same function serves many names through its
//! [`Arg`]. An action receives the keys queued after its binding and says
//! how many of them it used, so commands like `f` or `"` read their own
//! arguments and wait with [`Keys::NeedMore`] until they arrive.

mod insert;
mod macros;
mod mode;
mod motion;
mod operator;
mod selection;

#[cfg(test)]
mod tests;

use vix_keymap_parser::Token;
use vix_primitives::selection::ops::NewSelection;
use vix_primitives::{Mode, Motion, TextObject};

use crate::editor::{Editor, Operator};
use crate::error::DispatchError;

/// How many of the keys after a binding an action used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keys {
	/// The first `n` keys were used.
	Consumed(usize),
	/// More keys are needed; the binding stays queued and runs again.
	NeedMore,
	/// The binding and `consumed` following keys are replaced by `keys`.
	Inject { consumed: usize, keys: Vec<u8> },
}

/// Static argument of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
	None,
	Int(usize),
	Bool(bool),
	Motion(Motion),
	TextObject(TextObject),
	Operator(Operator),
	Mode(Mode),
	/// A to/till motion waiting for its target character.
	Find { till: bool, forward: bool },
	NewSelection(NewSelection),
	SetOp(SetOp),
}

/// Combination of the selections with the ranges of a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
	Union,
	Intersect,
	/// Gaps between the selections; the mark is not read.
	Complement,
	/// Selections without the mark ranges.
	Minus,
}

/// Signature of every action function.
pub type ActionFn = fn(&mut Editor, &[u8], &Arg, usize) -> Result<Keys, DispatchError>;

/// A named action with its static argument.
#[derive(Debug)]
pub struct KeyAction {
	/// Name without brackets, such as `vis-motion-char-next`.
	pub name: &'static str,
	pub help: &'static str,
	pub func: ActionFn,
	pub arg: Arg,
}

const fn act(name: &'static str, help: &'static str, func: ActionFn, arg: Arg) -> KeyAction {
	KeyAction { name, help, func, arg }
}

/// Looks up an action by name.
pub fn find(name: &str) -> Option<&'static KeyAction> {
	ACTIONS.iter().find(|action| action.name == name)
}

/// A character read as the argument of a command.
pub(crate) enum CharArg {
	/// No key queued yet.
	Missing,
	/// A key that is not a character, such as `<Escape>`, of the given length.
	Cancel(usize),
	Char(char, usize),
}

/// Reads one key as a character; `<Enter>` and `<Tab>` count as their text.
pub(crate) fn read_char(keys: &[u8]) -> CharArg {
	let Some((token, len)) = Token::parse(keys) else {
		return CharArg::Missing;
	};
	let text = token.text();
	let mut chars = text.as_deref().and_then(|t| std::str::from_utf8(t).ok()).into_iter().flat_map(str::chars);
	match (chars.next(), chars.next()) {
		(Some(c), None) => CharArg::Char(c, len),
		_ => CharArg::Cancel(len),
	}
}

/// Reads one single-byte key, as used for register and mark names.
pub(crate) fn read_name(keys: &[u8]) -> Option<Result<u8, usize>> {
	let (_, len) = Token::parse(keys)?;
	Some(if len == 1 { Ok(keys[0]) } else { Err(len) })
}

/// Clears the count, register and mark of a finished command.
pub(crate) fn done(editor: &mut Editor) -> Result<Keys, DispatchError> {
	editor.pending.clear_args();
	Ok(Keys::Consumed(0))
}

use Motion as M;
use NewSelection as N;
use Operator as O;

/// Every action, by name.
pub static ACTIONS: &[KeyAction] = &[
	act("vis-nop", "Ignore key, do nothing", mode::nop, Arg::None),
	// motions
	act("vis-motion-char-prev", "Move cursor left, to the previous character", motion::movement, Arg::Motion(M::CharPrev)),
	act("vis-motion-char-next", "Move cursor right, to the next character", motion::movement, Arg::Motion(M::CharNext)),
	act("vis-motion-line-char-prev", "Move cursor left, to the previous character on the line", motion::movement, Arg::Motion(M::LineCharPrev)),
	act("vis-motion-line-char-next", "Move cursor right, to the next character on the line", motion::movement, Arg::Motion(M::LineCharNext)),
	act("vis-motion-codepoint-prev", "Move to the previous Unicode codepoint", motion::movement, Arg::Motion(M::CharPrev)),
	act("vis-motion-codepoint-next", "Move to the next Unicode codepoint", motion::movement, Arg::Motion(M::CharNext)),
	act("vis-motion-word-start-prev", "Move cursor words backwards", motion::movement, Arg::Motion(M::WordStartPrev)),
	act("vis-motion-word-start-next", "Move cursor words forwards", motion::movement, Arg::Motion(M::WordStartNext)),
	act("vis-motion-word-end-prev", "Move cursor backwards to the end of word", motion::movement, Arg::Motion(M::WordEndPrev)),
	act("vis-motion-word-end-next", "Move cursor forward to the end of word", motion::movement, Arg::Motion(M::WordEndNext)),
	act("vis-motion-bigword-start-prev", "Move cursor WORDS backwards", motion::movement, Arg::Motion(M::BigwordStartPrev)),
	act("vis-motion-bigword-start-next", "Move cursor WORDS forwards", motion::movement, Arg::Motion(M::BigwordStartNext)),
	act("vis-motion-bigword-end-prev", "Move cursor backwards to the end of WORD", motion::movement, Arg::Motion(M::BigwordEndPrev)),
	act("vis-motion-bigword-end-next", "Move cursor forward to the end of WORD", motion::movement, Arg::Motion(M::BigwordEndNext)),
	act("vis-motion-line-up", "Move cursor line upwards", motion::movement, Arg::Motion(M::LineUp)),
	act("vis-motion-line-down", "Move cursor line downwards", motion::movement, Arg::Motion(M::LineDown)),
	act("vis-motion-line-start", "Move cursor to first non-blank character of the line", motion::movement, Arg::Motion(M::LineStart)),
	act("vis-motion-line-finish", "Move cursor to last non-blank character of the line", motion::movement, Arg::Motion(M::LineFinish)),
	act("vis-motion-line-begin", "Move cursor to first character of the line", motion::movement, Arg::Motion(M::LineBegin)),
	act("vis-motion-line-end", "Move cursor to end of the line", motion::movement, Arg::Motion(M::LineEnd)),
	act("vis-motion-line-first", "Move cursor to line COUNT, or the first line", motion::goto_line, Arg::Motion(M::FileBegin)),
	act("vis-motion-line-last", "Move cursor to line COUNT, or the last line", motion::goto_line, Arg::Motion(M::FileEnd)),
	act("vis-motion-to-line-left", "To the left, onto the next occurrence of a character", motion::find, Arg::Find { till: false, forward: false }),
	act("vis-motion-to-line-right", "To the right, onto the next occurrence of a character", motion::find, Arg::Find { till: false, forward: true }),
	act("vis-motion-till-line-left", "Till the left, before the next occurrence of a character", motion::find, Arg::Find { till: true, forward: false }),
	act("vis-motion-till-line-right", "Till the right, before the next occurrence of a character", motion::find, Arg::Find { till: true, forward: true }),
	act("vis-motion-totill-repeat", "Repeat latest to/till motion", motion::find_repeat, Arg::Bool(false)),
	act("vis-motion-totill-reverse", "Repeat latest to/till motion but in opposite direction", motion::find_repeat, Arg::Bool(true)),
	// text objects
	act("vis-textobject-word-outer", "A word leading and trailing whitespace included", motion::textobject, Arg::TextObject(TextObject::WordOuter)),
	act("vis-textobject-word-inner", "A word leading and trailing whitespace excluded", motion::textobject, Arg::TextObject(TextObject::WordInner)),
	act("vis-textobject-bigword-outer", "A WORD leading and trailing whitespace included", motion::textobject, Arg::TextObject(TextObject::BigwordOuter)),
	act("vis-textobject-bigword-inner", "A WORD leading and trailing whitespace excluded", motion::textobject, Arg::TextObject(TextObject::BigwordInner)),
	act("vis-textobject-line-outer", "The whole line", motion::textobject, Arg::TextObject(TextObject::LineOuter)),
	act("vis-textobject-line-inner", "The whole line, excluding leading and trailing whitespace", motion::textobject, Arg::TextObject(TextObject::LineInner)),
	// modes
	act("vis-mode-normal", "Enter normal mode", mode::switch, Arg::Mode(Mode::Normal)),
	act("vis-mode-normal-escape", "Reset count or remove all non-primary selections", mode::normal_escape, Arg::None),
	act("vis-mode-visual-charwise", "Enter characterwise visual mode", mode::visual, Arg::Mode(Mode::Visual)),
	act("vis-mode-visual-linewise", "Enter linewise visual mode", mode::visual, Arg::Mode(Mode::VisualLine)),
	act("vis-mode-visual-escape", "Reset count or switch to normal mode", mode::visual_escape, Arg::None),
	act("vis-mode-insert", "Enter insert mode", mode::insert, Arg::Motion(M::Nop)),
	act("vis-mode-replace", "Enter replace mode", mode::replace, Arg::None),
	act("vis-append-char-next", "Append text after the cursor", mode::insert, Arg::Motion(M::LineCharNext)),
	act("vis-append-line-end", "Append text after the end of the line", mode::insert, Arg::Motion(M::LineEnd)),
	act("vis-insert-line-start", "Insert text before the first non-blank in the line", mode::insert, Arg::Motion(M::LineStart)),
	act("vis-open-line-above", "Begin a new line above the cursor", mode::open_line, Arg::Bool(true)),
	act("vis-open-line-below", "Begin a new line below the cursor", mode::open_line, Arg::Bool(false)),
	// operators
	act("vis-operator-change", "Change operator", operator::operator, Arg::Operator(O::Change)),
	act("vis-operator-delete", "Delete operator", operator::operator, Arg::Operator(O::Delete)),
	act("vis-operator-yank", "Yank operator", operator::operator, Arg::Operator(O::Yank)),
	act("vis-operator-shift-left", "Shift left operator", operator::operator, Arg::Operator(O::ShiftLeft)),
	act("vis-operator-shift-right", "Shift right operator", operator::operator, Arg::Operator(O::ShiftRight)),
	act("vis-put-after", "Put text after the cursor", operator::put, Arg::Operator(O::PutAfter)),
	act("vis-put-before", "Put text before the cursor", operator::put, Arg::Operator(O::PutBefore)),
	act("vis-join-lines", "Join selected lines", operator::join, Arg::Operator(O::Join { trim: false })),
	act("vis-join-lines-trim", "Join selected lines, remove white space", operator::join, Arg::Operator(O::Join { trim: true })),
	act("vis-replace-char", "Replace the character under the cursor", operator::replace_char, Arg::None),
	act("vis-delete-char-prev", "Delete the previous character", operator::delete, Arg::Motion(M::CharPrev)),
	act("vis-delete-char-next", "Delete the next character", operator::delete, Arg::Motion(M::CharNext)),
	act("vis-delete-line-begin", "Delete until the start of the current line", operator::delete, Arg::Motion(M::LineBegin)),
	act("vis-delete-word-prev", "Delete the previous WORD", operator::delete, Arg::Motion(M::WordStartPrev)),
	act("vis-selection-new-lines-begin", "Create a new selection at the start of every line covered by selection", operator::operator, Arg::Operator(O::CursorSol)),
	act("vis-selection-new-lines-end", "Create a new selection at the end of every line covered by selection", operator::operator, Arg::Operator(O::CursorEol)),
	// counts, registers, marks
	act("vis-count-zero", "Count specifier", operator::count, Arg::Int(0)),
	act("vis-count-one", "Count specifier", operator::count, Arg::Int(1)),
	act("vis-count-two", "Count specifier", operator::count, Arg::Int(2)),
	act("vis-count-three", "Count specifier", operator::count, Arg::Int(3)),
	act("vis-count-four", "Count specifier", operator::count, Arg::Int(4)),
	act("vis-count-five", "Count specifier", operator::count, Arg::Int(5)),
	act("vis-count-six", "Count specifier", operator::count, Arg::Int(6)),
	act("vis-count-seven", "Count specifier", operator::count, Arg::Int(7)),
	act("vis-count-eight", "Count specifier", operator::count, Arg::Int(8)),
	act("vis-count-nine", "Count specifier", operator::count, Arg::Int(9)),
	act("vis-register", "Use given register for next operator", operator::register, Arg::None),
	act("vis-mark", "Use given mark for next selection action", operator::mark, Arg::None),
	// macros, repeat, undo
	act("vis-macro-record", "Record macro into given register", macros::record, Arg::None),
	act("vis-macro-replay", "Replay macro, execute the content of the given register", macros::replay, Arg::None),
	act("vis-repeat", "Repeat latest editor command", macros::repeat, Arg::None),
	act("vis-undo", "Undo last change", macros::undo, Arg::Bool(false)),
	act("vis-redo", "Redo last change", macros::undo, Arg::Bool(true)),
	// insert mode
	act("vis-insert-newline", "Insert a line break (depending on file type)", insert::newline, Arg::None),
	act("vis-insert-tab", "Insert a tab (might be converted to spaces)", insert::tab, Arg::None),
	act("vis-insert-verbatim", "Insert Unicode character based on code point", insert::verbatim, Arg::None),
	act("vis-insert-register", "Insert specified register content", insert::register, Arg::None),
	// selections
	act("vis-selection-flip", "Flip selection, move cursor to other end", selection::flip, Arg::None),
	act("vis-selection-new-lines-above", "Create a new selection on the line above", selection::new_lines, Arg::NewSelection(N::Above)),
	act("vis-selection-new-lines-above-first", "Create a new selection on the line above the first selection", selection::new_lines, Arg::NewSelection(N::AboveFirst)),
	act("vis-selection-new-lines-below", "Create a new selection on the line below", selection::new_lines, Arg::NewSelection(N::Below)),
	act("vis-selection-new-lines-below-last", "Create a new selection on the line below the last selection", selection::new_lines, Arg::NewSelection(N::BelowLast)),
	act("vis-selection-new-match-next", "Select the next region matching the current selection", selection::match_next, Arg::Bool(false)),
	act("vis-selection-new-match-all", "Select all regions matching the current selection", selection::match_next, Arg::Bool(true)),
	act("vis-selection-new-match-skip", "Clear current selection, but select next match", selection::match_skip, Arg::None),
	act("vis-selection-prev", "Move to the previous selection", selection::navigate, Arg::Bool(false)),
	act("vis-selection-next", "Move to the next selection", selection::navigate, Arg::Bool(true)),
	act("vis-selections-align", "Try to align all selections on the same column", selection::align, Arg::None),
	act("vis-selections-align-indent-left", "Left-align all selections by inserting spaces", selection::align_indent, Arg::Bool(true)),
	act("vis-selections-align-indent-right", "Right-align all selections by inserting spaces", selection::align_indent, Arg::Bool(false)),
	act("vis-selections-remove-all", "Remove all but the primary selection", selection::remove_all, Arg::None),
	act("vis-selections-remove-last", "Remove primary selection", selection::remove_last, Arg::None),
	act("vis-selections-remove-column", "Remove the COUNT-th selection column", selection::remove_column, Arg::None),
	act("vis-selections-remove-column-except", "Remove all but the COUNT-th selection column", selection::remove_column_except, Arg::None),
	act("vis-selections-rotate-left", "Rotate selections left", selection::rotate, Arg::Bool(false)),
	act("vis-selections-rotate-right", "Rotate selections right", selection::rotate, Arg::Bool(true)),
	act("vis-selections-trim", "Remove leading and trailing white space from selections", selection::trim, Arg::None),
	act("vis-selections-save", "Save currently active selections to mark", selection::save, Arg::None),
	act("vis-selections-restore", "Restore selections from mark", selection::restore, Arg::None),
	act("vis-selections-union", "Add selections from mark", selection::combine, Arg::SetOp(SetOp::Union)),
	act("vis-selections-intersect", "Intersect with selections from mark", selection::combine, Arg::SetOp(SetOp::Intersect)),
	act("vis-selections-complement", "Complement selections", selection::combine, Arg::SetOp(SetOp::Complement)),
	act("vis-selections-minus", "Subtract selections from mark", selection::combine, Arg::SetOp(SetOp::Minus)),
];
