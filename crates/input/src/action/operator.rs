use vix_primitives::{Mark, Mode, Motion};

use super::{Arg, CharArg, Keys, read_char, read_name};
use crate::editor::{Editor, Operator};
use crate::error::DispatchError;
use crate::register::RegisterSel;

pub(super) fn operator(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if let Arg::Operator(op) = *arg {
		editor.operator(op);
	}
	Ok(Keys::Consumed(0))
}

/// `p` and `P` need no motion; outside visual mode they act at the cursor.
pub(super) fn put(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if let Arg::Operator(op) = *arg {
		editor.operator(op);
		if editor.mode == Mode::OperatorPending {
			editor.motion(Motion::Nop);
		}
	}
	Ok(Keys::Consumed(0))
}

/// `J` joins COUNT lines, at least two.
pub(super) fn join(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::Operator(op) = *arg else {
		return Ok(Keys::Consumed(0));
	};
	if editor.mode.is_visual() {
		editor.operator(op);
		return Ok(Keys::Consumed(0));
	}
	let count = editor.pending.count.take().unwrap_or(1);
	editor.pending.count = Some(count.saturating_sub(1).max(1));
	editor.operator(op);
	if editor.mode == Mode::OperatorPending {
		editor.motion(Motion::LineDown);
	}
	Ok(Keys::Consumed(0))
}

/// `r`, reading the replacement character.
pub(super) fn replace_char(editor: &mut Editor, keys: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	match read_char(keys) {
		CharArg::Missing => Ok(Keys::NeedMore),
		CharArg::Cancel(len) => {
			editor.cancel_pending();
			Ok(Keys::Consumed(len))
		}
		CharArg::Char(c, len) => {
			editor.operator(Operator::Replace(c));
			if editor.mode == Mode::OperatorPending {
				editor.motion(Motion::LineCharNext);
			}
			Ok(Keys::Consumed(len))
		}
	}
}

/// Deletes along a fixed motion; `x`, `<Backspace>`, `<C-w>` and friends.
pub(super) fn delete(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::Motion(motion) = *arg else {
		return Ok(Keys::Consumed(0));
	};
	editor.operator(Operator::Delete);
	if editor.mode == Mode::OperatorPending {
		editor.motion(motion);
	}
	Ok(Keys::Consumed(0))
}

/// Digits accumulate a count; `0` without one moves to the line begin.
pub(super) fn count(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::Int(digit) = *arg else {
		return Ok(Keys::Consumed(0));
	};
	if digit == 0 && editor.pending.count.is_none() {
		editor.motion(Motion::LineBegin);
	} else {
		editor.pending.push_digit(digit);
	}
	Ok(Keys::Consumed(0))
}

/// `"x` selects the register of the next command.
pub(super) fn register(editor: &mut Editor, keys: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Some(name) = read_name(keys) else {
		return Ok(Keys::NeedMore);
	};
	match name.ok().and_then(RegisterSel::from_byte) {
		Some(reg) => {
			editor.pending.register = Some(reg);
			Ok(Keys::Consumed(1))
		}
		None => {
			editor.cancel_pending();
			Ok(Keys::Consumed(name_len(name)))
		}
	}
}

/// `'x` selects the mark of the next selection command.
pub(super) fn mark(editor: &mut Editor, keys: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Some(name) = read_name(keys) else {
		return Ok(Keys::NeedMore);
	};
	match name.ok().and_then(Mark::from_byte) {
		Some(mark) => {
			editor.pending.mark = Some(mark);
			Ok(Keys::Consumed(1))
		}
		None => {
			editor.cancel_pending();
			Ok(Keys::Consumed(name_len(name)))
		}
	}
}

fn name_len(name: Result<u8, usize>) -> usize {
	name.map_or_else(|len| len, |_| 1)
}
