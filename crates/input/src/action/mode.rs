use vix_primitives::{Mode, Motion};

use super::{Arg, Keys, done};
use crate::editor::{Editor, Operator};
use crate::error::DispatchError;

pub(super) fn nop(_: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	Ok(Keys::Consumed(0))
}

pub(super) fn switch(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if let Arg::Mode(mode) = *arg {
		editor.switch_mode(mode);
	}
	done(editor)
}

pub(super) fn normal_escape(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.normal_escape();
	Ok(Keys::Consumed(0))
}

/// `v` and `V`: enter a visual mode, switch between them, or leave.
pub(super) fn visual(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::Mode(mode) = *arg else {
		return Ok(Keys::Consumed(0));
	};
	if editor.mode == mode {
		editor.switch_mode(Mode::Normal);
	} else {
		editor.switch_mode(mode);
	}
	done(editor)
}

pub(super) fn visual_escape(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.visual_escape();
	Ok(Keys::Consumed(0))
}

/// `i`, `a`, `I` and `A`: move by the motion, then insert.
pub(super) fn insert(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let motion = match *arg {
		Arg::Motion(motion) => motion,
		_ => Motion::Nop,
	};
	editor.operator(Operator::ModeSwitch(Mode::Insert));
	editor.motion(motion);
	Ok(Keys::Consumed(0))
}

pub(super) fn replace(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.operator(Operator::ModeSwitch(Mode::Replace));
	editor.motion(Motion::Nop);
	Ok(Keys::Consumed(0))
}

/// `o` and `O`: enter insert mode and break the line, so the new line is
/// typed into the repeat record like any other insert-mode key.
pub(super) fn open_line(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let above = matches!(arg, Arg::Bool(true));
	editor.operator(Operator::ModeSwitch(Mode::Insert));
	if above {
		editor.motion(if editor.options.autoindent { Motion::LineStart } else { Motion::LineBegin });
		Ok(Keys::Inject {
			consumed: 0,
			keys: b"<Enter><vis-motion-line-up>".to_vec(),
		})
	} else {
		editor.motion(Motion::LineEnd);
		Ok(Keys::Inject {
			consumed: 0,
			keys: b"<Enter>".to_vec(),
		})
	}
}
