use vix_primitives::Motion;

use super::{Arg, CharArg, Keys, read_char};
use crate::editor::Editor;
use crate::error::DispatchError;

pub(super) fn movement(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if let Arg::Motion(motion) = *arg {
		editor.motion(motion);
	}
	Ok(Keys::Consumed(0))
}

/// `gg` and `G`: the first or last line, or line COUNT.
pub(super) fn goto_line(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::Motion(motion) = *arg else {
		return Ok(Keys::Consumed(0));
	};
	match editor.pending.count.take() {
		Some(line) => editor.motion(Motion::Line(line)),
		None => editor.motion(motion),
	}
	Ok(Keys::Consumed(0))
}

/// `f`, `F`, `t` and `T`, reading the target character.
pub(super) fn find(editor: &mut Editor, keys: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Arg::Find { till, forward } = *arg else {
		return Ok(Keys::Consumed(0));
	};
	match read_char(keys) {
		CharArg::Missing => Ok(Keys::NeedMore),
		CharArg::Cancel(len) => {
			editor.cancel_pending();
			Ok(Keys::Consumed(len))
		}
		CharArg::Char(target, len) => {
			let motion = Motion::Find { target, till, forward };
			editor.last_find = Some(motion);
			editor.motion(motion);
			Ok(Keys::Consumed(len))
		}
	}
}

/// `;` and `,`.
pub(super) fn find_repeat(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let reverse = matches!(arg, Arg::Bool(true));
	match editor.last_find {
		Some(motion) => editor.motion(if reverse { motion.reversed() } else { motion }),
		None => editor.cancel_pending(),
	}
	Ok(Keys::Consumed(0))
}

pub(super) fn textobject(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if let Arg::TextObject(obj) = *arg {
		editor.textobject(obj);
	}
	Ok(Keys::Consumed(0))
}
