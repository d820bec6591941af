use vix_keymap_parser::next_len;
use vix_primitives::Mode;

use super::{Arg, Keys, done};
use crate::editor::Editor;
use crate::error::DispatchError;
use crate::register::{RegisterId, RegisterSel};

/// `q`: starts recording into the named register, or stops recording.
pub(super) fn record(editor: &mut Editor, keys: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	if editor.is_recording() {
		editor.stop_recording();
		return done(editor);
	}
	let Some(&name) = keys.first() else {
		return Ok(Keys::NeedMore);
	};
	let len = next_len(keys);
	match RegisterSel::from_byte(name) {
		Some(reg) if len == 1 => {
			editor.start_recording(reg);
			editor.pending.clear_args();
			Ok(Keys::Consumed(1))
		}
		_ => {
			editor.cancel_pending();
			Ok(Keys::Consumed(len))
		}
	}
}

/// `@x` replays register `x` COUNT times; `@@` replays the last one again.
///
/// Keys left waiting at the end of the macro go back into the input, so a
/// macro may end in the middle of a command the user then finishes.
pub(super) fn replay(editor: &mut Editor, keys: &[u8], _: &Arg, depth: usize) -> Result<Keys, DispatchError> {
	let Some(&name) = keys.first() else {
		return Ok(Keys::NeedMore);
	};
	let len = next_len(keys);
	let id = match name {
		_ if len > 1 => None,
		b'@' => editor.last_replayed,
		_ => RegisterId::from_byte(name).map(|(id, _)| id),
	};
	let Some(id) = id else {
		editor.cancel_pending();
		return Ok(Keys::Consumed(len));
	};
	editor.last_replayed = Some(id);
	let count = editor.pending.take_count().unwrap_or(1);
	editor.pending.clear_args();
	let Some(content) = editor.registers.get(id).map(|reg| reg.slot(0, 1).to_vec()) else {
		return Ok(Keys::Consumed(1));
	};

	let mut carry = Vec::new();
	for _ in 0..count {
		carry.extend_from_slice(&content);
		carry = editor.run_keys(&carry, depth + 1)?;
	}
	if carry.is_empty() {
		Ok(Keys::Consumed(1))
	} else {
		Ok(Keys::Inject { consumed: 1, keys: carry })
	}
}

/// `.`: applies the last change again, then the keys typed after it.
pub(super) fn repeat(editor: &mut Editor, _: &[u8], _: &Arg, depth: usize) -> Result<Keys, DispatchError> {
	let Some(mut repeat) = editor.repeat.clone() else {
		return done(editor);
	};
	if let Some(count) = editor.pending.take_count() {
		repeat.count = count;
	}
	editor.pending.reset();
	editor.pending.register = repeat.register;
	editor.replaying = true;
	editor.apply(repeat.op, repeat.target, repeat.count, Mode::Normal);
	let result = if editor.mode.is_insert() && !repeat.inserted.is_empty() {
		editor.run_keys(&repeat.inserted, depth + 1).map(drop)
	} else {
		Ok(())
	};
	if editor.mode.is_insert() {
		editor.switch_mode(Mode::Normal);
	}
	editor.replaying = false;
	result?;
	if let Some(stored) = editor.repeat.as_mut() {
		stored.count = repeat.count;
	}
	Ok(Keys::Consumed(0))
}

pub(super) fn undo(editor: &mut Editor, _: &[u8], arg: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.undo(matches!(arg, Arg::Bool(true)));
	done(editor)
}
