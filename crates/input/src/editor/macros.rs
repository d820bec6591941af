//! Macro recording and replay.

use tracing::debug;

use super::Editor;
use crate::error::DispatchError;
use crate::register::RegisterSel;

/// A macro being recorded from typed keys.
#[derive(Debug, Clone)]
pub(crate) struct Recording {
	pub reg: RegisterSel,
	pub keys: Vec<u8>,
	/// Length of `keys` before the last token.
	last: usize,
}

impl Recording {
	pub fn push(&mut self, token: &[u8]) {
		self.last = self.keys.len();
		self.keys.extend_from_slice(token);
	}
}

impl Editor {
	pub(crate) fn start_recording(&mut self, reg: RegisterSel) {
		debug!(register = %reg.id.name(), "recording macro");
		self.recording = Some(Recording {
			reg,
			keys: Vec::new(),
			last: 0,
		});
	}

	/// Stores the recorded keys, minus the key that stopped the recording.
	pub(crate) fn stop_recording(&mut self) {
		let Some(mut recording) = self.recording.take() else {
			return;
		};
		recording.keys.truncate(recording.last);
		debug!(register = %recording.reg.id.name(), len = recording.keys.len(), "macro recorded");
		self.registers.put(recording.reg, vec![recording.keys], false);
	}

	/// Dispatches `keys` one level deeper than the caller, returning the
	/// keys left waiting for input.
	pub(crate) fn run_keys(&mut self, keys: &[u8], depth: usize) -> Result<Vec<u8>, DispatchError> {
		if depth > self.options.macro_depth_max {
			return Err(DispatchError::MacroDepthExceeded { depth });
		}
		let mut queue = keys.to_vec();
		self.drain(&mut queue, depth, false)?;
		Ok(queue)
	}
}
