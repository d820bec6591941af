use tracing::debug;
use vix_primitives::{Mark, Mode};

use super::Editor;

impl Editor {
	/// Enters `mode`, anchoring selections when entering visual mode.
	///
	/// Leaving visual mode saves the selections to the `^` mark and reduces
	/// them to cursors.
	pub(crate) fn switch_mode(&mut self, mode: Mode) {
		let old = self.mode;
		if old == mode {
			return;
		}
		if old.is_visual() && !mode.is_visual() {
			let ranges = self.sels.ranges(&*self.text);
			self.marks.set(Mark::SELECTION, &ranges);
			self.sels.anchor_all(false);
			self.sels.normalize(&*self.text);
		}
		if mode.is_visual() && !old.is_visual() {
			self.sels.anchor_all(true);
		}
		if old == Mode::OperatorPending {
			self.pending.operator = None;
		}
		self.set_mode(mode);
	}

	/// Changes the mode without touching the selections.
	pub(crate) fn set_mode(&mut self, mode: Mode) {
		if self.mode != mode {
			debug!(from = ?self.mode, to = ?mode, "mode");
			self.mode = mode;
		}
	}

	/// Drops a pending operator, returning to the mode it came from.
	pub(crate) fn cancel_operator(&mut self) {
		let from = self.pending.operator.map_or(Mode::Normal, |p| p.from);
		debug!(from = ?from, "operator cancelled");
		self.pending.reset();
		self.set_mode(from);
	}

	/// Abandons the command being typed: an unresolved register or mark
	/// name, or a missing motion argument.
	pub(crate) fn cancel_pending(&mut self) {
		if self.mode == Mode::OperatorPending {
			self.cancel_operator();
		} else {
			self.pending.reset();
		}
	}

	/// Clears a count, else extra selections, else the primary's anchor.
	pub(crate) fn normal_escape(&mut self) {
		if self.pending.count.take().is_some() {
			return;
		}
		if self.sels.len() > 1 {
			self.sels.clear();
		} else {
			self.sels.primary_mut().set_anchored(false);
		}
	}

	/// Clears a count, else leaves visual mode.
	pub(crate) fn visual_escape(&mut self) {
		if self.pending.count.take().is_none() {
			self.switch_mode(Mode::Normal);
		}
	}
}
