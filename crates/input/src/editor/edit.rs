//! Text edits that keep selections and marks in step with the text.

use tracing::debug;
use vix_primitives::movement::display_column;
use vix_primitives::{Filerange, Mode, Selection, SelectionId, TextEngine, TextError};

use super::Editor;

impl Editor {
	/// Inserts `data` at `pos`, returning the number of bytes added.
	pub(crate) fn insert(&mut self, pos: usize, data: &[u8]) -> Result<usize, TextError> {
		let before = self.text.size();
		self.text.insert(pos, data)?;
		let len = self.text.size() - before;
		self.sels.adjust_insert(pos, len);
		self.marks.adjust_insert(pos, len);
		Ok(len)
	}

	pub(crate) fn delete(&mut self, range: Filerange) -> Result<(), TextError> {
		if range.is_empty() {
			return Ok(());
		}
		self.text.delete(range)?;
		self.sels.adjust_delete(range);
		self.marks.adjust_delete(range);
		Ok(())
	}

	/// Reduces one selection to a cursor at `pos`.
	pub(crate) fn place(&mut self, id: SelectionId, pos: usize) {
		if let Some(sel) = self.sels.get_mut(id) {
			sel.collapse();
			sel.move_to(pos);
		}
	}

	/// Inserts text at every cursor, last cursor first.
	///
	/// `data` computes the bytes for each cursor position. In replace mode
	/// the character under the cursor is overwritten unless it ends a line.
	pub(crate) fn insert_at_cursors(&mut self, mut data: impl FnMut(&dyn TextEngine, usize) -> Vec<u8>) -> Result<(), TextError> {
		let replace = self.mode == Mode::Replace;
		for id in self.sels.ids().into_iter().rev() {
			let Some(pos) = self.sels.get(id).map(Selection::cursor) else {
				continue;
			};
			let bytes = data(&*self.text, pos);
			if replace
				&& bytes != b"\n"
				&& let Some(b) = self.text.byte_at(pos)
				&& b != b'\n'
			{
				let end = self.text.char_next(pos);
				self.delete(Filerange::new(pos, end))?;
			}
			let len = self.insert(pos, &bytes)?;
			self.place(id, pos + len);
		}
		self.sels.normalize(&*self.text);
		Ok(())
	}

	/// Inserts typed text at every cursor.
	pub(crate) fn type_text(&mut self, data: &[u8]) {
		if let Err(err) = self.insert_at_cursors(|_, _| data.to_vec()) {
			debug!(%err, "insert aborted");
		}
	}

	/// Breaks the line at every cursor, copying the indentation with
	/// `autoindent`.
	pub(crate) fn insert_newline(&mut self) {
		let autoindent = self.options.autoindent;
		let result = self.insert_at_cursors(|text, pos| {
			let mut data = b"\n".to_vec();
			if autoindent {
				let begin = text.line_begin(pos);
				data.extend((begin..pos).map_while(|p| text.byte_at(p).filter(|&b| b == b' ' || b == b'\t')));
			}
			data
		});
		if let Err(err) = result {
			debug!(%err, "newline aborted");
		}
	}

	/// Inserts a tab, or spaces up to the next tab stop with `expandtab`.
	pub(crate) fn insert_tab(&mut self) {
		let tabwidth = self.options.tabwidth.max(1);
		let expandtab = self.options.expandtab;
		let result = self.insert_at_cursors(|text, pos| {
			if expandtab {
				let col = display_column(text, pos, tabwidth);
				vec![b' '; tabwidth - col % tabwidth]
			} else {
				b"\t".to_vec()
			}
		});
		if let Err(err) = result {
			debug!(%err, "tab aborted");
		}
	}

	/// Steps the undo history back, or forward with `redo`.
	pub(crate) fn undo(&mut self, redo: bool) {
		let pos = if redo { self.text.redo() } else { self.text.undo() };
		let Some(pos) = pos else {
			return;
		};
		if self.sels.len() == 1 {
			let primary = self.sels.primary_id();
			self.place(primary, pos);
		}
		let size = self.text.size();
		for id in self.sels.ids() {
			let Some(cursor) = self.sels.get(id).map(Selection::cursor) else {
				continue;
			};
			let clamped = if cursor >= size {
				size
			} else {
				self.text.char_prev(self.text.char_next(cursor))
			};
			self.place(id, clamped);
		}
		self.sels.normalize(&*self.text);
	}
}
