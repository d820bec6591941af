use std::path::Path;
use std::{fs, io};

use ropey::Rope;
use tracing::debug;

use super::{Identity, TextEngine, TextError};
use crate::range::Filerange;

/// One undo step: the text after it and the first position it touched.
#[derive(Debug, Clone)]
struct Revision {
	rope: Rope,
	pos: usize,
}

/// In-memory [`TextEngine`] backed by a [`Rope`].
///
/// Rope clones share structure, so each undo step is a cheap snapshot of the
/// whole text. Only valid UTF-8 is stored: loading or inserting anything
/// else fails and leaves the text as it was.
#[derive(Debug, Clone)]
pub struct RopeText {
	rope: Rope,
	history: Vec<Revision>,
	current: usize,
	/// Lowest position edited since the last snapshot.
	dirty: Option<usize>,
	backing: Option<Identity>,
	saved: Option<fs::Metadata>,
	/// History index written out by the last save, if still reachable.
	saved_revision: Option<usize>,
}

impl Default for RopeText {
	fn default() -> Self {
		Self::new("")
	}
}

impl RopeText {
	/// Creates a text holding `content`.
	pub fn new(content: &str) -> Self {
		let rope = Rope::from_str(content);
		Self {
			history: vec![Revision { rope: rope.clone(), pos: 0 }],
			rope,
			current: 0,
			dirty: None,
			backing: None,
			saved: None,
			saved_revision: Some(0),
		}
	}

	/// Reads `path`, remembering its identity as the backing file.
	///
	/// A file that is not valid UTF-8 fails with [`io::ErrorKind::InvalidData`].
	#[cfg(unix)]
	pub fn load(path: &Path) -> io::Result<Self> {
		let data = fs::read(path)?;
		let meta = fs::metadata(path)?;
		let content = String::from_utf8(data).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
		let mut text = Self::new(&content);
		text.backing = Some(Identity::of(&meta));
		text.saved = Some(meta);
		Ok(text)
	}

	/// Returns the underlying rope.
	pub fn rope(&self) -> &Rope {
		&self.rope
	}

	/// Returns the whole text as a string.
	pub fn contents(&self) -> String {
		self.rope.to_string()
	}

	/// Metadata recorded by the last successful save or load.
	pub fn saved_metadata(&self) -> Option<&fs::Metadata> {
		self.saved.as_ref()
	}

	/// Returns true if the text differs from what was last loaded or saved.
	pub fn is_modified(&self) -> bool {
		self.dirty.is_some() || self.saved_revision != Some(self.current)
	}

	fn check(&self, pos: usize) -> Result<usize, TextError> {
		let size = self.rope.len_bytes();
		if pos > size {
			return Err(TextError::OutOfBounds { pos, size });
		}
		let idx = self.rope.byte_to_char(pos);
		if self.rope.char_to_byte(idx) != pos {
			return Err(TextError::NotCharBoundary(pos));
		}
		Ok(idx)
	}

	fn touch(&mut self, pos: usize) {
		self.dirty = Some(self.dirty.map_or(pos, |d| d.min(pos)));
	}

	fn restore(&mut self, index: usize) {
		self.current = index;
		self.rope = self.history[index].rope.clone();
		self.dirty = None;
	}
}

impl TextEngine for RopeText {
	fn size(&self) -> usize {
		self.rope.len_bytes()
	}

	fn byte_at(&self, pos: usize) -> Option<u8> {
		self.rope.get_byte(pos)
	}

	fn bytes(&self, range: Filerange) -> Vec<u8> {
		let range = range.clamp(self.rope.len_bytes());
		self.rope.bytes_at(range.start).take(range.len()).collect()
	}

	fn insert(&mut self, pos: usize, data: &[u8]) -> Result<(), TextError> {
		let idx = self.check(pos)?;
		if data.is_empty() {
			return Ok(());
		}
		let data = std::str::from_utf8(data).map_err(|_| TextError::InvalidUtf8(pos))?;
		self.rope.insert(idx, data);
		self.touch(pos);
		Ok(())
	}

	fn delete(&mut self, range: Filerange) -> Result<(), TextError> {
		let start = self.check(range.start)?;
		let end = self.check(range.end)?;
		if start == end {
			return Ok(());
		}
		self.rope.remove(start..end);
		self.touch(range.start);
		Ok(())
	}

	fn snapshot(&mut self) {
		let Some(pos) = self.dirty.take() else {
			return;
		};
		self.history.truncate(self.current + 1);
		if self.saved_revision.is_some_and(|r| r > self.current) {
			self.saved_revision = None;
		}
		self.history.push(Revision {
			rope: self.rope.clone(),
			pos,
		});
		self.current += 1;
	}

	fn undo(&mut self) -> Option<usize> {
		self.snapshot();
		if self.current == 0 {
			return None;
		}
		let pos = self.history[self.current].pos;
		self.restore(self.current - 1);
		debug!(revision = self.current, pos, "undo");
		Some(pos.min(self.size()))
	}

	fn redo(&mut self) -> Option<usize> {
		self.snapshot();
		if self.current + 1 >= self.history.len() {
			return None;
		}
		self.restore(self.current + 1);
		let pos = self.history[self.current].pos;
		debug!(revision = self.current, pos, "redo");
		Some(pos.min(self.size()))
	}

	fn backing(&self) -> Option<Identity> {
		self.backing
	}

	fn detach_backing(&mut self) -> io::Result<()> {
		// The rope already owns its bytes; only the association is dropped.
		self.backing = None;
		Ok(())
	}

	fn saved(&mut self, meta: &fs::Metadata) {
		self.snapshot();
		self.saved_revision = Some(self.current);
		self.saved = Some(meta.clone());
	}

	fn line_begin(&self, pos: usize) -> usize {
		let pos = pos.min(self.rope.len_bytes());
		self.rope.line_to_byte(self.rope.byte_to_line(pos))
	}

	fn line_count(&self) -> usize {
		let size = self.rope.len_bytes();
		let lines = self.rope.len_lines();
		if size > 0 && self.rope.byte(size - 1) == b'\n' { lines - 1 } else { lines }
	}

	fn lineno(&self, pos: usize) -> usize {
		self.rope.byte_to_line(pos.min(self.rope.len_bytes())) + 1
	}

	fn pos_by_lineno(&self, lineno: usize) -> usize {
		let target = lineno.clamp(1, self.line_count());
		self.rope.line_to_byte(target - 1)
	}
}
