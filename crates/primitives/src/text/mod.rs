//! The text engine collaborator.
//!
//! The editor core never owns text storage directly. It talks to a
//! [`TextEngine`]: byte-range reads and edits, line lookups, undo snapshots,
//! and the backing-file identity needed by in-place saves.

use std::{fs, io};

use thiserror::Error;

use crate::range::Filerange;

mod rope;

pub use rope::RopeText;

/// Errors raised by text engine edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
	/// The position lies past the end of the text.
	#[error("position {pos} is out of bounds for a text of {size} bytes")]
	OutOfBounds { pos: usize, size: usize },
	/// The position splits a multi-byte character.
	#[error("position {0} is not on a character boundary")]
	NotCharBoundary(usize),
	/// Inserted bytes are not valid UTF-8.
	#[error("bytes inserted at {0} are not valid UTF-8")]
	InvalidUtf8(usize),
}

/// Device and inode of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
	pub dev: u64,
	pub ino: u64,
}

impl Identity {
	/// Reads the identity from file metadata.
	#[cfg(unix)]
	pub fn of(meta: &fs::Metadata) -> Self {
		use std::os::unix::fs::MetadataExt;
		Self {
			dev: meta.dev(),
			ino: meta.ino(),
		}
	}
}

#[inline]
pub(crate) fn is_continuation(b: u8) -> bool {
	b & 0xC0 == 0x80
}

/// Byte-addressed text storage with undo history.
///
/// Only the storage primitives are required; navigation helpers have
/// default implementations in terms of [`TextEngine::byte_at`] that engines
/// with a line index may override.
pub trait TextEngine {
	/// Total size in bytes.
	fn size(&self) -> usize;

	/// Returns the byte at `pos`, or `None` past the end.
	fn byte_at(&self, pos: usize) -> Option<u8>;

	/// Copies the bytes of `range`, clamped to the text size.
	fn bytes(&self, range: Filerange) -> Vec<u8>;

	/// Inserts `data` at `pos`.
	fn insert(&mut self, pos: usize, data: &[u8]) -> Result<(), TextError>;

	/// Removes the bytes of `range`.
	fn delete(&mut self, range: Filerange) -> Result<(), TextError>;

	/// Closes the current undo step if anything changed since the last one.
	fn snapshot(&mut self);

	/// Reverts the last undo step, returning the position it touched.
	fn undo(&mut self) -> Option<usize>;

	/// Re-applies the last reverted step, returning the position it touched.
	fn redo(&mut self) -> Option<usize>;

	/// Identity of the file whose bytes back the live text, if any.
	fn backing(&self) -> Option<Identity> {
		None
	}

	/// Moves the live text off its backing file.
	///
	/// Called before that file is truncated by an in-place save.
	fn detach_backing(&mut self) -> io::Result<()> {
		Ok(())
	}

	/// Records the metadata of the file the text was just saved to.
	fn saved(&mut self, _meta: &fs::Metadata) {}

	/// Writes the bytes of `range` to `out`, returning how many were written.
	fn write_range(&self, range: Filerange, out: &mut dyn io::Write) -> io::Result<usize> {
		let data = self.bytes(range);
		out.write_all(&data)?;
		Ok(data.len())
	}

	/// Start of the character after the one at `pos`.
	fn char_next(&self, pos: usize) -> usize {
		let size = self.size();
		if pos >= size {
			return size;
		}
		let mut p = pos + 1;
		while self.byte_at(p).is_some_and(is_continuation) {
			p += 1;
		}
		p
	}

	/// Start of the character before `pos`.
	fn char_prev(&self, pos: usize) -> usize {
		if pos == 0 {
			return 0;
		}
		let mut p = pos.min(self.size()) - 1;
		while p > 0 && self.byte_at(p).is_some_and(is_continuation) {
			p -= 1;
		}
		p
	}

	/// Decodes the character starting at `pos`.
	fn char_at(&self, pos: usize) -> Option<char> {
		let end = self.char_next(pos);
		if end <= pos {
			return None;
		}
		let data = self.bytes(Filerange::new(pos, end));
		std::str::from_utf8(&data).ok().and_then(|s| s.chars().next())
	}

	/// Start of the line containing `pos`.
	fn line_begin(&self, pos: usize) -> usize {
		let mut p = pos.min(self.size());
		while p > 0 && self.byte_at(p - 1) != Some(b'\n') {
			p -= 1;
		}
		p
	}

	/// Position of the newline ending the line at `pos`, or the text size.
	fn line_end(&self, pos: usize) -> usize {
		let size = self.size();
		let mut p = pos.min(size);
		while p < size && self.byte_at(p) != Some(b'\n') {
			p += 1;
		}
		p
	}

	/// Start of the line after the one at `pos`, or the text size.
	fn line_next(&self, pos: usize) -> usize {
		let end = self.line_end(pos);
		if end < self.size() { end + 1 } else { end }
	}

	/// Start of the line before the one at `pos`, or 0.
	fn line_prev(&self, pos: usize) -> usize {
		let begin = self.line_begin(pos);
		if begin == 0 { 0 } else { self.line_begin(begin - 1) }
	}

	/// Number of lines; a trailing newline does not open another one.
	fn line_count(&self) -> usize {
		let size = self.size();
		let newlines = (0..size).filter(|&p| self.byte_at(p) == Some(b'\n')).count();
		if size > 0 && self.byte_at(size - 1) != Some(b'\n') {
			newlines + 1
		} else {
			newlines.max(1)
		}
	}

	/// One-based line number of `pos`.
	fn lineno(&self, pos: usize) -> usize {
		let pos = pos.min(self.size());
		1 + (0..pos).filter(|&p| self.byte_at(p) == Some(b'\n')).count()
	}

	/// Start of line `lineno` (one-based), clamped to the existing lines.
	fn pos_by_lineno(&self, lineno: usize) -> usize {
		let target = lineno.clamp(1, self.line_count());
		let mut pos = 0;
		for _ in 1..target {
			pos = self.line_next(pos);
		}
		pos
	}

	/// First occurrence of `needle` starting at or after `from`.
	fn find_next(&self, from: usize, needle: &[u8]) -> Option<usize> {
		if needle.is_empty() {
			return None;
		}
		let hay = self.bytes(Filerange::new(0, self.size()));
		let from = from.min(hay.len());
		hay[from..].windows(needle.len()).position(|w| w == needle).map(|i| i + from)
	}

	/// Last occurrence of `needle` starting before `before`.
	fn find_prev(&self, before: usize, needle: &[u8]) -> Option<usize> {
		if needle.is_empty() {
			return None;
		}
		let hay = self.bytes(Filerange::new(0, self.size()));
		let limit = (before.min(hay.len()) + needle.len() - 1).min(hay.len());
		hay[..limit].windows(needle.len()).rposition(|w| w == needle)
	}
}
