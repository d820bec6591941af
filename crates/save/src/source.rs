use std::fs::Metadata;
use std::io::{self, Write};

use vix_primitives::{Filerange, Identity, TextEngine};

/// What a save transaction needs from the text being saved.
pub trait SaveSource {
	/// Total size in bytes.
	fn size(&self) -> usize;

	/// Writes the bytes of `range` to `out`, returning how many were written.
	fn write_range(&self, range: Filerange, out: &mut dyn Write) -> io::Result<usize>;

	/// Identity of a file whose bytes the text still reads from.
	fn backing(&self) -> Option<Identity>;

	/// Stops reading from the backing file before it gets truncated.
	fn detach_backing(&mut self) -> io::Result<()>;

	/// Records the metadata of the file after a successful save.
	fn saved(&mut self, meta: &Metadata);
}

impl<T: TextEngine + ?Sized> SaveSource for T {
	fn size(&self) -> usize {
		TextEngine::size(self)
	}

	fn write_range(&self, range: Filerange, out: &mut dyn Write) -> io::Result<usize> {
		TextEngine::write_range(self, range, out)
	}

	fn backing(&self) -> Option<Identity> {
		TextEngine::backing(self)
	}

	fn detach_backing(&mut self) -> io::Result<()> {
		TextEngine::detach_backing(self)
	}

	fn saved(&mut self, meta: &Metadata) {
		TextEngine::saved(self, meta)
	}
}
