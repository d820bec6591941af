use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reasons a save transaction fails.
#[derive(Debug, Error)]
pub enum SaveError {
	#[error("no file name")]
	NoFilename,
	/// The atomic strategy would replace the link instead of its target.
	#[error("{} is a symbolic link", .0.display())]
	SymbolicLink(PathBuf),
	/// The atomic strategy would detach the other links.
	#[error("{} has more than one hard link", .0.display())]
	HardLink(PathBuf),
	#[error("{op} {}: {source}", .path.display())]
	Io {
		op: &'static str,
		path: PathBuf,
		source: io::Error,
	},
	/// The device is full; no fallback strategy is attempted.
	#[error("no space left on device")]
	DiskFull,
	#[error("short write: {written} of {expected} bytes")]
	ShortWrite { expected: usize, written: usize },
}

impl SaveError {
	/// Wraps an I/O failure, singling out a full device.
	pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
		if source.kind() == io::ErrorKind::StorageFull {
			return Self::DiskFull;
		}
		Self::Io {
			op,
			path: path.to_path_buf(),
			source,
		}
	}
}
