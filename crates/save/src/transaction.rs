use std::ffi::OsString;
use std::fs::{self, File, Metadata, OpenOptions, Permissions};
use std::io;
use std::os::unix::fs::{MetadataExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use rustix::io::Errno;
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use vix_primitives::{Filerange, Identity};

use crate::error::SaveError;
use crate::metadata;
use crate::source::SaveSource;

/// How a file gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMethod {
	/// Atomic if possible, in-place otherwise.
	#[default]
	Auto,
	/// Temporary file renamed over the destination.
	Atomic,
	/// Truncate and overwrite the destination.
	InPlace,
}

#[derive(Debug)]
enum Target {
	Atomic(NamedTempFile),
	InPlace(File),
}

/// An open save. Ends with [`commit`](Self::commit) or
/// [`cancel`](Self::cancel); dropping it cancels.
pub struct SaveTransaction<'a, S: SaveSource + ?Sized> {
	source: &'a mut S,
	path: PathBuf,
	target: Target,
}

impl<'a, S: SaveSource + ?Sized> SaveTransaction<'a, S> {
	/// Prepares to save `source` to `path`.
	///
	/// With [`SaveMethod::Auto`] a failed atomic setup falls back to the
	/// in-place strategy, except on a full device.
	pub fn begin(source: &'a mut S, path: impl AsRef<Path>, method: SaveMethod) -> Result<Self, SaveError> {
		let path = path.as_ref();
		if path.as_os_str().is_empty() {
			return Err(SaveError::NoFilename);
		}

		if matches!(method, SaveMethod::Auto | SaveMethod::Atomic) {
			match begin_atomic(path) {
				Ok(tmp) => {
					debug!(path = %path.display(), tmp = %tmp.path().display(), "atomic save");
					return Ok(Self {
						source,
						path: path.to_path_buf(),
						target: Target::Atomic(tmp),
					});
				}
				Err(SaveError::DiskFull) => return Err(SaveError::DiskFull),
				Err(e) if method == SaveMethod::Atomic => return Err(e),
				Err(e) => debug!(path = %path.display(), error = %e, "atomic save unavailable, writing in place"),
			}
		}

		let file = begin_in_place(&mut *source, path)?;
		debug!(path = %path.display(), "in-place save");
		Ok(Self {
			source,
			path: path.to_path_buf(),
			target: Target::InPlace(file),
		})
	}

	/// Returns true if the atomic strategy was chosen.
	pub fn is_atomic(&self) -> bool {
		matches!(self.target, Target::Atomic(_))
	}

	/// Path of the file being written: the temporary file for atomic saves.
	pub fn write_path(&self) -> &Path {
		match &self.target {
			Target::Atomic(tmp) => tmp.path(),
			Target::InPlace(_) => &self.path,
		}
	}

	/// Appends the bytes of `range` to the file.
	pub fn write_range(&mut self, range: Filerange) -> Result<usize, SaveError> {
		let (file, path) = match &mut self.target {
			Target::Atomic(tmp) => {
				let path = tmp.path().to_path_buf();
				(tmp.as_file_mut(), path)
			}
			Target::InPlace(file) => (file, self.path.clone()),
		};
		self.source.write_range(range, file).map_err(|e| SaveError::io("write", &path, e))
	}

	/// Flushes the data to disk and puts it in place.
	///
	/// Returns the metadata of the saved file, which is also handed to
	/// [`SaveSource::saved`].
	pub fn commit(self) -> Result<Metadata, SaveError> {
		let Self { source, path, target } = self;
		let meta = match target {
			Target::Atomic(tmp) => {
				let tmp_path = tmp.path().to_path_buf();
				tmp.as_file().sync_all().map_err(|e| SaveError::io("fsync", &tmp_path, e))?;
				let meta = tmp.as_file().metadata().map_err(|e| SaveError::io("fstat", &tmp_path, e))?;
				tmp.persist(&path).map_err(|e| SaveError::io("rename", &path, e.error))?;
				sync_dir(&path)?;
				meta
			}
			Target::InPlace(file) => {
				file.sync_all().map_err(|e| SaveError::io("fsync", &path, e))?;
				file.metadata().map_err(|e| SaveError::io("fstat", &path, e))?
			}
		};
		source.saved(&meta);
		debug!(path = %path.display(), size = meta.len(), "saved");
		Ok(meta)
	}

	/// Abandons the save, removing the temporary file of an atomic save.
	///
	/// An in-place save has already truncated the destination.
	pub fn cancel(self) {
		match self.target {
			Target::Atomic(tmp) => {
				let tmp_path = tmp.path().to_path_buf();
				if let Err(e) = tmp.close() {
					warn!(tmp = %tmp_path.display(), error = %e, "failed to remove temporary file");
				}
			}
			Target::InPlace(file) => drop(file),
		}
		debug!(path = %self.path.display(), "save cancelled");
	}
}

fn parent_dir(path: &Path) -> &Path {
	match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir,
		_ => Path::new("."),
	}
}

/// Creates `.<name>.vis.XXXXXX` next to `path` carrying the metadata of the
/// existing file, if any.
fn begin_atomic(path: &Path) -> Result<NamedTempFile, SaveError> {
	let old = match File::open(path) {
		Ok(file) => Some(file),
		Err(e) if e.kind() == io::ErrorKind::NotFound => None,
		Err(e) => return Err(SaveError::io("open", path, e)),
	};
	let old = match old {
		Some(file) => {
			let meta = fs::symlink_metadata(path).map_err(|e| SaveError::io("lstat", path, e))?;
			if meta.file_type().is_symlink() {
				return Err(SaveError::SymbolicLink(path.to_path_buf()));
			}
			if meta.nlink() > 1 {
				return Err(SaveError::HardLink(path.to_path_buf()));
			}
			Some((file, meta))
		}
		None => None,
	};

	let name = path.file_name().ok_or(SaveError::NoFilename)?;
	let mut prefix = OsString::from(".");
	prefix.push(name);
	prefix.push(".vis.");
	let dir = parent_dir(path);
	let tmp = tempfile::Builder::new()
		.prefix(&prefix)
		.rand_bytes(6)
		.permissions(Permissions::from_mode(0o666))
		.tempfile_in(dir)
		.map_err(|e| SaveError::io("create", dir, e))?;

	if let Some((file, meta)) = old {
		metadata::preserve(&file, &meta, tmp.as_file()).map_err(|(op, e)| SaveError::io(op, tmp.path(), e))?;
	}
	Ok(tmp)
}

/// Opens `path` for overwriting, detaching the source from it first if the
/// source still reads from the same file.
fn begin_in_place<S: SaveSource + ?Sized>(source: &mut S, path: &Path) -> Result<File, SaveError> {
	let file = OpenOptions::new()
		.write(true)
		.create(true)
		.truncate(false)
		.mode(0o666)
		.open(path)
		.map_err(|e| SaveError::io("open", path, e))?;
	let meta = file.metadata().map_err(|e| SaveError::io("fstat", path, e))?;
	if source.backing() == Some(Identity::of(&meta)) {
		debug!(path = %path.display(), "detaching text from file before truncation");
		source.detach_backing().map_err(|e| SaveError::io("detach", path, e))?;
	}
	file.set_len(0).map_err(|e| SaveError::io("truncate", path, e))?;
	Ok(file)
}

/// Makes the rename durable. Filesystems that cannot sync directories are
/// tolerated.
fn sync_dir(path: &Path) -> Result<(), SaveError> {
	let dir_path = parent_dir(path);
	let dir = File::open(dir_path).map_err(|e| SaveError::io("open", dir_path, e))?;
	match rustix::fs::fsync(&dir) {
		Ok(()) => Ok(()),
		Err(e) if e == Errno::INVAL || e == Errno::NOTSUP => {
			warn!(dir = %dir_path.display(), error = %e, "directory fsync unsupported");
			Ok(())
		}
		Err(e) => Err(SaveError::io("fsync", dir_path, e.into())),
	}
}

/// Saves all of `source` to `path` in one transaction.
pub fn save<S: SaveSource + ?Sized>(source: &mut S, path: impl AsRef<Path>, method: SaveMethod) -> Result<Metadata, SaveError> {
	let mut tx = SaveTransaction::begin(source, path, method)?;
	let expected = tx.source.size();
	let written = tx.write_range(Filerange::new(0, expected))?;
	if written != expected {
		tx.cancel();
		return Err(SaveError::ShortWrite { expected, written });
	}
	tx.commit()
}
