//! Carrying file metadata over to a replacement file.

use std::fs::{File, Metadata};
use std::io;
use std::os::unix::fs::{MetadataExt, fchown};

use rustix::process::{getgid, getuid};
use tracing::debug;

/// Extended attributes holding the POSIX ACL and the SELinux context.
#[cfg(any(target_os = "linux", target_os = "android"))]
const PRESERVED_XATTRS: &[&str] = &["system.posix_acl_access", "security.selinux"];

/// Copies permissions, access control and ownership of `old` to `new`.
///
/// Ownership is only changed where it differs from the current process.
pub(crate) fn preserve(old: &File, meta: &Metadata, new: &File) -> Result<(), (&'static str, io::Error)> {
	new.set_permissions(meta.permissions()).map_err(|e| ("fchmod", e))?;
	preserve_xattrs(old, new).map_err(|e| ("xattr", e))?;
	if meta.uid() != getuid().as_raw() {
		fchown(new, Some(meta.uid()), None).map_err(|e| ("fchown", e))?;
	}
	if meta.gid() != getgid().as_raw() {
		fchown(new, None, Some(meta.gid())).map_err(|e| ("fchgrp", e))?;
	}
	Ok(())
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn preserve_xattrs(old: &File, new: &File) -> io::Result<()> {
	use rustix::fs::{XattrFlags, fgetxattr, fsetxattr};
	use rustix::io::Errno;

	let unsupported = |e: Errno| e == Errno::NODATA || e == Errno::NOTSUP;
	for &name in PRESERVED_XATTRS {
		let mut empty: [u8; 0] = [];
		let len = match fgetxattr(old, name, &mut empty[..]) {
			Ok(len) => len,
			Err(e) if unsupported(e) => continue,
			Err(e) => return Err(e.into()),
		};
		let mut value = vec![0u8; len];
		let len = match fgetxattr(old, name, &mut value[..]) {
			Ok(len) => len,
			Err(e) if unsupported(e) => continue,
			Err(e) => return Err(e.into()),
		};
		match fsetxattr(new, name, &value[..len], XattrFlags::empty()) {
			Ok(()) => debug!(name, len, "preserved xattr"),
			Err(e) if unsupported(e) => {}
			Err(e) => return Err(e.into()),
		}
	}
	Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn preserve_xattrs(_old: &File, _new: &File) -> io::Result<()> {
	Ok(())
}
