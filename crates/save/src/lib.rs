//! Saving text to disk.
//!
//! A save is a transaction: [`SaveTransaction::begin`] picks a strategy and
//! prepares the destination, [`SaveTransaction::write_range`] streams bytes
//! from the text, and exactly one of [`SaveTransaction::commit`] or
//! [`SaveTransaction::cancel`] ends it. Dropping an unfinished transaction
//! cancels it.
//!
//! The atomic strategy writes a temporary file next to the destination and
//! renames it into place, so the original is untouched until the rename.
//! The in-place strategy truncates and rewrites the destination itself; it
//! preserves hard links but an interrupted write loses data.

mod error;
mod metadata;
mod source;
mod transaction;

pub use error::SaveError;
pub use source::SaveSource;
pub use transaction::{SaveMethod, SaveTransaction, save};
