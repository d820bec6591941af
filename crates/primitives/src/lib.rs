//! Core types for editing: byte ranges, selection sets, marks and modes.
//!
//! Everything here is addressed in bytes. Text storage itself is behind the
//! [`TextEngine`] trait; [`RopeText`] is the in-memory implementation used by
//! the editor and its tests.

/// Per-buffer named selection snapshots.
pub mod marks;
/// Editor mode definitions.
pub mod mode;
/// Motion and text object geometry.
pub mod movement;
/// Half-open byte ranges.
pub mod range;
/// Set algebra over sorted range lists.
pub mod ranges;
/// Selections and the ordered selection set of a view.
pub mod selection;
/// The text engine collaborator interface.
pub mod text;

pub use marks::{Mark, Marks};
pub use mode::Mode;
pub use movement::{Motion, MotionKind, TextObject};
pub use range::Filerange;
pub use selection::{Selection, SelectionId, SelectionSet};
pub use text::{Identity, RopeText, TextEngine, TextError};
