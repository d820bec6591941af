//! Modal key dispatch for a vi-like editor.
//!
//! An [`Editor`] owns one text behind the [`TextEngine`] interface, the
//! selections on it and the state of the command being typed. Keys fed to
//! it are matched against the binding tree of the current mode ([`Keymap`])
//! and run [actions](action) that move selections, apply operators, switch
//! modes and record or replay macros.
//!
//! ```ignore
//! let mut editor = Editor::new(Box::new(RopeText::new("one two three")));
//! editor.feed(b"2dw")?;
//! assert_eq!(editor.contents(), "three");
//! ```
//!
//! [`TextEngine`]: vix_primitives::TextEngine

pub mod action;
pub mod config;
mod editor;
pub mod error;
pub mod keymap;
pub mod register;

pub use config::{Config, Options};
pub use editor::{COUNT_MAX, Editor, Operator, Status, Target};
pub use error::{ConfigError, DispatchError};
pub use keymap::{Binding, Keymap};
pub use register::{Register, RegisterId, Registers};
