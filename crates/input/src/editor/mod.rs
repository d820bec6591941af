//! The editor: one text, its selections and the modal dispatch state.
//!
//! Keys enter through [`Editor::feed`]. They are split into tokens and
//! queued; the queue is matched against the binding tree of the current
//! mode. An alias binding is substituted into the queue and matched again,
//! an action binding runs with the keys after the match and reports how
//! many of them it used. A command that needs keys not typed yet leaves
//! them queued and [`Status::NeedMore`] is returned.

mod edit;
mod macros;
mod mode;
mod operator;
mod pending;

#[cfg(test)]
mod tests;

use std::fs::Metadata;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub(crate) use macros::Recording;
pub use operator::{Operator, Target};
pub(crate) use operator::Repeat;
pub use pending::COUNT_MAX;
pub(crate) use pending::{Pending, PendingOperator};
use tracing::{trace, warn};
use vix_keymap_parser::{Token, next_len, tokens, unfinished_len};
use vix_primitives::{Filerange, Mark, Marks, Mode, Motion, Selection, SelectionSet, TextEngine};
use vix_save::SaveMethod;

use crate::action::{self, KeyAction, Keys};
use crate::config::Options;
use crate::error::DispatchError;
use crate::keymap::{Binding, Keymap, MatchResult};
use crate::register::{RegisterId, Registers};

/// Whether all fed keys were used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	Done,
	/// Keys are queued waiting for the rest of a command.
	NeedMore,
}

enum Step {
	Progress,
	Blocked,
}

/// A modal editor over one text.
pub struct Editor {
	pub(crate) keymap: Arc<Keymap>,
	pub(crate) options: Options,
	pub(crate) text: Box<dyn TextEngine>,
	pub(crate) sels: SelectionSet,
	pub(crate) marks: Marks,
	pub(crate) registers: Registers,
	pub(crate) mode: Mode,
	pub(crate) pending: Pending,
	/// Keys waiting to be dispatched.
	queue: Vec<u8>,
	/// Unfinished key notation or UTF-8 sequence whose remaining bytes were
	/// not fed yet.
	held: Vec<u8>,
	/// When the queue last blocked on an ambiguous binding.
	pending_since: Option<Instant>,
	pub(crate) recording: Option<Recording>,
	pub(crate) last_replayed: Option<RegisterId>,
	pub(crate) last_find: Option<Motion>,
	/// Sticky word mode of match-next.
	pub(crate) match_word: bool,
	pub(crate) repeat: Option<Repeat>,
	/// Keys typed in insert mode are added to the repeat record.
	pub(crate) capturing: bool,
	/// A repeat is being replayed.
	pub(crate) replaying: bool,
}

impl Editor {
	/// Creates an editor with the default bindings and options.
	pub fn new(text: Box<dyn TextEngine>) -> Self {
		Self::with_config(Arc::new(Keymap::default()), Options::default(), text)
	}

	pub fn with_config(keymap: Arc<Keymap>, options: Options, text: Box<dyn TextEngine>) -> Self {
		Self {
			keymap,
			options,
			text,
			sels: SelectionSet::new(Selection::new(0)),
			marks: Marks::default(),
			registers: Registers::default(),
			mode: Mode::Normal,
			pending: Pending::default(),
			queue: Vec::new(),
			held: Vec::new(),
			pending_since: None,
			recording: None,
			last_replayed: None,
			last_find: None,
			match_word: false,
			repeat: None,
			capturing: false,
			replaying: false,
		}
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	pub fn selections(&self) -> &SelectionSet {
		&self.sels
	}

	/// Ranges of all selections in position order.
	pub fn selection_ranges(&self) -> Vec<Filerange> {
		self.sels.ranges(&*self.text)
	}

	/// Cursor positions in selection order.
	pub fn cursors(&self) -> Vec<usize> {
		self.sels.iter().map(|(_, s)| s.cursor()).collect()
	}

	/// Replaces the selections with ones covering `ranges`.
	///
	/// Returns false, changing nothing, if `ranges` is empty.
	pub fn set_selections(&mut self, ranges: &[Filerange]) -> bool {
		let size = self.text.size();
		let ranges: Vec<_> = ranges.iter().map(|r| r.clamp(size)).collect();
		self.sels.set_ranges(&*self.text, &ranges, self.mode.is_visual())
	}

	pub fn text(&self) -> &dyn TextEngine {
		&*self.text
	}

	/// The whole text, with invalid UTF-8 replaced.
	pub fn contents(&self) -> String {
		let data = self.text.bytes(Filerange::new(0, self.text.size()));
		String::from_utf8_lossy(&data).into_owned()
	}

	pub fn marks(&self) -> &Marks {
		&self.marks
	}

	pub fn mark_set(&mut self, mark: Mark, ranges: &[Filerange]) {
		self.marks.set(mark, ranges);
	}

	pub fn mark_get(&self, mark: Mark) -> &[Filerange] {
		self.marks.get(mark)
	}

	pub fn registers(&self) -> &Registers {
		&self.registers
	}

	/// Fills register `name` with `data`. Returns false for an invalid name.
	pub fn set_register(&mut self, name: u8, data: &[u8]) -> bool {
		match RegisterId::from_byte(name) {
			Some((id, _)) => {
				self.registers.set(id, data);
				true
			}
			None => false,
		}
	}

	/// Returns true while a macro is being recorded.
	pub fn is_recording(&self) -> bool {
		self.recording.is_some()
	}

	/// Keys queued for an incomplete command.
	pub fn pending_keys(&self) -> &[u8] {
		&self.queue
	}

	/// Dispatches `keys`.
	///
	/// Keys may arrive one byte at a time. An incomplete UTF-8 sequence at
	/// the end is held back until the rest arrives, and so is an unclosed
	/// `<...` that can still become key notation such as `<Escape>`. A lone
	/// trailing `<` is dispatched as a key of its own. [`Editor::flush`]
	/// releases held bytes as they are.
	pub fn feed(&mut self, keys: &[u8]) -> Result<Status, DispatchError> {
		let mut input = std::mem::take(&mut self.held);
		input.extend_from_slice(keys);
		let complete = input.len() - incomplete_tail(&input);
		let cut = complete - unfinished_len(&input[..complete]);
		self.held = input.split_off(cut);

		self.dispatch(&input)?;
		if !self.held.is_empty() {
			self.pending_since.get_or_insert_with(Instant::now);
		}
		Ok(self.status())
	}

	/// Resolves an ambiguous key sequence to its longest complete binding
	/// once the configured timeout has passed since it blocked.
	pub fn tick(&mut self, now: Instant) -> Result<Status, DispatchError> {
		let (Some(timeout), Some(since)) = (self.options.pending_timeout(), self.pending_since) else {
			return Ok(self.status());
		};
		if now.saturating_duration_since(since) < timeout {
			return Ok(self.status());
		}
		self.flush()
	}

	/// Resolves ambiguous key sequences right away.
	///
	/// A sequence without any complete binding is dropped like an unbound
	/// key. Actions still waiting for their own arguments keep waiting.
	pub fn flush(&mut self) -> Result<Status, DispatchError> {
		let held = std::mem::take(&mut self.held);
		self.dispatch(&held)?;
		self.process(true)?;
		Ok(self.status())
	}

	/// Writes the text to `path` and records the result on the text.
	pub fn save(&mut self, path: &Path, method: SaveMethod) -> Result<Metadata, DispatchError> {
		self.text.snapshot();
		Ok(vix_save::save(&mut *self.text, path, method)?)
	}

	fn dispatch(&mut self, keys: &[u8]) -> Result<(), DispatchError> {
		for token in tokens(keys) {
			if let Some(recording) = self.recording.as_mut() {
				recording.push(token);
			}
			self.queue.extend_from_slice(token);
			self.process(false)?;
		}
		Ok(())
	}

	fn status(&self) -> Status {
		if self.queue.is_empty() && self.held.is_empty() {
			Status::Done
		} else {
			Status::NeedMore
		}
	}

	fn process(&mut self, force: bool) -> Result<(), DispatchError> {
		let mut queue = std::mem::take(&mut self.queue);
		let result = self.drain(&mut queue, 0, force);
		self.queue = queue;
		if let Err(err) = result {
			self.abort();
			return Err(err);
		}
		if self.queue.is_empty() && self.held.is_empty() {
			self.pending_since = None;
		} else {
			self.pending_since.get_or_insert_with(Instant::now);
		}
		Ok(())
	}

	/// Dispatches `queue` until it is empty or blocks, returning true if it
	/// was emptied.
	pub(crate) fn drain(&mut self, queue: &mut Vec<u8>, depth: usize, force: bool) -> Result<bool, DispatchError> {
		let mut hops = 0;
		while !queue.is_empty() {
			if let Step::Blocked = self.step(queue, depth, force, &mut hops)? {
				return Ok(false);
			}
		}
		Ok(true)
	}

	fn step(&mut self, queue: &mut Vec<u8>, depth: usize, force: bool, hops: &mut usize) -> Result<Step, DispatchError> {
		let keymap = Arc::clone(&self.keymap);
		let found = match keymap.lookup(self.mode, queue) {
			MatchResult::Complete { value, len } => Some((value, len)),
			MatchResult::Partial { longest } if force => longest,
			MatchResult::Partial { .. } => return Ok(Step::Blocked),
			MatchResult::None => None,
		};

		match found {
			Some((Binding::Alias(alias), len)) => {
				*hops += 1;
				if *hops > self.options.alias_depth_max {
					let first = next_len(queue);
					warn!(keys = %String::from_utf8_lossy(&queue[..first]), mode = ?self.mode, "alias expansion limit reached, dropping key");
					queue.drain(..first);
					*hops = 0;
				} else {
					trace!(keys = %String::from_utf8_lossy(&queue[..len]), alias = %String::from_utf8_lossy(alias), "alias");
					queue.splice(..len, alias.iter().copied());
				}
				Ok(Step::Progress)
			}
			Some((Binding::Action(action), len)) => self.run_action(action, queue, len, depth, hops),
			None => {
				let len = next_len(queue);
				if let Some((Token::ActionRef(name), _)) = Token::parse(queue) {
					if let Some(action) = action::find(name) {
						return self.run_action(action, queue, len, depth, hops);
					}
					trace!(action = name, "unknown action");
					queue.drain(..len);
					return Ok(Step::Progress);
				}
				self.unbound(queue, len);
				Ok(Step::Progress)
			}
		}
	}

	fn run_action(
		&mut self,
		action: &'static KeyAction,
		queue: &mut Vec<u8>,
		len: usize,
		depth: usize,
		hops: &mut usize,
	) -> Result<Step, DispatchError> {
		let session = self.in_insert_session();
		trace!(action = action.name, mode = ?self.mode, depth, "action");
		match (action.func)(self, &queue[len..], &action.arg, depth)? {
			Keys::NeedMore => return Ok(Step::Blocked),
			Keys::Consumed(n) => {
				let end = (len + n).min(queue.len());
				self.capture(session, &queue[..end]);
				queue.drain(..end);
			}
			Keys::Inject { consumed, keys } => {
				let end = (len + consumed).min(queue.len());
				self.capture(session, &queue[..end]);
				queue.splice(..end, keys);
			}
		}
		*hops = 0;
		self.settle();
		Ok(Step::Progress)
	}

	/// Handles a key without binding: typed text in insert modes, a
	/// cancelled operator in operator-pending mode, nothing elsewhere.
	fn unbound(&mut self, queue: &mut Vec<u8>, len: usize) {
		let session = self.in_insert_session();
		let span = &queue[..len];
		if self.mode.is_insert() {
			if let Some((token, _)) = Token::parse(span)
				&& let Some(text) = token.text()
			{
				self.type_text(&text);
			}
		} else if self.mode == Mode::OperatorPending {
			self.cancel_operator();
		} else {
			trace!(keys = %String::from_utf8_lossy(span), mode = ?self.mode, "unbound key");
		}
		self.capture(session, &queue[..len]);
		queue.drain(..len);
		self.settle();
	}

	/// Returns true in insert modes and while an operator started from one
	/// is pending.
	fn in_insert_session(&self) -> bool {
		self.mode.is_insert() || self.pending.operator.is_some_and(|p| p.from.is_insert())
	}

	fn capture(&mut self, session: bool, keys: &[u8]) {
		if session
			&& self.capturing
			&& !self.replaying
			&& let Some(repeat) = self.repeat.as_mut()
		{
			repeat.inserted.extend_from_slice(keys);
		}
	}

	/// Closes the undo step of a finished command.
	fn settle(&mut self) {
		if !self.in_insert_session() {
			self.capturing = false;
			self.text.snapshot();
		}
	}

	/// Drops all pending input and state after a failed command.
	fn abort(&mut self) {
		self.queue.clear();
		self.held.clear();
		self.pending.reset();
		self.pending_since = None;
		self.capturing = false;
		self.replaying = false;
		self.switch_mode(Mode::Normal);
		self.text.snapshot();
	}
}

/// Length of an incomplete UTF-8 sequence at the end of `bytes`.
fn incomplete_tail(bytes: &[u8]) -> usize {
	for back in 1..=bytes.len().min(4) {
		let b = bytes[bytes.len() - back];
		if b & 0xC0 == 0x80 {
			continue;
		}
		let need = match b {
			0xC0..=0xDF => 2,
			0xE0..=0xEF => 3,
			0xF0..=0xF7 => 4,
			_ => 1,
		};
		return if need > back { back } else { 0 };
	}
	0
}
