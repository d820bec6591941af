//! Operators and the ranges they act on.
//!
//! An operator is either applied right away (visual mode, doubled keys) or
//! kept pending until a motion or text object supplies its target. Every
//! selection contributes one range; overlapping ranges are cut to be
//! disjoint and edited from last to first so earlier positions stay valid.

use tracing::debug;
use vix_primitives::movement::{line_start, linewise};
use vix_primitives::selection::ops::new_lines_edge;
use vix_primitives::{Filerange, Mark, Mode, Motion, MotionKind, Selection, SelectionId, TextEngine, TextError, TextObject};

use super::{Editor, PendingOperator};
use crate::register::RegisterSel;

/// A transformation applied to a range of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	Delete,
	/// Delete, then insert mode.
	Change,
	Yank,
	PutAfter,
	PutBefore,
	/// Put before the cursor, leaving the cursor after the inserted text.
	PutBeforeEnd,
	ShiftLeft,
	ShiftRight,
	/// Join lines; `trim` joins without a separating space.
	Join { trim: bool },
	/// Overwrite every character with the given one.
	Replace(char),
	/// Move the cursors, then enter the mode.
	ModeSwitch(Mode),
	/// A cursor at the start of every covered line.
	CursorSol,
	/// A cursor at the end of every covered line.
	CursorEol,
}

impl Operator {
	fn is_repeatable(self) -> bool {
		!matches!(self, Operator::Yank | Operator::CursorSol | Operator::CursorEol)
	}

	/// Mode entered once the operator is done.
	fn next_mode(self, from: Mode) -> Mode {
		match self {
			Operator::Change => Mode::Insert,
			Operator::ModeSwitch(mode) => mode,
			_ if from.is_insert() => from,
			_ => Mode::Normal,
		}
	}

	fn is_put(self) -> bool {
		matches!(self, Operator::PutAfter | Operator::PutBefore | Operator::PutBeforeEnd)
	}
}

/// What an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
	Motion(Motion),
	TextObject(TextObject),
	/// `count` whole lines from the cursor line, for doubled operators.
	Lines,
	/// The selections themselves, in visual mode.
	Selections,
}

/// The last change, for `.`.
#[derive(Debug, Clone)]
pub(crate) struct Repeat {
	pub op: Operator,
	pub target: Target,
	pub count: usize,
	pub register: Option<RegisterSel>,
	/// Keys typed in the insert session the change started.
	pub inserted: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
struct Span {
	id: SelectionId,
	range: Filerange,
	linewise: bool,
}

/// Range of `obj` around `pos`, grown by `count - 1` following objects.
pub(crate) fn object_range(text: &dyn TextEngine, obj: TextObject, pos: usize, count: usize) -> Option<Filerange> {
	let mut range = obj.range(text, pos)?;
	for _ in 1..count {
		if range.end >= text.size() {
			break;
		}
		match obj.range(text, range.end) {
			Some(next) => range = range.hull(&next),
			None => break,
		}
	}
	Some(range)
}

fn motion_range(text: &dyn TextEngine, op: Operator, motion: Motion, pos: usize, count: usize) -> Option<(Filerange, bool)> {
	// `cw` on a word changes to its end, leaving the following blanks.
	if op == Operator::Change
		&& let Some((obj, end_motion)) = match motion {
			Motion::WordStartNext => Some((TextObject::WordInner, Motion::WordEndNext)),
			Motion::BigwordStartNext => Some((TextObject::BigwordInner, Motion::BigwordEndNext)),
			_ => None,
		} && text.byte_at(pos).is_some_and(|b| !b.is_ascii_whitespace())
	{
		let word = obj.range(text, pos)?;
		let mut end = word.end;
		if count > 1
			&& let Some(last) = end_motion.apply(text, text.char_prev(word.end), count - 1)
		{
			end = text.char_next(last);
		}
		return Some((Filerange::new(pos, end), false));
	}

	let count = if motion.takes_count_as_argument() { 1 } else { count };
	let target = motion.apply(text, pos, count)?;
	Some(match motion.kind() {
		MotionKind::Linewise => (linewise(text, Filerange::new(pos, target)), true),
		MotionKind::Inclusive => (Filerange::new(pos.min(target), text.char_next(pos.max(target))), false),
		MotionKind::Exclusive => {
			let mut range = Filerange::new(pos, target);
			// An exclusive motion ending at the start of a later line stops
			// at the end of the line before.
			if target > pos && text.line_begin(target) == target && text.char_prev(target) > pos {
				range.end = text.char_prev(target);
			}
			(range, false)
		}
	})
}

fn target_range(text: &dyn TextEngine, sel: &Selection, op: Operator, target: Target, count: usize, linewise_visual: bool) -> Option<(Filerange, bool)> {
	let pos = sel.cursor();
	match target {
		Target::Selections => {
			let range = sel.range(text);
			Some(if linewise_visual { (linewise(text, range), true) } else { (range, false) })
		}
		Target::Lines => {
			let last = text.pos_by_lineno(text.lineno(pos) + count - 1);
			Some((Filerange::new(text.line_begin(pos), text.line_next(last)), true))
		}
		Target::TextObject(obj) => object_range(text, obj, pos, count).map(|r| (r, obj.is_linewise())),
		Target::Motion(motion) => motion_range(text, op, motion, pos, count),
	}
}

/// Begins of the lines touched by `range`.
fn line_begins(text: &dyn TextEngine, range: Filerange) -> Vec<usize> {
	let last = if range.is_empty() { range.start } else { text.char_prev(range.end) };
	let mut begin = text.line_begin(range.start);
	let mut out = vec![begin];
	loop {
		let next = text.line_next(begin);
		if next > last || next == begin || next >= text.size() {
			return out;
		}
		out.push(next);
		begin = next;
	}
}

impl Editor {
	/// Starts `op`, or applies it right away in visual mode and when the
	/// same operator is already pending.
	pub(crate) fn operator(&mut self, op: Operator) {
		if self.mode.is_visual() {
			let count = self.pending.take_count().unwrap_or(1);
			self.apply(op, Target::Selections, count, self.mode);
			return;
		}
		if let Some(pending) = self.pending.operator
			&& pending.op == op
		{
			let count = self.pending.take_count().unwrap_or(1);
			self.apply(op, Target::Lines, count, pending.from);
			return;
		}
		let from = self.pending.operator.map_or(self.mode, |p| p.from);
		self.pending.operator = Some(PendingOperator {
			op,
			count: self.pending.count.take(),
			from,
		});
		self.set_mode(Mode::OperatorPending);
	}

	/// Moves every cursor by `motion`, or completes a pending operator.
	pub(crate) fn motion(&mut self, motion: Motion) {
		let count = self.pending.take_count().unwrap_or(1);
		if let Some(pending) = self.pending.operator {
			self.apply(pending.op, Target::Motion(motion), count, pending.from);
			return;
		}
		let count = if motion.takes_count_as_argument() { 1 } else { count };
		let text = &*self.text;
		for id in self.sels.ids() {
			let Some(sel) = self.sels.get_mut(id) else {
				continue;
			};
			if let Some(pos) = motion.apply(text, sel.cursor(), count) {
				sel.move_to(pos);
			}
		}
		self.sels.normalize(text);
		self.pending.reset();
	}

	/// Completes a pending operator, or in visual mode grows every
	/// selection to cover the object at its cursor.
	pub(crate) fn textobject(&mut self, obj: TextObject) {
		let count = self.pending.take_count().unwrap_or(1);
		if let Some(pending) = self.pending.operator {
			self.apply(pending.op, Target::TextObject(obj), count, pending.from);
			return;
		}
		self.pending.reset();
		if !self.mode.is_visual() {
			return;
		}
		let text = &*self.text;
		for id in self.sels.ids() {
			let Some(sel) = self.sels.get_mut(id) else {
				continue;
			};
			if let Some(range) = object_range(text, obj, sel.cursor(), count) {
				*sel = Selection::from_range(text, sel.range(text).hull(&range), sel.is_forward());
			}
		}
		self.sels.normalize(text);
	}

	/// Applies `op` to `target` at every selection and enters the mode that
	/// follows it.
	pub(crate) fn apply(&mut self, op: Operator, target: Target, count: usize, from: Mode) {
		let register = self.pending.register;
		self.pending.reset();
		let linewise_visual = self.mode == Mode::VisualLine;
		let visual = self.mode.is_visual();
		if visual {
			let ranges = self.sels.ranges(&*self.text);
			self.marks.set(Mark::SELECTION, &ranges);
		}

		let recorded = !visual && !from.is_insert() && !self.replaying && op.is_repeatable();
		if recorded {
			self.repeat = Some(Repeat {
				op,
				target,
				count,
				register,
				inserted: Vec::new(),
			});
		}

		let reg = register.unwrap_or(if from.is_insert() { RegisterSel::BLACKHOLE } else { RegisterSel::DEFAULT });
		debug!(?op, ?target, count, register = %reg.id.name(), "apply operator");
		if let Err(err) = self.execute(op, target, count, reg, linewise_visual) {
			debug!(?op, %err, "operator aborted");
		}

		self.sels.anchor_all(false);
		self.sels.normalize(&*self.text);
		let next = op.next_mode(from);
		self.set_mode(next);
		if recorded {
			self.capturing = next.is_insert();
		}
	}

	fn execute(&mut self, op: Operator, target: Target, count: usize, reg: RegisterSel, linewise_visual: bool) -> Result<(), TextError> {
		match op {
			Operator::ModeSwitch(_) => {
				self.move_cursors(target, count);
				return Ok(());
			}
			Operator::CursorSol | Operator::CursorEol => {
				new_lines_edge(&mut self.sels, &*self.text, op == Operator::CursorEol);
				return Ok(());
			}
			_ if op.is_put() => return self.put(op, target, count, reg, linewise_visual),
			_ => {}
		}

		let spans = self.spans(op, target, count, linewise_visual);
		if spans.is_empty() {
			return Ok(());
		}
		if matches!(op, Operator::Delete | Operator::Change | Operator::Yank) {
			let linewise = spans.iter().any(|s| s.linewise);
			let slots = spans.iter().map(|s| self.text.bytes(s.range)).collect();
			self.registers.put(reg, slots, linewise);
		}

		for span in spans.iter().rev() {
			match op {
				Operator::Delete => self.op_delete(span)?,
				Operator::Change => {
					let mut range = span.range;
					if span.linewise && !range.is_empty() && self.text.byte_at(range.end - 1) == Some(b'\n') {
						range.end -= 1;
					}
					self.delete(range)?;
					self.place(span.id, range.start);
				}
				Operator::Yank => {
					if target != Target::Lines {
						self.place(span.id, span.range.start);
					}
				}
				Operator::ShiftLeft | Operator::ShiftRight => self.shift(span.range, op == Operator::ShiftLeft)?,
				Operator::Join { trim } => self.join(span, trim)?,
				Operator::Replace(c) => self.replace(span, c)?,
				_ => {}
			}
		}
		Ok(())
	}

	fn spans(&self, op: Operator, target: Target, count: usize, linewise_visual: bool) -> Vec<Span> {
		let text = &*self.text;
		let mut spans: Vec<Span> = self
			.sels
			.iter()
			.filter_map(|(id, sel)| {
				let (range, linewise) = target_range(text, sel, op, target, count, linewise_visual)?;
				Some(Span { id, range, linewise })
			})
			.collect();
		spans.sort_by_key(|s| s.range.start);
		let mut end = 0;
		for span in &mut spans {
			if span.range.start < end {
				span.range.start = end.min(span.range.end);
			}
			end = end.max(span.range.end);
		}
		spans
	}

	fn move_cursors(&mut self, target: Target, count: usize) {
		for id in self.sels.ids() {
			let Some(&sel) = self.sels.get(id) else {
				continue;
			};
			let pos = match target {
				Target::Motion(motion) => {
					let count = if motion.takes_count_as_argument() { 1 } else { count };
					motion.apply(&*self.text, sel.cursor(), count).unwrap_or(sel.cursor())
				}
				Target::Selections => sel.start(),
				Target::TextObject(_) | Target::Lines => sel.cursor(),
			};
			self.place(id, pos);
		}
	}

	fn op_delete(&mut self, span: &Span) -> Result<(), TextError> {
		self.delete(span.range)?;
		let mut pos = span.range.start;
		if span.linewise {
			let size = self.text.size();
			if pos >= size && size > 0 {
				pos = self.text.line_begin(self.text.char_prev(size));
			}
			pos = line_start(&*self.text, pos);
		}
		self.place(span.id, pos);
		Ok(())
	}

	fn shift(&mut self, range: Filerange, left: bool) -> Result<(), TextError> {
		let tabwidth = self.options.tabwidth.max(1);
		let indent = if self.options.expandtab { vec![b' '; tabwidth] } else { b"\t".to_vec() };
		for begin in line_begins(&*self.text, range).into_iter().rev() {
			if left {
				let n = match self.text.byte_at(begin) {
					Some(b'\t') => 1,
					_ => (0..tabwidth).take_while(|&i| self.text.byte_at(begin + i) == Some(b' ')).count(),
				};
				self.delete(Filerange::new(begin, begin + n))?;
			} else if self.text.line_end(begin) > begin {
				self.insert(begin, &indent)?;
			}
		}
		Ok(())
	}

	/// Joins the lines of `span`, at least two of them.
	fn join(&mut self, span: &Span, trim: bool) -> Result<(), TextError> {
		let mut begins = line_begins(&*self.text, span.range);
		if begins.len() == 1 {
			let next = self.text.line_next(begins[0]);
			if next > begins[0] && next < self.text.size() {
				begins.push(next);
			}
		}
		let mut first = true;
		for &begin in begins[1..].iter().rev() {
			let newline = begin - 1;
			let end = line_start(&*self.text, begin);
			let empty = self.text.line_begin(newline) == newline || end == self.text.line_end(begin);
			let sep: &[u8] = if trim || empty { b"" } else { b" " };
			self.delete(Filerange::new(newline, end))?;
			self.insert(newline, sep)?;
			if first {
				self.place(span.id, newline);
				first = false;
			}
		}
		Ok(())
	}

	fn replace(&mut self, span: &Span, c: char) -> Result<(), TextError> {
		let mut buf = [0; 4];
		let data = c.encode_utf8(&mut buf).as_bytes();
		let mut positions = Vec::new();
		let mut p = span.range.start;
		while p < span.range.end {
			if self.text.byte_at(p) != Some(b'\n') {
				positions.push(p);
			}
			p = self.text.char_next(p);
		}
		let mut first = true;
		for &pos in positions.iter().rev() {
			let end = self.text.char_next(pos);
			self.delete(Filerange::new(pos, end))?;
			self.insert(pos, data)?;
			if first {
				self.place(span.id, pos);
				first = false;
			}
		}
		Ok(())
	}

	fn put(&mut self, op: Operator, target: Target, count: usize, reg: RegisterSel, linewise_visual: bool) -> Result<(), TextError> {
		let Some(register) = self.registers.get(reg.id).cloned() else {
			return Ok(());
		};
		if register.is_empty() {
			return Ok(());
		}
		let ids = self.sels.ids();
		for (i, &id) in ids.iter().enumerate().rev() {
			let Some(&sel) = self.sels.get(id) else {
				continue;
			};
			let mut data = register.slot(i, ids.len()).repeat(count.max(1));
			let mut pos = sel.cursor();
			let mut lead = 0;
			if target == Target::Selections {
				let mut range = sel.range(&*self.text);
				if linewise_visual {
					range = linewise(&*self.text, range);
				}
				self.delete(range)?;
				pos = range.start;
			} else if register.linewise {
				pos = match op {
					Operator::PutAfter => self.text.line_next(pos),
					_ => self.text.line_begin(pos),
				};
				if !data.ends_with(b"\n") {
					data.push(b'\n');
				}
				let size = self.text.size();
				if pos == size && size > 0 && self.text.byte_at(size - 1) != Some(b'\n') {
					data.insert(0, b'\n');
					lead = 1;
				}
			} else if op == Operator::PutAfter && self.text.byte_at(pos).is_some_and(|b| b != b'\n') {
				pos = self.text.char_next(pos);
			}

			let len = self.insert(pos, &data)?;
			let cursor = if register.linewise && target != Target::Selections {
				line_start(&*self.text, pos + lead)
			} else if op == Operator::PutBeforeEnd {
				pos + len
			} else {
				self.text.char_prev(pos + len)
			};
			self.place(id, cursor);
		}
		Ok(())
	}
}
