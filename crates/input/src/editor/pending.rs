use vix_primitives::{Mark, Mode};

use super::Operator;
use crate::register::RegisterSel;

/// Largest count a command accepts.
pub const COUNT_MAX: usize = 10_000_000;

/// An operator waiting for its motion or text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingOperator {
	pub op: Operator,
	/// Count typed before the operator.
	pub count: Option<usize>,
	/// Mode the operator was started from.
	pub from: Mode,
}

/// Command state collected from keys until a command completes.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pending {
	pub count: Option<usize>,
	pub register: Option<RegisterSel>,
	pub mark: Option<Mark>,
	pub operator: Option<PendingOperator>,
}

impl Pending {
	pub fn push_digit(&mut self, digit: usize) {
		let count = self.count.unwrap_or(0).saturating_mul(10).saturating_add(digit);
		self.count = Some(count.min(COUNT_MAX));
	}

	/// Takes the count of the current command, multiplying in the count of
	/// a pending operator.
	pub fn take_count(&mut self) -> Option<usize> {
		let own = self.count.take();
		let op = self.operator.and_then(|p| p.count);
		match (op, own) {
			(Some(a), Some(b)) => Some(a.saturating_mul(b).min(COUNT_MAX)),
			(a, b) => a.or(b),
		}
	}

	/// Clears the count, register and mark, keeping a pending operator.
	pub fn clear_args(&mut self) {
		self.count = None;
		self.register = None;
		self.mark = None;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}
