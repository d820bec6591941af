use std::fmt;

/// Interpretation context for incoming keys.
///
/// Exactly one mode is active per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
	#[default]
	Normal,
	/// An operator is waiting for its motion or text object.
	OperatorPending,
	/// Characterwise visual selection.
	Visual,
	/// Linewise visual selection.
	VisualLine,
	Insert,
	Replace,
}

impl Mode {
	/// Every mode, in binding table order.
	pub const ALL: [Mode; 6] = [
		Mode::Normal,
		Mode::OperatorPending,
		Mode::Visual,
		Mode::VisualLine,
		Mode::Insert,
		Mode::Replace,
	];

	/// Returns true for both visual modes.
	#[inline]
	pub fn is_visual(self) -> bool {
		matches!(self, Mode::Visual | Mode::VisualLine)
	}

	/// Returns true for modes in which typed text lands in the buffer.
	#[inline]
	pub fn is_insert(self) -> bool {
		matches!(self, Mode::Insert | Mode::Replace)
	}

	/// Name used in configuration files.
	pub fn name(self) -> &'static str {
		match self {
			Mode::Normal => "normal",
			Mode::OperatorPending => "operator-pending",
			Mode::Visual => "visual",
			Mode::VisualLine => "visual-line",
			Mode::Insert => "insert",
			Mode::Replace => "replace",
		}
	}

	/// Parses a configuration mode name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|mode| mode.name() == name)
	}

	/// Position of this mode in [`Mode::ALL`].
	#[inline]
	pub fn index(self) -> usize {
		self as usize
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Mode::Normal => "NORMAL",
			Mode::OperatorPending => "OPERATOR",
			Mode::Visual => "VISUAL",
			Mode::VisualLine => "VISUAL LINE",
			Mode::Insert => "INSERT",
			Mode::Replace => "REPLACE",
		})
	}
}
