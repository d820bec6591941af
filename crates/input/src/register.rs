//! Registers: named clipboards shared by operators and macros.
//!
//! A register holds one slot per selection that filled it. Letters name
//! the general purpose registers (uppercase appends to the lowercase one),
//! digits are plain storage, `"` is the default and `_` discards everything
//! written to it.

use std::collections::HashMap;

/// A valid register name, with uppercase letters folded to lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(u8);

impl RegisterId {
	pub const DEFAULT: RegisterId = RegisterId(b'"');
	pub const BLACKHOLE: RegisterId = RegisterId(b'_');

	/// Parses a register name, returning whether writes should append.
	pub fn from_byte(name: u8) -> Option<(Self, bool)> {
		match name {
			b'a'..=b'z' | b'0'..=b'9' | b'"' | b'_' => Some((Self(name), false)),
			b'A'..=b'Z' => Some((Self(name.to_ascii_lowercase()), true)),
			_ => None,
		}
	}

	pub fn name(self) -> char {
		self.0 as char
	}
}

/// A register selected for the next command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSel {
	pub id: RegisterId,
	pub append: bool,
}

impl RegisterSel {
	pub const DEFAULT: RegisterSel = RegisterSel {
		id: RegisterId::DEFAULT,
		append: false,
	};
	pub const BLACKHOLE: RegisterSel = RegisterSel {
		id: RegisterId::BLACKHOLE,
		append: false,
	};

	pub fn from_byte(name: u8) -> Option<Self> {
		RegisterId::from_byte(name).map(|(id, append)| Self { id, append })
	}
}

/// Contents of one register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
	pub slots: Vec<Vec<u8>>,
	/// Filled from whole lines; puts go to line boundaries.
	pub linewise: bool,
}

impl Register {
	/// Content to use for the `index`-th of `count` selections.
	///
	/// Each selection gets its own slot when the numbers agree, otherwise
	/// every selection gets the first slot.
	pub fn slot(&self, index: usize, count: usize) -> &[u8] {
		let i = if self.slots.len() == count { index } else { 0 };
		self.slots.get(i).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.iter().all(Vec::is_empty)
	}
}

/// The register table of an editor.
#[derive(Debug, Clone, Default)]
pub struct Registers {
	map: HashMap<RegisterId, Register>,
}

impl Registers {
	/// Returns a register's contents; the black hole always reads empty.
	pub fn get(&self, id: RegisterId) -> Option<&Register> {
		if id == RegisterId::BLACKHOLE {
			return None;
		}
		self.map.get(&id)
	}

	/// Stores `slots` in the selected register.
	///
	/// Appending extends existing slots pairwise and adds any extra ones.
	pub fn put(&mut self, sel: RegisterSel, slots: Vec<Vec<u8>>, linewise: bool) {
		if sel.id == RegisterId::BLACKHOLE {
			return;
		}
		let reg = self.map.entry(sel.id).or_default();
		if !sel.append {
			*reg = Register { slots, linewise };
			return;
		}
		for (i, data) in slots.into_iter().enumerate() {
			match reg.slots.get_mut(i) {
				Some(slot) => slot.extend_from_slice(&data),
				None => reg.slots.push(data),
			}
		}
		reg.linewise |= linewise;
	}

	/// Replaces a register with a single slot.
	pub fn set(&mut self, id: RegisterId, data: &[u8]) {
		self.put(RegisterSel { id, append: false }, vec![data.to_vec()], false);
	}
}
