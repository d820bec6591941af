use smallvec::SmallVec;
use vix_keymap_parser::{Key, Modifiers, Token};
use vix_primitives::Motion;

use super::{Arg, Keys, read_name};
use crate::editor::{Editor, Operator};
use crate::error::DispatchError;
use crate::register::RegisterSel;

pub(super) fn newline(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.insert_newline();
	Ok(Keys::Consumed(0))
}

pub(super) fn tab(editor: &mut Editor, _: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	editor.insert_tab();
	Ok(Keys::Consumed(0))
}

/// `<C-v>`: inserts a character by code or the next key untranslated.
pub(super) fn verbatim(editor: &mut Editor, keys: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	match parse_verbatim(keys) {
		Verbatim::NeedMore => Ok(Keys::NeedMore),
		Verbatim::Insert { data, consumed } => {
			if !data.is_empty() {
				editor.type_text(&data);
			}
			Ok(Keys::Consumed(consumed))
		}
	}
}

/// `<C-r>x`: inserts register `x` before the cursors.
pub(super) fn register(editor: &mut Editor, keys: &[u8], _: &Arg, _: usize) -> Result<Keys, DispatchError> {
	let Some(name) = read_name(keys) else {
		return Ok(Keys::NeedMore);
	};
	let Some(reg) = name.ok().and_then(RegisterSel::from_byte) else {
		return Ok(Keys::Consumed(name.map_or_else(|len| len, |_| 1)));
	};
	editor.pending.register = Some(reg);
	editor.operator(Operator::PutBeforeEnd);
	editor.motion(Motion::Nop);
	Ok(Keys::Consumed(1))
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Verbatim {
	NeedMore,
	Insert { data: SmallVec<[u8; 4]>, consumed: usize },
}

/// Decodes the keys following `<C-v>`.
///
/// `o`/`O` take three octal digits, `x`/`X` two hex digits, `u` four and
/// `U` eight hex digits, and a decimal digit starts a three digit decimal
/// byte. A digit outside the base ends the code early and is left queued.
/// Any other key is inserted as the byte it stands for.
pub(super) fn parse_verbatim(keys: &[u8]) -> Verbatim {
	let Some(&first) = keys.first() else {
		return Verbatim::NeedMore;
	};
	let (radix, digits, start, codepoint) = match first {
		b'o' | b'O' => (8, 3, 1, false),
		b'x' | b'X' => (16, 2, 1, false),
		b'u' => (16, 4, 1, true),
		b'U' => (16, 8, 1, true),
		b'0'..=b'9' => (10, 3, 0, false),
		_ => return verbatim_key(keys),
	};

	let mut value: u32 = 0;
	let mut used = 0;
	for &b in keys[start..].iter().take(digits) {
		let Some(digit) = (b as char).to_digit(radix) else {
			break;
		};
		value = value.saturating_mul(radix).saturating_add(digit);
		used += 1;
	}
	let available = keys.len() - start;
	if used < digits && used == available {
		return Verbatim::NeedMore;
	}

	let mut data = SmallVec::new();
	if used > 0 {
		if !codepoint && value <= 0xff {
			data.push(value as u8);
		} else if let Some(c) = char::from_u32(value) {
			let mut buf = [0; 4];
			data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
		}
	}
	Verbatim::Insert {
		data,
		consumed: start + used,
	}
}

fn verbatim_key(keys: &[u8]) -> Verbatim {
	let Some((token, consumed)) = Token::parse(keys) else {
		return Verbatim::NeedMore;
	};
	let mut data = SmallVec::new();
	match token {
		Token::Symbolic("Enter") => data.push(b'\r'),
		Token::Symbolic("Escape") => data.push(0x1b),
		Token::Symbolic("Backspace") => data.push(0x7f),
		Token::Modified { mods, base: Key::Char(c) } if mods == Modifiers::CTRL && c.is_ascii() => data.push(c as u8 & 0x1f),
		_ => {
			if let Some(text) = token.text() {
				data.extend_from_slice(&text);
			}
		}
	}
	Verbatim::Insert { data, consumed }
}
