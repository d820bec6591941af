use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

use crate::parser::{KEY_SEP, next_len};
use crate::symbolic::SYMBOLIC_KEYS;

bitflags! {
	/// Modifier prefixes of a bracketed key (`<C-`, `<M-`, `<S-`).
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Modifiers: u8 {
		const CTRL = 1;
		const META = 1 << 1;
		const SHIFT = 1 << 2;
	}
}

impl Modifiers {
	/// Maps a modifier letter (`C`, `M`, `S`) to its flag.
	pub fn from_letter(letter: u8) -> Option<Self> {
		match letter {
			b'C' => Some(Self::CTRL),
			b'M' => Some(Self::META),
			b'S' => Some(Self::SHIFT),
			_ => None,
		}
	}
}

/// Base key of a modified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
	/// A single codepoint, as in `<C-w>`.
	Char(char),
	/// A symbolic or function key name, as in `<S-Tab>` or `<C-F5>`.
	Named(&'a str),
}

/// One logical key taken from the front of a key stream.
///
/// Tokens borrow from the stream they were parsed from and are meant to be
/// consumed right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'a> {
	/// A single UTF-8 codepoint, including a lone `<`.
	Literal(char),
	/// Bytes that do not decode as exactly one codepoint.
	Raw(&'a [u8]),
	/// An unmodified symbolic or function key such as `<Enter>` or `<F1>`.
	Symbolic(&'a str),
	/// A key with at least one modifier.
	Modified { mods: Modifiers, base: Key<'a> },
	/// A named action reference, `<vis-...>`. The name excludes the brackets.
	ActionRef(&'a str),
}

impl<'a> Token<'a> {
	/// Parses the first token of `keys`, returning it with its byte length.
	///
	/// Returns `None` only for empty input. The length always equals
	/// [`next_len`].
	pub fn parse(keys: &'a [u8]) -> Option<(Self, usize)> {
		let len = next_len(keys);
		if len == 0 {
			return None;
		}
		let span = &keys[..len];
		let token = if len > 1 && span[0] == b'<' {
			classify_bracketed(span)
		} else {
			classify_plain(span)
		};
		Some((token, len))
	}

	/// Returns the action name if this is an action reference.
	pub fn action_name(&self) -> Option<&'a str> {
		match self {
			Self::ActionRef(name) => Some(name),
			_ => None,
		}
	}

	/// Returns true for the `<Escape>` key.
	pub fn is_escape(&self) -> bool {
		matches!(self, Self::Symbolic("Escape"))
	}

	/// Returns the bytes this key produces when typed as text.
	///
	/// Keys without a textual meaning (cursor keys, most modified keys)
	/// yield `None`.
	pub fn text(&self) -> Option<Cow<'a, [u8]>> {
		let named = |name: &str| -> Option<&'static [u8]> {
			Some(match name {
				"Enter" | "KPEnter" => b"\n",
				"Tab" => b"\t",
				"Space" => b" ",
				"KPPlus" => b"+",
				"KPMinus" => b"-",
				"KPMult" => b"*",
				"KPDiv" => b"/",
				"KPComma" => b",",
				"KPPeriod" => b".",
				"KPEquals" => b"=",
				"KP0" => b"0",
				"KP1" => b"1",
				"KP2" => b"2",
				"KP3" => b"3",
				"KP4" => b"4",
				"KP5" => b"5",
				"KP6" => b"6",
				"KP7" => b"7",
				"KP8" => b"8",
				"KP9" => b"9",
				_ => return None,
			})
		};
		match *self {
			Self::Literal(c) => {
				let mut buf = [0u8; 4];
				Some(Cow::Owned(c.encode_utf8(&mut buf).as_bytes().to_vec()))
			}
			Self::Raw(bytes) => Some(Cow::Borrowed(bytes)),
			Self::Symbolic(name) => named(name).map(Cow::Borrowed),
			Self::Modified { mods, base } if mods == Modifiers::SHIFT => match base {
				Key::Char(c) => {
					let mut buf = [0u8; 4];
					Some(Cow::Owned(c.encode_utf8(&mut buf).as_bytes().to_vec()))
				}
				Key::Named(name) => named(name).map(Cow::Borrowed),
			},
			Self::Modified { .. } | Self::ActionRef(_) => None,
		}
	}
}

/// Spells a single key token in its canonical form.
///
/// Modifiers of a modified key are written in `C-M-S` order, so `<S-C-a>`
/// and `<C-S-a>` both become `<C-S-a>`. Every other token is returned as is.
pub fn canonical(token: &[u8]) -> Cow<'_, [u8]> {
	match Token::parse(token) {
		Some((key @ Token::Modified { .. }, len)) if len == token.len() => {
			let spelled = key.to_string();
			if spelled.as_bytes() == token {
				Cow::Borrowed(token)
			} else {
				Cow::Owned(spelled.into_bytes())
			}
		}
		_ => Cow::Borrowed(token),
	}
}

fn classify_plain(span: &[u8]) -> Token<'_> {
	if let Ok(s) = std::str::from_utf8(span) {
		let mut chars = s.chars();
		if let (Some(c), None) = (chars.next(), chars.next()) {
			return Token::Literal(c);
		}
	}
	Token::Raw(span)
}

fn classify_bracketed(span: &[u8]) -> Token<'_> {
	let Ok(inner) = std::str::from_utf8(&span[1..span.len() - 1]) else {
		return Token::Raw(span);
	};
	if inner.starts_with("vis-") {
		return Token::ActionRef(inner);
	}

	let mut mods = Modifiers::empty();
	let mut rest = inner;
	while let [letter, sep, ..] = rest.as_bytes()
		&& *sep == KEY_SEP
		&& let Some(flag) = Modifiers::from_letter(*letter)
		&& rest.len() > 2
	{
		mods |= flag;
		rest = &rest[2..];
	}

	let base = if is_named(rest) {
		Key::Named(rest)
	} else {
		match rest.chars().next() {
			Some(c) if c.len_utf8() == rest.len() => Key::Char(c),
			_ => return Token::Raw(span),
		}
	};

	match (mods.is_empty(), base) {
		(true, Key::Named(name)) => Token::Symbolic(name),
		(true, Key::Char(_)) => Token::Raw(span),
		(false, base) => Token::Modified { mods, base },
	}
}

fn is_named(name: &str) -> bool {
	if SYMBOLIC_KEYS.contains(&name) {
		return true;
	}
	let Some(digits) = name.strip_prefix('F') else {
		return false;
	};
	(1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Token<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(c) => write!(f, "{c}"),
			Self::Raw(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
			Self::Symbolic(name) => write!(f, "<{name}>"),
			Self::Modified { mods, base } => {
				f.write_str("<")?;
				for (flag, letter) in [(Modifiers::CTRL, "C-"), (Modifiers::META, "M-"), (Modifiers::SHIFT, "S-")] {
					if mods.contains(flag) {
						f.write_str(letter)?;
					}
				}
				match base {
					Key::Char(c) => write!(f, "{c}>"),
					Key::Named(name) => write!(f, "{name}>"),
				}
			}
			Self::ActionRef(name) => write!(f, "<{name}>"),
		}
	}
}
