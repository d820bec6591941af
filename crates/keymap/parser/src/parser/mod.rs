//! # Tokenizer
//!
//! Splits a key stream into tokens. The grammar of a bracketed key is:
//!
//! ```text
//! key       = "<" "vis-" name ">"        ; action reference, name < 64 bytes
//!           | "<" modifier* base ">"
//! modifier  = ("C" | "M" | "S") "-"      ; each letter at most once
//! base      = "F" digit digit?           ; function key
//!           | symbolic                   ; see SYMBOLIC_KEYS
//!           | codepoint                  ; only after a modifier
//! ```
//!
//! Anything else is a plain UTF-8 codepoint. Malformed bracketed keys are
//! never an error: the `<` is returned as a one byte token and the rest of
//! the input is tokenized on the next call.

use crate::symbolic::SYMBOLIC_KEYS;
use crate::token::Modifiers;

#[cfg(test)]
mod tests;

/// Upper bound for the length of an action reference name.
pub const KEY_LENGTH_MAX: usize = 64;

/// Separator between a modifier letter and the rest of the key.
pub(crate) const KEY_SEP: u8 = b'-';

/// Scanner function type used for the ordered alternatives of a key base.
type ScanFn = fn(&mut Scanner, Modifiers) -> Option<usize>;

/// Cursor over the bytes of a single bracketed key.
///
/// All reads are bounds-checked, so a truncated stream simply fails to
/// match instead of reading past its end.
struct Scanner<'a> {
	input: &'a [u8],
	position: usize,
}

impl<'a> Scanner<'a> {
	fn new(input: &'a [u8]) -> Self {
		Self { input, position: 0 }
	}

	/// Peeks at the next byte without consuming it.
	fn peek(&self) -> Option<u8> {
		self.peek_at(0)
	}

	/// Peeks at the byte `n` positions ahead without consuming it.
	fn peek_at(&self, n: usize) -> Option<u8> {
		self.input.get(self.position + n).copied()
	}

	/// Consumes the next byte if it matches the expected one.
	fn take(&mut self, expected: u8) -> bool {
		if self.peek() == Some(expected) {
			self.position += 1;
			true
		} else {
			false
		}
	}

	/// Runs `f`, restoring the position if it does not match.
	fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
		let snapshot = self.position;
		let result = f(self);
		if result.is_none() {
			self.position = snapshot;
		}
		result
	}

	/// Tries the alternatives in order and returns the first match.
	fn alt(&mut self, mods: Modifiers, scanners: &[ScanFn]) -> Option<usize> {
		scanners.iter().find_map(|scan| self.try_scan(|s| scan(s, mods)))
	}
}

/// Returns the byte length of the first token in `keys`.
///
/// Returns 0 for empty input and a value in `1..=keys.len()` otherwise.
/// Never reads past the end of `keys`.
pub fn next_len(keys: &[u8]) -> usize {
	match keys.first() {
		None => 0,
		Some(b'<') => bracketed_len(keys).unwrap_or(1),
		Some(_) => codepoint_len(keys),
	}
}

/// Length of a lead byte plus all following continuation bytes.
///
/// A continuation byte at the start is returned as a token on its own.
fn codepoint_len(keys: &[u8]) -> usize {
	match keys.first() {
		None => 0,
		Some(&b) if is_continuation(b) => 1,
		Some(_) => 1 + keys[1..].iter().take_while(|&&b| is_continuation(b)).count(),
	}
}

#[inline]
fn is_continuation(b: u8) -> bool {
	b & 0xC0 == 0x80
}

fn bracketed_len(keys: &[u8]) -> Option<usize> {
	let mut scanner = Scanner::new(keys);
	if !scanner.take(b'<') {
		return None;
	}

	if keys[1..].starts_with(b"vis-") {
		return action_ref_len(keys);
	}

	let mods = scan_modifiers(&mut scanner)?;
	scanner.alt(mods, &[scan_function_key, scan_symbolic, scan_modified_char])
}

/// `<vis-...>`: the closing bracket must lie within [`KEY_LENGTH_MAX`] bytes.
fn action_ref_len(keys: &[u8]) -> Option<usize> {
	let name = &keys[1..];
	let window = &name[..name.len().min(KEY_LENGTH_MAX)];
	window.iter().position(|&b| b == b'>').map(|end| end + 2)
}

/// Consumes `C-`, `M-` and `S-` prefixes.
///
/// A repeated modifier is malformed and yields `None`.
fn scan_modifiers(scanner: &mut Scanner) -> Option<Modifiers> {
	let mut mods = Modifiers::empty();
	while let Some(flag) = scanner.peek().and_then(Modifiers::from_letter)
		&& scanner.peek_at(1) == Some(KEY_SEP)
	{
		if mods.contains(flag) {
			return None;
		}
		mods |= flag;
		scanner.position += 2;
	}
	scanner.peek()?;
	Some(mods)
}

/// `F` followed by one or two digits.
fn scan_function_key(scanner: &mut Scanner, _mods: Modifiers) -> Option<usize> {
	if !scanner.take(b'F') {
		return None;
	}
	let digits = (0..2).take_while(|&n| scanner.peek_at(n).is_some_and(|b| b.is_ascii_digit())).count();
	if digits == 0 {
		return None;
	}
	scanner.position += digits;
	close(scanner)
}

/// A name from [`SYMBOLIC_KEYS`] directly followed by `>`.
fn scan_symbolic(scanner: &mut Scanner, _mods: Modifiers) -> Option<usize> {
	let rest = &scanner.input[scanner.position..];
	let name = SYMBOLIC_KEYS
		.iter()
		.find(|name| rest.starts_with(name.as_bytes()) && rest.get(name.len()) == Some(&b'>'))?;
	scanner.position += name.len();
	close(scanner)
}

/// One codepoint, only allowed once a modifier was seen.
fn scan_modified_char(scanner: &mut Scanner, mods: Modifiers) -> Option<usize> {
	if mods.is_empty() {
		return None;
	}
	let len = codepoint_len(&scanner.input[scanner.position..]);
	if len == 0 {
		return None;
	}
	scanner.position += len;
	close(scanner)
}

fn close(scanner: &mut Scanner) -> Option<usize> {
	scanner.take(b'>').then_some(scanner.position)
}

/// Length of an unclosed bracketed key at the end of `keys` that more
/// input could still complete, or 0.
///
/// A lone trailing `<` does not count: it is a key of its own.
pub fn unfinished_len(keys: &[u8]) -> usize {
	let mut offset = 0;
	for token in tokens(keys) {
		let tail = &keys[offset..];
		if token == b"<" && tail.len() > 1 && is_key_prefix(tail) {
			return tail.len();
		}
		offset += token.len();
	}
	0
}

/// Returns true if `tail`, an unclosed `<...`, can still grow into a key.
fn is_key_prefix(tail: &[u8]) -> bool {
	let Some(mut rest) = tail.strip_prefix(b"<") else {
		return false;
	};
	if rest.contains(&b'>') {
		return false;
	}
	if b"vis-".starts_with(rest) || rest.starts_with(b"vis-") {
		return rest.len() < KEY_LENGTH_MAX;
	}

	let mut mods = Modifiers::empty();
	while let [letter, sep, after @ ..] = rest
		&& *sep == KEY_SEP
		&& let Some(flag) = Modifiers::from_letter(*letter)
	{
		if mods.contains(flag) {
			return false;
		}
		mods |= flag;
		rest = after;
	}

	match rest {
		[] => true,
		[letter] if Modifiers::from_letter(*letter).is_some_and(|flag| !mods.contains(flag)) => true,
		[b'F', digits @ ..] if digits.len() <= 2 && digits.iter().all(u8::is_ascii_digit) => true,
		_ if SYMBOLIC_KEYS.iter().any(|name| name.as_bytes().starts_with(rest)) => true,
		[lead, ..] => !mods.is_empty() && !is_continuation(*lead) && codepoint_len(rest) == rest.len() && rest.len() <= 4,
	}
}

/// Iterator over the token spans of a key stream.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
	keys: &'a [u8],
}

impl<'a> Iterator for Tokens<'a> {
	type Item = &'a [u8];

	fn next(&mut self) -> Option<Self::Item> {
		let len = next_len(self.keys);
		if len == 0 {
			return None;
		}
		let (token, rest) = self.keys.split_at(len);
		self.keys = rest;
		Some(token)
	}
}

/// Splits `keys` into token spans.
///
/// Concatenating the spans reproduces `keys` exactly.
pub fn tokens(keys: &[u8]) -> Tokens<'_> {
	Tokens { keys }
}
