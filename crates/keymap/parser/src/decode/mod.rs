//! Raw terminal input to key notation.
//!
//! A terminal in raw mode delivers control bytes and escape sequences; the
//! editor core only understands key notation. [`decode`] bridges the two,
//! one key at a time.


/// Escape sequences emitted by common (xterm compatible) terminals.
static SEQUENCES: &[(&[u8], &str)] = &[
	(b"\x1b[A", "Up"),
	(b"\x1b[B", "Down"),
	(b"\x1b[C", "Right"),
	(b"\x1b[D", "Left"),
	(b"\x1b[E", "Begin"),
	(b"\x1b[F", "End"),
	(b"\x1b[H", "Home"),
	(b"\x1bOA", "Up"),
	(b"\x1bOB", "Down"),
	(b"\x1bOC", "Right"),
	(b"\x1bOD", "Left"),
	(b"\x1bOF", "End"),
	(b"\x1bOH", "Home"),
	(b"\x1bOM", "KPEnter"),
	(b"\x1b[1~", "Home"),
	(b"\x1b[2~", "Insert"),
	(b"\x1b[3~", "Delete"),
	(b"\x1b[4~", "End"),
	(b"\x1b[5~", "PageUp"),
	(b"\x1b[6~", "PageDown"),
	(b"\x1b[Z", "S-Tab"),
	(b"\x1bOP", "F1"),
	(b"\x1bOQ", "F2"),
	(b"\x1bOR", "F3"),
	(b"\x1bOS", "F4"),
	(b"\x1b[15~", "F5"),
	(b"\x1b[17~", "F6"),
	(b"\x1b[18~", "F7"),
	(b"\x1b[19~", "F8"),
	(b"\x1b[20~", "F9"),
	(b"\x1b[21~", "F10"),
	(b"\x1b[23~", "F11"),
	(b"\x1b[24~", "F12"),
	(b"\x1b[1;2A", "S-Up"),
	(b"\x1b[1;2B", "S-Down"),
	(b"\x1b[1;2C", "S-Right"),
	(b"\x1b[1;2D", "S-Left"),
	(b"\x1b[1;5A", "C-Up"),
	(b"\x1b[1;5B", "C-Down"),
	(b"\x1b[1;5C", "C-Right"),
	(b"\x1b[1;5D", "C-Left"),
	(b"\x1b[5;2~", "S-PageUp"),
	(b"\x1b[6;2~", "S-PageDown"),
	(b"\x1b", "Escape"),
	(b"\r", "Enter"),
	(b"\t", "Tab"),
	(b"\x7f", "Backspace"),
];

/// Longest table entry that is a prefix of `buf`.
fn lookup(buf: &[u8]) -> Option<(usize, &'static str)> {
	SEQUENCES
		.iter()
		.filter(|(seq, _)| buf.starts_with(seq))
		.max_by_key(|(seq, _)| seq.len())
		.map(|(seq, name)| (seq.len(), *name))
}

/// Letter used in `<C-x>` notation for a control byte.
fn control_letter(b: u8) -> char {
	let upper = b | 0x40;
	if upper.is_ascii_alphabetic() {
		(b | 0x60) as char
	} else {
		upper as char
	}
}

#[inline]
fn is_printable(b: u8) -> bool {
	b.is_ascii_graphic() || b == b' '
}

/// Decodes the first key of raw terminal input `buf`.
///
/// Appends its notation to `out` and returns the number of bytes of `buf`
/// it consumed (0 only for empty input). Never reads past the end of
/// `buf`; an incomplete UTF-8 sequence is emitted as far as it goes.
pub fn decode(buf: &[u8], out: &mut String) -> usize {
	let Some(&first) = buf.first() else {
		return 0;
	};

	// A lone ESC is still the Escape key; a longer match is a sequence.
	if let Some((len, name)) = lookup(buf)
		&& (len > 1 || buf.len() == 1 || first != 0x1b)
	{
		out.push('<');
		out.push_str(name);
		out.push('>');
		return len;
	}

	if first == 0x1b && buf.len() > 1 {
		let rest = &buf[1..];
		if let Some((len, name)) = lookup(rest) {
			out.push_str("<M-");
			out.push_str(name);
			out.push('>');
			return 1 + len;
		}
		let b = rest[0];
		if b < 0x20 && is_printable(b | 0x60) {
			out.push_str("<M-C-");
			out.push(control_letter(b));
			out.push('>');
			return 2;
		}
		if is_printable(b) {
			out.push_str("<M-");
			out.push(b as char);
			out.push('>');
			return 2;
		}
	}

	if first < 0x20 {
		out.push_str("<C-");
		out.push(control_letter(first));
		out.push('>');
		return 1;
	}

	let len = if first & 0xC0 == 0xC0 {
		1 + buf[1..].iter().take_while(|&&b| b & 0xC0 == 0x80).count()
	} else {
		1
	};
	out.push_str(&String::from_utf8_lossy(&buf[..len]));
	len
}
