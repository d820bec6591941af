use pretty_assertions::assert_eq;
use smallvec::SmallVec;

use super::insert::{Verbatim, parse_verbatim};
use super::*;

fn inserted(data: &[u8], consumed: usize) -> Verbatim {
	Verbatim::Insert {
		data: SmallVec::from_slice(data),
		consumed,
	}
}

#[test]
fn action_names_are_unique() {
	for (i, action) in ACTIONS.iter().enumerate() {
		assert!(action.name.starts_with("vis-"), "{}", action.name);
		assert!(
			ACTIONS[i + 1..].iter().all(|other| other.name != action.name),
			"duplicate action {}",
			action.name
		);
	}
}

#[test]
fn find_by_name() {
	let action = find("vis-motion-line-end").unwrap();
	assert_eq!(action.arg, Arg::Motion(Motion::LineEnd));
	assert!(find("vis-motion-line-end ").is_none());
	assert!(find("motion-line-end").is_none());
}

#[test]
fn verbatim_codes() {
	assert_eq!(parse_verbatim(b"u00e9"), inserted("é".as_bytes(), 5));
	assert_eq!(parse_verbatim(b"U0001F600"), inserted("😀".as_bytes(), 9));
	assert_eq!(parse_verbatim(b"x41"), inserted(b"A", 3));
	assert_eq!(parse_verbatim(b"o101"), inserted(b"A", 4));
	assert_eq!(parse_verbatim(b"065"), inserted(b"A", 3));
	assert_eq!(parse_verbatim(b"u000a"), inserted(b"\n", 5));
}

#[test]
fn verbatim_waits_for_digits() {
	assert_eq!(parse_verbatim(b""), Verbatim::NeedMore);
	assert_eq!(parse_verbatim(b"u"), Verbatim::NeedMore);
	assert_eq!(parse_verbatim(b"u00"), Verbatim::NeedMore);
	assert_eq!(parse_verbatim(b"06"), Verbatim::NeedMore);
}

#[test]
fn verbatim_stops_at_foreign_digit() {
	assert_eq!(parse_verbatim(b"x4g"), inserted(b"\x04", 2));
	assert_eq!(parse_verbatim(b"o8"), inserted(b"", 1));
	assert_eq!(parse_verbatim(b"7a"), inserted(b"\x07", 1));
}

#[test]
fn verbatim_keys() {
	assert_eq!(parse_verbatim(b"<Enter>"), inserted(b"\r", 7));
	assert_eq!(parse_verbatim(b"<Tab>x"), inserted(b"\t", 5));
	assert_eq!(parse_verbatim(b"<C-a>"), inserted(b"\x01", 5));
	assert_eq!(parse_verbatim(b"<Escape>"), inserted(b"\x1b", 8));
	assert_eq!(parse_verbatim(b"q"), inserted(b"q", 1));
	assert_eq!(parse_verbatim("ä".as_bytes()), inserted("ä".as_bytes(), 2));
}

#[test]
fn char_arguments() {
	assert!(matches!(read_char(b""), CharArg::Missing));
	assert!(matches!(read_char(b"x"), CharArg::Char('x', 1)));
	assert!(matches!(read_char(b"<Enter>"), CharArg::Char('\n', 7)));
	assert!(matches!(read_char(b"<Space>y"), CharArg::Char(' ', 7)));
	assert!(matches!(read_char(b"<Escape>"), CharArg::Cancel(8)));
	assert!(matches!(read_char(b"<C-w>"), CharArg::Cancel(5)));
}

#[test]
fn name_arguments() {
	assert_eq!(read_name(b""), None);
	assert_eq!(read_name(b"ab"), Some(Ok(b'a')));
	assert_eq!(read_name(b"<Up>"), Some(Err(4)));
	assert_eq!(read_name("é".as_bytes()), Some(Err(2)));
}
