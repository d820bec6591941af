use super::*;

fn split(keys: &str) -> Vec<&str> {
	tokens(keys.as_bytes())
		.map(|t| std::str::from_utf8(t).unwrap())
		.collect()
}

#[test]
fn empty_input_has_no_token() {
	assert_eq!(next_len(b""), 0);
	assert_eq!(tokens(b"").count(), 0);
}

#[test]
fn plain_ascii_is_one_byte() {
	assert_eq!(next_len(b"abc"), 1);
	assert_eq!(split("dw"), ["d", "w"]);
}

#[test]
fn utf8_codepoint_is_one_token() {
	assert_eq!(next_len("äb".as_bytes()), 2);
	assert_eq!(next_len("€".as_bytes()), 3);
	assert_eq!(next_len("𝄞x".as_bytes()), 4);
}

#[test]
fn lone_continuation_byte_resynchronizes() {
	assert_eq!(next_len(&[0x80, b'a']), 1);
	assert_eq!(next_len(&[0xBF, 0x80]), 1);
}

#[test]
fn truncated_codepoint_stays_within_bounds() {
	let euro = "€".as_bytes();
	assert_eq!(next_len(&euro[..2]), 2);
	assert_eq!(next_len(&euro[..1]), 1);
}

#[test]
fn symbolic_keys() {
	assert_eq!(split("<Enter><Escape>x"), ["<Enter>", "<Escape>", "x"]);
	assert_eq!(next_len(b"<PageUp>"), 8);
	assert_eq!(next_len(b"<PageDown>"), 10);
}

#[test]
fn symbolic_names_are_case_sensitive() {
	assert_eq!(next_len(b"<enter>"), 1);
	assert_eq!(next_len(b"<ENTER>"), 1);
}

#[test]
fn symbolic_name_must_be_closed() {
	assert_eq!(next_len(b"<Enter"), 1);
	assert_eq!(next_len(b"<Enterx>"), 1);
}

#[test]
fn function_keys() {
	assert_eq!(next_len(b"<F1>"), 4);
	assert_eq!(next_len(b"<F12>"), 5);
	assert_eq!(next_len(b"<F123>"), 1);
	assert_eq!(next_len(b"<F>"), 1);
	assert_eq!(next_len(b"<S-F5>"), 6);
}

#[test]
fn modified_keys() {
	assert_eq!(next_len(b"<C-w>c"), 5);
	assert_eq!(next_len(b"<M-C-j>"), 7);
	assert_eq!(next_len(b"<S-Tab>"), 7);
	assert_eq!(next_len("<C-ä>".as_bytes()), 6);
	assert_eq!(next_len(b"<C->>"), 5);
	assert_eq!(next_len(b"<C-->"), 5);
}

#[test]
fn repeated_modifier_is_malformed() {
	assert_eq!(next_len(b"<C-C-a>"), 1);
	assert_eq!(next_len(b"<M-S-M-a>"), 1);
	assert_eq!(split("<C-C-a>"), ["<", "C", "-", "C", "-", "a", ">"]);
}

#[test]
fn unmodified_codepoint_in_brackets_is_literal_bracket() {
	assert_eq!(next_len(b"<a>"), 1);
	assert_eq!(next_len(b"<"), 1);
	assert_eq!(next_len(b"<C-"), 1);
	assert_eq!(next_len(b"<C-a"), 1);
}

#[test]
fn action_references() {
	assert_eq!(next_len(b"<vis-motion-line-up>j"), 20);
	assert_eq!(next_len(b"<vis-not-registered>"), 20);
	assert_eq!(next_len(b"<vis-unterminated"), 1);
}

#[test]
fn overlong_action_reference_degrades() {
	let mut keys = b"<vis-".to_vec();
	keys.extend(std::iter::repeat_n(b'a', 70));
	keys.push(b'x');
	assert_eq!(next_len(&keys), 1);

	keys.push(b'>');
	assert_eq!(next_len(&keys), 1);
}

#[test]
fn action_reference_at_length_limit() {
	let mut keys = b"<vis-".to_vec();
	keys.extend(std::iter::repeat_n(b'a', KEY_LENGTH_MAX - 5));
	keys.push(b'>');
	assert_eq!(next_len(&keys), keys.len());

	let mut longer = b"<vis-".to_vec();
	longer.extend(std::iter::repeat_n(b'a', KEY_LENGTH_MAX - 4));
	longer.push(b'>');
	assert_eq!(next_len(&longer), 1);
}

#[test]
fn unclosed_key_at_the_end_is_unfinished() {
	assert_eq!(unfinished_len(b"<Esc"), 4);
	assert_eq!(unfinished_len(b"ab<C-"), 3);
	assert_eq!(unfinished_len(b"x<C-S-a"), 6);
	assert_eq!(unfinished_len(b"<F1"), 3);
	assert_eq!(unfinished_len(b"<vis-motion"), 11);
	assert_eq!(unfinished_len(b"<C-<"), 4);
	assert_eq!(unfinished_len(b"<M"), 2);
}

#[test]
fn finished_or_hopeless_tails_are_not_held() {
	assert_eq!(unfinished_len(b""), 0);
	assert_eq!(unfinished_len(b"<"), 0);
	assert_eq!(unfinished_len(b"<<"), 0);
	assert_eq!(unfinished_len(b"<Escape>"), 0);
	assert_eq!(unfinished_len(b"<x"), 0);
	assert_eq!(unfinished_len(b"<C-C-"), 0);
	assert_eq!(unfinished_len(b"<F123"), 0);
	assert_eq!(unfinished_len(b"<C-ab"), 0);
	assert_eq!(unfinished_len(b"a<b c"), 0);
}
