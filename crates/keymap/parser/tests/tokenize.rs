use proptest::prelude::*;
use vix_keymap_parser::{Key, Modifiers, Token, next_len, tokens};

/// Byte strings biased towards bracketed notation so the interesting paths run.
fn arb_keys() -> impl Strategy<Value = Vec<u8>> {
	let piece = prop_oneof![
		Just(b"<".to_vec()),
		Just(b">".to_vec()),
		Just(b"C-".to_vec()),
		Just(b"M-".to_vec()),
		Just(b"S-".to_vec()),
		Just(b"vis-".to_vec()),
		Just(b"Enter".to_vec()),
		Just(b"F1".to_vec()),
		Just("ä".as_bytes().to_vec()),
		any::<u8>().prop_map(|b| vec![b]),
	];
	prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

proptest! {
	#[test]
	fn prop_length_in_bounds(keys in arb_keys()) {
		let len = next_len(&keys);
		if keys.is_empty() {
			prop_assert_eq!(len, 0);
		} else {
			prop_assert!((1..=keys.len()).contains(&len));
		}
	}

	#[test]
	fn prop_tokens_concatenate_to_input(keys in arb_keys()) {
		let joined: Vec<u8> = tokens(&keys).flatten().copied().collect();
		prop_assert_eq!(joined, keys);
	}

	#[test]
	fn prop_parse_agrees_with_next_len(keys in arb_keys()) {
		match Token::parse(&keys) {
			None => prop_assert!(keys.is_empty()),
			Some((_, len)) => prop_assert_eq!(len, next_len(&keys)),
		}
	}

	#[test]
	fn prop_prefix_never_overreads(keys in arb_keys(), cut in 0usize..64) {
		let cut = cut.min(keys.len());
		let len = next_len(&keys[..cut]);
		prop_assert!(len <= cut);
	}
}

#[test]
fn classifies_tokens() {
	let parsed: Vec<Token> = tokens(b"a<Enter><C-w><S-Tab><C-F5><vis-nop><").map(|t| Token::parse(t).unwrap().0).collect();
	assert_eq!(
		parsed,
		[
			Token::Literal('a'),
			Token::Symbolic("Enter"),
			Token::Modified {
				mods: Modifiers::CTRL,
				base: Key::Char('w'),
			},
			Token::Modified {
				mods: Modifiers::SHIFT,
				base: Key::Named("Tab"),
			},
			Token::Modified {
				mods: Modifiers::CTRL,
				base: Key::Named("F5"),
			},
			Token::ActionRef("vis-nop"),
			Token::Literal('<'),
		]
	);
}

#[test]
fn repeated_modifier_falls_back_to_literal() {
	let (token, len) = Token::parse(b"<C-C-a>").unwrap();
	assert_eq!((token, len), (Token::Literal('<'), 1));
}

#[test]
fn overlong_action_reference_falls_back() {
	let mut keys = b"<vis-".to_vec();
	keys.extend(std::iter::repeat_n(b'a', 70));
	keys.push(b'x');
	assert_eq!(next_len(&keys), 1);
}

#[test]
fn insert_text_of_tokens() {
	let text = |keys: &[u8]| Token::parse(keys).unwrap().0.text().map(|t| t.into_owned());
	assert_eq!(text(b"<Enter>"), Some(b"\n".to_vec()));
	assert_eq!(text(b"<Tab>"), Some(b"\t".to_vec()));
	assert_eq!(text(b"<Space>"), Some(b" ".to_vec()));
	assert_eq!(text("ä".as_bytes()), Some("ä".as_bytes().to_vec()));
	assert_eq!(text(b"<S-x>"), Some(b"x".to_vec()));
	assert_eq!(text(b"<Backspace>"), None);
	assert_eq!(text(b"<C-w>"), None);
	assert_eq!(text(b"<vis-nop>"), None);
}

#[test]
fn display_round_trips_notation() {
	for keys in ["<C-M-x>", "<S-Left>", "<F12>", "<vis-motion-line-up>", "q"] {
		let (token, _) = Token::parse(keys.as_bytes()).unwrap();
		assert_eq!(token.to_string(), keys);
	}
}

#[test]
fn canonical_modifier_order() {
	use vix_keymap_parser::canonical;
	assert_eq!(&*canonical(b"<S-C-a>"), b"<C-S-a>");
	assert_eq!(&*canonical(b"<S-M-C-F5>"), b"<C-M-S-F5>");
	assert!(matches!(canonical(b"<C-S-a>"), std::borrow::Cow::Borrowed(_)));
	assert_eq!(&*canonical(b"<Enter>"), b"<Enter>");
	assert_eq!(&*canonical(b"x"), b"x");
	assert_eq!(&*canonical(b"<vis-nop>"), b"<vis-nop>");
}
