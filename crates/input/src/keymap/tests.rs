use vix_keymap_parser::{Token, tokens};
use vix_primitives::Mode;

use super::{Binding, DEFAULT_TABLES, Keymap, MatchResult, Matcher};
use crate::action;

fn action_name(binding: Option<&Binding>) -> Option<&'static str> {
	match binding {
		Some(Binding::Action(action)) => Some(action.name),
		_ => None,
	}
}

#[test]
fn modifier_order_does_not_matter() {
	let mut m = Matcher::default();
	assert!(m.add(b"<S-C-a>", 1));
	assert!(!m.add(b"<C-S-a>", 2));
	assert!(matches!(m.lookup(b"<C-S-a>"), MatchResult::Complete { value: 1, len: 7 }));
	assert!(matches!(m.lookup(b"<S-C-a>x"), MatchResult::Complete { value: 1, len: 7 }));
	assert_eq!(m.get(b"<M-S-C-Left>"), None);
	assert!(m.add(b"<M-S-C-Left>", 3));
	assert_eq!(m.get(b"<C-M-S-Left>"), Some(&3));
}

#[test]
fn matcher_walks_whole_tokens() {
	let mut m = Matcher::default();
	assert!(m.add(b"gg", 1));
	assert!(m.add(b"g_", 2));
	assert!(m.add(b"d", 3));
	assert!(m.add(b"<C-w>", 4));
	assert!(!m.add(b"gg", 5));
	assert!(!m.add(b"", 6));
	assert_eq!(m.len(), 4);

	assert!(matches!(m.lookup(b"g"), MatchResult::Partial { longest: None }));
	assert!(matches!(m.lookup(b"ggx"), MatchResult::Complete { value: 1, len: 2 }));
	assert!(matches!(m.lookup(b"dw"), MatchResult::Complete { value: 3, len: 1 }));
	assert!(matches!(m.lookup(b"<C-w>x"), MatchResult::Complete { value: 4, len: 5 }));
	assert!(matches!(m.lookup(b"<"), MatchResult::None));
	assert!(matches!(m.lookup(b"gx"), MatchResult::None));
	assert!(matches!(m.lookup(b""), MatchResult::None));
	assert_eq!(m.get(b"g_"), Some(&2));
	assert_eq!(m.get(b"g"), None);
}

#[test]
fn partial_match_remembers_shorter_binding() {
	let mut m = Matcher::default();
	m.add(b"a", 1);
	m.add(b"ab", 2);
	assert!(matches!(m.lookup(b"a"), MatchResult::Partial { longest: Some((1, 1)) }));
	assert!(matches!(m.lookup(b"ac"), MatchResult::Complete { value: 1, len: 1 }));
	assert!(matches!(m.lookup(b"ab"), MatchResult::Complete { value: 2, len: 2 }));
}

#[test]
fn single_action_aliases_resolve_to_actions() {
	let keymap = Keymap::default();
	assert_eq!(action_name(keymap.get(Mode::Normal, "x")), Some("vis-delete-char-next"));
	assert_eq!(action_name(keymap.get(Mode::Normal, "<C-r>")), Some("vis-redo"));
	assert_eq!(action_name(keymap.get(Mode::Insert, "<C-r>")), Some("vis-insert-register"));
	match keymap.get(Mode::Normal, "C") {
		Some(Binding::Alias(alias)) => assert_eq!(&**alias, b"c$"),
		other => panic!("unexpected binding {other:?}"),
	}
}

#[test]
fn earlier_tables_shadow_later_ones() {
	let keymap = Keymap::default();
	// Normal binds <Tab> itself, ahead of the selection table.
	assert_eq!(action_name(keymap.get(Mode::Normal, "<Tab>")), Some("vis-selections-align"));
	assert_eq!(action_name(keymap.get(Mode::Visual, "<Tab>")), Some("vis-selections-align-indent-left"));
	assert_eq!(action_name(keymap.get(Mode::Insert, "<C-d>")), None);
	assert_eq!(action_name(keymap.get(Mode::Insert, "<Delete>")), Some("vis-delete-char-next"));
}

#[test]
fn derived_modes_fall_back_to_their_parent() {
	let keymap = Keymap::default();
	let lookup = |mode, keys: &[u8]| match keymap.lookup(mode, keys) {
		MatchResult::Complete { value, .. } => action_name(Some(value)),
		_ => None,
	};
	assert_eq!(lookup(Mode::VisualLine, b"j"), Some("vis-motion-line-down"));
	assert_eq!(lookup(Mode::VisualLine, b"v"), Some("vis-mode-visual-charwise"));
	assert_eq!(lookup(Mode::Visual, b"V"), Some("vis-mode-visual-linewise"));
	assert_eq!(lookup(Mode::Replace, b"<Escape>"), Some("vis-mode-normal"));
	assert!(keymap.get(Mode::Replace, "<Escape>").is_none());
	assert_eq!(keymap.len(Mode::Replace), 0);
}

#[test]
fn normal_mode_has_no_text_objects() {
	let keymap = Keymap::default();
	assert!(keymap.get(Mode::Normal, "iw").is_none());
	assert!(keymap.get(Mode::OperatorPending, "iw").is_some());
	assert!(keymap.get(Mode::Visual, "iw").is_some());
}

#[test]
fn default_tables_only_name_known_actions() {
	for (mode, tables) in DEFAULT_TABLES {
		for (keys, alias) in tables.iter().flat_map(|t| t.iter()) {
			for span in tokens(alias.as_bytes()) {
				if let Some((Token::ActionRef(name), _)) = Token::parse(span) {
					assert!(action::find(name).is_some(), "{mode:?} {keys} names unknown action {name}");
				}
			}
		}
	}
}
