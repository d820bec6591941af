use pretty_assertions::assert_eq;
use vix_primitives::{Mode, Motion, RopeText};

use super::*;

fn editor(text: &str) -> Editor {
	Editor::new(Box::new(RopeText::new(text)))
}

fn run(editor: &mut Editor, keys: &str) {
	assert_eq!(editor.feed(keys.as_bytes()).unwrap(), Status::Done, "keys {keys:?}");
}

#[test]
fn incomplete_utf8_tails() {
	assert_eq!(incomplete_tail(b""), 0);
	assert_eq!(incomplete_tail(b"abc"), 0);
	assert_eq!(incomplete_tail("é".as_bytes()), 0);
	assert_eq!(incomplete_tail(&"é".as_bytes()[..1]), 1);
	assert_eq!(incomplete_tail(&"😀".as_bytes()[..3]), 3);
	assert_eq!(incomplete_tail(b"a\x80"), 0);
}

#[test]
fn operator_and_motion_counts_multiply() {
	let mut ed = editor("a b c d e f g h");
	run(&mut ed, "2d3w");
	assert_eq!(ed.contents(), "g h");
	assert_eq!(ed.pending.count, None);
	assert!(ed.pending.operator.is_none());
}

#[test]
fn count_is_clamped() {
	let mut ed = editor("");
	run(&mut ed, "99999999999");
	assert_eq!(ed.pending.count, Some(COUNT_MAX));
	run(&mut ed, "<Escape>");
	assert_eq!(ed.pending.count, None);
}

#[test]
fn change_records_typed_keys_for_repeat() {
	let mut ed = editor("foo bar");
	run(&mut ed, "cwxyz<Escape>");
	assert_eq!(ed.contents(), "xyz bar");
	let repeat = ed.repeat.clone().unwrap();
	assert_eq!(repeat.op, Operator::Change);
	assert_eq!(repeat.target, Target::Motion(Motion::WordStartNext));
	assert_eq!(repeat.inserted, b"xyz<Escape>".to_vec());
	assert!(!ed.capturing);

	run(&mut ed, "w.");
	assert_eq!(ed.contents(), "xyz xyz");
	assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn yank_is_not_repeatable() {
	let mut ed = editor("one two");
	run(&mut ed, "dwyw");
	let repeat = ed.repeat.clone().unwrap();
	assert_eq!(repeat.op, Operator::Delete);
}

#[test]
fn insert_session_is_one_undo_step() {
	let mut ed = editor("ab");
	run(&mut ed, "Axy<Backspace>z<Escape>");
	assert_eq!(ed.contents(), "abxz");
	run(&mut ed, "u");
	assert_eq!(ed.contents(), "ab");
}

#[test]
fn exclusive_motion_stops_before_line_break() {
	let mut ed = editor("foo\nbar");
	run(&mut ed, "dw");
	assert_eq!(ed.contents(), "\nbar");
	run(&mut ed, "x");
	assert_eq!(ed.contents(), "bar");
}

#[test]
fn pending_operator_remembers_its_origin() {
	let mut ed = editor("\tone");
	run(&mut ed, "A");
	run(&mut ed, "<vis-operator-shift-left>");
	assert_eq!(ed.mode(), Mode::OperatorPending);
	assert!(ed.pending.operator.is_some_and(|p| p.from == Mode::Insert));
	run(&mut ed, "<vis-operator-shift-left>");
	assert_eq!(ed.mode(), Mode::Insert);
	assert_eq!(ed.contents(), "one");
}

#[test]
fn macro_recording_drops_the_stop_key() {
	let mut ed = editor("");
	run(&mut ed, "qa");
	assert!(ed.is_recording());
	run(&mut ed, "ihi<Escape>q");
	assert!(!ed.is_recording());
	let reg = ed.registers().get(RegisterId::from_byte(b'a').unwrap().0).unwrap();
	assert_eq!(reg.slots, vec![b"ihi<Escape>".to_vec()]);
}

#[test]
fn unknown_action_is_swallowed() {
	let mut ed = editor("abc");
	run(&mut ed, "<vis-no-such-thing>x");
	assert_eq!(ed.contents(), "bc");
}

#[test]
fn raw_byte_that_breaks_utf8_is_not_inserted() {
	let mut ed = editor("");
	run(&mut ed, "i<C-v>xffa<C-v>x41<Escape>");
	assert_eq!(ed.contents(), "aA");
	assert_eq!(ed.text().size(), 2);
}
