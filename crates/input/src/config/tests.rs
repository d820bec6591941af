use std::time::Duration;

use vix_primitives::Mode;

use super::{Config, Options};
use crate::error::ConfigError;
use crate::keymap::{Binding, MatchResult};

#[test]
fn defaults_without_source() {
	let config = Config::parse("").unwrap();
	assert_eq!(config.options, Options::default());
	assert_eq!(config.options.tabwidth, 8);
	assert_eq!(config.options.alias_depth_max, 32);
	assert_eq!(config.options.macro_depth_max, 16);
	assert_eq!(config.options.pending_timeout(), None);
	assert!(config.keys.is_empty());
}

#[test]
fn options_override_defaults() {
	let config = Config::parse(
		r#"
		[options]
		tabwidth = 4
		expandtab = true
		pending_timeout_ms = 250
		"#,
	)
	.unwrap();
	assert_eq!(config.options.tabwidth, 4);
	assert!(config.options.expandtab);
	assert!(!config.options.autoindent);
	assert_eq!(config.options.pending_timeout(), Some(Duration::from_millis(250)));
}

#[test]
fn rejects_unknown_modes_and_empty_keys() {
	let err = Config::parse("[keys.command]\nx = \"y\"").unwrap_err();
	assert!(matches!(err, ConfigError::UnknownMode(ref m) if m == "command"));

	let err = Config::parse("[keys.normal]\n\"\" = \"y\"").unwrap_err();
	assert!(matches!(err, ConfigError::EmptyKey { ref mode } if mode == "normal"));

	let err = Config::parse("[options]\ntabwidth = \"wide\"").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn configured_bindings_shadow_defaults() {
	let config = Config::parse(
		r#"
		[keys.normal]
		x = "dd"
		"#,
	)
	.unwrap();
	let keymap = config.keymap();
	match keymap.lookup(Mode::Normal, b"x") {
		MatchResult::Complete { value: Binding::Alias(alias), len: 1 } => assert_eq!(&**alias, b"dd"),
		other => panic!("unexpected lookup {other:?}"),
	}
	assert!(matches!(keymap.lookup(Mode::Normal, b"w"), MatchResult::Complete { .. }));
}
