//! Editor options and user key bindings, loaded from TOML.
//!
//! ```toml
//! [options]
//! tabwidth = 4
//! expandtab = true
//!
//! [keys.normal]
//! "<C-s>" = "<vis-selections-save>"
//! Q = "@q"
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use vix_primitives::Mode;

use crate::error::ConfigError;
use crate::keymap::Keymap;

#[cfg(test)]
mod tests;

/// Tunables of one editor instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
	/// Display width of a tab and the indent step of shift operators.
	pub tabwidth: usize,
	/// Insert spaces instead of tabs.
	pub expandtab: bool,
	/// Copy the indentation of the current line into new lines.
	pub autoindent: bool,
	/// Alias substitutions allowed between two executed actions.
	pub alias_depth_max: usize,
	/// Nesting limit of macro replay.
	pub macro_depth_max: usize,
	/// Milliseconds after which an ambiguous key sequence resolves to its
	/// longest complete binding. Unset means wait forever.
	pub pending_timeout_ms: Option<u64>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			tabwidth: 8,
			expandtab: false,
			autoindent: false,
			alias_depth_max: 32,
			macro_depth_max: 16,
			pending_timeout_ms: None,
		}
	}
}

impl Options {
	pub fn pending_timeout(&self) -> Option<Duration> {
		self.pending_timeout_ms.map(Duration::from_millis)
	}
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub options: Options,
	/// Key bindings per mode name, mapping a key sequence to its expansion.
	pub keys: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
	/// Parses and validates a TOML configuration.
	pub fn parse(source: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(source)?;
		for (mode, bindings) in &config.keys {
			if Mode::from_name(mode).is_none() {
				return Err(ConfigError::UnknownMode(mode.clone()));
			}
			if bindings.keys().any(String::is_empty) {
				return Err(ConfigError::EmptyKey { mode: mode.clone() });
			}
		}
		Ok(config)
	}

	/// Builds the keymap: configured bindings first, then the defaults.
	pub fn keymap(&self) -> Arc<Keymap> {
		let mut builder = Keymap::builder();
		for (name, bindings) in &self.keys {
			let Some(mode) = Mode::from_name(name) else {
				continue;
			};
			for (keys, alias) in bindings {
				builder = builder.bind(mode, keys, alias);
			}
		}
		Arc::new(builder.defaults().build())
	}
}
