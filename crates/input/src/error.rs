use thiserror::Error;
use vix_save::SaveError;

/// Hard failures of key dispatch.
///
/// Unknown keys, malformed key notation and incomplete commands are not
/// errors; they are absorbed or reported as [`crate::Status::NeedMore`].
#[derive(Debug, Error)]
pub enum DispatchError {
	/// Macro replay nested deeper than `macro_depth_max`.
	#[error("macro replay nested {depth} levels deep")]
	MacroDepthExceeded { depth: usize },
	#[error(transparent)]
	Save(#[from] SaveError),
}

/// Problems found while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid configuration: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("unknown mode `{0}`")]
	UnknownMode(String),
	/// A key binding with an empty key sequence.
	#[error("empty key sequence in `{mode}` bindings")]
	EmptyKey { mode: String },
}
