//! Key notation used by the editor core.
//!
//! Keys travel through the editor as a byte stream in vi-like notation:
//! plain UTF-8 codepoints (`a`, `ä`), bracketed symbolic keys (`<Enter>`,
//! `<F5>`), modified keys (`<C-w>`, `<M-S-Left>`) and action references
//! (`<vis-motion-line-up>`).
//!
//! * [`next_len`] splits off the first token of a stream
//! * [`Token`] is the structured view of one token
//! * [`decode`] translates raw terminal input into key notation

pub mod decode;
mod parser;
mod symbolic;
mod token;

pub use decode::decode;
pub use parser::{KEY_LENGTH_MAX, Tokens, next_len, tokens, unfinished_len};
pub use symbolic::SYMBOLIC_KEYS;
pub use token::{Key, Modifiers, Token, canonical};
