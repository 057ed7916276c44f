//! Byte decoding and tag scanning for fetched documents.

pub mod decode;
pub mod tokenizer;

pub use decode::decode;
pub use tokenizer::{Tag, Token, Tokenizer};
