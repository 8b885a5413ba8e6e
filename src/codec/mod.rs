//! Codec module - JSON payload decoding and configurable encoding.
//!
//! The wire format is JSON in both directions; requests decode into the
//! handler's input type and responses encode from its output type. Two
//! output behaviors are configurable per adapter and fixed for its
//! lifetime:
//!
//! - [`EncodeConfig::escape_html`] - escape `<`, `>` and `&` inside
//!   strings (off by default)
//! - [`EncodeConfig::indent_prefix`] / [`EncodeConfig::indent`] -
//!   pretty-print with a per-line prefix and indent unit; both empty
//!   (the default) selects compact output
//!
//! # Design
//!
//! The codec is a marker struct with static methods rather than a trait
//! object, keeping codec selection a compile-time concern. Encoding writes
//! into a caller-owned buffer so the invocation path can reuse one
//! allocation across invocations.
//!
//! # Example
//!
//! ```
//! use faaswire::codec::{EncodeConfig, JsonCodec};
//!
//! let encoded = JsonCodec::encode(&"hello", &EncodeConfig::default()).unwrap();
//! assert_eq!(encoded, br#""hello""#);
//!
//! let decoded: String = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, "hello");
//! ```

mod json;

pub use json::{EncodeConfig, JsonCodec, WireFormatter};
