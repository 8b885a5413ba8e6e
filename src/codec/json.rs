//! JSON codec using `serde_json` with a configurable output formatter.
//!
//! Decoding is plain `serde_json` deserialization. Encoding goes through
//! [`WireFormatter`], which layers two output behaviors on top of the
//! standard serializer:
//!
//! - **HTML escaping**: when enabled, `<`, `>` and `&` inside strings are
//!   written as `\u003c`, `\u003e` and `\u0026` so payloads can be embedded
//!   in HTML-adjacent transports without further quoting.
//! - **Indentation**: a per-line prefix plus an indent unit, written before
//!   every element. Both empty (the default) selects compact output.
//!
//! Output never carries a trailing newline; compact and pretty forms are
//! exactly what the serializer conventionally emits.
//!
//! # Example
//!
//! ```
//! use faaswire::codec::{EncodeConfig, JsonCodec};
//!
//! let config = EncodeConfig {
//!     escape_html: true,
//!     ..EncodeConfig::default()
//! };
//! let encoded = JsonCodec::encode(&"<html>", &config).unwrap();
//! assert_eq!(encoded, br#""\u003chtml\u003e""#);
//!
//! let decoded: String = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, "<html>");
//! ```

use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::{FaaswireError, Result};

/// Output settings for [`JsonCodec::encode_into`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeConfig {
    /// Escape `<`, `>` and `&` inside strings.
    pub escape_html: bool,
    /// Prefix written at the start of every line in pretty output.
    pub indent_prefix: String,
    /// Indent unit repeated per nesting level in pretty output.
    pub indent: String,
}

impl EncodeConfig {
    /// Whether pretty-printing is active (prefix or indent non-empty).
    pub fn is_pretty(&self) -> bool {
        !(self.indent_prefix.is_empty() && self.indent.is_empty())
    }
}

/// JSON codec for invocation payloads.
pub struct JsonCodec;

impl JsonCodec {
    /// Decode one JSON document into a freshly constructed value.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the bytes are not a single well-formed
    /// JSON document matching type `T`.
    #[inline]
    pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(FaaswireError::Decode)
    }

    /// Encode a value as JSON into `buf`, honoring `config`.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the value cannot be serialized.
    pub fn encode_into<T: Serialize>(
        value: &T,
        buf: &mut Vec<u8>,
        config: &EncodeConfig,
    ) -> Result<()> {
        let formatter = WireFormatter::new(config);
        let mut serializer = serde_json::Serializer::with_formatter(&mut *buf, formatter);
        value
            .serialize(&mut serializer)
            .map_err(FaaswireError::Encode)
    }

    /// Encode a value as JSON into a new buffer.
    pub fn encode<T: Serialize>(value: &T, config: &EncodeConfig) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        Self::encode_into(value, &mut buf, config)?;
        Ok(buf)
    }
}

/// `serde_json` formatter implementing the configurable output behaviors.
///
/// Compact mode defers entirely to the default formatter methods; pretty
/// mode mirrors the conventional pretty printer, with the configured
/// prefix written once at the start of each line before the indentation.
pub struct WireFormatter<'a> {
    current_indent: usize,
    has_value: bool,
    prefix: &'a str,
    indent: &'a str,
    pretty: bool,
    escape_html: bool,
}

impl<'a> WireFormatter<'a> {
    /// Create a formatter for the given output settings.
    pub fn new(config: &'a EncodeConfig) -> Self {
        Self {
            current_indent: 0,
            has_value: false,
            prefix: &config.indent_prefix,
            indent: &config.indent,
            pretty: config.is_pretty(),
            escape_html: config.escape_html,
        }
    }

    fn write_indent<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(self.prefix.as_bytes())?;
        for _ in 0..self.current_indent {
            writer.write_all(self.indent.as_bytes())?;
        }
        Ok(())
    }
}

impl<'a> Formatter for WireFormatter<'a> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            self.current_indent += 1;
            self.has_value = false;
        }
        writer.write_all(b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            self.current_indent -= 1;
            if self.has_value {
                writer.write_all(b"\n")?;
                self.write_indent(writer)?;
            }
        }
        writer.write_all(b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            writer.write_all(if first { b"\n" } else { b",\n" })?;
            self.write_indent(writer)
        } else if first {
            Ok(())
        } else {
            writer.write_all(b",")
        }
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            self.has_value = true;
        }
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            self.current_indent += 1;
            self.has_value = false;
        }
        writer.write_all(b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            self.current_indent -= 1;
            if self.has_value {
                writer.write_all(b"\n")?;
                self.write_indent(writer)?;
            }
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            writer.write_all(if first { b"\n" } else { b",\n" })?;
            self.write_indent(writer)
        } else if first {
            Ok(())
        } else {
            writer.write_all(b",")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(if self.pretty { b": " } else { b":" })
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.pretty {
            self.has_value = true;
        }
        Ok(())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.escape_html {
            return writer.write_all(fragment.as_bytes());
        }

        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let escape: &[u8] = match byte {
                b'<' => b"\\u003c",
                b'>' => b"\\u003e",
                b'&' => b"\\u0026",
                _ => continue,
            };
            if start < i {
                writer.write_all(&bytes[start..i])?;
            }
            writer.write_all(escape)?;
            start = i + 1;
        }
        writer.write_all(&bytes[start..])
    }
}
