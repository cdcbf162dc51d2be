// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::Malformed;
use crate::Error;
use crate::encoding::Encoding;
use bitstream_io::{BitWrite, ToBitStream};

/// A text information frame, such as `TIT2` or `TPE1`
///
/// | Bytes | Field | Meaning |
/// |------:|------:|---------|
/// | 1 | `encoding` | text encoding |
/// | rest of frame | `values` | null-separated strings |
///
/// Multiple values are only officially supported by ID3v2.4.
///
/// # Example
///
/// ```
/// use bitstream_io::{BitWriter, BitWrite, BigEndian};
/// use id3_codec::encoding::Encoding;
/// use id3_codec::frame::TextFrame;
///
/// let frame = TextFrame {
///     encoding: Encoding::Utf8,
///     values: vec!["Artist 1".to_owned(), "Artist 2".to_owned()],
/// };
///
/// let mut data = Vec::new();
/// BitWriter::endian(&mut data, BigEndian).build(&frame).unwrap();
/// assert_eq!(data, b"\x03Artist 1\x00Artist 2");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextFrame {
    /// The encoding of our values
    pub encoding: Encoding,
    /// The text values
    pub values: Vec<String>,
}

impl TextFrame {
    /// Builds frame with a single value
    pub fn new<S: Into<String>>(encoding: Encoding, value: S) -> Self {
        Self {
            encoding,
            values: vec![value.into()],
        }
    }

    /// Returns our first value, or an empty string
    pub fn value(&self) -> &str {
        self.values.first().map(|s| s.as_str()).unwrap_or_default()
    }

    pub(super) fn parse(body: &[u8]) -> Result<Self, Malformed> {
        let (encoding, text) = body.split_first().ok_or(Malformed)?;
        let encoding = Encoding::try_from(*encoding)?;

        Ok(Self {
            encoding,
            values: encoding.decode_all(text),
        })
    }
}

impl ToBitStream for TextFrame {
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        w.write_from(u8::from(self.encoding))?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                w.write_bytes(&[0, 0][..self.encoding.terminator_len()])?;
            }
            w.write_bytes(&self.encoding.encode_unterminated(value))?;
        }

        // a trailing empty value needs its own terminator
        // or it would disappear when read back
        if self.values.len() > 1 && self.values.last().is_some_and(|v| v.is_empty()) {
            w.write_bytes(&[0, 0][..self.encoding.terminator_len()])?;
        }

        Ok(())
    }
}

/// A comment or unsynchronized lyrics frame, such as `COMM` or `USLT`
///
/// | Bytes | Field | Meaning |
/// |------:|------:|---------|
/// | 1 | `encoding` | text encoding |
/// | 3 | `language` | ISO-639-2 language code |
/// | variable | `description` | terminated content description |
/// | rest of frame | `text` | terminated text |
///
/// # Example
///
/// ```
/// use bitstream_io::{BitWriter, BitWrite, BigEndian};
/// use id3_codec::encoding::Encoding;
/// use id3_codec::frame::UnsynchTextFrame;
///
/// let frame = UnsynchTextFrame::new(Encoding::Latin1, "Comment", "Foo");
///
/// let mut data = Vec::new();
/// BitWriter::endian(&mut data, BigEndian).build(&frame).unwrap();
/// assert_eq!(data, b"\x00engComment\x00Foo\x00");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnsynchTextFrame {
    /// The encoding of our description and text
    pub encoding: Encoding,
    /// Three character language code
    pub language: [u8; 3],
    /// A short content description
    pub description: String,
    /// The actual text
    pub text: String,
}

impl UnsynchTextFrame {
    /// The language used when none is given
    pub const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

    /// Builds frame in the default language
    pub fn new<D, T>(encoding: Encoding, description: D, text: T) -> Self
    where
        D: Into<String>,
        T: Into<String>,
    {
        Self {
            encoding,
            language: Self::DEFAULT_LANGUAGE,
            description: description.into(),
            text: text.into(),
        }
    }

    /// Our language code as a string
    pub fn language(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.language)
    }

    pub(super) fn parse(body: &[u8]) -> Result<Self, Malformed> {
        let [encoding, l1, l2, l3, rest @ ..] = body else {
            return Err(Malformed);
        };
        let encoding = Encoding::try_from(*encoding)?;
        let (description, consumed) = encoding.decode(rest);
        let (text, _) = encoding.decode(&rest[consumed..]);

        Ok(Self {
            encoding,
            language: [*l1, *l2, *l3],
            description,
            text,
        })
    }
}

impl ToBitStream for UnsynchTextFrame {
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        w.write_from(u8::from(self.encoding))?;
        w.write_from(self.language)?;
        w.write_bytes(&self.encoding.encode(&self.description))?;
        w.write_bytes(&self.encoding.encode(&self.text))?;
        Ok(())
    }
}

#[test]
fn test_malformed_comment() {
    // UTF-16 with an odd length and a partial terminator
    let frame =
        UnsynchTextFrame::parse(&[0x01, b'e', b'n', b'g', 0xFF, 0xFE, 0x13, 0x27, 0x00]).unwrap();
    assert_eq!(frame.encoding, Encoding::Utf16);
    assert_eq!(frame.description, "✓");
    assert_eq!(frame.text, "");

    // too short for even a language
    assert!(UnsynchTextFrame::parse(&[0x01, b'e']).is_err());
    assert!(TextFrame::parse(&[]).is_err());

    // missing terminator on the text
    let frame = UnsynchTextFrame::parse(b"\x00engDesc\x00Text").unwrap();
    assert_eq!(frame.text, "Text");
}

#[test]
fn test_text_values() {
    use bitstream_io::{BigEndian, BitWriter};

    for values in [
        vec![String::new()],
        vec!["Paloalto".to_owned()],
        vec!["A".to_owned(), String::new()],
        vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
    ] {
        for encoding in [Encoding::Latin1, Encoding::Utf16, Encoding::Utf8] {
            let frame = TextFrame {
                encoding,
                values: values.clone(),
            };
            let mut data = Vec::new();
            BitWriter::endian(&mut data, BigEndian)
                .build(&frame)
                .unwrap();
            assert_eq!(TextFrame::parse(&data).unwrap(), frame);
        }
    }

    // a terminated value reads as one value
    assert_eq!(
        TextFrame::parse(b"\x00Paloalto\x00").unwrap().values,
        vec!["Paloalto".to_owned()]
    );
}
