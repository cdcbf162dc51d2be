// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For handling text in one of the ID3v2 text encodings
//!
//! Text-bearing frames begin with a single byte
//! indicating how the rest of their text is encoded.
//!
//! | Byte | Encoding | Terminator |
//! |-----:|----------|-----------:|
//! | 0 | ISO-8859-1 | `00` |
//! | 1 | UTF-16 with byte order mark | `00 00` |
//! | 2 | UTF-16BE without byte order mark | `00 00` |
//! | 3 | UTF-8 (ID3v2.4 only) | `00` |
//!
//! Decoding never fails.  Malformed input, such as
//! UTF-16 text with an odd number of bytes or a missing
//! terminator, is decoded as well as it can be.

use crate::Version;

/// A text encoding
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Encoding {
    /// ISO-8859-1
    #[default]
    Latin1 = 0,
    /// UTF-16 with byte order mark
    Utf16 = 1,
    /// UTF-16, big-endian, without byte order mark
    Utf16Be = 2,
    /// UTF-8
    Utf8 = 3,
}

impl Encoding {
    /// Length of a string terminator, in bytes
    pub fn terminator_len(self) -> usize {
        match self {
            Self::Latin1 | Self::Utf8 => 1,
            Self::Utf16 | Self::Utf16Be => 2,
        }
    }

    /// The most compact encoding able to hold the given text
    /// in the given version
    ///
    /// # Example
    ///
    /// ```
    /// use id3_codec::{Version, encoding::Encoding};
    ///
    /// assert_eq!(Encoding::preferred(Version::Id3v23, "Café"), Encoding::Latin1);
    /// assert_eq!(Encoding::preferred(Version::Id3v23, "✓"), Encoding::Utf16);
    /// assert_eq!(Encoding::preferred(Version::Id3v24, "✓"), Encoding::Utf8);
    /// ```
    pub fn preferred(version: Version, text: &str) -> Self {
        match version {
            Version::Id3v24 => Self::Utf8,
            Version::Id3v22 | Version::Id3v23 => {
                if text.chars().all(|c| u32::from(c) <= 0xFF) {
                    Self::Latin1
                } else {
                    Self::Utf16
                }
            }
        }
    }

    /// Decodes a single terminated string
    ///
    /// Returns the decoded string and the number of bytes consumed,
    /// including the terminator.  If no terminator is found,
    /// all the data is consumed.
    ///
    /// # Example
    ///
    /// ```
    /// use id3_codec::encoding::Encoding;
    ///
    /// assert_eq!(
    ///     Encoding::Latin1.decode(b"Title\0rest"),
    ///     ("Title".to_owned(), 6),
    /// );
    ///
    /// // a dangling byte and a missing terminator are tolerated
    /// assert_eq!(
    ///     Encoding::Utf16.decode(&[0xFF, 0xFE, 0x13, 0x27, 0x00]),
    ///     ("✓".to_owned(), 5),
    /// );
    /// ```
    pub fn decode(self, data: &[u8]) -> (String, usize) {
        match self.find_terminator(data) {
            Some(end) => (
                self.decode_unterminated(&data[..end]),
                end + self.terminator_len(),
            ),
            None => (self.decode_unterminated(data), data.len()),
        }
    }

    /// Decodes all the null-separated strings in the data
    ///
    /// A single trailing terminator does not add an extra empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use id3_codec::encoding::Encoding;
    ///
    /// assert_eq!(
    ///     Encoding::Utf8.decode_all(b"Artist 1\0Artist 2\0"),
    ///     vec!["Artist 1".to_owned(), "Artist 2".to_owned()],
    /// );
    /// ```
    pub fn decode_all(self, mut data: &[u8]) -> Vec<String> {
        let mut values = Vec::new();

        loop {
            let (value, consumed) = self.decode(data);
            values.push(value);
            data = &data[consumed..];
            if data.is_empty() {
                break values;
            }
        }
    }

    /// Decodes the whole of data as a single string
    pub fn decode_unterminated(self, data: &[u8]) -> String {
        match self {
            Self::Latin1 => data.iter().copied().map(char::from).collect(),
            Self::Utf8 => String::from_utf8_lossy(data).into_owned(),
            Self::Utf16 => match data {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                // without a byte order mark, assume big-endian
                rest => decode_utf16(rest, u16::from_be_bytes),
            },
            Self::Utf16Be => decode_utf16(data, u16::from_be_bytes),
        }
    }

    /// Encodes string followed by a terminator
    ///
    /// # Example
    ///
    /// ```
    /// use id3_codec::encoding::Encoding;
    ///
    /// assert_eq!(Encoding::Latin1.encode("abc"), b"abc\0");
    /// assert_eq!(
    ///     Encoding::Utf16.encode("a"),
    ///     [0xFF, 0xFE, b'a', 0x00, 0x00, 0x00],
    /// );
    /// ```
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut data = self.encode_unterminated(text);
        data.resize(data.len() + self.terminator_len(), 0);
        data
    }

    /// Encodes string without a terminator
    ///
    /// Characters ISO-8859-1 can't represent are replaced by `?`
    pub fn encode_unterminated(self, text: &str) -> Vec<u8> {
        match self {
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).unwrap_or(b'?'))
                .collect(),
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16 => [0xFF, 0xFE]
                .into_iter()
                .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
                .collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    fn find_terminator(self, data: &[u8]) -> Option<usize> {
        match self {
            Self::Latin1 | Self::Utf8 => data.iter().position(|b| *b == 0),
            Self::Utf16 | Self::Utf16Be => data
                .chunks_exact(2)
                .position(|pair| pair == [0, 0])
                .map(|pair| pair * 2),
        }
    }
}

fn decode_utf16(data: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    // any odd trailing byte is dropped by chunks_exact
    char::decode_utf16(data.chunks_exact(2).map(|pair| unit([pair[0], pair[1]])))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

impl From<Encoding> for u8 {
    fn from(encoding: Encoding) -> u8 {
        encoding as u8
    }
}

impl TryFrom<u8> for Encoding {
    type Error = UnknownEncoding;

    fn try_from(byte: u8) -> Result<Self, UnknownEncoding> {
        match byte {
            0 => Ok(Self::Latin1),
            1 => Ok(Self::Utf16),
            2 => Ok(Self::Utf16Be),
            3 => Ok(Self::Utf8),
            b => Err(UnknownEncoding(b)),
        }
    }
}

/// An encoding byte other than 0, 1, 2 or 3
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnknownEncoding(pub u8);

impl std::error::Error for UnknownEncoding {}

impl std::fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "unknown text encoding {}", self.0)
    }
}

#[test]
fn test_malformed_text() {
    // none of these may panic
    for encoding in [
        Encoding::Latin1,
        Encoding::Utf16,
        Encoding::Utf16Be,
        Encoding::Utf8,
    ] {
        for len in 0..32 {
            let data = (0..len).map(|_| fastrand::u8(..)).collect::<Vec<u8>>();
            let (_, consumed) = encoding.decode(&data);
            assert!(consumed <= data.len());
            assert!(!encoding.decode_all(&data).is_empty());
        }
    }

    // dangling high surrogate
    assert_eq!(
        Encoding::Utf16Be.decode(&[0xD8, 0x00]),
        ("\u{FFFD}".to_owned(), 2)
    );

    // terminator must be aligned
    assert_eq!(
        Encoding::Utf16Be.decode(&[0x01, 0x00, 0x00, 0x41, 0x00, 0x00]),
        ("\u{100}A".to_owned(), 6)
    );

    assert_eq!(Encoding::Utf16.decode(&[]), (String::new(), 0));
    assert_eq!(Encoding::Utf8.decode(&[0xC3]), ("\u{FFFD}".to_owned(), 1));
}

#[test]
fn test_text_roundtrip() {
    for (encoding, text) in [
        (Encoding::Latin1, "Nice Life (Feat. Basick)"),
        (Encoding::Latin1, "Café"),
        (Encoding::Utf16, "✓ 𝄞"),
        (Encoding::Utf16Be, "✓ 𝄞"),
        (Encoding::Utf8, "✓ 𝄞"),
        (Encoding::Utf16, ""),
    ] {
        let mut data = encoding.encode(text);
        let len = data.len();
        data.extend(b"trailing");
        assert_eq!(encoding.decode(&data), (text.to_owned(), len));
    }

    assert_eq!(Encoding::Latin1.encode_unterminated("✓"), b"?");
}
