// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A library for reading and rewriting ID3v2 tags
//!
//! ID3v2 tags live at the very start of an audio file,
//! ahead of the audio stream itself.
//!
//! ```text
//! ┌────────────┬────────┬────────┬┄┄┄┬─────────┬┄┄┄┄┄┄┄┄┄┄┄┄┄╮
//! │ Tag Header │ Frame₀ │ Frame₁ ┆ … ┆ Padding │ Audio Data ┆ MP3 File
//! └────────────┴────────┴────────┴┄┄┄┴─────────┴┄┄┄┄┄┄┄┄┄┄┄┄┄╯
//! ```
//!
//! Versions 2.2, 2.3 and 2.4 of the format are supported
//! for both reading and writing.
//!
//! The [`file::File`] type handles the common case of
//! opening an audio file, adjusting some of its tag's fields,
//! and rewriting the file so that its audio data is left intact.
//!
//! # Example
//!
//! ```
//! use id3_codec::{Version, tag::Tag};
//!
//! let mut tag = Tag::new(Version::Id3v23);
//! tag.set_title("Track Title");
//! tag.set_artist("Artist Name");
//!
//! let bytes = tag.to_bytes().unwrap();
//! assert_eq!(&bytes[0..3], b"ID3");
//!
//! let parsed = Tag::from_bytes(&bytes).unwrap();
//! assert_eq!(parsed.title(), Some("Track Title"));
//! assert_eq!(parsed, tag);
//! ```

#![warn(missing_docs)]

use bitstream_io::{BitRead, BitWrite, FromBitStream, ToBitStream};

pub mod encoding;
pub mod file;
pub mod frame;
pub mod synchsafe;
pub mod tag;
pub mod unsynch;

/// A major ID3v2 version
///
/// The revision byte which follows the major version in a
/// tag header is carried by the [`tag::Tag`] itself.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Version {
    /// ID3v2.2, with 3 character frame identifiers
    Id3v22 = 2,
    /// ID3v2.3, the most widely deployed version
    Id3v23 = 3,
    /// ID3v2.4, with synchsafe frame sizes and UTF-8 text
    Id3v24 = 4,
}

impl Version {
    /// Length of a frame identifier in this version
    pub fn id_len(&self) -> usize {
        match self {
            Self::Id3v22 => 3,
            Self::Id3v23 | Self::Id3v24 => 4,
        }
    }

    /// Length of a frame header in this version
    pub fn frame_header_len(&self) -> usize {
        match self {
            Self::Id3v22 => 6,
            Self::Id3v23 | Self::Id3v24 => 10,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Id3v22 => "ID3v2.2".fmt(f),
            Self::Id3v23 => "ID3v2.3".fmt(f),
            Self::Id3v24 => "ID3v2.4".fmt(f),
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = Error;

    fn try_from(version: u8) -> Result<Self, Error> {
        match version {
            2 => Ok(Self::Id3v22),
            3 => Ok(Self::Id3v23),
            4 => Ok(Self::Id3v24),
            v => Err(Error::UnsupportedVersion(v)),
        }
    }
}

impl From<Version> for u8 {
    fn from(version: Version) -> u8 {
        version as u8
    }
}

impl FromBitStream for Version {
    type Error = Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        r.read_to::<u8>()?.try_into()
    }
}

impl ToBitStream for Version {
    type Error = std::io::Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        w.write_from(u8::from(*self))
    }
}

/// A possible error when reading or writing ID3v2 tags
#[derive(Debug)]
pub enum Error {
    /// A general I/O error from the underlying stream
    Io(std::io::Error),
    /// The "ID3" tag is missing
    MissingId3Tag,
    /// A major version other than 2, 3 or 4
    UnsupportedVersion(u8),
    /// A synchsafe integer byte with its high bit set
    InvalidSynchsafe,
    /// A value too large for its synchsafe field
    ExcessiveSynchsafe,
    /// An ID3v2.2 tag with its compression flag set
    CompressedTag,
    /// An extended header which overruns its tag
    InvalidExtendedHeader,
    /// A tag too large for its size field
    ExcessiveTagSize,
    /// A frame too large for its size field
    ExcessiveFrameSize,
    /// A frame identifier not valid for the tag's version
    InvalidFrameId,
    /// More than 255 child elements in a table of contents
    ExcessiveTocEntries,
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::MissingId3Tag => "missing ID3 tag".fmt(f),
            Self::UnsupportedVersion(v) => write!(f, "unsupported ID3v2 version {v}"),
            Self::InvalidSynchsafe => "invalid synchsafe integer".fmt(f),
            Self::ExcessiveSynchsafe => "value too large for synchsafe integer".fmt(f),
            Self::CompressedTag => "compressed ID3v2.2 tags are not supported".fmt(f),
            Self::InvalidExtendedHeader => "invalid extended header".fmt(f),
            Self::ExcessiveTagSize => "tag too large for ID3v2 header".fmt(f),
            Self::ExcessiveFrameSize => "frame too large for frame header".fmt(f),
            Self::InvalidFrameId => "invalid frame identifier for tag version".fmt(f),
            Self::ExcessiveTocEntries => "too many table of contents entries".fmt(f),
        }
    }
}
