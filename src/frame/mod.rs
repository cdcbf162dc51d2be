// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For handling an ID3v2 tag's frames
//!
//! Every frame consists of a [`FrameHeader`] followed by its body.
//! How the body is laid out depends on the frame's identifier,
//! which the [`FrameRegistry`] maps to one of five frame kinds.
//!
//! | Kind | Content | Example Identifiers |
//! |------|---------|---------------------|
//! | [`FrameKind::Data`] | opaque bytes | `APIC`, `PRIV`, any unknown identifier |
//! | [`FrameKind::Text`] | [`TextFrame`] | `TIT2`, `TPE1`, `TALB` |
//! | [`FrameKind::UnsynchText`] | [`UnsynchTextFrame`] | `COMM`, `USLT` |
//! | [`FrameKind::Chapter`] | [`ChapterFrame`] | `CHAP` |
//! | [`FrameKind::Toc`] | [`TocFrame`] | `CTOC` |
//!
//! Frames which can't be interpreted, whether because of an
//! unknown identifier, an unsupported compression or encryption
//! flag, or a truncated body, are kept as opaque data
//! and written back out unchanged.
//!
//! Chapters and tables of contents may embed frames of their own,
//! including further chapters.  Only [`MAX_NESTING`] levels of
//! these are interpreted, and anything nested deeper is kept
//! as opaque data.

use crate::synchsafe::Synchsafe;
use crate::{Error, Version, unsynch};
use arrayvec::ArrayString;
use bitstream_io::{
    BigEndian, BitRead, BitReader, BitWrite, BitWriter, FromBitStream, FromBitStreamUsing,
    ToBitStream, ToBitStreamUsing,
};
use std::borrow::Cow;

mod chapter;
mod registry;
mod text;

pub use chapter::{ChapterFrame, TocFrame};
pub use registry::{Field, FrameRegistry};
pub use text::{TextFrame, UnsynchTextFrame};

/// How many levels of chapters and tables of contents
/// are interpreted within one another
pub const MAX_NESTING: usize = 4;

/// A 3 or 4 character frame identifier
///
/// Identifiers consist of uppercase ASCII letters and digits.
/// ID3v2.2 uses 3 character identifiers while ID3v2.3
/// and ID3v2.4 use 4 characters.
///
/// # Example
///
/// ```
/// use id3_codec::frame::FrameId;
///
/// assert!(FrameId::new("TIT2").is_ok());
/// assert!(FrameId::new("TT2").is_ok());
/// assert!(FrameId::new("tit2").is_err());
/// assert!(FrameId::new("TITLE").is_err());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FrameId(ArrayString<4>);

impl FrameId {
    /// Builds identifier from string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrameId`] if the string isn't
    /// 3 or 4 uppercase letters or digits.
    pub fn new(id: &str) -> Result<Self, Error> {
        Self::try_from(id.as_bytes())
    }

    /// Used for identifiers known to be valid
    pub(crate) fn new_unchecked(id: &'static str) -> Self {
        debug_assert!(Self::new(id).is_ok(), "invalid frame identifier {id:?}");
        Self(ArrayString::from(id).unwrap_or_default())
    }

    /// Our identifier as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Our length, in characters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, since identifiers are never empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&[u8]> for FrameId {
    type Error = Error;

    fn try_from(id: &[u8]) -> Result<Self, Error> {
        if matches!(id.len(), 3 | 4)
            && id
                .iter()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            std::str::from_utf8(id)
                .ok()
                .and_then(|s| ArrayString::from(s).ok())
                .map(Self)
                .ok_or(Error::InvalidFrameId)
        } else {
            Err(Error::InvalidFrameId)
        }
    }
}

impl std::str::FromStr for FrameId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<str> for FrameId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FrameId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A frame's two flag bytes
///
/// ID3v2.2 frames have no flags, so both bytes are always 0.
///
/// | Flag | ID3v2.3 | ID3v2.4 |
/// |------|--------:|--------:|
/// | compression | format bit 7 | format bit 3 |
/// | encryption | format bit 6 | format bit 2 |
/// | grouping identity | format bit 5 | format bit 6 |
/// | unsynchronisation | n/a | format bit 1 |
/// | data length indicator | n/a | format bit 0 |
///
/// Frames with compression, encryption or grouping flags
/// are kept as opaque data.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameFlags {
    /// Status message flags
    pub status: u8,
    /// Format description flags
    pub format: u8,
}

impl FrameFlags {
    const V23_OPAQUE: u8 = 0b1110_0000;
    const V24_OPAQUE: u8 = 0b0100_1100;
    const V24_UNSYNCHRONISATION: u8 = 0b0000_0010;
    const V24_DATA_LENGTH: u8 = 0b0000_0001;

    /// Whether the frame body can't be interpreted
    pub fn is_opaque(&self, version: Version) -> bool {
        match version {
            Version::Id3v22 => false,
            Version::Id3v23 => self.format & Self::V23_OPAQUE != 0,
            Version::Id3v24 => self.format & Self::V24_OPAQUE != 0,
        }
    }

    /// Whether the frame body has been unsynchronized
    ///
    /// An ID3v2.4 tag whose header has the unsynchronisation
    /// flag set also unsynchronizes every frame,
    /// whether this flag is set or not.
    pub fn unsynchronisation(&self, version: Version) -> bool {
        version == Version::Id3v24 && self.format & Self::V24_UNSYNCHRONISATION != 0
    }

    /// Whether the frame body is preceded by a data length indicator
    pub fn data_length_indicator(&self, version: Version) -> bool {
        version == Version::Id3v24 && self.format & Self::V24_DATA_LENGTH != 0
    }

    /// Our flags with any opaque transformations cleared
    fn interpreted(self, version: Version) -> Self {
        Self {
            status: self.status,
            format: match version {
                Version::Id3v22 => 0,
                Version::Id3v23 => self.format & !Self::V23_OPAQUE,
                Version::Id3v24 => self.format & !Self::V24_OPAQUE,
            },
        }
    }
}

impl FromBitStream for FrameFlags {
    type Error = std::io::Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        Ok(Self {
            status: r.read_to()?,
            format: r.read_to()?,
        })
    }
}

impl ToBitStream for FrameFlags {
    type Error = std::io::Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        w.write_from(self.status)?;
        w.write_from(self.format)
    }
}

/// An ID3v2 frame header
///
/// | Version | Identifier | Size | Flags |
/// |--------:|-----------:|------|------:|
/// | 2.2 | 3 bytes | 24 bit plain integer | none |
/// | 2.3 | 4 bytes | 32 bit plain integer | 2 bytes |
/// | 2.4 | 4 bytes | 32 bit synchsafe integer | 2 bytes |
///
/// # Example
/// ```
/// use bitstream_io::{BitReader, BitRead, BigEndian};
/// use id3_codec::Version;
/// use id3_codec::frame::{FrameHeader, FrameId, FrameFlags};
///
/// let data: &[u8] = &[b'T', b'I', b'T', b'2', 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
///
/// // ID3v2.3 sizes are plain integers
/// let mut r = BitReader::endian(data, BigEndian);
/// assert_eq!(
///     r.parse_using::<FrameHeader>(Version::Id3v23).unwrap(),
///     FrameHeader {
///         id: FrameId::new("TIT2").unwrap(),
///         size: 256,
///         flags: FrameFlags::default(),
///     },
/// );
///
/// // while ID3v2.4 sizes are synchsafe
/// let mut r = BitReader::endian(data, BigEndian);
/// assert_eq!(
///     r.parse_using::<FrameHeader>(Version::Id3v24).unwrap().size,
///     128,
/// );
/// ```
#[derive(Debug, Eq, PartialEq)]
pub struct FrameHeader {
    /// The frame's identifier
    pub id: FrameId,
    /// The frame body's size, in bytes
    pub size: u32,
    /// The frame's flags
    pub flags: FrameFlags,
}

impl FromBitStreamUsing for FrameHeader {
    type Context = Version;
    type Error = Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R, version: Version) -> Result<Self, Self::Error> {
        match version {
            Version::Id3v22 => Ok(Self {
                id: FrameId::try_from(r.read_to::<[u8; 3]>()?.as_slice())?,
                size: r.read::<24, u32>()?,
                flags: FrameFlags::default(),
            }),
            Version::Id3v23 => Ok(Self {
                id: FrameId::try_from(r.read_to::<[u8; 4]>()?.as_slice())?,
                size: r.read_to()?,
                flags: r.parse()?,
            }),
            Version::Id3v24 => Ok(Self {
                id: FrameId::try_from(r.read_to::<[u8; 4]>()?.as_slice())?,
                size: r.parse::<Synchsafe>()?.into(),
                flags: r.parse()?,
            }),
        }
    }
}

impl ToBitStreamUsing for FrameHeader {
    type Context = Version;
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W, version: Version) -> Result<(), Error> {
        if self.id.len() != version.id_len() {
            return Err(Error::InvalidFrameId);
        }

        w.write_bytes(self.id.as_str().as_bytes())?;
        match version {
            Version::Id3v22 => {
                if self.size >= 1 << 24 {
                    return Err(Error::ExcessiveFrameSize);
                }
                w.write::<24, u32>(self.size)?;
            }
            Version::Id3v23 => {
                w.write_from(self.size)?;
                w.build(&self.flags)?;
            }
            Version::Id3v24 => {
                if self.size > Synchsafe::MAX {
                    return Err(Error::ExcessiveFrameSize);
                }
                w.build(&Synchsafe(self.size))?;
                w.build(&self.flags)?;
            }
        }
        Ok(())
    }
}

/// The kinds of frame body layouts
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FrameKind {
    /// Opaque binary data
    #[default]
    Data,
    /// One or more text strings
    Text,
    /// Comments or lyrics, with a language and description
    UnsynchText,
    /// A chapter
    Chapter,
    /// A table of contents
    Toc,
}

/// A frame body which couldn't be interpreted
///
/// Such frames are kept as opaque data rather than
/// treated as errors.
#[derive(Debug)]
pub(crate) struct Malformed;

impl From<std::io::Error> for Malformed {
    fn from(_: std::io::Error) -> Self {
        Self
    }
}

impl From<crate::encoding::UnknownEncoding> for Malformed {
    fn from(_: crate::encoding::UnknownEncoding) -> Self {
        Self
    }
}

/// An ID3v2 frame's contents
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FrameContent {
    /// Opaque data, written exactly as stored
    ///
    /// Any ID3v2.4 unsynchronization has been removed
    /// and is reapplied when written.
    Data(Vec<u8>),
    /// Text information
    Text(TextFrame),
    /// Comments or lyrics
    UnsynchText(UnsynchTextFrame),
    /// A chapter
    Chapter(ChapterFrame),
    /// A table of contents
    Toc(TocFrame),
}

impl FrameContent {
    /// Our frame kind
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::Data(_) => FrameKind::Data,
            Self::Text(_) => FrameKind::Text,
            Self::UnsynchText(_) => FrameKind::UnsynchText,
            Self::Chapter(_) => FrameKind::Chapter,
            Self::Toc(_) => FrameKind::Toc,
        }
    }

    fn parse(
        kind: FrameKind,
        body: &[u8],
        registry: &FrameRegistry,
        depth: usize,
    ) -> Result<Self, Malformed> {
        match kind {
            FrameKind::Data => Ok(Self::Data(body.to_vec())),
            FrameKind::Text => TextFrame::parse(body).map(Self::Text),
            FrameKind::UnsynchText => UnsynchTextFrame::parse(body).map(Self::UnsynchText),
            FrameKind::Chapter => ChapterFrame::parse(body, registry, depth).map(Self::Chapter),
            FrameKind::Toc => TocFrame::parse(body, registry, depth).map(Self::Toc),
        }
    }
}

impl ToBitStreamUsing for FrameContent {
    type Context = Version;
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W, version: Version) -> Result<(), Error> {
        match self {
            Self::Data(data) => w.write_bytes(data).map_err(Error::Io),
            Self::Text(text) => w.build(text),
            Self::UnsynchText(text) => w.build(text),
            Self::Chapter(chapter) => w.build_using(chapter, version),
            Self::Toc(toc) => w.build_using(toc, version),
        }
    }
}

macro_rules! content {
    ($t:ty, $v:ident) => {
        impl From<$t> for FrameContent {
            fn from(content: $t) -> Self {
                Self::$v(content)
            }
        }

        impl<'f> TryFrom<&'f Frame> for &'f $t {
            type Error = ();

            fn try_from(frame: &'f Frame) -> Result<Self, ()> {
                match &frame.content {
                    FrameContent::$v(content) => Ok(content),
                    _ => Err(()),
                }
            }
        }

        impl<'f> TryFrom<&'f mut Frame> for &'f mut $t {
            type Error = ();

            fn try_from(frame: &'f mut Frame) -> Result<Self, ()> {
                match &mut frame.content {
                    FrameContent::$v(content) => Ok(content),
                    _ => Err(()),
                }
            }
        }
    };
}

content!(TextFrame, Text);
content!(UnsynchTextFrame, UnsynchText);
content!(ChapterFrame, Chapter);
content!(TocFrame, Toc);

/// An ID3v2 frame
///
/// ```text
/// ┌──────────────┬────────────────────────┐
/// │ Frame Header │       Frame Body       │
/// └──────────────┴────────────────────────┘
/// ```
///
/// # Example
///
/// ```
/// use id3_codec::Version;
/// use id3_codec::encoding::Encoding;
/// use id3_codec::frame::{Frame, FrameId, TextFrame};
///
/// let frame = Frame::new(
///     FrameId::new("TIT2").unwrap(),
///     TextFrame::new(Encoding::Latin1, "Title"),
/// );
///
/// assert_eq!(
///     frame.to_bytes(Version::Id3v23).unwrap(),
///     b"TIT2\x00\x00\x00\x06\x00\x00\x00Title",
/// );
/// assert_eq!(frame.serialized_size(Version::Id3v23).unwrap(), 16);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Frame {
    /// The frame's identifier
    pub id: FrameId,
    /// The frame's flags
    pub flags: FrameFlags,
    /// The frame's contents
    pub content: FrameContent,
}

impl Frame {
    /// Builds frame with the given identifier, content and no flags
    pub fn new<C: Into<FrameContent>>(id: FrameId, content: C) -> Self {
        Self {
            id,
            flags: FrameFlags::default(),
            content: content.into(),
        }
    }

    /// Builds frame from its header and body
    ///
    /// Bodies which can't be interpreted become opaque data.
    pub fn from_body(header: FrameHeader, body: &[u8], registry: &FrameRegistry) -> Self {
        Self::read(header, body, registry, false, 0)
    }

    /// Builds frame from its header and body,
    /// `depth` levels down within chapters or tables of contents
    fn read(
        header: FrameHeader,
        body: &[u8],
        registry: &FrameRegistry,
        tag_unsynchronisation: bool,
        depth: usize,
    ) -> Self {
        let FrameHeader { id, flags, .. } = header;
        let version = registry.version();
        let kind = registry.identify(&id);

        let body = match tag_unsynchronisation || flags.unsynchronisation(version) {
            true => Cow::Owned(unsynch::remove(body)),
            false => Cow::Borrowed(body),
        };

        let content = match kind {
            FrameKind::Data => FrameContent::Data(body.to_vec()),
            _ if flags.is_opaque(version) => {
                log::debug!(
                    "keeping {id} frame with format flags {:#04x} as data",
                    flags.format
                );
                FrameContent::Data(body.to_vec())
            }
            FrameKind::Chapter | FrameKind::Toc if depth >= MAX_NESTING => {
                log::debug!("keeping {id} frame nested {depth} levels deep as data");
                FrameContent::Data(body.to_vec())
            }
            kind => Self::strip_data_length(flags, &body, version)
                .and_then(|stripped| FrameContent::parse(kind, stripped, registry, depth))
                .unwrap_or_else(|Malformed| {
                    log::debug!("keeping malformed {id} frame as data");
                    FrameContent::Data(body.to_vec())
                }),
        };

        Self { id, flags, content }
    }

    /// Strips any data length indicator
    fn strip_data_length(
        flags: FrameFlags,
        body: &[u8],
        version: Version,
    ) -> Result<&[u8], Malformed> {
        match flags.data_length_indicator(version) {
            true => body.get(4..).ok_or(Malformed),
            false => Ok(body),
        }
    }

    /// Returns our frame body as written to a tag of the given version
    fn body(
        &self,
        version: Version,
        tag_unsynchronisation: bool,
    ) -> Result<Cow<'_, [u8]>, Error> {
        let body = match &self.content {
            FrameContent::Data(data) => Cow::Borrowed(data.as_slice()),
            content => {
                let mut encoded = Vec::new();
                BitWriter::endian(&mut encoded, BigEndian).build_using(content, version)?;

                if self.flags.data_length_indicator(version) {
                    let mut body = crate::synchsafe::encode::<4>(
                        u32::try_from(encoded.len()).map_err(|_| Error::ExcessiveFrameSize)?,
                    )?
                    .to_vec();
                    body.extend(encoded);
                    Cow::Owned(body)
                } else {
                    Cow::Owned(encoded)
                }
            }
        };

        let unsynchronised = tag_unsynchronisation || self.flags.unsynchronisation(version);
        Ok(match unsynchronised {
            true => Cow::Owned(unsynch::apply(&body)),
            false => body,
        })
    }

    /// Writes frame as a top-level frame of a tag
    ///
    /// In ID3v2.4 tags, `tag_unsynchronisation` unsynchronizes
    /// the frame's body regardless of its own flags.
    pub(crate) fn write_in_tag<W: BitWrite + ?Sized>(
        &self,
        w: &mut W,
        version: Version,
        tag_unsynchronisation: bool,
    ) -> Result<(), Error> {
        let body = self.body(version, tag_unsynchronisation)?;

        w.build_using(
            &FrameHeader {
                id: self.id,
                size: u32::try_from(body.len()).map_err(|_| Error::ExcessiveFrameSize)?,
                flags: match &self.content {
                    FrameContent::Data(_) => self.flags,
                    _ => self.flags.interpreted(version),
                },
            },
            version,
        )?;
        w.write_bytes(&body).map_err(Error::Io)
    }

    /// Returns frame as bytes, including its header
    ///
    /// # Errors
    ///
    /// Returns an error if our identifier isn't the right length
    /// for the version or the frame is too large for its header.
    pub fn to_bytes(&self, version: Version) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        BitWriter::endian(&mut bytes, BigEndian).build_using(self, version)?;
        Ok(bytes)
    }

    /// Returns size of frame, in bytes, including its header
    pub fn serialized_size(&self, version: Version) -> Result<u32, Error> {
        u32::try_from(self.to_bytes(version)?.len()).map_err(|_| Error::ExcessiveFrameSize)
    }

    /// Returns kind of frame
    pub fn kind(&self) -> FrameKind {
        self.content.kind()
    }

    /// Returns opaque data, if any
    pub fn as_data(&self) -> Option<&[u8]> {
        match &self.content {
            FrameContent::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Returns text frame, if any
    pub fn as_text(&self) -> Option<&TextFrame> {
        self.try_into().ok()
    }

    /// Returns comment or lyrics frame, if any
    pub fn as_unsynch_text(&self) -> Option<&UnsynchTextFrame> {
        self.try_into().ok()
    }

    /// Returns chapter frame, if any
    pub fn as_chapter(&self) -> Option<&ChapterFrame> {
        self.try_into().ok()
    }

    /// Returns table of contents frame, if any
    pub fn as_toc(&self) -> Option<&TocFrame> {
        self.try_into().ok()
    }
}

impl ToBitStreamUsing for Frame {
    type Context = Version;
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W, version: Version) -> Result<(), Error> {
        self.write_in_tag(w, version, false)
    }
}

/// Reads a tag's frames until the data is exhausted or padding is reached
///
/// Returns the frames and whatever data remains after them.
/// A frame header which is invalid, or whose size overruns the
/// data, ends the frame list early.
///
/// `unsynchronisation` is the ID3v2.4 tag header's flag,
/// which applies to every frame.
pub(crate) fn read_frames<'d>(
    data: &'d [u8],
    registry: &FrameRegistry,
    unsynchronisation: bool,
) -> (Vec<Frame>, &'d [u8]) {
    read_nested_frames(data, registry, unsynchronisation, 0)
}

/// Reads the frames embedded in a chapter or table of contents
/// found `depth` levels down
pub(crate) fn read_sub_frames(data: &[u8], registry: &FrameRegistry, depth: usize) -> Vec<Frame> {
    read_nested_frames(data, registry, false, depth + 1).0
}

fn read_nested_frames<'d>(
    mut data: &'d [u8],
    registry: &FrameRegistry,
    unsynchronisation: bool,
    depth: usize,
) -> (Vec<Frame>, &'d [u8]) {
    let version = registry.version();
    let mut frames = Vec::new();

    // a header beginning with a 0 byte is the start of padding
    while let Some((header, rest)) = data
        .split_at_checked(version.frame_header_len())
        .filter(|(header, _)| header[0] != 0)
    {
        let header: FrameHeader = match BitReader::endian(header, BigEndian).parse_using(version) {
            Ok(header) => header,
            Err(err) => {
                log::warn!(
                    "{err} after {} frames, treating remainder as padding",
                    frames.len()
                );
                break;
            }
        };

        let Some(body) = usize::try_from(header.size)
            .ok()
            .and_then(|size| rest.get(..size))
        else {
            log::warn!(
                "{} frame size {} exceeds remaining {} bytes, treating remainder as padding",
                header.id,
                header.size,
                rest.len()
            );
            break;
        };

        data = &rest[body.len()..];
        frames.push(Frame::read(header, body, registry, unsynchronisation, depth));
    }

    (frames, data)
}

#[test]
fn test_opaque_frames() {
    let v24 = FrameRegistry::new(Version::Id3v24);

    // a compressed text frame is kept as-is
    let compressed = Frame::from_body(
        FrameHeader {
            id: FrameId::new("TIT2").unwrap(),
            size: 4,
            flags: FrameFlags {
                status: 0,
                format: 0b0000_1001,
            },
        },
        &[0x00, 0x00, 0x00, 0x10],
        &v24,
    );
    assert_eq!(compressed.as_data(), Some([0x00, 0x00, 0x00, 0x10].as_slice()));
    assert_eq!(
        compressed.to_bytes(Version::Id3v24).unwrap(),
        b"TIT2\x00\x00\x00\x04\x00\x09\x00\x00\x00\x10",
    );

    // an unknown encoding byte is kept as-is
    let unknown = Frame::from_body(
        FrameHeader {
            id: FrameId::new("TALB").unwrap(),
            size: 2,
            flags: FrameFlags::default(),
        },
        &[0x07, b'A'],
        &v24,
    );
    assert_eq!(unknown.kind(), FrameKind::Data);
}

#[test]
fn test_unsynchronized_frame() {
    use crate::encoding::Encoding;

    let v24 = FrameRegistry::new(Version::Id3v24);
    let flags = FrameFlags {
        status: 0,
        format: 0b0000_0011,
    };

    let mut frame = Frame::new(
        FrameId::new("TIT2").unwrap(),
        TextFrame::new(Encoding::Latin1, "\u{FF}\u{E0}"),
    );
    frame.flags = flags;

    let bytes = frame.to_bytes(Version::Id3v24).unwrap();
    assert_eq!(
        bytes,
        b"TIT2\x00\x00\x00\x08\x00\x03\x00\x00\x00\x03\x00\xFF\x00\xE0",
    );

    let (frames, rest) = read_frames(&bytes, &v24, false);
    assert!(rest.is_empty());
    assert_eq!(frames, vec![frame]);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "invalid frame identifier")]
fn test_unchecked_frame_id() {
    FrameId::new_unchecked("Title");
}

#[test]
fn test_truncated_frames() {
    let v23 = FrameRegistry::new(Version::Id3v23);

    let mut data = b"TIT2\x00\x00\x00\x03\x00\x00\x00AB".to_vec();
    data.extend(b"TPE1\x00\x00\x01\x00\x00\x00\x00Artist");

    let (frames, rest) = read_frames(&data, &v23, false);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].as_text().unwrap().value(), "AB");
    assert_eq!(rest.len(), 17);

    // garbage identifiers also end the list
    let (frames, rest) = read_frames(
        b"TIT2\x00\x00\x00\x02\x00\x00\x00Ati!2\x00\x00\x00\x01\x00\x00X",
        &v23,
        false,
    );
    assert_eq!(frames.len(), 1);
    assert_eq!(rest, b"ti!2\x00\x00\x00\x01\x00\x00X");
}
