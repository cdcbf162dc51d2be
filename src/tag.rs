// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For handling a complete ID3v2 tag
//!
//! ```text
//! ┌────────────┬─────────────────┬────────┬┄┄┄┬─────────┬────────┐
//! │ Tag Header │ Extended Header │ Frame₀ ┆ … ┆ Padding │ Footer │
//! └────────────┴─────────────────┴────────┴┄┄┄┴─────────┴────────┘
//! ```
//!
//! The extended header is optional and only found in
//! ID3v2.3 and ID3v2.4 tags.  The footer is optional and
//! only found in ID3v2.4 tags, which then have no padding.

use crate::encoding::Encoding;
use crate::frame::{
    ChapterFrame, Field, Frame, FrameId, FrameRegistry, TextFrame, TocFrame, UnsynchTextFrame,
    read_frames,
};
use crate::synchsafe::Synchsafe;
use crate::{Error, Version, unsynch};
use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter, FromBitStream, ToBitStream};
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

/// The tag header's magic number
pub const ID3_TAG: [u8; 3] = *b"ID3";

/// The tag footer's magic number
pub const FOOTER_TAG: [u8; 3] = *b"3DI";

/// The size of a tag header or footer, in bytes
pub const HEADER_LEN: u32 = 10;

/// A tag header's flags byte
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 1 | `unsynchronisation` | tag body has been unsynchronized
/// | 1 | `extended_header` | extended header present (compression in ID3v2.2)
/// | 1 | `experimental` | tag is experimental
/// | 1 | `footer` | footer present (ID3v2.4 only)
/// | 4 | `reserved` | always 0, but kept as-is
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TagFlags {
    /// Whether the tag is unsynchronized
    ///
    /// In ID3v2.2 and ID3v2.3 this applies to the whole tag body.
    /// In ID3v2.4 it applies to each frame's body,
    /// but not to frame headers or padding.
    pub unsynchronisation: bool,
    /// Whether an extended header is present,
    /// or whether an ID3v2.2 tag is compressed
    pub extended_header: bool,
    /// Whether the tag is in an experimental stage
    pub experimental: bool,
    /// Whether a footer follows the tag
    pub footer: bool,
    /// Undefined flags
    pub reserved: u8,
}

impl FromBitStream for TagFlags {
    type Error = std::io::Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        Ok(Self {
            unsynchronisation: r.read_bit()?,
            extended_header: r.read_bit()?,
            experimental: r.read_bit()?,
            footer: r.read_bit()?,
            reserved: r.read::<4, _>()?,
        })
    }
}

impl ToBitStream for TagFlags {
    type Error = std::io::Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        w.write_bit(self.unsynchronisation)?;
        w.write_bit(self.extended_header)?;
        w.write_bit(self.experimental)?;
        w.write_bit(self.footer)?;
        w.write::<4, _>(self.reserved)
    }
}

/// An ID3v2 tag header
///
/// | Bytes | Field | Meaning |
/// |------:|------:|---------|
/// | 3 | magic | `ID3`
/// | 1 | `version` | major version
/// | 1 | `revision` | revision number
/// | 1 | `flags` | tag flags
/// | 4 | `size` | synchsafe size of tag, excluding header and footer
///
/// # Example
///
/// ```
/// use bitstream_io::{BitReader, BitRead, BigEndian};
/// use id3_codec::Version;
/// use id3_codec::tag::{TagHeader, TagFlags};
///
/// let data: &[u8] = &[b'I', b'D', b'3', 0x03, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01];
/// let mut r = BitReader::endian(data, BigEndian);
/// assert_eq!(
///     r.parse::<TagHeader>().unwrap(),
///     TagHeader {
///         version: Version::Id3v23,
///         revision: 0,
///         flags: TagFlags::default(),
///         size: 257,
///     },
/// );
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TagHeader {
    /// The tag's major version
    pub version: Version,
    /// The tag's revision
    pub revision: u8,
    /// The tag's flags
    pub flags: TagFlags,
    /// The size of the tag's body, in bytes
    pub size: u32,
}

impl TagHeader {
    /// Reads tag header from the start of a stream, if present
    ///
    /// Returns `Ok(None)` if the stream is too short to hold
    /// a header or doesn't start with the `ID3` magic number.
    /// Up to 10 bytes are consumed from the stream either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the header has an unsupported
    /// version or an invalid size.
    pub fn read<R: Read>(mut reader: R) -> Result<Option<Self>, Error> {
        let mut header = Vec::with_capacity(HEADER_LEN as usize);
        reader
            .by_ref()
            .take(HEADER_LEN.into())
            .read_to_end(&mut header)?;

        if header.len() == HEADER_LEN as usize && header.starts_with(&ID3_TAG) {
            BitReader::endian(header.as_slice(), BigEndian)
                .parse::<Self>()
                .map(Some)
        } else {
            Ok(None)
        }
    }

    /// Whether a footer follows the tag
    pub fn has_footer(&self) -> bool {
        self.version == Version::Id3v24 && self.flags.footer
    }

    /// The tag's total length in bytes, including header and footer
    pub fn total_len(&self) -> u64 {
        u64::from(HEADER_LEN)
            + u64::from(self.size)
            + if self.has_footer() {
                u64::from(HEADER_LEN)
            } else {
                0
            }
    }

    fn write_with_magic<W: BitWrite + ?Sized>(
        &self,
        w: &mut W,
        magic: [u8; 3],
    ) -> Result<(), Error> {
        w.write_from(magic)?;
        w.build(&self.version)?;
        w.write_from(self.revision)?;
        w.build(&self.flags)?;
        w.build(&Synchsafe(self.size))
    }
}

impl FromBitStream for TagHeader {
    type Error = Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        if r.read_to::<[u8; 3]>()? != ID3_TAG {
            return Err(Error::MissingId3Tag);
        }

        Ok(Self {
            version: r.parse()?,
            revision: r.read_to()?,
            flags: r.parse()?,
            size: r.parse::<Synchsafe>()?.into(),
        })
    }
}

impl ToBitStream for TagHeader {
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        self.write_with_magic(w, ID3_TAG)
    }
}

/// A complete ID3v2 tag
///
/// Frames are kept in the order they were read or added,
/// and written back out in that same order.
///
/// # Example
///
/// ```
/// use id3_codec::{Version, tag::Tag};
///
/// let mut tag = Tag::new(Version::Id3v24);
/// tag.set_artist("Paloalto");
/// tag.set_comment("", "✓");
/// tag.set_padding(16);
///
/// let bytes = tag.to_bytes().unwrap();
/// assert_eq!(bytes.len() as u64, tag.total_len().unwrap());
///
/// let parsed = Tag::from_bytes(&bytes).unwrap();
/// assert_eq!(parsed.artist(), Some("Paloalto"));
/// assert_eq!(parsed.comment(), Some("✓"));
/// assert_eq!(parsed.padding(), 16);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    version: Version,
    revision: u8,
    /// The tag's flags
    pub flags: TagFlags,
    extended_header: Option<Vec<u8>>,
    frames: Vec<Frame>,
    padding: u32,
}

impl Tag {
    /// Creates empty tag of the given version with no padding
    pub fn new(version: Version) -> Self {
        Self {
            version,
            revision: 0,
            flags: TagFlags::default(),
            extended_header: None,
            frames: vec![],
            padding: 0,
        }
    }

    /// Parses tag from its header and body
    ///
    /// The body should be the `header.size` bytes which follow
    /// the header.  A body which stops short of that size is
    /// tolerated, and whatever frames it holds are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CompressedTag`] for compressed ID3v2.2 tags
    /// and [`Error::InvalidExtendedHeader`] if the extended header
    /// overruns the tag.
    pub fn parse(header: TagHeader, body: &[u8]) -> Result<Self, Error> {
        let TagHeader {
            version,
            revision,
            flags,
            ..
        } = header;

        if version == Version::Id3v22 && flags.extended_header {
            return Err(Error::CompressedTag);
        }

        let body = match version {
            Version::Id3v22 | Version::Id3v23 if flags.unsynchronisation => {
                Cow::Owned(unsynch::remove(body))
            }
            _ => Cow::Borrowed(body),
        };

        let (extended_header, body) = match version {
            Version::Id3v23 | Version::Id3v24 if flags.extended_header => {
                let (extended, body) = Self::split_extended_header(version, &body)?;
                (Some(extended.to_vec()), body)
            }
            _ => (None, body.as_ref()),
        };

        let (frames, padding) = read_frames(
            body,
            &FrameRegistry::new(version),
            version == Version::Id3v24 && flags.unsynchronisation,
        );

        Ok(Self {
            version,
            revision,
            flags,
            extended_header,
            frames,
            padding: u32::try_from(padding.len()).map_err(|_| Error::ExcessiveTagSize)?,
        })
    }

    /// Splits the extended header, including its size field,
    /// from the rest of the body
    fn split_extended_header(version: Version, body: &[u8]) -> Result<(&[u8], &[u8]), Error> {
        let size = body
            .first_chunk::<4>()
            .ok_or(Error::InvalidExtendedHeader)?;

        let len = match version {
            // ID3v2.3's size excludes itself
            Version::Id3v22 | Version::Id3v23 => u32::from_be_bytes(*size).checked_add(4),
            // while ID3v2.4's size includes itself
            Version::Id3v24 => Some(crate::synchsafe::decode(*size)?).filter(|len| *len >= 4),
        }
        .ok_or(Error::InvalidExtendedHeader)?;

        usize::try_from(len)
            .ok()
            .and_then(|len| body.split_at_checked(len))
            .ok_or(Error::InvalidExtendedHeader)
    }

    /// Reads tag body from a stream whose header has already been read
    ///
    /// Any footer is consumed from the stream also.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the stream, or a
    /// format error from [`Tag::parse`].
    pub fn read_body<R: Read>(header: TagHeader, mut reader: R) -> Result<Self, Error> {
        let mut body = Vec::new();
        reader
            .by_ref()
            .take(header.size.into())
            .read_to_end(&mut body)?;

        if body.len() < header.size as usize {
            log::warn!(
                "tag declares {} bytes but only {} are present",
                header.size,
                body.len()
            );
        } else if header.has_footer() {
            std::io::copy(
                &mut reader.by_ref().take(HEADER_LEN.into()),
                &mut std::io::sink(),
            )?;
        }

        Self::parse(header, &body)
    }

    /// Reads tag from the start of a stream
    ///
    /// Returns `Ok(None)` if the stream has no ID3v2 tag.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the stream, or a
    /// format error if the tag is present but invalid.
    pub fn read<R: Read>(mut reader: R) -> Result<Option<Self>, Error> {
        match TagHeader::read(reader.by_ref())? {
            Some(header) => Self::read_body(header, reader).map(Some),
            None => Ok(None),
        }
    }

    /// Opens tag from the start of the file at the given path
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId3Tag`] if the file has no tag,
    /// along with any I/O or format error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        std::fs::File::open(path.as_ref())
            .map_err(Error::Io)
            .map(std::io::BufReader::new)
            .and_then(Self::read)?
            .ok_or(Error::MissingId3Tag)
    }

    /// Parses tag from the start of the given bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId3Tag`] if the bytes have no tag,
    /// along with any format error.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, Error> {
        Self::read(&mut bytes)?.ok_or(Error::MissingId3Tag)
    }

    /// Returns tag's major version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns tag's revision number
    pub fn revision(&self) -> u8 {
        self.revision
    }

    /// Returns registry of frames for our version
    pub fn registry(&self) -> FrameRegistry {
        FrameRegistry::new(self.version)
    }

    /// Returns raw extended header, including its size field, if any
    pub fn extended_header(&self) -> Option<&[u8]> {
        self.extended_header.as_deref()
    }

    /// Removes extended header, if any
    pub fn remove_extended_header(&mut self) {
        self.extended_header = None;
    }

    /// Whether a footer follows the tag
    pub fn has_footer(&self) -> bool {
        self.version == Version::Id3v24 && self.flags.footer
    }

    /// Bytes of padding written after the frames
    ///
    /// Tags with a footer never have padding.
    pub fn padding(&self) -> u32 {
        if self.has_footer() { 0 } else { self.padding }
    }

    /// Sets amount of padding to write after frames
    pub fn set_padding(&mut self, padding: u32) {
        self.padding = padding;
    }

    /// Returns extended header and frames as written,
    /// but without padding
    fn body(&self) -> Result<Vec<u8>, Error> {
        let mut body = self.extended_header.clone().unwrap_or_default();

        {
            let mut w = BitWriter::endian(&mut body, BigEndian);
            let unsynchronised = self.version == Version::Id3v24 && self.flags.unsynchronisation;
            self.frames
                .iter()
                .try_for_each(|frame| frame.write_in_tag(&mut w, self.version, unsynchronised))?;
        }

        Ok(match self.version {
            Version::Id3v22 | Version::Id3v23 if self.flags.unsynchronisation => {
                unsynch::apply(&body)
            }
            _ => body,
        })
    }

    /// Size of extended header and frames, in bytes
    ///
    /// This is the tag's size without padding,
    /// header or footer.
    ///
    /// # Errors
    ///
    /// Returns an error if any frame can't be written.
    pub fn content_size(&self) -> Result<u32, Error> {
        u32::try_from(self.body()?.len()).map_err(|_| Error::ExcessiveTagSize)
    }

    /// Total length of tag when written, in bytes,
    /// including header, padding and footer
    ///
    /// # Errors
    ///
    /// Returns an error if any frame can't be written.
    pub fn total_len(&self) -> Result<u64, Error> {
        Ok(u64::from(HEADER_LEN)
            + u64::from(self.content_size()?)
            + u64::from(self.padding())
            + if self.has_footer() {
                u64::from(HEADER_LEN)
            } else {
                0
            })
    }

    /// Writes tag to the given writer
    ///
    /// # Errors
    ///
    /// Returns any I/O error, or [`Error::ExcessiveTagSize`]
    /// if the tag is too large for its header.
    pub fn write<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let body = self.body()?;
        let padding = self.padding();

        let header = TagHeader {
            version: self.version,
            revision: self.revision,
            flags: TagFlags {
                extended_header: match self.version {
                    Version::Id3v22 => self.flags.extended_header,
                    Version::Id3v23 | Version::Id3v24 => self.extended_header.is_some(),
                },
                ..self.flags
            },
            size: body
                .len()
                .checked_add(padding as usize)
                .and_then(|size| Synchsafe::try_from(size).ok())
                .ok_or(Error::ExcessiveTagSize)?
                .into(),
        };

        let mut w = BitWriter::endian(writer, BigEndian);
        w.build(&header)?;
        w.write_bytes(&body)?;
        w.pad(padding * 8)?;
        if header.has_footer() {
            header.write_with_magic(&mut w, FOOTER_TAG)?;
        }
        Ok(())
    }

    /// Returns tag as bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExcessiveTagSize`] if the tag is too large
    /// for its header, or an error if any frame can't be written.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }

    /// Iterates over all our frames, in order
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Returns first frame with the given identifier, if any
    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// Returns first frame with the given identifier
    /// as a mutable reference, if any
    pub fn frame_mut(&mut self, id: &str) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == id)
    }

    /// Iterates over all frames with the given identifier
    pub fn frames<'t>(&'t self, id: &'t str) -> impl Iterator<Item = &'t Frame> {
        self.frames.iter().filter(move |f| f.id == id)
    }

    /// Iterates over all frames with the given identifier
    /// as mutable references
    pub fn frames_mut<'t>(&'t mut self, id: &'t str) -> impl Iterator<Item = &'t mut Frame> {
        self.frames.iter_mut().filter(move |f| f.id == id)
    }

    /// Appends frame to the end of the tag
    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame)
    }

    /// Removes all frames with the given identifier, returning them
    pub fn remove_frames(&mut self, id: &str) -> Vec<Frame> {
        self.frames.extract_if(.., |f| f.id == id).collect()
    }

    /// Returns first value of a text frame, if any
    pub fn text(&self, id: &str) -> Option<&str> {
        self.frame(id)
            .and_then(|f| f.as_text())
            .map(|t| t.value())
    }

    fn field_text(&self, field: Field) -> Option<&str> {
        self.text(self.registry().field_id(field).as_str())
    }

    /// Returns track title, if any
    pub fn title(&self) -> Option<&str> {
        self.field_text(Field::Title)
    }

    /// Returns track artist, if any
    pub fn artist(&self) -> Option<&str> {
        self.field_text(Field::Artist)
    }

    /// Returns album name, if any
    pub fn album(&self) -> Option<&str> {
        self.field_text(Field::Album)
    }

    /// Returns recording year, if any
    ///
    /// For ID3v2.4 this is the full recording timestamp.
    pub fn year(&self) -> Option<&str> {
        self.field_text(Field::Year)
    }

    /// Returns genre, if any
    pub fn genre(&self) -> Option<&str> {
        self.field_text(Field::Genre)
    }

    /// Iterates over all comment frames
    pub fn comments(&self) -> impl Iterator<Item = &UnsynchTextFrame> {
        let id = self.registry().field_id(Field::Comment);
        self.frames
            .iter()
            .filter(move |f| f.id == id)
            .filter_map(|f| f.as_unsynch_text())
    }

    /// Returns text of first comment, if any
    pub fn comment(&self) -> Option<&str> {
        self.comments().next().map(|c| c.text.as_str())
    }

    /// Returns text of first unsynchronized lyrics frame, if any
    pub fn lyrics(&self) -> Option<&str> {
        let id = self.registry().field_id(Field::Lyrics);
        self.frames
            .iter()
            .filter(|f| f.id == id)
            .find_map(|f| f.as_unsynch_text())
            .map(|l| l.text.as_str())
    }

    /// Iterates over all chapter frames
    pub fn chapters(&self) -> impl Iterator<Item = &ChapterFrame> {
        self.frames.iter().filter_map(|f| f.as_chapter())
    }

    /// Iterates over all table of contents frames
    pub fn tocs(&self) -> impl Iterator<Item = &TocFrame> {
        self.frames.iter().filter_map(|f| f.as_toc())
    }

    /// Replaces first frame with the given identifier
    /// or appends a new one
    fn replace_frame(&mut self, frame: Frame) {
        match self.frames.iter_mut().find(|f| f.id == frame.id) {
            Some(existing) => existing.content = frame.content,
            None => self.frames.push(frame),
        }
    }

    /// Sets text frame to a single value
    ///
    /// The value is encoded in the most compact
    /// encoding our version supports.
    pub fn set_text(&mut self, id: FrameId, value: &str) {
        self.replace_frame(Frame::new(
            id,
            TextFrame::new(Encoding::preferred(self.version, value), value),
        ))
    }

    fn set_field_text(&mut self, field: Field, value: &str) {
        self.set_text(self.registry().field_id(field), value)
    }

    /// Sets track title
    pub fn set_title(&mut self, title: &str) {
        self.set_field_text(Field::Title, title)
    }

    /// Sets track artist
    pub fn set_artist(&mut self, artist: &str) {
        self.set_field_text(Field::Artist, artist)
    }

    /// Sets album name
    pub fn set_album(&mut self, album: &str) {
        self.set_field_text(Field::Album, album)
    }

    /// Sets recording year
    pub fn set_year(&mut self, year: &str) {
        self.set_field_text(Field::Year, year)
    }

    /// Sets genre
    pub fn set_genre(&mut self, genre: &str) {
        self.set_field_text(Field::Genre, genre)
    }

    /// Sets text of comment with the given description,
    /// adding a new comment if necessary
    pub fn set_comment(&mut self, description: &str, text: &str) {
        let id = self.registry().field_id(Field::Comment);
        let encoding = Encoding::preferred(self.version, &[description, text].concat());

        match self
            .frames
            .iter_mut()
            .filter(|f| f.id == id)
            .filter_map(|f| <&mut UnsynchTextFrame>::try_from(f).ok())
            .find(|c| c.description == description)
        {
            Some(comment) => {
                comment.encoding = encoding;
                comment.text = text.to_owned();
            }
            None => self.frames.push(Frame::new(
                id,
                UnsynchTextFrame::new(encoding, description, text),
            )),
        }
    }

    /// Sets unsynchronized lyrics
    pub fn set_lyrics(&mut self, lyrics: &str) {
        let id = self.registry().field_id(Field::Lyrics);
        self.replace_frame(Frame::new(
            id,
            UnsynchTextFrame::new(Encoding::preferred(self.version, lyrics), "", lyrics),
        ))
    }
}

#[test]
fn test_tag_flags() {
    let data: &[u8] = &[0b1011_0101];
    let flags = BitReader::endian(data, BigEndian).parse::<TagFlags>().unwrap();
    assert_eq!(
        flags,
        TagFlags {
            unsynchronisation: true,
            extended_header: false,
            experimental: true,
            footer: true,
            reserved: 0b0101,
        }
    );

    let mut written = Vec::new();
    BitWriter::endian(&mut written, BigEndian).build(&flags).unwrap();
    assert_eq!(written, data);
}

#[test]
fn test_tag_header() {
    // not a tag
    assert!(TagHeader::read(b"RIFF\x00\x00\x00\x00\x00\x00".as_slice()).unwrap().is_none());
    // too short
    assert!(TagHeader::read(b"ID3\x03".as_slice()).unwrap().is_none());

    assert!(matches!(
        TagHeader::read(b"ID3\x05\x00\x00\x00\x00\x00\x00".as_slice()),
        Err(Error::UnsupportedVersion(5))
    ));
    assert!(matches!(
        TagHeader::read(b"ID3\x03\x00\x00\x00\x00\x00\x80".as_slice()),
        Err(Error::InvalidSynchsafe)
    ));

    let header = TagHeader::read(b"ID3\x04\x00\x10\x00\x00\x02\x01".as_slice())
        .unwrap()
        .unwrap();
    assert!(header.has_footer());
    assert_eq!(header.total_len(), 10 + 257 + 10);
}

#[test]
fn test_extended_header() {
    let mut tag = b"ID3\x03\x00\x40\x00\x00\x00\x1B".to_vec();
    tag.extend(b"\x00\x00\x00\x06\x00\x00\x00\x00\x00\x00");
    tag.extend(b"TIT2\x00\x00\x00\x05\x00\x00\x00Test");
    tag.extend([0; 2]);

    let parsed = Tag::from_bytes(&tag).unwrap();
    assert_eq!(
        parsed.extended_header(),
        Some(b"\x00\x00\x00\x06\x00\x00\x00\x00\x00\x00".as_slice())
    );
    assert_eq!(parsed.title(), Some("Test"));
    assert_eq!(parsed.padding(), 2);
    assert_eq!(parsed.to_bytes().unwrap(), tag);

    // an extended header larger than the tag
    assert!(matches!(
        Tag::from_bytes(b"ID3\x04\x00\x40\x00\x00\x00\x04\x00\x00\x01\x00"),
        Err(Error::InvalidExtendedHeader)
    ));
}

#[test]
fn test_tag_unsynchronisation() {
    let mut tag = Tag::new(Version::Id3v23);
    tag.flags.unsynchronisation = true;
    tag.set_title("\u{FF}\u{FF}");
    tag.set_padding(4);

    let bytes = tag.to_bytes().unwrap();
    assert!(!bytes[10..].windows(2).any(|w| w[0] == 0xFF && w[1] >= 0xE0));
    assert_eq!(Tag::from_bytes(&bytes).unwrap(), tag);

    // ID3v2.4 applies the header's flag to each frame,
    // even when the frame's own flag is clear
    let mut bytes = b"ID3\x04\x00\x80\x00\x00\x00\x0E".to_vec();
    bytes.extend(b"TALB\x00\x00\x00\x04\x00\x00\x00\xFF\x00\xE0");

    let parsed = Tag::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.album(), Some("\u{FF}\u{E0}"));
    assert_eq!(parsed.frame("TALB").unwrap().flags, crate::frame::FrameFlags::default());
    assert_eq!(parsed.to_bytes().unwrap(), bytes);

    // opaque frames are unsynchronized too
    let mut tag = Tag::new(Version::Id3v24);
    tag.flags.unsynchronisation = true;
    tag.add_frame(Frame::new(
        FrameId::new("PRIV").unwrap(),
        crate::frame::FrameContent::Data(vec![0xFF, 0xE0, 0xFF]),
    ));

    let bytes = tag.to_bytes().unwrap();
    assert_eq!(&bytes[10..], b"PRIV\x00\x00\x00\x05\x00\x00\xFF\x00\xE0\xFF\x00");
    assert_eq!(Tag::from_bytes(&bytes).unwrap(), tag);

    // ID3v2.2 compression isn't supported
    assert!(matches!(
        Tag::from_bytes(b"ID3\x02\x00\x40\x00\x00\x00\x00"),
        Err(Error::CompressedTag)
    ));
}
