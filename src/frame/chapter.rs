// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::{Frame, FrameId, FrameRegistry, Malformed, TextFrame, read_sub_frames};
use crate::encoding::Encoding;
use crate::{Error, Version};
use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, ToBitStreamUsing};

/// Element identifiers are always ISO-8859-1
const ELEMENT_ENCODING: Encoding = Encoding::Latin1;

/// The identifier of title sub-frames
const TITLE: &str = "TIT2";

fn sub_frame_title(sub_frames: &[Frame]) -> Option<&str> {
    sub_frames
        .iter()
        .filter(|f| f.id == TITLE)
        .find_map(|f| f.as_text())
        .map(|t| t.value())
}

fn set_sub_frame_title(sub_frames: &mut Vec<Frame>, title: &str) {
    let text = TextFrame::new(Encoding::preferred(Version::Id3v23, title), title);

    match sub_frames
        .iter_mut()
        .filter(|f| f.id == TITLE)
        .find_map(|f| <&mut TextFrame>::try_from(f).ok())
    {
        Some(existing) => *existing = text,
        None => sub_frames.push(Frame::new(FrameId::new_unchecked(TITLE), text)),
    }
}

/// A chapter frame, `CHAP`
///
/// | Bytes | Field | Meaning |
/// |------:|------:|---------|
/// | variable | `element_id` | terminated ISO-8859-1 string |
/// | 4 | `start_time` | start time, in milliseconds |
/// | 4 | `end_time` | end time, in milliseconds |
/// | 4 | `start_offset` | start offset, in bytes |
/// | 4 | `end_offset` | end offset, in bytes |
/// | rest of frame | `sub_frames` | embedded frames, such as a title |
///
/// # Example
///
/// ```
/// use id3_codec::frame::ChapterFrame;
///
/// let mut chapter = ChapterFrame::new("chp0", 0, 15000);
/// chapter.set_title("Intro");
///
/// assert!(chapter.use_time());
/// assert_eq!(chapter.title(), Some("Intro"));
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChapterFrame {
    /// Unique identifier of chapter
    pub element_id: String,
    /// Start time, in milliseconds
    pub start_time: u32,
    /// End time, in milliseconds
    pub end_time: u32,
    /// Start offset, in bytes from the start of the audio
    pub start_offset: u32,
    /// End offset, in bytes from the start of the audio
    pub end_offset: u32,
    /// Frames embedded in this chapter
    pub sub_frames: Vec<Frame>,
}

impl ChapterFrame {
    /// Offset value indicating the offsets are unused
    pub const UNUSED: u32 = 0xFFFF_FFFF;

    /// Builds chapter with start and end times and no offsets
    pub fn new<S: Into<String>>(element_id: S, start_time: u32, end_time: u32) -> Self {
        Self {
            element_id: element_id.into(),
            start_time,
            end_time,
            start_offset: Self::UNUSED,
            end_offset: Self::UNUSED,
            sub_frames: vec![],
        }
    }

    /// Whether the chapter's boundaries are given by time
    /// rather than byte offset
    pub fn use_time(&self) -> bool {
        self.start_offset == Self::UNUSED && self.end_offset == Self::UNUSED
    }

    /// Returns the chapter's title, if any
    pub fn title(&self) -> Option<&str> {
        sub_frame_title(&self.sub_frames)
    }

    /// Replaces the chapter's title, adding it if necessary
    pub fn set_title(&mut self, title: &str) {
        set_sub_frame_title(&mut self.sub_frames, title)
    }

    pub(super) fn parse(
        body: &[u8],
        registry: &FrameRegistry,
        depth: usize,
    ) -> Result<Self, Malformed> {
        let (element_id, consumed) = ELEMENT_ENCODING.decode(body);
        let mut rest = &body[consumed..];

        let mut r = BitReader::endian(&mut rest, BigEndian);
        let start_time = r.read_to()?;
        let end_time = r.read_to()?;
        let start_offset = r.read_to()?;
        let end_offset = r.read_to()?;
        drop(r);

        Ok(Self {
            element_id,
            start_time,
            end_time,
            start_offset,
            end_offset,
            sub_frames: read_sub_frames(rest, registry, depth),
        })
    }
}

impl ToBitStreamUsing for ChapterFrame {
    type Context = Version;
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W, version: Version) -> Result<(), Error> {
        w.write_bytes(&ELEMENT_ENCODING.encode(&self.element_id))?;
        w.write_from(self.start_time)?;
        w.write_from(self.end_time)?;
        w.write_from(self.start_offset)?;
        w.write_from(self.end_offset)?;
        self.sub_frames
            .iter()
            .try_for_each(|frame| w.build_using(frame, version))
    }
}

/// A table of contents frame, `CTOC`
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | variable | `element_id` | terminated ISO-8859-1 string |
/// | 6 | padding | always 0 |
/// | 1 | `top_level` | the root of all tables of contents |
/// | 1 | `ordered` | whether child elements are in order |
/// | 8 | entry count | number of child elements |
/// | variable | `child_elements` | terminated ISO-8859-1 strings |
/// | rest of frame | `sub_frames` | embedded frames, such as a title |
///
/// # Example
///
/// ```
/// use bitstream_io::{BitWriter, BitWrite, BigEndian};
/// use id3_codec::Version;
/// use id3_codec::frame::TocFrame;
///
/// let toc = TocFrame {
///     element_id: "toc".to_owned(),
///     top_level: true,
///     ordered: true,
///     child_elements: vec!["chp0".to_owned(), "chp1".to_owned()],
///     sub_frames: vec![],
/// };
///
/// let mut data = Vec::new();
/// BitWriter::endian(&mut data, BigEndian)
///     .build_using(&toc, Version::Id3v23)
///     .unwrap();
/// assert_eq!(data, b"toc\x00\x03\x02chp0\x00chp1\x00");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TocFrame {
    /// Unique identifier of table of contents
    pub element_id: String,
    /// Whether this is the root table of contents
    pub top_level: bool,
    /// Whether the child elements are ordered
    pub ordered: bool,
    /// Element identifiers of chapters or other tables of contents
    pub child_elements: Vec<String>,
    /// Frames embedded in this table of contents
    pub sub_frames: Vec<Frame>,
}

impl TocFrame {
    /// Returns the table of contents' title, if any
    pub fn title(&self) -> Option<&str> {
        sub_frame_title(&self.sub_frames)
    }

    /// Replaces the table of contents' title, adding it if necessary
    pub fn set_title(&mut self, title: &str) {
        set_sub_frame_title(&mut self.sub_frames, title)
    }

    pub(super) fn parse(
        body: &[u8],
        registry: &FrameRegistry,
        depth: usize,
    ) -> Result<Self, Malformed> {
        let (element_id, consumed) = ELEMENT_ENCODING.decode(body);
        let mut rest = &body[consumed..];

        let mut r = BitReader::endian(&mut rest, BigEndian);
        r.skip(6)?;
        let top_level = r.read_bit()?;
        let ordered = r.read_bit()?;
        let entry_count = r.read_to::<u8>()?;
        drop(r);

        let child_elements = (0..entry_count)
            .map(|_| match rest {
                [] => Err(Malformed),
                data => {
                    let (child, consumed) = ELEMENT_ENCODING.decode(data);
                    rest = &data[consumed..];
                    Ok(child)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            element_id,
            top_level,
            ordered,
            child_elements,
            sub_frames: read_sub_frames(rest, registry, depth),
        })
    }
}

impl ToBitStreamUsing for TocFrame {
    type Context = Version;
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W, version: Version) -> Result<(), Error> {
        w.write_bytes(&ELEMENT_ENCODING.encode(&self.element_id))?;
        w.pad(6)?;
        w.write_bit(self.top_level)?;
        w.write_bit(self.ordered)?;
        w.write_from::<u8>(
            self.child_elements
                .len()
                .try_into()
                .map_err(|_| Error::ExcessiveTocEntries)?,
        )?;
        for child in &self.child_elements {
            w.write_bytes(&ELEMENT_ENCODING.encode(child))?;
        }
        self.sub_frames
            .iter()
            .try_for_each(|frame| w.build_using(frame, version))
    }
}

#[test]
fn test_chapter_roundtrip() {
    use bitstream_io::BitWriter;

    let registry = FrameRegistry::new(Version::Id3v23);

    let mut chapter = ChapterFrame {
        element_id: "chp1".to_owned(),
        start_time: 15000,
        end_time: 30000,
        start_offset: 1024,
        end_offset: 2048,
        sub_frames: vec![],
    };
    chapter.set_title("Second Chapter");
    chapter.set_title("Chapter 2");
    assert_eq!(chapter.sub_frames.len(), 1);
    assert!(!chapter.use_time());

    let mut data = Vec::new();
    BitWriter::endian(&mut data, BigEndian)
        .build_using(&chapter, Version::Id3v23)
        .unwrap();

    let parsed = ChapterFrame::parse(&data, &registry, 0).unwrap();
    assert_eq!(parsed.title(), Some("Chapter 2"));
    assert_eq!(parsed, chapter);

    // truncated times
    assert!(ChapterFrame::parse(b"chp1\x00\x00\x00", &registry, 0).is_err());
}

#[test]
fn test_toc_malformed() {
    let registry = FrameRegistry::new(Version::Id3v23);

    // claims 3 entries but only has 2
    assert!(TocFrame::parse(b"toc\x00\x03\x03chp0\x00chp1\x00", &registry, 0).is_err());

    // final entry missing its terminator
    let toc = TocFrame::parse(b"toc\x00\x01\x02chp0\x00chp1", &registry, 0).unwrap();
    assert!(!toc.top_level);
    assert!(toc.ordered);
    assert_eq!(toc.child_elements, vec!["chp0".to_owned(), "chp1".to_owned()]);
    assert!(toc.sub_frames.is_empty());
}
