use id3_codec::encoding::Encoding;
use id3_codec::frame::{
    ChapterFrame, Frame, FrameContent, FrameFlags, FrameId, FrameKind, TextFrame, TocFrame,
    UnsynchTextFrame,
};
use id3_codec::tag::{Tag, TagHeader};
use id3_codec::{Error, Version};

const TEST: &[u8] = include_bytes!("data/test.mp3");
const CHAPTERS: &[u8] = include_bytes!("data/chapters.mp3");
const V24: &[u8] = include_bytes!("data/v24.mp3");
const V22: &[u8] = include_bytes!("data/v22.mp3");
const TRUNCATED: &[u8] = include_bytes!("data/truncated.mp3");
const NOTAG: &[u8] = include_bytes!("data/notag.mp3");

fn tag_len(data: &[u8]) -> usize {
    TagHeader::read(data).unwrap().unwrap().total_len() as usize
}

fn roundtrip_test(data: &[u8]) {
    let tag = dbg!(Tag::from_bytes(data).unwrap());
    let bytes = tag.to_bytes().unwrap();
    assert_eq!(bytes.len() as u64, tag.total_len().unwrap());
    assert_eq!(Tag::from_bytes(&bytes).unwrap(), tag);
}

#[test]
fn test_tag_roundtrips() {
    roundtrip_test(TEST);
    roundtrip_test(CHAPTERS);
    roundtrip_test(V24);
    roundtrip_test(V22);
    roundtrip_test(TRUNCATED);
}

#[test]
fn test_exact_rewrites() {
    // tags written in our own style come back byte-for-byte
    for data in [CHAPTERS, V24, V22] {
        let len = tag_len(data);
        assert_eq!(Tag::from_bytes(data).unwrap().to_bytes().unwrap(), &data[..len]);
    }
}

#[test]
fn test_v23_fields() {
    let tag = Tag::from_bytes(TEST).unwrap();
    assert_eq!(tag.version(), Version::Id3v23);
    assert_eq!(tag.artist(), Some("Paloalto"));
    assert_eq!(tag.title(), Some("Nice Life (Feat. Basick)"));
    assert_eq!(tag.album(), Some("Chief Life"));
    assert_eq!(tag.year(), Some("2014"));
    assert_eq!(tag.genre(), Some("Hip-Hop"));
    assert_eq!(tag.lyrics(), None);
    assert_eq!(tag.padding(), 256);

    let comments = tag.comments().collect::<Vec<_>>();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].encoding, Encoding::Utf16);
    assert_eq!(comments[0].language(), "eng");
    assert_eq!(comments[0].description, "✓");
    assert_eq!(comments[0].text, "✓");

    // odd length and a partial terminator
    assert_eq!(comments[1].description, "✓");
    assert_eq!(comments[1].text, "");

    assert_eq!(tag.frames("COMM").count(), 2);
    assert_eq!(tag.frames("TIT2").count(), 1);
    assert!(tag.frame("APIC").is_none());
}

#[test]
fn test_v24_fields() {
    let tag = Tag::from_bytes(V24).unwrap();
    assert_eq!(tag.version(), Version::Id3v24);
    assert_eq!(tag.title(), Some("Grüße ✓"));
    assert_eq!(
        tag.frame("TPE1").unwrap().as_text().unwrap().values,
        vec!["Artist 1".to_owned(), "Artist 2".to_owned()]
    );
    assert_eq!(tag.artist(), Some("Artist 1"));
    assert_eq!(tag.year(), Some("2024-05-01"));

    // unsynchronized with a data length indicator
    let album = tag.frame("TALB").unwrap();
    assert_eq!(album.flags.format, 0b0000_0011);
    assert_eq!(tag.album(), Some("Album ÿà"));

    assert_eq!(tag.comment().map(|c| c.len()), Some(200));

    assert_eq!(
        tag.frame("PRIV").unwrap().as_data(),
        Some(b"owner\x00\x01\x02\x03".as_slice())
    );
    assert_eq!(tag.frame("TXXX").unwrap().kind(), FrameKind::Data);

    // compressed frames are opaque
    let compressed = tag.frame("TIT3").unwrap();
    assert_eq!(compressed.kind(), FrameKind::Data);
    assert_eq!(
        compressed.flags,
        FrameFlags {
            status: 0,
            format: 0b0000_1001
        }
    );

    assert_eq!(tag.padding(), 32);
}

#[test]
fn test_v22_fields() {
    let tag = Tag::from_bytes(V22).unwrap();
    assert_eq!(tag.version(), Version::Id3v22);
    assert!(tag.flags.unsynchronisation);
    assert_eq!(tag.title(), Some("v2.2 Title"));
    assert_eq!(tag.artist(), Some("ÿû Artist"));
    assert_eq!(tag.comment(), Some("v2.2 comment"));
    assert_eq!(tag.padding(), 16);

    let bytes = tag.to_bytes().unwrap();
    assert!(
        !bytes[10..]
            .windows(2)
            .any(|pair| pair[0] == 0xFF && pair[1] >= 0xE0)
    );
}

#[test]
fn test_truncated_tag() {
    // a frame overrunning the tag ends the frame list
    let tag = Tag::from_bytes(TRUNCATED).unwrap();
    assert_eq!(tag.title(), Some("Truncated"));
    assert_eq!(tag.artist(), None);
    assert_eq!(tag.iter().count(), 1);
    assert_eq!(tag.padding(), 80);
    assert_eq!(tag.total_len().unwrap(), 110);

    // as does running out of file
    for len in 0..tag_len(TEST) {
        let _ = Tag::from_bytes(&TEST[..len]);
    }
    let partial = Tag::from_bytes(&TEST[..80]).unwrap();
    assert_eq!(partial.artist(), Some("Paloalto"));
    assert_eq!(partial.album(), None);
}

#[test]
fn test_no_tag() {
    assert!(Tag::read(NOTAG).unwrap().is_none());
    assert!(Tag::read(std::io::empty()).unwrap().is_none());
    assert!(matches!(Tag::from_bytes(NOTAG), Err(Error::MissingId3Tag)));
}

#[test]
fn test_invalid_headers() {
    assert!(matches!(
        Tag::from_bytes(b"ID3\x01\x00\x00\x00\x00\x00\x00"),
        Err(Error::UnsupportedVersion(1))
    ));
    assert!(matches!(
        Tag::from_bytes(b"ID3\x03\x00\x00\xFF\x00\x00\x00"),
        Err(Error::InvalidSynchsafe)
    ));
}

#[test]
fn test_corruption() {
    let len = tag_len(TEST);

    // no amount of corruption in the tag body should panic
    for _ in 0..1000 {
        let mut data = TEST[..len].to_vec();
        for _ in 0..fastrand::usize(1..4) {
            data[fastrand::usize(10..len)] ^= 1 << fastrand::u32(0..8);
        }

        if let Ok(tag) = Tag::from_bytes(&data) {
            if let Ok(bytes) = tag.to_bytes() {
                assert_eq!(Tag::from_bytes(&bytes).unwrap(), tag);
            }
        }
    }
}

fn build_tag(version: Version) -> Tag {
    let mut tag = Tag::new(version);
    tag.set_title("Nice Life (Feat. Basick)");
    tag.set_artist("Paloalto");
    tag.set_album("Chief Life");
    tag.set_year("2014");
    tag.set_genre("Hip-Hop");
    tag.set_comment("", "✓");
    tag.set_comment("Comment", "Foo");
    tag.set_lyrics("la la la");
    tag.set_padding(128);
    tag
}

#[test]
fn test_built_roundtrips() {
    for version in [Version::Id3v22, Version::Id3v23, Version::Id3v24] {
        let tag = build_tag(version);
        assert_eq!(tag.iter().count(), 8);
        assert_eq!(tag.comments().count(), 2);

        let parsed = Tag::from_bytes(&tag.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.version(), version);
        assert_eq!(parsed.title(), Some("Nice Life (Feat. Basick)"));
        assert_eq!(parsed.comment(), Some("✓"));
        assert_eq!(parsed.lyrics(), Some("la la la"));
        assert_eq!(parsed.padding(), 128);
        assert_eq!(parsed, tag);
    }

    // multiple text values survive in any encoding
    for encoding in [Encoding::Latin1, Encoding::Utf16, Encoding::Utf16Be, Encoding::Utf8] {
        let mut tag = Tag::new(Version::Id3v24);
        tag.add_frame(Frame::new(
            FrameId::new("TPE1").unwrap(),
            TextFrame {
                encoding,
                values: vec!["A".to_owned(), String::new(), "C".to_owned(), String::new()],
            },
        ));
        assert_eq!(Tag::from_bytes(&tag.to_bytes().unwrap()).unwrap(), tag);
    }
}

#[test]
fn test_setters() {
    let mut tag = Tag::from_bytes(TEST).unwrap();

    // setters replace existing frames in place
    let order = tag.iter().map(|f| f.id).collect::<Vec<_>>();
    tag.set_title("Test test test test test test");
    tag.set_artist("Michael");
    assert_eq!(tag.iter().map(|f| f.id).collect::<Vec<_>>(), order);
    assert_eq!(tag.title(), Some("Test test test test test test"));
    assert_eq!(tag.artist(), Some("Michael"));

    // comments are replaced by description
    tag.set_comment("✓", "Bar");
    tag.set_comment("Comment", "Foo");
    assert_eq!(
        tag.comments()
            .map(|c| (c.description.as_str(), c.text.as_str()))
            .collect::<Vec<_>>(),
        vec![("✓", "Bar"), ("✓", ""), ("Comment", "Foo")]
    );

    // text frames may be set by identifier
    tag.set_text(FrameId::new("TPE2").unwrap(), "Album Artist");
    assert_eq!(tag.text("TPE2"), Some("Album Artist"));

    // and removed by identifier
    assert_eq!(tag.remove_frames("COMM").len(), 3);
    assert_eq!(tag.comment(), None);
    assert!(tag.remove_frames("COMM").is_empty());

    // and edited in place
    if let Some(FrameContent::Text(text)) = tag.frame_mut("TALB").map(|f| &mut f.content) {
        text.values.push("Deluxe".to_owned());
    }
    assert_eq!(tag.frame("TALB").unwrap().as_text().unwrap().values.len(), 2);

    for frame in tag.frames_mut("TCON") {
        frame.content = TextFrame::new(Encoding::Latin1, "Rock").into();
    }
    assert_eq!(tag.genre(), Some("Rock"));

    assert_eq!(Tag::from_bytes(&tag.to_bytes().unwrap()).unwrap(), tag);
}

#[test]
fn test_write_errors() {
    // identifier widths must match the version
    let mut tag = Tag::new(Version::Id3v22);
    tag.add_frame(Frame::new(
        FrameId::new("TIT2").unwrap(),
        TextFrame::new(Encoding::Latin1, "Title"),
    ));
    assert!(matches!(tag.to_bytes(), Err(Error::InvalidFrameId)));

    // at most 255 table of contents entries
    let mut tag = Tag::new(Version::Id3v23);
    tag.add_frame(Frame::new(
        FrameId::new("CTOC").unwrap(),
        TocFrame {
            element_id: "toc".to_owned(),
            top_level: true,
            ordered: true,
            child_elements: (0..256).map(|i| format!("chp{i}")).collect(),
            sub_frames: vec![],
        },
    ));
    assert!(matches!(tag.to_bytes(), Err(Error::ExcessiveTocEntries)));

    // tags are limited to 2²⁸ - 1 bytes
    let mut tag = Tag::new(Version::Id3v23);
    tag.set_padding(1 << 28);
    assert!(matches!(tag.to_bytes(), Err(Error::ExcessiveTagSize)));
}

#[test]
fn test_footer() {
    let mut tag = build_tag(Version::Id3v24);
    tag.flags.footer = true;
    assert!(tag.has_footer());
    assert_eq!(tag.padding(), 0);

    let bytes = tag.to_bytes().unwrap();
    assert_eq!(bytes.len() as u64, tag.total_len().unwrap());
    assert_eq!(&bytes[bytes.len() - 10..bytes.len() - 7], b"3DI");
    assert_eq!(bytes[bytes.len() - 7..], bytes[3..10]);
    assert_eq!(tag_len(&bytes), bytes.len());

    let parsed = Tag::from_bytes(&bytes).unwrap();
    assert!(parsed.has_footer());
    assert_eq!(parsed.padding(), 0);
    assert_eq!(parsed.title(), tag.title());

    // a footer means nothing to earlier versions
    let mut tag = build_tag(Version::Id3v23);
    tag.flags.footer = true;
    assert!(!tag.has_footer());
    assert_eq!(tag.padding(), 128);
}

#[test]
fn test_nested_frames() {
    let mut tag = Tag::new(Version::Id3v24);

    let mut chapter = ChapterFrame::new("chp0", 0, 15000);
    chapter.set_title("Intro");
    chapter.sub_frames.push(Frame::new(
        FrameId::new("COMM").unwrap(),
        UnsynchTextFrame::new(Encoding::Utf8, "", "nested comment"),
    ));

    let mut toc = TocFrame {
        element_id: "toc".to_owned(),
        top_level: true,
        ordered: false,
        child_elements: vec!["chp0".to_owned()],
        sub_frames: vec![],
    };
    toc.set_title("Contents");

    tag.add_frame(Frame::new(FrameId::new("CTOC").unwrap(), toc));
    tag.add_frame(Frame::new(FrameId::new("CHAP").unwrap(), chapter));

    let parsed = Tag::from_bytes(&tag.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed, tag);

    let chapter = parsed.chapters().next().unwrap();
    assert_eq!(chapter.title(), Some("Intro"));
    assert_eq!(
        chapter.sub_frames[1].as_unsynch_text().unwrap().text,
        "nested comment"
    );
    assert!(!parsed.tocs().next().unwrap().ordered);
}
