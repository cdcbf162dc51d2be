use id3_codec::encoding::Encoding;
use id3_codec::file::File;
use id3_codec::frame::{ChapterFrame, Frame, FrameId, FrameKind, MAX_NESTING, TextFrame, TocFrame};
use id3_codec::tag::Tag;
use id3_codec::Version;

const CHAPTERS: &[u8] = include_bytes!("data/chapters.mp3");

#[test]
fn test_toc() {
    let tag = Tag::from_bytes(CHAPTERS).unwrap();

    let toc = tag.frame("CTOC").unwrap().as_toc().unwrap();
    assert_eq!(toc.element_id, "toc");
    assert!(toc.top_level);
    assert!(toc.ordered);
    assert_eq!(toc.child_elements.len(), 9);
    assert_eq!(toc.child_elements.first().map(|s| s.as_str()), Some("chp0"));
    assert_eq!(toc.child_elements.last().map(|s| s.as_str()), Some("chp8"));
    assert_eq!(toc.title(), Some("Contents"));
    assert_eq!(tag.tocs().count(), 1);
}

#[test]
fn test_chapters() {
    let tag = Tag::from_bytes(CHAPTERS).unwrap();
    let toc = tag.tocs().next().unwrap();

    let chapters = tag.chapters().collect::<Vec<_>>();
    assert_eq!(chapters.len(), 9);

    assert_eq!(chapters[0].element_id, "chp0");
    assert_eq!(chapters[0].title(), Some("Intro"));
    assert!(chapters[0].use_time());
    assert_eq!(chapters[0].start_time, 0);
    assert_eq!(chapters[0].end_time, 15000);
    assert_eq!(chapters[0].start_offset, ChapterFrame::UNUSED);

    assert_eq!(chapters[8].title(), Some("Get a free account!"));
    assert_eq!(chapters[8].end_time, 135000);

    // table of contents order matches chapter order
    assert!(
        toc.child_elements
            .iter()
            .zip(&chapters)
            .all(|(child, chapter)| *child == chapter.element_id)
    );

    // chapters follow one another
    assert!(chapters.windows(2).all(|c| c[0].end_time == c[1].start_time));
}

#[test]
fn test_chapter_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chapters.mp3");
    std::fs::write(&path, CHAPTERS).unwrap();

    let mut file = File::open(&path).unwrap();
    let cutoff = file.cutoff() as usize;
    assert_eq!(file.chapters().count(), 9);

    for frame in file.tag_mut().frames_mut("CHAP") {
        if let Ok(chapter) = <&mut ChapterFrame>::try_from(frame) {
            if chapter.element_id == "chp0" {
                chapter.set_title("Introduction");
            }
        }
    }
    assert!(file.close().unwrap());

    let after = std::fs::read(&path).unwrap();
    assert_eq!(&CHAPTERS[cutoff..], &after[cutoff..]);

    let file = File::open(&path).unwrap();
    let chapters = file.chapters().collect::<Vec<_>>();
    assert_eq!(chapters[0].title(), Some("Introduction"));
    assert_eq!(chapters[1].title(), Some("Hello"));
    assert_eq!(chapters[0].sub_frames.len(), 1);
}

#[test]
fn test_build_chapters() {
    let titles = ["Intro", "Middle", "Get a free account!"];

    for version in [Version::Id3v23, Version::Id3v24] {
        let mut tag = Tag::new(version);

        let mut toc = TocFrame {
            element_id: "toc".to_owned(),
            top_level: true,
            ordered: true,
            child_elements: vec![],
            sub_frames: vec![],
        };

        for (i, title) in titles.iter().enumerate() {
            let element_id = format!("chp{i}");
            let start = i as u32 * 15000;

            let mut chapter = ChapterFrame::new(element_id.clone(), start, start + 15000);
            chapter.sub_frames.push(Frame::new(
                FrameId::new("TIT2").unwrap(),
                TextFrame::new(Encoding::preferred(version, title), *title),
            ));

            toc.child_elements.push(element_id);
            tag.add_frame(Frame::new(FrameId::new("CHAP").unwrap(), chapter));
        }
        tag.add_frame(Frame::new(FrameId::new("CTOC").unwrap(), toc));

        let parsed = Tag::from_bytes(&tag.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, tag);

        let chapters = parsed.chapters().collect::<Vec<_>>();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].title(), Some("Intro"));
        assert_eq!(chapters[2].title(), Some("Get a free account!"));
        assert_eq!(chapters[2].end_time, 45000);
        assert!(chapters.iter().all(|c| c.use_time()));

        let toc = parsed.tocs().next().unwrap();
        assert_eq!(toc.child_elements, vec!["chp0", "chp1", "chp2"]);
    }
}

/// An ID3v2.3 tag of chapters, each embedded in the one before
fn nested_chapters(depth: usize) -> Vec<u8> {
    let mut frame = Vec::new();

    for _ in 0..depth {
        let mut body = b"c\x00".to_vec();
        body.extend([0x00; 8]);
        body.extend([0xFF; 8]);
        body.extend(&frame);

        frame = b"CHAP".to_vec();
        frame.extend((body.len() as u32).to_be_bytes());
        frame.extend([0x00, 0x00]);
        frame.extend(body);
    }

    let mut tag = b"ID3\x03\x00\x00".to_vec();
    tag.extend(id3_codec::synchsafe::encode::<4>(frame.len() as u32).unwrap());
    tag.extend(frame);
    tag
}

#[test]
fn test_deeply_nested_chapters() {
    let data = nested_chapters(3000);

    std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || {
            let tag = Tag::from_bytes(&data).unwrap();
            assert_eq!(tag.chapters().count(), 1);

            // only the outermost chapters are interpreted
            let mut frame = tag.frame("CHAP").unwrap();
            for _ in 0..MAX_NESTING {
                let chapter = frame.as_chapter().unwrap();
                assert_eq!(chapter.element_id, "c");
                assert_eq!(chapter.sub_frames.len(), 1);
                frame = &chapter.sub_frames[0];
            }
            assert_eq!(frame.id, "CHAP");
            assert_eq!(frame.kind(), FrameKind::Data);

            // and the rest survive a rewrite unchanged
            assert_eq!(tag.to_bytes().unwrap(), data);
        })
        .unwrap()
        .join()
        .unwrap();
}
