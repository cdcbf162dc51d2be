use id3_codec::Error;
use id3_codec::file::{DEFAULT_PADDING, File, update};
use id3_codec::tag::Tag;
use std::path::PathBuf;

const TEST: &[u8] = include_bytes!("data/test.mp3");
const TRUNCATED: &[u8] = include_bytes!("data/truncated.mp3");
const NOTAG: &[u8] = include_bytes!("data/notag.mp3");

/// Copies data to a file in a fresh temporary directory
fn scratch(data: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.mp3");
    std::fs::write(&path, data).unwrap();
    (dir, path)
}

#[test]
fn test_open() {
    let (_dir, path) = scratch(TEST);

    let file = File::open(&path).unwrap();
    assert_eq!(file.path(), path);
    assert_eq!(file.cutoff(), 420);
    assert!(!file.is_dirty());

    assert_eq!(file.artist(), Some("Paloalto"));
    assert_eq!(file.title(), Some("Nice Life (Feat. Basick)"));
    assert_eq!(file.album(), Some("Chief Life"));
    assert_eq!(file.year(), Some("2014"));
    assert_eq!(file.genre(), Some("Hip-Hop"));

    let comment = file.frame("COMM").unwrap().as_unsynch_text().unwrap();
    assert_eq!(comment.description, "✓");
    assert_eq!(comment.text, "✓");
    assert_eq!(file.comment(), Some("✓"));
    assert_eq!(file.frames("COMM").count(), 2);
}

#[test]
fn test_readonly() {
    let (_dir, path) = scratch(TEST);

    let file = File::open(&path).unwrap();
    let _ = file.title();
    let _ = file.artist();
    let _ = file.album();
    let _ = file.year();
    let _ = file.genre();
    let _ = file.comments().count();
    let _ = file.lyrics();
    let _ = file.chapters().count();
    let _ = file.tocs().count();
    assert!(!file.close().unwrap());

    assert_eq!(std::fs::read(&path).unwrap(), TEST);
}

#[test]
fn test_close() {
    let (_dir, path) = scratch(TEST);

    let mut file = File::open(&path).unwrap();
    let before_cutoff = file.cutoff() as usize;

    file.set_artist("Paloalto");
    file.set_title("Test test test test test test");
    assert!(file.is_dirty());
    assert!(file.finalize().unwrap());
    assert!(!file.is_dirty());

    let after_cutoff = file.cutoff() as usize;
    let after = std::fs::read(&path).unwrap();
    assert_eq!(&TEST[before_cutoff..], &after[after_cutoff..]);

    // the new frames fit in the old padding
    assert_eq!(before_cutoff, after_cutoff);
    assert_eq!(after.len(), TEST.len());

    // a second finalize has nothing to do
    assert!(!file.finalize().unwrap());

    let file = File::open(&path).unwrap();
    assert_eq!(file.title(), Some("Test test test test test test"));
    assert_eq!(file.artist(), Some("Paloalto"));
    assert_eq!(file.album(), Some("Chief Life"));
}

#[test]
fn test_grow() {
    let (_dir, path) = scratch(TEST);

    let mut file = File::open(&path).unwrap();
    let before_cutoff = file.cutoff() as usize;

    file.set_lyrics(&"la ".repeat(400));
    assert!(file.close().unwrap());

    let after = std::fs::read(&path).unwrap();
    let file = File::open(&path).unwrap();
    let after_cutoff = file.cutoff() as usize;

    assert!(after_cutoff > before_cutoff);
    assert_eq!(&TEST[before_cutoff..], &after[after_cutoff..]);
    assert_eq!(file.tag().padding(), DEFAULT_PADDING);
    assert_eq!(file.lyrics().map(|l| l.len()), Some(1200));

    // and shrinking again keeps the grown size
    let mut file = file;
    file.remove_frames("USLT");
    assert!(file.close().unwrap());

    let shrunk = std::fs::read(&path).unwrap();
    assert_eq!(shrunk.len(), after.len());
    assert_eq!(&TEST[before_cutoff..], &shrunk[after_cutoff..]);
}

#[test]
fn test_add_tag() {
    // an empty file
    let (_dir, path) = scratch(&[]);

    let mut file = File::open(&path).unwrap();
    assert_eq!(file.cutoff(), 0);
    assert_eq!(file.tag(), &Tag::new(id3_codec::Version::Id3v23));

    file.set_artist("Michael");
    assert!(file.finalize().unwrap());

    let tag = file.tag().to_bytes().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), tag);
    assert_eq!(file.cutoff(), tag.len() as u64);
    assert_eq!(file.tag().padding(), 0);

    // a file with audio but no tag
    let (_dir, path) = scratch(NOTAG);

    let mut file = File::open(&path).unwrap();
    file.set_artist("Michael");
    assert!(file.finalize().unwrap());

    let tag = file.tag().to_bytes().unwrap();
    let after = std::fs::read(&path).unwrap();
    assert_eq!(&after[..tag.len()], tag.as_slice());
    assert_eq!(&after[tag.len()..], NOTAG);

    assert_eq!(File::open(&path).unwrap().artist(), Some("Michael"));
}

#[test]
fn test_comment() {
    let (_dir, path) = scratch(TEST);

    let mut file = File::open(&path).unwrap();
    file.remove_frames("COMM");
    file.set_comment("Comment", "Foo");
    assert!(file.close().unwrap());

    let file = File::open(&path).unwrap();
    let comment = file.frame("COMM").unwrap().as_unsynch_text().unwrap();
    assert_eq!(comment.description, "Comment");
    assert_eq!(comment.text, "Foo");
    assert_eq!(comment.language(), "eng");
    assert_eq!(file.comments().count(), 1);
}

#[test]
fn test_utf16_comment() {
    let (_dir, path) = scratch(TEST);

    // reading a malformed UTF-16 comment must survive
    // any number of open and close cycles
    for title in ["First", "Second"] {
        let file = File::open(&path).unwrap();
        let malformed = file.frames("COMM").nth(1).unwrap();
        assert_eq!(malformed.as_unsynch_text().unwrap().text, "");
        assert!(!file.close().unwrap());

        let mut file = File::open(&path).unwrap();
        file.set_title(title);
        assert!(file.close().unwrap());
    }

    let file = File::open(&path).unwrap();
    assert_eq!(file.title(), Some("Second"));
    let comments = file.comments().collect::<Vec<_>>();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].description, "✓");
}

#[test]
fn test_update() {
    let (_dir, path) = scratch(TEST);

    // reading alone leaves the file as-is
    assert!(
        !update(&path, |tag| {
            assert_eq!(tag.artist(), Some("Paloalto"));
            Ok::<(), Error>(())
        })
        .unwrap()
    );
    assert_eq!(std::fs::read(&path).unwrap(), TEST);

    // as does setting a field to its current value
    assert!(!update(&path, |tag| Ok::<_, Error>(tag.set_album("Chief Life"))).unwrap());
    assert_eq!(std::fs::read(&path).unwrap(), TEST);

    assert!(update(&path, |tag| Ok::<_, Error>(tag.set_album("Chief Life 2"))).unwrap());
    assert_eq!(Tag::open(&path).unwrap().album(), Some("Chief Life 2"));

    // errors from the closure are passed through
    assert!(matches!(
        update(&path, |_| Err(Error::InvalidFrameId)),
        Err(Error::InvalidFrameId)
    ));

    assert!(matches!(
        update(path.with_file_name("missing.mp3"), |_| Ok::<(), Error>(())),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_retry() {
    let (_dir, path) = scratch(TEST);

    let mut file = File::open(&path).unwrap();
    file.set_title("Retried");

    // the original has vanished, so finalizing fails
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(file.finalize(), Err(Error::Io(_))));
    assert!(file.is_dirty());
    assert_eq!(file.title(), Some("Retried"));

    // but succeeds once it returns
    std::fs::write(&path, TEST).unwrap();
    assert!(file.finalize().unwrap());

    let after = std::fs::read(&path).unwrap();
    assert_eq!(&TEST[420..], &after[file.cutoff() as usize..]);
    assert_eq!(File::open(&path).unwrap().title(), Some("Retried"));
}

#[test]
fn test_truncated_frames() {
    let (_dir, path) = scratch(TRUNCATED);

    let mut file = File::open(&path).unwrap();
    assert_eq!(file.cutoff(), 110);
    assert_eq!(file.title(), Some("Truncated"));
    assert_eq!(file.artist(), None);

    file.set_artist("Someone");
    assert!(file.close().unwrap());

    let after = std::fs::read(&path).unwrap();
    let file = File::open(&path).unwrap();
    assert_eq!(file.cutoff(), 110);
    assert_eq!(&TRUNCATED[110..], &after[110..]);
    assert_eq!(file.title(), Some("Truncated"));
    assert_eq!(file.artist(), Some("Someone"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        File::open(dir.path().join("missing.mp3")),
        Err(Error::Io(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_symlink() {
    let (dir, path) = scratch(TEST);
    let link = dir.path().join("link.mp3");
    std::os::unix::fs::symlink(&path, &link).unwrap();

    let mut file = File::open(&link).unwrap();
    file.set_title("Linked");
    assert!(file.close().unwrap());

    // the link still points to the rewritten file
    assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(std::fs::read_link(&link).unwrap(), path);
    assert_eq!(File::open(&path).unwrap().title(), Some("Linked"));
    assert_eq!(&std::fs::read(&path).unwrap()[420..], &TEST[420..]);
}
