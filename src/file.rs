// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For rewriting the ID3v2 tag of an audio file
//!
//! A [`File`] remembers where its original tag ends,
//! known as the cutoff.  When finalized, a changed file
//! is rebuilt as the new tag followed by everything
//! from the cutoff onward.
//!
//! ```text
//!  original  ┌─────────────┬──────────────────────────┐
//!            │ old tag     │ audio data               │
//!            └─────────────┴──────────────────────────┘
//!                          ↑ cutoff        ↓ copied as-is
//!  rewritten ┌──────────────────┬──────────────────────────┐
//!            │ new tag          │ audio data               │
//!            └──────────────────┴──────────────────────────┘
//! ```
//!
//! The rebuilt file is written to a temporary file in the
//! same directory which then replaces the original, so a
//! failure partway through leaves the original untouched.

use crate::frame::{ChapterFrame, Frame, FrameId, TocFrame, UnsynchTextFrame};
use crate::tag::{Tag, TagHeader};
use crate::{Error, Version};
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Padding given to a tag which has outgrown its original space
pub const DEFAULT_PADDING: u32 = 1024;

/// An audio file with an ID3v2 tag
///
/// Files without a tag are given an empty ID3v2.3 tag
/// which is only written if something is added to it.
///
/// # Example
///
/// ```
/// use id3_codec::file::File;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("track.mp3");
/// std::fs::write(&path, [0xFF, 0xFB, 0x90, 0x64]).unwrap();
///
/// let mut file = File::open(&path).unwrap();
/// assert_eq!(file.title(), None);
///
/// // unchanged files aren't written
/// assert!(!file.finalize().unwrap());
///
/// file.set_title("Nice Life");
/// assert!(file.finalize().unwrap());
///
/// let rewritten = std::fs::read(&path).unwrap();
/// assert_eq!(&rewritten[0..3], b"ID3");
/// assert!(rewritten.ends_with(&[0xFF, 0xFB, 0x90, 0x64]));
/// ```
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    tag: Tag,
    cutoff: u64,
    dirty: bool,
}

impl File {
    /// Opens file at the given path and reads its tag, if any
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening or reading the file,
    /// or a format error if its tag is invalid.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let mut r = BufReader::new(std::fs::File::open(&path)?);

        let (tag, cutoff) = match TagHeader::read(&mut r)? {
            Some(header) => (Tag::read_body(header, r)?, header.total_len()),
            None => (Tag::new(Version::Id3v23), 0),
        };

        log::debug!("opened {} with tag ending at {cutoff}", path.display());

        Ok(Self {
            path,
            tag,
            cutoff,
            dirty: false,
        })
    }

    /// Returns our file's path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns our tag
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns our tag for modification,
    /// which marks the file as changed
    pub fn tag_mut(&mut self) -> &mut Tag {
        self.dirty = true;
        &mut self.tag
    }

    /// Where the on-disk tag ends and the audio data begins
    ///
    /// This is 0 for files with no tag.
    pub fn cutoff(&self) -> u64 {
        self.cutoff
    }

    /// Whether the tag has changed since it was last written
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns track title, if any
    pub fn title(&self) -> Option<&str> {
        self.tag.title()
    }

    /// Returns track artist, if any
    pub fn artist(&self) -> Option<&str> {
        self.tag.artist()
    }

    /// Returns album name, if any
    pub fn album(&self) -> Option<&str> {
        self.tag.album()
    }

    /// Returns recording year, if any
    pub fn year(&self) -> Option<&str> {
        self.tag.year()
    }

    /// Returns genre, if any
    pub fn genre(&self) -> Option<&str> {
        self.tag.genre()
    }

    /// Returns text of first comment, if any
    pub fn comment(&self) -> Option<&str> {
        self.tag.comment()
    }

    /// Iterates over all comment frames
    pub fn comments(&self) -> impl Iterator<Item = &UnsynchTextFrame> {
        self.tag.comments()
    }

    /// Returns unsynchronized lyrics, if any
    pub fn lyrics(&self) -> Option<&str> {
        self.tag.lyrics()
    }

    /// Returns first frame with the given identifier, if any
    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.tag.frame(id)
    }

    /// Iterates over all frames with the given identifier
    pub fn frames<'f>(&'f self, id: &'f str) -> impl Iterator<Item = &'f Frame> {
        self.tag.frames(id)
    }

    /// Iterates over all chapter frames
    pub fn chapters(&self) -> impl Iterator<Item = &ChapterFrame> {
        self.tag.chapters()
    }

    /// Iterates over all table of contents frames
    pub fn tocs(&self) -> impl Iterator<Item = &TocFrame> {
        self.tag.tocs()
    }

    /// Sets track title
    pub fn set_title(&mut self, title: &str) {
        self.tag_mut().set_title(title)
    }

    /// Sets track artist
    pub fn set_artist(&mut self, artist: &str) {
        self.tag_mut().set_artist(artist)
    }

    /// Sets album name
    pub fn set_album(&mut self, album: &str) {
        self.tag_mut().set_album(album)
    }

    /// Sets recording year
    pub fn set_year(&mut self, year: &str) {
        self.tag_mut().set_year(year)
    }

    /// Sets genre
    pub fn set_genre(&mut self, genre: &str) {
        self.tag_mut().set_genre(genre)
    }

    /// Sets text of comment with the given description
    pub fn set_comment(&mut self, description: &str, text: &str) {
        self.tag_mut().set_comment(description, text)
    }

    /// Sets unsynchronized lyrics
    pub fn set_lyrics(&mut self, lyrics: &str) {
        self.tag_mut().set_lyrics(lyrics)
    }

    /// Sets text frame to a single value
    pub fn set_text(&mut self, id: FrameId, value: &str) {
        self.tag_mut().set_text(id, value)
    }

    /// Appends frame to the end of the tag
    pub fn add_frame(&mut self, frame: Frame) {
        self.tag_mut().add_frame(frame)
    }

    /// Removes all frames with the given identifier, returning them
    pub fn remove_frames(&mut self, id: &str) -> Vec<Frame> {
        self.tag_mut().remove_frames(id)
    }

    /// Adjusts tag's padding prior to writing
    ///
    /// A tag which fits in the space of the original
    /// keeps the original's size.  A tag which doesn't
    /// gets [`DEFAULT_PADDING`] bytes of room to grow.
    /// A tag with no original leaves its padding as-is.
    fn fit_padding(&mut self) -> Result<(), Error> {
        use std::cmp::Ordering;

        if self.cutoff == 0 {
            return Ok(());
        }

        let unpadded = {
            let mut tag = self.tag.clone();
            tag.set_padding(0);
            tag.total_len()?
        };

        match unpadded.cmp(&self.cutoff) {
            Ordering::Less | Ordering::Equal => {
                // the difference fits in a u32
                // because the original tag size did
                self.tag
                    .set_padding(u32::try_from(self.cutoff - unpadded).unwrap_or_default());
            }
            Ordering::Greater => {
                self.tag.set_padding(DEFAULT_PADDING);
            }
        }

        Ok(())
    }

    /// Writes the new tag followed by the original file's
    /// audio data to a temporary file, then swaps it into place
    fn rewrite(&self, tag: &[u8]) -> Result<(), Error> {
        // symlinks are followed so the link itself survives
        let target = std::fs::canonicalize(&self.path)?;
        let dir = target.parent().unwrap_or(Path::new("/"));

        let mut original = std::fs::File::open(&target)?;
        let mut rebuilt = tempfile::NamedTempFile::new_in(dir)?;

        {
            let mut w = BufWriter::new(rebuilt.as_file_mut());
            w.write_all(tag)?;
            original.seek(SeekFrom::Start(self.cutoff))?;
            std::io::copy(&mut original, &mut w)?;
            w.flush()?;
        }

        rebuilt
            .as_file()
            .set_permissions(original.metadata()?.permissions())?;
        rebuilt.as_file().sync_all()?;
        drop(original);

        rebuilt
            .persist(&target)
            .map(|_| ())
            .map_err(|e| Error::Io(e.error))
    }

    /// Writes our tag to disk, if it has changed
    ///
    /// Returns `true` if the file was rewritten.
    /// An unchanged file is left completely untouched.
    ///
    /// The file is rebuilt alongside the original and renamed
    /// over it, so it keeps its permissions but is owned by
    /// the current user.  If the path is a symbolic link,
    /// the file it points to is the one replaced.
    ///
    /// # Errors
    ///
    /// Returns any error from writing the tag or rebuilding the file.
    /// Should that happen, the file on disk is left as it was
    /// and the file remains changed, so finalizing may be retried.
    pub fn finalize(&mut self) -> Result<bool, Error> {
        if !self.dirty {
            log::debug!("{} unchanged, skipping rewrite", self.path.display());
            return Ok(false);
        }

        self.fit_padding()?;
        let tag = self.tag.to_bytes()?;
        self.rewrite(&tag)?;

        log::debug!(
            "rewrote {} with {} byte tag, replacing {} byte tag",
            self.path.display(),
            tag.len(),
            self.cutoff
        );

        self.cutoff = tag.len() as u64;
        self.dirty = false;
        Ok(true)
    }

    /// Finalizes file and closes it
    ///
    /// Returns `true` if the file was rewritten.
    ///
    /// # Errors
    ///
    /// Returns any error from [`File::finalize`].
    pub fn close(mut self) -> Result<bool, Error> {
        self.finalize()
    }
}

/// Given a path, applies closure to its file's tag
/// and rewrites the file if the tag has changed
///
/// Returns `true` if the file was rewritten.
///
/// # Errors
///
/// Returns any error from the closure, or from
/// reading or rewriting the file.
///
/// # Example
///
/// ```
/// use id3_codec::{Error, file::update};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("track.mp3");
/// std::fs::write(&path, [0xFF, 0xFB]).unwrap();
///
/// // reading alone doesn't rewrite anything
/// assert!(!update(&path, |tag| Ok::<_, Error>(assert_eq!(tag.artist(), None))).unwrap());
///
/// assert!(update(&path, |tag| Ok::<_, Error>(tag.set_artist("Michael"))).unwrap());
/// ```
pub fn update<P, E>(path: P, f: impl FnOnce(&mut Tag) -> Result<(), E>) -> Result<bool, E>
where
    P: AsRef<Path>,
    E: From<Error>,
{
    let mut file = File::open(path)?;

    let mut tag = file.tag.clone();
    f(&mut tag)?;
    if tag != file.tag {
        file.tag = tag;
        file.dirty = true;
    }

    Ok(file.close()?)
}
