// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::{FrameId, FrameKind};
use crate::Version;

/// A commonly used tag field
///
/// Each version stores these fields in frames
/// with different identifiers.
///
/// | Field | ID3v2.2 | ID3v2.3 | ID3v2.4 |
/// |-------|--------:|--------:|--------:|
/// | `Title` | `TT2` | `TIT2` | `TIT2` |
/// | `Artist` | `TP1` | `TPE1` | `TPE1` |
/// | `Album` | `TAL` | `TALB` | `TALB` |
/// | `Year` | `TYE` | `TYER` | `TDRC` |
/// | `Genre` | `TCO` | `TCON` | `TCON` |
/// | `Comment` | `COM` | `COMM` | `COMM` |
/// | `Lyrics` | `ULT` | `USLT` | `USLT` |
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    /// Track title
    Title,
    /// Lead artist
    Artist,
    /// Album title
    Album,
    /// Year or recording time
    Year,
    /// Genre, or content type
    Genre,
    /// Comments
    Comment,
    /// Unsynchronized lyrics
    Lyrics,
}

/// Maps frame identifiers to frame kinds for one ID3v2 version
///
/// Identifiers not found in the registry are opaque
/// [`FrameKind::Data`] frames.
///
/// # Example
///
/// ```
/// use id3_codec::Version;
/// use id3_codec::frame::{FrameId, FrameKind, FrameRegistry};
///
/// let v22 = FrameRegistry::new(Version::Id3v22);
/// let v23 = FrameRegistry::new(Version::Id3v23);
///
/// assert_eq!(v22.identify(&FrameId::new("TT2").unwrap()), FrameKind::Text);
/// assert_eq!(v23.identify(&FrameId::new("TIT2").unwrap()), FrameKind::Text);
/// assert_eq!(v23.identify(&FrameId::new("CHAP").unwrap()), FrameKind::Chapter);
///
/// // a v2.2 identifier means nothing to a v2.3 tag
/// assert_eq!(v23.identify(&FrameId::new("TT2").unwrap()), FrameKind::Data);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameRegistry {
    version: Version,
    types: &'static [FrameType],
}

/// A single registry entry
type FrameType = (&'static str, FrameKind, &'static str);

impl FrameRegistry {
    /// Builds registry for the given version
    pub fn new(version: Version) -> Self {
        Self {
            version,
            types: match version {
                Version::Id3v22 => V22_FRAMES,
                Version::Id3v23 => V23_FRAMES,
                Version::Id3v24 => V24_FRAMES,
            },
        }
    }

    /// The version this registry applies to
    pub fn version(&self) -> Version {
        self.version
    }

    fn find(&self, id: &FrameId) -> Option<&'static FrameType> {
        self.types.iter().find(|(i, _, _)| *i == id.as_str())
    }

    /// Returns kind of frame for the given identifier
    pub fn identify(&self, id: &FrameId) -> FrameKind {
        self.find(id).map(|(_, kind, _)| *kind).unwrap_or_default()
    }

    /// Returns human-readable description of frame, if known
    pub fn describe(&self, id: &FrameId) -> Option<&'static str> {
        self.find(id).map(|(_, _, description)| *description)
    }

    /// Returns frame identifier used for the given field
    pub fn field_id(&self, field: Field) -> FrameId {
        let id = match (self.version, field) {
            (Version::Id3v22, Field::Title) => "TT2",
            (Version::Id3v22, Field::Artist) => "TP1",
            (Version::Id3v22, Field::Album) => "TAL",
            (Version::Id3v22, Field::Year) => "TYE",
            (Version::Id3v22, Field::Genre) => "TCO",
            (Version::Id3v22, Field::Comment) => "COM",
            (Version::Id3v22, Field::Lyrics) => "ULT",
            (_, Field::Title) => "TIT2",
            (_, Field::Artist) => "TPE1",
            (_, Field::Album) => "TALB",
            (Version::Id3v23, Field::Year) => "TYER",
            (_, Field::Year) => "TDRC",
            (_, Field::Genre) => "TCON",
            (_, Field::Comment) => "COMM",
            (_, Field::Lyrics) => "USLT",
        };

        FrameId::new_unchecked(id)
    }
}

const V22_FRAMES: &[FrameType] = &[
    ("BUF", FrameKind::Data, "Recommended buffer size"),
    ("CNT", FrameKind::Data, "Play counter"),
    ("COM", FrameKind::UnsynchText, "Comments"),
    ("CRA", FrameKind::Data, "Audio encryption"),
    ("CRM", FrameKind::Data, "Encrypted meta frame"),
    ("ETC", FrameKind::Data, "Event timing codes"),
    ("EQU", FrameKind::Data, "Equalization"),
    ("GEO", FrameKind::Data, "General encapsulated object"),
    ("IPL", FrameKind::Data, "Involved people list"),
    ("LNK", FrameKind::Data, "Linked information"),
    ("MCI", FrameKind::Data, "Music CD Identifier"),
    ("MLL", FrameKind::Data, "MPEG location lookup table"),
    ("PIC", FrameKind::Data, "Attached picture"),
    ("POP", FrameKind::Data, "Popularimeter"),
    ("REV", FrameKind::Data, "Reverb"),
    ("RVA", FrameKind::Data, "Relative volume adjustment"),
    ("SLT", FrameKind::Data, "Synchronized lyric/text"),
    ("STC", FrameKind::Data, "Synced tempo codes"),
    ("TAL", FrameKind::Text, "Album/Movie/Show title"),
    ("TBP", FrameKind::Text, "BPM (Beats Per Minute)"),
    ("TCM", FrameKind::Text, "Composer"),
    ("TCO", FrameKind::Text, "Content type"),
    ("TCR", FrameKind::Text, "Copyright message"),
    ("TDA", FrameKind::Text, "Date"),
    ("TDY", FrameKind::Text, "Playlist delay"),
    ("TEN", FrameKind::Text, "Encoded by"),
    ("TFT", FrameKind::Text, "File type"),
    ("TIM", FrameKind::Text, "Time"),
    ("TKE", FrameKind::Text, "Initial key"),
    ("TLA", FrameKind::Text, "Language(s)"),
    ("TLE", FrameKind::Text, "Length"),
    ("TMT", FrameKind::Text, "Media type"),
    ("TOA", FrameKind::Text, "Original artist(s)/performer(s)"),
    ("TOF", FrameKind::Text, "Original filename"),
    ("TOL", FrameKind::Text, "Original Lyricist(s)/text writer(s)"),
    ("TOR", FrameKind::Text, "Original release year"),
    ("TOT", FrameKind::Text, "Original album/Movie/Show title"),
    ("TP1", FrameKind::Text, "Lead artist(s)/Lead performer(s)/Soloist(s)/Performing group"),
    ("TP2", FrameKind::Text, "Band/Orchestra/Accompaniment"),
    ("TP3", FrameKind::Text, "Conductor/Performer refinement"),
    ("TP4", FrameKind::Text, "Interpreted, remixed, or otherwise modified by"),
    ("TPA", FrameKind::Text, "Part of a set"),
    ("TPB", FrameKind::Text, "Publisher"),
    ("TRC", FrameKind::Text, "ISRC (International Standard Recording Code)"),
    ("TRD", FrameKind::Text, "Recording dates"),
    ("TRK", FrameKind::Text, "Track number/Position in set"),
    ("TSI", FrameKind::Text, "Size"),
    ("TSS", FrameKind::Text, "Software/hardware and settings used for encoding"),
    ("TT1", FrameKind::Text, "Content group description"),
    ("TT2", FrameKind::Text, "Title/Songname/Content description"),
    ("TT3", FrameKind::Text, "Subtitle/Description refinement"),
    ("TXT", FrameKind::Text, "Lyricist/text writer"),
    ("TXX", FrameKind::Data, "User defined text information frame"),
    ("TYE", FrameKind::Text, "Year"),
    ("UFI", FrameKind::Data, "Unique file identifier"),
    ("ULT", FrameKind::UnsynchText, "Unsychronized lyric/text transcription"),
    ("WAF", FrameKind::Data, "Official audio file webpage"),
    ("WAR", FrameKind::Data, "Official artist/performer webpage"),
    ("WAS", FrameKind::Data, "Official audio source webpage"),
    ("WCM", FrameKind::Data, "Commercial information"),
    ("WCP", FrameKind::Data, "Copyright/Legal information"),
    ("WPB", FrameKind::Data, "Publishers official webpage"),
    ("WXX", FrameKind::Data, "User defined URL link frame"),
];

const V23_FRAMES: &[FrameType] = &[
    ("AENC", FrameKind::Data, "Audio encryption"),
    ("APIC", FrameKind::Data, "Attached picture"),
    ("CHAP", FrameKind::Chapter, "Chapter"),
    ("COMM", FrameKind::UnsynchText, "Comments"),
    ("COMR", FrameKind::Data, "Commercial frame"),
    ("CTOC", FrameKind::Toc, "Table of contents"),
    ("ENCR", FrameKind::Data, "Encryption method registration"),
    ("EQUA", FrameKind::Data, "Equalization"),
    ("ETCO", FrameKind::Data, "Event timing codes"),
    ("GEOB", FrameKind::Data, "General encapsulated object"),
    ("GRID", FrameKind::Data, "Group identification registration"),
    ("IPLS", FrameKind::Data, "Involved people list"),
    ("LINK", FrameKind::Data, "Linked information"),
    ("MCDI", FrameKind::Data, "Music CD identifier"),
    ("MLLT", FrameKind::Data, "MPEG location lookup table"),
    ("OWNE", FrameKind::Data, "Ownership frame"),
    ("PRIV", FrameKind::Data, "Private frame"),
    ("PCNT", FrameKind::Data, "Play counter"),
    ("POPM", FrameKind::Data, "Popularimeter"),
    ("POSS", FrameKind::Data, "Position synchronisation frame"),
    ("RBUF", FrameKind::Data, "Recommended buffer size"),
    ("RVAD", FrameKind::Data, "Relative volume adjustment"),
    ("RVRB", FrameKind::Data, "Reverb"),
    ("SYLT", FrameKind::Data, "Synchronized lyric/text"),
    ("SYTC", FrameKind::Data, "Synchronized tempo codes"),
    ("TALB", FrameKind::Text, "Album/Movie/Show title"),
    ("TBPM", FrameKind::Text, "BPM (beats per minute)"),
    ("TCOM", FrameKind::Text, "Composer"),
    ("TCON", FrameKind::Text, "Content type"),
    ("TCOP", FrameKind::Text, "Copyright message"),
    ("TDAT", FrameKind::Text, "Date"),
    ("TDLY", FrameKind::Text, "Playlist delay"),
    ("TENC", FrameKind::Text, "Encoded by"),
    ("TEXT", FrameKind::Text, "Lyricist/Text writer"),
    ("TFLT", FrameKind::Text, "File type"),
    ("TIME", FrameKind::Text, "Time"),
    ("TIT1", FrameKind::Text, "Content group description"),
    ("TIT2", FrameKind::Text, "Title/songname/content description"),
    ("TIT3", FrameKind::Text, "Subtitle/Description refinement"),
    ("TKEY", FrameKind::Text, "Initial key"),
    ("TLAN", FrameKind::Text, "Language(s)"),
    ("TLEN", FrameKind::Text, "Length"),
    ("TMED", FrameKind::Text, "Media type"),
    ("TOAL", FrameKind::Text, "Original album/movie/show title"),
    ("TOFN", FrameKind::Text, "Original filename"),
    ("TOLY", FrameKind::Text, "Original lyricist(s)/text writer(s)"),
    ("TOPE", FrameKind::Text, "Original artist(s)/performer(s)"),
    ("TORY", FrameKind::Text, "Original release year"),
    ("TOWN", FrameKind::Text, "File owner/licensee"),
    ("TPE1", FrameKind::Text, "Lead performer(s)/Soloist(s)"),
    ("TPE2", FrameKind::Text, "Band/orchestra/accompaniment"),
    ("TPE3", FrameKind::Text, "Conductor/performer refinement"),
    ("TPE4", FrameKind::Text, "Interpreted, remixed, or otherwise modified by"),
    ("TPOS", FrameKind::Text, "Part of a set"),
    ("TPUB", FrameKind::Text, "Publisher"),
    ("TRCK", FrameKind::Text, "Track number/Position in set"),
    ("TRDA", FrameKind::Text, "Recording dates"),
    ("TRSN", FrameKind::Text, "Internet radio station name"),
    ("TRSO", FrameKind::Text, "Internet radio station owner"),
    ("TSIZ", FrameKind::Text, "Size"),
    ("TSRC", FrameKind::Text, "ISRC (international standard recording code)"),
    ("TSSE", FrameKind::Text, "Software/Hardware and settings used for encoding"),
    ("TYER", FrameKind::Text, "Year"),
    ("TXXX", FrameKind::Data, "User defined text information frame"),
    ("UFID", FrameKind::Data, "Unique file identifier"),
    ("USER", FrameKind::Data, "Terms of use"),
    ("USLT", FrameKind::UnsynchText, "Unsychronized lyric/text transcription"),
    ("WCOM", FrameKind::Data, "Commercial information"),
    ("WCOP", FrameKind::Data, "Copyright/Legal information"),
    ("WOAF", FrameKind::Data, "Official audio file webpage"),
    ("WOAR", FrameKind::Data, "Official artist/performer webpage"),
    ("WOAS", FrameKind::Data, "Official audio source webpage"),
    ("WORS", FrameKind::Data, "Official internet radio station homepage"),
    ("WPAY", FrameKind::Data, "Payment"),
    ("WPUB", FrameKind::Data, "Publishers official webpage"),
    ("WXXX", FrameKind::Data, "User defined URL link frame"),
];

const V24_FRAMES: &[FrameType] = &[
    ("AENC", FrameKind::Data, "Audio encryption"),
    ("APIC", FrameKind::Data, "Attached picture"),
    ("ASPI", FrameKind::Data, "Audio seek point index"),
    ("CHAP", FrameKind::Chapter, "Chapter"),
    ("COMM", FrameKind::UnsynchText, "Comments"),
    ("COMR", FrameKind::Data, "Commercial frame"),
    ("CTOC", FrameKind::Toc, "Table of contents"),
    ("ENCR", FrameKind::Data, "Encryption method registration"),
    ("EQU2", FrameKind::Data, "Equalisation (2)"),
    ("ETCO", FrameKind::Data, "Event timing codes"),
    ("GEOB", FrameKind::Data, "General encapsulated object"),
    ("GRID", FrameKind::Data, "Group identification registration"),
    ("LINK", FrameKind::Data, "Linked information"),
    ("MCDI", FrameKind::Data, "Music CD identifier"),
    ("MLLT", FrameKind::Data, "MPEG location lookup table"),
    ("OWNE", FrameKind::Data, "Ownership frame"),
    ("PRIV", FrameKind::Data, "Private frame"),
    ("PCNT", FrameKind::Data, "Play counter"),
    ("POPM", FrameKind::Data, "Popularimeter"),
    ("POSS", FrameKind::Data, "Position synchronisation frame"),
    ("RBUF", FrameKind::Data, "Recommended buffer size"),
    ("RVA2", FrameKind::Data, "Relative volume adjustment (2)"),
    ("RVRB", FrameKind::Data, "Reverb"),
    ("SEEK", FrameKind::Data, "Seek frame"),
    ("SIGN", FrameKind::Data, "Signature frame"),
    ("SYLT", FrameKind::Data, "Synchronised lyric/text"),
    ("SYTC", FrameKind::Data, "Synchronised tempo codes"),
    ("TALB", FrameKind::Text, "Album/Movie/Show title"),
    ("TBPM", FrameKind::Text, "BPM (beats per minute)"),
    ("TCOM", FrameKind::Text, "Composer"),
    ("TCON", FrameKind::Text, "Content type"),
    ("TCOP", FrameKind::Text, "Copyright message"),
    ("TDEN", FrameKind::Text, "Encoding time"),
    ("TDLY", FrameKind::Text, "Playlist delay"),
    ("TDOR", FrameKind::Text, "Original release time"),
    ("TDRC", FrameKind::Text, "Recording time"),
    ("TDRL", FrameKind::Text, "Release time"),
    ("TDTG", FrameKind::Text, "Tagging time"),
    ("TENC", FrameKind::Text, "Encoded by"),
    ("TEXT", FrameKind::Text, "Lyricist/Text writer"),
    ("TFLT", FrameKind::Text, "File type"),
    ("TIPL", FrameKind::Text, "Involved people list"),
    ("TIT1", FrameKind::Text, "Content group description"),
    ("TIT2", FrameKind::Text, "Title/songname/content description"),
    ("TIT3", FrameKind::Text, "Subtitle/Description refinement"),
    ("TKEY", FrameKind::Text, "Initial key"),
    ("TLAN", FrameKind::Text, "Language(s)"),
    ("TLEN", FrameKind::Text, "Length"),
    ("TMCL", FrameKind::Text, "Musician credits list"),
    ("TMED", FrameKind::Text, "Media type"),
    ("TMOO", FrameKind::Text, "Mood"),
    ("TOAL", FrameKind::Text, "Original album/movie/show title"),
    ("TOFN", FrameKind::Text, "Original filename"),
    ("TOLY", FrameKind::Text, "Original lyricist(s)/text writer(s)"),
    ("TOPE", FrameKind::Text, "Original artist(s)/performer(s)"),
    ("TOWN", FrameKind::Text, "File owner/licensee"),
    ("TPE1", FrameKind::Text, "Lead performer(s)/Soloist(s)"),
    ("TPE2", FrameKind::Text, "Band/orchestra/accompaniment"),
    ("TPE3", FrameKind::Text, "Conductor/performer refinement"),
    ("TPE4", FrameKind::Text, "Interpreted, remixed, or otherwise modified by"),
    ("TPOS", FrameKind::Text, "Part of a set"),
    ("TPRO", FrameKind::Text, "Produced notice"),
    ("TPUB", FrameKind::Text, "Publisher"),
    ("TRCK", FrameKind::Text, "Track number/Position in set"),
    ("TRSN", FrameKind::Text, "Internet radio station name"),
    ("TRSO", FrameKind::Text, "Internet radio station owner"),
    ("TSOA", FrameKind::Text, "Album sort order"),
    ("TSOP", FrameKind::Text, "Performer sort order"),
    ("TSOT", FrameKind::Text, "Title sort order"),
    ("TSRC", FrameKind::Text, "ISRC (international standard recording code)"),
    ("TSSE", FrameKind::Text, "Software/Hardware and settings used for encoding"),
    ("TSST", FrameKind::Text, "Set subtitle"),
    ("TXXX", FrameKind::Data, "User defined text information frame"),
    ("UFID", FrameKind::Data, "Unique file identifier"),
    ("USER", FrameKind::Data, "Terms of use"),
    ("USLT", FrameKind::UnsynchText, "Unsynchronised lyric/text transcription"),
    ("WCOM", FrameKind::Data, "Commercial information"),
    ("WCOP", FrameKind::Data, "Copyright/Legal information"),
    ("WOAF", FrameKind::Data, "Official audio file webpage"),
    ("WOAR", FrameKind::Data, "Official artist/performer webpage"),
    ("WOAS", FrameKind::Data, "Official audio source webpage"),
    ("WORS", FrameKind::Data, "Official Internet radio station homepage"),
    ("WPAY", FrameKind::Data, "Payment"),
    ("WPUB", FrameKind::Data, "Publishers official webpage"),
    ("WXXX", FrameKind::Data, "User defined URL link frame"),
];

#[test]
fn test_registry_ids() {
    // every identifier must be valid for its version
    for version in [Version::Id3v22, Version::Id3v23, Version::Id3v24] {
        let registry = FrameRegistry::new(version);
        for (id, _, _) in registry.types {
            let id = FrameId::new(id).unwrap();
            assert_eq!(id.len(), version.id_len());
        }

        for field in [
            Field::Title,
            Field::Artist,
            Field::Album,
            Field::Year,
            Field::Genre,
            Field::Comment,
            Field::Lyrics,
        ] {
            let id = registry.field_id(field);
            assert_eq!(id.len(), version.id_len());
            assert_ne!(registry.identify(&id), FrameKind::Data);
        }
    }
}
