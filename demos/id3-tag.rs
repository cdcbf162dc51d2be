use id3_codec::file::update;
use id3_codec::frame::{FrameContent, FrameId};
use id3_codec::tag::Tag;

/// Roughly corresponds to:
///
/// "id3v2 --TIT2 TITLE <file.mp3>"
///
/// Though without a full argument parser,
/// it operates on only a single file at a time.
/// When no fields are indicated, it simply
/// displays the file's existing frames.
///
/// Fields may be TITLE, ARTIST, ALBUM, YEAR, GENRE,
/// COMMENT, LYRICS or any text frame identifier.

fn main() {
    env_logger::init();

    match std::env::args().skip(1).collect::<Vec<_>>().as_slice() {
        [mp3] => match Tag::open(mp3) {
            Ok(tag) => display(&tag),
            Err(err) => eprintln!("* Error: {err}"),
        },
        [fields @ .., mp3] if fields.iter().all(|t| t.contains('=')) => {
            match update(mp3, |tag| {
                for field in fields {
                    if let Some((field, value)) = field.split_once('=') {
                        set(tag, field, value)?;
                    }
                }
                Ok::<(), id3_codec::Error>(())
            }) {
                Ok(true) => println!("* {mp3}: Updated"),
                Ok(false) => println!("* {mp3}: Unchanged"),
                Err(err) => println!("* Error: {mp3} - {err}"),
            }
        }
        _ => eprintln!("* Usage: \"TITLE=Track Title\" \"ALBUM=Album Title\" <file.mp3>"),
    }
}

fn display(tag: &Tag) {
    let registry = tag.registry();

    println!("{} tag, {} bytes padding", tag.version(), tag.padding());
    for frame in tag.iter() {
        let description = registry.describe(&frame.id).unwrap_or("Unknown");
        match &frame.content {
            FrameContent::Text(text) => {
                println!("{} ({description}): {}", frame.id, text.values.join(" / "))
            }
            FrameContent::UnsynchText(text) => println!(
                "{} ({description}): [{}] {}: {}",
                frame.id,
                text.language(),
                text.description,
                text.text
            ),
            FrameContent::Chapter(chapter) => println!(
                "{} ({description}): {} {}-{}ms {}",
                frame.id,
                chapter.element_id,
                chapter.start_time,
                chapter.end_time,
                chapter.title().unwrap_or_default()
            ),
            FrameContent::Toc(toc) => println!(
                "{} ({description}): {} [{}]",
                frame.id,
                toc.element_id,
                toc.child_elements.join(", ")
            ),
            FrameContent::Data(data) => {
                println!("{} ({description}): {} bytes", frame.id, data.len())
            }
        }
    }
}

fn set(tag: &mut Tag, field: &str, value: &str) -> Result<(), id3_codec::Error> {
    match field.to_ascii_uppercase().as_str() {
        "TITLE" => tag.set_title(value),
        "ARTIST" => tag.set_artist(value),
        "ALBUM" => tag.set_album(value),
        "YEAR" => tag.set_year(value),
        "GENRE" => tag.set_genre(value),
        "COMMENT" => tag.set_comment("", value),
        "LYRICS" => tag.set_lyrics(value),
        id => tag.set_text(FrameId::new(id)?, value),
    }
    Ok(())
}
