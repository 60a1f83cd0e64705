// CLI command implementations
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use id3v1tag::{genre_code, Field, Id3v1Tag, TagError, GENRES};
use log::debug;

use crate::cli::config::TagValues;
use crate::cli::output::OutputFormatter;

/// Read tags from files
///
/// Files without a tag are reported and skipped. Any other failure aborts.
pub fn command_read(
    files: &[PathBuf],
    fields: &[Field],
    output: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(io::stdout())
    };

    for path in files {
        match id3v1tag::read_tag(path) {
            Ok(tag) => formatter.output_tag(path, &tag, fields, &mut writer)?,
            Err(TagError::NotFound) => {
                formatter.print_error(&format!("{}: no ID3v1 tag", path.display()));
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write a tag to a file
///
/// The starting point is the file's current tag, an empty tag (`clear`), or a
/// JSON document (`from_json`). Values given on the command line are applied
/// on top.
pub fn command_write(
    file: &Path,
    values: &TagValues,
    from_json: Option<&Path>,
    clear: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let base = if let Some(json_path) = from_json {
        let json = std::fs::read_to_string(json_path)
            .with_context(|| format!("Failed to read {}", json_path.display()))?;
        serde_json::from_str(&json).context("Invalid tag JSON")?
    } else if clear {
        Id3v1Tag::default()
    } else {
        match id3v1tag::read_tag(file) {
            Ok(tag) => tag,
            Err(TagError::NotFound) => {
                debug!("{} has no tag, starting from an empty one", file.display());
                Id3v1Tag::default()
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", file.display())),
        }
    };

    let tag = apply_values(base, values)?;
    id3v1tag::write_tag(file, &tag).with_context(|| format!("Failed to write {}", file.display()))?;
    formatter.print_success(&format!("Updated tag for {}", file.display()));

    Ok(())
}

/// Remove tags from files
pub fn command_remove(files: &[PathBuf], formatter: &OutputFormatter) -> Result<()> {
    for path in files {
        let removed = id3v1tag::remove_tag(path)
            .with_context(|| format!("Failed to update {}", path.display()))?;
        if removed {
            formatter.print_success(&format!("Removed tag from {}", path.display()));
        } else {
            formatter.print_info(&format!("{}: no ID3v1 tag", path.display()));
        }
    }

    Ok(())
}

/// List the genre table
pub fn command_genres(formatter: &OutputFormatter) -> Result<()> {
    let stdout = io::stdout();
    formatter.output_genres(&GENRES, &mut stdout.lock())
}

fn apply_values(mut tag: Id3v1Tag, values: &TagValues) -> Result<Id3v1Tag> {
    let text = [
        (&mut tag.title, &values.title),
        (&mut tag.artist, &values.artist),
        (&mut tag.album, &values.album),
        (&mut tag.year, &values.year),
        (&mut tag.comment, &values.comment),
    ];
    for (slot, value) in text {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }

    if let Some(track) = values.track {
        tag.track = track;
    }

    if let Some(genre) = &values.genre {
        tag.genre = parse_genre(genre)?;
    }

    Ok(tag)
}

/// Accept a genre code (any byte value) or a name from the table
fn parse_genre(value: &str) -> Result<u8> {
    if let Ok(code) = value.trim().parse::<u8>() {
        return Ok(code);
    }

    genre_code(value).ok_or_else(|| anyhow!("Unknown genre `{}`", value))
}
