// ID3v1 tag implementation

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TagError};
use crate::field_mapping::Field;
use crate::id3::genres;
use crate::utils::{encoding, io};

/// Size of an ID3v1 tag in bytes
pub const TAG_SIZE: usize = 128;

/// Marker at the start of every tag
pub const TAG_ID: &[u8; 3] = b"TAG";

/// ID3v1 tag structure
///
/// Text fields hold at most 30 bytes (year: 4) once encoded. A `track` of 0
/// means no track number. `genre` is stored verbatim even when it has no
/// entry in the genre table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    pub track: u8,
    pub genre: u8,
}

/// Read the raw tag region, the last [`TAG_SIZE`] bytes of the stream
pub fn locate<R: Read + Seek>(reader: &mut R) -> Result<[u8; TAG_SIZE]> {
    let mut buffer = [0u8; TAG_SIZE];
    io::read_tail(reader, &mut buffer)?;
    Ok(buffer)
}

/// Check for the TAG identifier
pub fn validate(raw: &[u8]) -> bool {
    raw.starts_with(TAG_ID)
}

/// Decode a raw tag
///
/// The marker is not checked, and the result is not normalized.
pub fn decode(raw: &[u8; TAG_SIZE]) -> Id3v1Tag {
    let text = |field: Field| {
        let slot = &raw[field.slot().range()];
        encoding::decode_latin1(encoding::until_nul(slot))
    };

    Id3v1Tag {
        title: text(Field::Title),
        artist: text(Field::Artist),
        album: text(Field::Album),
        year: text(Field::Year),
        comment: text(Field::Comment),
        // A zero byte is "no track"; anything else is taken as-is
        track: raw[Field::Track.slot().offset],
        genre: raw[Field::Genre.slot().offset],
    }
}

/// Write an encoded tag at the writer's current position
pub fn encode<W: Write>(writer: &mut W, tag: &Id3v1Tag) -> Result<()> {
    let bytes = tag.to_bytes()?;
    writer.write_all(&bytes)?;
    Ok(())
}

impl Id3v1Tag {
    /// Create an empty tag
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the tag at the end of a stream
    ///
    /// Fails with [`TagError::NotFound`] if the stream is too short to hold a
    /// tag or the last 128 bytes do not start with `TAG`.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let len = io::stream_len(reader)?;
        if len < TAG_SIZE as u64 {
            debug!("ID3v1: stream is {} bytes, too short for a tag", len);
            return Err(TagError::NotFound);
        }

        let raw = locate(reader)?;
        if !validate(&raw) {
            debug!("ID3v1: no TAG marker in the last {} bytes", TAG_SIZE);
            return Err(TagError::NotFound);
        }

        let mut tag = decode(&raw);
        tag.normalize();
        trace!("ID3v1: decoded {:?}", tag);

        Ok(tag)
    }

    /// Read ID3v1 tag from file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::read_from(&mut file)
    }

    /// Whether the last 128 bytes of the stream start with `TAG`
    pub fn is_present<R: Read + Seek>(reader: &mut R) -> Result<bool> {
        if io::stream_len(reader)? < TAG_SIZE as u64 {
            return Ok(false);
        }

        reader.seek(SeekFrom::End(-(TAG_SIZE as i64)))?;
        Ok(io::check_signature(reader, TAG_ID)?)
    }

    /// Write the tag to the end of a stream
    ///
    /// An existing tag is overwritten in place, otherwise the tag is appended.
    /// Nothing is written if the tag fails to encode.
    pub fn write_to<F: Read + Write + Seek>(&self, file: &mut F) -> Result<()> {
        let bytes = self.to_bytes()?;

        if Self::is_present(file)? {
            debug!("ID3v1: overwriting existing tag");
            file.seek(SeekFrom::End(-(TAG_SIZE as i64)))?;
        } else {
            debug!("ID3v1: appending new tag");
            file.seek(SeekFrom::End(0))?;
        }

        file.write_all(&bytes)?;
        file.flush()?;

        Ok(())
    }

    /// Write the tag to an existing file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        self.write_to(&mut file)
    }

    /// Strip a trailing tag from a file
    ///
    /// Returns `false` if the file had no tag.
    pub fn remove_from_file<P: AsRef<Path>>(path: P) -> Result<bool> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        if !Self::is_present(&mut file)? {
            return Ok(false);
        }

        let len = io::stream_len(&mut file)?;
        file.set_len(len - TAG_SIZE as u64)?;
        debug!("ID3v1: removed tag, file is now {} bytes", len - TAG_SIZE as u64);

        Ok(true)
    }

    /// Encode into the 128-byte wire form
    ///
    /// Text is NUL-padded to its slot. A nonzero track replaces the last byte
    /// of the comment slot, so a 30-byte comment loses its final character.
    pub fn to_bytes(&self) -> Result<[u8; TAG_SIZE]> {
        let mut tag = [0u8; TAG_SIZE];
        tag[..TAG_ID.len()].copy_from_slice(TAG_ID);

        for field in Field::TEXT {
            let slot = field.slot();
            let value = encode_field(field, self.text(field))?;
            tag[slot.offset..slot.offset + value.len()].copy_from_slice(&value);
        }

        if self.track != 0 {
            tag[Field::Track.slot().offset] = self.track;
        }
        tag[Field::Genre.slot().offset] = self.genre;

        Ok(tag)
    }

    /// Strip trailing spaces from title, artist, album and comment
    pub fn normalize(&mut self) {
        for field in Field::TEXT.into_iter().filter(|f| f.is_trimmed()) {
            if let Some(text) = self.text_mut(field) {
                let trimmed = text.trim_end_matches(' ').len();
                text.truncate(trimmed);
            }
        }
    }

    /// Genre name, "Unknown" for codes without a table entry
    pub fn genre_name(&self) -> &'static str {
        genres::genre_name(self.genre)
    }

    /// Track number, `None` when absent
    pub fn track_number(&self) -> Option<u8> {
        (self.track != 0).then_some(self.track)
    }

    /// Human-readable value of one field
    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::Track => self.track.to_string(),
            Field::Genre => format!("{} ({})", self.genre_name(), self.genre),
            _ => self.text(field).to_string(),
        }
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Artist => &self.artist,
            Field::Album => &self.album,
            Field::Year => &self.year,
            Field::Comment => &self.comment,
            Field::Track | Field::Genre => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Artist => Some(&mut self.artist),
            Field::Album => Some(&mut self.album),
            Field::Year => Some(&mut self.year),
            Field::Comment => Some(&mut self.comment),
            Field::Track | Field::Genre => None,
        }
    }
}

fn encode_field(field: Field, value: &str) -> Result<Vec<u8>> {
    let bytes = encoding::encode_latin1(value).ok_or(TagError::Unencodable { field })?;
    let max = field.slot().len;
    if bytes.len() > max {
        return Err(TagError::FieldTooLong {
            field,
            len: bytes.len(),
            max,
        });
    }

    Ok(bytes)
}

impl fmt::Display for Id3v1Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title..: {}", self.title)?;
        writeln!(f, "Artist.: {}", self.artist)?;
        writeln!(f, "Album..: {}", self.album)?;
        writeln!(f, "Year...: {}", self.year)?;
        writeln!(f, "Comment: {}", self.comment)?;
        writeln!(f, "Genre..: {} ({})", self.genre_name(), self.genre)?;
        write!(f, "Track..: {}", self.track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sting() -> Id3v1Tag {
        Id3v1Tag {
            title: "Englishman in New York".to_string(),
            artist: "Sting".to_string(),
            album: "Album".to_string(),
            year: "Year".to_string(),
            comment: "Comment".to_string(),
            track: 4,
            genre: 24,
        }
    }

    fn raw_with(field: Field, value: &[u8]) -> [u8; TAG_SIZE] {
        let mut raw = [0u8; TAG_SIZE];
        raw[..3].copy_from_slice(TAG_ID);
        let offset = field.slot().offset;
        raw[offset..offset + value.len()].copy_from_slice(value);
        raw
    }

    #[test]
    fn encoded_layout() {
        let bytes = sting().to_bytes().unwrap();

        assert_eq!(bytes.len(), TAG_SIZE);
        assert_eq!(&bytes[..3], b"TAG");
        assert_eq!(&bytes[3..25], b"Englishman in New York");
        assert!(bytes[25..33].iter().all(|&b| b == 0));
        assert_eq!(&bytes[33..38], b"Sting");
        assert_eq!(&bytes[63..68], b"Album");
        assert_eq!(&bytes[93..97], b"Year");
        assert_eq!(&bytes[97..104], b"Comment");
        assert_eq!(bytes[126], 4);
        assert_eq!(bytes[127], 24);
    }

    #[test]
    fn round_trip() {
        let tag = sting();
        let mut decoded = decode(&tag.to_bytes().unwrap());
        decoded.normalize();
        assert_eq!(decoded, tag);
    }

    #[test]
    fn round_trip_drops_trailing_spaces() {
        let mut tag = sting();
        tag.title = "Fields of Gold  ".to_string();
        tag.comment = "live ".to_string();
        tag.year = "199 ".to_string();

        let mut decoded = decode(&tag.to_bytes().unwrap());
        decoded.normalize();

        assert_eq!(decoded.title, "Fields of Gold");
        assert_eq!(decoded.comment, "live");
        assert_eq!(decoded.year, "199 ");
    }

    #[test]
    fn marker() {
        let bytes = Id3v1Tag::new().to_bytes().unwrap();
        assert!(validate(&bytes));

        let mut tampered = bytes;
        tampered[2] = b'X';
        assert!(!validate(&tampered));
        assert!(!validate(&[0u8; TAG_SIZE]));
        assert!(!validate(b"TA"));
    }

    #[test]
    fn track_overwrites_last_comment_byte() {
        let mut tag = sting();
        tag.comment = "abcdefghijklmnopqrstuvwxyz0123".to_string();
        assert_eq!(tag.comment.len(), 30);

        let bytes = tag.to_bytes().unwrap();
        assert_eq!(&bytes[97..126], b"abcdefghijklmnopqrstuvwxyz012");
        assert_eq!(bytes[126], 4);

        tag.track = 0;
        let bytes = tag.to_bytes().unwrap();
        assert_eq!(&bytes[97..127], b"abcdefghijklmnopqrstuvwxyz0123");
    }

    #[test]
    fn zero_track_leaves_comment_padding() {
        let mut tag = sting();
        tag.track = 0;
        let bytes = tag.to_bytes().unwrap();
        assert!(bytes[104..127].iter().all(|&b| b == 0));
    }

    #[test]
    fn trims_only_trailing_spaces() {
        let mut padded = b"Sting".to_vec();
        padded.extend_from_slice(&[b' '; 25]);
        let mut raw = raw_with(Field::Title, &padded);
        let offset = Field::Artist.slot().offset;
        raw[offset..offset + 30].copy_from_slice(&[b' '; 30]);
        let offset = Field::Album.slot().offset;
        raw[offset..offset + 7].copy_from_slice(b"  Album");
        let offset = Field::Year.slot().offset;
        raw[offset..offset + 4].copy_from_slice(b"200 ");

        let mut tag = decode(&raw);
        tag.normalize();

        assert_eq!(tag.title, "Sting");
        assert_eq!(tag.artist, "");
        assert_eq!(tag.album, "  Album");
        assert_eq!(tag.year, "200 ");
    }

    #[test]
    fn text_stops_at_nul_and_slot_end() {
        let raw = raw_with(Field::Title, b"Roxanne\0junk");
        assert_eq!(decode(&raw).title, "Roxanne");

        // A full slot runs straight into the next one without leaking into it
        let mut raw = raw_with(Field::Title, &[b'a'; 30]);
        let offset = Field::Artist.slot().offset;
        raw[offset..offset + 5].copy_from_slice(b"Sting");
        let tag = decode(&raw);
        assert_eq!(tag.title.len(), 30);
        assert_eq!(tag.artist, "Sting");
    }

    #[test]
    fn track_and_genre_are_raw_bytes() {
        let mut raw = raw_with(Field::Comment, b"hello");
        raw[126] = 0;
        raw[127] = 200;
        let tag = decode(&raw);
        assert_eq!(tag.track, 0);
        assert_eq!(tag.track_number(), None);
        assert_eq!(tag.genre, 200);
        assert_eq!(tag.genre_name(), "Unknown");

        raw[126] = 12;
        let tag = decode(&raw);
        assert_eq!(tag.track_number(), Some(12));
        assert_eq!(tag.comment, "hello");
    }

    #[test]
    fn latin1_text() {
        let mut tag = Id3v1Tag::new();
        tag.artist = "Björk".to_string();

        let bytes = tag.to_bytes().unwrap();
        assert_eq!(&bytes[33..38], b"Bj\xF6rk");
        assert_eq!(decode(&bytes).artist, "Björk");
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let mut tag = sting();
        tag.title = "x".repeat(31);
        match tag.to_bytes() {
            Err(TagError::FieldTooLong { field, len, max }) => {
                assert_eq!(field, Field::Title);
                assert_eq!(len, 31);
                assert_eq!(max, 30);
            }
            other => panic!("expected FieldTooLong, got {:?}", other),
        }

        let mut tag = sting();
        tag.year = "20044".to_string();
        assert!(matches!(
            tag.to_bytes(),
            Err(TagError::FieldTooLong { field: Field::Year, .. })
        ));
    }

    #[test]
    fn unencodable_text_is_rejected() {
        let mut tag = sting();
        tag.album = "東京".to_string();
        assert!(matches!(
            tag.to_bytes(),
            Err(TagError::Unencodable { field: Field::Album })
        ));
    }

    #[test]
    fn failed_encode_writes_nothing() {
        let mut tag = sting();
        tag.comment = "y".repeat(31);

        let mut cursor = Cursor::new(vec![1u8; 10]);
        assert!(tag.write_to(&mut cursor).is_err());
        assert_eq!(cursor.into_inner(), vec![1u8; 10]);
    }

    #[test]
    fn read_from_short_stream_is_not_found() {
        let mut cursor = Cursor::new(vec![0u8; 100]);
        assert!(matches!(
            Id3v1Tag::read_from(&mut cursor),
            Err(TagError::NotFound)
        ));
    }

    #[test]
    fn read_from_untagged_stream_is_not_found() {
        let mut cursor = Cursor::new(vec![0u8; 1000]);
        assert!(matches!(
            Id3v1Tag::read_from(&mut cursor),
            Err(TagError::NotFound)
        ));
    }

    #[test]
    fn locate_short_stream_is_io_error() {
        let mut cursor = Cursor::new(vec![0u8; 10]);
        assert!(matches!(locate(&mut cursor), Err(TagError::Io(_))));
    }

    #[test]
    fn write_appends_then_overwrites() {
        let mut cursor = Cursor::new(vec![0xAAu8; 500]);
        sting().write_to(&mut cursor).unwrap();
        assert_eq!(cursor.get_ref().len(), 500 + TAG_SIZE);

        let mut updated = sting();
        updated.title = "Shape of My Heart".to_string();
        updated.write_to(&mut cursor).unwrap();
        assert_eq!(cursor.get_ref().len(), 500 + TAG_SIZE);

        assert_eq!(Id3v1Tag::read_from(&mut cursor).unwrap(), updated);
        assert!(cursor.get_ref()[..500].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn encode_writes_at_current_position() {
        let mut out = Vec::new();
        encode(&mut out, &sting()).unwrap();
        assert_eq!(out.len(), TAG_SIZE);
        assert!(validate(&out));
    }

    #[test]
    fn display_matches_listing_layout() {
        let expected = "Title..: Englishman in New York\n\
                        Artist.: Sting\n\
                        Album..: Album\n\
                        Year...: Year\n\
                        Comment: Comment\n\
                        Genre..: Soundtrack (24)\n\
                        Track..: 4";
        assert_eq!(sting().to_string(), expected);
    }

    #[test]
    fn serde_fills_missing_fields() {
        let tag: Id3v1Tag = serde_json::from_str(r#"{"artist":"Sting","track":4}"#).unwrap();
        assert_eq!(tag.artist, "Sting");
        assert_eq!(tag.track, 4);
        assert_eq!(tag.title, "");
        assert_eq!(tag.genre, 0);
    }
}
