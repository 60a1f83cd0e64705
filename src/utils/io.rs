// I/O utilities for trailing tags

use std::io::{self, Read, Seek, SeekFrom};

/// Length of a seekable stream
///
/// Leaves the cursor at the end of the stream.
pub fn stream_len<S: Seek>(stream: &mut S) -> io::Result<u64> {
    stream.seek(SeekFrom::End(0))
}

/// Fill `buffer` with the last `buffer.len()` bytes of the stream
pub fn read_tail<R: Read + Seek>(reader: &mut R, buffer: &mut [u8]) -> io::Result<()> {
    let len = buffer.len() as u64;
    if stream_len(reader)? < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("stream is shorter than {} bytes", len),
        ));
    }

    reader.seek(SeekFrom::End(-(len as i64)))?;
    reader.read_exact(buffer)
}

/// Check if file has signature at current position
pub fn check_signature<R: Read + Seek>(reader: &mut R, signature: &[u8]) -> io::Result<bool> {
    let pos = reader.stream_position()?;
    let mut buffer = vec![0u8; signature.len()];
    let matched = match reader.read_exact(&mut buffer) {
        Ok(()) => buffer == signature,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => false,
        Err(e) => return Err(e),
    };
    reader.seek(SeekFrom::Start(pos))?;
    Ok(matched)
}
