//! Line framing: one JSON value per `\n`-terminated line.

use std::io::{self, BufRead, Read, Write};
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, WordleError};

/// Longest line accepted from a peer, newline included.
pub const MAX_FRAME_BYTES: u64 = 64 * 1024;

/// Write `message` as one line and flush.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()?;
    Ok(())
}

/// Read one line and decode it.
///
/// `Ok(None)` at end of stream. I/O failures and oversized lines are
/// `Transport` errors; a line that is not the expected JSON (bad UTF-8
/// included) is a `Protocol` error and leaves the stream usable.
pub fn read_frame<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> Result<Option<T>> {
    let mut line = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_FRAME_BYTES)
        .read_until(b'\n', &mut line)?;
    if read == 0 {
        return Ok(None);
    }
    if line.last() != Some(&b'\n') && read as u64 == MAX_FRAME_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame exceeds {} bytes", MAX_FRAME_BYTES),
        )
        .into());
    }

    serde_json::from_slice(line.trim_ascii_end())
        .map(Some)
        .map_err(|e| WordleError::protocol(format!("malformed frame: {}", e)))
}

/// Iterator over the frames of a stream.
///
/// Ends at end of stream, and right after yielding a `Transport` error.
pub struct Frames<'a, R, T> {
    reader: &'a mut R,
    done: bool,
    _frame: PhantomData<fn() -> T>,
}

impl<'a, R: BufRead, T: DeserializeOwned> Frames<'a, R, T> {
    pub fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            done: false,
            _frame: PhantomData,
        }
    }
}

impl<R: BufRead, T: DeserializeOwned> Iterator for Frames<'_, R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_frame::<R, T>(self.reader) {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = e.is_fatal_to_session();
                Some(Err(e))
            }
        }
    }
}
