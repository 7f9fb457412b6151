//! Frame sources feeding landmarks into the analyzer.
//!
//! Camera capture and pose inference live outside this crate. Whatever runs
//! them only has to implement [`FrameSource`], handing over one landmark set
//! (or nothing, when no body was found) per tick.

use crate::{landmarks::NormalizedJoint, Error, Result};
use log::debug;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Landmarks for one frame; `None` when the model found no body
pub type Frame = Option<Vec<NormalizedJoint>>;

/// Producer of per-frame landmarks
pub trait FrameSource {
    /// Next frame, or `Ok(None)` once the stream has ended
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying producer fails
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// In-memory frame sequence
#[derive(Debug, Clone, Default)]
pub struct SyntheticFrames {
    frames: VecDeque<Frame>,
}

impl SyntheticFrames {
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet delivered
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for SyntheticFrames {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

/// Landmark recording in JSON-lines form
///
/// Each non-blank line holds one frame: a JSON array of
/// `{"x", "y", "z", "visibility"}` objects, or `null` when nobody was
/// detected. `z` and `visibility` may be omitted.
pub struct RecordedFrames<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl RecordedFrames<BufReader<File>> {
    /// Open a recording file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening landmark recording: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordedFrames<R> {
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> FrameSource for RecordedFrames<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }

            let frame: Frame = serde_json::from_str(line).map_err(|e| {
                Error::FrameSource(format!("Invalid landmarks on line {}: {e}", self.line_number))
            })?;
            return Ok(Some(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_synthetic_frames_drain_in_order() {
        let mut source = SyntheticFrames::new(vec![None, Some(vec![NormalizedJoint::new(0.5, 0.5)])]);
        assert_eq!(source.remaining(), 2);

        assert_eq!(source.next_frame().unwrap(), Some(None));
        assert_eq!(source.next_frame().unwrap().unwrap().unwrap().len(), 1);
        assert_eq!(source.next_frame().unwrap(), None);
    }

    #[test]
    fn test_recorded_frames_parse_lines() {
        let data = "[{\"x\":0.5,\"y\":0.25,\"z\":-0.1,\"visibility\":0.9}]\n\nnull\n[]\n";
        let mut source = RecordedFrames::from_reader(Cursor::new(data));

        let first = source.next_frame().unwrap().unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].x, 0.5);
        assert_eq!(first[0].visibility, 0.9);

        // Blank line skipped
        assert_eq!(source.next_frame().unwrap(), Some(None));
        assert_eq!(source.line_number(), 3);

        assert_eq!(source.next_frame().unwrap(), Some(Some(Vec::new())));
        assert_eq!(source.next_frame().unwrap(), None);
    }

    #[test]
    fn test_recorded_frames_report_bad_line() {
        let data = "null\n{not json}\n";
        let mut source = RecordedFrames::from_reader(Cursor::new(data));

        assert!(source.next_frame().unwrap().is_some());
        match source.next_frame() {
            Err(Error::FrameSource(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("Expected FrameSource error, got {other:?}"),
        }
    }
}
