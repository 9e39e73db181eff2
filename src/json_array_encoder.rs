use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments as a single JSON array.
///
/// Design:
/// - We stream output directly to a `Write` implementation to avoid buffering
///   all segments in memory.
/// - The encoder is stateful so we can emit a well-formed JSON array incrementally.
///
/// Example output:
/// ```json
/// [
///   {
///     "start_seconds": 0.0, "end_seconds": 1.2, "text": "I am.",
///     "words": [
///       { "text": "I", "start": 0, "end": 500 },
///       { "text": "am.", "start": 500, "end": 1200 }
///     ]
///   },
///   {
///     "start_seconds": 3.4, "end_seconds": 3.9, "text": "Next",
///     "words": [{ "text": "Next", "start": 3400, "end": 3900 }]
///   }
/// ]
/// ```
///
/// Segments carry their source `words` (omitted when empty), so the output can be fed back
/// into the offline `seek` command.
pub struct JsonArrayEncoder<W: Write> {
    w: W,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Whether the next element will be the first element in the array.
    first: bool,

    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    /// Write the opening `[` lazily so that empty output still results in valid JSON (`[]`).
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }

    fn write_element<T: serde::Serialize>(&mut self, value: &T) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, value)?;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }
}

impl<W: Write> SegmentEncoder for JsonArrayEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        self.write_element(seg)
    }

    /// Untimed transcripts become a single element holding only `text`.
    fn write_plain_text(&mut self, text: &str) -> Result<()> {
        self.write_element(&serde_json::json!({ "text": text }))
    }

    /// Finalize the JSON array and flush the underlying writer. Idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
