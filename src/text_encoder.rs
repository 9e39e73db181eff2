use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::timecode::format_clock;

/// A `SegmentEncoder` that renders the transcript the way the review sidebar lists it:
/// one `[m:ss] text` line per segment.
pub struct TextEncoder<W: Write> {
    w: W,
    closed: bool,
}

impl<W: Write> TextEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for TextEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        self.ensure_open()?;
        writeln!(&mut self.w, "[{}] {}", format_clock(seg.start_seconds), seg.text)?;
        self.w.flush()?;
        Ok(())
    }

    fn write_plain_text(&mut self, text: &str) -> Result<()> {
        self.ensure_open()?;
        writeln!(&mut self.w, "{text}")?;
        self.w.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}
