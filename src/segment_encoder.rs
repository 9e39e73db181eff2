use crate::Result;
use crate::segments::Segment;

/// Streaming sink for rendered transcript output.
///
/// Callers own the encoder lifecycle: write zero or more segments (or a single untimed
/// block via `write_plain_text`) and then `close`. `close` is idempotent; writes after
/// it fail.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;

    /// Write a transcript that has no word timing as one untimed block.
    fn write_plain_text(&mut self, text: &str) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}
