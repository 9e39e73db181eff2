use serde::{Deserialize, Serialize};

use crate::Result;
use crate::seek::{estimate_seek, estimate_seek_timed};
use crate::segment_encoder::SegmentEncoder;
use crate::segments::{Segment, segment_words};
use crate::vendor::TranscriptResult;

/// A finished transcription, ready for display.
///
/// When the vendor supplied no word timing, `segments` is empty and `full_text` is shown
/// as a single untimed block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub full_text: String,
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn from_result(result: &TranscriptResult) -> Self {
        let segments = result
            .words
            .as_deref()
            .map(segment_words)
            .unwrap_or_default();

        Self {
            full_text: result.text.clone(),
            segments,
        }
    }

    pub fn is_segmented(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Index of the segment under the playhead, if any.
    ///
    /// A segment is active from its start up to (not including) its end. Between two
    /// segments nothing is active.
    pub fn segment_at(&self, seconds: f64) -> Option<usize> {
        // Segments are ordered by start, so the candidate is the last one starting at or before t.
        let idx = self
            .segments
            .partition_point(|s| s.start_seconds <= seconds)
            .checked_sub(1)?;

        (seconds < self.segments[idx].end_seconds).then_some(idx)
    }

    /// Seek target when a segment row is clicked.
    pub fn seek_for_click(&self, index: usize) -> Option<f64> {
        self.segments.get(index).map(|s| s.start_seconds)
    }

    /// Seek target for text selected within segment `index`.
    pub fn seek_for_selection(
        &self,
        index: usize,
        selection: &str,
        word_timed: bool,
    ) -> Option<f64> {
        let segment = self.segments.get(index)?;
        Some(if word_timed {
            estimate_seek_timed(segment, selection)
        } else {
            estimate_seek(segment, selection)
        })
    }

    /// Render every segment, or the untimed text, into `encoder`. Does not close it.
    pub fn write_to(&self, encoder: &mut dyn SegmentEncoder) -> Result<()> {
        if !self.is_segmented() {
            if self.full_text.is_empty() {
                return Ok(());
            }
            return encoder.write_plain_text(&self.full_text);
        }

        for seg in &self.segments {
            encoder.write_segment(seg)?;
        }
        Ok(())
    }
}
