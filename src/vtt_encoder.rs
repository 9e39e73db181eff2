use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments in WebVTT format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - We write the WebVTT header lazily on the first write so that
///   even "no segments" runs still behave predictably (close just flushes).
pub struct VttEncoder<W: Write> {
    w: W,

    /// Whether we've written the `WEBVTT` header.
    started: bool,

    closed: bool,
}

impl<W: Write> VttEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        if !self.started {
            // WebVTT files begin with a mandatory header line followed by a blank line.
            self.w.write_all(b"WEBVTT\n\n")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for VttEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        self.start_if_needed()?;

        let start = format_timestamp_vtt(seg.start_seconds);
        let end = format_timestamp_vtt(seg.end_seconds);

        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", escape_cue_text(&seg.text))?;
        writeln!(&mut self.w)?;

        self.w.flush()?;
        Ok(())
    }

    /// There are no times to build a cue from, so the text goes into a `NOTE` block.
    fn write_plain_text(&mut self, text: &str) -> Result<()> {
        self.start_if_needed()?;

        // A blank line would end the NOTE block early.
        let body = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let body = escape_cue_text(&body);

        writeln!(&mut self.w, "NOTE")?;
        writeln!(&mut self.w, "{body}")?;
        writeln!(&mut self.w)?;

        self.w.flush()?;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Cue payloads and comments must not contain `-->`, which parsers read as a timing line.
fn escape_cue_text(text: &str) -> String {
    text.replace("-->", "--&gt;")
}

/// Format seconds into a WebVTT timestamp (`HH:MM:SS.mmm`).
///
/// Rounds to the nearest millisecond.
fn format_timestamp_vtt(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
            words: Vec::new(),
        }
    }

    #[test]
    fn vtt_close_without_segments_emits_nothing() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn vtt_writes_header_once_and_formats_cues() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);

        enc.write_segment(&seg(0.0, 1.2, "I am."))?;
        enc.write_segment(&seg(61.2, 62.0, "Next"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert!(s.starts_with("WEBVTT\n\n"));
        assert!(s.contains("00:00:00.000 --> 00:00:01.200\nI am.\n\n"));
        assert!(s.contains("00:01:01.200 --> 00:01:02.000\nNext\n\n"));
        assert_eq!(s.matches("WEBVTT\n\n").count(), 1);
        Ok(())
    }

    #[test]
    fn vtt_plain_text_becomes_note_block() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.write_plain_text("first line\n\nsecond line")?;
        enc.close()?;

        assert_eq!(
            std::str::from_utf8(&out)?,
            "WEBVTT\n\nNOTE\nfirst line\nsecond line\n\n"
        );
        Ok(())
    }

    #[test]
    fn vtt_escapes_arrows_in_cue_text() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.write_segment(&seg(0.0, 1.0, "a --> b"))?;
        enc.close()?;

        assert_eq!(
            std::str::from_utf8(&out)?,
            "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\na --&gt; b\n\n"
        );
        Ok(())
    }

    #[test]
    fn vtt_escapes_arrows_in_note_block() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.write_plain_text("step one --> step two")?;
        enc.close()?;

        let text = std::str::from_utf8(&out)?;
        assert_eq!(text, "WEBVTT\n\nNOTE\nstep one --&gt; step two\n\n");
        assert!(!text.contains("one -->"));
        Ok(())
    }

    #[test]
    fn vtt_format_timestamp_rounds_to_nearest_millisecond() {
        assert_eq!(format_timestamp_vtt(0.0004), "00:00:00.000");
        assert_eq!(format_timestamp_vtt(1.9996), "00:00:02.000");
        assert_eq!(format_timestamp_vtt(3723.5), "01:02:03.500");
    }

    #[test]
    fn vtt_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = VttEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
