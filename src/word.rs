use serde::{Deserialize, Serialize};

/// A single time-coded word as returned by the transcription vendor.
///
/// Timestamps stay in the vendor's milliseconds; conversion to seconds happens when
/// words are grouped into [`crate::segments::Segment`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    /// Onset in milliseconds.
    pub start: i64,
    /// Offset in milliseconds. Not guaranteed to precede the next word's `start`.
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Word {
    pub fn new(text: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence: None,
        }
    }

    pub fn start_seconds(&self) -> f64 {
        ms_to_seconds(self.start)
    }

    pub fn end_seconds(&self) -> f64 {
        ms_to_seconds(self.end)
    }
}

/// Vendor milliseconds → seconds.
///
/// Values are not validated; clamping for display is left to the renderers.
pub fn ms_to_seconds(value: i64) -> f64 {
    value as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_to_seconds_divides_by_one_thousand() {
        assert_eq!(ms_to_seconds(0), 0.0);
        assert_eq!(ms_to_seconds(1200), 1.2);
        assert_eq!(ms_to_seconds(3400), 3.4);
    }

    #[test]
    fn ms_to_seconds_passes_negative_values_through() {
        assert_eq!(ms_to_seconds(-1), -0.001);
        assert_eq!(ms_to_seconds(-500), -0.5);
    }

    #[test]
    fn deserializes_vendor_word_shape() -> anyhow::Result<()> {
        let w: Word =
            serde_json::from_str(r#"{"text":"Hello","start":250,"end":650,"confidence":0.98}"#)?;
        assert_eq!(w.text, "Hello");
        assert_eq!(w.start_seconds(), 0.25);
        assert_eq!(w.end_seconds(), 0.65);
        assert_eq!(w.confidence, Some(0.98));

        let bare: Word = serde_json::from_str(r#"{"text":"x","start":0,"end":1}"#)?;
        assert_eq!(bare.confidence, None);
        Ok(())
    }
}
