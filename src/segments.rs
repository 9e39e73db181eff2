//! Grouping of vendor words into display segments.
//!
//! A segment closes after a word that ends an utterance (terminal punctuation) or that
//! is followed by a pause longer than the configured gap. The last word always closes
//! the last segment, so every input word lands in exactly one segment, in order.

use serde::{Deserialize, Serialize};

use crate::word::{Word, ms_to_seconds};

/// Pause (in seconds) after which a new segment starts.
pub const DEFAULT_MAX_GAP_SECONDS: f64 = 1.0;

/// Trailing characters that end an utterance.
pub const DEFAULT_TERMINATORS: &[char] = &['.', '!', '?'];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Segment {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
    /// Source words of this run, in vendor milliseconds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}

impl Segment {
    /// Build a segment from a contiguous, non-empty run of words.
    fn from_run(run: &[Word]) -> Option<Self> {
        let first = run.first()?;
        let last = run.last()?;

        let text = run
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            start_seconds: ms_to_seconds(first.start),
            end_seconds: ms_to_seconds(last.end),
            text,
            words: run.to_vec(),
        })
    }

    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Tunables for [`segment_words_with`].
#[derive(Debug, Clone)]
pub struct SegmenterOpts {
    pub max_gap_seconds: f64,
    pub terminators: &'static [char],
}

impl Default for SegmenterOpts {
    fn default() -> Self {
        Self {
            max_gap_seconds: DEFAULT_MAX_GAP_SECONDS,
            terminators: DEFAULT_TERMINATORS,
        }
    }
}

/// Group words into segments using the default boundary rule.
///
/// Empty input yields no segments; callers fall back to the untimed transcript text.
pub fn segment_words(words: &[Word]) -> Vec<Segment> {
    segment_words_with(words, &SegmenterOpts::default())
}

pub fn segment_words_with(words: &[Word], opts: &SegmenterOpts) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start = 0;

    for (i, word) in words.iter().enumerate() {
        let closes = match words.get(i + 1) {
            Some(next) => {
                ends_utterance(word, opts) || gap_seconds(word, next) > opts.max_gap_seconds
            }
            None => true,
        };

        if closes {
            segments.extend(Segment::from_run(&words[run_start..=i]));
            run_start = i + 1;
        }
    }

    segments
}

fn ends_utterance(word: &Word, opts: &SegmenterOpts) -> bool {
    word.text
        .chars()
        .last()
        .is_some_and(|c| opts.terminators.contains(&c))
}

// Overlapping words (next.start < word.end) produce a negative gap, which never breaks.
// Computed in f64 so extreme vendor values cannot overflow.
fn gap_seconds(word: &Word, next: &Word) -> f64 {
    (next.start as f64 - word.end as f64) / 1000.0
}
