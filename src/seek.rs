//! Mapping a text selection inside a segment to a playback position.
//!
//! The estimate interpolates uniformly across the segment's words and then backs off a
//! few word-widths so playback starts with some audible lead-in before the selection.

use crate::segments::Segment;

/// How many word-widths to start playback before the selected words.
pub const LEAD_IN_WORDS: usize = 3;

/// Estimate the seek time (seconds) for `selection` within `segment`.
///
/// The result never precedes `segment.start_seconds`. A selection that cannot be located
/// falls back to the start of the segment rather than failing.
pub fn estimate_seek(segment: &Segment, selection: &str) -> f64 {
    let n = segment.text.split_whitespace().count();
    if n == 0 {
        return segment.start_seconds;
    }

    let i = locate_selection(&segment.text, selection);
    let time_per_word = segment.duration_seconds() / n as f64;
    let estimated = segment.start_seconds + i as f64 * time_per_word;

    (estimated - LEAD_IN_WORDS as f64 * time_per_word).max(segment.start_seconds)
}

/// Like [`estimate_seek`], but uses the vendor's per-word onsets when the segment still
/// carries one word per whitespace token of its text.
///
/// Seeks to the onset of the word [`LEAD_IN_WORDS`] before the located one.
pub fn estimate_seek_timed(segment: &Segment, selection: &str) -> f64 {
    let n = segment.text.split_whitespace().count();
    if n == 0 || segment.words.len() != n {
        return estimate_seek(segment, selection);
    }

    let i = locate_selection(&segment.text, selection);
    let onset = segment.words[i.saturating_sub(LEAD_IN_WORDS)].start_seconds();

    let upper = segment.end_seconds.max(segment.start_seconds);
    onset.max(segment.start_seconds).min(upper)
}

/// Index of the first word of `text` where `selection` begins.
///
/// A window of as many words as the selection holds matches when either string contains
/// the other, so partial-word selections still resolve. Returns 0 when nothing matches.
pub fn locate_selection(text: &str, selection: &str) -> usize {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let wanted: Vec<&str> = selection.split_whitespace().collect();
    let k = wanted.len();
    let wanted = wanted.join(" ");

    (0..tokens.len())
        .find(|&i| {
            let window = tokens[i..(i + k).min(tokens.len())].join(" ");
            window.contains(&wanted) || wanted.contains(&window)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Word;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_owned(),
            words: Vec::new(),
        }
    }

    #[test]
    fn early_selection_clamps_to_segment_start() {
        let s = seg(10.0, 20.0, "one two three four five");
        assert_eq!(locate_selection(&s.text, "three"), 2);
        assert_eq!(estimate_seek(&s, "three"), 10.0);
    }

    #[test]
    fn late_selection_backs_off_three_words() {
        let s = seg(10.0, 20.0, "one two three four five");
        assert_eq!(locate_selection(&s.text, "five"), 4);
        assert_eq!(estimate_seek(&s, "five"), 12.0);
    }

    #[test]
    fn multi_word_selection_with_surrounding_whitespace() {
        let s = seg(0.0, 10.0, "a b c d e f g h i j");
        assert_eq!(locate_selection(&s.text, "  h\n i "), 7);
        assert_eq!(estimate_seek(&s, "  h\n i "), 4.0);
    }

    #[test]
    fn partial_word_selection_is_located() {
        let s = seg(0.0, 4.0, "alpha bravo charlie delta");
        assert_eq!(locate_selection(&s.text, "arli"), 2);
        assert_eq!(locate_selection(&s.text, "charlie del"), 2);
    }

    #[test]
    fn unknown_selection_falls_back_to_first_word() {
        let s = seg(5.0, 9.0, "nothing to see here");
        assert_eq!(locate_selection(&s.text, "zebra"), 0);
        assert_eq!(estimate_seek(&s, "zebra"), 5.0);
    }

    #[test]
    fn whitespace_only_selection_is_accepted() {
        let s = seg(5.0, 9.0, "nothing to see here");
        assert_eq!(estimate_seek(&s, "   "), 5.0);
    }

    #[test]
    fn empty_segment_text_returns_start() {
        let s = seg(7.5, 9.0, "");
        assert_eq!(estimate_seek(&s, "anything"), 7.5);
        assert_eq!(estimate_seek_timed(&s, "anything"), 7.5);
    }

    #[test]
    fn estimation_is_deterministic() {
        let s = seg(1.0, 3.0, "the quick brown fox jumps");
        assert_eq!(estimate_seek(&s, "jumps"), estimate_seek(&s, "jumps"));
    }

    #[test]
    fn timed_seek_uses_vendor_onsets() {
        let words = vec![
            Word::new("one", 10_000, 10_500),
            Word::new("two", 10_600, 11_000),
            Word::new("three", 14_000, 14_500),
            Word::new("four", 15_000, 16_000),
            Word::new("five", 18_000, 20_000),
        ];
        let mut s = seg(10.0, 20.0, "one two three four five");
        s.words = words;

        // "five" is word 4; three words earlier is "two" at 10.6 s.
        assert_eq!(estimate_seek_timed(&s, "five"), 10.6);
        assert_eq!(estimate_seek_timed(&s, "two"), 10.0);
    }

    #[test]
    fn timed_seek_falls_back_when_words_do_not_line_up() {
        let mut s = seg(10.0, 20.0, "one two three four five");
        s.words = vec![Word::new("one two", 10_000, 12_000)];
        assert_eq!(estimate_seek_timed(&s, "five"), estimate_seek(&s, "five"));
    }
}
