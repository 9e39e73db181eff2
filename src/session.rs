use tracing::debug;

use crate::transcript::Transcript;

/// Identifies one transcription request within a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Per-page transcript state.
///
/// A session holds at most one live transcript. Starting a new request discards the current
/// transcript and invalidates every earlier ticket, so a slow response for stale media can
/// never overwrite the transcript of the media now on screen.
#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    transcript: Option<Transcript>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.transcript = None;
        debug!(generation = self.generation, "transcript request started");
        RequestTicket(self.generation)
    }

    /// Store `transcript` if `ticket` is still the latest request. Returns whether it was kept.
    pub fn complete(&mut self, ticket: RequestTicket, transcript: Transcript) -> bool {
        if ticket.0 != self.generation {
            debug!(
                stale = ticket.0,
                current = self.generation,
                "dropping superseded transcript"
            );
            return false;
        }

        self.transcript = Some(transcript);
        true
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    /// Segment to highlight for the given playhead position.
    pub fn active_segment(&self, playhead_seconds: f64) -> Option<usize> {
        self.transcript.as_ref()?.segment_at(playhead_seconds)
    }

    pub fn seek_for_selection(
        &self,
        index: usize,
        selection: &str,
        word_timed: bool,
    ) -> Option<f64> {
        self.transcript
            .as_ref()?
            .seek_for_selection(index, selection, word_timed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendor::TranscriptResult;
    use crate::word::Word;

    fn transcript(text: &str) -> Transcript {
        Transcript::from_result(&TranscriptResult {
            text: text.to_owned(),
            words: Some(vec![Word::new(text, 1000, 2000)]),
        })
    }

    #[test]
    fn completes_the_current_request() {
        let mut session = Session::new();
        let ticket = session.begin_request();
        assert!(session.complete(ticket, transcript("hello")));
        assert_eq!(session.transcript().map(|t| t.full_text.as_str()), Some("hello"));
        assert_eq!(session.active_segment(1.5), Some(0));
        assert_eq!(session.seek_for_selection(0, "hello", false), Some(1.0));
    }

    #[test]
    fn new_request_supersedes_the_old_one() {
        let mut session = Session::new();
        let old = session.begin_request();
        let new = session.begin_request();

        assert!(!session.is_current(old));
        assert!(!session.complete(old, transcript("stale")));
        assert!(session.transcript().is_none());

        assert!(session.complete(new, transcript("fresh")));
        assert_eq!(session.transcript().map(|t| t.full_text.as_str()), Some("fresh"));
    }

    #[test]
    fn beginning_a_request_discards_the_live_transcript() {
        let mut session = Session::new();
        let ticket = session.begin_request();
        session.complete(ticket, transcript("first"));

        session.begin_request();
        assert!(session.transcript().is_none());
        assert_eq!(session.active_segment(1.5), None);
    }
}
