//! The narrow boundary to the page hosting the review player.
//!
//! Everything that depends on host markup (finding the video, typing into the comment box)
//! sits behind [`Host`]; the rest of the crate only sees plain data.

use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::opts::Opts;
use crate::seek::{estimate_seek, estimate_seek_timed};
use crate::segments::Segment;
use crate::session::Session;
use crate::timecode::format_clock;
use crate::transcriber::{MediaSource, Transcriber};
use crate::transcript::Transcript;
use crate::vendor::Vendor;
use crate::{Error, Result};

pub trait Host {
    /// Find the media currently loaded in the host's player.
    fn locate_media(&mut self) -> Result<MediaSource>;

    /// Insert `text` into the host's comment editor as if the user typed it.
    fn insert_comment(&mut self, text: &str) -> Result<()>;
}

/// Comment text for a selection: the selection prefixed by the time code it seeks to.
pub fn comment_for_selection(segment: &Segment, selection: &str, word_timed: bool) -> String {
    let at = if word_timed {
        estimate_seek_timed(segment, selection)
    } else {
        estimate_seek(segment, selection)
    };

    let quoted = selection.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("[{}] {quoted}", format_clock(at))
}

/// Transcribe whatever the host is playing and make it the session's live transcript.
///
/// The session lock is only held to start and to finish the request, so the page can start
/// a newer request (e.g. after navigating to another clip) while this one is polling. In that
/// case the result is dropped and `None` is returned.
pub fn transcribe_page<H, V>(
    host: &mut H,
    transcriber: &mut Transcriber<V>,
    session: &Mutex<Session>,
    opts: &Opts,
) -> Result<Option<Transcript>>
where
    H: Host,
    V: Vendor,
{
    let source = host.locate_media()?;
    let ticket = lock(session)?.begin_request();

    let result = transcriber.transcribe_result(&source, opts)?;
    let transcript = Transcript::from_result(&result);

    if !lock(session)?.complete(ticket, transcript.clone()) {
        return Ok(None);
    }

    info!(segments = transcript.segments.len(), "transcript ready");
    Ok(Some(transcript))
}

fn lock(session: &Mutex<Session>) -> Result<MutexGuard<'_, Session>> {
    session
        .lock()
        .map_err(|_| Error::msg("session state is poisoned"))
}

/// Post a comment quoting `selection` from segment `index` of the live transcript.
///
/// Returns `false` when there is no such segment.
pub fn comment_on_selection<H: Host>(
    host: &mut H,
    session: &Session,
    index: usize,
    selection: &str,
    word_timed: bool,
) -> Result<bool> {
    let Some(segment) = session.transcript().and_then(|t| t.segments.get(index)) else {
        return Ok(false);
    };

    host.insert_comment(&comment_for_selection(segment, selection, word_timed))?;
    Ok(true)
}
