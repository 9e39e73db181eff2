//! High-level API for transcribing a piece of review media.
//!
//! We expose a single entry point (`Transcriber`) that wraps the vendor request sequence:
//! acquire media → upload (when the vendor can't fetch it) → create job → poll → segment → encode.
//!
//! Exactly one vendor request is outstanding at a time, and polling runs on a fixed delay.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;

use tracing::{debug, info, instrument, warn};

use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::segment_encoder::SegmentEncoder;
use crate::text_encoder::TextEncoder;
use crate::transcript::Transcript;
use crate::vendor::{CreateTranscriptRequest, TranscriptResult, TranscriptStatus, Vendor};
use crate::vtt_encoder::VttEncoder;
use crate::{Error, Result};

/// Where the media to transcribe comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// A URL the vendor can fetch directly.
    Url(String),
    /// A local file, uploaded to the vendor.
    File(PathBuf),
    /// A URL only we can reach (e.g. behind the review app's session); downloaded and re-uploaded.
    Remote(String),
}

/// Callback invoked after every status poll with the attempt number and observed status.
pub type ProgressFn = Box<dyn FnMut(u32, TranscriptStatus)>;

/// The main high-level transcription entry point.
///
/// Typical usage:
/// - Construct once with a vendor.
/// - Call `transcribe` for each piece of media.
pub struct Transcriber<V: Vendor> {
    vendor: V,
    progress: Option<ProgressFn>,
}

impl<V: Vendor> Transcriber<V> {
    pub fn new(vendor: V) -> Self {
        Self {
            vendor,
            progress: None,
        }
    }

    /// Report polling progress through `progress`.
    pub fn with_progress(
        mut self,
        progress: impl FnMut(u32, TranscriptStatus) + 'static,
    ) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Transcribe `source` and write the rendered transcript to `w`.
    ///
    /// The encoder is always closed, even when transcription fails part way; the transcription
    /// error wins over a close error.
    pub fn transcribe<W: Write>(
        &mut self,
        source: &MediaSource,
        w: W,
        opts: &Opts,
    ) -> Result<Transcript> {
        let writer = BufWriter::new(w);

        match opts.output_type {
            OutputType::Json => {
                let mut encoder = JsonArrayEncoder::new(writer);
                let run_res = self.transcribe_with_encoder(source, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputType::Vtt => {
                let mut encoder = VttEncoder::new(writer);
                let run_res = self.transcribe_with_encoder(source, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputType::Text => {
                let mut encoder = TextEncoder::new(writer);
                let run_res = self.transcribe_with_encoder(source, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
        }
    }

    fn transcribe_with_encoder<E: SegmentEncoder>(
        &mut self,
        source: &MediaSource,
        opts: &Opts,
        encoder: &mut E,
    ) -> Result<Transcript> {
        let result = self.transcribe_result(source, opts)?;
        let transcript = Transcript::from_result(&result);

        if !transcript.is_segmented() {
            warn!("vendor returned no word timing; emitting untimed transcript");
        }

        transcript.write_to(encoder)?;
        Ok(transcript)
    }

    /// Run the vendor request sequence for `source` and return the raw result.
    #[instrument(skip(self, opts))]
    pub fn transcribe_result(
        &mut self,
        source: &MediaSource,
        opts: &Opts,
    ) -> Result<TranscriptResult> {
        let audio_url = self.acquire(source)?;

        let req = CreateTranscriptRequest::new(audio_url, opts.language.clone());
        let created = self.vendor.create_transcript(&req)?;
        info!(id = %created.id, "transcript job created");

        let id = created.id.clone();
        let mut resp = created;
        let mut attempts: u32 = 0;

        loop {
            match resp.status {
                TranscriptStatus::Completed => {
                    info!(%id, attempts, "transcript completed");
                    return Ok(resp.into());
                }
                TranscriptStatus::Error => {
                    let message = resp
                        .error
                        .unwrap_or_else(|| "vendor reported an error without details".to_owned());
                    return Err(Error::Vendor(message));
                }
                TranscriptStatus::Queued | TranscriptStatus::Processing => {}
            }

            if opts.max_polls.is_some_and(|max| attempts >= max) {
                warn!(%id, attempts, "giving up on transcript");
                return Err(Error::PollLimit { attempts });
            }

            thread::sleep(opts.poll_interval);
            attempts += 1;

            resp = self.vendor.get_transcript(&id)?;
            debug!(%id, attempts, status = ?resp.status, "polled transcript");

            if let Some(progress) = self.progress.as_mut() {
                progress(attempts, resp.status);
            }
        }
    }

    /// Turn a media source into a URL the vendor can fetch.
    fn acquire(&self, source: &MediaSource) -> Result<String> {
        match source {
            MediaSource::Url(url) => Ok(url.clone()),
            MediaSource::File(path) => {
                let file = File::open(path).map_err(|err| {
                    Error::msg(format!("failed to open media '{}': {err}", path.display()))
                })?;
                info!(path = %path.display(), "uploading local media");
                self.vendor.upload(Box::new(file))
            }
            MediaSource::Remote(url) => {
                let media = self.vendor.fetch_media(url)?;
                info!(%url, "re-uploading remote media");
                self.vendor.upload(media)
            }
        }
    }

    pub fn vendor(&self) -> &V {
        &self.vendor
    }
}

fn merge_run_and_close<T>(run_res: Result<T>, close_res: Result<()>) -> Result<T> {
    match (run_res, close_res) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), _) => Err(err),
    }
}
