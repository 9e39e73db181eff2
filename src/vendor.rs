use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::word::Word;

/// Pluggable speech-to-text vendor used by [`crate::Transcriber`].
///
/// A vendor accepts media (either uploaded bytes or a URL it can fetch itself), runs an
/// asynchronous transcript job, and reports the job's state on request. Polling cadence
/// and the overall request sequence belong to the caller.
pub trait Vendor {
    /// Upload raw media bytes and return a URL the vendor can transcribe from.
    fn upload(&self, media: Box<dyn Read + Send>) -> Result<String>;

    /// Submit a transcript job.
    fn create_transcript(&self, req: &CreateTranscriptRequest) -> Result<TranscriptResponse>;

    /// Fetch the current state of a transcript job.
    fn get_transcript(&self, id: &str) -> Result<TranscriptResponse>;

    /// Download media the vendor cannot reach on its own, for re-upload via [`Vendor::upload`].
    fn fetch_media(&self, url: &str) -> Result<Box<dyn Read + Send>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub upload_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTranscriptRequest {
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    pub punctuate: bool,
    pub format_text: bool,
}

impl CreateTranscriptRequest {
    pub fn new(audio_url: impl Into<String>, language_code: Option<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            language_code,
            punctuate: true,
            format_text: true,
        }
    }
}

/// Lifecycle of a vendor transcript job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl TranscriptStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub status: TranscriptStatus,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub words: Option<Vec<Word>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The completed transcription as consumed by the segmenter.
///
/// `words` is absent when the vendor omits word-level timing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

impl From<TranscriptResponse> for TranscriptResult {
    fn from(resp: TranscriptResponse) -> Self {
        Self {
            text: resp.text.unwrap_or_default(),
            words: resp.words,
        }
    }
}
