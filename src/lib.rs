//! `reviewscribe` — time-coded transcripts for video review.
//!
//! This crate provides:
//! - A client for a remote speech-to-text vendor (upload, create job, poll)
//! - Segmenting of the vendor's flat word list into readable, time-coded segments
//! - Seeking from a text selection back to a playback position
//! - Pluggable output encoders (JSON, VTT, sidebar text)
//!
//! The segmenting and seeking core is pure and synchronous; everything touching the
//! network or the host page sits behind the [`Vendor`] and [`host::Host`] traits.

mod error;

// High-level API (most consumers should start here).
pub mod opts;
pub mod transcriber;

// Page-session state and the host-page boundary.
pub mod host;
pub mod session;

// Vendor boundary and built-in vendors.
pub mod vendor;
pub mod vendors;

// Core data structures and heuristics.
pub mod seek;
pub mod segments;
pub mod timecode;
pub mod transcript;
pub mod word;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod segment_encoder;

// Output encoders that serialize transcripts into various formats.
pub mod json_array_encoder;
pub mod text_encoder;
pub mod vtt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, Result};
pub use opts::{ClientConfig, Opts};
pub use output_type::OutputType;
pub use seek::{estimate_seek, estimate_seek_timed};
pub use segments::{Segment, segment_words};
pub use session::Session;
pub use transcriber::{MediaSource, Transcriber};
pub use transcript::Transcript;
pub use vendor::{TranscriptResult, Vendor};
pub use word::Word;

#[cfg(feature = "client")]
pub use vendors::assemblyai::HttpVendor;

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
